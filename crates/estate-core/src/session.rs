//! Caller identity and the role gate.
//!
//! A [`Session`] is passed explicitly into every restricted marketplace
//! operation. The command line keeps one session between invocations in a
//! plain-text `email,role` record managed by [`SessionStore`]; the web front
//! end keeps it in an encrypted cookie.

use std::{
    fmt, fs,
    io::ErrorKind,
    path::{Path, PathBuf},
};

use log::debug;
use serde::{Deserialize, Serialize};

use crate::{
    error::{MarketError, Result},
    models::Role,
};

/// The authenticated caller.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Session {
    pub email: String,
    pub role: Role,
}

impl Session {
    pub fn new(email: impl Into<String>, role: Role) -> Self {
        Self {
            email: email.into(),
            role,
        }
    }

    /// Fails with [`MarketError::AccessDenied`] unless the caller holds
    /// `role`.
    pub fn require(&self, role: Role) -> Result<()> {
        if self.role == role {
            Ok(())
        } else {
            Err(MarketError::access_denied(format!(
                "this action is only available to {}s",
                role.as_str()
            )))
        }
    }

    /// Serializes to the `email,role` record format.
    pub fn to_record(&self) -> String {
        format!("{},{}", self.email, self.role.as_str())
    }

    /// Parses an `email,role` record.
    pub fn from_record(record: &str) -> Result<Self> {
        let (email, role) = record
            .trim()
            .rsplit_once(',')
            .ok_or_else(|| MarketError::Session("expected 'email,role'".to_string()))?;
        let role = role.parse::<Role>().map_err(MarketError::Session)?;
        let email = email.trim();
        if email.is_empty() {
            return Err(MarketError::Session("missing email".to_string()));
        }
        Ok(Self::new(email, role))
    }
}

impl fmt::Display for Session {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} ({})", self.email, self.role.as_str())
    }
}

/// File-backed storage for the single command-line session.
#[derive(Debug, Clone)]
pub struct SessionStore {
    path: PathBuf,
}

impl SessionStore {
    /// Uses `path` when given, otherwise
    /// `$XDG_STATE_HOME/estate/session.txt`.
    pub fn new<P: AsRef<Path>>(path: Option<P>) -> Result<Self> {
        let path = match path {
            Some(path) => path.as_ref().to_path_buf(),
            None => Self::default_path()?,
        };
        Ok(Self { path })
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    /// Loads the stored session, if any.
    pub fn load(&self) -> Result<Option<Session>> {
        match fs::read_to_string(&self.path) {
            Ok(contents) if contents.trim().is_empty() => Ok(None),
            Ok(contents) => Session::from_record(&contents).map(Some),
            Err(e) if e.kind() == ErrorKind::NotFound => Ok(None),
            Err(e) => Err(MarketError::FileSystem {
                path: self.path.clone(),
                source: e,
            }),
        }
    }

    /// Loads the stored session or fails with [`MarketError::NotLoggedIn`].
    pub fn require(&self) -> Result<Session> {
        self.load()?.ok_or(MarketError::NotLoggedIn)
    }

    /// Replaces the stored session.
    pub fn save(&self, session: &Session) -> Result<()> {
        if let Some(parent) = self.path.parent() {
            fs::create_dir_all(parent).map_err(|e| MarketError::FileSystem {
                path: parent.to_path_buf(),
                source: e,
            })?;
        }
        fs::write(&self.path, session.to_record()).map_err(|e| MarketError::FileSystem {
            path: self.path.clone(),
            source: e,
        })?;
        debug!("Saved session for {} to {}", session.email, self.path.display());
        Ok(())
    }

    /// Removes the stored session. Returns whether one existed.
    pub fn clear(&self) -> Result<bool> {
        match fs::remove_file(&self.path) {
            Ok(()) => Ok(true),
            Err(e) if e.kind() == ErrorKind::NotFound => Ok(false),
            Err(e) => Err(MarketError::FileSystem {
                path: self.path.clone(),
                source: e,
            }),
        }
    }

    fn default_path() -> Result<PathBuf> {
        xdg::BaseDirectories::with_prefix("estate")
            .place_state_file("session.txt")
            .map_err(|e| MarketError::XdgDirectory(e.to_string()))
    }
}

#[cfg(test)]
mod tests {
    use tempfile::TempDir;

    use super::*;

    #[test]
    fn test_role_gate() {
        let renter = Session::new("rita@example.com", Role::Renter);
        assert!(renter.require(Role::Renter).is_ok());
        assert!(matches!(
            renter.require(Role::Agent),
            Err(MarketError::AccessDenied { .. })
        ));
    }

    #[test]
    fn test_record_format() {
        let session = Session::new("al@example.com", Role::Agent);
        assert_eq!(session.to_record(), "al@example.com,agent");
        assert_eq!(Session::from_record("al@example.com,agent\n").unwrap(), session);
        assert!(Session::from_record("al@example.com").is_err());
        assert!(Session::from_record("al@example.com,admin").is_err());
        assert!(Session::from_record(",renter").is_err());
    }

    #[test]
    fn test_store_round_trip() {
        let temp_dir = TempDir::new().expect("Failed to create temp dir");
        let store = SessionStore::new(Some(temp_dir.path().join("nested/session.txt")))
            .expect("Failed to create store");

        assert_eq!(store.load().unwrap(), None);
        assert!(matches!(store.require(), Err(MarketError::NotLoggedIn)));

        let session = Session::new("rita@example.com", Role::Renter);
        store.save(&session).expect("Failed to save session");
        assert_eq!(store.load().unwrap(), Some(session));

        assert!(store.clear().unwrap());
        assert!(!store.clear().unwrap());
        assert_eq!(store.load().unwrap(), None);
    }
}
