//! Router tests driven through `tower::ServiceExt::oneshot`.

use std::collections::BTreeMap;

use axum::{
    body::{to_bytes, Body},
    http::{header, Request, StatusCode},
    Router,
};
use axum_extra::extract::cookie::Key;
use estate_core::MarketplaceBuilder;
use tempfile::TempDir;
use tower::ServiceExt;

use super::{router, WebState};

struct Page {
    status: StatusCode,
    location: Option<String>,
    body: String,
}

/// Minimal browser: remembers cookies between requests.
struct Browser {
    app: Router,
    cookies: BTreeMap<String, String>,
}

impl Browser {
    fn new(app: Router) -> Self {
        Self {
            app,
            cookies: BTreeMap::new(),
        }
    }

    async fn send(&mut self, builder: axum::http::request::Builder, body: Body) -> Page {
        let cookie_header = self
            .cookies
            .iter()
            .map(|(name, value)| format!("{name}={value}"))
            .collect::<Vec<_>>()
            .join("; ");
        let builder = if cookie_header.is_empty() {
            builder
        } else {
            builder.header(header::COOKIE, cookie_header)
        };

        let response = self
            .app
            .clone()
            .oneshot(builder.body(body).unwrap())
            .await
            .unwrap();

        for set_cookie in response.headers().get_all(header::SET_COOKIE) {
            let pair = set_cookie.to_str().unwrap().split(';').next().unwrap();
            let (name, value) = pair.split_once('=').unwrap();
            if value.is_empty() {
                self.cookies.remove(name);
            } else {
                self.cookies.insert(name.to_string(), value.to_string());
            }
        }

        let status = response.status();
        let location = response
            .headers()
            .get(header::LOCATION)
            .map(|value| value.to_str().unwrap().to_string());
        let bytes = to_bytes(response.into_body(), usize::MAX).await.unwrap();
        Page {
            status,
            location,
            body: String::from_utf8(bytes.to_vec()).unwrap(),
        }
    }

    async fn get(&mut self, uri: &str) -> Page {
        self.send(Request::get(uri), Body::empty()).await
    }

    async fn post(&mut self, uri: &str, form: &str) -> Page {
        let builder = Request::post(uri).header(
            header::CONTENT_TYPE,
            "application/x-www-form-urlencoded",
        );
        self.send(builder, Body::from(form.to_string())).await
    }

    /// Posts a form, expects a redirect and returns the page it leads to.
    async fn submit(&mut self, uri: &str, form: &str) -> Page {
        let page = self.post(uri, form).await;
        assert_eq!(page.status, StatusCode::SEE_OTHER, "{uri}: {}", page.body);
        let location = page.location.expect("redirect without location");
        self.get(&location).await
    }
}

async fn create_test_app() -> (TempDir, Router) {
    create_test_app_with_key(Key::generate()).await
}

async fn create_test_app_with_key(key: Key) -> (TempDir, Router) {
    let temp_dir = TempDir::new().expect("Failed to create temp dir");
    let market = MarketplaceBuilder::new()
        .with_database_path(Some(temp_dir.path().join("web.db")))
        .build()
        .await
        .expect("Failed to create marketplace");
    (temp_dir, router(WebState::new(market, key)))
}

async fn sign_up(browser: &mut Browser, email: &str, role: &str, extra: &str) {
    let page = browser
        .submit(
            "/register",
            &format!("email={email}&name=Test+User&role={role}{extra}"),
        )
        .await;
    assert!(page.body.contains("You can now log in."), "{}", page.body);
    let page = browser.submit("/login", &format!("email={email}")).await;
    assert!(page.body.contains("Logged in as"), "{}", page.body);
}

const HOUSE: &str = "property_type=house&street=1+Main+St&city=Springfield&state=IL&zip=62701\
    &price=100&available=on&rooms=3";

#[tokio::test]
async fn test_health() {
    let (_dir, app) = create_test_app().await;
    let page = Browser::new(app).get("/health").await;

    assert_eq!(page.status, StatusCode::OK);
    assert!(page.body.contains("\"status\":\"ok\""));
}

#[tokio::test]
async fn test_restricted_pages_require_login() {
    let (_dir, app) = create_test_app().await;
    let mut browser = Browser::new(app);

    for uri in ["/addresses", "/cards", "/properties", "/bookings", "/rewards"] {
        let page = browser.get(uri).await;
        assert_eq!(page.status, StatusCode::FORBIDDEN, "{uri}");
    }
    let page = browser.post("/cards", "card_number=4111111111111111").await;
    assert_eq!(page.status, StatusCode::FORBIDDEN);
}

#[tokio::test]
async fn test_forged_session_cookie_is_ignored() {
    let (_dir, app) = create_test_app().await;
    let mut browser = Browser::new(app);
    browser
        .cookies
        .insert("estate_session".to_string(), "agent@example.com,agent".to_string());

    let page = browser.get("/properties").await;
    assert_eq!(page.status, StatusCode::FORBIDDEN);
}

#[tokio::test]
async fn test_unknown_login_flashes_message() {
    let (_dir, app) = create_test_app().await;
    let mut browser = Browser::new(app);

    let page = browser.submit("/login", "email=nobody%40example.com").await;
    assert_eq!(page.status, StatusCode::OK);
    assert!(page.body.contains("No account uses that email"));

    // Flash messages are shown once.
    let page = browser.get("/").await;
    assert!(!page.body.contains("No account uses that email"));
}

#[tokio::test]
async fn test_role_gate_returns_forbidden() {
    let (_dir, app) = create_test_app().await;
    let mut browser = Browser::new(app);
    sign_up(&mut browser, "rita%40example.com", "renter", "").await;

    assert_eq!(browser.get("/properties").await.status, StatusCode::FORBIDDEN);
    assert_eq!(browser.get("/neighborhoods").await.status, StatusCode::FORBIDDEN);
    assert_eq!(browser.get("/addresses").await.status, StatusCode::OK);

    let page = browser.get("/logout").await;
    assert_eq!(page.status, StatusCode::SEE_OTHER);
    assert_eq!(browser.get("/addresses").await.status, StatusCode::FORBIDDEN);
}

#[tokio::test]
async fn test_invalid_input_redirects_with_flash() {
    let (_dir, app) = create_test_app().await;
    let mut browser = Browser::new(app);
    sign_up(&mut browser, "rita%40example.com", "renter", "").await;

    let page = browser
        .submit(
            "/cards",
            "card_number=1234&cvv=123&expiry=2099-12&billing_address_id=1",
        )
        .await;
    assert_eq!(page.status, StatusCode::OK);
    assert!(page.body.contains("must be exactly 16 digits"), "{}", page.body);
    assert!(page.body.contains("No credit cards found."));
}

#[tokio::test]
async fn test_booking_flow_earns_points_and_blocks_overlap() {
    let (_dir, app) = create_test_app().await;

    let mut agent = Browser::new(app.clone());
    sign_up(&mut agent, "alex%40example.com", "agent", "&agency=Harbor").await;
    let page = agent.submit("/properties", HOUSE).await;
    assert!(page.body.contains("Listed property 1"), "{}", page.body);

    let mut renter = Browser::new(app);
    sign_up(&mut renter, "rita%40example.com", "renter", "&join_rewards=on").await;
    let page = renter
        .submit(
            "/addresses",
            "street=9+Elm+St&city=Springfield&state=IL&zip=62702&is_primary=on",
        )
        .await;
    assert!(page.body.contains("Added address 1"));
    renter
        .submit(
            "/cards",
            "card_number=4111111111111111&cvv=123&expiry=2099-12&billing_address_id=1",
        )
        .await;

    let page = renter.get("/search?city=springfield").await;
    assert!(page.body.contains("action=\"/book/1\""), "{}", page.body);

    let page = renter
        .submit(
            "/book/1",
            "card_number=4111111111111111&start_date=2031-03-01&end_date=2031-03-04",
        )
        .await;
    assert!(
        page.body.contains("Booked property 1 for 3 nights, total $300.00."),
        "{}",
        page.body
    );
    assert!(page.body.contains("Earned 300 reward points, balance 300."));

    let page = renter
        .submit(
            "/book/1",
            "card_number=4111111111111111&start_date=2031-03-03&end_date=2031-03-05",
        )
        .await;
    assert!(page.body.contains("already booked"), "{}", page.body);

    let page = renter.get("/rewards/history").await;
    assert_eq!(page.status, StatusCode::OK);
    assert!(page.body.contains("300"));

    // The agent sees the booking on their property and cannot delete it.
    let page = agent.get("/bookings").await;
    assert!(page.body.contains("rita@example.com"));
    let page = agent.submit("/properties/1/delete", "").await;
    assert!(page.body.contains("Conflict"), "{}", page.body);
}

#[tokio::test]
async fn test_rewards_page_offers_enrollment() {
    let (_dir, app) = create_test_app().await;
    let mut browser = Browser::new(app);
    sign_up(&mut browser, "rita%40example.com", "renter", "").await;

    let page = browser.get("/rewards").await;
    assert!(page.body.contains("action=\"/rewards/join\""));

    let page = browser.get("/rewards/history").await;
    assert_eq!(page.status, StatusCode::SEE_OTHER);
    let page = browser.get("/rewards").await;
    assert!(page.body.contains("not enrolled"), "{}", page.body);

    let page = browser.submit("/rewards/join", "").await;
    assert!(page.body.contains("joined the reward program"));
    assert!(page.body.contains("# Reward points: 0"));
}

#[tokio::test]
async fn test_search_rejects_bad_filter() {
    let (_dir, app) = create_test_app().await;
    let mut browser = Browser::new(app);

    let page = browser.get("/search?min_price=cheap").await;
    assert_eq!(page.status, StatusCode::SEE_OTHER);

    let page = browser.get("/search").await;
    assert!(page.body.contains("is not a valid number"), "{}", page.body);
    assert!(page.body.contains("No properties match your search."));
}

#[tokio::test]
async fn test_home_treats_missing_account_as_logged_out() {
    let key = Key::generate();
    let (_dir, app) = create_test_app_with_key(key.clone()).await;
    let (_other_dir, other_app) = create_test_app_with_key(key).await;

    let mut browser = Browser::new(app);
    sign_up(&mut browser, "rita%40example.com", "renter", "").await;

    // A genuine cookie, presented to a marketplace that never had the account
    browser.app = other_app;
    let page = browser.get("/").await;
    assert_eq!(page.status, StatusCode::OK);
    assert!(page.body.contains("<h2>Log in</h2>"), "{}", page.body);
    assert!(!page.body.contains("rita@example.com"));
    assert!(!browser.cookies.contains_key("estate_session"));
}

#[tokio::test]
async fn test_neighborhood_with_slash_can_be_edited() {
    let (_dir, app) = create_test_app().await;
    let mut browser = Browser::new(app);
    sign_up(&mut browser, "alex%40example.com", "agent", "").await;

    let page = browser
        .submit(
            "/neighborhoods",
            "name=North%2FSouth+Side&crime_rate=1&nearby_schools=2",
        )
        .await;
    assert!(
        page.body.contains("action=\"/neighborhoods/North%2FSouth%20Side/edit\""),
        "{}",
        page.body
    );

    let page = browser
        .submit(
            "/neighborhoods/North%2FSouth%20Side/edit",
            "crime_rate=2.5&nearby_schools=4",
        )
        .await;
    assert!(
        page.body.contains("Updated neighborhood North/South Side"),
        "{}",
        page.body
    );
    assert!(page.body.contains("2.50"));
}

#[tokio::test]
async fn test_listing_above_price_ceiling_is_rejected() {
    let (_dir, app) = create_test_app().await;
    let mut browser = Browser::new(app);
    sign_up(&mut browser, "alex%40example.com", "agent", "").await;

    let page = browser
        .submit("/properties", &HOUSE.replace("price=100", "price=1000000.01"))
        .await;
    assert!(page.body.contains("must not exceed 1000000"), "{}", page.body);
    assert!(!page.body.contains("Listed property"));
}
