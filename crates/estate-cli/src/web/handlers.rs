//! Route handlers.
//!
//! Pages render the current flash message and consume it. Mutations answer
//! `303 See Other` back to the listing page with a new flash message.

use axum::{
    extract::{Path, Query, State},
    response::{Html, IntoResponse, Redirect, Response},
    Form, Json,
};
use axum_extra::extract::cookie::PrivateCookieJar;
use estate_core::{
    display::{Addresses, Bookings, Cards, Neighborhoods, Properties, PropertyMatches},
    models::SearchFilter,
    params::{CardInput, CardNumber, Id, PropertyInput, Register, UpdateAddress, UpdateProperty},
    MarketError, Session,
};
use log::info;
use serde_json::{json, Value};

use super::{
    error::{FlashOnError, WebError},
    forms::{
        AddressForm, BookForm, CardForm, EditCardForm, LoginForm, NeighborhoodForm, PropertyForm,
        RegisterForm, SearchForm,
    },
    pages,
    session::{log_in, log_out, take_flash, with_flash, CurrentSession, MaybeSession},
    WebState,
};

type PageResult = Result<Response, WebError>;

fn render(jar: PrivateCookieJar, session: Option<&Session>, title: &str, body: String) -> Response {
    let (jar, flash) = take_flash(jar);
    (jar, Html(pages::layout(title, session, flash.as_deref(), &body))).into_response()
}

fn done(jar: PrivateCookieJar, to: &str, message: impl Into<String>) -> Response {
    let message = message.into();
    info!("{message}");
    (with_flash(jar, message), Redirect::to(to)).into_response()
}

pub async fn health() -> Json<Value> {
    Json(json!({ "status": "ok" }))
}

// ============================================================================
// Accounts
// ============================================================================

pub async fn home(
    State(state): State<WebState>,
    MaybeSession(session): MaybeSession,
    jar: PrivateCookieJar,
) -> PageResult {
    let (jar, session, account) = match session {
        Some(session) => match state.market.whoami(&session).await {
            Ok(account) => (jar, Some(session), Some(account)),
            // The cookie names an account this database does not have
            Err(MarketError::NotLoggedIn) => (log_out(jar), None, None),
            Err(e) => return Err(e.into()),
        },
        None => (jar, None, None),
    };
    Ok(render(
        jar,
        session.as_ref(),
        "Estate",
        pages::home(account.as_ref()),
    ))
}

pub async fn login(
    State(state): State<WebState>,
    jar: PrivateCookieJar,
    Form(form): Form<LoginForm>,
) -> PageResult {
    match state.market.login(&form.into()).await {
        Ok(session) => {
            let message = format!("Logged in as {session}");
            Ok(done(log_in(jar, &session), "/", message))
        }
        Err(MarketError::NotFound { .. }) => Ok(done(jar, "/", "No account uses that email")),
        Err(e) => Err::<Response, _>(e).or_flash(&jar, "/"),
    }
}

pub async fn logout(jar: PrivateCookieJar) -> Response {
    done(log_out(jar), "/", "Logged out")
}

pub async fn register(
    State(state): State<WebState>,
    jar: PrivateCookieJar,
    Form(form): Form<RegisterForm>,
) -> PageResult {
    let params = Register::try_from(form).or_flash(&jar, "/")?;
    let user = state.market.register(&params).await.or_flash(&jar, "/")?;
    Ok(done(
        jar,
        "/",
        format!("Registered {} as {}. You can now log in.", user.email, user.role),
    ))
}

// ============================================================================
// Addresses
// ============================================================================

pub async fn addresses_page(
    State(state): State<WebState>,
    CurrentSession(session): CurrentSession,
    jar: PrivateCookieJar,
) -> PageResult {
    let addresses = state.market.list_addresses(&session).await?;
    Ok(render(
        jar,
        Some(&session),
        "Addresses",
        pages::addresses(&Addresses(addresses)),
    ))
}

pub async fn add_address(
    State(state): State<WebState>,
    CurrentSession(session): CurrentSession,
    jar: PrivateCookieJar,
    Form(form): Form<AddressForm>,
) -> PageResult {
    let address = state
        .market
        .add_address(&session, &form.into())
        .await
        .or_flash(&jar, "/addresses")?;
    Ok(done(jar, "/addresses", format!("Added address {}", address.id)))
}

pub async fn edit_address(
    State(state): State<WebState>,
    CurrentSession(session): CurrentSession,
    jar: PrivateCookieJar,
    Path(id): Path<u64>,
    Form(form): Form<AddressForm>,
) -> PageResult {
    let params = UpdateAddress {
        id,
        address: form.into(),
    };
    let address = state
        .market
        .update_address(&session, &params)
        .await
        .or_flash(&jar, "/addresses")?;
    Ok(done(jar, "/addresses", format!("Updated address {}", address.id)))
}

pub async fn delete_address(
    State(state): State<WebState>,
    CurrentSession(session): CurrentSession,
    jar: PrivateCookieJar,
    Path(id): Path<u64>,
) -> PageResult {
    let address = state
        .market
        .delete_address(&session, &Id { id })
        .await
        .or_flash(&jar, "/addresses")?;
    Ok(done(jar, "/addresses", format!("Deleted address {}", address.id)))
}

// ============================================================================
// Cards
// ============================================================================

pub async fn cards_page(
    State(state): State<WebState>,
    CurrentSession(session): CurrentSession,
    jar: PrivateCookieJar,
) -> PageResult {
    let cards = state.market.list_cards(&session).await?;
    Ok(render(jar, Some(&session), "Cards", pages::cards(&Cards(cards))))
}

pub async fn add_card(
    State(state): State<WebState>,
    CurrentSession(session): CurrentSession,
    jar: PrivateCookieJar,
    Form(form): Form<CardForm>,
) -> PageResult {
    let params = CardInput::try_from(form).or_flash(&jar, "/cards")?;
    let card = state
        .market
        .add_card(&session, &params)
        .await
        .or_flash(&jar, "/cards")?;
    Ok(done(jar, "/cards", format!("Added card {}", card.masked_number())))
}

pub async fn edit_card(
    State(state): State<WebState>,
    CurrentSession(session): CurrentSession,
    jar: PrivateCookieJar,
    Path(card_number): Path<String>,
    Form(form): Form<EditCardForm>,
) -> PageResult {
    let params = form.into_params(card_number).or_flash(&jar, "/cards")?;
    let card = state
        .market
        .update_card(&session, &params)
        .await
        .or_flash(&jar, "/cards")?;
    Ok(done(jar, "/cards", format!("Updated card {}", card.masked_number())))
}

pub async fn delete_card(
    State(state): State<WebState>,
    CurrentSession(session): CurrentSession,
    jar: PrivateCookieJar,
    Path(card_number): Path<String>,
) -> PageResult {
    let card = state
        .market
        .delete_card(&session, &CardNumber { card_number })
        .await
        .or_flash(&jar, "/cards")?;
    Ok(done(jar, "/cards", format!("Deleted card {}", card.masked_number())))
}

// ============================================================================
// Properties
// ============================================================================

pub async fn properties_page(
    State(state): State<WebState>,
    CurrentSession(session): CurrentSession,
    jar: PrivateCookieJar,
) -> PageResult {
    let properties = state.market.list_properties(&session).await?;
    Ok(render(
        jar,
        Some(&session),
        "Properties",
        pages::properties(&Properties(properties)),
    ))
}

pub async fn add_property(
    State(state): State<WebState>,
    CurrentSession(session): CurrentSession,
    jar: PrivateCookieJar,
    Form(form): Form<PropertyForm>,
) -> PageResult {
    let params = PropertyInput::try_from(form).or_flash(&jar, "/properties")?;
    let property = state
        .market
        .add_property(&session, &params)
        .await
        .or_flash(&jar, "/properties")?;
    Ok(done(jar, "/properties", format!("Listed property {}", property.id)))
}

pub async fn edit_property(
    State(state): State<WebState>,
    CurrentSession(session): CurrentSession,
    jar: PrivateCookieJar,
    Path(id): Path<u64>,
    Form(form): Form<PropertyForm>,
) -> PageResult {
    let property = PropertyInput::try_from(form).or_flash(&jar, "/properties")?;
    let property = state
        .market
        .update_property(&session, &UpdateProperty { id, property })
        .await
        .or_flash(&jar, "/properties")?;
    Ok(done(jar, "/properties", format!("Updated property {}", property.id)))
}

pub async fn delete_property(
    State(state): State<WebState>,
    CurrentSession(session): CurrentSession,
    jar: PrivateCookieJar,
    Path(id): Path<u64>,
) -> PageResult {
    let property = state
        .market
        .delete_property(&session, &Id { id })
        .await
        .or_flash(&jar, "/properties")?;
    Ok(done(jar, "/properties", format!("Deleted property {}", property.id)))
}

// ============================================================================
// Search and bookings
// ============================================================================

async fn run_search(
    state: WebState,
    session: Option<Session>,
    jar: PrivateCookieJar,
    form: SearchForm,
) -> PageResult {
    let filter = SearchFilter::try_from(form).or_flash(&jar, "/search")?;
    let matches = state.market.search(&filter).await.or_flash(&jar, "/search")?;
    Ok(render(
        jar,
        session.as_ref(),
        "Search",
        pages::search(Some(&PropertyMatches(matches)), session.as_ref()),
    ))
}

pub async fn search_page(
    State(state): State<WebState>,
    MaybeSession(session): MaybeSession,
    jar: PrivateCookieJar,
    Query(form): Query<SearchForm>,
) -> PageResult {
    run_search(state, session, jar, form).await
}

pub async fn search_form(
    State(state): State<WebState>,
    MaybeSession(session): MaybeSession,
    jar: PrivateCookieJar,
    Form(form): Form<SearchForm>,
) -> PageResult {
    run_search(state, session, jar, form).await
}

pub async fn book(
    State(state): State<WebState>,
    CurrentSession(session): CurrentSession,
    jar: PrivateCookieJar,
    Path(property_id): Path<u64>,
    Form(form): Form<BookForm>,
) -> PageResult {
    let receipt = state
        .market
        .book(&session, &form.into_params(property_id))
        .await
        .or_flash(&jar, "/search")?;

    let booking = &receipt.booking;
    let mut message = format!(
        "Booked property {property_id} for {} nights, total ${:.2}.",
        booking.period.nights(),
        booking.total_cost
    );
    if let (Some(earned), Some(balance)) = (receipt.points_earned, receipt.points_balance) {
        message.push_str(&format!(" Earned {earned} reward points, balance {balance}."));
    }
    Ok(done(jar, "/bookings", message))
}

pub async fn bookings_page(
    State(state): State<WebState>,
    CurrentSession(session): CurrentSession,
    jar: PrivateCookieJar,
) -> PageResult {
    let bookings = state.market.list_bookings(&session).await?;
    Ok(render(
        jar,
        Some(&session),
        "Bookings",
        pages::bookings(&Bookings(bookings)),
    ))
}

pub async fn cancel_booking(
    State(state): State<WebState>,
    CurrentSession(session): CurrentSession,
    jar: PrivateCookieJar,
    Path(id): Path<u64>,
) -> PageResult {
    let message = if state.market.cancel_booking(&session, &Id { id }).await? {
        format!("Cancelled booking {id}")
    } else {
        format!("No booking {id} was cancelled")
    };
    Ok(done(jar, "/bookings", message))
}

// ============================================================================
// Neighborhoods
// ============================================================================

pub async fn neighborhoods_page(
    State(state): State<WebState>,
    CurrentSession(session): CurrentSession,
    jar: PrivateCookieJar,
) -> PageResult {
    let neighborhoods = state.market.list_neighborhoods(&session).await?;
    Ok(render(
        jar,
        Some(&session),
        "Neighborhoods",
        pages::neighborhoods(&Neighborhoods(neighborhoods)),
    ))
}

pub async fn add_neighborhood(
    State(state): State<WebState>,
    CurrentSession(session): CurrentSession,
    jar: PrivateCookieJar,
    Form(form): Form<NeighborhoodForm>,
) -> PageResult {
    let params = form.into_params(None).or_flash(&jar, "/neighborhoods")?;
    let neighborhood = state
        .market
        .add_neighborhood(&session, &params)
        .await
        .or_flash(&jar, "/neighborhoods")?;
    Ok(done(
        jar,
        "/neighborhoods",
        format!("Added neighborhood {}", neighborhood.name),
    ))
}

pub async fn edit_neighborhood(
    State(state): State<WebState>,
    CurrentSession(session): CurrentSession,
    jar: PrivateCookieJar,
    Path(name): Path<String>,
    Form(form): Form<NeighborhoodForm>,
) -> PageResult {
    let params = form.into_params(Some(name)).or_flash(&jar, "/neighborhoods")?;
    let neighborhood = state
        .market
        .update_neighborhood(&session, &params)
        .await
        .or_flash(&jar, "/neighborhoods")?;
    Ok(done(
        jar,
        "/neighborhoods",
        format!("Updated neighborhood {}", neighborhood.name),
    ))
}

// ============================================================================
// Rewards
// ============================================================================

pub async fn rewards_page(
    State(state): State<WebState>,
    CurrentSession(session): CurrentSession,
    jar: PrivateCookieJar,
) -> PageResult {
    let account = match state.market.reward_summary(&session).await {
        Ok(account) => Some(account),
        Err(MarketError::NotEnrolled { .. }) => None,
        Err(e) => return Err(e.into()),
    };
    Ok(render(
        jar,
        Some(&session),
        "Rewards",
        pages::rewards(account.as_ref()),
    ))
}

pub async fn reward_history_page(
    State(state): State<WebState>,
    CurrentSession(session): CurrentSession,
    jar: PrivateCookieJar,
) -> PageResult {
    let history = state
        .market
        .reward_history(&session)
        .await
        .or_flash(&jar, "/rewards")?;
    Ok(render(
        jar,
        Some(&session),
        "Reward history",
        pages::reward_history(&history),
    ))
}

pub async fn join_rewards(
    State(state): State<WebState>,
    CurrentSession(session): CurrentSession,
    jar: PrivateCookieJar,
) -> PageResult {
    let account = state
        .market
        .enroll_rewards(&session)
        .await
        .or_flash(&jar, "/rewards")?;
    Ok(done(
        jar,
        "/rewards",
        format!("{} joined the reward program", account.email),
    ))
}
