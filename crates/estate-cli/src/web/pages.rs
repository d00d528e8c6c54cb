//! Server-rendered HTML.
//!
//! Pages reuse the markdown `Display` output of the core types inside
//! `<pre>` blocks and add plain forms for every action.

use std::fmt::{Display, Write};

use axum::http::StatusCode;
use estate_core::{
    display::{Addresses, Bookings, Cards, Neighborhoods, Properties, PropertyMatches},
    models::{Account, PropertyKind, PropertyType, RewardAccount, RewardHistory, Role},
    Property, Session,
};

pub fn escape(text: &str) -> String {
    let mut out = String::with_capacity(text.len());
    for c in text.chars() {
        match c {
            '&' => out.push_str("&amp;"),
            '<' => out.push_str("&lt;"),
            '>' => out.push_str("&gt;"),
            '"' => out.push_str("&quot;"),
            '\'' => out.push_str("&#39;"),
            c => out.push(c),
        }
    }
    out
}

/// Percent-encodes text for use as one URL path segment.
fn path_segment(text: &str) -> String {
    let mut out = String::with_capacity(text.len());
    for byte in text.bytes() {
        match byte {
            b'A'..=b'Z' | b'a'..=b'z' | b'0'..=b'9' | b'-' | b'.' | b'_' | b'~' => {
                out.push(char::from(byte));
            }
            _ => {
                let _ = write!(out, "%{byte:02X}");
            }
        }
    }
    out
}

fn pre(content: impl Display) -> String {
    format!("<pre>{}</pre>\n", escape(&content.to_string()))
}

fn nav(session: Option<&Session>) -> String {
    let links: &[(&str, &str)] = match session.map(|s| s.role) {
        None => &[("/", "Home"), ("/search", "Search")],
        Some(Role::Renter) => &[
            ("/", "Home"),
            ("/search", "Search"),
            ("/addresses", "Addresses"),
            ("/cards", "Cards"),
            ("/bookings", "Bookings"),
            ("/rewards", "Rewards"),
        ],
        Some(Role::Agent) => &[
            ("/", "Home"),
            ("/search", "Search"),
            ("/properties", "Properties"),
            ("/bookings", "Bookings"),
            ("/neighborhoods", "Neighborhoods"),
        ],
    };

    let mut html = String::from("<nav>");
    for (href, label) in links {
        let _ = write!(html, "<a href=\"{href}\">{label}</a> ");
    }
    match session {
        Some(session) => {
            let _ = write!(
                html,
                "| {} <a href=\"/logout\">Log out</a>",
                escape(&session.to_string())
            );
        }
        None => html.push_str("| not logged in"),
    }
    html.push_str("</nav>\n");
    html
}

/// Wraps `body` in the shared layout.
pub fn layout(title: &str, session: Option<&Session>, flash: Option<&str>, body: &str) -> String {
    let flash = flash
        .map(|message| format!("<p class=\"flash\">{}</p>\n", escape(message)))
        .unwrap_or_default();
    format!(
        "<!DOCTYPE html>\n<html>\n<head><meta charset=\"utf-8\"><title>{title} - Estate</title></head>\n<body>\n{}{flash}<h1>{title}</h1>\n{body}</body>\n</html>\n",
        nav(session),
        title = escape(title),
    )
}

pub fn error_page(status: StatusCode, message: &str) -> String {
    layout(
        status.canonical_reason().unwrap_or("Error"),
        None,
        None,
        &format!("<p>{}</p>\n<p><a href=\"/\">Back to the home page</a></p>\n", escape(message)),
    )
}

// ============================================================================
// Form building blocks
// ============================================================================

fn input(name: &str, label: &str, value: &str) -> String {
    format!(
        "<label>{label} <input name=\"{name}\" value=\"{}\"></label>\n",
        escape(value)
    )
}

fn checkbox(name: &str, label: &str, checked: bool) -> String {
    let checked = if checked { " checked" } else { "" };
    format!("<label><input type=\"checkbox\" name=\"{name}\"{checked}> {label}</label>\n")
}

fn select(name: &str, label: &str, options: &[(&str, &str)], selected: &str) -> String {
    let mut html = format!("<label>{label} <select name=\"{name}\">");
    for (value, text) in options {
        let mark = if *value == selected { " selected" } else { "" };
        let _ = write!(html, "<option value=\"{value}\"{mark}>{text}</option>");
    }
    html.push_str("</select></label>\n");
    html
}

fn form(action: &str, fields: &str, submit: &str) -> String {
    format!(
        "<form method=\"post\" action=\"{}\">\n{fields}<button type=\"submit\">{submit}</button>\n</form>\n",
        escape(action)
    )
}

fn property_type_options() -> Vec<(&'static str, &'static str)> {
    PropertyType::ALL
        .iter()
        .map(|t| (t.as_str(), t.label()))
        .collect()
}

// ============================================================================
// Pages
// ============================================================================

pub fn home(account: Option<&Account>) -> String {
    match account {
        Some(account) => format!(
            "{}<p><a href=\"/search\">Search properties</a></p>\n",
            pre(account)
        ),
        None => {
            let login = form("/login", &input("email", "Email", ""), "Log in");
            let register = form(
                "/register",
                &[
                    input("email", "Email", ""),
                    input("name", "Name", ""),
                    select("role", "Role", &[("renter", "Renter"), ("agent", "Agent")], "renter"),
                    input("budget", "Budget (renters)", ""),
                    input("preferred_location", "Preferred location (renters)", ""),
                    input("move_in_date", "Move-in date YYYY-MM-DD (renters)", ""),
                    checkbox("join_rewards", "Join the reward program (renters)", false),
                    input("job_title", "Job title (agents)", ""),
                    input("agency", "Agency (agents)", ""),
                    input("contact_info", "Contact info (agents)", ""),
                ]
                .concat(),
                "Register",
            );
            format!("<h2>Log in</h2>\n{login}<h2>Register</h2>\n{register}")
        }
    }
}

fn address_fields(street: &str, city: &str, state: &str, zip: &str, primary: bool) -> String {
    [
        input("street", "Street", street),
        input("city", "City", city),
        input("state", "State", state),
        input("zip", "Zip", zip),
        checkbox("is_primary", "Primary", primary),
    ]
    .concat()
}

pub fn addresses(addresses: &Addresses) -> String {
    let mut html = pre(addresses);
    for address in addresses {
        let fields = address_fields(
            &address.street,
            &address.city,
            &address.state,
            &address.zip,
            address.is_primary,
        );
        html.push_str(&form(
            &format!("/addresses/{}/edit", address.id),
            &fields,
            &format!("Save address {}", address.id),
        ));
        html.push_str(&form(
            &format!("/addresses/{}/delete", address.id),
            "",
            &format!("Delete address {}", address.id),
        ));
    }
    html.push_str("<h2>Add an address</h2>\n");
    html.push_str(&form(
        "/addresses",
        &address_fields("", "", "", "", false),
        "Add address",
    ));
    html
}

pub fn cards(cards: &Cards) -> String {
    let mut html = pre(cards);
    for card in cards {
        let masked = card.masked_number();
        let fields = [
            input("cvv", "New CVV", ""),
            input("expiry", "New expiry YYYY-MM", ""),
            input("billing_address_id", "New billing address ID", ""),
        ]
        .concat();
        html.push_str(&form(
            &format!("/cards/{}/edit", card.card_number),
            &fields,
            &format!("Update {masked}"),
        ));
        html.push_str(&form(
            &format!("/cards/{}/delete", card.card_number),
            "",
            &format!("Delete {masked}"),
        ));
    }
    html.push_str("<h2>Add a card</h2>\n");
    let fields = [
        input("card_number", "Card number", ""),
        input("cvv", "CVV", ""),
        input("expiry", "Expiry YYYY-MM", ""),
        input("billing_address_id", "Billing address ID", ""),
    ]
    .concat();
    html.push_str(&form("/cards", &fields, "Add card"));
    html
}

/// Every listing input, prefilled from `property` when editing.
fn property_fields(property: Option<&Property>) -> String {
    let value = |get: fn(&Property) -> String| property.map(get).unwrap_or_default();
    let kind = property.map(|p| &p.kind);
    let rooms = kind
        .and_then(PropertyKind::rooms)
        .map(|r| r.to_string())
        .unwrap_or_default();
    let (floor, business_type, purpose, amenities) = match kind {
        Some(PropertyKind::Apartment { floor, .. }) => {
            (floor.to_string(), String::new(), String::new(), String::new())
        }
        Some(PropertyKind::Commercial { business_type }) => {
            (String::new(), business_type.clone(), String::new(), String::new())
        }
        Some(PropertyKind::Land { purpose }) => {
            (String::new(), String::new(), purpose.clone(), String::new())
        }
        Some(PropertyKind::VacationHome { amenities, .. }) => (
            String::new(),
            String::new(),
            String::new(),
            amenities.clone().unwrap_or_default(),
        ),
        _ => Default::default(),
    };
    let selected = property.map_or("house", |p| p.property_type().as_str());

    [
        select("property_type", "Type", &property_type_options(), selected),
        input("street", "Street", &value(|p| p.street.clone())),
        input("city", "City", &value(|p| p.city.clone())),
        input("state", "State", &value(|p| p.state.clone())),
        input("zip", "Zip", &value(|p| p.zip.clone())),
        input("price", "Daily price", &value(|p| p.price.to_string())),
        checkbox("available", "Available", property.map_or(true, |p| p.available)),
        input(
            "square_footage",
            "Square footage",
            &value(|p| p.square_footage.map(|s| s.to_string()).unwrap_or_default()),
        ),
        input(
            "description",
            "Description",
            &value(|p| p.description.clone().unwrap_or_default()),
        ),
        input(
            "neighborhood",
            "Neighborhood",
            &value(|p| p.neighborhood.clone().unwrap_or_default()),
        ),
        input("rooms", "Rooms", &rooms),
        input("floor", "Floor (apartments)", &floor),
        input("business_type", "Business type (commercial)", &business_type),
        input("purpose", "Purpose (land)", &purpose),
        input("amenities", "Amenities (vacation homes)", &amenities),
    ]
    .concat()
}

pub fn properties(properties: &Properties) -> String {
    let mut html = pre(properties);
    for property in properties {
        html.push_str(&format!("<h2>Edit property {}</h2>\n", property.id));
        html.push_str(&form(
            &format!("/properties/{}/edit", property.id),
            &property_fields(Some(property)),
            "Save",
        ));
        html.push_str(&form(
            &format!("/properties/{}/delete", property.id),
            "",
            &format!("Delete property {}", property.id),
        ));
    }
    html.push_str("<h2>Add a property</h2>\n");
    html.push_str(&form("/properties", &property_fields(None), "Add property"));
    html
}

pub fn search(matches: Option<&PropertyMatches>, session: Option<&Session>) -> String {
    let mut types = vec![("", "Any")];
    types.extend(property_type_options());
    let fields = [
        input("city", "City", ""),
        select("property_type", "Type", &types, ""),
        input("min_bedrooms", "Min bedrooms", ""),
        input("max_bedrooms", "Max bedrooms", ""),
        input("min_price", "Min price", ""),
        input("max_price", "Max price", ""),
        input("available_on", "Available on YYYY-MM-DD", ""),
        select(
            "sort_by",
            "Sort by",
            &[("", "Listing order"), ("price", "Price"), ("bedrooms", "Bedrooms")],
            "",
        ),
    ]
    .concat();
    let mut html = form("/search", &fields, "Search");

    let Some(matches) = matches else {
        return html;
    };
    html.push_str(&pre(matches));
    if session.is_some_and(|s| s.role == Role::Renter) {
        for found in matches {
            let id = found.property.id;
            let fields = [
                input("card_number", "Card number", ""),
                input("start_date", "First night YYYY-MM-DD", ""),
                input("end_date", "Checkout YYYY-MM-DD", ""),
            ]
            .concat();
            html.push_str(&form(
                &format!("/book/{id}"),
                &fields,
                &format!("Book property {id}"),
            ));
        }
    }
    html
}

pub fn bookings(bookings: &Bookings) -> String {
    let mut html = pre(bookings);
    for booking in bookings {
        html.push_str(&form(
            &format!("/bookings/{}/cancel", booking.id),
            "",
            &format!("Cancel booking {}", booking.id),
        ));
    }
    html
}

pub fn neighborhoods(neighborhoods: &Neighborhoods) -> String {
    let mut html = pre(neighborhoods);
    for neighborhood in neighborhoods {
        let fields = [
            input("crime_rate", "Crime rate", &neighborhood.crime_rate.to_string()),
            input(
                "nearby_schools",
                "Nearby schools",
                &neighborhood.nearby_schools.to_string(),
            ),
        ]
        .concat();
        html.push_str(&form(
            &format!("/neighborhoods/{}/edit", path_segment(&neighborhood.name)),
            &fields,
            &format!("Save {}", escape(&neighborhood.name)),
        ));
    }
    html.push_str("<h2>Add a neighborhood</h2>\n");
    let fields = [
        input("name", "Name", ""),
        input("crime_rate", "Crime rate", ""),
        input("nearby_schools", "Nearby schools", ""),
    ]
    .concat();
    html.push_str(&form("/neighborhoods", &fields, "Add neighborhood"));
    html
}

pub fn rewards(account: Option<&RewardAccount>) -> String {
    match account {
        Some(account) => format!(
            "{}<p><a href=\"/rewards/history\">Points history</a></p>\n",
            pre(account)
        ),
        None => format!(
            "<p>You have not joined the reward program. Every booking earns one point per dollar.</p>\n{}",
            form("/rewards/join", "", "Join the reward program")
        ),
    }
}

pub fn reward_history(history: &RewardHistory) -> String {
    pre(history)
}
