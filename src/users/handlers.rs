use axum::{
    extract::{Query, State},
    http::StatusCode,
    response::{Html, Redirect},
    routing::post,
    Form, Json, Router,
};
use lazy_static::lazy_static;
use regex::Regex;
use serde_json::json;
use tracing::{error, info, instrument, warn};

use crate::state::AppState;
use crate::users::dto::{LoginForm, LoginQuery, RegisterForm};
use crate::users::password::{hash_password, verify_password};
use crate::users::repo::User;
use crate::views;

pub fn routes() -> Router<AppState> {
    Router::new()
        .route("/create", post(register))
        .route("/login", post(login).get(login_page))
}

pub(crate) fn is_valid_email(email: &str) -> bool {
    lazy_static! {
        static ref EMAIL_RE: Regex = Regex::new(r"^[^@\s]+@[^@\s]+\.[^@\s]+$").unwrap();
    }
    EMAIL_RE.is_match(email)
}

#[instrument(skip(state, form))]
pub async fn register(
    State(state): State<AppState>,
    Form(mut form): Form<RegisterForm>,
) -> Result<Redirect, (StatusCode, Json<serde_json::Value>)> {
    form.email = form.email.trim().to_lowercase();

    if !is_valid_email(&form.email) {
        warn!(email = %form.email, "invalid email");
        return Err((
            StatusCode::BAD_REQUEST,
            Json(json!({ "error": "Invalid email" })),
        ));
    }
    if form.password.is_empty() {
        warn!("empty password");
        return Err((
            StatusCode::BAD_REQUEST,
            Json(json!({ "error": "Password required" })),
        ));
    }

    let hash = match hash_password(&form.password) {
        Ok(h) => h,
        Err(e) => {
            error!(error = %e, "hash_password failed");
            return Err(creation_failed());
        }
    };

    let user = match User::create(&state.db, &form.username, &form.email, &hash, form.age).await {
        Ok(u) => u,
        Err(e) => {
            error!(error = %e, "create user failed");
            return Err(creation_failed());
        }
    };

    info!(user_id = %user.id, email = %user.email, "user registered");
    Ok(Redirect::to(&format!("/journal/{}", user.id)))
}

fn creation_failed() -> (StatusCode, Json<serde_json::Value>) {
    (
        StatusCode::INTERNAL_SERVER_ERROR,
        Json(json!({ "error": "User creation failed" })),
    )
}

/// Every login failure is a redirect back to the form, never a 500. The
/// message rides in the query string and is the only signal the browser gets.
#[instrument(skip(state, form))]
pub async fn login(State(state): State<AppState>, Form(form): Form<LoginForm>) -> Redirect {
    let email = form.email.trim().to_lowercase();

    let user = match User::find_by_email(&state.db, &email).await {
        Ok(Some(u)) => u,
        Ok(None) => {
            warn!(email = %email, "login unknown email");
            return login_error_redirect("User not found");
        }
        Err(e) => {
            error!(error = %e, "find_by_email failed");
            return login_error_redirect("Login failed");
        }
    };

    match verify_password(&form.password, &user.password_hash) {
        Ok(true) => {}
        Ok(false) => {
            warn!(email = %email, user_id = %user.id, "login invalid password");
            return login_error_redirect("Invalid credentials");
        }
        Err(e) => {
            error!(error = %e, "verify_password failed");
            return login_error_redirect("Login failed");
        }
    }

    info!(user_id = %user.id, email = %user.email, "user logged in");
    Redirect::to(&format!("/journal/{}", user.id))
}

fn login_error_redirect(message: &str) -> Redirect {
    Redirect::to(&format!("/login?error={}", message.replace(' ', "%20")))
}

#[instrument]
pub async fn login_page(Query(query): Query<LoginQuery>) -> Html<String> {
    views::login_page(query.error.as_deref())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn accepts_plain_addresses() {
        assert!(is_valid_email("user@example.com"));
        assert!(is_valid_email("first.last@sub.domain.org"));
    }

    #[test]
    fn rejects_malformed_addresses() {
        assert!(!is_valid_email("no-at-sign"));
        assert!(!is_valid_email("two@@example.com"));
        assert!(!is_valid_email("spaces in@example.com"));
        assert!(!is_valid_email("nodot@localhost"));
    }

    #[test]
    fn login_redirect_encodes_spaces() {
        // Redirect target must be a valid header value; the three failure
        // messages stay distinguishable after encoding.
        let cases = [
            ("User not found", "/login?error=User%20not%20found"),
            ("Invalid credentials", "/login?error=Invalid%20credentials"),
            ("Login failed", "/login?error=Login%20failed"),
        ];
        for (message, expected) in cases {
            assert_eq!(
                format!("/login?error={}", message.replace(' ', "%20")),
                expected
            );
        }
    }
}
