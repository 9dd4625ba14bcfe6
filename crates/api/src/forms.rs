//! Typed HTML form bodies and their validation rules.
//!
//! Forms are deserialized from `application/x-www-form-urlencoded` bodies via
//! `axum::Form` and validated with the `validator` derive. Unknown form keys
//! are ignored by deserialization, so a client cannot smuggle an owner field:
//! ownership always comes from the authenticated session.
//!
//! Validation failure re-renders the originating page with the collected
//! field errors and HTTP 200.

use serde::Deserialize;
use validator::{Validate, ValidateEmail, ValidationError, ValidationErrors};

/// Lowest rank a review may give a movie.
pub const RANK_MIN: i32 = 0;
/// Highest rank a review may give a movie.
pub const RANK_MAX: i32 = 10;

/// Form body for `POST /signup`.
#[derive(Debug, Default, Deserialize, Validate)]
pub struct SignupForm {
    #[validate(length(min = 3, max = 150, message = "Username must be 3-150 characters"))]
    pub username: String,
    #[validate(custom(function = "validate_optional_email"))]
    #[serde(default)]
    pub email: String,
    #[validate(length(min = 8, message = "Password must be at least 8 characters"))]
    pub password: String,
    #[validate(must_match(other = "password", message = "Passwords do not match"))]
    pub password_confirm: String,
}

impl SignupForm {
    /// The email column is nullable; treat a blank input as absent.
    pub fn email_or_none(&self) -> Option<String> {
        let trimmed = self.email.trim();
        if trimmed.is_empty() {
            None
        } else {
            Some(trimmed.to_string())
        }
    }
}

/// Form body for `POST /login`.
///
/// No length policy here: any failure is reported as a single
/// "invalid username or password" error without revealing which part failed.
#[derive(Debug, Default, Deserialize)]
pub struct LoginForm {
    pub username: String,
    pub password: String,
}

/// Form body for `POST /review/create`.
///
/// `rank` stays a string through validation so a non-numeric value re-renders
/// the form like any other field error instead of failing deserialization.
#[derive(Debug, Default, Deserialize, Validate)]
pub struct ReviewForm {
    #[validate(length(min = 1, max = 100, message = "Title is required (max 100 characters)"))]
    pub title: String,
    #[validate(length(min = 1, max = 100, message = "Movie title is required (max 100 characters)"))]
    pub movie_title: String,
    #[validate(custom(function = "validate_rank"))]
    pub rank: String,
    #[validate(length(min = 1, message = "Content must not be empty"))]
    pub content: String,
}

impl ReviewForm {
    /// The rank as an integer. `None` until [`Validate::validate`] passes.
    pub fn parsed_rank(&self) -> Option<i32> {
        self.rank.trim().parse().ok()
    }
}

/// Form body for `POST /review/{id}/comment`.
#[derive(Debug, Default, Deserialize, Validate)]
pub struct CommentForm {
    #[validate(length(min = 1, max = 1000, message = "Comment must be 1-1000 characters"))]
    pub content: String,
}

fn validate_rank(rank: &str) -> Result<(), ValidationError> {
    match rank.trim().parse::<i32>() {
        Ok(value) if (RANK_MIN..=RANK_MAX).contains(&value) => Ok(()),
        _ => Err(ValidationError::new("rank")
            .with_message(format!("Rank must be a number between {RANK_MIN} and {RANK_MAX}").into())),
    }
}

fn validate_optional_email(email: &str) -> Result<(), ValidationError> {
    if email.trim().is_empty() || email.validate_email() {
        Ok(())
    } else {
        Err(ValidationError::new("email").with_message("Enter a valid email address".into()))
    }
}

/// Flatten [`ValidationErrors`] into `(field, message)` pairs for rendering.
///
/// Sorted by field name so re-renders are deterministic.
pub fn field_errors(errors: &ValidationErrors) -> Vec<(String, String)> {
    let mut out = Vec::new();
    for (field, errs) in errors.field_errors() {
        for err in errs.iter() {
            let message = err
                .message
                .as_ref()
                .map(|m| m.to_string())
                .unwrap_or_else(|| format!("Invalid value for {field}"));
            out.push((field.to_string(), message));
        }
    }
    out.sort();
    out
}
