use std::borrow::Cow;

use axum::{
    async_trait,
    extract::{rejection::JsonRejection, FromRequest},
    http::{Request, StatusCode},
    Json,
};
use axum_derive_error::ErrorResponse;
use db::team::MAX_MEMBERS;
use derive_more::{Display, Error};
use once_cell::sync::Lazy;
use regex::Regex;
use validator::{Validate, ValidationError, ValidationErrors};

/// Regular expression to match a basic `local@domain.tld` email shape.
static EMAIL_REGEX: Lazy<Regex> =
    Lazy::new(|| Regex::new(r#"^[^\s@]+@[^\s@]+\.[^\s@]+$"#).expect("invalid regex string"));

/// Errors related to JSON validation.
#[derive(ErrorResponse, Display, Error)]
pub enum ValidatedJsonRejection {
    /// Unable to parse a JSON value.
    #[status(StatusCode::BAD_REQUEST)]
    JsonParsingError(JsonRejection),

    /// Unable to validate a JSON value.
    #[status(StatusCode::BAD_REQUEST)]
    #[display(fmt = "{}", "describe(_0)")]
    ValidationError(ValidationErrors),
}

/// Pick the first human-readable reason out of validation errors.
fn describe(errors: &ValidationErrors) -> String {
    errors
        .field_errors()
        .into_values()
        .flatten()
        .find_map(|err| err.message.clone())
        .map(Cow::into_owned)
        .unwrap_or_else(|| errors.to_string())
}

/// Wrapper for [`axum`] JSON value validation.
///
/// Equivalent to the [`axum`]'s [`Json`] struct
/// with [`validator`] crate support.
///
/// [`JSON`]: axum::extract::Json
pub struct ValidatedJson<T>(pub T);

#[async_trait]
impl<T, S, B> FromRequest<S, B> for ValidatedJson<T>
where
    T: Validate,
    B: Send + 'static,
    S: Sync,
    Json<T>: FromRequest<S, B, Rejection = JsonRejection>,
{
    type Rejection = ValidatedJsonRejection;

    async fn from_request(req: Request<B>, state: &S) -> Result<Self, Self::Rejection> {
        let Json(value) = Json::from_request(req, state)
            .await
            .map_err(ValidatedJsonRejection::JsonParsingError)?;

        match value.validate() {
            Ok(_) => Ok(ValidatedJson(value)),
            Err(err) => Err(ValidatedJsonRejection::ValidationError(err)),
        }
    }
}

/// Create a [`ValidationError`] with a message suitable to be shown to a client.
pub(crate) fn invalid(code: &'static str, message: &'static str) -> ValidationError {
    let mut err = ValidationError::new(code);
    err.message = Some(Cow::Borrowed(message));
    err
}

/// Check if a required string value is present and not blank.
pub(crate) fn is_present(value: Option<&str>) -> bool {
    value.map_or(false, |value| !value.trim().is_empty())
}

/// Validate team member list size and the format of each email.
pub(crate) fn validate_team_emails(emails: &[String]) -> Result<(), ValidationError> {
    if emails.is_empty() || emails.len() > MAX_MEMBERS {
        return Err(invalid("team_size", "Team must have 1-4 members"));
    }

    if !emails.iter().all(|email| EMAIL_REGEX.is_match(email)) {
        return Err(invalid("email", "Invalid email format(s)"));
    }

    Ok(())
}

pub(crate) fn validate_github_link(link: &str) -> Result<(), ValidationError> {
    if link.contains("github.com") {
        Ok(())
    } else {
        Err(invalid("github_link", "Invalid GitHub URL"))
    }
}

pub(crate) fn validate_twitter_post_link(link: &str) -> Result<(), ValidationError> {
    if link.contains("twitter.com") || link.contains("x.com") {
        Ok(())
    } else {
        Err(invalid("twitter_post_link", "Invalid Twitter/X URL"))
    }
}
