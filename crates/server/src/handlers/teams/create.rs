use std::sync::Arc;

use axum::{extract::State, http::StatusCode, Json};
use axum_derive_error::ErrorResponse;
use db::{team, ActiveValue, DatabaseConnection, DbErr, DbErrExt, EntityTrait};
use derive_more::{Display, Error, From};
use serde::{Deserialize, Serialize};
use tracing::{error, info};
use validator::{Validate, ValidationError};

use super::TeamData;
use crate::validation::{invalid, is_present, validate_team_emails, ValidatedJson};

/// Errors that may occur during the team registration process.
#[derive(ErrorResponse, Display, From, Error)]
pub(super) enum TeamCreateError {
    /// Database-related error.
    #[display(fmt = "Failed to register team. Please try again.")]
    DatabaseError(DbErr),

    /// Team name or member list is absent.
    #[status(StatusCode::BAD_REQUEST)]
    #[display(fmt = "Team name and team emails are required")]
    MissingFields,

    /// Another team has already registered with the same name.
    #[status(StatusCode::CONFLICT)]
    #[display(fmt = "Team name already exists. Please choose a different name.")]
    DuplicateTeamName,
}

/// JSON request body.
#[derive(Deserialize, Validate)]
#[validate(schema(function = "validate_team_registration"))]
pub(super) struct TeamCreateRequest {
    /// Team name.
    team_name: Option<String>,

    /// Member emails, from 1 to 4 entries.
    team_emails: Option<Vec<String>>,
}

fn validate_team_registration(request: &TeamCreateRequest) -> Result<(), ValidationError> {
    let Some(team_emails) = &request.team_emails else {
        return Err(invalid("required", "Team name and team emails are required"));
    };

    if !is_present(request.team_name.as_deref()) {
        return Err(invalid("required", "Team name and team emails are required"));
    }

    validate_team_emails(team_emails)
}

/// JSON response body.
#[derive(Serialize)]
pub(super) struct TeamCreateResponse {
    message: &'static str,

    /// Registered team.
    data: TeamData,
}

/// Team registration handler.
///
/// Team name and member emails are trimmed before being stored.
pub(super) async fn create(
    State(db): State<Arc<DatabaseConnection>>,
    ValidatedJson(request): ValidatedJson<TeamCreateRequest>,
) -> Result<(StatusCode, Json<TeamCreateResponse>), TeamCreateError> {
    let TeamCreateRequest {
        team_name: Some(team_name),
        team_emails: Some(team_emails),
    } = request
    else {
        return Err(TeamCreateError::MissingFields);
    };

    let model = team::Entity::insert(team::ActiveModel {
        team_name: ActiveValue::Set(team_name.trim().to_owned()),
        team_emails: ActiveValue::Set(team::Emails(
            team_emails
                .iter()
                .map(|email| email.trim().to_owned())
                .collect(),
        )),
        ..Default::default()
    })
    .exec_with_returning(&*db)
    .await
    .map_err(|err| {
        if err.is_unique_violation() {
            info!(team_name = %team_name.trim(), "rejected duplicate team name");
            TeamCreateError::DuplicateTeamName
        } else {
            error!(%err, "unable to register team");
            TeamCreateError::DatabaseError(err)
        }
    })?;

    info!(team_id = model.id, team_name = %model.team_name, "team registered");

    Ok((
        StatusCode::CREATED,
        Json(TeamCreateResponse {
            message: "Team registered successfully!",
            data: model.into(),
        }),
    ))
}

#[cfg(test)]
mod tests {
    use crate::testing::{app, create_database, drop_table, get_json, post_json};

    use assert_json::{assert_json, validators};
    use axum::http::StatusCode;
    use common::config::SubmissionMode;
    use serde_json::json;

    #[tokio::test]
    async fn create() {
        let db = create_database().await;
        let mut service = app(db, SubmissionMode::Reference);

        let (status, body) = post_json(
            &mut service,
            "/teams",
            json!({
                "team_name": "  Nova ",
                "team_emails": ["a@x.com", "b@x.com"]
            }),
        )
        .await;

        assert_eq!(status, StatusCode::CREATED);
        assert_json!(body, {
            "message": "Team registered successfully!",
            "data": {
                "id": validators::i64(|_| Ok(())),
                "team_name": "Nova",
                "team_emails": ["a@x.com", "b@x.com"],
                "created_at": validators::i64(|_| Ok(()))
            }
        });
    }

    #[tokio::test]
    async fn duplicate_name() {
        let db = create_database().await;
        let mut service = app(db, SubmissionMode::Reference);

        let payload = json!({
            "team_name": "Nova",
            "team_emails": ["a@x.com", "b@x.com"]
        });

        let (status, _) = post_json(&mut service, "/teams", &payload).await;
        assert_eq!(status, StatusCode::CREATED);

        let (status, body) = post_json(
            &mut service,
            "/teams",
            json!({
                "team_name": " Nova  ",
                "team_emails": ["c@x.com"]
            }),
        )
        .await;

        assert_eq!(status, StatusCode::CONFLICT);
        assert_eq!(
            body["error"],
            "Team name already exists. Please choose a different name."
        );

        let (_, body) = get_json(&mut service, "/teams").await;
        assert_eq!(body["data"].as_array().map(Vec::len), Some(1));
    }

    #[tokio::test]
    async fn team_size() {
        let db = create_database().await;
        let mut service = app(db, SubmissionMode::Reference);

        for emails in [
            json!([]),
            json!(["a@x.com", "b@x.com", "c@x.com", "d@x.com", "e@x.com"]),
        ] {
            let (status, body) = post_json(
                &mut service,
                "/teams",
                json!({
                    "team_name": "Nova",
                    "team_emails": emails
                }),
            )
            .await;

            assert_eq!(status, StatusCode::BAD_REQUEST);
            assert_eq!(body["error"], "Team must have 1-4 members");
        }

        let (status, _) = post_json(
            &mut service,
            "/teams",
            json!({
                "team_name": "Nova",
                "team_emails": ["a@x.com", "b@x.com", "c@x.com", "d@x.com"]
            }),
        )
        .await;

        assert_eq!(status, StatusCode::CREATED);
    }

    #[tokio::test]
    async fn invalid_email() {
        let db = create_database().await;
        let mut service = app(db, SubmissionMode::Reference);

        let (status, body) = post_json(
            &mut service,
            "/teams",
            json!({
                "team_name": "Nova",
                "team_emails": ["a@x.com", "not-an-email"]
            }),
        )
        .await;

        assert_eq!(status, StatusCode::BAD_REQUEST);
        assert_eq!(body["error"], "Invalid email format(s)");
    }

    #[tokio::test]
    async fn missing_fields() {
        let db = create_database().await;
        let mut service = app(db, SubmissionMode::Reference);

        for payload in [
            json!({ "team_emails": ["a@x.com"] }),
            json!({ "team_name": "Nova" }),
            json!({ "team_name": "   ", "team_emails": ["a@x.com"] }),
            json!({ "team_name": "Nova", "team_emails": null }),
        ] {
            let (status, body) = post_json(&mut service, "/teams", payload).await;

            assert_eq!(status, StatusCode::BAD_REQUEST);
            assert_eq!(body["error"], "Team name and team emails are required");
        }
    }

    #[tokio::test]
    async fn emails_not_a_list() {
        let db = create_database().await;
        let mut service = app(db, SubmissionMode::Reference);

        let (status, body) = post_json(
            &mut service,
            "/teams",
            json!({
                "team_name": "Nova",
                "team_emails": "a@x.com"
            }),
        )
        .await;

        assert_eq!(status, StatusCode::BAD_REQUEST);
        assert!(body["error"].is_string());
    }

    #[tokio::test]
    async fn storage_failure() {
        let db = create_database().await;
        drop_table(&db, "submissions").await;
        drop_table(&db, "teams").await;

        let (status, body) = post_json(
            &mut app(db, SubmissionMode::Reference),
            "/teams",
            json!({
                "team_name": "Nova",
                "team_emails": ["a@x.com"]
            }),
        )
        .await;

        assert_eq!(status, StatusCode::INTERNAL_SERVER_ERROR);
        assert_eq!(body["error"], "Failed to register team. Please try again.");
    }
}
