use std::sync::Arc;

use axum::{extract::State, http::StatusCode, Extension, Json};
use axum_derive_error::ErrorResponse;
use common::config::{Config, SubmissionMode};
use db::{
    submission, team, ActiveValue, DatabaseConnection, DbErr, DbErrExt, EntityTrait, QuerySelect,
    SelectExt, TransactionErrorExt, TransactionTrait,
};
use derive_more::{Display, Error, From};
use serde::{Deserialize, Serialize};
use tracing::{error, info};
use validator::{Validate, ValidationError};

use super::SubmissionData;
use crate::validation::{
    invalid, is_present, validate_github_link, validate_team_emails, validate_twitter_post_link,
    ValidatedJson,
};

/// Errors that may occur during the project submission process.
#[derive(ErrorResponse, Display, From, Error)]
pub(super) enum SubmissionCreateError {
    /// Database-related error.
    #[display(fmt = "Failed to submit. Please try again.")]
    DatabaseError(DbErr),

    /// Team fields required by the current submission mode are absent.
    #[status(StatusCode::BAD_REQUEST)]
    #[display(fmt = "All fields are required")]
    MissingFields,

    /// Referenced team does not exist.
    #[status(StatusCode::BAD_REQUEST)]
    #[display(fmt = "Invalid team selected")]
    InvalidTeam,

    /// Referenced team has already submitted a project.
    #[status(StatusCode::CONFLICT)]
    #[display(fmt = "This team has already submitted a project.")]
    AlreadySubmitted,
}

impl SubmissionCreateError {
    fn from_insert(err: DbErr) -> Self {
        if err.is_unique_violation() {
            Self::AlreadySubmitted
        } else {
            Self::DatabaseError(err)
        }
    }
}

/// JSON request body.
///
/// Either `team_id` or `team_name` with `team_emails` identify the team,
/// depending on the configured [`SubmissionMode`].
#[derive(Deserialize, Validate)]
#[validate(schema(function = "validate_submission"))]
pub(super) struct SubmissionCreateRequest {
    team_id: Option<i64>,
    team_name: Option<String>,
    team_emails: Option<Vec<String>>,
    github_link: Option<String>,
    live_demo_link: Option<String>,
    twitter_post_link: Option<String>,
}

fn validate_submission(request: &SubmissionCreateRequest) -> Result<(), ValidationError> {
    let has_team = request.team_id.is_some()
        || (is_present(request.team_name.as_deref()) && request.team_emails.is_some());

    let has_links = [
        &request.github_link,
        &request.live_demo_link,
        &request.twitter_post_link,
    ]
    .into_iter()
    .all(|link| is_present(link.as_deref()));

    if !has_team || !has_links {
        return Err(invalid("required", "All fields are required"));
    }

    if let Some(team_emails) = &request.team_emails {
        validate_team_emails(team_emails)?;
    }

    validate_github_link(request.github_link.as_deref().unwrap_or_default())?;
    validate_twitter_post_link(request.twitter_post_link.as_deref().unwrap_or_default())
}

/// JSON response body.
#[derive(Serialize)]
pub(super) struct SubmissionCreateResponse {
    message: &'static str,

    /// Stored submission.
    data: SubmissionData,
}

/// Project submission handler.
///
/// In [`SubmissionMode::Reference`] mode the referenced team must exist and
/// may submit only once. In [`SubmissionMode::Inline`] mode team details are stored
/// alongside the links as-is.
pub(super) async fn create(
    Extension(config): Extension<Arc<Config>>,
    State(db): State<Arc<DatabaseConnection>>,
    ValidatedJson(request): ValidatedJson<SubmissionCreateRequest>,
) -> Result<(StatusCode, Json<SubmissionCreateResponse>), SubmissionCreateError> {
    let SubmissionCreateRequest {
        team_id,
        team_name,
        team_emails,
        github_link: Some(github_link),
        live_demo_link: Some(live_demo_link),
        twitter_post_link: Some(twitter_post_link),
    } = request
    else {
        return Err(SubmissionCreateError::MissingFields);
    };

    let links = submission::ActiveModel {
        github_link: ActiveValue::Set(github_link.trim().to_owned()),
        live_demo_link: ActiveValue::Set(live_demo_link.trim().to_owned()),
        twitter_post_link: ActiveValue::Set(twitter_post_link.trim().to_owned()),
        ..Default::default()
    };

    let result = match (config.submissions.mode, team_id, team_name, team_emails) {
        (SubmissionMode::Reference, Some(team_id), _, _) => {
            create_for_team(&db, team_id, links).await
        }
        (SubmissionMode::Inline, _, Some(team_name), Some(team_emails))
            if is_present(Some(&team_name)) =>
        {
            create_inline(&db, &team_name, &team_emails, links).await
        }
        _ => Err(SubmissionCreateError::MissingFields),
    };

    let model = result.map_err(|err| {
        if let SubmissionCreateError::DatabaseError(db_err) = &err {
            error!(err = %db_err, "unable to store submission");
        }

        err
    })?;

    info!(submission_id = model.id, team_id = ?model.team_id, "project submitted");

    Ok((
        StatusCode::CREATED,
        Json(SubmissionCreateResponse {
            message: "Submission successful!",
            data: model.into(),
        }),
    ))
}

/// Store a submission for a registered team.
///
/// Team lookup and submission insertion are executed within a single transaction,
/// while the database unique constraint on the team reference
/// arbitrates concurrent submissions.
async fn create_for_team(
    db: &DatabaseConnection,
    team_id: i64,
    mut model: submission::ActiveModel,
) -> Result<submission::Model, SubmissionCreateError> {
    model.team_id = ActiveValue::Set(Some(team_id));

    db.transaction(|txn| {
        Box::pin(async move {
            let team_exists = team::Entity::find_by_id(team_id)
                .select_only()
                .exists(txn)
                .await?;

            if !team_exists {
                info!(team_id, "rejected submission for an unknown team");
                return Err(SubmissionCreateError::InvalidTeam);
            }

            submission::Entity::insert(model)
                .exec_with_returning(txn)
                .await
                .map_err(SubmissionCreateError::from_insert)
        })
    })
    .await
    .into_raw_result()
}

/// Store a submission with inline team details.
async fn create_inline(
    db: &DatabaseConnection,
    team_name: &str,
    team_emails: &[String],
    mut model: submission::ActiveModel,
) -> Result<submission::Model, SubmissionCreateError> {
    model.team_name = ActiveValue::Set(Some(team_name.trim().to_owned()));
    model.team_emails = ActiveValue::Set(Some(team::Emails(
        team_emails
            .iter()
            .map(|email| email.trim().to_owned())
            .collect(),
    )));

    Ok(submission::Entity::insert(model)
        .exec_with_returning(db)
        .await?)
}
