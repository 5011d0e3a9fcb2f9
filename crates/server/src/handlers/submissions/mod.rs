mod create;
mod info;

use std::sync::Arc;

use axum::{routing::get, Router};
use db::{submission, DatabaseConnection};
use serde::Serialize;

/// Create a router that provides project submission routes.
pub(crate) fn routes() -> Router<Arc<DatabaseConnection>> {
    Router::new().route("/", get(info::info).post(create::create))
}

/// Information about a single project submission.
#[derive(Serialize)]
pub struct SubmissionData {
    /// Submission identifier.
    pub id: i64,

    /// Referenced team identifier, if the submission was created for a registered team.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub team_id: Option<i64>,

    /// Inline team name.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub team_name: Option<String>,

    /// Inline team member emails.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub team_emails: Option<Vec<String>>,

    pub github_link: String,
    pub live_demo_link: String,
    pub twitter_post_link: String,

    /// Submission creation time.
    pub created_at: i64,
}

impl From<submission::Model> for SubmissionData {
    fn from(model: submission::Model) -> Self {
        Self {
            id: model.id,
            team_id: model.team_id,
            team_name: model.team_name,
            team_emails: model.team_emails.map(|emails| emails.0),
            github_link: model.github_link,
            live_demo_link: model.live_demo_link,
            twitter_post_link: model.twitter_post_link,
            created_at: model.created_at.assume_utc().unix_timestamp(),
        }
    }
}
