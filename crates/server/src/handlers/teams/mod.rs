mod create;
mod list;

use std::sync::Arc;

use axum::{routing::get, Router};
use db::{team, DatabaseConnection};
use serde::Serialize;

/// Create a router that provides team registration and listing routes.
pub(crate) fn routes() -> Router<Arc<DatabaseConnection>> {
    Router::new().route("/", get(list::list).post(create::create))
}

/// Information about a single registered team.
#[derive(Serialize)]
pub struct TeamData {
    /// Team identifier.
    pub id: i64,

    /// Unique team name.
    pub team_name: String,

    /// Team member emails.
    pub team_emails: Vec<String>,

    /// Team registration time.
    pub created_at: i64,
}

impl From<team::Model> for TeamData {
    fn from(model: team::Model) -> Self {
        Self {
            id: model.id,
            team_name: model.team_name,
            team_emails: model.team_emails.0,
            created_at: model.created_at.assume_utc().unix_timestamp(),
        }
    }
}
