use std::sync::Arc;

use axum::{extract::State, Json};
use axum_derive_error::ErrorResponse;
use db::{team, DatabaseConnection, DbErr, EntityTrait, QueryOrder};
use derive_more::{Display, Error, From};
use serde::Serialize;
use tracing::error;

use super::TeamData;
use crate::pagination::Pagination;

/// Errors that may occur during the team list request.
#[derive(ErrorResponse, Display, From, Error)]
pub(super) enum TeamListError {
    /// Database-related error.
    #[display(fmt = "Failed to fetch teams")]
    DatabaseError(DbErr),
}

/// JSON response body.
#[derive(Serialize)]
pub(super) struct TeamListResponse {
    data: Vec<TeamData>,
}

/// List registered teams, most recently registered first.
pub(super) async fn list(
    State(db): State<Arc<DatabaseConnection>>,
    pagination: Pagination,
) -> Result<Json<TeamListResponse>, TeamListError> {
    let query = team::Entity::find()
        .order_by_desc(team::Column::CreatedAt)
        .order_by_desc(team::Column::Id);

    let teams = pagination.apply(query).all(&*db).await.map_err(|err| {
        error!(%err, "unable to fetch teams");
        TeamListError::DatabaseError(err)
    })?;

    Ok(Json(TeamListResponse {
        data: teams.into_iter().map(TeamData::from).collect(),
    }))
}
