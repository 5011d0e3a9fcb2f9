use axum::{
    async_trait,
    extract::{rejection::QueryRejection, FromRequestParts, Query},
    http::{request::Parts, StatusCode},
};
use axum_derive_error::ErrorResponse;
use db::QuerySelect;
use derive_more::{Display, Error};
use serde::Deserialize;

pub const PER_PAGE: u64 = 25;
pub const MAX_PAGES: u64 = 10000;

/// Errors related to the page selection query.
#[derive(ErrorResponse, Display, Error)]
pub enum PaginationRejection {
    /// Page number is not a positive integer.
    #[status(StatusCode::BAD_REQUEST)]
    #[display(fmt = "Invalid page number")]
    InvalidPage(QueryRejection),
}

/// Optional page selection.
///
/// Without an explicit page every row is returned.
#[derive(Deserialize)]
pub struct Pagination {
    #[serde(default)]
    page: Option<u64>,
}

#[async_trait]
impl<S> FromRequestParts<S> for Pagination
where
    S: Send + Sync,
{
    type Rejection = PaginationRejection;

    async fn from_request_parts(parts: &mut Parts, state: &S) -> Result<Self, Self::Rejection> {
        let Query(pagination) = Query::<Self>::from_request_parts(parts, state)
            .await
            .map_err(PaginationRejection::InvalidPage)?;

        Ok(pagination)
    }
}

impl Pagination {
    pub fn apply<Q: QuerySelect>(&self, query: Q) -> Q {
        match self.page {
            Some(page) => query
                .limit(PER_PAGE)
                .offset(page.min(MAX_PAGES).saturating_sub(1) * PER_PAGE),
            None => query,
        }
    }
}
