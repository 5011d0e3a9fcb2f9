use std::{error::Error, sync::Arc};

use axum::{
    async_trait,
    body::Body,
    http::{Request, StatusCode},
    Router,
};
use common::config::{Config, SubmissionMode};
use db::{
    sea_query::{Alias, Table},
    team, ActiveValue, ConnectionTrait, Database, DatabaseConnection, EntityTrait,
};
use hyper::body::{self, Bytes, HttpBody};
use migration::MigratorTrait;
use serde::Serialize;
use tower::Service;

pub(crate) async fn create_database() -> DatabaseConnection {
    let db = Database::connect("sqlite::memory:")
        .await
        .expect("unable to create test database");

    migration::Migrator::up(&db, None)
        .await
        .expect("unable to run migrations");

    db
}

/// Build an application router for the provided submission mode.
pub(crate) fn app(db: DatabaseConnection, mode: SubmissionMode) -> Router {
    crate::app_router(Arc::new(db), Arc::new(Config::for_tests_with_mode(mode)))
}

/// Insert a team directly into the database, bypassing the HTTP layer.
pub(crate) async fn insert_team(db: &DatabaseConnection, name: &str) -> i64 {
    team::Entity::insert(team::ActiveModel {
        team_name: ActiveValue::Set(String::from(name)),
        team_emails: ActiveValue::Set(team::Emails(vec![String::from("member@example.com")])),
        ..Default::default()
    })
    .exec_with_returning(db)
    .await
    .expect("unable to create team")
    .id
}

/// Drop a table to make subsequent queries against it fail.
pub(crate) async fn drop_table(db: &DatabaseConnection, name: &str) {
    let statement = Table::drop().table(Alias::new(name)).to_owned();

    db.execute(db.get_database_backend().build(&statement))
        .await
        .expect("unable to drop table");
}

/// Send a JSON `POST` request and return its status code with a JSON response body.
pub(crate) async fn post_json<B: Serialize>(
    service: &mut Router,
    uri: &str,
    body: B,
) -> (StatusCode, serde_json::Value) {
    let response = service
        .call(
            Request::builder()
                .method("POST")
                .uri(uri)
                .header("Content-Type", "application/json")
                .body(Body::from_json(body))
                .unwrap(),
        )
        .await
        .unwrap();

    (response.status(), response.into_body().json().await)
}

/// Send a `GET` request and return its status code with a JSON response body.
pub(crate) async fn get_json(service: &mut Router, uri: &str) -> (StatusCode, serde_json::Value) {
    let response = service
        .call(Request::builder().uri(uri).body(Body::empty()).unwrap())
        .await
        .unwrap();

    (response.status(), response.into_body().json().await)
}

pub(crate) trait RequestBodyExt: Sized {
    fn from_json<B: Serialize>(val: B) -> Self;
}

impl<T> RequestBodyExt for T
where
    T: HttpBody + From<Vec<u8>>,
{
    fn from_json<B: Serialize>(val: B) -> Self {
        T::from(serde_json::to_vec(&val).expect("unable to serialize"))
    }
}

#[async_trait(?Send)]
pub(crate) trait ResponseBodyExt {
    async fn bytes(self) -> Bytes;

    async fn json(self) -> serde_json::Value;
}

#[async_trait(?Send)]
impl<T> ResponseBodyExt for T
where
    T: HttpBody,
    T::Error: Error,
{
    async fn bytes(self) -> Bytes {
        body::to_bytes(self)
            .await
            .expect("unable to convert to bytes")
    }

    async fn json(self) -> serde_json::Value {
        serde_json::from_slice(&self.bytes().await).expect("unable to convert to json")
    }
}
