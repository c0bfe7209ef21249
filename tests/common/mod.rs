//! Shared helpers for the HTTP tests.

#![allow(dead_code)]

use axum::{
    Router,
    body::Body,
    http::{Request, StatusCode},
};
use filmoteka::api::AppState;
use filmoteka::config::Config;
use filmoteka::services::{CatalogSeed, SeedService};
use http_body_util::BodyExt;
use std::sync::Arc;
use tower::ServiceExt;

/// One published movie with a 5 star rating and a two level review thread,
/// plus a draft that shares its director.
pub const FIXTURE: &str = r#"
[[categories]]
title = "Feature"
description = "Full length films"
slug = "feature"

[[genres]]
title = "Drama"
slug = "drama"

[[actors]]
name = "Director Person"
age = 50
description = "Directs things"

[[actors]]
name = "Actor Person"
age = 30
description = "Acts in things"

[[movies]]
title = "TestTitle"
tagline = "TestTagline"
description = "TestDescription"
year = 2150
country = "TestCountry"
world_premiere = "2150-01-01"
budget = 1000
fees_in_usa = 2000
fees_in_world = 3000
category = "feature"
directors = ["Director Person"]
actors = ["Actor Person"]
genres = ["drama"]
slug = "test-movie"
ratings = [{ ip = "172.17.0.1", star = 5 }]

[[movies.reviews]]
email = "test@gmail.com"
name = "TestName"
text = "TestText"

[[movies.reviews.replies]]
email = "child@gmail.com"
name = "Child"
text = "Reply text"

[[movies]]
title = "Hidden"
year = 2151
directors = ["Director Person"]
slug = "hidden-movie"
draft = true
"#;

pub async fn spawn_app_with(configure: impl FnOnce(&mut Config)) -> (Arc<AppState>, Router) {
    let db_path =
        std::env::temp_dir().join(format!("filmoteka-test-{}.db", uuid::Uuid::new_v4()));

    let mut config = Config::default();
    config.general.database_path = format!("sqlite:{}", db_path.display());
    configure(&mut config);

    let state = filmoteka::api::create_app_state_from_config(config, None)
        .await
        .expect("failed to create app state");

    let seed: CatalogSeed = toml::from_str(FIXTURE).expect("fixture parses");
    SeedService::new(state.store().clone())
        .apply(&seed)
        .await
        .expect("fixture loads");

    let router = filmoteka::api::router(state.clone()).await;
    (state, router)
}

pub async fn spawn_app() -> (Arc<AppState>, Router) {
    spawn_app_with(|_| {}).await
}

pub async fn read_json(response: axum::response::Response) -> serde_json::Value {
    let body = response.into_body().collect().await.unwrap().to_bytes();
    serde_json::from_slice(&body).unwrap()
}

pub async fn get_json(app: &Router, uri: &str) -> (StatusCode, serde_json::Value) {
    let response = app
        .clone()
        .oneshot(Request::builder().uri(uri).body(Body::empty()).unwrap())
        .await
        .unwrap();
    let status = response.status();
    (status, read_json(response).await)
}

pub async fn post_json(
    app: &Router,
    uri: &str,
    body: &serde_json::Value,
) -> (StatusCode, serde_json::Value) {
    let response = app
        .clone()
        .oneshot(
            Request::builder()
                .method("POST")
                .uri(uri)
                .header("Content-Type", "application/json")
                .body(Body::from(body.to_string()))
                .unwrap(),
        )
        .await
        .unwrap();
    let status = response.status();
    (status, read_json(response).await)
}

pub async fn post_form(app: &Router, uri: &str, body: &str) -> (StatusCode, serde_json::Value) {
    let response = app
        .clone()
        .oneshot(
            Request::builder()
                .method("POST")
                .uri(uri)
                .header("Content-Type", "application/x-www-form-urlencoded")
                .body(Body::from(body.to_string()))
                .unwrap(),
        )
        .await
        .unwrap();
    let status = response.status();
    (status, read_json(response).await)
}

pub const MULTIPART_BOUNDARY: &str = "filmoteka-boundary";

/// Posts text fields as `multipart/form-data`.
pub async fn post_multipart(
    app: &Router,
    uri: &str,
    fields: &[(&str, &str)],
) -> (StatusCode, serde_json::Value) {
    let mut body = String::new();
    for (name, value) in fields {
        body.push_str(&format!(
            "--{MULTIPART_BOUNDARY}\r\nContent-Disposition: form-data; name=\"{name}\"\r\n\r\n{value}\r\n"
        ));
    }
    body.push_str(&format!("--{MULTIPART_BOUNDARY}--\r\n"));

    let response = app
        .clone()
        .oneshot(
            Request::builder()
                .method("POST")
                .uri(uri)
                .header(
                    "Content-Type",
                    format!("multipart/form-data; boundary={MULTIPART_BOUNDARY}"),
                )
                .body(Body::from(body))
                .unwrap(),
        )
        .await
        .unwrap();
    let status = response.status();
    (status, read_json(response).await)
}
