//! Read endpoints: movies, actors and reference lists.

mod common;

use axum::{
    body::Body,
    http::{Request, StatusCode},
};
use common::{get_json, spawn_app};
use filmoteka::models::movie::NewMovie;
use http_body_util::BodyExt;
use tower::ServiceExt;

#[tokio::test]
async fn test_movie_list_hides_drafts_and_averages_stars() {
    let (_state, app) = spawn_app().await;

    let (status, body) = get_json(&app, "/api/movie/").await;
    assert_eq!(status, StatusCode::OK);

    assert_eq!(body["count"], 1);
    assert_eq!(body["page"], 1);
    assert_eq!(body["page_size"], 10);

    let movie = &body["results"][0];
    assert_eq!(movie["title"], "TestTitle");
    assert_eq!(movie["tagline"], "TestTagline");
    assert_eq!(movie["category"], "Feature");
    assert_eq!(movie["genres"], serde_json::json!(["Drama"]));
    assert_eq!(movie["middle_star"], 5);
    assert_eq!(body["results"].as_array().unwrap().len(), 1);
}

#[tokio::test]
async fn test_paths_work_without_trailing_slash() {
    let (_state, app) = spawn_app().await;

    let (status, body) = get_json(&app, "/api/movie").await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["count"], 1);

    let (status, _) = get_json(&app, "/api/movie/1").await;
    assert_eq!(status, StatusCode::OK);
}

#[tokio::test]
async fn test_movie_list_paging() {
    let (_state, app) = spawn_app().await;

    let (status, body) = get_json(&app, "/api/movie/?page=2&page_size=1").await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["count"], 1);
    assert!(body["results"].as_array().unwrap().is_empty());

    let (status, body) = get_json(&app, "/api/movie/?page_size=500").await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(body["detail"], "Validation failed");
    assert!(body["errors"]["page_size"].is_array());

    let (status, body) = get_json(&app, "/api/movie/?page=zero").await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert!(body["errors"]["page"].is_array());
}

#[tokio::test]
async fn test_movie_detail_by_id_and_slug() {
    let (_state, app) = spawn_app().await;

    let (status, by_id) = get_json(&app, "/api/movie/1/").await;
    assert_eq!(status, StatusCode::OK);
    let (status, by_slug) = get_json(&app, "/api/movie/test-movie/").await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(by_id, by_slug);

    assert_eq!(by_id["title"], "TestTitle");
    assert_eq!(by_id["country"], "TestCountry");
    assert_eq!(by_id["world_premiere"], "2150-01-01");
    assert_eq!(by_id["budget"], 1000);
    assert_eq!(by_id["directors"], serde_json::json!(["Director Person"]));
    assert_eq!(by_id["actors"], serde_json::json!(["Actor Person"]));
    assert_eq!(by_id["middle_star"], 5);

    let reviews = by_id["reviews"].as_array().unwrap();
    assert_eq!(reviews.len(), 1);
    assert_eq!(reviews[0]["name"], "TestName");
    assert_eq!(reviews[0]["children"][0]["name"], "Child");
    assert!(reviews[0]["children"][0]["children"].as_array().unwrap().is_empty());
}

#[tokio::test]
async fn test_numeric_slug_resolves_and_id_wins() {
    let (state, app) = spawn_app().await;

    for (title, slug) in [("Nineteen Seventeen", "1917"), ("Shadow", "1")] {
        state
            .store()
            .add_movie(&NewMovie {
                title: title.to_string(),
                year: 2019,
                slug: slug.to_string(),
                ..NewMovie::default()
            })
            .await
            .unwrap();
    }

    let (status, body) = get_json(&app, "/api/movie/1917/").await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["title"], "Nineteen Seventeen");

    let (status, body) = get_json(&app, "/api/movie/1/").await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["title"], "TestTitle");
}

#[tokio::test]
async fn test_unrated_movie_has_null_middle_star() {
    let (state, app) = spawn_app().await;

    let id = state
        .store()
        .add_movie(&NewMovie {
            title: "Unrated".to_string(),
            year: 2020,
            slug: "unrated".to_string(),
            ..NewMovie::default()
        })
        .await
        .unwrap();

    let (status, list) = get_json(&app, "/api/movie/").await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(list["count"], 2);
    let unrated = list["results"]
        .as_array()
        .unwrap()
        .iter()
        .find(|m| m["title"] == "Unrated")
        .unwrap();
    assert!(unrated.as_object().unwrap().contains_key("middle_star"));
    assert!(unrated["middle_star"].is_null());

    let (status, detail) = get_json(&app, &format!("/api/movie/{id}/")).await;
    assert_eq!(status, StatusCode::OK);
    assert!(detail.as_object().unwrap().contains_key("middle_star"));
    assert!(detail["middle_star"].is_null());
}

#[tokio::test]
async fn test_draft_and_missing_movies_are_not_found() {
    let (_state, app) = spawn_app().await;

    for uri in [
        "/api/movie/2/",
        "/api/movie/hidden-movie/",
        "/api/movie/999/",
        "/api/movie/no-such-slug/",
    ] {
        let (status, body) = get_json(&app, uri).await;
        assert_eq!(status, StatusCode::NOT_FOUND, "{uri}");
        assert!(body["detail"].is_string());
    }
}

#[tokio::test]
async fn test_actor_list_includes_directors() {
    let (_state, app) = spawn_app().await;

    let (status, body) = get_json(&app, "/api/actor/").await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["count"], 2);
    assert_eq!(body["results"][0]["name"], "Director Person");
    assert_eq!(body["results"][1]["name"], "Actor Person");
}

#[tokio::test]
async fn test_actor_detail() {
    let (_state, app) = spawn_app().await;

    let (status, body) = get_json(&app, "/api/actor/1/").await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["name"], "Director Person");
    assert_eq!(body["age"], 50);
    // The draft they directed stays hidden.
    assert_eq!(body["directed"], serde_json::json!(["TestTitle"]));
    assert!(body["acted_in"].as_array().unwrap().is_empty());

    let (status, body) = get_json(&app, "/api/actor/2").await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["acted_in"], serde_json::json!(["TestTitle"]));

    let (status, _) = get_json(&app, "/api/actor/99/").await;
    assert_eq!(status, StatusCode::NOT_FOUND);

    let (status, _) = get_json(&app, "/api/actor/someone/").await;
    assert_eq!(status, StatusCode::NOT_FOUND);
}

#[tokio::test]
async fn test_reference_lists() {
    let (_state, app) = spawn_app().await;

    let (status, stars) = get_json(&app, "/api/star/").await;
    assert_eq!(status, StatusCode::OK);
    let values: Vec<i64> = stars
        .as_array()
        .unwrap()
        .iter()
        .map(|s| s["value"].as_i64().unwrap())
        .collect();
    assert_eq!(values, vec![1, 2, 3, 4, 5]);

    let (status, categories) = get_json(&app, "/api/category/").await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(categories[0]["slug"], "feature");

    let (status, genres) = get_json(&app, "/api/genre").await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(genres.as_array().unwrap().len(), 1);
}

#[tokio::test]
async fn test_health_and_metrics() {
    let (_state, app) = spawn_app().await;

    let (status, body) = get_json(&app, "/api/health").await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["status"], "ok");

    let response = app
        .clone()
        .oneshot(Request::builder().uri("/metrics").body(Body::empty()).unwrap())
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::OK);
    let body = response.into_body().collect().await.unwrap().to_bytes();
    assert!(String::from_utf8_lossy(&body).contains("Metrics not enabled"));
}

#[tokio::test]
async fn test_seeding_twice_adds_nothing() {
    let (state, app) = spawn_app().await;

    let seed: filmoteka::services::CatalogSeed = toml::from_str(common::FIXTURE).unwrap();
    let report = filmoteka::services::SeedService::new(state.store().clone())
        .apply(&seed)
        .await
        .unwrap();
    assert_eq!(report, filmoteka::services::SeedReport::default());

    let (_, body) = get_json(&app, "/api/movie/").await;
    assert_eq!(body["count"], 1);
    assert_eq!(state.store().review_count().await.unwrap(), 2);
}
