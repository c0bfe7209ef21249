//! Write endpoints: reviews and ratings.

mod common;

use axum::{
    body::Body,
    http::{Request, StatusCode},
};
use common::{
    get_json, post_form, post_json, post_multipart, read_json, spawn_app, spawn_app_with,
};
use filmoteka::config::RatingPolicy;
use filmoteka::models::movie::NewMovie;
use serde_json::json;
use tower::ServiceExt;

#[tokio::test]
async fn test_create_review_adds_exactly_one() {
    let (state, app) = spawn_app().await;
    let before = state.store().review_count().await.unwrap();

    let (status, body) = post_json(
        &app,
        "/api/review/",
        &json!({
            "email": "reviewer@example.com",
            "name": "Reviewer",
            "text": "Loved it",
            "movie": 1
        }),
    )
    .await;

    assert_eq!(status, StatusCode::CREATED);
    assert_eq!(body["movie"], 1);
    assert!(body["parent"].is_null());
    assert_eq!(body["email"], "reviewer@example.com");
    assert_eq!(state.store().review_count().await.unwrap(), before + 1);

    let (_, movie) = get_json(&app, "/api/movie/1/").await;
    let roots = movie["reviews"].as_array().unwrap();
    assert_eq!(roots.len(), 2);
    assert_eq!(roots[1]["name"], "Reviewer");
}

#[tokio::test]
async fn test_reply_nests_under_parent() {
    let (_state, app) = spawn_app().await;

    let (status, body) = post_form(
        &app,
        "/api/review/",
        "email=reply%40example.com&name=Replier&text=Agreed&movie=1&parent=2",
    )
    .await;
    assert_eq!(status, StatusCode::CREATED);
    assert_eq!(body["parent"], 2);

    let (_, movie) = get_json(&app, "/api/movie/test-movie/").await;
    let roots = movie["reviews"].as_array().unwrap();
    assert_eq!(roots.len(), 1);

    let child = &roots[0]["children"][0];
    assert_eq!(child["id"], 2);
    assert_eq!(child["children"][0]["name"], "Replier");
}

#[tokio::test]
async fn test_form_with_blank_parent_is_top_level() {
    let (_state, app) = spawn_app().await;

    let (status, body) = post_form(
        &app,
        "/api/review",
        "email=a%40b.io&name=Form&text=Hello&movie=1&parent=",
    )
    .await;
    assert_eq!(status, StatusCode::CREATED);
    assert!(body["parent"].is_null());
}

#[tokio::test]
async fn test_multipart_review_and_rating() {
    let (state, app) = spawn_app().await;
    let reviews_before = state.store().review_count().await.unwrap();

    let (status, body) = post_multipart(
        &app,
        "/api/review/",
        &[
            ("email", "multi@part.io"),
            ("name", "Multi"),
            ("text", "Sent as multipart"),
            ("movie", "1"),
            ("parent", "1"),
        ],
    )
    .await;
    assert_eq!(status, StatusCode::CREATED);
    assert_eq!(body["name"], "Multi");
    assert_eq!(body["movie"], 1);
    assert_eq!(body["parent"], 1);
    assert_eq!(
        state.store().review_count().await.unwrap(),
        reviews_before + 1
    );

    let (status, body) = post_multipart(&app, "/api/rating/", &[("movie", "1"), ("star", "3")]).await;
    assert_eq!(status, StatusCode::CREATED);
    assert_eq!(body["star"], 3);

    let (status, body) = post_multipart(&app, "/api/review/", &[("email", "bad")]).await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert!(body["errors"]["email"].is_array());
}

#[tokio::test]
async fn test_review_validation_lists_every_field() {
    let (state, app) = spawn_app().await;
    let before = state.store().review_count().await.unwrap();

    let (status, body) = post_json(
        &app,
        "/api/review/",
        &json!({
            "email": "not-an-email",
            "name": "   ",
            "text": "x",
            "movie": 999,
            "parent": 999
        }),
    )
    .await;

    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(body["detail"], "Validation failed");
    for field in ["email", "name", "movie", "parent"] {
        assert!(body["errors"][field].is_array(), "missing error for {field}");
    }
    assert!(body["errors"].get("text").is_none());
    assert_eq!(state.store().review_count().await.unwrap(), before);
}

#[tokio::test]
async fn test_malformed_body_is_rejected() {
    let (_state, app) = spawn_app().await;

    let response = app
        .clone()
        .oneshot(
            Request::builder()
                .method("POST")
                .uri("/api/review/")
                .header("Content-Type", "application/json")
                .body(Body::from("{not json"))
                .unwrap(),
        )
        .await
        .unwrap();

    assert_eq!(response.status(), StatusCode::BAD_REQUEST);
    let body = read_json(response).await;
    assert!(body["errors"]["non_field_errors"][0].is_string());
}

#[tokio::test]
async fn test_reply_movie_mismatch_when_enforced() {
    let (state, app) = spawn_app_with(|config| {
        config.catalog.enforce_reply_movie_match = true;
    })
    .await;

    let other = state
        .store()
        .add_movie(&NewMovie {
            title: "Other".to_string(),
            year: 2000,
            slug: "other".to_string(),
            ..NewMovie::default()
        })
        .await
        .unwrap();

    let (status, body) = post_json(
        &app,
        "/api/review/",
        &json!({
            "email": "x@y.io",
            "name": "X",
            "text": "Wrong thread",
            "movie": other,
            "parent": 1
        }),
    )
    .await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert!(body["errors"]["parent"].is_array());
}

#[tokio::test]
async fn test_rating_updates_average() {
    let (state, app) = spawn_app().await;
    let before = state.store().rating_count().await.unwrap();

    let (status, body) = post_form(&app, "/api/rating/", "movie=1&star=3").await;
    assert_eq!(status, StatusCode::CREATED);
    assert_eq!(body["star"], 3);
    assert_eq!(body["movie"], 1);
    assert_eq!(state.store().rating_count().await.unwrap(), before + 1);

    let (_, list) = get_json(&app, "/api/movie/").await;
    assert_eq!(list["results"][0]["middle_star"], 4);
}

#[tokio::test]
async fn test_rating_records_forwarded_client_without_socket() {
    let (_state, app) = spawn_app().await;

    let response = app
        .clone()
        .oneshot(
            Request::builder()
                .method("POST")
                .uri("/api/rating/")
                .header("Content-Type", "application/json")
                .header("X-Forwarded-For", "203.0.113.7, 10.0.0.1")
                .body(Body::from(json!({"movie": "1", "star": "4"}).to_string()))
                .unwrap(),
        )
        .await
        .unwrap();

    assert_eq!(response.status(), StatusCode::CREATED);
    let body = read_json(response).await;
    assert_eq!(body["ip"], "203.0.113.7");
}

#[tokio::test]
async fn test_rating_validation() {
    let (state, app) = spawn_app().await;
    let before = state.store().rating_count().await.unwrap();

    let (status, body) = post_json(&app, "/api/rating/", &json!({"movie": 999, "star": 9})).await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert!(body["errors"]["movie"].is_array());
    assert!(body["errors"]["star"].is_array());

    let (status, body) = post_json(&app, "/api/rating/", &json!({})).await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert!(body["errors"]["movie"].is_array());
    assert!(body["errors"]["star"].is_array());

    assert_eq!(state.store().rating_count().await.unwrap(), before);
}

#[tokio::test]
async fn test_upsert_policy_replaces_previous_rating() {
    let (state, app) = spawn_app_with(|config| {
        config.catalog.rating_policy = RatingPolicy::Upsert;
    })
    .await;
    let before = state.store().rating_count().await.unwrap();

    // Same client as the seeded 5 star rating.
    let response = app
        .clone()
        .oneshot(
            Request::builder()
                .method("POST")
                .uri("/api/rating/")
                .header("Content-Type", "application/x-www-form-urlencoded")
                .header("X-Forwarded-For", "172.17.0.1")
                .body(Body::from("movie=1&star=1"))
                .unwrap(),
        )
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::OK);

    assert_eq!(state.store().rating_count().await.unwrap(), before);
    let (_, list) = get_json(&app, "/api/movie/").await;
    assert_eq!(list["results"][0]["middle_star"], 1);

    // A different client still adds a row.
    let (status, _) = post_form(&app, "/api/rating/", "movie=1&star=5").await;
    assert_eq!(status, StatusCode::CREATED);
    assert_eq!(state.store().rating_count().await.unwrap(), before + 1);
}
