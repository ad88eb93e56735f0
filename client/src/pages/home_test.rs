#![allow(clippy::float_cmp)]

use super::*;
use crate::ApiClient;
use crate::test_backend::client_for;
use axum::http::StatusCode;
use axum::routing::{get, post};
use axum::{Json, Router};
use serde_json::json;

fn router(story_ok: bool) -> Router {
    Router::new()
        .route(
            "/api/auth/login",
            post(|| async {
                Json(json!({
                    "access_token": "tok",
                    "token_type": "bearer",
                    "user": { "id": "U-1", "email": "ada@example.com", "username": "ada" }
                }))
            }),
        )
        .route(
            "/api/story/progress/{user}",
            get(move || async move {
                if story_ok {
                    (
                        StatusCode::OK,
                        Json(json!({
                            "current_chapter": 1,
                            "chapter_data": { "title": "The Digital Collapse", "buildings": ["data_center", "library"] },
                            "completed_chapters": [],
                            "city_buildings_restored": ["data_center", "library", "power_grid"]
                        })),
                    )
                } else {
                    (StatusCode::INTERNAL_SERVER_ERROR, Json(json!({ "detail": "db down" })))
                }
            }),
        )
        .route(
            "/api/story/chapter/{id}",
            get(|| async { Json(json!({ "title": "The Digital Collapse", "intro": "The city went dark.", "buildings": [] })) }),
        )
}

async fn logged_in(story_ok: bool) -> (ApiClient, AuthState) {
    let api = client_for(router(story_ok)).await;
    let mut auth = AuthState::new(api.clone());
    auth.login("ada@example.com", "pw").await.unwrap();
    (api, auth)
}

#[tokio::test]
async fn requires_a_user() {
    let api = client_for(router(true)).await;
    let auth = AuthState::new(api.clone());
    let err = HomePage::load(&auth).await.unwrap_err();
    assert_eq!(err.redirect(), Some(Route::Login));
}

#[tokio::test]
async fn loads_story_and_defaults() {
    let (api, auth) = logged_in(true).await;
    let home = HomePage::load(&auth).await.unwrap();
    assert_eq!(home.topic(), "arrays");
    assert_eq!(home.difficulty(), Difficulty::Easy);
    assert_eq!(home.chapter().map(|c| c.title.as_str()), Some("The Digital Collapse"));
    assert_eq!(home.city().restored_count(), 3);
    assert_eq!(home.city().progress_percent(), 25.0);
}

#[tokio::test]
async fn story_failure_degrades_gracefully() {
    let (api, auth) = logged_in(false).await;
    let mut home = HomePage::load(&auth).await.unwrap();
    assert!(home.progress().is_none());
    assert!(home.take_intro().is_none());
    assert_eq!(home.city().restored_count(), 0);
}

#[tokio::test]
async fn intro_shown_once_per_chapter() {
    let (api, auth) = logged_in(true).await;
    let mut home = HomePage::load(&auth).await.unwrap();
    assert_eq!(home.take_intro().map(|c| c.intro.as_str()), Some("The city went dark."));
    assert!(home.take_intro().is_none());
}

#[tokio::test]
async fn topic_and_difficulty_selection() {
    let (api, auth) = logged_in(true).await;
    let mut home = HomePage::load(&auth).await.unwrap();
    assert_eq!(home.select_topic("sorting"), Ok(()));
    assert_eq!(home.select_topic("cooking"), Err(UnknownTopic("cooking".into())));
    home.select_difficulty(Difficulty::Hard);
    assert_eq!(
        home.game_params(),
        GameParams { topic: "sorting".into(), difficulty: Difficulty::Hard, user_id: "U-1".into() }
    );
    assert_eq!(home.topics().len(), 7);
}
