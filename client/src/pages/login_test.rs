use super::*;
use crate::test_backend::client_for;
use axum::http::StatusCode;
use axum::routing::post;
use axum::{Json, Router};
use serde_json::{Value, json};

fn router() -> Router {
    Router::new()
        .route(
            "/api/auth/login",
            post(|Json(body): Json<Value>| async move {
                match body["password"].as_str() {
                    Some("right") => (
                        StatusCode::OK,
                        Json(json!({
                            "access_token": "tok",
                            "token_type": "bearer",
                            "user": { "id": "U-1", "email": "ada@example.com", "username": "ada" }
                        })),
                    ),
                    Some("crash") => (StatusCode::INTERNAL_SERVER_ERROR, Json(json!({}))),
                    _ => (StatusCode::UNAUTHORIZED, Json(json!({ "detail": "Incorrect email or password" }))),
                }
            }),
        )
        .route(
            "/api/auth/register",
            post(|| async {
                Json(json!({
                    "access_token": "tok2",
                    "token_type": "bearer",
                    "user": { "id": "U-2", "email": "bo@example.com", "username": "bo" }
                }))
            }),
        )
}

async fn auth() -> AuthState {
    AuthState::new(client_for(router()).await)
}

#[tokio::test]
async fn login_success_goes_home() {
    let mut auth = auth().await;
    let mut page = LoginPage::new(LoginMode::Login);
    page.email = " ada@example.com ".into();
    page.password = "right".into();
    assert_eq!(page.submit(&mut auth).await, Ok(Route::Home));
    assert!(page.error().is_none());
    assert!(auth.is_authenticated());
}

#[tokio::test]
async fn backend_detail_is_shown() {
    let mut auth = auth().await;
    let mut page = LoginPage::new(LoginMode::Login);
    page.password = "wrong".into();
    let err = page.submit(&mut auth).await.unwrap_err();
    assert_eq!(err, LoginError::Failed("Incorrect email or password".into()));
    assert_eq!(page.error(), Some("Incorrect email or password"));
}

#[tokio::test]
async fn missing_detail_falls_back_to_generic_message() {
    let mut auth = auth().await;
    let mut page = LoginPage::new(LoginMode::Login);
    page.password = "crash".into();
    page.submit(&mut auth).await.unwrap_err();
    assert_eq!(page.error(), Some(AUTH_FAILED));
}

#[tokio::test]
async fn register_requires_username() {
    let mut auth = auth().await;
    let mut page = LoginPage::new(LoginMode::Register);
    page.email = "bo@example.com".into();
    page.username = "   ".into();
    assert_eq!(page.submit(&mut auth).await, Err(LoginError::UsernameRequired));
    assert_eq!(page.error(), Some("Username is required"));
    assert_eq!(LoginError::UsernameRequired.to_string(), USERNAME_REQUIRED);
    assert!(!auth.is_authenticated());

    page.username = "bo".into();
    assert_eq!(page.submit(&mut auth).await, Ok(Route::Home));
    assert_eq!(auth.user().map(|u| u.username.as_str()), Some("bo"));
}

#[test]
fn toggle_mode_clears_error() {
    let mut page = LoginPage::default();
    page.error = Some("x".into());
    page.toggle_mode();
    assert_eq!(page.mode, LoginMode::Register);
    assert!(page.error().is_none());
    page.toggle_mode();
    assert_eq!(page.mode, LoginMode::Login);
}
