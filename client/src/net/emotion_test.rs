use super::*;
use crate::test_backend::client_for;
use axum::routing::post;
use axum::{Json, Router};
use serde_json::{Value, json};
use std::sync::Arc;
use wire::HintAction;

fn router() -> Router {
    Router::new().route(
        "/api/detect-emotion",
        post(|Json(body): Json<Value>| async move {
            assert_eq!(body["questionId"], "Q1");
            assert_eq!(body["sessionId"], "S-1");
            assert_eq!(body["timeSpent"], 6.0);
            assert!(body["image"].as_str().unwrap().starts_with("data:image/jpeg;base64,"));
            Json(json!({
                "emotion": "confused",
                "confidence": 0.72,
                "raw_emotions": { "fear": 0.1, "neutral": 0.6 },
                "hint_recommendation": { "action": "provide_hint", "hint": "Check the loop bounds", "hint_level": 2 }
            }))
        }),
    )
}

fn request() -> DetectEmotionRequest {
    DetectEmotionRequest {
        image: "data:image/jpeg;base64,/9j/".to_owned(),
        question_id: "Q1".to_owned(),
        time_spent: 6.0,
        session_id: "S-1".to_owned(),
    }
}

#[tokio::test]
async fn detect_emotion_posts_frame_and_decodes_hint() {
    let client = client_for(router()).await;
    let result = client.detect_emotion(&request()).await.unwrap();
    assert_eq!(result.emotion, "confused");
    let hint = result.actionable_hint().unwrap();
    assert_eq!(hint.action, HintAction::ProvideHint);
    assert_eq!(hint.hint_level, Some(2));
}

#[tokio::test]
async fn client_works_as_a_detector() {
    let detector: Arc<dyn EmotionDetector> = Arc::new(client_for(router()).await);
    let result = detector.detect(request()).await.unwrap();
    assert_eq!(result.raw_emotions.len(), 2);
}
