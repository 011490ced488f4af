pub mod generate_handler;
pub mod health_handler;
pub mod quiz_handler;

use actix_web::web;

use crate::{auth::AuthMiddleware, errors::AppError};

pub use generate_handler::{check_answer, generate_quiz};
pub use health_handler::health_check;
pub use quiz_handler::{parse_quiz, validate_quiz};

/// Registers every route. `/api/*` requires a bearer token; the app must
/// carry `web::Data<AppState>`.
pub fn configure_routes(cfg: &mut web::ServiceConfig) {
    let json_config = web::JsonConfig::default()
        .limit(2 * 1024 * 1024)
        .error_handler(|err, _req| AppError::ValidationError(err.to_string()).into());

    cfg.app_data(json_config).service(health_check).service(
        web::scope("/api")
            .wrap(AuthMiddleware)
            .service(generate_quiz)
            .service(check_answer)
            .service(parse_quiz)
            .service(validate_quiz),
    );
}

#[cfg(test)]
mod tests {
    use std::sync::Arc;

    use actix_web::{http::StatusCode, test, web, App};
    use serde_json::{json, Value};

    use super::*;
    use crate::{
        app_state::AppState,
        config::Config,
        middleware::{RequestIdMiddleware, REQUEST_ID_HEADER},
        repositories::source_document_repository::MockSourceDocumentRepository,
        services::provider::MockCompletionProvider,
        test_utils::{fixtures::*, test_helpers::*},
    };

    fn documents() -> MockSourceDocumentRepository {
        let mut repo = MockSourceDocumentRepository::new();
        repo.expect_find_by_id().returning(|id| {
            Ok((id == DOCUMENT_ID).then(test_document))
        });
        repo
    }

    fn state_with(primary: MockCompletionProvider) -> AppState {
        AppState::from_parts(
            Config::test_config(),
            Arc::new(documents()),
            Arc::new(primary),
            Arc::new(MockCompletionProvider::new()),
        )
    }

    fn bearer(state: &AppState, user_id: &str) -> (&'static str, String) {
        let token = state.jwt_service.create_token(user_id, None).unwrap();
        ("Authorization", format!("Bearer {}", token))
    }

    macro_rules! app {
        ($state:expr) => {
            test::init_service(
                App::new()
                    .app_data(web::Data::new($state))
                    .wrap(RequestIdMiddleware)
                    .configure(configure_routes),
            )
            .await
        };
    }

    #[actix_web::test]
    async fn health_needs_no_token() {
        let app = app!(state_with(MockCompletionProvider::new()));

        let res = test::call_service(&app, test::TestRequest::get().uri("/health").to_request()).await;

        assert_success_status(res.status());
        assert!(res.headers().contains_key(REQUEST_ID_HEADER));
    }

    #[actix_web::test]
    async fn api_rejects_missing_token() {
        let app = app!(state_with(MockCompletionProvider::new()));

        let req = test::TestRequest::post()
            .uri("/api/quizzes/parse")
            .set_json(json!({ "rawText": "Q: a?\nA: b", "questionTypes": ["identification"] }))
            .to_request();
        let res = test::call_service(&app, req).await;

        assert_eq!(res.status(), StatusCode::UNAUTHORIZED);
        let body: Value = test::read_body_json(res).await;
        assert_eq!(body["kind"], "UNAUTHORIZED");
    }

    #[actix_web::test]
    async fn generate_returns_complete_quiz() {
        let mut primary = MockCompletionProvider::new();
        primary
            .expect_complete()
            .times(1)
            .returning(|_, _, _| Ok(format!("Here are your questions:\n{}", TWO_MULTIPLE_CHOICE)));
        let state = state_with(primary);
        let auth = bearer(&state, OWNER_ID);
        let app = app!(state);

        let req = test::TestRequest::post()
            .uri("/api/generate")
            .insert_header(auth)
            .set_json(json!({
                "reviewerId": DOCUMENT_ID,
                "questionType": "multiple-choice",
                "count": 2
            }))
            .to_request();
        let body: Value = test::call_and_read_body_json(&app, req).await;

        assert_eq!(body["success"], true);
        assert_eq!(body["isComplete"], true);
        assert_eq!(body["counts"]["multiple-choice"], 2);
        assert_eq!(body["questionTypes"], json!(["multiple-choice"]));
        assert!(body["questions"].as_str().unwrap().starts_with("Q: Which layer"));
    }

    #[actix_web::test]
    async fn generate_checks_document_ownership() {
        let state = state_with(MockCompletionProvider::new());
        let intruder = bearer(&state, OTHER_USER_ID);
        let app = app!(state);

        let req = test::TestRequest::post()
            .uri("/api/generate")
            .insert_header(intruder.clone())
            .set_json(json!({ "reviewerId": DOCUMENT_ID, "questionType": "matching" }))
            .to_request();
        let res = test::call_service(&app, req).await;
        assert_eq!(res.status(), StatusCode::FORBIDDEN);

        let req = test::TestRequest::post()
            .uri("/api/generate")
            .insert_header(intruder)
            .set_json(json!({ "reviewerId": "nope", "questionType": "matching" }))
            .to_request();
        let res = test::call_service(&app, req).await;
        assert_eq!(res.status(), StatusCode::NOT_FOUND);
    }

    #[actix_web::test]
    async fn generate_rejects_flashcards_mixed_with_other_types() {
        let state = state_with(MockCompletionProvider::new());
        let auth = bearer(&state, OWNER_ID);
        let app = app!(state);

        let req = test::TestRequest::post()
            .uri("/api/generate")
            .insert_header(auth)
            .set_json(json!({
                "reviewerId": DOCUMENT_ID,
                "questionTypes": ["flashcard", "matching"]
            }))
            .to_request();
        let res = test::call_service(&app, req).await;

        assert_eq!(res.status(), StatusCode::BAD_REQUEST);
    }

    #[actix_web::test]
    async fn check_answer_requires_reference() {
        let state = state_with(MockCompletionProvider::new());
        let auth = bearer(&state, OWNER_ID);
        let app = app!(state);

        let req = test::TestRequest::post()
            .uri("/api/generate/check-answer")
            .insert_header(auth)
            .set_json(json!({ "userAnswer": "Paris" }))
            .to_request();
        let res = test::call_service(&app, req).await;

        assert_error_status(res.status());
        assert_eq!(res.status(), StatusCode::BAD_REQUEST);
    }

    #[actix_web::test]
    async fn check_answer_uses_model_verdict() {
        let mut primary = MockCompletionProvider::new();
        primary
            .expect_complete()
            .returning(|_, _, _| Ok("INCORRECT - the capital is Paris".to_string()));
        let state = state_with(primary);
        let auth = bearer(&state, OWNER_ID);
        let app = app!(state);

        let req = test::TestRequest::post()
            .uri("/api/generate/check-answer")
            .insert_header(auth)
            .set_json(json!({
                "userAnswer": "Lyon",
                "correctAnswer": "Paris",
                "questionText": "Capital of France?"
            }))
            .to_request();
        let body: Value = test::call_and_read_body_json(&app, req).await;

        assert_eq!(body["isCorrect"], false);
        assert_eq!(body["explanation"], "INCORRECT - the capital is Paris");
    }

    #[actix_web::test]
    async fn parse_and_validate_endpoints() {
        let state = state_with(MockCompletionProvider::new());
        let auth = bearer(&state, OWNER_ID);
        let app = app!(state);

        let req = test::TestRequest::post()
            .uri("/api/quizzes/parse")
            .insert_header(auth.clone())
            .set_json(json!({ "rawText": "nothing useful", "questionTypes": ["identification"] }))
            .to_request();
        let body: Value = test::call_and_read_body_json(&app, req).await;
        assert_eq!(body["status"], "unparseable");

        let req = test::TestRequest::post()
            .uri("/api/quizzes/validate")
            .insert_header(auth)
            .set_json(json!({
                "rawText": TWO_MULTIPLE_CHOICE,
                "questionTypes": ["multiple-choice"],
                "totalCount": 5
            }))
            .to_request();
        let body: Value = test::call_and_read_body_json(&app, req).await;
        assert_eq!(body["isComplete"], false);
        assert_eq!(body["deficits"][0]["needed"], 3);
        assert_eq!(body["countsByType"]["multiple-choice"], 2);
    }

    #[actix_web::test]
    async fn parse_rejects_flashcards_mixed_with_other_types() {
        let state = state_with(MockCompletionProvider::new());
        let auth = bearer(&state, OWNER_ID);
        let app = app!(state);

        let req = test::TestRequest::post()
            .uri("/api/quizzes/parse")
            .insert_header(auth)
            .set_json(json!({
                "rawText": "Front: ARP\nBack: Resolves MAC addresses",
                "questionTypes": ["flashcard", "identification"]
            }))
            .to_request();
        let res = test::call_service(&app, req).await;

        assert_eq!(res.status(), StatusCode::BAD_REQUEST);
    }
}
