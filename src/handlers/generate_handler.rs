use actix_web::{post, web, HttpRequest, HttpResponse};
use validator::Validate;

use crate::{
    app_state::AppState,
    auth::{require_owner, AuthenticatedUser},
    errors::AppError,
    middleware::get_request_id,
    models::{
        domain::GenerationRequest,
        dto::{
            request::{CheckAnswerRequestDto, GenerateRequestDto},
            response::{CheckAnswerResponse, GenerateResponse},
        },
    },
    repositories::require_document,
};

#[post("/generate")]
async fn generate_quiz(
    state: web::Data<AppState>,
    req: HttpRequest,
    request: web::Json<GenerateRequestDto>,
    auth: AuthenticatedUser,
) -> Result<HttpResponse, AppError> {
    let request_id = get_request_id(&req);
    let dto = request.into_inner();
    dto.validate()?;

    let types = dto.requested_types();
    if types.is_empty() {
        return Err(AppError::ValidationError(
            "questionTypes or questionType is required".to_string(),
        ));
    }

    let document = require_document(state.documents.as_ref(), &dto.reviewer_id).await?;
    require_owner(&auth.0, &document.user_id)?;

    let generation = GenerationRequest::new(
        document.text_extracted,
        &types,
        dto.count,
        dto.special_instructions,
        dto.true_false_variant,
    )?;

    log::info!(
        "[{}] generating {} question(s) of {:?} from reviewer {}",
        request_id,
        generation.total_count,
        generation.requested_types,
        dto.reviewer_id
    );

    let output = state.generation_service.generate(&generation).await?;
    if !output.validation.is_complete {
        log::warn!(
            "[{}] returning incomplete quiz after {} attempt(s), {} question(s) short",
            request_id,
            output.attempts,
            output.validation.total_needed()
        );
    }

    Ok(HttpResponse::Ok().json(GenerateResponse::new(
        dto.reviewer_id,
        generation.requested_types,
        output,
    )))
}

#[post("/generate/check-answer")]
async fn check_answer(
    state: web::Data<AppState>,
    request: web::Json<CheckAnswerRequestDto>,
    _auth: AuthenticatedUser,
) -> Result<HttpResponse, AppError> {
    let dto = request.into_inner();
    dto.validate()?;

    let (Some(user_answer), Some(correct_answer)) = (dto.user_answer, dto.correct_answer) else {
        return Err(AppError::ValidationError(
            "Missing required fields".to_string(),
        ));
    };

    let verdict = state
        .answer_checker
        .check(&user_answer, &correct_answer, &dto.question_text)
        .await;

    Ok(HttpResponse::Ok().json(CheckAnswerResponse::from(verdict)))
}
