use actix_web::{post, web, HttpResponse};
use validator::Validate;

use crate::{
    auth::AuthenticatedUser,
    errors::AppError,
    models::{
        domain::generation::check_type_selection,
        dto::request::{ParseRequestDto, ValidateRequestDto},
    },
    services::{question_validator, quiz_parser},
};

#[post("/quizzes/parse")]
async fn parse_quiz(
    request: web::Json<ParseRequestDto>,
    _auth: AuthenticatedUser,
) -> Result<HttpResponse, AppError> {
    let dto = request.into_inner();
    dto.validate()?;

    check_type_selection(&dto.question_types)?;

    let outcome = quiz_parser::parse(&dto.raw_text, &dto.question_types);
    Ok(HttpResponse::Ok().json(outcome))
}

#[post("/quizzes/validate")]
async fn validate_quiz(
    request: web::Json<ValidateRequestDto>,
    _auth: AuthenticatedUser,
) -> Result<HttpResponse, AppError> {
    let dto = request.into_inner();
    dto.validate()?;

    check_type_selection(&dto.question_types)?;

    let result = question_validator::validate(&dto.raw_text, &dto.question_types, dto.total_count);
    Ok(HttpResponse::Ok().json(result))
}
