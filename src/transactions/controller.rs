use axum::{
    extract::{Path, State},
    http::StatusCode,
    response::Json,
};
use serde_json::Value;
use crate::core::command::Command;
use crate::core::controller::{AppState, json_to_server_error, ServerError};
use crate::transactions::command::borrow_book_cmd::{BorrowBookCommand, BorrowBookCommandRequest, BorrowBookCommandResponse};
use crate::transactions::command::list_overdue_cmd::{ListOverdueCommand, ListOverdueCommandResponse};
use crate::transactions::command::mark_overdue_cmd::{MarkOverdueCommand, MarkOverdueCommandResponse};
use crate::transactions::command::return_book_cmd::{ReturnBookCommand, ReturnBookCommandRequest, ReturnBookCommandResponse};
use crate::transactions::factory::create_circulation_service;

pub(crate) async fn borrow_book(
    State(state): State<AppState>,
    json: Json<Value>) -> Result<(StatusCode, Json<BorrowBookCommandResponse>), ServerError> {
    let req: BorrowBookCommandRequest = serde_json::from_value(json.0).map_err(json_to_server_error)?;
    let res = BorrowBookCommand::new(create_circulation_service(&state)).execute(req).await?;
    Ok((StatusCode::CREATED, Json(res)))
}

pub(crate) async fn return_book(
    State(state): State<AppState>,
    Path(transaction_id): Path<i64>) -> Result<Json<ReturnBookCommandResponse>, ServerError> {
    let req = ReturnBookCommandRequest { transaction_id };
    let res = ReturnBookCommand::new(create_circulation_service(&state)).execute(req).await?;
    Ok(Json(res))
}

pub(crate) async fn find_overdue(
    State(state): State<AppState>) -> Result<Json<ListOverdueCommandResponse>, ServerError> {
    let res = ListOverdueCommand::new(create_circulation_service(&state)).execute(()).await?;
    Ok(Json(res))
}

pub(crate) async fn mark_overdue(
    State(state): State<AppState>) -> Result<Json<MarkOverdueCommandResponse>, ServerError> {
    let res = MarkOverdueCommand::new(create_circulation_service(&state)).execute(()).await?;
    Ok(Json(res))
}
