use axum::{
    extract::{Path, State},
    http::StatusCode,
    response::Json,
};
use serde_json::Value;
use crate::core::command::Command;
use crate::core::controller::{AppState, json_to_server_error, ServerError};
use crate::members::command::add_member_cmd::{AddMemberCommand, AddMemberCommandRequest, AddMemberCommandResponse};
use crate::members::command::borrowed_books_cmd::{BorrowedBooksCommand, BorrowedBooksCommandRequest, BorrowedBooksCommandResponse};
use crate::members::command::get_member_cmd::{GetMemberCommand, GetMemberCommandRequest, GetMemberCommandResponse};
use crate::members::command::list_members_cmd::{ListMembersCommand, ListMembersCommandResponse};
use crate::members::command::remove_member_cmd::{RemoveMemberCommand, RemoveMemberCommandRequest, RemoveMemberCommandResponse};
use crate::members::command::update_member_cmd::{UpdateMemberCommand, UpdateMemberCommandRequest, UpdateMemberCommandResponse};
use crate::members::dto::MemberUpdate;
use crate::members::factory::create_member_service;

pub(crate) async fn add_member(
    State(state): State<AppState>,
    json: Json<Value>) -> Result<(StatusCode, Json<AddMemberCommandResponse>), ServerError> {
    let req: AddMemberCommandRequest = serde_json::from_value(json.0).map_err(json_to_server_error)?;
    let res = AddMemberCommand::new(create_member_service(&state)).execute(req).await?;
    Ok((StatusCode::CREATED, Json(res)))
}

pub(crate) async fn find_members(
    State(state): State<AppState>) -> Result<Json<ListMembersCommandResponse>, ServerError> {
    let res = ListMembersCommand::new(create_member_service(&state)).execute(()).await?;
    Ok(Json(res))
}

pub(crate) async fn find_member_by_id(
    State(state): State<AppState>,
    Path(member_id): Path<i64>) -> Result<Json<GetMemberCommandResponse>, ServerError> {
    let req = GetMemberCommandRequest { member_id };
    let res = GetMemberCommand::new(create_member_service(&state)).execute(req).await?;
    Ok(Json(res))
}

pub(crate) async fn update_member(
    State(state): State<AppState>,
    Path(member_id): Path<i64>,
    json: Json<Value>) -> Result<Json<UpdateMemberCommandResponse>, ServerError> {
    let update: MemberUpdate = serde_json::from_value(json.0).map_err(json_to_server_error)?;
    let req = UpdateMemberCommandRequest { member_id, update };
    let res = UpdateMemberCommand::new(create_member_service(&state)).execute(req).await?;
    Ok(Json(res))
}

pub(crate) async fn remove_member(
    State(state): State<AppState>,
    Path(member_id): Path<i64>) -> Result<Json<RemoveMemberCommandResponse>, ServerError> {
    let req = RemoveMemberCommandRequest { member_id };
    let res = RemoveMemberCommand::new(create_member_service(&state)).execute(req).await?;
    Ok(Json(res))
}

pub(crate) async fn find_borrowed(
    State(state): State<AppState>,
    Path(member_id): Path<i64>) -> Result<Json<BorrowedBooksCommandResponse>, ServerError> {
    let req = BorrowedBooksCommandRequest { member_id };
    let res = BorrowedBooksCommand::new(create_member_service(&state)).execute(req).await?;
    Ok(Json(res))
}
