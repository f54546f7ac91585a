use axum::extract::{Path, State};
use axum::http::StatusCode;
use axum::response::Response;
use axum::{Json, debug_handler};

use super::{Member, MemberQuery, MemberStore};
use crate::error::AppResult;
use crate::response::respond;

#[debug_handler]
pub(crate) async fn create_member(
    State(members): State<MemberStore>,
    Json(member): Json<Member>,
) -> AppResult<Response> {
    member.validate()?;
    let member = members.create(&member).await?;
    Ok(respond(StatusCode::CREATED, "success", Some(member)))
}

#[debug_handler]
pub(crate) async fn list_members(State(members): State<MemberStore>) -> AppResult<Response> {
    let members = members.get(&MemberQuery::default()).await?;
    Ok(respond(StatusCode::OK, "success", Some(members)))
}

#[debug_handler]
pub(crate) async fn get_member(
    State(members): State<MemberStore>,
    Path(id): Path<i64>,
) -> AppResult<Response> {
    let member = members.get_by_id(id).await?;
    Ok(respond(StatusCode::OK, "success", Some(member)))
}

#[debug_handler]
pub(crate) async fn update_member(
    State(members): State<MemberStore>,
    Path(id): Path<i64>,
    Json(mut member): Json<Member>,
) -> AppResult<Response> {
    member.validate()?;
    members.get_by_id(id).await?;
    member.id = id;
    members.update(&member).await?;
    let member = members.get_by_id(id).await?;
    Ok(respond(StatusCode::OK, "success", Some(member)))
}

#[debug_handler]
pub(crate) async fn delete_member(
    State(members): State<MemberStore>,
    Path(id): Path<i64>,
) -> AppResult<Response> {
    members.get_by_id(id).await?;
    members.delete(id).await?;
    Ok(respond(StatusCode::OK, "success", None::<()>))
}
