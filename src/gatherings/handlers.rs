use axum::extract::{Path, State};
use axum::http::StatusCode;
use axum::response::Response;
use axum::{Json, debug_handler};

use super::{Gathering, GatheringQuery, GatheringStore};
use crate::enrich;
use crate::error::AppResult;
use crate::members::{MemberQuery, MemberStore};
use crate::response::respond;
use crate::AppState;

#[debug_handler(state = AppState)]
pub(crate) async fn create_gathering(
    State(gatherings): State<GatheringStore>,
    State(members): State<MemberStore>,
    Json(mut gathering): Json<Gathering>,
) -> AppResult<Response> {
    gathering.validate()?;

    // the creator is also an attendee
    let creator = members.get_by_id(gathering.creator.id).await?;
    gathering.attendees.push(creator.clone());

    let gathering = gatherings.create(&gathering).await?;

    let attendee_ids: Vec<i64> = gathering
        .attendees
        .iter()
        .map(|m| m.id)
        .filter(|id| *id != creator.id)
        .collect();
    let mut attendee_members = members
        .get(&MemberQuery {
            ids: attendee_ids,
            ..Default::default()
        })
        .await?;
    attendee_members.push(creator);

    let gathering = enrich::gatherings(vec![gathering], &attendee_members).remove(0);
    Ok(respond(StatusCode::CREATED, "success", Some(gathering)))
}

#[debug_handler(state = AppState)]
pub(crate) async fn list_gatherings(
    State(gatherings): State<GatheringStore>,
    State(members): State<MemberStore>,
) -> AppResult<Response> {
    let gatherings = gatherings.get(&GatheringQuery::default()).await?;

    let mut member_ids = Vec::new();
    for gathering in &gatherings {
        member_ids.push(gathering.creator.id);
        member_ids.extend(gathering.attendees.iter().map(|m| m.id));
    }
    let members = members
        .get(&MemberQuery {
            ids: member_ids,
            ..Default::default()
        })
        .await?;

    let gatherings = enrich::gatherings(gatherings, &members);
    Ok(respond(StatusCode::OK, "success", Some(gatherings)))
}

#[debug_handler(state = AppState)]
pub(crate) async fn get_gathering(
    State(gatherings): State<GatheringStore>,
    State(members): State<MemberStore>,
    Path(id): Path<i64>,
) -> AppResult<Response> {
    let gathering = gatherings.get_by_id(id).await?;

    let mut member_ids = vec![gathering.creator.id];
    member_ids.extend(gathering.attendees.iter().map(|m| m.id));
    // discarded members still render on a single-gathering read
    let members = members
        .get(&MemberQuery {
            ids: member_ids,
            include_discarded: true,
        })
        .await?;

    let gathering = enrich::gatherings(vec![gathering], &members).remove(0);
    Ok(respond(StatusCode::OK, "success", Some(gathering)))
}

#[debug_handler]
pub(crate) async fn update_gathering(
    State(gatherings): State<GatheringStore>,
    Path(id): Path<i64>,
    Json(mut gathering): Json<Gathering>,
) -> AppResult<Response> {
    gathering.validate()?;
    gatherings.get_by_id(id).await?;
    gathering.id = id;
    gatherings.update(&gathering).await?;
    let gathering = gatherings.get_by_id(id).await?;
    Ok(respond(StatusCode::OK, "success", Some(gathering)))
}

#[debug_handler]
pub(crate) async fn delete_gathering(
    State(gatherings): State<GatheringStore>,
    Path(id): Path<i64>,
) -> AppResult<Response> {
    gatherings.get_by_id(id).await?;
    gatherings.delete(id).await?;
    Ok(respond(StatusCode::OK, "success", None::<()>))
}
