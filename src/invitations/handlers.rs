use axum::extract::{Path, State};
use axum::http::StatusCode;
use axum::response::Response;
use axum::{Json, debug_handler};

use super::status::InvitationStatus;
use super::store::StatusChange;
use super::{Invitation, InvitationQuery, InvitationStore};
use crate::enrich;
use crate::error::AppResult;
use crate::gatherings::{GatheringQuery, GatheringStore};
use crate::members::{MemberQuery, MemberStore};
use crate::response::respond;
use crate::AppState;

#[debug_handler(state = AppState)]
pub(crate) async fn create_invitation(
    State(invitations): State<InvitationStore>,
    State(members): State<MemberStore>,
    State(gatherings): State<GatheringStore>,
    Json(mut invitation): Json<Invitation>,
) -> AppResult<Response> {
    invitation.validate()?;

    let member = members.get_by_id(invitation.member.id).await?;
    let gathering = gatherings.get_by_id(invitation.gathering.id).await?;
    invitation.member = member.clone();
    invitation.gathering = gathering.clone();
    invitation.status = InvitationStatus::Created;

    let invitation = invitations.create(&invitation).await?;
    let invitation = enrich::invitations(vec![invitation], &[gathering], &[member]).remove(0);
    Ok(respond(StatusCode::CREATED, "success", Some(invitation)))
}

#[debug_handler(state = AppState)]
pub(crate) async fn list_invitations(
    State(invitations): State<InvitationStore>,
    State(members): State<MemberStore>,
    State(gatherings): State<GatheringStore>,
) -> AppResult<Response> {
    let invitations = invitations.get(&InvitationQuery::default()).await?;

    let member_ids: Vec<i64> = invitations.iter().map(|inv| inv.member.id).collect();
    let gathering_ids: Vec<i64> = invitations.iter().map(|inv| inv.gathering.id).collect();
    let members = members
        .get(&MemberQuery {
            ids: member_ids,
            ..Default::default()
        })
        .await?;
    let gatherings = gatherings
        .get(&GatheringQuery {
            ids: gathering_ids,
            ..Default::default()
        })
        .await?;

    let invitations = enrich::invitations(invitations, &gatherings, &members);
    Ok(respond(StatusCode::OK, "success", Some(invitations)))
}

#[debug_handler(state = AppState)]
pub(crate) async fn get_invitation(
    State(invitations): State<InvitationStore>,
    State(members): State<MemberStore>,
    State(gatherings): State<GatheringStore>,
    Path(id): Path<i64>,
) -> AppResult<Response> {
    let invitation = invitations.get_by_id(id).await?;

    // discarded references still render on a single-invitation read
    let members = members
        .get(&MemberQuery {
            ids: vec![invitation.member.id],
            include_discarded: true,
        })
        .await?;
    let gatherings = gatherings
        .get(&GatheringQuery {
            ids: vec![invitation.gathering.id],
            include_discarded: true,
        })
        .await?;

    let invitation = enrich::invitations(vec![invitation], &gatherings, &members).remove(0);
    Ok(respond(StatusCode::OK, "success", Some(invitation)))
}

#[debug_handler]
pub(crate) async fn accept_invitation(
    State(invitations): State<InvitationStore>,
    Path(id): Path<i64>,
) -> AppResult<Response> {
    let invitation = invitations.get_by_id(id).await?;
    invitation.status.check_accept()?;
    invitations
        .update_status(&StatusChange {
            id,
            member_id: invitation.member_id,
            gathering_id: invitation.gathering_id,
            status: InvitationStatus::Accepted,
        })
        .await?;
    Ok(respond(StatusCode::OK, "success", None::<()>))
}

#[debug_handler]
pub(crate) async fn reject_invitation(
    State(invitations): State<InvitationStore>,
    Path(id): Path<i64>,
) -> AppResult<Response> {
    let invitation = invitations.get_by_id(id).await?;
    invitation.status.check_reject()?;
    invitations
        .update_status(&StatusChange {
            id,
            member_id: invitation.member_id,
            gathering_id: invitation.gathering_id,
            status: InvitationStatus::Rejected,
        })
        .await?;
    Ok(respond(StatusCode::OK, "success", None::<()>))
}

#[debug_handler]
pub(crate) async fn cancel_invitation(
    State(invitations): State<InvitationStore>,
    Path(id): Path<i64>,
) -> AppResult<Response> {
    let invitation = invitations.get_by_id(id).await?;
    invitation.status.check_cancel()?;
    invitations
        .update_status(&StatusChange {
            id,
            member_id: invitation.member_id,
            gathering_id: invitation.gathering_id,
            status: InvitationStatus::Canceled,
        })
        .await?;
    Ok(respond(StatusCode::OK, "success", None::<()>))
}
