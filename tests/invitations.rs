//! Invitation lifecycle against real storage: every status transition must
//! keep the attendee roster in step with the set of accepted invitations.

mod common;

use gatherly::AppError;
use gatherly::gatherings::GatheringStore;
use gatherly::invitations::{Invitation, InvitationStatus, InvitationStore, StatusChange};
use sqlx::SqlitePool;

async fn seed_invitation(pool: &SqlitePool, member_id: i64, gathering_id: i64) -> Invitation {
    let mut invitation = Invitation::default();
    invitation.member.id = member_id;
    invitation.gathering.id = gathering_id;
    InvitationStore::new(pool.clone())
        .create(&invitation)
        .await
        .unwrap()
}

async fn transition(pool: &SqlitePool, invitation_id: i64, status: InvitationStatus) -> Result<(), AppError> {
    let store = InvitationStore::new(pool.clone());
    let invitation = store.get_by_id(invitation_id).await.unwrap();
    match status {
        InvitationStatus::Accepted => invitation.status.check_accept()?,
        InvitationStatus::Rejected => invitation.status.check_reject()?,
        InvitationStatus::Canceled => invitation.status.check_cancel()?,
        InvitationStatus::Created => {}
    }
    store
        .update_status(&StatusChange {
            id: invitation_id,
            member_id: invitation.member_id,
            gathering_id: invitation.gathering_id,
            status,
        })
        .await
}

#[tokio::test]
async fn accept_adds_the_member_to_the_attendee_list() {
    let pool = common::pool().await;
    let creator = common::seed_member(&pool, "ana").await;
    let invitee = common::seed_member(&pool, "bo").await;
    let gathering = common::seed_gathering(&pool, &creator).await;
    assert_eq!(common::roster(&pool, gathering.id).await, vec![creator.id]);

    let invitation = seed_invitation(&pool, invitee.id, gathering.id).await;
    assert_eq!(invitation.status, InvitationStatus::Created);

    transition(&pool, invitation.id, InvitationStatus::Accepted)
        .await
        .unwrap();
    assert_eq!(
        common::roster(&pool, gathering.id).await,
        vec![creator.id, invitee.id]
    );

    // the read side reconstitutes the same set
    let fetched = GatheringStore::new(pool.clone())
        .get_by_id(gathering.id)
        .await
        .unwrap();
    let mut attendee_ids: Vec<i64> = fetched.attendees.iter().map(|m| m.id).collect();
    attendee_ids.sort_unstable();
    assert_eq!(attendee_ids, vec![creator.id, invitee.id]);
}

#[tokio::test]
async fn a_second_accept_conflicts_and_leaves_the_roster_unchanged() {
    let pool = common::pool().await;
    let creator = common::seed_member(&pool, "ana").await;
    let invitee = common::seed_member(&pool, "bo").await;
    let gathering = common::seed_gathering(&pool, &creator).await;
    let invitation = seed_invitation(&pool, invitee.id, gathering.id).await;

    transition(&pool, invitation.id, InvitationStatus::Accepted)
        .await
        .unwrap();
    let err = transition(&pool, invitation.id, InvitationStatus::Accepted)
        .await
        .unwrap_err();
    assert_eq!(err.to_string(), "the member has accepted the invitation");
    assert_eq!(
        common::roster(&pool, gathering.id).await,
        vec![creator.id, invitee.id]
    );
}

#[tokio::test]
async fn a_duplicate_roster_insert_rolls_the_status_write_back() {
    let pool = common::pool().await;
    let creator = common::seed_member(&pool, "ana").await;
    let invitee = common::seed_member(&pool, "bo").await;
    let gathering = common::seed_gathering(&pool, &creator).await;
    let invitation = seed_invitation(&pool, invitee.id, gathering.id).await;
    let store = InvitationStore::new(pool.clone());

    transition(&pool, invitation.id, InvitationStatus::Accepted)
        .await
        .unwrap();
    transition(&pool, invitation.id, InvitationStatus::Rejected)
        .await
        .unwrap();

    // a competing accept for the same pair already rostered this member
    sqlx::query("INSERT INTO attendees (member_id, gathering_id) VALUES (?, ?)")
        .bind(invitee.id)
        .bind(gathering.id)
        .execute(&pool)
        .await
        .unwrap();

    let err = transition(&pool, invitation.id, InvitationStatus::Accepted)
        .await
        .unwrap_err();
    assert_eq!(err.to_string(), "the member has accepted the invitation");

    // the status update in the failed transaction must not have persisted
    let after = store.get_by_id(invitation.id).await.unwrap();
    assert_eq!(after.status, InvitationStatus::Rejected);
}

#[tokio::test]
async fn reject_after_accept_removes_the_member_but_never_the_creator() {
    let pool = common::pool().await;
    let creator = common::seed_member(&pool, "ana").await;
    let invitee = common::seed_member(&pool, "bo").await;
    let gathering = common::seed_gathering(&pool, &creator).await;
    let invitation = seed_invitation(&pool, invitee.id, gathering.id).await;

    transition(&pool, invitation.id, InvitationStatus::Accepted)
        .await
        .unwrap();
    transition(&pool, invitation.id, InvitationStatus::Rejected)
        .await
        .unwrap();
    assert_eq!(common::roster(&pool, gathering.id).await, vec![creator.id]);
}

#[tokio::test]
async fn cancel_after_accept_removes_the_member() {
    let pool = common::pool().await;
    let creator = common::seed_member(&pool, "ana").await;
    let invitee = common::seed_member(&pool, "bo").await;
    let gathering = common::seed_gathering(&pool, &creator).await;
    let invitation = seed_invitation(&pool, invitee.id, gathering.id).await;

    transition(&pool, invitation.id, InvitationStatus::Accepted)
        .await
        .unwrap();
    transition(&pool, invitation.id, InvitationStatus::Canceled)
        .await
        .unwrap();
    assert_eq!(common::roster(&pool, gathering.id).await, vec![creator.id]);

    let err = transition(&pool, invitation.id, InvitationStatus::Rejected)
        .await
        .unwrap_err();
    assert_eq!(err.to_string(), "the invitation for this member has canceled");
}

#[tokio::test]
async fn rejecting_a_never_accepted_invitation_is_a_roster_noop() {
    let pool = common::pool().await;
    let creator = common::seed_member(&pool, "ana").await;
    let invitee = common::seed_member(&pool, "bo").await;
    let gathering = common::seed_gathering(&pool, &creator).await;
    let invitation = seed_invitation(&pool, invitee.id, gathering.id).await;

    transition(&pool, invitation.id, InvitationStatus::Rejected)
        .await
        .unwrap();
    assert_eq!(common::roster(&pool, gathering.id).await, vec![creator.id]);
}

#[tokio::test]
async fn a_canceled_invitation_can_still_be_accepted() {
    let pool = common::pool().await;
    let creator = common::seed_member(&pool, "ana").await;
    let invitee = common::seed_member(&pool, "bo").await;
    let gathering = common::seed_gathering(&pool, &creator).await;
    let invitation = seed_invitation(&pool, invitee.id, gathering.id).await;

    transition(&pool, invitation.id, InvitationStatus::Canceled)
        .await
        .unwrap();
    transition(&pool, invitation.id, InvitationStatus::Accepted)
        .await
        .unwrap();
    assert_eq!(
        common::roster(&pool, gathering.id).await,
        vec![creator.id, invitee.id]
    );
}
