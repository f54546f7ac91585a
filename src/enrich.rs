//! Replaces bare foreign-key references with full records for response
//! assembly. Joins are tolerant: a reference with no matching record is left
//! as-is rather than failing the response. Input order is preserved.

use std::collections::HashMap;

use crate::gatherings::Gathering;
use crate::invitations::Invitation;
use crate::members::Member;

pub fn gatherings(gatherings: Vec<Gathering>, members: &[Member]) -> Vec<Gathering> {
    let members_by_id: HashMap<i64, &Member> = members.iter().map(|m| (m.id, m)).collect();

    gatherings
        .into_iter()
        .map(|mut gathering| {
            if let Some(member) = members_by_id.get(&gathering.creator.id) {
                gathering.creator = (*member).clone();
            }
            gathering.attendees = gathering
                .attendees
                .into_iter()
                .map(|attendee| {
                    members_by_id
                        .get(&attendee.id)
                        .map_or(attendee, |member| (*member).clone())
                })
                .collect();
            gathering
        })
        .collect()
}

pub fn invitations(
    invitations: Vec<Invitation>,
    gatherings: &[Gathering],
    members: &[Member],
) -> Vec<Invitation> {
    let members_by_id: HashMap<i64, &Member> = members.iter().map(|m| (m.id, m)).collect();
    let gatherings_by_id: HashMap<i64, &Gathering> =
        gatherings.iter().map(|g| (g.id, g)).collect();

    invitations
        .into_iter()
        .map(|mut invitation| {
            if let Some(member) = members_by_id.get(&invitation.member.id) {
                invitation.member = (*member).clone();
            }
            if let Some(gathering) = gatherings_by_id.get(&invitation.gathering.id) {
                invitation.gathering = (*gathering).clone();
            }
            invitation
        })
        .collect()
}
