use serde::{Deserialize, Serialize};

use crate::error::{AppError, AppResult};

/// Invitation lifecycle state, stored and serialized as its integer value.
///
/// The guards below are deliberately asymmetric: accepting only checks for a
/// prior accept, while reject and cancel check for a prior cancel or reject.
/// A canceled or rejected invitation can therefore still be accepted, and an
/// accepted one can still be rejected or canceled. A status never returns to
/// `Created`.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize, sqlx::Type)]
#[serde(try_from = "i64", into = "i64")]
#[repr(i32)]
pub enum InvitationStatus {
    #[default]
    Created = 0,
    Accepted = 1,
    Rejected = 2,
    Canceled = 3,
}

impl InvitationStatus {
    pub fn check_accept(self) -> AppResult<()> {
        if self == Self::Accepted {
            return Err(AppError::conflict("the member has accepted the invitation"));
        }
        Ok(())
    }

    pub fn check_reject(self) -> AppResult<()> {
        match self {
            Self::Canceled => Err(AppError::conflict(
                "the invitation for this member has canceled",
            )),
            Self::Rejected => Err(AppError::conflict("the member has rejected the invitation")),
            _ => Ok(()),
        }
    }

    pub fn check_cancel(self) -> AppResult<()> {
        self.check_reject()
    }
}

impl TryFrom<i64> for InvitationStatus {
    type Error = AppError;

    fn try_from(value: i64) -> Result<Self, Self::Error> {
        match value {
            0 => Ok(Self::Created),
            1 => Ok(Self::Accepted),
            2 => Ok(Self::Rejected),
            3 => Ok(Self::Canceled),
            _ => Err(AppError::validation("invalid invitation status")),
        }
    }
}

impl From<InvitationStatus> for i64 {
    fn from(status: InvitationStatus) -> Self {
        status as i64
    }
}

#[cfg(test)]
mod tests {
    use super::InvitationStatus::{Accepted, Canceled, Created, Rejected};
    use super::*;

    #[test]
    fn created_allows_every_transition() {
        assert!(Created.check_accept().is_ok());
        assert!(Created.check_reject().is_ok());
        assert!(Created.check_cancel().is_ok());
    }

    #[test]
    fn accepted_refuses_a_second_accept() {
        let err = Accepted.check_accept().unwrap_err();
        assert_eq!(err.to_string(), "the member has accepted the invitation");
        assert!(Accepted.check_reject().is_ok());
        assert!(Accepted.check_cancel().is_ok());
    }

    #[test]
    fn rejected_refuses_reject_and_cancel() {
        let err = Rejected.check_reject().unwrap_err();
        assert_eq!(err.to_string(), "the member has rejected the invitation");
        let err = Rejected.check_cancel().unwrap_err();
        assert_eq!(err.to_string(), "the member has rejected the invitation");
        assert!(Rejected.check_accept().is_ok());
    }

    #[test]
    fn canceled_refuses_reject_and_cancel() {
        let err = Canceled.check_reject().unwrap_err();
        assert_eq!(
            err.to_string(),
            "the invitation for this member has canceled"
        );
        let err = Canceled.check_cancel().unwrap_err();
        assert_eq!(
            err.to_string(),
            "the invitation for this member has canceled"
        );
        assert!(Canceled.check_accept().is_ok());
    }

    #[test]
    fn status_round_trips_through_its_integer_value() {
        for status in [Created, Accepted, Rejected, Canceled] {
            assert_eq!(InvitationStatus::try_from(i64::from(status)).unwrap(), status);
        }
        assert!(InvitationStatus::try_from(4).is_err());
        assert!(InvitationStatus::try_from(-1).is_err());
    }
}
