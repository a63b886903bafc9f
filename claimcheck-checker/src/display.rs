use claimcheck_detect::{CheckError, VerdictResponse};

/// Sequence number handed to every submission, empty ones included.
pub type Ticket = u64;

/// What the result region currently shows.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub enum DisplayState {
    /// Nothing submitted yet.
    #[default]
    Idle,
    /// The last submission was empty.
    Prompt,
    Checking {
        ticket: Ticket,
        claim: String,
    },
    Verdict {
        ticket: Ticket,
        claim: String,
        verdict: VerdictResponse,
    },
    Failed {
        ticket: Ticket,
        claim: String,
        error: CheckError,
    },
}

impl DisplayState {
    pub fn ticket(&self) -> Option<Ticket> {
        match self {
            DisplayState::Idle | DisplayState::Prompt => None,
            DisplayState::Checking { ticket, .. }
            | DisplayState::Verdict { ticket, .. }
            | DisplayState::Failed { ticket, .. } => Some(*ticket),
        }
    }

    pub fn is_settled(&self) -> bool {
        matches!(
            self,
            DisplayState::Prompt | DisplayState::Verdict { .. } | DisplayState::Failed { .. }
        )
    }
}

/// The shared display region plus the bookkeeping writers need.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct DisplayRegion {
    pub state: DisplayState,
    /// Requests sent and not yet answered.
    pub in_flight: usize,
    /// Ticket of the most recent submission.
    pub latest: Ticket,
}

/// How to treat an answer whose submission has been superseded.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum StalePolicy {
    /// Every answer is written; the one that completes last stays visible.
    #[default]
    LastCompleted,
    /// Answers for anything but the latest submission are dropped.
    LatestSubmitted,
}

impl StalePolicy {
    pub(crate) fn accepts(self, ticket: Ticket, latest: Ticket) -> bool {
        match self {
            StalePolicy::LastCompleted => true,
            StalePolicy::LatestSubmitted => ticket == latest,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn latest_submitted_only_accepts_current_ticket() {
        assert!(StalePolicy::LatestSubmitted.accepts(3, 3));
        assert!(!StalePolicy::LatestSubmitted.accepts(2, 3));
        assert!(StalePolicy::LastCompleted.accepts(2, 3));
    }

    #[test]
    fn checking_is_not_settled() {
        let checking = DisplayState::Checking {
            ticket: 1,
            claim: "x".into(),
        };
        assert!(!checking.is_settled());
        assert_eq!(checking.ticket(), Some(1));
        assert!(DisplayState::Prompt.is_settled());
        assert_eq!(DisplayState::Idle.ticket(), None);
    }
}
