use chrono::{DateTime, TimeDelta, Utc};

/// Snapshot of the transient export flags a view renders from.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct ShareState {
    pub is_sharing: bool,
    pub copy_success: bool,
}

/// Mutable bookkeeping behind [`ShareState`].
#[derive(Debug, Default)]
pub(crate) struct ExportFlags {
    pub(crate) sharing: bool,
    pub(crate) copied_at: Option<DateTime<Utc>>,
}

impl ExportFlags {
    /// Time left in the "copied" window at `now`, if any.
    pub(crate) fn copy_feedback_left(
        &self,
        now: DateTime<Utc>,
        window: TimeDelta,
    ) -> Option<TimeDelta> {
        let left = self.copied_at? + window - now;
        (left > TimeDelta::zero()).then_some(left)
    }

    pub(crate) fn snapshot(&self, now: DateTime<Utc>, window: TimeDelta) -> ShareState {
        ShareState {
            is_sharing: self.sharing,
            copy_success: self.copy_feedback_left(now, window).is_some(),
        }
    }
}
