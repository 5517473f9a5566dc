use chrono::{DateTime, Utc};
use serde::Serialize;

use crate::catalog::AgeGroup;
use crate::flow::Phase;
use crate::session::{IntakeEvent, Unit};

/// Every successful command produces an Event.
/// The presentation layer renders from it; a failed command produces none.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum Event {
    PhaseChanged {
        from: Phase,
        to: Phase,
        at: DateTime<Utc>,
    },
    AgeGroupSelected {
        age_group: AgeGroup,
        label: &'static str,
        standard_goal_ml: u32,
        at: DateTime<Utc>,
    },
    GoalSet {
        goal_ml: u32,
        previous_ml: u32,
        at: DateTime<Utc>,
    },
    IntakeLogged {
        entry: IntakeEvent,
        /// Set only on the command that first takes progress to 100%.
        /// Drives the one-shot celebration.
        goal_reached: bool,
    },
    UnitChanged {
        unit: Unit,
        at: DateTime<Utc>,
    },
    /// Intake and log cleared; age group and goals kept.
    DayReset {
        cleared_entries: usize,
        at: DateTime<Utc>,
    },
    /// Everything cleared; back to `Welcome`.
    SessionReset {
        at: DateTime<Utc>,
    },
}
