//! Phases of the guided flow and the commands each one accepts.
//!
//! ```text
//! Welcome -> AgeSelection -> GoalConfirmation -> Dashboard <-> Summary
//!    ^            |                 |                 |
//!    +---back-----+   <---back------+                 |
//!    ^                              |                 |
//!    +---------full_reset-----------+-----------------+
//! ```

use serde::{Deserialize, Serialize};
use std::fmt;

use super::command::CommandKind;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Phase {
    #[default]
    Welcome,
    AgeSelection,
    GoalConfirmation,
    Dashboard,
    Summary,
}

impl Phase {
    /// Commands that may be issued in this phase.
    pub fn allowed_commands(self) -> &'static [CommandKind] {
        use super::command::CommandKind::*;
        match self {
            Phase::Welcome => &[Start, SetUnit],
            Phase::AgeSelection => &[SelectAgeGroup, Back, SetUnit],
            Phase::GoalConfirmation => &[SetGoal, ConfirmGoal, Back, FullReset, SetUnit],
            Phase::Dashboard => &[
                AddIntake,
                AddIntakeCups,
                QuickAdd,
                SetGoal,
                ResetDay,
                ViewSummary,
                FullReset,
                SetUnit,
            ],
            Phase::Summary => &[BackToDashboard, StartNewDay, SetUnit],
        }
    }

    pub fn allows(self, command: CommandKind) -> bool {
        self.allowed_commands().contains(&command)
    }
}

impl fmt::Display for Phase {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(match self {
            Phase::Welcome => "welcome",
            Phase::AgeSelection => "age_selection",
            Phase::GoalConfirmation => "goal_confirmation",
            Phase::Dashboard => "dashboard",
            Phase::Summary => "summary",
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn intake_only_on_dashboard() {
        for phase in [
            Phase::Welcome,
            Phase::AgeSelection,
            Phase::GoalConfirmation,
            Phase::Summary,
        ] {
            assert!(!phase.allows(CommandKind::AddIntake), "{phase}");
            assert!(!phase.allows(CommandKind::QuickAdd), "{phase}");
        }
        assert!(Phase::Dashboard.allows(CommandKind::AddIntake));
    }

    #[test]
    fn unit_switch_is_allowed_everywhere() {
        for phase in [
            Phase::Welcome,
            Phase::AgeSelection,
            Phase::GoalConfirmation,
            Phase::Dashboard,
            Phase::Summary,
        ] {
            assert!(phase.allows(CommandKind::SetUnit));
        }
    }

    #[test]
    fn full_reset_not_offered_from_summary() {
        assert!(!Phase::Summary.allows(CommandKind::FullReset));
        assert!(Phase::Dashboard.allows(CommandKind::FullReset));
        assert!(Phase::GoalConfirmation.allows(CommandKind::FullReset));
    }
}
