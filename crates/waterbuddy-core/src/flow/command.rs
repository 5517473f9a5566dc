use serde::{Deserialize, Serialize};
use std::fmt;

use crate::catalog::QuickAdd;
use crate::session::Unit;

/// A command forwarded by the presentation layer.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "command", content = "value", rename_all = "snake_case")]
pub enum Command {
    Start,
    SelectAgeGroup(String),
    Back,
    SetGoal(i64),
    ConfirmGoal,
    AddIntake(i64),
    AddIntakeCups(f64),
    QuickAdd(QuickAdd),
    SetUnit(Unit),
    ResetDay,
    FullReset,
    ViewSummary,
    BackToDashboard,
    StartNewDay,
}

/// Payload-free discriminant of [`Command`], used for phase checks.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum CommandKind {
    Start,
    SelectAgeGroup,
    Back,
    SetGoal,
    ConfirmGoal,
    AddIntake,
    AddIntakeCups,
    QuickAdd,
    SetUnit,
    ResetDay,
    FullReset,
    ViewSummary,
    BackToDashboard,
    StartNewDay,
}

impl Command {
    pub fn kind(&self) -> CommandKind {
        match self {
            Command::Start => CommandKind::Start,
            Command::SelectAgeGroup(_) => CommandKind::SelectAgeGroup,
            Command::Back => CommandKind::Back,
            Command::SetGoal(_) => CommandKind::SetGoal,
            Command::ConfirmGoal => CommandKind::ConfirmGoal,
            Command::AddIntake(_) => CommandKind::AddIntake,
            Command::AddIntakeCups(_) => CommandKind::AddIntakeCups,
            Command::QuickAdd(_) => CommandKind::QuickAdd,
            Command::SetUnit(_) => CommandKind::SetUnit,
            Command::ResetDay => CommandKind::ResetDay,
            Command::FullReset => CommandKind::FullReset,
            Command::ViewSummary => CommandKind::ViewSummary,
            Command::BackToDashboard => CommandKind::BackToDashboard,
            Command::StartNewDay => CommandKind::StartNewDay,
        }
    }
}

impl fmt::Display for CommandKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(match self {
            CommandKind::Start => "start",
            CommandKind::SelectAgeGroup => "select_age_group",
            CommandKind::Back => "back",
            CommandKind::SetGoal => "set_goal",
            CommandKind::ConfirmGoal => "confirm_goal",
            CommandKind::AddIntake => "add_intake",
            CommandKind::AddIntakeCups => "add_intake_cups",
            CommandKind::QuickAdd => "quick_add",
            CommandKind::SetUnit => "set_unit",
            CommandKind::ResetDay => "reset_day",
            CommandKind::FullReset => "full_reset",
            CommandKind::ViewSummary => "view_summary",
            CommandKind::BackToDashboard => "back_to_dashboard",
            CommandKind::StartNewDay => "start_new_day",
        })
    }
}
