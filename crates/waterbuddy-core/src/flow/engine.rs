//! Hydration engine: the flow controller that owns one session.
//!
//! Every command is checked against the current phase before anything is
//! touched. A command that is not legal, or that fails validation, returns an
//! error and leaves the session exactly as it was.
//!
//! ## Usage
//!
//! ```ignore
//! let mut engine = HydrationEngine::new();
//! engine.start()?;
//! engine.select_age_group("adults")?;
//! engine.confirm_goal()?;
//! engine.add_intake(250)?;
//! let snap = engine.snapshot();
//! ```

use chrono::{DateTime, Utc};
use serde::Serialize;
use tracing::{debug, warn};

use super::command::{Command, CommandKind};
use super::phase::Phase;
use crate::catalog::{ml_to_cups, QuickAdd};
use crate::error::HydrationError;
use crate::events::Event;
use crate::intake;
use crate::progress::{self, DaySummary, Progress};
use crate::session::{HydrationSession, IntakeEvent, Unit};

/// Everything the presentation layer needs to render the current phase.
///
/// Holds no wall-clock value, so two snapshots taken without a mutation in
/// between compare equal.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct SessionSnapshot {
    #[serde(flatten)]
    pub session: HydrationSession,
    pub total_cups: f64,
    pub progress: Progress,
    pub allowed_commands: Vec<CommandKind>,
}

#[derive(Debug, Clone, Default)]
pub struct HydrationEngine {
    session: HydrationSession,
}

impl HydrationEngine {
    pub fn new() -> Self {
        Self::default()
    }

    /// Engine over an existing session, e.g. one created with a unit preference.
    pub fn with_session(session: HydrationSession) -> Self {
        Self { session }
    }

    // ── Queries ──────────────────────────────────────────────────────

    pub fn session(&self) -> &HydrationSession {
        &self.session
    }

    pub fn phase(&self) -> Phase {
        self.session.phase()
    }

    pub fn allowed_commands(&self) -> &'static [CommandKind] {
        self.phase().allowed_commands()
    }

    pub fn progress(&self) -> Progress {
        progress::evaluate(&self.session)
    }

    pub fn summary(&self) -> DaySummary {
        DaySummary::from_session(&self.session)
    }

    /// The most recent `n` log entries, oldest first. Display only.
    pub fn recent(&self, n: usize) -> &[IntakeEvent] {
        crate::history::recent(self.session.log(), n)
    }

    pub fn snapshot(&self) -> SessionSnapshot {
        SessionSnapshot {
            session: self.session.clone(),
            total_cups: ml_to_cups(self.session.total_ml()),
            progress: self.progress(),
            allowed_commands: self.allowed_commands().to_vec(),
        }
    }

    // ── Commands ─────────────────────────────────────────────────────

    pub fn apply(&mut self, command: Command) -> Result<Event, HydrationError> {
        self.apply_at(command, Utc::now())
    }

    /// Apply a command with an explicit timestamp for any logged intake.
    ///
    /// # Errors
    ///
    /// Returns [`HydrationError::InvalidTransition`] if the command is not
    /// legal in the current phase, or the validation error of the command.
    pub fn apply_at(&mut self, command: Command, at: DateTime<Utc>) -> Result<Event, HydrationError> {
        let kind = command.kind();
        let phase = self.phase();
        if !phase.allows(kind) {
            warn!(%phase, command = %kind, "rejected command not valid in current phase");
            return Err(HydrationError::InvalidTransition { phase, command: kind });
        }

        let result = self.dispatch(command, at);
        match &result {
            Ok(event) => debug!(command = %kind, ?event, "applied command"),
            Err(err) => warn!(command = %kind, error = %err, "rejected command"),
        }
        result
    }

    pub fn start(&mut self) -> Result<Event, HydrationError> {
        self.apply(Command::Start)
    }

    pub fn select_age_group(&mut self, key: &str) -> Result<Event, HydrationError> {
        self.apply(Command::SelectAgeGroup(key.to_string()))
    }

    pub fn back(&mut self) -> Result<Event, HydrationError> {
        self.apply(Command::Back)
    }

    pub fn set_goal(&mut self, ml: i64) -> Result<Event, HydrationError> {
        self.apply(Command::SetGoal(ml))
    }

    pub fn confirm_goal(&mut self) -> Result<Event, HydrationError> {
        self.apply(Command::ConfirmGoal)
    }

    pub fn add_intake(&mut self, ml: i64) -> Result<Event, HydrationError> {
        self.apply(Command::AddIntake(ml))
    }

    pub fn add_intake_cups(&mut self, cups: f64) -> Result<Event, HydrationError> {
        self.apply(Command::AddIntakeCups(cups))
    }

    pub fn quick_add(&mut self, preset: QuickAdd) -> Result<Event, HydrationError> {
        self.apply(Command::QuickAdd(preset))
    }

    pub fn set_unit(&mut self, unit: Unit) -> Result<Event, HydrationError> {
        self.apply(Command::SetUnit(unit))
    }

    pub fn reset_day(&mut self) -> Result<Event, HydrationError> {
        self.apply(Command::ResetDay)
    }

    pub fn full_reset(&mut self) -> Result<Event, HydrationError> {
        self.apply(Command::FullReset)
    }

    pub fn view_summary(&mut self) -> Result<Event, HydrationError> {
        self.apply(Command::ViewSummary)
    }

    pub fn back_to_dashboard(&mut self) -> Result<Event, HydrationError> {
        self.apply(Command::BackToDashboard)
    }

    pub fn start_new_day(&mut self) -> Result<Event, HydrationError> {
        self.apply(Command::StartNewDay)
    }

    // ── Internal ─────────────────────────────────────────────────────

    fn dispatch(&mut self, command: Command, at: DateTime<Utc>) -> Result<Event, HydrationError> {
        match command {
            Command::Start => Ok(self.transition(Phase::AgeSelection, at)),
            Command::SelectAgeGroup(key) => {
                let group = self.session.select_age_group(&key)?;
                Ok(Event::AgeGroupSelected {
                    age_group: group,
                    label: group.label(),
                    standard_goal_ml: group.standard_goal_ml(),
                    at,
                })
            }
            Command::Back => match self.phase() {
                Phase::GoalConfirmation => Ok(self.transition(Phase::AgeSelection, at)),
                _ => {
                    self.session.clear_selection();
                    Ok(self.transition(Phase::Welcome, at))
                }
            },
            Command::SetGoal(ml) => {
                let previous_ml = self.session.goal_ml();
                let goal_ml = self.session.set_goal(ml)?;
                Ok(Event::GoalSet {
                    goal_ml,
                    previous_ml,
                    at,
                })
            }
            Command::ConfirmGoal => Ok(self.transition(Phase::Dashboard, at)),
            Command::AddIntake(ml) => self.record(|s| intake::add_intake(s, ml, at)),
            Command::AddIntakeCups(cups) => self.record(|s| intake::add_intake_cups(s, cups, at)),
            Command::QuickAdd(preset) => self.record(|s| Ok(intake::quick_add(s, preset, at))),
            Command::SetUnit(unit) => {
                self.session.set_unit(unit);
                Ok(Event::UnitChanged { unit, at })
            }
            Command::ResetDay => Ok(Event::DayReset {
                cleared_entries: self.session.reset_day(),
                at,
            }),
            Command::StartNewDay => {
                let cleared_entries = self.session.reset_day();
                self.session.set_phase(Phase::Dashboard);
                Ok(Event::DayReset { cleared_entries, at })
            }
            Command::FullReset => {
                self.session.full_reset();
                Ok(Event::SessionReset { at })
            }
            Command::ViewSummary => Ok(self.transition(Phase::Summary, at)),
            Command::BackToDashboard => Ok(self.transition(Phase::Dashboard, at)),
        }
    }

    fn transition(&mut self, to: Phase, at: DateTime<Utc>) -> Event {
        let from = self.phase();
        self.session.set_phase(to);
        Event::PhaseChanged { from, to, at }
    }

    /// Run an intake operation and flag the first crossing of the goal.
    fn record<F>(&mut self, op: F) -> Result<Event, HydrationError>
    where
        F: FnOnce(&mut HydrationSession) -> Result<IntakeEvent, HydrationError>,
    {
        let before = self.progress();
        let entry = op(&mut self.session)?;
        let after = self.progress();
        Ok(Event::IntakeLogged {
            entry,
            goal_reached: progress::goal_crossed(&before, &after),
        })
    }
}
