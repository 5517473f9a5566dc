//! The hydration session: the single mutable state container for one user.
//!
//! Fields are private so every mutation goes through a method that keeps
//! `total_ml` equal to the sum of the log. Methods here do not check the
//! flow phase; [`HydrationEngine`](crate::HydrationEngine) does that before
//! calling in.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

use crate::catalog::{AgeGroup, MAX_GOAL_ML, MIN_GOAL_ML};
use crate::error::HydrationError;
use crate::flow::Phase;

/// Display unit for custom input. Storage is always millilitres.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Unit {
    #[default]
    Ml,
    Cups,
}

impl fmt::Display for Unit {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(match self {
            Unit::Ml => "ml",
            Unit::Cups => "cups",
        })
    }
}

impl FromStr for Unit {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "ml" => Ok(Unit::Ml),
            "cup" | "cups" => Ok(Unit::Cups),
            other => Err(format!("unknown unit '{other}' (expected ml or cups)")),
        }
    }
}

/// One logged drink. Immutable once appended.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct IntakeEvent {
    pub timestamp: DateTime<Utc>,
    pub amount_ml: u32,
    /// Running total including this event.
    pub cumulative_total_after_ml: u64,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct HydrationSession {
    phase: Phase,
    age_group: Option<AgeGroup>,
    standard_goal_ml: u32,
    goal_ml: u32,
    total_ml: u64,
    log: Vec<IntakeEvent>,
    unit: Unit,
}

impl HydrationSession {
    /// Fresh session: `Welcome` phase, no age group, zero goals and intake.
    pub fn new() -> Self {
        Self {
            phase: Phase::Welcome,
            age_group: None,
            standard_goal_ml: 0,
            goal_ml: 0,
            total_ml: 0,
            log: Vec::new(),
            unit: Unit::Ml,
        }
    }

    /// Fresh session with a preferred input unit.
    pub fn with_unit(unit: Unit) -> Self {
        Self {
            unit,
            ..Self::new()
        }
    }

    // ── Queries ──────────────────────────────────────────────────────

    pub fn phase(&self) -> Phase {
        self.phase
    }

    pub fn age_group(&self) -> Option<AgeGroup> {
        self.age_group
    }

    pub fn standard_goal_ml(&self) -> u32 {
        self.standard_goal_ml
    }

    pub fn goal_ml(&self) -> u32 {
        self.goal_ml
    }

    pub fn total_ml(&self) -> u64 {
        self.total_ml
    }

    /// Full log for the current day, oldest first.
    pub fn log(&self) -> &[IntakeEvent] {
        &self.log
    }

    pub fn unit(&self) -> Unit {
        self.unit
    }

    // ── Mutations ────────────────────────────────────────────────────

    /// Select an age group, copy its standard goal into both goals and move
    /// to goal confirmation.
    ///
    /// # Errors
    ///
    /// Returns [`HydrationError::UnknownAgeGroup`] for an unknown key; the
    /// session is left unchanged.
    pub fn select_age_group(&mut self, key: &str) -> Result<AgeGroup, HydrationError> {
        let group: AgeGroup = key.parse()?;
        self.age_group = Some(group);
        self.standard_goal_ml = group.standard_goal_ml();
        self.goal_ml = self.standard_goal_ml;
        self.phase = Phase::GoalConfirmation;
        Ok(group)
    }

    /// Adjust the daily goal. Out-of-range values are rejected, never clamped.
    ///
    /// # Errors
    ///
    /// Returns [`HydrationError::InvalidGoal`] outside `[500, 10000]` ml.
    pub fn set_goal(&mut self, ml: i64) -> Result<u32, HydrationError> {
        let goal = u32::try_from(ml)
            .ok()
            .filter(|g| (MIN_GOAL_ML..=MAX_GOAL_ML).contains(g))
            .ok_or(HydrationError::InvalidGoal(ml))?;
        self.goal_ml = goal;
        Ok(goal)
    }

    /// Start a new day: clear intake and log, keep age group and goals.
    /// Returns how many entries were dropped.
    pub fn reset_day(&mut self) -> usize {
        let cleared = self.log.len();
        self.total_ml = 0;
        self.log.clear();
        cleared
    }

    /// Clear everything, including age group, goals and phase.
    /// The unit preference survives since it is a display setting.
    pub fn full_reset(&mut self) {
        *self = Self::with_unit(self.unit);
    }

    pub fn set_unit(&mut self, unit: Unit) {
        self.unit = unit;
    }

    /// Forget the age group and both goals. Used when backing out to `Welcome`.
    pub(crate) fn clear_selection(&mut self) {
        self.age_group = None;
        self.standard_goal_ml = 0;
        self.goal_ml = 0;
    }

    pub(crate) fn set_phase(&mut self, phase: Phase) {
        self.phase = phase;
    }

    /// Append an already-validated amount. Only the intake recorder calls this.
    pub(crate) fn append_intake(&mut self, amount_ml: u32, at: DateTime<Utc>) -> IntakeEvent {
        self.total_ml += u64::from(amount_ml);
        let event = IntakeEvent {
            timestamp: at,
            amount_ml,
            cumulative_total_after_ml: self.total_ml,
        };
        self.log.push(event.clone());
        event
    }
}

impl Default for HydrationSession {
    fn default() -> Self {
        Self::new()
    }
}
