//! # WaterBuddy Core Library
//!
//! The hydration state engine behind WaterBuddy: one source of truth for a
//! user's daily water intake, independent of how it is displayed. A
//! presentation layer (the CLI in this workspace, or anything else) forwards
//! user actions as [`Command`]s and renders [`SessionSnapshot`]s.
//!
//! ## Architecture
//!
//! - **Goal Catalog**: fixed age groups and their recommended daily intake
//! - **Hydration Session**: the per-user state container and its invariants
//! - **Intake Recorder**: validated appends to the day's log
//! - **Progress Evaluator**: pure progress, tier and mascot derivation
//! - **Flow Controller**: the welcome → dashboard → summary phase machine
//! - **Tips**: date-stable or random hydration tips
//!
//! ## Key Components
//!
//! - [`HydrationEngine`]: flow controller owning one session
//! - [`HydrationSession`]: session state
//! - [`SessionRegistry`]: independent, individually locked sessions per user
//! - [`Config`]: application configuration management

pub mod catalog;
pub mod error;
pub mod events;
pub mod flow;
pub mod history;
pub mod intake;
pub mod progress;
pub mod registry;
pub mod session;
pub mod storage;
pub mod tips;

pub use catalog::{lookup_standard_goal, AgeGroup, QuickAdd, CUP_ML, MAX_GOAL_ML, MIN_GOAL_ML};
pub use error::{ConfigError, CoreError, HydrationError};
pub use events::Event;
pub use flow::{Command, CommandKind, HydrationEngine, Phase, SessionSnapshot};
pub use history::SeriesPoint;
pub use progress::{DaySummary, Progress, Tier};
pub use registry::{SessionId, SessionRegistry};
pub use session::{HydrationSession, IntakeEvent, Unit};
pub use storage::Config;
pub use tips::{TipMode, TipSelector, HYDRATION_TIPS};
