//! Progress evaluator: pure functions from a session to the numbers and
//! motivational feedback the presentation layer renders.
//!
//! Nothing here holds state. Detecting the first crossing of 100% is done by
//! comparing two evaluations, see [`goal_crossed`].

use serde::Serialize;

use crate::catalog::ml_to_cups;
use crate::session::HydrationSession;

/// Levels in the bottle fill animation.
pub const BOTTLE_LEVELS: u8 = 10;

/// Five motivational buckets over the progress fraction.
///
/// Lower bounds are inclusive: exactly 0.5, 0.75 and 1.0 land in the higher tier.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum Tier {
    Empty,
    Started,
    Halfway,
    Close,
    Achieved,
}

impl Tier {
    pub fn from_fraction(fraction: f64) -> Self {
        if fraction >= 1.0 {
            Tier::Achieved
        } else if fraction >= 0.75 {
            Tier::Close
        } else if fraction >= 0.5 {
            Tier::Halfway
        } else if fraction > 0.0 {
            Tier::Started
        } else {
            Tier::Empty
        }
    }

    pub fn message(self) -> &'static str {
        match self {
            Tier::Empty => "Hey buddy! Ready to hydrate?",
            Tier::Started => "Nice start! Let's keep going!",
            Tier::Halfway => "Great progress! Keep swimming!",
            Tier::Close => "So close! You're amazing!",
            Tier::Achieved => "Awesome job! You did it!",
        }
    }

    /// Turtle mascot for this tier.
    pub fn mascot(self) -> &'static str {
        match self {
            Tier::Empty => "🐢💙",
            Tier::Started => "🐢👋",
            Tier::Halfway => "🐢😊",
            Tier::Close => "🐢👏",
            Tier::Achieved => "🐢✨",
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Progress {
    /// `total / goal` capped at 1.0; 0.0 without a goal.
    pub fraction: f64,
    pub remaining_ml: u64,
    /// Intake against the unadjusted standard goal, 0.0..=100.0.
    pub percent_of_standard: f64,
    pub tier: Tier,
    pub mascot: &'static str,
    pub message: &'static str,
    /// Filled levels out of [`BOTTLE_LEVELS`].
    pub bottle_level: u8,
}

/// Evaluate a session snapshot.
pub fn evaluate(session: &HydrationSession) -> Progress {
    let total = session.total_ml();
    let goal = u64::from(session.goal_ml());
    let standard = u64::from(session.standard_goal_ml());

    let fraction = capped_ratio(total, goal);
    let tier = Tier::from_fraction(fraction);

    Progress {
        fraction,
        remaining_ml: goal.saturating_sub(total),
        percent_of_standard: capped_ratio(total, standard) * 100.0,
        tier,
        mascot: tier.mascot(),
        message: tier.message(),
        bottle_level: bottle_level(fraction),
    }
}

/// True only when `after` is achieved and `before` was not.
pub fn goal_crossed(before: &Progress, after: &Progress) -> bool {
    before.tier != Tier::Achieved && after.tier == Tier::Achieved
}

/// `round(fraction * 10)`, clamped to the bottle.
pub fn bottle_level(fraction: f64) -> u8 {
    let level = (fraction.clamp(0.0, 1.0) * f64::from(BOTTLE_LEVELS)).round();
    level as u8
}

/// End-of-day summary shown on the summary page.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct DaySummary {
    pub total_ml: u64,
    pub total_cups: f64,
    pub goal_ml: u32,
    pub standard_goal_ml: u32,
    /// Rounded percentage of the active goal, not capped.
    pub percent_of_goal: u32,
    pub percent_of_standard: f64,
    pub goal_achieved: bool,
    pub entries: usize,
}

impl DaySummary {
    pub fn from_session(session: &HydrationSession) -> Self {
        let total = session.total_ml();
        let goal = session.goal_ml();
        let percent_of_goal = if goal > 0 {
            (total as f64 / f64::from(goal) * 100.0).round() as u32
        } else {
            0
        };

        Self {
            total_ml: total,
            total_cups: ml_to_cups(total),
            goal_ml: goal,
            standard_goal_ml: session.standard_goal_ml(),
            percent_of_goal,
            percent_of_standard: capped_ratio(total, u64::from(session.standard_goal_ml())) * 100.0,
            goal_achieved: goal > 0 && total >= u64::from(goal),
            entries: session.log().len(),
        }
    }
}

fn capped_ratio(value: u64, target: u64) -> f64 {
    if target == 0 {
        return 0.0;
    }
    (value as f64 / target as f64).min(1.0)
}
