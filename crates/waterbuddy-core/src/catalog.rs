//! Goal catalog: fixed age groups, their recommended daily intake, and the
//! quick-add denominations offered on the dashboard.
//!
//! Everything here is static. There is no mutation API.

use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

use crate::error::HydrationError;

/// Millilitres in one cup. Fixed, not configurable.
pub const CUP_ML: u32 = 240;

/// Lowest accepted daily goal in millilitres.
pub const MIN_GOAL_ML: u32 = 500;

/// Highest accepted daily goal in millilitres.
pub const MAX_GOAL_ML: u32 = 10_000;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum AgeGroup {
    Children,
    Teens,
    Adults,
    Seniors,
}

impl AgeGroup {
    /// All age groups in display order.
    pub const ALL: [AgeGroup; 4] = [
        AgeGroup::Children,
        AgeGroup::Teens,
        AgeGroup::Adults,
        AgeGroup::Seniors,
    ];

    /// Full display label, which is also the canonical lookup key.
    pub fn label(self) -> &'static str {
        match self {
            AgeGroup::Children => "Children (4-8 years)",
            AgeGroup::Teens => "Teens (9-13 years)",
            AgeGroup::Adults => "Adults (14-64 years)",
            AgeGroup::Seniors => "Seniors (65+ years)",
        }
    }

    /// Short lowercase alias accepted wherever a key is.
    pub fn alias(self) -> &'static str {
        match self {
            AgeGroup::Children => "children",
            AgeGroup::Teens => "teens",
            AgeGroup::Adults => "adults",
            AgeGroup::Seniors => "seniors",
        }
    }

    /// Recommended daily intake in millilitres.
    pub fn standard_goal_ml(self) -> u32 {
        match self {
            AgeGroup::Children => 1200,
            AgeGroup::Teens => 1700,
            AgeGroup::Adults => 2200,
            AgeGroup::Seniors => 1800,
        }
    }
}

impl fmt::Display for AgeGroup {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

impl FromStr for AgeGroup {
    type Err = HydrationError;

    /// Accepts the exact label or the case-insensitive alias.
    fn from_str(key: &str) -> Result<Self, Self::Err> {
        let trimmed = key.trim();
        AgeGroup::ALL
            .into_iter()
            .find(|g| g.label() == trimmed || g.alias().eq_ignore_ascii_case(trimmed))
            .ok_or_else(|| HydrationError::UnknownAgeGroup(key.to_string()))
    }
}

/// Look up the standard goal for an age-group key.
///
/// # Errors
///
/// Returns [`HydrationError::UnknownAgeGroup`] if the key is not one of the
/// fixed labels or aliases.
pub fn lookup_standard_goal(key: &str) -> Result<u32, HydrationError> {
    key.parse::<AgeGroup>().map(AgeGroup::standard_goal_ml)
}

/// One of the four preset quick-add amounts.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum QuickAdd {
    Glass,
    Bottle,
    LargeBottle,
    Litre,
}

impl QuickAdd {
    pub const ALL: [QuickAdd; 4] = [
        QuickAdd::Glass,
        QuickAdd::Bottle,
        QuickAdd::LargeBottle,
        QuickAdd::Litre,
    ];

    pub fn amount_ml(self) -> u32 {
        match self {
            QuickAdd::Glass => 250,
            QuickAdd::Bottle => 500,
            QuickAdd::LargeBottle => 750,
            QuickAdd::Litre => 1000,
        }
    }

    pub fn label(self) -> &'static str {
        match self {
            QuickAdd::Glass => "Glass",
            QuickAdd::Bottle => "Bottle",
            QuickAdd::LargeBottle => "Large bottle",
            QuickAdd::Litre => "1 L",
        }
    }

    /// Find the preset matching an exact millilitre amount.
    pub fn from_ml(amount_ml: i64) -> Option<Self> {
        QuickAdd::ALL
            .into_iter()
            .find(|q| i64::from(q.amount_ml()) == amount_ml)
    }
}

/// Convert millilitres to cups, rounded to two decimals for display.
pub fn ml_to_cups(ml: u64) -> f64 {
    (ml as f64 / f64::from(CUP_ML) * 100.0).round() / 100.0
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn lookup_by_label_and_alias() {
        assert_eq!(lookup_standard_goal("Adults (14-64 years)"), Ok(2200));
        assert_eq!(lookup_standard_goal("adults"), Ok(2200));
        assert_eq!(lookup_standard_goal("SENIORS"), Ok(1800));
        assert_eq!(lookup_standard_goal("  Teens (9-13 years) "), Ok(1700));
        assert_eq!(lookup_standard_goal("children"), Ok(1200));
    }

    #[test]
    fn lookup_rejects_unknown_key() {
        assert_eq!(
            lookup_standard_goal("Toddlers"),
            Err(HydrationError::UnknownAgeGroup("Toddlers".into()))
        );
        assert!(lookup_standard_goal("").is_err());
        // Labels are matched exactly; only aliases are case-insensitive.
        assert!(lookup_standard_goal("adults (14-64 years)").is_err());
    }

    #[test]
    fn every_group_round_trips_through_its_label() {
        for group in AgeGroup::ALL {
            assert_eq!(group.label().parse::<AgeGroup>(), Ok(group));
            assert_eq!(group.to_string(), group.label());
        }
    }

    #[test]
    fn standard_goals_sit_inside_goal_bounds() {
        for group in AgeGroup::ALL {
            let goal = group.standard_goal_ml();
            assert!((MIN_GOAL_ML..=MAX_GOAL_ML).contains(&goal));
        }
    }

    #[test]
    fn quick_add_denominations() {
        let amounts: Vec<u32> = QuickAdd::ALL.iter().map(|q| q.amount_ml()).collect();
        assert_eq!(amounts, vec![250, 500, 750, 1000]);
        assert_eq!(QuickAdd::from_ml(750), Some(QuickAdd::LargeBottle));
        assert_eq!(QuickAdd::from_ml(300), None);
    }

    #[test]
    fn cups_display_rounds_to_two_decimals() {
        assert_eq!(ml_to_cups(240), 1.0);
        assert_eq!(ml_to_cups(1000), 4.17);
        assert_eq!(ml_to_cups(0), 0.0);
    }
}
