//! Hydration tips.
//!
//! Two ways to pick one: `random` draws from an injected RNG on every call,
//! `stable_for_date` derives the tip from the calendar day so every render on
//! the same day shows the same tip.

use chrono::{Datelike, NaiveDate};
use rand::{Rng, SeedableRng};
use rand_pcg::Mcg128Xsl64;
use serde::{Deserialize, Serialize};

pub const HYDRATION_TIPS: [&str; 5] = [
    "Try drinking a glass of water before meals.",
    "Keep a bottle on your desk as a reminder.",
    "Start your morning with a glass of water.",
    "Set small goals: one cup every hour.",
    "Hydrate after exercise to recover faster.",
];

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum TipMode {
    #[default]
    Stable,
    Random,
}

/// Uniform pick from the catalog.
pub fn random<R: Rng + ?Sized>(rng: &mut R) -> &'static str {
    HYDRATION_TIPS[rng.gen_range(0..HYDRATION_TIPS.len())]
}

/// Tip indexed by the proleptic Gregorian ordinal of `date` (1 January of
/// year 1 is day 1), so the sequence repeats every five days.
pub fn stable_for_date(date: NaiveDate) -> &'static str {
    let len = HYDRATION_TIPS.len() as i32;
    HYDRATION_TIPS[date.num_days_from_ce().rem_euclid(len) as usize]
}

/// Tip source for a session, holding the mode and its RNG.
#[derive(Debug, Clone)]
pub struct TipSelector {
    mode: TipMode,
    rng: Mcg128Xsl64,
}

impl TipSelector {
    /// `seed` makes random mode reproducible; `None` seeds from entropy.
    pub fn new(mode: TipMode, seed: Option<u64>) -> Self {
        let rng = match seed {
            Some(seed) => Mcg128Xsl64::seed_from_u64(seed),
            None => Mcg128Xsl64::from_entropy(),
        };
        Self { mode, rng }
    }

    pub fn mode(&self) -> TipMode {
        self.mode
    }

    /// Tip according to the configured mode.
    pub fn tip(&mut self, today: NaiveDate) -> &'static str {
        match self.mode {
            TipMode::Stable => stable_for_date(today),
            TipMode::Random => self.random_tip(),
        }
    }

    /// Explicit random pick, regardless of mode.
    pub fn random_tip(&mut self) -> &'static str {
        random(&mut self.rng)
    }
}
