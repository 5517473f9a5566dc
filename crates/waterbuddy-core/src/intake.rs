//! Intake recorder: validates drink amounts and appends them to a session.
//!
//! Cup amounts are converted at the boundary (`round(cups * 240)`) and then go
//! through the same millilitre validation as everything else.

use chrono::{DateTime, Utc};

use crate::catalog::{QuickAdd, CUP_ML};
use crate::error::HydrationError;
use crate::session::{HydrationSession, IntakeEvent};

/// Record `amount_ml` at `at`.
///
/// # Errors
///
/// Returns [`HydrationError::InvalidAmount`] for zero, negative or oversized
/// amounts. Nothing is appended and the total is unchanged.
pub fn add_intake(
    session: &mut HydrationSession,
    amount_ml: i64,
    at: DateTime<Utc>,
) -> Result<IntakeEvent, HydrationError> {
    let amount = validate_amount(amount_ml)?;
    Ok(session.append_intake(amount, at))
}

/// Convert cups to millilitres and record them.
///
/// # Errors
///
/// Returns [`HydrationError::InvalidAmount`] if the cup count is not a
/// positive finite number or rounds to zero millilitres.
pub fn add_intake_cups(
    session: &mut HydrationSession,
    cups: f64,
    at: DateTime<Utc>,
) -> Result<IntakeEvent, HydrationError> {
    let ml = cups_to_ml(cups)?;
    add_intake(session, ml, at)
}

/// Record one of the preset amounts.
pub fn quick_add(session: &mut HydrationSession, preset: QuickAdd, at: DateTime<Utc>) -> IntakeEvent {
    session.append_intake(preset.amount_ml(), at)
}

/// `round(cups * 240)`.
///
/// # Errors
///
/// Returns [`HydrationError::InvalidAmount`] for NaN, infinite, zero or
/// negative input.
pub fn cups_to_ml(cups: f64) -> Result<i64, HydrationError> {
    if !cups.is_finite() || cups <= 0.0 {
        return Err(HydrationError::InvalidAmount(format!("{cups} cups")));
    }
    let ml = (cups * f64::from(CUP_ML)).round();
    if ml > f64::from(u32::MAX) {
        return Err(HydrationError::InvalidAmount(format!("{cups} cups is too large")));
    }
    Ok(ml as i64)
}

/// Parse a user-typed millilitre amount. Only whole numbers are accepted.
///
/// # Errors
///
/// Returns [`HydrationError::InvalidAmount`] for non-numeric or fractional
/// input. Range is checked later by [`add_intake`].
pub fn parse_amount_ml(input: &str) -> Result<i64, HydrationError> {
    input
        .trim()
        .parse::<i64>()
        .map_err(|_| HydrationError::InvalidAmount(format!("'{}' is not a whole number of ml", input.trim())))
}

fn validate_amount(amount_ml: i64) -> Result<u32, HydrationError> {
    if amount_ml <= 0 {
        return Err(HydrationError::InvalidAmount(format!(
            "{amount_ml} ml (must be positive)"
        )));
    }
    u32::try_from(amount_ml)
        .map_err(|_| HydrationError::InvalidAmount(format!("{amount_ml} ml is too large")))
}

#[cfg(test)]
mod tests {
    use super::*;
    use proptest::prelude::*;

    #[test]
    fn add_intake_appends_and_accumulates() {
        let mut session = HydrationSession::new();
        let now = Utc::now();
        add_intake(&mut session, 250, now).unwrap();
        let last = add_intake(&mut session, 400, now).unwrap();
        assert_eq!(session.total_ml(), 650);
        assert_eq!(session.log().len(), 2);
        assert_eq!(last.amount_ml, 400);
        assert_eq!(last.cumulative_total_after_ml, 650);
    }

    #[test]
    fn zero_and_negative_amounts_are_rejected() {
        let mut session = HydrationSession::new();
        let now = Utc::now();
        add_intake(&mut session, 100, now).unwrap();
        for bad in [0, -5] {
            let err = add_intake(&mut session, bad, now).unwrap_err();
            assert!(matches!(err, HydrationError::InvalidAmount(_)));
        }
        assert_eq!(session.total_ml(), 100);
        assert_eq!(session.log().len(), 1);
    }

    #[test]
    fn oversized_amount_is_rejected() {
        let mut session = HydrationSession::new();
        let err = add_intake(&mut session, i64::from(u32::MAX) + 1, Utc::now()).unwrap_err();
        assert!(matches!(err, HydrationError::InvalidAmount(_)));
        assert_eq!(session.total_ml(), 0);
    }

    #[test]
    fn one_cup_is_exactly_240_ml() {
        let mut session = HydrationSession::new();
        let event = add_intake_cups(&mut session, 1.0, Utc::now()).unwrap();
        assert_eq!(event.amount_ml, 240);
    }

    #[test]
    fn fractional_cups_round_to_nearest_ml() {
        assert_eq!(cups_to_ml(0.25), Ok(60));
        assert_eq!(cups_to_ml(1.5), Ok(360));
        assert_eq!(cups_to_ml(0.001), Ok(0));
    }

    #[test]
    fn tiny_cup_amount_rounding_to_zero_is_rejected() {
        let mut session = HydrationSession::new();
        let err = add_intake_cups(&mut session, 0.001, Utc::now()).unwrap_err();
        assert!(matches!(err, HydrationError::InvalidAmount(_)));
        assert!(session.log().is_empty());
    }

    #[test]
    fn invalid_cups_are_rejected() {
        for bad in [0.0, -1.0, f64::NAN, f64::INFINITY] {
            assert!(cups_to_ml(bad).is_err(), "{bad} should be rejected");
        }
    }

    #[test]
    fn quick_add_records_preset_amount() {
        let mut session = HydrationSession::new();
        let event = quick_add(&mut session, QuickAdd::Litre, Utc::now());
        assert_eq!(event.amount_ml, 1000);
        assert_eq!(session.total_ml(), 1000);
    }

    #[test]
    fn parse_amount_rejects_non_integers() {
        assert_eq!(parse_amount_ml(" 250 "), Ok(250));
        assert_eq!(parse_amount_ml("-5"), Ok(-5));
        assert!(parse_amount_ml("12.5").is_err());
        assert!(parse_amount_ml("lots").is_err());
    }

    proptest! {
        #[test]
        fn total_always_matches_log(amounts in proptest::collection::vec(-500i64..5_000, 0..40)) {
            let mut session = HydrationSession::new();
            let now = Utc::now();
            let mut accepted: u64 = 0;
            for amount in amounts {
                let len_before = session.log().len();
                match add_intake(&mut session, amount, now) {
                    Ok(event) => {
                        accepted += amount as u64;
                        prop_assert_eq!(event.cumulative_total_after_ml, accepted);
                    }
                    Err(_) => {
                        prop_assert_eq!(session.log().len(), len_before);
                    }
                }
                let sum: u64 = session.log().iter().map(|e| u64::from(e.amount_ml)).sum();
                prop_assert_eq!(session.total_ml(), sum);
                prop_assert_eq!(session.total_ml(), accepted);
                if let Some(last) = session.log().last() {
                    prop_assert_eq!(last.cumulative_total_after_ml, session.total_ml());
                }
            }
        }
    }
}
