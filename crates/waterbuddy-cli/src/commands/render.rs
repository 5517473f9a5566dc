//! Text rendering of snapshots and events for the shell.

use std::fmt::Write as _;

use waterbuddy_core::catalog::ml_to_cups;
use waterbuddy_core::progress::BOTTLE_LEVELS;
use waterbuddy_core::{
    AgeGroup, Config, DaySummary, Event, IntakeEvent, Phase, QuickAdd, SessionSnapshot, Unit,
};

/// Render the view for the snapshot's phase.
pub fn view(snap: &SessionSnapshot, summary: &DaySummary, config: &Config, tip: Option<&str>) -> String {
    let mut out = String::new();
    let session = &snap.session;
    match session.phase() {
        Phase::Welcome => {
            out.push_str("WaterBuddy 🐢\n");
            out.push_str("Your friendly daily hydration companion.\n");
        }
        Phase::AgeSelection => {
            out.push_str("Select your age group:\n");
            for group in AgeGroup::ALL {
                let _ = writeln!(
                    out,
                    "  {:<22} ({}) {} ml",
                    group.label(),
                    group.alias(),
                    group.standard_goal_ml()
                );
            }
        }
        Phase::GoalConfirmation => {
            let label = session.age_group().map(AgeGroup::label).unwrap_or("-");
            let _ = writeln!(
                out,
                "Recommended for {label}: {} ml",
                session.standard_goal_ml()
            );
            let _ = writeln!(out, "Your daily goal: {} ml", session.goal_ml());
        }
        Phase::Dashboard => {
            let p = &snap.progress;
            let _ = writeln!(
                out,
                "Progress {} {:.0}%",
                bottle(p.bottle_level),
                p.fraction * 100.0
            );
            let _ = writeln!(
                out,
                "Total: {} ml ({} cups)   Remaining: {} ml",
                session.total_ml(),
                snap.total_cups,
                p.remaining_ml
            );
            let _ = writeln!(
                out,
                "Standard: {} ml   Your goal: {} ml",
                session.standard_goal_ml(),
                session.goal_ml()
            );
            if config.display.mascot {
                let _ = writeln!(out, "{} {}", p.mascot, p.message);
            }
            let quick: Vec<String> = QuickAdd::ALL
                .iter()
                .map(|q| amount(q.amount_ml(), session.unit()))
                .collect();
            let _ = writeln!(out, "Quick add: {}", quick.join(" | "));
            let recent = recent(session.log(), config.display.recent_log_len);
            if !recent.is_empty() {
                out.push_str("Recent:\n");
                for entry in recent {
                    out.push_str(&log_line(entry));
                    out.push('\n');
                }
            }
            if let Some(tip) = tip {
                let _ = writeln!(out, "💡 {tip}");
            }
        }
        Phase::Summary => {
            out.push_str("End-of-Day Summary\n");
            let _ = writeln!(
                out,
                "Total intake: {} ml ({} cups)",
                summary.total_ml, summary.total_cups
            );
            let _ = writeln!(
                out,
                "Goal progress: {}% of {} ml",
                summary.percent_of_goal, summary.goal_ml
            );
            if summary.goal_achieved {
                out.push_str("Status: Goal achieved! 🌟\n");
            } else {
                out.push_str("Status: Goal not achieved, keep going tomorrow!\n");
            }
        }
    }
    out
}

/// One-line description of an event.
pub fn event(event: &Event) -> String {
    match event {
        Event::PhaseChanged { to, .. } => format!("-> {to}"),
        Event::AgeGroupSelected {
            label,
            standard_goal_ml,
            ..
        } => format!("Selected {label} ({standard_goal_ml} ml)"),
        Event::GoalSet {
            goal_ml,
            previous_ml,
            ..
        } => format!("Goal {previous_ml} ml -> {goal_ml} ml"),
        Event::IntakeLogged {
            entry,
            goal_reached,
        } => {
            let mut line = format!(
                "+{} ml (total {} ml)",
                entry.amount_ml, entry.cumulative_total_after_ml
            );
            if *goal_reached {
                line.push_str("\n🎉 Goal reached! 🎉");
            }
            line
        }
        Event::UnitChanged { unit, .. } => format!("Input unit: {unit}"),
        Event::DayReset {
            cleared_entries, ..
        } => format!("New day started ({cleared_entries} entries cleared)"),
        Event::SessionReset { .. } => "Session reset".to_string(),
    }
}

pub fn log_line(entry: &IntakeEvent) -> String {
    format!(
        "  {} UTC  +{} ml  = {} ml",
        entry.timestamp.format("%H:%M:%S"),
        entry.amount_ml,
        entry.cumulative_total_after_ml
    )
}

fn recent(log: &[IntakeEvent], n: usize) -> &[IntakeEvent] {
    waterbuddy_core::history::recent(log, n)
}

fn amount(ml: u32, unit: Unit) -> String {
    match unit {
        Unit::Ml => format!("{ml} ml"),
        Unit::Cups => format!("{} cups", ml_to_cups(u64::from(ml))),
    }
}

fn bottle(level: u8) -> String {
    let filled = usize::from(level.min(BOTTLE_LEVELS));
    let empty = usize::from(BOTTLE_LEVELS) - filled;
    format!("[{}{}]", "█".repeat(filled), "·".repeat(empty))
}

#[cfg(test)]
mod tests {
    use super::*;
    use waterbuddy_core::{Command, HydrationEngine};

    fn dashboard() -> HydrationEngine {
        let mut engine = HydrationEngine::new();
        engine.start().unwrap();
        engine.select_age_group("adults").unwrap();
        engine.confirm_goal().unwrap();
        engine
    }

    #[test]
    fn bottle_fills_by_level() {
        assert_eq!(bottle(0), "[··········]");
        assert_eq!(bottle(5), "[█████·····]");
        assert_eq!(bottle(10), "[██████████]");
    }

    #[test]
    fn amounts_follow_display_unit() {
        assert_eq!(amount(240, Unit::Ml), "240 ml");
        assert_eq!(amount(240, Unit::Cups), "1 cups");
        assert_eq!(amount(250, Unit::Cups), "1.04 cups");
    }

    #[test]
    fn dashboard_shows_totals_mascot_and_tip() {
        let mut engine = dashboard();
        engine.add_intake(1100).unwrap();
        let text = view(
            &engine.snapshot(),
            &engine.summary(),
            &Config::default(),
            Some("Drink up."),
        );
        assert!(text.contains("Total: 1100 ml"));
        assert!(text.contains("Remaining: 1100 ml"));
        assert!(text.contains("Great progress! Keep swimming!"));
        assert!(text.contains("💡 Drink up."));
    }

    #[test]
    fn mascot_can_be_hidden() {
        let engine = dashboard();
        let mut config = Config::default();
        config.display.mascot = false;
        let text = view(&engine.snapshot(), &engine.summary(), &config, None);
        assert!(!text.contains("Ready to hydrate"));
    }

    #[test]
    fn log_lines_label_times_as_utc() {
        let mut engine = dashboard();
        let at = "2024-03-01T08:15:30Z".parse().unwrap();
        let Event::IntakeLogged { entry, .. } = engine.apply_at(Command::AddIntake(250), at).unwrap() else {
            panic!("expected an intake event");
        };
        assert_eq!(log_line(&entry), "  08:15:30 UTC  +250 ml  = 250 ml");
    }

    #[test]
    fn crossing_event_announces_celebration() {
        let mut engine = dashboard();
        engine.set_goal(500).unwrap();
        let line = event(&engine.add_intake(500).unwrap());
        assert!(line.contains("Goal reached"));
        let line = event(&engine.add_intake(500).unwrap());
        assert!(!line.contains("Goal reached"));
    }
}
