//! Interactive shell: one hydration session for the life of the process.
//!
//! Each input line is parsed with clap and translated into an engine
//! command. Rejected commands are reported and the session carries on.

use std::io::{self, BufRead, Write};

use chrono::Local;
use clap::{Parser, Subcommand};
use serde_json::json;
use tracing::info;
use waterbuddy_core::history::{cumulative_series, hourly_totals};
use waterbuddy_core::intake::parse_amount_ml;
use waterbuddy_core::{
    Command, CommandKind, Config, HydrationEngine, HydrationError, HydrationSession, QuickAdd,
    TipMode, TipSelector, Unit,
};

use super::render;

#[derive(Parser)]
#[command(
    no_binary_name = true,
    disable_help_flag = true,
    disable_help_subcommand = true,
    disable_version_flag = true
)]
struct ShellLine {
    #[command(subcommand)]
    command: ShellCommand,
}

#[derive(Subcommand)]
enum ShellCommand {
    /// Leave the welcome screen
    Start,
    /// Choose an age group by label or alias
    Select {
        #[arg(required = true, num_args = 1..)]
        key: Vec<String>,
    },
    /// Go back one step
    Back,
    /// Adjust the daily goal in ml
    Goal {
        #[arg(allow_negative_numbers = true)]
        ml: i64,
    },
    /// Confirm the goal and open the dashboard
    Confirm,
    /// Log a custom amount in ml
    Add {
        #[arg(allow_hyphen_values = true)]
        amount: String,
    },
    /// Log a preset amount (250, 500, 750 or 1000)
    Quick { ml: i64 },
    /// Log an amount in cups
    Cups {
        #[arg(allow_negative_numbers = true)]
        cups: f64,
    },
    /// Switch the display unit (ml or cups)
    Unit { unit: String },
    /// Show the end-of-day summary
    Summary,
    /// Return from the summary to the dashboard
    Dashboard,
    /// Reset today's intake and return to the dashboard
    #[command(name = "new-day")]
    NewDay,
    /// Reset today's intake
    #[command(name = "reset-day")]
    ResetDay,
    /// Clear everything and start over
    #[command(name = "full-reset")]
    FullReset,
    /// Show the current view
    Status,
    /// Show the full log for today
    Log,
    /// Tip according to the configured mode
    Tip,
    /// A random tip
    #[command(name = "random-tip")]
    RandomTip,
    /// Cumulative intake series and hourly totals
    History,
    /// List commands available now
    Help,
    /// End the session
    #[command(alias = "exit")]
    Quit,
}

enum Flow {
    Continue,
    Quit,
}

struct Shell {
    engine: HydrationEngine,
    tips: TipSelector,
    config: Config,
    json: bool,
}

pub fn run(config: Config, json: bool) -> Result<(), Box<dyn std::error::Error>> {
    let stdin = io::stdin();
    let stdout = io::stdout();
    run_session(stdin.lock(), stdout.lock(), config, json)?;
    Ok(())
}

/// Drive a session from `input` until EOF or `quit`.
pub fn run_session<R: BufRead, W: Write>(
    input: R,
    mut output: W,
    config: Config,
    json: bool,
) -> io::Result<()> {
    let mut shell = Shell {
        engine: HydrationEngine::with_session(HydrationSession::with_unit(config.display.unit)),
        tips: TipSelector::new(config.tips.mode, config.tips.seed),
        config,
        json,
    };
    info!("session started");
    shell.show_status(&mut output)?;

    for line in input.lines() {
        let line = line?;
        let line = line.trim();
        if line.is_empty() || line.starts_with('#') {
            continue;
        }
        if let Flow::Quit = shell.handle(line, &mut output)? {
            break;
        }
        output.flush()?;
    }
    info!("session ended");
    Ok(())
}

impl Shell {
    fn handle<W: Write>(&mut self, line: &str, out: &mut W) -> io::Result<Flow> {
        let parsed = match ShellLine::try_parse_from(line.split_whitespace()) {
            Ok(parsed) => parsed,
            Err(e) => {
                let message = e.to_string();
                let first = message.lines().next().unwrap_or("invalid command");
                self.warn(out, first.trim_start_matches("error: "))?;
                return Ok(Flow::Continue);
            }
        };

        let command = match parsed.command {
            ShellCommand::Start => Command::Start,
            ShellCommand::Select { key } => Command::SelectAgeGroup(key.join(" ")),
            ShellCommand::Back => Command::Back,
            ShellCommand::Goal { ml } => Command::SetGoal(ml),
            ShellCommand::Confirm => Command::ConfirmGoal,
            ShellCommand::Add { amount } => match parse_amount_ml(&amount) {
                Ok(ml) => Command::AddIntake(ml),
                Err(e) => return self.reject(out, &e),
            },
            ShellCommand::Quick { ml } => match QuickAdd::from_ml(ml) {
                Some(preset) => Command::QuickAdd(preset),
                None => {
                    let e = HydrationError::InvalidAmount(format!(
                        "{ml} ml is not a quick-add amount (250, 500, 750, 1000)"
                    ));
                    return self.reject(out, &e);
                }
            },
            ShellCommand::Cups { cups } => Command::AddIntakeCups(cups),
            ShellCommand::Unit { unit } => match unit.parse::<Unit>() {
                Ok(unit) => Command::SetUnit(unit),
                Err(message) => {
                    self.warn(out, &message)?;
                    return Ok(Flow::Continue);
                }
            },
            ShellCommand::Summary => Command::ViewSummary,
            ShellCommand::Dashboard => Command::BackToDashboard,
            ShellCommand::NewDay => Command::StartNewDay,
            ShellCommand::ResetDay => Command::ResetDay,
            ShellCommand::FullReset => Command::FullReset,
            ShellCommand::Status => {
                self.show_status(out)?;
                return Ok(Flow::Continue);
            }
            ShellCommand::Log => {
                self.show_log(out)?;
                return Ok(Flow::Continue);
            }
            ShellCommand::Tip => {
                let tip = self.tips.tip(Local::now().date_naive());
                self.show_tip(out, tip)?;
                return Ok(Flow::Continue);
            }
            ShellCommand::RandomTip => {
                let tip = self.tips.random_tip();
                self.show_tip(out, tip)?;
                return Ok(Flow::Continue);
            }
            ShellCommand::History => {
                self.show_history(out)?;
                return Ok(Flow::Continue);
            }
            ShellCommand::Help => {
                self.show_help(out)?;
                return Ok(Flow::Continue);
            }
            ShellCommand::Quit => return Ok(Flow::Quit),
        };

        self.execute(command, out)?;
        Ok(Flow::Continue)
    }

    fn execute<W: Write>(&mut self, command: Command, out: &mut W) -> io::Result<()> {
        let phase_before = self.engine.phase();
        match self.engine.apply(command) {
            Ok(event) => {
                if self.json {
                    writeln!(out, "{}", json!({ "event": event }))?;
                } else {
                    writeln!(out, "{}", render::event(&event))?;
                }
                if self.engine.phase() != phase_before {
                    self.show_status(out)?;
                }
                Ok(())
            }
            Err(e) => self.reject(out, &e).map(|_| ()),
        }
    }

    fn reject<W: Write>(&self, out: &mut W, err: &HydrationError) -> io::Result<Flow> {
        self.warn(out, &err.to_string())?;
        Ok(Flow::Continue)
    }

    fn warn<W: Write>(&self, out: &mut W, message: &str) -> io::Result<()> {
        if self.json {
            writeln!(out, "{}", json!({ "error": message }))
        } else {
            writeln!(out, "warning: {message}")
        }
    }

    fn show_status<W: Write>(&mut self, out: &mut W) -> io::Result<()> {
        let snap = self.engine.snapshot();
        if self.json {
            return writeln!(out, "{}", json!({ "snapshot": snap }));
        }
        // Random tips are only shown on request, never re-rolled per render.
        let tip = (self.config.display.show_tips && self.tips.mode() == TipMode::Stable)
            .then(|| self.tips.tip(Local::now().date_naive()));
        write!(
            out,
            "{}",
            render::view(&snap, &self.engine.summary(), &self.config, tip)
        )?;
        self.show_help(out)
    }

    fn show_log<W: Write>(&self, out: &mut W) -> io::Result<()> {
        let log = self.engine.session().log();
        if self.json {
            return writeln!(out, "{}", json!({ "log": log }));
        }
        if log.is_empty() {
            return writeln!(out, "No water logged yet today.");
        }
        for entry in log {
            writeln!(out, "{}", render::log_line(entry))?;
        }
        Ok(())
    }

    fn show_tip<W: Write>(&self, out: &mut W, tip: &str) -> io::Result<()> {
        if self.json {
            writeln!(out, "{}", json!({ "tip": tip }))
        } else {
            writeln!(out, "💡 {tip}")
        }
    }

    fn show_history<W: Write>(&self, out: &mut W) -> io::Result<()> {
        let log = self.engine.session().log();
        if self.json {
            let history = json!({
                "history": {
                    "series": cumulative_series(log),
                    "hourly": hourly_totals(log),
                    "log": log,
                }
            });
            return writeln!(out, "{history}");
        }
        writeln!(out, "Cumulative intake:")?;
        for point in cumulative_series(log) {
            writeln!(out, "  {} UTC  {} ml", point.at.format("%H:%M"), point.cumulative_ml)?;
        }
        writeln!(out, "By hour (UTC):")?;
        for (hour, ml) in hourly_totals(log) {
            writeln!(out, "  {hour:02}:00  {ml} ml")?;
        }
        Ok(())
    }

    fn show_help<W: Write>(&self, out: &mut W) -> io::Result<()> {
        let mut available: Vec<&str> = self
            .engine
            .allowed_commands()
            .iter()
            .map(|&kind| usage(kind))
            .collect();
        available.extend(["status", "log", "tip", "random-tip", "history", "quit"]);
        if self.json {
            writeln!(out, "{}", json!({ "available": available }))
        } else {
            writeln!(out, "Commands: {}", available.join(", "))
        }
    }
}

fn usage(kind: CommandKind) -> &'static str {
    match kind {
        CommandKind::Start => "start",
        CommandKind::SelectAgeGroup => "select <age group>",
        CommandKind::Back => "back",
        CommandKind::SetGoal => "goal <ml>",
        CommandKind::ConfirmGoal => "confirm",
        CommandKind::AddIntake => "add <ml>",
        CommandKind::AddIntakeCups => "cups <n>",
        CommandKind::QuickAdd => "quick <250|500|750|1000>",
        CommandKind::SetUnit => "unit <ml|cups>",
        CommandKind::ResetDay => "reset-day",
        CommandKind::FullReset => "full-reset",
        CommandKind::ViewSummary => "summary",
        CommandKind::BackToDashboard => "dashboard",
        CommandKind::StartNewDay => "new-day",
    }
}
