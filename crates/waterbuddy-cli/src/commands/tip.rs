use chrono::{Local, NaiveDate};
use clap::Args;
use waterbuddy_core::tips::{stable_for_date, TipSelector};
use waterbuddy_core::{Config, TipMode};

#[derive(Args)]
pub struct TipArgs {
    /// Pick at random instead of the tip of the day
    #[arg(long, conflicts_with = "date")]
    random: bool,
    /// Tip of the day for this date (YYYY-MM-DD) instead of today
    #[arg(long)]
    date: Option<NaiveDate>,
}

pub fn run(config: &Config, args: TipArgs) -> Result<(), Box<dyn std::error::Error>> {
    let tip = match args.date {
        Some(date) => stable_for_date(date),
        None => {
            let mode = if args.random { TipMode::Random } else { config.tips.mode };
            TipSelector::new(mode, config.tips.seed).tip(Local::now().date_naive())
        }
    };
    println!("{tip}");
    Ok(())
}
