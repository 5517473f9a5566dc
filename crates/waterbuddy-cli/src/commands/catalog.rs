use serde::Serialize;
use waterbuddy_core::{AgeGroup, QuickAdd, CUP_ML, MAX_GOAL_ML, MIN_GOAL_ML};

#[derive(Serialize)]
struct AgeGroupRow {
    key: &'static str,
    alias: &'static str,
    standard_goal_ml: u32,
}

#[derive(Serialize)]
struct QuickAddRow {
    label: &'static str,
    amount_ml: u32,
}

#[derive(Serialize)]
struct CatalogView {
    age_groups: Vec<AgeGroupRow>,
    quick_add: Vec<QuickAddRow>,
    cup_ml: u32,
    goal_range_ml: [u32; 2],
}

pub fn run(json: bool) -> Result<(), Box<dyn std::error::Error>> {
    if json {
        let view = CatalogView {
            age_groups: AgeGroup::ALL
                .into_iter()
                .map(|g| AgeGroupRow {
                    key: g.label(),
                    alias: g.alias(),
                    standard_goal_ml: g.standard_goal_ml(),
                })
                .collect(),
            quick_add: QuickAdd::ALL
                .into_iter()
                .map(|q| QuickAddRow {
                    label: q.label(),
                    amount_ml: q.amount_ml(),
                })
                .collect(),
            cup_ml: CUP_ML,
            goal_range_ml: [MIN_GOAL_ML, MAX_GOAL_ML],
        };
        println!("{}", serde_json::to_string_pretty(&view)?);
        return Ok(());
    }

    println!("Age groups:");
    for group in AgeGroup::ALL {
        println!(
            "  {:<22} {:<9} {:>5} ml",
            group.label(),
            group.alias(),
            group.standard_goal_ml()
        );
    }
    println!("Quick add:");
    for preset in QuickAdd::ALL {
        println!("  {:<13} {:>5} ml", preset.label(), preset.amount_ml());
    }
    println!("1 cup = {CUP_ML} ml, goals {MIN_GOAL_ML}-{MAX_GOAL_ML} ml");
    Ok(())
}
