//! # Compare Command
//!
//! Fills the comparison screen from arguments and prints it.
//!
//! ## Flow
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                                                                         │
//! │  open_comparison()          cards rendered with effective settings      │
//! │        │                                                                │
//! │        ▼                                                                │
//! │  update_field() × n         each value validated, pizza replaced        │
//! │        │                                                                │
//! │        ▼                                                                │
//! │  calculate()                verdict revealed once both are ready        │
//! │        │                                                                │
//! │        ▼                                                                │
//! │  --currency / --unit ?      save_override → publish → cards re-render   │
//! │        │                                                                │
//! │        ▼                                                                │
//! │  report()                   text or JSON                                │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```

use clap::Args;
use std::fmt::Write as _;
use tracing::debug;

use pizza_core::{DistanceUnit, PizzaField, PizzaSlot, Winner};

use crate::error::CliResult;
use crate::state::{AppState, ComparisonReport, PizzaReport};

/// Arguments for `compare`.
#[derive(Debug, Clone, Default, Args)]
pub struct CompareArgs {
    /// Diameter of pizza 1
    #[arg(long, value_name = "N")]
    pub diameter1: Option<String>,

    /// Price of one pizza 1
    #[arg(long, value_name = "AMOUNT")]
    pub price1: Option<String>,

    /// How many of pizza 1
    #[arg(long, value_name = "N")]
    pub count1: Option<String>,

    /// Diameter of pizza 2
    #[arg(long, value_name = "N")]
    pub diameter2: Option<String>,

    /// Price of one pizza 2
    #[arg(long, value_name = "AMOUNT")]
    pub price2: Option<String>,

    /// How many of pizza 2
    #[arg(long, value_name = "N")]
    pub count2: Option<String>,

    /// Save this currency as the override before printing
    #[arg(long, value_name = "CODE")]
    pub currency: Option<String>,

    /// Save this distance unit as the override before printing
    #[arg(long, value_name = "cm|in")]
    pub unit: Option<DistanceUnit>,
}

impl CompareArgs {
    fn inputs(&self) -> [(PizzaSlot, PizzaField, Option<&str>); 6] {
        [
            (PizzaSlot::First, PizzaField::Diameter, self.diameter1.as_deref()),
            (PizzaSlot::First, PizzaField::Price, self.price1.as_deref()),
            (PizzaSlot::First, PizzaField::Count, self.count1.as_deref()),
            (PizzaSlot::Second, PizzaField::Diameter, self.diameter2.as_deref()),
            (PizzaSlot::Second, PizzaField::Price, self.price2.as_deref()),
            (PizzaSlot::Second, PizzaField::Count, self.count2.as_deref()),
        ]
    }
}

/// Runs `compare` and returns what should be printed.
pub fn execute(args: &CompareArgs, app: &mut AppState, json: bool) -> CliResult<String> {
    let mut comparison = app.open_comparison();

    for (slot, field, text) in args.inputs() {
        if let Some(text) = text {
            comparison.update_field(slot, field, text)?;
        }
    }

    let shown = comparison.calculate();
    debug!(shown, verdict = ?comparison.verdict(), "Comparison calculated");

    if args.currency.is_some() || args.unit.is_some() {
        let current = app.store().effective();
        let currency = args
            .currency
            .clone()
            .unwrap_or_else(|| current.currency.to_string());
        let unit = args.unit.unwrap_or(current.distance_unit);
        app.store_mut().save_override(&currency, unit)?;
    }

    let report = comparison.report(app.locale().primary_locale(), app.formatter());
    if json {
        Ok(serde_json::to_string_pretty(&report)?)
    } else {
        Ok(render_text(&report))
    }
}

/// Plain-text rendering of a report.
pub fn render_text(report: &ComparisonReport) -> String {
    let mut out = String::from("Which pizza is more profitable?\n");

    for pizza in &report.pizzas {
        out.push('\n');
        render_pizza(&mut out, pizza);
    }

    out.push('\n');
    out.push_str(&verdict_line(report));
    out
}

fn render_pizza(out: &mut String, report: &PizzaReport) {
    let marker = if report.winner { "  ★ better deal" } else { "" };
    let unit = report.distance_unit;
    let dash = || "-".to_string();

    let _ = writeln!(out, "Pizza {}{}", report.number, marker);
    let _ = writeln!(
        out,
        "  diameter        {}",
        report
            .pizza
            .diameter
            .map_or_else(dash, |d| format!("{} {}", d, unit))
    );
    let _ = writeln!(
        out,
        "  price           {}",
        report
            .pizza
            .price
            .map_or_else(dash, |p| format!("{} {}", p, report.currency))
    );
    let _ = writeln!(out, "  count           {}", report.pizza.count);
    let _ = writeln!(
        out,
        "  total price     {}",
        report.total_price.clone().unwrap_or_else(dash)
    );
    if let (Some(area), Some(ppa)) = (&report.total_area, &report.price_per_area) {
        let _ = writeln!(out, "  total area      {}", area);
        let _ = writeln!(out, "  price per area  {}", ppa);
    }
}

fn verdict_line(report: &ComparisonReport) -> String {
    match report.verdict {
        Some(Winner::Pizza1) => "Pizza 1 is the better deal.".to_string(),
        Some(Winner::Pizza2) => "Pizza 2 is the better deal.".to_string(),
        Some(Winner::Tie) => "Both pizzas cost the same per area.".to_string(),
        Some(Winner::NoWinner) | None if !report.ready => {
            "Enter a diameter and a price for both pizzas to compare them.".to_string()
        }
        Some(Winner::NoWinner) | None => "No verdict yet.".to_string(),
    }
}
