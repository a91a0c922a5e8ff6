//! CLI argument definitions.

use std::path::PathBuf;

use clap::{Parser, Subcommand};

use crate::commands::{CompareArgs, SettingsArgs};

/// Pizza Compare - which pizza gives you more for your money?
#[derive(Debug, Parser)]
#[command(name = "pizza-compare")]
#[command(author, version, about, long_about = None)]
#[command(propagate_version = true)]
pub struct Cli {
    /// Print JSON instead of text
    #[arg(long, global = true)]
    pub json: bool,

    /// Config file (defaults to pizza.toml in the platform config directory)
    #[arg(long, global = true, env = "PIZZA_CONFIG", value_name = "PATH")]
    pub config: Option<PathBuf>,

    /// Preferred locale tag, most preferred first (repeatable)
    #[arg(long = "lang", global = true, value_name = "TAG")]
    pub languages: Vec<String>,

    /// Keep settings in memory only
    #[arg(long, global = true)]
    pub ephemeral: bool,

    #[command(subcommand)]
    pub command: Commands,
}

/// Available commands
#[derive(Debug, Subcommand)]
pub enum Commands {
    /// Compare two pizzas by price per area
    Compare(CompareArgs),

    /// Show or change the currency and distance unit
    Settings(SettingsArgs),
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::commands::SettingsAction;
    use clap::CommandFactory;
    use pizza_core::DistanceUnit;

    #[test]
    fn test_cli_is_well_formed() {
        Cli::command().debug_assert();
    }

    #[test]
    fn test_parse_settings_set() {
        let cli = Cli::parse_from([
            "pizza-compare",
            "--lang",
            "pl-PL",
            "--lang",
            "en-US",
            "settings",
            "set",
            "eur",
            "inches",
        ]);

        assert_eq!(cli.languages, vec!["pl-PL", "en-US"]);
        match cli.command {
            Commands::Settings(SettingsArgs {
                action: SettingsAction::Set { currency, unit },
            }) => {
                assert_eq!(currency, "eur");
                assert_eq!(unit, DistanceUnit::Inches);
            }
            other => panic!("unexpected command: {:?}", other),
        }
    }

    #[test]
    fn test_bad_unit_is_a_parse_error() {
        let result = Cli::try_parse_from(["pizza-compare", "settings", "set", "EUR", "mm"]);
        assert!(result.is_err());
    }

    #[test]
    fn test_parse_compare() {
        let cli = Cli::parse_from([
            "pizza-compare",
            "compare",
            "--diameter1",
            "30",
            "--price1",
            "8",
            "--unit",
            "cm",
            "--json",
        ]);
        assert!(cli.json);
        match cli.command {
            Commands::Compare(args) => {
                assert_eq!(args.diameter1.as_deref(), Some("30"));
                assert_eq!(args.unit, Some(DistanceUnit::Centimeters));
                assert_eq!(args.count1, None);
            }
            other => panic!("unexpected command: {:?}", other),
        }
    }
}
