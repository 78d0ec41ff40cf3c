//! CLI argument parsing

use crate::models::PropLeg;
use clap::{ColorChoice, Parser, Subcommand, ValueHint};
use std::path::PathBuf;

/// Player prop explorer for the terminal
#[derive(Parser, Debug)]
#[command(
    name = "propdash",
    version,
    about = "Search players, build prop legs and price parlays against the statistics service\n\nQuick Start:\n  propdash            # interactive player picker\n  propdash search tatum",
    color = ColorChoice::Auto
)]
pub struct Cli {
    /// Workspace used to look up `propdash.toml`
    ///
    /// Default: Current directory
    #[arg(
        long,
        global = true,
        value_name = "PATH",
        value_hint = ValueHint::DirPath
    )]
    pub workspace: Option<PathBuf>,

    /// Explicit configuration file, skipping the workspace lookup
    #[arg(
        long,
        global = true,
        value_name = "FILE",
        value_hint = ValueHint::FilePath
    )]
    pub config: Option<PathBuf>,

    /// Statistics service base URL (overrides config and `PROPDASH_API_BASE`)
    #[arg(long, global = true, value_name = "URL")]
    pub api_base: Option<String>,

    /// Directory for persisted state such as recent selections
    #[arg(
        long,
        global = true,
        value_name = "DIR",
        value_hint = ValueHint::DirPath
    )]
    pub state_dir: Option<PathBuf>,

    /// Log filter, e.g. `debug` or `propdash_core=trace`
    #[arg(long, global = true)]
    pub log_level: Option<String>,

    #[command(subcommand)]
    pub command: Option<Commands>,
}

/// Available commands
#[derive(Debug, Subcommand, Clone, PartialEq)]
pub enum Commands {
    /// **Interactive player picker** (default)
    ///
    /// Type to search, arrows to move, Enter to pick.
    /// Ctrl-A adds a leg, Ctrl-T cycles the prop, PgUp/PgDn move the
    /// threshold, Ctrl-G prices the slip, Ctrl-R resets it.
    Pick {
        /// Open the dropdown immediately
        #[arg(long)]
        auto_focus: bool,
    },

    /// **One-shot lookup** printed as a list
    ///
    /// Example: propdash search tatum --limit 5
    Search {
        query: String,

        /// Maximum number of players returned
        #[arg(long)]
        limit: Option<usize>,
    },

    /// **Price legs** through the probability service
    ///
    /// One leg is priced on its own; two or more are priced jointly.
    ///
    /// Example: propdash price --leg 201:pts:25 --leg 201:reb:8
    Price {
        /// Leg as `<player_id>:<prop>:<threshold>`
        #[arg(long = "leg", value_name = "LEG", required = true)]
        legs: Vec<PropLeg>,

        /// Simulation samples for joint pricing
        #[arg(long)]
        samples: Option<u32>,
    },

    /// **Recent selections** remembered by the picker
    Recent {
        /// Forget every remembered player
        #[arg(long)]
        clear: bool,
    },

    /// **Configuration**: print the effective settings or write defaults
    Config {
        /// Write a default `propdash.toml` into the workspace
        #[arg(long)]
        init: bool,

        /// Overwrite an existing file with `--init`
        #[arg(long, requires = "init")]
        force: bool,
    },
}

impl Default for Commands {
    fn default() -> Self {
        Self::Pick { auto_focus: false }
    }
}

impl Cli {
    pub fn command(&self) -> Commands {
        self.command.clone().unwrap_or_default()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::PropName;

    #[test]
    fn no_subcommand_means_pick() {
        let cli = Cli::try_parse_from(["propdash"]).unwrap();
        assert_eq!(cli.command(), Commands::Pick { auto_focus: false });
    }

    #[test]
    fn price_collects_repeated_legs() {
        let cli = Cli::try_parse_from([
            "propdash",
            "price",
            "--leg",
            "201:pts:25",
            "--leg",
            "202:boards:8.5",
        ])
        .unwrap();
        let Commands::Price { legs, samples } = cli.command() else {
            panic!("expected price command");
        };
        assert_eq!(samples, None);
        assert_eq!(legs.len(), 2);
        assert_eq!(legs[1].prop, PropName::Reb);
        assert_eq!(legs[1].threshold, 8.5);
    }

    #[test]
    fn malformed_leg_is_rejected() {
        assert!(Cli::try_parse_from(["propdash", "price", "--leg", "201:pts"]).is_err());
    }

    #[test]
    fn force_requires_init() {
        assert!(Cli::try_parse_from(["propdash", "config", "--force"]).is_err());
        assert!(Cli::try_parse_from(["propdash", "config", "--init", "--force"]).is_ok());
    }

    #[test]
    fn global_flags_follow_subcommands() {
        let cli =
            Cli::try_parse_from(["propdash", "search", "tat", "--api-base", "http://x"]).unwrap();
        assert_eq!(cli.api_base.as_deref(), Some("http://x"));
    }
}
