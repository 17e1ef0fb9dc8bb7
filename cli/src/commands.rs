use clap::{Parser, Subcommand, ValueEnum};
use std::path::PathBuf;

/// Inspect and change the dashboard theme from a terminal
#[derive(Parser, Debug)]
#[command(name = "themectl", version)]
pub struct Cli {
    /// Config file (default: ./config.toml when present)
    #[arg(long, global = true)]
    pub config: Option<PathBuf>,

    #[command(subcommand)]
    pub command: Command,
}

#[derive(Subcommand, Debug, Clone, PartialEq, Eq)]
pub enum Command {
    /// Show theme, accent, device tint and seasonal state
    Status,
    /// Switch to the dark theme
    Dark,
    /// Switch to the light theme
    Light,
    /// Apply an accent and drop the previous one
    Accent {
        /// Accent marker name
        name: String,
    },
    /// Remove an accent marker without forgetting the stored accent
    UndoAccent {
        /// Marker to remove (default: the current accent)
        name: Option<String>,
    },
    /// Turn the winter snowfall on or off
    Winter {
        #[arg(value_enum)]
        state: Switch,
    },
    /// Darken or lighten a #rrggbb color by a percentage
    Shade {
        color: String,
        #[arg(allow_negative_numbers = true)]
        percent: i32,
    },
    /// Show which seasonal windows are active right now
    Calendar,
}

#[derive(ValueEnum, Debug, Clone, Copy, PartialEq, Eq)]
pub enum Switch {
    On,
    Off,
}

impl Switch {
    pub fn is_on(self) -> bool {
        self == Switch::On
    }
}

impl Command {
    /// Whether the command reads or changes theme state and therefore needs
    /// the manager initialized first.
    pub fn needs_init(&self) -> bool {
        !matches!(self, Command::Shade { .. } | Command::Calendar)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use claims::*;

    fn parse(args: &[&str]) -> Cli {
        Cli::try_parse_from(std::iter::once("themectl").chain(args.iter().copied())).unwrap()
    }

    #[test]
    fn test_parse_subcommands() {
        assert_eq!(parse(&["status"]).command, Command::Status);
        assert_eq!(
            parse(&["accent", "gold"]).command,
            Command::Accent {
                name: "gold".to_string()
            }
        );
        assert_eq!(
            parse(&["undo-accent"]).command,
            Command::UndoAccent { name: None }
        );
        assert_eq!(
            parse(&["winter", "off"]).command,
            Command::Winter { state: Switch::Off }
        );
    }

    #[test]
    fn test_shade_accepts_negative_percent() {
        let cli = parse(&["shade", "#f7f7f7", "-12"]);
        assert_eq!(
            cli.command,
            Command::Shade {
                color: "#f7f7f7".to_string(),
                percent: -12
            }
        );
        assert!(!cli.command.needs_init());
    }

    #[test]
    fn test_global_config_option() {
        let cli = parse(&["dark", "--config", "/etc/themectl.toml"]);
        assert_eq!(cli.config, Some(PathBuf::from("/etc/themectl.toml")));
        assert!(cli.command.needs_init());
    }

    #[test]
    fn test_unknown_switch_is_rejected() {
        assert_err!(Cli::try_parse_from(["themectl", "winter", "maybe"]));
    }
}
