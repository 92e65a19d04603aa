//! Command-line interface definitions for the `kitten-config` binary.

use std::path::PathBuf;

use clap::{Parser, Subcommand, ValueEnum};



/// Command-line arguments.
#[derive(Parser)]
#[command(
    name = "kitten-config",
    author,
    about = "Inspects, converts and validates Kitten Scientists settings.",
    version
)]
pub struct CLIArgs {
    /// This is the path to the configuration file to use.
    /// If unspecified, this defaults to `./data/configuration.toml`.
    #[arg(
        short = 'c',
        long = "configuration-file-path",
        global = true,
        help = "Path to the configuration file to use. Defaults to ./data/configuration.toml"
    )]
    pub configuration_file_path: Option<PathBuf>,

    #[command(subcommand)]
    pub command: CLICommand,
}


#[derive(Subcommand)]
pub enum CLICommand {
    /// Print the default settings tree as JSON.
    Defaults,

    /// Convert a flat legacy settings blob into a settings document.
    ImportLegacy {
        #[arg(
            short = 'i',
            long = "input",
            help = "Legacy settings file. Defaults to [storage].legacy_settings_file_path."
        )]
        input: Option<PathBuf>,

        #[arg(
            short = 'o',
            long = "output",
            help = "Settings file to write. Defaults to [storage].settings_file_path."
        )]
        output: Option<PathBuf>,
    },

    /// Convert a settings document into the flat legacy format.
    ExportLegacy {
        #[arg(
            short = 'i',
            long = "input",
            help = "Settings file. Defaults to [storage].settings_file_path."
        )]
        input: Option<PathBuf>,

        #[arg(
            short = 'o',
            long = "output",
            help = "Legacy settings file to write. Defaults to [storage].legacy_settings_file_path."
        )]
        output: Option<PathBuf>,
    },

    /// Compare the settings against the entities of the running game.
    Validate {
        #[arg(
            short = 'i',
            long = "input",
            help = "Settings file. Defaults to [storage].settings_file_path."
        )]
        input: Option<PathBuf>,

        #[arg(
            short = 'g',
            long = "game",
            help = "Game entity lists (JSON). Defaults to [storage].game_entities_file_path."
        )]
        game: Option<PathBuf>,
    },

    /// Set the trigger of a section from user input, e.g. `0.95`.
    /// Values outside of [0, 1] are clamped.
    SetTrigger {
        section: TriggerSection,

        raw_value: String,
    },

    /// Set the maximum of a space building from user input,
    /// e.g. `250`, `1.5K` or `-1` for no limit.
    SetMax {
        building: String,

        raw_value: String,
    },
}


/// Sections that carry a trigger settable from the command line.
#[derive(ValueEnum, Clone, Copy, Debug, PartialEq, Eq)]
pub enum TriggerSection {
    Space,
    Trade,
    Embassies,
}
