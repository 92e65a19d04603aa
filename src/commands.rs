//! Implementations of the command-line subcommands.

use std::fs;
use std::path::{Path, PathBuf};

use kitten_config::input::{parse_limit, parse_percentage, render_limit, render_percentage};
use kitten_config::settings::{LoadSettings, SpaceBuilding};
use kitten_config::{EngineSettings, GameEntities, LegacyStorage, TracingDriftSink};
use miette::{miette, Context, IntoDiagnostic, Result};
use tracing::{debug, info};

use crate::cli::{CLICommand, TriggerSection};
use crate::configuration::Configuration;


fn read_file(path: &Path, what: &str) -> Result<String> {
    fs::read_to_string(path)
        .into_diagnostic()
        .wrap_err_with(|| miette!("Failed to read {} at {}.", what, path.display()))
}

fn write_file(path: &Path, contents: &str, what: &str) -> Result<()> {
    if let Some(parent) = path.parent() {
        if !parent.as_os_str().is_empty() && !parent.is_dir() {
            fs::create_dir_all(parent)
                .into_diagnostic()
                .wrap_err_with(|| miette!("Failed to create directory {}.", parent.display()))?;
        }
    }

    fs::write(path, contents)
        .into_diagnostic()
        .wrap_err_with(|| miette!("Failed to write {} to {}.", what, path.display()))?;

    info!(path = %path.display(), "Wrote {what}.");
    Ok(())
}


/// Parses a settings document and applies it onto the defaults.
pub fn settings_from_document(json: &str) -> Result<EngineSettings> {
    let parsed = serde_json::from_str::<EngineSettings>(json)
        .into_diagnostic()
        .wrap_err("Settings document is not valid.")?;

    let mut settings = EngineSettings::default();
    settings.load(&parsed);
    Ok(settings)
}

fn settings_to_document(settings: &EngineSettings) -> Result<String> {
    serde_json::to_string_pretty(settings)
        .into_diagnostic()
        .wrap_err("Failed to encode settings.")
}

/// Loads the settings file, or the defaults if it does not exist yet.
fn load_settings_or_default(path: &Path) -> Result<EngineSettings> {
    if !path.exists() {
        debug!(path = %path.display(), "No settings file yet, starting from defaults.");
        return Ok(EngineSettings::default());
    }

    settings_from_document(&read_file(path, "settings")?)
        .wrap_err_with(|| miette!("Failed to load settings from {}.", path.display()))
}


/// Applies a raw trigger value to `section`, returning the value that was stored.
pub fn apply_trigger(
    settings: &mut EngineSettings,
    section: TriggerSection,
    raw_value: &str,
) -> Result<f64> {
    let trigger = parse_percentage(raw_value)
        .into_diagnostic()
        .wrap_err("Invalid trigger value.")?;

    match section {
        TriggerSection::Space => settings.space.trigger = trigger,
        TriggerSection::Trade => settings.trade.trigger = trigger,
        TriggerSection::Embassies => settings.trade.build_embassies.trigger = trigger,
    }

    Ok(trigger)
}

/// Applies a raw maximum to a space building and enables it.
pub fn apply_space_max(
    settings: &mut EngineSettings,
    building: &str,
    raw_value: &str,
) -> Result<String> {
    let building = building
        .parse::<SpaceBuilding>()
        .into_diagnostic()
        .wrap_err("Unknown space building.")?;

    let max = parse_limit(raw_value)
        .into_diagnostic()
        .wrap_err("Invalid maximum.")?;

    let item = settings
        .space
        .buildings
        .get_mut(&building)
        .ok_or_else(|| miette!("Space building {} is not tracked.", building))?;

    item.enabled = true;
    item.max = max;

    Ok(render_limit(max))
}


fn pick(explicit: Option<PathBuf>, configured: &Path) -> PathBuf {
    explicit.unwrap_or_else(|| configured.to_path_buf())
}


pub fn run_command(command: CLICommand, configuration: &Configuration) -> Result<()> {
    let storage = &configuration.storage;

    match command {
        CLICommand::Defaults => {
            println!("{}", settings_to_document(&EngineSettings::default())?);
        }
        CLICommand::ImportLegacy { input, output } => {
            let input = pick(input, &storage.legacy_settings_file_path);
            let output = pick(output, &storage.settings_file_path);

            let legacy = LegacyStorage::from_json_str(&read_file(&input, "legacy settings")?)
                .into_diagnostic()
                .wrap_err_with(|| miette!("Failed to parse legacy settings at {}.", input.display()))?;
            info!(keys = legacy.len(), "Read legacy settings.");

            let settings = EngineSettings::from_legacy(&legacy);
            write_file(&output, &settings_to_document(&settings)?, "settings")?;
        }
        CLICommand::ExportLegacy { input, output } => {
            let input = pick(input, &storage.settings_file_path);
            let output = pick(output, &storage.legacy_settings_file_path);

            let settings = settings_from_document(&read_file(&input, "settings")?)?;
            let legacy = settings.to_legacy();
            info!(keys = legacy.len(), "Converted settings to the legacy format.");

            let encoded = legacy
                .to_json_string_pretty()
                .into_diagnostic()
                .wrap_err("Failed to encode legacy settings.")?;
            write_file(&output, &encoded, "legacy settings")?;
        }
        CLICommand::Validate { input, game } => {
            let input = pick(input, &storage.settings_file_path);
            let game = pick(game, &storage.game_entities_file_path);

            let settings = load_settings_or_default(&input)?;
            let game_entities = serde_json::from_str::<GameEntities>(&read_file(&game, "game entities")?)
                .into_diagnostic()
                .wrap_err_with(|| miette!("Failed to parse game entities at {}.", game.display()))?;

            let summary = settings.validate_game(&game_entities, &mut TracingDriftSink);

            for entry in &summary.sections {
                println!(
                    "{:<10} {:>3} untracked, {:>3} obsolete",
                    entry.section,
                    entry.report.missing_in_settings.len(),
                    entry.report.redundant_in_settings.len()
                );
            }

            if summary.is_clean() {
                info!("Settings match the game.");
            } else {
                info!(findings = summary.finding_count(), "Settings drifted from the game.");
            }
        }
        CLICommand::SetTrigger { section, raw_value } => {
            let path = &storage.settings_file_path;
            let mut settings = load_settings_or_default(path)?;

            let trigger = apply_trigger(&mut settings, section, &raw_value)?;
            info!(?section, trigger = %render_percentage(trigger), "Updated trigger.");

            write_file(path, &settings_to_document(&settings)?, "settings")?;
        }
        CLICommand::SetMax { building, raw_value } => {
            let path = &storage.settings_file_path;
            let mut settings = load_settings_or_default(path)?;

            let max = apply_space_max(&mut settings, &building, &raw_value)?;
            info!(%building, %max, "Updated space building maximum.");

            write_file(path, &settings_to_document(&settings)?, "settings")?;
        }
    }

    Ok(())
}
