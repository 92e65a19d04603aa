use std::fs;
use std::path::{Path, PathBuf};

use miette::{miette, Context, IntoDiagnostic, Result};
use serde::Deserialize;

pub use self::base_paths::BasePathsConfiguration;
use self::base_paths::UnresolvedBasePathsConfiguration;
pub use self::logging::LoggingConfiguration;
use self::logging::UnresolvedLoggingConfiguration;
pub use self::storage::StorageConfiguration;
use self::storage::UnresolvedStorageConfiguration;
use super::traits::{ResolvableConfiguration, ResolvableConfigurationWithContext};
use super::utilities::get_default_configuration_file_path;

mod base_paths;
mod logging;
mod storage;



#[derive(Deserialize, Debug)]
pub(crate) struct UnresolvedConfiguration {
    /// Base paths.
    base_paths: UnresolvedBasePathsConfiguration,

    /// Logging-related configuration.
    logging: UnresolvedLoggingConfiguration,

    /// Locations of the settings files the tool reads and writes.
    storage: UnresolvedStorageConfiguration,
}


/// The entire tool configuration.
#[derive(Debug, Clone)]
pub struct Configuration {
    /// The file path this configuration was loaded from.
    pub file_path: PathBuf,

    /// Base paths.
    pub base_paths: BasePathsConfiguration,

    /// Logging-related configuration.
    pub logging: LoggingConfiguration,

    /// Settings file locations.
    pub storage: StorageConfiguration,
}


impl ResolvableConfigurationWithContext for UnresolvedConfiguration {
    type Resolved = Configuration;
    type Context = PathBuf;

    fn resolve(self, context: Self::Context) -> Result<Self::Resolved> {
        let base_paths = self
            .base_paths
            .resolve()
            .wrap_err("Failed to resolve base_paths table.")?;

        let logging = self
            .logging
            .resolve(base_paths.clone())
            .wrap_err("Failed to resolve logging table.")?;

        let storage = self
            .storage
            .resolve(base_paths.clone())
            .wrap_err("Failed to resolve storage table.")?;


        Ok(Configuration {
            file_path: context,
            base_paths,
            logging,
            storage,
        })
    }
}


impl Configuration {
    /// Parses a configuration from TOML. Relative paths are resolved
    /// against the current directory.
    pub fn load_from_str(configuration_string: &str, file_path: PathBuf) -> Result<Self> {
        let unresolved_configuration =
            toml::from_str::<UnresolvedConfiguration>(configuration_string)
                .into_diagnostic()
                .wrap_err("Could not parse configuration file!")?;

        unresolved_configuration
            .resolve(file_path)
            .wrap_err("Failed to resolve configuration.")
    }

    /// Load the configuration from a specific file path.
    pub fn load_from_path<S: AsRef<Path>>(configuration_file_path: S) -> Result<Self> {
        let configuration_file_path = configuration_file_path.as_ref();

        let configuration_string = fs::read_to_string(configuration_file_path)
            .into_diagnostic()
            .wrap_err_with(|| {
                miette!(
                    "Could not read configuration file at {}.",
                    configuration_file_path.display()
                )
            })?;

        let configuration_file_path = dunce::canonicalize(configuration_file_path)
            .into_diagnostic()
            .wrap_err("Could not canonicalize configuration file path!")?;

        Self::load_from_str(&configuration_string, configuration_file_path)
    }

    /// Load the configuration from the default path (`./data/configuration.toml`).
    pub fn load_from_default_path() -> Result<Configuration> {
        Configuration::load_from_path(
            get_default_configuration_file_path()
                .wrap_err_with(|| "Could not load configuration file at default path.")?,
        )
    }
}
