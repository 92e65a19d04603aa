use std::path::PathBuf;

use miette::Result;
use serde::Deserialize;

use super::base_paths::BasePathsConfiguration;
use crate::configuration::{
    traits::ResolvableConfigurationWithContext,
    utilities::replace_placeholders_in_path,
};


#[derive(Deserialize, Clone, Debug)]
pub(super) struct UnresolvedStorageConfiguration {
    settings_file_path: String,

    legacy_settings_file_path: String,

    game_entities_file_path: String,
}

/// Default locations used when a command is not given explicit paths.
#[derive(Clone, Debug)]
pub struct StorageConfiguration {
    /// Settings in the native (nested JSON) format.
    pub settings_file_path: PathBuf,

    /// Settings in the flat legacy format.
    pub legacy_settings_file_path: PathBuf,

    /// Entity lists exported from the running game.
    pub game_entities_file_path: PathBuf,
}

impl ResolvableConfigurationWithContext for UnresolvedStorageConfiguration {
    type Resolved = StorageConfiguration;
    type Context = BasePathsConfiguration;

    fn resolve(self, context: Self::Context) -> Result<Self::Resolved> {
        let placeholders = context.placeholders_map();

        Ok(Self::Resolved {
            settings_file_path: replace_placeholders_in_path(
                self.settings_file_path,
                &placeholders,
            ),
            legacy_settings_file_path: replace_placeholders_in_path(
                self.legacy_settings_file_path,
                &placeholders,
            ),
            game_entities_file_path: replace_placeholders_in_path(
                self.game_entities_file_path,
                &placeholders,
            ),
        })
    }
}
