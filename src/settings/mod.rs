//! The settings tree.
//!
//! Every section is a plain struct with a closed set of fields, built with
//! compiled-in defaults. Two operations are shared by all of them:
//!
//! - [`LoadSettings::load`] copies another tree of the same shape onto this one.
//!   Collection entries the source lacks are left alone, so loading an older or
//!   partial configuration never resets settings it did not know about.
//! - [`LegacyOptions`] converts to and from the flat [`LegacyStorage`] format.
//!   Writing is total; reading starts from defaults and only overwrites the
//!   fields whose keys are present.

use serde::{Deserialize, Serialize};

use crate::legacy::{LegacyStorage, LegacyWriter};
use crate::validation::{DriftSink, DriftSummary, GameEntities};

pub use self::collection::DomainMap;
pub use self::embassy::EmbassySettings;
pub use self::keys::{
    DomainKey,
    Mission,
    Policy,
    Race,
    Season,
    SpaceBuilding,
    Technology,
    UnknownDomainKey,
    Upgrade,
};
pub use self::mission::MissionSettings;
pub use self::policy::PolicySettings;
pub use self::primitives::{Limit, Setting, SettingLimited, SettingMax, SettingTrigger};
pub use self::resources::{ResourcesSettings, ResourcesSettingsItem};
pub use self::space::SpaceSettings;
pub use self::tech::TechSettings;
pub use self::trade::{TradeSettings, TradeSettingsItem};
pub use self::unlocking::UnlockingSettings;
pub use self::upgrade::UpgradeSettings;

mod collection;
mod embassy;
mod keys;
mod mission;
mod policy;
mod primitives;
mod resources;
mod space;
mod tech;
mod trade;
mod unlocking;
mod upgrade;


/// In-place merge of a settings tree of the same shape.
pub trait LoadSettings {
    /// Copies every value of `source` onto `self`.
    ///
    /// Never fails: whatever `source` does not carry is kept as it is.
    fn load(&mut self, source: &Self);

    /// Restores the compiled-in defaults.
    fn reset(&mut self)
    where
        Self: Default,
    {
        self.load(&Self::default());
    }
}


/// Conversion to and from the flat legacy format.
pub trait LegacyOptions: Default {
    /// Writes every field, defaults included.
    fn to_legacy_options(&self, subject: &mut LegacyWriter);

    /// Overwrites the fields whose keys are present in `subject`.
    fn read_legacy_options(&mut self, subject: &LegacyStorage);

    /// Builds the defaults and applies `subject` on top.
    fn from_legacy_options(subject: &LegacyStorage) -> Self {
        let mut options = Self::default();
        options.read_legacy_options(subject);
        options
    }
}


/// The complete settings of the automation engine.
#[derive(Serialize, Deserialize, Debug, Clone, PartialEq, Default)]
#[serde(default)]
pub struct EngineSettings {
    pub unlocking: UnlockingSettings,
    pub space: SpaceSettings,
    pub trade: TradeSettings,
    pub resources: ResourcesSettings,
}

impl EngineSettings {
    /// Serializes the whole tree into the flat legacy format.
    ///
    /// # Panics
    /// If two settings map onto the same legacy key.
    pub fn to_legacy(&self) -> LegacyStorage {
        let mut writer = LegacyWriter::new();
        self.to_legacy_options(&mut writer);
        writer.finish()
    }

    /// Builds a tree from legacy data. Keys this version does not know are ignored,
    /// fields the data does not contain keep their defaults.
    pub fn from_legacy(subject: &LegacyStorage) -> Self {
        Self::from_legacy_options(subject)
    }

    /// Compares the tracked entities of every section against the live game.
    /// Each finding is reported to `sink`.
    pub fn validate_game(&self, game: &GameEntities, sink: &mut dyn DriftSink) -> DriftSummary {
        let mut summary = DriftSummary::default();

        summary.push("techs", self.unlocking.techs.validate_game(game, sink));
        summary.push("policies", self.unlocking.policies.validate_game(game, sink));
        summary.push("upgrades", self.unlocking.upgrades.validate_game(game, sink));

        let (buildings, missions) = self.space.validate_game(game, sink);
        summary.push("space", buildings);
        summary.push("missions", missions);

        summary.push("trade", self.trade.validate_game(game, sink));
        summary.push("resources", self.resources.validate_game(game, sink));

        summary
    }
}

impl LoadSettings for EngineSettings {
    fn load(&mut self, source: &Self) {
        self.unlocking.load(&source.unlocking);
        self.space.load(&source.space);
        self.trade.load(&source.trade);
        self.resources.load(&source.resources);
    }
}

impl LegacyOptions for EngineSettings {
    fn to_legacy_options(&self, subject: &mut LegacyWriter) {
        self.unlocking.to_legacy_options(subject);
        self.space.to_legacy_options(subject);
        self.trade.to_legacy_options(subject);
        self.resources.to_legacy_options(subject);
    }

    fn read_legacy_options(&mut self, subject: &LegacyStorage) {
        self.unlocking.read_legacy_options(subject);
        self.space.read_legacy_options(subject);
        self.trade.read_legacy_options(subject);
        self.resources.read_legacy_options(subject);
    }
}


#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn default_tree_has_no_key_collisions() {
        // Panics on the first duplicate key.
        let subject = EngineSettings::default().to_legacy();
        assert!(subject.len() > 200);
    }

    #[test]
    fn default_round_trip() {
        let settings = EngineSettings::default();
        assert_eq!(EngineSettings::from_legacy(&settings.to_legacy()), settings);
    }

    #[test]
    fn empty_legacy_blob_yields_defaults() {
        assert_eq!(
            EngineSettings::from_legacy(&LegacyStorage::new()),
            EngineSettings::default()
        );
    }

    #[test]
    fn unknown_legacy_keys_are_dropped() {
        let mut subject = LegacyStorage::new();
        subject.insert("toggle-hunt", true);
        subject.insert("set-unicornPasture-max", 3.0);
        subject.insert("toggle-space", true);

        let settings = EngineSettings::from_legacy(&subject);
        let written = settings.to_legacy();

        assert!(settings.space.enabled);
        assert!(!written.contains_key("toggle-hunt"));
        assert!(!written.contains_key("set-unicornPasture-max"));
    }

    #[test]
    fn reset_after_edits() {
        let mut settings = EngineSettings::default();
        settings.trade.enabled = true;
        settings.space.trigger = 0.9;

        settings.reset();

        assert_eq!(settings, EngineSettings::default());
    }
}
