use serde::{Deserialize, Serialize};

use super::collection::DomainMap;
use super::keys::Technology;
use super::primitives::Setting;
use super::{LegacyOptions, LoadSettings};
use crate::legacy::{keys, LegacyStorage, LegacyWriter};
use crate::validation::{self, DriftReport, DriftSink, GameEntities};


/// Which technologies to research.
#[derive(Serialize, Deserialize, Debug, Clone, PartialEq)]
#[serde(default)]
pub struct TechSettings {
    pub enabled: bool,
    pub items: DomainMap<Technology, Setting>,
}

impl Default for TechSettings {
    fn default() -> Self {
        Self {
            enabled: false,
            items: Technology::ALL
                .iter()
                .map(|tech| (*tech, Setting::new(true)))
                .collect(),
        }
    }
}

impl TechSettings {
    pub const LEGACY_ALIAS: &'static str = "techs";

    fn item_key(tech: &Technology) -> String {
        format!("toggle-tech-{tech}")
    }

    pub fn validate_game(&self, game: &GameEntities, sink: &mut dyn DriftSink) -> DriftReport {
        let report = validation::validate(&game.techs, self.items.keys().map(|tech| tech.id()));
        report.emit("technology", sink);
        report
    }
}

impl LoadSettings for TechSettings {
    fn load(&mut self, source: &Self) {
        self.enabled = source.enabled;
        self.items.load_with(&source.items, Setting::load);
    }
}

impl LegacyOptions for TechSettings {
    fn to_legacy_options(&self, subject: &mut LegacyWriter) {
        subject.set(keys::toggle(Self::LEGACY_ALIAS), self.enabled);

        for (tech, item) in self.items.iter() {
            item.write_legacy(subject, Self::item_key(tech));
        }
    }

    fn read_legacy_options(&mut self, subject: &LegacyStorage) {
        // Older releases wrote this flag as `toggle-techs` but read it back from
        // `toggle-policies`. It is read from the key it is written to.
        subject.read_bool_into(&keys::toggle(Self::LEGACY_ALIAS), &mut self.enabled);

        for (tech, item) in self.items.iter_mut() {
            item.read_legacy(subject, &Self::item_key(tech));
        }
    }
}
