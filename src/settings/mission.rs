use serde::{Deserialize, Serialize};

use super::collection::DomainMap;
use super::keys::Mission;
use super::primitives::Setting;
use super::{LegacyOptions, LoadSettings};
use crate::legacy::{keys, LegacyStorage, LegacyWriter};
use crate::validation::{self, DriftReport, DriftSink, GameEntities};


/// Which space missions to launch.
#[derive(Serialize, Deserialize, Debug, Clone, PartialEq)]
#[serde(default)]
pub struct MissionSettings {
    pub enabled: bool,
    pub items: DomainMap<Mission, Setting>,
}

impl Default for MissionSettings {
    fn default() -> Self {
        Self {
            enabled: false,
            items: Mission::ALL
                .iter()
                .map(|mission| (*mission, Setting::new(true)))
                .collect(),
        }
    }
}

impl MissionSettings {
    pub const LEGACY_ALIAS: &'static str = "missions";

    pub fn validate_game(&self, game: &GameEntities, sink: &mut dyn DriftSink) -> DriftReport {
        let report =
            validation::validate(&game.missions, self.items.keys().map(|mission| mission.id()));
        report.emit("space mission", sink);
        report
    }
}

impl LoadSettings for MissionSettings {
    fn load(&mut self, source: &Self) {
        self.enabled = source.enabled;
        self.items.load_with(&source.items, Setting::load);
    }
}

impl LegacyOptions for MissionSettings {
    fn to_legacy_options(&self, subject: &mut LegacyWriter) {
        subject.set(keys::toggle(Self::LEGACY_ALIAS), self.enabled);

        for (mission, item) in self.items.iter() {
            item.write_legacy(subject, keys::toggle(mission));
        }
    }

    fn read_legacy_options(&mut self, subject: &LegacyStorage) {
        subject.read_bool_into(&keys::toggle(Self::LEGACY_ALIAS), &mut self.enabled);

        for (mission, item) in self.items.iter_mut() {
            item.read_legacy(subject, &keys::toggle(mission));
        }
    }
}
