use serde::{Deserialize, Serialize};

use super::collection::DomainMap;
use super::keys::SpaceBuilding;
use super::mission::MissionSettings;
use super::primitives::{Limit, SettingMax};
use super::{LegacyOptions, LoadSettings};
use crate::legacy::{keys, LegacyStorage, LegacyWriter};
use crate::validation::{self, DriftReport, DriftSink, GameEntities};


/// Space construction and missions.
#[derive(Serialize, Deserialize, Debug, Clone, PartialEq)]
#[serde(default, rename_all = "camelCase")]
pub struct SpaceSettings {
    pub enabled: bool,

    /// Fraction of resource capacity that has to be reached before building.
    pub trigger: f64,

    pub buildings: DomainMap<SpaceBuilding, SettingMax>,

    pub unlock_missions: MissionSettings,
}

impl Default for SpaceSettings {
    fn default() -> Self {
        Self {
            enabled: false,
            trigger: 0.0,
            buildings: SpaceBuilding::ALL
                .iter()
                .map(|building| (*building, SettingMax::new(false, Limit::Unlimited)))
                .collect(),
            unlock_missions: MissionSettings::default(),
        }
    }
}

impl SpaceSettings {
    pub const LEGACY_ALIAS: &'static str = "space";

    pub fn validate_game(
        &self,
        game: &GameEntities,
        sink: &mut dyn DriftSink,
    ) -> (DriftReport, DriftReport) {
        let buildings = validation::validate(
            &game.space_buildings,
            self.buildings.keys().map(|building| building.id()),
        );
        buildings.emit("space building", sink);

        let missions = self.unlock_missions.validate_game(game, sink);

        (buildings, missions)
    }
}

impl LoadSettings for SpaceSettings {
    fn load(&mut self, source: &Self) {
        self.enabled = source.enabled;
        self.trigger = source.trigger;

        self.buildings.load_with(&source.buildings, SettingMax::load);

        self.unlock_missions.load(&source.unlock_missions);
    }
}

impl LegacyOptions for SpaceSettings {
    fn to_legacy_options(&self, subject: &mut LegacyWriter) {
        subject.set(keys::toggle(Self::LEGACY_ALIAS), self.enabled);
        subject.set(keys::trigger(Self::LEGACY_ALIAS), self.trigger);

        for (building, item) in self.buildings.iter() {
            item.write_legacy(subject, building.id());
        }

        self.unlock_missions.to_legacy_options(subject);
    }

    fn read_legacy_options(&mut self, subject: &LegacyStorage) {
        subject.read_bool_into(&keys::toggle(Self::LEGACY_ALIAS), &mut self.enabled);
        subject.read_number_into(&keys::trigger(Self::LEGACY_ALIAS), &mut self.trigger);

        for (building, item) in self.buildings.iter_mut() {
            item.read_legacy(subject, building.id());
        }

        self.unlock_missions.read_legacy_options(subject);
    }
}
