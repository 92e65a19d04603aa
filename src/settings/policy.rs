use serde::{Deserialize, Serialize};

use super::collection::DomainMap;
use super::keys::Policy;
use super::primitives::Setting;
use super::{LegacyOptions, LoadSettings};
use crate::legacy::{keys, LegacyStorage, LegacyWriter};
use crate::validation::{self, DriftReport, DriftSink, GameEntities};


/// Which policies to adopt. All of them are opt-in.
#[derive(Serialize, Deserialize, Debug, Clone, PartialEq)]
#[serde(default)]
pub struct PolicySettings {
    pub enabled: bool,
    pub items: DomainMap<Policy, Setting>,
}

impl Default for PolicySettings {
    fn default() -> Self {
        Self {
            enabled: false,
            items: Policy::ALL
                .iter()
                .map(|policy| (*policy, Setting::new(false)))
                .collect(),
        }
    }
}

impl PolicySettings {
    pub const LEGACY_ALIAS: &'static str = "policies";

    pub fn validate_game(&self, game: &GameEntities, sink: &mut dyn DriftSink) -> DriftReport {
        let report =
            validation::validate(&game.policies, self.items.keys().map(|policy| policy.id()));
        report.emit("policy", sink);
        report
    }
}

impl LoadSettings for PolicySettings {
    fn load(&mut self, source: &Self) {
        self.enabled = source.enabled;
        self.items.load_with(&source.items, Setting::load);
    }
}

impl LegacyOptions for PolicySettings {
    fn to_legacy_options(&self, subject: &mut LegacyWriter) {
        subject.set(keys::toggle(Self::LEGACY_ALIAS), self.enabled);

        for (policy, item) in self.items.iter() {
            item.write_legacy(subject, keys::toggle(policy));
        }
    }

    fn read_legacy_options(&mut self, subject: &LegacyStorage) {
        subject.read_bool_into(&keys::toggle(Self::LEGACY_ALIAS), &mut self.enabled);

        for (policy, item) in self.items.iter_mut() {
            item.read_legacy(subject, &keys::toggle(policy));
        }
    }
}
