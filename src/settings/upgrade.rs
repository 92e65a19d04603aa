use serde::{Deserialize, Serialize};

use super::collection::DomainMap;
use super::keys::Upgrade;
use super::primitives::Setting;
use super::{LegacyOptions, LoadSettings};
use crate::legacy::{keys, LegacyStorage, LegacyWriter};
use crate::validation::{self, DriftReport, DriftSink, GameEntities};


/// Which workshop upgrades to purchase.
#[derive(Serialize, Deserialize, Debug, Clone, PartialEq)]
#[serde(default)]
pub struct UpgradeSettings {
    pub enabled: bool,
    pub items: DomainMap<Upgrade, Setting>,
}

impl Default for UpgradeSettings {
    fn default() -> Self {
        Self {
            enabled: true,
            items: Upgrade::ALL
                .iter()
                .map(|upgrade| (*upgrade, Setting::new(true)))
                .collect(),
        }
    }
}

impl UpgradeSettings {
    pub const LEGACY_ALIAS: &'static str = "upgrades";

    fn item_key(upgrade: &Upgrade) -> String {
        format!("toggle-upgrade-{upgrade}")
    }

    /// Turns every upgrade on or off at once.
    pub fn set_all(&mut self, enabled: bool) {
        for (_, item) in self.items.iter_mut() {
            item.enabled = enabled;
        }
    }

    pub fn validate_game(&self, game: &GameEntities, sink: &mut dyn DriftSink) -> DriftReport {
        let report =
            validation::validate(&game.upgrades, self.items.keys().map(|upgrade| upgrade.id()));
        report.emit("upgrade", sink);
        report
    }
}

impl LoadSettings for UpgradeSettings {
    fn load(&mut self, source: &Self) {
        self.enabled = source.enabled;
        self.items.load_with(&source.items, Setting::load);
    }
}

impl LegacyOptions for UpgradeSettings {
    fn to_legacy_options(&self, subject: &mut LegacyWriter) {
        subject.set(keys::toggle(Self::LEGACY_ALIAS), self.enabled);

        for (upgrade, item) in self.items.iter() {
            item.write_legacy(subject, Self::item_key(upgrade));
        }
    }

    fn read_legacy_options(&mut self, subject: &LegacyStorage) {
        subject.read_bool_into(&keys::toggle(Self::LEGACY_ALIAS), &mut self.enabled);

        for (upgrade, item) in self.items.iter_mut() {
            item.read_legacy(subject, &Self::item_key(upgrade));
        }
    }
}


#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn reset_restores_defaults() {
        let mut settings = UpgradeSettings::default();
        settings.enabled = false;
        settings.set_all(false);

        settings.reset();

        assert_eq!(settings, UpgradeSettings::default());
    }

    #[test]
    fn set_all_toggles_every_item() {
        let mut settings = UpgradeSettings::default();
        settings.set_all(false);
        assert!(settings.items.iter().all(|(_, item)| !item.enabled));
    }
}
