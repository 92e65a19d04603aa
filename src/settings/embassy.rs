use serde::{Deserialize, Serialize};

use super::collection::DomainMap;
use super::keys::Race;
use super::primitives::{Limit, SettingMax};
use super::{LegacyOptions, LoadSettings};
use crate::legacy::{keys, LegacyStorage, LegacyWriter};


/// Embassy construction, per race.
#[derive(Serialize, Deserialize, Debug, Clone, PartialEq)]
#[serde(default)]
pub struct EmbassySettings {
    pub enabled: bool,
    pub trigger: f64,
    pub races: DomainMap<Race, SettingMax>,
}

impl Default for EmbassySettings {
    fn default() -> Self {
        Self {
            enabled: false,
            trigger: 0.0,
            races: Race::ALL
                .iter()
                .map(|race| (*race, SettingMax::new(true, Limit::Unlimited)))
                .collect(),
        }
    }
}

impl EmbassySettings {
    pub const LEGACY_ALIAS: &'static str = "embassies";

    /// Race toggles are already taken by trading, so embassies get their own prefix.
    fn item_name(race: &Race) -> String {
        format!("embassy-{race}")
    }
}

impl LoadSettings for EmbassySettings {
    fn load(&mut self, source: &Self) {
        self.enabled = source.enabled;
        self.trigger = source.trigger;
        self.races.load_with(&source.races, SettingMax::load);
    }
}

impl LegacyOptions for EmbassySettings {
    fn to_legacy_options(&self, subject: &mut LegacyWriter) {
        subject.set(keys::toggle(Self::LEGACY_ALIAS), self.enabled);
        subject.set(keys::trigger(Self::LEGACY_ALIAS), self.trigger);

        for (race, item) in self.races.iter() {
            item.write_legacy(subject, &Self::item_name(race));
        }
    }

    fn read_legacy_options(&mut self, subject: &LegacyStorage) {
        subject.read_bool_into(&keys::toggle(Self::LEGACY_ALIAS), &mut self.enabled);
        subject.read_number_into(&keys::trigger(Self::LEGACY_ALIAS), &mut self.trigger);

        for (race, item) in self.races.iter_mut() {
            item.read_legacy(subject, &Self::item_name(race));
        }
    }
}


#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn embassy_keys_do_not_clash_with_trade_keys() {
        let mut writer = LegacyWriter::new();
        EmbassySettings::default().to_legacy_options(&mut writer);
        let subject = writer.finish();

        assert_eq!(subject.bool("toggle-embassy-dragons"), Some(true));
        assert_eq!(subject.number("set-embassy-dragons-max"), Some(-1.0));
        assert!(!subject.contains_key("toggle-dragons"));
    }
}
