use serde::{Deserialize, Serialize};

use super::policy::PolicySettings;
use super::tech::TechSettings;
use super::upgrade::UpgradeSettings;
use super::{LegacyOptions, LoadSettings};
use crate::legacy::{keys, LegacyStorage, LegacyWriter};


/// Groups everything that unlocks new content: research, policies and upgrades.
///
/// In the legacy format this section's enable flag is stored as `toggle-upgrade`.
#[derive(Serialize, Deserialize, Debug, Clone, PartialEq)]
#[serde(default)]
pub struct UnlockingSettings {
    pub enabled: bool,
    pub techs: TechSettings,
    pub policies: PolicySettings,
    pub upgrades: UpgradeSettings,
}

impl Default for UnlockingSettings {
    fn default() -> Self {
        Self {
            enabled: true,
            techs: TechSettings {
                enabled: true,
                ..TechSettings::default()
            },
            policies: PolicySettings::default(),
            upgrades: UpgradeSettings::default(),
        }
    }
}

impl UnlockingSettings {
    pub const LEGACY_ALIAS: &'static str = "upgrade";
}

impl LoadSettings for UnlockingSettings {
    fn load(&mut self, source: &Self) {
        self.enabled = source.enabled;
        self.techs.load(&source.techs);
        self.policies.load(&source.policies);
        self.upgrades.load(&source.upgrades);
    }
}

impl LegacyOptions for UnlockingSettings {
    fn to_legacy_options(&self, subject: &mut LegacyWriter) {
        subject.set(keys::toggle(Self::LEGACY_ALIAS), self.enabled);

        self.techs.to_legacy_options(subject);
        self.policies.to_legacy_options(subject);
        self.upgrades.to_legacy_options(subject);
    }

    fn read_legacy_options(&mut self, subject: &LegacyStorage) {
        subject.read_bool_into(&keys::toggle(Self::LEGACY_ALIAS), &mut self.enabled);

        self.techs.read_legacy_options(subject);
        self.policies.read_legacy_options(subject);
        self.upgrades.read_legacy_options(subject);
    }
}


#[cfg(test)]
mod tests {
    use super::*;
    use crate::settings::keys::{Policy, Technology};

    #[test]
    fn nested_sections_load_recursively() {
        let mut destination = UnlockingSettings::default();
        let mut source = UnlockingSettings::default();
        source.enabled = false;
        source.policies.enabled = true;
        source.policies.items.get_mut(&Policy::Monarchy).unwrap().enabled = true;
        source.techs.items.get_mut(&Technology::Drama).unwrap().enabled = false;

        destination.load(&source);

        assert_eq!(destination, source);
    }

    #[test]
    fn old_blob_without_policy_keys_keeps_defaults() {
        let mut subject = LegacyStorage::new();
        subject.insert("toggle-upgrade", false);
        subject.insert("toggle-tech-drama", false);

        let settings = UnlockingSettings::from_legacy_options(&subject);

        assert!(!settings.enabled);
        assert!(settings.techs.enabled);
        assert!(!settings.techs.items[&Technology::Drama].enabled);
        assert_eq!(settings.policies, PolicySettings::default());
    }
}
