use serde::{Deserialize, Serialize};

use super::collection::DomainMap;
use super::primitives::Limit;
use super::{LegacyOptions, LoadSettings};
use crate::legacy::{keys, LegacyStorage, LegacyWriter};
use crate::validation::{self, DriftReport, DriftSink, GameEntities};


/// Default share of a resource crafting may consume.
pub const DEFAULT_CONSUME_RATE: f64 = 1.0;


/// Stock and consumption control for one resource.
#[derive(Serialize, Deserialize, Debug, Clone, Copy, PartialEq)]
#[serde(default)]
pub struct ResourcesSettingsItem {
    pub enabled: bool,

    /// Amount to keep in stock. Automation never spends below it.
    pub stock: Limit,

    /// Share of the stock above `stock` that may be consumed, in `[0, 1]`.
    pub consume: f64,
}

impl Default for ResourcesSettingsItem {
    fn default() -> Self {
        Self {
            enabled: false,
            stock: Limit::Count(0),
            consume: DEFAULT_CONSUME_RATE,
        }
    }
}

impl ResourcesSettingsItem {
    pub fn load(&mut self, source: &Self) {
        self.enabled = source.enabled;
        self.stock = source.stock;
        self.consume = source.consume;
    }
}


/// Resource stock control.
///
/// Unlike every other section, the key set is not fixed: it holds whatever
/// resources have been configured so far, and loading or reading legacy data
/// adds the resources found there.
#[derive(Serialize, Deserialize, Debug, Clone, PartialEq)]
#[serde(default)]
pub struct ResourcesSettings {
    pub enabled: bool,
    pub resources: DomainMap<String, ResourcesSettingsItem>,
}

impl Default for ResourcesSettings {
    fn default() -> Self {
        Self {
            enabled: true,
            resources: DomainMap::new(),
        }
    }
}

impl ResourcesSettings {
    pub const LEGACY_ALIAS: &'static str = "resources";

    const ITEM_PREFIX: &'static str = "resource-";

    fn item_name(resource: &str) -> String {
        format!("{}{resource}", Self::ITEM_PREFIX)
    }

    /// Resource identifiers present in `subject`, whichever of their fields were stored.
    fn legacy_resource_ids(subject: &LegacyStorage) -> Vec<String> {
        let toggle_prefix = keys::toggle(Self::ITEM_PREFIX);
        let value_prefix = format!("set-{}", Self::ITEM_PREFIX);

        let mut ids: Vec<String> = subject
            .infixes(&toggle_prefix, "")
            .chain(subject.infixes(&value_prefix, "-stock"))
            .chain(subject.infixes(&value_prefix, "-consume"))
            .map(str::to_string)
            .collect();
        ids.sort();
        ids.dedup();
        ids
    }

    /// Only settings for resources the game does not have are reported.
    /// Resources that were never configured are simply not controlled.
    pub fn validate_game(&self, game: &GameEntities, sink: &mut dyn DriftSink) -> DriftReport {
        let mut report = validation::validate(&game.resources, self.resources.keys());
        report.missing_in_settings.clear();
        report.emit("resource", sink);
        report
    }
}

impl LoadSettings for ResourcesSettings {
    fn load(&mut self, source: &Self) {
        self.enabled = source.enabled;
        self.resources
            .load_mirrored(&source.resources, ResourcesSettingsItem::load);
    }
}

impl LegacyOptions for ResourcesSettings {
    fn to_legacy_options(&self, subject: &mut LegacyWriter) {
        subject.set(keys::toggle(Self::LEGACY_ALIAS), self.enabled);

        for (resource, item) in self.resources.iter() {
            let name = Self::item_name(resource);
            subject.set(keys::toggle(&name), item.enabled);
            subject.set(keys::value(&name, "stock"), f64::from(item.stock));
            subject.set(keys::value(&name, "consume"), item.consume);
        }
    }

    fn read_legacy_options(&mut self, subject: &LegacyStorage) {
        subject.read_bool_into(&keys::toggle(Self::LEGACY_ALIAS), &mut self.enabled);

        for resource in Self::legacy_resource_ids(subject) {
            if !self.resources.contains_key(&resource) {
                self.resources
                    .insert(resource.clone(), ResourcesSettingsItem::default());
            }
        }

        for (resource, item) in self.resources.iter_mut() {
            let name = Self::item_name(resource);
            subject.read_bool_into(&keys::toggle(&name), &mut item.enabled);
            item.stock.read_legacy(subject, &keys::value(&name, "stock"));
            subject.read_number_into(&keys::value(&name, "consume"), &mut item.consume);
        }
    }
}


#[cfg(test)]
mod tests {
    use super::*;

    fn item(enabled: bool, stock: u64, consume: f64) -> ResourcesSettingsItem {
        ResourcesSettingsItem {
            enabled,
            stock: Limit::Count(stock),
            consume,
        }
    }

    #[test]
    fn discovers_resources_from_legacy_keys() {
        let mut subject = LegacyStorage::new();
        subject.insert("toggle-resources", true);
        subject.insert("toggle-resource-wood", true);
        subject.insert("set-resource-wood-stock", 500.0);
        subject.insert("set-resource-iron-consume", 0.5);

        let settings = ResourcesSettings::from_legacy_options(&subject);

        assert_eq!(settings.resources.len(), 2);
        assert_eq!(settings.resources[&"wood".to_string()], item(true, 500, 1.0));
        assert_eq!(settings.resources[&"iron".to_string()], item(false, 0, 0.5));
    }

    #[test]
    fn load_mirrors_source_keys() {
        let mut destination = ResourcesSettings::default();
        destination
            .resources
            .insert("wood".to_string(), item(true, 100, 1.0));

        let mut source = ResourcesSettings::default();
        source
            .resources
            .insert("catnip".to_string(), item(true, 2000, 0.25));

        destination.load(&source);

        assert_eq!(destination.resources[&"wood".to_string()], item(true, 100, 1.0));
        assert_eq!(destination.resources[&"catnip".to_string()], item(true, 2000, 0.25));
    }

    #[test]
    fn unlimited_stock_round_trips() {
        let mut settings = ResourcesSettings::default();
        settings.resources.insert(
            "unobtainium".to_string(),
            ResourcesSettingsItem {
                enabled: true,
                stock: Limit::Unlimited,
                consume: 0.0,
            },
        );

        let mut writer = LegacyWriter::new();
        settings.to_legacy_options(&mut writer);
        let subject = writer.finish();

        assert_eq!(subject.number("set-resource-unobtainium-stock"), Some(-1.0));
        assert_eq!(ResourcesSettings::from_legacy_options(&subject), settings);
    }

    #[test]
    fn empty_resource_id_round_trips() {
        let mut settings = ResourcesSettings::default();
        settings.resources.insert(String::new(), item(true, 7, 0.5));
        settings.resources.insert("wood".to_string(), item(false, 0, 1.0));

        let mut writer = LegacyWriter::new();
        settings.to_legacy_options(&mut writer);
        let subject = writer.finish();

        assert_eq!(subject.bool("toggle-resource-"), Some(true));
        assert_eq!(ResourcesSettings::from_legacy_options(&subject), settings);
    }

    #[test]
    fn null_stock_reads_as_unlimited() {
        let subject =
            LegacyStorage::from_json_str(r#"{ "toggle-resource-wood": true, "set-resource-wood-stock": null }"#)
                .unwrap();

        let settings = ResourcesSettings::from_legacy_options(&subject);

        assert!(settings.resources[&"wood".to_string()].stock.is_unlimited());
    }

    #[test]
    fn only_redundant_resources_are_reported() {
        let mut settings = ResourcesSettings::default();
        settings.resources.insert("wood".to_string(), item(true, 0, 1.0));
        settings.resources.insert("spice".to_string(), item(true, 0, 1.0));

        let game = GameEntities {
            resources: vec!["wood".to_string(), "iron".to_string()],
            ..GameEntities::default()
        };

        let mut warnings = Vec::new();
        let report = settings.validate_game(&game, &mut warnings);

        assert!(report.missing_in_settings.is_empty());
        assert_eq!(report.redundant_in_settings, vec!["spice"]);
        assert_eq!(
            warnings,
            vec!["The resource 'spice' is not a resource in Kitten Game!".to_string()]
        );
    }
}
