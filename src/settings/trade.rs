use serde::{Deserialize, Serialize};

use super::collection::DomainMap;
use super::embassy::EmbassySettings;
use super::keys::{Race, Season};
use super::primitives::{Setting, SettingLimited, SettingTrigger};
use super::{LegacyOptions, LoadSettings};
use crate::legacy::{keys, LegacyStorage, LegacyWriter};
use crate::validation::{self, DriftReport, DriftSink, GameEntities};


/// Trade settings for a single race.
#[derive(Serialize, Deserialize, Debug, Clone, PartialEq, Default)]
#[serde(default)]
pub struct TradeSettingsItem {
    pub enabled: bool,

    /// Only trade while it is profitable.
    pub limited: bool,

    /// The seasons during which trading with this race is allowed.
    pub seasons: DomainMap<Season, Setting>,
}

impl TradeSettingsItem {
    pub fn new(
        enabled: bool,
        limited: bool,
        summer: bool,
        autumn: bool,
        winter: bool,
        spring: bool,
    ) -> Self {
        Self {
            enabled,
            limited,
            seasons: DomainMap::from_entries([
                (Season::Summer, Setting::new(summer)),
                (Season::Autumn, Setting::new(autumn)),
                (Season::Winter, Setting::new(winter)),
                (Season::Spring, Setting::new(spring)),
            ]),
        }
    }

    pub fn trades_in(&self, season: Season) -> bool {
        self.seasons.get(&season).is_some_and(|setting| setting.enabled)
    }

    pub fn load(&mut self, source: &Self) {
        self.enabled = source.enabled;
        self.limited = source.limited;
        self.seasons.load_with(&source.seasons, Setting::load);
    }

    fn write_legacy(&self, subject: &mut LegacyWriter, race: &Race) {
        SettingLimited::new(self.enabled, self.limited).write_legacy(subject, race.id());

        for (season, setting) in self.seasons.iter() {
            setting.write_legacy(subject, keys::seasonal(race, season));
        }
    }

    fn read_legacy(&mut self, subject: &LegacyStorage, race: &Race) {
        let mut flags = SettingLimited::new(self.enabled, self.limited);
        flags.read_legacy(subject, race.id());
        self.enabled = flags.enabled;
        self.limited = flags.limited;

        for (season, setting) in self.seasons.iter_mut() {
            setting.read_legacy(subject, &keys::seasonal(race, season));
        }
    }
}


/// Trading with other races, plus the trade-adjacent chores.
#[derive(Serialize, Deserialize, Debug, Clone, PartialEq)]
#[serde(default, rename_all = "camelCase")]
pub struct TradeSettings {
    pub enabled: bool,
    pub trigger: f64,

    pub races: DomainMap<Race, TradeSettingsItem>,

    pub build_embassies: EmbassySettings,

    pub feed_leviathans: Setting,

    /// Trades blackcoin once the relic price reaches `trigger`.
    pub trade_blackcoin: SettingTrigger,

    pub unlock_races: Setting,
}

impl Default for TradeSettings {
    fn default() -> Self {
        Self {
            enabled: false,
            trigger: 1.0,
            races: DomainMap::from_entries([
                (Race::Dragons, TradeSettingsItem::new(true, true, true, true, true, true)),
                (Race::Griffins, TradeSettingsItem::new(true, true, false, true, false, false)),
                (Race::Leviathans, TradeSettingsItem::new(true, true, true, true, true, true)),
                (Race::Lizards, TradeSettingsItem::new(true, true, true, false, false, false)),
                (Race::Nagas, TradeSettingsItem::new(true, true, true, false, false, true)),
                (Race::Sharks, TradeSettingsItem::new(true, true, false, false, true, false)),
                (Race::Spiders, TradeSettingsItem::new(true, true, true, true, false, true)),
                (Race::Zebras, TradeSettingsItem::new(true, true, true, true, true, true)),
            ]),
            build_embassies: EmbassySettings::default(),
            feed_leviathans: Setting::new(false),
            trade_blackcoin: SettingTrigger::new(true, 10000.0),
            unlock_races: Setting::new(true),
        }
    }
}

impl TradeSettings {
    pub const LEGACY_ALIAS: &'static str = "trade";

    const FEED_LEVIATHANS: &'static str = "autofeed";
    const TRADE_BLACKCOIN: &'static str = "crypto";
    const UNLOCK_RACES: &'static str = "races";

    /// Besides race drift, warns about enabled races whose trade requirement is
    /// not a resource of the game. That check only runs when the game reported
    /// its resources.
    pub fn validate_game(&self, game: &GameEntities, sink: &mut dyn DriftSink) -> DriftReport {
        let report = validation::validate(&game.races, self.races.keys().map(|race| race.id()));
        report.emit("race", sink);

        if !game.resources.is_empty() {
            for (race, item) in self.races.iter().filter(|(_, item)| item.enabled) {
                let Some(requirement) = race.trade_requirement() else {
                    continue;
                };

                if !game.resources.iter().any(|resource| resource == requirement) {
                    sink.warn(format!(
                        "Trading with the race '{race}' requires '{requirement}', which is not a resource in Kitten Game!"
                    ));
                }
            }
        }

        report
    }
}

impl LoadSettings for TradeSettings {
    fn load(&mut self, source: &Self) {
        self.enabled = source.enabled;
        self.trigger = source.trigger;

        self.races.load_with(&source.races, TradeSettingsItem::load);

        self.build_embassies.load(&source.build_embassies);
        self.feed_leviathans.load(&source.feed_leviathans);
        self.trade_blackcoin.load(&source.trade_blackcoin);
        self.unlock_races.load(&source.unlock_races);
    }
}

impl LegacyOptions for TradeSettings {
    fn to_legacy_options(&self, subject: &mut LegacyWriter) {
        subject.set(keys::toggle(Self::LEGACY_ALIAS), self.enabled);
        subject.set(keys::trigger(Self::LEGACY_ALIAS), self.trigger);

        for (race, item) in self.races.iter() {
            item.write_legacy(subject, race);
        }

        self.build_embassies.to_legacy_options(subject);

        self.feed_leviathans
            .write_legacy(subject, keys::toggle(Self::FEED_LEVIATHANS));
        self.trade_blackcoin
            .write_legacy_nested(subject, Self::TRADE_BLACKCOIN);
        self.unlock_races
            .write_legacy(subject, keys::toggle(Self::UNLOCK_RACES));
    }

    fn read_legacy_options(&mut self, subject: &LegacyStorage) {
        subject.read_bool_into(&keys::toggle(Self::LEGACY_ALIAS), &mut self.enabled);
        subject.read_number_into(&keys::trigger(Self::LEGACY_ALIAS), &mut self.trigger);

        for (race, item) in self.races.iter_mut() {
            item.read_legacy(subject, race);
        }

        self.build_embassies.read_legacy_options(subject);

        self.feed_leviathans
            .read_legacy(subject, &keys::toggle(Self::FEED_LEVIATHANS));
        self.trade_blackcoin
            .read_legacy_nested(subject, Self::TRADE_BLACKCOIN);
        self.unlock_races
            .read_legacy(subject, &keys::toggle(Self::UNLOCK_RACES));
    }
}


#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn default_seasons() {
        let settings = TradeSettings::default();
        let griffins = &settings.races[&Race::Griffins];

        assert!(griffins.trades_in(Season::Autumn));
        assert!(!griffins.trades_in(Season::Summer));
        assert!(!griffins.trades_in(Season::Winter));
        assert!(!griffins.trades_in(Season::Spring));
    }

    #[test]
    fn warns_about_missing_trade_requirements() {
        let mut settings = TradeSettings::default();
        settings.races.get_mut(&Race::Lizards).unwrap().enabled = false;

        let game = GameEntities {
            races: Race::ALL.iter().map(|race| race.id().to_string()).collect(),
            resources: vec!["wood".to_string(), "iron".to_string()],
            ..GameEntities::default()
        };

        let mut warnings = Vec::new();
        let report = settings.validate_game(&game, &mut warnings);

        assert!(report.is_clean());
        assert_eq!(
            warnings,
            vec![
                "Trading with the race 'dragons' requires 'titanium', which is not a resource in Kitten Game!".to_string(),
                "Trading with the race 'leviathans' requires 'unobtainium', which is not a resource in Kitten Game!".to_string(),
            ]
        );
    }

    #[test]
    fn requirements_are_not_checked_without_game_resources() {
        let game = GameEntities {
            races: Race::ALL.iter().map(|race| race.id().to_string()).collect(),
            ..GameEntities::default()
        };

        let mut warnings = Vec::new();
        TradeSettings::default().validate_game(&game, &mut warnings);

        assert!(warnings.is_empty());
    }

    #[test]
    fn limited_flag_serializes_independently() {
        let mut settings = TradeSettings::default();
        let dragons = settings.races.get_mut(&Race::Dragons).unwrap();
        dragons.enabled = false;
        dragons.limited = true;

        let mut writer = LegacyWriter::new();
        settings.to_legacy_options(&mut writer);
        let subject = writer.finish();

        assert_eq!(subject.bool("toggle-limited-dragons"), Some(true));
        assert_eq!(subject.bool("toggle-dragons"), Some(false));
        assert_eq!(subject.bool("toggle-dragons-winter"), Some(true));
    }

    #[test]
    fn reads_seasons_with_fallback() {
        let mut subject = LegacyStorage::new();
        subject.insert("toggle-sharks-summer", true);
        subject.insert("toggle-autofeed", true);
        subject.insert("toggle-crypto-trigger", 5000.0);

        let settings = TradeSettings::from_legacy_options(&subject);
        let sharks = &settings.races[&Race::Sharks];

        assert!(sharks.trades_in(Season::Summer));
        assert!(sharks.trades_in(Season::Winter));
        assert!(!sharks.trades_in(Season::Autumn));
        assert!(settings.feed_leviathans.enabled);
        assert_eq!(settings.trade_blackcoin, SettingTrigger::new(true, 5000.0));
    }

    #[test]
    fn load_copies_seasons_of_present_races_only() {
        let mut destination = TradeSettings::default();
        destination.races.get_mut(&Race::Zebras).unwrap().limited = false;

        let source: TradeSettings = serde_json::from_str(
            r#"{
                "races": {
                    "lizards": {
                        "enabled": false,
                        "limited": false,
                        "seasons": { "winter": { "enabled": true } }
                    }
                },
                "feedLeviathans": { "enabled": true }
            }"#,
        )
        .unwrap();

        destination.load(&source);

        let lizards = &destination.races[&Race::Lizards];
        assert!(!lizards.enabled);
        assert!(lizards.trades_in(Season::Winter));
        // Seasons absent from the source keep their previous value.
        assert!(lizards.trades_in(Season::Summer));
        assert!(!destination.races[&Race::Zebras].limited);
        assert!(destination.feed_leviathans.enabled);
    }
}
