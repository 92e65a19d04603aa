use kitten_config::settings::{Limit, ResourcesSettingsItem};
use kitten_config::{EngineSettings, LegacyStorage};
use proptest::prelude::*;


/// Cycles through the generated values so every field of the tree receives one.
struct Values {
    flags: Vec<bool>,
    amounts: Vec<i64>,
    ratios: Vec<f64>,
    cursor: usize,
}

impl Values {
    fn flag(&mut self) -> bool {
        self.cursor += 1;
        self.flags[self.cursor % self.flags.len()]
    }

    fn limit(&mut self) -> Limit {
        self.cursor += 1;
        Limit::try_from(self.amounts[self.cursor % self.amounts.len()] as f64).unwrap()
    }

    fn ratio(&mut self) -> f64 {
        self.cursor += 1;
        self.ratios[self.cursor % self.ratios.len()]
    }
}


fn mutate(settings: &mut EngineSettings, values: &mut Values, resources: &[String]) {
    let unlocking = &mut settings.unlocking;
    unlocking.enabled = values.flag();
    unlocking.techs.enabled = values.flag();
    for (_, item) in unlocking.techs.items.iter_mut() {
        item.enabled = values.flag();
    }
    unlocking.policies.enabled = values.flag();
    for (_, item) in unlocking.policies.items.iter_mut() {
        item.enabled = values.flag();
    }
    unlocking.upgrades.enabled = values.flag();
    for (_, item) in unlocking.upgrades.items.iter_mut() {
        item.enabled = values.flag();
    }

    let space = &mut settings.space;
    space.enabled = values.flag();
    space.trigger = values.ratio();
    for (_, item) in space.buildings.iter_mut() {
        item.enabled = values.flag();
        item.max = values.limit();
    }
    space.unlock_missions.enabled = values.flag();
    for (_, item) in space.unlock_missions.items.iter_mut() {
        item.enabled = values.flag();
    }

    let trade = &mut settings.trade;
    trade.enabled = values.flag();
    trade.trigger = values.ratio();
    for (_, race) in trade.races.iter_mut() {
        race.enabled = values.flag();
        race.limited = values.flag();
        for (_, season) in race.seasons.iter_mut() {
            season.enabled = values.flag();
        }
    }
    trade.build_embassies.enabled = values.flag();
    trade.build_embassies.trigger = values.ratio();
    for (_, item) in trade.build_embassies.races.iter_mut() {
        item.enabled = values.flag();
        item.max = values.limit();
    }
    trade.feed_leviathans.enabled = values.flag();
    trade.trade_blackcoin.enabled = values.flag();
    trade.trade_blackcoin.trigger = values.ratio() * 20000.0;
    trade.unlock_races.enabled = values.flag();

    settings.resources.enabled = values.flag();
    for resource in resources {
        let item = ResourcesSettingsItem {
            enabled: values.flag(),
            stock: values.limit(),
            consume: values.ratio(),
        };
        settings.resources.resources.insert(resource.clone(), item);
    }
}


proptest! {
    #[test]
    fn mutated_tree_survives_legacy_round_trip(
        flags in prop::collection::vec(any::<bool>(), 1..64),
        amounts in prop::collection::vec(-5i64..1_000_000, 1..16),
        ratios in prop::collection::vec(0.0f64..=1.0, 1..16),
        resources in prop::collection::vec("[a-z]{3,10}", 0..6),
    ) {
        let mut values = Values { flags, amounts, ratios, cursor: 0 };
        let mut settings = EngineSettings::default();
        mutate(&mut settings, &mut values, &resources);

        let restored = EngineSettings::from_legacy(&settings.to_legacy());
        prop_assert_eq!(restored, settings);
    }
}


#[test]
fn both_no_limit_spellings_store_the_same_value() {
    let mut negative = LegacyStorage::new();
    negative.insert("set-moonBase-max", -1.0);

    let mut infinite = LegacyStorage::new();
    infinite.insert("set-moonBase-max", f64::INFINITY);

    let from_negative = EngineSettings::from_legacy(&negative);
    let from_infinite = EngineSettings::from_legacy(&infinite);

    assert_eq!(from_negative, from_infinite);
    assert_eq!(
        from_negative.to_legacy().number("set-moonBase-max"),
        from_infinite.to_legacy().number("set-moonBase-max"),
    );
    assert_eq!(from_negative.to_legacy().number("set-moonBase-max"), Some(-1.0));
}


#[test]
fn limited_race_flag_key() {
    let mut settings = EngineSettings::default();
    let dragons = settings
        .trade
        .races
        .iter_mut()
        .find(|(race, _)| race.id() == "dragons")
        .map(|(_, item)| item)
        .unwrap();
    dragons.limited = true;

    let subject = settings.to_legacy();
    assert_eq!(subject.bool("toggle-limited-dragons"), Some(true));
}


#[test]
fn nested_document_imports_like_flat_blob() {
    let nested = LegacyStorage::from_json_str(
        r#"{
            "toggles": { "space": true, "trade": true },
            "triggers": { "space": 0.4 },
            "items": { "set-spaceStation-max": 5, "toggle-limited-zebras": false }
        }"#,
    )
    .unwrap();

    let flat = LegacyStorage::from_json_str(
        r#"{
            "toggle-space": true,
            "toggle-trade": true,
            "trigger-space": 0.4,
            "set-spaceStation-max": 5,
            "toggle-limited-zebras": false
        }"#,
    )
    .unwrap();

    assert_eq!(nested, flat);

    let settings = EngineSettings::from_legacy(&nested);
    assert!(settings.space.enabled);
    assert!(settings.trade.enabled);
    assert_eq!(settings.space.trigger, 0.4);
}


#[test]
fn browser_encoded_infinity_imports_as_unlimited() {
    let subject = LegacyStorage::from_json_str(
        r#"{
            "toggle-space": true,
            "set-moonBase-max": null,
            "set-sunforge-max": 4,
            "some-other-feature": "text"
        }"#,
    )
    .unwrap();

    let settings = EngineSettings::from_legacy(&subject);
    let written = settings.to_legacy();

    assert!(settings.space.enabled);
    assert_eq!(written.number("set-moonBase-max"), Some(-1.0));
    assert_eq!(written.number("set-sunforge-max"), Some(4.0));
    assert!(!written.contains_key("some-other-feature"));
}
