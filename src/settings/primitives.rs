//! Atomic settings every section is built from.
//!
//! The four variants share the `enabled` flag and are composed by containment:
//! sections embed them as fields, collections hold them as values.
//! None of them validate their values; clamping happens where raw input is parsed
//! (see [`crate::input`]).

use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::legacy::{keys, LegacyStorage, LegacyValue, LegacyWriter};


/// A maximum or stock quantity.
///
/// `Unlimited` is the only in-memory representation of "no limit". Legacy data used
/// both negative numbers and positive infinity for it; every conversion from a raw
/// number normalizes either one to `Unlimited`, and it is always written out as `-1`.
///
/// Limits are stored as `f64`, so a count is only exact up to [`Limit::MAX_COUNT`].
/// Conversions from raw numbers saturate at that bound.
#[derive(Serialize, Deserialize, Debug, Clone, Copy, PartialEq, Eq, Default)]
#[serde(try_from = "f64", into = "f64")]
pub enum Limit {
    #[default]
    Unlimited,
    Count(u64),
}

/// The number [`Limit::Unlimited`] is written as.
pub const UNLIMITED_SENTINEL: f64 = -1.0;

#[derive(Error, Debug, Clone, Copy, PartialEq)]
#[error("limit is not a number")]
pub struct NotANumber;

impl TryFrom<f64> for Limit {
    type Error = NotANumber;

    fn try_from(value: f64) -> Result<Self, Self::Error> {
        if value.is_nan() {
            Err(NotANumber)
        } else if value < 0.0 || value.is_infinite() {
            Ok(Limit::Unlimited)
        } else {
            Ok(Limit::Count((value.floor() as u64).min(Limit::MAX_COUNT)))
        }
    }
}

impl From<Limit> for f64 {
    fn from(limit: Limit) -> Self {
        match limit {
            Limit::Unlimited => UNLIMITED_SENTINEL,
            Limit::Count(count) => count as f64,
        }
    }
}

impl Limit {
    /// The largest count every integer up to which `f64` holds exactly (2^53).
    pub const MAX_COUNT: u64 = 1 << 53;

    pub fn is_unlimited(self) -> bool {
        matches!(self, Limit::Unlimited)
    }

    /// A `null` stored under `key` is an infinite limit that went through JSON.
    pub(crate) fn read_legacy(&mut self, subject: &LegacyStorage, key: &str) {
        let limit = match subject.get(key) {
            Some(LegacyValue::Number(raw)) => Limit::try_from(raw).ok(),
            Some(LegacyValue::Null) => Some(Limit::Unlimited),
            Some(LegacyValue::Bool(_)) | None => None,
        };

        if let Some(limit) = limit {
            *self = limit;
        }
    }
}


/// A plain enable flag.
#[derive(Serialize, Deserialize, Debug, Clone, Copy, PartialEq, Default)]
#[serde(default)]
pub struct Setting {
    pub enabled: bool,
}

impl Setting {
    pub const fn new(enabled: bool) -> Self {
        Self { enabled }
    }

    pub fn load(&mut self, source: &Self) {
        self.enabled = source.enabled;
    }

    pub(crate) fn write_legacy(&self, subject: &mut LegacyWriter, toggle_key: String) {
        subject.set(toggle_key, self.enabled);
    }

    pub(crate) fn read_legacy(&mut self, subject: &LegacyStorage, toggle_key: &str) {
        subject.read_bool_into(toggle_key, &mut self.enabled);
    }
}


/// An enable flag with an upper bound on how many of something to build.
#[derive(Serialize, Deserialize, Debug, Clone, Copy, PartialEq, Default)]
#[serde(default)]
pub struct SettingMax {
    pub enabled: bool,
    pub max: Limit,
}

impl SettingMax {
    pub const fn new(enabled: bool, max: Limit) -> Self {
        Self { enabled, max }
    }

    pub fn load(&mut self, source: &Self) {
        self.enabled = source.enabled;
        self.max = source.max;
    }

    /// Writes `toggle-<name>` and `set-<name>-max`.
    pub(crate) fn write_legacy(&self, subject: &mut LegacyWriter, name: &str) {
        subject.set(keys::toggle(name), self.enabled);
        subject.set(keys::max(name), f64::from(self.max));
    }

    pub(crate) fn read_legacy(&mut self, subject: &LegacyStorage, name: &str) {
        subject.read_bool_into(&keys::toggle(name), &mut self.enabled);
        self.max.read_legacy(subject, &keys::max(name));
    }
}


/// An enable flag with a threshold that gates when the automation fires.
///
/// Percentage triggers live in `[0, 1]`; a few triggers are absolute amounts.
#[derive(Serialize, Deserialize, Debug, Clone, Copy, PartialEq, Default)]
#[serde(default)]
pub struct SettingTrigger {
    pub enabled: bool,
    pub trigger: f64,
}

impl SettingTrigger {
    pub const fn new(enabled: bool, trigger: f64) -> Self {
        Self { enabled, trigger }
    }

    pub fn load(&mut self, source: &Self) {
        self.enabled = source.enabled;
        self.trigger = source.trigger;
    }

    /// Nested form: `toggle-<name>` and `toggle-<name>-trigger`.
    pub(crate) fn write_legacy_nested(&self, subject: &mut LegacyWriter, name: &str) {
        subject.set(keys::toggle(name), self.enabled);
        subject.set(keys::nested_trigger(name), self.trigger);
    }

    pub(crate) fn read_legacy_nested(&mut self, subject: &LegacyStorage, name: &str) {
        subject.read_bool_into(&keys::toggle(name), &mut self.enabled);
        subject.read_number_into(&keys::nested_trigger(name), &mut self.trigger);
    }
}


/// An enable flag with an independent "only up to a limit" flag.
#[derive(Serialize, Deserialize, Debug, Clone, Copy, PartialEq, Default)]
#[serde(default)]
pub struct SettingLimited {
    pub enabled: bool,
    pub limited: bool,
}

impl SettingLimited {
    pub const fn new(enabled: bool, limited: bool) -> Self {
        Self { enabled, limited }
    }

    pub fn load(&mut self, source: &Self) {
        self.enabled = source.enabled;
        self.limited = source.limited;
    }

    /// Writes `toggle-<name>` and `toggle-limited-<name>`.
    pub(crate) fn write_legacy(&self, subject: &mut LegacyWriter, name: &str) {
        subject.set(keys::toggle(name), self.enabled);
        subject.set(keys::limited(name), self.limited);
    }

    pub(crate) fn read_legacy(&mut self, subject: &LegacyStorage, name: &str) {
        subject.read_bool_into(&keys::toggle(name), &mut self.enabled);
        subject.read_bool_into(&keys::limited(name), &mut self.limited);
    }
}


#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn both_unbounded_sentinels_normalize() {
        assert_eq!(Limit::try_from(-1.0), Ok(Limit::Unlimited));
        assert_eq!(Limit::try_from(-250.0), Ok(Limit::Unlimited));
        assert_eq!(Limit::try_from(f64::INFINITY), Ok(Limit::Unlimited));
        assert_eq!(Limit::try_from(f64::NEG_INFINITY), Ok(Limit::Unlimited));
        assert_eq!(Limit::try_from(f64::NAN), Err(NotANumber));

        assert_eq!(f64::from(Limit::try_from(f64::INFINITY).unwrap()), UNLIMITED_SENTINEL);
        assert_eq!(f64::from(Limit::try_from(-7.0).unwrap()), UNLIMITED_SENTINEL);
    }

    #[test]
    fn finite_limits_are_whole_counts() {
        assert_eq!(Limit::try_from(0.0), Ok(Limit::Count(0)));
        assert_eq!(Limit::try_from(42.9), Ok(Limit::Count(42)));
        assert_eq!(f64::from(Limit::Count(1500)), 1500.0);
    }

    #[test]
    fn huge_limits_saturate_at_exact_bound() {
        let limit = Limit::try_from(1e300).unwrap();
        assert_eq!(limit, Limit::Count(Limit::MAX_COUNT));
        assert_eq!(Limit::try_from(f64::from(limit)), Ok(limit));

        let below = Limit::Count(Limit::MAX_COUNT - 1);
        assert_eq!(Limit::try_from(f64::from(below)), Ok(below));
    }

    #[test]
    fn null_reads_as_unlimited() {
        let mut storage = LegacyStorage::new();
        storage.insert("set-moonBase-max", LegacyValue::Null);
        storage.insert("set-sunforge-max", true);

        let mut max = Limit::Count(5);
        max.read_legacy(&storage, "set-moonBase-max");
        assert_eq!(max, Limit::Unlimited);

        let mut untouched = Limit::Count(5);
        untouched.read_legacy(&storage, "set-sunforge-max");
        assert_eq!(untouched, Limit::Count(5));
    }

    #[test]
    fn limit_serde_uses_sentinel() {
        assert_eq!(serde_json::to_string(&Limit::Unlimited).unwrap(), "-1.0");
        assert_eq!(serde_json::from_str::<Limit>("-1").unwrap(), Limit::Unlimited);
        assert_eq!(serde_json::from_str::<Limit>("25").unwrap(), Limit::Count(25));
    }

    #[test]
    fn setting_max_legacy_keys() {
        let setting = SettingMax::new(true, Limit::Count(50));
        let mut writer = LegacyWriter::new();
        setting.write_legacy(&mut writer, "moonBase");
        let storage = writer.finish();

        assert_eq!(storage.bool("toggle-moonBase"), Some(true));
        assert_eq!(storage.number("set-moonBase-max"), Some(50.0));

        let mut read_back = SettingMax::default();
        read_back.read_legacy(&storage, "moonBase");
        assert_eq!(read_back, setting);
    }

    #[test]
    fn missing_keys_keep_defaults() {
        let storage = LegacyStorage::new();

        let mut trigger = SettingTrigger::new(true, 0.25);
        trigger.read_legacy_nested(&storage, "crypto");
        assert_eq!(trigger, SettingTrigger::new(true, 0.25));

        let mut limited = SettingLimited::new(false, true);
        limited.read_legacy(&storage, "dragons");
        assert_eq!(limited, SettingLimited::new(false, true));
    }

    #[test]
    fn limited_flag_key() {
        let mut writer = LegacyWriter::new();
        SettingLimited::new(false, true).write_legacy(&mut writer, "dragons");
        let storage = writer.finish();

        assert_eq!(storage.bool("toggle-limited-dragons"), Some(true));
        assert_eq!(storage.bool("toggle-dragons"), Some(false));
    }

    #[test]
    fn nested_trigger_keys() {
        let mut writer = LegacyWriter::new();
        SettingTrigger::new(true, 10000.0).write_legacy_nested(&mut writer, "crypto");
        let storage = writer.finish();

        assert_eq!(storage.bool("toggle-crypto"), Some(true));
        assert_eq!(storage.number("toggle-crypto-trigger"), Some(10000.0));
    }
}
