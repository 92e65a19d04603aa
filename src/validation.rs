//! Drift detection between the settings schema and the live game.
//!
//! The game adds and retires content between versions. Every section tracks a
//! fixed set of entity identifiers; comparing it against what the running game
//! reports surfaces entities that are not configurable yet and settings for
//! entities that no longer exist. Findings are warnings only. Nothing here
//! mutates settings or interrupts the caller.

use std::collections::HashSet;

use serde::{Deserialize, Serialize};
use tracing::warn;


/// The entity enumerations reported by the running game.
#[derive(Serialize, Deserialize, Debug, Clone, Default, PartialEq, Eq)]
#[serde(default, rename_all = "camelCase")]
pub struct GameEntities {
    pub techs: Vec<String>,
    pub policies: Vec<String>,
    pub upgrades: Vec<String>,
    pub missions: Vec<String>,
    pub space_buildings: Vec<String>,
    pub races: Vec<String>,
    pub resources: Vec<String>,
}


/// Receives human-readable drift warnings.
pub trait DriftSink {
    fn warn(&mut self, message: String);
}

/// Forwards drift warnings to `tracing`.
#[derive(Debug, Default, Clone, Copy)]
pub struct TracingDriftSink;

impl DriftSink for TracingDriftSink {
    fn warn(&mut self, message: String) {
        warn!("{message}");
    }
}

/// Collects warnings, e.g. to show them to the user in one go.
impl DriftSink for Vec<String> {
    fn warn(&mut self, message: String) {
        self.push(message);
    }
}


#[derive(Serialize, Debug, Clone, Default, PartialEq, Eq)]
pub struct DriftReport {
    /// Present in the game, but not tracked in the settings.
    pub missing_in_settings: Vec<String>,

    /// Tracked in the settings, but no longer present in the game.
    pub redundant_in_settings: Vec<String>,
}

impl DriftReport {
    pub fn is_clean(&self) -> bool {
        self.missing_in_settings.is_empty() && self.redundant_in_settings.is_empty()
    }

    /// Emits one warning per finding. `noun` names the entity kind ("technology").
    pub fn emit(&self, noun: &str, sink: &mut dyn DriftSink) {
        for id in &self.missing_in_settings {
            sink.warn(format!("The {noun} '{id}' is not tracked in Kitten Scientists!"));
        }
        for id in &self.redundant_in_settings {
            sink.warn(format!("The {noun} '{id}' is not a {noun} in Kitten Game!"));
        }
    }
}


/// Two-way set difference between the `live` and `tracked` identifiers.
///
/// Both result lists keep the order of the sequence they were taken from.
pub fn validate<L, T>(live: L, tracked: T) -> DriftReport
where
    L: IntoIterator,
    L::Item: AsRef<str>,
    T: IntoIterator,
    T::Item: AsRef<str>,
{
    let live: Vec<String> = live.into_iter().map(|id| id.as_ref().to_string()).collect();
    let tracked: Vec<String> = tracked.into_iter().map(|id| id.as_ref().to_string()).collect();

    let live_set: HashSet<&str> = live.iter().map(String::as_str).collect();
    let tracked_set: HashSet<&str> = tracked.iter().map(String::as_str).collect();

    let missing_in_settings = live
        .iter()
        .filter(|id| !tracked_set.contains(id.as_str()))
        .cloned()
        .collect();
    let redundant_in_settings = tracked
        .iter()
        .filter(|id| !live_set.contains(id.as_str()))
        .cloned()
        .collect();

    DriftReport {
        missing_in_settings,
        redundant_in_settings,
    }
}


#[derive(Serialize, Debug, Clone, PartialEq, Eq)]
pub struct SectionDrift {
    pub section: &'static str,
    pub report: DriftReport,
}

/// Drift findings of a whole settings tree, one entry per validated collection.
#[derive(Serialize, Debug, Clone, Default, PartialEq, Eq)]
pub struct DriftSummary {
    pub sections: Vec<SectionDrift>,
}

impl DriftSummary {
    pub fn push(&mut self, section: &'static str, report: DriftReport) {
        self.sections.push(SectionDrift { section, report });
    }

    pub fn is_clean(&self) -> bool {
        self.sections.iter().all(|entry| entry.report.is_clean())
    }

    pub fn finding_count(&self) -> usize {
        self.sections
            .iter()
            .map(|entry| {
                entry.report.missing_in_settings.len() + entry.report.redundant_in_settings.len()
            })
            .sum()
    }

    pub fn section(&self, section: &str) -> Option<&DriftReport> {
        self.sections
            .iter()
            .find(|entry| entry.section == section)
            .map(|entry| &entry.report)
    }
}


#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn reports_both_directions() {
        let report = validate(["a", "b", "c"], ["b", "c", "d"]);

        assert_eq!(report.missing_in_settings, vec!["a"]);
        assert_eq!(report.redundant_in_settings, vec!["d"]);
        assert!(!report.is_clean());
    }

    #[test]
    fn identical_sets_are_clean() {
        let report = validate(vec!["x".to_string(), "y".to_string()], ["y", "x"]);
        assert!(report.is_clean());
    }

    #[test]
    fn keeps_source_order() {
        let report = validate(["z", "b", "y", "a"], ["b"]);
        assert_eq!(report.missing_in_settings, vec!["z", "y", "a"]);
    }

    #[test]
    fn emits_one_warning_per_finding() {
        let report = validate(["a", "b", "c"], ["b", "c", "d"]);
        let mut warnings = Vec::new();

        report.emit("technology", &mut warnings);

        assert_eq!(
            warnings,
            vec![
                "The technology 'a' is not tracked in Kitten Scientists!".to_string(),
                "The technology 'd' is not a technology in Kitten Game!".to_string(),
            ]
        );
    }

    #[test]
    fn game_entities_accept_partial_json() {
        let game: GameEntities =
            serde_json::from_str(r#"{ "techs": ["calendar"], "spaceBuildings": ["moonBase"] }"#)
                .unwrap();

        assert_eq!(game.techs, vec!["calendar"]);
        assert_eq!(game.space_buildings, vec!["moonBase"]);
        assert!(game.races.is_empty());
    }

    #[test]
    fn summary_counts_findings() {
        let mut summary = DriftSummary::default();
        summary.push("techs", validate(["a", "b"], ["b", "c"]));
        summary.push("races", validate(["dragons"], ["dragons"]));

        assert_eq!(summary.finding_count(), 2);
        assert!(!summary.is_clean());
        assert!(summary.section("races").unwrap().is_clean());
        assert!(summary.section("missions").is_none());
    }
}
