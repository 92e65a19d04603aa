//! Domain keys: the identifiers of game entities settings are indexed by.
//!
//! Closed key sets are generated from a single table per entity kind, which maps
//! each variant to the identifier the game (and the legacy format) uses for it.

use std::fmt;
use std::str::FromStr;

use thiserror::Error;


/// Anything a [`DomainMap`][super::DomainMap] can be keyed by.
pub trait DomainKey: Ord + Clone + fmt::Display {
    /// Human-readable name of the entity kind, used in diagnostics.
    const KIND: &'static str;

    fn parse_key(id: &str) -> Result<Self, UnknownDomainKey>;
}

#[derive(Error, Debug, Clone, PartialEq, Eq)]
#[error("'{id}' is not a known {kind}")]
pub struct UnknownDomainKey {
    pub kind: &'static str,
    pub id: String,
}

/// Resources are keyed dynamically: the set mirrors whatever a loaded configuration
/// contains, so every identifier is accepted.
impl DomainKey for String {
    const KIND: &'static str = "resource";

    fn parse_key(id: &str) -> Result<Self, UnknownDomainKey> {
        Ok(id.to_string())
    }
}


macro_rules! domain_keys {
    (
        $(#[$meta:meta])*
        $name:ident ($kind:literal) {
            $($variant:ident => $id:literal),+ $(,)?
        }
    ) => {
        $(#[$meta])*
        #[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
        pub enum $name {
            $($variant),+
        }

        impl $name {
            pub const ALL: &'static [$name] = &[$($name::$variant),+];

            /// The identifier the game uses for this entity.
            pub const fn id(self) -> &'static str {
                match self {
                    $($name::$variant => $id),+
                }
            }
        }

        impl fmt::Display for $name {
            fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
                f.write_str(self.id())
            }
        }

        impl FromStr for $name {
            type Err = UnknownDomainKey;

            fn from_str(id: &str) -> Result<Self, Self::Err> {
                match id {
                    $($id => Ok($name::$variant),)+
                    _ => Err(UnknownDomainKey {
                        kind: $kind,
                        id: id.to_string(),
                    }),
                }
            }
        }

        impl DomainKey for $name {
            const KIND: &'static str = $kind;

            fn parse_key(id: &str) -> Result<Self, UnknownDomainKey> {
                id.parse()
            }
        }
    };
}


domain_keys! {
    Technology ("technology") {
        Acoustics => "acoustics",
        AdvExogeology => "advExogeology",
        Agriculture => "agriculture",
        Ai => "ai",
        Animal => "animal",
        Antimatter => "antimatter",
        Archeology => "archeology",
        Archery => "archery",
        Architecture => "architecture",
        ArtificialGravity => "artificialGravity",
        Astronomy => "astronomy",
        Biochemistry => "biochemistry",
        Biology => "biology",
        Blackchain => "blackchain",
        Brewery => "brewery",
        Calendar => "calendar",
        Chemistry => "chemistry",
        Chronophysics => "chronophysics",
        Civil => "civil",
        Combustion => "combustion",
        Construction => "construction",
        Cryptotheology => "cryptotheology",
        Currency => "currency",
        DimensionalPhysics => "dimensionalPhysics",
        Drama => "drama",
        Ecology => "ecology",
        Electricity => "electricity",
        Electronics => "electronics",
        Engineering => "engineering",
        Exogeology => "exogeology",
        Exogeophysics => "exogeophysics",
        Genetics => "genetics",
        Hydroponics => "hydroponics",
        Industrialization => "industrialization",
        Machinery => "machinery",
        Math => "math",
        Mechanization => "mechanization",
        Metal => "metal",
        Metalurgy => "metalurgy",
        Metaphysics => "metaphysics",
        Mining => "mining",
        Nanotechnology => "nanotechnology",
        Navigation => "navigation",
        NuclearFission => "nuclearFission",
        OilProcessing => "oilProcessing",
        OrbitalEngineering => "orbitalEngineering",
        ParadoxalKnowledge => "paradoxalKnowledge",
        ParticlePhysics => "particlePhysics",
        Philosophy => "philosophy",
        Physics => "physics",
        QuantumCryptography => "quantumCryptography",
        Robotics => "robotics",
        Rocketry => "rocketry",
        Sattelites => "sattelites",
        Steel => "steel",
        Superconductors => "superconductors",
        TachyonTheory => "tachyonTheory",
        Terraformation => "terraformation",
        Theology => "theology",
        Thorium => "thorium",
        VoidSpace => "voidSpace",
        Writing => "writing",
    }
}

domain_keys! {
    Policy ("policy") {
        Liberty => "liberty",
        Tradition => "tradition",
        Monarchy => "monarchy",
        Authocracy => "authocracy",
        Republic => "republic",
        Communism => "communism",
        Liberalism => "liberalism",
        Fascism => "fascism",
        Socialism => "socialism",
        Diplomacy => "diplomacy",
        Isolationism => "isolationism",
        KnowledgeSharing => "knowledgeSharing",
        CulturalExchange => "culturalExchange",
        ZebraRelationsAppeasement => "zebraRelationsAppeasement",
        ZebraRelationsBellicosity => "zebraRelationsBellicosity",
        CityOnAHill => "cityOnAHill",
        OuterSpaceTreaty => "outerSpaceTreaty",
        MilitarizeSpace => "militarizeSpace",
        Necrocracy => "necrocracy",
        RadicalXenophobia => "radicalXenophobia",
        Conservation => "conservation",
        OpenWoodlands => "openWoodlands",
        Environmentalism => "environmentalism",
        Rationality => "rationality",
        Mysticism => "mysticism",
        Sustainability => "sustainability",
        FullIndustrialization => "fullIndustrialization",
        Technocracy => "technocracy",
        Theocracy => "theocracy",
        Expansionism => "expansionism",
        Frugality => "frugality",
        Epicureanism => "epicureanism",
        Transkittenism => "transkittenism",
        Extravagance => "extravagance",
    }
}

domain_keys! {
    /// Workshop upgrades.
    Upgrade ("upgrade") {
        MineralHoes => "mineralHoes",
        IronHoes => "ironHoes",
        MineralAxes => "mineralAxes",
        IronAxes => "ironAxes",
        SteelAxe => "steelAxe",
        ReinforcedSaw => "reinforcedSaw",
        TitaniumSaw => "titaniumSaw",
        AlloySaw => "alloySaw",
        Ironwood => "ironwood",
        ConcreteHuts => "concreteHuts",
        UnobtainiumHuts => "unobtainiumHuts",
        EludiumHuts => "eludiumHuts",
        Silos => "silos",
        ExpandedBarns => "expandedBarns",
        ReinforcedBarns => "reinforcedBarns",
        ReinforcedWarehouses => "reinforcedWarehouses",
        TitaniumBarns => "titaniumBarns",
        AlloyBarns => "alloyBarns",
        ConcreteBarns => "concreteBarns",
        TitaniumWarehouses => "titaniumWarehouses",
        AlloyWarehouses => "alloyWarehouses",
        ConcreteWarehouses => "concreteWarehouses",
        StorageBunkers => "storageBunkers",
        EnergyRifts => "energyRifts",
        StasisChambers => "stasisChambers",
        VoidEnergy => "voidEnergy",
        DarkEnergy => "darkEnergy",
        TachyonAccelerators => "tachyonAccelerators",
        FluxCondensator => "fluxCondensator",
        Lhc => "lhc",
        Photovoltaic => "photovoltaic",
        ThinFilm => "thinFilm",
        Qdot => "qdot",
        SolarSatellites => "solarSatellites",
        CargoShips => "cargoShips",
        Barges => "barges",
        ReactorVessel => "reactorVessel",
        SpaceEngineers => "spaceEngineers",
        Chronoforge => "chronoforge",
        Astrolabe => "astrolabe",
    }
}

domain_keys! {
    SpaceBuilding ("space building") {
        ContainmentChamber => "containmentChamber",
        Cryostation => "cryostation",
        Entangler => "entangler",
        Heatsink => "heatsink",
        HrHarvester => "hrHarvester",
        Hydrofracturer => "hydrofracturer",
        Hydroponics => "hydroponics",
        MoltenCore => "moltenCore",
        MoonBase => "moonBase",
        MoonOutpost => "moonOutpost",
        OrbitalArray => "orbitalArray",
        PlanetCracker => "planetCracker",
        ResearchVessel => "researchVessel",
        Sattelite => "sattelite",
        SpaceBeacon => "spaceBeacon",
        SpaceElevator => "spaceElevator",
        SpaceStation => "spaceStation",
        SpiceRefinery => "spiceRefinery",
        Sunforge => "sunforge",
        Sunlifter => "sunlifter",
        Tectonic => "tectonic",
        TerraformingStation => "terraformingStation",
    }
}

domain_keys! {
    Mission ("space mission") {
        OrbitalLaunch => "orbitalLaunch",
        MoonMission => "moonMission",
        DuneMission => "duneMission",
        PiscineMission => "piscineMission",
        HeliosMission => "heliosMission",
        TerminusMission => "terminusMission",
        KairoMission => "kairoMission",
        RorschachMission => "rorschachMission",
        YarnMission => "yarnMission",
        UmbraMission => "umbraMission",
        CharonMission => "charonMission",
        CentaurusSystemMission => "centaurusSystemMission",
        FurthestRingMission => "furthestRingMission",
    }
}

domain_keys! {
    Race ("race") {
        Dragons => "dragons",
        Griffins => "griffins",
        Leviathans => "leviathans",
        Lizards => "lizards",
        Nagas => "nagas",
        Sharks => "sharks",
        Spiders => "spiders",
        Zebras => "zebras",
    }
}

domain_keys! {
    Season ("season") {
        Spring => "spring",
        Summer => "summer",
        Autumn => "autumn",
        Winter => "winter",
    }
}


impl Race {
    /// The resource that has to be in stock before a trade with this race is attempted.
    pub const fn trade_requirement(self) -> Option<&'static str> {
        match self {
            Race::Dragons => Some("titanium"),
            Race::Griffins => Some("wood"),
            Race::Leviathans => Some("unobtainium"),
            Race::Lizards => Some("minerals"),
            Race::Sharks => Some("iron"),
            Race::Nagas | Race::Spiders | Race::Zebras => None,
        }
    }
}


#[cfg(test)]
mod tests {
    use std::collections::HashSet;

    use super::*;

    fn assert_round_trips<K: DomainKey + Copy + fmt::Debug>(all: &[K]) {
        let mut seen = HashSet::new();
        for key in all {
            let id = key.to_string();
            assert!(seen.insert(id.clone()), "identifier '{id}' is used twice");
            assert_eq!(K::parse_key(&id).unwrap(), *key);
        }
    }

    #[test]
    fn identifiers_are_unique_and_parse_back() {
        assert_round_trips(Technology::ALL);
        assert_round_trips(Policy::ALL);
        assert_round_trips(Upgrade::ALL);
        assert_round_trips(SpaceBuilding::ALL);
        assert_round_trips(Mission::ALL);
        assert_round_trips(Race::ALL);
        assert_round_trips(Season::ALL);
    }

    #[test]
    fn unknown_identifier_names_its_kind() {
        let error = "wyverns".parse::<Race>().unwrap_err();
        assert_eq!(error.kind, "race");
        assert_eq!(error.to_string(), "'wyverns' is not a known race");
    }

    #[test]
    fn trade_requirements() {
        assert_eq!(Race::Dragons.trade_requirement(), Some("titanium"));
        assert_eq!(Race::Zebras.trade_requirement(), None);
    }
}
