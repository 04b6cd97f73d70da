//! Unit types and per-side rosters
//!
//! A roster is the full unit-type composition of one side. Combat stats are
//! fixed when a unit type is created; only counts change during a campaign.

use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};

/// The seven unit kinds fielded by both sides, in recruitment order
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum UnitKind {
    Infantry,
    MechanizedInfantry,
    Tank,
    Artillery,
    Missiles,
    Aircraft,
    Spies,
}

impl UnitKind {
    pub const COUNT: usize = 7;

    /// All kinds in recruitment-distribution order
    pub const ALL: [UnitKind; UnitKind::COUNT] = [
        UnitKind::Infantry,
        UnitKind::MechanizedInfantry,
        UnitKind::Tank,
        UnitKind::Artillery,
        UnitKind::Missiles,
        UnitKind::Aircraft,
        UnitKind::Spies,
    ];

    pub fn index(&self) -> usize {
        *self as usize
    }

    pub fn display_name(&self) -> &'static str {
        match self {
            Self::Infantry => "Infantry",
            Self::MechanizedInfantry => "Mechanized Infantry",
            Self::Tank => "Tank",
            Self::Artillery => "Artillery",
            Self::Missiles => "Missiles",
            Self::Aircraft => "Aircraft",
            Self::Spies => "Spies",
        }
    }

    /// Lowercase name used in narrative log lines
    pub fn log_name(&self) -> &'static str {
        match self {
            Self::Infantry => "infantry",
            Self::MechanizedInfantry => "mechanized infantry",
            Self::Tank => "tank",
            Self::Artillery => "artillery",
            Self::Missiles => "missiles",
            Self::Aircraft => "aircraft",
            Self::Spies => "spies",
        }
    }

    /// Heavy units that bog down on difficult, entangling or hemmed-in ground
    pub fn is_terrain_bound(&self) -> bool {
        matches!(self, Self::MechanizedInfantry | Self::Tank | Self::Artillery)
    }

    /// Kinds that answer this one, with the extra recruitment weight each gets
    pub fn counters(&self) -> &'static [(UnitKind, f32)] {
        match self {
            Self::Infantry => &[(Self::MechanizedInfantry, 0.1), (Self::Tank, 0.2)],
            Self::MechanizedInfantry => &[(Self::Infantry, 0.1), (Self::Artillery, 0.2)],
            Self::Tank => &[(Self::Infantry, 0.2), (Self::Artillery, 0.1)],
            Self::Artillery => &[(Self::Aircraft, 0.2), (Self::MechanizedInfantry, 0.1)],
            Self::Missiles => &[(Self::Aircraft, 0.2), (Self::Spies, 0.1)],
            Self::Aircraft => &[(Self::Missiles, 0.2), (Self::Artillery, 0.1)],
            Self::Spies => &[(Self::Infantry, 0.1), (Self::Aircraft, 0.2)],
        }
    }

    /// Reference stats for this kind
    pub fn default_profile(&self) -> UnitProfile {
        let caps = Capabilities::default();
        match self {
            Self::Infantry => UnitProfile::new(6.0, 5.0, 4.0, caps),
            Self::MechanizedInfantry => UnitProfile::new(8.0, 6.0, 6.0, caps),
            Self::Tank => UnitProfile::new(15.0, 12.0, 5.0, caps),
            Self::Artillery => UnitProfile::new(
                10.0,
                3.0,
                2.0,
                Capabilities {
                    indirect_fire: true,
                    ..caps
                },
            ),
            Self::Missiles => UnitProfile::new(
                20.0,
                1.0,
                8.0,
                Capabilities {
                    long_range: true,
                    ..caps
                },
            ),
            Self::Aircraft => UnitProfile::new(
                18.0,
                7.0,
                12.0,
                Capabilities {
                    air_superiority: true,
                    ..caps
                },
            ),
            Self::Spies => UnitProfile::new(
                0.0,
                1.0,
                6.0,
                Capabilities {
                    espionage: Some(9),
                    ..caps
                },
            ),
        }
    }
}

/// Special abilities of a unit type
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct Capabilities {
    pub indirect_fire: bool,
    pub long_range: bool,
    pub air_superiority: bool,
    /// Espionage rating, present only on intelligence units
    pub espionage: Option<u8>,
}

/// Fixed combat stats of a unit type
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct UnitProfile {
    pub attack: f32,
    pub defense: f32,
    pub speed: f32,
    #[serde(default)]
    pub capabilities: Capabilities,
}

impl UnitProfile {
    pub fn new(attack: f32, defense: f32, speed: f32, capabilities: Capabilities) -> Self {
        Self {
            attack,
            defense,
            speed,
            capabilities,
        }
    }

    pub fn is_valid(&self) -> bool {
        [self.attack, self.defense, self.speed]
            .iter()
            .all(|v| v.is_finite() && *v >= 0.0)
    }
}

/// One unit type within a roster: a count plus immutable stats
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct UnitType {
    name: String,
    kind: UnitKind,
    count: u32,
    profile: UnitProfile,
}

impl UnitType {
    pub fn new(kind: UnitKind, count: u32, profile: UnitProfile) -> Self {
        Self {
            name: kind.display_name().to_string(),
            kind,
            count,
            profile,
        }
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn kind(&self) -> UnitKind {
        self.kind
    }

    pub fn count(&self) -> u32 {
        self.count
    }

    pub fn profile(&self) -> &UnitProfile {
        &self.profile
    }

    pub fn attack(&self) -> f32 {
        self.profile.attack
    }

    pub fn capabilities(&self) -> &Capabilities {
        &self.profile.capabilities
    }
}

/// Ordered mapping of unit kind to unit type for one side
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
pub struct Roster {
    units: BTreeMap<UnitKind, UnitType>,
}

impl Roster {
    pub fn new() -> Self {
        Self::default()
    }

    /// Build a roster of all seven kinds with reference stats
    pub fn standard(counts: [u32; UnitKind::COUNT]) -> Self {
        let mut roster = Self::new();
        for kind in UnitKind::ALL {
            roster.insert(UnitType::new(kind, counts[kind.index()], kind.default_profile()));
        }
        roster
    }

    pub fn insert(&mut self, unit: UnitType) {
        self.units.insert(unit.kind, unit);
    }

    pub fn get(&self, kind: UnitKind) -> Option<&UnitType> {
        self.units.get(&kind)
    }

    pub fn iter(&self) -> impl Iterator<Item = &UnitType> {
        self.units.values()
    }

    /// Count for a kind, 0 if the roster does not field it
    pub fn count(&self, kind: UnitKind) -> u32 {
        self.units.get(&kind).map(|u| u.count).unwrap_or(0)
    }

    pub fn set_count(&mut self, kind: UnitKind, count: u32) {
        if let Some(unit) = self.units.get_mut(&kind) {
            unit.count = count;
        }
    }

    /// Add recruits to a kind the roster fields
    pub fn reinforce(&mut self, kind: UnitKind, amount: u32) {
        if let Some(unit) = self.units.get_mut(&kind) {
            unit.count = unit.count.saturating_add(amount);
        }
    }

    /// Remove up to `amount` units of a kind, returning how many were removed
    pub fn deplete(&mut self, kind: UnitKind, amount: u32) -> u32 {
        match self.units.get_mut(&kind) {
            Some(unit) => {
                let removed = amount.min(unit.count);
                unit.count -= removed;
                removed
            }
            None => 0,
        }
    }

    /// Sum of counts across all kinds
    pub fn total_strength(&self) -> u64 {
        self.units.values().map(|u| u64::from(u.count)).sum()
    }

    pub fn counts(&self) -> BTreeMap<UnitKind, u32> {
        self.units.iter().map(|(k, u)| (*k, u.count)).collect()
    }

    /// Share of the total held by each kind, in `UnitKind::ALL` order
    pub fn distribution(&self) -> [f32; UnitKind::COUNT] {
        let total = self.total_strength();
        let mut dist = [0.0; UnitKind::COUNT];
        if total == 0 {
            return dist;
        }
        for kind in UnitKind::ALL {
            dist[kind.index()] = (f64::from(self.count(kind)) / total as f64) as f32;
        }
        dist
    }

    /// Spread `losses` across unit kinds in proportion to their counts
    ///
    /// Each kind loses `floor(count * losses / total)`; counts never go below
    /// zero and losses at or above the total wipe the roster. Returns the
    /// number of units actually removed.
    pub fn apply_losses(&mut self, losses: u64) -> u64 {
        let total = self.total_strength();
        if total == 0 || losses == 0 {
            return 0;
        }

        let loss_ratio = (losses as f64 / total as f64).min(1.0);
        let mut removed = 0u64;
        for unit in self.units.values_mut() {
            let lost = ((f64::from(unit.count) * loss_ratio).floor() as u32).min(unit.count);
            unit.count -= lost;
            removed += u64::from(lost);
        }
        removed
    }
}
