//! Balancing data consumed by the world and its systems.
//!
//! Every structure falls back to its defaults field by field, so configuration
//! files only need to mention the values they override.

use serde::{Deserialize, Serialize};

use crate::{EnemyKind, PathQuery, TurretKind};

/// Complete configuration of a simulation session.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct SimulationSettings {
    /// Number of micro steps subdividing each tile edge.
    pub steps_per_tile: u32,
    /// Player parameters.
    pub player: PlayerProfile,
    /// Integrity of the base assembled from base-part tiles.
    pub base: BaseProfile,
    /// Search parameters used by enemy controllers.
    pub pathfinding: PathQuery,
    /// Enemy balancing data.
    pub enemies: EnemyRoster,
    /// Turret balancing data.
    pub turrets: TurretRoster,
}

impl Default for SimulationSettings {
    fn default() -> Self {
        Self {
            steps_per_tile: 8,
            player: PlayerProfile::default(),
            base: BaseProfile::default(),
            pathfinding: PathQuery::default(),
            enemies: EnemyRoster::default(),
            turrets: TurretRoster::default(),
        }
    }
}

/// Player parameters.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct PlayerProfile {
    /// Micro steps travelled per tick.
    pub speed: u32,
    /// Health at spawn.
    pub max_health: u32,
}

impl Default for PlayerProfile {
    fn default() -> Self {
        Self {
            speed: 4,
            max_health: 100,
        }
    }
}

/// Base parameters. Levels without base-part tiles ignore them.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct BaseProfile {
    /// Integrity when a level starts.
    pub max_health: u32,
}

impl Default for BaseProfile {
    fn default() -> Self {
        Self { max_health: 150 }
    }
}

/// Parameters of a single enemy kind.
#[derive(Clone, Copy, Debug, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct EnemyProfile {
    /// Micro steps travelled per tick.
    pub speed: u32,
    /// Health at spawn.
    pub max_health: u32,
    /// Distance in tiles from which the enemy starts attacking its goal.
    pub attack_range: f32,
    /// Damage dealt per attack.
    pub attack_damage: u32,
    /// Ticks between two attacks.
    pub attack_cooldown_ticks: u32,
    /// Ticks the death animation plays before the enemy is deactivated.
    pub death_ticks: u32,
}

impl Default for EnemyProfile {
    fn default() -> Self {
        Self {
            speed: 2,
            max_health: 30,
            attack_range: 1.5,
            attack_damage: 5,
            attack_cooldown_ticks: 10,
            death_ticks: 12,
        }
    }
}

/// Profiles for every [`EnemyKind`].
#[derive(Clone, Copy, Debug, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct EnemyRoster {
    /// Profile of [`EnemyKind::Crawler`].
    pub crawler: EnemyProfile,
    /// Profile of [`EnemyKind::Brute`].
    pub brute: EnemyProfile,
    /// Profile of [`EnemyKind::Stalker`].
    pub stalker: EnemyProfile,
}

impl EnemyRoster {
    /// Profile configured for the provided kind.
    #[must_use]
    pub const fn profile(&self, kind: EnemyKind) -> &EnemyProfile {
        match kind {
            EnemyKind::Crawler => &self.crawler,
            EnemyKind::Brute => &self.brute,
            EnemyKind::Stalker => &self.stalker,
        }
    }
}

impl Default for EnemyRoster {
    fn default() -> Self {
        Self {
            crawler: EnemyProfile {
                speed: 3,
                max_health: 20,
                ..EnemyProfile::default()
            },
            brute: EnemyProfile {
                speed: 1,
                max_health: 90,
                attack_damage: 15,
                attack_cooldown_ticks: 20,
                death_ticks: 20,
                ..EnemyProfile::default()
            },
            stalker: EnemyProfile {
                attack_range: 4.0,
                attack_damage: 3,
                ..EnemyProfile::default()
            },
        }
    }
}

/// Parameters of a single turret kind.
#[derive(Clone, Copy, Debug, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct TurretProfile {
    /// Targeting radius measured in tiles.
    pub range: f32,
    /// Damage dealt per shot.
    pub damage: u32,
    /// Ticks between two shots.
    pub cooldown_ticks: u32,
    /// Ticks a hit enemy stays frozen. Zero disables freezing.
    pub freeze_ticks: u32,
}

impl Default for TurretProfile {
    fn default() -> Self {
        Self {
            range: 4.0,
            damage: 5,
            cooldown_ticks: 6,
            freeze_ticks: 0,
        }
    }
}

/// Profiles for every [`TurretKind`].
#[derive(Clone, Copy, Debug, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct TurretRoster {
    /// Profile of [`TurretKind::Basic`].
    pub basic: TurretProfile,
    /// Profile of [`TurretKind::Frost`].
    pub frost: TurretProfile,
}

impl TurretRoster {
    /// Profile configured for the provided kind.
    #[must_use]
    pub const fn profile(&self, kind: TurretKind) -> &TurretProfile {
        match kind {
            TurretKind::Basic => &self.basic,
            TurretKind::Frost => &self.frost,
        }
    }
}

impl Default for TurretRoster {
    fn default() -> Self {
        Self {
            basic: TurretProfile::default(),
            frost: TurretProfile {
                range: 3.0,
                damage: 1,
                cooldown_ticks: 15,
                freeze_ticks: 8,
            },
        }
    }
}
