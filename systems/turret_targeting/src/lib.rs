#![deny(
    unsafe_code,
    missing_docs,
    dead_code,
    unused_results,
    non_snake_case,
    unreachable_pub
)]

//! Pure system that picks the nearest living enemy for every ready turret.

use bastion_core::{
    CellCoord, Command, EnemyId, EnemyState, EnemyView, Event, TurretId, TurretView,
};

/// Turret targeting system that reuses scratch buffers to avoid repeated allocations.
#[derive(Debug, Default)]
pub struct TurretTargeting {
    turret_workspace: Vec<TurretCandidate>,
    enemy_workspace: Vec<EnemyCandidate>,
}

impl TurretTargeting {
    /// Creates a new turret targeting system with empty scratch buffers.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Emits one [`Command::FireTurret`] per ready turret that has a living
    /// enemy within range.
    ///
    /// Targets are re-resolved on every [`Event::TimeAdvanced`]; no enemy
    /// reference survives between ticks. Equidistant enemies are ordered by
    /// identifier.
    pub fn handle(
        &mut self,
        events: &[Event],
        turrets: &TurretView,
        enemies: &EnemyView,
        out: &mut Vec<Command>,
    ) {
        if !events
            .iter()
            .any(|event| matches!(event, Event::TimeAdvanced { .. }))
        {
            return;
        }

        self.prepare_turret_workspace(turrets);
        if self.turret_workspace.is_empty() {
            return;
        }

        self.prepare_enemy_workspace(enemies);
        if self.enemy_workspace.is_empty() {
            return;
        }

        for turret in &self.turret_workspace {
            let mut best: Option<(i64, EnemyId)> = None;

            for candidate in &self.enemy_workspace {
                let distance_sq = distance_squared(turret.cell, candidate.cell);
                if distance_sq as f32 > turret.range_sq {
                    continue;
                }

                let current = (distance_sq, candidate.id);
                if best.map_or(true, |existing| current < existing) {
                    best = Some(current);
                }
            }

            if let Some((_, enemy)) = best {
                out.push(Command::FireTurret {
                    turret: turret.id,
                    enemy,
                });
            }
        }
    }

    fn prepare_turret_workspace(&mut self, turrets: &TurretView) {
        self.turret_workspace.clear();
        self.turret_workspace.extend(
            turrets
                .iter()
                .filter(|turret| turret.ready && turret.range >= 0.0)
                .map(|turret| TurretCandidate {
                    id: turret.id,
                    cell: turret.cell,
                    range_sq: turret.range * turret.range,
                }),
        );
    }

    fn prepare_enemy_workspace(&mut self, enemies: &EnemyView) {
        self.enemy_workspace.clear();
        self.enemy_workspace.extend(
            enemies
                .iter()
                .filter(|enemy| enemy.state != EnemyState::Dead)
                .map(|enemy| EnemyCandidate {
                    id: enemy.id,
                    cell: enemy.cell,
                }),
        );
    }
}

#[derive(Clone, Copy, Debug)]
struct TurretCandidate {
    id: TurretId,
    cell: CellCoord,
    range_sq: f32,
}

#[derive(Clone, Copy, Debug)]
struct EnemyCandidate {
    id: EnemyId,
    cell: CellCoord,
}

fn distance_squared(a: CellCoord, b: CellCoord) -> i64 {
    let dx = i64::from(a.column()) - i64::from(b.column());
    let dy = i64::from(a.row()) - i64::from(b.row());
    dx * dx + dy * dy
}

#[cfg(test)]
mod tests {
    use super::*;
    use bastion_core::{EnemyKind, EnemySnapshot, TurretKind, TurretSnapshot};

    fn enemy(id: u32, cell: CellCoord, state: EnemyState) -> EnemySnapshot {
        EnemySnapshot {
            id: EnemyId::new(id),
            kind: EnemyKind::Brute,
            cell,
            state,
            health: 10,
            attack_range: 1.5,
        }
    }

    fn turret(id: u32, cell: CellCoord, range: f32, ready: bool) -> TurretSnapshot {
        TurretSnapshot {
            id: TurretId::new(id),
            kind: TurretKind::Basic,
            cell,
            range,
            ready,
        }
    }

    fn tick() -> Vec<Event> {
        vec![Event::TimeAdvanced { tick: 7 }]
    }

    #[test]
    fn nearest_enemy_wins_and_ties_resolve_by_id() {
        let mut targeting = TurretTargeting::new();
        let turrets = TurretView::from_snapshots(vec![turret(0, CellCoord::new(2, 2), 3.0, true)]);
        let enemies = EnemyView::from_snapshots(vec![
            enemy(5, CellCoord::new(2, 0), EnemyState::Moving),
            enemy(4, CellCoord::new(4, 2), EnemyState::Moving),
            enemy(9, CellCoord::new(5, 5), EnemyState::Moving),
        ]);
        let mut out = Vec::new();

        targeting.handle(&tick(), &turrets, &enemies, &mut out);

        assert_eq!(
            out,
            vec![Command::FireTurret {
                turret: TurretId::new(0),
                enemy: EnemyId::new(4),
            }]
        );
    }

    #[test]
    fn dead_enemies_and_cooling_turrets_are_ignored() {
        let mut targeting = TurretTargeting::new();
        let turrets = TurretView::from_snapshots(vec![
            turret(0, CellCoord::new(0, 0), 5.0, true),
            turret(1, CellCoord::new(1, 0), 5.0, false),
        ]);
        let enemies = EnemyView::from_snapshots(vec![
            enemy(0, CellCoord::new(0, 1), EnemyState::Dead),
            enemy(1, CellCoord::new(0, 3), EnemyState::Frozen),
        ]);
        let mut out = Vec::new();

        targeting.handle(&tick(), &turrets, &enemies, &mut out);

        assert_eq!(
            out,
            vec![Command::FireTurret {
                turret: TurretId::new(0),
                enemy: EnemyId::new(1),
            }]
        );
    }

    #[test]
    fn range_boundary_is_inclusive() {
        let mut targeting = TurretTargeting::new();
        let turrets = TurretView::from_snapshots(vec![turret(0, CellCoord::new(0, 0), 5.0, true)]);
        let reachable = EnemyView::from_snapshots(vec![enemy(0, CellCoord::new(3, 4), EnemyState::Moving)]);
        let distant = EnemyView::from_snapshots(vec![enemy(0, CellCoord::new(4, 4), EnemyState::Moving)]);
        let mut out = Vec::new();

        targeting.handle(&tick(), &turrets, &reachable, &mut out);
        assert_eq!(out.len(), 1);

        out.clear();
        targeting.handle(&tick(), &turrets, &distant, &mut out);
        assert!(out.is_empty());
    }

    #[test]
    fn batches_without_time_advancing_are_ignored() {
        let mut targeting = TurretTargeting::new();
        let turrets = TurretView::from_snapshots(vec![turret(0, CellCoord::new(0, 0), 5.0, true)]);
        let enemies = EnemyView::from_snapshots(vec![enemy(0, CellCoord::new(1, 1), EnemyState::Moving)]);
        let mut out = Vec::new();

        targeting.handle(&[], &turrets, &enemies, &mut out);

        assert!(out.is_empty());
    }
}
