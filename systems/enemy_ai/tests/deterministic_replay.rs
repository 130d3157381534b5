use std::{
    collections::hash_map::DefaultHasher,
    hash::{Hash, Hasher},
};

use bastion_core::{
    CellCoord, Command, EnemyKind, Event, GridDimensions, SimulationSettings, TurretKind,
};
use bastion_system_enemy_ai::EnemyAi;
use bastion_system_turret_targeting::TurretTargeting;
use bastion_world::{self as world, query, Level, World};

const ARENA: &str = "\
0,0,0,0,0,0,0,0
0,101,101,0,0,101,101,0
0,0,0,0,0,0,0,0
0,0,140,0,200,0,0,0
0,0,0,0,0,0,0,0
101,101,0,101,101,0,101,101
0,0,0,0,0,0,0,0
0,0,0,0,0,0,0,0
";

#[test]
fn deterministic_replay_produces_identical_event_streams() {
    let first = replay();
    let second = replay();

    assert_eq!(first.events, second.events, "replay diverged between runs");
    assert_eq!(first.fingerprint(), second.fingerprint());

    let fired = first
        .events
        .iter()
        .filter(|event| matches!(event, Event::TurretFired { .. }))
        .count();
    assert!(fired > 0, "turrets never engaged");

    let moved = first
        .events
        .iter()
        .filter(|event| matches!(event, Event::EnemyMoved { .. }))
        .count();
    assert!(moved > 0, "enemies never advanced");
}

#[derive(Debug)]
struct ReplayOutcome {
    events: Vec<Event>,
}

impl ReplayOutcome {
    fn fingerprint(&self) -> u64 {
        let mut hasher = DefaultHasher::new();
        for event in &self.events {
            format!("{event:?}").hash(&mut hasher);
        }
        hasher.finish()
    }
}

fn replay() -> ReplayOutcome {
    let level = Level::from_csv_sources(GridDimensions::new(8, 8), &[ARENA]).expect("arena loads");
    let mut world = World::new(level, SimulationSettings::default());
    let mut ai = EnemyAi::new();
    let mut targeting = TurretTargeting::new();
    let mut events = Vec::new();

    for command in scripted_commands() {
        world::apply(&mut world, command, &mut events);
    }

    for _ in 0..150 {
        let mut generated = Vec::new();
        world::apply(&mut world, Command::Tick, &mut generated);

        let enemies = query::enemy_view(&world);
        let turrets = query::turret_view(&world);
        let goal = Some(query::goal(&world));
        let pathfinding = query::settings(&world).pathfinding;
        let grid = query::tile_grid(&world);
        let mut commands = Vec::new();
        ai.handle(
            &generated,
            &enemies,
            goal,
            grid.dimensions(),
            &pathfinding,
            |cell| grid.is_blocked(cell),
            &mut commands,
        );
        targeting.handle(&generated, &turrets, &enemies, &mut commands);

        for command in commands {
            world::apply(&mut world, command, &mut generated);
        }
        events.extend(generated);
    }

    ReplayOutcome { events }
}

fn scripted_commands() -> Vec<Command> {
    vec![
        Command::PlaceTurret {
            kind: TurretKind::Basic,
            cell: CellCoord::new(3, 4),
        },
        Command::PlaceTurret {
            kind: TurretKind::Frost,
            cell: CellCoord::new(5, 2),
        },
        Command::SpawnEnemy {
            kind: EnemyKind::Crawler,
            cell: CellCoord::new(0, 0),
        },
        Command::SpawnEnemy {
            kind: EnemyKind::Brute,
            cell: CellCoord::new(7, 7),
        },
        Command::SpawnEnemy {
            kind: EnemyKind::Stalker,
            cell: CellCoord::new(2, 7),
        },
    ]
}
