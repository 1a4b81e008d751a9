use glam::Vec2;
use rand::SeedableRng;
use rochambeau::constants::FIXED_TIMESTEP;
use rochambeau::{
    Agent, Boundary, Kind, MotionModel, PassPolicy, PopulationSpec, Resolution, SimRng,
    SimulationConfig, World,
};

fn crowded_scatter(total: usize, seed: u64) -> SimulationConfig {
    SimulationConfig {
        population: PopulationSpec::Fractions {
            total,
            fractions: [0.33, 0.33, 0.34],
        },
        interaction_radius: 0.05,
        max_steps: None,
        ..SimulationConfig::scatter().with_seed(seed)
    }
}

#[test]
fn conversion_keeps_population_size() {
    let mut world = World::new(SimulationConfig::arena().with_seed(21)).unwrap();
    let total = world.agents().len();
    for _ in 0..600 {
        world.update(FIXED_TIMESTEP);
        assert_eq!(world.counts().total(), total);
        assert_eq!(world.active_count(), total);
    }
}

#[test]
fn elimination_never_revives() {
    let mut world = World::new(crowded_scatter(120, 3)).unwrap();
    let mut previous = world.active_count();
    for _ in 0..400 {
        world.update(FIXED_TIMESTEP);
        let active = world.active_count();
        assert!(active <= previous, "active went from {previous} to {active}");
        assert_eq!(world.counts().total(), active);
        assert_eq!(world.agents().len(), 120);
        previous = active;
    }
}

#[test]
fn resolution_is_monotonic_within_a_run() {
    let mut world = World::new(crowded_scatter(45, 8)).unwrap();
    let mut seen_resolved = world.is_resolved();
    for _ in 0..3000 {
        world.update(FIXED_TIMESTEP);
        let resolved = world.is_resolved();
        assert!(resolved || !seen_resolved);
        seen_resolved = resolved;
    }
}

#[test]
fn wrapped_walkers_stay_in_the_box() {
    let config = SimulationConfig {
        motion: MotionModel::RandomWalk { step_size: 0.3 },
        interaction_radius: 0.0,
        ..crowded_scatter(50, 17)
    };
    let mut world = World::new(config).unwrap();
    for _ in 0..200 {
        world.update(FIXED_TIMESTEP);
        for agent in world.agents() {
            assert!((0.0..1.0).contains(&agent.position.x), "{:?}", agent.position);
            assert!((0.0..1.0).contains(&agent.position.y), "{:?}", agent.position);
        }
    }
}

#[test]
fn wrap_reappears_on_the_opposite_edge() {
    let arena = Vec2::splat(1.0);
    let mut agent = Agent::new(Kind::Rock, Vec2::new(0.98, 0.5), 0.01);
    agent.position.x += 0.05;
    agent.confine(arena, Boundary::Wrap, 0.0);
    assert!((agent.position.x - 0.03).abs() < 1e-5, "{:?}", agent.position);
    assert_eq!(agent.position.y, 0.5);

    let mut clamped = Agent::new(Kind::Rock, Vec2::new(0.98, 0.5), 0.01);
    clamped.position.x += 0.05;
    clamped.confine(arena, Boundary::Clamp, 0.0);
    assert_eq!(clamped.position.x, 1.0);
}

#[test]
fn clamped_walkers_never_leave_the_box() {
    let config = SimulationConfig {
        boundary: Boundary::Clamp,
        motion: MotionModel::RandomWalk { step_size: 0.2 },
        ..crowded_scatter(50, 4)
    };
    let mut world = World::new(config).unwrap();
    for _ in 0..200 {
        world.update(FIXED_TIMESTEP);
        for agent in world.agents() {
            assert!((0.0..=1.0).contains(&agent.position.x));
            assert!((0.0..=1.0).contains(&agent.position.y));
        }
    }
}

#[test]
fn bouncing_agents_stay_inside_the_walls() {
    let mut world = World::new(SimulationConfig::arena().with_seed(99)).unwrap();
    for _ in 0..900 {
        world.update(FIXED_TIMESTEP);
        for agent in world.agents() {
            let p = agent.position;
            assert!((14.0..=786.0).contains(&p.x), "{p:?}");
            assert!((14.0..=586.0).contains(&p.y), "{p:?}");
            let speed = agent.velocity.length();
            assert!((59.9..=160.1).contains(&speed), "speed {speed}");
        }
    }
}

#[test]
fn triangle_in_contact_collapses_along_beats() {
    let config = SimulationConfig {
        population: PopulationSpec::Counts([0; 3]),
        interaction_radius: 0.2,
        ..SimulationConfig::scatter()
    };
    let agents = vec![
        Agent::new(Kind::Rock, Vec2::new(0.50, 0.50), 0.01),
        Agent::new(Kind::Paper, Vec2::new(0.52, 0.50), 0.01),
        Agent::new(Kind::Scissors, Vec2::new(0.51, 0.52), 0.01),
    ];
    let mut world = World::from_agents(config, agents, SimRng::seed_from_u64(42)).unwrap();
    world.update(FIXED_TIMESTEP);

    // Pairs run (0,1), (0,2), (1,2): Paper takes Rock, then Scissors takes Paper.
    let alive: Vec<bool> = world.agents().iter().map(|a| a.alive).collect();
    assert_eq!(alive, vec![false, false, true]);
    assert_eq!(world.fights_last_step(), 2);
    assert_eq!(world.winner(), Some(Kind::Scissors));
    let kinds: Vec<Kind> = world.agents().iter().map(|a| a.kind).collect();
    assert_eq!(kinds, vec![Kind::Rock, Kind::Paper, Kind::Scissors]);
}

#[test]
fn deferred_triangle_rotates_every_kind() {
    let config = SimulationConfig {
        arena_size: Vec2::splat(100.0),
        agent_radius: 5.0,
        interaction_radius: 10.0,
        population: PopulationSpec::Counts([0; 3]),
        motion: MotionModel::RandomWalk { step_size: 0.0 },
        boundary: Boundary::Clamp,
        resolution: Resolution::Conversion,
        pass_policy: PassPolicy::Deferred,
        cooldown_secs: 0.0,
        separation_padding: 0.0,
        seed: None,
        max_steps: None,
    };
    let agents = Kind::ALL
        .into_iter()
        .map(|k| Agent::new(k, Vec2::new(50.0, 50.0), 5.0))
        .collect();
    let mut world = World::from_agents(config, agents, SimRng::seed_from_u64(0)).unwrap();
    world.update(FIXED_TIMESTEP);

    let kinds: Vec<Kind> = world.agents().iter().map(|a| a.kind).collect();
    assert_eq!(kinds, vec![Kind::Paper, Kind::Scissors, Kind::Rock]);
    for (before, after) in Kind::ALL.into_iter().zip(kinds) {
        assert!(after.beats(before));
    }
}

#[test]
fn three_hundred_agents_split_proportionally() {
    let world = World::new(crowded_scatter(300, 1)).unwrap();
    let counts = world.counts();
    assert_eq!(counts[Kind::Rock], 99);
    assert_eq!(counts[Kind::Paper], 99);
    assert_eq!(counts[Kind::Scissors], 102);
    assert_eq!(counts.total(), 300);
}

#[test]
fn same_seed_same_trajectory() {
    let mut a = World::new(SimulationConfig::arena().with_seed(1234)).unwrap();
    let mut b = World::new(SimulationConfig::arena().with_seed(1234)).unwrap();
    for _ in 0..240 {
        a.update(FIXED_TIMESTEP);
        b.update(FIXED_TIMESTEP);
    }
    assert!(a.snapshot().eq(b.snapshot()));
    assert_eq!(a.counts(), b.counts());
}
