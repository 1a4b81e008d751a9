// --- File: world.rs ---
use crate::agent::{Agent, Kind, Verdict};
use crate::config::{
    Boundary, ConfigError, MotionModel, PassPolicy, PopulationSpec, Resolution, SimulationConfig,
};
use crate::geometry::{displacement, in_contact};
use glam::Vec2;
use rand::rngs::StdRng;
use rand::seq::SliceRandom;
use rand::{Rng, SeedableRng};
use std::f32::consts::TAU;
use std::ops::Index;

pub type SimRng = StdRng;

/// Per-kind tally of active agents, indexed by [`Kind`].
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct KindCounts([usize; 3]);

impl KindCounts {
    pub fn from_array(counts: [usize; 3]) -> Self {
        Self(counts)
    }

    pub fn get(&self, kind: Kind) -> usize {
        self.0[kind.index()]
    }

    pub fn total(&self) -> usize {
        self.0.iter().sum()
    }

    /// Number of kinds with at least one active agent.
    pub fn distinct(&self) -> usize {
        self.0.iter().filter(|c| **c > 0).count()
    }

    /// First kind (in Rock, Paper, Scissors order) with a nonzero count.
    pub fn first_present(&self) -> Option<Kind> {
        Kind::ALL.into_iter().find(|k| self.get(*k) > 0)
    }

    pub fn iter(&self) -> impl Iterator<Item = (Kind, usize)> + '_ {
        Kind::ALL.into_iter().map(move |k| (k, self.get(k)))
    }

    pub fn as_array(&self) -> [usize; 3] {
        self.0
    }
}

impl Index<Kind> for KindCounts {
    type Output = usize;

    fn index(&self, kind: Kind) -> &usize {
        &self.0[kind.index()]
    }
}

/// Read-only view of one agent for the presentation layer.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct AgentView {
    pub position: Vec2,
    pub kind: Kind,
    pub alive: bool,
}

/// Splits `total` across the three kinds by rounding each fraction (ties to
/// even), capping each share at `total`. A shortfall is added to the first
/// kind; an excess is taken from the first kinds that still have agents.
pub fn allocate_counts(total: usize, fractions: [f64; 3]) -> [usize; 3] {
    let cap = total as f64;
    let mut counts = fractions.map(|f| (f.max(0.0) * cap).round_ties_even().min(cap) as usize);
    let sum: usize = counts.iter().sum();
    if sum < total {
        counts[0] += total - sum;
    } else if sum > total {
        let mut excess = sum - total;
        for count in counts.iter_mut() {
            let taken = excess.min(*count);
            *count -= taken;
            excess -= taken;
            if excess == 0 {
                break;
            }
        }
    }
    counts
}

pub struct World {
    agents: Vec<Agent>,
    config: SimulationConfig,
    rng: SimRng,
    step_count: u64,
    time: f32,
    fights_last_step: usize,
    // Reused between passes; slot i holds the kind agent i converts to
    pending_conversions: Vec<Option<Kind>>,
}

impl World {
    /// Builds a populated world, seeding from `config.seed` or from entropy.
    pub fn new(config: SimulationConfig) -> Result<Self, ConfigError> {
        let rng = match config.seed {
            Some(seed) => SimRng::seed_from_u64(seed),
            None => SimRng::from_entropy(),
        };
        Self::with_rng(config, rng)
    }

    /// Builds a populated world drawing all randomness from `rng`.
    pub fn with_rng(config: SimulationConfig, rng: SimRng) -> Result<Self, ConfigError> {
        config.validate()?;
        let mut world = Self::empty(config, rng);
        world.populate();
        Ok(world)
    }

    /// Builds a world around a caller-placed population, bypassing the
    /// configured distribution. Used for hand-built scenarios.
    pub fn from_agents(
        config: SimulationConfig,
        agents: Vec<Agent>,
        rng: SimRng,
    ) -> Result<Self, ConfigError> {
        config.validate()?;
        let mut world = Self::empty(config, rng);
        world.agents = agents;
        Ok(world)
    }

    fn empty(config: SimulationConfig, rng: SimRng) -> Self {
        Self {
            agents: Vec::new(),
            config,
            rng,
            step_count: 0,
            time: 0.0,
            fights_last_step: 0,
            pending_conversions: Vec::new(),
        }
    }

    fn populate(&mut self) {
        let counts = match &self.config.population {
            PopulationSpec::Fractions { total, fractions } => {
                let counts = allocate_counts(*total, *fractions);
                let raw: f64 = fractions.iter().sum();
                if *total > 0 && (raw - 1.0).abs() > 1e-6 {
                    log::warn!(
                        "population fractions {:?} sum to {:.3}; allocated {:?} to reach {}",
                        fractions,
                        raw,
                        counts,
                        total
                    );
                }
                counts
            }
            PopulationSpec::Counts(counts) => *counts,
        };

        let mut kinds: Vec<Kind> = Kind::ALL
            .into_iter()
            .zip(counts)
            .flat_map(|(kind, count)| std::iter::repeat_n(kind, count))
            .collect();
        kinds.shuffle(&mut self.rng);

        let size = self.config.arena_size;
        let radius = self.config.agent_radius;
        let motion = self.config.motion;
        let margin = if motion.is_physical() { radius } else { 0.0 };

        self.agents.clear();
        self.agents.reserve(kinds.len());
        for kind in kinds {
            let position = Vec2::new(
                sample_axis(&mut self.rng, margin, size.x - margin),
                sample_axis(&mut self.rng, margin, size.y - margin),
            );
            let velocity = match motion {
                MotionModel::RandomWalk { .. } => Vec2::ZERO,
                MotionModel::Physical {
                    min_speed,
                    max_speed,
                    ..
                } => {
                    let angle = self.rng.gen_range(0.0..TAU);
                    Vec2::from_angle(angle) * sample_axis(&mut self.rng, min_speed, max_speed)
                }
            };
            self.agents
                .push(Agent::new(kind, position, radius).with_velocity(velocity));
        }

        log::info!(
            "Populated {} agents (R: {}, P: {}, S: {})",
            self.agents.len(),
            counts[0],
            counts[1],
            counts[2]
        );
    }

    /// Rebuilds the population from the configuration with fresh draws from
    /// the same random stream, and rewinds the step counter and clock.
    pub fn reset(&mut self) {
        self.step_count = 0;
        self.time = 0.0;
        self.fights_last_step = 0;
        self.populate();
    }

    /// One tick: move every agent, then run the pairwise interaction pass.
    pub fn update(&mut self, dt: f32) {
        self.step_count += 1;
        self.time += dt;
        self.move_agents(dt);
        self.fights_last_step = self.resolve_interactions();
        if self.fights_last_step > 0 {
            log::debug!(
                "step {}: {} fights resolved",
                self.step_count,
                self.fights_last_step
            );
        }
    }

    fn move_agents(&mut self, dt: f32) {
        let arena = self.config.arena_size;
        let boundary = self.config.boundary;
        match self.config.motion {
            MotionModel::RandomWalk { step_size } => {
                for agent in self.agents.iter_mut() {
                    agent.walk(&mut self.rng, arena, step_size, boundary);
                }
            }
            MotionModel::Physical {
                min_speed,
                max_speed,
                jitter,
            } => {
                for agent in self.agents.iter_mut() {
                    agent.drift(
                        &mut self.rng,
                        arena,
                        min_speed,
                        max_speed,
                        jitter,
                        boundary,
                        dt,
                    );
                }
            }
        }
    }

    /// Brute-force pass over every unordered pair `(i, j)`, `i < j`, in
    /// collection order. Returns the number of fights resolved.
    fn resolve_interactions(&mut self) -> usize {
        let n = self.agents.len();
        if n < 2 {
            return 0;
        }

        let arena = self.config.arena_size;
        let boundary = self.config.boundary;
        let wrap = boundary == Boundary::Wrap;
        let reach = self.config.interaction_radius;
        let cooldown = self.config.cooldown_secs;
        let padding = self.config.separation_padding;
        let resolution = self.config.resolution;
        let deferred = self.config.pass_policy == PassPolicy::Deferred;
        let inset = if self.config.motion.is_physical() {
            self.config.agent_radius
        } else {
            0.0
        };
        let now = self.time;

        if deferred {
            self.pending_conversions.clear();
            self.pending_conversions.resize(n, None);
        }

        let mut fights = 0;
        for i in 0..n {
            for j in (i + 1)..n {
                let (a, b) = pair_mut(&mut self.agents, i, j);
                if !(a.alive && b.alive) || a.kind == b.kind {
                    continue;
                }
                let delta = displacement(a.position, b.position, arena, wrap);
                if !in_contact(delta, reach) {
                    continue;
                }
                if !(a.is_ready(now, cooldown) && b.is_ready(now, cooldown)) {
                    continue;
                }

                let (winner_kind, loser_index) = match Verdict::judge(a.kind, b.kind) {
                    Verdict::FirstWins => (a.kind, j),
                    Verdict::SecondWins => (b.kind, i),
                    Verdict::Tie => continue,
                };
                let loser = if loser_index == i { &mut *a } else { &mut *b };
                match resolution {
                    Resolution::Elimination => loser.alive = false,
                    Resolution::Conversion if deferred => {
                        self.pending_conversions[loser_index] = Some(winner_kind);
                    }
                    Resolution::Conversion => loser.kind = winner_kind,
                }
                a.stamp(now);
                b.stamp(now);
                if resolution == Resolution::Conversion {
                    Agent::separate(a, b, delta, reach, padding);
                    a.confine(arena, boundary, inset);
                    b.confine(arena, boundary, inset);
                }
                fights += 1;
            }
        }

        if deferred {
            for (agent, pending) in self.agents.iter_mut().zip(self.pending_conversions.iter_mut()) {
                if let Some(kind) = pending.take() {
                    agent.kind = kind;
                }
            }
        }
        fights
    }

    pub fn counts(&self) -> KindCounts {
        let mut counts = [0usize; 3];
        for agent in self.agents.iter().filter(|a| a.alive) {
            counts[agent.kind.index()] += 1;
        }
        KindCounts(counts)
    }

    /// At most one kind left among active agents. An empty world is resolved.
    pub fn is_resolved(&self) -> bool {
        self.counts().distinct() <= 1
    }

    /// The surviving kind once resolved; `None` while contested or empty.
    pub fn winner(&self) -> Option<Kind> {
        let counts = self.counts();
        if counts.distinct() == 1 {
            counts.first_present()
        } else {
            None
        }
    }

    pub fn active_count(&self) -> usize {
        self.agents.iter().filter(|a| a.alive).count()
    }

    pub fn snapshot(&self) -> impl Iterator<Item = AgentView> + '_ {
        self.agents.iter().map(|a| AgentView {
            position: a.position,
            kind: a.kind,
            alive: a.alive,
        })
    }

    #[inline]
    pub fn agents(&self) -> &[Agent] {
        &self.agents
    }

    #[inline]
    pub fn config(&self) -> &SimulationConfig {
        &self.config
    }

    #[inline]
    pub fn step_count(&self) -> u64 {
        self.step_count
    }

    /// Simulated seconds since population.
    #[inline]
    pub fn time(&self) -> f32 {
        self.time
    }

    #[inline]
    pub fn fights_last_step(&self) -> usize {
        self.fights_last_step
    }
}

fn sample_axis<R: Rng + ?Sized>(rng: &mut R, low: f32, high: f32) -> f32 {
    if low < high { rng.gen_range(low..high) } else { low }
}

#[inline]
fn pair_mut(agents: &mut [Agent], i: usize, j: usize) -> (&mut Agent, &mut Agent) {
    debug_assert!(i < j);
    let (head, tail) = agents.split_at_mut(j);
    (&mut head[i], &mut tail[0])
}


// --- End of File: world.rs ---
