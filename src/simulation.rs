// --- File: simulation.rs ---
use crate::agent::{Agent, Kind};
use crate::config::{ConfigError, MotionModel, SimulationConfig};
use crate::constants::*;
use crate::world::{AgentView, KindCounts, SimRng, World};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Status {
    Running,
    Paused,
    /// One kind (or none) left; `winner` is `None` only for an empty arena.
    Resolved { winner: Option<Kind> },
    /// The step limit ran out with several kinds still in play.
    Exhausted,
}

/// Owns the world and decides when it may advance.
pub struct Simulation {
    world: World,
    speed_multiplier: f32,
    // Fractional world updates owed to random walkers
    step_budget: f32,
    is_paused: bool,
    resolved: bool,
    elapsed: f32,
    resolution_time: Option<f32>,
}

impl Simulation {
    pub fn new(config: SimulationConfig) -> Result<Self, ConfigError> {
        Ok(Self::from_world(World::new(config)?))
    }

    pub fn with_rng(config: SimulationConfig, rng: SimRng) -> Result<Self, ConfigError> {
        Ok(Self::from_world(World::with_rng(config, rng)?))
    }

    pub fn from_world(world: World) -> Self {
        let mut sim = Self {
            world,
            speed_multiplier: INITIAL_SPEED_MULTIPLIER,
            step_budget: 0.0,
            is_paused: false,
            resolved: false,
            elapsed: 0.0,
            resolution_time: None,
        };
        sim.latch_resolution();
        sim
    }

    /// Advances one tick of `delta_time` seconds. Does nothing once
    /// resolved, while paused, or past the step limit.
    ///
    /// Physical agents integrate over `delta_time` scaled by the speed
    /// multiplier, so a non-positive scaled `dt` holds them still. Random
    /// walkers take one fixed step per world update regardless of `dt`; for
    /// them the multiplier sets how many updates run per tick (0.5 is one
    /// update every other tick, 4 is four updates per tick).
    pub fn tick(&mut self, delta_time: f32) {
        if self.resolved || self.is_paused || self.is_exhausted() {
            return;
        }
        match self.world.config().motion {
            MotionModel::Physical { .. } => {
                let dt = delta_time * self.speed_multiplier;
                if dt <= 0.0 {
                    return;
                }
                self.advance(dt);
            }
            MotionModel::RandomWalk { .. } => {
                let dt = delta_time.max(0.0);
                self.step_budget += self.speed_multiplier;
                while self.step_budget >= 1.0 && !self.resolved && !self.is_exhausted() {
                    self.step_budget -= 1.0;
                    self.advance(dt);
                }
            }
        }
        if self.is_exhausted() && !self.resolved {
            log::info!(
                "Step limit {} reached with {} kinds left",
                self.world.step_count(),
                self.world.counts().distinct()
            );
        }
    }

    fn advance(&mut self, dt: f32) {
        self.elapsed += dt;
        self.world.update(dt);
        self.latch_resolution();
    }

    fn latch_resolution(&mut self) {
        if self.resolved || !self.world.is_resolved() {
            return;
        }
        self.resolved = true;
        self.resolution_time = Some(self.elapsed);
        match self.world.winner() {
            Some(kind) => log::info!(
                "One species left: {} after {} steps ({:.2}s)",
                kind,
                self.world.step_count(),
                self.elapsed
            ),
            None => log::info!("Arena is empty; nothing left to simulate"),
        }
    }

    pub fn reset(&mut self) {
        log::info!("Restarting simulation...");
        self.world.reset();
        self.speed_multiplier = INITIAL_SPEED_MULTIPLIER;
        self.step_budget = 0.0;
        self.is_paused = false;
        self.resolved = false;
        self.elapsed = 0.0;
        self.resolution_time = None;
        self.latch_resolution();
    }

    pub fn toggle_pause(&mut self) {
        self.is_paused = !self.is_paused;
        log::info!(
            "Simulation {}",
            if self.is_paused { "Paused" } else { "Resumed" }
        );
    }

    pub fn adjust_speed(&mut self, increase: bool) {
        self.speed_multiplier = if increase {
            (self.speed_multiplier + SPEED_ADJUST_FACTOR).min(MAX_SPEED_MULTIPLIER)
        } else {
            (self.speed_multiplier - SPEED_ADJUST_FACTOR).max(MIN_SPEED_MULTIPLIER)
        };
        log::info!("Speed Multiplier: {:.2}", self.speed_multiplier);
    }

    fn is_exhausted(&self) -> bool {
        self.world
            .config()
            .max_steps
            .is_some_and(|limit| self.world.step_count() >= limit)
    }

    pub fn status(&self) -> Status {
        if self.resolved {
            Status::Resolved {
                winner: self.winner(),
            }
        } else if self.is_exhausted() {
            Status::Exhausted
        } else if self.is_paused {
            Status::Paused
        } else {
            Status::Running
        }
    }

    pub fn is_resolved(&self) -> bool {
        self.resolved
    }

    /// First kind with a nonzero count, once resolved.
    pub fn winner(&self) -> Option<Kind> {
        if self.resolved {
            self.world.counts().first_present()
        } else {
            None
        }
    }

    pub fn counts(&self) -> KindCounts {
        self.world.counts()
    }

    pub fn snapshot(&self) -> impl Iterator<Item = AgentView> + '_ {
        self.world.snapshot()
    }

    pub fn agents(&self) -> &[Agent] {
        self.world.agents()
    }

    pub fn world(&self) -> &World {
        &self.world
    }

    pub fn config(&self) -> &SimulationConfig {
        self.world.config()
    }

    pub fn step_count(&self) -> u64 {
        self.world.step_count()
    }

    /// Simulated seconds since start or the last reset.
    pub fn elapsed(&self) -> f32 {
        self.elapsed
    }

    pub fn resolution_time(&self) -> Option<f32> {
        self.resolution_time
    }

    pub fn speed_multiplier(&self) -> f32 {
        self.speed_multiplier
    }

    pub fn is_paused(&self) -> bool {
        self.is_paused
    }
}


// --- End of File: simulation.rs ---
