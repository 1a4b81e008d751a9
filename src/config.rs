// --- File: config.rs ---
use crate::constants::*;
use glam::Vec2;

/// How the initial population is split across the three kinds.
#[derive(Debug, Clone, PartialEq)]
pub enum PopulationSpec {
    /// Rounded proportional allocation of `total` agents; fractions are in
    /// (Rock, Paper, Scissors) order and need not sum to one.
    Fractions { total: usize, fractions: [f64; 3] },
    /// Exact per-kind counts in (Rock, Paper, Scissors) order.
    Counts([usize; 3]),
}

#[derive(Debug, Clone, Copy, PartialEq)]
pub enum MotionModel {
    /// Fresh uniform heading every tick, fixed step length.
    RandomWalk { step_size: f32 },
    /// Persistent velocity with random acceleration jitter (units/s^2),
    /// speed kept inside `[min_speed, max_speed]`.
    Physical {
        min_speed: f32,
        max_speed: f32,
        jitter: f32,
    },
}

impl MotionModel {
    pub fn is_physical(&self) -> bool {
        matches!(self, MotionModel::Physical { .. })
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Boundary {
    /// Toroidal arena: positions and distances wrap around.
    Wrap,
    /// Hard walls: positions are clamped (physical agents also bounce).
    Clamp,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Resolution {
    /// The loser is deactivated for the rest of the run.
    Elimination,
    /// The loser takes the winner's kind; nobody leaves the arena.
    Conversion,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PassPolicy {
    /// Outcomes land on the loser as soon as its pair is judged.
    Immediate,
    /// Outcomes are collected per agent index and applied after the pass;
    /// the last pair judged for an agent wins. Conversion only.
    Deferred,
}

#[derive(Debug, Clone, PartialEq)]
pub struct SimulationConfig {
    pub arena_size: Vec2,
    pub agent_radius: f32,
    /// Centre-to-centre distance at or below which two agents are in contact.
    pub interaction_radius: f32,
    pub population: PopulationSpec,
    pub motion: MotionModel,
    pub boundary: Boundary,
    pub resolution: Resolution,
    pub pass_policy: PassPolicy,
    /// Seconds an agent sits out after a fight. Zero or less disables the gate.
    pub cooldown_secs: f32,
    pub separation_padding: f32,
    pub seed: Option<u64>,
    pub max_steps: Option<u64>,
}

impl Default for SimulationConfig {
    fn default() -> Self {
        Self::arena()
    }
}

impl SimulationConfig {
    /// Windowed pixel arena: bouncing agents with cooldowns, losers convert.
    pub fn arena() -> Self {
        Self {
            arena_size: Vec2::new(ARENA_WIDTH, ARENA_HEIGHT),
            agent_radius: ARENA_AGENT_RADIUS,
            interaction_radius: ARENA_AGENT_RADIUS * 2.0,
            population: PopulationSpec::Counts([ARENA_AGENTS_PER_KIND; 3]),
            motion: MotionModel::Physical {
                min_speed: ARENA_MIN_SPEED,
                max_speed: ARENA_MAX_SPEED,
                jitter: ARENA_JITTER,
            },
            boundary: Boundary::Clamp,
            resolution: Resolution::Conversion,
            pass_policy: PassPolicy::Deferred,
            cooldown_secs: COLLISION_COOLDOWN_SECS,
            separation_padding: SEPARATION_PADDING,
            seed: None,
            max_steps: None,
        }
    }

    /// Unit box on a torus: random walkers, losers are eliminated.
    pub fn scatter() -> Self {
        Self {
            arena_size: Vec2::splat(SCATTER_BOX_SIZE),
            agent_radius: SCATTER_INTERACTION_RADIUS * 0.5,
            interaction_radius: SCATTER_INTERACTION_RADIUS,
            population: PopulationSpec::Fractions {
                total: SCATTER_AGENT_COUNT,
                fractions: SCATTER_FRACTIONS,
            },
            motion: MotionModel::RandomWalk {
                step_size: SCATTER_STEP_SIZE,
            },
            boundary: Boundary::Wrap,
            resolution: Resolution::Elimination,
            pass_policy: PassPolicy::Immediate,
            cooldown_secs: 0.0,
            separation_padding: SCATTER_SEPARATION_PADDING,
            seed: Some(SCATTER_SEED),
            max_steps: Some(SCATTER_MAX_STEPS),
        }
    }

    pub fn with_seed(mut self, seed: u64) -> Self {
        self.seed = Some(seed);
        self
    }

    pub fn total_agents(&self) -> usize {
        match &self.population {
            PopulationSpec::Fractions { total, .. } => *total,
            PopulationSpec::Counts(counts) => counts.iter().sum(),
        }
    }

    pub fn validate(&self) -> Result<(), ConfigError> {
        let size = self.arena_size;
        if !(size.x.is_finite() && size.y.is_finite() && size.x > 0.0 && size.y > 0.0) {
            return Err(ConfigError::InvalidArenaSize {
                width: size.x,
                height: size.y,
            });
        }
        if !(self.agent_radius.is_finite() && self.agent_radius >= 0.0) {
            return Err(ConfigError::InvalidAgentRadius(self.agent_radius));
        }
        if !(self.interaction_radius.is_finite() && self.interaction_radius >= 0.0) {
            return Err(ConfigError::InvalidInteractionRadius(self.interaction_radius));
        }
        if self.motion.is_physical() && self.agent_radius * 2.0 > size.min_element() {
            return Err(ConfigError::AgentTooLarge {
                radius: self.agent_radius,
            });
        }
        if let PopulationSpec::Fractions { fractions, .. } = &self.population {
            if fractions.iter().any(|f| !f.is_finite() || *f < 0.0) {
                return Err(ConfigError::InvalidFractions(*fractions));
            }
        }
        match self.motion {
            MotionModel::RandomWalk { step_size } => {
                if !(step_size.is_finite() && step_size >= 0.0) {
                    return Err(ConfigError::InvalidStepSize(step_size));
                }
            }
            MotionModel::Physical {
                min_speed,
                max_speed,
                jitter,
            } => {
                if !(min_speed.is_finite()
                    && max_speed.is_finite()
                    && min_speed >= 0.0
                    && min_speed <= max_speed)
                {
                    return Err(ConfigError::InvalidSpeedRange {
                        min: min_speed,
                        max: max_speed,
                    });
                }
                if !(jitter.is_finite() && jitter >= 0.0) {
                    return Err(ConfigError::InvalidJitter(jitter));
                }
            }
        }
        if !self.cooldown_secs.is_finite() {
            return Err(ConfigError::InvalidCooldown(self.cooldown_secs));
        }
        if !(self.separation_padding.is_finite() && self.separation_padding >= 0.0) {
            return Err(ConfigError::InvalidSeparationPadding(self.separation_padding));
        }
        if self.pass_policy == PassPolicy::Deferred && self.resolution == Resolution::Elimination {
            return Err(ConfigError::DeferredElimination);
        }
        Ok(())
    }
}

#[derive(Debug, Clone, PartialEq)]
pub enum ConfigError {
    InvalidArenaSize { width: f32, height: f32 },
    InvalidAgentRadius(f32),
    InvalidInteractionRadius(f32),
    AgentTooLarge { radius: f32 },
    InvalidFractions([f64; 3]),
    InvalidStepSize(f32),
    InvalidSpeedRange { min: f32, max: f32 },
    InvalidJitter(f32),
    InvalidCooldown(f32),
    InvalidSeparationPadding(f32),
    DeferredElimination,
}

impl std::fmt::Display for ConfigError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::InvalidArenaSize { width, height } => write!(
                f,
                "arena size must be positive and finite, got {width}x{height}"
            ),
            Self::InvalidAgentRadius(r) => {
                write!(f, "agent_radius must be non-negative and finite, got {r}")
            }
            Self::InvalidInteractionRadius(r) => write!(
                f,
                "interaction_radius must be non-negative and finite, got {r}"
            ),
            Self::AgentTooLarge { radius } => {
                write!(f, "agent radius {radius} does not fit inside the arena")
            }
            Self::InvalidFractions(fr) => write!(
                f,
                "population fractions must be finite and non-negative, got {fr:?}"
            ),
            Self::InvalidStepSize(s) => {
                write!(f, "step_size must be non-negative and finite, got {s}")
            }
            Self::InvalidSpeedRange { min, max } => write!(
                f,
                "speed range must satisfy 0 <= min_speed <= max_speed, got {min}..{max}"
            ),
            Self::InvalidJitter(j) => write!(f, "jitter must be non-negative and finite, got {j}"),
            Self::InvalidCooldown(c) => write!(f, "cooldown_secs must be finite, got {c}"),
            Self::InvalidSeparationPadding(p) => write!(
                f,
                "separation_padding must be non-negative and finite, got {p}"
            ),
            Self::DeferredElimination => {
                write!(f, "the deferred pass policy only supports the conversion model")
            }
        }
    }
}

impl std::error::Error for ConfigError {}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn presets_are_valid() {
        assert_eq!(SimulationConfig::arena().validate(), Ok(()));
        assert_eq!(SimulationConfig::scatter().validate(), Ok(()));
        assert_eq!(SimulationConfig::arena().total_agents(), 60);
        assert_eq!(SimulationConfig::scatter().total_agents(), 10);
    }

    #[test]
    fn deferred_elimination_is_rejected() {
        let config = SimulationConfig {
            pass_policy: PassPolicy::Deferred,
            ..SimulationConfig::scatter()
        };
        assert_eq!(config.validate(), Err(ConfigError::DeferredElimination));
    }

    #[test]
    fn inverted_speed_range_is_rejected() {
        let config = SimulationConfig {
            motion: MotionModel::Physical {
                min_speed: 10.0,
                max_speed: 5.0,
                jitter: 0.0,
            },
            ..SimulationConfig::arena()
        };
        assert!(matches!(
            config.validate(),
            Err(ConfigError::InvalidSpeedRange { .. })
        ));
    }

    #[test]
    fn negative_fraction_is_rejected() {
        let config = SimulationConfig {
            population: PopulationSpec::Fractions {
                total: 10,
                fractions: [0.5, -0.1, 0.6],
            },
            ..SimulationConfig::scatter()
        };
        assert!(matches!(
            config.validate(),
            Err(ConfigError::InvalidFractions(_))
        ));
    }

    #[test]
    fn empty_arena_is_rejected() {
        let config = SimulationConfig {
            arena_size: Vec2::new(0.0, 100.0),
            ..SimulationConfig::arena()
        };
        assert!(matches!(
            config.validate(),
            Err(ConfigError::InvalidArenaSize { .. })
        ));
        assert!(config.validate().unwrap_err().to_string().contains("0x100"));
    }
}

// --- End of File: config.rs ---
