// --- File: constants.rs ---
// --- Global Simulation Constants ---

// --- Arena preset (windowed, physical motion, conversion) ---
pub const ARENA_WIDTH: f32 = 800.0;
pub const ARENA_HEIGHT: f32 = 600.0;
pub const ARENA_AGENTS_PER_KIND: usize = 20;
pub const ARENA_AGENT_RADIUS: f32 = 14.0;
pub const ARENA_MIN_SPEED: f32 = 60.0; // px/s
pub const ARENA_MAX_SPEED: f32 = 160.0; // px/s
pub const ARENA_JITTER: f32 = 40.0; // px/s^2 small jitter for organic motion
pub const COLLISION_COOLDOWN_SECS: f32 = 0.35;

// --- Scatter preset (unit box, random walk, elimination) ---
pub const SCATTER_BOX_SIZE: f32 = 1.0;
pub const SCATTER_STEP_SIZE: f32 = 0.01;
pub const SCATTER_INTERACTION_RADIUS: f32 = 0.02;
pub const SCATTER_AGENT_COUNT: usize = 10;
pub const SCATTER_FRACTIONS: [f64; 3] = [0.33, 0.33, 0.34]; // (Rock, Paper, Scissors)
pub const SCATTER_MAX_STEPS: u64 = 5000;
pub const SCATTER_SEED: u64 = 42;

// Extra distance added on top of half the overlap when converted agents are pushed apart.
pub const SEPARATION_PADDING: f32 = 1.0;
pub const SCATTER_SEPARATION_PADDING: f32 = 0.001;

// --- Controller ---
pub const INITIAL_SPEED_MULTIPLIER: f32 = 1.0;
pub const MIN_SPEED_MULTIPLIER: f32 = 0.0;
pub const MAX_SPEED_MULTIPLIER: f32 = 8.0;
pub const SPEED_ADJUST_FACTOR: f32 = 0.5;
pub const FIXED_TIMESTEP: f32 = 1.0 / 60.0;

// --- End of File: constants.rs ---
