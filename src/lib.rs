//! Rock-paper-scissors arena.
//!
//! A population of agents of three cyclic kinds wanders a bounded 2D arena.
//! When two agents of different kinds touch, the loser is either eliminated
//! or converted to the winner's kind. The run is resolved once a single kind
//! remains. [`Simulation`] drives ticks and exposes read-only state for a
//! presentation layer; [`World`] holds the population and the interaction
//! pass.

pub mod agent;
pub mod config;
pub mod constants;
pub mod geometry;
pub mod simulation;
pub mod world;

pub use agent::{Agent, Kind, KindParseError, Verdict};
pub use config::{
    Boundary, ConfigError, MotionModel, PassPolicy, PopulationSpec, Resolution, SimulationConfig,
};
pub use simulation::{Simulation, Status};
pub use world::{AgentView, KindCounts, SimRng, World, allocate_counts};
