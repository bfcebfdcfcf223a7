//! Simulation core for Conway's Game of Life and related birth/survive rules.

pub mod enc;
pub mod engine;
pub mod error;
pub mod fill;
pub mod pattern;
pub mod pos;
pub mod simulation;
pub mod stats;
pub mod universe;

pub use enc::{Decoded, PatternCodec, RunLengthEncoded};
pub use engine::{NeighborSet, Rule, RuleEngine};
pub use error::{LifeError, Result};
pub use fill::FillMode;
pub use pattern::{Pattern, from_pattern, to_pattern};
pub use pos::Pos2;
pub use simulation::{Frame, RunState, Simulation, SimulationConfig, SnapshotHandle, TickReport};
pub use universe::{Bounds, Universe, Window};
