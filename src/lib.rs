/*
 * Flocking Generations - Module Definitions
 *
 * The simulation core (agents, neighbor queries, forces, motion, aging and
 * spawning, tied together by `Simulation`) has no windowing dependencies.
 * The viewer modules wrap it in a nannou window with an egui control panel.
 */

// Re-export key components for easier access
pub use agent::{Agent, AgentStore, HslColor};
pub use error::{ConfigError, InputError};
pub use neighbors::{BruteForce, NeighborQuery};
pub use params::SimulationParams;
pub use simulation::{FrameSnapshot, InputState, RenderInstance, Simulation};
pub use spatial_grid::SpatialGrid;
pub use spawn::{SpawnController, SpawnReport};

// Simulation core
pub mod agent;
pub mod error;
pub mod flocking;
pub mod lifecycle;
pub mod neighbors;
pub mod params;
pub mod physics;
pub mod simulation;
pub mod spatial_grid;
pub mod spawn;

// Viewer
pub mod app;
pub mod camera;
pub mod debug;
pub mod input;
pub mod renderer;
pub mod ui;
