//! Blight network and world orchestration for Tarn
//!
//! This crate owns the simulation as a whole:
//! - The blight: a node/connector growth graph steered by the wave field's
//!   gradient, able to infect prey and be cleared by plants
//! - The world orchestrator: per-tick update order, collision resolution,
//!   roster invariants, and the external command surface
//! - Configuration loading and the host-facing render abstraction

pub mod blight;
pub mod config;
pub mod render;
pub mod world;

pub use blight::{BlightNetwork, BlightNodeId};
pub use config::{ConfigError, SimConfig};
pub use render::{Color, Surface};
pub use world::{SpawnKind, World};
