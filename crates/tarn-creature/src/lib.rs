//! Entity bodies and steering behaviors for Tarn
//!
//! This crate implements:
//! - Shared body state (position, velocity, size, liveness) and creature
//!   vitals (energy, health state machine, infection)
//! - Feeler rays for cheap directional proximity detection
//! - Composite convex outlines and polygon intersection for eating/contact
//! - The concrete `Plant` and `Prey` behaviors

pub mod body;
pub mod creature;
pub mod feelers;
pub mod outline;
pub mod plant;
pub mod prey;
pub mod types;

pub use body::{Body, Bounds};
pub use creature::{Creature, HealthState, LOW_ENERGY, MAX_ENERGY};
pub use feelers::Feelers;
pub use outline::Outline;
pub use plant::Plant;
pub use prey::{Behavior, PeerView, PlantView, Prey, PreyActions};
pub use types::EntityId;
