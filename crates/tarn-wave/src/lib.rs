//! Damped wave-field automaton for Tarn
//!
//! A double-buffered scalar height grid with leapfrog wave propagation,
//! impulse disturbances, and bounds-checked reads. The field knows nothing
//! about entities; they inject disturbances through [`WaveField::disturb`].

pub mod field;

pub use field::{WaveField, DISTURBANCE_DEPTH};
