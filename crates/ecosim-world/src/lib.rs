//! Predator-prey simulation engine.
//!
//! This crate implements the 2D field where rabbits, foxes, and coyotes
//! move, hunt, breed, age, and die over discrete steps.

pub mod animal;
pub mod field;
pub mod simulation;
pub mod species;

pub use animal::Animal;
pub use field::Field;
pub use simulation::{Simulation, StepReport};
pub use species::{Diet, SpeciesParams};
