//! Error types for the simulation.

use crate::types::{AnimalId, Location};
use thiserror::Error;

pub type Result<T> = std::result::Result<T, Error>;

#[derive(Error, Debug)]
pub enum Error {
    #[error("Invalid configuration: {0}")]
    InvalidConfig(String),

    #[error("Cell {0} is already occupied")]
    OccupiedCell(Location),

    #[error("No animal tracked under id {0}")]
    UnknownAnimal(AnimalId),

    #[error("Animal {0} is not placed in the field")]
    NotPlaced(AnimalId),
}
