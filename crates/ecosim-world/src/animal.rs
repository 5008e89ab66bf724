//! Shared animal lifecycle.
//!
//! One struct carries the state every species shares; the per-species
//! constants come from the parameter table and the act rules live in the
//! simulation module. An animal is created alive (newborn or seeded) and
//! transitions to dead exactly once, via old age, starvation, or
//! overcrowding.

use crate::field::Field;
use crate::species::SpeciesParams;
use ecosim_core::{AnimalId, Location, Result, Species};
use rand::Rng;
use rand_chacha::ChaCha8Rng;
use tracing::trace;

#[derive(Debug, Clone)]
pub struct Animal {
    id: AnimalId,
    species: Species,
    alive: bool,
    age: u32,
    location: Option<Location>,
    /// Steps until starvation; `None` for species that do not hunt.
    food_level: Option<u32>,
}

impl Animal {
    /// A newborn: age zero and, for predators, a full stomach.
    pub fn newborn(id: AnimalId, species: Species, location: Location) -> Self {
        let params = SpeciesParams::of(species);
        Self {
            id,
            species,
            alive: true,
            age: 0,
            location: Some(location),
            food_level: params.diet.map(|diet| diet.food_value),
        }
    }

    /// A member of the initial population: random age and, for predators,
    /// random hunger. The age is drawn only here, never mutated directly
    /// afterwards; step-time aging goes through `increment_age`.
    pub fn seeded(
        id: AnimalId,
        species: Species,
        location: Location,
        rng: &mut ChaCha8Rng,
    ) -> Self {
        let params = SpeciesParams::of(species);
        Self {
            id,
            species,
            alive: true,
            age: rng.gen_range(0..params.max_age),
            location: Some(location),
            food_level: params.diet.map(|diet| rng.gen_range(0..diet.food_value)),
        }
    }

    pub fn id(&self) -> AnimalId {
        self.id
    }

    pub fn species(&self) -> Species {
        self.species
    }

    pub fn is_alive(&self) -> bool {
        self.alive
    }

    pub fn age(&self) -> u32 {
        self.age
    }

    pub fn location(&self) -> Option<Location> {
        self.location
    }

    pub fn food_level(&self) -> Option<u32> {
        self.food_level
    }

    #[cfg(test)]
    pub(crate) fn set_food_level(&mut self, level: u32) {
        self.food_level = Some(level);
    }

    /// Age by one step, dying once past the species maximum.
    pub fn increment_age(&mut self, field: &mut Field) {
        self.age += 1;
        if self.age > SpeciesParams::of(self.species).max_age {
            self.set_dead(field);
        }
    }

    /// Grow one step hungrier, dying of starvation at zero. No-op for
    /// species without a diet.
    pub fn increment_hunger(&mut self, field: &mut Field) {
        if let Some(level) = self.food_level.as_mut() {
            *level = level.saturating_sub(1);
            if *level == 0 {
                self.set_dead(field);
            }
        }
    }

    /// Refill the food level after a kill.
    pub fn eat(&mut self) {
        if let Some(diet) = SpeciesParams::of(self.species).diet {
            self.food_level = Some(diet.food_value);
        }
    }

    /// The number of births this step: zero below breeding age, otherwise a
    /// probability draw gating a uniform litter size. This is the sole
    /// breeding-decision algorithm; every species goes through it with its
    /// own constants.
    pub fn breed(&self, rng: &mut ChaCha8Rng) -> u32 {
        let params = SpeciesParams::of(self.species);
        if self.age < params.breeding_age {
            return 0;
        }
        if rng.gen::<f64>() <= params.breeding_probability {
            rng.gen_range(1..=params.max_litter_size)
        } else {
            0
        }
    }

    /// Move to `new_location`, clearing the old cell first so the field's
    /// one-occupant-per-cell invariant holds across the transfer.
    pub fn set_location(&mut self, field: &mut Field, new_location: Location) -> Result<()> {
        if let Some(old) = self.location {
            field.clear(old);
        }
        field.place(self.id, new_location)?;
        self.location = Some(new_location);
        Ok(())
    }

    /// Idempotent transition to the dead state; clears the field cell if
    /// still placed.
    pub fn set_dead(&mut self, field: &mut Field) {
        if self.alive {
            self.alive = false;
            trace!(animal = %self.id, species = %self.species, age = self.age, "animal died");
        }
        if let Some(location) = self.location.take() {
            field.clear(location);
        }
    }
}
