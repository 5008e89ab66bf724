//! Per-species parameters.
//!
//! Species differ only by these constants and by which species they hunt;
//! the act rules themselves live in the simulation module.

use ecosim_core::{Error, Result, Species};

/// What a predator species hunts and what a kill is worth.
///
/// `food_value` is the number of steps the predator can go after a kill
/// before it must eat again.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Diet {
    pub prey: Species,
    pub food_value: u32,
}

/// Fixed lifecycle constants for one species.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct SpeciesParams {
    /// Age at which the animal can start to breed
    pub breeding_age: u32,
    /// Age beyond which the animal dies
    pub max_age: u32,
    /// Likelihood of breeding at each step once of age
    pub breeding_probability: f64,
    /// Maximum number of births per litter
    pub max_litter_size: u32,
    /// Hunting parameters; `None` for pure prey species
    pub diet: Option<Diet>,
}

const RABBIT: SpeciesParams = SpeciesParams {
    breeding_age: 5,
    max_age: 40,
    breeding_probability: 0.12,
    max_litter_size: 4,
    diet: None,
};

const FOX: SpeciesParams = SpeciesParams {
    breeding_age: 15,
    max_age: 150,
    breeding_probability: 0.08,
    max_litter_size: 2,
    diet: Some(Diet {
        prey: Species::Rabbit,
        food_value: 9,
    }),
};

const COYOTE: SpeciesParams = SpeciesParams {
    breeding_age: 10,
    max_age: 125,
    breeding_probability: 0.10,
    max_litter_size: 2,
    diet: Some(Diet {
        prey: Species::Fox,
        food_value: 6,
    }),
};

impl SpeciesParams {
    pub fn of(species: Species) -> &'static SpeciesParams {
        match species {
            Species::Rabbit => &RABBIT,
            Species::Fox => &FOX,
            Species::Coyote => &COYOTE,
        }
    }

    /// Sanity-check a parameter set. Run once at simulation start so edits
    /// to the tables above are caught before any step runs.
    pub fn validate(&self, species: Species) -> Result<()> {
        if !(0.0..=1.0).contains(&self.breeding_probability) {
            return Err(Error::InvalidConfig(format!(
                "{species} breeding probability must be in [0, 1], got {}",
                self.breeding_probability
            )));
        }
        if self.max_litter_size == 0 {
            return Err(Error::InvalidConfig(format!(
                "{species} max litter size must be at least 1"
            )));
        }
        if self.breeding_age > self.max_age {
            return Err(Error::InvalidConfig(format!(
                "{species} breeding age {} exceeds max age {}",
                self.breeding_age, self.max_age
            )));
        }
        if let Some(diet) = &self.diet {
            if diet.food_value == 0 {
                return Err(Error::InvalidConfig(format!(
                    "{species} food value must be at least 1"
                )));
            }
            if diet.prey == species {
                return Err(Error::InvalidConfig(format!("{species} cannot prey on itself")));
            }
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_all_species_validate() {
        for species in Species::ALL {
            SpeciesParams::of(species).validate(species).unwrap();
        }
    }

    #[test]
    fn test_food_chain_is_fixed() {
        assert!(SpeciesParams::of(Species::Rabbit).diet.is_none());
        assert_eq!(
            SpeciesParams::of(Species::Fox).diet.unwrap().prey,
            Species::Rabbit
        );
        assert_eq!(
            SpeciesParams::of(Species::Coyote).diet.unwrap().prey,
            Species::Fox
        );
    }

    #[test]
    fn test_bad_params_rejected() {
        let mut params = *SpeciesParams::of(Species::Fox);
        params.breeding_probability = 1.5;
        assert!(params.validate(Species::Fox).is_err());

        let mut params = *SpeciesParams::of(Species::Rabbit);
        params.max_litter_size = 0;
        assert!(params.validate(Species::Rabbit).is_err());

        let mut params = *SpeciesParams::of(Species::Coyote);
        params.breeding_age = params.max_age + 1;
        assert!(params.validate(Species::Coyote).is_err());

        let mut params = *SpeciesParams::of(Species::Fox);
        params.diet = Some(Diet {
            prey: Species::Fox,
            food_value: 9,
        });
        assert!(params.validate(Species::Fox).is_err());
    }
}
