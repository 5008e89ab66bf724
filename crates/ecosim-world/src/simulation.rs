//! Simulation engine: owns the field and the tracked animals, and advances
//! the ecosystem one step at a time.
//!
//! Determinism contract: one `ChaCha8Rng` seeded from the config, animals
//! processed in id order (ids are allocated monotonically), and every
//! adjacency shuffle and breeding draw pulls from that single rng. Two runs
//! with the same config are identical step for step.

use crate::animal::Animal;
use crate::field::Field;
use crate::species::{Diet, SpeciesParams};
use ecosim_core::{AnimalId, Error, Location, Result, SimulationConfig, Species};
use rand::{Rng, SeedableRng};
use rand_chacha::ChaCha8Rng;
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use tracing::{debug, info, trace};

pub struct Simulation {
    config: SimulationConfig,
    field: Field,
    animals: BTreeMap<AnimalId, Animal>,
    next_id: u64,
    rng: ChaCha8Rng,
    step: u64,
}

/// Population state after one step, reported to the driver.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct StepReport {
    pub step: u64,
    pub total_alive: usize,
    pub counts: BTreeMap<Species, usize>,
}

impl Simulation {
    pub fn new(config: SimulationConfig) -> Result<Self> {
        config.validate()?;
        for species in Species::ALL {
            SpeciesParams::of(species).validate(species)?;
        }

        let mut sim = Self {
            field: Field::new(config.depth, config.width)?,
            animals: BTreeMap::new(),
            next_id: 0,
            rng: ChaCha8Rng::seed_from_u64(config.seed),
            step: 0,
            config,
        };
        sim.populate()?;
        Ok(sim)
    }

    pub fn config(&self) -> &SimulationConfig {
        &self.config
    }

    pub fn step_number(&self) -> u64 {
        self.step
    }

    /// Re-seed the initial population deterministically from the same seed.
    /// After a reset the simulation is indistinguishable from a fresh one.
    pub fn reset(&mut self) -> Result<()> {
        self.field = Field::new(self.config.depth, self.config.width)?;
        self.animals.clear();
        self.next_id = 0;
        self.rng = ChaCha8Rng::seed_from_u64(self.config.seed);
        self.step = 0;
        self.populate()
    }

    /// Advance the simulation by one step.
    ///
    /// Every animal tracked at the start of the step acts once, in id order,
    /// unless it died earlier in the step (eaten, for instance). Newborns
    /// are placed in the field immediately so later hunters can find them,
    /// but they never act in the step they are born. Dead animals are
    /// dropped from the tracked collection at the end of the pass.
    pub fn step(&mut self) -> Result<StepReport> {
        self.step += 1;

        let ids: Vec<AnimalId> = self.animals.keys().copied().collect();
        for id in ids {
            self.act(id)?;
        }
        self.animals.retain(|_, animal| animal.is_alive());

        let report = self.report();
        debug!(
            step = report.step,
            total_alive = report.total_alive,
            "step complete"
        );
        Ok(report)
    }

    /// Aggregate population counts without advancing the simulation.
    pub fn report(&self) -> StepReport {
        let mut counts: BTreeMap<Species, usize> =
            Species::ALL.iter().map(|species| (*species, 0)).collect();
        for animal in self.animals.values() {
            *counts.entry(animal.species()).or_insert(0) += 1;
        }
        StepReport {
            step: self.step,
            total_alive: self.animals.len(),
            counts,
        }
    }

    /// Read-only snapshot query for a visualizer. Out-of-range coordinates
    /// read as empty.
    pub fn occupant_at(&self, row: u32, col: u32) -> Option<Species> {
        let location = Location::new(row, col);
        if !self.field.contains(location) {
            return None;
        }
        self.field
            .occupant_at(location)
            .and_then(|id| self.animals.get(&id))
            .map(|animal| animal.species())
    }

    /// Deterministic census of the live population, in row-major field
    /// order.
    pub fn snapshot(&self) -> Vec<(Location, Species, u32)> {
        self.field
            .occupants()
            .filter_map(|(location, id)| {
                self.animals
                    .get(&id)
                    .map(|animal| (location, animal.species(), animal.age()))
            })
            .collect()
    }

    /// Seed the field: every cell is visited in row-major order and a single
    /// uniform draw per cell is walked against the cumulative per-species
    /// densities. Seeded animals get a randomized age (and hunger).
    fn populate(&mut self) -> Result<()> {
        for row in 0..self.config.depth {
            for col in 0..self.config.width {
                let roll: f64 = self.rng.gen();
                let mut threshold = 0.0;
                for species in Species::ALL {
                    threshold += self.config.population.density(species);
                    if roll < threshold {
                        self.insert_seeded(species, Location::new(row, col))?;
                        break;
                    }
                }
            }
        }
        info!(
            seed = self.config.seed,
            depth = self.config.depth,
            width = self.config.width,
            animals = self.animals.len(),
            "seeded initial population"
        );
        Ok(())
    }

    fn allocate_id(&mut self) -> AnimalId {
        let id = AnimalId(self.next_id);
        self.next_id += 1;
        id
    }

    fn insert_seeded(&mut self, species: Species, location: Location) -> Result<AnimalId> {
        let id = self.allocate_id();
        let animal = Animal::seeded(id, species, location, &mut self.rng);
        self.field.place(id, location)?;
        self.animals.insert(id, animal);
        Ok(id)
    }

    fn insert_newborn(&mut self, species: Species, location: Location) -> Result<AnimalId> {
        let id = self.allocate_id();
        let animal = Animal::newborn(id, species, location);
        self.field.place(id, location)?;
        self.animals.insert(id, animal);
        Ok(id)
    }

    fn act(&mut self, id: AnimalId) -> Result<()> {
        let diet = match self.animals.get(&id) {
            Some(animal) if animal.is_alive() => SpeciesParams::of(animal.species()).diet,
            // Died earlier this step (eaten, typically); nothing to do.
            _ => return Ok(()),
        };
        match diet {
            None => self.act_prey(id),
            Some(diet) => self.act_predator(id, diet),
        }
    }

    /// Prey rule: age, give birth into free neighbors, then move to a free
    /// neighbor or die of overcrowding.
    fn act_prey(&mut self, id: AnimalId) -> Result<()> {
        let animal = self.animals.get_mut(&id).ok_or(Error::UnknownAnimal(id))?;
        animal.increment_age(&mut self.field);
        if !animal.is_alive() {
            return Ok(());
        }
        self.give_birth(id)?;
        self.move_or_die(id, None)
    }

    /// Predator rule: age, hunger (starvation precedes any movement), give
    /// birth, then eat the first live prey in randomized adjacency order and
    /// take its cell; failing that, fall back to a free neighbor or die of
    /// overcrowding.
    fn act_predator(&mut self, id: AnimalId, diet: Diet) -> Result<()> {
        {
            let animal = self.animals.get_mut(&id).ok_or(Error::UnknownAnimal(id))?;
            animal.increment_age(&mut self.field);
            if !animal.is_alive() {
                return Ok(());
            }
            animal.increment_hunger(&mut self.field);
            if !animal.is_alive() {
                return Ok(());
            }
        }
        self.give_birth(id)?;
        let kill_site = self.hunt(id, diet)?;
        self.move_or_die(id, kill_site)
    }

    /// Place a litter into distinct free adjacent cells, one newborn each.
    /// Fewer free cells than the drawn litter simply means fewer births.
    fn give_birth(&mut self, id: AnimalId) -> Result<()> {
        let (species, location, births) = {
            let animal = self.animals.get(&id).ok_or(Error::UnknownAnimal(id))?;
            let location = animal.location().ok_or(Error::NotPlaced(id))?;
            (animal.species(), location, animal.breed(&mut self.rng))
        };
        if births == 0 {
            return Ok(());
        }

        let free = self.field.free_adjacent_locations(location, &mut self.rng);
        let mut born = 0;
        for birth_location in free.into_iter().take(births as usize) {
            self.insert_newborn(species, birth_location)?;
            born += 1;
        }
        if born > 0 {
            trace!(parent = %id, species = %species, born, "gave birth");
        }
        Ok(())
    }

    /// Scan the neighbors in randomized order and kill the first live
    /// occupant of the hunted species. Returns the vacated cell so the
    /// predator can move onto it.
    fn hunt(&mut self, id: AnimalId, diet: Diet) -> Result<Option<Location>> {
        let location = self.location_of(id)?;
        for candidate in self.field.adjacent_locations(location, &mut self.rng) {
            let Some(occupant) = self.field.occupant_at(candidate) else {
                continue;
            };
            let caught = match self.animals.get_mut(&occupant) {
                Some(prey) if prey.species() == diet.prey && prey.is_alive() => {
                    prey.set_dead(&mut self.field);
                    true
                }
                _ => false,
            };
            if caught {
                let predator = self.animals.get_mut(&id).ok_or(Error::UnknownAnimal(id))?;
                predator.eat();
                trace!(predator = %id, prey = %occupant, location = %candidate, "prey eaten");
                return Ok(Some(candidate));
            }
        }
        Ok(None)
    }

    /// Move to `destination` if one was already found (a kill site), else to
    /// any free neighbor. With nowhere to go the animal dies of
    /// overcrowding.
    fn move_or_die(&mut self, id: AnimalId, destination: Option<Location>) -> Result<()> {
        let location = self.location_of(id)?;
        let destination =
            destination.or_else(|| self.field.free_adjacent_location(location, &mut self.rng));
        let animal = self.animals.get_mut(&id).ok_or(Error::UnknownAnimal(id))?;
        match destination {
            Some(destination) => animal.set_location(&mut self.field, destination),
            None => {
                animal.set_dead(&mut self.field);
                Ok(())
            }
        }
    }

    fn location_of(&self, id: AnimalId) -> Result<Location> {
        self.animals
            .get(&id)
            .ok_or(Error::UnknownAnimal(id))?
            .location()
            .ok_or(Error::NotPlaced(id))
    }
}
