//! Bounded 2D field of animal positions.
//!
//! The field indexes animals by location; it does not own them. Each cell
//! holds at most one occupant id, and the placement contract (clear before
//! re-placing) keeps that exclusivity invariant intact across every move.

use ecosim_core::{AnimalId, Error, Location, Result};
use rand::seq::SliceRandom;
use rand_chacha::ChaCha8Rng;

#[derive(Debug, Clone)]
pub struct Field {
    depth: u32,
    width: u32,
    cells: Vec<Option<AnimalId>>,
}

impl Field {
    pub fn new(depth: u32, width: u32) -> Result<Self> {
        if depth == 0 || width == 0 {
            return Err(Error::InvalidConfig(format!(
                "field dimensions must be non-zero, got {depth}x{width}"
            )));
        }
        let size = depth as usize * width as usize;
        Ok(Self {
            depth,
            width,
            cells: vec![None; size],
        })
    }

    pub fn depth(&self) -> u32 {
        self.depth
    }

    pub fn width(&self) -> u32 {
        self.width
    }

    pub fn contains(&self, location: Location) -> bool {
        location.row < self.depth && location.col < self.width
    }

    /// Panics on out-of-bounds coordinates: the field's own neighbor
    /// enumeration never produces them, so reaching this is a caller bug.
    fn index(&self, location: Location) -> usize {
        assert!(
            self.contains(location),
            "location {location} outside {}x{} field",
            self.depth,
            self.width
        );
        location.row as usize * self.width as usize + location.col as usize
    }

    /// Record `id` at `location`. The caller must have cleared the previous
    /// occupant first; an occupied cell is reported as an error rather than
    /// silently overwritten.
    pub fn place(&mut self, id: AnimalId, location: Location) -> Result<()> {
        let index = self.index(location);
        if self.cells[index].is_some() {
            return Err(Error::OccupiedCell(location));
        }
        self.cells[index] = Some(id);
        Ok(())
    }

    /// Remove any occupant at `location`.
    pub fn clear(&mut self, location: Location) {
        let index = self.index(location);
        self.cells[index] = None;
    }

    pub fn occupant_at(&self, location: Location) -> Option<AnimalId> {
        self.cells[self.index(location)]
    }

    /// The up-to-8 in-bounds neighbors of `location`, shuffled per call.
    ///
    /// The shuffle is load-bearing: it removes directional bias from
    /// movement and hunting, and drawing it from the shared rng keeps runs
    /// reproducible under a fixed seed.
    pub fn adjacent_locations(&self, location: Location, rng: &mut ChaCha8Rng) -> Vec<Location> {
        debug_assert!(self.contains(location));
        let mut adjacent = Vec::with_capacity(8);
        for row_offset in -1..=1i64 {
            for col_offset in -1..=1i64 {
                if row_offset == 0 && col_offset == 0 {
                    continue;
                }
                let row = location.row as i64 + row_offset;
                let col = location.col as i64 + col_offset;
                if (0..self.depth as i64).contains(&row) && (0..self.width as i64).contains(&col) {
                    adjacent.push(Location::new(row as u32, col as u32));
                }
            }
        }
        adjacent.shuffle(rng);
        adjacent
    }

    /// The unoccupied subset of `adjacent_locations`, same ordering contract.
    pub fn free_adjacent_locations(
        &self,
        location: Location,
        rng: &mut ChaCha8Rng,
    ) -> Vec<Location> {
        self.adjacent_locations(location, rng)
            .into_iter()
            .filter(|candidate| self.occupant_at(*candidate).is_none())
            .collect()
    }

    /// The first free neighbor in randomized order, or `None` if the animal
    /// is boxed in.
    pub fn free_adjacent_location(
        &self,
        location: Location,
        rng: &mut ChaCha8Rng,
    ) -> Option<Location> {
        self.free_adjacent_locations(location, rng).into_iter().next()
    }

    /// Iterator over all occupied cells.
    pub fn occupants(&self) -> impl Iterator<Item = (Location, AnimalId)> + '_ {
        self.cells.iter().enumerate().filter_map(move |(i, cell)| {
            cell.map(|id| {
                let row = (i / self.width as usize) as u32;
                let col = (i % self.width as usize) as u32;
                (Location::new(row, col), id)
            })
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use proptest::prelude::*;
    use rand::SeedableRng;

    fn rng(seed: u64) -> ChaCha8Rng {
        ChaCha8Rng::seed_from_u64(seed)
    }

    #[test]
    fn test_field_creation() {
        let field = Field::new(8, 12).unwrap();
        assert_eq!(field.depth(), 8);
        assert_eq!(field.width(), 12);
        assert_eq!(field.occupants().count(), 0);
    }

    #[test]
    fn test_zero_dimension_rejected() {
        assert!(Field::new(0, 10).is_err());
        assert!(Field::new(10, 0).is_err());
    }

    #[test]
    fn test_place_clear_occupant() {
        let mut field = Field::new(4, 4).unwrap();
        let loc = Location::new(1, 2);
        field.place(AnimalId(7), loc).unwrap();
        assert_eq!(field.occupant_at(loc), Some(AnimalId(7)));

        field.clear(loc);
        assert_eq!(field.occupant_at(loc), None);
    }

    #[test]
    fn test_place_into_occupied_cell_fails() {
        let mut field = Field::new(4, 4).unwrap();
        let loc = Location::new(0, 0);
        field.place(AnimalId(1), loc).unwrap();
        let err = field.place(AnimalId(2), loc).unwrap_err();
        assert!(matches!(err, Error::OccupiedCell(l) if l == loc));
        // Failed placement must not disturb the existing occupant.
        assert_eq!(field.occupant_at(loc), Some(AnimalId(1)));
    }

    #[test]
    #[should_panic(expected = "outside")]
    fn test_out_of_bounds_panics() {
        let field = Field::new(4, 4).unwrap();
        field.occupant_at(Location::new(4, 0));
    }

    #[test]
    fn test_interior_cell_has_eight_neighbors() {
        let field = Field::new(5, 5).unwrap();
        let adjacent = field.adjacent_locations(Location::new(2, 2), &mut rng(0));
        assert_eq!(adjacent.len(), 8);
    }

    #[test]
    fn test_corner_cell_has_three_neighbors() {
        let field = Field::new(2, 2).unwrap();
        let mut adjacent = field.adjacent_locations(Location::new(0, 0), &mut rng(0));
        adjacent.sort();
        assert_eq!(
            adjacent,
            vec![
                Location::new(0, 1),
                Location::new(1, 0),
                Location::new(1, 1),
            ]
        );
    }

    #[test]
    fn test_free_adjacent_excludes_occupied() {
        let mut field = Field::new(3, 3).unwrap();
        let center = Location::new(1, 1);
        field.place(AnimalId(1), Location::new(0, 0)).unwrap();
        field.place(AnimalId(2), Location::new(2, 2)).unwrap();

        let free = field.free_adjacent_locations(center, &mut rng(0));
        assert_eq!(free.len(), 6);
        assert!(!free.contains(&Location::new(0, 0)));
        assert!(!free.contains(&Location::new(2, 2)));
    }

    #[test]
    fn test_no_free_adjacent_when_boxed_in() {
        let mut field = Field::new(1, 2).unwrap();
        field.place(AnimalId(1), Location::new(0, 1)).unwrap();
        assert_eq!(
            field.free_adjacent_location(Location::new(0, 0), &mut rng(0)),
            None
        );
    }

    #[test]
    fn test_adjacency_order_reproducible_for_fixed_seed() {
        let field = Field::new(6, 6).unwrap();
        let center = Location::new(3, 3);
        let first = field.adjacent_locations(center, &mut rng(99));
        let second = field.adjacent_locations(center, &mut rng(99));
        assert_eq!(first, second);
    }

    proptest! {
        #[test]
        fn adjacent_locations_stay_in_bounds(
            depth in 1u32..16,
            width in 1u32..16,
            row in 0u32..16,
            col in 0u32..16,
            seed in any::<u64>(),
        ) {
            prop_assume!(row < depth && col < width);
            let field = Field::new(depth, width).unwrap();
            let adjacent = field.adjacent_locations(Location::new(row, col), &mut rng(seed));
            prop_assert!(adjacent.len() <= 8);
            for location in adjacent {
                prop_assert!(field.contains(location));
                prop_assert_ne!(location, Location::new(row, col));
            }
        }
    }
}
