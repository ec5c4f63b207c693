use super::scaled;
use crate::components::{Organism, MAX_STRUCTURE};
use crate::rng::RandomSource;

/// Returns the structural integrity after this architect's repair, capped at 100.
pub fn maintain_structure(architect: &Organism, current: u32, rng: &mut dyn RandomSource) -> u32 {
    if !architect.active {
        return current;
    }

    let repair = scaled(rng.int_inclusive(5, 12).max(0) as u32, architect.effectiveness());
    current.saturating_add(repair).min(MAX_STRUCTURE)
}
