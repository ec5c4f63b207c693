use crate::components::Organism;
use crate::rng::RandomSource;

/// Waste a cleaner removed and the food recovered from it
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct WasteReport {
    pub processed: u32,
    /// Half of the processed waste, rounded down
    pub recycled: u32,
}

/// Processes up to a random batch of `waste_amount`, scaled by effectiveness.
pub fn process_waste(cleaner: &Organism, waste_amount: u32, rng: &mut dyn RandomSource) -> WasteReport {
    if !cleaner.active {
        return WasteReport::default();
    }

    let batch = rng.int_inclusive(8, 15).max(0) as u32;
    let processed = (waste_amount.min(batch) as f64 * cleaner.effectiveness()).floor() as u32;

    WasteReport {
        processed,
        recycled: processed / 2,
    }
}
