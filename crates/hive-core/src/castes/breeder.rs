//! Breeder Spawning
//!
//! Breeders turn spawn orders into newborns, limited by their own capacity and
//! a short cooldown after every successful clutch.

use hive_events::CasteType;
use tracing::debug;

use crate::components::{Organism, SpawnOrders};
use crate::rng::RandomSource;

/// Offspring produced by one breeder in one attempt
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Clutch {
    /// Newborns awaiting ids from the engine
    pub offspring: Vec<Organism>,
    /// A queen was requested but refused because a queen is alive
    pub queen_blocked: bool,
}

impl Clutch {
    pub fn is_empty(&self) -> bool {
        self.offspring.is_empty()
    }
}

/// Spawns organisms from `orders`, visiting entries in request order.
///
/// Queens are only bred into a queenless hive. Castes that cannot be bred are
/// ignored. An inactive or cooling-down breeder spawns nothing, and a cooling
/// breeder moves one cycle closer to being ready.
pub fn spawn_organisms(
    breeder: &mut Organism,
    orders: &SpawnOrders,
    cycle: u64,
    living_queens: u32,
    rng: &mut dyn RandomSource,
) -> Clutch {
    let mut clutch = Clutch::default();
    if !breeder.active || breeder.breeding_cooldown > 0 {
        breeder.breeding_cooldown = breeder.breeding_cooldown.saturating_sub(1);
        return clutch;
    }

    let effectiveness = breeder.effectiveness();
    let capacity = ((3.0 * effectiveness).floor() as u32).max(1);
    let total_to_spawn = capacity.min(orders.total());
    let mut spawned = 0;

    for (caste, requested) in orders.iter() {
        if spawned >= total_to_spawn {
            break;
        }

        if caste == CasteType::Queen && living_queens > 0 {
            debug!(breeder = breeder.id, living_queens, "Queen spawn blocked");
            clutch.queen_blocked = true;
            continue;
        }

        if !caste.is_breedable() {
            continue;
        }

        let remaining = total_to_spawn - spawned;
        let count = (requested.min(remaining) as f64 * effectiveness).floor() as u32;
        for _ in 0..count {
            clutch.offspring.push(Organism::newborn(caste, cycle));
        }
        spawned += count;
    }

    if !clutch.is_empty() {
        breeder.breeding_cooldown = rng.int_inclusive(1, 3).max(0) as u32;
    }

    clutch
}
