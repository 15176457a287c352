use std::collections::{BTreeMap, HashSet};

use lw_core::{Block, BlockSource, OreFamily, OreTable};
use serde::Serialize;

use crate::technique::TechniqueOutcome;
use crate::vein::expand_vein;

/// Unique ore blocks per family. Every family is present, zero if none found.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct OreCounts(BTreeMap<OreFamily, u64>);

impl Default for OreCounts {
    fn default() -> Self {
        Self(OreFamily::ALL.into_iter().map(|f| (f, 0)).collect())
    }
}

impl OreCounts {
    /// Count for one family.
    pub fn get(&self, family: OreFamily) -> u64 {
        self.0.get(&family).copied().unwrap_or(0)
    }

    /// Add one block of `family`.
    pub fn increment(&mut self, family: OreFamily) {
        *self.0.entry(family).or_insert(0) += 1;
    }

    /// Families and counts in column order.
    pub fn iter(&self) -> impl Iterator<Item = (OreFamily, u64)> + '_ {
        self.0.iter().map(|(&f, &n)| (f, n))
    }

    /// Sum over all families.
    pub fn total(&self) -> u64 {
        self.0.values().sum()
    }
}

/// The result of one run: one world, one level, one technique.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct SimulationResult {
    /// Blocks the player broke.
    pub mined: u64,
    /// Length of the exposed sequence, duplicates included.
    pub exposed: u64,
    /// Exposed lava blocks, duplicates included.
    pub lava: u64,
    /// Unique ore blocks per family, whole veins counted.
    pub ores: OreCounts,
}

/// Merge the veins of every ore candidate into one list, in seed order,
/// keeping the first occurrence of each coordinate.
///
/// A seed already claimed by an earlier vein belongs to that same connected
/// component, so it is not expanded again.
fn merge_veins<'w, S: BlockSource + ?Sized>(
    world: &'w S,
    ores: &OreTable,
    candidates: &[Block<'w>],
) -> Vec<Block<'w>> {
    let mut merged = Vec::new();
    let mut claimed = HashSet::new();
    for seed in candidates {
        if claimed.contains(&seed.pos) {
            continue;
        }
        for block in expand_vein(world, ores, seed.pos) {
            if claimed.insert(block.pos) {
                merged.push(block);
            }
        }
    }
    merged
}

/// Turn a technique's exposed blocks into a result record.
///
/// Lava is counted per exposed block. Each exposed ore seeds a vein walk and
/// every ore block reached is counted once, under its own family.
/// [`crate::simulate`] checks [`crate::ensure_bounded_veins`] before calling
/// this.
pub fn aggregate<S: BlockSource + ?Sized>(
    world: &S,
    ores: &OreTable,
    outcome: &TechniqueOutcome<'_>,
) -> SimulationResult {
    let mut lava = 0;
    let mut candidates = Vec::new();
    for block in &outcome.exposed {
        if block.is_lava() {
            lava += 1;
        } else if ores.contains(block.id) {
            candidates.push(*block);
        }
    }

    let mut counts = OreCounts::default();
    for block in merge_veins(world, ores, &candidates) {
        if let Some(family) = ores.family_of(block.id) {
            counts.increment(family);
        }
    }

    tracing::debug!(
        exposed = outcome.exposed.len(),
        candidates = candidates.len(),
        lava,
        ores = counts.total(),
        "aggregated run"
    );

    SimulationResult {
        mined: outcome.mined,
        exposed: outcome.exposed.len() as u64,
        lava,
        ores: counts,
    }
}
