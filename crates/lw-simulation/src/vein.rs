use std::collections::{HashSet, VecDeque};

use lw_core::{Block, BlockPos, BlockSource, OreTable};

use crate::error::{SimError, SimResult};
use crate::pattern::probe;

/// Reject worlds whose unstored coordinates read as ore: a vein seeded
/// there would grow without end.
pub fn ensure_bounded_veins<S: BlockSource + ?Sized>(
    world: &S,
    ores: &OreTable,
) -> SimResult<()> {
    match world.background() {
        Some(fill) if ores.contains(fill) => Err(SimError::OreFill {
            fill: fill.to_string(),
        }),
        _ => Ok(()),
    }
}

/// Grow `seed` into the connected set of ore blocks around it.
///
/// Breadth-first over the 26 blocks sharing a face, edge or corner; a
/// neighbour joins when its type is in `ores`, whatever its family. The seed
/// itself is always the first element, even if it is not an ore. The result
/// is in discovery order with every coordinate at most once.
///
/// Terminates only if the ores in `world` are finite; check with
/// [`ensure_bounded_veins`] first.
pub fn expand_vein<'w, S: BlockSource + ?Sized>(
    world: &'w S,
    ores: &OreTable,
    seed: BlockPos,
) -> Vec<Block<'w>> {
    let mut vein = Vec::new();
    let mut seen = HashSet::from([seed]);
    let mut queue = VecDeque::from([probe(world, seed)]);

    while let Some(block) = queue.pop_front() {
        vein.push(block);
        for neighbor in block.pos.neighbors() {
            if seen.contains(&neighbor) {
                continue;
            }
            let candidate = probe(world, neighbor);
            if ores.contains(candidate.id) {
                seen.insert(neighbor);
                queue.push_back(candidate);
            }
        }
    }
    vein
}

#[cfg(test)]
mod tests {
    use std::path::Path;

    use super::*;
    use lw_core::ChunkedWorld;

    fn ores() -> &'static OreTable {
        OreTable::standard()
    }

    #[test]
    fn isolated_seed_is_a_singleton() {
        let mut world = ChunkedWorld::new("stone");
        world.set(BlockPos::new(0, 0, 0), "gold_ore");
        let vein = expand_vein(&world, ores(), BlockPos::new(0, 0, 0));
        assert_eq!(vein.len(), 1);
        assert_eq!(vein[0].id, "gold_ore");
    }

    #[test]
    fn straight_line_found_from_any_seed() {
        let mut world = ChunkedWorld::new("stone");
        for x in 0..5 {
            world.set(BlockPos::new(x, 0, 0), "coal_ore");
        }
        for seed in 0..5 {
            let vein = expand_vein(&world, ores(), BlockPos::new(seed, 0, 0));
            assert_eq!(vein.len(), 5, "seed at x={seed}");
            assert_eq!(vein[0].pos, BlockPos::new(seed, 0, 0));
        }
    }

    #[test]
    fn corners_connect() {
        let mut world = ChunkedWorld::new("stone");
        world.set(BlockPos::new(0, 0, 0), "diamond_ore");
        world.set(BlockPos::new(1, 1, 1), "diamond_ore");
        world.set(BlockPos::new(2, 2, 2), "diamond_ore");
        world.set(BlockPos::new(4, 4, 4), "diamond_ore");
        let vein = expand_vein(&world, ores(), BlockPos::new(0, 0, 0));
        assert_eq!(vein.len(), 3);
    }

    #[test]
    fn different_families_merge_when_adjacent() {
        let mut world = ChunkedWorld::new("stone");
        world.set(BlockPos::new(0, 0, 0), "iron_ore");
        world.set(BlockPos::new(0, 1, 0), "deepslate_copper_ore");
        world.set(BlockPos::new(0, 2, 0), "lava");
        let vein = expand_vein(&world, ores(), BlockPos::new(0, 0, 0));
        let ids: Vec<_> = vein.iter().map(|b| b.id).collect();
        assert_eq!(ids, vec!["iron_ore", "deepslate_copper_ore"]);
    }

    #[test]
    fn discovery_order_is_breadth_first() {
        let mut world = ChunkedWorld::new("stone");
        for x in -2..=2 {
            world.set(BlockPos::new(x, 0, 0), "redstone_ore");
        }
        let vein = expand_vein(&world, ores(), BlockPos::new(0, 0, 0));
        let xs: Vec<_> = vein.iter().map(|b| b.pos.x).collect();
        assert_eq!(xs, vec![0, -1, 1, -2, 2]);
    }

    #[test]
    fn solid_cube_has_no_duplicates() {
        let mut world = ChunkedWorld::new("stone");
        world.fill_cuboid(BlockPos::new(0, 0, 0), BlockPos::new(3, 3, 3), "lapis_ore");
        let vein = expand_vein(&world, ores(), BlockPos::new(1, 1, 1));
        assert_eq!(vein.len(), 64);
        let unique: HashSet<_> = vein.iter().map(|b| b.pos).collect();
        assert_eq!(unique.len(), 64);
    }

    #[test]
    fn ore_fill_is_rejected() {
        let world =
            ChunkedWorld::from_json(r#"{"fill":"coal_ore"}"#, Path::new("ore.json")).unwrap();
        let err = ensure_bounded_veins(&world, ores()).unwrap_err();
        assert!(matches!(&err, SimError::OreFill { fill } if fill == "coal_ore"));
        assert!(err.to_string().contains("coal_ore"));

        // The same fill is harmless when the table does not list it.
        let table = OreTable::parse("iron_ore:iron\n").unwrap();
        assert!(ensure_bounded_veins(&world, &table).is_ok());
        assert!(ensure_bounded_veins(&ChunkedWorld::new("stone"), ores()).is_ok());
    }

    #[test]
    fn custom_table_limits_the_walk() {
        let mut world = ChunkedWorld::new("stone");
        world.set(BlockPos::new(0, 0, 0), "ancient_debris");
        world.set(BlockPos::new(1, 0, 0), "ancient_debris");
        world.set(BlockPos::new(2, 0, 0), "iron_ore");
        let table = OreTable::parse("ancient_debris:diamonds\n").unwrap();
        let vein = expand_vein(&world, &table, BlockPos::new(0, 0, 0));
        assert_eq!(vein.len(), 2);
    }
}
