//! Every technique is a sequence of these cross-sections placed at successive
//! offsets. Each generator returns the blocks it exposes in a fixed order;
//! that order later decides which seed claims a shared ore block.

use lw_core::{Block, BlockPos, BlockSource, Direction};

/// Blocks exposed while walking a technique, in walk order.
///
/// The same coordinate may appear more than once; duplicates are resolved
/// during aggregation.
pub type ExposedBlocks<'w> = Vec<Block<'w>>;

/// Read the block at `pos`.
pub(crate) fn probe<'w, S: BlockSource + ?Sized>(world: &'w S, pos: BlockPos) -> Block<'w> {
    Block::new(pos, world.block_at(pos))
}

/// The three positions across the tunnel, left to right along x or z.
fn lateral(direction: Direction, anchor: BlockPos) -> [BlockPos; 3] {
    if direction.is_north_south() {
        [anchor.offset(-1, 0, 0), anchor, anchor.offset(1, 0, 0)]
    } else {
        [anchor.offset(0, 0, -1), anchor, anchor.offset(0, 0, 1)]
    }
}

/// One step of a two-tall tunnel.
///
/// ```text
///     [ ][x][ ]
///     [x][x][x]
///     [x][x][x]   <- anchor row
///     [ ][x][ ]
/// ```
///
/// Yields 8 blocks: the six lateral positions at the anchor height and one
/// above, then the floor below and the block two above the anchor. Facing
/// north or south the lateral position varies slowest; facing east or west
/// the height does.
pub fn two_by_one<'w, S: BlockSource + ?Sized>(
    world: &'w S,
    direction: Direction,
    anchor: BlockPos,
) -> ExposedBlocks<'w> {
    let mut blocks = Vec::with_capacity(8);
    if direction.is_north_south() {
        for pos in lateral(direction, anchor) {
            for dy in 0..2 {
                blocks.push(probe(world, pos.up(dy)));
            }
        }
    } else {
        for dy in 0..2 {
            for pos in lateral(direction, anchor) {
                blocks.push(probe(world, pos.up(dy)));
            }
        }
    }
    blocks.push(probe(world, anchor.up(-1)));
    blocks.push(probe(world, anchor.up(2)));
    blocks
}

/// One step of a one-tall crawl tunnel: the lateral row at the anchor height,
/// then the blocks below and above the anchor. Yields 5 blocks.
pub fn one_by_one<'w, S: BlockSource + ?Sized>(
    world: &'w S,
    direction: Direction,
    anchor: BlockPos,
) -> ExposedBlocks<'w> {
    let mut blocks = Vec::with_capacity(6);
    for pos in lateral(direction, anchor) {
        blocks.push(probe(world, pos));
    }
    blocks.push(probe(world, anchor.up(-1)));
    blocks.push(probe(world, anchor.up(1)));
    blocks
}

/// The last step of a crawl tunnel: [`one_by_one`] plus the face ahead.
/// Yields 6 blocks.
pub fn one_by_one_end<'w, S: BlockSource + ?Sized>(
    world: &'w S,
    direction: Direction,
    anchor: BlockPos,
) -> ExposedBlocks<'w> {
    let mut blocks = one_by_one(world, direction, anchor);
    blocks.push(probe(world, direction.next(anchor)));
    blocks
}

/// The face ahead of a two-tall tunnel's last step. Yields 2 blocks.
pub fn two_by_one_end<'w, S: BlockSource + ?Sized>(
    world: &'w S,
    direction: Direction,
    anchor: BlockPos,
) -> ExposedBlocks<'w> {
    let ahead = direction.next(anchor);
    vec![probe(world, ahead), probe(world, ahead.up(1))]
}

/// The first block of a poke hole. Only the block above the anchor is new
/// whichever way the hole faces. Yields 1 block.
pub fn poke_start<S: BlockSource + ?Sized>(
    world: &S,
    _direction: Direction,
    anchor: BlockPos,
) -> ExposedBlocks<'_> {
    vec![probe(world, anchor.up(1))]
}

#[cfg(test)]
mod tests {
    use super::*;
    use lw_core::ChunkedWorld;
    use proptest::prelude::*;

    fn positions(blocks: &[Block<'_>]) -> Vec<(i32, i32, i32)> {
        blocks.iter().map(|b| (b.pos.x, b.pos.y, b.pos.z)).collect()
    }

    fn any_direction() -> impl Strategy<Value = Direction> {
        prop_oneof![
            Just(Direction::North),
            Just(Direction::South),
            Just(Direction::East),
            Just(Direction::West),
        ]
    }

    #[test]
    fn two_by_one_layout_facing_south() {
        let world = ChunkedWorld::new("stone");
        let blocks = two_by_one(&world, Direction::South, BlockPos::new(0, 10, 0));
        assert_eq!(
            positions(&blocks),
            vec![
                (-1, 10, 0),
                (-1, 11, 0),
                (0, 10, 0),
                (0, 11, 0),
                (1, 10, 0),
                (1, 11, 0),
                (0, 9, 0),
                (0, 12, 0),
            ]
        );
    }

    #[test]
    fn two_by_one_layout_facing_east() {
        let world = ChunkedWorld::new("stone");
        let blocks = two_by_one(&world, Direction::East, BlockPos::new(5, 0, 5));
        assert_eq!(
            positions(&blocks),
            vec![
                (5, 0, 4),
                (5, 0, 5),
                (5, 0, 6),
                (5, 1, 4),
                (5, 1, 5),
                (5, 1, 6),
                (5, -1, 5),
                (5, 2, 5),
            ]
        );
    }

    #[test]
    fn one_by_one_peeks_directly_above() {
        let world = ChunkedWorld::new("stone");
        let blocks = one_by_one(&world, Direction::North, BlockPos::new(0, 0, 0));
        assert_eq!(
            positions(&blocks),
            vec![(-1, 0, 0), (0, 0, 0), (1, 0, 0), (0, -1, 0), (0, 1, 0)]
        );
    }

    #[test]
    fn end_caps_look_ahead() {
        let world = ChunkedWorld::new("stone");
        let anchor = BlockPos::new(0, 0, 0);

        let cap = two_by_one_end(&world, Direction::West, anchor);
        assert_eq!(positions(&cap), vec![(-1, 0, 0), (-1, 1, 0)]);

        let end = one_by_one_end(&world, Direction::North, anchor);
        assert_eq!(end.last().map(|b| b.pos), Some(BlockPos::new(0, 0, -1)));

        for d in Direction::ALL {
            let start = poke_start(&world, d, anchor);
            assert_eq!(positions(&start), vec![(0, 1, 0)]);
        }
    }

    #[test]
    fn two_by_one_facing_west_rises_row_by_row() {
        let world = ChunkedWorld::new("stone");
        let blocks = two_by_one(&world, Direction::West, BlockPos::new(0, 0, 0));
        let heights: Vec<_> = blocks.iter().map(|b| b.pos.y).collect();
        assert_eq!(heights, vec![0, 0, 0, 1, 1, 1, -1, 2]);
        let lateral: Vec<_> = blocks[..3].iter().map(|b| b.pos.z).collect();
        assert_eq!(lateral, vec![-1, 0, 1]);

        let north = two_by_one(&world, Direction::North, BlockPos::new(0, 0, 0));
        let heights: Vec<_> = north.iter().map(|b| b.pos.y).collect();
        assert_eq!(heights, vec![0, 1, 0, 1, 0, 1, -1, 2]);
    }

    #[test]
    fn generators_report_world_types() {
        let mut world = ChunkedWorld::new("stone");
        world.set(BlockPos::new(0, 12, 0), "diamond_ore");
        let blocks = two_by_one(&world, Direction::South, BlockPos::new(0, 10, 0));
        assert_eq!(blocks[7].id, "diamond_ore");
        assert!(blocks[..7].iter().all(|b| b.id == "stone"));
    }

    proptest! {
        #[test]
        fn generator_sizes_are_fixed(
            d in any_direction(),
            x in -10_000i32..10_000,
            y in -64i32..320,
            z in -10_000i32..10_000,
        ) {
            let world = ChunkedWorld::new("stone");
            let anchor = BlockPos::new(x, y, z);
            prop_assert_eq!(two_by_one(&world, d, anchor).len(), 8);
            prop_assert_eq!(one_by_one(&world, d, anchor).len(), 5);
            prop_assert_eq!(one_by_one_end(&world, d, anchor).len(), 6);
            prop_assert_eq!(two_by_one_end(&world, d, anchor).len(), 2);
            prop_assert_eq!(poke_start(&world, d, anchor).len(), 1);
        }

        #[test]
        fn two_by_one_has_no_internal_duplicates(d in any_direction()) {
            let world = ChunkedWorld::new("stone");
            let blocks = two_by_one(&world, d, BlockPos::new(0, 0, 0));
            let unique: std::collections::HashSet<_> = blocks.iter().collect();
            prop_assert_eq!(unique.len(), blocks.len());
        }
    }
}
