use std::ops::Range;

use lw_core::{BlockPos, BlockSource, Direction};

use crate::config::{BranchMiningConfig, Corridor, PokeBranch, PokeHoleConfig, Technique};
use crate::error::SimResult;
use crate::pattern::{
    ExposedBlocks, one_by_one, one_by_one_end, poke_start, probe, two_by_one, two_by_one_end,
};

/// Corridor distance between consecutive branch pairs in the drive loop.
pub const CORRIDOR_STRIDE: i32 = 13;

/// Corridor steps walked between seams when branches carry poke holes.
pub(crate) const POKE_CORRIDOR_STEPS: Range<i32> = 2..12;

/// Blocks mined to open both poke holes of one segment.
const POKE_HOLE_MINED: u64 = 10;

/// Everything one technique walk produced.
#[derive(Debug, Clone, Default)]
pub struct TechniqueOutcome<'w> {
    /// Exposed blocks in walk order, duplicates included.
    pub exposed: ExposedBlocks<'w>,
    /// Blocks a player would have to break.
    pub mined: u64,
}

impl<'w> TechniqueOutcome<'w> {
    fn push(&mut self, blocks: ExposedBlocks<'w>) {
        self.exposed.extend(blocks);
    }

    /// Append another outcome's blocks and add its mined count.
    pub fn absorb(&mut self, other: TechniqueOutcome<'w>) {
        self.exposed.extend(other.exposed);
        self.mined += other.mined;
    }
}

impl Technique {
    /// Walk this technique through `world`.
    pub fn run<'w, S: BlockSource + ?Sized>(
        &self,
        world: &'w S,
    ) -> SimResult<TechniqueOutcome<'w>> {
        match self {
            Self::Basic(config) => standard_branch_mining(world, config),
            Self::PokeHoles(config) => branch_with_poke_holes(world, config),
        }
    }
}

/// Origins of the corridor sections after the opening pair, `n * 13` blocks
/// down the corridor for `n` in `0..sections`.
fn section_origins(corridor: &Corridor) -> impl Iterator<Item = BlockPos> + use<> {
    let Corridor {
        base,
        start,
        sections,
        ..
    } = *corridor;
    (0..sections).map(move |n| base.displace(start, n * CORRIDOR_STRIDE))
}

/// The three four-tall columns that join a corridor section to its branches:
/// at the section start, one step in, and at the far end.
fn seam_columns<'w, S: BlockSource + ?Sized>(
    world: &'w S,
    base: Direction,
    anchor: BlockPos,
    far: i32,
) -> ExposedBlocks<'w> {
    let mut blocks = Vec::with_capacity(12);
    for amount in [0, 1, far] {
        let column = base.displace(anchor, amount);
        for dy in -1..=2 {
            blocks.push(probe(world, column.up(dy)));
        }
    }
    blocks
}

fn corridor_expansion<'w, S: BlockSource + ?Sized>(
    world: &'w S,
    base: Direction,
    anchor: BlockPos,
    branch_spacing: i32,
    steps: Range<i32>,
) -> TechniqueOutcome<'w> {
    let mut outcome = TechniqueOutcome {
        exposed: seam_columns(world, base, anchor, branch_spacing),
        mined: 2 + 2 * u64::from(branch_spacing.unsigned_abs()),
    };
    for n in steps {
        outcome.push(two_by_one(world, base, base.displace(anchor, n)));
    }
    outcome
}

/// A two-tall branch of `length` steps from `origin`, then its end cap.
fn branch<'w, S: BlockSource + ?Sized>(
    world: &'w S,
    direction: Direction,
    origin: BlockPos,
    length: i32,
) -> TechniqueOutcome<'w> {
    let mut outcome = TechniqueOutcome::default();
    for n in 0..length {
        outcome.push(two_by_one(world, direction, direction.displace(origin, n)));
        outcome.mined += 2;
    }
    outcome.push(two_by_one_end(
        world,
        direction,
        direction.displace(origin, length - 1),
    ));
    outcome
}

/// Both poke holes at `poke`, one to each side of `direction`.
fn poke_holes<'w, S: BlockSource + ?Sized>(
    world: &'w S,
    direction: Direction,
    poke: BlockPos,
) -> ExposedBlocks<'w> {
    let (left, right) = direction.perpendicular_pair();
    let mut blocks = Vec::with_capacity(2 * (1 + 3 * 5 + 6));
    for side in [left, right] {
        blocks.extend(poke_start(world, side, side.next(poke)));
        for k in 2..5 {
            blocks.extend(one_by_one(world, side, side.displace(poke, k)));
        }
        blocks.extend(one_by_one_end(world, side, side.displace(poke, 5)));
    }
    blocks
}

/// A branch cut in `shape.pokes` segments of `shape.spacing` steps, each
/// ending in a pair of poke holes one block up.
fn poke_branch<'w, S: BlockSource + ?Sized>(
    world: &'w S,
    direction: Direction,
    start: BlockPos,
    shape: PokeBranch,
) -> TechniqueOutcome<'w> {
    let PokeBranch { pokes, spacing } = shape;
    let mut outcome = TechniqueOutcome::default();
    let mut origin = start;
    for n in 0..pokes {
        origin = direction.displace(origin, n * spacing);
        for m in 0..spacing {
            outcome.push(two_by_one(world, direction, direction.displace(origin, m)));
        }
        let poke = direction.displace(origin.up(1), spacing);
        outcome.push(poke_holes(world, direction, poke));
        outcome.mined += POKE_HOLE_MINED + 2 * u64::from(spacing.unsigned_abs());
    }
    outcome.push(two_by_one_end(
        world,
        direction,
        direction.displace(origin, spacing * pokes - 1),
    ));
    outcome
}

/// Both branches of a pair. They start together one block to the first
/// perpendicular side of `origin`.
fn branch_pair<'w, S: BlockSource + ?Sized>(
    world: &'w S,
    base: Direction,
    origin: BlockPos,
    length: i32,
) -> TechniqueOutcome<'w> {
    let (left, right) = base.perpendicular_pair();
    let start = left.next(origin);
    let mut outcome = branch(world, left, start, length);
    outcome.absorb(branch(world, right, start, length));
    outcome
}

fn poke_branch_pair<'w, S: BlockSource + ?Sized>(
    world: &'w S,
    base: Direction,
    origin: BlockPos,
    shape: PokeBranch,
) -> TechniqueOutcome<'w> {
    let (left, right) = base.perpendicular_pair();
    let start = left.next(origin);
    let mut outcome = poke_branch(world, left, start, shape);
    outcome.absorb(poke_branch(world, right, start, shape));
    outcome
}

/// Plain branch mining: a two-tall corridor along the base direction with
/// pairs of two-tall branches running off both sides.
///
/// The first pair is cut at the start; every further pair `n` sits
/// `n * 13` blocks down the corridor behind its own corridor section.
pub fn standard_branch_mining<'w, S: BlockSource + ?Sized>(
    world: &'w S,
    config: &BranchMiningConfig,
) -> SimResult<TechniqueOutcome<'w>> {
    let (corridor, length) = config.plan()?;
    let base = corridor.base;

    let mut outcome = branch_pair(world, base, corridor.start, length);
    for origin in section_origins(&corridor) {
        let spacing = corridor.branch_spacing;
        outcome.absorb(corridor_expansion(world, base, origin, spacing, 2..spacing));
        outcome.absorb(branch_pair(world, base, origin, length));
    }
    Ok(outcome)
}

/// Branch mining where every branch is cut in segments, each ending in a
/// pair of one-tall poke holes to either side.
pub fn branch_with_poke_holes<'w, S: BlockSource + ?Sized>(
    world: &'w S,
    config: &PokeHoleConfig,
) -> SimResult<TechniqueOutcome<'w>> {
    let (corridor, shape) = config.plan()?;
    let base = corridor.base;

    let mut outcome = poke_branch_pair(world, base, corridor.start, shape);
    for origin in section_origins(&corridor) {
        outcome.absorb(corridor_expansion(
            world,
            base,
            origin,
            corridor.branch_spacing,
            POKE_CORRIDOR_STEPS,
        ));
        outcome.absorb(poke_branch_pair(world, base, origin, shape));
    }
    Ok(outcome)
}
