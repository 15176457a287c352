use std::fmt;

use lw_core::{BlockPos, Direction};

use crate::error::{SimError, SimResult};
use crate::technique::{CORRIDOR_STRIDE, POKE_CORRIDOR_STEPS};

/// Where both techniques start by default; the height is set per level.
pub const DEFAULT_START: BlockPos = BlockPos::new(255, 0, 255);

/// Smallest branch spacing for plain branch mining.
pub const MIN_BRANCH_SPACING: u32 = 2;

/// Smallest branch spacing when branches carry poke holes.
pub const MIN_POKE_BRANCH_SPACING: u32 = 10;

/// Smallest distance between poke segments on one branch.
pub const MIN_POKE_SPACING: u32 = 2;

/// A validated main corridor in signed block units.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub(crate) struct Corridor {
    pub base: Direction,
    pub start: BlockPos,
    /// Corridor sections after the opening pair.
    pub sections: i32,
    pub branch_spacing: i32,
}

impl Corridor {
    fn new(
        technique: &'static str,
        base: Direction,
        start: BlockPos,
        pairs: u32,
        branch_spacing: u32,
    ) -> SimResult<Self> {
        Ok(Self {
            base,
            start,
            sections: signed(technique, "branch pairs", pairs.saturating_sub(1))?,
            branch_spacing: signed(technique, "branch spacing", branch_spacing)?,
        })
    }

    /// Distance along the corridor to the farthest seam, given how far past
    /// its origin the last section probes. Zero without sections.
    fn reach(&self, section_length: i32) -> i128 {
        if self.sections == 0 {
            return 0;
        }
        i128::from(self.sections - 1) * i128::from(CORRIDOR_STRIDE) + i128::from(section_length)
    }
}

/// Validated shape of one poke-hole branch.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub(crate) struct PokeBranch {
    pub pokes: i32,
    pub spacing: i32,
}

/// Blocks a poke hole reaches sideways from its branch.
const POKE_HOLE_REACH: i128 = 6;

/// `value` as a signed step count.
fn signed(technique: &'static str, parameter: &'static str, value: u32) -> SimResult<i32> {
    i32::try_from(value).map_err(|_| SimError::ParameterTooLarge {
        technique,
        parameter,
        value,
    })
}

fn within(value: i32, below: i128, above: i128) -> bool {
    let value = i128::from(value);
    value - below >= i128::from(i32::MIN) && value + above <= i128::from(i32::MAX)
}

/// Every probe lies within `reach` of the start on x and z, and from one
/// below to two above it on y.
fn check_reach(technique: &'static str, start: BlockPos, reach: i128) -> SimResult<()> {
    if within(start.x, reach, reach) && within(start.z, reach, reach) && within(start.y, 1, 2) {
        Ok(())
    } else {
        Err(SimError::OutOfBounds {
            technique,
            start,
            reach,
        })
    }
}

/// Parameters for plain branch mining.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct BranchMiningConfig {
    /// Direction the main corridor advances.
    pub base_direction: Direction,
    /// Corridor start; `y` is the player's feet.
    pub start: BlockPos,
    /// Number of perpendicular branch pairs.
    pub branch_pairs: u32,
    /// Length of each branch in blocks.
    pub branch_length: u32,
    /// Corridor distance between branch pairs.
    pub branch_spacing: u32,
}

impl Default for BranchMiningConfig {
    fn default() -> Self {
        Self {
            base_direction: Direction::South,
            start: DEFAULT_START,
            branch_pairs: 16,
            branch_length: 160,
            branch_spacing: 5,
        }
    }
}

impl BranchMiningConfig {
    /// Set the corridor direction.
    pub fn with_base_direction(mut self, direction: Direction) -> Self {
        self.base_direction = direction;
        self
    }

    /// Set the corridor start.
    pub fn with_start(mut self, start: BlockPos) -> Self {
        self.start = start;
        self
    }

    /// Set the number of branch pairs.
    pub fn with_branch_pairs(mut self, pairs: u32) -> Self {
        self.branch_pairs = pairs;
        self
    }

    /// Set the branch length.
    pub fn with_branch_length(mut self, length: u32) -> Self {
        self.branch_length = length;
        self
    }

    /// Set the branch spacing.
    pub fn with_branch_spacing(mut self, spacing: u32) -> Self {
        self.branch_spacing = spacing;
        self
    }

    /// Reject parameters that would excavate the same blocks twice or walk
    /// off the coordinate range.
    pub fn validate(&self) -> SimResult<()> {
        self.plan().map(drop)
    }

    /// The validated corridor and branch length.
    pub(crate) fn plan(&self) -> SimResult<(Corridor, i32)> {
        let technique = TechniqueKind::Basic.name();
        if self.branch_spacing < MIN_BRANCH_SPACING {
            return Err(SimError::BranchSpacingTooSmall {
                technique,
                spacing: self.branch_spacing,
                minimum: MIN_BRANCH_SPACING,
            });
        }
        let corridor = Corridor::new(
            technique,
            self.base_direction,
            self.start,
            self.branch_pairs,
            self.branch_spacing,
        )?;
        let length = signed(technique, "branch length", self.branch_length)?;

        // The branch starts one block to the side and its cap looks one past
        // the last step.
        let reach = corridor.reach(corridor.branch_spacing) + i128::from(length) + 1;
        check_reach(technique, self.start, reach)?;
        Ok((corridor, length))
    }
}

/// Parameters for branch mining with poke holes.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PokeHoleConfig {
    /// Direction the main corridor advances.
    pub base_direction: Direction,
    /// Corridor start; `y` is the player's feet.
    pub start: BlockPos,
    /// Number of perpendicular branch pairs.
    pub branch_pairs: u32,
    /// Poke segments per branch.
    pub pokes_per_branch: u32,
    /// Tunnel length of each poke segment.
    pub poke_spacing: u32,
    /// Corridor distance between branch pairs.
    pub branch_spacing: u32,
}

impl Default for PokeHoleConfig {
    fn default() -> Self {
        Self {
            base_direction: Direction::South,
            start: DEFAULT_START,
            branch_pairs: 10,
            pokes_per_branch: 25,
            poke_spacing: 5,
            branch_spacing: 12,
        }
    }
}

impl PokeHoleConfig {
    /// Set the corridor direction.
    pub fn with_base_direction(mut self, direction: Direction) -> Self {
        self.base_direction = direction;
        self
    }

    /// Set the corridor start.
    pub fn with_start(mut self, start: BlockPos) -> Self {
        self.start = start;
        self
    }

    /// Set the number of branch pairs.
    pub fn with_branch_pairs(mut self, pairs: u32) -> Self {
        self.branch_pairs = pairs;
        self
    }

    /// Set the number of poke segments per branch.
    pub fn with_pokes_per_branch(mut self, pokes: u32) -> Self {
        self.pokes_per_branch = pokes;
        self
    }

    /// Set the poke segment length.
    pub fn with_poke_spacing(mut self, spacing: u32) -> Self {
        self.poke_spacing = spacing;
        self
    }

    /// Set the branch spacing.
    pub fn with_branch_spacing(mut self, spacing: u32) -> Self {
        self.branch_spacing = spacing;
        self
    }

    /// Reject parameters that would excavate the same blocks twice or walk
    /// off the coordinate range.
    pub fn validate(&self) -> SimResult<()> {
        self.plan().map(drop)
    }

    /// The validated corridor and branch shape.
    pub(crate) fn plan(&self) -> SimResult<(Corridor, PokeBranch)> {
        let technique = TechniqueKind::PokeHoles.name();
        if self.branch_spacing < MIN_POKE_BRANCH_SPACING {
            return Err(SimError::BranchSpacingTooSmall {
                technique,
                spacing: self.branch_spacing,
                minimum: MIN_POKE_BRANCH_SPACING,
            });
        }
        if self.poke_spacing < MIN_POKE_SPACING {
            return Err(SimError::PokeSpacingTooSmall {
                spacing: self.poke_spacing,
                minimum: MIN_POKE_SPACING,
            });
        }
        let corridor = Corridor::new(
            technique,
            self.base_direction,
            self.start,
            self.branch_pairs,
            self.branch_spacing,
        )?;
        let branch = PokeBranch {
            pokes: signed(technique, "pokes per branch", self.pokes_per_branch)?,
            spacing: signed(technique, "poke spacing", self.poke_spacing)?,
        };

        // Segment origins advance by 0, s, 2s, ...; the last segment, its
        // poke holes and the cap add at most pokes * s + 1 beyond the last
        // origin, which sits one block beside the corridor.
        let pokes = i128::from(branch.pokes);
        let spacing = i128::from(branch.spacing);
        let along = 2 + spacing * pokes * (pokes - 1).max(0) / 2 + spacing * pokes.max(1);
        let section = corridor.branch_spacing.max(POKE_CORRIDOR_STEPS.end);
        let reach = corridor.reach(section) + along + POKE_HOLE_REACH;
        check_reach(technique, self.start, reach)?;
        Ok((corridor, branch))
    }
}

/// Which technique to run, without its parameters.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum TechniqueKind {
    /// Plain branch mining.
    Basic,
    /// Branch mining with poke holes.
    PokeHoles,
}

impl TechniqueKind {
    /// Both techniques.
    pub const ALL: [TechniqueKind; 2] = [Self::Basic, Self::PokeHoles];

    /// Select a technique by name: `basic` (or `branch`) picks plain branch
    /// mining, any other name picks poke holes.
    pub fn from_name(name: &str) -> Self {
        match name.to_lowercase().as_str() {
            "basic" | "branch" => Self::Basic,
            _ => Self::PokeHoles,
        }
    }

    /// Short name used in file names and output.
    pub const fn name(self) -> &'static str {
        match self {
            Self::Basic => "basic",
            Self::PokeHoles => "poke",
        }
    }
}

impl fmt::Display for TechniqueKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

/// A technique together with its parameters.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Technique {
    /// Plain branch mining.
    Basic(BranchMiningConfig),
    /// Branch mining with poke holes.
    PokeHoles(PokeHoleConfig),
}

impl From<TechniqueKind> for Technique {
    fn from(kind: TechniqueKind) -> Self {
        match kind {
            TechniqueKind::Basic => Self::Basic(BranchMiningConfig::default()),
            TechniqueKind::PokeHoles => Self::PokeHoles(PokeHoleConfig::default()),
        }
    }
}

impl Technique {
    /// Which technique this is.
    pub fn kind(&self) -> TechniqueKind {
        match self {
            Self::Basic(_) => TechniqueKind::Basic,
            Self::PokeHoles(_) => TechniqueKind::PokeHoles,
        }
    }

    /// Short name used in file names and output.
    pub fn name(&self) -> &'static str {
        self.kind().name()
    }

    /// Corridor start.
    pub fn start(&self) -> BlockPos {
        match self {
            Self::Basic(config) => config.start,
            Self::PokeHoles(config) => config.start,
        }
    }

    /// The same technique started at height `y`.
    pub fn at_level(self, y: i32) -> Self {
        match self {
            Self::Basic(config) => {
                let start = config.start.with_y(y);
                Self::Basic(config.with_start(start))
            }
            Self::PokeHoles(config) => {
                let start = config.start.with_y(y);
                Self::PokeHoles(config.with_start(start))
            }
        }
    }

    /// Reject parameters that would excavate the same blocks twice or walk
    /// off the coordinate range.
    pub fn validate(&self) -> SimResult<()> {
        match self {
            Self::Basic(config) => config.validate(),
            Self::PokeHoles(config) => config.validate(),
        }
    }
}
