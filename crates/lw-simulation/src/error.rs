use lw_core::{BlockPos, WorldError};

/// Alias for `Result<T, SimError>`.
pub type SimResult<T> = Result<T, SimError>;

/// Errors raised while configuring or running a simulation.
#[derive(Debug, thiserror::Error)]
pub enum SimError {
    /// Branches would overlap and excavate the same blocks twice.
    #[error(
        "{technique}: branch spacing {spacing} is below the minimum of {minimum}, would duplicate excavation"
    )]
    BranchSpacingTooSmall {
        /// Name of the technique being configured.
        technique: &'static str,
        /// The rejected spacing.
        spacing: u32,
        /// The smallest accepted spacing.
        minimum: u32,
    },

    /// Poke segments would overlap and excavate the same blocks twice.
    #[error("poke spacing {spacing} is below the minimum of {minimum}, would duplicate excavation")]
    PokeSpacingTooSmall {
        /// The rejected spacing.
        spacing: u32,
        /// The smallest accepted spacing.
        minimum: u32,
    },

    /// A count or length does not fit a signed block offset.
    #[error("{technique}: {parameter} {value} is too large")]
    ParameterTooLarge {
        /// Name of the technique being configured.
        technique: &'static str,
        /// Which parameter was rejected.
        parameter: &'static str,
        /// The rejected value.
        value: u32,
    },

    /// The walk would probe past the edge of the coordinate range.
    #[error("{technique}: a walk from {start} reaches {reach} blocks out and leaves the world")]
    OutOfBounds {
        /// Name of the technique being configured.
        technique: &'static str,
        /// The corridor start.
        start: BlockPos,
        /// Farthest horizontal distance from the start the walk can probe.
        reach: i128,
    },

    /// Every block outside the stored region is an ore, so veins never end.
    #[error("world fill `{fill}` is an ore; its veins would be unbounded")]
    OreFill {
        /// The world's fill type.
        fill: String,
    },

    /// The world or ore table could not be loaded.
    #[error(transparent)]
    World(#[from] WorldError),

    /// A result row could not be written.
    #[error("cannot write results to {target}: {source}")]
    Sink {
        /// Where the rows were going.
        target: String,
        /// The underlying I/O error.
        source: std::io::Error,
    },
}

impl SimError {
    /// Whether this error comes from rejected technique parameters rather
    /// than from I/O.
    pub fn is_configuration(&self) -> bool {
        matches!(
            self,
            Self::BranchSpacingTooSmall { .. }
                | Self::PokeSpacingTooSmall { .. }
                | Self::ParameterTooLarge { .. }
                | Self::OutOfBounds { .. }
        )
    }
}
