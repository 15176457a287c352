use lw_core::{BlockSource, OreTable};

use crate::aggregate::{SimulationResult, aggregate};
use crate::config::Technique;
use crate::error::SimResult;
use crate::vein::ensure_bounded_veins;

/// Highest level of the default sweep.
pub const DEFAULT_TOP: i32 = 63;

/// Lowest level of the default sweep.
pub const DEFAULT_BOTTOM: i32 = -59;

/// An inclusive band of levels, walked from the top down.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct LevelRange {
    top: i32,
    bottom: i32,
}

impl Default for LevelRange {
    fn default() -> Self {
        Self::new(DEFAULT_TOP, DEFAULT_BOTTOM)
    }
}

impl LevelRange {
    /// A range between two levels, in either order.
    pub fn new(a: i32, b: i32) -> Self {
        Self {
            top: a.max(b),
            bottom: a.min(b),
        }
    }

    /// The single level `y`.
    pub fn single(y: i32) -> Self {
        Self::new(y, y)
    }

    /// Highest level.
    pub fn top(&self) -> i32 {
        self.top
    }

    /// Lowest level.
    pub fn bottom(&self) -> i32 {
        self.bottom
    }

    /// Levels from top to bottom, both included.
    pub fn levels(&self) -> impl Iterator<Item = i32> + use<> {
        (self.bottom..=self.top).rev()
    }

    /// Number of levels.
    pub fn len(&self) -> usize {
        (i64::from(self.top) - i64::from(self.bottom) + 1) as usize
    }

    /// Always false; a range holds at least one level.
    pub fn is_empty(&self) -> bool {
        false
    }
}

/// Receives one result row per simulated level.
pub trait RowSink {
    /// Persist the result for level `y`. Called in sweep order.
    fn record(&mut self, y: i32, result: &SimulationResult) -> SimResult<()>;
}

impl RowSink for Vec<(i32, SimulationResult)> {
    fn record(&mut self, y: i32, result: &SimulationResult) -> SimResult<()> {
        self.push((y, result.clone()));
        Ok(())
    }
}

/// Run one technique once and aggregate what it exposed.
///
/// Fails without walking if the configuration is rejected or the world's
/// fill is an ore.
pub fn simulate<S: BlockSource + ?Sized>(
    world: &S,
    technique: &Technique,
    ores: &OreTable,
) -> SimResult<SimulationResult> {
    technique.validate()?;
    ensure_bounded_veins(world, ores)?;
    let outcome = technique.run(world)?;
    Ok(aggregate(world, ores, &outcome))
}

/// Run `technique` at every level of `levels`, top down, handing each result
/// to `sink` before starting the next level.
///
/// Returns the number of rows recorded. A rejected configuration or an ore
/// fill fails before the first level; a sink failure stops the sweep with the earlier rows
/// already recorded.
pub fn sweep<S, K>(
    world: &S,
    technique: &Technique,
    levels: LevelRange,
    ores: &OreTable,
    sink: &mut K,
) -> SimResult<usize>
where
    S: BlockSource + ?Sized,
    K: RowSink + ?Sized,
{
    technique.validate()?;
    ensure_bounded_veins(world, ores)?;

    let mut recorded = 0;
    for y in levels.levels() {
        let result = simulate(world, &technique.clone().at_level(y), ores)?;
        sink.record(y, &result)?;
        recorded += 1;
        tracing::info!(
            technique = technique.name(),
            y,
            mined = result.mined,
            ores = result.ores.total(),
            "level complete"
        );
    }
    Ok(recorded)
}

#[cfg(test)]
mod tests {
    use std::path::Path;

    use super::*;
    use crate::config::{BranchMiningConfig, PokeHoleConfig};
    use crate::error::SimError;
    use lw_core::{BlockPos, ChunkedWorld, Direction, OreFamily};

    fn tiny_basic() -> Technique {
        Technique::Basic(
            BranchMiningConfig::default()
                .with_base_direction(Direction::South)
                .with_start(BlockPos::new(0, 0, 0))
                .with_branch_pairs(1)
                .with_branch_length(1)
                .with_branch_spacing(2),
        )
    }

    #[test]
    fn default_range_spans_123_levels() {
        let range = LevelRange::default();
        assert_eq!(range.top(), 63);
        assert_eq!(range.bottom(), -59);
        assert_eq!(range.len(), 123);
        assert_eq!(range.levels().next(), Some(63));
        assert_eq!(range.levels().last(), Some(-59));
    }

    #[test]
    fn range_corners_in_any_order() {
        assert_eq!(LevelRange::new(-3, 4), LevelRange::new(4, -3));
        assert_eq!(LevelRange::single(5).levels().collect::<Vec<_>>(), vec![5]);
    }

    #[test]
    fn end_to_end_synthetic_world() {
        let mut world = ChunkedWorld::new("air");
        world.set(BlockPos::new(1, 2, 0), "iron_ore");
        world.set(BlockPos::new(2, 0, 0), "lava");

        let result = simulate(&world, &tiny_basic(), OreTable::standard()).unwrap();
        assert_eq!(result.ores.get(OreFamily::Iron), 1);
        assert_eq!(result.ores.total(), 1);
        assert_eq!(result.lava, 1);
        assert_eq!(result.mined, 4);
        assert_eq!(result.exposed, 20);
    }

    #[test]
    fn sweep_records_top_down() {
        let mut world = ChunkedWorld::new("stone");
        world.set(BlockPos::new(1, 3, 0), "diamond_ore");

        let mut rows: Vec<(i32, SimulationResult)> = Vec::new();
        let count = sweep(
            &world,
            &tiny_basic(),
            LevelRange::new(0, 2),
            OreTable::standard(),
            &mut rows,
        )
        .unwrap();

        assert_eq!(count, 3);
        let ys: Vec<_> = rows.iter().map(|(y, _)| *y).collect();
        assert_eq!(ys, vec![2, 1, 0]);
        // Only the run at y = 1 reaches the ceiling at y = 3.
        let diamonds: Vec<_> = rows
            .iter()
            .map(|(_, r)| r.ores.get(OreFamily::Diamonds))
            .collect();
        assert_eq!(diamonds, vec![1, 1, 0]);
    }

    #[test]
    fn bad_configuration_records_nothing() {
        let world = ChunkedWorld::new("stone");
        let technique = Technique::PokeHoles(PokeHoleConfig::default().with_poke_spacing(1));
        let mut rows: Vec<(i32, SimulationResult)> = Vec::new();
        let err = sweep(
            &world,
            &technique,
            LevelRange::default(),
            OreTable::standard(),
            &mut rows,
        )
        .unwrap_err();
        assert!(matches!(err, SimError::PokeSpacingTooSmall { .. }));
        assert!(rows.is_empty());
    }

    #[test]
    fn ore_filled_world_fails_fast() {
        let world =
            ChunkedWorld::from_json(r#"{"fill":"coal_ore"}"#, Path::new("ore.json")).unwrap();
        let err = simulate(&world, &tiny_basic(), OreTable::standard()).unwrap_err();
        assert!(matches!(err, SimError::OreFill { .. }));
        assert!(!err.is_configuration());

        let mut rows: Vec<(i32, SimulationResult)> = Vec::new();
        let err = sweep(
            &world,
            &tiny_basic(),
            LevelRange::default(),
            OreTable::standard(),
            &mut rows,
        )
        .unwrap_err();
        assert!(matches!(err, SimError::OreFill { .. }));
        assert!(rows.is_empty());
    }

    struct FailingSink {
        accepted: usize,
    }

    impl RowSink for FailingSink {
        fn record(&mut self, _y: i32, _result: &SimulationResult) -> SimResult<()> {
            if self.accepted == 2 {
                return Err(SimError::Sink {
                    target: "test".into(),
                    source: std::io::Error::other("disk full"),
                });
            }
            self.accepted += 1;
            Ok(())
        }
    }

    #[test]
    fn sink_failure_stops_the_sweep() {
        let world = ChunkedWorld::new("stone");
        let mut sink = FailingSink { accepted: 0 };
        let err = sweep(
            &world,
            &tiny_basic(),
            LevelRange::new(10, 0),
            OreTable::standard(),
            &mut sink,
        )
        .unwrap_err();
        assert!(matches!(err, SimError::Sink { .. }));
        assert_eq!(sink.accepted, 2);
    }
}
