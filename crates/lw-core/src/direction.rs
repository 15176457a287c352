use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::coords::BlockPos;

/// A cardinal direction on the horizontal plane.
///
/// North and south move along z (north is negative), east and west along x
/// (east is positive).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Direction {
    /// Towards negative z.
    North,
    /// Towards positive z.
    South,
    /// Towards positive x.
    East,
    /// Towards negative x.
    West,
}

impl Direction {
    /// All four directions.
    pub const ALL: [Direction; 4] = [Self::North, Self::South, Self::East, Self::West];

    /// Unit step as `(dx, dz)`.
    pub const fn step(self) -> (i32, i32) {
        match self {
            Self::North => (0, -1),
            Self::South => (0, 1),
            Self::East => (1, 0),
            Self::West => (-1, 0),
        }
    }

    /// The two directions on the other horizontal axis.
    pub const fn perpendicular_pair(self) -> (Direction, Direction) {
        match self {
            Self::East | Self::West => (Self::North, Self::South),
            Self::North | Self::South => (Self::East, Self::West),
        }
    }

    /// The direction pointing the other way.
    pub const fn opposite(self) -> Direction {
        match self {
            Self::North => Self::South,
            Self::South => Self::North,
            Self::East => Self::West,
            Self::West => Self::East,
        }
    }

    /// Whether this direction moves along the z axis.
    pub const fn is_north_south(self) -> bool {
        matches!(self, Self::North | Self::South)
    }

    /// Shift `pos` by `amount` blocks in this direction.
    pub const fn displace(self, pos: BlockPos, amount: i32) -> BlockPos {
        let (dx, dz) = self.step();
        pos.offset(dx * amount, 0, dz * amount)
    }

    /// Shift `pos` by a single block in this direction.
    pub const fn next(self, pos: BlockPos) -> BlockPos {
        self.displace(pos, 1)
    }

    /// Lowercase name, as accepted by [`FromStr`].
    pub const fn name(self) -> &'static str {
        match self {
            Self::North => "north",
            Self::South => "south",
            Self::East => "east",
            Self::West => "west",
        }
    }
}

impl fmt::Display for Direction {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

impl FromStr for Direction {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "north" | "n" => Ok(Self::North),
            "south" | "s" => Ok(Self::South),
            "east" | "e" => Ok(Self::East),
            "west" | "w" => Ok(Self::West),
            _ => Err(format!(
                "unknown direction \"{s}\". Use: north, south, east, west"
            )),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use proptest::prelude::*;

    fn any_direction() -> impl Strategy<Value = Direction> {
        prop_oneof![
            Just(Direction::North),
            Just(Direction::South),
            Just(Direction::East),
            Just(Direction::West),
        ]
    }

    #[test]
    fn displace_moves_along_one_axis() {
        let origin = BlockPos::new(10, 64, 10);
        assert_eq!(Direction::North.displace(origin, 3), BlockPos::new(10, 64, 7));
        assert_eq!(Direction::South.displace(origin, 3), BlockPos::new(10, 64, 13));
        assert_eq!(Direction::East.displace(origin, 3), BlockPos::new(13, 64, 10));
        assert_eq!(Direction::West.displace(origin, 3), BlockPos::new(7, 64, 10));
    }

    #[test]
    fn next_is_displace_by_one() {
        let origin = BlockPos::new(0, 0, 0);
        for d in Direction::ALL {
            assert_eq!(d.next(origin), d.displace(origin, 1));
        }
    }

    #[test]
    fn perpendicular_pairs() {
        assert_eq!(
            Direction::East.perpendicular_pair(),
            (Direction::North, Direction::South)
        );
        assert_eq!(
            Direction::West.perpendicular_pair(),
            (Direction::North, Direction::South)
        );
        assert_eq!(
            Direction::North.perpendicular_pair(),
            (Direction::East, Direction::West)
        );
        assert_eq!(
            Direction::South.perpendicular_pair(),
            (Direction::East, Direction::West)
        );
    }

    #[test]
    fn parse_names_and_abbreviations() {
        assert_eq!("South".parse::<Direction>().unwrap(), Direction::South);
        assert_eq!("w".parse::<Direction>().unwrap(), Direction::West);
        assert!("up".parse::<Direction>().is_err());
        for d in Direction::ALL {
            assert_eq!(d.to_string().parse::<Direction>().unwrap(), d);
        }
    }

    proptest! {
        #[test]
        fn displace_round_trips(
            d in any_direction(),
            x in -30_000_000i32..30_000_000,
            y in -64i32..320,
            z in -30_000_000i32..30_000_000,
            n in 0i32..10_000,
        ) {
            let pos = BlockPos::new(x, y, z);
            prop_assert_eq!(d.opposite().displace(d.displace(pos, n), n), pos);
        }

        #[test]
        fn perpendicular_pair_is_orthogonal(d in any_direction()) {
            let (a, b) = d.perpendicular_pair();
            prop_assert_eq!(a.opposite(), b);
            prop_assert_ne!(a.is_north_south(), d.is_north_south());
        }
    }
}
