#![deny(
    unsafe_code,
    missing_docs,
    dead_code,
    unused_results,
    non_snake_case,
    unreachable_pub
)]

//! Core contracts shared across the maze escape simulation.
//!
//! This crate defines the value types that connect the world, the routing
//! and movement systems, and the command-line adapter: discrete 3-D
//! coordinates and extents, the six axis-aligned travel directions, and the
//! passability states a grid cell can hold. Everything here is a plain
//! value; ownership of cell storage lives in the world crate.

use serde::{Deserialize, Serialize};

/// Location of a single grid cell expressed as integer x, y, z components.
///
/// Components are signed so that out-of-bounds probes (including negative
/// ones) remain representable; validity against a grid is decided by
/// [`Dimension::contains`].
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub struct Coordinate {
    x: i32,
    y: i32,
    z: i32,
}

impl Coordinate {
    /// Creates a new coordinate from its components.
    #[must_use]
    pub const fn new(x: i32, y: i32, z: i32) -> Self {
        Self { x, y, z }
    }

    /// Component along the width axis.
    #[must_use]
    pub const fn x(&self) -> i32 {
        self.x
    }

    /// Component along the height axis.
    #[must_use]
    pub const fn y(&self) -> i32 {
        self.y
    }

    /// Component along the depth axis.
    #[must_use]
    pub const fn z(&self) -> i32 {
        self.z
    }

    /// Returns the coordinate one step away in the provided direction.
    #[must_use]
    pub const fn translated(self, direction: Direction) -> Self {
        let (dx, dy, dz) = direction.delta();
        Self {
            x: self.x.saturating_add(dx),
            y: self.y.saturating_add(dy),
            z: self.z.saturating_add(dz),
        }
    }

    /// Computes the Manhattan distance between two coordinates.
    #[must_use]
    pub fn manhattan_distance(self, other: Coordinate) -> u32 {
        self.x.abs_diff(other.x) + self.y.abs_diff(other.y) + self.z.abs_diff(other.z)
    }

    /// Determines the unit direction leading from this coordinate to `other`.
    ///
    /// Returns `None` unless `other` is exactly one axis-aligned step away.
    /// Candidates are probed in [`Direction::ORDERED`] priority order.
    #[must_use]
    pub fn direction_to(self, other: Coordinate) -> Option<Direction> {
        Direction::ORDERED
            .into_iter()
            .find(|direction| self.translated(*direction) == other)
    }
}

/// Extents of the maze grid: width maps to x, height to y, depth to z.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Dimension {
    width: u32,
    height: u32,
    depth: u32,
}

impl Dimension {
    /// Creates a new dimension triple.
    #[must_use]
    pub const fn new(width: u32, height: u32, depth: u32) -> Self {
        Self {
            width,
            height,
            depth,
        }
    }

    /// Number of cells along the x axis.
    #[must_use]
    pub const fn width(&self) -> u32 {
        self.width
    }

    /// Number of cells along the y axis.
    #[must_use]
    pub const fn height(&self) -> u32 {
        self.height
    }

    /// Number of cells along the z axis.
    #[must_use]
    pub const fn depth(&self) -> u32 {
        self.depth
    }

    /// Total number of cells described by the dimension.
    ///
    /// Extents whose product does not fit `usize` collapse to zero, matching
    /// the empty-grid handling used throughout the world crate.
    #[must_use]
    pub fn cell_count(&self) -> usize {
        let product =
            u128::from(self.width) * u128::from(self.height) * u128::from(self.depth);
        usize::try_from(product).unwrap_or(0)
    }

    /// Reports whether the coordinate lies inside `[0, extent)` on all axes.
    #[must_use]
    pub fn contains(&self, coordinate: Coordinate) -> bool {
        in_extent(coordinate.x(), self.width)
            && in_extent(coordinate.y(), self.height)
            && in_extent(coordinate.z(), self.depth)
    }
}

fn in_extent(component: i32, extent: u32) -> bool {
    match u32::try_from(component) {
        Ok(value) => value < extent,
        Err(_) => false,
    }
}

/// Axis-aligned movement directions available to agents.
///
/// The declaration order doubles as the fixed neighbor-expansion priority
/// used by route search, so identical grids always produce identical routes.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Direction {
    /// Movement toward decreasing z.
    North,
    /// Movement toward increasing z.
    South,
    /// Movement toward increasing x.
    East,
    /// Movement toward decreasing x.
    West,
    /// Movement toward increasing y.
    Up,
    /// Movement toward decreasing y.
    Down,
}

impl Direction {
    /// All six directions in fixed expansion priority order.
    pub const ORDERED: [Direction; 6] = [
        Direction::North,
        Direction::South,
        Direction::East,
        Direction::West,
        Direction::Up,
        Direction::Down,
    ];

    /// Component-wise offset of one step in this direction.
    #[must_use]
    pub const fn delta(self) -> (i32, i32, i32) {
        match self {
            Direction::North => (0, 0, -1),
            Direction::South => (0, 0, 1),
            Direction::East => (1, 0, 0),
            Direction::West => (-1, 0, 0),
            Direction::Up => (0, 1, 0),
            Direction::Down => (0, -1, 0),
        }
    }

    /// Single-character code recorded in agent move logs.
    #[must_use]
    pub const fn as_char(self) -> char {
        match self {
            Direction::North => 'N',
            Direction::South => 'S',
            Direction::East => 'E',
            Direction::West => 'W',
            Direction::Up => 'U',
            Direction::Down => 'D',
        }
    }
}

/// Passability of a single grid cell.
///
/// Out-of-bounds probes are reported as `None` by the grid accessors rather
/// than through a stored sentinel state.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum CellState {
    /// Impassable wall.
    Solid,
    /// Passable, unoccupied terrain.
    Empty,
    /// Passable terrain currently held by an agent; impassable for planning
    /// and movement.
    Occupied,
    /// The goal marker; passable and never downgraded to `Empty` by
    /// movement.
    Exit,
}

/// Unique identifier assigned to an agent.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub struct AgentId(u32);

impl AgentId {
    /// Creates a new agent identifier with the provided numeric value.
    #[must_use]
    pub const fn new(value: u32) -> Self {
        Self(value)
    }

    /// Retrieves the numeric representation of the identifier.
    #[must_use]
    pub const fn get(&self) -> u32 {
        self.0
    }
}

#[cfg(test)]
mod tests {
    use super::{AgentId, CellState, Coordinate, Dimension, Direction};
    use serde::{de::DeserializeOwned, Serialize};

    #[test]
    fn manhattan_distance_matches_expectation() {
        let origin = Coordinate::new(1, 1, 0);
        let destination = Coordinate::new(4, 3, 2);
        assert_eq!(origin.manhattan_distance(destination), 7);
        assert_eq!(destination.manhattan_distance(origin), 7);
    }

    #[test]
    fn translation_follows_direction_deltas() {
        let origin = Coordinate::new(2, 2, 2);
        assert_eq!(
            origin.translated(Direction::North),
            Coordinate::new(2, 2, 1)
        );
        assert_eq!(
            origin.translated(Direction::South),
            Coordinate::new(2, 2, 3)
        );
        assert_eq!(origin.translated(Direction::East), Coordinate::new(3, 2, 2));
        assert_eq!(origin.translated(Direction::West), Coordinate::new(1, 2, 2));
        assert_eq!(origin.translated(Direction::Up), Coordinate::new(2, 3, 2));
        assert_eq!(origin.translated(Direction::Down), Coordinate::new(2, 1, 2));
    }

    #[test]
    fn direction_to_covers_all_unit_steps() {
        let origin = Coordinate::new(3, 3, 3);
        for direction in Direction::ORDERED {
            assert_eq!(
                origin.direction_to(origin.translated(direction)),
                Some(direction)
            );
        }
    }

    #[test]
    fn direction_to_rejects_non_adjacent_coordinates() {
        let origin = Coordinate::new(3, 3, 3);
        assert_eq!(origin.direction_to(origin), None);
        assert_eq!(origin.direction_to(Coordinate::new(4, 4, 3)), None);
        assert_eq!(origin.direction_to(Coordinate::new(5, 3, 3)), None);
    }

    #[test]
    fn dimension_rejects_negative_and_overflowing_components() {
        let dimension = Dimension::new(3, 2, 4);
        assert!(dimension.contains(Coordinate::new(0, 0, 0)));
        assert!(dimension.contains(Coordinate::new(2, 1, 3)));
        assert!(!dimension.contains(Coordinate::new(-1, 0, 0)));
        assert!(!dimension.contains(Coordinate::new(0, -1, 0)));
        assert!(!dimension.contains(Coordinate::new(0, 0, -1)));
        assert!(!dimension.contains(Coordinate::new(3, 0, 0)));
        assert!(!dimension.contains(Coordinate::new(0, 2, 0)));
        assert!(!dimension.contains(Coordinate::new(0, 0, 4)));
    }

    #[test]
    fn dimension_cell_count_multiplies_extents() {
        assert_eq!(Dimension::new(5, 3, 4).cell_count(), 60);
        assert_eq!(Dimension::new(0, 3, 4).cell_count(), 0);
    }

    #[test]
    fn direction_codes_match_move_log_alphabet() {
        let codes: String = Direction::ORDERED
            .into_iter()
            .map(Direction::as_char)
            .collect();
        assert_eq!(codes, "NSEWUD");
    }

    fn assert_round_trip<T>(value: &T)
    where
        T: Serialize + DeserializeOwned + PartialEq + std::fmt::Debug,
    {
        let bytes = bincode::serialize(value).expect("serialize");
        let restored: T = bincode::deserialize(&bytes).expect("deserialize");
        assert_eq!(&restored, value);
    }

    #[test]
    fn coordinate_round_trips_through_bincode() {
        assert_round_trip(&Coordinate::new(-1, 7, 42));
    }

    #[test]
    fn cell_state_round_trips_through_bincode() {
        assert_round_trip(&CellState::Exit);
    }

    #[test]
    fn agent_id_round_trips_through_bincode() {
        assert_round_trip(&AgentId::new(9));
    }
}
