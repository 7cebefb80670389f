#![deny(
    unsafe_code,
    missing_docs,
    dead_code,
    unused_results,
    non_snake_case,
    unreachable_pub
)]

//! Breadth-first route search over the maze grid.
//!
//! A [`RouteFinder`] explores the 6-connected neighborhood of its origin in
//! a fixed direction order, recording discoveries in a disposable
//! [`tree::SearchTree`], and reconstructs the shortest route (by cell
//! count) by walking parent links back from the destination. Unreachable
//! destinations yield an empty route, never an error.

pub mod tree;

use std::collections::VecDeque;

use maze_escape_core::{CellState, Coordinate, Direction};
use maze_escape_world::Grid;

use crate::tree::SearchTree;

/// Ordered, single-consumption sequence of steps toward a destination.
///
/// The front element is the cell adjacent to the search origin; the back
/// element is the destination itself. The origin is never included.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct Route {
    steps: VecDeque<Coordinate>,
}

impl Route {
    /// Builds a route from pre-ordered steps. Primarily useful in tests.
    #[must_use]
    pub fn from_steps(steps: Vec<Coordinate>) -> Self {
        Self {
            steps: steps.into(),
        }
    }

    /// Next step to execute, without consuming it.
    #[must_use]
    pub fn peek(&self) -> Option<Coordinate> {
        self.steps.front().copied()
    }

    /// Consumes and returns the next step.
    pub fn pop(&mut self) -> Option<Coordinate> {
        self.steps.pop_front()
    }

    /// Number of steps remaining.
    #[must_use]
    pub fn len(&self) -> usize {
        self.steps.len()
    }

    /// Reports whether no steps remain.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.steps.is_empty()
    }

    /// Iterator over the remaining steps in execution order.
    pub fn steps(&self) -> impl Iterator<Item = Coordinate> + '_ {
        self.steps.iter().copied()
    }
}

/// Computes shortest passable routes between grid cells.
///
/// The finder holds only the search origin; the grid is borrowed per call,
/// so search always observes the occupancy of the moment it runs.
#[derive(Clone, Copy, Debug)]
pub struct RouteFinder {
    origin: Coordinate,
}

impl RouteFinder {
    /// Creates a finder seeded at the provided origin.
    #[must_use]
    pub const fn new(origin: Coordinate) -> Self {
        Self { origin }
    }

    /// Rebinds the search origin.
    pub fn set_location(&mut self, origin: Coordinate) {
        self.origin = origin;
    }

    /// Current search origin.
    #[must_use]
    pub const fn location(&self) -> Coordinate {
        self.origin
    }

    /// Searches for the shortest route from the origin to `destination`.
    ///
    /// Expansion visits the six axis-aligned neighbors in
    /// [`Direction::ORDERED`] priority, skipping out-of-bounds, `Solid`,
    /// and `Occupied` cells (`Exit` cells are explorable). The order is a
    /// deterministic tie-break only; path length is unaffected because all
    /// edges cost one step.
    ///
    /// An empty route means either "already there" (`origin ==
    /// destination`) or "no path exists"; callers that care about the
    /// difference compare origin and destination directly.
    #[must_use]
    pub fn find_route(&self, grid: &Grid, destination: Coordinate) -> Route {
        if self.origin == destination || !grid.is_valid_coordinate(self.origin) {
            return Route::default();
        }

        let mut tree = SearchTree::rooted_at(self.origin);
        let mut queue = VecDeque::from([tree.root()]);

        while let Some(node) = queue.pop_front() {
            let coordinate = tree.coordinate(node);
            if coordinate == destination {
                return extract_route(&tree, node);
            }

            for direction in Direction::ORDERED {
                let neighbor = coordinate.translated(direction);
                let Some(state) = grid.state_at(neighbor) else {
                    continue;
                };
                if matches!(state, CellState::Solid | CellState::Occupied) {
                    continue;
                }
                if let Some(child) = tree.add_child(node, neighbor) {
                    queue.push_back(child);
                }
            }
        }

        Route::default()
    }
}

/// Collects the root-to-destination chain into execution order, excluding
/// the root. The tree is discarded by the caller once the route exists.
fn extract_route(tree: &SearchTree, destination: tree::NodeId) -> Route {
    let mut steps = VecDeque::new();
    let mut cursor = Some(destination);

    while let Some(node) = cursor {
        let parent = tree.parent(node);
        if parent.is_none() {
            break;
        }
        steps.push_front(tree.coordinate(node));
        cursor = parent;
    }

    Route { steps }
}

#[cfg(test)]
mod tests {
    use super::*;
    use maze_escape_core::Dimension;

    #[test]
    fn empty_route_when_origin_equals_destination() {
        let grid = Grid::new(Dimension::new(3, 3, 3));
        let finder = RouteFinder::new(Coordinate::new(1, 1, 1));
        assert!(finder.find_route(&grid, Coordinate::new(1, 1, 1)).is_empty());
    }

    #[test]
    fn empty_route_when_origin_outside_grid() {
        let grid = Grid::new(Dimension::new(3, 3, 3));
        let finder = RouteFinder::new(Coordinate::new(-1, 0, 0));
        assert!(finder.find_route(&grid, Coordinate::new(1, 1, 1)).is_empty());
    }

    #[test]
    fn straight_run_route_has_unit_steps() {
        let grid = Grid::new(Dimension::new(6, 1, 1));
        let finder = RouteFinder::new(Coordinate::new(0, 0, 0));
        let mut route = finder.find_route(&grid, Coordinate::new(5, 0, 0));

        assert_eq!(route.len(), 5);
        let mut previous = finder.location();
        while let Some(step) = route.pop() {
            assert_eq!(previous.manhattan_distance(step), 1);
            previous = step;
        }
        assert_eq!(previous, Coordinate::new(5, 0, 0));
    }

    #[test]
    fn route_excludes_origin_and_includes_destination() {
        let grid = Grid::new(Dimension::new(4, 1, 1));
        let finder = RouteFinder::new(Coordinate::new(1, 0, 0));
        let route = finder.find_route(&grid, Coordinate::new(3, 0, 0));

        let steps: Vec<Coordinate> = route.steps().collect();
        assert_eq!(
            steps,
            vec![Coordinate::new(2, 0, 0), Coordinate::new(3, 0, 0)]
        );
    }

    #[test]
    fn solid_and_occupied_cells_are_not_explored() {
        let mut grid = Grid::new(Dimension::new(3, 1, 1));
        assert!(grid.update_cell(Coordinate::new(1, 0, 0), CellState::Solid));

        let finder = RouteFinder::new(Coordinate::new(0, 0, 0));
        assert!(finder.find_route(&grid, Coordinate::new(2, 0, 0)).is_empty());

        assert!(grid.update_cell(Coordinate::new(1, 0, 0), CellState::Occupied));
        assert!(finder.find_route(&grid, Coordinate::new(2, 0, 0)).is_empty());

        assert!(grid.update_cell(Coordinate::new(1, 0, 0), CellState::Empty));
        assert_eq!(finder.find_route(&grid, Coordinate::new(2, 0, 0)).len(), 2);
    }

    #[test]
    fn exit_cells_remain_explorable() {
        let mut grid = Grid::new(Dimension::new(3, 1, 1));
        assert!(grid.update_cell(Coordinate::new(1, 0, 0), CellState::Exit));

        let finder = RouteFinder::new(Coordinate::new(0, 0, 0));
        let route = finder.find_route(&grid, Coordinate::new(2, 0, 0));
        assert_eq!(route.len(), 2);
    }

    #[test]
    fn enclosed_destination_yields_empty_route() {
        let mut grid = Grid::new(Dimension::new(3, 3, 3));
        let destination = Coordinate::new(1, 1, 1);
        for direction in Direction::ORDERED {
            assert!(grid.update_cell(destination.translated(direction), CellState::Solid));
        }

        let finder = RouteFinder::new(Coordinate::new(0, 0, 0));
        assert!(finder.find_route(&grid, destination).is_empty());
    }

    #[test]
    fn search_is_deterministic_for_identical_grids() {
        let grid = Grid::new(Dimension::new(4, 4, 4));
        let finder = RouteFinder::new(Coordinate::new(0, 0, 0));
        let first = finder.find_route(&grid, Coordinate::new(3, 3, 3));
        let second = finder.find_route(&grid, Coordinate::new(3, 3, 3));
        assert_eq!(first, second);
        assert_eq!(first.len(), 9);
    }
}
