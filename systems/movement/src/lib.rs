#![deny(
    unsafe_code,
    missing_docs,
    dead_code,
    unused_results,
    non_snake_case,
    unreachable_pub
)]

//! Route-consuming agent movement over the shared maze grid.
//!
//! An [`Agent`] owns its pending route and a [`RouteFinder`] seeded at its
//! location; the grid itself is borrowed from the orchestrator per call, so
//! all occupancy mutation is serialized by the borrow checker. One call to
//! [`Agent::step`] executes at most one route step.

use maze_escape_core::{AgentId, CellState, Coordinate, Direction};
use maze_escape_system_routing::{Route, RouteFinder};
use maze_escape_world::Grid;

/// Observable movement state of an agent.
///
/// Planning happens synchronously inside [`Agent::calculate_route`], so no
/// separate planning state is ever observable between calls.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum AgentStatus {
    /// No planned route and not yet at the destination.
    Idle,
    /// A route is pending and its next step is currently passable.
    Moving,
    /// A route is pending but its next step is `Solid` or `Occupied`.
    Blocked,
    /// The current location equals the destination.
    Arrived,
}

/// A simulated entity navigating the grid one cell per tick.
#[derive(Clone, Debug)]
pub struct Agent {
    id: AgentId,
    location: Coordinate,
    destination: Coordinate,
    route: Route,
    finder: RouteFinder,
    moves: Vec<Direction>,
}

impl Agent {
    /// Creates an agent at the provided starting location.
    ///
    /// The destination defaults to the start; the agent reports `Arrived`
    /// until a route is requested.
    #[must_use]
    pub fn new(id: AgentId, location: Coordinate) -> Self {
        Self {
            id,
            location,
            destination: location,
            route: Route::default(),
            finder: RouteFinder::new(location),
            moves: Vec::new(),
        }
    }

    /// Identifier assigned to the agent.
    #[must_use]
    pub const fn id(&self) -> AgentId {
        self.id
    }

    /// Current position of the agent.
    #[must_use]
    pub const fn location(&self) -> Coordinate {
        self.location
    }

    /// Destination of the most recent route request.
    #[must_use]
    pub const fn destination(&self) -> Coordinate {
        self.destination
    }

    /// Remaining planned route.
    #[must_use]
    pub const fn route(&self) -> &Route {
        &self.route
    }

    /// Plans a route from the current location to `destination`.
    ///
    /// Returns false when no route exists, leaving the agent without a
    /// route; deciding what to do with an unreachable agent (typically
    /// retiring it) is the caller's policy.
    pub fn calculate_route(&mut self, grid: &Grid, destination: Coordinate) -> bool {
        self.destination = destination;
        self.finder.set_location(self.location);

        let route = self.finder.find_route(grid, destination);
        if route.is_empty() {
            self.route = Route::default();
            return false;
        }

        self.route = route;
        true
    }

    /// Executes at most one step of the pending route.
    ///
    /// Returns false without consuming the step when the route is empty or
    /// the next cell is currently `Solid` or `Occupied`; a blocked step is
    /// retried unchanged on a later call, and no replanning happens here.
    /// A step onto the cell the agent already occupies is discarded as a
    /// no-op. On success the agent occupies the new cell (`Exit` markers
    /// are never overwritten), vacates the old one, and logs the direction
    /// travelled.
    pub fn step(&mut self, grid: &mut Grid) -> bool {
        let Some(next) = self.route.peek() else {
            return false;
        };

        if next == self.location {
            let _ = self.route.pop();
            return false;
        }

        let Some(state) = grid.state_at(next) else {
            debug_assert!(false, "route step {next:?} lies outside the grid");
            return false;
        };
        if matches!(state, CellState::Solid | CellState::Occupied) {
            return false;
        }

        let Some(direction) = self.location.direction_to(next) else {
            debug_assert!(false, "route step {next:?} is not adjacent to {:?}", self.location);
            return false;
        };

        if state != CellState::Exit {
            let occupied = grid.update_cell(next, CellState::Occupied);
            debug_assert!(occupied);
        }
        let vacated = grid.update_cell(self.location, CellState::Empty);
        debug_assert!(vacated);

        self.moves.push(direction);
        self.location = next;
        let _ = self.route.pop();
        true
    }

    /// Movement state as observable against the provided grid.
    #[must_use]
    pub fn status(&self, grid: &Grid) -> AgentStatus {
        if self.location == self.destination {
            return AgentStatus::Arrived;
        }

        let Some(next) = self.route.peek() else {
            return AgentStatus::Idle;
        };

        match grid.state_at(next) {
            Some(CellState::Solid) | Some(CellState::Occupied) => AgentStatus::Blocked,
            _ => AgentStatus::Moving,
        }
    }

    /// Direction codes of every completed step, in the order moved.
    #[must_use]
    pub fn moves_taken(&self) -> String {
        self.moves.iter().map(|direction| direction.as_char()).collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use maze_escape_core::Dimension;

    fn corridor() -> Grid {
        Grid::new(Dimension::new(4, 1, 1))
    }

    #[test]
    fn step_without_route_is_a_no_op() {
        let mut grid = corridor();
        let mut agent = Agent::new(AgentId::new(0), Coordinate::new(0, 0, 0));
        assert!(!agent.step(&mut grid));
        assert_eq!(agent.location(), Coordinate::new(0, 0, 0));
    }

    #[test]
    fn no_op_step_is_discarded_without_moving() {
        let mut grid = corridor();
        let mut agent = Agent::new(AgentId::new(0), Coordinate::new(1, 0, 0));
        agent.route = Route::from_steps(vec![
            Coordinate::new(1, 0, 0),
            Coordinate::new(2, 0, 0),
        ]);

        assert!(!agent.step(&mut grid));
        assert_eq!(agent.location(), Coordinate::new(1, 0, 0));
        assert_eq!(agent.route().len(), 1);
        assert!(agent.moves_taken().is_empty());
    }

    #[test]
    fn blocked_step_is_retained_for_retry() {
        let mut grid = corridor();
        assert!(grid.update_cell(Coordinate::new(1, 0, 0), CellState::Solid));

        let mut agent = Agent::new(AgentId::new(0), Coordinate::new(0, 0, 0));
        agent.route = Route::from_steps(vec![Coordinate::new(1, 0, 0)]);

        assert!(!agent.step(&mut grid));
        assert!(!agent.step(&mut grid));
        assert_eq!(agent.route().peek(), Some(Coordinate::new(1, 0, 0)));
        assert_eq!(agent.location(), Coordinate::new(0, 0, 0));

        // The identical retry succeeds once the obstruction clears.
        assert!(grid.update_cell(Coordinate::new(1, 0, 0), CellState::Empty));
        assert!(agent.step(&mut grid));
        assert_eq!(agent.location(), Coordinate::new(1, 0, 0));
    }

    #[test]
    fn successful_step_updates_grid_occupancy() {
        let mut grid = corridor();
        let start = Coordinate::new(0, 0, 0);
        assert!(grid.update_cell(start, CellState::Occupied));

        let mut agent = Agent::new(AgentId::new(0), start);
        assert!(agent.calculate_route(&grid, Coordinate::new(2, 0, 0)));
        assert!(agent.step(&mut grid));

        assert_eq!(grid.state_at(start), Some(CellState::Empty));
        assert_eq!(
            grid.state_at(Coordinate::new(1, 0, 0)),
            Some(CellState::Occupied)
        );
        assert_eq!(agent.moves_taken(), "E");
    }

    #[test]
    fn exit_cell_state_is_never_overwritten() {
        let mut grid = corridor();
        let exit = Coordinate::new(1, 0, 0);
        assert!(grid.update_cell(exit, CellState::Exit));

        let mut agent = Agent::new(AgentId::new(0), Coordinate::new(0, 0, 0));
        assert!(agent.calculate_route(&grid, exit));
        assert!(agent.step(&mut grid));

        assert_eq!(grid.state_at(exit), Some(CellState::Exit));
        assert_eq!(agent.location(), exit);
    }

    #[test]
    fn unreachable_destination_leaves_agent_without_route() {
        let mut grid = corridor();
        assert!(grid.update_cell(Coordinate::new(1, 0, 0), CellState::Solid));

        let mut agent = Agent::new(AgentId::new(0), Coordinate::new(0, 0, 0));
        assert!(!agent.calculate_route(&grid, Coordinate::new(3, 0, 0)));
        assert!(agent.route().is_empty());
        assert_eq!(agent.status(&grid), AgentStatus::Idle);
    }

    #[test]
    fn status_reflects_route_and_grid_state() {
        let mut grid = corridor();
        let mut agent = Agent::new(AgentId::new(0), Coordinate::new(0, 0, 0));
        assert_eq!(agent.status(&grid), AgentStatus::Arrived);

        assert!(agent.calculate_route(&grid, Coordinate::new(3, 0, 0)));
        assert_eq!(agent.status(&grid), AgentStatus::Moving);

        assert!(grid.update_cell(Coordinate::new(1, 0, 0), CellState::Occupied));
        assert_eq!(agent.status(&grid), AgentStatus::Blocked);

        assert!(grid.update_cell(Coordinate::new(1, 0, 0), CellState::Empty));
        while agent.step(&mut grid) {}
        assert_eq!(agent.status(&grid), AgentStatus::Arrived);
        assert_eq!(agent.moves_taken(), "EEE");
    }
}
