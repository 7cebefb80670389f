//! Tick loop driving agents through the maze toward the exit.
//!
//! The simulation owns the grid and lends it to each agent in turn, once
//! per tick. Agents that arrive or prove unable to reach the exit are
//! removed only at the end of the tick, never while the active set is
//! being iterated.

use maze_escape_core::{AgentId, CellState, Coordinate};
use maze_escape_system_movement::Agent;
use maze_escape_world::Grid;

use crate::layout::MazeLayout;

/// Observable outcomes of a single simulation tick.
#[derive(Clone, Debug, PartialEq, Eq)]
pub(crate) enum TickEvent {
    /// An agent completed one step of its route.
    Advanced {
        /// Agent that moved.
        id: AgentId,
        /// Cell the agent now occupies.
        to: Coordinate,
    },
    /// An agent's next step was impassable; it will retry unchanged.
    Blocked {
        /// Agent that held its position.
        id: AgentId,
    },
    /// An agent reached the exit and left the simulation.
    Escaped {
        /// Agent that escaped.
        id: AgentId,
        /// Direction codes of every step it took.
        moves: String,
    },
    /// No route to the exit exists for an agent; it was retired.
    Stranded {
        /// Agent that was retired.
        id: AgentId,
    },
}

/// Authoritative simulation state: the grid plus all active agents.
#[derive(Debug)]
pub(crate) struct Simulation {
    grid: Grid,
    goal: Coordinate,
    agents: Vec<Agent>,
}

impl Simulation {
    /// Builds the grid from a parsed layout and spawns one agent per
    /// start, identified in layout order.
    pub(crate) fn new(layout: &MazeLayout) -> Self {
        let mut grid = Grid::new(layout.dimension());
        for (coordinate, state) in layout.cells() {
            if *state != CellState::Empty {
                let updated = grid.update_cell(*coordinate, *state);
                debug_assert!(updated);
            }
        }

        let agents = layout
            .starts()
            .iter()
            .enumerate()
            .map(|(index, start)| Agent::new(AgentId::new(index as u32), start.coordinate()))
            .collect();

        Self {
            grid,
            goal: layout.exit(),
            agents,
        }
    }

    /// Reports whether every agent has escaped or been retired.
    pub(crate) fn is_settled(&self) -> bool {
        self.agents.is_empty()
    }

    /// Advances the simulation by one tick, appending the outcomes to
    /// `out_events`.
    ///
    /// Each active agent first plans a route if it has none (retiring it
    /// when the exit is unreachable), then attempts at most one step.
    pub(crate) fn tick(&mut self, out_events: &mut Vec<TickEvent>) {
        let goal = self.goal;
        let mut stranded = Vec::new();

        for agent in &mut self.agents {
            if agent.location() == goal {
                continue;
            }

            if agent.route().is_empty() && !agent.calculate_route(&self.grid, goal) {
                stranded.push(agent.id());
                continue;
            }

            if agent.step(&mut self.grid) {
                out_events.push(TickEvent::Advanced {
                    id: agent.id(),
                    to: agent.location(),
                });
            } else if !agent.route().is_empty() {
                out_events.push(TickEvent::Blocked { id: agent.id() });
            }
        }

        self.agents.retain(|agent| {
            if agent.location() == goal {
                out_events.push(TickEvent::Escaped {
                    id: agent.id(),
                    moves: agent.moves_taken(),
                });
                false
            } else if stranded.contains(&agent.id()) {
                out_events.push(TickEvent::Stranded { id: agent.id() });
                false
            } else {
                true
            }
        });
    }
}
