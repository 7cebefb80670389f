#![deny(
    unsafe_code,
    missing_docs,
    dead_code,
    unused_results,
    non_snake_case,
    unreachable_pub
)]

//! Authoritative maze grid storage for the escape simulation.
//!
//! The grid exclusively owns every cell. Systems and agents borrow it from
//! the orchestrator for the duration of a call; because mutation requires
//! `&mut Grid`, no two holders can observe inconsistent occupancy mid-tick.

use maze_escape_core::{CellState, Coordinate, Dimension};

/// One addressable unit of the grid.
///
/// A cell's coordinate is stamped at grid construction and never changes;
/// only its state is mutated afterwards, exclusively through
/// [`Grid::update_cell`].
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct Cell {
    coordinate: Coordinate,
    state: CellState,
}

impl Cell {
    const fn new(coordinate: Coordinate) -> Self {
        Self {
            coordinate,
            state: CellState::Empty,
        }
    }

    /// Permanent location of the cell within the grid.
    #[must_use]
    pub const fn coordinate(&self) -> Coordinate {
        self.coordinate
    }

    /// Current passability state of the cell.
    #[must_use]
    pub const fn state(&self) -> CellState {
        self.state
    }
}

/// Dense 3-D grid of cells backed by a single contiguous buffer.
///
/// Every coordinate in `[0, width) x [0, height) x [0, depth)` maps to
/// exactly one cell whose stored coordinate equals its buffer position.
/// Out-of-range coordinates are reported, never indexed.
#[derive(Clone, Debug)]
pub struct Grid {
    dimension: Dimension,
    cells: Vec<Cell>,
}

impl Grid {
    /// Allocates a grid with every cell initialized to `Empty` and stamped
    /// with its own coordinate.
    ///
    /// Construction is all-or-nothing: the buffer is fully populated before
    /// the grid becomes observable.
    #[must_use]
    pub fn new(dimension: Dimension) -> Self {
        let mut cells = Vec::with_capacity(dimension.cell_count());
        for z in 0..dimension.depth() {
            for y in 0..dimension.height() {
                for x in 0..dimension.width() {
                    cells.push(Cell::new(Coordinate::new(x as i32, y as i32, z as i32)));
                }
            }
        }

        Self { dimension, cells }
    }

    /// Extents the grid was constructed with.
    #[must_use]
    pub const fn dimension(&self) -> Dimension {
        self.dimension
    }

    /// Reports whether the coordinate addresses a cell owned by this grid.
    #[must_use]
    pub fn is_valid_coordinate(&self, coordinate: Coordinate) -> bool {
        self.dimension.contains(coordinate)
    }

    /// Overwrites the state stored at the coordinate.
    ///
    /// Returns false and performs no mutation when the coordinate is
    /// invalid. A successful update is immediately visible to every holder
    /// of the grid reference.
    pub fn update_cell(&mut self, coordinate: Coordinate, state: CellState) -> bool {
        let Some(index) = self.index(coordinate) else {
            return false;
        };
        match self.cells.get_mut(index) {
            Some(cell) => {
                cell.state = state;
                true
            }
            None => false,
        }
    }

    /// Returns the cell stored at the coordinate, if the coordinate is
    /// valid.
    #[must_use]
    pub fn cell_at(&self, coordinate: Coordinate) -> Option<&Cell> {
        let index = self.index(coordinate)?;
        self.cells.get(index)
    }

    /// Returns the state stored at the coordinate, if the coordinate is
    /// valid.
    #[must_use]
    pub fn state_at(&self, coordinate: Coordinate) -> Option<CellState> {
        self.cell_at(coordinate).map(Cell::state)
    }

    /// Iterator over every cell in storage order.
    pub fn cells(&self) -> impl Iterator<Item = &Cell> {
        self.cells.iter()
    }

    fn index(&self, coordinate: Coordinate) -> Option<usize> {
        if !self.dimension.contains(coordinate) {
            return None;
        }

        let x = usize::try_from(coordinate.x()).ok()?;
        let y = usize::try_from(coordinate.y()).ok()?;
        let z = usize::try_from(coordinate.z()).ok()?;
        let width = usize::try_from(self.dimension.width()).ok()?;
        let height = usize::try_from(self.dimension.height()).ok()?;

        z.checked_mul(height)?
            .checked_add(y)?
            .checked_mul(width)?
            .checked_add(x)
    }
}
