//! Parsing of the text maze description into grid-ready data.
//!
//! The format is line-oriented: the first line holds the number of layers
//! (the grid height), and every following line is one row of cells. Rows
//! are grouped into layers of equal depth, so row `r` maps to
//! `y = r / depth`, `z = r % depth`, and the column index maps to `x`.

use maze_escape_core::{CellState, Coordinate, Dimension};
use thiserror::Error;

const SYMBOL_SOLID: char = '#';
const SYMBOL_EMPTY: char = '.';
const SYMBOL_AGENT: char = 'B';
const SYMBOL_EXIT: char = 'E';

/// Errors that can occur while parsing a maze description.
#[derive(Debug, Error)]
pub(crate) enum LayoutError {
    /// The description contained no lines at all.
    #[error("maze description is empty")]
    EmptyDescription,
    /// The first line did not hold a positive layer count.
    #[error("layer count `{0}` is not a positive integer")]
    InvalidLayerCount(String),
    /// No cell rows followed the layer count line.
    #[error("maze description contains no rows")]
    MissingRows,
    /// A row's width differed from the first row's width.
    #[error("row {row} is {found} cells wide, expected {expected}")]
    RaggedRow {
        /// Zero-based index of the offending row.
        row: usize,
        /// Width established by the first row.
        expected: usize,
        /// Width actually found.
        found: usize,
    },
    /// The row count does not divide evenly into the declared layers.
    #[error("{rows} rows cannot be divided into {layers} equal layers")]
    UnevenLayers {
        /// Total number of cell rows in the description.
        rows: usize,
        /// Layer count declared on the first line.
        layers: u32,
    },
    /// No exit cell was present anywhere in the description.
    #[error("maze description contains no exit cell")]
    MissingExit,
}

/// An agent starting position discovered during parsing.
#[derive(Clone, Debug, PartialEq, Eq)]
pub(crate) struct AgentStart {
    label: String,
    coordinate: Coordinate,
}

impl AgentStart {
    /// Label assigned to the start, in parse order (`B0`, `B1`, ...).
    pub(crate) fn label(&self) -> &str {
        &self.label
    }

    /// Grid coordinate of the start.
    pub(crate) fn coordinate(&self) -> Coordinate {
        self.coordinate
    }
}

/// Fully parsed maze description, ready to populate a grid.
#[derive(Clone, Debug)]
pub(crate) struct MazeLayout {
    dimension: Dimension,
    cells: Vec<(Coordinate, CellState)>,
    starts: Vec<AgentStart>,
    exit: Coordinate,
    warnings: Vec<String>,
}

impl MazeLayout {
    /// Parses a maze description from its textual form.
    ///
    /// Unknown symbols are substituted with empty cells and reported via
    /// [`MazeLayout::warnings`] rather than failing the parse. When several
    /// exit cells appear the last one becomes the goal.
    pub(crate) fn parse(text: &str) -> Result<Self, LayoutError> {
        let mut lines = text.lines();
        let header = lines.next().ok_or(LayoutError::EmptyDescription)?;
        let layers: u32 = header
            .trim()
            .parse()
            .ok()
            .filter(|count| *count > 0)
            .ok_or_else(|| LayoutError::InvalidLayerCount(header.trim().to_owned()))?;

        let rows: Vec<&str> = lines.collect();
        if rows.is_empty() {
            return Err(LayoutError::MissingRows);
        }

        let expected = rows[0].chars().count();
        for (row, line) in rows.iter().enumerate() {
            let found = line.chars().count();
            if found != expected {
                return Err(LayoutError::RaggedRow {
                    row,
                    expected,
                    found,
                });
            }
        }

        if rows.len() % layers as usize != 0 {
            return Err(LayoutError::UnevenLayers {
                rows: rows.len(),
                layers,
            });
        }
        let depth = rows.len() / layers as usize;

        let width = u32::try_from(expected).unwrap_or(u32::MAX);
        let dimension = Dimension::new(width, layers, u32::try_from(depth).unwrap_or(u32::MAX));

        let mut cells = Vec::with_capacity(dimension.cell_count());
        let mut starts = Vec::new();
        let mut exit = None;
        let mut warnings = Vec::new();

        for (row, line) in rows.iter().enumerate() {
            let y = (row / depth) as i32;
            let z = (row % depth) as i32;
            for (column, symbol) in line.chars().enumerate() {
                let coordinate = Coordinate::new(column as i32, y, z);
                let state = match symbol {
                    SYMBOL_SOLID => CellState::Solid,
                    SYMBOL_EMPTY => CellState::Empty,
                    SYMBOL_AGENT => {
                        starts.push(AgentStart {
                            label: format!("B{}", starts.len()),
                            coordinate,
                        });
                        CellState::Occupied
                    }
                    SYMBOL_EXIT => {
                        exit = Some(coordinate);
                        CellState::Exit
                    }
                    unknown => {
                        warnings.push(format!(
                            "invalid character [{unknown}] at row {row}, column {column}; \
                             substituting with empty"
                        ));
                        CellState::Empty
                    }
                };
                cells.push((coordinate, state));
            }
        }

        Ok(Self {
            dimension,
            cells,
            starts,
            exit: exit.ok_or(LayoutError::MissingExit)?,
            warnings,
        })
    }

    /// Grid extents implied by the description.
    pub(crate) fn dimension(&self) -> Dimension {
        self.dimension
    }

    /// Every cell of the description with its initial state.
    pub(crate) fn cells(&self) -> &[(Coordinate, CellState)] {
        &self.cells
    }

    /// Agent starting positions in parse order.
    pub(crate) fn starts(&self) -> &[AgentStart] {
        &self.starts
    }

    /// Coordinate of the exit cell.
    pub(crate) fn exit(&self) -> Coordinate {
        self.exit
    }

    /// Human-readable warnings accumulated while parsing.
    pub(crate) fn warnings(&self) -> &[String] {
        &self.warnings
    }
}
