//! Amoebot Lattice Topology
//!
//! Geometry of the triangular lattice that amoebots live on.
//!
//! # Coordinates
//!
//! Every lattice node is a [`Cell`] in axial coordinates `(q, r)` with an
//! implicit third axis `s = -q - r`. Each cell has exactly 6 neighbors, one
//! per [`Direction`], enumerated counter-clockwise starting at east:
//!
//! ```text
//!        NW (0,-1)   NE (1,-1)
//!             \     /
//!   W (-1,0) -- cell -- E (1,0)
//!             /     \
//!        SW (-1,1)   SE (0,1)
//! ```
//!
//! # Principal Axes
//!
//! Opposite directions share one of the three principal [`Axis`] values
//! (0°, 60°, 120°). Lattice lines parallel to an axis are identified by
//! [`Axis::line_key`] and cells along them are ordered by [`Axis::position`].
//!
//! All functions here are pure and total over `i64` coordinates.

mod cell;
mod direction;
mod shapes;

pub use cell::Cell;
pub use direction::{are_adjacent, count_occupied_neighbors, Axis, Direction, ParseDirectionError};
pub use shapes::{hexagon, line, parallelogram, ring, Ring};

/// Number of lattice neighbors per cell.
pub const DIRECTIONS: usize = 6;

/// Number of principal axes of the triangular lattice.
pub const AXES: usize = 3;

// Every axis is spanned by a direction and its opposite
const _: () = assert!(AXES * 2 == DIRECTIONS);
