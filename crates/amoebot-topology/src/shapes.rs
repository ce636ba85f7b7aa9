//! Deterministic enumeration of common lattice shapes.
//!
//! Rings are walked counter-clockwise starting at the south-west corner:
//!
//! - Ring 0: just the center (1 cell)
//! - Ring n > 0: 6 sides of n cells each (6n cells)
//!
//! A hexagon of radius n is the union of rings 0..=n and holds 1 + 3n(n+1)
//! cells.

use crate::{Cell, Direction};

/// Iterator over the cells at exactly `radius` from `center`.
#[derive(Debug, Clone)]
pub struct Ring {
    radius: u64,
    cursor: Cell,
    side: usize,
    step: u64,
    done: bool,
}

impl Ring {
    fn new(center: Cell, radius: u64) -> Self {
        let corner = Direction::SW.offset();
        // Radii past i64::MAX leave the coordinate range anyway; saturate
        let reach = i64::try_from(radius).unwrap_or(i64::MAX);
        let cursor = Cell::new(
            center.q.saturating_add(corner.q.saturating_mul(reach)),
            center.r.saturating_add(corner.r.saturating_mul(reach)),
        );
        Self {
            radius,
            cursor,
            side: 0,
            step: 0,
            done: false,
        }
    }
}

impl Iterator for Ring {
    type Item = Cell;

    fn next(&mut self) -> Option<Self::Item> {
        if self.done {
            return None;
        }
        if self.radius == 0 {
            self.done = true;
            return Some(self.cursor);
        }

        let cell = self.cursor;
        self.cursor = self.cursor.neighbor(Direction::from_index(self.side));
        self.step += 1;
        if self.step == self.radius {
            self.step = 0;
            self.side += 1;
            self.done = self.side == 6;
        }
        Some(cell)
    }

    fn size_hint(&self) -> (usize, Option<usize>) {
        if self.done {
            return (0, Some(0));
        }
        let total = if self.radius == 0 { Some(1) } else { self.radius.checked_mul(6) };
        let Some(total) = total else {
            return (usize::MAX, None);
        };
        let walked = self.side as u64 * self.radius + self.step;
        match usize::try_from(total - walked) {
            Ok(remaining) => (remaining, Some(remaining)),
            Err(_) => (usize::MAX, None),
        }
    }
}

/// Cells at exactly `radius` from `center`.
pub fn ring(center: Cell, radius: u64) -> Ring {
    Ring::new(center, radius)
}

/// All cells within `radius` of `center`, ring by ring.
pub fn hexagon(center: Cell, radius: u64) -> impl Iterator<Item = Cell> {
    (0..=radius).flat_map(move |n| ring(center, n))
}

/// `len` cells starting at `start` and stepping in `direction`.
pub fn line(start: Cell, direction: Direction, len: usize) -> impl Iterator<Item = Cell> {
    std::iter::successors(Some(start), move |c| Some(c.neighbor(direction))).take(len)
}

/// A `width` × `height` parallelogram anchored at the origin, column by column.
pub fn parallelogram(width: i64, height: i64) -> impl Iterator<Item = Cell> {
    (0..width).flat_map(move |q| (0..height).map(move |r| Cell::new(q, r)))
}
