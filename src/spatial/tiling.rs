//! Binary domino marker grid and its rectangle derivation
//!
//! A tiling of the order-N Aztec diamond is stored as a 2N x 2N grid of
//! occupancy bits. Each set bit marks one placed domino; the parity of its
//! (row, column) position determines the domino's orientation, colour class
//! and rectangle in rotated diamond coordinates. The grid is populated by the
//! shuffling generator and mutated in place by the heat-bath refiner.

use bitvec::vec::BitVec;

/// Occupancy pattern of a 2 x 2 plaquette
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Plaquette {
    /// Markers on the main diagonal (NW and SE), other corners empty
    Diagonal,
    /// Markers on the anti-diagonal (NE and SW), other corners empty
    AntiDiagonal,
    /// No markers at all
    Empty,
    /// Any other occupancy pattern
    Mixed,
}

/// Colour class of a rendered domino, keyed by marker position parity
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum DominoColor {
    /// Horizontal domino at even row, even column
    Red,
    /// Horizontal domino at odd row, odd column
    Green,
    /// Vertical domino at odd row, even column
    Blue,
    /// Vertical domino at even row, odd column
    Yellow,
}

/// Axis-aligned rectangle of one placed domino in rotated diamond coordinates
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub struct Domino {
    /// Left edge
    pub x: i64,
    /// Bottom edge
    pub y: i64,
    /// Horizontal extent (4 for horizontal dominoes, 2 for vertical)
    pub width: u32,
    /// Vertical extent (2 for horizontal dominoes, 4 for vertical)
    pub height: u32,
    /// Parity colour class
    pub color: DominoColor,
}

/// Square grid of domino markers
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Tiling {
    bits: BitVec,
    dimension: usize,
}

impl Tiling {
    /// Create an empty marker grid with the given side length
    pub fn empty(dimension: usize) -> Self {
        Self {
            bits: BitVec::repeat(false, dimension * dimension),
            dimension,
        }
    }

    /// Side length of the grid (2N for a diamond of order N)
    pub const fn dimension(&self) -> usize {
        self.dimension
    }

    /// Diamond order N implied by the grid dimension
    pub const fn order(&self) -> usize {
        self.dimension / 2
    }

    /// Whether the cell at (row, col) holds a marker; out-of-range reads are empty
    pub fn is_occupied(&self, row: usize, col: usize) -> bool {
        if row >= self.dimension || col >= self.dimension {
            return false;
        }
        self.bits
            .get(row * self.dimension + col)
            .is_some_and(|bit| *bit)
    }

    /// Set or clear the marker at (row, col); out-of-range writes are ignored
    pub fn set(&mut self, row: usize, col: usize, occupied: bool) {
        if row < self.dimension && col < self.dimension {
            self.bits.set(row * self.dimension + col, occupied);
        }
    }

    /// Number of markers (equals the number of placed dominoes)
    pub fn marker_count(&self) -> usize {
        self.bits.count_ones()
    }

    /// Classify the 2 x 2 plaquette anchored at (row, col)
    pub fn plaquette(&self, row: usize, col: usize) -> Plaquette {
        let nw = self.is_occupied(row, col);
        let ne = self.is_occupied(row, col + 1);
        let sw = self.is_occupied(row + 1, col);
        let se = self.is_occupied(row + 1, col + 1);

        match (nw, ne, sw, se) {
            (true, false, false, true) => Plaquette::Diagonal,
            (false, true, true, false) => Plaquette::AntiDiagonal,
            (false, false, false, false) => Plaquette::Empty,
            _ => Plaquette::Mixed,
        }
    }

    /// Derive the rectangle list for every placed domino
    ///
    /// The rectangle of a marker depends only on the parity of its position:
    /// same-parity markers are horizontal 4 x 2 rectangles, mixed-parity
    /// markers vertical 2 x 4 rectangles, laid out in the rotated coordinate
    /// frame the diamond is conventionally drawn in. Identical occupancy
    /// always yields identical rectangles.
    pub fn dominoes(&self) -> Vec<Domino> {
        let size = self.dimension as i64;
        let mut placed = Vec::with_capacity(self.marker_count());

        for row in 0..self.dimension {
            for col in 0..self.dimension {
                if !self.is_occupied(row, col) {
                    continue;
                }
                let i = row as i64;
                let j = col as i64;
                let horizontal = (row % 2) == (col % 2);
                let color = match (row % 2, col % 2) {
                    (0, 0) => DominoColor::Red,
                    (1, 1) => DominoColor::Green,
                    (1, 0) => DominoColor::Blue,
                    _ => DominoColor::Yellow,
                };
                let domino = if horizontal {
                    Domino {
                        x: j - i - 2,
                        y: size - (i + j),
                        width: 4,
                        height: 2,
                        color,
                    }
                } else {
                    Domino {
                        x: j - i - 1,
                        y: size - 1 - (i + j),
                        width: 2,
                        height: 4,
                        color,
                    }
                };
                placed.push(domino);
            }
        }

        placed
    }
}
