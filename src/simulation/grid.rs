//! Static passable/blocked cell map.

use crate::simulation::heading::Heading;
use std::fmt;

/// A cell coordinate. Signed so that neighbours of border cells can be
/// expressed and rejected by [`Grid::in_bounds`].
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash)]
pub struct Position {
    pub x: i32,
    pub y: i32,
}

impl Position {
    #[must_use]
    pub const fn new(x: i32, y: i32) -> Self {
        Self { x, y }
    }

    #[must_use]
    pub const fn offset(self, (dx, dy): (i32, i32)) -> Self {
        Self {
            x: self.x.saturating_add(dx),
            y: self.y.saturating_add(dy),
        }
    }

    /// The neighbouring cell one step along `heading`.
    #[must_use]
    pub const fn step(self, heading: Heading) -> Self {
        self.offset(heading.step())
    }
}

impl fmt::Display for Position {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "[{}, {}]", self.x, self.y)
    }
}

/// Row-major map of passable cells.
///
/// New grids are fully blocked; cells are opened with [`Grid::set_passable`]
/// while loading or generating and the grid is treated as immutable after that.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Grid {
    width: i32,
    height: i32,
    cells: Vec<bool>,
}

impl Grid {
    /// Creates a fully blocked grid. Returns `None` for non-positive dimensions.
    #[must_use]
    pub fn new(width: i32, height: i32) -> Option<Self> {
        if width <= 0 || height <= 0 {
            return None;
        }
        #[allow(clippy::cast_sign_loss)] // both positive
        let len = width as usize * height as usize;
        Some(Self {
            width,
            height,
            cells: vec![false; len],
        })
    }

    #[must_use]
    pub const fn width(&self) -> i32 {
        self.width
    }

    #[must_use]
    pub const fn height(&self) -> i32 {
        self.height
    }

    #[must_use]
    pub const fn in_bounds(&self, pos: Position) -> bool {
        0 <= pos.x && pos.x < self.width && 0 <= pos.y && pos.y < self.height
    }

    /// Returns the stored flag.
    ///
    /// # Panics
    ///
    /// Panics if `pos` is out of bounds. Callers check [`Grid::in_bounds`] first.
    #[must_use]
    pub fn is_passable(&self, pos: Position) -> bool {
        self.cells[self.index(pos)]
    }

    /// # Panics
    ///
    /// Panics if `pos` is out of bounds.
    pub fn set_passable(&mut self, pos: Position, passable: bool) {
        let idx = self.index(pos);
        self.cells[idx] = passable;
    }

    /// In bounds and passable.
    #[must_use]
    pub fn is_open(&self, pos: Position) -> bool {
        self.in_bounds(pos) && self.is_passable(pos)
    }

    /// Number of passable cells.
    #[must_use]
    pub fn open_count(&self) -> usize {
        self.cells.iter().filter(|&&c| c).count()
    }

    #[allow(clippy::cast_sign_loss)] // guarded by the assertion
    fn index(&self, pos: Position) -> usize {
        assert!(
            self.in_bounds(pos),
            "grid query {pos} outside {}x{}",
            self.width,
            self.height
        );
        pos.y as usize * self.width as usize + pos.x as usize
    }
}
