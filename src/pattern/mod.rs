pub mod presets;

use crate::{Bounds, LifeError, Pos2, Result, Universe};

/// A named template of live cells, relative to its own origin.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Pattern {
    name: String,
    cells: Vec<Pos2>,
    origin: Pos2,
}

impl Pattern {
    pub fn new<T: Into<String>>(name: T, cells: Vec<Pos2>) -> Self {
        Self {
            name: name.into(),
            cells,
            origin: Pos2::zero(),
        }
    }

    /// An unnamed pattern holding `cells`.
    pub fn from_cells(cells: Vec<Pos2>) -> Self {
        Self::new("", cells)
    }

    /// Sets where [`Simulation::reset`](crate::Simulation::reset) stamps the pattern.
    pub fn with_origin(mut self, origin: Pos2) -> Self {
        self.origin = origin;
        self
    }

    #[inline]
    pub fn name(&self) -> &str {
        &self.name
    }
    #[inline]
    pub fn cells(&self) -> &[Pos2] {
        &self.cells
    }
    #[inline]
    pub fn origin(&self) -> Pos2 {
        self.origin
    }
    #[inline]
    pub fn is_empty(&self) -> bool {
        self.cells.is_empty()
    }

    /// Width and height of the bounding box, `(0, 0)` when empty.
    ///
    /// Widened to `i64`, since a box can span the whole `i32` range.
    pub fn size(&self) -> (i64, i64) {
        let Some(first) = self.cells.first() else {
            return (0, 0);
        };
        let (min, max) = self.cells.iter().fold((*first, *first), |(min, max), pos| {
            (
                Pos2::new(min.x.min(pos.x), min.y.min(pos.y)),
                Pos2::new(max.x.max(pos.x), max.y.max(pos.y)),
            )
        });
        (
            i64::from(max.x) - i64::from(min.x) + 1,
            i64::from(max.y) - i64::from(min.y) + 1,
        )
    }

    /// The same cells moved by `offset`.
    pub fn translated(&self, offset: Pos2) -> Result<Pattern> {
        Ok(Self {
            name: self.name.clone(),
            cells: translate(&self.cells, offset)?,
            origin: self.origin,
        })
    }

    /// Brings the pattern to life in `universe` with its origin at `offset`.
    ///
    /// Either every cell is stamped or, on error, none is.
    pub fn stamp(&self, universe: &mut Universe, offset: Pos2) -> Result<()> {
        let bounds = universe.bounds();
        let cells = translate(&self.cells, offset)?
            .into_iter()
            .map(|pos| bounds.resolve(pos))
            .collect::<Result<Vec<_>>>()?;
        for pos in cells {
            universe.set_alive(pos, true)?;
        }
        Ok(())
    }
}

fn translate(cells: &[Pos2], offset: Pos2) -> Result<Vec<Pos2>> {
    cells
        .iter()
        .map(|&pos| {
            pos.checked_add(offset).ok_or_else(|| {
                LifeError::invalid_argument(format!(
                    "offset {offset} moves cell {pos} outside the coordinate range"
                ))
            })
        })
        .collect()
}

/// Snapshot of the live cells of `universe` in row-major order.
pub fn to_pattern(universe: &Universe) -> Vec<Pos2> {
    universe.sorted_cells()
}

/// Builds a universe with the given topology holding `cells` moved by `offset`.
///
/// Fails as a whole if any translated cell is invalid for `bounds`.
pub fn from_pattern(cells: &[Pos2], offset: Pos2, bounds: Bounds) -> Result<Universe> {
    let mut universe = Universe::with_bounds(bounds)?;
    Pattern::from_cells(cells.to_vec()).stamp(&mut universe, offset)?;
    Ok(universe)
}
