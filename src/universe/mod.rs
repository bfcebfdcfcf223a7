mod bounds;
mod window;

pub use self::bounds::Bounds;
pub use self::window::Window;
use crate::{Pos2, Result};
use std::collections::HashSet;

/// The live cells of one generation together with the topology they live on.
///
/// Storage is sparse: only live cells are kept, so an unbounded plane costs
/// memory proportional to its population. Every stored position is already
/// normalized for [`Universe::bounds`].
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Universe {
    alive: HashSet<Pos2>,
    bounds: Bounds,
}

impl Universe {
    /// An empty, unbounded universe.
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_bounds(bounds: Bounds) -> Result<Self> {
        bounds.validate()?;
        Ok(Self {
            alive: HashSet::new(),
            bounds,
        })
    }

    /// Builds a universe from cells that are already valid for `bounds`.
    pub(crate) fn from_normalized(bounds: Bounds, alive: HashSet<Pos2>) -> Self {
        debug_assert!(
            alive.iter().all(|&pos| bounds.normalize(pos) == Some(pos)),
            "live set holds cells outside of the bounds"
        );
        Self { alive, bounds }
    }

    #[inline]
    pub fn bounds(&self) -> Bounds {
        self.bounds
    }

    /// Whether the cell addressed by `pos` is alive.
    ///
    /// Coordinates outside a non-wrapping box are never alive.
    #[inline]
    pub fn is_alive(&self, pos: Pos2) -> bool {
        self.bounds
            .normalize(pos)
            .is_some_and(|pos| self.alive.contains(&pos))
    }

    pub fn set_alive(&mut self, pos: Pos2, alive: bool) -> Result<()> {
        let pos = self.bounds.resolve(pos)?;
        if alive {
            self.alive.insert(pos);
        } else {
            self.alive.remove(&pos);
        }
        Ok(())
    }

    /// Number of live Moore neighbors of `pos`, each normalized on its own.
    ///
    /// This is the hot path of every step and never allocates.
    #[inline]
    pub fn neighbor_count(&self, pos: Pos2) -> u8 {
        // fold onto the torus first so offsets never overflow at the i32 limits
        let pos = if self.bounds.wraps() {
            self.bounds.normalize(pos).unwrap_or(pos)
        } else {
            pos
        };
        let mut count = 0;
        for offset in Pos2::NEIGHBOR_OFFSETS {
            if let Some(neighbor) = pos.checked_add(offset) {
                count += u8::from(self.is_alive(neighbor));
            }
        }
        count
    }

    /// Iterates the live cells in no particular order.
    ///
    /// The iterator borrows the universe, so it always sees one consistent
    /// generation.
    #[inline]
    pub fn live_cells(&self) -> impl Iterator<Item = Pos2> + '_ {
        self.alive.iter().copied()
    }

    /// The live cells in row-major order.
    pub fn sorted_cells(&self) -> Vec<Pos2> {
        let mut cells: Vec<Pos2> = self.live_cells().collect();
        cells.sort_unstable();
        cells
    }

    #[inline]
    pub fn live_count(&self) -> usize {
        self.alive.len()
    }

    #[inline]
    pub fn is_empty(&self) -> bool {
        self.alive.is_empty()
    }

    pub fn clear(&mut self) {
        self.alive.clear();
    }

    /// A read-only view of the cells inside `[top_left, bottom_right)`.
    pub fn window(&self, top_left: Pos2, bottom_right: Pos2) -> Window<'_> {
        Window::new(self, top_left, bottom_right)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::LifeError;

    fn pos(x: i32, y: i32) -> Pos2 {
        Pos2 { x, y }
    }

    fn bounded(wrap: bool) -> Universe {
        Universe::with_bounds(Bounds::bounded(10, 10, wrap).unwrap()).unwrap()
    }

    #[test]
    fn set_alive_outside_closed_box_fails() {
        let mut universe = bounded(false);

        let err = universe.set_alive(pos(15, 2), true).unwrap_err();

        assert_eq!(
            err,
            LifeError::OutOfBounds {
                pos: pos(15, 2),
                width: 10,
                height: 10
            }
        );
        assert!(universe.is_empty());
    }

    #[test]
    fn torus_counts_neighbors_across_the_coordinate_limits() {
        let mut universe = bounded(true);
        universe.set_alive(pos(8, 0), true).unwrap();
        universe.set_alive(pos(0, 9), true).unwrap();
        universe.set_alive(pos(1, 1), true).unwrap();

        // i32::MAX folds onto 7 and i32::MIN onto 2 on a 10x10 torus
        assert_eq!(universe.neighbor_count(pos(7, 0)), 1);
        assert_eq!(universe.neighbor_count(pos(i32::MAX, 0)), 1);
        assert_eq!(universe.neighbor_count(pos(2, 2)), 1);
        assert_eq!(universe.neighbor_count(pos(i32::MIN, i32::MIN)), 1);
        assert_eq!(universe.neighbor_count(pos(9, i32::MIN + 7)), 2);
    }

    #[test]
    fn set_alive_on_torus_wraps() {
        let mut wrapped = bounded(true);
        let mut direct = bounded(true);

        wrapped.set_alive(pos(15, 2), true).unwrap();
        direct.set_alive(pos(5, 2), true).unwrap();

        assert_eq!(wrapped, direct);
        assert!(wrapped.is_alive(pos(5, 2)));
        assert!(wrapped.is_alive(pos(-5, 12)));
    }

    #[test]
    fn is_alive_outside_closed_box_is_false() {
        let universe = bounded(false);

        assert!(!universe.is_alive(pos(-1, 0)));
        assert!(!universe.is_alive(pos(i32::MAX, i32::MIN)));
    }

    #[test]
    fn set_alive_false_removes() {
        let mut universe = Universe::new();
        universe.set_alive(pos(-100, 42), true).unwrap();
        universe.set_alive(pos(3, 3), true).unwrap();

        universe.set_alive(pos(-100, 42), false).unwrap();

        assert_eq!(universe.live_count(), 1);
        assert!(!universe.is_alive(pos(-100, 42)));
    }

    #[test]
    fn neighbor_count_in_open_plane() {
        let mut universe = Universe::new();
        for cell in [pos(0, 0), pos(1, 0), pos(2, 0), pos(1, 1)] {
            universe.set_alive(cell, true).unwrap();
        }

        assert_eq!(universe.neighbor_count(pos(1, 0)), 3);
        assert_eq!(universe.neighbor_count(pos(1, -1)), 3);
        assert_eq!(universe.neighbor_count(pos(1, 1)), 3);
        assert_eq!(universe.neighbor_count(pos(5, 5)), 0);
    }

    #[test]
    fn neighbor_count_wraps_around_edges() {
        let mut universe = bounded(true);
        universe.set_alive(pos(9, 9), true).unwrap();
        universe.set_alive(pos(9, 0), true).unwrap();

        assert_eq!(universe.neighbor_count(pos(0, 0)), 2);
    }

    #[test]
    fn neighbor_count_ignores_cells_past_closed_edges() {
        let mut universe = bounded(false);
        universe.set_alive(pos(9, 9), true).unwrap();

        assert_eq!(universe.neighbor_count(pos(0, 0)), 0);
        assert_eq!(universe.neighbor_count(pos(8, 8)), 1);
    }

    #[test]
    fn neighbor_count_on_tiny_torus_counts_each_offset() {
        let mut universe = Universe::with_bounds(Bounds::bounded(1, 1, true).unwrap()).unwrap();
        universe.set_alive(pos(0, 0), true).unwrap();

        assert_eq!(universe.neighbor_count(pos(0, 0)), 8);
    }

    #[test]
    fn clear_keeps_bounds() {
        let mut universe = bounded(true);
        universe.set_alive(pos(1, 1), true).unwrap();

        universe.clear();

        assert!(universe.is_empty());
        assert_eq!(universe.bounds(), Bounds::bounded(10, 10, true).unwrap());
    }

    #[test]
    fn sorted_cells_are_row_major() {
        let mut universe = Universe::new();
        for cell in [pos(2, 1), pos(0, 1), pos(5, 0)] {
            universe.set_alive(cell, true).unwrap();
        }

        assert_eq!(universe.sorted_cells(), vec![pos(5, 0), pos(0, 1), pos(2, 1)]);
    }
}
