use crate::{LifeError, Pattern, Pos2};
use rand::{Rng, SeedableRng, rngs::StdRng};
use std::str::FromStr;

/// Ways of seeding a `width x height` box with live cells.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FillMode {
    /// Each cell is alive with probability 1/2.
    Random,
    Alternating,
    All,
    Empty,
}
impl FromStr for FillMode {
    type Err = LifeError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "random" => Ok(Self::Random),
            "alternating" => Ok(Self::Alternating),
            "all" => Ok(Self::All),
            "empty" => Ok(Self::Empty),
            other => Err(LifeError::invalid_argument(format!(
                "unknown fill mode `{other}`"
            ))),
        }
    }
}
impl FillMode {
    fn reserve_size(&self, w: i32, h: i32) -> usize {
        let total = (w.max(0) as usize) * (h.max(0) as usize);
        match self {
            Self::Random => total.div_ceil(2),
            Self::Alternating => total.div_ceil(2),
            Self::All => total,
            Self::Empty => 0,
        }
    }
    fn fill_cell<R: Rng>(&self, cell: Pos2, rng: &mut R) -> bool {
        match self {
            Self::Random => rng.random_bool(0.5),
            Self::Alternating => (cell.x + cell.y) % 2 == 0,
            Self::All => true,
            Self::Empty => false,
        }
    }

    /// Fills the box in row-major order.
    ///
    /// A `seed` makes [`FillMode::Random`] reproducible; without one the
    /// thread-local generator is used.
    pub fn create(self, w: i32, h: i32, seed: Option<u64>) -> Pattern {
        match seed {
            Some(seed) => self.create_with(w, h, &mut StdRng::seed_from_u64(seed)),
            None => self.create_with(w, h, &mut rand::rng()),
        }
    }

    pub fn create_with<R: Rng>(self, w: i32, h: i32, rng: &mut R) -> Pattern {
        let mut alive = Vec::new();
        let reserve_size = self.reserve_size(w, h);
        if reserve_size == 0 {
            // reserve_size indicates this will produce no alive cells
            return Pattern::new("fill", alive);
        }

        alive.reserve(reserve_size);
        for y in 0..h {
            for x in 0..w {
                let cell = Pos2 { x, y };
                if self.fill_cell(cell, rng) {
                    alive.push(cell);
                }
            }
        }
        Pattern::new("fill", alive)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn pos(x: i32, y: i32) -> Pos2 {
        Pos2 { x, y }
    }

    #[test]
    fn fill_mode_parses() {
        assert_eq!("alternating".parse::<FillMode>(), Ok(FillMode::Alternating));
        assert!("checkers".parse::<FillMode>().is_err());
    }

    #[test]
    fn create_all_fills_grid() {
        let pattern = FillMode::All.create(3, 2, None);

        let expected = vec![
            pos(0, 0),
            pos(1, 0),
            pos(2, 0),
            pos(0, 1),
            pos(1, 1),
            pos(2, 1),
        ];
        assert_eq!(pattern.cells(), expected.as_slice());
    }

    #[test]
    fn create_empty_is_empty() {
        assert!(FillMode::Empty.create(5, 4, None).is_empty());
        assert!(FillMode::All.create(0, 4, None).is_empty());
    }

    #[test]
    fn create_alternating_uses_parity() {
        let pattern = FillMode::Alternating.create(3, 3, None);

        let expected = vec![pos(0, 0), pos(2, 0), pos(1, 1), pos(0, 2), pos(2, 2)];
        assert_eq!(pattern.cells(), expected.as_slice());
    }

    #[test]
    fn create_random_is_within_bounds() {
        let w = 4;
        let h = 3;
        let pattern = FillMode::Random.create(w, h, None);

        assert!(pattern
            .cells()
            .iter()
            .all(|p| p.x >= 0 && p.y >= 0 && p.x < w && p.y < h));
    }

    #[test]
    fn seeded_random_is_reproducible() {
        let a = FillMode::Random.create(32, 32, Some(5));
        let b = FillMode::Random.create(32, 32, Some(5));

        assert_eq!(a, b);
        assert!(!a.is_empty());
    }
}
