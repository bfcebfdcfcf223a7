mod rule;

pub use self::rule::{NeighborSet, Rule};
use crate::{Pos2, Universe};
use rayon::prelude::*;
use std::collections::HashSet;

/// Computes successive generations of a [`Universe`] under a [`Rule`].
///
/// Only live cells and their neighbors can change state, so the work per
/// generation scales with the population, not with the area of the plane.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct RuleEngine {
    rule: Rule,
}

impl RuleEngine {
    pub fn new(rule: Rule) -> Self {
        Self { rule }
    }

    #[inline]
    pub fn rule(&self) -> Rule {
        self.rule
    }

    /// The generation following `universe`. The argument is left untouched.
    pub fn next(&self, universe: &Universe) -> Universe {
        let mut visited = HashSet::with_capacity(universe.live_count() * 9);
        let mut alive = HashSet::with_capacity(universe.live_count());
        self.evaluate(universe, universe.live_cells(), &mut visited, |pos, next| {
            if next {
                alive.insert(pos);
            }
        });
        Universe::from_normalized(universe.bounds(), alive)
    }

    /// Same result as [`RuleEngine::next`], computed on the rayon pool.
    ///
    /// The live cells are sorted row-major and split into one band of rows per
    /// worker thread, so only candidates on band borders are evaluated twice.
    pub fn next_parallel(&self, universe: &Universe) -> Universe {
        if universe.is_empty() {
            return Universe::from_normalized(universe.bounds(), HashSet::new());
        }

        let (cells, band_len) = bands(universe, rayon::current_num_threads());
        let alive: HashSet<Pos2> = cells
            .par_chunks(band_len)
            .flat_map_iter(|band| {
                let mut visited = HashSet::with_capacity(band.len() * 9);
                let mut out = Vec::with_capacity(band.len());
                self.evaluate(universe, band.iter().copied(), &mut visited, |pos, next| {
                    if next {
                        out.push(pos);
                    }
                });
                out
            })
            .collect();

        Universe::from_normalized(universe.bounds(), alive)
    }

    /// Cells whose state flips between `universe` and the next generation,
    /// in row-major order.
    ///
    /// Toggling every returned cell in `universe` yields [`RuleEngine::next`].
    pub fn changes(&self, universe: &Universe) -> Vec<Pos2> {
        let mut visited = HashSet::with_capacity(universe.live_count() * 9);
        let mut changes = Vec::new();
        self.evaluate(universe, universe.live_cells(), &mut visited, |pos, next| {
            if next != universe.is_alive(pos) {
                changes.push(pos);
            }
        });
        changes.sort_unstable();
        changes
    }

    /// Runs the rule on every candidate around `cells` exactly once,
    /// reporting each candidate with its next state.
    fn evaluate<I, F>(&self, universe: &Universe, cells: I, visited: &mut HashSet<Pos2>, mut emit: F)
    where
        I: IntoIterator<Item = Pos2>,
        F: FnMut(Pos2, bool),
    {
        let bounds = universe.bounds();
        for cell in cells {
            let candidates = std::iter::once(cell)
                .chain(cell.neighbors().filter_map(|pos| bounds.normalize(pos)));
            for candidate in candidates {
                if !visited.insert(candidate) {
                    continue;
                }
                let alive = universe.is_alive(candidate);
                let neighbors = universe.neighbor_count(candidate);
                emit(candidate, self.rule.next_state(alive, neighbors));
            }
        }
    }
}

/// The live cells in row-major order and the length of the band each of
/// `threads` workers takes from them.
fn bands(universe: &Universe, threads: usize) -> (Vec<Pos2>, usize) {
    let cells = universe.sorted_cells();
    let band_len = cells.len().div_ceil(threads.max(1)).max(1);
    (cells, band_len)
}
