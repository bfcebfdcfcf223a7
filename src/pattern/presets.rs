//! Well-known patterns, each anchored at `(0, 0)`.

use super::Pattern;
use crate::Pos2;

fn pattern(name: &str, cells: &[(i32, i32)]) -> Pattern {
    Pattern::new(name, cells.iter().map(|&cell| Pos2::from(cell)).collect())
}

/// Glider - the smallest spaceship, moves (1, 1) every 4 generations
pub fn glider() -> Pattern {
    pattern("Glider", &[(1, 0), (2, 1), (0, 2), (1, 2), (2, 2)])
}

/// Blinker - period 2 oscillator
pub fn blinker() -> Pattern {
    pattern("Blinker", &[(0, 1), (1, 1), (2, 1)])
}

pub fn toad() -> Pattern {
    pattern("Toad", &[(1, 0), (2, 0), (3, 0), (0, 1), (1, 1), (2, 1)])
}

pub fn beacon() -> Pattern {
    pattern("Beacon", &[(0, 0), (1, 0), (0, 1), (3, 2), (2, 3), (3, 3)])
}

/// Pulsar - period 3 oscillator
pub fn pulsar() -> Pattern {
    let mut cells = Vec::with_capacity(48);
    // one quadrant, mirrored into the other three
    let quadrant = [
        (2, 0), (3, 0), (4, 0),
        (0, 2), (5, 2),
        (0, 3), (5, 3),
        (0, 4), (5, 4),
        (2, 5), (3, 5), (4, 5),
    ];
    for (x, y) in quadrant {
        for (mx, my) in [(x, y), (12 - x, y), (x, 12 - y), (12 - x, 12 - y)] {
            cells.push(Pos2::new(mx, my));
        }
    }
    cells.sort_unstable();
    Pattern::new("Pulsar", cells)
}

/// Lightweight spaceship, moves 2 cells every 4 generations
pub fn lwss() -> Pattern {
    pattern(
        "LWSS",
        &[(1, 0), (4, 0), (0, 1), (0, 2), (4, 2), (0, 3), (1, 3), (2, 3), (3, 3)],
    )
}

/// Gosper glider gun - emits a glider every 30 generations
pub fn glider_gun() -> Pattern {
    pattern(
        "Gosper Glider Gun",
        &[
            // left square
            (0, 4), (0, 5), (1, 4), (1, 5),
            // left circle
            (10, 4), (10, 5), (10, 6),
            (11, 3), (11, 7),
            (12, 2), (12, 8),
            (13, 2), (13, 8),
            (14, 5),
            (15, 3), (15, 7),
            (16, 4), (16, 5), (16, 6),
            (17, 5),
            // middle pieces
            (20, 2), (20, 3), (20, 4),
            (21, 2), (21, 3), (21, 4),
            (22, 1), (22, 5),
            (24, 0), (24, 1), (24, 5), (24, 6),
            // right square
            (34, 2), (34, 3), (35, 2), (35, 3),
        ],
    )
}

/// R-pentomino - methuselah, stabilizes after 1103 generations
pub fn r_pentomino() -> Pattern {
    pattern("R-pentomino", &[(1, 0), (2, 0), (0, 1), (1, 1), (1, 2)])
}

/// Acorn - methuselah, stabilizes after 5206 generations
pub fn acorn() -> Pattern {
    pattern(
        "Acorn",
        &[(1, 0), (3, 1), (0, 2), (1, 2), (4, 2), (5, 2), (6, 2)],
    )
}

pub fn block() -> Pattern {
    pattern("Block", &[(0, 0), (1, 0), (0, 1), (1, 1)])
}

/// Every preset under the name of the function that builds it.
const NAMED: [(&str, fn() -> Pattern); 10] = [
    ("glider", glider),
    ("blinker", blinker),
    ("toad", toad),
    ("beacon", beacon),
    ("pulsar", pulsar),
    ("lwss", lwss),
    ("glider_gun", glider_gun),
    ("r_pentomino", r_pentomino),
    ("acorn", acorn),
    ("block", block),
];

pub fn all() -> Vec<Pattern> {
    NAMED.iter().map(|(_, make)| make()).collect()
}

/// Lowercase with spaces, `-` and `_` dropped, so `glider_gun`,
/// `Glider Gun` and `glider-gun` compare equal.
fn lookup_key(name: &str) -> String {
    name.chars()
        .filter(|c| !matches!(c, ' ' | '-' | '_'))
        .map(|c| c.to_ascii_lowercase())
        .collect()
}

/// Looks a preset up by its short name or its display name, ignoring case
/// and separators.
pub fn by_name(name: &str) -> Option<Pattern> {
    let key = lookup_key(name);
    NAMED.iter().find_map(|(short, make)| {
        let pattern = make();
        (lookup_key(short) == key || lookup_key(pattern.name()) == key).then_some(pattern)
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::{RuleEngine, Universe};

    fn run(pattern: &Pattern, generations: usize) -> Universe {
        let engine = RuleEngine::default();
        let mut universe = Universe::new();
        pattern.stamp(&mut universe, Pos2::zero()).unwrap();
        for _ in 0..generations {
            universe = engine.next(&universe);
        }
        universe
    }

    #[test]
    fn pulsar_has_period_three() {
        let start = run(&pulsar(), 0);

        assert_eq!(start.live_count(), 48);
        assert_ne!(run(&pulsar(), 1), start);
        assert_eq!(run(&pulsar(), 3), start);
    }

    #[test]
    fn oscillators_have_period_two() {
        for pattern in [blinker(), toad(), beacon()] {
            assert_eq!(run(&pattern, 2), run(&pattern, 0), "{}", pattern.name());
        }
    }

    #[test]
    fn lwss_moves_left() {
        let moved = run(&lwss(), 4);
        let expected = lwss().translated(Pos2::new(-2, 0)).unwrap();

        assert_eq!(moved.sorted_cells(), {
            let mut cells = expected.cells().to_vec();
            cells.sort_unstable();
            cells
        });
    }

    #[test]
    fn glider_gun_emits_gliders() {
        assert!(run(&glider_gun(), 120).live_count() > glider_gun().cells().len());
    }

    #[test]
    fn lookup_ignores_case() {
        assert_eq!(by_name("r-PENTOMINO"), Some(r_pentomino()));
        assert_eq!(by_name("nope"), None);
    }

    #[test]
    fn lookup_accepts_short_names() {
        for name in ["glider_gun", "glider gun", "Glider-Gun", "gosper glider gun"] {
            assert_eq!(by_name(name), Some(glider_gun()), "{name}");
        }
        assert_eq!(by_name("r_pentomino"), Some(r_pentomino()));
        assert_eq!(by_name("LWSS"), Some(lwss()));
    }

    #[test]
    fn every_preset_is_reachable_by_name() {
        for pattern in all() {
            assert_eq!(by_name(pattern.name()).as_ref(), Some(&pattern));
        }
    }

    #[test]
    fn names_are_unique() {
        let mut names: Vec<_> = all().iter().map(|p| p.name().to_owned()).collect();
        names.sort();
        names.dedup();
        assert_eq!(names.len(), all().len());
    }
}
