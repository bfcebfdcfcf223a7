use crate::{LifeError, Result};
use regex::Regex;
use std::{fmt, str::FromStr, sync::OnceLock};

/// A set of Moore-neighborhood counts, `0..=8`, stored as a bit mask.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub struct NeighborSet(u16);

impl NeighborSet {
    pub const EMPTY: Self = Self(0);

    pub fn from_counts(counts: &[u8]) -> Result<Self> {
        counts.iter().try_fold(Self::EMPTY, |set, &count| {
            if count > 8 {
                return Err(LifeError::invalid_argument(format!(
                    "neighbor count {count} is not in 0..=8"
                )));
            }
            Ok(Self(set.0 | 1 << count))
        })
    }

    #[inline]
    pub fn contains(self, count: u8) -> bool {
        count <= 8 && self.0 & (1 << count) != 0
    }

    /// The counts in the set, ascending.
    pub fn counts(self) -> impl Iterator<Item = u8> {
        (0..=8).filter(move |&count| self.contains(count))
    }
}

/// An outer-totalistic birth/survive rule such as `B3/S23`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct Rule {
    birth: NeighborSet,
    survive: NeighborSet,
}

impl Rule {
    /// Creates a rule from the neighbor counts that give birth to a dead cell
    /// and the counts that keep a live cell alive.
    ///
    /// Birth on 0 neighbors is rejected: it would bring every empty cell of
    /// the plane to life at once.
    pub fn new(birth: &[u8], survive: &[u8]) -> Result<Self> {
        let birth = NeighborSet::from_counts(birth)?;
        let survive = NeighborSet::from_counts(survive)?;
        if birth.contains(0) {
            return Err(LifeError::invalid_argument(
                "rules with birth on 0 neighbors are not supported",
            ));
        }
        Ok(Self { birth, survive })
    }

    /// Conway's Game of Life, B3/S23.
    pub const fn conway() -> Self {
        Self {
            birth: NeighborSet(1 << 3),
            survive: NeighborSet(1 << 2 | 1 << 3),
        }
    }

    /// HighLife, B36/S23. Known for its replicator.
    pub const fn highlife() -> Self {
        Self {
            birth: NeighborSet(1 << 3 | 1 << 6),
            survive: NeighborSet(1 << 2 | 1 << 3),
        }
    }

    /// Seeds, B2/S. Every live cell dies each generation.
    pub const fn seeds() -> Self {
        Self {
            birth: NeighborSet(1 << 2),
            survive: NeighborSet::EMPTY,
        }
    }

    /// Day & Night, B3678/S34678.
    pub const fn day_and_night() -> Self {
        Self {
            birth: NeighborSet(1 << 3 | 1 << 6 | 1 << 7 | 1 << 8),
            survive: NeighborSet(1 << 3 | 1 << 4 | 1 << 6 | 1 << 7 | 1 << 8),
        }
    }

    #[inline]
    pub fn birth(&self) -> NeighborSet {
        self.birth
    }
    #[inline]
    pub fn survive(&self) -> NeighborSet {
        self.survive
    }

    /// Whether a cell is alive in the next generation.
    #[inline]
    pub fn next_state(&self, alive: bool, neighbors: u8) -> bool {
        if alive {
            self.survive.contains(neighbors)
        } else {
            self.birth.contains(neighbors)
        }
    }
}

impl Default for Rule {
    fn default() -> Self {
        Self::conway()
    }
}

impl fmt::Display for Rule {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str("B")?;
        for count in self.birth.counts() {
            write!(f, "{count}")?;
        }
        f.write_str("/S")?;
        for count in self.survive.counts() {
            write!(f, "{count}")?;
        }
        Ok(())
    }
}

fn rule_notation() -> &'static Regex {
    static CELL: OnceLock<Regex> = OnceLock::new();
    CELL.get_or_init(|| {
        // either B{birth}/S{survive} or the S/B form used by RLE headers
        Regex::new(r"^(?:[Bb](?<b>[0-9]*)/[Ss](?<s>[0-9]*)|(?<s2>[0-9]*)/(?<b2>[0-9]*))$")
            .expect("rule notation regex is valid")
    })
}

fn parse_counts(digits: &str) -> Vec<u8> {
    digits.bytes().map(|digit| digit - b'0').collect()
}

impl FromStr for Rule {
    type Err = LifeError;

    fn from_str(s: &str) -> Result<Self> {
        let s = s.trim();
        let captures = rule_notation()
            .captures(s)
            .ok_or_else(|| LifeError::invalid_argument(format!("malformed rule `{s}`")))?;

        let group = |a: &str, b: &str| {
            captures
                .name(a)
                .or_else(|| captures.name(b))
                .map_or("", |m| m.as_str())
        };
        Self::new(&parse_counts(group("b", "b2")), &parse_counts(group("s", "s2")))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn conway_matches_classic_rules() {
        let rule = Rule::conway();

        // underpopulation
        assert!(!rule.next_state(true, 0));
        assert!(!rule.next_state(true, 1));
        // survival
        assert!(rule.next_state(true, 2));
        assert!(rule.next_state(true, 3));
        // overpopulation
        assert!(!rule.next_state(true, 4));
        assert!(!rule.next_state(true, 8));
        // reproduction
        assert!(rule.next_state(false, 3));
        assert!(!rule.next_state(false, 2));
        assert!(!rule.next_state(false, 4));
    }

    #[test]
    fn default_is_conway() {
        assert_eq!(Rule::default(), Rule::conway());
        assert_eq!(Rule::new(&[3], &[2, 3]).unwrap(), Rule::conway());
    }

    #[test]
    fn highlife_births_on_six() {
        let rule = Rule::highlife();

        assert!(rule.next_state(false, 6));
        assert!(!rule.next_state(true, 6));
    }

    #[test]
    fn seeds_never_survive() {
        let rule = Rule::seeds();

        assert!((0..=8).all(|n| !rule.next_state(true, n)));
        assert!(rule.next_state(false, 2));
    }

    #[test]
    fn parses_both_notations() {
        assert_eq!("B3/S23".parse::<Rule>().unwrap(), Rule::conway());
        assert_eq!("b36/s23".parse::<Rule>().unwrap(), Rule::highlife());
        assert_eq!("23/3".parse::<Rule>().unwrap(), Rule::conway());
        assert_eq!("B2/S".parse::<Rule>().unwrap(), Rule::seeds());
    }

    #[test]
    fn display_round_trips() {
        let rule = Rule::day_and_night();

        assert_eq!(rule.to_string(), "B3678/S34678");
        assert_eq!(rule.to_string().parse::<Rule>().unwrap(), rule);
    }

    #[test]
    fn rejects_malformed_rules() {
        for bad in ["", "B3", "B9/S23", "life", "B0/S"] {
            assert!(
                matches!(bad.parse::<Rule>(), Err(LifeError::InvalidArgument(_))),
                "`{bad}` should be rejected"
            );
        }
    }

    #[test]
    fn rejects_counts_above_eight() {
        assert!(Rule::new(&[3], &[9]).is_err());
    }
}
