use crate::{LifeError, Pattern, Pos2, Result, Rule};
use regex::Regex;
use std::sync::OnceLock;

/// Converts patterns to and from a textual format.
pub trait PatternCodec {
    fn encode(&self, pattern: &Pattern) -> String;
    fn decode(&self, value: &str) -> Result<Decoded>;
}

/// A decoded pattern together with the rule its header names, if any.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Decoded {
    pub pattern: Pattern,
    pub rule: Option<Rule>,
}

struct RunEncoder {
    sequence: String,
    line_len: usize,
    max_line_len: usize,
}
impl RunEncoder {
    fn new(max_line_len: usize) -> Self {
        Self {
            sequence: String::new(),
            line_len: 0,
            max_line_len,
        }
    }

    fn push_run(&mut self, run: i64, c: char) {
        let append = match run {
            0 => String::new(),
            1 => c.to_string(),
            n => format!("{}{}", n, c),
        };
        if self.line_len + append.len() > self.max_line_len {
            self.sequence.push('\n');
            self.line_len = 0;
        }
        self.line_len += append.len();
        self.sequence.push_str(&append);
    }

    pub fn end(mut self) -> String {
        if self.line_len + 1 > self.max_line_len {
            self.sequence.push('\n');
        }
        self.sequence.push('!');
        self.sequence
    }
}

/// The run-length encoded format used by most Life software.
///
/// Cells are written relative to the top-left corner of their bounding box,
/// so decoding yields the pattern moved to start at `(0, 0)`.
pub struct RunLengthEncoded {
    rule: Rule,
    header: bool,
    max_cells: usize,
}
impl RunLengthEncoded {
    /// Sets the rule written into the header.
    pub fn set_rule(mut self, rule: Rule) -> Self {
        self.rule = rule;
        self
    }

    /// Caps how many live cells [`PatternCodec::decode`] accepts before
    /// giving up on the input.
    pub fn max_cells(mut self, max_cells: usize) -> Self {
        self.max_cells = max_cells;
        self
    }

    /// Leaves out the name and the `x = .., y = ..` line.
    pub fn without_header(mut self) -> Self {
        self.header = false;
        self
    }

    fn encode_header(&self, pattern: &Pattern) -> String {
        let mut header = String::new();
        if !self.header {
            return header;
        }
        if !pattern.name().is_empty() {
            header.push_str(&format!("#N {}\n", pattern.name()));
        }
        let (width, height) = pattern.size();
        header.push_str(&format!("x = {width}, y = {height}, rule = {}\n", self.rule));
        header
    }
    fn encode_cells(&self, alive_cells: &[Pos2]) -> String {
        // top-left, in i64 so runs spanning the whole i32 range cannot overflow
        let left = alive_cells.iter().map(|p| i64::from(p.x)).min().unwrap_or_default();
        // because the cells are sorted, the first cells will always have the lowest y-value
        let top = alive_cells.first().map(|p| i64::from(p.y)).unwrap_or_default();

        let (mut last_x, mut last_y) = (left - 1, top);
        let mut alive_run = 0;
        let mut seq = RunEncoder::new(70);
        for pos in alive_cells {
            let (x, y) = (i64::from(pos.x), i64::from(pos.y));
            // if we're one ahead of the last, then only increment the run
            if last_y == y && last_x + 1 == x {
                alive_run += 1;
                last_x = x;
                continue;
            }

            let lines_run = y - last_y;
            let dead_run = match lines_run {
                0 => x - last_x - 1,
                _ => x - left,
            };
            // NOTE: order matters!
            seq.push_run(alive_run, 'o');
            seq.push_run(lines_run, '$');
            seq.push_run(dead_run, 'b');

            alive_run = 1;
            (last_x, last_y) = (x, y);
        }

        seq.push_run(alive_run, 'o');
        seq.end()
    }
}
impl Default for RunLengthEncoded {
    fn default() -> Self {
        Self {
            rule: Rule::default(),
            header: true,
            max_cells: DEFAULT_MAX_CELLS,
        }
    }
}

/// Live cells a decoded pattern may hold unless [`RunLengthEncoded::max_cells`]
/// says otherwise.
pub const DEFAULT_MAX_CELLS: usize = 1 << 24;

fn header_line() -> &'static Regex {
    static CELL: OnceLock<Regex> = OnceLock::new();
    CELL.get_or_init(|| {
        Regex::new(r"^x\s*=\s*\d+\s*,\s*y\s*=\s*\d+\s*(?:,\s*rule\s*=\s*(?<rule>\S+))?\s*$")
            .expect("RLE header regex is valid")
    })
}

fn run_token() -> &'static Regex {
    static CELL: OnceLock<Regex> = OnceLock::new();
    CELL.get_or_init(|| Regex::new(r"([0-9]*)([bo$!])|(\S)").expect("RLE token regex is valid"))
}

fn malformed(detail: impl std::fmt::Display) -> LifeError {
    LifeError::invalid_argument(format!("malformed RLE: {detail}"))
}

fn advance(value: i32, run: i32) -> Result<i32> {
    value
        .checked_add(run)
        .ok_or_else(|| malformed("pattern exceeds the coordinate range"))
}

impl PatternCodec for RunLengthEncoded {
    fn encode(&self, pattern: &Pattern) -> String {
        let mut cells = pattern.cells().to_vec();
        cells.sort_unstable();
        cells.dedup();
        format!("{}{}\n", self.encode_header(pattern), self.encode_cells(&cells))
    }

    fn decode(&self, value: &str) -> Result<Decoded> {
        let mut name = String::new();
        let mut rule = None;
        let mut alive = Vec::new();
        let mut cursor = Pos2 { x: 0, y: 0 };
        'lines_loop: for line in value.lines() {
            let line = line.trim();
            if let Some(comment) = line.strip_prefix('#') {
                if let Some(n) = comment.strip_prefix('N') {
                    name = n.trim().to_owned();
                }
                continue;
            }
            if let Some(captures) = header_line().captures(line) {
                if let Some(r) = captures.name("rule") {
                    rule = Some(r.as_str().parse()?);
                }
                continue;
            }

            for captures in run_token().captures_iter(line) {
                if let Some(other) = captures.get(3) {
                    return Err(malformed(format!("unexpected `{}`", other.as_str())));
                }
                let run = match &captures[1] {
                    "" => 1,
                    digits => digits
                        .parse::<i32>()
                        .map_err(|_| malformed(format!("run length `{digits}` is too large")))?,
                };
                match &captures[2] {
                    "!" => break 'lines_loop,
                    "o" => {
                        let room = self.max_cells.saturating_sub(alive.len());
                        if !usize::try_from(run).is_ok_and(|run| run <= room) {
                            return Err(malformed(format!(
                                "more than {} live cells",
                                self.max_cells
                            )));
                        }
                        for _ in 0..run {
                            alive.push(cursor);
                            cursor.x = advance(cursor.x, 1)?;
                        }
                    }
                    "b" => cursor.x = advance(cursor.x, run)?,
                    _ => {
                        cursor.x = 0;
                        cursor.y = advance(cursor.y, run)?;
                    }
                }
            }
        }

        Ok(Decoded {
            pattern: Pattern::new(name, alive),
            rule,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::pattern::presets;

    fn sorted(pattern: &Pattern) -> Vec<Pos2> {
        let mut cells = pattern.cells().to_vec();
        cells.sort_unstable();
        cells
    }

    #[test]
    fn encodes_glider() {
        let encoded = RunLengthEncoded::default().encode(&presets::glider());

        assert_eq!(encoded, "#N Glider\nx = 3, y = 3, rule = B3/S23\nbo$2bo$3o!\n");
    }

    #[test]
    fn encodes_without_header() {
        let encoded = RunLengthEncoded::default()
            .without_header()
            .encode(&presets::block());

        assert_eq!(encoded, "2o$2o!\n");
    }

    #[test]
    fn decodes_glider() {
        let decoded = RunLengthEncoded::default()
            .decode("#N Glider\n#C a comment\nx = 3, y = 3, rule = 23/3\nbo$2bo$3o!")
            .unwrap();

        assert_eq!(decoded.rule, Some(Rule::conway()));
        assert_eq!(decoded.pattern.name(), "Glider");
        assert_eq!(decoded.pattern.cells(), presets::glider().cells());
    }

    #[test]
    fn decode_moves_pattern_to_origin() {
        let codec = RunLengthEncoded::default().set_rule(Rule::highlife());
        let moved = presets::glider_gun().translated(Pos2::new(-17, 40)).unwrap();

        let decoded = codec.decode(&codec.encode(&moved)).unwrap();

        assert_eq!(decoded.rule, Some(Rule::highlife()));
        assert_eq!(sorted(&decoded.pattern), sorted(&presets::glider_gun()));
    }

    #[test]
    fn long_patterns_wrap_lines() {
        let encoded = RunLengthEncoded::default()
            .without_header()
            .encode(&presets::pulsar());

        assert!(encoded.lines().all(|line| line.len() <= 70));
        let decoded = RunLengthEncoded::default().decode(&encoded).unwrap();
        assert_eq!(sorted(&decoded.pattern), sorted(&presets::pulsar()));
    }

    #[test]
    fn empty_pattern() {
        let codec = RunLengthEncoded::default().without_header();

        assert_eq!(codec.encode(&Pattern::from_cells(Vec::new())), "!\n");
        assert!(codec.decode("!").unwrap().pattern.is_empty());
    }

    #[test]
    fn rejects_unknown_tokens() {
        let err = RunLengthEncoded::default().decode("2o$x!").unwrap_err();

        assert!(matches!(err, LifeError::InvalidArgument(_)));
    }

    #[test]
    fn encodes_cells_at_the_coordinate_limits() {
        let codec = RunLengthEncoded::default().without_header();

        let corner = Pattern::from_cells(vec![Pos2::new(i32::MIN, 0)]);
        assert_eq!(codec.encode(&corner), "o!\n");
        assert_eq!(codec.decode("o!").unwrap().pattern.cells(), &[Pos2::zero()]);

        let wide = Pattern::from_cells(vec![
            Pos2::new(-2_000_000_000, 0),
            Pos2::new(2_000_000_000, 0),
        ]);
        assert_eq!(codec.encode(&wide), "o3999999999bo!\n");
        let header = RunLengthEncoded::default().encode(&wide);
        assert!(header.starts_with("x = 4000000001, y = 1"));
    }

    #[test]
    fn rejects_patterns_over_the_cell_cap() {
        let codec = RunLengthEncoded::default().max_cells(4);

        assert_eq!(codec.decode("2o$2o!").unwrap().pattern.cells().len(), 4);
        assert!(matches!(codec.decode("2o$3o!"), Err(LifeError::InvalidArgument(_))));
        assert!(matches!(
            RunLengthEncoded::default().decode("2147483647o!"),
            Err(LifeError::InvalidArgument(_))
        ));
    }

    #[test]
    fn rejects_huge_runs() {
        let err = RunLengthEncoded::default()
            .decode("99999999999b!")
            .unwrap_err();

        assert!(matches!(err, LifeError::InvalidArgument(_)));
    }
}
