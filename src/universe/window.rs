use super::Universe;
use crate::Pos2;

/// A rectangular read-only view over a [`Universe`], as used by renderers.
pub struct Window<'a> {
    tl: Pos2,
    br: Pos2,
    universe: &'a Universe,
}
impl<'a> Window<'a> {
    pub fn new(universe: &'a Universe, top_left: Pos2, bottom_right: Pos2) -> Self {
        Self {
            tl: top_left,
            br: bottom_right,
            universe,
        }
    }

    /// Live cells inside the window, in row-major order.
    pub fn iter(&self) -> impl Iterator<Item = Pos2> {
        let rx = self.tl.x..self.br.x;
        let ry = self.tl.y..self.br.y;
        let mut cells: Vec<Pos2> = self
            .universe
            .live_cells()
            .filter(|pos| rx.contains(&pos.x) && ry.contains(&pos.y))
            .collect();
        cells.sort_unstable();
        cells.into_iter()
    }
}

impl std::fmt::Display for Window<'_> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let mut last = self.tl - Pos2 { x: 1, y: 0 };
        for alive in self.iter() {
            // determine the number of lines to print
            let lines = alive.y - last.y;
            // determine the number of padding spaces to print
            let padding = match lines {
                0 => alive.x - last.x - 1,
                _ => alive.x - self.tl.x,
            };
            write!(
                f,
                "{0:\n<1$}{0: <2$}█",
                "", lines as usize, padding as usize
            )?;
            last = alive;
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn universe_with(cells: &[(i32, i32)]) -> Universe {
        let mut universe = Universe::new();
        for &cell in cells {
            universe.set_alive(cell.into(), true).unwrap();
        }
        universe
    }

    #[test]
    fn iter_clips_to_window() {
        let universe = universe_with(&[(0, 0), (3, 1), (4, 1), (-1, 2), (2, 5)]);
        let window = universe.window(Pos2::new(0, 0), Pos2::new(4, 4));

        let cells: Vec<Pos2> = window.iter().collect();

        assert_eq!(cells, vec![Pos2::new(0, 0), Pos2::new(3, 1)]);
    }

    #[test]
    fn display_draws_blinker() {
        let universe = universe_with(&[(1, 0), (1, 1), (1, 2)]);
        let window = universe.window(Pos2::new(0, 0), Pos2::new(3, 3));

        assert_eq!(window.to_string(), " █\n █\n █");
    }
}
