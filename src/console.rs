use crossterm::{
    cursor,
    event::{
        self, DisableMouseCapture, EnableMouseCapture, KeyCode, KeyEvent, KeyModifiers,
        MouseButton, MouseEvent, MouseEventKind,
    },
    execute, queue, terminal,
};
use lifesim::{Frame, Pos2, RunState};
use std::{io, time::Duration};

/// User intents forwarded to the simulation thread.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Command {
    StartPause,
    Step,
    Toggle(Pos2),
    Reset,
    Clear,
    Faster,
    Slower,
}

pub enum ConsoleCommand {
    Exit,
    Handled,
    Send(Command),
}

pub struct ConsoleRender {
    tl: Pos2,
    report: String,
}
impl ConsoleRender {
    pub fn new() -> io::Result<Self> {
        terminal::enable_raw_mode()?;
        execute!(io::stdout(), cursor::Hide, EnableMouseCapture)?;
        Ok(Self {
            tl: Pos2::default(),
            report: String::new(),
        })
    }

    pub fn render(&self, frame: &Frame) -> io::Result<()> {
        let (cols, rows) = terminal::size()?;
        let field_rows = rows.saturating_sub(1);
        let br = self.tl
            + Pos2 {
                x: i32::from(cols),
                y: i32::from(field_rows),
            };
        let mut stdout = io::stdout();
        queue!(stdout, terminal::Clear(terminal::ClearType::All))?;
        for cell in frame.universe.window(self.tl, br).iter() {
            let cell = cell - self.tl;
            queue!(stdout, cursor::MoveTo(cell.x as u16, cell.y as u16))?;
            io::Write::write_all(&mut stdout, "█".as_bytes())?;
        }

        // write footer
        let state = match frame.state {
            RunState::Running => "running",
            RunState::Paused => "paused",
        };
        let footer = format!("[{state}] {}", self.report);
        queue!(stdout, cursor::MoveTo(0, field_rows))?;
        io::Write::write_all(&mut stdout, footer.as_bytes())?;

        io::Write::flush(&mut stdout)
    }

    /// Waits up to `timeout` for one input event.
    pub fn poll_events(&mut self, timeout: Duration) -> io::Result<Option<ConsoleCommand>> {
        if !event::poll(timeout)? {
            return Ok(None);
        }

        let command = match event::read()? {
            // CTRL+C
            event::Event::Key(KeyEvent {
                code: KeyCode::Char('c'),
                modifiers: KeyModifiers::CONTROL,
                ..
            })
            | event::Event::Key(KeyEvent {
                code: KeyCode::Char('q'),
                ..
            }) => ConsoleCommand::Exit,
            event::Event::Key(KeyEvent { code, .. }) => match code {
                // arrows to move grid
                KeyCode::Up => self.pan(0, -1),
                KeyCode::Down => self.pan(0, 1),
                KeyCode::Left => self.pan(-1, 0),
                KeyCode::Right => self.pan(1, 0),
                KeyCode::Char(' ') => ConsoleCommand::Send(Command::StartPause),
                KeyCode::Char('n') => ConsoleCommand::Send(Command::Step),
                KeyCode::Char('r') => ConsoleCommand::Send(Command::Reset),
                KeyCode::Char('c') => ConsoleCommand::Send(Command::Clear),
                KeyCode::Char('+' | '=') => ConsoleCommand::Send(Command::Faster),
                KeyCode::Char('-') => ConsoleCommand::Send(Command::Slower),
                _ => ConsoleCommand::Handled,
            },
            event::Event::Mouse(MouseEvent {
                kind: MouseEventKind::Down(MouseButton::Left),
                column,
                row,
                ..
            }) => {
                let cell = self.tl
                    + Pos2 {
                        x: i32::from(column),
                        y: i32::from(row),
                    };
                ConsoleCommand::Send(Command::Toggle(cell))
            }
            _ => ConsoleCommand::Handled,
        };
        Ok(Some(command))
    }

    fn pan(&mut self, dx: i32, dy: i32) -> ConsoleCommand {
        self.tl = self.tl + Pos2 { x: dx, y: dy };
        ConsoleCommand::Handled
    }

    pub fn set_report(&mut self, report: String) {
        self.report = report;
    }
}
impl Drop for ConsoleRender {
    fn drop(&mut self) {
        // nothing sensible is left to do if restoring the terminal fails
        let _ = execute!(io::stdout(), DisableMouseCapture, cursor::Show);
        let _ = terminal::disable_raw_mode();
    }
}
