use std::{
    sync::mpsc,
    thread,
    time::{Duration, Instant},
};

use anyhow::{Context, Result, anyhow};

mod console;
mod options;

use console::{Command, ConsoleCommand, ConsoleRender};
use lifesim::{
    Pattern, PatternCodec, Pos2, Rule, RunLengthEncoded, RunState, Simulation, SnapshotHandle,
    pattern::presets,
    stats::{Recorder, Sample, SwitchRecorder},
};

/// Frame budget of the console renderer and the simulation thread.
const FRAME: Duration = Duration::from_millis(16);

/// The starting pattern, and the rule an RLE file asked for.
fn args_to_pattern(args: &options::Args) -> Result<(Pattern, Option<Rule>)> {
    if let Some(file_name) = args.input_file() {
        let encoded_str = std::fs::read_to_string(&file_name)
            .with_context(|| format!("could not read {file_name}"))?;
        let decoded = RunLengthEncoded::default()
            .decode(&encoded_str)
            .with_context(|| format!("could not decode {file_name}"))?;
        return Ok((decoded.pattern, decoded.rule));
    }

    if let Some(name) = args.pattern() {
        let pattern =
            presets::by_name(&name).ok_or_else(|| anyhow!("no built-in pattern named `{name}`"))?;
        return Ok((pattern, None));
    }

    // setup the alive cells based on args
    let (grid_w, grid_h) = args.grid_size()?;
    let pattern = args.fill_mode()?.create(grid_w, grid_h, args.seed()?);
    Ok((pattern, None))
}

fn run_headless(
    game: &mut Simulation,
    stats: &mut SwitchRecorder,
    generations: Option<u64>,
) {
    while generations.is_none_or(|max| game.generation() < max) {
        // report metrics every 500ms
        if stats.has_report() {
            println!("{}", stats.report());
        }

        game.step();
        stats.record(Sample::of(game));
    }
}

/// Runs the simulation on its own thread, applying `commands` and
/// publishing every generation to `handle`, until the sender hangs up.
fn spawn_simulation(
    mut game: Simulation,
    initial: Pattern,
    handle: SnapshotHandle,
    commands: mpsc::Receiver<Command>,
    generations: Option<u64>,
) -> thread::JoinHandle<Simulation> {
    thread::spawn(move || {
        let mut last = Instant::now();
        loop {
            loop {
                let command = match commands.try_recv() {
                    Ok(command) => command,
                    Err(mpsc::TryRecvError::Empty) => break,
                    Err(mpsc::TryRecvError::Disconnected) => return game,
                };
                // errors are user mistakes, such as editing a running
                // simulation, and are ignored like a disabled button
                let _ = match command {
                    Command::StartPause => {
                        if game.is_running() {
                            game.pause();
                        } else {
                            game.start();
                        }
                        Ok(())
                    }
                    Command::Step => {
                        game.step();
                        Ok(())
                    }
                    Command::Toggle(pos) => game.toggle_cell(pos).map(drop),
                    Command::Reset => game.reset(Some(&initial)),
                    Command::Clear => game.reset(None),
                    Command::Faster => game.set_rate(game.rate() * 2.0),
                    Command::Slower => game.set_rate(game.rate() / 2.0),
                };
            }

            let now = Instant::now();
            game.tick(now - last);
            last = now;
            if generations.is_some_and(|max| game.generation() >= max) {
                game.pause();
            }
            handle.publish(&game);
            thread::sleep(FRAME.min(game.interval()));
        }
    })
}

fn run_console(
    game: Simulation,
    initial: Pattern,
    stats: &mut SwitchRecorder,
    generations: Option<u64>,
) -> Result<Simulation> {
    let handle = SnapshotHandle::new(&game);
    let (sender, commands) = mpsc::channel();
    let worker = spawn_simulation(game, initial, handle.clone(), commands, generations);

    let mut console = ConsoleRender::new()?;
    let mut shown = None;
    'frames: loop {
        let frame = handle.latest();
        if shown != Some(frame.generation) {
            stats.record(Sample::from(&frame));
            shown = Some(frame.generation);
        }
        if stats.has_report() {
            console.set_report(stats.report());
        }
        console.render(&frame)?;

        while let Some(cmd) = console.poll_events(FRAME)? {
            match cmd {
                ConsoleCommand::Exit => break 'frames,
                // cells can only be edited while paused
                ConsoleCommand::Send(Command::Toggle(_)) if frame.state == RunState::Running => {}
                ConsoleCommand::Send(command) => {
                    if sender.send(command).is_err() {
                        break 'frames;
                    }
                }
                ConsoleCommand::Handled => {}
            }
        }
    }
    drop(console);
    drop(sender);

    worker
        .join()
        .map_err(|_| anyhow!("the simulation thread panicked"))
}

fn main() -> Result<()> {
    let Some(args) = options::Args::from_env()? else {
        return Ok(());
    };

    let (pattern, file_rule) = args_to_pattern(&args)?;
    let mut config = args.config()?;
    if let (None, Some(rule)) = (args.rule()?, file_rule) {
        config.rule = rule;
    }

    // setup the simulation and reporting metrics
    let mut game = Simulation::new(config)?;
    game.load_pattern(&pattern, Pos2::zero())
        .context("the starting pattern does not fit the universe")?;
    println!("alive: {}", game.universe().live_count());

    let mut stats = SwitchRecorder::new(Sample::of(&game), args.stats_file().is_some());
    let generations = args.generations()?;
    if args.console() {
        game = run_console(game, pattern, &mut stats, generations)?;
    } else {
        run_headless(&mut game, &mut stats, generations);
    }

    if let Some(file_name) = args.stats_file() {
        stats
            .save(&file_name)
            .with_context(|| format!("could not write {file_name}"))?;
    }
    if let Some(file_name) = args.output_file() {
        let encoder = RunLengthEncoded::default().set_rule(game.rule());
        let final_pattern = Pattern::new(
            "lifesim generated pattern",
            lifesim::to_pattern(game.universe()),
        );
        std::fs::write(&file_name, encoder.encode(&final_pattern))
            .with_context(|| format!("could not write {file_name}"))?;
    }

    Ok(())
}
