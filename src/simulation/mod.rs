mod publish;

pub use self::publish::{Frame, SnapshotHandle};
use crate::{Bounds, LifeError, Pattern, Pos2, Result, Rule, RuleEngine, Universe};
use std::{sync::Arc, time::Duration};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum RunState {
    #[default]
    Paused,
    Running,
}

/// Settings a [`Simulation`] is created with.
#[derive(Debug, Clone, PartialEq)]
pub struct SimulationConfig {
    pub rule: Rule,
    pub bounds: Bounds,
    /// Time between automatic steps while running.
    pub interval: Duration,
    /// Most steps a single [`Simulation::tick`] may run to catch up.
    pub max_catch_up: u32,
    /// Compute generations on the rayon pool.
    pub parallel: bool,
}
impl Default for SimulationConfig {
    fn default() -> Self {
        Self {
            rule: Rule::default(),
            bounds: Bounds::Unbounded,
            interval: Duration::from_millis(100),
            max_catch_up: 8,
            parallel: false,
        }
    }
}

/// What a call to [`Simulation::tick`] did.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct TickReport {
    /// Generations computed.
    pub steps: u32,
    /// Generations that were due but skipped because of the catch-up cap.
    pub dropped: u64,
}

/// Drives a [`Universe`] through time.
///
/// The simulation is the only writer of its universe. Readers get immutable
/// [`Arc`] snapshots that never change after being handed out; edits made
/// while a snapshot is alive copy the live set first.
#[derive(Debug)]
pub struct Simulation {
    universe: Arc<Universe>,
    engine: RuleEngine,
    state: RunState,
    interval: Duration,
    max_catch_up: u32,
    parallel: bool,
    accumulated: Duration,
    generation: u64,
    dropped_steps: u64,
}

impl Simulation {
    pub fn new(config: SimulationConfig) -> Result<Self> {
        validate_interval(config.interval)?;
        validate_catch_up(config.max_catch_up)?;
        Ok(Self {
            universe: Arc::new(Universe::with_bounds(config.bounds)?),
            engine: RuleEngine::new(config.rule),
            state: RunState::Paused,
            interval: config.interval,
            max_catch_up: config.max_catch_up,
            parallel: config.parallel,
            accumulated: Duration::ZERO,
            generation: 0,
            dropped_steps: 0,
        })
    }

    #[inline]
    pub fn universe(&self) -> &Universe {
        &self.universe
    }

    /// The current generation, unaffected by anything the simulation does later.
    #[inline]
    pub fn snapshot(&self) -> Arc<Universe> {
        Arc::clone(&self.universe)
    }

    pub fn frame(&self) -> Frame {
        Frame {
            universe: self.snapshot(),
            generation: self.generation,
            state: self.state,
            dropped: self.dropped_steps,
        }
    }

    #[inline]
    pub fn generation(&self) -> u64 {
        self.generation
    }
    #[inline]
    pub fn state(&self) -> RunState {
        self.state
    }
    #[inline]
    pub fn is_running(&self) -> bool {
        self.state == RunState::Running
    }
    #[inline]
    pub fn interval(&self) -> Duration {
        self.interval
    }
    #[inline]
    pub fn rule(&self) -> Rule {
        self.engine.rule()
    }
    /// Total steps skipped by the catch-up cap since creation.
    #[inline]
    pub fn dropped_steps(&self) -> u64 {
        self.dropped_steps
    }

    pub fn start(&mut self) {
        if self.state == RunState::Paused {
            self.state = RunState::Running;
            self.accumulated = Duration::ZERO;
        }
    }

    pub fn pause(&mut self) {
        self.state = RunState::Paused;
    }

    /// Advances exactly one generation, running or not.
    pub fn step(&mut self) {
        let next = if self.parallel {
            self.engine.next_parallel(&self.universe)
        } else {
            self.engine.next(&self.universe)
        };
        self.universe = Arc::new(next);
        self.generation += 1;
    }

    /// Accounts `elapsed` time and runs every step that became due.
    ///
    /// At most `max_catch_up` steps run per call. Time beyond that is thrown
    /// away and reported as dropped. Does nothing while paused.
    pub fn tick(&mut self, elapsed: Duration) -> TickReport {
        let mut report = TickReport::default();
        if !self.is_running() {
            return report;
        }

        self.accumulated = self.accumulated.saturating_add(elapsed);
        let due = self.accumulated.as_nanos() / self.interval.as_nanos();
        let cap = u128::from(self.max_catch_up);
        report.steps = due.min(cap) as u32;
        for _ in 0..report.steps {
            self.step();
        }

        if due > cap {
            report.dropped = u64::try_from(due - cap).unwrap_or(u64::MAX);
            self.dropped_steps = self.dropped_steps.saturating_add(report.dropped);
            self.accumulated = Duration::ZERO;
        } else {
            self.accumulated -= self.interval * report.steps;
        }
        report
    }

    /// Flips one cell and returns its new state. Only allowed while paused.
    pub fn toggle_cell(&mut self, pos: Pos2) -> Result<bool> {
        self.ensure_paused("toggle a cell")?;
        let pos = self.universe.bounds().resolve(pos)?;
        let alive = !self.universe.is_alive(pos);
        Arc::make_mut(&mut self.universe).set_alive(pos, alive)?;
        Ok(alive)
    }

    /// Sets one cell. Only allowed while paused.
    pub fn set_alive(&mut self, pos: Pos2, alive: bool) -> Result<()> {
        self.ensure_paused("edit a cell")?;
        let pos = self.universe.bounds().resolve(pos)?;
        if self.universe.is_alive(pos) != alive {
            Arc::make_mut(&mut self.universe).set_alive(pos, alive)?;
        }
        Ok(())
    }

    /// Pauses and starts over at generation 0, empty or holding `pattern`
    /// at its own origin.
    ///
    /// If the pattern does not fit the bounds nothing changes.
    pub fn reset(&mut self, pattern: Option<&Pattern>) -> Result<()> {
        let mut universe = Universe::with_bounds(self.universe.bounds())?;
        if let Some(pattern) = pattern {
            pattern.stamp(&mut universe, pattern.origin())?;
        }
        self.replace(universe);
        Ok(())
    }

    /// Like [`Simulation::reset`], placing the pattern's `(0, 0)` at `offset`.
    pub fn load_pattern(&mut self, pattern: &Pattern, offset: Pos2) -> Result<()> {
        let mut universe = Universe::with_bounds(self.universe.bounds())?;
        pattern.stamp(&mut universe, offset)?;
        self.replace(universe);
        Ok(())
    }

    pub fn set_speed(&mut self, interval: Duration) -> Result<()> {
        validate_interval(interval)?;
        self.interval = interval;
        Ok(())
    }

    /// Sets the speed as generations per second.
    pub fn set_rate(&mut self, per_second: f64) -> Result<()> {
        if !(per_second.is_finite() && per_second > 0.0) {
            return Err(LifeError::invalid_argument(format!(
                "rate must be a positive number of generations per second, got {per_second}"
            )));
        }
        let interval = Duration::try_from_secs_f64(per_second.recip())
            .map_err(|e| LifeError::invalid_argument(format!("rate {per_second}: {e}")))?;
        self.set_speed(interval)
    }

    #[inline]
    pub fn rate(&self) -> f64 {
        self.interval.as_secs_f64().recip()
    }

    /// Switches rules. Takes effect with the next step.
    pub fn set_rule(&mut self, rule: Rule) {
        self.engine = RuleEngine::new(rule);
    }

    pub fn set_max_catch_up(&mut self, max_catch_up: u32) -> Result<()> {
        validate_catch_up(max_catch_up)?;
        self.max_catch_up = max_catch_up;
        Ok(())
    }

    fn replace(&mut self, universe: Universe) {
        self.universe = Arc::new(universe);
        self.state = RunState::Paused;
        self.generation = 0;
        self.accumulated = Duration::ZERO;
    }

    fn ensure_paused(&self, action: &'static str) -> Result<()> {
        match self.state {
            RunState::Paused => Ok(()),
            RunState::Running => Err(LifeError::InvalidOperation { action }),
        }
    }
}

fn validate_interval(interval: Duration) -> Result<()> {
    if interval.is_zero() {
        return Err(LifeError::invalid_argument("tick interval must be positive"));
    }
    Ok(())
}

fn validate_catch_up(max_catch_up: u32) -> Result<()> {
    if max_catch_up == 0 {
        return Err(LifeError::invalid_argument(
            "at least one catch-up step per tick is required",
        ));
    }
    Ok(())
}
