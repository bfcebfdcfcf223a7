use anyhow::{Context, Result, bail};
use lifesim::{Bounds, FillMode, Rule, SimulationConfig};
use std::{str::FromStr, time::Duration};

pub struct Args {
    matches: getopts::Matches,
}

impl Args {
    /// Parses `args`, returning `None` when only help was requested.
    fn new<T: AsRef<str>>(args: &[T]) -> Result<Option<Self>> {
        let mut opts = getopts::Options::new();
        opts.optflag("", "help", "print this help menu");
        opts.optflag("c", "console", "run in console mode");
        opts.optflag("t", "threads", "compute generations on all cores");
        opts.optflag("", "bounded", "confine the universe to WIDTH x HEIGHT");
        opts.optflag("", "wrap", "bounded universe whose edges wrap around");
        opts.optopt("o", "output", "write the final pattern as RLE", "FILE");
        opts.optopt("i", "input", "read the initial pattern from an RLE file", "FILE");
        opts.optopt("p", "pattern", "start from a built-in pattern", "NAME");
        opts.optopt("w", "width", "set grid width", "WIDTH");
        opts.optopt("h", "height", "set grid height", "HEIGHT");
        opts.optopt("f", "fill", "random, alternating, all or empty", "TYPE");
        opts.optopt("", "seed", "seed for the random fill", "SEED");
        opts.optopt("r", "rule", "birth/survive rule, e.g. B3/S23", "RULE");
        opts.optopt("", "rate", "generations per second in console mode", "RATE");
        opts.optopt("", "catch-up", "most generations run per frame", "COUNT");
        opts.optopt("g", "gens", "max number of generations", "COUNT");
        opts.optopt("", "stats", "write stats csv to file", "FILE");

        let matches = opts
            .parse(args.iter().map(T::as_ref))
            .context("invalid arguments")?;
        if matches.opt_present("help") {
            println!("{}", opts.usage("usage: lifesim [options]"));
            Ok(None)
        } else {
            Ok(Some(Self { matches }))
        }
    }
    pub fn from_env() -> Result<Option<Self>> {
        let env = std::env::args().collect::<Vec<_>>();
        Self::new(&env[1..])
    }

    fn get<T>(&self, name: &str) -> Result<Option<T>>
    where
        T: FromStr,
        T::Err: std::error::Error + Send + Sync + 'static,
    {
        self.matches
            .opt_get(name)
            .with_context(|| format!("invalid value for --{name}"))
    }

    pub fn console(&self) -> bool {
        self.matches.opt_present("console")
    }
    pub fn multithreading(&self) -> bool {
        self.matches.opt_present("threads")
    }

    /// `None` runs until interrupted.
    pub fn generations(&self) -> Result<Option<u64>> {
        self.get("gens")
    }

    pub fn grid_size(&self) -> Result<(i32, i32)> {
        let default = if self.console() {
            let (cols, rows) =
                crossterm::terminal::size().context("could not read the terminal size")?;
            // the last row holds the report
            (i32::from(cols), i32::from(rows.saturating_sub(1)))
        } else {
            (500, 500)
        };

        Ok((
            self.get("width")?.unwrap_or(default.0),
            self.get("height")?.unwrap_or(default.1),
        ))
    }
    pub fn bounds(&self) -> Result<Bounds> {
        let wrap = self.matches.opt_present("wrap");
        if !wrap && !self.matches.opt_present("bounded") {
            return Ok(Bounds::Unbounded);
        }
        let (w, h) = self.grid_size()?;
        Ok(Bounds::bounded(w, h, wrap)?)
    }
    pub fn fill_mode(&self) -> Result<FillMode> {
        Ok(self.get("fill")?.unwrap_or(FillMode::Random))
    }
    pub fn seed(&self) -> Result<Option<u64>> {
        self.get("seed")
    }
    /// The rule given on the command line, if any.
    pub fn rule(&self) -> Result<Option<Rule>> {
        self.get("rule")
    }
    pub fn pattern(&self) -> Option<String> {
        self.matches.opt_str("pattern")
    }

    pub fn config(&self) -> Result<SimulationConfig> {
        let defaults = SimulationConfig::default();
        let interval = match self.get::<f64>("rate")? {
            Some(rate) if rate.is_finite() && rate > 0.0 => Duration::try_from_secs_f64(rate.recip())
                .with_context(|| format!("rate {rate} is out of range"))?,
            Some(rate) => bail!("--rate must be positive, got {rate}"),
            None => defaults.interval,
        };

        Ok(SimulationConfig {
            rule: self.rule()?.unwrap_or_default(),
            bounds: self.bounds()?,
            interval,
            max_catch_up: self.get("catch-up")?.unwrap_or(defaults.max_catch_up),
            parallel: self.multithreading(),
        })
    }

    pub fn output_file(&self) -> Option<String> {
        self.matches.opt_str("output")
    }
    pub fn input_file(&self) -> Option<String> {
        self.matches.opt_str("input")
    }

    pub fn stats_file(&self) -> Option<String> {
        self.matches.opt_str("stats")
    }
}
