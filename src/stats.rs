use crate::{Frame, Simulation};
use std::{
    io,
    path::Path,
    time::{Duration, Instant},
};

/// The numbers recorded after each batch of generations.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct Sample {
    pub generation: u64,
    pub alive: usize,
    pub dropped: u64,
}
impl Sample {
    pub fn of(simulation: &Simulation) -> Self {
        Self {
            generation: simulation.generation(),
            alive: simulation.universe().live_count(),
            dropped: simulation.dropped_steps(),
        }
    }
}
impl From<&Frame> for Sample {
    fn from(frame: &Frame) -> Self {
        Self {
            generation: frame.generation,
            alive: frame.universe.live_count(),
            dropped: frame.dropped,
        }
    }
}

pub trait Recorder {
    type Str: AsRef<str>;

    fn record(&mut self, sample: Sample);

    fn has_report(&self) -> bool;
    fn report(&mut self) -> Self::Str;
}

pub struct SimpleRecord {
    last: Sample,
    gens_in_report: u64,
    last_report: Instant,
    report_every: Duration,
}
impl SimpleRecord {
    pub fn new(start: Sample) -> Self {
        Self {
            last: start,
            gens_in_report: 0,
            last_report: Instant::now(),
            report_every: Duration::from_millis(500),
        }
    }
}
impl Recorder for SimpleRecord {
    type Str = String;

    fn record(&mut self, sample: Sample) {
        self.gens_in_report += sample.generation.saturating_sub(self.last.generation);
        self.last = sample;
    }

    fn has_report(&self) -> bool {
        self.last_report.elapsed() >= self.report_every
    }
    fn report(&mut self) -> Self::Str {
        let gens_per_sec = self.gens_in_report as f64 / self.last_report.elapsed().as_secs_f64();
        // reset stats for next report
        self.last_report = Instant::now();
        self.gens_in_report = 0;

        format!(
            "{:.02}gen/s gen:{} alive:{} dropped:{}",
            gens_per_sec, self.last.generation, self.last.alive, self.last.dropped
        )
    }
}

/// Keeps one row per recorded sample for [`CsvRecord::save`].
pub struct CsvRecord {
    inner: SimpleRecord,
    data: Vec<(u128, Sample)>,
    last: Instant,
}
impl CsvRecord {
    pub fn new(start: Sample) -> Self {
        Self {
            inner: SimpleRecord::new(start),
            data: Vec::new(),
            last: Instant::now(),
        }
    }

    pub fn write<W: io::Write>(&self, mut out: W) -> io::Result<()> {
        out.write_all(b"gen,delta_t,alive,dropped\n")?;
        for (delta, sample) in &self.data {
            writeln!(
                out,
                "{},{},{},{}",
                sample.generation, delta, sample.alive, sample.dropped
            )?;
        }
        out.flush()
    }

    pub fn save<P: AsRef<Path>>(&self, path: P) -> io::Result<()> {
        let file = std::fs::File::create(path)?;
        self.write(io::BufWriter::new(file))
    }
}
impl Recorder for CsvRecord {
    type Str = <SimpleRecord as Recorder>::Str;

    fn record(&mut self, sample: Sample) {
        let delta = self.last.elapsed().as_micros();
        self.last = Instant::now();

        self.data.push((delta, sample));
        self.inner.record(sample);
    }

    fn has_report(&self) -> bool {
        self.inner.has_report()
    }
    fn report(&mut self) -> Self::Str {
        self.inner.report()
    }
}

pub enum SwitchRecorder {
    Csv(CsvRecord),
    Simple(SimpleRecord),
}
impl SwitchRecorder {
    pub fn new(start: Sample, csv: bool) -> Self {
        if csv {
            Self::Csv(CsvRecord::new(start))
        } else {
            Self::Simple(SimpleRecord::new(start))
        }
    }
    pub fn save<P: AsRef<Path>>(&self, path: P) -> io::Result<()> {
        match self {
            Self::Csv(r) => r.save(path),
            Self::Simple(_) => Err(io::Error::new(
                io::ErrorKind::Unsupported,
                "statistics were not recorded as csv",
            )),
        }
    }
}
impl Recorder for SwitchRecorder {
    type Str = String;

    fn record(&mut self, sample: Sample) {
        match self {
            Self::Csv(r) => r.record(sample),
            Self::Simple(r) => r.record(sample),
        }
    }
    fn has_report(&self) -> bool {
        match self {
            Self::Csv(r) => r.has_report(),
            Self::Simple(r) => r.has_report(),
        }
    }
    fn report(&mut self) -> Self::Str {
        match self {
            Self::Csv(r) => r.report(),
            Self::Simple(r) => r.report(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn sample(generation: u64, alive: usize) -> Sample {
        Sample {
            generation,
            alive,
            dropped: 0,
        }
    }

    #[test]
    fn report_shows_latest_sample() {
        let mut record = SimpleRecord::new(sample(0, 5));
        record.record(sample(1, 6));
        record.record(Sample {
            dropped: 2,
            ..sample(4, 9)
        });

        let report = record.report();

        assert!(report.ends_with("gen:4 alive:9 dropped:2"), "{report}");
    }

    #[test]
    fn csv_has_row_per_sample() {
        let mut record = CsvRecord::new(sample(0, 5));
        record.record(sample(1, 4));
        record.record(sample(2, 3));
        let mut out = Vec::new();

        record.write(&mut out).unwrap();

        let text = String::from_utf8(out).unwrap();
        let lines: Vec<&str> = text.lines().collect();
        assert_eq!(lines[0], "gen,delta_t,alive,dropped");
        assert_eq!(lines.len(), 3);
        assert!(lines[1].starts_with("1,") && lines[1].ends_with(",4,0"));
    }

    #[test]
    fn simple_recorder_cannot_save() {
        let recorder = SwitchRecorder::new(sample(0, 0), false);

        assert!(recorder.save("unused.csv").is_err());
    }
}
