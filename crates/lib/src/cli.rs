//! CLI helpers.

mod answer;
mod bencher;
pub(crate) mod error;
mod logger;
mod output;

use core::fmt;
use core::ops::AddAssign;
use core::str::FromStr;
use core::time::Duration;
use std::path::{Path, PathBuf};

use anyhow::{anyhow, bail, Context, Error, Result};
use serde::{Deserialize, Serialize};

pub use self::answer::Answer;
pub use self::bencher::Bencher;
pub use self::error::{error_context, LineCol};
use self::output::{Output, OutputKind};

use crate::input::IStr;

static LOGGER: logger::Logger = logger::Logger;

/// Whether to solve once or to benchmark the solver.
#[derive(Default, Debug, Clone, Copy, PartialEq, Eq)]
pub enum Mode {
    /// Solve once and print the answers.
    #[default]
    Default,
    /// Run the solver repeatedly and report timings.
    Bench,
}

/// Options accepted by every puzzle binary.
#[derive(Default)]
pub struct Opts {
    /// Solve once or bench.
    pub mode: Mode,
    /// Log at debug level.
    verbose: bool,
    /// Emit JSON lines instead of text.
    json: bool,
    /// Warmup before benching, in milliseconds.
    warmup: Option<u64>,
    /// How long to bench for, in milliseconds.
    time_limit: Option<u64>,
    /// Run this many iterations instead of benching for a time limit.
    count: Option<usize>,
    /// Read input from this path instead of the puzzle's default.
    input: Option<PathBuf>,
}

impl Opts {
    /// Parse options from the process arguments and install the logger.
    pub fn parse() -> Result<Self> {
        let args = std::env::args_os()
            .skip(1)
            .map(|arg| arg.into_string().map_err(|_| anyhow!("non-utf8 argument")));

        let opts = Self::parse_from(args)?;

        // Log lines would corrupt the JSON stream.
        if !opts.json {
            let level = match opts.verbose {
                true => log::LevelFilter::Debug,
                false => log::LevelFilter::Info,
            };

            log::set_max_level(level);
            log::set_logger(&LOGGER)
                .map_err(|error| anyhow!("failed to install logger: {error}"))?;
        }

        Ok(opts)
    }

    fn parse_from<I>(args: I) -> Result<Self>
    where
        I: IntoIterator<Item = Result<String>>,
    {
        let mut opts = Self::default();
        let mut args = args.into_iter();

        while let Some(arg) = args.next() {
            match arg?.as_str() {
                "--bench" if opts.mode == Mode::Bench => bail!("`--bench` given more than once"),
                "--bench" => opts.mode = Mode::Bench,
                "--verbose" => opts.verbose = true,
                "--json" => opts.json = true,
                "--warmup" => opts.warmup = Some(value(&mut args, "--warmup")?),
                "--time-limit" => opts.time_limit = Some(value(&mut args, "--time-limit")?),
                "--count" => opts.count = Some(value(&mut args, "--count")?),
                "--input" => opts.input = Some(value(&mut args, "--input")?),
                "--" => break,
                other => bail!("unsupported argument: {other}"),
            }
        }

        Ok(opts)
    }

    /// The path to read input from, falling back to `default`.
    pub fn input_path(&self, default: &str) -> PathBuf {
        self.input.clone().unwrap_or_else(|| PathBuf::from(default))
    }

    fn output_kind(&self) -> OutputKind {
        match self.json {
            true => OutputKind::Json,
            false => OutputKind::Normal,
        }
    }
}

/// Parse the value following `flag`.
fn value<T>(args: &mut impl Iterator<Item = Result<String>>, flag: &str) -> Result<T>
where
    T: FromStr,
    T::Err: std::error::Error + Send + Sync + 'static,
{
    let value = args.next().with_context(|| format!("missing value for `{flag}`"))??;
    value.parse().with_context(|| format!("bad value for `{flag}`: {value}"))
}

/// Run a solver according to the parsed options.
///
/// In the default mode the answers are printed once, with any error
/// annotated by the position in the input it was raised at.
pub fn run<T, O, E>(opts: &Opts, path: &Path, input: IStr, mut solve: T) -> Result<()>
where
    T: FnMut(IStr) -> Result<O, E>,
    O: Answer,
    Error: From<E>,
{
    match opts.mode {
        Mode::Default => {
            let value = match solve(input) {
                Ok(value) => value,
                Err(error) => return Err(error_context(path, input, error)),
            };

            let stdout = std::io::stdout();
            let mut o = Output::new(stdout.lock(), opts.output_kind());
            o.answer(&value)?;
        }
        Mode::Bench => {
            let mut b = Bencher::new();
            b.iter(opts, || solve(input))?;
        }
    }

    Ok(())
}

/// Timing report produced by a bench run.
#[derive(Debug, Default, Deserialize, Serialize)]
pub struct Report {
    pub p50: Duration,
    pub p95: Duration,
    pub p99: Duration,
    pub count: usize,
    pub min: Duration,
    pub max: Duration,
    pub avg: Duration,
}

impl Report {
    /// Summarize the given samples, sorting them in the process.
    fn from_samples(samples: &mut [Duration]) -> Self {
        samples.sort_unstable();

        let count = samples.len();

        let avg = match u32::try_from(count) {
            Ok(0) | Err(..) => Duration::ZERO,
            Ok(n) => samples.iter().sum::<Duration>() / n,
        };

        Self {
            p50: percentile(samples, 50.0),
            p95: percentile(samples, 95.0),
            p99: percentile(samples, 99.0),
            count,
            min: samples.first().copied().unwrap_or_default(),
            max: samples.last().copied().unwrap_or_default(),
            avg,
        }
    }
}

/// The sample at percentile `p` of sorted `samples`.
fn percentile(samples: &[Duration], p: f64) -> Duration {
    if samples.is_empty() {
        return Duration::ZERO;
    }

    let n = (samples.len() as f64 * p / 100.0) as usize;
    samples[n.min(samples.len() - 1)]
}

impl fmt::Display for Report {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "count: {}, min: {:?}, max: {:?}, avg: {:?}, 50th: {:?}, 95th: {:?}, 99th: {:?}",
            self.count, self.min, self.max, self.avg, self.p50, self.p95, self.p99
        )
    }
}

/// Reports are summed field by field when aggregating several binaries.
impl AddAssign<&Report> for Report {
    fn add_assign(&mut self, other: &Report) {
        for (a, b) in [
            (&mut self.p50, other.p50),
            (&mut self.p95, other.p95),
            (&mut self.p99, other.p99),
            (&mut self.min, other.min),
            (&mut self.max, other.max),
            (&mut self.avg, other.avg),
        ] {
            *a += b;
        }

        self.count += other.count;
    }
}

#[cfg(test)]
mod tests {
    use core::time::Duration;
    use std::path::PathBuf;

    use super::{Mode, Opts, Report};

    fn parse(args: &[&str]) -> anyhow::Result<Opts> {
        Opts::parse_from(args.iter().map(|arg| Ok(arg.to_string())))
    }

    #[test]
    fn test_parse_opts() {
        let opts = parse(&["--bench", "--count", "10", "--input", "other.txt"]).unwrap();
        assert!(matches!(opts.mode, Mode::Bench));
        assert_eq!(opts.count, Some(10));
        assert_eq!(opts.input_path("default.txt"), PathBuf::from("other.txt"));

        let opts = parse(&["--json", "--", "--ignored"]).unwrap();
        assert!(opts.json);
        assert_eq!(opts.input_path("default.txt"), PathBuf::from("default.txt"));
    }

    #[test]
    fn test_parse_opts_errors() {
        assert!(parse(&["--bench", "--bench"]).is_err());
        assert!(parse(&["--count"]).is_err());
        assert!(parse(&["--count", "many"]).is_err());
        assert!(parse(&["--unknown"]).is_err());
    }

    #[test]
    fn test_report() {
        let mut samples = (1..=100).rev().map(Duration::from_millis).collect::<Vec<_>>();
        let report = Report::from_samples(&mut samples);

        assert_eq!(report.count, 100);
        assert_eq!(report.min, Duration::from_millis(1));
        assert_eq!(report.max, Duration::from_millis(100));
        assert_eq!(report.p50, Duration::from_millis(51));
        assert_eq!(report.p99, Duration::from_millis(100));
        assert_eq!(report.avg, Duration::from_micros(50500));

        let empty = Report::from_samples(&mut []);
        assert_eq!(empty.count, 0);
        assert_eq!(empty.max, Duration::ZERO);
    }
}
