use std::hint::black_box;
use std::io::Write;
use std::time::{Duration, Instant};

use anyhow::{bail, Error, Result};

use crate::cli::{Opts, Output, Report};

/// Default warmup period in milliseconds.
const DEFAULT_WARMUP: u64 = 100;

/// Default bench period in milliseconds.
const DEFAULT_TIME_LIMIT: u64 = 400;

/// Runs a solver repeatedly and reports how long it takes.
#[derive(Default)]
pub struct Bencher {
    samples: Vec<Duration>,
}

impl Bencher {
    /// Construct a new bencher.
    #[inline]
    pub fn new() -> Self {
        Self::default()
    }

    /// Bench the given fn, reporting errors through the configured output.
    pub fn iter<T, O, E>(&mut self, opts: &Opts, iter: T) -> Result<()>
    where
        T: FnMut() -> Result<O, E>,
        Error: From<E>,
    {
        let stdout = std::io::stdout();
        let mut o = Output::new(stdout.lock(), opts.output_kind());

        if let Err(e) = self.run(&mut o, opts, iter) {
            o.error(format_args!("{e:#}"))?;
            bail!("bench failed");
        }

        Ok(())
    }

    fn run<T, O, E>(
        &mut self,
        o: &mut Output<impl Write>,
        opts: &Opts,
        mut iter: T,
    ) -> Result<()>
    where
        T: FnMut() -> Result<O, E>,
        Error: From<E>,
    {
        let warmup = Duration::from_millis(opts.warmup.unwrap_or(DEFAULT_WARMUP));
        let time_limit = Duration::from_millis(opts.time_limit.unwrap_or(DEFAULT_TIME_LIMIT));

        if !warmup.is_zero() {
            o.info(format_args!("warming up ({warmup:?})..."))?;
            let start = Instant::now();

            while start.elapsed() < warmup {
                black_box(iter()?);
            }
        }

        self.samples.clear();

        match opts.count {
            Some(count) => {
                let count = count.max(1);
                o.info(format_args!("running benches {count} time(s)..."))?;

                for _ in 0..count {
                    self.sample(&mut iter)?;
                }
            }
            None => {
                o.info(format_args!("running benches ({time_limit:?})..."))?;
                let start = Instant::now();

                loop {
                    self.sample(&mut iter)?;

                    if start.elapsed() >= time_limit {
                        break;
                    }
                }
            }
        }

        let report = Report::from_samples(&mut self.samples);
        o.report(&report)?;
        Ok(())
    }

    /// Time a single invocation.
    fn sample<T, O, E>(&mut self, iter: &mut T) -> Result<()>
    where
        T: FnMut() -> Result<O, E>,
        Error: From<E>,
    {
        let before = Instant::now();
        let value = iter()?;
        self.samples.push(before.elapsed());
        black_box(value);
        Ok(())
    }
}
