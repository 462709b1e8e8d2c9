//! Builds every puzzle binary and runs them one after another, collecting
//! their answers and bench reports.

use std::ffi::OsString;
use std::io::Read;
use std::path::PathBuf;
use std::process::{Command, Stdio};

use anyhow::{bail, Context, Result};
use lib::cli::Report;
use serde::de::{DeserializeOwned, IntoDeserializer};
use serde::Deserialize;

/// The puzzle crate whose binaries are run.
const PACKAGE: &str = "y2023";

#[derive(Default)]
struct Opts {
    quiet: bool,
    verbose: bool,
    /// Arguments forwarded to every puzzle binary.
    forward: Vec<OsString>,
}

impl Opts {
    fn parse() -> Result<Self> {
        let mut opts = Self::default();
        let mut args = std::env::args_os().skip(1);

        while let Some(arg) = args.next() {
            match arg.to_str() {
                Some("-q" | "--quiet") => opts.quiet = true,
                Some("-V" | "--verbose") => opts.verbose = true,
                Some("--") => break,
                Some(other) => bail!("unsupported argument: {other}"),
                None => bail!("non-utf8 argument"),
            }
        }

        opts.forward.extend(args);
        Ok(opts)
    }

    fn is_verbose(&self) -> bool {
        self.verbose && !self.quiet
    }
}

/// A compiled puzzle binary.
struct Binary {
    name: String,
    path: PathBuf,
}

/// Subset of a `compiler-artifact` message emitted by cargo.
#[derive(Deserialize)]
struct Artifact {
    target: Target,
    executable: Option<PathBuf>,
}

#[derive(Deserialize)]
struct Target {
    name: String,
    kind: Vec<String>,
}

/// A single JSON line written by a puzzle binary.
#[derive(Deserialize)]
struct Line<T> {
    data: T,
}

#[derive(Deserialize)]
struct Answer {
    part: usize,
    value: String,
}

#[derive(Deserialize)]
struct Message {
    kind: String,
    output: String,
}

/// Iterate over a stream of JSON values.
fn json_lines(reader: impl Read) -> impl Iterator<Item = serde_json::Result<serde_json::Value>> {
    serde_json::Deserializer::from_reader(reader).into_iter()
}

fn data<T>(value: serde_json::Value) -> Result<T>
where
    T: DeserializeOwned,
{
    Ok(Line::<T>::deserialize(value.into_deserializer())?.data)
}

/// Build the puzzle binaries in release mode.
fn build() -> Result<Vec<Binary>> {
    let mut child = Command::new("cargo")
        .args(["build", "--release", "-p", PACKAGE, "--message-format", "json"])
        .stdout(Stdio::piped())
        .spawn()?;

    let stdout = child.stdout.take().context("missing stdout")?;
    let mut binaries = Vec::new();

    for value in json_lines(stdout) {
        let value = value?;

        if value.get("reason").and_then(|d| d.as_str()) != Some("compiler-artifact") {
            continue;
        }

        let artifact = Artifact::deserialize(value.into_deserializer())?;

        if artifact.target.kind != ["bin"] {
            continue;
        }

        binaries.push(Binary {
            path: artifact.executable.context("missing executable")?,
            name: artifact.target.name,
        });
    }

    let status = child.wait()?;

    if !status.success() {
        bail!("cargo build failed: {status}");
    }

    binaries.sort_by(|a, b| a.name.cmp(&b.name));
    Ok(binaries)
}

/// Run a single binary, returning whether it succeeded.
fn run(opts: &Opts, binary: &Binary, total: &mut Report) -> Result<bool> {
    let mut child = Command::new(&binary.path)
        .args(&opts.forward)
        .arg("--json")
        .stdout(Stdio::piped())
        .spawn()?;

    let stdout = child.stdout.take().context("missing stdout")?;
    let name = &binary.name;

    for value in json_lines(stdout) {
        let value = value?;

        match value.get("type").and_then(|d| d.as_str()) {
            Some("answer") => {
                let Answer { part, value } = data(value)?;

                if !opts.quiet {
                    println!("{name}: part {part}: {value}");
                }
            }
            Some("report") => {
                let report = data::<Report>(value)?;

                if !opts.quiet {
                    println!("{name}: {report}");
                }

                *total += &report;
            }
            Some("message") => {
                let Message { kind, output } = data(value)?;

                if opts.is_verbose() || kind == "error" {
                    println!("{name}: {kind}: {output}");
                }
            }
            _ => {}
        }
    }

    let status = child.wait()?;

    if opts.is_verbose() {
        println!("{name}: {status}");
    }

    Ok(status.success())
}

fn main() -> Result<()> {
    let opts = Opts::parse()?;

    let mut total = Report::default();
    let mut failed = Vec::new();

    for binary in build()? {
        if !run(&opts, &binary, &mut total)? {
            failed.push(binary.name);
        }
    }

    if total.count > 0 {
        println!("total: {total}");
    }

    if !failed.is_empty() {
        bail!("failed: {}", failed.join(", "));
    }

    Ok(())
}
