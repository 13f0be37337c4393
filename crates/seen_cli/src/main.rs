use anyhow::{Context, Result};
use clap::{Parser, Subcommand};
use serde::Serialize;
use std::fs::File;
use std::io::{self, BufRead, BufReader, BufWriter, Write};
use std::path::{Path, PathBuf};

use seen_core::{consts::DEFAULT_LOG2_BITS, FilterConfig, SeedHasher, UniqueTracker};

#[derive(Parser)]
#[command(name = "seen", about = "seenset CLI — first-seen filtering over line streams")]
struct Cli {
    #[command(subcommand)]
    cmd: Cmd,
}

#[derive(Subcommand)]
enum Cmd {
    /// Print each input line the first time it is seen
    Dedup {
        /// Filter config JSON (defaults to the reference 2^25-bit filter)
        #[arg(long)]
        config: Option<PathBuf>,
        /// Read from this file instead of stdin
        #[arg(long)]
        input: Option<PathBuf>,
    },

    /// Count observed and (estimated) unique lines
    Count {
        #[arg(long)]
        config: Option<PathBuf>,
        #[arg(long)]
        input: Option<PathBuf>,
    },

    /// Print the bit index one seed selects for VALUE
    Hash {
        #[arg(long)]
        seed: u64,
        #[arg(long, default_value_t = DEFAULT_LOG2_BITS)]
        log2_bits: u32,
        value: String,
    },

    /// Print or write the default filter config
    Config {
        #[arg(long)]
        out: Option<PathBuf>,
    },
}

#[derive(Serialize)]
struct CountReport {
    observed: u64,
    unique: u64,
    ones: u64,
    estimated_fpp: f64,
}

fn load_config(p: Option<&Path>) -> Result<FilterConfig> {
    match p {
        Some(p) => FilterConfig::load(p).with_context(|| format!("config {}", p.display())),
        None => Ok(FilterConfig::default()),
    }
}

fn open_input(p: Option<&Path>) -> Result<Box<dyn BufRead>> {
    Ok(match p {
        Some(p) => Box::new(BufReader::new(
            File::open(p).with_context(|| format!("open {}", p.display()))?,
        )),
        None => Box::new(BufReader::new(io::stdin())),
    })
}

/// Feed every `\n`-terminated line (trailing `\r` stripped) to `f` as raw bytes.
fn for_each_line(mut r: impl BufRead, mut f: impl FnMut(&[u8]) -> Result<()>) -> Result<()> {
    let mut buf = Vec::new();
    loop {
        buf.clear();
        if r.read_until(b'\n', &mut buf).context("read line")? == 0 {
            return Ok(());
        }
        let mut line = &buf[..];
        if let Some(rest) = line.strip_suffix(b"\n") {
            line = rest;
        }
        if let Some(rest) = line.strip_suffix(b"\r") {
            line = rest;
        }
        f(line)?;
    }
}

fn tracker_for(config: Option<&Path>) -> Result<UniqueTracker> {
    let cfg = load_config(config)?;
    Ok(UniqueTracker::with_config(&cfg)?)
}

fn main() -> Result<()> {
    tracing_subscriber::fmt().with_writer(io::stderr).init();
    let cli = Cli::parse();

    match cli.cmd {
        Cmd::Dedup { config, input } => {
            let mut tracker = tracker_for(config.as_deref())?;
            let stdout = io::stdout();
            let mut out = BufWriter::new(stdout.lock());
            for_each_line(open_input(input.as_deref())?, |line| {
                if tracker.observe(line) {
                    out.write_all(line)?;
                    out.write_all(b"\n")?;
                }
                Ok(())
            })?;
            out.flush()?;
            tracing::info!(observed = tracker.observed(), unique = tracker.unique(), "dedup done");
        }

        Cmd::Count { config, input } => {
            let mut tracker = tracker_for(config.as_deref())?;
            for_each_line(open_input(input.as_deref())?, |line| {
                tracker.observe(line);
                Ok(())
            })?;
            let report = CountReport {
                observed: tracker.observed(),
                unique: tracker.unique(),
                ones: tracker.filter().ones(),
                estimated_fpp: tracker.filter().estimated_fpp(tracker.unique()),
            };
            println!("{}", serde_json::to_string(&report)?);
        }

        Cmd::Hash { seed, log2_bits, value } => {
            let cfg = FilterConfig { log2_bits, seeds: vec![seed] };
            cfg.validate()?;
            let idx = SeedHasher::new(seed, log2_bits).index(value.as_bytes());
            println!("{idx}");
        }

        Cmd::Config { out } => {
            let cfg = FilterConfig::default();
            match out {
                Some(p) => {
                    cfg.save(&p).with_context(|| format!("write {}", p.display()))?;
                    tracing::info!(path = %p.display(), "wrote default config");
                }
                None => println!("{}", serde_json::to_string_pretty(&cfg)?),
            }
        }
    }
    Ok(())
}
