//! Workspace automation: `cargo run -p storyline-xtask -- <task>`.

use std::path::{Path, PathBuf};
use std::process::Command;

use anyhow::{bail, Context, Result};
use clap::{Parser, Subcommand};
use storyline::options::Options;

#[derive(Parser)]
#[command(name = "xtask")]
#[command(about = "Storyline build automation tasks", long_about = None)]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Clippy over every target, native and with the `web` feature
    Check,

    /// Run the test suite
    Test {
        /// Also run doc tests, the demo binary and xtask
        #[arg(long)]
        workspace: bool,
    },

    /// Run the criterion benchmarks
    Bench {
        /// Only run benchmarks whose name contains this filter
        filter: Option<String>,
    },

    /// Write the options JSON schema
    Schema {
        /// Output file
        #[arg(default_value = "assets/options.schema.json")]
        out: PathBuf,
    },

    /// Write a TOML file holding every default option
    Defaults {
        /// Output file
        #[arg(default_value = "assets/presets/default.toml")]
        out: PathBuf,
    },
}

fn main() {
    if let Err(e) = run() {
        eprintln!("Error: {e:#}");
        std::process::exit(1);
    }
}

fn run() -> Result<()> {
    let cli = Cli::parse();

    match cli.command {
        Commands::Check => cmd_check(),
        Commands::Test { workspace } => cmd_test(workspace),
        Commands::Bench { filter } => cmd_bench(filter.as_deref()),
        Commands::Schema { out } => cmd_schema(&out),
        Commands::Defaults { out } => cmd_defaults(&out),
    }
}

fn cargo(args: &[&str]) -> Result<()> {
    println!("> cargo {}", args.join(" "));
    let status = Command::new("cargo")
        .args(args)
        .status()
        .context("failed to spawn cargo")?;
    if !status.success() {
        bail!("cargo {} failed", args.join(" "));
    }
    Ok(())
}

/// Command: cargo xtask check
fn cmd_check() -> Result<()> {
    cargo(&["clippy", "--workspace", "--all-targets"])?;
    cargo(&[
        "clippy",
        "--lib",
        "--no-default-features",
        "--features",
        "web",
        "--target",
        "wasm32-unknown-unknown",
    ])
}

/// Command: cargo xtask test [--workspace]
fn cmd_test(workspace: bool) -> Result<()> {
    if workspace {
        cargo(&["test", "--workspace"])
    } else {
        cargo(&["test", "--lib"])
    }
}

/// Command: cargo xtask bench [FILTER]
fn cmd_bench(filter: Option<&str>) -> Result<()> {
    let mut args = vec!["bench", "--bench", "animation_bench"];
    if let Some(filter) = filter {
        args.extend(["--", filter]);
    }
    cargo(&args)
}

fn write_file(out: &Path, content: &str) -> Result<()> {
    if let Some(parent) = out.parent() {
        std::fs::create_dir_all(parent)
            .with_context(|| format!("creating {}", parent.display()))?;
    }
    std::fs::write(out, content)
        .with_context(|| format!("writing {}", out.display()))?;
    println!("wrote {}", out.display());
    Ok(())
}

/// Command: cargo xtask schema [OUT]
fn cmd_schema(out: &Path) -> Result<()> {
    let schema = Options::json_schema_string()?;
    write_file(out, &schema)
}

/// Command: cargo xtask defaults [OUT]
fn cmd_defaults(out: &Path) -> Result<()> {
    Options::default().save(out)?;
    println!("wrote {}", out.display());
    Ok(())
}
