//! Strokebench quick runner
//!
//! Times every entry point under both antialias values with a plain
//! wall-clock loop. Use it for a fast look or a CI comparison; use the
//! criterion bench when the numbers need statistics behind them.

use clap::Parser;
use colored::*;
use std::fs;
use std::time::Instant;
use strokebench::{EntryPoint, Harness, HarnessConfig, HarnessError, PixelOffsetMode};

/// Iteration counts for the different intensity levels
#[derive(Debug, Clone)]
struct BenchmarkConfig {
    warmup_iterations: u32,
    iterations_per_entry: u32,
}

impl BenchmarkConfig {
    fn get(level: u8) -> Self {
        match level {
            // Level 0: sanity check, finishes in well under a second
            0 => Self {
                warmup_iterations: 3,
                iterations_per_entry: 100,
            },
            1 => Self {
                warmup_iterations: 10,
                iterations_per_entry: 1_000,
            },
            2 => Self {
                warmup_iterations: 100,
                iterations_per_entry: 10_000,
            },
            3 => Self {
                warmup_iterations: 1_000,
                iterations_per_entry: 100_000,
            },
            _ => Self::get(1),
        }
    }
}

/// Command line arguments
#[derive(Parser)]
#[command(name = "strokebench-bench")]
#[command(about = "Quick per-operation timing of the strokebench backends")]
struct Args {
    /// Benchmark intensity level (0-3, higher = more iterations)
    #[arg(short = 'l', long = "level", default_value = "1")]
    level: u8,

    /// Output results as JSON (for CI comparison)
    #[arg(short = 'j', long = "json")]
    json_output: bool,

    /// Output file for JSON results (default: stdout)
    #[arg(short = 'o', long = "output")]
    output_file: Option<String>,

    /// List entry point names and exit
    #[arg(long = "list")]
    list: bool,

    /// Raster pixel-offset mode (default, half); overrides STROKEBENCH_PIXEL_OFFSET
    #[arg(long = "pixel-offset")]
    pixel_offset: Option<String>,
}

/// Timing for one entry point under one antialias value
#[derive(Debug, serde::Serialize)]
struct BenchmarkResult {
    entry: String,
    backend: String,
    operation: String,
    antialias: bool,
    ns_per_op: f64,
    total_time_ns: u128,
    iterations: u32,
}

/// JSON output structure for benchmark results
#[derive(Debug, serde::Serialize)]
struct BenchmarkOutput {
    version: String,
    timestamp: String,
    level: u8,
    pixel_offset: String,
    width: u32,
    height: u32,
    results: Vec<BenchmarkResult>,
}

/// Drives the harness the way a runner should: setup, then entry points
struct BenchmarkRunner {
    harness: Harness,
    config: BenchmarkConfig,
    json_output: bool,
    level: u8,
}

impl BenchmarkRunner {
    fn new(
        harness_config: HarnessConfig,
        config: BenchmarkConfig,
        json_output: bool,
        level: u8,
    ) -> Result<Self, HarnessError> {
        let harness = strokebench::harness_with(harness_config)?;

        if !json_output {
            println!(
                "{}",
                format!(
                    "Backends: {}",
                    harness
                        .backends()
                        .iter()
                        .map(|b| b.name())
                        .collect::<Vec<_>>()
                        .join(", ")
                )
                .green()
            );
        }

        Ok(Self {
            harness,
            config,
            json_output,
            level,
        })
    }

    fn benchmark_entry(&mut self, entry: EntryPoint, antialias: bool) -> BenchmarkResult {
        let iterations = self.config.iterations_per_entry;

        // Warmup iterations to avoid cold start effects
        for _ in 0..self.config.warmup_iterations {
            self.harness.run(entry);
        }

        let start_time = Instant::now();
        for _ in 0..iterations {
            self.harness.run(std::hint::black_box(entry));
        }
        let total_time_ns = start_time.elapsed().as_nanos();

        let ns_per_op = if total_time_ns > 0 {
            total_time_ns as f64 / iterations as f64
        } else {
            0.0
        };

        BenchmarkResult {
            entry: entry.name(),
            backend: entry.backend_name().to_string(),
            operation: entry.operation().name().to_string(),
            antialias,
            ns_per_op,
            total_time_ns,
            iterations,
        }
    }

    fn run_benchmarks(&mut self) -> Result<Vec<BenchmarkResult>, HarnessError> {
        let entries = self.harness.entries();

        if !self.json_output {
            println!(
                "\n{}",
                format!(
                    "{} entry points × 2 antialias values × {} iterations",
                    entries.len(),
                    self.config.iterations_per_entry
                )
                .bold()
                .cyan()
            );
            println!("{}", "─".repeat(72));
        }

        let mut all_results = Vec::with_capacity(entries.len() * 2);
        for antialias in [true, false] {
            self.harness.setup(antialias)?;
            for &entry in &entries {
                let result = self.benchmark_entry(entry, antialias);
                if !self.json_output {
                    println!(
                        "{}",
                        format!(
                            "AA: {:5} | {:32} | ns/op: {:12.1}",
                            result.antialias, result.entry, result.ns_per_op
                        )
                        .bright_black()
                    );
                }
                all_results.push(result);
            }
        }

        if !self.json_output {
            println!("{}", "─".repeat(72));
            println!(
                "{}",
                format!("Completed {} measurements", all_results.len())
                    .bold()
                    .green()
            );
        }

        Ok(all_results)
    }

    fn output_json(
        &self,
        results: Vec<BenchmarkResult>,
        output_file: Option<&str>,
    ) -> Result<(), Box<dyn std::error::Error>> {
        let config = self.harness.config();
        let output = BenchmarkOutput {
            version: env!("CARGO_PKG_VERSION").to_string(),
            timestamp: chrono::Utc::now().to_rfc3339(),
            level: self.level,
            pixel_offset: config.pixel_offset.name().to_string(),
            width: config.width,
            height: config.height,
            results,
        };

        let json = serde_json::to_string_pretty(&output)?;

        match output_file {
            Some(path) => fs::write(path, &json)?,
            None => println!("{}", json),
        }

        Ok(())
    }
}

fn main() -> Result<(), Box<dyn std::error::Error>> {
    // Initialize logging
    env_logger::init();

    let args = Args::parse();

    if args.level > 3 {
        eprintln!("Error: Level must be between 0 and 3 (got {})", args.level);
        std::process::exit(1);
    }

    let mut harness_config = HarnessConfig::from_env()?;
    if let Some(mode) = &args.pixel_offset {
        harness_config.pixel_offset = mode.parse::<PixelOffsetMode>()?;
    }

    let mut runner = BenchmarkRunner::new(
        harness_config,
        BenchmarkConfig::get(args.level),
        args.json_output,
        args.level,
    )?;

    if args.list {
        for entry in runner.harness.entries() {
            println!("{}", entry);
        }
        return Ok(());
    }

    if !args.json_output {
        println!("{}", "Strokebench Quick Runner".bold().cyan());
        println!("Level: {}", args.level);
    }

    let results = runner.run_benchmarks()?;

    if args.json_output {
        runner.output_json(results, args.output_file.as_deref())?;
    }

    Ok(())
}
