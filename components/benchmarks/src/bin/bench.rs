//! Class system benchmark CLI

use benchmarks::{micro, runner};
use clap::Parser;
use log::info;
use std::process;

#[derive(Parser)]
#[command(name = "class-bench")]
#[command(about = "Class definition and instantiation benchmarks")]
struct Cli {
    /// Output results as JSON
    #[arg(long)]
    json: bool,

    /// Runs to average over
    #[arg(short, long, default_value = "1")]
    runs: usize,

    /// Instances constructed per run (defaults to each benchmark's own count)
    #[arg(short, long)]
    iterations: Option<usize>,

    /// Only run benchmarks whose name contains this text
    #[arg(short, long)]
    filter: Option<String>,
}

fn main() {
    env_logger::Builder::from_default_env().init();
    let cli = Cli::parse();

    let mut suite = micro::create_suite();
    if let Some(pattern) = &cli.filter {
        suite = suite.filter(pattern);
    }
    if let Some(iterations) = cli.iterations {
        suite.benchmarks = suite
            .benchmarks
            .into_iter()
            .map(|b| b.with_iterations(iterations))
            .collect();
    }

    if suite.benchmarks.is_empty() {
        eprintln!("Error: no benchmark matches the filter");
        process::exit(1);
    }

    info!("running {} benchmarks, {} run(s) each", suite.benchmarks.len(), cli.runs);
    let results = suite.run_multiple(cli.runs);

    if cli.json {
        match runner::format_results_json(&results) {
            Ok(json) => println!("{}", json),
            Err(e) => {
                eprintln!("Error formatting JSON: {}", e);
                process::exit(1);
            }
        }
    } else {
        println!("{}", runner::format_results(&results));

        let passed = results.iter().filter(|r| r.success).count();
        let total_ms: f64 = results.iter().map(|r| r.duration_ms).sum();
        println!("Summary: {}/{} passed, {:.2}ms total", passed, results.len(), total_ms);
    }

    if results.iter().any(|r| !r.success) {
        process::exit(1);
    }
}
