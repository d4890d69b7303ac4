//! Verificador CLI: scan media files for manipulation indicators.
//!
//! ## Usage
//!
//! ```bash
//! verificador scan photo.jpg clip.mp4        # Scan files, print table
//! verificador scan *.jpg --json              # JSON list on stdout
//! verificador scan clip.mp4 --seed 7         # Reproducible perturbation
//! verificador policy aggressive              # Inspect a tuning
//! ```

mod commands;
mod error;
mod output;

use clap::Parser;
use indicatif::{ProgressBar, ProgressStyle};
use std::process::ExitCode;
use tracing_subscriber::EnvFilter;

use crate::commands::{Cli, Commands, PolicyArgs, ScanArgs};
use crate::error::{CliError, CliResult};
use verdadero::{
    export_results, to_export_json, DetectionEngine, DetectionResult, EngineConfig, Jitter,
    ScoringPolicy,
};

fn main() -> ExitCode {
    match run() {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => {
            eprintln!("Error: {e}");
            ExitCode::FAILURE
        }
    }
}

fn run() -> CliResult<()> {
    let cli = Cli::parse();
    init_tracing(cli.verbose, cli.quiet);

    match cli.command {
        Commands::Scan(args) => run_scan(&args, cli.quiet),
        Commands::Policy(args) => run_policy(&args),
    }
}

fn init_tracing(verbose: u8, quiet: bool) {
    if quiet {
        return;
    }
    let filter = match verbose {
        0 => return,
        1 => "verdadero=debug,verificador=debug",
        _ => "trace",
    };
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(filter)),
        )
        .with_writer(std::io::stderr)
        .init();
}

fn run_scan(args: &ScanArgs, quiet: bool) -> CliResult<()> {
    if args.paths.is_empty() {
        return Err(CliError::NoInputs);
    }

    let policy = ScoringPolicy::by_name(&args.policy)
        .ok_or_else(|| CliError::UnknownPolicy(args.policy.clone()))?;
    let jitter = if args.no_jitter {
        Jitter::disabled()
    } else if let Some(seed) = args.seed {
        Jitter::seeded(policy.jitter_amplitude, seed)
    } else {
        Jitter::new(policy.jitter_amplitude)
    };

    let config = EngineConfig::default()
        .with_policy(policy)
        .with_jitter(jitter)
        .with_frame_count(args.frames);
    let mut engine = DetectionEngine::new(config);
    engine.warm_up()?;

    let progress = if quiet || args.json {
        ProgressBar::hidden()
    } else {
        let bar = ProgressBar::new(args.paths.len() as u64);
        bar.set_style(
            ProgressStyle::with_template("{spinner} [{bar:30}] {pos}/{len} {msg}")
                .unwrap_or_else(|_| ProgressStyle::default_bar()),
        );
        bar
    };

    let mut results: Vec<DetectionResult> = Vec::with_capacity(args.paths.len());
    for path in &args.paths {
        progress.set_message(path.display().to_string());
        // Failed assets still produce a neutral record; the batch continues.
        let result = engine.analyze_path(path).unwrap_or_else(|error| {
            tracing::warn!(path = %path.display(), %error, "asset failed");
            let name = path
                .file_name()
                .map_or_else(|| path.display().to_string(), |n| n.to_string_lossy().to_string());
            DetectionResult::neutral(name)
        });
        progress.inc(1);
        results.push(result);
    }
    progress.finish_and_clear();

    if args.json {
        println!("{}", to_export_json(&results)?);
    } else {
        for result in &results {
            println!("{}", output::format_result_line(result));
        }
        if !quiet {
            println!("{}", output::format_summary(&results));
        }
    }

    if let Some(path) = &args.output {
        export_results(&results, path)?;
        if !quiet && !args.json {
            println!("Results written to {}", path.display());
        }
    }

    Ok(())
}

fn run_policy(args: &PolicyArgs) -> CliResult<()> {
    match &args.name {
        Some(name) => {
            let policy = ScoringPolicy::by_name(name)
                .ok_or_else(|| CliError::UnknownPolicy(name.clone()))?;
            println!("{}", serde_json::to_string_pretty(&policy)?);
        }
        None => {
            for name in ScoringPolicy::names() {
                println!("{name}");
            }
        }
    }
    Ok(())
}
