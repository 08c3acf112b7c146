// src/main.rs
use std::process::ExitCode;

use anyhow::{Context, Result};
use clap::Parser;
use tracing::{debug, error, Level};
use tracing_subscriber::FmtSubscriber;

use plant_health::cli::Cli;
use plant_health::config::RunConfig;
use plant_health::io::{read_rgba, write_png};
use plant_health::processing::{Pipeline, Report};
use plant_health::Error;

fn main() -> Result<ExitCode> {
    let cli = Cli::parse();
    let config = RunConfig::resolve(&cli).context("failed to load run configuration")?;
    setup_logging(config.debug);

    let image = read_rgba(&cli.input)
        .with_context(|| format!("failed to decode {}", cli.input.display()))?;
    debug!("Filename {} loaded ({}x{})", cli.input.display(), image.width, image.height);

    let pipeline = Pipeline::new(config.threads, config.pipeline_options())?;
    debug!("Running on {} threads", pipeline.threads());

    let input = cli.input.display().to_string();
    let output = match pipeline.run(&image.as_buffer()?) {
        Ok(output) => output,
        Err(err) => {
            // The score is still printed: nothing could be classified as vegetation.
            error!("{err}");
            if config.json {
                let report = Report::failed(Some(input), (image.width, image.height), &err);
                println!("{}", serde_json::to_string_pretty(&report)?);
            } else {
                println!("{:.6}", 0.0f32);
            }
            return Ok(match err {
                Error::DegenerateRange { .. } => ExitCode::SUCCESS,
                _ => ExitCode::FAILURE,
            });
        }
    };

    if let Some(path) = &config.output {
        let (width, height) = output.scaled.shape();
        debug!("Encoding PNG image {}", path.display());
        match write_png(path, output.visualization(config.export), width, height) {
            Ok(()) => debug!("{} saved", path.display()),
            Err(err) => error!("failed to write {}: {err}", path.display()),
        }
    }

    if config.json {
        let report = output.report(Some(input));
        println!("{}", serde_json::to_string_pretty(&report)?);
    } else {
        // The bare score is the only stdout output so scripts can capture it.
        println!("{:.6}", output.score);
    }

    Ok(ExitCode::SUCCESS)
}

fn setup_logging(verbose: bool) {
    let level = if verbose { Level::DEBUG } else { Level::WARN };
    let subscriber = FmtSubscriber::builder()
        .with_max_level(level)
        .with_target(false)
        .with_writer(std::io::stderr)
        .finish();
    if let Err(err) = tracing::subscriber::set_global_default(subscriber) {
        eprintln!("failed to install logger: {err}");
    }
}
