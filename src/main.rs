use std::{process::ExitCode, time::Instant};

use log::info;

use postman_core::{Result, RouteOptions, logging};

fn main() -> ExitCode {
    match run() {
        Ok(()) => ExitCode::SUCCESS,
        Err(err) => {
            eprintln!("error: {err}");
            ExitCode::FAILURE
        }
    }
}

fn run() -> Result<()> {
    let now = Instant::now();
    let options = RouteOptions::from_args()?;
    logging::init_logger(&options)?;

    info!("options: {options}");

    let metrics = postman_core::run(&options)?;

    println!(
        "route written to {} ({} steps)",
        options.output_path().display(),
        metrics.steps
    );
    info!(
        "output: steps={} time={:.2}s",
        metrics.steps,
        now.elapsed().as_secs_f32()
    );

    Ok(())
}
