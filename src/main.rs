use std::error::Error;
use std::io::{self, BufRead, Write};
use std::process::ExitCode;

use clap::Parser;
use log::info;
use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};

use scroll_motion_engine::driver::{CancelToken, ConsoleDriver, InputDriver};
use scroll_motion_engine::session::run_session;
use scroll_motion_engine::{Direction, EngineConfig, EngineError, Region, SessionConfig};

/// Humanized scrolling over a selected screen region.
#[derive(Parser)]
#[command(version, about)]
struct Cli {
    /// Distance scale factor applied to each scroll (e.g. 1, 10, 100).
    #[arg(long, default_value_t = 1.0)]
    scale: f64,

    /// Seed for the run's random generator; drawn from entropy when omitted.
    #[arg(long)]
    seed: Option<u64>,

    /// Switch to bulk pacing at this many units per second.
    #[arg(long)]
    rate: Option<f64>,

    /// Stop after this many scroll iterations instead of running forever.
    #[arg(long)]
    iterations: Option<u64>,

    /// Region as LEFT,TOP,WIDTH,HEIGHT; captured interactively when omitted.
    #[arg(long, value_parser = parse_region)]
    region: Option<Region>,

    /// Scroll content backward (up) instead of forward.
    #[arg(long)]
    backward: bool,
}

fn main() -> ExitCode {
    env_logger::init();
    let cli = Cli::parse();

    let seed = cli.seed.unwrap_or_else(|| rand::rng().random());
    let mut rng = StdRng::seed_from_u64(seed);
    info!("rng seed: {seed}");

    let mut driver = ConsoleDriver::new();
    let region = match cli.region {
        Some(region) => region,
        None => match capture_region(&mut driver) {
            Ok(region) => region,
            Err(e) => {
                eprintln!("region capture failed: {e}");
                return ExitCode::FAILURE;
            }
        },
    };
    if region.height <= 0 {
        eprintln!(
            "selected region has no height; pass --region LEFT,TOP,WIDTH,HEIGHT with a positive height"
        );
        return ExitCode::FAILURE;
    }
    info!(
        "selected region: left={} top={} width={} height={}",
        region.left, region.top, region.width, region.height
    );

    let session = SessionConfig {
        scale: cli.scale,
        target_rate: cli.rate,
        iterations: cli.iterations,
        direction: if cli.backward {
            Direction::Backward
        } else {
            Direction::Forward
        },
        ..SessionConfig::default()
    };
    let cancel = CancelToken::new();

    match run_session(
        &region,
        &session,
        &EngineConfig::default(),
        &mut driver,
        &cancel,
        &mut rng,
    ) {
        Ok(report) => {
            println!(
                "Done: {} iterations, {} unit actions issued.",
                report.iterations, report.total_units
            );
            ExitCode::SUCCESS
        }
        Err(EngineError::Aborted(_)) => {
            println!("Abort signal received. Exiting.");
            ExitCode::SUCCESS
        }
        Err(e) => {
            eprintln!("error: {e}");
            ExitCode::FAILURE
        }
    }
}

/// Two ENTER-confirmed corner picks against the driver's pointer position.
fn capture_region<D: InputDriver>(driver: &mut D) -> Result<Region, Box<dyn Error>> {
    let top_left = prompt_for_pointer(driver, "Move the pointer to the TOP-LEFT corner of the region.")?;
    let bottom_right =
        prompt_for_pointer(driver, "Move the pointer to the BOTTOM-RIGHT corner of the region.")?;
    Ok(Region::from_corners(top_left, bottom_right))
}

fn prompt_for_pointer<D: InputDriver>(
    driver: &mut D,
    prompt: &str,
) -> Result<(i32, i32), Box<dyn Error>> {
    println!("{prompt}");
    print!("Press ENTER when ready... ");
    io::stdout().flush()?;
    let mut line = String::new();
    io::stdin().lock().read_line(&mut line)?;
    Ok(driver.pointer_position()?)
}

fn parse_region(raw: &str) -> Result<Region, String> {
    let parts: Vec<&str> = raw.split(',').map(str::trim).collect();
    if parts.len() != 4 {
        return Err("expected LEFT,TOP,WIDTH,HEIGHT".into());
    }
    let mut values = [0i32; 4];
    for (slot, part) in values.iter_mut().zip(&parts) {
        *slot = part
            .parse()
            .map_err(|_| format!("invalid coordinate {part:?}"))?;
    }
    let [left, top, width, height] = values;
    if width < 0 || height < 0 {
        return Err("width and height must be non-negative".into());
    }
    Ok(Region {
        left,
        top,
        width,
        height,
    })
}
