//! `archer stream`: feed stdin through the background solver.
//!
//! Lines are read on their own thread so a slow solve never blocks input. The
//! main loop submits every parsed line (the worker keeps only the newest) and
//! polls for results at the interactive cadence, printing each new answer.

use std::io::BufRead;
use std::sync::mpsc::{self, TryRecvError};
use std::sync::Arc;

use anyhow::{bail, Context};

use archer_core::LaunchConfig;
use archer_solver::worker::{SolveRequest, SolverWorker, DEFAULT_POLL_INTERVAL};
use archer_solver::{TargetDirection, TargetSpec, VehicleMotion};

use crate::{output, OutputFormat};

/// Parse `distance azimuth [vehicle_speed vehicle_heading]`.
/// Blank lines and `#` comments yield `Ok(None)`.
pub fn parse_line(line: &str, config: &Arc<LaunchConfig>) -> anyhow::Result<Option<SolveRequest>> {
    let line = line.trim();
    if line.is_empty() || line.starts_with('#') {
        return Ok(None);
    }

    let fields = line
        .split(|c: char| c.is_whitespace() || c == ',')
        .filter(|f| !f.is_empty())
        .map(|f| match f.parse::<f64>() {
            Ok(v) if v.is_finite() => Ok(v),
            Ok(_) => bail!("not a finite number: {f:?}"),
            Err(e) => Err(e).with_context(|| format!("not a number: {f:?}")),
        })
        .collect::<anyhow::Result<Vec<f64>>>()?;

    let (distance, azimuth, vehicle) = match fields.as_slice() {
        [d, a] => (*d, *a, VehicleMotion::stationary()),
        [d, a, s, h] => (*d, *a, VehicleMotion { speed_ms: *s, heading_deg: *h }),
        _ => bail!("expected 2 or 4 fields, got {}", fields.len()),
    };

    Ok(Some(SolveRequest {
        target: TargetSpec::new(distance, config),
        vehicle,
        direction: TargetDirection::new(azimuth),
        config: Arc::clone(config),
    }))
}

pub fn run(config: Arc<LaunchConfig>, format: OutputFormat) -> anyhow::Result<()> {
    let (line_tx, lines) = mpsc::channel::<String>();
    std::thread::Builder::new()
        .name("archer-stdin".into())
        .spawn(move || {
            for line in std::io::stdin().lock().lines() {
                let Ok(line) = line else { break };
                if line_tx.send(line).is_err() {
                    break;
                }
            }
        })
        .context("failed to start stdin reader")?;

    let worker = SolverWorker::spawn().context("failed to start solver thread")?;
    let mut last_submitted: Option<SolveRequest> = None;
    let mut answered = true;
    let mut input_open = true;

    loop {
        while input_open {
            match lines.try_recv() {
                Ok(line) => match parse_line(&line, &config) {
                    Ok(Some(request)) => {
                        if worker.submit(request.clone()) {
                            eprintln!("note: skipped a pending request");
                        }
                        last_submitted = Some(request);
                        answered = false;
                    }
                    Ok(None) => {}
                    Err(e) => eprintln!("warning: ignoring line {line:?}: {e:#}"),
                },
                Err(TryRecvError::Empty) => break,
                Err(TryRecvError::Disconnected) => input_open = false,
            }
        }

        if let Some(result) = worker.latest() {
            output::stream_line(format, &result.request.target, result.solution.as_ref())?;
            if last_submitted.as_ref() == Some(&result.request) {
                answered = true;
            }
        }

        if !input_open && answered {
            return Ok(());
        }
        std::thread::sleep(DEFAULT_POLL_INTERVAL);
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parses_two_and_four_field_lines() {
        let cfg = Arc::new(LaunchConfig::default());

        let req = parse_line("3.0 45", &cfg).unwrap().unwrap();
        assert_eq!(req.target.distance_m, 3.0);
        assert_eq!(req.target.height_m, cfg.target_height_m);
        assert_eq!(req.direction.azimuth_deg, 45.0);
        assert_eq!(req.vehicle, VehicleMotion::stationary());

        let req = parse_line(" 2.5, -30, 1.2, 90 ", &cfg).unwrap().unwrap();
        assert_eq!(req.direction.azimuth_deg, -30.0);
        assert_eq!(req.vehicle.speed_ms, 1.2);
        assert_eq!(req.vehicle.heading_deg, 90.0);
    }

    #[test]
    fn skips_blank_and_comment_lines() {
        let cfg = Arc::new(LaunchConfig::default());
        assert!(parse_line("", &cfg).unwrap().is_none());
        assert!(parse_line("   # heading sweep", &cfg).unwrap().is_none());
    }

    #[test]
    fn rejects_malformed_lines() {
        let cfg = Arc::new(LaunchConfig::default());
        assert!(parse_line("3.0", &cfg).is_err());
        assert!(parse_line("3.0 1 2", &cfg).is_err());
        assert!(parse_line("far 10", &cfg).is_err());
    }

    #[test]
    fn rejects_non_finite_fields() {
        // A NaN request never compares equal to its own answer.
        let cfg = Arc::new(LaunchConfig::default());
        assert!(parse_line("NaN 0", &cfg).is_err());
        assert!(parse_line("3.0 inf", &cfg).is_err());
        assert!(parse_line("3.0 0 1.0 -inf", &cfg).is_err());
    }
}
