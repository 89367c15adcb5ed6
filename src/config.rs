use clap::Parser;

use crate::camera::{MOVE_STEP, Steps, TURN_STEP};

const DEFAULT_FOV: f64 = 1.5 * std::f64::consts::PI;

/// First-person raycaster over a line-segment room.
#[derive(Debug, Clone, Parser)]
#[command(version, about)]
pub struct Config {
    /// Initial window width in logical pixels.
    #[arg(long, default_value_t = 800, value_parser = clap::value_parser!(u32).range(1..))]
    pub width: u32,

    /// Initial window height in logical pixels.
    #[arg(long, default_value_t = 600, value_parser = clap::value_parser!(u32).range(1..))]
    pub height: u32,

    /// Horizontal field of view in radians, swept across the screen columns.
    #[arg(long, default_value_t = DEFAULT_FOV, value_parser = positive)]
    pub fov: f64,

    /// Radians turned per rotate key event.
    #[arg(long, default_value_t = TURN_STEP, value_parser = positive)]
    pub turn_step: f64,

    /// World units walked per move key event.
    #[arg(long, default_value_t = MOVE_STEP, value_parser = positive)]
    pub move_step: f64,
}

impl Config {
    pub fn steps(&self) -> Steps {
        Steps {
            turn: self.turn_step,
            walk: self.move_step,
        }
    }
}

fn positive(s: &str) -> Result<f64, String> {
    let v: f64 = s.parse().map_err(|e| format!("`{s}` is not a number: {e}"))?;
    if v.is_finite() && v > 0.0 {
        Ok(v)
    } else {
        Err(format!("`{s}` must be a finite value above zero"))
    }
}
