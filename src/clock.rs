// Simulation clock

use crate::error::ClockError;

/// Speed multipliers offered by the number keys, slowest first.
pub const SPEED_PRESETS: [f64; 5] = [0.0, 0.5, 1.0, 2.0, 5.0];

/// Accumulates scaled simulation time from wall-clock frame deltas.
#[derive(Debug, Clone, PartialEq)]
pub struct SimulationClock {
    time: f64,
    speed: f64,
}

impl Default for SimulationClock {
    fn default() -> Self {
        Self::new()
    }
}

impl SimulationClock {
    /// A clock at time zero running at real-time speed.
    pub fn new() -> Self {
        Self {
            time: 0.0,
            speed: 1.0,
        }
    }

    /// Current simulation time in seconds.
    pub fn time(&self) -> f64 {
        self.time
    }

    pub fn speed(&self) -> f64 {
        self.speed
    }

    pub fn is_paused(&self) -> bool {
        self.speed == 0.0
    }

    /// Advances by `wall_dt * speed` and returns the new time.
    ///
    /// Negative or non-finite deltas (a clock hiccup) advance nothing.
    pub fn advance(&mut self, wall_dt: f64) -> f64 {
        if wall_dt.is_finite() && wall_dt > 0.0 {
            self.time += wall_dt * self.speed;
        }
        self.time
    }

    pub fn set_speed(&mut self, multiplier: f64) -> Result<(), ClockError> {
        if !multiplier.is_finite() || multiplier < 0.0 {
            return Err(ClockError::InvalidSpeed(multiplier));
        }
        self.speed = multiplier;
        log::debug!("Simulation speed set to {multiplier}x");
        Ok(())
    }

    /// Switches to `SPEED_PRESETS[index]` and returns the chosen multiplier.
    pub fn select_preset(&mut self, index: usize) -> Result<f64, ClockError> {
        let speed = *SPEED_PRESETS
            .get(index)
            .ok_or(ClockError::UnknownPreset(index))?;
        self.set_speed(speed)?;
        Ok(speed)
    }
}
