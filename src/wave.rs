use glam::{Vec2, Vec3};
use std::f32::consts::TAU;

use crate::error::{OceanError, Result};

/// Direction vectors shorter than this cannot be normalized reliably.
const MIN_DIRECTION_LENGTH: f32 = 1e-6;

/// Parameters for a single directional Gerstner wave train
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct WaveTrain {
    wavelength: f32,
    amplitude: f32,
    period: f32,
    direction: Vec2,
    sharpness: f32,
}

impl WaveTrain {
    /// Create a validated wave train.
    ///
    /// # Arguments
    /// * `wavelength` - Crest-to-crest distance, must be positive
    /// * `amplitude` - Crest height above rest level, must be non-negative
    /// * `period` - Seconds per cycle, must be positive
    /// * `direction` - Travel direction, any non-zero length (stored normalized)
    /// * `sharpness` - Horizontal-to-vertical displacement ratio in `[0, 1]`
    pub fn new(
        wavelength: f32,
        amplitude: f32,
        period: f32,
        direction: Vec2,
        sharpness: f32,
    ) -> Result<Self> {
        if !(wavelength.is_finite() && wavelength > 0.0) {
            return Err(OceanError::InvalidWave(format!(
                "wavelength must be positive, got {}",
                wavelength
            )));
        }
        if !(amplitude.is_finite() && amplitude >= 0.0) {
            return Err(OceanError::InvalidWave(format!(
                "amplitude must be non-negative, got {}",
                amplitude
            )));
        }
        if !(period.is_finite() && period > 0.0) {
            return Err(OceanError::InvalidWave(format!(
                "period must be positive, got {}",
                period
            )));
        }
        if !(sharpness.is_finite() && (0.0..=1.0).contains(&sharpness)) {
            return Err(OceanError::InvalidWave(format!(
                "sharpness must lie in [0, 1], got {}",
                sharpness
            )));
        }
        let length = direction.length();
        if !(length.is_finite() && length > MIN_DIRECTION_LENGTH) {
            return Err(OceanError::InvalidWave(format!(
                "direction ({}, {}) has no usable length",
                direction.x, direction.y
            )));
        }

        Ok(Self {
            wavelength,
            amplitude,
            period,
            direction: direction / length,
            sharpness,
        })
    }

    pub fn wavelength(&self) -> f32 {
        self.wavelength
    }

    pub fn amplitude(&self) -> f32 {
        self.amplitude
    }

    pub fn period(&self) -> f32 {
        self.period
    }

    /// Unit travel direction
    pub fn direction(&self) -> Vec2 {
        self.direction
    }

    pub fn sharpness(&self) -> f32 {
        self.sharpness
    }

    /// Wave number k = 2π/λ
    pub fn wave_number(&self) -> f32 {
        TAU / self.wavelength
    }

    /// Angular frequency ω = 2π/T
    pub fn angular_frequency(&self) -> f32 {
        TAU / self.period
    }

    /// Phase φ = k(d̂·r) − ωt at a rest position
    pub fn phase(&self, rest: Vec2, time: f32) -> f32 {
        self.wave_number() * self.direction.dot(rest) - self.angular_frequency() * time
    }

    /// Displacement contributed by this train at a rest position
    pub fn displacement(&self, rest: Vec2, time: f32) -> Vec3 {
        let (sin_phase, cos_phase) = self.phase(rest, time).sin_cos();
        let horizontal = self.amplitude * cos_phase * self.sharpness;

        Vec3::new(
            self.direction.x * horizontal,
            self.direction.y * horizontal,
            self.amplitude * sin_phase,
        )
    }

    /// Slope of the horizontal displacement, s·A·k.
    pub fn horizontal_steepness(&self) -> f32 {
        self.sharpness * self.amplitude * self.wave_number()
    }
}

/// Multipliers turning the primary swell train into the secondary one
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct SwellOffsets {
    pub wavelength: f32,
    pub amplitude: f32,
    pub period: f32,
    pub x: f32,
    pub y: f32,
}

impl Default for SwellOffsets {
    fn default() -> Self {
        Self {
            wavelength: 1.8,
            amplitude: 0.8,
            period: 1.4,
            x: 0.8,
            y: -1.5,
        }
    }
}

/// A named swell: a primary train sized by period and storm factor, plus a
/// secondary train derived from it through fixed offsets.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Swell {
    /// Primary period in seconds
    pub period: f32,
    pub sharpness: f32,
    /// Primary direction, not necessarily normalized
    pub direction: Vec2,
    pub offsets: SwellOffsets,
}

impl Default for Swell {
    fn default() -> Self {
        Self {
            period: 8.0,
            sharpness: 0.2,
            direction: Vec2::new(1.0, 0.2),
            offsets: SwellOffsets::default(),
        }
    }
}

impl Swell {
    /// Deep water wavelength approximation, λ ≈ 1.56·T²
    pub fn wavelength(&self) -> f32 {
        1.56 * self.period * self.period
    }

    /// Primary amplitude grows linearly with the storm factor
    pub fn amplitude(&self, storm_factor: f32) -> f32 {
        self.period * storm_factor
    }

    /// Build the primary and secondary trains for a storm factor
    pub fn trains(&self, storm_factor: f32) -> Result<Vec<WaveTrain>> {
        let amplitude = self.amplitude(storm_factor);
        let primary = WaveTrain::new(
            self.wavelength(),
            amplitude,
            self.period,
            self.direction,
            self.sharpness,
        )?;
        let secondary = WaveTrain::new(
            self.wavelength() * self.offsets.wavelength,
            amplitude * self.offsets.amplitude,
            self.period * self.offsets.period,
            Vec2::new(
                self.direction.x * self.offsets.x,
                self.direction.y * self.offsets.y,
            ),
            self.sharpness,
        )?;

        Ok(vec![primary, secondary])
    }
}
