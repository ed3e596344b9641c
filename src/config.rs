use glam::Vec3;
use std::ops::RangeInclusive;

use crate::body::{HullBounds, DEFAULT_PITCH_DAMPING, DEFAULT_ROLL_DAMPING};
use crate::error::{OceanError, Result};
use crate::field::DEFAULT_ITERATIONS;
use crate::wave::Swell;

/// Storm factor range exposed to interactive controls
pub const STORM_FACTOR_RANGE: RangeInclusive<f32> = 0.01..=2.0;

/// Heading range exposed to interactive controls, in degrees
pub const HEADING_RANGE: RangeInclusive<f32> = 0.0..=360.0;

/// Everything needed to set up a boat-on-ocean scene
#[derive(Debug, Clone)]
pub struct SceneConfig {
    /// Side length of the square ocean plane in world units
    pub ocean_size: f32,
    /// Grid cells per side of the ocean plane
    pub subdivisions: usize,
    pub swell: Swell,
    pub storm_factor: f32,
    /// Boat heading in degrees
    pub heading: f32,
    /// Scale applied to the unit cube hull (beam, length, height)
    pub hull_scale: Vec3,
    pub pitch_damping: f32,
    pub roll_damping: f32,
    /// Rounds of world-to-rest inversion per surface sample
    pub iterations: usize,
}

impl Default for SceneConfig {
    fn default() -> Self {
        Self {
            ocean_size: 192.0,
            subdivisions: 96,
            swell: Swell::default(),
            storm_factor: 0.01,
            heading: 0.0,
            hull_scale: Vec3::new(3.0, 10.0, 5.0),
            pitch_damping: DEFAULT_PITCH_DAMPING,
            roll_damping: DEFAULT_ROLL_DAMPING,
            iterations: DEFAULT_ITERATIONS,
        }
    }
}

impl SceneConfig {
    pub fn hull_bounds(&self) -> HullBounds {
        HullBounds::unit_cube().scaled(self.hull_scale)
    }

    /// Check the values a user can get wrong from the command line
    pub fn validate(&self) -> Result<()> {
        if !STORM_FACTOR_RANGE.contains(&self.storm_factor) {
            return Err(OceanError::InvalidConfig(format!(
                "storm factor {} outside {:?}",
                self.storm_factor, STORM_FACTOR_RANGE
            )));
        }
        if !HEADING_RANGE.contains(&self.heading) {
            return Err(OceanError::InvalidConfig(format!(
                "heading {} outside {:?}",
                self.heading, HEADING_RANGE
            )));
        }
        if !(self.ocean_size.is_finite() && self.ocean_size > 0.0) {
            return Err(OceanError::InvalidConfig(format!(
                "ocean size must be positive, got {}",
                self.ocean_size
            )));
        }
        if self.subdivisions == 0 {
            return Err(OceanError::InvalidConfig(
                "ocean needs at least one subdivision".to_string(),
            ));
        }
        if !(self.hull_scale.is_finite() && self.hull_scale.min_element() > 0.0) {
            return Err(OceanError::InvalidConfig(format!(
                "hull scale must be positive, got {:?}",
                self.hull_scale
            )));
        }
        for damping in [self.pitch_damping, self.roll_damping] {
            if !(damping.is_finite() && damping >= 1.0) {
                return Err(OceanError::InvalidDamping(damping));
            }
        }
        Ok(())
    }
}
