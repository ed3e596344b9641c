use log::{info, warn};

use crate::error::{OceanError, Result};
use crate::field::{WaveField, DEFAULT_ITERATIONS};
use crate::wave::Swell;

/// Swell description plus storm factor, and the wave field derived from them
#[derive(Debug, Clone)]
pub struct Ocean {
    swell: Swell,
    storm_factor: f32,
    iterations: usize,
    field: WaveField,
}

impl Ocean {
    pub fn new(swell: Swell, storm_factor: f32) -> Result<Self> {
        Self::with_iterations(swell, storm_factor, DEFAULT_ITERATIONS)
    }

    /// Build with a custom number of world sampling rounds
    pub fn with_iterations(swell: Swell, storm_factor: f32, iterations: usize) -> Result<Self> {
        let field = build_field(&swell, storm_factor, iterations)?;
        Ok(Self {
            swell,
            storm_factor,
            iterations,
            field,
        })
    }

    pub fn field(&self) -> &WaveField {
        &self.field
    }

    pub fn swell(&self) -> &Swell {
        &self.swell
    }

    pub fn storm_factor(&self) -> f32 {
        self.storm_factor
    }

    /// Amplitude of the primary swell train
    pub fn primary_amplitude(&self) -> f32 {
        self.swell.amplitude(self.storm_factor)
    }

    /// Replace the storm factor and rebuild the field.
    ///
    /// On error the previous field stays in place.
    pub fn set_storm_factor(&mut self, storm_factor: f32) -> Result<()> {
        self.field = build_field(&self.swell, storm_factor, self.iterations)?;
        self.storm_factor = storm_factor;
        info!(
            "Storm factor set to {:.2} (swell amplitude {:.2})",
            storm_factor,
            self.primary_amplitude()
        );
        Ok(())
    }
}

fn build_field(swell: &Swell, storm_factor: f32, iterations: usize) -> Result<WaveField> {
    if !(storm_factor.is_finite() && storm_factor >= 0.0) {
        return Err(OceanError::InvalidStormFactor(storm_factor));
    }

    let field = WaveField::new(swell.trains(storm_factor)?).with_iterations(iterations);
    let bound = field.contraction_bound();
    if bound >= 1.0 {
        warn!(
            "Waves too steep for exact surface sampling (contraction bound {:.2}), heights are approximate",
            bound
        );
    }
    Ok(field)
}
