use glam::{Vec2, Vec3};
use rayon::prelude::*;

use crate::wave::WaveTrain;

/// Rounds of fixed-point inversion used by the world surface sampler
pub const DEFAULT_ITERATIONS: usize = 4;

/// Anything that can report the water displacement found at a world position
pub trait Surface {
    fn sample_world_surface(&self, world_x: f32, world_y: f32, time: f32) -> Vec3;
}

impl Surface for WaveField {
    fn sample_world_surface(&self, world_x: f32, world_y: f32, time: f32) -> Vec3 {
        WaveField::sample_world_surface(self, world_x, world_y, time)
    }
}

/// Superposition of Gerstner wave trains.
///
/// The field is immutable while it is being sampled. Parameter changes build a
/// new field and replace the old one between frames.
#[derive(Debug, Clone, PartialEq)]
pub struct WaveField {
    trains: Vec<WaveTrain>,
    iterations: usize,
}

impl Default for WaveField {
    /// Flat water
    fn default() -> Self {
        Self::new(Vec::new())
    }
}

impl WaveField {
    pub fn new(trains: Vec<WaveTrain>) -> Self {
        Self {
            trains,
            iterations: DEFAULT_ITERATIONS,
        }
    }

    /// Set the number of inversion rounds used by `sample_world_surface`
    pub fn with_iterations(mut self, iterations: usize) -> Self {
        self.iterations = iterations;
        self
    }

    pub fn trains(&self) -> &[WaveTrain] {
        &self.trains
    }

    pub fn iterations(&self) -> usize {
        self.iterations
    }

    /// Displacement of the water particle whose rest position is `(rest_x, rest_y)`.
    ///
    /// `(rest_x + d.x, rest_y + d.y)` is where that particle currently is and
    /// `d.z` is its height.
    pub fn evaluate_displacement(&self, rest_x: f32, rest_y: f32, time: f32) -> Vec3 {
        let rest = Vec2::new(rest_x, rest_y);
        self.trains
            .iter()
            .map(|train| train.displacement(rest, time))
            .sum()
    }

    /// Displacement of the water currently located at world `(world_x, world_y)`.
    ///
    /// Inverts the horizontal displacement with a fixed number of Picard
    /// rounds, then evaluates the full displacement at the recovered rest
    /// position. There is no convergence check; under steep waves the result
    /// is an approximation.
    pub fn sample_world_surface(&self, world_x: f32, world_y: f32, time: f32) -> Vec3 {
        self.sample_world_surface_with(world_x, world_y, time, self.iterations)
    }

    /// `sample_world_surface` with an explicit round count
    pub fn sample_world_surface_with(
        &self,
        world_x: f32,
        world_y: f32,
        time: f32,
        iterations: usize,
    ) -> Vec3 {
        let world = Vec2::new(world_x, world_y);
        let rest = self.rest_position_with(world, time, iterations);
        self.evaluate_displacement(rest.x, rest.y, time)
    }

    /// Approximate rest position of the particle found at `world`
    pub fn rest_position(&self, world: Vec2, time: f32) -> Vec2 {
        self.rest_position_with(world, time, self.iterations)
    }

    fn rest_position_with(&self, world: Vec2, time: f32, iterations: usize) -> Vec2 {
        let mut rest = world;
        for _ in 0..iterations {
            let d = self.evaluate_displacement(rest.x, rest.y, time);
            rest = world - d.truncate();
        }
        rest
    }

    /// Evaluate the displacement for many rest positions at once
    pub fn evaluate_batch(&self, rest_positions: &[Vec2], time: f32) -> Vec<Vec3> {
        rest_positions
            .par_iter()
            .map(|rest| self.evaluate_displacement(rest.x, rest.y, time))
            .collect()
    }

    /// Upper bound on how much the horizontal displacement can stretch distances.
    ///
    /// Below 1.0 the world-to-rest inversion is a contraction and each
    /// iteration shrinks the error by at least this factor.
    pub fn contraction_bound(&self) -> f32 {
        self.trains
            .iter()
            .map(WaveTrain::horizontal_steepness)
            .sum()
    }

    /// Highest possible crest above rest level
    pub fn max_height(&self) -> f32 {
        self.trains.iter().map(WaveTrain::amplitude).sum()
    }
}
