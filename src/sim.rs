use glam::Vec3;
use log::{debug, info};

use crate::body::{BodyTransform, FloatingBody};
use crate::config::SceneConfig;
use crate::error::Result;
use crate::ocean::Ocean;

/// Placement of the boat after a frame
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Pose {
    pub frame: u64,
    pub time: f32,
    pub position: Vec3,
    pub heading: f32,
    pub pitch: f32,
    pub roll: f32,
}

impl Pose {
    pub fn transform(&self) -> BodyTransform {
        BodyTransform {
            position: self.position,
            heading: self.heading,
            pitch: self.pitch,
            roll: self.roll,
        }
    }
}

/// One boat on one ocean, advanced a frame at a time by an external clock
#[derive(Debug, Clone)]
pub struct Simulation {
    ocean: Ocean,
    body: FloatingBody,
    time: f32,
    frame: u64,
}

impl Simulation {
    pub fn new(config: &SceneConfig) -> Result<Self> {
        config.validate()?;

        let ocean = Ocean::with_iterations(config.swell, config.storm_factor, config.iterations)?;
        let mut body = FloatingBody::new(
            &config.hull_bounds(),
            config.pitch_damping,
            config.roll_damping,
        )?;
        body.set_heading(config.heading);

        Ok(Self {
            ocean,
            body,
            time: 0.0,
            frame: 0,
        })
    }

    /// Swap in a body built elsewhere, e.g. with a different smoothing mode
    pub fn with_body(mut self, body: FloatingBody) -> Self {
        self.body = body;
        self
    }

    pub fn ocean(&self) -> &Ocean {
        &self.ocean
    }

    pub fn body(&self) -> &FloatingBody {
        &self.body
    }

    pub fn time(&self) -> f32 {
        self.time
    }

    /// Frames stepped so far
    pub fn frame(&self) -> u64 {
        self.frame
    }

    /// Storm control, applied before the next frame
    pub fn set_storm_factor(&mut self, storm_factor: f32) -> Result<()> {
        self.ocean.set_storm_factor(storm_factor)
    }

    /// Heading control in degrees, applied verbatim on the next frame
    pub fn set_heading(&mut self, heading: f32) {
        self.body.set_heading(heading);
        info!("Boat heading set to {:.0}°", self.body.heading());
    }

    /// Advance to `time` and return the new pose
    pub fn step(&mut self, time: f32) -> Pose {
        if time < self.time {
            debug!("Frame time moved backwards: {} -> {}", self.time, time);
        }
        let update = self.body.step(self.ocean.field(), time);
        self.time = time;
        self.frame += 1;

        Pose {
            frame: self.frame,
            time,
            position: self.body.position(),
            heading: self.body.heading(),
            pitch: update.pitch,
            roll: update.roll,
        }
    }

    pub fn pose(&self) -> Pose {
        Pose {
            frame: self.frame,
            time: self.time,
            position: self.body.position(),
            heading: self.body.heading(),
            pitch: self.body.pitch(),
            roll: self.body.roll(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_calm_sea_barely_moves_the_boat() {
        let mut sim = Simulation::new(&SceneConfig::default()).unwrap();
        for frame in 1..=120 {
            let pose = sim.step(frame as f32 / 60.0);
            assert!(pose.position.z.abs() <= sim.ocean().field().max_height() + 1e-4);
            assert!(pose.pitch.abs() < 1.0);
            assert!(pose.roll.abs() < 1.0);
        }
        assert_eq!(sim.frame(), 120);
        assert!((sim.time() - 2.0).abs() < 1e-6);
    }

    #[test]
    fn test_heave_tracks_center_sample() {
        let config = SceneConfig {
            storm_factor: 1.0,
            ..Default::default()
        };
        let mut sim = Simulation::new(&config).unwrap();
        let pose = sim.step(3.0);

        let expected = sim.ocean().field().sample_world_surface(0.0, 0.0, 3.0).z;
        assert!((pose.position.z - expected).abs() < 1e-5);
        assert_eq!(pose.position.x, 0.0);
        assert_eq!(pose.position.y, 0.0);
    }

    #[test]
    fn test_controls_apply_between_frames() {
        let mut sim = Simulation::new(&SceneConfig::default()).unwrap();
        sim.step(0.1);

        sim.set_heading(135.0);
        sim.set_storm_factor(2.0).unwrap();
        let pose = sim.step(0.2);

        assert_eq!(pose.heading, 135.0);
        assert_eq!(sim.ocean().storm_factor(), 2.0);
        assert!(sim.set_storm_factor(-0.5).is_err());
        assert_eq!(sim.ocean().storm_factor(), 2.0);
    }

    #[test]
    fn test_storm_motion_stays_finite() {
        let config = SceneConfig {
            storm_factor: 2.0,
            ..Default::default()
        };
        let mut sim = Simulation::new(&config).unwrap();
        sim.set_heading(33.0);

        for frame in 1..=600 {
            let pose = sim.step(frame as f32 / 60.0);
            assert!(pose.position.is_finite());
            assert!(pose.pitch.is_finite() && pose.pitch.abs() <= 90.0);
            assert!(pose.roll.is_finite() && pose.roll.abs() <= 90.0);
        }
        assert_eq!(sim.pose().frame, 600);
    }

    #[test]
    fn test_rejects_invalid_config() {
        let config = SceneConfig {
            pitch_damping: 0.0,
            ..Default::default()
        };
        assert!(Simulation::new(&config).is_err());
    }
}
