//! Rigid body riding the wave surface.
//!
//! The body carries five reference points on its hull. Each frame they are
//! moved into world space with the transform of the previous frame, the
//! surface is sampled under them, and pitch/roll are eased toward the tilt of
//! the sampled points. Heave follows the center sample directly.

use glam::{Mat4, Vec2, Vec3};
use log::debug;

use crate::error::{OceanError, Result};
use crate::field::Surface;

pub const DEFAULT_PITCH_DAMPING: f32 = 7.0;
pub const DEFAULT_ROLL_DAMPING: f32 = 5.0;

/// Axis-aligned bounding box of the hull geometry
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct HullBounds {
    pub min: Vec3,
    pub max: Vec3,
}

impl HullBounds {
    /// Bounds spanning two corners, in any order
    pub fn new(a: Vec3, b: Vec3) -> Self {
        Self {
            min: a.min(b),
            max: a.max(b),
        }
    }

    /// The -0.5..0.5 cube
    pub fn unit_cube() -> Self {
        Self::new(Vec3::splat(-0.5), Vec3::splat(0.5))
    }

    /// Tight bounds of a point set, `None` when empty
    pub fn from_points(points: &[Vec3]) -> Option<Self> {
        let first = *points.first()?;
        let (min, max) = points
            .iter()
            .fold((first, first), |(min, max), &p| (min.min(p), max.max(p)));
        Some(Self { min, max })
    }

    /// Bounds after a non-uniform scale about the origin
    pub fn scaled(&self, scale: Vec3) -> Self {
        Self::new(self.min * scale, self.max * scale)
    }

    pub fn center(&self) -> Vec3 {
        (self.min + self.max) * 0.5
    }

    pub fn half_extents(&self) -> Vec3 {
        (self.max - self.min) * 0.5
    }
}

/// Named reference points on the hull
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Marker {
    Center,
    Bow,
    Stern,
    Port,
    Starboard,
}

/// Marker positions in the body's local frame.
///
/// The hull is recentered on its pivot, so the center marker is always the
/// origin. Forward is local +Y, starboard is local +X.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Markers {
    pub center: Vec3,
    pub bow: Vec3,
    pub stern: Vec3,
    pub port: Vec3,
    pub starboard: Vec3,
    /// Translation that places the hull geometry centered under the pivot
    pub hull_offset: Vec3,
}

impl Markers {
    pub fn from_bounds(bounds: &HullBounds) -> Self {
        let center = bounds.center();
        Self {
            center: Vec3::ZERO,
            bow: Vec3::new(0.0, bounds.max.y - center.y, 0.0),
            stern: Vec3::new(0.0, bounds.min.y - center.y, 0.0),
            port: Vec3::new(bounds.min.x - center.x, 0.0, 0.0),
            starboard: Vec3::new(bounds.max.x - center.x, 0.0, 0.0),
            hull_offset: -center,
        }
    }

    pub fn get(&self, marker: Marker) -> Vec3 {
        match marker {
            Marker::Center => self.center,
            Marker::Bow => self.bow,
            Marker::Stern => self.stern,
            Marker::Port => self.port,
            Marker::Starboard => self.starboard,
        }
    }
}

/// Maps points from a body's local frame into world space
pub trait LocalToWorld {
    fn local_to_world(&self, point: Vec3) -> Vec3;
}

/// Position plus heading/pitch/roll in degrees.
///
/// Roll is applied first (about local Y), then pitch (about X), then heading
/// (about Z). Positive pitch lifts the bow, positive roll lowers starboard.
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct BodyTransform {
    pub position: Vec3,
    pub heading: f32,
    pub pitch: f32,
    pub roll: f32,
}

impl BodyTransform {
    pub fn matrix(&self) -> Mat4 {
        Mat4::from_translation(self.position)
            * Mat4::from_rotation_z(self.heading.to_radians())
            * Mat4::from_rotation_x(self.pitch.to_radians())
            * Mat4::from_rotation_y(self.roll.to_radians())
    }
}

impl LocalToWorld for BodyTransform {
    fn local_to_world(&self, point: Vec3) -> Vec3 {
        self.matrix().transform_point3(point)
    }
}

/// How the damping constants turn into a per-update blend factor
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub enum SmoothingMode {
    /// Move `1/damping` of the remaining gap every update, whatever the frame
    /// interval. Response speed depends on the caller's frame rate.
    #[default]
    PerFrame,
    /// Exponential decay in time. Matches `PerFrame` exactly when updates
    /// arrive every `reference_dt` seconds.
    TimeScaled { reference_dt: f32 },
}

impl SmoothingMode {
    /// Time-scaled smoothing calibrated to updates every `reference_dt` seconds
    pub fn time_scaled(reference_dt: f32) -> Result<Self> {
        let mode = SmoothingMode::TimeScaled { reference_dt };
        mode.validate()?;
        Ok(mode)
    }

    /// A reference step must be a positive, finite duration
    pub fn validate(&self) -> Result<()> {
        match *self {
            SmoothingMode::PerFrame => Ok(()),
            SmoothingMode::TimeScaled { reference_dt } => {
                if reference_dt.is_finite() && reference_dt > 0.0 {
                    Ok(())
                } else {
                    Err(OceanError::InvalidTimeStep(reference_dt))
                }
            }
        }
    }

    /// Fraction of the gap to close in one update
    pub fn blend_factor(&self, damping: f32, dt: Option<f32>) -> f32 {
        match *self {
            SmoothingMode::PerFrame => 1.0 / damping,
            SmoothingMode::TimeScaled { reference_dt } => {
                let steps = match dt {
                    Some(dt) if dt > 0.0 => dt / reference_dt,
                    _ => 1.0,
                };
                1.0 - (1.0 - 1.0 / damping).powf(steps)
            }
        }
    }
}

/// First-order lag step toward `target`
pub fn smooth_toward(current: f32, target: f32, factor: f32) -> f32 {
    current + (target - current) * factor
}

/// Tilt in degrees of the line between two sampled points, positive when
/// `high` sits above `low`
pub fn tilt_degrees(high_world: Vec3, high_z: f32, low_world: Vec3, low_z: f32) -> f32 {
    let run = Vec2::new(high_world.x - low_world.x, high_world.y - low_world.y).length();
    (high_z - low_z).atan2(run).to_degrees()
}

/// Result of one orientation update
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct OrientationUpdate {
    /// Smoothed pitch in degrees
    pub pitch: f32,
    /// Smoothed roll in degrees
    pub roll: f32,
    /// Surface height under the center marker
    pub height: f32,
    pub pitch_target: f32,
    pub roll_target: f32,
}

/// A hull floating on a wave surface
#[derive(Debug, Clone)]
pub struct FloatingBody {
    markers: Markers,
    position: Vec3,
    heading: f32,
    pitch: f32,
    roll: f32,
    pitch_damping: f32,
    roll_damping: f32,
    smoothing: SmoothingMode,
    last_time: Option<f32>,
}

impl FloatingBody {
    pub fn new(bounds: &HullBounds, pitch_damping: f32, roll_damping: f32) -> Result<Self> {
        validate_damping(pitch_damping)?;
        validate_damping(roll_damping)?;

        Ok(Self {
            markers: Markers::from_bounds(bounds),
            position: Vec3::ZERO,
            heading: 0.0,
            pitch: 0.0,
            roll: 0.0,
            pitch_damping,
            roll_damping,
            smoothing: SmoothingMode::default(),
            last_time: None,
        })
    }

    pub fn with_smoothing(mut self, smoothing: SmoothingMode) -> Result<Self> {
        smoothing.validate()?;
        self.smoothing = smoothing;
        Ok(self)
    }

    pub fn markers(&self) -> &Markers {
        &self.markers
    }

    pub fn position(&self) -> Vec3 {
        self.position
    }

    pub fn set_position(&mut self, position: Vec3) {
        self.position = position;
    }

    pub fn heading(&self) -> f32 {
        self.heading
    }

    /// Heading in degrees, wrapped into [0, 360)
    pub fn set_heading(&mut self, heading: f32) {
        self.heading = heading.rem_euclid(360.0);
    }

    pub fn pitch(&self) -> f32 {
        self.pitch
    }

    pub fn roll(&self) -> f32 {
        self.roll
    }

    pub fn smoothing(&self) -> SmoothingMode {
        self.smoothing
    }

    /// Current placement of the body in the world
    pub fn transform(&self) -> BodyTransform {
        BodyTransform {
            position: self.position,
            heading: self.heading,
            pitch: self.pitch,
            roll: self.roll,
        }
    }

    /// Ease pitch and roll toward the tilt of the surface under the hull.
    ///
    /// Markers are placed with `transform`, the placement in effect before
    /// this update. Heading is left untouched. The returned height is the
    /// undamped surface height under the center marker.
    pub fn update_orientation<S, T>(
        &mut self,
        surface: &S,
        time: f32,
        transform: &T,
    ) -> OrientationUpdate
    where
        S: Surface + ?Sized,
        T: LocalToWorld + ?Sized,
    {
        let place = |marker: Marker| {
            let world = transform.local_to_world(self.markers.get(marker));
            (world, surface.sample_world_surface(world.x, world.y, time).z)
        };

        let (_, center_z) = place(Marker::Center);
        let (bow, bow_z) = place(Marker::Bow);
        let (stern, stern_z) = place(Marker::Stern);
        let (port, port_z) = place(Marker::Port);
        let (starboard, starboard_z) = place(Marker::Starboard);

        let pitch_target = tilt_degrees(bow, bow_z, stern, stern_z);
        let roll_target = -tilt_degrees(starboard, starboard_z, port, port_z);

        let dt = self.last_time.map(|last| time - last);
        if matches!(dt, Some(dt) if dt < 0.0) {
            debug!("Time went backwards ({:?}), smoothing with a nominal step", dt);
        }
        self.last_time = Some(time);

        let pitch_factor = self.smoothing.blend_factor(self.pitch_damping, dt);
        let roll_factor = self.smoothing.blend_factor(self.roll_damping, dt);
        self.pitch = smooth_toward(self.pitch, pitch_target, pitch_factor);
        self.roll = smooth_toward(self.roll, roll_target, roll_factor);

        debug!(
            "t={:.3} heave={:.3} pitch {:.2}->{:.2} roll {:.2}->{:.2}",
            time, center_z, pitch_target, self.pitch, roll_target, self.roll
        );

        OrientationUpdate {
            pitch: self.pitch,
            roll: self.roll,
            height: center_z,
            pitch_target,
            roll_target,
        }
    }

    /// Update against the body's own transform and apply the heave
    pub fn step<S: Surface + ?Sized>(&mut self, surface: &S, time: f32) -> OrientationUpdate {
        let transform = self.transform();
        let update = self.update_orientation(surface, time, &transform);
        self.position.z = update.height;
        update
    }
}

fn validate_damping(damping: f32) -> Result<()> {
    if damping.is_finite() && damping >= 1.0 {
        Ok(())
    } else {
        Err(OceanError::InvalidDamping(damping))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::field::WaveField;
    use crate::wave::Swell;

    /// Plane tilted along world Y: z = (y + 5) / 10
    struct Ramp;

    impl Surface for Ramp {
        fn sample_world_surface(&self, _x: f32, y: f32, _time: f32) -> Vec3 {
            Vec3::new(0.0, 0.0, (y + 5.0) / 10.0)
        }
    }

    /// Plane rising toward world +X
    struct SideRamp;

    impl Surface for SideRamp {
        fn sample_world_surface(&self, x: f32, _y: f32, _time: f32) -> Vec3 {
            Vec3::new(0.0, 0.0, x * 0.5)
        }
    }

    /// Constant height everywhere
    struct Level(f32);

    impl Surface for Level {
        fn sample_world_surface(&self, _x: f32, _y: f32, _time: f32) -> Vec3 {
            Vec3::new(0.0, 0.0, self.0)
        }
    }

    fn hull() -> HullBounds {
        HullBounds::unit_cube().scaled(Vec3::new(3.0, 10.0, 5.0))
    }

    #[test]
    fn test_markers_from_scaled_cube() {
        let markers = Markers::from_bounds(&hull());

        assert_eq!(markers.center, Vec3::ZERO);
        assert_eq!(markers.bow, Vec3::new(0.0, 5.0, 0.0));
        assert_eq!(markers.stern, Vec3::new(0.0, -5.0, 0.0));
        assert_eq!(markers.port, Vec3::new(-1.5, 0.0, 0.0));
        assert_eq!(markers.starboard, Vec3::new(1.5, 0.0, 0.0));
        assert_eq!(markers.hull_offset, Vec3::ZERO);
    }

    #[test]
    fn test_markers_are_relative_to_bounds_center() {
        let bounds = HullBounds::new(Vec3::new(1.0, 2.0, 0.0), Vec3::new(5.0, 12.0, 3.0));
        let markers = Markers::from_bounds(&bounds);

        assert_eq!(markers.center, Vec3::ZERO);
        assert_eq!(markers.bow, Vec3::new(0.0, 5.0, 0.0));
        assert_eq!(markers.port, Vec3::new(-2.0, 0.0, 0.0));
        assert_eq!(markers.hull_offset, Vec3::new(-3.0, -7.0, -1.5));
        assert_eq!(markers.get(Marker::Starboard), markers.starboard);
        assert_eq!(markers.get(Marker::Stern), markers.stern);
    }

    #[test]
    fn test_bounds_from_points() {
        assert!(HullBounds::from_points(&[]).is_none());
        let bounds = HullBounds::from_points(&[
            Vec3::new(1.0, -2.0, 0.5),
            Vec3::new(-1.0, 4.0, 0.0),
        ])
        .unwrap();
        assert_eq!(bounds.min, Vec3::new(-1.0, -2.0, 0.0));
        assert_eq!(bounds.max, Vec3::new(1.0, 4.0, 0.5));
    }

    #[test]
    fn test_transform_conventions() {
        let level = BodyTransform::default();
        assert!((level.local_to_world(Vec3::Y) - Vec3::Y).length() < 1e-6);

        let nose_up = BodyTransform {
            pitch: 90.0,
            ..Default::default()
        };
        assert!((nose_up.local_to_world(Vec3::Y) - Vec3::Z).length() < 1e-6);

        let starboard_down = BodyTransform {
            roll: 90.0,
            ..Default::default()
        };
        assert!((starboard_down.local_to_world(Vec3::X) + Vec3::Z).length() < 1e-6);

        let turned = BodyTransform {
            position: Vec3::new(10.0, 0.0, 1.0),
            heading: 90.0,
            ..Default::default()
        };
        let bow = turned.local_to_world(Vec3::new(0.0, 5.0, 0.0));
        assert!((bow - Vec3::new(5.0, 0.0, 1.0)).length() < 1e-5);
    }

    #[test]
    fn test_pitch_target_sign() {
        let mut body = FloatingBody::new(&hull(), 1.0, 1.0).unwrap();
        let update = body.update_orientation(&Ramp, 0.0, &BodyTransform::default());

        let expected = 1.0f32.atan2(10.0).to_degrees();
        assert!((update.pitch_target - expected).abs() < 1e-4);
        assert!(update.pitch_target > 0.0);
        // Damping of one jumps straight to the target
        assert!((update.pitch - expected).abs() < 1e-4);
        assert!(update.roll_target.abs() < 1e-6);
        assert!((update.height - 0.5).abs() < 1e-6);
    }

    #[test]
    fn test_roll_target_sign() {
        let mut body = FloatingBody::new(&hull(), 1.0, 1.0).unwrap();
        let update = body.update_orientation(&SideRamp, 0.0, &BodyTransform::default());

        // Starboard sits higher, so roll goes negative and lifts +X
        let expected = -(1.5f32).atan2(3.0).to_degrees();
        assert!((update.roll_target - expected).abs() < 1e-4);

        let tilted = BodyTransform {
            roll: update.roll,
            ..Default::default()
        };
        assert!(tilted.local_to_world(body.markers().starboard).z > 0.0);
    }

    #[test]
    fn test_heading_is_external_input() {
        let mut body = FloatingBody::new(&hull(), 7.0, 5.0).unwrap();
        body.set_heading(400.0);
        assert!((body.heading() - 40.0).abs() < 1e-4);
        body.set_heading(-90.0);
        assert!((body.heading() - 270.0).abs() < 1e-4);

        let field = WaveField::new(Swell::default().trains(1.0).unwrap());
        for frame in 0..30 {
            body.step(&field, frame as f32 / 60.0);
        }
        assert!((body.heading() - 270.0).abs() < 1e-4);
    }

    #[test]
    fn test_heading_rotates_sampling_axis() {
        // Turned 90°, the bow points along world -X so the Y ramp no longer pitches it
        let mut body = FloatingBody::new(&hull(), 1.0, 1.0).unwrap();
        body.set_heading(90.0);
        let update = body.step(&Ramp, 0.0);

        assert!(update.pitch_target.abs() < 1e-4);
        let expected = -(3.0f32 / 10.0).atan2(3.0).to_degrees();
        assert!((update.roll_target - expected).abs() < 1e-3);
    }

    #[test]
    fn test_damping_converges_without_overshoot() {
        for damping in [1.0, 1.5, 5.0, 7.0, 40.0] {
            let mut body = FloatingBody::new(&hull(), damping, damping).unwrap();
            let target = 1.0f32.atan2(10.0).to_degrees();
            let mut previous_gap = target;

            for _ in 0..200 {
                let update = body.update_orientation(&Ramp, 0.0, &BodyTransform::default());
                let gap = target - update.pitch;
                assert!(gap >= -1e-5, "overshoot with damping {}", damping);
                assert!(gap <= previous_gap + 1e-6);
                previous_gap = gap;
            }
            if damping <= 7.0 {
                assert!(previous_gap < 1e-3);
            }
        }
    }

    #[test]
    fn test_heave_is_not_damped() {
        let mut body = FloatingBody::new(&hull(), 7.0, 5.0).unwrap();
        let update = body.step(&Level(3.25), 0.0);

        assert_eq!(update.height, 3.25);
        assert_eq!(body.position().z, 3.25);
        assert_eq!(body.pitch(), 0.0);
        assert_eq!(body.roll(), 0.0);
    }

    #[test]
    fn test_rejects_small_damping() {
        assert!(matches!(
            FloatingBody::new(&hull(), 0.5, 5.0),
            Err(OceanError::InvalidDamping(_))
        ));
        assert!(FloatingBody::new(&hull(), 7.0, f32::NAN).is_err());
    }

    #[test]
    fn test_time_scaled_matches_per_frame_at_reference_rate() {
        let dt = 1.0 / 60.0;
        let field = WaveField::new(Swell::default().trains(1.5).unwrap());
        let mut per_frame = FloatingBody::new(&hull(), 7.0, 5.0).unwrap();
        let mut scaled = FloatingBody::new(&hull(), 7.0, 5.0)
            .unwrap()
            .with_smoothing(SmoothingMode::time_scaled(dt).unwrap())
            .unwrap();

        for frame in 0..120 {
            let t = frame as f32 * dt;
            let a = per_frame.step(&field, t);
            let b = scaled.step(&field, t);
            assert!((a.pitch - b.pitch).abs() < 1e-3);
            assert!((a.roll - b.roll).abs() < 1e-3);
        }
    }

    #[test]
    fn test_time_scaled_blend_factor() {
        let mode = SmoothingMode::TimeScaled { reference_dt: 0.1 };
        assert!((mode.blend_factor(4.0, Some(0.1)) - 0.25).abs() < 1e-6);
        // Two reference steps at once close the same gap as two single steps
        assert!((mode.blend_factor(4.0, Some(0.2)) - (1.0 - 0.75 * 0.75)).abs() < 1e-6);
        assert!((mode.blend_factor(4.0, None) - 0.25).abs() < 1e-6);
        assert!((mode.blend_factor(4.0, Some(-1.0)) - 0.25).abs() < 1e-6);
        assert_eq!(SmoothingMode::PerFrame.blend_factor(4.0, Some(10.0)), 0.25);
    }

    #[test]
    fn test_rejects_invalid_reference_step() {
        for reference_dt in [0.0, -0.1, f32::NAN, f32::INFINITY] {
            assert!(matches!(
                SmoothingMode::time_scaled(reference_dt),
                Err(OceanError::InvalidTimeStep(_))
            ));
            let body = FloatingBody::new(&hull(), 7.0, 5.0).unwrap();
            assert!(body
                .with_smoothing(SmoothingMode::TimeScaled { reference_dt })
                .is_err());
        }
        assert!(SmoothingMode::PerFrame.validate().is_ok());
    }

    #[test]
    fn test_time_scaled_storm_stays_bounded() {
        let field = WaveField::new(Swell::default().trains(1.0).unwrap());
        let mut body = FloatingBody::new(&hull(), 7.0, 5.0)
            .unwrap()
            .with_smoothing(SmoothingMode::time_scaled(0.1).unwrap())
            .unwrap();

        for frame in 1..=600 {
            let update = body.step(&field, frame as f32 / 60.0);
            assert!(update.pitch.is_finite() && update.pitch.abs() <= 90.0);
            assert!(update.roll.is_finite() && update.roll.abs() <= 90.0);
        }
    }

    #[test]
    fn test_markers_use_previous_orientation() {
        let field = WaveField::new(Swell::default().trains(1.5).unwrap());
        let mut body = FloatingBody::new(&hull(), 1.0, 1.0).unwrap();
        body.set_heading(20.0);

        // Pitch the hull first so the next placement is tilted
        body.step(&Ramp, 0.0);
        let saved = body.transform();
        assert!(saved.pitch > 5.0);

        let bow = saved.local_to_world(body.markers().bow);
        let stern = saved.local_to_world(body.markers().stern);
        let run = Vec2::new(bow.x - stern.x, bow.y - stern.y).length();
        let expected_run = 10.0 * saved.pitch.to_radians().cos();
        assert!((run - expected_run).abs() < 1e-4);
        assert!(run < 10.0 - 1e-2);

        let mut replay = body.clone();
        let stepped = body.step(&field, 0.5);
        let explicit = replay.update_orientation(&field, 0.5, &saved);
        assert!((stepped.pitch - explicit.pitch).abs() < 1e-5);
        assert!((stepped.roll - explicit.roll).abs() < 1e-5);
        assert!((stepped.height - explicit.height).abs() < 1e-5);
        assert_eq!(body.heading(), 20.0);
    }
}
