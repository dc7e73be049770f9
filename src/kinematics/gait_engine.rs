//! Gait path synthesis and phase scheduling.
//!
//! A leg's gait path is one closed walking cycle expressed as joint angles.
//! The foot first pushes along the stride direction on the ground, is lifted
//! by the recovery height and carried back past the anchor, then set down and
//! advanced back to the anchor. Walking is replaying the path cyclically, each
//! leg shifted by the phase offset of a [`GaitPattern`].
use alloc::vec::Vec;
use core::fmt::{self, Display};

use log::{debug, warn};

use super::conversion::{JointAngles, KinematicsError, LegKinematics};
use super::vector::Vec3;
use crate::robot::leg::{Leg, LEG_COUNT};

/// Stride parameters shared by a whole path.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct StrideParams {
    /// Samples per straight segment of the cycle, at least one.
    pub num_iter: usize,
    /// Distance travelled between two consecutive samples.
    pub iter_dist: f64,
    /// Direction of travel in the leg's horizontal plane, radians.
    pub angle: f64,
}

impl StrideParams {
    pub fn new(num_iter: usize, iter_dist: f64, angle: f64) -> Self {
        Self {
            num_iter,
            iter_dist,
            angle,
        }
    }

    /// Displacement between two samples.
    pub fn step(&self) -> Vec3 {
        Vec3::new(libm::cos(self.angle), libm::sin(self.angle), 0.0) * self.iter_dist
    }

    /// Same stride heading in another direction.
    pub fn with_angle(self, angle: f64) -> Self {
        Self { angle, ..self }
    }
}

/// Which part of the cycle a path sample belongs to.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum GaitPhase {
    /// On the ground, from the anchor to the end of the stride.
    Stance,
    /// Lifted, from the end of the stride back to the anchor.
    SwingBack,
    /// Lifted, from the anchor to the far end of the stride.
    SwingOut,
    /// On the ground, from the far end back towards the anchor.
    Approach,
}

impl GaitPhase {
    pub fn is_lifted(self) -> bool {
        matches!(self, GaitPhase::SwingBack | GaitPhase::SwingOut)
    }
}

impl Display for GaitPhase {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            GaitPhase::Stance => f.write_str("stance"),
            GaitPhase::SwingBack => f.write_str("swing back"),
            GaitPhase::SwingOut => f.write_str("swing out"),
            GaitPhase::Approach => f.write_str("approach"),
        }
    }
}

/// Closed sequence of joint angles, `4 * num_iter + 3` samples long.
#[derive(Debug, Clone, PartialEq)]
pub struct GaitPath {
    num_iter: usize,
    samples: Vec<JointAngles>,
}

impl GaitPath {
    /// Number of samples a path with `num_iter` samples per segment holds.
    pub const fn len_for(num_iter: usize) -> usize {
        4 * num_iter + 3
    }

    pub fn len(&self) -> usize {
        self.samples.len()
    }

    pub fn is_empty(&self) -> bool {
        self.samples.is_empty()
    }

    pub fn num_iter(&self) -> usize {
        self.num_iter
    }

    /// Sample at `index`, wrapping around the end of the cycle.
    pub fn at(&self, index: usize) -> JointAngles {
        self.samples[index % self.samples.len()]
    }

    pub fn phase_at(&self, index: usize) -> GaitPhase {
        let segment = self.num_iter + 1;
        match (index % self.samples.len()) / segment {
            0 => GaitPhase::Stance,
            1 => GaitPhase::SwingBack,
            2 => GaitPhase::SwingOut,
            _ => GaitPhase::Approach,
        }
    }

    pub fn as_slice(&self) -> &[JointAngles] {
        &self.samples
    }

    pub fn iter(&self) -> impl Iterator<Item = &JointAngles> {
        self.samples.iter()
    }
}

impl LegKinematics {
    /// Samples one walking cycle around this leg's anchor point.
    ///
    /// Every sample is solved immediately, the first unreachable one aborts
    /// the whole path.
    pub fn create_path(&self, stride: &StrideParams) -> Result<GaitPath, KinematicsError> {
        let n = stride.num_iter;
        if n == 0 {
            return Err(KinematicsError::InvalidStride { num_iter: n });
        }

        let step = stride.step();
        let anchor = self.anchor().anchor_point();
        let lift = self.anchor().lift();
        let far = step * n as f64;

        let mut samples = Vec::with_capacity(GaitPath::len_for(n));
        self.sweep(&mut samples, anchor, step, n + 1)?;
        self.sweep(&mut samples, anchor + far + lift, -step, n + 1)?;
        self.sweep(&mut samples, anchor + lift, -step, n + 1)?;
        self.sweep(&mut samples, anchor - far, step, n)?;

        debug!(
            "[GAIT] path of {} samples, {} x {} towards {:.3} rad",
            samples.len(),
            n,
            stride.iter_dist,
            stride.angle
        );
        Ok(GaitPath {
            num_iter: n,
            samples,
        })
    }

    /// Solves `count` points `start + i * step` into `out`.
    fn sweep(
        &self,
        out: &mut Vec<JointAngles>,
        start: Vec3,
        step: Vec3,
        count: usize,
    ) -> Result<(), KinematicsError> {
        for i in 0..count {
            let point = start + step * i as f64;
            let angles = self.inverse(point).inspect_err(|e| {
                warn!("[GAIT] sample {} at {:?}: {}", out.len(), point, e);
            })?;
            out.push(angles);
        }
        Ok(())
    }
}

/// Per-leg phase offsets expressed as fractions of the cycle.
///
/// Leg `i` starts `phases[i] / denominator` of the way into its path. The
/// offset is computed as `(len / denominator) * phases[i]` with integer
/// division, so every leg moves by whole samples.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct GaitPattern {
    denominator: usize,
    phases: [usize; LEG_COUNT],
}

impl GaitPattern {
    /// Alternating triads, the default walking gait.
    pub const TRIPOD: GaitPattern = GaitPattern {
        denominator: 6,
        phases: [1, 5, 2, 4, 0, 3],
    };

    /// One leg after the other around the body.
    pub const WAVE: GaitPattern = GaitPattern {
        denominator: 6,
        phases: [0, 1, 2, 3, 4, 5],
    };

    /// `None` if the denominator is zero or a phase is not below it.
    pub fn new(denominator: usize, phases: [usize; LEG_COUNT]) -> Option<Self> {
        if denominator == 0 || phases.iter().any(|p| *p >= denominator) {
            return None;
        }
        Some(Self {
            denominator,
            phases,
        })
    }

    pub fn phase(&self, leg: Leg) -> (usize, usize) {
        (self.phases[leg.index()], self.denominator)
    }

    /// Sample offset of `leg` into a path of `path_len` samples.
    pub fn offset(&self, leg: Leg, path_len: usize) -> usize {
        path_len / self.denominator * self.phases[leg.index()]
    }
}

impl Default for GaitPattern {
    fn default() -> Self {
        Self::TRIPOD
    }
}

/// Six gait paths replayed with a phase pattern.
#[derive(Debug, Clone, PartialEq)]
pub struct GaitSchedule {
    paths: [GaitPath; LEG_COUNT],
    pattern: GaitPattern,
}

impl GaitSchedule {
    pub fn new(paths: [GaitPath; LEG_COUNT], pattern: GaitPattern) -> Self {
        Self { paths, pattern }
    }

    pub fn path(&self, leg: Leg) -> &GaitPath {
        &self.paths[leg.index()]
    }

    pub fn pattern(&self) -> &GaitPattern {
        &self.pattern
    }

    /// Ticks in one full cycle of the front right leg's path.
    pub fn cycle_len(&self) -> usize {
        self.paths[0].len()
    }

    /// Index into `leg`'s path for the given tick.
    pub fn index_at(&self, leg: Leg, tick: usize) -> usize {
        let len = self.path(leg).len();
        (tick % len + self.pattern.offset(leg, len)) % len
    }

    pub fn angles_at(&self, leg: Leg, tick: usize) -> JointAngles {
        self.path(leg).at(self.index_at(leg, tick))
    }

    pub fn phase_at(&self, leg: Leg, tick: usize) -> GaitPhase {
        self.path(leg).phase_at(self.index_at(leg, tick))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::kinematics::conversion::LegGeometry;
    use core::f64::consts::PI;

    fn leg() -> LegKinematics {
        let mut leg = LegKinematics::new(LegGeometry::new(30.0, 50.0, 100.0).unwrap());
        leg.set_anchor_length(120.0)
            .set_anchor_height(-50.0)
            .set_recovery_height(-20.0);
        leg
    }

    fn feet(leg: &LegKinematics, path: &GaitPath) -> Vec<Vec3> {
        path.iter().map(|a| leg.forward(*a).foot).collect()
    }

    #[test]
    fn path_length_is_four_segments_plus_three() {
        let leg = leg();
        for n in [1, 2, 5, 10, 17] {
            let path = leg.create_path(&StrideParams::new(n, 2.5, PI / 3.0)).unwrap();
            assert_eq!(path.len(), 4 * n + 3);
            assert_eq!(path.len(), GaitPath::len_for(n));
        }
    }

    #[test]
    fn zero_samples_is_rejected() {
        assert_eq!(
            leg().create_path(&StrideParams::new(0, 2.5, 0.0)),
            Err(KinematicsError::InvalidStride { num_iter: 0 })
        );
    }

    #[test]
    fn samples_follow_the_four_segments() {
        let leg = leg();
        let stride = StrideParams::new(4, 2.0, 0.0);
        let feet = feet(&leg, &leg.create_path(&stride).unwrap());
        let at = |x: f64, z: f64| Vec3::new(x, 0.0, z);
        let expected = [
            // stance
            at(120.0, -50.0),
            at(122.0, -50.0),
            at(124.0, -50.0),
            at(126.0, -50.0),
            at(128.0, -50.0),
            // lifted back to the anchor
            at(128.0, -70.0),
            at(126.0, -70.0),
            at(124.0, -70.0),
            at(122.0, -70.0),
            at(120.0, -70.0),
            // lifted past it
            at(120.0, -70.0),
            at(118.0, -70.0),
            at(116.0, -70.0),
            at(114.0, -70.0),
            at(112.0, -70.0),
            // down and back towards the anchor
            at(112.0, -50.0),
            at(114.0, -50.0),
            at(116.0, -50.0),
            at(118.0, -50.0),
        ];
        assert_eq!(feet.len(), expected.len());
        for (got, want) in feet.iter().zip(expected) {
            assert!((got - want).norm() < 1e-6, "{got:?} != {want:?}");
        }
    }

    #[test]
    fn cycle_closes_with_a_single_step() {
        let leg = leg();
        let stride = StrideParams::new(10, 2.5, 3.0 * PI / 4.0);
        let feet = feet(&leg, &leg.create_path(&stride).unwrap());
        let wrap = (feet[feet.len() - 1] - feet[0]).norm();
        assert!((wrap - stride.iter_dist).abs() < 1e-6);
    }

    #[test]
    fn unreachable_sample_aborts_the_path() {
        let mut leg = leg();
        leg.set_anchor_length(170.0);
        let result = leg.create_path(&StrideParams::new(10, 2.5, 0.0));
        assert!(matches!(
            result,
            Err(KinematicsError::UnreachableTarget { .. })
        ));
    }

    #[test]
    fn phases_split_the_path() {
        let path = leg().create_path(&StrideParams::new(10, 2.5, 0.0)).unwrap();
        assert_eq!(path.phase_at(0), GaitPhase::Stance);
        assert_eq!(path.phase_at(10), GaitPhase::Stance);
        assert_eq!(path.phase_at(11), GaitPhase::SwingBack);
        assert_eq!(path.phase_at(22), GaitPhase::SwingOut);
        assert_eq!(path.phase_at(33), GaitPhase::Approach);
        assert_eq!(path.phase_at(42), GaitPhase::Approach);
        assert_eq!(path.phase_at(43), GaitPhase::Stance);
        let lifted = (0..path.len()).filter(|i| path.phase_at(*i).is_lifted()).count();
        assert_eq!(lifted, 22);
    }

    #[test]
    fn at_wraps_around() {
        let path = leg().create_path(&StrideParams::new(3, 2.5, 0.0)).unwrap();
        assert_eq!(path.at(path.len()), path.at(0));
        assert_eq!(path.at(2 * path.len() + 4), path.at(4));
    }

    #[test]
    fn tripod_offsets_for_reference_path() {
        let offsets = Leg::ALL.map(|leg| GaitPattern::TRIPOD.offset(leg, 43));
        assert_eq!(offsets, [7, 35, 14, 28, 0, 21]);
    }

    #[test]
    fn pattern_validation() {
        assert!(GaitPattern::new(0, [0; LEG_COUNT]).is_none());
        assert!(GaitPattern::new(6, [0, 1, 2, 3, 4, 6]).is_none());
        assert_eq!(
            GaitPattern::new(6, [0, 1, 2, 3, 4, 5]),
            Some(GaitPattern::WAVE)
        );
        assert_eq!(GaitPattern::default().phase(Leg::Front), (5, 6));
    }

    #[test]
    fn schedule_shifts_each_leg() {
        let leg = leg();
        let path = leg.create_path(&StrideParams::new(10, 2.5, 0.0)).unwrap();
        let schedule = GaitSchedule::new(
            core::array::from_fn(|_| path.clone()),
            GaitPattern::TRIPOD,
        );
        assert_eq!(schedule.cycle_len(), 43);
        assert_eq!(schedule.index_at(Leg::Back, 5), 5);
        assert_eq!(schedule.index_at(Leg::Front, 10), 2);
        assert_eq!(schedule.angles_at(Leg::FrontRight, 0), path.at(7));
        assert_eq!(schedule.angles_at(Leg::FrontRight, 43 + 1), path.at(8));
        assert_eq!(schedule.phase_at(Leg::BackLeft, 0), GaitPhase::SwingOut);
    }
}
