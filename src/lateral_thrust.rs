//! Lateral knee thrust measurement.
//!
//! Lateral thrust is the sideways displacement of the knee away from the
//! hip–ankle axis while the limb bears weight. Per frame we take the
//! perpendicular distance from the knee to the line through hip and ankle,
//! keep it only on stance frames, and summarize each stance phase by the
//! range of that distance.
//!
//! Distances are converted from normalized image units to centimeters with a
//! fixed scale (see [`NORMALIZED_TO_CM`]). The result is a relative screening
//! measure, not a calibrated one.

use tracing::debug;

use crate::constants::thrust::NORMALIZED_TO_CM;
use crate::types::{Frame, Landmark, LateralThrustData, Limb, Severity, StancePhase, ThrustMetrics};

// ============================================================================
// STANCE MASK
// ============================================================================

/// Read-only view answering "is frame `i` inside a stance of this limb?".
///
/// Stored as sorted, non-overlapping inclusive intervals; membership is a
/// binary search, so memory does not grow with trial length.
#[derive(Debug, Clone, Default)]
pub struct StanceMask {
    intervals: Vec<(usize, usize)>,
}

impl StanceMask {
    /// Build the mask from one limb's stance phases. Phases of the other
    /// limb are ignored.
    pub fn for_limb(limb: Limb, phases: &[StancePhase]) -> Self {
        let mut intervals: Vec<(usize, usize)> = phases
            .iter()
            .filter(|p| p.limb == limb)
            .map(|p| (p.start_frame, p.end_frame))
            .collect();
        intervals.sort_unstable();

        // Merge anything touching so the binary search sees disjoint runs.
        let mut merged: Vec<(usize, usize)> = Vec::with_capacity(intervals.len());
        for (start, end) in intervals {
            match merged.last_mut() {
                Some(last) if start <= last.1.saturating_add(1) => last.1 = last.1.max(end),
                _ => merged.push((start, end)),
            }
        }

        Self { intervals: merged }
    }

    pub fn contains(&self, frame: usize) -> bool {
        let idx = self.intervals.partition_point(|&(start, _)| start <= frame);
        idx > 0 && frame <= self.intervals[idx - 1].1
    }

    /// Total number of stance frames covered.
    pub fn frame_count(&self) -> usize {
        self.intervals.iter().map(|(s, e)| e - s + 1).sum()
    }

    pub fn is_empty(&self) -> bool {
        self.intervals.is_empty()
    }
}

// ============================================================================
// GEOMETRY
// ============================================================================

/// Perpendicular distance from `knee` to the line through `hip` and `ankle`,
/// in normalized units.
///
/// Uses `|AB × AP| / |AB|` with A = hip, B = ankle, P = knee. A zero-length
/// hip–ankle line yields 0.
pub fn knee_offset(hip: &Landmark, knee: &Landmark, ankle: &Landmark) -> f64 {
    let dx = ankle.x - hip.x;
    let dy = ankle.y - hip.y;
    let line_length = (dx * dx + dy * dy).sqrt();

    if line_length == 0.0 {
        return 0.0;
    }

    let cross = (ankle.x - hip.x) * (hip.y - knee.y) - (hip.x - knee.x) * (ankle.y - hip.y);
    cross.abs() / line_length
}

/// Knee offset in centimeters for one frame, or `None` when any of the
/// limb's hip, knee or ankle landmarks is missing.
pub fn frame_thrust_cm(frame: &Frame, limb: Limb) -> Option<f64> {
    let hip = frame.landmark(limb.hip())?;
    let knee = frame.landmark(limb.knee())?;
    let ankle = frame.landmark(limb.ankle())?;
    Some(knee_offset(hip, knee, ankle) * NORMALIZED_TO_CM)
}

// ============================================================================
// METRICS
// ============================================================================

fn round_to_tenth(value: f64) -> f64 {
    (value * 10.0).round() / 10.0
}

/// Thrust metrics for one limb.
///
/// `waveform` and `time_points` are aligned with `frames`. Frames outside
/// this limb's stance, or with missing landmarks, contribute 0 to the
/// waveform and are excluded from the amplitude.
pub fn limb_thrust(frames: &[Frame], limb: Limb, stance_phases: &[StancePhase]) -> ThrustMetrics {
    let mask = StanceMask::for_limb(limb, stance_phases);

    let mut waveform = Vec::with_capacity(frames.len());
    let mut time_points = Vec::with_capacity(frames.len());
    let mut missing_frames = 0usize;

    for (i, frame) in frames.iter().enumerate() {
        let value = match frame_thrust_cm(frame, limb) {
            Some(thrust) if mask.contains(i) => thrust,
            Some(_) => 0.0,
            None => {
                missing_frames += 1;
                0.0
            }
        };
        waveform.push(value);
        time_points.push(frame.timestamp_ms);
    }

    let mut amplitude = 0.0_f64;
    let mut max_displacement = 0.0_f64;
    let mut phases_used = 0usize;

    for phase in stance_phases.iter().filter(|p| p.limb == limb) {
        let end = phase.end_frame.min(waveform.len().saturating_sub(1));
        let Some(window) = waveform.get(phase.start_frame..=end) else {
            continue;
        };

        let mut values = window.iter().copied().filter(|&v| v != 0.0).peekable();
        if values.peek().is_none() {
            continue;
        }

        let (min, max) = values.fold((f64::INFINITY, f64::NEG_INFINITY), |(lo, hi), v| {
            (lo.min(v), hi.max(v))
        });

        amplitude = amplitude.max(max - min);
        max_displacement = max_displacement.max(min.abs().max(max.abs()));
        phases_used += 1;
    }

    let severity = Severity::from_amplitude(amplitude);
    let metrics = ThrustMetrics {
        amplitude: round_to_tenth(amplitude),
        max_displacement: round_to_tenth(max_displacement),
        waveform,
        time_points,
        severity,
    };

    debug!(
        limb = ?limb,
        amplitude = metrics.amplitude,
        max_displacement = metrics.max_displacement,
        severity = ?metrics.severity,
        stance_frames = mask.frame_count(),
        missing_frames,
        phases_used,
        "lateral thrust computed"
    );

    metrics
}

/// Relative left/right amplitude difference in whole percent.
///
/// `round(|L - R| / max(L, R) * 100)`, or 0 when both are 0.
pub fn asymmetry_percent(left_amplitude: f64, right_amplitude: f64) -> u32 {
    let max_amplitude = left_amplitude.max(right_amplitude);
    if max_amplitude <= 0.0 {
        return 0;
    }
    ((left_amplitude - right_amplitude).abs() / max_amplitude * 100.0).round() as u32
}

/// Thrust metrics for both knees plus their asymmetry.
pub fn lateral_thrust(frames: &[Frame], stance_phases: &[StancePhase]) -> LateralThrustData {
    let left_knee = limb_thrust(frames, Limb::Left, stance_phases);
    let right_knee = limb_thrust(frames, Limb::Right, stance_phases);
    let asymmetry_percent = asymmetry_percent(left_knee.amplitude, right_knee.amplitude);

    LateralThrustData {
        left_knee,
        right_knee,
        asymmetry_percent,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::types::BodyPart;

    fn leg_frame(i: usize, limb: Limb, hip: (f64, f64), knee: (f64, f64), ankle: (f64, f64)) -> Frame {
        Frame::from_parts(
            i as f64 * 33.0,
            [
                (limb.hip(), Landmark::new(hip.0, hip.1)),
                (limb.knee(), Landmark::new(knee.0, knee.1)),
                (limb.ankle(), Landmark::new(ankle.0, ankle.1)),
            ],
        )
    }

    #[test]
    fn test_knee_offset_vertical_leg() {
        let hip = Landmark::new(0.5, 0.4);
        let ankle = Landmark::new(0.5, 0.8);
        let knee = Landmark::new(0.53, 0.6);
        assert!((knee_offset(&hip, &knee, &ankle) - 0.03).abs() < 1e-12);
    }

    #[test]
    fn test_knee_offset_collinear_is_zero() {
        let hip = Landmark::new(0.4, 0.4);
        let ankle = Landmark::new(0.6, 0.8);
        let knee = Landmark::new(0.5, 0.6);
        assert!(knee_offset(&hip, &knee, &ankle).abs() < 1e-12);
    }

    #[test]
    fn test_knee_offset_degenerate_line() {
        let hip = Landmark::new(0.5, 0.5);
        let knee = Landmark::new(0.7, 0.5);
        assert_eq!(knee_offset(&hip, &knee, &hip), 0.0);
    }

    #[test]
    fn test_frame_thrust_requires_all_landmarks() {
        let frame = Frame::from_parts(
            0.0,
            [
                (BodyPart::LeftHip, Landmark::new(0.5, 0.4)),
                (BodyPart::LeftAnkle, Landmark::new(0.5, 0.8)),
            ],
        );
        assert!(frame_thrust_cm(&frame, Limb::Left).is_none());

        let frame = leg_frame(0, Limb::Left, (0.5, 0.4), (0.52, 0.6), (0.5, 0.8));
        let thrust = frame_thrust_cm(&frame, Limb::Left).unwrap();
        assert!((thrust - 2.0).abs() < 1e-9);
    }

    #[test]
    fn test_stance_mask_membership() {
        let phases = vec![
            StancePhase::new(Limb::Left, 5, 9),
            StancePhase::new(Limb::Right, 0, 40),
            StancePhase::new(Limb::Left, 20, 25),
        ];
        let mask = StanceMask::for_limb(Limb::Left, &phases);

        assert!(!mask.contains(4));
        assert!(mask.contains(5));
        assert!(mask.contains(9));
        assert!(!mask.contains(10));
        assert!(!mask.contains(19));
        assert!(mask.contains(20));
        assert!(mask.contains(25));
        assert!(!mask.contains(26));
        assert_eq!(mask.frame_count(), 11);
        assert!(StanceMask::for_limb(Limb::Left, &[]).is_empty());
    }

    #[test]
    fn test_waveform_zero_outside_stance() {
        let frames: Vec<Frame> = (0..20)
            .map(|i| leg_frame(i, Limb::Left, (0.5, 0.4), (0.53, 0.6), (0.5, 0.8)))
            .collect();
        let phases = vec![StancePhase::new(Limb::Left, 5, 12)];

        let metrics = limb_thrust(&frames, Limb::Left, &phases);

        assert_eq!(metrics.waveform.len(), 20);
        assert_eq!(metrics.time_points.len(), 20);
        assert_eq!(metrics.time_points[19], 19.0 * 33.0);
        for (i, &value) in metrics.waveform.iter().enumerate() {
            if (5..=12).contains(&i) {
                assert!((value - 3.0).abs() < 1e-9);
            } else {
                assert_eq!(value, 0.0);
            }
        }
        // Constant offset: no range within the stance.
        assert_eq!(metrics.amplitude, 0.0);
        assert_eq!(metrics.max_displacement, 3.0);
        assert_eq!(metrics.severity, Severity::Low);
    }

    #[test]
    fn test_amplitude_is_largest_phase_range() {
        // Knee x sweeps further out in the second stance.
        let knee_x = |i: usize| match i {
            0..=9 => 0.51 + 0.002 * i as f64,     // 1.0 cm .. 2.8 cm
            20..=29 => 0.51 + 0.005 * (i - 20) as f64, // 1.0 cm .. 5.5 cm
            _ => 0.5,
        };
        let frames: Vec<Frame> = (0..40)
            .map(|i| leg_frame(i, Limb::Right, (0.5, 0.3), (knee_x(i), 0.55), (0.5, 0.8)))
            .collect();
        let phases = vec![
            StancePhase::new(Limb::Right, 0, 9),
            StancePhase::new(Limb::Right, 20, 29),
        ];

        let metrics = limb_thrust(&frames, Limb::Right, &phases);

        assert_eq!(metrics.amplitude, 4.5);
        assert_eq!(metrics.max_displacement, 5.5);
        assert_eq!(metrics.severity, Severity::High);
    }

    #[test]
    fn test_collinear_knee_gives_low_severity() {
        let frames: Vec<Frame> = (0..30)
            .map(|i| leg_frame(i, Limb::Left, (0.5, 0.4), (0.5, 0.6), (0.5, 0.8)))
            .collect();
        let phases = vec![StancePhase::new(Limb::Left, 3, 20)];

        let metrics = limb_thrust(&frames, Limb::Left, &phases);
        assert_eq!(metrics.amplitude, 0.0);
        assert_eq!(metrics.max_displacement, 0.0);
        assert_eq!(metrics.severity, Severity::Low);
    }

    #[test]
    fn test_missing_landmarks_contribute_zero() {
        let mut frames: Vec<Frame> = (0..10)
            .map(|i| leg_frame(i, Limb::Left, (0.5, 0.4), (0.5 + 0.005 * i as f64, 0.6), (0.5, 0.8)))
            .collect();
        frames[9] = Frame::new(9.0 * 33.0, Vec::new());
        let phases = vec![StancePhase::new(Limb::Left, 0, 9)];

        let metrics = limb_thrust(&frames, Limb::Left, &phases);
        assert_eq!(metrics.waveform[9], 0.0);
        assert_eq!(metrics.time_points[9], 9.0 * 33.0);
        // Frame 0 is collinear (0 cm) and frame 9 is missing; range is 0.5..4.0.
        assert_eq!(metrics.amplitude, 3.5);
        assert_eq!(metrics.severity, Severity::Moderate);
    }

    #[test]
    fn test_no_stance_defaults() {
        let frames: Vec<Frame> = (0..10)
            .map(|i| leg_frame(i, Limb::Left, (0.5, 0.4), (0.55, 0.6), (0.5, 0.8)))
            .collect();
        let metrics = limb_thrust(&frames, Limb::Left, &[]);
        assert!(metrics.waveform.iter().all(|&v| v == 0.0));
        assert_eq!(metrics.amplitude, 0.0);
        assert_eq!(metrics.severity, Severity::Low);
    }

    #[test]
    fn test_phase_past_end_is_clipped() {
        let frames: Vec<Frame> = (0..5)
            .map(|i| leg_frame(i, Limb::Left, (0.5, 0.4), (0.51 + 0.01 * i as f64, 0.6), (0.5, 0.8)))
            .collect();
        let phases = vec![StancePhase::new(Limb::Left, 2, 50), StancePhase::new(Limb::Left, 60, 70)];

        let metrics = limb_thrust(&frames, Limb::Left, &phases);
        assert_eq!(metrics.waveform.len(), 5);
        assert_eq!(metrics.amplitude, 2.0);
    }

    #[test]
    fn test_asymmetry() {
        assert_eq!(asymmetry_percent(5.0, 0.0), 100);
        assert_eq!(asymmetry_percent(0.0, 0.0), 0);
        assert_eq!(asymmetry_percent(2.0, 4.0), 50);
        assert_eq!(asymmetry_percent(3.0, 3.0), 0);
        assert_eq!(asymmetry_percent(1.2, 1.5), 20);
    }

    #[test]
    fn test_lateral_thrust_both_knees() {
        let frames: Vec<Frame> = (0..12)
            .map(|i| {
                Frame::from_parts(
                    i as f64 * 33.0,
                    [
                        (BodyPart::LeftHip, Landmark::new(0.45, 0.4)),
                        (BodyPart::LeftKnee, Landmark::new(0.45 + 0.005 * i as f64, 0.6)),
                        (BodyPart::LeftAnkle, Landmark::new(0.45, 0.8)),
                        (BodyPart::RightHip, Landmark::new(0.55, 0.4)),
                        (BodyPart::RightKnee, Landmark::new(0.55, 0.6)),
                        (BodyPart::RightAnkle, Landmark::new(0.55, 0.8)),
                    ],
                )
            })
            .collect();
        let phases = vec![
            StancePhase::new(Limb::Left, 1, 11),
            StancePhase::new(Limb::Right, 0, 11),
        ];

        let data = lateral_thrust(&frames, &phases);
        assert_eq!(data.left_knee.amplitude, 5.0);
        assert_eq!(data.right_knee.amplitude, 0.0);
        assert_eq!(data.asymmetry_percent, 100);
        assert_eq!(data.knee(Limb::Left).severity, Severity::High);
    }
}
