//! Signal extraction and smoothing.
//!
//! This module turns a frame sequence into the 1D signals the detectors work
//! on:
//! - Per-limb vertical ankle and knee coordinate series
//! - Frame-to-frame velocity
//! - Centered moving-average smoothing
//!
//! Design note: everything here is a pure function of the input frames.
//! A missing landmark contributes 0.0 for that frame; the frame itself is
//! never dropped, so every series stays aligned with the frame index.

use crate::constants::signal::SMOOTHING_WINDOW;
use crate::types::{BodyPart, Frame, Limb};

/// Vertical coordinate of `part` in every frame, 0.0 where it is missing.
pub fn extract_series(frames: &[Frame], part: BodyPart) -> Vec<f64> {
    frames
        .iter()
        .map(|frame| frame.landmark(part).map_or(0.0, |l| l.y))
        .collect()
}

/// Discrete velocity: `v[0] = 0`, `v[i] = y[i] - y[i-1]`.
pub fn velocity(series: &[f64]) -> Vec<f64> {
    let mut out = Vec::with_capacity(series.len());
    if series.is_empty() {
        return out;
    }
    out.push(0.0);
    out.extend(series.windows(2).map(|w| w[1] - w[0]));
    out
}

/// Centered moving average.
///
/// Edge samples average over the part of the window that exists instead of
/// padding, so the first and last `window / 2` samples use fewer values.
pub fn moving_average(series: &[f64], window: usize) -> Vec<f64> {
    let half = window / 2;
    let len = series.len();

    (0..len)
        .map(|i| {
            let start = i.saturating_sub(half);
            let end = (i + half + 1).min(len);
            let slice = &series[start..end];
            slice.iter().sum::<f64>() / slice.len() as f64
        })
        .collect()
}

/// Preprocessed signals for one limb.
#[derive(Debug, Clone, PartialEq)]
pub struct LimbSignals {
    pub limb: Limb,
    /// Raw ankle y per frame.
    pub ankle_y: Vec<f64>,
    /// Raw knee y per frame.
    pub knee_y: Vec<f64>,
    /// Velocity of the raw ankle y.
    pub ankle_velocity: Vec<f64>,
    /// Ankle y smoothed with the standard window.
    pub ankle_smoothed: Vec<f64>,
}

impl LimbSignals {
    /// Extract every signal the stance detector needs for `limb`.
    ///
    /// Velocity is taken on the raw series; only the position is smoothed.
    pub fn extract(frames: &[Frame], limb: Limb) -> Self {
        let ankle_y = extract_series(frames, limb.ankle());
        let knee_y = extract_series(frames, limb.knee());
        let ankle_velocity = velocity(&ankle_y);
        let ankle_smoothed = moving_average(&ankle_y, SMOOTHING_WINDOW);

        Self {
            limb,
            ankle_y,
            knee_y,
            ankle_velocity,
            ankle_smoothed,
        }
    }

    /// Number of frames covered.
    pub fn len(&self) -> usize {
        self.ankle_y.len()
    }

    pub fn is_empty(&self) -> bool {
        self.ankle_y.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::types::Landmark;

    fn close(a: f64, b: f64) -> bool {
        (a - b).abs() < 1e-12
    }

    #[test]
    fn test_velocity_first_sample_is_zero() {
        let v = velocity(&[0.5, 0.6, 0.4, 0.4]);
        assert_eq!(v.len(), 4);
        assert_eq!(v[0], 0.0);
        assert!(close(v[1], 0.1));
        assert!(close(v[2], -0.2));
        assert!(close(v[3], 0.0));
    }

    #[test]
    fn test_velocity_empty() {
        assert!(velocity(&[]).is_empty());
    }

    #[test]
    fn test_moving_average_truncates_edges() {
        let series = [1.0, 2.0, 3.0, 4.0, 5.0, 6.0];
        let smoothed = moving_average(&series, 5);

        // First sample averages indices 0..=2, second 0..=3.
        assert!(close(smoothed[0], 2.0));
        assert!(close(smoothed[1], 2.5));
        // Interior sample uses the full window.
        assert!(close(smoothed[2], 3.0));
        assert!(close(smoothed[3], 4.0));
        // Last samples mirror the leading edge.
        assert!(close(smoothed[4], 4.5));
        assert!(close(smoothed[5], 5.0));
    }

    #[test]
    fn test_moving_average_constant_signal() {
        let series = vec![0.65; 12];
        let smoothed = moving_average(&series, 5);
        assert!(smoothed.iter().all(|&y| close(y, 0.65)));
    }

    #[test]
    fn test_moving_average_shorter_than_window() {
        let smoothed = moving_average(&[1.0, 3.0], 5);
        assert!(close(smoothed[0], 2.0));
        assert!(close(smoothed[1], 2.0));
    }

    #[test]
    fn test_missing_landmark_reads_as_zero() {
        let frames = vec![
            Frame::from_parts(0.0, [(BodyPart::LeftAnkle, Landmark::new(0.3, 0.7))]),
            Frame::new(33.0, Vec::new()),
            Frame::from_parts(66.0, [(BodyPart::LeftAnkle, Landmark::new(0.3, 0.68))]),
        ];

        let series = extract_series(&frames, BodyPart::LeftAnkle);
        assert_eq!(series, vec![0.7, 0.0, 0.68]);
    }

    #[test]
    fn test_limb_signals_aligned() {
        let frames: Vec<Frame> = (0..10)
            .map(|i| {
                Frame::from_parts(
                    i as f64 * 33.0,
                    [
                        (BodyPart::RightAnkle, Landmark::new(0.5, 0.6 + i as f64 * 0.01)),
                        (BodyPart::RightKnee, Landmark::new(0.5, 0.45)),
                    ],
                )
            })
            .collect();

        let signals = LimbSignals::extract(&frames, Limb::Right);
        assert_eq!(signals.len(), 10);
        assert_eq!(signals.knee_y.len(), 10);
        assert_eq!(signals.ankle_velocity.len(), 10);
        assert_eq!(signals.ankle_smoothed.len(), 10);
        assert!(close(signals.ankle_velocity[5], 0.01));
        assert!(close(signals.knee_y[3], 0.45));
    }
}
