//! Calibration constants for the gait analysis kernel.
//!
//! Every threshold the pipeline applies lives here. They are fixed by design:
//! repeated measurements of the same subject under the same camera setup must
//! stay numerically comparable across trials, so nothing below is exposed as
//! a runtime parameter.

/// Trial-level gates.
pub mod trial {
    /// Minimum number of frames before any analysis is attempted
    /// (about one second at 30 fps).
    pub const MIN_FRAMES: usize = 30;
}

/// Signal preprocessing.
pub mod signal {
    /// Centered moving-average window applied to ankle height.
    pub const SMOOTHING_WINDOW: usize = 5;
}

/// Stance/swing detection on the smoothed ankle height.
///
/// Coordinates are normalized with y increasing downward, so a planted
/// foot shows up as a *high* ankle y value.
pub mod stance {
    /// Ankle height threshold, identical for both limbs.
    pub const ANKLE_Y_THRESHOLD: f64 = 0.60;

    /// Half-width of the hysteresis band around the threshold.
    /// Entry requires `y > T + h`, exit triggers on `y < T - h`.
    pub const HYSTERESIS: f64 = 0.025;

    /// A frame is still when `|velocity|` is strictly below this
    /// (normalized units per frame).
    pub const STILLNESS_VELOCITY: f64 = 0.012;

    /// Minimum stance length in frames (0.4 s at 15 fps).
    pub const MIN_DURATION_FRAMES: usize = 6;
}

/// Gait-cycle subdivision.
pub mod cycle {
    /// Cycles spanning fewer frames than this are discarded as noise.
    pub const MIN_CYCLE_FRAMES: usize = 10;

    /// Rancho Los Amigos phase boundaries as `(start %, end %)` of the cycle,
    /// in canonical order IC, LR, MSt, TSt, PSw, ISw, MSw, TSw.
    pub const PHASE_PERCENTAGES: [(u8, u8); 8] = [
        (0, 2),
        (2, 12),
        (12, 31),
        (31, 50),
        (50, 62),
        (62, 75),
        (75, 87),
        (87, 100),
    ];
}

/// Lateral knee thrust.
pub mod thrust {
    /// Normalized-coordinate distance to centimeters.
    ///
    /// Assumes the frame spans roughly one meter at the subject's depth.
    /// This is not a calibrated measurement: absolute values are only
    /// comparable between trials recorded with the same camera placement.
    pub const NORMALIZED_TO_CM: f64 = 100.0;

    /// Amplitudes below this (cm) are within the normal range.
    pub const MODERATE_AMPLITUDE_CM: f64 = 2.0;

    /// Amplitudes at or above this (cm) are a significant thrust.
    pub const HIGH_AMPLITUDE_CM: f64 = 4.0;
}

/// Cross-session comparison and report wording.
pub mod report {
    /// Amplitude changes smaller than this (cm) count as unchanged.
    pub const AMPLITUDE_CHANGE_CM: f64 = 0.5;

    /// Asymmetry changes larger than this (percentage points) are reported.
    pub const ASYMMETRY_SHIFT_POINTS: i64 = 5;

    /// Asymmetry above this percentage is called out as marked.
    pub const MARKED_ASYMMETRY_PERCENT: u32 = 30;
}
