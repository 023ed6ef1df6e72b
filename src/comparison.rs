//! Session-to-session comparison.
//!
//! Compares a follow-up analysis against a baseline of the same subject.
//! Because thresholds are fixed, differences in amplitude between two
//! sessions recorded with the same camera setup are meaningful even though
//! the absolute centimeter values are approximate.

use serde::{Deserialize, Serialize};

use crate::constants::report::{AMPLITUDE_CHANGE_CM, ASYMMETRY_SHIFT_POINTS};
use crate::types::{GaitAnalysisResult, Limb};

/// Direction of an amplitude change.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Trend {
    Unchanged,
    Increased,
    Decreased,
}

impl Trend {
    /// Classify a follow-up minus baseline amplitude difference (cm).
    pub fn from_diff(diff_cm: f64) -> Self {
        if diff_cm.abs() < AMPLITUDE_CHANGE_CM {
            Trend::Unchanged
        } else if diff_cm > 0.0 {
            Trend::Increased
        } else {
            Trend::Decreased
        }
    }
}

/// Direction of an asymmetry change.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum AsymmetryShift {
    Stable,
    Widened,
    Narrowed,
}

impl AsymmetryShift {
    pub fn from_diff(diff_points: i64) -> Self {
        if diff_points.abs() <= ASYMMETRY_SHIFT_POINTS {
            AsymmetryShift::Stable
        } else if diff_points > 0 {
            AsymmetryShift::Widened
        } else {
            AsymmetryShift::Narrowed
        }
    }
}

/// Change of one knee between sessions.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct KneeChange {
    pub baseline_amplitude: f64,
    pub followup_amplitude: f64,
    /// Follow-up minus baseline (cm).
    pub diff: f64,
    /// `diff` relative to the baseline amplitude; a zero baseline counts as 1.
    pub change_percent: f64,
    pub trend: Trend,
}

impl KneeChange {
    fn between(baseline_amplitude: f64, followup_amplitude: f64) -> Self {
        let diff = followup_amplitude - baseline_amplitude;
        let denominator = if baseline_amplitude == 0.0 { 1.0 } else { baseline_amplitude };

        Self {
            baseline_amplitude,
            followup_amplitude,
            diff,
            change_percent: diff / denominator * 100.0,
            trend: Trend::from_diff(diff),
        }
    }
}

/// Differences between a baseline and a follow-up session.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SessionComparison {
    pub left_knee: KneeChange,
    pub right_knee: KneeChange,
    /// Follow-up minus baseline asymmetry (percentage points).
    pub asymmetry_diff: i64,
    pub asymmetry_shift: AsymmetryShift,
}

impl SessionComparison {
    pub fn knee(&self, limb: Limb) -> &KneeChange {
        match limb {
            Limb::Left => &self.left_knee,
            Limb::Right => &self.right_knee,
        }
    }
}

/// Compare a follow-up analysis with a baseline.
pub fn compare_sessions(baseline: &GaitAnalysisResult, followup: &GaitAnalysisResult) -> SessionComparison {
    let before = &baseline.lateral_thrust;
    let after = &followup.lateral_thrust;

    let asymmetry_diff = i64::from(after.asymmetry_percent) - i64::from(before.asymmetry_percent);

    SessionComparison {
        left_knee: KneeChange::between(before.left_knee.amplitude, after.left_knee.amplitude),
        right_knee: KneeChange::between(before.right_knee.amplitude, after.right_knee.amplitude),
        asymmetry_diff,
        asymmetry_shift: AsymmetryShift::from_diff(asymmetry_diff),
    }
}
