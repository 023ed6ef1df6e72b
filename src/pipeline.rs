//! Complete gait analysis pipeline.
//!
//! This module composes the processing stages into one call that maps a
//! recorded trial to a [`GaitAnalysisResult`].
//!
//! # Architecture
//!
//! 1. **Trial gate**: fewer than the minimum frame count is reported as
//!    insufficient data
//! 2. **Stance Detection**: per-limb hysteresis state machine on the
//!    smoothed ankle height
//! 3. **Gait Cycles**: consecutive same-limb contacts subdivided into the
//!    eight gait phases
//! 4. **Lateral Thrust**: knee offset from the hip–ankle line during stance
//!
//! Stages 3 and 4 both consume stage 2's output and are independent of each
//! other.
//!
//! # Purity
//! - No I/O, no shared state: the same frames always give the same result
//! - O(frames) time, allocation limited to per-call intermediate arrays

use tracing::{info, warn};

use crate::constants::trial::MIN_FRAMES;
use crate::error::{GaitError, Result};
use crate::gait_cycle::detect_gait_cycles;
use crate::lateral_thrust::lateral_thrust;
use crate::stance_detection::detect_stance_phases;
use crate::types::*;

/// Stateless entry point for analyzing trials.
///
/// Holds no data; exists so callers can pass an analyzer around where a
/// handle reads better than a free function.
#[derive(Debug, Clone, Copy, Default)]
pub struct GaitAnalyzer;

impl GaitAnalyzer {
    pub fn new() -> Self {
        Self
    }

    /// Analyze one trial. See [`analyze`].
    pub fn analyze(&self, frames: &[Frame]) -> Result<GaitAnalysisResult> {
        analyze(frames)
    }
}

/// Analyze one walking trial.
///
/// Returns [`GaitError::InsufficientFrames`] when fewer than 30 frames are
/// supplied; that is an expected outcome for short recordings, not a fault.
/// A trial with no detectable stance still yields a result with empty
/// phase and cycle lists.
pub fn analyze(frames: &[Frame]) -> Result<GaitAnalysisResult> {
    if frames.len() < MIN_FRAMES {
        warn!(
            frames = frames.len(),
            required = MIN_FRAMES,
            "trial too short for gait analysis"
        );
        return Err(GaitError::InsufficientFrames {
            frames: frames.len(),
            required: MIN_FRAMES,
        });
    }

    let stance_phases = detect_stance_phases(frames);
    let gait_cycles = detect_gait_cycles(&stance_phases);
    let lateral_thrust = lateral_thrust(frames, &stance_phases);

    let result = GaitAnalysisResult {
        stance_phases,
        gait_cycles,
        lateral_thrust,
        total_frames: frames.len(),
        duration: trial_duration_secs(frames),
    };

    info!(
        frames = result.total_frames,
        duration_s = result.duration,
        stance_phases = result.stance_phases.len(),
        gait_cycles = result.gait_cycles.len(),
        left_amplitude = result.lateral_thrust.left_knee.amplitude,
        right_amplitude = result.lateral_thrust.right_knee.amplitude,
        asymmetry = result.lateral_thrust.asymmetry_percent,
        "gait analysis complete"
    );

    Ok(result)
}

/// Seconds between the first and last frame, 0 for an empty trial.
pub fn trial_duration_secs(frames: &[Frame]) -> f64 {
    match (frames.first(), frames.last()) {
        (Some(first), Some(last)) => (last.timestamp_ms - first.timestamp_ms) / 1000.0,
        _ => 0.0,
    }
}
