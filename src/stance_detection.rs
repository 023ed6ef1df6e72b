//! Stance Detection Module.
//!
//! Segments each limb's walk into stance (foot planted) and swing phases
//! from the smoothed vertical ankle position and its velocity.
//!
//! The detector is a two-state machine with hysteresis:
//! - SWING → STANCE when the ankle is below the upper band edge on screen
//!   (`y > T + h`) and the foot is still
//! - STANCE → SWING when the ankle rises above the lower band edge
//!   (`y < T - h`) or the foot starts moving
//!
//! The threshold is fixed rather than fitted per trial so repeated
//! measurements stay comparable. Hysteresis and the stillness gate together
//! suppress chatter around midstance; stances shorter than the minimum
//! duration are dropped.

use tracing::debug;

use crate::constants::stance::{
    ANKLE_Y_THRESHOLD, HYSTERESIS, MIN_DURATION_FRAMES, STILLNESS_VELOCITY,
};
use crate::signal::LimbSignals;
use crate::types::{Frame, Limb, StancePhase};

/// Detector state carried through the per-frame scan.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum StanceState {
    /// Foot in the air (initial state).
    Swing,
    /// Foot planted since `start`.
    Stance { start: usize },
}

/// Per-limb hysteresis state machine.
///
/// Feed frames in order with [`StanceDetector::process_frame`], then call
/// [`StanceDetector::finish`] to close a stance that is still open at the
/// end of the trial.
#[derive(Debug, Clone)]
pub struct StanceDetector {
    limb: Limb,
    state: StanceState,
    frame_index: usize,

    // Statistics
    emitted: usize,
    rejected: usize,
}

impl StanceDetector {
    /// Create a detector for one limb, starting in swing.
    pub fn new(limb: Limb) -> Self {
        Self {
            limb,
            state: StanceState::Swing,
            frame_index: 0,
            emitted: 0,
            rejected: 0,
        }
    }

    /// Process the next frame's smoothed ankle y and ankle velocity.
    ///
    /// Returns a stance phase when this frame closes one that is long enough.
    pub fn process_frame(&mut self, ankle_y: f64, velocity: f64) -> Option<StancePhase> {
        let i = self.frame_index;
        self.frame_index += 1;

        let is_high = ankle_y > ANKLE_Y_THRESHOLD + HYSTERESIS;
        let is_low = ankle_y < ANKLE_Y_THRESHOLD - HYSTERESIS;
        let is_still = velocity.abs() < STILLNESS_VELOCITY;

        match self.state {
            StanceState::Swing => {
                if is_high && is_still {
                    self.state = StanceState::Stance { start: i };
                }
                None
            }
            StanceState::Stance { start } => {
                if is_low || !is_still {
                    self.state = StanceState::Swing;
                    self.close_stance(start, i)
                } else {
                    None
                }
            }
        }
    }

    /// Close a stance still open at the end of the sequence.
    ///
    /// The final phase ends at the last processed frame.
    pub fn finish(&mut self) -> Option<StancePhase> {
        match self.state {
            StanceState::Stance { start } => {
                self.state = StanceState::Swing;
                let end_exclusive = self.frame_index;
                self.close_stance(start, end_exclusive)
            }
            StanceState::Swing => None,
        }
    }

    /// Current state of the machine.
    pub fn state(&self) -> StanceState {
        self.state
    }

    /// Limb this detector tracks.
    pub fn limb(&self) -> Limb {
        self.limb
    }

    /// Get detector statistics (emitted phases, phases rejected as too short).
    pub fn statistics(&self) -> (usize, usize) {
        (self.emitted, self.rejected)
    }

    /// Reset the detector state.
    pub fn reset(&mut self) {
        self.state = StanceState::Swing;
        self.frame_index = 0;
        self.emitted = 0;
        self.rejected = 0;
    }

    // =========================================================================
    // PRIVATE METHODS
    // =========================================================================

    /// Emit `[start, end_exclusive - 1]` if it meets the minimum duration.
    fn close_stance(&mut self, start: usize, end_exclusive: usize) -> Option<StancePhase> {
        if end_exclusive - start >= MIN_DURATION_FRAMES {
            self.emitted += 1;
            Some(StancePhase::new(self.limb, start, end_exclusive - 1))
        } else {
            self.rejected += 1;
            None
        }
    }
}

/// Run the detector over one limb's preprocessed signals.
pub fn detect_limb_stances(signals: &LimbSignals) -> Vec<StancePhase> {
    let mut detector = StanceDetector::new(signals.limb);
    let mut phases = Vec::new();

    for (&y, &v) in signals.ankle_smoothed.iter().zip(&signals.ankle_velocity) {
        if let Some(phase) = detector.process_frame(y, v) {
            phases.push(phase);
        }
    }
    phases.extend(detector.finish());

    let (emitted, rejected) = detector.statistics();
    debug!(
        limb = ?signals.limb,
        emitted,
        rejected,
        threshold = ANKLE_Y_THRESHOLD,
        hysteresis = HYSTERESIS,
        min_duration = MIN_DURATION_FRAMES,
        "stance detection finished"
    );

    phases
}

/// Detect stance phases of both limbs, sorted by start frame.
///
/// Limbs are processed independently; on equal start frames the left limb
/// comes first.
pub fn detect_stance_phases(frames: &[Frame]) -> Vec<StancePhase> {
    let mut phases: Vec<StancePhase> = Limb::BOTH
        .iter()
        .flat_map(|&limb| detect_limb_stances(&LimbSignals::extract(frames, limb)))
        .collect();

    phases.sort_by_key(|p| p.start_frame);
    phases
}

// ============================================================================
// TESTS
// ============================================================================
