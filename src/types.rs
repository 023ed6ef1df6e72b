//! Core data types for the gait analysis kernel.
//!
//! This module defines the input contract (pose landmarks per frame) and the
//! result records produced by the pipeline. Types make intent obvious: limbs,
//! body parts, phases and severities are enums, never raw strings or indices.
//!
//! Serialized field names follow the JSON contract already used by stored
//! sessions (camelCase, limb serialized as `leg`), so results can be written
//! and read back verbatim by the storage and presentation collaborators.

use serde::{Deserialize, Serialize};

use crate::constants::thrust::{HIGH_AMPLITUDE_CM, MODERATE_AMPLITUDE_CM};

// ============================================================================
// INPUT TYPES
// ============================================================================

/// A single pose landmark produced by the pose estimator.
///
/// `x` and `y` are normalized to [0, 1] with the origin at the top-left of
/// the image and y increasing downward. `z` is a relative depth estimate.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Landmark {
    pub x: f64,
    pub y: f64,
    #[serde(default)]
    pub z: f64,
    /// Estimator confidence that the landmark is visible [0.0, 1.0].
    #[serde(default)]
    pub visibility: f64,
}

impl Landmark {
    /// Creates a fully visible landmark at `(x, y)` with zero depth.
    pub fn new(x: f64, y: f64) -> Self {
        Self {
            x,
            y,
            z: 0.0,
            visibility: 1.0,
        }
    }
}

/// Body parts the kernel reads, with their MediaPipe Pose Landmarker indices.
///
/// Frames carry the full 33-landmark skeleton; everything not listed here is
/// ignored.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum BodyPart {
    LeftHip,
    RightHip,
    LeftKnee,
    RightKnee,
    LeftAnkle,
    RightAnkle,
}

impl BodyPart {
    /// Index of this body part in a frame's landmark array.
    pub fn index(self) -> usize {
        match self {
            BodyPart::LeftHip => 23,
            BodyPart::RightHip => 24,
            BodyPart::LeftKnee => 25,
            BodyPart::RightKnee => 26,
            BodyPart::LeftAnkle => 27,
            BodyPart::RightAnkle => 28,
        }
    }
}

/// One side of the body.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Limb {
    Left,
    Right,
}

impl Limb {
    /// Both limbs, left first.
    pub const BOTH: [Limb; 2] = [Limb::Left, Limb::Right];

    pub fn hip(self) -> BodyPart {
        match self {
            Limb::Left => BodyPart::LeftHip,
            Limb::Right => BodyPart::RightHip,
        }
    }

    pub fn knee(self) -> BodyPart {
        match self {
            Limb::Left => BodyPart::LeftKnee,
            Limb::Right => BodyPart::RightKnee,
        }
    }

    pub fn ankle(self) -> BodyPart {
        match self {
            Limb::Left => BodyPart::LeftAnkle,
            Limb::Right => BodyPart::RightAnkle,
        }
    }
}

/// One captured video frame with its pose landmarks.
///
/// Landmark slots may be empty (`null` in JSON, or the array may be short)
/// when the estimator lost track of a body part.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Frame {
    /// Capture time in milliseconds, non-decreasing within a trial.
    #[serde(rename = "timestamp")]
    pub timestamp_ms: f64,
    /// Image-space landmarks indexed by body-part id.
    #[serde(default)]
    pub landmarks: Vec<Option<Landmark>>,
    /// Metric-space landmarks indexed by body-part id. Carried through for
    /// storage, not read by the kernel.
    #[serde(default)]
    pub world_landmarks: Vec<Option<Landmark>>,
}

impl Frame {
    /// Creates a frame from a full landmark array.
    pub fn new(timestamp_ms: f64, landmarks: Vec<Option<Landmark>>) -> Self {
        Self {
            timestamp_ms,
            landmarks,
            world_landmarks: Vec::new(),
        }
    }

    /// Creates a frame holding only the given body parts; every other slot
    /// is left empty.
    pub fn from_parts<I>(timestamp_ms: f64, parts: I) -> Self
    where
        I: IntoIterator<Item = (BodyPart, Landmark)>,
    {
        let mut landmarks: Vec<Option<Landmark>> = Vec::new();
        for (part, landmark) in parts {
            let index = part.index();
            if landmarks.len() <= index {
                landmarks.resize(index + 1, None);
            }
            landmarks[index] = Some(landmark);
        }
        Self::new(timestamp_ms, landmarks)
    }

    /// Landmark for a body part, if the estimator produced one.
    pub fn landmark(&self, part: BodyPart) -> Option<&Landmark> {
        self.landmarks.get(part.index()).and_then(Option::as_ref)
    }
}

// ============================================================================
// STANCE AND GAIT CYCLE TYPES
// ============================================================================

/// A closed, inclusive frame interval during which a limb bears weight.
///
/// Stance phases of the same limb never overlap. Phases of opposite limbs
/// may overlap (double support).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct StancePhase {
    #[serde(rename = "leg")]
    pub limb: Limb,
    pub start_frame: usize,
    pub end_frame: usize,
}

impl StancePhase {
    pub fn new(limb: Limb, start_frame: usize, end_frame: usize) -> Self {
        Self {
            limb,
            start_frame,
            end_frame,
        }
    }

    /// Number of frames covered, both ends included.
    pub fn len(&self) -> usize {
        self.end_frame - self.start_frame + 1
    }

    /// Always false: a stance phase covers at least its start frame.
    pub fn is_empty(&self) -> bool {
        false
    }

    pub fn contains(&self, frame: usize) -> bool {
        (self.start_frame..=self.end_frame).contains(&frame)
    }
}

/// Rancho Los Amigos gait phases, in canonical order.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum GaitPhaseType {
    /// Initial Contact.
    #[serde(rename = "IC")]
    InitialContact,
    /// Loading Response.
    #[serde(rename = "LR")]
    LoadingResponse,
    /// Mid Stance.
    #[serde(rename = "MSt")]
    MidStance,
    /// Terminal Stance.
    #[serde(rename = "TSt")]
    TerminalStance,
    /// Pre-Swing.
    #[serde(rename = "PSw")]
    PreSwing,
    /// Initial Swing.
    #[serde(rename = "ISw")]
    InitialSwing,
    /// Mid Swing.
    #[serde(rename = "MSw")]
    MidSwing,
    /// Terminal Swing.
    #[serde(rename = "TSw")]
    TerminalSwing,
}

impl GaitPhaseType {
    /// All eight phases in cycle order.
    pub const ALL: [GaitPhaseType; 8] = [
        GaitPhaseType::InitialContact,
        GaitPhaseType::LoadingResponse,
        GaitPhaseType::MidStance,
        GaitPhaseType::TerminalStance,
        GaitPhaseType::PreSwing,
        GaitPhaseType::InitialSwing,
        GaitPhaseType::MidSwing,
        GaitPhaseType::TerminalSwing,
    ];

    /// Clinical abbreviation.
    pub fn abbreviation(self) -> &'static str {
        match self {
            GaitPhaseType::InitialContact => "IC",
            GaitPhaseType::LoadingResponse => "LR",
            GaitPhaseType::MidStance => "MSt",
            GaitPhaseType::TerminalStance => "TSt",
            GaitPhaseType::PreSwing => "PSw",
            GaitPhaseType::InitialSwing => "ISw",
            GaitPhaseType::MidSwing => "MSw",
            GaitPhaseType::TerminalSwing => "TSw",
        }
    }

    /// Whether the phase belongs to the stance half of the cycle.
    pub fn is_stance(self) -> bool {
        matches!(
            self,
            GaitPhaseType::InitialContact
                | GaitPhaseType::LoadingResponse
                | GaitPhaseType::MidStance
                | GaitPhaseType::TerminalStance
                | GaitPhaseType::PreSwing
        )
    }
}

/// A named sub-segment of a gait cycle.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct GaitPhase {
    #[serde(rename = "leg")]
    pub limb: Limb,
    #[serde(rename = "type")]
    pub phase_type: GaitPhaseType,
    pub start_frame: usize,
    pub end_frame: usize,
    pub start_percent: f64,
    pub end_percent: f64,
}

/// One full gait cycle: initial contact to the next initial contact of the
/// same limb.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct GaitCycle {
    #[serde(rename = "leg")]
    pub limb: Limb,
    pub start_frame: usize,
    pub end_frame: usize,
    /// The eight phases, contiguous and in canonical order.
    pub phases: Vec<GaitPhase>,
}

impl GaitCycle {
    /// Cycle span in frames.
    pub fn span(&self) -> usize {
        self.end_frame - self.start_frame
    }
}

// ============================================================================
// LATERAL THRUST TYPES
// ============================================================================

/// Clinical grading of a lateral thrust amplitude.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize, Default)]
#[serde(rename_all = "lowercase")]
pub enum Severity {
    /// Normal range (< 2 cm).
    #[default]
    Low,
    /// Mild thrust (2 to 4 cm).
    Moderate,
    /// Significant thrust (>= 4 cm).
    High,
}

impl Severity {
    /// Grade an amplitude in centimeters using the fixed clinical cutoffs.
    pub fn from_amplitude(amplitude_cm: f64) -> Self {
        if amplitude_cm < MODERATE_AMPLITUDE_CM {
            Severity::Low
        } else if amplitude_cm < HIGH_AMPLITUDE_CM {
            Severity::Moderate
        } else {
            Severity::High
        }
    }
}

/// Per-limb lateral thrust summary.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, Default)]
#[serde(rename_all = "camelCase")]
pub struct ThrustMetrics {
    /// Largest within-stance range of knee displacement (cm, 1 decimal).
    pub amplitude: f64,
    /// Largest absolute knee displacement seen during stance (cm, 1 decimal).
    pub max_displacement: f64,
    /// Frame-aligned displacement (cm); 0 outside this limb's stance.
    pub waveform: Vec<f64>,
    /// Frame timestamps (ms), same length as `waveform`.
    pub time_points: Vec<f64>,
    pub severity: Severity,
}

/// Lateral thrust for both knees.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, Default)]
#[serde(rename_all = "camelCase")]
pub struct LateralThrustData {
    pub left_knee: ThrustMetrics,
    pub right_knee: ThrustMetrics,
    /// Relative left/right amplitude difference, whole percent.
    pub asymmetry_percent: u32,
}

impl LateralThrustData {
    pub fn knee(&self, limb: Limb) -> &ThrustMetrics {
        match limb {
            Limb::Left => &self.left_knee,
            Limb::Right => &self.right_knee,
        }
    }
}

// ============================================================================
// RESULT
// ============================================================================

/// Complete analysis of one walking trial.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct GaitAnalysisResult {
    /// Stance intervals of both limbs, sorted by start frame.
    pub stance_phases: Vec<StancePhase>,
    /// Gait cycles of both limbs, sorted by start frame.
    pub gait_cycles: Vec<GaitCycle>,
    pub lateral_thrust: LateralThrustData,
    pub total_frames: usize,
    /// Trial duration in seconds.
    pub duration: f64,
}

impl GaitAnalysisResult {
    /// Stance phases of one limb, in order.
    pub fn stance_phases_for(&self, limb: Limb) -> impl Iterator<Item = &StancePhase> {
        self.stance_phases.iter().filter(move |p| p.limb == limb)
    }

    /// Gait cycles of one limb, in order.
    pub fn gait_cycles_for(&self, limb: Limb) -> impl Iterator<Item = &GaitCycle> {
        self.gait_cycles.iter().filter(move |c| c.limb == limb)
    }
}
