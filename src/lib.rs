//! Gait Sensing Library
//!
//! A gait analysis kernel that turns a recorded walking trial, given as 2D
//! pose landmarks per video frame, into a clinical screening summary:
//! per-limb stance/swing segmentation, an 8-phase gait-cycle subdivision and
//! a lateral knee thrust measurement with severity and left/right asymmetry.
//!
//! # Design Philosophy
//!
//! - **Fixed calibration**: every threshold is a named constant in
//!   [`constants`]. Nothing is tuned per trial, so repeated measurements of
//!   the same subject stay comparable.
//! - **Degrade, don't fail**: missing landmarks and degenerate geometry
//!   lower the quality of a result, never its availability. The only
//!   analysis-level refusal is a trial too short to analyze.
//! - **Pure computation**: no I/O and no shared state in the core; the same
//!   frames always produce the same result, and independent trials can be
//!   analyzed in parallel.
//! - **Screening, not diagnosis**: centimeter values use a fixed image scale
//!   and are approximate.
//!
//! # Example
//!
//! ```no_run
//! use gait_sensing::{analyze, export, GaitError};
//!
//! let frames = export::load_frames("trial.json")?;
//! match analyze(&frames) {
//!     Ok(result) => println!("left thrust {} cm", result.lateral_thrust.left_knee.amplitude),
//!     Err(GaitError::InsufficientFrames { frames, .. }) => println!("only {frames} frames"),
//!     Err(err) => return Err(err),
//! }
//! # Ok::<(), GaitError>(())
//! ```

pub mod comparison;
pub mod constants;
pub mod error;
pub mod export;
pub mod findings;
pub mod gait_cycle;
pub mod lateral_thrust;
pub mod pipeline;
pub mod signal;
pub mod stance_detection;
pub mod trials;
pub mod types;


// Re-export commonly used types
pub use comparison::{compare_sessions, SessionComparison, Trend};
pub use error::{GaitError, Result};
pub use findings::{findings, Finding};
pub use pipeline::{analyze, GaitAnalyzer};
pub use trials::{analyze_trials, TrialSummary};
pub use types::{
    BodyPart, Frame, GaitAnalysisResult, GaitCycle, GaitPhase, GaitPhaseType, Landmark,
    LateralThrustData, Limb, Severity, StancePhase, ThrustMetrics,
};
