//! Multi-trial analysis.
//!
//! A recording session usually repeats the same walk several times. Each
//! trial is analyzed on its own (in parallel, since analyses share nothing)
//! and the thrust figures are averaged to damp trial-to-trial noise.

use rayon::prelude::*;
use serde::{Deserialize, Serialize};
use tracing::{info, warn};

use crate::error::{GaitError, Result};
use crate::pipeline::analyze;
use crate::types::{Frame, GaitAnalysisResult, Severity};

/// Mean thrust figures across successful trials.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct TrialAverages {
    pub left_amplitude: f64,
    pub right_amplitude: f64,
    /// Mean asymmetry in percent (not rounded).
    pub asymmetry: f64,
}

impl TrialAverages {
    pub fn left_severity(&self) -> Severity {
        Severity::from_amplitude(self.left_amplitude)
    }

    pub fn right_severity(&self) -> Severity {
        Severity::from_amplitude(self.right_amplitude)
    }
}

/// Results of every successful trial plus their aggregate.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct TrialSummary {
    /// Successful analyses, in input order.
    pub trials: Vec<GaitAnalysisResult>,
    /// Index into `trials` of the trial with the most frames.
    pub best_trial_index: usize,
    pub averages: TrialAverages,
}

impl TrialSummary {
    /// Aggregate already-computed results.
    ///
    /// Returns [`GaitError::NoUsableTrials`] for an empty list.
    pub fn from_results(trials: Vec<GaitAnalysisResult>) -> Result<Self> {
        if trials.is_empty() {
            return Err(GaitError::NoUsableTrials);
        }

        // First trial wins ties.
        let best_trial_index = trials
            .iter()
            .enumerate()
            .fold(0, |best, (i, t)| {
                if t.total_frames > trials[best].total_frames {
                    i
                } else {
                    best
                }
            });

        let count = trials.len() as f64;
        let mean = |f: fn(&GaitAnalysisResult) -> f64| trials.iter().map(f).sum::<f64>() / count;

        let averages = TrialAverages {
            left_amplitude: mean(|t| t.lateral_thrust.left_knee.amplitude),
            right_amplitude: mean(|t| t.lateral_thrust.right_knee.amplitude),
            asymmetry: mean(|t| f64::from(t.lateral_thrust.asymmetry_percent)),
        };

        Ok(Self {
            trials,
            best_trial_index,
            averages,
        })
    }

    /// The trial with the most frames.
    pub fn best_trial(&self) -> &GaitAnalysisResult {
        &self.trials[self.best_trial_index]
    }
}

/// Analyze several recordings of the same walk.
///
/// Trials too short to analyze are skipped with a warning. Fails with
/// [`GaitError::NoUsableTrials`] when none succeeds.
pub fn analyze_trials(trials: &[Vec<Frame>]) -> Result<TrialSummary> {
    let outcomes: Vec<Result<GaitAnalysisResult>> =
        trials.par_iter().map(|frames| analyze(frames)).collect();

    let mut results = Vec::with_capacity(outcomes.len());
    for (index, outcome) in outcomes.into_iter().enumerate() {
        match outcome {
            Ok(result) => results.push(result),
            Err(err) => warn!(trial = index + 1, error = %err, "skipping trial"),
        }
    }

    let summary = TrialSummary::from_results(results)?;
    info!(
        trials = summary.trials.len(),
        skipped = trials.len() - summary.trials.len(),
        best_trial = summary.best_trial_index + 1,
        left_amplitude = summary.averages.left_amplitude,
        right_amplitude = summary.averages.right_amplitude,
        asymmetry = summary.averages.asymmetry,
        "multi-trial analysis complete"
    );

    Ok(summary)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::types::{LateralThrustData, ThrustMetrics};
    use assert_matches::assert_matches;

    fn result_with(frames: usize, left: f64, right: f64, asymmetry: u32) -> GaitAnalysisResult {
        GaitAnalysisResult {
            stance_phases: Vec::new(),
            gait_cycles: Vec::new(),
            lateral_thrust: LateralThrustData {
                left_knee: ThrustMetrics {
                    amplitude: left,
                    severity: Severity::from_amplitude(left),
                    ..Default::default()
                },
                right_knee: ThrustMetrics {
                    amplitude: right,
                    severity: Severity::from_amplitude(right),
                    ..Default::default()
                },
                asymmetry_percent: asymmetry,
            },
            total_frames: frames,
            duration: 0.0,
        }
    }

    #[test]
    fn test_averages() {
        let summary = TrialSummary::from_results(vec![
            result_with(90, 1.0, 3.0, 67),
            result_with(95, 2.0, 3.0, 33),
            result_with(80, 3.0, 6.0, 50),
        ])
        .unwrap();

        assert!((summary.averages.left_amplitude - 2.0).abs() < 1e-12);
        assert!((summary.averages.right_amplitude - 4.0).abs() < 1e-12);
        assert!((summary.averages.asymmetry - 50.0).abs() < 1e-12);
        assert_eq!(summary.averages.left_severity(), Severity::Moderate);
        assert_eq!(summary.averages.right_severity(), Severity::High);
    }

    #[test]
    fn test_best_trial_has_most_frames() {
        let summary = TrialSummary::from_results(vec![
            result_with(90, 1.0, 1.0, 0),
            result_with(120, 1.0, 1.0, 0),
            result_with(120, 2.0, 1.0, 50),
        ])
        .unwrap();

        assert_eq!(summary.best_trial_index, 1);
        assert_eq!(summary.best_trial().total_frames, 120);
    }

    #[test]
    fn test_no_trials() {
        assert_matches!(TrialSummary::from_results(Vec::new()), Err(GaitError::NoUsableTrials));
        assert_matches!(analyze_trials(&[]), Err(GaitError::NoUsableTrials));
    }

    #[test]
    fn test_short_trials_skipped() {
        let frame = |i: usize| Frame::new(i as f64 * 33.0, Vec::new());
        let long: Vec<Frame> = (0..40).map(frame).collect();
        let short: Vec<Frame> = (0..10).map(frame).collect();

        let summary = analyze_trials(&[short.clone(), long, short]).unwrap();
        assert_eq!(summary.trials.len(), 1);
        assert_eq!(summary.best_trial().total_frames, 40);

        let only_short: Vec<Frame> = (0..29).map(frame).collect();
        assert_matches!(analyze_trials(&[only_short]), Err(GaitError::NoUsableTrials));
    }
}
