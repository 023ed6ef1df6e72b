//! Plain-language findings for a single analysis.
//!
//! Findings are structured values first; `Display` renders each one as a
//! sentence for reports.

use std::fmt;

use serde::{Deserialize, Serialize};

use crate::constants::report::MARKED_ASYMMETRY_PERCENT;
use crate::types::{GaitAnalysisResult, Severity};

/// One observation about a result.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(tag = "kind", rename_all = "camelCase")]
pub enum Finding {
    /// Left knee thrust exceeds right.
    LeftGreater { left_cm: f64, right_cm: f64 },
    /// Right knee thrust exceeds left.
    RightGreater { left_cm: f64, right_cm: f64 },
    /// Both knees show the same amplitude.
    Balanced,
    /// Left/right difference above the reporting cutoff.
    MarkedAsymmetry { percent: u32 },
    /// At least one knee graded high.
    ReferralSuggested,
}

impl fmt::Display for Finding {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Finding::LeftGreater { left_cm, right_cm } => write!(
                f,
                "Left knee lateral thrust is larger than right (amplitude: left {left_cm} cm vs right {right_cm} cm)."
            ),
            Finding::RightGreater { left_cm, right_cm } => write!(
                f,
                "Right knee lateral thrust is larger than left (amplitude: right {right_cm} cm vs left {left_cm} cm)."
            ),
            Finding::Balanced => write!(f, "No notable difference in lateral thrust between knees."),
            Finding::MarkedAsymmetry { percent } => {
                write!(f, "Left/right asymmetry is pronounced at {percent}%.")
            }
            Finding::ReferralSuggested => write!(
                f,
                "Significant lateral thrust observed; consultation with a specialist is recommended."
            ),
        }
    }
}

/// Derive the findings for one result, in reporting order.
pub fn findings(result: &GaitAnalysisResult) -> Vec<Finding> {
    let thrust = &result.lateral_thrust;
    let left_cm = thrust.left_knee.amplitude;
    let right_cm = thrust.right_knee.amplitude;

    let mut out = Vec::with_capacity(3);

    out.push(if right_cm > left_cm {
        Finding::RightGreater { left_cm, right_cm }
    } else if left_cm > right_cm {
        Finding::LeftGreater { left_cm, right_cm }
    } else {
        Finding::Balanced
    });

    if thrust.asymmetry_percent > MARKED_ASYMMETRY_PERCENT {
        out.push(Finding::MarkedAsymmetry {
            percent: thrust.asymmetry_percent,
        });
    }

    if thrust.left_knee.severity == Severity::High || thrust.right_knee.severity == Severity::High {
        out.push(Finding::ReferralSuggested);
    }

    out
}
