//! Gait cycle detection and phase subdivision.
//!
//! A gait cycle runs from one initial contact (stance start) to the next
//! initial contact of the same limb. Each cycle is split into the eight
//! Rancho Los Amigos phases using fixed percentages of the cycle span.
//!
//! Left and right cycles are computed independently and may overlap.

use crate::constants::cycle::{MIN_CYCLE_FRAMES, PHASE_PERCENTAGES};
use crate::types::{GaitCycle, GaitPhase, GaitPhaseType, Limb, StancePhase};

/// Pair consecutive stance phases of each limb into gait cycles.
///
/// Cycles spanning fewer than the minimum number of frames are discarded.
/// The result is sorted by start frame.
pub fn detect_gait_cycles(stance_phases: &[StancePhase]) -> Vec<GaitCycle> {
    let mut cycles: Vec<GaitCycle> = Limb::BOTH
        .iter()
        .flat_map(|&limb| limb_cycles(limb, stance_phases))
        .collect();

    cycles.sort_by_key(|c| c.start_frame);
    cycles
}

/// Cycles of one limb.
fn limb_cycles(limb: Limb, stance_phases: &[StancePhase]) -> Vec<GaitCycle> {
    let mut starts: Vec<usize> = stance_phases
        .iter()
        .filter(|p| p.limb == limb)
        .map(|p| p.start_frame)
        .collect();
    starts.sort_unstable();

    starts
        .windows(2)
        .filter(|w| w[1] - w[0] >= MIN_CYCLE_FRAMES)
        .map(|w| GaitCycle {
            limb,
            start_frame: w[0],
            end_frame: w[1],
            phases: subdivide_cycle(limb, w[0], w[1]),
        })
        .collect()
}

/// Split `[start, end]` into the eight gait phases.
///
/// Each boundary is `round(start + span * pct / 100)`; adjacent phases
/// share their boundary frame, so the phases tile the cycle with no gaps.
pub fn subdivide_cycle(limb: Limb, start: usize, end: usize) -> Vec<GaitPhase> {
    let span = end.saturating_sub(start) as f64;
    let boundary = |pct: u8| (start as f64 + span * f64::from(pct) / 100.0).round() as usize;

    GaitPhaseType::ALL
        .iter()
        .zip(PHASE_PERCENTAGES)
        .map(|(&phase_type, (start_pct, end_pct))| GaitPhase {
            limb,
            phase_type,
            start_frame: boundary(start_pct),
            end_frame: boundary(end_pct),
            start_percent: f64::from(start_pct),
            end_percent: f64::from(end_pct),
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_subdivide_hundred_frame_cycle() {
        let phases = subdivide_cycle(Limb::Left, 100, 200);
        let bounds: Vec<(usize, usize)> =
            phases.iter().map(|p| (p.start_frame, p.end_frame)).collect();

        assert_eq!(
            bounds,
            vec![
                (100, 102),
                (102, 112),
                (112, 131),
                (131, 150),
                (150, 162),
                (162, 175),
                (175, 187),
                (187, 200),
            ]
        );
    }

    #[test]
    fn test_phases_contiguous_and_ordered() {
        for (start, end) in [(0, 10), (7, 40), (13, 46), (250, 283)] {
            let phases = subdivide_cycle(Limb::Right, start, end);
            assert_eq!(phases.len(), 8);
            assert_eq!(phases[0].start_frame, start);
            assert_eq!(phases[7].end_frame, end);

            for (phase, expected) in phases.iter().zip(GaitPhaseType::ALL) {
                assert_eq!(phase.phase_type, expected);
                assert_eq!(phase.limb, Limb::Right);
            }
            for pair in phases.windows(2) {
                assert_eq!(pair[0].end_frame, pair[1].start_frame);
                assert_eq!(pair[0].end_percent, pair[1].start_percent);
            }

            // Each phase spans its share of the cycle, within rounding.
            let span = (end - start) as f64;
            for phase in &phases {
                let expected = span * (phase.end_percent - phase.start_percent) / 100.0;
                let actual = (phase.end_frame - phase.start_frame) as f64;
                assert!((actual - expected).abs() <= 1.0);
            }
        }
    }

    #[test]
    fn test_cycles_pair_consecutive_stances() {
        let stances = vec![
            StancePhase::new(Limb::Left, 0, 10),
            StancePhase::new(Limb::Left, 30, 40),
            StancePhase::new(Limb::Left, 60, 70),
        ];

        let cycles = detect_gait_cycles(&stances);
        assert_eq!(cycles.len(), 2);
        assert_eq!((cycles[0].start_frame, cycles[0].end_frame), (0, 30));
        assert_eq!((cycles[1].start_frame, cycles[1].end_frame), (30, 60));
        assert_eq!(cycles[0].span(), 30);
    }

    #[test]
    fn test_short_cycle_discarded() {
        let stances = vec![
            StancePhase::new(Limb::Right, 0, 5),
            StancePhase::new(Limb::Right, 9, 15),
            StancePhase::new(Limb::Right, 19, 25),
        ];

        let cycles = detect_gait_cycles(&stances);
        // 0→9 is too short, 9→19 spans exactly the minimum.
        assert_eq!(cycles.len(), 1);
        assert_eq!((cycles[0].start_frame, cycles[0].end_frame), (9, 19));
    }

    #[test]
    fn test_limbs_independent() {
        let stances = vec![
            StancePhase::new(Limb::Left, 0, 10),
            StancePhase::new(Limb::Right, 15, 25),
            StancePhase::new(Limb::Left, 30, 40),
            StancePhase::new(Limb::Right, 45, 55),
        ];

        let cycles = detect_gait_cycles(&stances);
        assert_eq!(cycles.len(), 2);
        assert_eq!(cycles[0].limb, Limb::Left);
        assert_eq!((cycles[0].start_frame, cycles[0].end_frame), (0, 30));
        assert_eq!(cycles[1].limb, Limb::Right);
        assert_eq!((cycles[1].start_frame, cycles[1].end_frame), (15, 45));
    }

    #[test]
    fn test_single_stance_yields_no_cycle() {
        let stances = vec![StancePhase::new(Limb::Left, 4, 20)];
        assert!(detect_gait_cycles(&stances).is_empty());
        assert!(detect_gait_cycles(&[]).is_empty());
    }
}
