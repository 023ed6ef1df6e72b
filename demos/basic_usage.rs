/// Basic usage example: feed pose frames, get a gait analysis
use gait_sensing::{analyze, findings, Frame, Landmark, Limb};

/// Synthetic 4-second walk at 30 fps. The left knee bows outward while the
/// left foot is planted; the right knee stays on the hip–ankle line.
fn synthetic_walk() -> Vec<Frame> {
    (0..120)
        .map(|i| {
            let mut parts = Vec::new();
            for (limb, offset, hip_x) in [(Limb::Left, 0, 0.45), (Limb::Right, 15, 0.55)] {
                let p = (i + offset) % 30;
                let planted = p < 18;
                let ankle_y = if planted { 0.70 } else { 0.45 };
                let bow = if planted && limb == Limb::Left {
                    0.005 + 0.003 * p as f64
                } else {
                    0.0
                };

                parts.push((limb.hip(), Landmark::new(hip_x, 0.40)));
                parts.push((limb.knee(), Landmark::new(hip_x + bow, 0.55)));
                parts.push((limb.ankle(), Landmark::new(hip_x, ankle_y)));
            }
            Frame::from_parts(i as f64 * 1000.0 / 30.0, parts)
        })
        .collect()
}

fn main() {
    println!("=== Gait Sensing: Basic Example ===\n");

    let frames = synthetic_walk();
    println!("Analyzing {} frames...\n", frames.len());

    let result = match analyze(&frames) {
        Ok(result) => result,
        Err(err) => {
            println!("No analysis: {err}");
            return;
        }
    };

    println!("Duration: {:.2} s", result.duration);
    println!("Stance phases:");
    for phase in &result.stance_phases {
        println!(
            "  {:?}: frames {}-{} ({} frames)",
            phase.limb,
            phase.start_frame,
            phase.end_frame,
            phase.len()
        );
    }

    println!("\nGait cycles:");
    for cycle in &result.gait_cycles {
        let phases: Vec<&str> = cycle.phases.iter().map(|p| p.phase_type.abbreviation()).collect();
        println!(
            "  {:?}: frames {}-{} [{}]",
            cycle.limb,
            cycle.start_frame,
            cycle.end_frame,
            phases.join(" ")
        );
    }

    println!("\nLateral thrust:");
    for limb in Limb::BOTH {
        let knee = result.lateral_thrust.knee(limb);
        println!(
            "  {:?} knee: amplitude {} cm, max {} cm, severity {:?}",
            limb, knee.amplitude, knee.max_displacement, knee.severity
        );
    }
    println!("  Asymmetry: {}%", result.lateral_thrust.asymmetry_percent);

    println!("\nFindings:");
    for finding in findings(&result) {
        println!("  - {finding}");
    }
}
