use anyhow::Result;

use scrolltune_core::{AnimationCurvePreset, Curve};

pub fn run() -> Result<()> {
    println!("Animation curve presets ({}):\n", AnimationCurvePreset::ALL.len());

    for preset in AnimationCurvePreset::ALL {
        let params = preset.params();

        let base = match (&params.base_curve, params.base_ms_per_step) {
            (Some(curve), Some(ms)) => format!("{} over {} ms", curve_kind(curve), ms),
            _ => "none".to_string(),
        };
        let drag = match params.drag {
            Some(d) => format!("exponent {}, coefficient {}, stop {}", d.exponent, d.coefficient, d.stop_speed),
            None => "none".to_string(),
        };

        println!("  {}", preset);
        println!("    Base: {}", base);
        println!("    Drag: {}", drag);
        println!(
            "    Gesture: {}, momentum: {}",
            params.send_gesture_scrolls, params.send_momentum_scrolls
        );
    }
    Ok(())
}

fn curve_kind(curve: &Curve) -> &'static str {
    match curve {
        Curve::Linear(_) => "linear",
        Curve::Bezier(_) => "bezier",
        Curve::CappedAcceleration(_) => "capped acceleration",
    }
}
