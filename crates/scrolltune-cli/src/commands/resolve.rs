use std::path::Path;

use anyhow::Result;

use scrolltune_core::{DisplayContext, ResolvedConfig};

use crate::Selector;

pub fn run(settings_path: &Path, selector: &Selector) -> Result<()> {
    let resolver = super::load_resolver(settings_path, selector.display())?;
    let config = resolver.resolve(selector.modifiers(), selector.axis, &DisplayContext::default());

    println!(
        "Scroll config for {} ({} axis):\n",
        selector.modifiers(),
        selector.axis.as_str()
    );
    print_config(&config);
    Ok(())
}

pub(crate) fn print_config(config: &ResolvedConfig) {
    let params = config.animation_curve_params();

    println!("  General");
    println!("    Smooth scrolling: {}", config.smooth_enabled());
    println!("    System acceleration: {}", config.use_apple_acceleration());
    println!("    Direction factor: {}", config.invert_direction().factor());

    println!("  Analysis");
    println!("    Swipe threshold: {} ticks", config.scroll_swipe_threshold_in_ticks());
    println!("    Fast scroll threshold: {} swipes", config.fast_scroll_threshold_in_swipes());
    println!(
        "    Tick interval: {:?} .. {:?}",
        config.consecutive_scroll_tick_interval_min(),
        config.consecutive_scroll_tick_interval_max()
    );
    println!("    Swipe max interval: {:?}", config.consecutive_scroll_swipe_max_interval());
    println!("    Swipe min tick speed: {}", config.consecutive_scroll_swipe_min_tick_speed());

    println!("  Fast scroll");
    println!("    Exponential base: {}", config.fast_scroll_exponential_base());
    println!("    Speedup: {}", config.fast_scroll_speedup());

    println!("  Animation");
    println!("    Preset: {}", config.animation_curve_preset());
    match params.base_ms_per_step {
        Some(ms) => println!("    Base step: {} ms", ms),
        None => println!("    Base step: (none)"),
    }
    if let Some(drag) = params.drag {
        println!(
            "    Drag: exponent {}, coefficient {}, stop speed {}",
            drag.exponent, drag.coefficient, drag.stop_speed
        );
    }
    println!(
        "    Gesture scrolls: {}, momentum scrolls: {}",
        params.send_gesture_scrolls, params.send_momentum_scrolls
    );

    let curve = config.acceleration_curve();
    let slow = 1.0 / config.consecutive_scroll_tick_interval_max().as_secs_f64();
    let fast = 1.0 / config.consecutive_scroll_tick_interval_acceleration_end().as_secs_f64();
    println!("  Acceleration");
    println!("    {:.1} ticks/s -> {:.1} px/tick", slow, curve.evaluate(slow));
    println!("    {:.1} ticks/s -> {:.1} px/tick", fast, curve.evaluate(fast));

    println!("  Keyboard");
    println!("    Horizontal modifiers: {}", config.horizontal_modifiers());
    println!("    Zoom modifiers: {}", config.zoom_modifiers());
}
