//! Modifier overrides.
//!
//! Turns the unmodified configuration into the configuration for one modifier
//! context. The phases run in a fixed order:
//!
//! 1. input modifier (quick / precise)
//! 2. effect modifier (zoom, rotate, gestures, ...)
//! 3. default acceleration curve, only when no input modifier is active
//!
//! Effect presets must win over input presets, and the default acceleration
//! curve depends on the final preset, hence the split of the input phase.

use tracing::warn;

use crate::acceleration::REFERENCE_SCREEN_SIZE;
use crate::display::DisplaySize;
use crate::modifiers::{Axis, EffectModifier, InputModifier, ModifierCombination};
use crate::preset::AnimationCurvePreset;
use crate::resolved::{ResolvedConfig, ResolvedConfigBuilder};

/// Loosening applied to the consecutive-swipe timing while quick scrolling
const QUICK_SCROLL_INTERVAL_FACTOR: f64 = 1.2;

/// Derive the configuration for `modifiers` scrolling along `axis`.
///
/// `display` is the display under the pointer. It only matters when no input
/// modifier is active; without it the reference screen size is used.
pub fn apply(
    base: &ResolvedConfig,
    modifiers: ModifierCombination,
    axis: Axis,
    display: Option<DisplaySize>,
) -> ResolvedConfig {
    let builder = base.to_builder();
    let builder = apply_input_modifier(builder, modifiers.input);
    let builder = apply_effect_modifier(builder, modifiers.effect);
    let builder = match modifiers.input {
        InputModifier::None => apply_default_acceleration(builder, modifiers.effect, axis, display),
        InputModifier::Quick | InputModifier::Precise => builder,
    };
    builder.build()
}

fn apply_input_modifier(builder: ResolvedConfigBuilder, input: InputModifier) -> ResolvedConfigBuilder {
    match input {
        InputModifier::Quick => {
            // The quick curve is taken before the tick interval is loosened
            let curve = builder.quick_acceleration_curve();
            let builder = builder
                .with_acceleration_curve(curve)
                .with_animation_curve_preset(AnimationCurvePreset::QuickScroll);

            // Make fast scroll easy to trigger
            let swipe_max = builder
                .current_consecutive_scroll_swipe_max_interval()
                .mul_f64(QUICK_SCROLL_INTERVAL_FACTOR);
            let tick_max = builder
                .current_consecutive_scroll_tick_interval_max()
                .mul_f64(QUICK_SCROLL_INTERVAL_FACTOR);

            builder
                .with_consecutive_scroll_swipe_max_interval(swipe_max)
                .with_consecutive_scroll_tick_interval_max(tick_max)
                .with_fast_scroll_threshold_in_swipes(2)
                .with_fast_scroll_speedup(20.0)
        }
        InputModifier::Precise => {
            let curve = builder.precise_acceleration_curve();
            // Fast scroll is effectively off
            builder
                .with_acceleration_curve(curve)
                .with_animation_curve_preset(AnimationCurvePreset::PreciseScroll)
                .with_fast_scroll_threshold_in_swipes(69)
                .with_fast_scroll_exponential_base(1.0)
                .with_fast_scroll_speedup(0.0)
        }
        // Handled after the effect phase
        InputModifier::None => builder,
    }
}

fn apply_effect_modifier(builder: ResolvedConfigBuilder, effect: EffectModifier) -> ResolvedConfigBuilder {
    match effect {
        EffectModifier::Zoom | EffectModifier::Rotate => builder
            .with_smooth_enabled(true)
            .with_animation_curve_preset(AnimationCurvePreset::TouchDriver),
        EffectModifier::ThreeFingerSwipeHorizontal | EffectModifier::FourFingerPinch => builder
            .with_smooth_enabled(true)
            .with_animation_curve_preset(AnimationCurvePreset::TouchDriverLinear),
        EffectModifier::CommandTab => builder.with_smooth_enabled(false),
        EffectModifier::None | EffectModifier::HorizontalScroll | EffectModifier::AddModeFeedback => {
            builder
        }
    }
}

fn apply_default_acceleration(
    builder: ResolvedConfigBuilder,
    effect: EffectModifier,
    axis: Axis,
    display: Option<DisplaySize>,
) -> ResolvedConfigBuilder {
    let screen_size = match display {
        Some(size) => screen_dimension(size, effect, axis),
        None => {
            warn!("Display under pointer unknown, using reference screen size");
            REFERENCE_SCREEN_SIZE
        }
    };
    let curve = builder.standard_acceleration_curve(screen_size);
    builder.with_acceleration_curve(curve)
}

/// Display extent along the direction the content will move
fn screen_dimension(size: DisplaySize, effect: EffectModifier, axis: Axis) -> u32 {
    if axis == Axis::Horizontal || effect == EffectModifier::HorizontalScroll {
        size.width
    } else {
        size.height
    }
}
