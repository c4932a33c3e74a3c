//! Fully resolved scroll configuration.
//!
//! A [`ResolvedConfig`] is the base settings plus a set of explicit overrides.
//! Every other value is derived from those two layers on first access and kept
//! for the lifetime of the instance. Instances are immutable once built; the
//! override engine works on a [`ResolvedConfigBuilder`] and builds a new one.

use std::sync::{Arc, OnceLock};
use std::time::Duration;

use crate::acceleration::{self, StandardCurveInputs, REFERENCE_SCREEN_SIZE};
use crate::curve::Curve;
use crate::preset::{params_for, AnimationCurveParameters, AnimationCurvePreset};
use crate::settings::{BaseConfig, EventFlags, ScrollSmoothness, ScrollSpeed};

/// Longest gap between two ticks that still counts as consecutive
pub const CONSECUTIVE_SCROLL_TICK_INTERVAL_MAX: Duration = Duration::from_millis(160);

/// Shortest tick gap that can be produced by hand. Measured gaps can be smaller
/// when the system is under load, so this also serves as a cap.
pub const CONSECUTIVE_SCROLL_TICK_INTERVAL_MIN: Duration = Duration::from_millis(15);

/// Direction multiplier applied to scroll deltas
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ScrollInversion {
    NonInverted,
    Inverted,
}

impl ScrollInversion {
    #[inline]
    pub fn factor(&self) -> i32 {
        match self {
            Self::NonInverted => 1,
            Self::Inverted => -1,
        }
    }
}

/// Values explicitly set by modifier overrides
#[derive(Debug, Clone, Default, PartialEq)]
struct Overrides {
    smooth_enabled: Option<bool>,
    animation_curve_preset: Option<AnimationCurvePreset>,
    fast_scroll_threshold_in_swipes: Option<u32>,
    fast_scroll_exponential_base: Option<f64>,
    fast_scroll_speedup: Option<f64>,
    consecutive_scroll_swipe_max_interval: Option<Duration>,
    consecutive_scroll_tick_interval_max: Option<Duration>,
    acceleration_curve: Option<Curve>,
}

/// Base settings plus overrides; computes derived values without caching
#[derive(Debug, Clone, PartialEq)]
struct ConfigLayers {
    base: Arc<BaseConfig>,
    overrides: Overrides,
}

impl ConfigLayers {
    fn smooth_enabled(&self) -> bool {
        self.overrides
            .smooth_enabled
            .unwrap_or(self.base.smoothness != ScrollSmoothness::Off)
    }

    fn animation_curve_preset(&self) -> AnimationCurvePreset {
        self.overrides
            .animation_curve_preset
            .unwrap_or(match self.base.smoothness {
                ScrollSmoothness::Off => AnimationCurvePreset::NoInertia,
                ScrollSmoothness::Regular => AnimationCurvePreset::LowInertia,
                ScrollSmoothness::High if self.base.trackpad_simulation => {
                    AnimationCurvePreset::HighInertiaPlusTrackpadSim
                }
                ScrollSmoothness::High => AnimationCurvePreset::HighInertia,
            })
    }

    /// The snappy presets were tuned separately from the others
    fn is_high_inertia_family(&self) -> bool {
        matches!(
            self.animation_curve_preset(),
            AnimationCurvePreset::HighInertia | AnimationCurvePreset::QuickScroll
        )
    }

    fn fast_scroll_threshold_in_swipes(&self) -> u32 {
        self.overrides
            .fast_scroll_threshold_in_swipes
            .unwrap_or(if self.is_high_inertia_family() { 3 } else { 4 })
    }

    fn fast_scroll_exponential_base(&self) -> f64 {
        self.overrides.fast_scroll_exponential_base.unwrap_or(1.1)
    }

    fn fast_scroll_speedup(&self) -> f64 {
        self.overrides
            .fast_scroll_speedup
            .unwrap_or(if self.is_high_inertia_family() { 7.0 } else { 5.0 })
    }

    fn consecutive_scroll_swipe_max_interval(&self) -> Duration {
        if let Some(interval) = self.overrides.consecutive_scroll_swipe_max_interval {
            return interval;
        }
        let ms = match self.animation_curve_preset() {
            AnimationCurvePreset::NoInertia
            | AnimationCurvePreset::LowInertia
            | AnimationCurvePreset::TouchDriver
            | AnimationCurvePreset::TouchDriverLinear
            | AnimationCurvePreset::PreciseScroll
            | AnimationCurvePreset::Trackpad
            | AnimationCurvePreset::Test => 350,
            AnimationCurvePreset::MediumInertia => 475,
            AnimationCurvePreset::HighInertia
            | AnimationCurvePreset::HighInertiaPlusTrackpadSim
            | AnimationCurvePreset::QuickScroll => 600,
        };
        Duration::from_millis(ms)
    }

    fn consecutive_scroll_swipe_min_tick_speed(&self) -> f64 {
        if self.is_high_inertia_family() {
            12.0
        } else {
            16.0
        }
    }

    fn consecutive_scroll_tick_interval_max(&self) -> Duration {
        self.overrides
            .consecutive_scroll_tick_interval_max
            .unwrap_or(CONSECUTIVE_SCROLL_TICK_INTERVAL_MAX)
    }

    fn standard_curve_inputs(&self, screen_size: u32) -> StandardCurveInputs {
        StandardCurveInputs {
            speed: self.base.speed,
            precise: self.base.precise,
            smooth_enabled: self.smooth_enabled(),
            preset: self.animation_curve_preset(),
            screen_size,
            tick_interval_max: self.consecutive_scroll_tick_interval_max(),
            tick_interval_accel_end: CONSECUTIVE_SCROLL_TICK_INTERVAL_MIN,
        }
    }

    fn acceleration_curve(&self) -> Curve {
        match &self.overrides.acceleration_curve {
            Some(curve) => curve.clone(),
            None => self.standard_curve_inputs(REFERENCE_SCREEN_SIZE).curve(),
        }
    }

    fn precise_acceleration_curve(&self) -> Curve {
        acceleration::precise_curve(
            self.consecutive_scroll_tick_interval_max(),
            CONSECUTIVE_SCROLL_TICK_INTERVAL_MIN,
        )
    }

    fn quick_acceleration_curve(&self) -> Curve {
        acceleration::quick_curve(
            self.consecutive_scroll_tick_interval_max(),
            CONSECUTIVE_SCROLL_TICK_INTERVAL_MIN,
        )
    }
}

#[derive(Debug, Default)]
struct Memo {
    smooth_enabled: OnceLock<bool>,
    animation_curve_preset: OnceLock<AnimationCurvePreset>,
    animation_curve_params: OnceLock<AnimationCurveParameters>,
    fast_scroll_threshold_in_swipes: OnceLock<u32>,
    fast_scroll_exponential_base: OnceLock<f64>,
    fast_scroll_speedup: OnceLock<f64>,
    consecutive_scroll_swipe_max_interval: OnceLock<Duration>,
    consecutive_scroll_swipe_min_tick_speed: OnceLock<f64>,
    consecutive_scroll_tick_interval_max: OnceLock<Duration>,
    acceleration_curve: OnceLock<Curve>,
    precise_acceleration_curve: OnceLock<Curve>,
    quick_acceleration_curve: OnceLock<Curve>,
}

/// Effective scroll behavior for one modifier context
#[derive(Debug)]
pub struct ResolvedConfig {
    layers: ConfigLayers,
    memo: Memo,
}

impl PartialEq for ResolvedConfig {
    fn eq(&self, other: &Self) -> bool {
        self.layers == other.layers
    }
}

impl Clone for ResolvedConfig {
    /// Copies settings and overrides; derived values are recomputed on demand
    fn clone(&self) -> Self {
        self.to_builder().build()
    }
}

impl ResolvedConfig {
    /// Configuration with no modifiers applied
    pub fn from_base(base: Arc<BaseConfig>) -> Self {
        ResolvedConfigBuilder::new(base).build()
    }

    /// Start a modified copy of this configuration
    pub fn to_builder(&self) -> ResolvedConfigBuilder {
        ResolvedConfigBuilder {
            layers: self.layers.clone(),
        }
    }

    pub fn base(&self) -> &BaseConfig {
        &self.layers.base
    }

    // General

    pub fn smooth_enabled(&self) -> bool {
        *self
            .memo
            .smooth_enabled
            .get_or_init(|| self.layers.smooth_enabled())
    }

    /// Ignore our acceleration and use the values provided by the system
    pub fn use_apple_acceleration(&self) -> bool {
        self.layers.base.speed == ScrollSpeed::System
    }

    pub fn invert_direction(&self) -> ScrollInversion {
        if self.layers.base.reverse_direction {
            ScrollInversion::Inverted
        } else {
            ScrollInversion::NonInverted
        }
    }

    /// Set on gesture scroll events to invert interactions such as swipe-to-delete
    pub fn inverted_from_device(&self) -> bool {
        false
    }

    // Analysis

    /// Consecutive ticks needed to count as a swipe
    pub fn scroll_swipe_threshold_in_ticks(&self) -> u32 {
        2
    }

    /// On this consecutive swipe fast scrolling kicks in
    pub fn fast_scroll_threshold_in_swipes(&self) -> u32 {
        *self
            .memo
            .fast_scroll_threshold_in_swipes
            .get_or_init(|| self.layers.fast_scroll_threshold_in_swipes())
    }

    /// Most ticks a single swipe produces on a wheel that is not free-spinning
    pub fn scroll_swipe_max_in_ticks(&self) -> u32 {
        11
    }

    pub fn consecutive_scroll_tick_interval_max(&self) -> Duration {
        *self
            .memo
            .consecutive_scroll_tick_interval_max
            .get_or_init(|| self.layers.consecutive_scroll_tick_interval_max())
    }

    pub fn consecutive_scroll_tick_interval_min(&self) -> Duration {
        CONSECUTIVE_SCROLL_TICK_INTERVAL_MIN
    }

    /// Below this tick gap the acceleration curve is in its linear tail
    pub fn consecutive_scroll_tick_interval_acceleration_end(&self) -> Duration {
        CONSECUTIVE_SCROLL_TICK_INTERVAL_MIN
    }

    pub fn consecutive_scroll_swipe_max_interval(&self) -> Duration {
        *self
            .memo
            .consecutive_scroll_swipe_max_interval
            .get_or_init(|| self.layers.consecutive_scroll_swipe_max_interval())
    }

    pub fn consecutive_scroll_swipe_min_tick_speed(&self) -> f64 {
        *self
            .memo
            .consecutive_scroll_swipe_min_tick_speed
            .get_or_init(|| self.layers.consecutive_scroll_swipe_min_tick_speed())
    }

    pub fn ticks_per_second_double_exponential_smoothing_input_value_weight(&self) -> f64 {
        0.5
    }

    pub fn ticks_per_second_double_exponential_smoothing_trend_weight(&self) -> f64 {
        0.2
    }

    pub fn ticks_per_second_exponential_smoothing_input_value_weight(&self) -> f64 {
        0.5
    }

    // Fast scroll

    pub fn fast_scroll_factor(&self) -> f64 {
        1.0
    }

    /// Needs to be above 1 for any speedup
    pub fn fast_scroll_exponential_base(&self) -> f64 {
        *self
            .memo
            .fast_scroll_exponential_base
            .get_or_init(|| self.layers.fast_scroll_exponential_base())
    }

    /// Needs to be above 0 for any speedup
    pub fn fast_scroll_speedup(&self) -> f64 {
        *self
            .memo
            .fast_scroll_speedup
            .get_or_init(|| self.layers.fast_scroll_speedup())
    }

    // Animation curve

    pub fn animation_curve_preset(&self) -> AnimationCurvePreset {
        *self
            .memo
            .animation_curve_preset
            .get_or_init(|| self.layers.animation_curve_preset())
    }

    pub fn animation_curve_params(&self) -> &AnimationCurveParameters {
        self.memo
            .animation_curve_params
            .get_or_init(|| params_for(self.animation_curve_preset()))
    }

    // Acceleration

    /// Curve consumers evaluate on every tick
    pub fn acceleration_curve(&self) -> &Curve {
        self.memo
            .acceleration_curve
            .get_or_init(|| self.layers.acceleration_curve())
    }

    pub fn precise_acceleration_curve(&self) -> &Curve {
        self.memo
            .precise_acceleration_curve
            .get_or_init(|| self.layers.precise_acceleration_curve())
    }

    pub fn quick_acceleration_curve(&self) -> &Curve {
        self.memo
            .quick_acceleration_curve
            .get_or_init(|| self.layers.quick_acceleration_curve())
    }

    /// Standard curve for a display dimension, not cached
    pub fn standard_acceleration_curve(&self, screen_size: u32) -> Curve {
        self.layers.standard_curve_inputs(screen_size).curve()
    }

    // Keyboard modifiers

    pub fn horizontal_modifiers(&self) -> EventFlags {
        self.layers.base.horizontal_modifiers
    }

    pub fn zoom_modifiers(&self) -> EventFlags {
        self.layers.base.zoom_modifiers
    }
}

/// Mutable staging area for a [`ResolvedConfig`].
///
/// The `current_*` getters report the effective value given the overrides set
/// so far, so later override steps can build on earlier ones.
#[derive(Debug, Clone)]
pub struct ResolvedConfigBuilder {
    layers: ConfigLayers,
}

impl ResolvedConfigBuilder {
    pub fn new(base: Arc<BaseConfig>) -> Self {
        Self {
            layers: ConfigLayers {
                base,
                overrides: Overrides::default(),
            },
        }
    }

    pub fn build(self) -> ResolvedConfig {
        ResolvedConfig {
            layers: self.layers,
            memo: Memo::default(),
        }
    }

    pub fn current_animation_curve_preset(&self) -> AnimationCurvePreset {
        self.layers.animation_curve_preset()
    }

    pub fn current_consecutive_scroll_swipe_max_interval(&self) -> Duration {
        self.layers.consecutive_scroll_swipe_max_interval()
    }

    pub fn current_consecutive_scroll_tick_interval_max(&self) -> Duration {
        self.layers.consecutive_scroll_tick_interval_max()
    }

    pub fn quick_acceleration_curve(&self) -> Curve {
        self.layers.quick_acceleration_curve()
    }

    pub fn precise_acceleration_curve(&self) -> Curve {
        self.layers.precise_acceleration_curve()
    }

    /// Standard curve for a display dimension using the current preset and smoothing
    pub fn standard_acceleration_curve(&self, screen_size: u32) -> Curve {
        self.layers.standard_curve_inputs(screen_size).curve()
    }

    pub fn with_smooth_enabled(mut self, enabled: bool) -> Self {
        self.layers.overrides.smooth_enabled = Some(enabled);
        self
    }

    pub fn with_animation_curve_preset(mut self, preset: AnimationCurvePreset) -> Self {
        self.layers.overrides.animation_curve_preset = Some(preset);
        self
    }

    pub fn with_fast_scroll_threshold_in_swipes(mut self, swipes: u32) -> Self {
        self.layers.overrides.fast_scroll_threshold_in_swipes = Some(swipes);
        self
    }

    pub fn with_fast_scroll_exponential_base(mut self, base: f64) -> Self {
        self.layers.overrides.fast_scroll_exponential_base = Some(base);
        self
    }

    pub fn with_fast_scroll_speedup(mut self, speedup: f64) -> Self {
        self.layers.overrides.fast_scroll_speedup = Some(speedup);
        self
    }

    pub fn with_consecutive_scroll_swipe_max_interval(mut self, interval: Duration) -> Self {
        self.layers.overrides.consecutive_scroll_swipe_max_interval = Some(interval);
        self
    }

    pub fn with_consecutive_scroll_tick_interval_max(mut self, interval: Duration) -> Self {
        self.layers.overrides.consecutive_scroll_tick_interval_max = Some(interval);
        self
    }

    pub fn with_acceleration_curve(mut self, curve: Curve) -> Self {
        self.layers.overrides.acceleration_curve = Some(curve);
        self
    }
}
