pub mod acceleration;
pub mod curve;
pub mod display;
pub mod error;
pub mod modifiers;
pub mod overrides;
pub mod preset;
pub mod resolved;
pub mod resolver;
pub mod settings;

pub use curve::{CappedAccelerationCurve, CubicBezier, Curve, LinearCurve, Point};
pub use display::{DisplayArrangement, DisplayContext, DisplayGeometry, DisplaySize, FixedDisplay};
pub use error::{ConfigError, Error, Result};
pub use modifiers::{Axis, EffectModifier, InputModifier, ModifierCombination};
pub use preset::{AnimationCurveParameters, AnimationCurvePreset, DragCurve};
pub use resolved::{ResolvedConfig, ResolvedConfigBuilder, ScrollInversion};
pub use resolver::{ConfigObserver, ConfigResolver};
pub use settings::{BaseConfig, EventFlags, ScrollSmoothness, ScrollSpeed, SettingsSnapshot};
