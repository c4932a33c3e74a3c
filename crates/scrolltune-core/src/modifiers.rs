//! Modifier context that selects a resolved configuration.

use std::fmt;
use std::str::FromStr;

use crate::error::ConfigError;

/// Modifier that changes how input is interpreted
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash)]
pub enum InputModifier {
    #[default]
    None,
    Quick,
    Precise,
}

/// Modifier that changes what scrolling does
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash)]
pub enum EffectModifier {
    #[default]
    None,
    HorizontalScroll,
    Zoom,
    Rotate,
    CommandTab,
    ThreeFingerSwipeHorizontal,
    FourFingerPinch,
    AddModeFeedback,
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash)]
pub struct ModifierCombination {
    pub input: InputModifier,
    pub effect: EffectModifier,
}

impl ModifierCombination {
    pub const NONE: ModifierCombination = ModifierCombination {
        input: InputModifier::None,
        effect: EffectModifier::None,
    };

    pub fn new(input: InputModifier, effect: EffectModifier) -> Self {
        Self { input, effect }
    }
}

impl fmt::Display for ModifierCombination {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}+{}", self.input.as_str(), self.effect.as_str())
    }
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash)]
pub enum Axis {
    Horizontal,
    #[default]
    Vertical,
}

impl InputModifier {
    pub const ALL: [InputModifier; 3] = [Self::None, Self::Quick, Self::Precise];

    pub fn as_str(&self) -> &'static str {
        match self {
            Self::None => "none",
            Self::Quick => "quick",
            Self::Precise => "precise",
        }
    }
}

impl EffectModifier {
    pub const ALL: [EffectModifier; 8] = [
        Self::None,
        Self::HorizontalScroll,
        Self::Zoom,
        Self::Rotate,
        Self::CommandTab,
        Self::ThreeFingerSwipeHorizontal,
        Self::FourFingerPinch,
        Self::AddModeFeedback,
    ];

    pub fn as_str(&self) -> &'static str {
        match self {
            Self::None => "none",
            Self::HorizontalScroll => "horizontal_scroll",
            Self::Zoom => "zoom",
            Self::Rotate => "rotate",
            Self::CommandTab => "command_tab",
            Self::ThreeFingerSwipeHorizontal => "three_finger_swipe_horizontal",
            Self::FourFingerPinch => "four_finger_pinch",
            Self::AddModeFeedback => "add_mode_feedback",
        }
    }
}

impl Axis {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Horizontal => "horizontal",
            Self::Vertical => "vertical",
        }
    }
}

impl FromStr for InputModifier {
    type Err = ConfigError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::ALL
            .into_iter()
            .find(|m| m.as_str() == s)
            .ok_or_else(|| invalid("input_modifier", s))
    }
}

impl FromStr for EffectModifier {
    type Err = ConfigError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::ALL
            .into_iter()
            .find(|m| m.as_str() == s)
            .ok_or_else(|| invalid("effect_modifier", s))
    }
}

impl FromStr for Axis {
    type Err = ConfigError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "horizontal" => Ok(Self::Horizontal),
            "vertical" => Ok(Self::Vertical),
            other => Err(invalid("axis", other)),
        }
    }
}

fn invalid(key: &str, value: &str) -> ConfigError {
    ConfigError::InvalidValue {
        key: key.to_string(),
        value: value.to_string(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashSet;

    #[test]
    fn test_combinations_are_distinct_keys() {
        let mut keys = HashSet::new();
        for input in InputModifier::ALL {
            for effect in EffectModifier::ALL {
                for axis in [Axis::Horizontal, Axis::Vertical] {
                    assert!(keys.insert((ModifierCombination::new(input, effect), axis)));
                }
            }
        }
        assert_eq!(keys.len(), 3 * 8 * 2);
    }

    #[test]
    fn test_parse() {
        assert_eq!("quick".parse::<InputModifier>().unwrap(), InputModifier::Quick);
        assert_eq!(
            "four_finger_pinch".parse::<EffectModifier>().unwrap(),
            EffectModifier::FourFingerPinch
        );
        assert_eq!("horizontal".parse::<Axis>().unwrap(), Axis::Horizontal);
        assert!("diagonal".parse::<Axis>().is_err());
    }

    #[test]
    fn test_display() {
        let combo = ModifierCombination::new(InputModifier::Precise, EffectModifier::Zoom);
        assert_eq!(combo.to_string(), "precise+zoom");
        assert_eq!(ModifierCombination::default(), ModifierCombination::NONE);
    }
}
