use std::sync::Arc;
use std::thread;

use scrolltune_core::{
    Axis, ConfigResolver, DisplayArrangement, DisplayContext, DisplaySize, EffectModifier,
    InputModifier, ModifierCombination, SettingsSnapshot,
};
use serde_json::json;

fn arrangement() -> DisplayArrangement {
    DisplayArrangement::new()
        .with_display(0.0, 0.0, DisplaySize::new(1920, 1080))
        .with_display(1920.0, 0.0, DisplaySize::new(3840, 2160))
}

fn all_keys() -> Vec<(ModifierCombination, Axis)> {
    let mut keys = Vec::new();
    for input in InputModifier::ALL {
        for effect in EffectModifier::ALL {
            for axis in [Axis::Vertical, Axis::Horizontal] {
                keys.push((ModifierCombination::new(input, effect), axis));
            }
        }
    }
    keys
}

fn with_speed(speed: &str) -> SettingsSnapshot {
    let mut value = SettingsSnapshot::defaults().as_value().clone();
    value["speed"] = json!(speed);
    SettingsSnapshot::new(value)
}

#[test]
fn test_concurrent_resolve_shares_instances() {
    let resolver = Arc::new(ConfigResolver::new(SettingsSnapshot::defaults(), Arc::new(arrangement())).unwrap());
    let keys = all_keys();

    let handles: Vec<_> = (0..8)
        .map(|_| {
            let resolver = resolver.clone();
            let keys = keys.clone();
            thread::spawn(move || {
                keys.iter()
                    .map(|(modifiers, axis)| resolver.resolve(*modifiers, *axis, &DisplayContext::at(10.0, 10.0)))
                    .collect::<Vec<_>>()
            })
        })
        .collect();

    let results: Vec<_> = handles.into_iter().map(|h| h.join().unwrap()).collect();
    assert_eq!(resolver.cached_len(), keys.len());

    // Every thread ended up with the instance that won the cache insert
    for (i, (modifiers, axis)) in keys.iter().enumerate() {
        let cached = resolver.resolve(*modifiers, *axis, &DisplayContext::at(10.0, 10.0));
        for thread_results in &results {
            assert!(Arc::ptr_eq(&thread_results[i], &cached));
        }
    }
}

#[test]
fn test_resolve_during_reload_sees_one_generation() {
    let resolver = Arc::new(ConfigResolver::new(with_speed("low"), Arc::new(arrangement())).unwrap());

    let reader = {
        let resolver = resolver.clone();
        thread::spawn(move || {
            for _ in 0..500 {
                let config = resolver.resolve(ModifierCombination::NONE, Axis::Vertical, &DisplayContext::default());
                // Low tier starts at 30 px, high tier at 90 px under high inertia
                let start = config.acceleration_curve().evaluate(1.0);
                assert!(
                    (start - 30.0).abs() < 1e-9 || (start - 90.0).abs() < 1e-9,
                    "mixed generation: {start}"
                );
            }
        })
    };

    for i in 0..50 {
        let speed = if i % 2 == 0 { "high" } else { "low" };
        assert!(resolver.reload(with_speed(speed)).unwrap());
    }
    reader.join().unwrap();
    assert_eq!(resolver.generation(), 50);
}

#[test]
fn test_resolution_is_deterministic() {
    let first = ConfigResolver::new(SettingsSnapshot::defaults(), Arc::new(arrangement())).unwrap();
    let second = ConfigResolver::new(SettingsSnapshot::defaults(), Arc::new(arrangement())).unwrap();

    // Read some values on the first resolver in a different order
    for (modifiers, axis) in all_keys().into_iter().rev() {
        let config = first.resolve(modifiers, axis, &DisplayContext::at(2000.0, 100.0));
        let _ = config.fast_scroll_speedup();
    }

    for (modifiers, axis) in all_keys() {
        let a = first.resolve(modifiers, axis, &DisplayContext::at(2000.0, 100.0));
        let b = second.resolve(modifiers, axis, &DisplayContext::at(2000.0, 100.0));
        assert_eq!(*a, *b, "{modifiers} {axis:?}");
        assert_eq!(a.acceleration_curve(), b.acceleration_curve());
        assert_eq!(a.animation_curve_params(), b.animation_curve_params());
    }
}

#[test]
fn test_display_under_pointer_scales_default_curve() {
    let resolver = ConfigResolver::new(SettingsSnapshot::defaults(), Arc::new(arrangement())).unwrap();
    let config = resolver.resolve(ModifierCombination::NONE, Axis::Vertical, &DisplayContext::at(2000.0, 100.0));
    // Tall display adds to the end rate only
    assert_eq!(config.acceleration_curve(), &config.standard_acceleration_curve(2160));
    assert!((config.acceleration_curve().evaluate(1.0) - 60.0).abs() < 1e-9);
}
