//! Modifier-aware configuration resolver.
//!
//! Holds the current settings generation and a per-generation cache of
//! resolved configurations keyed by `(ModifierCombination, Axis)`. Readers grab
//! the generation pointer once per call, so a concurrent reload never mixes
//! values from two generations into one answer.

use std::collections::HashMap;
use std::sync::Arc;

use parking_lot::{Mutex, RwLock};
use tracing::{debug, info};

use crate::display::{DisplayContext, DisplayGeometry};
use crate::error::Result;
use crate::modifiers::{Axis, InputModifier, ModifierCombination};
use crate::overrides;
use crate::resolved::ResolvedConfig;
use crate::settings::{BaseConfig, SettingsSnapshot};

/// Notified after each effective reload
pub trait ConfigObserver: Send + Sync {
    fn scroll_config_changed(&self, config: &Arc<ResolvedConfig>);
}

type CacheKey = (ModifierCombination, Axis);

/// One published set of settings with everything derived from them
struct Generation {
    number: u64,
    snapshot: SettingsSnapshot,
    default: Arc<ResolvedConfig>,
    cache: RwLock<HashMap<CacheKey, Arc<ResolvedConfig>>>,
}

impl Generation {
    fn build(number: u64, snapshot: SettingsSnapshot) -> Result<Self> {
        let base = BaseConfig::from_snapshot(&snapshot)?;
        Ok(Self {
            number,
            snapshot,
            default: Arc::new(ResolvedConfig::from_base(Arc::new(base))),
            cache: RwLock::new(HashMap::new()),
        })
    }
}

pub struct ConfigResolver {
    current: RwLock<Arc<Generation>>,
    display: Arc<dyn DisplayGeometry>,
    observers: RwLock<Vec<Arc<dyn ConfigObserver>>>,
    /// Serializes reloads so generation numbers stay sequential
    reload_lock: Mutex<()>,
}

impl ConfigResolver {
    /// Interpret `snapshot` and start at generation 0
    pub fn new(snapshot: SettingsSnapshot, display: Arc<dyn DisplayGeometry>) -> Result<Self> {
        let generation = Generation::build(0, snapshot)?;
        Ok(Self {
            current: RwLock::new(Arc::new(generation)),
            display,
            observers: RwLock::new(Vec::new()),
            reload_lock: Mutex::new(()),
        })
    }

    /// Replace the settings.
    ///
    /// Returns `Ok(false)` if the snapshot equals the current one. On error the
    /// current generation stays in place.
    pub fn reload(&self, snapshot: SettingsSnapshot) -> Result<bool> {
        let _guard = self.reload_lock.lock();

        let previous = self.current.read().clone();
        if previous.snapshot == snapshot {
            debug!(generation = previous.number, "Settings unchanged, skipping reload");
            return Ok(false);
        }

        let generation = Arc::new(Generation::build(previous.number + 1, snapshot)?);
        let default = generation.default.clone();
        *self.current.write() = generation;

        info!(
            generation = previous.number + 1,
            dropped = previous.cache.read().len(),
            "Reloaded scroll settings"
        );

        let observers = self.observers.read().clone();
        for observer in &observers {
            observer.scroll_config_changed(&default);
        }
        Ok(true)
    }

    /// Configuration for a modifier context.
    ///
    /// Repeated calls with the same key in the same generation return the same
    /// instance.
    pub fn resolve(
        &self,
        modifiers: ModifierCombination,
        axis: Axis,
        context: &DisplayContext,
    ) -> Arc<ResolvedConfig> {
        let generation = self.current.read().clone();
        let key = (modifiers, axis);

        if let Some(hit) = generation.cache.read().get(&key) {
            return hit.clone();
        }

        // Only the default acceleration curve depends on the display
        let display_size = match modifiers.input {
            InputModifier::None => self.display.display_size(context),
            InputModifier::Quick | InputModifier::Precise => None,
        };

        debug!(
            generation = generation.number,
            %modifiers,
            ?axis,
            display = ?display_size,
            "Resolving scroll config"
        );
        let resolved = Arc::new(overrides::apply(&generation.default, modifiers, axis, display_size));

        let stored = generation
            .cache
            .write()
            .entry(key)
            .or_insert(resolved)
            .clone();
        stored
    }

    /// Configuration with no modifiers applied
    pub fn current(&self) -> Arc<ResolvedConfig> {
        self.current.read().default.clone()
    }

    /// Number of effective reloads since construction
    pub fn generation(&self) -> u64 {
        self.current.read().number
    }

    pub fn cached_len(&self) -> usize {
        self.current.read().cache.read().len()
    }

    pub fn subscribe(&self, observer: Arc<dyn ConfigObserver>) {
        self.observers.write().push(observer);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::sync::atomic::{AtomicUsize, Ordering};

    use serde_json::json;

    use crate::display::{DisplaySize, FixedDisplay};
    use crate::modifiers::EffectModifier;
    use crate::preset::AnimationCurvePreset;
    use crate::settings::ScrollSmoothness;

    fn resolver() -> ConfigResolver {
        ConfigResolver::new(
            SettingsSnapshot::defaults(),
            Arc::new(FixedDisplay(DisplaySize::new(1920, 1080))),
        )
        .unwrap()
    }

    fn snapshot(smooth: &str) -> SettingsSnapshot {
        let mut value = SettingsSnapshot::defaults().as_value().clone();
        value["smooth"] = json!(smooth);
        SettingsSnapshot::new(value)
    }

    #[derive(Default)]
    struct CountingObserver {
        calls: AtomicUsize,
    }

    impl ConfigObserver for CountingObserver {
        fn scroll_config_changed(&self, _config: &Arc<ResolvedConfig>) {
            self.calls.fetch_add(1, Ordering::SeqCst);
        }
    }

    #[test]
    fn test_cache_hit_returns_same_instance() {
        let resolver = resolver();
        let quick = ModifierCombination::new(InputModifier::Quick, EffectModifier::None);
        let first = resolver.resolve(quick, Axis::Vertical, &DisplayContext::default());
        let second = resolver.resolve(quick, Axis::Vertical, &DisplayContext::default());
        assert!(Arc::ptr_eq(&first, &second));
        assert_eq!(resolver.cached_len(), 1);

        let other = resolver.resolve(quick, Axis::Horizontal, &DisplayContext::default());
        assert!(!Arc::ptr_eq(&first, &other));
        assert_eq!(resolver.cached_len(), 2);
    }

    #[test]
    fn test_reload_invalidates_cache() {
        let resolver = resolver();
        let before = resolver.resolve(ModifierCombination::NONE, Axis::Vertical, &DisplayContext::default());
        assert_eq!(before.animation_curve_preset(), AnimationCurvePreset::HighInertiaPlusTrackpadSim);

        assert!(resolver.reload(snapshot("off")).unwrap());
        assert_eq!(resolver.generation(), 1);
        assert_eq!(resolver.cached_len(), 0);

        let after = resolver.resolve(ModifierCombination::NONE, Axis::Vertical, &DisplayContext::default());
        assert!(!Arc::ptr_eq(&before, &after));
        assert_eq!(after.animation_curve_preset(), AnimationCurvePreset::NoInertia);
        assert_eq!(resolver.current().base().smoothness, ScrollSmoothness::Off);
    }

    #[test]
    fn test_identical_reload_is_noop() {
        let resolver = resolver();
        let observer = Arc::new(CountingObserver::default());
        resolver.subscribe(observer.clone());

        let cached = resolver.resolve(ModifierCombination::NONE, Axis::Vertical, &DisplayContext::default());
        assert!(!resolver.reload(SettingsSnapshot::defaults()).unwrap());
        assert_eq!(resolver.generation(), 0);
        assert_eq!(observer.calls.load(Ordering::SeqCst), 0);

        let again = resolver.resolve(ModifierCombination::NONE, Axis::Vertical, &DisplayContext::default());
        assert!(Arc::ptr_eq(&cached, &again));
    }

    #[test]
    fn test_invalid_reload_keeps_generation() {
        let resolver = resolver();
        let default = resolver.current();

        let mut broken = SettingsSnapshot::defaults().as_value().clone();
        broken["speed"] = json!(42);
        assert!(resolver.reload(SettingsSnapshot::new(broken)).is_err());

        assert_eq!(resolver.generation(), 0);
        assert!(Arc::ptr_eq(&default, &resolver.current()));
    }

    #[test]
    fn test_observers_notified_once_per_reload() {
        let resolver = resolver();
        let observer = Arc::new(CountingObserver::default());
        resolver.subscribe(observer.clone());

        assert!(resolver.reload(snapshot("regular")).unwrap());
        assert_eq!(observer.calls.load(Ordering::SeqCst), 1);
        assert!(!resolver.reload(snapshot("regular")).unwrap());
        assert_eq!(observer.calls.load(Ordering::SeqCst), 1);
        assert!(resolver.reload(snapshot("high")).unwrap());
        assert_eq!(observer.calls.load(Ordering::SeqCst), 2);
    }

    #[test]
    fn test_display_only_queried_without_input_modifier() {
        struct PanickingDisplay;
        impl DisplayGeometry for PanickingDisplay {
            fn display_size(&self, _context: &DisplayContext) -> Option<DisplaySize> {
                panic!("display queried for an input modifier");
            }
        }

        let resolver = ConfigResolver::new(SettingsSnapshot::defaults(), Arc::new(PanickingDisplay)).unwrap();
        let precise = ModifierCombination::new(InputModifier::Precise, EffectModifier::None);
        let config = resolver.resolve(precise, Axis::Vertical, &DisplayContext::default());
        assert_eq!(config.animation_curve_preset(), AnimationCurvePreset::PreciseScroll);
    }
}
