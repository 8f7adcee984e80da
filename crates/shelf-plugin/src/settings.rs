// SPDX-FileCopyrightText: 2026 Shelf Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Plugin settings resolution.
//!
//! Each settings type is bound from the configuration section named after it.
//! When the section is missing or does not bind, the type's generated default
//! is used instead. Settings are resolved once per type and shared by every
//! capability that declares them.

use std::fmt;
use std::sync::Arc;

use figment::Figment;
use shelf_core::{NamedSettings, PluginSettings, ShelfError};
use tracing::{error, info, warn};

use crate::module::SettingsValue;

/// How a settings record was obtained.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SettingsOrigin {
    /// Bound from a configuration section.
    Configured,
    /// Generated because the section was absent or failed to bind.
    Generated,
}

impl fmt::Display for SettingsOrigin {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            SettingsOrigin::Configured => write!(f, "configured"),
            SettingsOrigin::Generated => write!(f, "generated"),
        }
    }
}

/// A resolved settings record, viewable both as its contract and as its concrete type.
#[derive(Clone)]
pub struct ResolvedSettings {
    section: &'static str,
    origin: SettingsOrigin,
    record: Arc<dyn PluginSettings>,
    value: SettingsValue,
}

impl ResolvedSettings {
    pub fn new<S: NamedSettings>(settings: S, origin: SettingsOrigin) -> Self {
        let shared = Arc::new(settings);
        Self {
            section: S::SECTION,
            origin,
            record: shared.clone(),
            value: shared,
        }
    }

    pub fn section(&self) -> &'static str {
        self.section
    }

    pub fn origin(&self) -> SettingsOrigin {
        self.origin
    }

    /// The record through its settings contract.
    pub fn record(&self) -> &dyn PluginSettings {
        self.record.as_ref()
    }

    /// Run the record's own checks, appending problems to `errors`.
    pub fn verify(&self, errors: &mut Vec<String>) -> bool {
        self.record.verify(errors)
    }

    /// The type-erased value handed to capability constructors.
    pub fn value(&self) -> SettingsValue {
        Arc::clone(&self.value)
    }

    /// The record as its concrete type, if it is an `S`.
    pub fn downcast<S: NamedSettings>(&self) -> Option<Arc<S>> {
        self.value().downcast::<S>().ok()
    }
}

impl fmt::Debug for ResolvedSettings {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("ResolvedSettings")
            .field("section", &self.section)
            .field("origin", &self.origin)
            .field("record", &self.record)
            .finish()
    }
}

type BindFn = fn(&Figment) -> Result<ResolvedSettings, figment::Error>;
type GenerateFn = fn() -> Result<ResolvedSettings, ShelfError>;

/// How to bind and generate one settings type, captured without generics.
#[derive(Clone, Copy)]
pub struct SettingsSpec {
    section: &'static str,
    bind: BindFn,
    generate: GenerateFn,
}

impl SettingsSpec {
    pub fn of<S: NamedSettings>() -> Self {
        Self {
            section: S::SECTION,
            bind: bind_section::<S>,
            generate: generate_default::<S>,
        }
    }

    /// Configuration section the settings are bound from.
    pub fn section(&self) -> &'static str {
        self.section
    }
}

impl fmt::Debug for SettingsSpec {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("SettingsSpec")
            .field("section", &self.section)
            .finish()
    }
}

fn bind_section<S: NamedSettings>(figment: &Figment) -> Result<ResolvedSettings, figment::Error> {
    let settings: S = figment.extract_inner(S::SECTION)?;
    Ok(ResolvedSettings::new(settings, SettingsOrigin::Configured))
}

fn generate_default<S: NamedSettings>() -> Result<ResolvedSettings, ShelfError> {
    S::generate().map(|settings| ResolvedSettings::new(settings, SettingsOrigin::Generated))
}

/// Resolved settings, keyed by section, in resolution order.
#[derive(Debug, Clone, Default)]
pub struct SettingsStore {
    entries: Vec<ResolvedSettings>,
}

impl SettingsStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// Insert a record unless its section is already present.
    pub fn insert(&mut self, settings: ResolvedSettings) -> bool {
        if self.contains(settings.section()) {
            return false;
        }
        self.entries.push(settings);
        true
    }

    pub fn contains(&self, section: &str) -> bool {
        self.get(section).is_some()
    }

    pub fn get(&self, section: &str) -> Option<&ResolvedSettings> {
        self.entries.iter().find(|s| s.section() == section)
    }

    /// The settings of type `S`, if registered.
    pub fn get_typed<S: NamedSettings>(&self) -> Option<Arc<S>> {
        self.get(S::SECTION).and_then(|s| s.downcast::<S>())
    }

    pub fn iter(&self) -> impl Iterator<Item = &ResolvedSettings> {
        self.entries.iter()
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}

/// Binds settings sections out of the merged configuration.
pub struct SettingsResolver<'a> {
    figment: &'a Figment,
}

impl<'a> SettingsResolver<'a> {
    pub fn new(figment: &'a Figment) -> Self {
        Self { figment }
    }

    /// Resolve one settings type.
    ///
    /// Returns `None` only when the section could not be used and no default
    /// could be generated; capabilities declaring it are then built without
    /// settings. `verify` is never called here.
    pub fn resolve(&self, spec: &SettingsSpec) -> Option<ResolvedSettings> {
        let section = spec.section();

        if self.figment.contains(section) {
            match (spec.bind)(self.figment) {
                Ok(settings) => {
                    info!(
                        section,
                        settings = ?settings.record(),
                        "plugin settings loaded from configuration"
                    );
                    return Some(settings);
                }
                Err(e) => {
                    let err = ShelfError::SettingsBind {
                        section: section.to_string(),
                        message: e.to_string(),
                    };
                    warn!(error = %err, "falling back to generated settings");
                }
            }
        }

        match (spec.generate)() {
            Ok(settings) => {
                info!(
                    section,
                    settings = ?settings.record(),
                    "no usable settings section, generated defaults"
                );
                Some(settings)
            }
            Err(e) => {
                error!(section, error = %e, "cannot generate default plugin settings");
                None
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::test_support::{BrokenSettings, EchoSettings};
    use figment::providers::{Format, Toml};

    fn figment(toml: &str) -> Figment {
        Figment::new().merge(Toml::string(toml))
    }

    #[test]
    fn present_section_is_bound() {
        let figment = figment("[EchoSettings]\nprefix = \"configured\"\n");
        let resolved = SettingsResolver::new(&figment)
            .resolve(&SettingsSpec::of::<EchoSettings>())
            .unwrap();

        assert_eq!(resolved.origin(), SettingsOrigin::Configured);
        assert_eq!(resolved.downcast::<EchoSettings>().unwrap().prefix, "configured");
    }

    #[test]
    fn absent_section_generates_default() {
        let figment = figment("[OtherSettings]\nprefix = \"x\"\n");
        let resolved = SettingsResolver::new(&figment)
            .resolve(&SettingsSpec::of::<EchoSettings>())
            .unwrap();

        assert_eq!(resolved.origin(), SettingsOrigin::Generated);
        assert_eq!(resolved.downcast::<EchoSettings>().unwrap().prefix, "echo");
    }

    #[tracing_test::traced_test]
    #[test]
    fn unbindable_section_falls_back_with_warning() {
        let figment = figment("[EchoSettings]\nprefix = [1, 2]\n");
        let resolved = SettingsResolver::new(&figment)
            .resolve(&SettingsSpec::of::<EchoSettings>())
            .unwrap();

        assert_eq!(resolved.origin(), SettingsOrigin::Generated);
        assert!(logs_contain("falling back to generated settings"));
    }

    #[tracing_test::traced_test]
    #[test]
    fn failed_generation_leaves_settings_unresolved() {
        let figment = figment("");
        let resolved = SettingsResolver::new(&figment).resolve(&SettingsSpec::of::<BrokenSettings>());

        assert!(resolved.is_none());
        assert!(logs_contain("cannot generate default plugin settings"));
    }

    #[test]
    fn resolution_never_verifies() {
        // An empty prefix fails verification but still resolves.
        let figment = figment("[EchoSettings]\nprefix = \"\"\n");
        let resolved = SettingsResolver::new(&figment)
            .resolve(&SettingsSpec::of::<EchoSettings>())
            .unwrap();

        let mut errors = Vec::new();
        assert!(!resolved.verify(&mut errors));
        assert_eq!(errors.len(), 1);
    }

    #[test]
    fn store_keeps_first_record_per_section() {
        let mut store = SettingsStore::new();
        assert!(store.insert(ResolvedSettings::new(
            EchoSettings { prefix: "first".into() },
            SettingsOrigin::Configured,
        )));
        assert!(!store.insert(ResolvedSettings::new(
            EchoSettings { prefix: "second".into() },
            SettingsOrigin::Generated,
        )));

        assert_eq!(store.len(), 1);
        assert_eq!(store.get_typed::<EchoSettings>().unwrap().prefix, "first");
        assert!(store.get("Missing").is_none());
    }
}
