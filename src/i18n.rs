use std::sync::Arc;

use anyhow::{Context, Result};
use arc_swap::ArcSwap;
use include_dir::{include_dir, Dir};
use once_cell::sync::OnceCell;
use serde::de::DeserializeOwned;
use serde_json::Value;

use crate::bus::{EventBus, LANGUAGE_CHANGED};
use crate::prefs::Preferences;

static LOCALE_DIR: Dir = include_dir!("$CARGO_MANIFEST_DIR/locales");
static EMBEDDED: OnceCell<Arc<Catalogs>> = OnceCell::new();

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Locale {
    Es,
    En,
    Pt,
}

impl Locale {
    pub const ALL: [Locale; 3] = [Locale::Es, Locale::En, Locale::Pt];
    /// Lookup falls back here before giving up.
    pub const FALLBACK: Locale = Locale::Es;

    pub fn code(self) -> &'static str {
        match self {
            Locale::Es => "es",
            Locale::En => "en",
            Locale::Pt => "pt",
        }
    }

    /// Native display name, locale-independent by design.
    pub fn label(self) -> &'static str {
        match self {
            Locale::Es => "Español",
            Locale::En => "English",
            Locale::Pt => "Português",
        }
    }

    /// Short badge shown on the switcher button.
    pub fn tag(self) -> &'static str {
        match self {
            Locale::Es => "ES",
            Locale::En => "EN",
            Locale::Pt => "PT",
        }
    }

    pub fn from_code(code: &str) -> Option<Self> {
        match code {
            "es" => Some(Locale::Es),
            "en" => Some(Locale::En),
            "pt" => Some(Locale::Pt),
            _ => None,
        }
    }

    fn idx(self) -> usize {
        match self {
            Locale::Es => 0,
            Locale::En => 1,
            Locale::Pt => 2,
        }
    }
}

/// Parsed catalog trees, one per locale. Immutable after load.
pub struct Catalogs {
    trees: [Value; 3],
}

impl Catalogs {
    /// The embedded catalogs, parsed once per process. Calling this again
    /// returns the same instance (idempotent init).
    pub fn embedded() -> Result<Arc<Catalogs>> {
        let catalogs = EMBEDDED.get_or_try_init(|| -> Result<Arc<Catalogs>> {
            let mut trees = Vec::with_capacity(Locale::ALL.len());
            for locale in Locale::ALL {
                let name = format!("{}.json", locale.code());
                let raw = LOCALE_DIR
                    .get_file(&name)
                    .with_context(|| format!("missing embedded catalog {}", name))?
                    .contents_utf8()
                    .with_context(|| format!("catalog {} is not valid UTF-8", name))?;
                let tree: Value = serde_json::from_str(raw)
                    .with_context(|| format!("catalog {} is not valid JSON", name))?;
                trees.push(tree);
            }
            let trees: [Value; 3] = trees
                .try_into()
                .map_err(|_| anyhow::anyhow!("catalog count mismatch"))?;
            log::info!("i18n: loaded {} embedded catalogs", Locale::ALL.len());
            Ok(Arc::new(Catalogs { trees }))
        })?;
        Ok(catalogs.clone())
    }

    /// Build from explicit trees (tests).
    pub fn from_values(es: Value, en: Value, pt: Value) -> Arc<Catalogs> {
        Arc::new(Catalogs { trees: [es, en, pt] })
    }

    fn resolve(&self, locale: Locale, key: &str) -> Option<&Value> {
        let mut node = &self.trees[locale.idx()];
        for part in key.split('.') {
            node = node.get(part)?;
        }
        Some(node)
    }
}

/// Active-locale lookup handle over the shared catalogs.
///
/// Lookup order is active locale, then [`Locale::FALLBACK`], then the raw
/// key itself. Lookups never fail.
pub struct Translator {
    catalogs: Arc<Catalogs>,
    active: ArcSwap<Locale>,
}

impl Translator {
    pub fn new(catalogs: Arc<Catalogs>, initial: Locale) -> Self {
        Self {
            catalogs,
            active: ArcSwap::from_pointee(initial),
        }
    }

    pub fn embedded(initial: Locale) -> Result<Self> {
        Ok(Self::new(Catalogs::embedded()?, initial))
    }

    pub fn active(&self) -> Locale {
        **self.active.load()
    }

    /// Resolve a dot-delimited key to a string.
    pub fn t(&self, key: &str) -> String {
        match self.lookup(key) {
            Some(Value::String(s)) => s.clone(),
            Some(other) => {
                log::warn!("i18n: key {} is not a string ({})", key, kind_of(other));
                key.to_string()
            }
            None => {
                log::warn!("i18n: missing key {}", key);
                key.to_string()
            }
        }
    }

    /// [`Translator::t`] plus `{{name}}` placeholder interpolation.
    pub fn t_args(&self, key: &str, args: &[(&str, String)]) -> String {
        let mut resolved = self.t(key);
        for (name, value) in args {
            resolved = resolved.replace(&format!("{{{{{}}}}}", name), value);
        }
        resolved
    }

    /// Resolve a key to a typed record list (the returnObjects analog).
    /// Missing or mistyped entries yield an empty list, never an error.
    pub fn t_list<T: DeserializeOwned>(&self, key: &str) -> Vec<T> {
        let Some(value) = self.lookup(key) else {
            log::warn!("i18n: missing list key {}", key);
            return Vec::new();
        };
        match serde_json::from_value::<Vec<T>>(value.clone()) {
            Ok(list) => list,
            Err(e) => {
                log::warn!("i18n: list key {} failed to deserialize: {}", key, e);
                Vec::new()
            }
        }
    }

    /// Switch the active locale without side effects (bootstrap, CLI).
    pub fn set_active(&self, locale: Locale) {
        self.active.store(Arc::new(locale));
    }

    /// Switch the active locale, persist it, and publish
    /// [`LANGUAGE_CHANGED`]. Deliberately does NOT recompose anything: the
    /// bus subscriber owns the rebuild. Switching to the current locale is a
    /// no-op and publishes nothing.
    pub fn change_locale(&self, locale: Locale, prefs: &Preferences, bus: &EventBus) {
        if locale == self.active() {
            return;
        }
        self.active.store(Arc::new(locale));
        prefs.set_language(locale);
        bus.publish(
            LANGUAGE_CHANGED,
            serde_json::json!({ "locale": locale.code() }),
        );
        log::info!("i18n: locale -> {}", locale.code());
    }

    fn lookup(&self, key: &str) -> Option<&Value> {
        let active = self.active();
        self.catalogs.resolve(active, key).or_else(|| {
            if active != Locale::FALLBACK {
                self.catalogs.resolve(Locale::FALLBACK, key)
            } else {
                None
            }
        })
    }
}

fn kind_of(value: &Value) -> &'static str {
    match value {
        Value::Null => "null",
        Value::Bool(_) => "bool",
        Value::Number(_) => "number",
        Value::String(_) => "string",
        Value::Array(_) => "array",
        Value::Object(_) => "object",
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde::Deserialize;
    use serde_json::json;

    fn fixture() -> Arc<Catalogs> {
        Catalogs::from_values(
            json!({
                "greet": "hola",
                "only_es": "solo español",
                "nested": { "deep": "fondo" },
                "count": "{{n}} mensajes",
                "items": [ {"name": "uno", "year": "2020"} ]
            }),
            json!({
                "greet": "hello",
                "nested": { "deep": "bottom" },
                "count": "{{n}} messages",
                "items": [ {"name": "one", "year": "2020"} ]
            }),
            json!({
                "greet": "olá"
            }),
        )
    }

    #[derive(Debug, Deserialize, PartialEq)]
    struct Item {
        name: String,
        year: String,
    }

    #[test]
    fn resolves_in_active_locale() {
        let t = Translator::new(fixture(), Locale::En);
        assert_eq!(t.t("greet"), "hello");
        assert_eq!(t.t("nested.deep"), "bottom");
    }

    #[test]
    fn falls_back_to_default_locale() {
        let t = Translator::new(fixture(), Locale::En);
        assert_eq!(t.t("only_es"), "solo español");

        // pt is missing nearly everything; es fills in
        let t = Translator::new(fixture(), Locale::Pt);
        assert_eq!(t.t("nested.deep"), "fondo");
    }

    #[test]
    fn missing_everywhere_returns_raw_key() {
        let t = Translator::new(fixture(), Locale::Es);
        assert_eq!(t.t("no.such.key"), "no.such.key");
    }

    #[test]
    fn interpolates_named_placeholders() {
        let t = Translator::new(fixture(), Locale::En);
        assert_eq!(
            t.t_args("count", &[("n", "3".to_string())]),
            "3 messages"
        );
    }

    #[test]
    fn typed_lists_deserialize() {
        let t = Translator::new(fixture(), Locale::En);
        let items: Vec<Item> = t.t_list("items");
        assert_eq!(
            items,
            vec![Item {
                name: "one".into(),
                year: "2020".into()
            }]
        );
    }

    #[test]
    fn mistyped_list_yields_empty() {
        let t = Translator::new(fixture(), Locale::Es);
        let items: Vec<Item> = t.t_list("greet");
        assert!(items.is_empty());
    }

    #[test]
    fn set_active_switches_resolution() {
        let t = Translator::new(fixture(), Locale::Es);
        assert_eq!(t.t("greet"), "hola");
        t.set_active(Locale::Pt);
        assert_eq!(t.t("greet"), "olá");
    }
}
