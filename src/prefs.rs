use std::fs;
use std::path::PathBuf;
use std::sync::Mutex;

use serde::{Deserialize, Serialize};

use crate::i18n::Locale;
use crate::theme::ThemeMode;

#[derive(Debug, Default, Clone, Serialize, Deserialize)]
struct PrefFile {
    #[serde(skip_serializing_if = "Option::is_none")]
    language: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    theme: Option<String>,
}

/// Persisted user preferences (language, theme).
///
/// Loading never fails and writes never surface errors to the caller: a
/// missing or unwritable backing file degrades to an in-memory store so the
/// running session keeps its values either way.
pub struct Preferences {
    path: Option<PathBuf>,
    cached: Mutex<PrefFile>,
}

impl Preferences {
    /// Load from the user config dir (`<config>/termfolio/config.toml`).
    pub fn load() -> Self {
        match Self::default_path() {
            Some(path) => Self::from_path(path),
            None => {
                log::warn!("prefs: no config directory available, running in-memory");
                Self::in_memory()
            }
        }
    }

    /// Store that never touches disk. Also the degraded mode.
    pub fn in_memory() -> Self {
        Self {
            path: None,
            cached: Mutex::new(PrefFile::default()),
        }
    }

    /// Load from an explicit file path.
    pub fn from_path(path: PathBuf) -> Self {
        let cached = match fs::read_to_string(&path) {
            Ok(raw) => match toml::from_str::<PrefFile>(&raw) {
                Ok(parsed) => parsed,
                Err(e) => {
                    log::warn!("prefs: unreadable {}: {}, using defaults", path.display(), e);
                    PrefFile::default()
                }
            },
            Err(_) => PrefFile::default(),
        };
        Self {
            path: Some(path),
            cached: Mutex::new(cached),
        }
    }

    fn default_path() -> Option<PathBuf> {
        dirs::config_dir().map(|dir| dir.join("termfolio").join("config.toml"))
    }

    pub fn language(&self) -> Locale {
        self.cached
            .lock()
            .unwrap()
            .language
            .as_deref()
            .and_then(Locale::from_code)
            .unwrap_or(Locale::FALLBACK)
    }

    pub fn theme(&self) -> ThemeMode {
        self.cached
            .lock()
            .unwrap()
            .theme
            .as_deref()
            .and_then(ThemeMode::from_code)
            .unwrap_or(ThemeMode::Dark)
    }

    pub fn set_language(&self, locale: Locale) {
        let snapshot = {
            let mut cached = self.cached.lock().unwrap();
            cached.language = Some(locale.code().to_string());
            cached.clone()
        };
        self.persist(&snapshot);
    }

    pub fn set_theme(&self, mode: ThemeMode) {
        let snapshot = {
            let mut cached = self.cached.lock().unwrap();
            cached.theme = Some(mode.code().to_string());
            cached.clone()
        };
        self.persist(&snapshot);
    }

    /// Write-through. Failure is a warn-level no-op, never an error.
    fn persist(&self, snapshot: &PrefFile) {
        let Some(path) = &self.path else {
            return;
        };
        let rendered = match toml::to_string_pretty(snapshot) {
            Ok(r) => r,
            Err(e) => {
                log::warn!("prefs: serialize failed: {}", e);
                return;
            }
        };
        if let Some(parent) = path.parent() {
            if let Err(e) = fs::create_dir_all(parent) {
                log::warn!("prefs: cannot create {}: {}", parent.display(), e);
                return;
            }
        }
        if let Err(e) = fs::write(path, rendered) {
            log::warn!("prefs: write failed for {}: {}", path.display(), e);
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::sync::atomic::{AtomicU32, Ordering};

    static COUNTER: AtomicU32 = AtomicU32::new(0);

    fn scratch_path() -> PathBuf {
        let n = COUNTER.fetch_add(1, Ordering::SeqCst);
        std::env::temp_dir().join(format!(
            "termfolio-prefs-{}-{}.toml",
            std::process::id(),
            n
        ))
    }

    #[test]
    fn defaults_when_file_missing() {
        let prefs = Preferences::from_path(scratch_path());
        assert_eq!(prefs.language(), Locale::Es);
        assert_eq!(prefs.theme(), ThemeMode::Dark);
    }

    #[test]
    fn round_trips_both_keys() {
        let path = scratch_path();
        {
            let prefs = Preferences::from_path(path.clone());
            prefs.set_language(Locale::Pt);
            prefs.set_theme(ThemeMode::Light);
        }
        let reloaded = Preferences::from_path(path.clone());
        assert_eq!(reloaded.language(), Locale::Pt);
        assert_eq!(reloaded.theme(), ThemeMode::Light);
        let _ = fs::remove_file(path);
    }

    #[test]
    fn corrupt_file_falls_back_to_defaults() {
        let path = scratch_path();
        fs::write(&path, "language = [not toml").unwrap();
        let prefs = Preferences::from_path(path.clone());
        assert_eq!(prefs.language(), Locale::Es);
        let _ = fs::remove_file(path);
    }

    #[test]
    fn unknown_stored_values_fall_back() {
        let path = scratch_path();
        fs::write(&path, "language = \"fr\"\ntheme = \"sepia\"\n").unwrap();
        let prefs = Preferences::from_path(path.clone());
        assert_eq!(prefs.language(), Locale::Es);
        assert_eq!(prefs.theme(), ThemeMode::Dark);
        let _ = fs::remove_file(path);
    }

    #[test]
    fn in_memory_setters_keep_session_values() {
        let prefs = Preferences::in_memory();
        prefs.set_language(Locale::En);
        prefs.set_theme(ThemeMode::System);
        assert_eq!(prefs.language(), Locale::En);
        assert_eq!(prefs.theme(), ThemeMode::System);
    }
}
