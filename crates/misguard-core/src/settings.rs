//! Persisted client configuration: backend URL, theme and analysis mode.
//!
//! Read once at startup, written only on explicit save/toggle actions.

use std::path::{Path, PathBuf};
use std::str::FromStr;
use std::sync::Mutex;

use serde::{Deserialize, Serialize};

use crate::GuardError;

pub const DEFAULT_BACKEND_URL: &str = "http://localhost:5000";

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ThemeKind {
    #[default]
    Dark,
    Light,
}

impl ThemeKind {
    pub fn toggle(self) -> Self {
        match self {
            Self::Dark => Self::Light,
            Self::Light => Self::Dark,
        }
    }

    pub fn as_str(self) -> &'static str {
        match self {
            Self::Dark => "dark",
            Self::Light => "light",
        }
    }
}

impl FromStr for ThemeKind {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "dark" => Ok(Self::Dark),
            "light" => Ok(Self::Light),
            other => Err(format!("unknown theme '{other}' (expected dark or light)")),
        }
    }
}

/// Resolved settings with defaults applied.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Settings {
    pub backend_url: String,
    pub theme: ThemeKind,
    /// Send submissions to `POST /api/analyze` instead of the built-in mock.
    pub live_analysis: bool,
}

impl Default for Settings {
    fn default() -> Self {
        Self {
            backend_url: DEFAULT_BACKEND_URL.to_string(),
            theme: ThemeKind::Dark,
            live_analysis: false,
        }
    }
}

/// Where settings are read from and written to.
pub trait SettingsStore: Send {
    fn load(&self) -> Settings;
    fn save(&self, settings: &Settings) -> Result<(), GuardError>;
}

/// On-disk TOML configuration structure.
/// All fields are optional so partial configs work (merge with defaults).
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct ConfigFile {
    pub backend: Option<BackendConfig>,
    pub display: Option<DisplayConfig>,
    pub analysis: Option<AnalysisConfig>,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct BackendConfig {
    pub url: Option<String>,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct DisplayConfig {
    pub theme: Option<String>,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct AnalysisConfig {
    pub live: Option<bool>,
}

impl ConfigFile {
    /// Overlay these file values onto `settings`. Empty or invalid values
    /// leave the existing value in place.
    pub fn apply(&self, settings: &mut Settings) {
        if let Some(url) = self.backend.as_ref().and_then(|b| b.url.as_deref())
            && !url.trim().is_empty()
        {
            settings.backend_url = url.trim().to_string();
        }
        if let Some(theme) = self.display.as_ref().and_then(|d| d.theme.as_deref()) {
            match theme.parse() {
                Ok(t) => settings.theme = t,
                Err(e) => tracing::warn!(error = %e, "ignoring theme from config"),
            }
        }
        if let Some(live) = self.analysis.as_ref().and_then(|a| a.live) {
            settings.live_analysis = live;
        }
    }

    pub fn from_settings(settings: &Settings) -> Self {
        Self {
            backend: Some(BackendConfig {
                url: Some(settings.backend_url.clone()),
            }),
            display: Some(DisplayConfig {
                theme: Some(settings.theme.as_str().to_string()),
            }),
            analysis: Some(AnalysisConfig {
                live: Some(settings.live_analysis),
            }),
        }
    }
}

/// Merge two configs: `overlay` values take precedence over `base`.
pub fn merge(base: ConfigFile, overlay: ConfigFile) -> ConfigFile {
    ConfigFile {
        backend: Some(BackendConfig {
            url: overlay
                .backend
                .and_then(|b| b.url)
                .or_else(|| base.backend.and_then(|b| b.url)),
        }),
        display: Some(DisplayConfig {
            theme: overlay
                .display
                .and_then(|d| d.theme)
                .or_else(|| base.display.and_then(|d| d.theme)),
        }),
        analysis: Some(AnalysisConfig {
            live: overlay
                .analysis
                .and_then(|a| a.live)
                .or_else(|| base.analysis.and_then(|a| a.live)),
        }),
    }
}

/// Platform config directory path: `<config_dir>/misguard/config.toml`.
pub fn config_path() -> Option<PathBuf> {
    dirs::config_dir().map(|d| d.join("misguard").join("config.toml"))
}

/// Load a config from a specific path. Returns `None` if the file doesn't
/// exist or can't be parsed.
pub fn load_from_path(path: &Path) -> Option<ConfigFile> {
    let content = std::fs::read_to_string(path).ok()?;
    match toml::from_str(&content) {
        Ok(cfg) => Some(cfg),
        Err(e) => {
            tracing::warn!(path = %path.display(), error = %e, "unreadable config file");
            None
        }
    }
}

/// TOML-backed store. Loads cascade an optional overlay (the working-directory
/// `.misguard.toml`) over `path`; saves write each field to the file it came from.
#[derive(Debug, Clone)]
pub struct FileSettingsStore {
    path: PathBuf,
    overlay: Option<PathBuf>,
}

impl FileSettingsStore {
    pub fn new(path: PathBuf) -> Self {
        Self {
            path,
            overlay: None,
        }
    }

    pub fn with_overlay(mut self, overlay: PathBuf) -> Self {
        self.overlay = Some(overlay);
        self
    }

    /// Platform location with the working-directory overlay.
    pub fn platform() -> Result<Self, GuardError> {
        let path = config_path().ok_or(GuardError::NoConfigDir)?;
        Ok(Self::new(path).with_overlay(PathBuf::from(".misguard.toml")))
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    fn load_file(&self) -> ConfigFile {
        let base = load_from_path(&self.path);
        let overlay = self.overlay.as_deref().and_then(load_from_path);
        match (base, overlay) {
            (None, None) => ConfigFile::default(),
            (Some(b), None) => b,
            (None, Some(o)) => o,
            (Some(b), Some(o)) => merge(b, o),
        }
    }
}

impl SettingsStore for FileSettingsStore {
    fn load(&self) -> Settings {
        let mut settings = Settings::default();
        self.load_file().apply(&mut settings);
        settings
    }

    /// Each field goes back to the file that supplied it: values the overlay
    /// sets are written there, everything else lands in the base file.
    fn save(&self, settings: &Settings) -> Result<(), GuardError> {
        let full = ConfigFile::from_settings(settings);
        let overlay = self
            .overlay
            .as_deref()
            .and_then(|p| load_from_path(p).map(|cfg| (p, cfg)));
        let Some((overlay_path, overlay)) = overlay else {
            return write_config(&self.path, &full);
        };

        let base = load_from_path(&self.path).unwrap_or_default();
        let (base, routed) = route_fields(full, base, &overlay);
        write_config(&self.path, &base)?;
        if routed != overlay {
            write_config(overlay_path, &routed)?;
        }
        Ok(())
    }
}

fn write_config(path: &Path, config: &ConfigFile) -> Result<(), GuardError> {
    if let Some(parent) = path.parent()
        && !parent.as_os_str().is_empty()
    {
        std::fs::create_dir_all(parent)?;
    }
    std::fs::write(path, toml::to_string_pretty(config)?)?;
    tracing::info!(path = %path.display(), "settings saved");
    Ok(())
}

/// Split `full` between the base and overlay files. Fields the overlay sets
/// stay in the overlay; the base keeps its own value for those.
fn route_fields(
    full: ConfigFile,
    base: ConfigFile,
    overlay: &ConfigFile,
) -> (ConfigFile, ConfigFile) {
    fn pick<T>(value: Option<T>, base: Option<T>, shadowed: bool) -> (Option<T>, Option<T>) {
        if shadowed { (base, value) } else { (value, None) }
    }

    let (base_url, overlay_url) = pick(
        full.backend.and_then(|b| b.url),
        base.backend.and_then(|b| b.url),
        overlay.backend.as_ref().is_some_and(|b| b.url.is_some()),
    );
    let (base_theme, overlay_theme) = pick(
        full.display.and_then(|d| d.theme),
        base.display.and_then(|d| d.theme),
        overlay.display.as_ref().is_some_and(|d| d.theme.is_some()),
    );
    let (base_live, overlay_live) = pick(
        full.analysis.and_then(|a| a.live),
        base.analysis.and_then(|a| a.live),
        overlay.analysis.as_ref().is_some_and(|a| a.live.is_some()),
    );

    let build = |url: Option<String>, theme: Option<String>, live: Option<bool>| ConfigFile {
        backend: url.map(|url| BackendConfig { url: Some(url) }),
        display: theme.map(|theme| DisplayConfig { theme: Some(theme) }),
        analysis: live.map(|live| AnalysisConfig { live: Some(live) }),
    };
    (
        build(base_url, base_theme, base_live),
        build(overlay_url, overlay_theme, overlay_live),
    )
}

/// In-memory store for headless use and tests.
#[derive(Debug, Default)]
pub struct MemorySettingsStore {
    inner: Mutex<Settings>,
    writes: Mutex<usize>,
}

impl MemorySettingsStore {
    pub fn new(settings: Settings) -> Self {
        Self {
            inner: Mutex::new(settings),
            writes: Mutex::new(0),
        }
    }

    /// Number of completed `save` calls.
    pub fn writes(&self) -> usize {
        self.writes.lock().map(|w| *w).unwrap_or(0)
    }
}

impl SettingsStore for MemorySettingsStore {
    fn load(&self) -> Settings {
        self.inner
            .lock()
            .map(|s| s.clone())
            .unwrap_or_default()
    }

    fn save(&self, settings: &Settings) -> Result<(), GuardError> {
        if let Ok(mut inner) = self.inner.lock() {
            *inner = settings.clone();
        }
        if let Ok(mut writes) = self.writes.lock() {
            *writes += 1;
        }
        Ok(())
    }
}

impl<S: SettingsStore + Sync> SettingsStore for std::sync::Arc<S> {
    fn load(&self) -> Settings {
        (**self).load()
    }

    fn save(&self, settings: &Settings) -> Result<(), GuardError> {
        (**self).save(settings)
    }
}
