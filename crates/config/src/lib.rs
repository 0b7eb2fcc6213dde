pub mod schema;
pub mod watcher;

pub use schema::{
    GraphConfig, KioskConfig, ProfilerConfig, RotationConfig, SlotConfig, TelemetryConfig,
    ThemeConfig,
};
pub use watcher::ConfigWatcher;

use kiosk_core::{KioskError, Result};
use std::path::{Path, PathBuf};

/// Load configuration from a TOML file.  Returns `KioskConfig::default()` if
/// the file doesn't exist so the kiosk always has sensible defaults.
pub fn load(path: impl AsRef<Path>) -> Result<KioskConfig> {
    let path = path.as_ref();
    if !path.exists() {
        tracing::warn!(
            "Config file not found at '{}'; using defaults.",
            path.display()
        );
        return Ok(KioskConfig::default());
    }

    let raw = std::fs::read_to_string(path)
        .map_err(|e| KioskError::Config(format!("cannot read '{}': {e}", path.display())))?;

    parse(&raw)
}

/// Parse a TOML document and sanitise out-of-range values.
pub fn parse(raw: &str) -> Result<KioskConfig> {
    let config: KioskConfig =
        toml::from_str(raw).map_err(|e| KioskError::Config(format!("TOML parse error: {e}")))?;
    Ok(sanitize(config))
}

/// Return the default config path, honouring `$XDG_CONFIG_HOME`.
pub fn default_path() -> PathBuf {
    let base = std::env::var("XDG_CONFIG_HOME")
        .map(PathBuf::from)
        .unwrap_or_else(|_| {
            let home = std::env::var("HOME").unwrap_or_else(|_| ".".to_string());
            PathBuf::from(home).join(".config")
        });
    base.join("kiosk").join("kiosk.toml")
}

/// Shortest switch period that still staggers the two demo slots.
pub const MIN_SWITCH_PERIOD_SECS: u32 = 3;

/// Replace values the engines cannot work with by their defaults.
fn sanitize(mut config: KioskConfig) -> KioskConfig {
    let defaults = KioskConfig::default();

    let alpha = config.telemetry.alpha;
    if !(alpha > 0.0 && alpha <= 1.0) {
        tracing::warn!("telemetry.alpha = {alpha} outside (0, 1]; using default");
        config.telemetry.alpha = defaults.telemetry.alpha;
    }
    if config.telemetry.window_secs == 0 {
        tracing::warn!("telemetry.window_secs must be positive; using default");
        config.telemetry.window_secs = defaults.telemetry.window_secs;
    }
    if config.telemetry.capacity == 0 {
        tracing::warn!("telemetry.capacity must be positive; using default");
        config.telemetry.capacity = defaults.telemetry.capacity;
    }
    if config.rotation.switch_period_secs == 0 {
        tracing::warn!("rotation.switch_period_secs must be positive; using default");
        config.rotation.switch_period_secs = defaults.rotation.switch_period_secs;
    } else if config.rotation.switch_period_secs < MIN_SWITCH_PERIOD_SECS {
        tracing::warn!(
            "rotation.switch_period_secs = {} leaves no gap between the slots; using {MIN_SWITCH_PERIOD_SECS}",
            config.rotation.switch_period_secs
        );
        config.rotation.switch_period_secs = MIN_SWITCH_PERIOD_SECS;
    }
    let font = config.graphs.label_font_size;
    if !(font.is_finite() && font > 0.0) {
        tracing::warn!("graphs.label_font_size = {font} is not a usable size; using default");
        config.graphs.label_font_size = defaults.graphs.label_font_size;
    }
    if config.graphs.util_range[0] >= config.graphs.util_range[1] {
        tracing::warn!("graphs.util_range is empty; using default");
        config.graphs.util_range = defaults.graphs.util_range;
    }
    if config.graphs.thermal_range[0] >= config.graphs.thermal_range[1] {
        tracing::warn!("graphs.thermal_range is empty; using default");
        config.graphs.thermal_range = defaults.graphs.thermal_range;
    }

    config
}
