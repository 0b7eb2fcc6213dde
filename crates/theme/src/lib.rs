pub mod colors;

pub use colors::Color;

use kiosk_config::ThemeConfig;
use kiosk_core::MetricKey;

/// Compiled graph colours derived from [`ThemeConfig`].
///
/// Both graphs share one palette: CPU, memory and GPU keep the same colour
/// whether utilization or temperature is plotted. Invalid hex strings fall
/// back to the built-in colours.
#[derive(Debug, Clone, PartialEq)]
pub struct Palette {
    pub cpu:        Color,
    pub mem:        Color,
    pub gpu:        Color,
    pub background: Color,
    pub border:     Color,
}

impl Palette {
    /// Build a [`Palette`] from the config file's `[theme]` section.
    pub fn from_config(cfg: &ThemeConfig) -> Self {
        Self {
            cpu:        parse_or(&cfg.cpu, Color::PINK),
            mem:        parse_or(&cfg.mem, Color::BLUE),
            gpu:        parse_or(&cfg.gpu, Color::YELLOW),
            background: parse_or(&cfg.background, Color::SHADE),
            border:     parse_or(&cfg.border, Color::WHITE),
        }
    }

    /// Line colour for a metric series.
    pub fn series(&self, key: MetricKey) -> Color {
        match key {
            MetricKey::CpuUtil | MetricKey::CpuThermal => self.cpu,
            MetricKey::MemUtil | MetricKey::MemThermal => self.mem,
            MetricKey::GpuUtil | MetricKey::GpuThermal => self.gpu,
        }
    }
}

impl Default for Palette {
    fn default() -> Self {
        Self::from_config(&ThemeConfig::default())
    }
}

fn parse_or(hex: &str, fallback: Color) -> Color {
    Color::from_hex(hex).unwrap_or_else(|| {
        tracing::warn!("invalid colour '{hex}' in theme; using {}", fallback.to_hex());
        fallback
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn cpu_colour_shared_across_groups() {
        let palette = Palette::default();
        assert_eq!(palette.series(MetricKey::CpuUtil), palette.series(MetricKey::CpuThermal));
        assert_eq!(palette.series(MetricKey::GpuThermal), Color::YELLOW);
    }

    #[test]
    fn invalid_hex_falls_back() {
        let cfg = ThemeConfig {
            mem: "not-a-colour".to_string(),
            ..ThemeConfig::default()
        };
        assert_eq!(Palette::from_config(&cfg).mem, Color::BLUE);
    }
}
