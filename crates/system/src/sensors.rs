//! Readings sysinfo does not cover: GPU load and sensor label matching.

use std::path::Path;

/// Component label fragments (lower-case) per thermal metric, best first.
pub const CPU_SENSOR_LABELS: &[&str] = &["cpu", "package", "tctl", "tdie", "core"];
pub const GPU_SENSOR_LABELS: &[&str] = &["gpu", "edge", "amdgpu", "nvidia", "radeon"];
pub const MEM_SENSOR_LABELS: &[&str] = &["ddr", "dimm", "mem", "spd"];

/// Pick the first temperature whose label matches, trying patterns in
/// priority order.
pub fn match_sensor<'a, I>(readings: I, patterns: &[&str]) -> Option<f64>
where
    I: IntoIterator<Item = (&'a str, Option<f32>)> + Clone,
{
    patterns.iter().find_map(|pattern| {
        readings.clone().into_iter().find_map(|(label, temp)| {
            let temp = temp.filter(|t| t.is_finite() && *t > 0.0)?;
            label
                .to_lowercase()
                .contains(*pattern)
                .then_some(f64::from(temp))
        })
    })
}

/// GPU busy percentage from sysfs, trying the Adreno (kgsl) node first and
/// then any DRM card exposing `gpu_busy_percent` (amdgpu).
///
/// Returns `None` on systems without such a node.
pub fn read_gpu_busy() -> Option<f64> {
    let kgsl = Path::new("/sys/class/kgsl/kgsl-3d0/gpu_busy_percentage");
    if let Some(v) = read_percent(kgsl) {
        return Some(v);
    }

    let cards = std::fs::read_dir("/sys/class/drm").ok()?;
    cards
        .filter_map(Result::ok)
        .map(|entry| entry.path().join("device").join("gpu_busy_percent"))
        .find_map(|path| read_percent(&path))
}

fn read_percent(path: &Path) -> Option<f64> {
    let raw = std::fs::read_to_string(path).ok()?;
    parse_percent(&raw)
}

/// Parse `"42"`, `"42 %"` or `"42%"` into `42.0`.
pub fn parse_percent(raw: &str) -> Option<f64> {
    let token = raw.split_whitespace().next()?.trim_end_matches('%');
    let value = token.parse::<f64>().ok()?;
    value.is_finite().then(|| value.clamp(0.0, 100.0))
}
