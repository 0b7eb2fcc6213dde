use serde::Serialize;

/// Normalised RGBA colour (each channel in `[0.0, 1.0]`).
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct Color {
    pub r: f32,
    pub g: f32,
    pub b: f32,
    pub a: f32,
}

impl Color {
    pub const PINK:   Self = Self::from_rgb8(0xfe, 0x00, 0xa2);
    pub const BLUE:   Self = Self::from_rgb8(0x00, 0xa5, 0xe5);
    pub const YELLOW: Self = Self::from_rgb8(0xf8, 0xb6, 0x00);
    pub const WHITE:  Self = Self::from_rgb8(0xff, 0xff, 0xff);
    /// Translucent charcoal behind the graphs.
    pub const SHADE:  Self = Self { r: 23.0 / 255.0, g: 23.0 / 255.0, b: 23.0 / 255.0, a: 0.8 };

    pub const fn from_rgb8(r: u8, g: u8, b: u8) -> Self {
        Self {
            r: r as f32 / 255.0,
            g: g as f32 / 255.0,
            b: b as f32 / 255.0,
            a: 1.0,
        }
    }

    /// Parse `#RRGGBB` or `#RRGGBBAA` (leading `#` optional).
    pub fn from_hex(hex: &str) -> Option<Self> {
        let digits = hex.trim().trim_start_matches('#');
        if !matches!(digits.len(), 6 | 8) || !digits.chars().all(|c| c.is_ascii_hexdigit()) {
            return None;
        }
        let packed = u32::from_str_radix(digits, 16).ok()?;
        let [r, g, b, a] = if digits.len() == 6 {
            let [_, r, g, b] = packed.to_be_bytes();
            [r, g, b, 0xff]
        } else {
            packed.to_be_bytes()
        };

        Some(Self::from_rgb8(r, g, b).with_alpha(f32::from(a) / 255.0))
    }

    /// `#rrggbbaa` form, as consumed by most drawing back-ends.
    pub fn to_hex(self) -> String {
        let q = |c: f32| (c.clamp(0.0, 1.0) * 255.0).round() as u8;
        format!("#{:02x}{:02x}{:02x}{:02x}", q(self.r), q(self.g), q(self.b), q(self.a))
    }

    /// Return a copy with the alpha channel set to `alpha`.
    #[inline]
    #[must_use]
    pub fn with_alpha(mut self, alpha: f32) -> Self {
        self.a = alpha.clamp(0.0, 1.0);
        self
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parses_rgb_and_rgba() {
        assert_eq!(Color::from_hex("#fe00a2"), Some(Color::PINK));
        let shade = Color::from_hex("171717cc").unwrap();
        assert_eq!(shade.to_hex(), "#171717cc");
    }

    #[test]
    fn rejects_garbage() {
        assert_eq!(Color::from_hex("#12345"), None);
        assert_eq!(Color::from_hex("#gggggg"), None);
        assert_eq!(Color::from_hex(""), None);
    }
}
