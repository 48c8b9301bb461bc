use serde::{Deserialize, Deserializer, Serialize, de};
use std::hash::{Hash, Hasher};

fn default_one() -> f32 {
    1.0
}

fn is_one(num: &f32) -> bool {
    *num == 1.0
}

/// An sRGB color with a unit alpha channel.
///
/// Deserializes from either a hex string (`#RGB`, `#RRGGBB`, `#RRGGBBAA`) or
/// an `{ r, g, b, a }` map. Theme panels append a two-digit hex alpha to a
/// base color to produce translucent accent washes, so the 8-digit form is
/// accepted everywhere a color is parsed.
#[derive(Serialize, Debug, Clone, Copy, PartialEq)]
pub struct Color {
    pub r: u8,
    pub g: u8,
    pub b: u8,
    #[serde(skip_serializing_if = "is_one", default = "default_one")]
    pub a: f32,
}

impl Eq for Color {}

impl Hash for Color {
    fn hash<H: Hasher>(&self, state: &mut H) {
        self.r.hash(state);
        self.g.hash(state);
        self.b.hash(state);
        self.a.to_bits().hash(state);
    }
}

impl Default for Color {
    fn default() -> Self {
        Self { r: 0, g: 0, b: 0, a: 1.0 }
    }
}

impl Color {
    pub const WHITE: Color = Color { r: 255, g: 255, b: 255, a: 1.0 };
    pub const BLACK: Color = Color { r: 0, g: 0, b: 0, a: 1.0 };

    pub fn rgb(r: u8, g: u8, b: u8) -> Self {
        Self { r, g, b, a: 1.0 }
    }

    pub fn gray(value: u8) -> Self {
        Self { r: value, g: value, b: value, a: 1.0 }
    }

    /// Returns the same color with a different alpha.
    pub fn with_alpha(self, a: f32) -> Self {
        Self { a: a.clamp(0.0, 1.0), ..self }
    }

    pub fn is_opaque(&self) -> bool {
        self.a >= 1.0
    }

    /// Parse a hex color string (#RGB, #RRGGBB or #RRGGBBAA format).
    pub fn parse_hex(s: &str) -> Result<Color, String> {
        let s = s.trim();
        if !s.starts_with('#') {
            return Err(format!("Color must start with #, got: {}", s));
        }
        let hex = &s[1..];

        let component = |range: &str, name: &str| {
            u8::from_str_radix(range, 16).map_err(|e| format!("Invalid {} component: {}", name, e))
        };

        match hex.len() {
            3 => {
                // #RGB format - expand each digit
                let r = component(&hex[0..1].repeat(2), "red")?;
                let g = component(&hex[1..2].repeat(2), "green")?;
                let b = component(&hex[2..3].repeat(2), "blue")?;
                Ok(Color { r, g, b, a: 1.0 })
            }
            6 => {
                let r = component(&hex[0..2], "red")?;
                let g = component(&hex[2..4], "green")?;
                let b = component(&hex[4..6], "blue")?;
                Ok(Color { r, g, b, a: 1.0 })
            }
            8 => {
                let r = component(&hex[0..2], "red")?;
                let g = component(&hex[2..4], "green")?;
                let b = component(&hex[4..6], "blue")?;
                let a = component(&hex[6..8], "alpha")?;
                Ok(Color { r, g, b, a: a as f32 / 255.0 })
            }
            _ => Err(format!(
                "Invalid hex color length: expected 3, 6 or 8, got {}",
                hex.len()
            )),
        }
    }

    /// Formats as `#RRGGBB`, dropping the alpha channel.
    pub fn to_hex(&self) -> String {
        format!("#{:02x}{:02x}{:02x}", self.r, self.g, self.b)
    }
}

impl<'de> Deserialize<'de> for Color {
    fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
    where
        D: Deserializer<'de>,
    {
        #[derive(Deserialize)]
        #[serde(untagged)]
        enum ColorDef {
            Str(String),
            Map {
                r: u8,
                g: u8,
                b: u8,
                #[serde(default = "default_one")]
                a: f32,
            },
        }

        match ColorDef::deserialize(deserializer)? {
            ColorDef::Str(s) => Self::parse_hex(&s).map_err(de::Error::custom),
            ColorDef::Map { r, g, b, a } => Ok(Color { r, g, b, a }),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_hex_short() {
        let c = Color::parse_hex("#fa0").unwrap();
        assert_eq!((c.r, c.g, c.b), (0xff, 0xaa, 0x00));
        assert!(c.is_opaque());
    }

    #[test]
    fn test_parse_hex_full() {
        let c = Color::parse_hex("#10b981").unwrap();
        assert_eq!((c.r, c.g, c.b), (0x10, 0xb9, 0x81));
    }

    #[test]
    fn test_parse_hex_with_alpha_suffix() {
        // "#f0f4f8" + "20" is how accent washes are written in themes.
        let c = Color::parse_hex("#f0f4f820").unwrap();
        assert_eq!((c.r, c.g, c.b), (0xf0, 0xf4, 0xf8));
        assert!((c.a - 0x20 as f32 / 255.0).abs() < 1e-6);
    }

    #[test]
    fn test_parse_hex_rejects_garbage() {
        assert!(Color::parse_hex("10b981").is_err());
        assert!(Color::parse_hex("#10b9").is_err());
        assert!(Color::parse_hex("#zzzzzz").is_err());
    }

    #[test]
    fn test_to_hex_round_trip() {
        let c = Color::rgb(16, 185, 129);
        assert_eq!(Color::parse_hex(&c.to_hex()).unwrap(), c);
    }
}
