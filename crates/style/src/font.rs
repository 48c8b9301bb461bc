use serde::{Deserialize, Deserializer, Serialize, de};

/// CSS-style font weight, on the 100-900 scale.
///
/// The named variants cover the weights the built-in templates actually use;
/// `Numeric` keeps arbitrary values representable for injected fonts.
#[derive(Debug, Clone, Copy, Serialize, PartialEq, Eq, Hash)]
#[derive(Default)]
pub enum FontWeight {
    Light,
    #[default]
    Regular,
    Medium,
    SemiBold,
    Bold,
    ExtraBold,
    Black,
    Numeric(u16),
}

impl FontWeight {
    pub fn numeric_value(&self) -> u16 {
        match self {
            FontWeight::Light => 300,
            FontWeight::Regular => 400,
            FontWeight::Medium => 500,
            FontWeight::SemiBold => 600,
            FontWeight::Bold => 700,
            FontWeight::ExtraBold => 800,
            FontWeight::Black => 900,
            FontWeight::Numeric(n) => *n,
        }
    }

    /// True for weights that should resolve to a bold face (600+).
    pub fn is_bold(&self) -> bool {
        self.numeric_value() >= 600
    }

    fn parse(s: &str) -> Result<Self, String> {
        match s.to_lowercase().as_str() {
            "light" => Ok(FontWeight::Light),
            "regular" | "normal" => Ok(FontWeight::Regular),
            "medium" => Ok(FontWeight::Medium),
            "semibold" => Ok(FontWeight::SemiBold),
            "bold" => Ok(FontWeight::Bold),
            "extrabold" => Ok(FontWeight::ExtraBold),
            "black" => Ok(FontWeight::Black),
            _ => s
                .parse::<u16>()
                .map(FontWeight::Numeric)
                .map_err(|_| format!("Invalid font weight: '{}'", s)),
        }
    }
}

impl<'de> Deserialize<'de> for FontWeight {
    fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
    where
        D: Deserializer<'de>,
    {
        #[derive(Deserialize)]
        #[serde(untagged)]
        enum FontWeightDef {
            Str(String),
            Num(u16),
        }

        match FontWeightDef::deserialize(deserializer)? {
            FontWeightDef::Str(s) => Self::parse(&s).map_err(de::Error::custom),
            FontWeightDef::Num(n) => Ok(FontWeight::Numeric(n)),
        }
    }
}

#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, Hash)]
#[serde(rename_all = "kebab-case")]
#[derive(Default)]
pub enum FontStyle {
    #[default]
    Normal,
    Italic,
    Oblique,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_numeric_values() {
        assert_eq!(FontWeight::Regular.numeric_value(), 400);
        assert_eq!(FontWeight::ExtraBold.numeric_value(), 800);
        assert_eq!(FontWeight::Numeric(450).numeric_value(), 450);
    }

    #[test]
    fn test_is_bold_threshold() {
        assert!(!FontWeight::Medium.is_bold());
        assert!(FontWeight::SemiBold.is_bold());
        assert!(FontWeight::Bold.is_bold());
    }

    #[test]
    fn test_parse_from_string() {
        assert_eq!(FontWeight::parse("bold").unwrap(), FontWeight::Bold);
        assert_eq!(FontWeight::parse("600").unwrap(), FontWeight::Numeric(600));
        assert!(FontWeight::parse("heavyish").is_err());
    }
}
