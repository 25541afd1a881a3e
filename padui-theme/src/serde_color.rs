//! Custom serialization helpers for vello::peniko::Color

use serde::{Deserialize, Deserializer, Serializer};
use vello::peniko::Color;

use crate::color::parse_hex;

/// Serialize a Color as a hex string.
pub fn serialize<S>(color: &Color, serializer: S) -> Result<S::Ok, S::Error>
where
    S: Serializer,
{
    let components = color.components;
    let r = (components[0] * 255.0) as u8;
    let g = (components[1] * 255.0) as u8;
    let b = (components[2] * 255.0) as u8;
    let a = (components[3] * 255.0) as u8;
    let hex = if a == 255 {
        format!("#{:02x}{:02x}{:02x}", r, g, b)
    } else {
        format!("#{:02x}{:02x}{:02x}{:02x}", r, g, b, a)
    };
    serializer.serialize_str(&hex)
}

/// Deserialize a Color from a hex string.
pub fn deserialize<'de, D>(deserializer: D) -> Result<Color, D::Error>
where
    D: Deserializer<'de>,
{
    use serde::de::Error;
    let hex = String::deserialize(deserializer)?;
    parse_hex(&hex).map_err(Error::custom)
}

#[cfg(test)]
mod tests {
    use serde::{Deserialize, Serialize};
    use vello::peniko::Color;

    #[derive(Serialize, Deserialize)]
    struct Wrapper {
        #[serde(with = "crate::serde_color")]
        color: Color,
    }

    #[test]
    fn test_roundtrip_hex() {
        let parsed: Wrapper = toml::from_str("color = \"#1e88e5\"").unwrap();
        let expected = Color::from_rgb8(0x1E, 0x88, 0xE5);
        assert_eq!(parsed.color.components, expected.components);

        let out = toml::to_string(&parsed).unwrap();
        assert!(out.contains("#1e88e5"));
    }
}
