//! Colors and the theme pallet
//!
//! Accepted forms:
//!
//! ```text
//! "#rrggbb" / "#rrggbbaa"     hex
//! [r, g, b] / [r, g, b, a]    integer channels 0..=255
//! "accent"                    name from #pallet
//! ```

use crate::theme::{ThemeError, ThemeMap};
use indexmap::IndexMap;
use serde_json::Value;
use std::fmt;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct Color {
    pub r: u8,
    pub g: u8,
    pub b: u8,
    pub a: u8,
}

impl Color {
    pub const WHITE: Color = Color::rgb(255, 255, 255);
    pub const BLACK: Color = Color::rgb(0, 0, 0);

    pub const fn rgb(r: u8, g: u8, b: u8) -> Self {
        Self { r, g, b, a: 255 }
    }

    pub const fn rgba(r: u8, g: u8, b: u8, a: u8) -> Self {
        Self { r, g, b, a }
    }

    pub fn from_hex(hex: &str) -> Option<Self> {
        let digits = hex.strip_prefix('#')?;
        if !digits.is_ascii() || !(digits.len() == 6 || digits.len() == 8) {
            return None;
        }
        let channel = |i: usize| u8::from_str_radix(&digits[i..i + 2], 16).ok();
        let a = if digits.len() == 8 { channel(6)? } else { 255 };
        Some(Self::rgba(channel(0)?, channel(2)?, channel(4)?, a))
    }

    /// Parse a theme value; the error is a human readable reason
    pub fn parse(value: &Value, pallet: &Pallet) -> Result<Self, String> {
        match value {
            Value::String(s) if s.starts_with('#') => {
                Self::from_hex(s).ok_or_else(|| format!("invalid hex color '{}'", s))
            }
            Value::String(name) => pallet
                .get(name)
                .ok_or_else(|| format!("unknown color name '{}'", name)),
            Value::Array(items) => {
                if !(items.len() == 3 || items.len() == 4) {
                    return Err(format!(
                        "color must have 3 or 4 channels, found {}",
                        items.len()
                    ));
                }
                let mut channels = [255u8; 4];
                for (i, item) in items.iter().enumerate() {
                    channels[i] = item
                        .as_i64()
                        .and_then(|c| u8::try_from(c).ok())
                        .ok_or_else(|| format!("channel {} out of range 0..=255: {}", i, item))?;
                }
                let [r, g, b, a] = channels;
                Ok(Self::rgba(r, g, b, a))
            }
            other => Err(format!("expected a color, found {}", other)),
        }
    }
}

impl fmt::Display for Color {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "#{:02x}{:02x}{:02x}", self.r, self.g, self.b)?;
        if self.a != 255 {
            write!(f, "{:02x}", self.a)?;
        }
        Ok(())
    }
}

/// Named colors from `#pallet`
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Pallet {
    colors: IndexMap<String, Color>,
}

impl Pallet {
    /// Build from the composed `#pallet`; entries may name earlier entries
    pub fn from_theme(map: &ThemeMap) -> Result<Self, ThemeError> {
        let mut pallet = Pallet::default();
        for (name, value) in map {
            let color = Color::parse(&value.to_json(), &pallet).map_err(|reason| {
                ThemeError::InvalidAttribute {
                    screen: "#pallet".to_string(),
                    region: name.clone(),
                    attribute: "color".to_string(),
                    reason,
                }
            })?;
            pallet.colors.insert(name.clone(), color);
        }
        Ok(pallet)
    }

    pub fn get(&self, name: &str) -> Option<Color> {
        self.colors.get(name).copied()
    }

    pub fn len(&self) -> usize {
        self.colors.len()
    }

    pub fn is_empty(&self) -> bool {
        self.colors.is_empty()
    }
}
