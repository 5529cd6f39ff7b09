//! Card request enumerations and the validated request record

use serde::{Deserialize, Serialize};

/// Error parsing a card enum label
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CardEnumParseError {
    /// The field the value was supplied for
    pub field: &'static str,
    /// The rejected value
    pub value: String,
}

impl CardEnumParseError {
    fn new(field: &'static str, value: &str) -> Self {
        Self {
            field,
            value: value.to_string(),
        }
    }
}

impl std::fmt::Display for CardEnumParseError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "invalid {}: {}", self.field, self.value)
    }
}

impl std::error::Error for CardEnumParseError {}

/// Overall visual style of the card
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum CardStyle {
    #[default]
    Modern,
    Classic,
    Playful,
    Elegant,
    Minimalist,
}

impl std::str::FromStr for CardStyle {
    type Err = CardEnumParseError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "modern" => Ok(Self::Modern),
            "classic" => Ok(Self::Classic),
            "playful" => Ok(Self::Playful),
            "elegant" => Ok(Self::Elegant),
            "minimalist" => Ok(Self::Minimalist),
            _ => Err(CardEnumParseError::new("style", s)),
        }
    }
}

/// Typeface family for the card text
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum FontFace {
    #[default]
    ElegantScript,
    BoldModern,
    Playful,
    Classic,
}

impl std::str::FromStr for FontFace {
    type Err = CardEnumParseError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "elegant-script" => Ok(Self::ElegantScript),
            "bold-modern" => Ok(Self::BoldModern),
            "playful" => Ok(Self::Playful),
            "classic" => Ok(Self::Classic),
            _ => Err(CardEnumParseError::new("font", s)),
        }
    }
}

/// Color of the card's main text
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum TextColor {
    #[default]
    White,
    Black,
    Gold,
    Pink,
    Blue,
    Green,
}

impl std::str::FromStr for TextColor {
    type Err = CardEnumParseError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "white" => Ok(Self::White),
            "black" => Ok(Self::Black),
            "gold" => Ok(Self::Gold),
            "pink" => Ok(Self::Pink),
            "blue" => Ok(Self::Blue),
            "green" => Ok(Self::Green),
            _ => Err(CardEnumParseError::new("color", s)),
        }
    }
}

/// Placement of the text block on the card
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum TextPosition {
    #[default]
    Centered,
    Top,
    Bottom,
}

impl std::str::FromStr for TextPosition {
    type Err = CardEnumParseError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "centered" => Ok(Self::Centered),
            "top" => Ok(Self::Top),
            "bottom" => Ok(Self::Bottom),
            _ => Err(CardEnumParseError::new("position", s)),
        }
    }
}

/// Visual effect applied to the card text
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum TextEffect {
    Glow,
    Shadow,
    Gradient,
    Sparkle,
}

impl std::str::FromStr for TextEffect {
    type Err = CardEnumParseError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "glow" => Ok(Self::Glow),
            "shadow" => Ok(Self::Shadow),
            "gradient" => Ok(Self::Gradient),
            "sparkle" => Ok(Self::Sparkle),
            _ => Err(CardEnumParseError::new("effects", s)),
        }
    }
}

/// A validated card generation request
///
/// Constructed once per generation call from untrusted input and immutable
/// thereafter. Enumerated fields are guaranteed to hold one of their fixed
/// allowed values; `occasion` stays free-form.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CardRequest {
    pub occasion: String,
    pub message: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub recipient: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub sender: Option<String>,
    #[serde(default)]
    pub style: CardStyle,
    #[serde(default)]
    pub font: FontFace,
    #[serde(default)]
    pub color: TextColor,
    #[serde(default)]
    pub position: TextPosition,
    #[serde(default)]
    pub effects: Vec<TextEffect>,
    #[serde(default)]
    pub add_watermark: bool,
}
