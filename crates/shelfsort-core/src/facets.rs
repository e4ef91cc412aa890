//! Closed vocabularies derived from free-form catalog tags and titles.

use serde::{Deserialize, Serialize};

/// The merchandising color palette. Tags outside this list carry no color.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "UPPERCASE")]
pub enum Color {
    Black,
    Blue,
    Yellow,
    Red,
    Green,
    White,
    /// Both `GREY` and `GRAY` tags map here.
    Grey,
    Pink,
    Orange,
    Purple,
    Brown,
    Beige,
    Navy,
    Cream,
    Khaki,
    Olive,
    Burgundy,
    Maroon,
    Teal,
    Coral,
    Gold,
    Silver,
}

impl Color {
    /// Parses a single tag as a palette color, ignoring case and surrounding
    /// whitespace. The whole tag must name the color.
    #[must_use]
    pub fn from_tag(tag: &str) -> Option<Self> {
        let color = match tag.trim().to_ascii_uppercase().as_str() {
            "BLACK" => Self::Black,
            "BLUE" => Self::Blue,
            "YELLOW" => Self::Yellow,
            "RED" => Self::Red,
            "GREEN" => Self::Green,
            "WHITE" => Self::White,
            // One palette entry, so GREY next to GRAY counts as a color repeat.
            "GREY" | "GRAY" => Self::Grey,
            "PINK" => Self::Pink,
            "ORANGE" => Self::Orange,
            "PURPLE" => Self::Purple,
            "BROWN" => Self::Brown,
            "BEIGE" => Self::Beige,
            "NAVY" => Self::Navy,
            "CREAM" => Self::Cream,
            "KHAKI" => Self::Khaki,
            "OLIVE" => Self::Olive,
            "BURGUNDY" => Self::Burgundy,
            "MAROON" => Self::Maroon,
            "TEAL" => Self::Teal,
            "CORAL" => Self::Coral,
            "GOLD" => Self::Gold,
            "SILVER" => Self::Silver,
            _ => return None,
        };
        Some(color)
    }

    #[must_use]
    pub fn as_str(self) -> &'static str {
        match self {
            Self::Black => "BLACK",
            Self::Blue => "BLUE",
            Self::Yellow => "YELLOW",
            Self::Red => "RED",
            Self::Green => "GREEN",
            Self::White => "WHITE",
            Self::Grey => "GREY",
            Self::Pink => "PINK",
            Self::Orange => "ORANGE",
            Self::Purple => "PURPLE",
            Self::Brown => "BROWN",
            Self::Beige => "BEIGE",
            Self::Navy => "NAVY",
            Self::Cream => "CREAM",
            Self::Khaki => "KHAKI",
            Self::Olive => "OLIVE",
            Self::Burgundy => "BURGUNDY",
            Self::Maroon => "MAROON",
            Self::Teal => "TEAL",
            Self::Coral => "CORAL",
            Self::Gold => "GOLD",
            Self::Silver => "SILVER",
        }
    }
}

impl std::fmt::Display for Color {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Garment type inferred from the product title.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "UPPERCASE")]
pub enum GarmentType {
    Hoodie,
    Crewneck,
    Jeans,
    Pants,
    Jersey,
    Longsleeve,
    Sneakers,
    Other,
}

/// Title keywords in match priority order. A title containing both
/// `HOODIE` and `PANTS` is a hoodie.
const TITLE_KEYWORDS: [(&str, GarmentType); 7] = [
    ("HOODIE", GarmentType::Hoodie),
    ("CREWNECK", GarmentType::Crewneck),
    ("JEANS", GarmentType::Jeans),
    ("PANTS", GarmentType::Pants),
    ("JERSEY", GarmentType::Jersey),
    ("LONGSLEEVE", GarmentType::Longsleeve),
    ("SNEAKERS", GarmentType::Sneakers),
];

impl GarmentType {
    #[must_use]
    pub fn from_title(title: &str) -> Self {
        let upper = title.to_uppercase();
        TITLE_KEYWORDS
            .iter()
            .find(|(keyword, _)| upper.contains(keyword))
            .map_or(Self::Other, |(_, garment)| *garment)
    }

    /// Hoodies and crewnecks lead the visible window when alternation is on.
    #[must_use]
    pub fn is_main(self) -> bool {
        matches!(self, Self::Hoodie | Self::Crewneck)
    }
}
