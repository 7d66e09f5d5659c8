//! Category registry
//!
//! Spending categories are a fixed catalog compiled into the binary. The last
//! entry is "Other", which also serves as the fallback for any category id
//! that does not resolve.

use serde::Serialize;
use std::fmt;

/// Integer identifier of a category, as stored on each expense
pub type CategoryId = u32;

/// A spending category
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
pub struct Category {
    /// Stable identifier
    pub id: CategoryId,
    /// Display name
    pub name: &'static str,
    /// Hex color used for charts (`#RRGGBB`)
    pub color: &'static str,
    /// Icon glyph
    pub icon: &'static str,
}

/// The category registry, in display order
pub const CATEGORIES: [Category; 8] = [
    Category {
        id: 1,
        name: "Food",
        color: "#FF6B6B",
        icon: "🍔",
    },
    Category {
        id: 2,
        name: "Transportation",
        color: "#4ECDC4",
        icon: "🚗",
    },
    Category {
        id: 3,
        name: "Entertainment",
        color: "#FFD166",
        icon: "🎬",
    },
    Category {
        id: 4,
        name: "Shopping",
        color: "#F78FB3",
        icon: "🛍",
    },
    Category {
        id: 5,
        name: "Utilities",
        color: "#6A0572",
        icon: "💡",
    },
    Category {
        id: 6,
        name: "Health",
        color: "#1A936F",
        icon: "🏥",
    },
    Category {
        id: 7,
        name: "Education",
        color: "#3A86FF",
        icon: "📚",
    },
    Category {
        id: 8,
        name: "Other",
        color: "#8D99AE",
        icon: "📝",
    },
];

/// Category preselected in the expense form
pub const DEFAULT_CATEGORY_ID: CategoryId = 1;

impl Category {
    /// All registered categories in registry order
    pub fn all() -> &'static [Category] {
        &CATEGORIES
    }

    /// The fallback category (last registry entry)
    pub fn other() -> &'static Category {
        &CATEGORIES[CATEGORIES.len() - 1]
    }

    /// Find a category by id, without fallback
    pub fn find(id: CategoryId) -> Option<&'static Category> {
        CATEGORIES.iter().find(|c| c.id == id)
    }

    /// Resolve a category id, falling back to "Other" when it is unknown
    pub fn by_id(id: CategoryId) -> &'static Category {
        Self::find(id).unwrap_or_else(Self::other)
    }

    /// Find a category by name (case-insensitive)
    pub fn find_by_name(name: &str) -> Option<&'static Category> {
        let name = name.trim();
        CATEGORIES
            .iter()
            .find(|c| c.name.eq_ignore_ascii_case(name))
    }

    /// Resolve user input that is either a numeric id or a category name
    pub fn lookup(input: &str) -> Option<&'static Category> {
        match input.trim().parse::<CategoryId>() {
            Ok(id) => Self::find(id),
            Err(_) => Self::find_by_name(input),
        }
    }

    /// Position of this category in the registry
    pub fn index(&self) -> usize {
        CATEGORIES
            .iter()
            .position(|c| c.id == self.id)
            .unwrap_or(CATEGORIES.len() - 1)
    }

    /// Whether this is the fallback category
    pub fn is_other(&self) -> bool {
        self.id == Self::other().id
    }

    /// The category color as an RGB triple
    pub fn rgb(&self) -> (u8, u8, u8) {
        parse_hex_color(self.color).unwrap_or((0x8D, 0x99, 0xAE))
    }

    /// Display label with icon
    pub fn label(&self) -> String {
        format!("{} {}", self.icon, self.name)
    }
}

impl fmt::Display for Category {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.name)
    }
}

/// Parse a `#RRGGBB` color string
pub fn parse_hex_color(hex: &str) -> Option<(u8, u8, u8)> {
    let hex = hex.strip_prefix('#')?;
    if hex.len() != 6 {
        return None;
    }
    let r = u8::from_str_radix(&hex[0..2], 16).ok()?;
    let g = u8::from_str_radix(&hex[2..4], 16).ok()?;
    let b = u8::from_str_radix(&hex[4..6], 16).ok()?;
    Some((r, g, b))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_registry_shape() {
        assert_eq!(Category::all().len(), 8);
        assert_eq!(Category::other().name, "Other");
        assert_eq!(Category::other().id, 8);

        let ids: Vec<_> = Category::all().iter().map(|c| c.id).collect();
        assert_eq!(ids, vec![1, 2, 3, 4, 5, 6, 7, 8]);
    }

    #[test]
    fn test_by_id_falls_back_to_other() {
        assert_eq!(Category::by_id(1).name, "Food");
        assert_eq!(Category::by_id(7).name, "Education");
        assert_eq!(Category::by_id(99).name, "Other");
        assert_eq!(Category::by_id(0).name, "Other");
        assert!(Category::find(99).is_none());
    }

    #[test]
    fn test_lookup_by_id_or_name() {
        assert_eq!(Category::lookup("2").map(|c| c.name), Some("Transportation"));
        assert_eq!(Category::lookup("health").map(|c| c.id), Some(6));
        assert_eq!(Category::lookup(" Food ").map(|c| c.id), Some(1));
        assert!(Category::lookup("groceries").is_none());
        assert!(Category::lookup("42").is_none());
    }

    #[test]
    fn test_index() {
        assert_eq!(Category::by_id(1).index(), 0);
        assert_eq!(Category::other().index(), 7);
    }

    #[test]
    fn test_colors_parse() {
        assert_eq!(Category::by_id(1).rgb(), (0xFF, 0x6B, 0x6B));
        for category in Category::all() {
            assert!(parse_hex_color(category.color).is_some(), "{}", category.name);
        }
        assert!(parse_hex_color("FF6B6B").is_none());
        assert!(parse_hex_color("#FFF").is_none());
    }
}
