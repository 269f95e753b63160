//! Tag classification.
//!
//! Tags arrive as free-form strings ("Best Seller", "NEW", null, "   ").
//! Classification is an exact match on the lowercased, trimmed text
//! against a fixed table; anything non-empty but unrecognized falls back
//! to `Default`, and empty/null input maps to `None`, which suppresses
//! all tag rendering and export columns for that device.

use serde::{Deserialize, Serialize};

/// Closed set of presentation categories for device tags.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum TagCategory {
    Bestseller,
    New,
    Sale,
    Limited,
    Beautiful,
    Default,
    None,
}

impl TagCategory {
    /// Classifies a raw tag value.
    pub fn classify(tag: Option<&str>) -> Self {
        let trimmed = match tag {
            Some(t) => t.trim(),
            None => return TagCategory::None,
        };
        if trimmed.is_empty() {
            return TagCategory::None;
        }
        match trimmed.to_lowercase().as_str() {
            "bestseller" | "best seller" => TagCategory::Bestseller,
            "new" => TagCategory::New,
            "sale" => TagCategory::Sale,
            "limited" => TagCategory::Limited,
            "beautiful" => TagCategory::Beautiful,
            _ => TagCategory::Default,
        }
    }

    /// Whether a badge should be rendered for this category.
    pub fn is_rendered(&self) -> bool {
        !matches!(self, TagCategory::None)
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            TagCategory::Bestseller => "bestseller",
            TagCategory::New => "new",
            TagCategory::Sale => "sale",
            TagCategory::Limited => "limited",
            TagCategory::Beautiful => "beautiful",
            TagCategory::Default => "default",
            TagCategory::None => "none",
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_known_tags() {
        assert_eq!(TagCategory::classify(Some("Best Seller")), TagCategory::Bestseller);
        assert_eq!(TagCategory::classify(Some("bestseller")), TagCategory::Bestseller);
        assert_eq!(TagCategory::classify(Some("NEW")), TagCategory::New);
        assert_eq!(TagCategory::classify(Some("sale ")), TagCategory::Sale);
        assert_eq!(TagCategory::classify(Some("Limited")), TagCategory::Limited);
        assert_eq!(TagCategory::classify(Some("beautiful")), TagCategory::Beautiful);
    }

    #[test]
    fn test_unknown_tag_maps_to_default() {
        assert_eq!(TagCategory::classify(Some("clearance")), TagCategory::Default);
    }

    #[test]
    fn test_blank_tags_map_to_none() {
        assert_eq!(TagCategory::classify(None), TagCategory::None);
        assert_eq!(TagCategory::classify(Some("")), TagCategory::None);
        assert_eq!(TagCategory::classify(Some("  ")), TagCategory::None);
        assert!(!TagCategory::classify(Some("  ")).is_rendered());
    }

    #[test]
    fn test_rendered_categories() {
        assert!(TagCategory::Bestseller.is_rendered());
        assert!(TagCategory::Default.is_rendered());
        assert!(!TagCategory::None.is_rendered());
    }
}
