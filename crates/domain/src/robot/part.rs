//! Value objects for robot parts.

use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

/// Catalog code identifying a part (e.g. `"A"`).
#[derive(Debug, Clone, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct PartCode(String);

impl PartCode {
    /// Creates a part code from a string.
    pub fn new(code: impl Into<String>) -> Self {
        Self(code.into())
    }

    /// Returns the code as a string slice.
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl std::fmt::Display for PartCode {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.0)
    }
}

impl From<String> for PartCode {
    fn from(s: String) -> Self {
        Self(s)
    }
}

impl From<&str> for PartCode {
    fn from(s: &str) -> Self {
        Self(s.to_string())
    }
}

impl AsRef<str> for PartCode {
    fn as_ref(&self) -> &str {
        &self.0
    }
}

/// The mandatory slots of a robot.
///
/// Declaration order is the order in which composition violations are
/// reported.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum PartCategory {
    Face,
    Material,
    Arms,
    Mobility,
}

impl PartCategory {
    /// Every category, in enumeration order.
    pub const ALL: [PartCategory; 4] = [
        PartCategory::Face,
        PartCategory::Material,
        PartCategory::Arms,
        PartCategory::Mobility,
    ];

    /// Position in [`PartCategory::ALL`].
    pub(crate) fn index(self) -> usize {
        match self {
            PartCategory::Face => 0,
            PartCategory::Material => 1,
            PartCategory::Arms => 2,
            PartCategory::Mobility => 3,
        }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            PartCategory::Face => "FACE",
            PartCategory::Material => "MATERIAL",
            PartCategory::Arms => "ARMS",
            PartCategory::Mobility => "MOBILITY",
        }
    }
}

impl std::fmt::Display for PartCategory {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

/// A component identified by its code and the slot it fills.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Part {
    code: PartCode,
    category: PartCategory,
}

impl Part {
    pub fn new(code: impl Into<PartCode>, category: PartCategory) -> Self {
        Self {
            code: code.into(),
            category,
        }
    }

    pub fn face(code: impl Into<PartCode>) -> Self {
        Self::new(code, PartCategory::Face)
    }

    pub fn material(code: impl Into<PartCode>) -> Self {
        Self::new(code, PartCategory::Material)
    }

    pub fn arms(code: impl Into<PartCode>) -> Self {
        Self::new(code, PartCategory::Arms)
    }

    pub fn mobility(code: impl Into<PartCode>) -> Self {
        Self::new(code, PartCategory::Mobility)
    }

    pub fn code(&self) -> &PartCode {
        &self.code
    }

    pub fn category(&self) -> PartCategory {
        self.category
    }
}

/// A catalog entry: a part with its unit price and available units.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Component {
    part: Part,
    price: Decimal,
    available: u32,
}

impl Component {
    /// Creates a catalog entry. Price sign is checked when the catalog is
    /// built.
    pub fn new(part: Part, price: Decimal, available: u32) -> Self {
        Self {
            part,
            price,
            available,
        }
    }

    pub fn part(&self) -> &Part {
        &self.part
    }

    pub fn code(&self) -> &PartCode {
        self.part.code()
    }

    /// Unit price.
    pub fn price(&self) -> Decimal {
        self.price
    }

    /// Units currently in stock.
    pub fn available(&self) -> u32 {
        self.available
    }

    /// Returns a copy with `quantity` fewer units, saturating at zero.
    pub fn with_subtracted(&self, quantity: u32) -> Self {
        Self {
            available: self.available.saturating_sub(quantity),
            ..self.clone()
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rust_decimal_macros::dec;

    #[test]
    fn test_part_code_conversion() {
        let code = PartCode::new("A");
        assert_eq!(code.as_str(), "A");

        let other: PartCode = "B".into();
        assert_eq!(other.to_string(), "B");
    }

    #[test]
    fn test_category_order_and_names() {
        let names: Vec<&str> = PartCategory::ALL.iter().map(|c| c.as_str()).collect();
        assert_eq!(names, vec!["FACE", "MATERIAL", "ARMS", "MOBILITY"]);
    }

    #[test]
    fn test_category_serialization() {
        let json = serde_json::to_string(&PartCategory::Mobility).unwrap();
        assert_eq!(json, "\"MOBILITY\"");
        let back: PartCategory = serde_json::from_str("\"ARMS\"").unwrap();
        assert_eq!(back, PartCategory::Arms);
    }

    #[test]
    fn test_part_constructors() {
        assert_eq!(Part::face("A").category(), PartCategory::Face);
        assert_eq!(Part::material("C").category(), PartCategory::Material);
        assert_eq!(Part::arms("B").category(), PartCategory::Arms);
        assert_eq!(Part::mobility("D").category(), PartCategory::Mobility);
        assert_eq!(Part::mobility("D").code().as_str(), "D");
    }

    #[test]
    fn test_component_subtraction_leaves_original_untouched() {
        let component = Component::new(Part::face("A"), dec!(10.28), 9);
        let reduced = component.with_subtracted(2);

        assert_eq!(component.available(), 9);
        assert_eq!(reduced.available(), 7);
        assert_eq!(reduced.price(), dec!(10.28));
        assert_eq!(component.with_subtracted(20).available(), 0);
    }

    #[test]
    fn test_category_index_matches_enumeration_order() {
        for (position, category) in PartCategory::ALL.into_iter().enumerate() {
            assert_eq!(category.index(), position);
        }
    }
}
