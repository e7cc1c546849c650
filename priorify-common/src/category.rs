//! Category universe
//!
//! The fixed, ordered vocabulary of schedule categories. Categories are
//! referenced by the priority model but never created or destroyed at
//! runtime; the universe is built once and shared read-only.

use std::collections::HashSet;
use std::fmt;

use serde::{Deserialize, Serialize};

use crate::{Error, Result};

/// Standard category vocabulary, in display order
pub const STANDARD_CATEGORIES: [&str; 25] = [
    "가사", "취미", "휴식", "건강", "미용",
    "차량 관리", "반려 동물", "가족", "연애", "친목",
    "업무", "학업", "시험", "여행", "경제",
    "출장", "구매", "예약", "정기 지출", "재무",
    "세금", "봉사", "통화", "종교", "치료",
];

/// Opaque category label
///
/// Serialized as a bare JSON string so it matches the backend's
/// `{ "category": "가사", "rank": 1 }` shape.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Category(String);

impl Category {
    /// Wrap a label
    pub fn new(label: impl Into<String>) -> Self {
        Self(label.into())
    }

    /// Borrow the label
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for Category {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl From<&str> for Category {
    fn from(label: &str) -> Self {
        Self::new(label)
    }
}

impl From<String> for Category {
    fn from(label: String) -> Self {
        Self(label)
    }
}

/// Ordered set of every category the product recognizes
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CategoryUniverse {
    categories: Vec<Category>,
}

impl CategoryUniverse {
    /// The product's standard 25-category vocabulary
    pub fn standard() -> Self {
        Self {
            categories: STANDARD_CATEGORIES.iter().map(|&label| Category::new(label)).collect(),
        }
    }

    /// Build a custom universe
    ///
    /// Labels keep their given order. Empty (or whitespace-only) labels and
    /// duplicates are rejected.
    ///
    /// # Examples
    ///
    /// ```
    /// use priorify_common::CategoryUniverse;
    ///
    /// let universe = CategoryUniverse::new(["가사", "취미", "건강"]).unwrap();
    /// assert_eq!(universe.len(), 3);
    /// assert!(CategoryUniverse::new(["가사", "가사"]).is_err());
    /// ```
    pub fn new<I, S>(labels: I) -> Result<Self>
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        let mut seen = HashSet::new();
        let mut categories = Vec::new();

        for label in labels {
            let label = label.into();
            if label.trim().is_empty() {
                return Err(Error::InvalidInput("category label must not be empty".to_string()));
            }
            if !seen.insert(label.clone()) {
                return Err(Error::InvalidInput(format!("duplicate category label: {}", label)));
            }
            categories.push(Category(label));
        }

        Ok(Self { categories })
    }

    /// Whether the category belongs to this universe
    pub fn contains(&self, category: &Category) -> bool {
        self.categories.contains(category)
    }

    /// Look up a label, trimming surrounding whitespace
    pub fn resolve(&self, label: &str) -> Result<Category> {
        let label = label.trim();
        self.categories
            .iter()
            .find(|c| c.as_str() == label)
            .cloned()
            .ok_or_else(|| Error::UnknownCategory(label.to_string()))
    }

    /// Categories in universe order
    pub fn iter(&self) -> impl Iterator<Item = &Category> {
        self.categories.iter()
    }

    pub fn len(&self) -> usize {
        self.categories.len()
    }

    pub fn is_empty(&self) -> bool {
        self.categories.is_empty()
    }
}

impl Default for CategoryUniverse {
    fn default() -> Self {
        Self::standard()
    }
}
