use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

/// Subject area of a project. The set is closed; anything else is coerced
/// to [`Category::OpenAccessResearch`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
pub enum Category {
    Biology,
    #[serde(rename = "AI")]
    Ai,
    #[serde(rename = "Materials Science")]
    MaterialsScience,
    #[default]
    #[serde(rename = "Open Access Research")]
    OpenAccessResearch,
    #[serde(rename = "Climate Science")]
    ClimateScience,
    #[serde(rename = "Blockchain for Science")]
    BlockchainForScience,
}

impl Category {
    pub const ALL: [Category; 6] = [
        Category::Biology,
        Category::Ai,
        Category::MaterialsScience,
        Category::OpenAccessResearch,
        Category::ClimateScience,
        Category::BlockchainForScience,
    ];

    pub fn label(&self) -> &'static str {
        match self {
            Category::Biology => "Biology",
            Category::Ai => "AI",
            Category::MaterialsScience => "Materials Science",
            Category::OpenAccessResearch => "Open Access Research",
            Category::ClimateScience => "Climate Science",
            Category::BlockchainForScience => "Blockchain for Science",
        }
    }

    /// Map free text (typically a model reply) onto the closed set.
    ///
    /// Tries a case-insensitive exact match first, then looks for a label
    /// inside the text, longest label first. "AI" only matches as a whole
    /// word so that e.g. "blockchain" does not read as AI.
    pub fn coerce(text: &str) -> Category {
        let normalized = text
            .trim()
            .trim_matches(|c: char| c.is_ascii_punctuation() || c.is_whitespace())
            .to_lowercase();

        if let Some(exact) = Self::ALL
            .iter()
            .find(|c| c.label().to_lowercase() == normalized)
        {
            return *exact;
        }

        let mut by_length = Self::ALL;
        by_length.sort_by_key(|c| std::cmp::Reverse(c.label().len()));
        for category in by_length {
            let label = category.label().to_lowercase();
            let found = if category == Category::Ai {
                normalized
                    .split(|c: char| !c.is_alphanumeric())
                    .any(|word| word == label)
            } else {
                normalized.contains(&label)
            };
            if found {
                return category;
            }
        }

        Category::default()
    }
}

impl fmt::Display for Category {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[error("Unknown category '{0}'")]
pub struct UnknownCategory(pub String);

/// Exact, case-sensitive label match.
impl FromStr for Category {
    type Err = UnknownCategory;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::ALL
            .iter()
            .copied()
            .find(|c| c.label() == s)
            .ok_or_else(|| UnknownCategory(s.to_string()))
    }
}

/// Category argument of a listing query: the `All` sentinel or one category.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum CategoryFilter {
    #[default]
    All,
    Only(Category),
}

impl CategoryFilter {
    pub fn matches(&self, category: Category) -> bool {
        match self {
            CategoryFilter::All => true,
            CategoryFilter::Only(c) => *c == category,
        }
    }
}

impl FromStr for CategoryFilter {
    type Err = UnknownCategory;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        if s == "All" {
            Ok(CategoryFilter::All)
        } else {
            s.parse().map(CategoryFilter::Only)
        }
    }
}

impl fmt::Display for CategoryFilter {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            CategoryFilter::All => f.write_str("All"),
            CategoryFilter::Only(c) => c.fmt(f),
        }
    }
}

impl Serialize for CategoryFilter {
    fn serialize<S: serde::Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.collect_str(self)
    }
}
