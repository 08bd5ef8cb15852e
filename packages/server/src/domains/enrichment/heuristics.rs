//! Keyword rules used when no language model is available.

use crate::domains::projects::models::{Category, ProjectScores};

/// Score given to every metric when it cannot be assessed.
pub const FALLBACK_SCORE: i64 = 75;

const SUMMARY_WORDS: usize = 15;

/// True if `needle` occurs in `haystack` as a whole word (alphanumeric
/// boundaries). Both sides are compared case-insensitively.
pub fn contains_word(haystack: &str, needle: &str) -> bool {
    let needle = needle.to_lowercase();
    haystack
        .to_lowercase()
        .split(|c: char| !c.is_alphanumeric())
        .any(|word| word == needle)
}

/// First matching rule wins:
///
/// | keywords | category |
/// |---|---|
/// | biology, bio, genetic | Biology |
/// | ai, artificial intelligence, machine learning | AI |
/// | materials, chemistry | Materials Science |
/// | climate, environment | Climate Science |
/// | blockchain together with science or research | Blockchain for Science |
///
/// Anything else is Open Access Research.
pub fn categorize_keywords(text: &str) -> Category {
    let lower = text.to_lowercase();
    let has = |needle: &str| lower.contains(needle);

    if has("biology") || has("bio") || has("genetic") {
        Category::Biology
    } else if contains_word(&lower, "ai")
        || has("artificial intelligence")
        || has("machine learning")
    {
        Category::Ai
    } else if has("materials") || has("chemistry") {
        Category::MaterialsScience
    } else if has("climate") || has("environment") {
        Category::ClimateScience
    } else if has("blockchain") && (has("science") || has("research")) {
        Category::BlockchainForScience
    } else {
        Category::OpenAccessResearch
    }
}

pub fn fallback_scores() -> ProjectScores {
    ProjectScores::uniform(FALLBACK_SCORE)
}

/// The first 15 words followed by `...`; shorter descriptions are returned
/// unchanged.
pub fn summary_fallback(description: &str) -> String {
    let words: Vec<&str> = description.split_whitespace().collect();
    if words.len() <= SUMMARY_WORDS {
        return description.to_string();
    }
    format!("{}...", words[..SUMMARY_WORDS].join(" "))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_keyword_rules() {
        assert_eq!(categorize_keywords("Open genetic data"), Category::Biology);
        assert_eq!(categorize_keywords("Bioinformatics pipelines"), Category::Biology);
        assert_eq!(categorize_keywords("An AI model registry"), Category::Ai);
        assert_eq!(
            categorize_keywords("Federated machine learning for labs"),
            Category::Ai
        );
        assert_eq!(
            categorize_keywords("Computational chemistry notebooks"),
            Category::MaterialsScience
        );
        assert_eq!(
            categorize_keywords("Environment sensor network"),
            Category::ClimateScience
        );
        assert_eq!(
            categorize_keywords("A blockchain for research funding"),
            Category::BlockchainForScience
        );
        assert_eq!(
            categorize_keywords("Peer review on a public ledger"),
            Category::OpenAccessResearch
        );
    }

    #[test]
    fn test_ai_requires_whole_word() {
        // "blockchain", "chain", "maintain" all contain "ai"
        assert_eq!(
            categorize_keywords("Blockchain to maintain research records"),
            Category::BlockchainForScience
        );
        assert_eq!(categorize_keywords("Open AI-assisted review"), Category::Ai);
    }

    #[test]
    fn test_rule_order() {
        // biology is checked before AI
        assert_eq!(
            categorize_keywords("AI for biology"),
            Category::Biology
        );
    }

    #[test]
    fn test_summary_fallback() {
        assert_eq!(summary_fallback("Short and sweet."), "Short and sweet.");

        let long = "one two three four five six seven eight nine ten eleven twelve thirteen fourteen fifteen sixteen seventeen";
        assert_eq!(
            summary_fallback(long),
            "one two three four five six seven eight nine ten eleven twelve thirteen fourteen fifteen..."
        );

        let exactly = "a b c d e f g h i j k l m n o";
        assert_eq!(summary_fallback(exactly), exactly);
    }

    #[test]
    fn test_contains_word() {
        assert!(contains_word("Decentralized AI.", "ai"));
        assert!(!contains_word("blockchain", "ai"));
        assert!(contains_word("climate-data", "climate"));
    }
}
