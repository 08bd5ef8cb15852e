use chrono::{DateTime, Utc};
use serde::Serialize;

/// A paper entry from the arXiv Atom feed.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct Paper {
    /// Abstract page URL, e.g. `http://arxiv.org/abs/2301.12345v1`
    pub id: String,
    pub title: String,
    pub authors: Vec<String>,
    pub summary: String,
    pub published_date: DateTime<Utc>,
    pub updated_date: DateTime<Utc>,
    pub categories: Vec<String>,
    pub primary_category: Option<String>,
    pub pdf_url: String,
    pub arxiv_url: String,
    pub doi: Option<String>,
}

impl Paper {
    /// Bare identifier with version, e.g. `2301.12345v1` or `hep-th/9901001v2`.
    pub fn arxiv_id(&self) -> &str {
        self.id
            .split_once("/abs/")
            .map(|(_, id)| id)
            .unwrap_or(&self.id)
    }

    /// Identifier without the trailing version suffix.
    pub fn base_id(&self) -> &str {
        let id = self.arxiv_id();
        match id.rfind('v') {
            Some(pos)
                if pos > 0
                    && pos + 1 < id.len()
                    && id[pos + 1..].chars().all(|c| c.is_ascii_digit()) =>
            {
                &id[..pos]
            }
            _ => id,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SortBy {
    Relevance,
    LastUpdatedDate,
    SubmittedDate,
}

impl SortBy {
    pub fn as_str(&self) -> &'static str {
        match self {
            SortBy::Relevance => "relevance",
            SortBy::LastUpdatedDate => "lastUpdatedDate",
            SortBy::SubmittedDate => "submittedDate",
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SortOrder {
    Ascending,
    Descending,
}

impl SortOrder {
    pub fn as_str(&self) -> &'static str {
        match self {
            SortOrder::Ascending => "ascending",
            SortOrder::Descending => "descending",
        }
    }
}

/// A `/api/query` request.
///
/// `search_query` uses arXiv's field-prefix syntax (`all:`, `cat:`, `ti:`)
/// with `AND` / `OR` and parentheses; it is URL-encoded when sent.
#[derive(Debug, Clone)]
pub struct SearchQuery {
    pub search_query: String,
    pub start: u32,
    pub max_results: u32,
    pub sort: Option<(SortBy, SortOrder)>,
}

impl SearchQuery {
    pub fn new(search_query: impl Into<String>) -> Self {
        Self {
            search_query: search_query.into(),
            start: 0,
            max_results: 10,
            sort: None,
        }
    }

    /// Match `term` in any field. Multi-word terms are quoted as a phrase.
    pub fn all(term: &str) -> Self {
        Self::new(field_clause("all", term))
    }

    /// `(cat:a OR cat:b ...) AND (all:"t1" OR all:"t2" ...)`
    pub fn categories_and_terms(categories: &[&str], terms: &[&str]) -> Self {
        let cats = categories
            .iter()
            .map(|c| format!("cat:{}", c))
            .collect::<Vec<_>>()
            .join(" OR ");
        let terms = terms
            .iter()
            .map(|t| field_clause("all", t))
            .collect::<Vec<_>>()
            .join(" OR ");
        Self::new(format!("({}) AND ({})", cats, terms))
    }

    pub fn max_results(mut self, max_results: u32) -> Self {
        self.max_results = max_results;
        self
    }

    pub fn start(mut self, start: u32) -> Self {
        self.start = start;
        self
    }

    pub fn sort(mut self, by: SortBy, order: SortOrder) -> Self {
        self.sort = Some((by, order));
        self
    }

    pub fn to_query_string(&self) -> String {
        let mut query = format!(
            "search_query={}&start={}&max_results={}",
            urlencoding::encode(&self.search_query),
            self.start,
            self.max_results
        );
        if let Some((by, order)) = self.sort {
            query.push_str(&format!("&sortBy={}&sortOrder={}", by.as_str(), order.as_str()));
        }
        query
    }
}

fn field_clause(field: &str, term: &str) -> String {
    let term = term.trim();
    if term.contains(char::is_whitespace) {
        format!("{}:\"{}\"", field, term)
    } else {
        format!("{}:{}", field, term)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_phrase_terms_are_quoted() {
        assert_eq!(SearchQuery::all("open science").search_query, "all:\"open science\"");
        assert_eq!(SearchQuery::all("desci").search_query, "all:desci");
    }

    #[test]
    fn test_categories_and_terms() {
        let q = SearchQuery::categories_and_terms(&["cs.DL", "q-bio"], &["science dao", "desci"]);
        assert_eq!(
            q.search_query,
            "(cat:cs.DL OR cat:q-bio) AND (all:\"science dao\" OR all:desci)"
        );
    }

    #[test]
    fn test_query_string() {
        let q = SearchQuery::all("desci")
            .max_results(20)
            .sort(SortBy::SubmittedDate, SortOrder::Descending);
        assert_eq!(
            q.to_query_string(),
            "search_query=all%3Adesci&start=0&max_results=20&sortBy=submittedDate&sortOrder=descending"
        );
    }
}
