use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// A repository as returned by `GET /search/repositories`.
#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct Repository {
    pub id: i64,
    pub name: String,
    pub full_name: String,
    pub description: Option<String>,
    pub html_url: String,
    #[serde(default)]
    pub topics: Vec<String>,
    pub language: Option<String>,
    pub license: Option<License>,
    #[serde(default)]
    pub stargazers_count: u64,
    #[serde(default)]
    pub forks_count: u64,
    #[serde(default)]
    pub watchers_count: u64,
    #[serde(default)]
    pub open_issues_count: u64,
    #[serde(default)]
    pub archived: bool,
    pub updated_at: DateTime<Utc>,
    pub pushed_at: Option<DateTime<Utc>>,
}

#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct License {
    pub key: String,
    pub name: String,
    pub spdx_id: Option<String>,
}

/// Envelope of every search endpoint.
#[derive(Debug, Clone, Deserialize)]
pub struct SearchResponse<T> {
    pub total_count: u64,
    #[serde(default)]
    pub incomplete_results: bool,
    pub items: Vec<T>,
}

/// Sort fields accepted by repository search.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RepoSort {
    Stars,
    Forks,
    Updated,
}

impl RepoSort {
    pub fn as_str(&self) -> &'static str {
        match self {
            RepoSort::Stars => "stars",
            RepoSort::Forks => "forks",
            RepoSort::Updated => "updated",
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SortOrder {
    Asc,
    Desc,
}

impl SortOrder {
    pub fn as_str(&self) -> &'static str {
        match self {
            SortOrder::Asc => "asc",
            SortOrder::Desc => "desc",
        }
    }
}

/// Repository search request.
///
/// `qualifiers` are appended to the free-text terms verbatim, e.g.
/// `in:name,description,readme` or `language:rust`.
#[derive(Debug, Clone)]
pub struct RepoSearch {
    pub terms: String,
    pub qualifiers: Vec<String>,
    pub sort: Option<RepoSort>,
    pub order: SortOrder,
    pub per_page: u8,
}

impl RepoSearch {
    pub fn new(terms: impl Into<String>) -> Self {
        Self {
            terms: terms.into(),
            qualifiers: Vec::new(),
            sort: None,
            order: SortOrder::Desc,
            per_page: 30,
        }
    }

    pub fn qualifier(mut self, qualifier: impl Into<String>) -> Self {
        self.qualifiers.push(qualifier.into());
        self
    }

    pub fn sort(mut self, sort: RepoSort, order: SortOrder) -> Self {
        self.sort = Some(sort);
        self.order = order;
        self
    }

    /// GitHub caps `per_page` at 100.
    pub fn per_page(mut self, per_page: u8) -> Self {
        self.per_page = per_page.clamp(1, 100);
        self
    }

    /// The raw `q` value before URL encoding.
    pub fn q(&self) -> String {
        let mut q = self.terms.trim().to_string();
        for qualifier in &self.qualifiers {
            q.push(' ');
            q.push_str(qualifier);
        }
        q
    }

    /// Query string for the search endpoint (without the leading `?`).
    pub fn to_query_string(&self) -> String {
        let mut query = format!("q={}", urlencoding::encode(&self.q()));
        if let Some(sort) = self.sort {
            query.push_str(&format!("&sort={}&order={}", sort.as_str(), self.order.as_str()));
        }
        query.push_str(&format!("&per_page={}", self.per_page));
        query
    }
}
