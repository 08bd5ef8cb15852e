//! Atom feed parsing for `/api/query` responses.
//!
//! The feed layout is fixed and shallow, so entries are pulled apart with
//! regular expressions rather than a full XML parser.

use chrono::{DateTime, Utc};
use lazy_static::lazy_static;
use regex::Regex;

use crate::error::{ArxivError, Result};
use crate::types::Paper;

lazy_static! {
    static ref ENTRY: Regex = Regex::new(r"(?s)<entry>(.*?)</entry>").unwrap();
    static ref ID: Regex = Regex::new(r"(?s)<id>(.*?)</id>").unwrap();
    static ref TITLE: Regex = Regex::new(r"(?s)<title[^>]*>(.*?)</title>").unwrap();
    static ref SUMMARY: Regex = Regex::new(r"(?s)<summary[^>]*>(.*?)</summary>").unwrap();
    static ref PUBLISHED: Regex = Regex::new(r"<published>(.*?)</published>").unwrap();
    static ref UPDATED: Regex = Regex::new(r"<updated>(.*?)</updated>").unwrap();
    static ref AUTHOR: Regex = Regex::new(r"(?s)<author>\s*<name>(.*?)</name>").unwrap();
    static ref CATEGORY: Regex = Regex::new(r#"<category[^>]*\bterm="([^"]+)""#).unwrap();
    static ref PRIMARY_CATEGORY: Regex =
        Regex::new(r#"<arxiv:primary_category[^>]*\bterm="([^"]+)""#).unwrap();
    static ref DOI: Regex = Regex::new(r"(?s)<arxiv:doi[^>]*>(.*?)</arxiv:doi>").unwrap();
    static ref PDF_LINK: Regex = Regex::new(r#"<link[^>]*title="pdf"[^>]*href="([^"]+)""#).unwrap();
    static ref WHITESPACE: Regex = Regex::new(r"\s+").unwrap();
    static ref ENTITY: Regex =
        Regex::new(r"&(#[0-9]{1,7}|#[xX][0-9a-fA-F]{1,6}|lt|gt|quot|apos|amp);").unwrap();
}

/// Parse every `<entry>` of a feed into a [`Paper`].
///
/// A feed whose only entry is an arXiv error entry becomes [`ArxivError::Api`].
pub fn parse_feed(xml: &str) -> Result<Vec<Paper>> {
    let mut papers = Vec::new();

    for entry in ENTRY.captures_iter(xml) {
        let body = &entry[1];
        let id = capture(&ID, body).ok_or_else(|| ArxivError::Parse("entry without <id>".into()))?;

        if id.contains("/api/errors") {
            let message = capture(&SUMMARY, body).unwrap_or_else(|| id.clone());
            return Err(ArxivError::Api(message));
        }

        papers.push(parse_entry(id, body)?);
    }

    Ok(papers)
}

fn parse_entry(id: String, body: &str) -> Result<Paper> {
    let title = capture(&TITLE, body).unwrap_or_default();
    let summary = capture(&SUMMARY, body).unwrap_or_default();
    let published_date = parse_timestamp(&PUBLISHED, body, &id)?;
    let updated_date = parse_timestamp(&UPDATED, body, &id)?;

    let authors = AUTHOR
        .captures_iter(body)
        .map(|c| normalize(&c[1]))
        .collect();
    let categories = CATEGORY
        .captures_iter(body)
        .map(|c| c[1].to_string())
        .collect();
    let primary_category = PRIMARY_CATEGORY
        .captures(body)
        .map(|c| c[1].to_string());
    let doi = capture(&DOI, body);
    let pdf_url = capture(&PDF_LINK, body).unwrap_or_else(|| id.replacen("/abs/", "/pdf/", 1));

    Ok(Paper {
        arxiv_url: id.clone(),
        id,
        title,
        authors,
        summary,
        published_date,
        updated_date,
        categories,
        primary_category,
        pdf_url,
        doi,
    })
}

fn capture(re: &Regex, body: &str) -> Option<String> {
    re.captures(body)
        .map(|c| normalize(&c[1]))
        .filter(|s| !s.is_empty())
}

fn parse_timestamp(re: &Regex, body: &str, id: &str) -> Result<DateTime<Utc>> {
    let raw = capture(re, body)
        .ok_or_else(|| ArxivError::Parse(format!("missing timestamp in entry {}", id)))?;
    DateTime::parse_from_rfc3339(&raw)
        .map(|dt| dt.with_timezone(&Utc))
        .map_err(|e| ArxivError::Parse(format!("bad timestamp '{}' in entry {}: {}", raw, id, e)))
}

/// Collapse whitespace runs (titles and abstracts are hard-wrapped) and decode
/// the predefined XML entities and numeric character references in one pass.
fn normalize(raw: &str) -> String {
    let collapsed = WHITESPACE.replace_all(raw.trim(), " ");
    ENTITY
        .replace_all(&collapsed, |caps: &regex::Captures| {
            decode_entity(&caps[1]).unwrap_or_else(|| caps[0].to_string())
        })
        .into_owned()
}

/// `None` for references to invalid code points; those are left as written.
fn decode_entity(name: &str) -> Option<String> {
    let decoded = match name {
        "lt" => '<',
        "gt" => '>',
        "quot" => '"',
        "apos" => '\'',
        "amp" => '&',
        _ => {
            let digits = name.strip_prefix('#')?;
            let code = match digits.strip_prefix(|c: char| c == 'x' || c == 'X') {
                Some(hex) => u32::from_str_radix(hex, 16).ok()?,
                None => digits.parse().ok()?,
            };
            char::from_u32(code)?
        }
    };
    Some(decoded.to_string())
}
