//! Built-in illustrative projects, served when no provider produced anything
//! and nothing has been cached yet.

use chrono::NaiveDate;

use super::models::{Category, ProjectRecord, ProjectScores};

pub fn fallback_projects() -> Vec<ProjectRecord> {
    vec![
        ProjectRecord {
            id: 1,
            name: "Open Science Framework".into(),
            description: "A decentralized platform for open science research and collaboration."
                .into(),
            category: Category::OpenAccessResearch,
            scores: ProjectScores::new(85, 92, 78, 88),
            url: "https://github.com/example/open-science-framework".into(),
            last_updated: date(2025, 11, 15),
        },
        ProjectRecord {
            id: 2,
            name: "BioDAO".into(),
            description: "A decentralized autonomous organization focused on funding and supporting biological research.".into(),
            category: Category::Biology,
            scores: ProjectScores::new(90, 85, 95, 80),
            url: "https://github.com/example/bio-dao".into(),
            last_updated: date(2025, 11, 10),
        },
        ProjectRecord {
            id: 3,
            name: "AI Research Commons".into(),
            description: "A collaborative platform for open AI research and model sharing.".into(),
            category: Category::Ai,
            scores: ProjectScores::new(95, 88, 75, 92),
            url: "https://github.com/example/ai-research-commons".into(),
            last_updated: date(2025, 11, 12),
        },
    ]
}

fn date(y: i32, m: u32, d: u32) -> NaiveDate {
    NaiveDate::from_ymd_opt(y, m, d).unwrap_or_default()
}
