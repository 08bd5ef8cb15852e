use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

pub const MAX_SCORE: u8 = 100;

/// The four 0–100 metrics attached to every project.
///
/// Values are clamped on construction and on deserialization, so a
/// `ProjectScores` never holds anything outside `0..=100`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(from = "RawScores")]
pub struct ProjectScores {
    transparency: u8,
    collaboration: u8,
    funding: u8,
    engagement: u8,
}

#[derive(Deserialize)]
struct RawScores {
    transparency: f64,
    collaboration: f64,
    funding: f64,
    engagement: f64,
}

impl From<RawScores> for ProjectScores {
    fn from(raw: RawScores) -> Self {
        Self::from_f64(raw.transparency, raw.collaboration, raw.funding, raw.engagement)
    }
}

impl ProjectScores {
    pub fn new(transparency: i64, collaboration: i64, funding: i64, engagement: i64) -> Self {
        Self {
            transparency: clamp_score(transparency),
            collaboration: clamp_score(collaboration),
            funding: clamp_score(funding),
            engagement: clamp_score(engagement),
        }
    }

    /// Rounds to the nearest integer; NaN becomes 0.
    pub fn from_f64(transparency: f64, collaboration: f64, funding: f64, engagement: f64) -> Self {
        let round = |v: f64| if v.is_nan() { 0 } else { v.round() as i64 };
        Self::new(
            round(transparency),
            round(collaboration),
            round(funding),
            round(engagement),
        )
    }

    pub fn uniform(value: i64) -> Self {
        Self::new(value, value, value, value)
    }

    pub fn transparency(&self) -> u8 {
        self.transparency
    }

    pub fn collaboration(&self) -> u8 {
        self.collaboration
    }

    pub fn funding(&self) -> u8 {
        self.funding
    }

    pub fn engagement(&self) -> u8 {
        self.engagement
    }

    pub fn get(&self, key: ScoreKey) -> u8 {
        match key {
            ScoreKey::Transparency => self.transparency,
            ScoreKey::Collaboration => self.collaboration,
            ScoreKey::Funding => self.funding,
            ScoreKey::Engagement => self.engagement,
        }
    }
}

fn clamp_score(value: i64) -> u8 {
    value.clamp(0, MAX_SCORE as i64) as u8
}

/// Which score a listing is ordered by.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ScoreKey {
    #[default]
    Transparency,
    Collaboration,
    Funding,
    Engagement,
}

impl ScoreKey {
    pub const ALL: [ScoreKey; 4] = [
        ScoreKey::Transparency,
        ScoreKey::Collaboration,
        ScoreKey::Funding,
        ScoreKey::Engagement,
    ];

    pub fn as_str(&self) -> &'static str {
        match self {
            ScoreKey::Transparency => "transparency",
            ScoreKey::Collaboration => "collaboration",
            ScoreKey::Funding => "funding",
            ScoreKey::Engagement => "engagement",
        }
    }
}

impl fmt::Display for ScoreKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[error("Unknown sort key '{0}'")]
pub struct UnknownScoreKey(pub String);

impl FromStr for ScoreKey {
    type Err = UnknownScoreKey;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::ALL
            .iter()
            .copied()
            .find(|k| k.as_str() == s)
            .ok_or_else(|| UnknownScoreKey(s.to_string()))
    }
}
