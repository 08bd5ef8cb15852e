// TestDependencies - mock implementations for testing
//
// Provides mock providers, AI and clock that can be injected into ServerDeps
// (and from there into the router) for tests.

use anyhow::Result;
use async_trait::async_trait;
use chrono::{DateTime, Duration, NaiveDate, Utc};
use std::collections::VecDeque;
use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::{Arc, Mutex};

use arxiv_client::ArxivClient;
use x_client::XClient;

use super::{BaseAI, ChatMessage, Clock, ServerDeps};
use crate::domains::projects::models::{Category, ProjectRecord, ProjectScores};
use crate::domains::projects::{ProjectCache, ProjectProvider};
use crate::domains::sources::SocialProjectSource;

/// A minimal record for tests. `scores` is
/// `[transparency, collaboration, funding, engagement]`.
pub fn sample_project(id: i64, category: Category, scores: [u8; 4]) -> ProjectRecord {
    let [transparency, collaboration, funding, engagement] = scores.map(i64::from);
    ProjectRecord {
        id,
        name: format!("Project {}", id),
        description: format!("Test project {}", id),
        category,
        scores: ProjectScores::new(transparency, collaboration, funding, engagement),
        url: format!("https://example.org/projects/{}", id),
        last_updated: NaiveDate::from_ymd_opt(2025, 1, 1).unwrap(),
    }
}

// =============================================================================
// Mock Provider
// =============================================================================

enum Outcome {
    Records(Vec<ProjectRecord>),
    Failure(String),
    Panic,
}

impl Outcome {
    fn from_result(result: std::result::Result<Vec<ProjectRecord>, String>) -> Self {
        match result {
            Ok(records) => Outcome::Records(records),
            Err(message) => Outcome::Failure(message),
        }
    }

    fn replay(&self) -> Self {
        match self {
            Outcome::Records(records) => Outcome::Records(records.clone()),
            Outcome::Failure(message) => Outcome::Failure(message.clone()),
            Outcome::Panic => Outcome::Panic,
        }
    }
}

/// Provider returning canned outcomes. With a sequence, each call consumes
/// one outcome and the last one repeats.
pub struct MockProvider {
    name: String,
    outcomes: Mutex<VecDeque<Outcome>>,
    last: Mutex<Option<Outcome>>,
    delay: Option<std::time::Duration>,
    calls: AtomicUsize,
}

impl MockProvider {
    fn with_outcomes(name: &str, outcomes: Vec<Outcome>) -> Self {
        Self {
            name: name.to_string(),
            outcomes: Mutex::new(outcomes.into()),
            last: Mutex::new(None),
            delay: None,
            calls: AtomicUsize::new(0),
        }
    }

    pub fn returning(name: &str, records: Vec<ProjectRecord>) -> Self {
        Self::with_outcomes(name, vec![Outcome::Records(records)])
    }

    pub fn failing(name: &str, message: &str) -> Self {
        Self::with_outcomes(name, vec![Outcome::Failure(message.to_string())])
    }

    pub fn panicking(name: &str) -> Self {
        Self::with_outcomes(name, vec![Outcome::Panic])
    }

    pub fn sequence(
        name: &str,
        results: Vec<std::result::Result<Vec<ProjectRecord>, String>>,
    ) -> Self {
        Self::with_outcomes(name, results.into_iter().map(Outcome::from_result).collect())
    }

    /// Sleep before answering, to exercise concurrency and ordering.
    pub fn with_delay(mut self, delay: std::time::Duration) -> Self {
        self.delay = Some(delay);
        self
    }

    /// Number of times `search` was invoked
    pub fn calls(&self) -> usize {
        self.calls.load(Ordering::SeqCst)
    }

    fn next_outcome(&self) -> Outcome {
        let mut last = self.last.lock().unwrap();
        if let Some(outcome) = self.outcomes.lock().unwrap().pop_front() {
            *last = Some(outcome.replay());
            return outcome;
        }
        last.as_ref()
            .map(Outcome::replay)
            .unwrap_or(Outcome::Records(Vec::new()))
    }
}

#[async_trait]
impl ProjectProvider for MockProvider {
    fn name(&self) -> &str {
        &self.name
    }

    async fn search(&self) -> Result<Vec<ProjectRecord>> {
        self.calls.fetch_add(1, Ordering::SeqCst);
        if let Some(delay) = self.delay {
            tokio::time::sleep(delay).await;
        }

        match self.next_outcome() {
            Outcome::Records(records) => Ok(records),
            Outcome::Failure(message) => Err(anyhow::anyhow!(message)),
            Outcome::Panic => panic!("mock provider '{}' panicked", self.name),
        }
    }
}

// =============================================================================
// Mock AI (Generic LLM capabilities)
// =============================================================================

/// A recorded completion request
#[derive(Debug, Clone)]
pub struct AICall {
    pub system: String,
    pub messages: Vec<ChatMessage>,
}

impl AICall {
    /// System prompt and every message, joined for substring checks.
    pub fn text(&self) -> String {
        std::iter::once(self.system.as_str())
            .chain(self.messages.iter().map(|m| m.content.as_str()))
            .collect::<Vec<_>>()
            .join("\n")
    }
}

pub struct MockAI {
    responses: Arc<Mutex<Vec<String>>>,
    rules: Arc<Mutex<Vec<(String, String)>>>,
    calls: Arc<Mutex<Vec<AICall>>>,
    failing: bool,
}

impl MockAI {
    pub fn new() -> Self {
        Self {
            responses: Arc::new(Mutex::new(Vec::new())),
            rules: Arc::new(Mutex::new(Vec::new())),
            calls: Arc::new(Mutex::new(Vec::new())),
            failing: false,
        }
    }

    /// Every completion returns an error.
    pub fn failing() -> Self {
        Self {
            failing: true,
            ..Self::new()
        }
    }

    /// Add a text response to the queue
    pub fn with_response(self, response: impl Into<String>) -> Self {
        self.responses.lock().unwrap().push(response.into());
        self
    }

    /// Answer with `response` whenever the system prompt contains `needle`.
    /// Rules are checked before the queue, so concurrent prompts get
    /// deterministic answers.
    pub fn when_system_contains(self, needle: impl Into<String>, response: impl Into<String>) -> Self {
        self.rules
            .lock()
            .unwrap()
            .push((needle.into(), response.into()));
        self
    }

    /// Get all requests that were sent to the AI
    pub fn calls(&self) -> Vec<AICall> {
        self.calls.lock().unwrap().clone()
    }

    /// Check if a request containing the given text was sent
    pub fn was_called_with(&self, text: &str) -> bool {
        self.calls
            .lock()
            .unwrap()
            .iter()
            .any(|c| c.text().contains(text))
    }

    /// Get the number of times the AI was called
    pub fn call_count(&self) -> usize {
        self.calls.lock().unwrap().len()
    }
}

impl Default for MockAI {
    fn default() -> Self {
        Self::new()
    }
}

#[async_trait]
impl BaseAI for MockAI {
    async fn complete(&self, system: &str, messages: &[ChatMessage]) -> Result<String> {
        // Record the call
        self.calls.lock().unwrap().push(AICall {
            system: system.to_string(),
            messages: messages.to_vec(),
        });

        if self.failing {
            anyhow::bail!("mock AI unavailable");
        }

        if let Some((_, response)) = self
            .rules
            .lock()
            .unwrap()
            .iter()
            .find(|(needle, _)| system.contains(needle.as_str()))
        {
            return Ok(response.clone());
        }

        let mut responses = self.responses.lock().unwrap();
        if !responses.is_empty() {
            Ok(responses.remove(0))
        } else {
            // Return default mock response
            Ok("Mock AI response".to_string())
        }
    }
}

// =============================================================================
// Manual Clock
// =============================================================================

/// Clock that only moves when told to.
pub struct ManualClock {
    now: Mutex<DateTime<Utc>>,
}

impl ManualClock {
    pub fn at(now: DateTime<Utc>) -> Self {
        Self {
            now: Mutex::new(now),
        }
    }

    pub fn advance(&self, by: Duration) {
        *self.now.lock().unwrap() += by;
    }

    pub fn set(&self, now: DateTime<Utc>) {
        *self.now.lock().unwrap() = now;
    }
}

impl Default for ManualClock {
    /// 2025-01-01T12:00:00Z
    fn default() -> Self {
        Self::at(
            NaiveDate::from_ymd_opt(2025, 1, 1)
                .and_then(|d| d.and_hms_opt(12, 0, 0))
                .unwrap()
                .and_utc(),
        )
    }
}

impl Clock for ManualClock {
    fn now(&self) -> DateTime<Utc> {
        *self.now.lock().unwrap()
    }
}

// =============================================================================
// TestDependencies - Builder for test dependencies
// =============================================================================

/// Nothing routable listens here, so arXiv calls fail fast unless a test
/// points the client somewhere else.
const UNROUTABLE_ARXIV_URL: &str = "http://127.0.0.1:9/api/query";

#[derive(Clone)]
pub struct TestDependencies {
    pub providers: Vec<Arc<MockProvider>>,
    pub ai: Option<Arc<MockAI>>,
    pub clock: Arc<ManualClock>,
    pub arxiv: ArxivClient,
    /// Live social search against this URL; curated posts when unset
    pub x_base_url: Option<String>,
}

impl TestDependencies {
    pub fn new() -> Self {
        Self {
            providers: Vec::new(),
            ai: None,
            clock: Arc::new(ManualClock::default()),
            arxiv: ArxivClient::new().with_base_url(UNROUTABLE_ARXIV_URL),
            x_base_url: None,
        }
    }

    /// Register a mock provider (after submissions, before the Hetu registry)
    pub fn mock_provider(mut self, provider: MockProvider) -> Self {
        self.providers.push(Arc::new(provider));
        self
    }

    /// Set a mock AI; without one the heuristics answer and the assistant is off
    pub fn mock_ai(mut self, ai: MockAI) -> Self {
        self.ai = Some(Arc::new(ai));
        self
    }

    pub fn arxiv_base_url(mut self, url: &str) -> Self {
        self.arxiv = ArxivClient::new().with_base_url(url);
        self
    }

    pub fn x_base_url(mut self, url: &str) -> Self {
        self.x_base_url = Some(url.to_string());
        self
    }

    /// Convert into ServerDeps for testing
    pub fn into_deps(self) -> ServerDeps {
        let sources = self
            .providers
            .into_iter()
            .map(|p| p as Arc<dyn ProjectProvider>)
            .collect();
        let ai = self.ai.map(|ai| ai as Arc<dyn BaseAI>);
        let social = match self.x_base_url {
            Some(url) => SocialProjectSource::live(
                XClient::new("test-token").with_base_url(url),
                self.clock.clone(),
            ),
            None => SocialProjectSource::curated(self.clock.clone()),
        };

        ServerDeps::new(
            sources,
            ai,
            self.arxiv,
            Arc::new(social),
            self.clock,
            Arc::new(ProjectCache::default()),
        )
    }
}

impl Default for TestDependencies {
    fn default() -> Self {
        Self::new()
    }
}
