// Shared test doubles for the integration tests
#![allow(dead_code)]

use asteroid_mining::client::{PromptRequest, TextGenerator};
use asteroid_mining::error::{GenerationError, TextGenerationError};
use asteroid_mining::generator::{AsteroidGenerator, GeneratorMode};
use asteroid_mining::Asteroid;
use async_trait::async_trait;
use std::collections::VecDeque;
use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::Mutex;

pub enum Reply {
    Text(String),
    ServiceDown,
}

/// Answers prompts from a fixed script and remembers what it was asked.
pub struct ScriptedTextGenerator {
    replies: Mutex<VecDeque<Reply>>,
    requests: Mutex<Vec<PromptRequest>>,
}

impl ScriptedTextGenerator {
    pub fn new(replies: Vec<Reply>) -> Self {
        Self {
            replies: Mutex::new(replies.into()),
            requests: Mutex::new(Vec::new()),
        }
    }

    pub fn replying(text: &str) -> Self {
        Self::new(vec![Reply::Text(text.to_string())])
    }

    pub fn always_down() -> Self {
        Self::new(Vec::new())
    }

    pub fn requests(&self) -> Vec<PromptRequest> {
        self.requests.lock().unwrap().clone()
    }
}

#[async_trait]
impl TextGenerator for ScriptedTextGenerator {
    async fn complete(&self, request: &PromptRequest) -> Result<String, TextGenerationError> {
        self.requests.lock().unwrap().push(request.clone());
        match self.replies.lock().unwrap().pop_front() {
            Some(Reply::Text(text)) => Ok(text),
            Some(Reply::ServiceDown) | None => Err(TextGenerationError::Status {
                status: 503,
                body: "service unavailable".to_string(),
            }),
        }
    }
}

/// Generator that counts calls and fails or succeeds on demand.
pub struct CountingGenerator {
    pub calls: AtomicUsize,
    asteroid: Option<Asteroid>,
}

impl CountingGenerator {
    pub fn succeeding(asteroid: Asteroid) -> Self {
        Self {
            calls: AtomicUsize::new(0),
            asteroid: Some(asteroid),
        }
    }

    pub fn failing() -> Self {
        Self {
            calls: AtomicUsize::new(0),
            asteroid: None,
        }
    }

    pub fn calls(&self) -> usize {
        self.calls.load(Ordering::SeqCst)
    }
}

#[async_trait]
impl AsteroidGenerator for CountingGenerator {
    fn mode(&self) -> GeneratorMode {
        GeneratorMode::Procedural
    }

    async fn generate(&self) -> Result<Asteroid, GenerationError> {
        self.calls.fetch_add(1, Ordering::SeqCst);
        match &self.asteroid {
            Some(asteroid) => Ok(asteroid.clone()),
            None => Err(GenerationError::from(TextGenerationError::EmptyResponse)),
        }
    }
}
