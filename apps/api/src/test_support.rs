//! Fakes shared by unit and router tests.

use std::sync::atomic::{AtomicBool, AtomicUsize, Ordering};
use std::sync::{Arc, Mutex};

use async_trait::async_trait;

use crate::config::Config;
use crate::datauri::DataUri;
use crate::github::{GitHubError, RepoSource};
use crate::llm_client::{GenerativeBackend, LlmError, PromptPart};
use crate::models::repository::Repository;
use crate::state::AppState;
use crate::store::MemoryPreferenceStore;

pub fn repo(id: u64, name: &str) -> Repository {
    Repository {
        id,
        name: name.to_string(),
        description: None,
        html_url: format!("https://github.com/octocat/{name}"),
        homepage: None,
        language: None,
    }
}

pub fn repo_with_description(id: u64, name: &str, description: &str) -> Repository {
    Repository {
        description: Some(description.to_string()),
        ..repo(id, name)
    }
}

/// Repository listing that serves a mutable, in-memory result.
#[derive(Default)]
pub struct FakeRepoSource {
    repos: Mutex<Vec<Repository>>,
    failing: AtomicBool,
    calls: AtomicUsize,
    last_username: Mutex<Option<String>>,
}

impl FakeRepoSource {
    pub fn returning(repos: Vec<Repository>) -> Self {
        let source = Self::default();
        source.set_repos(repos);
        source
    }

    pub fn failing() -> Self {
        let source = Self::default();
        source.set_failing(true);
        source
    }

    pub fn set_repos(&self, repos: Vec<Repository>) {
        *self.repos.lock().unwrap() = repos;
    }

    pub fn set_failing(&self, failing: bool) {
        self.failing.store(failing, Ordering::SeqCst);
    }

    pub fn calls(&self) -> usize {
        self.calls.load(Ordering::SeqCst)
    }

    pub fn last_username(&self) -> Option<String> {
        self.last_username.lock().unwrap().clone()
    }
}

#[async_trait]
impl RepoSource for FakeRepoSource {
    async fn list_repos(&self, username: &str) -> Result<Vec<Repository>, GitHubError> {
        self.calls.fetch_add(1, Ordering::SeqCst);
        *self.last_username.lock().unwrap() = Some(username.to_string());
        if self.failing.load(Ordering::SeqCst) {
            return Err(GitHubError::Status {
                username: username.to_string(),
                status: 404,
            });
        }
        Ok(self.repos.lock().unwrap().clone())
    }
}

/// Backend that answers every call with canned output and records image prompts.
pub struct ScriptedBackend {
    text: String,
    image_prompts: Mutex<Vec<Vec<PromptPart>>>,
}

impl Default for ScriptedBackend {
    fn default() -> Self {
        Self::with_text("A tidy little project.")
    }
}

impl ScriptedBackend {
    pub fn with_text(text: &str) -> Self {
        ScriptedBackend {
            text: text.to_string(),
            image_prompts: Mutex::new(Vec::new()),
        }
    }

    /// The image every `generate_image` call returns.
    pub fn image() -> DataUri {
        DataUri::parse_image("data:image/png;base64,iVBORw==").unwrap()
    }

    pub fn image_calls(&self) -> usize {
        self.image_prompts.lock().unwrap().len()
    }

    pub fn last_image_prompt(&self) -> Option<Vec<PromptPart>> {
        self.image_prompts.lock().unwrap().last().cloned()
    }
}

#[async_trait]
impl GenerativeBackend for ScriptedBackend {
    async fn generate_text(&self, _prompt: &str) -> Result<String, LlmError> {
        Ok(self.text.clone())
    }

    async fn generate_image(&self, parts: Vec<PromptPart>) -> Result<DataUri, LlmError> {
        self.image_prompts.lock().unwrap().push(parts);
        Ok(Self::image())
    }
}

/// Backend whose every call fails as an upstream API error would.
pub struct FailingBackend;

#[async_trait]
impl GenerativeBackend for FailingBackend {
    async fn generate_text(&self, _prompt: &str) -> Result<String, LlmError> {
        Err(LlmError::Api {
            status: 503,
            message: "model overloaded".to_string(),
        })
    }

    async fn generate_image(&self, _parts: Vec<PromptPart>) -> Result<DataUri, LlmError> {
        Err(LlmError::NoImage)
    }
}

/// State wired entirely to in-memory fakes.
pub fn test_state(
    repos: Arc<FakeRepoSource>,
    llm: Arc<dyn GenerativeBackend>,
) -> AppState {
    AppState {
        prefs: Arc::new(MemoryPreferenceStore::default()),
        repos,
        llm,
        config: Config::for_tests(),
    }
}
