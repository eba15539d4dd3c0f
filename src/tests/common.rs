use crate::error::{ResolutionFailure, Result};
use crate::github::{GitHubContext, RunnerContext};
use crate::hash::DigestAlgorithm;
use crate::in_toto::{DigestSet, Subject};
use crate::registry::DigestResolver;
use crate::slsa::generators::{
    GITHUB_HOSTED_BUILDER_ID, make_build_metadata_v02, make_builder_v02, make_config_source_v02,
    make_invocation_v02,
};
use crate::slsa::statement::{Statement, assemble_statement};
use crate::storage::StatementStore;

use async_trait::async_trait;
use std::collections::HashMap;
use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::Mutex;
use std::thread::{self, ThreadId};

/// In-memory registry keyed by full reference.
#[derive(Default)]
pub struct FakeRegistry {
    images: HashMap<String, String>,
    unreachable: bool,
    lookups: AtomicUsize,
}

impl FakeRegistry {
    pub fn with_image(mut self, reference: &str, digest: &str) -> Self {
        self.images.insert(reference.to_string(), digest.to_string());
        self
    }

    pub fn unreachable(mut self) -> Self {
        self.unreachable = true;
        self
    }

    pub fn lookups(&self) -> usize {
        self.lookups.load(Ordering::SeqCst)
    }
}

#[async_trait]
impl DigestResolver for FakeRegistry {
    async fn resolve_digest(&self, reference: &str) -> std::result::Result<DigestSet, ResolutionFailure> {
        self.lookups.fetch_add(1, Ordering::SeqCst);
        if self.unreachable {
            return Err(ResolutionFailure::Unreachable(
                "connection refused".to_string(),
            ));
        }
        match self.images.get(reference) {
            Some(digest) => Ok(DigestSet::parse(digest)?),
            None => Err(ResolutionFailure::NotFound),
        }
    }
}

/// Keeps every stored statement in memory, with the thread that stored it.
#[derive(Default)]
pub struct RecordingStore {
    stored: Mutex<Vec<Statement>>,
    threads: Mutex<Vec<ThreadId>>,
}

impl RecordingStore {
    pub fn stored(&self) -> Vec<Statement> {
        self.stored.lock().unwrap().clone()
    }

    pub fn threads(&self) -> Vec<ThreadId> {
        self.threads.lock().unwrap().clone()
    }
}

impl StatementStore for RecordingStore {
    fn store_statement(&self, statement: &Statement) -> Result<String> {
        self.threads.lock().unwrap().push(thread::current().id());
        let mut stored = self.stored.lock().unwrap();
        stored.push(statement.clone());
        Ok(format!("memory://{}", stored.len() - 1))
    }
}

pub fn github_context() -> GitHubContext {
    serde_json::from_value(serde_json::json!({
        "repository": "acme/app",
        "repository_owner": "acme",
        "sha": "0123456789abcdef0123456789abcdef01234567",
        "ref": "refs/heads/main",
        "workflow": ".github/workflows/build.yml",
        "run_id": "4242",
        "run_number": "7",
        "actor": "octocat",
        "event_name": "push",
        "server_url": "https://github.com",
        "event": {}
    }))
    .unwrap()
}

pub fn runner_context() -> RunnerContext {
    RunnerContext {
        os: Some("Linux".to_string()),
        arch: Some("X64".to_string()),
        name: Some("runner-1".to_string()),
        environment: Some("github-hosted".to_string()),
    }
}

pub fn sample_statement() -> Statement {
    let digest = DigestSet::from_hex(DigestAlgorithm::Sha256, &"a".repeat(64)).unwrap();
    let source = make_config_source_v02(
        "git+https://github.com/acme/app",
        DigestSet::from_hex(DigestAlgorithm::Sha1, &"b".repeat(40)).unwrap(),
        ".github/workflows/build.yml",
    );

    assemble_statement(
        vec![Subject::new("ghcr.io/acme/app:v1", digest)],
        make_builder_v02(GITHUB_HOSTED_BUILDER_ID),
        make_invocation_v02(source, None, None),
        make_build_metadata_v02("4242"),
    )
    .unwrap()
    .into_statement()
}
