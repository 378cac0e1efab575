//! Test fixtures for integration tests.

use std::path::{Path, PathBuf};

use verifier::batch::ReviewRecord;
use verifier::lexicon::Lexicon;
use verifier::service::ReviewVerifier;

pub const DEFAULT_COMPANY_ID: u64 = 100;

pub const CLEAN_PROS: &str = "El equipo es amable y la oferta competitiva";

pub const CLEAN_CONS: &str = "El proceso fue largo";

#[derive(Default)]
pub struct ReviewRecordBuilder {
    id: Option<u64>,
    company_id: Option<u64>,
    pros: Option<String>,
    cons: Option<String>,
    interview_questions: Option<String>,
    is_verified: bool,
    extra: serde_json::Map<String, serde_json::Value>,
}

impl ReviewRecordBuilder {
    pub fn new(id: u64) -> Self {
        Self {
            id: Some(id),
            ..Default::default()
        }
    }

    pub fn company_id(mut self, id: u64) -> Self {
        self.company_id = Some(id);
        self
    }

    pub fn pros(mut self, text: &str) -> Self {
        self.pros = Some(text.to_string());
        self
    }

    pub fn cons(mut self, text: &str) -> Self {
        self.cons = Some(text.to_string());
        self
    }

    pub fn interview_questions(mut self, text: &str) -> Self {
        self.interview_questions = Some(text.to_string());
        self
    }

    pub fn verified(mut self) -> Self {
        self.is_verified = true;
        self
    }

    pub fn extra(mut self, key: &str, value: serde_json::Value) -> Self {
        self.extra.insert(key.to_string(), value);
        self
    }

    pub fn clean(self) -> Self {
        self.pros(CLEAN_PROS).cons(CLEAN_CONS)
    }

    pub fn build(self) -> ReviewRecord {
        ReviewRecord {
            id: self.id.unwrap_or(1),
            company_id: Some(self.company_id.unwrap_or(DEFAULT_COMPANY_ID)),
            pros: self.pros.unwrap_or_default(),
            cons: self.cons.unwrap_or_default(),
            interview_questions: self.interview_questions,
            is_verified: self.is_verified,
            verification_reason: None,
            verification_confidence: None,
            verification_category: None,
            status: Some("pending".to_string()),
            is_approved: false,
            extra: self.extra,
        }
    }
}

/// Writes `records` as a JSON review store under `dir`.
pub fn write_review_store(dir: &Path, records: &[ReviewRecord]) -> PathBuf {
    let path = dir.join("reviews.json");
    let json = serde_json::to_vec_pretty(records).expect("records should serialize");
    std::fs::write(&path, json).expect("store should be writable");
    path
}

pub fn read_review_store(path: &Path) -> Vec<ReviewRecord> {
    let raw = std::fs::read_to_string(path).expect("store should be readable");
    serde_json::from_str(&raw).expect("store should parse")
}

pub fn lexicon_only_verifier() -> ReviewVerifier {
    ReviewVerifier::lexicon_only(Lexicon::builtin().expect("built-in lexicon should parse"))
}
