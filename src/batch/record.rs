use serde::{Deserialize, Serialize};

use crate::verdict::{Category, Verdict};

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
/// A stored interview review.
///
/// Fields the verifier does not know about are kept in `extra` and written back untouched.
pub struct ReviewRecord {
    pub id: u64,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub company_id: Option<u64>,
    #[serde(default)]
    pub pros: String,
    #[serde(default)]
    pub cons: String,
    #[serde(default)]
    pub interview_questions: Option<String>,
    #[serde(default)]
    pub is_verified: bool,
    #[serde(default)]
    pub verification_reason: Option<String>,
    #[serde(default)]
    pub verification_confidence: Option<f32>,
    #[serde(default)]
    pub verification_category: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub status: Option<String>,
    #[serde(default)]
    pub is_approved: bool,
    #[serde(flatten)]
    pub extra: serde_json::Map<String, serde_json::Value>,
}

impl ReviewRecord {
    /// Text submitted for verification: `pros + " " + cons + " " + interview_questions`.
    pub fn content(&self) -> String {
        format!(
            "{} {} {}",
            self.pros,
            self.cons,
            self.interview_questions.as_deref().unwrap_or("")
        )
    }

    /// Writes the verdict fields onto the record.
    pub fn apply(&mut self, update: &VerdictUpdate) {
        self.is_verified = true;
        self.verification_reason = Some(update.reason.clone());
        self.verification_confidence = Some(update.confidence);
        self.verification_category = Some(update.category.as_str().to_string());
        self.status = Some(update.status.to_string());
        self.is_approved = update.is_approved;
    }
}

#[derive(Debug, Clone, PartialEq)]
/// Verdict fields persisted for one review.
pub struct VerdictUpdate {
    pub reason: String,
    pub confidence: f32,
    pub category: Category,
    pub status: &'static str,
    pub is_approved: bool,
}

impl VerdictUpdate {
    pub fn from_verdict(verdict: &Verdict) -> Self {
        Self {
            reason: verdict.reason.clone(),
            confidence: verdict.confidence,
            category: verdict.category,
            status: verdict.status(),
            is_approved: verdict.is_appropriate,
        }
    }
}

#[derive(Debug, Clone, Default, PartialEq, Eq)]
/// Which reviews a batch run visits.
pub struct BatchFilter {
    /// Re-verify reviews that already carry a verdict.
    pub force: bool,
    /// Restrict the run to one company.
    pub company_id: Option<u64>,
}

impl BatchFilter {
    pub fn matches(&self, record: &ReviewRecord) -> bool {
        if !self.force && record.is_verified {
            return false;
        }
        match self.company_id {
            Some(company_id) => record.company_id == Some(company_id),
            None => true,
        }
    }
}
