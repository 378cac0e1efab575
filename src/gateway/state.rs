use std::sync::Arc;

use crate::service::ReviewVerifier;

#[derive(Clone)]
pub struct HandlerState {
    pub verifier: Arc<ReviewVerifier>,
}

impl HandlerState {
    pub fn new(verifier: Arc<ReviewVerifier>) -> Self {
        Self { verifier }
    }
}
