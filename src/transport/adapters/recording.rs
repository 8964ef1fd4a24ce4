//! Invoker wrapper that records every prompt it forwards.

use crate::advisor::domain::Advisor;
use crate::transport::ports::{AdvisorInvoker, InvocationResult};
use async_trait::async_trait;
use std::sync::{Arc, Mutex};

/// One forwarded invocation.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RecordedCall {
    /// Alias of the invoked advisor.
    pub alias: String,
    /// Prompt handed to the advisor.
    pub prompt: String,
}

/// Delegating invoker that keeps a log of each call it forwards.
///
/// Clones share the same log, so a test can keep one handle while the
/// council owns another.
#[derive(Debug)]
pub struct RecordingInvoker<I> {
    inner: Arc<I>,
    calls: Arc<Mutex<Vec<RecordedCall>>>,
}

impl<I> Clone for RecordingInvoker<I> {
    fn clone(&self) -> Self {
        Self {
            inner: Arc::clone(&self.inner),
            calls: Arc::clone(&self.calls),
        }
    }
}

impl<I> RecordingInvoker<I> {
    /// Wraps `inner`.
    #[must_use]
    pub fn new(inner: I) -> Self {
        Self {
            inner: Arc::new(inner),
            calls: Arc::new(Mutex::new(Vec::new())),
        }
    }

    /// Returns the recorded calls in invocation order.
    ///
    /// A poisoned log yields whatever was recorded before the panic.
    #[must_use]
    pub fn calls(&self) -> Vec<RecordedCall> {
        self.calls
            .lock()
            .unwrap_or_else(std::sync::PoisonError::into_inner)
            .clone()
    }

    /// Returns the prompts sent to `alias`, oldest first.
    #[must_use]
    pub fn prompts_for(&self, alias: &str) -> Vec<String> {
        self.calls()
            .into_iter()
            .filter(|call| call.alias == alias)
            .map(|call| call.prompt)
            .collect()
    }
}

#[async_trait]
impl<I> AdvisorInvoker for RecordingInvoker<I>
where
    I: AdvisorInvoker,
{
    async fn invoke(&self, advisor: &Advisor, prompt: &str) -> InvocationResult<String> {
        self.calls
            .lock()
            .unwrap_or_else(std::sync::PoisonError::into_inner)
            .push(RecordedCall {
                alias: advisor.alias().to_string(),
                prompt: prompt.to_owned(),
            });
        self.inner.invoke(advisor, prompt).await
    }
}
