//! Port contracts for advisor invocation.

pub mod invoker;

#[cfg(test)]
pub use invoker::MockAdvisorInvoker;
pub use invoker::{AdvisorInvoker, InvocationError, InvocationResult};
