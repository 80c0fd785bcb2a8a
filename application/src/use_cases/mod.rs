//! Use cases
//!
//! Application-level operations that orchestrate domain logic.
//!
//! [`run_query::RunQueryUseCase`] is the entry point; the other modules are
//! its collaborators, each usable on its own.

pub mod invoker;
pub mod retry;
pub mod run_query;
pub mod selector;
pub mod synthesizer;

#[cfg(test)]
pub(crate) mod test_support;
