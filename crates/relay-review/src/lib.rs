//! Pull-request review relay: GitHub diff retrieval, Claude review
//! generation, and comment publication.
//!
//! Provides the relay pipeline: hosting-API client, prompt construction,
//! model-API client with response extraction, and the orchestrator that
//! runs the four steps in order.

pub mod claude;
pub mod github;
pub mod pipeline;
pub mod prompt;
