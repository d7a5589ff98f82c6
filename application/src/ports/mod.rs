//! Port definitions
//!
//! Interfaces the debate engine depends on. Adapters live in the
//! infrastructure and presentation layers.

pub mod conversation_logger;
pub mod llm_gateway;
pub mod progress;
