//! Application-level configuration.
//!
//! - [`DebateParams`]: revision loop, call timeout and consensus rule

pub mod debate_params;

pub use debate_params::DebateParams;
