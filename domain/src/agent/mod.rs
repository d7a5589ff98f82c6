//! Council agent domain
//!
//! - [`entities::Agent`]: a configured council member
//! - [`role::Role`]: the role an agent plays in the debate
//! - [`roster::RoleBuckets`]: partition of a roster into debate buckets

pub mod entities;
pub mod role;
pub mod roster;
