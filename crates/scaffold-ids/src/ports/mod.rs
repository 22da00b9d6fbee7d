//! Ports Layer - Trait definitions
//!
//! - `inbound`: API offered to callers (driving port)
//! - `outbound`: randomness the domain depends on (driven port)

pub mod inbound;
pub mod outbound;

pub use inbound::IdentityApi;
pub use outbound::RandomSource;
