//! # lexaid_core
//!
//! Core domain logic for Lexaid: the chat contracts, request normalization
//! and the upstream model client.

pub mod config;
pub mod llm;
pub mod relay;

/// Returns the crate version.
pub fn version() -> &'static str {
    env!("CARGO_PKG_VERSION")
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn version_is_not_empty() {
        assert!(!version().is_empty());
    }
}
