// Library root: re-exports all modules so integration tests and the binary
// can reach the crate's public API.

pub mod config;
pub mod engine;
pub mod players;
pub mod session;
pub mod trade;
pub mod valuation;
pub mod verdict;
