//! Molotok — a terminal front-end for the auction catalog service.
//!
//! Library surface for the binary and the integration tests: the domain
//! core (`core`), the HTTP client (`api`) and the ratatui adapter (`tui`).

pub mod api;
pub mod core;
pub mod tui;

#[cfg(test)]
pub mod test_support;
