//! Subcommand implementations
//!
//! Each command fetches from a [`MetricsSource`](kubestate_lib::MetricsSource)
//! and returns the rendered report; printing is left to `main`.

pub mod get;
pub mod list;
pub mod top;

#[cfg(test)]
pub(crate) mod fixtures;
