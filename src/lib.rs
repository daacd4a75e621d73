//! whale-boot: container bootstrap for the whale watcher
//!
//! A library for preparing the watcher's YAML configuration on startup:
//! idempotent generation, operator-supplied address merging, a best-effort
//! boot notification and the handoff to the long-running watcher.

pub mod bootstrap;
pub mod config;
pub mod document;
pub mod handoff;
pub mod merge;
pub mod notify;
pub mod store;
