//! Core library for the `reqchain` CLI.
//!
//! A run loads chains of HTTP request entries, drives every chain on its own
//! task until it completes, fails or observes the shared shutdown signal,
//! and reports how many requests were dispatched in total. The binary wires
//! these pieces to the command line; library APIs may evolve with it.
pub mod args;
pub mod chain;
pub mod config;
pub mod error;
pub mod http;
pub mod logger;
pub mod shutdown;
pub mod shutdown_handlers;
pub mod supervisor;
