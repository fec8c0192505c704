//! # Stickies Architecture
//!
//! Stickies is a **UI-agnostic sticky-note library**. The CLI binary is one client of it;
//! the same core could sit behind a TUI, a web view, or any other presentation layer.
//!
//! ## The Three-Layer Architecture
//!
//! ```text
//! ┌─────────────────────────────────────────────────────────────┐
//! │  CLI Layer (args.rs, wired by main.rs)                      │
//! │  - Parses arguments, formats output, handles terminal I/O   │
//! │  - The ONLY place that knows about stdout/stderr/exit codes │
//! └─────────────────────────────────────────────────────────────┘
//!                              │
//!                              ▼
//! ┌─────────────────────────────────────────────────────────────┐
//! │  API Layer (api.rs)                                         │
//! │  - Thin facade over commands                                │
//! │  - Normalizes inputs (list positions → note ids)            │
//! │  - Returns structured Result types                          │
//! └─────────────────────────────────────────────────────────────┘
//!                              │
//!                              ▼
//! ┌─────────────────────────────────────────────────────────────┐
//! │  Command Layer (commands/*.rs)                              │
//! │  - Pure business logic                                      │
//! │  - Operates on Rust types, returns Rust types               │
//! │  - No I/O assumptions whatsoever                            │
//! └─────────────────────────────────────────────────────────────┘
//!                              │
//!                              ▼
//! ┌─────────────────────────────────────────────────────────────┐
//! │  Storage Layer (store/)                                     │
//! │  - NoteStore: the collection plus its persistence contract  │
//! │  - Abstract Storage trait                                   │
//! │  - FileStorage (production), MemoryStorage (testing)        │
//! └─────────────────────────────────────────────────────────────┘
//! ```
//!
//! ## The Persistence Contract
//!
//! The unit of durability is the **whole collection**: every committed mutation
//! serializes all notes as one JSON array and replaces the single durable value.
//! There are no per-note records and therefore no partial-write states. Text edits
//! go through a per-note trailing quiet window (see [`debounce`]) so per-keystroke
//! callers do not turn into per-keystroke writes.
//!
//! ## Key Principle: No I/O Assumptions in Core
//!
//! From `api.rs` inward (API, commands, storage), code:
//! - Takes regular Rust function arguments
//! - Returns regular Rust types (`Result<CmdResult>`)
//! - **Never** writes to stdout/stderr
//! - **Never** calls `std::process::exit`
//! - **Never** assumes a terminal environment
//!
//! Time is injected through the [`clock::Clock`] trait so the coalescing policy
//! is deterministic under test.
//!
//! ## Module Overview
//!
//! - [`api`]: The API facade—entry point for all operations
//! - [`commands`]: Business logic for each command
//! - [`store`]: The note store, storage abstraction and backends
//! - [`debounce`]: Per-note edit coalescing
//! - [`model`]: Core data types (`Note`, `NoteId`, the palette)
//! - [`clock`]: Injectable millisecond clock
//! - [`config`]: Configuration management
//! - [`editor`]: External editor integration
//! - [`error`]: Error types
//! - `cli`: argument parsing and printing live with the binary (not part of the lib API)

pub mod api;
pub mod clock;
pub mod commands;
pub mod config;
pub mod debounce;
pub mod editor;
pub mod error;
pub mod model;
pub mod store;
