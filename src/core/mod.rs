//! # Core Application Logic
//!
//! This module contains IntelliSync's business logic.
//! It knows nothing about any specific UI technology.
//!
//! ```text
//!                    ┌─────────────────────────┐
//!                    │         CORE            │
//!                    │  (this module)          │
//!                    │                         │
//!                    │  • State (session)      │
//!                    │  • Action (events)      │
//!                    │  • update() (reducer)   │
//!                    └───────────┬─────────────┘
//!                                │
//!                                ▼
//!                         ┌────────────┐
//!                         │    TUI     │
//!                         │  Adapter   │
//!                         │ (ratatui)  │
//!                         └────────────┘
//! ```
//!
//! ## Modules
//!
//! - [`state`]: `SessionState` (the shared holder) and `App`
//! - [`action`]: the `Action` enum and `update()`
//! - [`catalog`]: built-in models and prompt templates
//! - [`params`]: generation parameters and their control specs
//! - [`responder`]: the timed placeholder reply
//! - [`transcript`]: export to JSON, share with clipboard fallback

pub mod action;
pub mod catalog;
pub mod clipboard;
pub mod config;
pub mod message;
pub mod params;
pub mod responder;
pub mod state;
pub mod theme;
pub mod transcript;
