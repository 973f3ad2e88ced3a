//! Falling-block puzzle engine (workspace facade crate).
//!
//! Re-exports the member crates as `tetris_engine::{core, types}` so drivers
//! and tests depend on one package while the implementation lives under `crates/`.

pub use tetris_engine_core as core;
pub use tetris_engine_types as types;
