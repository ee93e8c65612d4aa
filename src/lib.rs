//! Serpentine: a classic grid snake split into a headless simulation engine
//! and a thin terminal frontend.
//!
//! The engine is deterministic and I/O-free: it is driven by fixed-rate
//! pulses, consumes a per-pulse [`input::InputSnapshot`], and reports every
//! visual change as data through the [`events::RenderSink`] trait. The
//! binary target wires those deltas to a ratatui terminal; tests drive the
//! same interface with a recording sink.

pub mod body;
pub mod config;
pub mod engine;
pub mod error;
pub mod events;
pub mod fruit;
pub mod input;
pub mod occupancy;
pub mod renderer;
pub mod score;
pub mod session;
pub mod terminal_runtime;
