//! Core types and definitions for the OpenForest simulation.
//!
//! This crate defines the vocabulary shared across the engine and the
//! coordinator: the data model (planets, fleets, pings, players, match
//! configuration), the action wire format, level statistics, and the pure
//! math/hashing utilities that both the world generator and the
//! commit-reveal protocol depend on. It has no dependency on any async
//! runtime or transport.

pub mod action;
pub mod levels;
pub mod math;
pub mod types;

#[cfg(test)]
mod tests;
