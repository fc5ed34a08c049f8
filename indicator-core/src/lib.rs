#![no_std]

//! Shared engine for the meeting-indicator device.
//!
//! This crate holds everything with real behavior: the client registry and
//! its eviction policy, the light aggregation rule, the countdown display
//! scheduler, and the status message ingestion path. It stays portable
//! across MCU firmware and host tooling by avoiding the Rust standard
//! library; all hardware output flows through the [`firmware::Device`]
//! trait and all time flows in through [`time::Timestamp`], so the engine
//! is fully deterministic under test.

pub mod display;
pub mod firmware;
pub mod lights;
pub mod registry;
pub mod time;
pub mod wire;
