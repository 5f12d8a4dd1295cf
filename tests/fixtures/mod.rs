//! Test fixtures for sidequest-router.
//!
//! Provides realistic test data:
//! - Downtown Toronto landmarks and cafés (approximate OpenStreetMap positions)
//! - Synthetic layouts with known optimal orders

#![allow(dead_code)]

pub mod toronto_locations;

pub use toronto_locations::*;
