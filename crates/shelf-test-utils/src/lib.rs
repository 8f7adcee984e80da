// SPDX-FileCopyrightText: 2026 Shelf Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Test utilities for Shelf integration tests.
//!
//! Provides mock capabilities and a registry harness for fast, deterministic
//! tests that never touch the filesystem or decode images.
//!
//! # Components
//!
//! - [`MockSource`] - In-memory file source that records lookups
//! - [`MockTransformer`] - Marker-driven transformer with scripted behavior
//! - [`MockModule`] - Extension module declaring arbitrary capabilities
//! - [`TestHarness`] - Registry built from mocks through the real plugin pipeline

pub mod harness;
pub mod mock_module;
pub mod mock_source;
pub mod mock_transformer;

pub use harness::{StaticContentTypes, TestHarness};
pub use mock_module::MockModule;
pub use mock_source::MockSource;
pub use mock_transformer::{MockBehavior, MockTransformer};
