// SPDX-FileCopyrightText: 2026 Shelf Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Request dispatch for the Shelf file server.
//!
//! A [`Dispatcher`] turns a requested file name into a typed, rewound
//! [`StoredFile`](shelf_core::StoredFile) by running the registered
//! transformers and file sources from a
//! [`CapabilityRegistry`](shelf_plugin::CapabilityRegistry).

pub mod dispatcher;
pub mod error;

pub use dispatcher::{DispatchResponse, DispatchStage, Dispatcher};
pub use error::DispatchError;
