// SPDX-FileCopyrightText: 2026 Shelf Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! HTTP gateway for the Shelf file server.
//!
//! Serves `GET /fileserver/{file_name}` by handing the name to a
//! [`Dispatcher`](shelf_dispatch::Dispatcher) and streaming the result, plus
//! an unauthenticated `GET /health`.

pub mod content_type;
pub mod handlers;
pub mod server;

pub use content_type::{ExtensionContentTypes, mime_for_name};
pub use server::{AppState, ServerConfig, router, start_server};
