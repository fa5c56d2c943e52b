// Copyright (c) 2025 Geoffrey Huntley <ghuntley@ghuntley.com>. All rights
// reserved. SPDX-License-Identifier: Proprietary

//! Shared HTTP plumbing for the Bing API clients.
//!
//! This crate provides:
//! - A reqwest client builder preset with the workspace User-Agent
//! - The [`HttpTransport`] trait API clients are written against
//! - [`ReqwestTransport`], the default transport implementation

mod client;
mod error;
mod transport;

pub use client::{builder, new_client_with_timeout, user_agent};
pub use error::TransportError;
pub use transport::{split_userpwd, HttpTransport, ReqwestTransport, TransportConfig};
