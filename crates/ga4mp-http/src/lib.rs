// Copyright (c) 2025 Geoffrey Huntley <ghuntley@ghuntley.com>. All rights
// reserved. SPDX-License-Identifier: Proprietary

//! Shared HTTP utilities for the GA4 SDK.
//!
//! This crate provides a pre-configured HTTP client with a consistent
//! User-Agent header. There is deliberately no retry helper: the SDK
//! sends each request exactly once and leaves retries to its callers.

mod client;

pub use client::{builder, new_client, new_client_with_timeout, user_agent};
