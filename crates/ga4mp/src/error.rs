// Copyright (c) 2025 Geoffrey Huntley <ghuntley@ghuntley.com>. All rights reserved.
// SPDX-License-Identifier: Proprietary

//! Error types for the SDK.

use ga4mp_core::EventError;
use thiserror::Error;

/// Errors reported by a [`crate::Transport`] implementation.
///
/// These are opaque to the rest of the SDK: nothing here is interpreted or
/// retried, the failure is surfaced (or logged, outside debug mode) as-is.
#[derive(Debug, Error)]
pub enum TransportError {
	/// The HTTP request could not be completed.
	#[error("HTTP request failed: {0}")]
	RequestFailed(#[from] reqwest::Error),

	/// The collection endpoint answered with a non-success status.
	#[error("server error ({status}): {message}")]
	ServerError { status: u16, message: String },

	/// The validation endpoint accepted the request but rejected the
	/// payload. Only produced in debug mode.
	#[error("payload rejected: {}", .messages.join("; "))]
	Rejected { messages: Vec<String> },
}

/// SDK errors.
///
/// Everything except [`Ga4Error::Transport`] is raised synchronously
/// before any network call is made, so a caller can fix the request and
/// try again locally.
#[derive(Debug, Error)]
pub enum Ga4Error {
	/// The measurement ID is required at construction.
	#[error("measurement ID must not be empty")]
	EmptyMeasurementId,

	/// The API secret is required at construction.
	#[error("API secret must not be empty")]
	EmptyApiSecret,

	/// The timestamp predates the accepted recency window.
	#[error("timestamp {got_micros} is older than the {window_hours}h recency window")]
	StaleTimestamp { got_micros: i64, window_hours: i64 },

	/// The timestamp lies further in the future than clock skew explains.
	#[error("timestamp {got_micros} is more than {tolerance_secs}s in the future")]
	FutureTimestamp { got_micros: i64, tolerance_secs: i64 },

	/// The request already holds the maximum number of events.
	#[error("a request holds at most {limit} events")]
	TooManyEvents { limit: usize },

	/// An event or user property failed model-level validation.
	#[error(transparent)]
	Event(#[from] EventError),

	/// The transport reported a failure.
	#[error(transparent)]
	Transport(#[from] TransportError),
}

/// Result type alias for SDK operations.
pub type Result<T> = std::result::Result<T, Ga4Error>;
