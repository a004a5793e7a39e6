// Copyright (c) 2025 Geoffrey Huntley <ghuntley@ghuntley.com>. All rights reserved.
// SPDX-License-Identifier: Proprietary

//! Wire body for the collection endpoint.

use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};

/// The assembled request body sent to `/mp/collect`.
///
/// Optional top-level keys that were never set are omitted from the JSON
/// entirely; the collector treats a present-but-null key as malformed.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CollectBody {
	/// Pseudonymous client identity. The collector requires it, but the
	/// SDK does not enforce it locally — a missing value is rejected
	/// remotely.
	#[serde(skip_serializing_if = "Option::is_none")]
	pub client_id: Option<String>,

	/// Authenticated user identity.
	#[serde(skip_serializing_if = "Option::is_none")]
	pub user_id: Option<String>,

	/// Event time in Unix microseconds.
	pub timestamp_micros: i64,

	/// Request-level user attributes, keyed by name.
	#[serde(skip_serializing_if = "Option::is_none")]
	pub user_properties: Option<Map<String, Value>>,

	/// Exported events, at most 25 per request.
	pub events: Vec<Value>,
}
