// Copyright (c) 2025 Geoffrey Huntley <ghuntley@ghuntley.com>. All rights reserved.
// SPDX-License-Identifier: Proprietary

//! Named parameter bag shared by events.
//!
//! A `ParameterContainer` is a pure key/value store: it performs no schema
//! validation of its own. Which keys are legal for a given event is decided
//! one layer up, by the event's schema.

use serde_json::{Map, Value};

/// A bag of named event parameters.
///
/// Keys are case-sensitive and unique; setting an existing key overwrites
/// its value. Only keys that were explicitly set appear in the exported
/// map — absent keys are never emitted, not even as `null`.
///
/// # Example
///
/// ```
/// use ga4mp_core::ParameterContainer;
///
/// let mut params = ParameterContainer::new();
/// params.set("currency", "EUR");
/// params.set("value", 14.78);
/// assert!(params.has("currency"));
/// assert_eq!(params.to_map().len(), 2);
/// ```
#[derive(Debug, Clone, Default, PartialEq)]
pub struct ParameterContainer {
	inner: Map<String, Value>,
}

impl ParameterContainer {
	/// Creates an empty container.
	pub fn new() -> Self {
		Self { inner: Map::new() }
	}

	/// Stores a value under `key`, overwriting any previous value.
	///
	/// The value can be any type that converts into a `serde_json::Value`:
	/// strings, numbers, booleans, arrays, or nested objects.
	pub fn set<K, V>(&mut self, key: K, value: V)
	where
		K: Into<String>,
		V: Into<Value>,
	{
		self.inner.insert(key.into(), value.into());
	}

	/// Returns the stored value for `key`, if any.
	pub fn get(&self, key: &str) -> Option<&Value> {
		self.inner.get(key)
	}

	/// Returns true if `key` has been set.
	pub fn has(&self, key: &str) -> bool {
		self.inner.contains_key(key)
	}

	/// Removes `key` from the container, returning the previous value.
	pub fn remove(&mut self, key: &str) -> Option<Value> {
		self.inner.remove(key)
	}

	/// Returns true if no parameters have been set.
	pub fn is_empty(&self) -> bool {
		self.inner.is_empty()
	}

	/// Returns the number of parameters.
	pub fn len(&self) -> usize {
		self.inner.len()
	}

	/// Returns a snapshot map of every explicitly-set parameter.
	pub fn to_map(&self) -> Map<String, Value> {
		self.inner.clone()
	}

	/// Consumes the container and returns the underlying map.
	pub fn into_map(self) -> Map<String, Value> {
		self.inner
	}
}

impl From<ParameterContainer> for Value {
	fn from(params: ParameterContainer) -> Self {
		Value::Object(params.inner)
	}
}
