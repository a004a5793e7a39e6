// Copyright (c) 2025 Geoffrey Huntley <ghuntley@ghuntley.com>. All rights reserved.
// SPDX-License-Identifier: Proprietary

//! Request-level user attributes.

use serde_json::{json, Value};

use crate::error::{EventError, Result};

/// A named user attribute attached to the whole request, independent of
/// any single event.
///
/// Exports to the `{ name: { "value": scalar } }` wire shape. Exporting
/// before a name is set is a configuration error.
///
/// # Example
///
/// ```
/// use ga4mp_core::UserProperty;
///
/// let prop = UserProperty::new().name("customer_tier").value("premium");
/// let (name, value) = prop.to_entry().unwrap();
/// assert_eq!(name, "customer_tier");
/// assert_eq!(value["value"], "premium");
/// ```
#[derive(Debug, Clone, Default, PartialEq)]
pub struct UserProperty {
	name: Option<String>,
	value: Option<Value>,
}

impl UserProperty {
	/// Creates an unnamed, valueless property.
	pub fn new() -> Self {
		Self::default()
	}

	/// Sets the property name.
	pub fn name(mut self, name: impl Into<String>) -> Self {
		self.name = Some(name.into());
		self
	}

	/// Sets the property value.
	pub fn value(mut self, value: impl Into<Value>) -> Self {
		self.value = Some(value.into());
		self
	}

	/// Returns the property name, if set.
	pub fn name_ref(&self) -> Option<&str> {
		self.name.as_deref()
	}

	/// Exports the property as a `(name, { "value": ... })` entry.
	pub fn to_entry(&self) -> Result<(String, Value)> {
		let name = self.name.clone().ok_or(EventError::UnnamedUserProperty)?;
		let value = self.value.clone().unwrap_or(Value::Null);
		Ok((name, json!({ "value": value })))
	}
}
