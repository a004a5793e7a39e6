// Copyright (c) 2025 Geoffrey Huntley <ghuntley@ghuntley.com>. All rights reserved.
// SPDX-License-Identifier: Proprietary

//! Event construction and validation.
//!
//! An [`Event`] is a parameter bag bound to one [`EventKind`]. Setters are
//! checked against the kind's schema immediately (an undeclared parameter
//! is a hard error), but required-ness is deliberately not checked here:
//! the request envelope validates eligibility at attach time so the caller
//! gets one precise error naming everything that is missing.

use serde_json::{json, Value};

use crate::error::{EventError, Result};
use crate::item::Item;
use crate::params::ParameterContainer;
use crate::schema::{EventKind, ItemCardinality};

/// One analytics occurrence under construction.
///
/// Events are created fresh per call site and discarded after one send;
/// they are never pooled. Mutating an event after exporting it is allowed,
/// but the export is a plain snapshot — re-export to see the changes.
///
/// # Example
///
/// ```
/// use ga4mp_core::{EventKind, Item};
///
/// let event = EventKind::Purchase
///     .event()
///     .param("transaction_id", "T_12345")?
///     .param("currency", "EUR")?
///     .param("value", 14.78)?
///     .add_item(Item::new().item_id("1").price(7.39).quantity(2))?;
/// event.validate()?;
/// # Ok::<(), ga4mp_core::EventError>(())
/// ```
#[derive(Debug, Clone, PartialEq)]
pub struct Event {
	kind: EventKind,
	params: ParameterContainer,
	items: Vec<Item>,
	full_refund: bool,
}

/// Required-parameter presence: `null` and the empty string do not count.
fn is_populated(value: &Value) -> bool {
	match value {
		Value::Null => false,
		Value::String(s) => !s.is_empty(),
		_ => true,
	}
}

impl Event {
	/// Creates a fresh event of the given kind.
	pub fn new(kind: EventKind) -> Self {
		Self {
			kind,
			params: ParameterContainer::new(),
			items: Vec::new(),
			full_refund: false,
		}
	}

	/// Returns the event's kind.
	pub fn kind(&self) -> EventKind {
		self.kind
	}

	/// Returns the event's wire name.
	pub fn name(&self) -> &'static str {
		self.kind.name()
	}

	/// Sets a parameter declared by the event's schema.
	///
	/// Setting a parameter the schema does not declare is a hard error;
	/// `items` must go through [`Event::add_item`] or [`Event::set_item`].
	pub fn param(mut self, key: impl Into<String>, value: impl Into<Value>) -> Result<Self> {
		let key = key.into();
		let schema = self.kind.schema();
		if key == "items" && schema.mentions("items") {
			return Err(EventError::ItemsAsParam { event: schema.name });
		}
		if !schema.accepts_param(&key) {
			return Err(EventError::UndeclaredParam {
				event: schema.name,
				param: key,
			});
		}
		self.params.set(key, value);
		Ok(self)
	}

	/// Removes a previously set parameter.
	pub fn unset_param(&mut self, key: &str) -> Option<Value> {
		self.params.remove(key)
	}

	/// Returns the parameter bag.
	pub fn params(&self) -> &ParameterContainer {
		&self.params
	}

	/// Appends an item to a kind that carries an item list.
	pub fn add_item(mut self, item: Item) -> Result<Self> {
		let schema = self.kind.schema();
		match schema.items {
			ItemCardinality::Many => {
				self.items.push(item);
				Ok(self)
			}
			ItemCardinality::Single => Err(EventError::ExpectsSingleItem { event: schema.name }),
			ItemCardinality::None => Err(EventError::ItemsNotAccepted { event: schema.name }),
		}
	}

	/// Replaces the item on a kind that carries exactly one.
	pub fn set_item(mut self, item: Item) -> Result<Self> {
		let schema = self.kind.schema();
		match schema.items {
			ItemCardinality::Single => {
				self.items = vec![item];
				Ok(self)
			}
			ItemCardinality::Many => Err(EventError::ExpectsItemList { event: schema.name }),
			ItemCardinality::None => Err(EventError::ItemsNotAccepted { event: schema.name }),
		}
	}

	/// Returns the attached items.
	pub fn items(&self) -> &[Item] {
		&self.items
	}

	/// Marks a refund as covering the whole transaction, which lifts the
	/// item-list requirement. Only refund events carry this flag.
	pub fn full_refund(mut self, full: bool) -> Result<Self> {
		if self.kind != EventKind::Refund {
			return Err(EventError::NoFullRefundFlag {
				event: self.kind.name(),
			});
		}
		self.full_refund = full;
		Ok(self)
	}

	/// Returns true if the refund flag is set.
	pub fn is_full_refund(&self) -> bool {
		self.full_refund
	}

	/// Checks whether the event is eligible for sending.
	///
	/// Collects every problem rather than stopping at the first, so one
	/// error names the full set of missing or conflicting parameters.
	pub fn validate(&self) -> Result<()> {
		let schema = self.kind.schema();
		let mut problems = Vec::new();

		for key in schema.required {
			if *key == "items" {
				if self.items.is_empty() {
					problems.push("missing required parameter `items`".to_string());
				}
			} else if !self.params.get(key).is_some_and(is_populated) {
				problems.push(format!("missing required parameter `{key}`"));
			}
		}

		// A declared currency/value pair must be set together or not at
		// all; a partial pair is a configuration error, never dropped.
		let both_required =
			schema.required.contains(&"currency") && schema.required.contains(&"value");
		if !both_required && schema.mentions("currency") && schema.mentions("value") {
			let has_currency = self.params.get("currency").is_some_and(is_populated);
			let has_value = self.params.get("value").is_some_and(is_populated);
			if has_currency != has_value {
				problems.push("`currency` and `value` must be set together".to_string());
			}
		}

		if self.kind == EventKind::Refund && !self.full_refund && self.items.is_empty() {
			problems.push("refund needs items or the full-refund flag".to_string());
		}

		if problems.is_empty() {
			Ok(())
		} else {
			Err(EventError::Validation {
				event: schema.name,
				problems,
			})
		}
	}

	/// Exports the event to its wire shape.
	///
	/// The export itself does not validate required-ness; the envelope
	/// does that when the event is attached.
	pub fn to_value(&self) -> Value {
		let mut params = self.params.to_map();
		if !self.items.is_empty() {
			let items: Vec<Value> = self
				.items
				.iter()
				.map(|item| Value::Object(item.to_params()))
				.collect();
			params.insert("items".to_string(), Value::Array(items));
		}
		json!({
			"name": self.kind.name(),
			"params": params,
		})
	}
}
