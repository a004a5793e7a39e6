// Copyright (c) 2025 Geoffrey Huntley <ghuntley@ghuntley.com>. All rights reserved.
// SPDX-License-Identifier: Proprietary

//! Error types for the payload model.

use thiserror::Error;

/// Errors raised while building or validating payload fragments.
#[derive(Debug, Clone, PartialEq, Error)]
pub enum EventError {
	/// A parameter was set that the event's schema does not declare.
	#[error("parameter `{param}` is not declared for event `{event}`")]
	UndeclaredParam { event: &'static str, param: String },

	/// Items were passed through the generic parameter setter.
	#[error("items on `{event}` are attached with add_item or set_item, not as a parameter")]
	ItemsAsParam { event: &'static str },

	/// An item was attached to an event whose schema carries no items.
	#[error("event `{event}` does not accept items")]
	ItemsNotAccepted { event: &'static str },

	/// `add_item` was called on an event that carries exactly one item.
	#[error("event `{event}` carries a single item; use set_item")]
	ExpectsSingleItem { event: &'static str },

	/// `set_item` was called on an event that carries an item list.
	#[error("event `{event}` carries an item list; use add_item")]
	ExpectsItemList { event: &'static str },

	/// The full-refund flag only exists on refund events.
	#[error("event `{event}` has no full-refund flag")]
	NoFullRefundFlag { event: &'static str },

	/// The event is not eligible for sending.
	#[error("event `{event}` failed validation: {}", .problems.join("; "))]
	Validation {
		event: &'static str,
		problems: Vec<String>,
	},

	/// A user property was exported or attached before its name was set.
	#[error("user property has no name")]
	UnnamedUserProperty,
}

/// Result type alias for payload model operations.
pub type Result<T> = std::result::Result<T, EventError>;

#[cfg(test)]
mod tests {
	use super::*;

	#[test]
	fn validation_display_joins_problems() {
		let err = EventError::Validation {
			event: "purchase",
			problems: vec![
				"missing required parameter `currency`".to_string(),
				"missing required parameter `value`".to_string(),
			],
		};
		let text = err.to_string();
		assert!(text.contains("purchase"));
		assert!(text.contains("`currency`"));
		assert!(text.contains("; "));
	}

	#[test]
	fn undeclared_param_names_both_sides() {
		let err = EventError::UndeclaredParam {
			event: "login",
			param: "coupon".to_string(),
		};
		let text = err.to_string();
		assert!(text.contains("login"));
		assert!(text.contains("coupon"));
	}
}
