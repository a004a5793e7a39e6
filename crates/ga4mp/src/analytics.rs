// Copyright (c) 2025 Geoffrey Huntley <ghuntley@ghuntley.com>. All rights reserved.
// SPDX-License-Identifier: Proprietary

//! Request envelope: identity, timestamp, events, user properties.

use chrono::Utc;
use ga4mp_core::{Event, UserProperty};
use serde_json::{Map, Value};
use tracing::{debug, warn};

use crate::error::{Ga4Error, Result};
use crate::payload::CollectBody;
use crate::transport::{EndpointConfig, Transport};

const MICROS_PER_SEC: i64 = 1_000_000;
/// Timestamps at or above this magnitude are taken as microseconds; below
/// it, as seconds. 1e12 µs is January 1970, far outside any plausible
/// seconds-denominated modern timestamp.
const MICROS_THRESHOLD: f64 = 1_000_000_000_000.0;

/// The top-level request builder.
///
/// One `Analytics` owns one outgoing request: endpoint identity, client
/// and user identity, timestamp, up to 25 validated events, and any
/// user properties. The graph is built by one caller, sent once through a
/// [`Transport`], and discarded; nothing is shared between requests.
///
/// # Example
///
/// ```no_run
/// use ga4mp::{Analytics, CollectTransport, EventKind, Item};
///
/// # async fn run() -> Result<(), ga4mp::Ga4Error> {
/// let mut analytics = Analytics::new("G-XXXXXXXX", "gDS1gs423dDSH34sdfa")?;
/// analytics.set_client_id("GA0.43535.234234");
///
/// let purchase = EventKind::Purchase
///     .event()
///     .param("transaction_id", "O6435DK")?
///     .param("currency", "EUR")?
///     .param("value", 14.78)?
///     .add_item(Item::new().item_id("1").price(7.39).quantity(2))?;
/// analytics.add_event(purchase)?;
///
/// let delivered = analytics.post(&CollectTransport::new()).await?;
/// # Ok(())
/// # }
/// ```
#[derive(Debug, Clone)]
pub struct Analytics {
	measurement_id: String,
	api_secret: String,
	debug: bool,
	client_id: Option<String>,
	user_id: Option<String>,
	timestamp_micros: Option<i64>,
	events: Vec<Event>,
	user_properties: Map<String, Value>,
}

impl Analytics {
	/// Maximum number of events one request may carry.
	pub const MAX_EVENTS: usize = 25;
	/// How far in the past an explicit timestamp may lie.
	pub const RECENCY_WINDOW_HOURS: i64 = 72;
	/// Clock-skew allowance for timestamps ahead of now.
	pub const FUTURE_TOLERANCE_SECS: i64 = 300;

	/// Creates an envelope for the given data stream.
	///
	/// Both identifiers are opaque required strings; an empty one is a
	/// configuration error.
	pub fn new(measurement_id: impl Into<String>, api_secret: impl Into<String>) -> Result<Self> {
		let measurement_id = measurement_id.into();
		if measurement_id.is_empty() {
			return Err(Ga4Error::EmptyMeasurementId);
		}
		let api_secret = api_secret.into();
		if api_secret.is_empty() {
			return Err(Ga4Error::EmptyApiSecret);
		}

		Ok(Self {
			measurement_id,
			api_secret,
			debug: false,
			client_id: None,
			user_id: None,
			timestamp_micros: None,
			events: Vec::new(),
			user_properties: Map::new(),
		})
	}

	/// Routes sends to the validation-only endpoint and surfaces remote
	/// schema complaints instead of swallowing them.
	pub fn with_debug(mut self, debug: bool) -> Self {
		self.debug = debug;
		self
	}

	/// Returns true if debug mode is on.
	pub fn is_debug(&self) -> bool {
		self.debug
	}

	/// Sets the pseudonymous client identity. Not validated locally; a
	/// request with neither client nor user identity is rejected by the
	/// remote endpoint, not here.
	pub fn set_client_id(&mut self, client_id: impl Into<String>) -> &mut Self {
		self.client_id = Some(client_id.into());
		self
	}

	/// Sets the authenticated user identity.
	pub fn set_user_id(&mut self, user_id: impl Into<String>) -> &mut Self {
		self.user_id = Some(user_id.into());
		self
	}

	/// Sets the request timestamp from a Unix value in seconds or
	/// microseconds, disambiguated by magnitude.
	///
	/// The collector silently drops events older than its processing
	/// window, so a timestamp more than 72 hours old fails loudly here
	/// instead. Timestamps ahead of now beyond a small clock-skew
	/// tolerance fail the same way.
	pub fn set_timestamp(&mut self, seconds_or_micros: f64) -> Result<&mut Self> {
		let micros = if seconds_or_micros >= MICROS_THRESHOLD {
			seconds_or_micros.round() as i64
		} else {
			(seconds_or_micros * MICROS_PER_SEC as f64).round() as i64
		};
		self.timestamp_micros = Some(Self::validate_micros(micros)?);
		Ok(self)
	}

	/// Sets the request timestamp from a `DateTime`, with the same
	/// recency validation as [`Analytics::set_timestamp`].
	pub fn set_timestamp_at(&mut self, at: chrono::DateTime<Utc>) -> Result<&mut Self> {
		self.timestamp_micros = Some(Self::validate_micros(at.timestamp_micros())?);
		Ok(self)
	}

	fn validate_micros(micros: i64) -> Result<i64> {
		let now = Utc::now().timestamp_micros();
		if micros < now - Self::RECENCY_WINDOW_HOURS * 3600 * MICROS_PER_SEC {
			return Err(Ga4Error::StaleTimestamp {
				got_micros: micros,
				window_hours: Self::RECENCY_WINDOW_HOURS,
			});
		}
		if micros > now + Self::FUTURE_TOLERANCE_SECS * MICROS_PER_SEC {
			return Err(Ga4Error::FutureTimestamp {
				got_micros: micros,
				tolerance_secs: Self::FUTURE_TOLERANCE_SECS,
			});
		}
		Ok(micros)
	}

	/// Validates and attaches an event.
	///
	/// The event's required parameters and cross-field rules are checked
	/// here, at attach time, so the caller gets one precise error naming
	/// the offending event and every missing field instead of a late,
	/// generic transport failure. Duplicate kinds are allowed.
	pub fn add_event(&mut self, event: Event) -> Result<&mut Self> {
		event.validate()?;

		if self.events.len() >= Self::MAX_EVENTS {
			return Err(Ga4Error::TooManyEvents {
				limit: Self::MAX_EVENTS,
			});
		}

		if event.items().iter().any(|item| item.is_empty()) {
			warn!(event = event.name(), "attaching an item with no fields set");
		}

		self.events.push(event);
		Ok(self)
	}

	/// Attaches a user property, overwriting any existing property with
	/// the same name (last write wins).
	pub fn add_user_property(&mut self, property: UserProperty) -> Result<&mut Self> {
		let (name, value) = property.to_entry()?;
		self.user_properties.insert(name, value);
		Ok(self)
	}

	/// Returns the attached events.
	pub fn events(&self) -> &[Event] {
		&self.events
	}

	/// Assembles the wire body.
	///
	/// Optional keys that were never set are omitted; an unset timestamp
	/// defaults to now.
	pub fn to_body(&self) -> CollectBody {
		CollectBody {
			client_id: self.client_id.clone(),
			user_id: self.user_id.clone(),
			timestamp_micros: self
				.timestamp_micros
				.unwrap_or_else(|| Utc::now().timestamp_micros()),
			user_properties: if self.user_properties.is_empty() {
				None
			} else {
				Some(self.user_properties.clone())
			},
			events: self.events.iter().map(Event::to_value).collect(),
		}
	}

	/// Assembles the wire body as a JSON value.
	pub fn to_value(&self) -> Value {
		serde_json::to_value(self.to_body()).unwrap_or(Value::Null)
	}

	/// Sends the assembled request through the transport, exactly once.
	///
	/// Returns `Ok(true)` on a transport-reported success. Outside debug
	/// mode a transport failure is logged and reported as `Ok(false)`;
	/// in debug mode it is surfaced as the error, including any
	/// validation detail the remote side returned.
	pub async fn post<T: Transport + ?Sized>(&self, transport: &T) -> Result<bool> {
		let body = self.to_body();
		let endpoint = EndpointConfig {
			measurement_id: self.measurement_id.clone(),
			api_secret: self.api_secret.clone(),
			debug: self.debug,
		};

		match transport.send(&endpoint, &body).await {
			Ok(()) => {
				debug!(
					events = body.events.len(),
					debug_mode = self.debug,
					"collect request accepted"
				);
				Ok(true)
			}
			Err(err) if self.debug => Err(err.into()),
			Err(err) => {
				warn!(error = %err, "collect request failed");
				Ok(false)
			}
		}
	}
}

#[cfg(test)]
mod tests {
	use super::*;
	use ga4mp_core::{EventKind, Item};
	use proptest::prelude::*;

	fn envelope() -> Analytics {
		let mut analytics = Analytics::new("G-XXXXXXXX", "gDS1gs423dDSH34sdfa").unwrap();
		analytics
			.set_client_id("GA0.43535.234234")
			.set_user_id("m6435");
		analytics
	}

	#[test]
	fn construction_rejects_empty_identifiers() {
		assert!(matches!(
			Analytics::new("", "secret"),
			Err(Ga4Error::EmptyMeasurementId)
		));
		assert!(matches!(
			Analytics::new("G-XXXXXXXX", ""),
			Err(Ga4Error::EmptyApiSecret)
		));
	}

	#[test]
	fn timestamp_in_seconds_converts_to_micros() {
		let mut analytics = envelope();
		let now_secs = Utc::now().timestamp_micros() as f64 / 1e6;
		analytics.set_timestamp(now_secs).unwrap();

		let expected = (now_secs * 1e6).round() as i64;
		assert!((analytics.to_body().timestamp_micros - expected).abs() <= 1);
	}

	#[test]
	fn timestamp_in_micros_passes_through() {
		let mut analytics = envelope();
		let now_micros = Utc::now().timestamp_micros();
		analytics.set_timestamp(now_micros as f64).unwrap();
		assert!((analytics.to_body().timestamp_micros - now_micros).abs() <= 1);
	}

	#[test]
	fn timestamp_older_than_window_fails() {
		let mut analytics = envelope();
		let eight_days_ago = Utc::now().timestamp_micros() - 8 * 24 * 3600 * MICROS_PER_SEC;
		let result = analytics.set_timestamp(eight_days_ago as f64);
		assert!(matches!(result, Err(Ga4Error::StaleTimestamp { .. })));
	}

	#[test]
	fn timestamp_slightly_ahead_is_tolerated() {
		let mut analytics = envelope();
		let in_a_minute = Utc::now().timestamp_micros() + 60 * MICROS_PER_SEC;
		assert!(analytics.set_timestamp(in_a_minute as f64).is_ok());
	}

	#[test]
	fn timestamp_far_in_the_future_fails() {
		let mut analytics = envelope();
		let in_an_hour = Utc::now().timestamp_micros() + 3600 * MICROS_PER_SEC;
		let result = analytics.set_timestamp(in_an_hour as f64);
		assert!(matches!(result, Err(Ga4Error::FutureTimestamp { .. })));
	}

	#[test]
	fn unset_timestamp_defaults_to_now() {
		let analytics = envelope();
		let before = Utc::now().timestamp_micros();
		let got = analytics.to_body().timestamp_micros;
		let after = Utc::now().timestamp_micros();
		assert!(got >= before && got <= after);
	}

	#[test]
	fn add_event_rejects_missing_required_params() {
		let mut analytics = envelope();
		let result = analytics.add_event(EventKind::Purchase.event());
		match result {
			Err(Ga4Error::Event(ga4mp_core::EventError::Validation { event, problems })) => {
				assert_eq!(event, "purchase");
				assert!(problems.iter().any(|p| p.contains("`transaction_id`")));
			}
			other => panic!("unexpected result: {other:?}"),
		}
		assert!(analytics.events().is_empty());
	}

	#[test]
	fn refund_attach_rules() {
		let mut analytics = envelope();

		let bare = EventKind::Refund.event().param("transaction_id", "1").unwrap();
		assert!(analytics.add_event(bare.clone()).is_err());

		let full = bare.clone().full_refund(true).unwrap();
		analytics.add_event(full).unwrap();

		let partial = bare
			.add_item(Item::new().item_id("1").price(7.39).quantity(2))
			.unwrap();
		analytics.add_event(partial).unwrap();

		assert_eq!(analytics.events().len(), 2);
	}

	#[test]
	fn capacity_is_25_events() {
		let mut analytics = envelope();
		for _ in 0..Analytics::MAX_EVENTS {
			analytics.add_event(EventKind::TutorialBegin.event()).unwrap();
		}
		assert_eq!(analytics.events().len(), 25);

		let result = analytics.add_event(EventKind::TutorialBegin.event());
		assert!(matches!(result, Err(Ga4Error::TooManyEvents { limit: 25 })));
		assert_eq!(analytics.events().len(), 25);
	}

	#[test]
	fn duplicate_event_kinds_are_allowed() {
		let mut analytics = envelope();
		for _ in 0..2 {
			let purchase = EventKind::Purchase
				.event()
				.param("transaction_id", "T1")
				.unwrap()
				.param("currency", "EUR")
				.unwrap()
				.param("value", 9.99)
				.unwrap();
			analytics.add_event(purchase).unwrap();
		}
		assert_eq!(analytics.events().len(), 2);
	}

	#[test]
	fn user_property_appears_keyed_by_name() {
		let mut analytics = envelope();
		analytics
			.add_user_property(UserProperty::new().name("customer_tier").value("premium"))
			.unwrap();

		let body = analytics.to_body();
		let props = body.user_properties.unwrap();
		assert_eq!(props["customer_tier"]["value"], "premium");
	}

	#[test]
	fn user_property_last_write_wins() {
		let mut analytics = envelope();
		analytics
			.add_user_property(UserProperty::new().name("tier").value("basic"))
			.unwrap()
			.add_user_property(UserProperty::new().name("tier").value("premium"))
			.unwrap();

		let props = analytics.to_body().user_properties.unwrap();
		assert_eq!(props.len(), 1);
		assert_eq!(props["tier"]["value"], "premium");
	}

	#[test]
	fn unnamed_user_property_is_rejected_at_attach() {
		let mut analytics = envelope();
		let result = analytics.add_user_property(UserProperty::new().value(7));
		assert!(matches!(
			result,
			Err(Ga4Error::Event(ga4mp_core::EventError::UnnamedUserProperty))
		));
	}

	#[test]
	fn body_omits_unset_identity_and_properties() {
		let analytics = Analytics::new("G-XXXXXXXX", "secret").unwrap();
		let value = analytics.to_value();
		let object = value.as_object().unwrap();
		assert!(!object.contains_key("client_id"));
		assert!(!object.contains_key("user_id"));
		assert!(!object.contains_key("user_properties"));
		assert!(object.contains_key("timestamp_micros"));
	}

	proptest! {
		#[test]
		fn in_window_micros_round_trip_exactly(offset_secs in (-71 * 3600_i64)..0) {
			let mut analytics = envelope();
			let micros = Utc::now().timestamp_micros() + offset_secs * MICROS_PER_SEC;
			analytics.set_timestamp(micros as f64).unwrap();
			prop_assert_eq!(analytics.to_body().timestamp_micros, micros);
		}

		#[test]
		fn in_window_seconds_land_within_a_microsecond(offset_secs in (-71 * 3600_i64)..0) {
			let mut analytics = envelope();
			let secs = (Utc::now().timestamp_micros() + offset_secs * MICROS_PER_SEC) as f64 / 1e6;
			analytics.set_timestamp(secs).unwrap();
			let expected = (secs * 1e6).round() as i64;
			prop_assert!((analytics.to_body().timestamp_micros - expected).abs() <= 1);
		}
	}

	#[test]
	fn assembled_purchase_body_matches_wire_shape() {
		let mut analytics = envelope();
		let purchase = EventKind::Purchase
			.event()
			.param("transaction_id", "O6435DK")
			.unwrap()
			.param("currency", "EUR")
			.unwrap()
			.param("value", 14.78)
			.unwrap()
			.add_item(Item::new().item_id("1").price(7.39).quantity(2))
			.unwrap();
		analytics.add_event(purchase).unwrap();

		let value = analytics.to_value();
		assert_eq!(value["client_id"], "GA0.43535.234234");
		assert_eq!(value["events"][0]["name"], "purchase");
		assert_eq!(value["events"][0]["params"]["currency"], "EUR");
		assert_eq!(value["events"][0]["params"]["value"], 14.78);
		assert_eq!(value["events"][0]["params"]["items"][0]["price"], 7.39);
		assert_eq!(value["events"][0]["params"]["items"][0]["quantity"], 2);
	}
}
