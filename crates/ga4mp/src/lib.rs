// Copyright (c) 2025 Geoffrey Huntley <ghuntley@ghuntley.com>. All rights reserved.
// SPDX-License-Identifier: Proprietary

//! Rust SDK client for the GA4 Measurement Protocol.
//!
//! Builds, validates, and sends event payloads to the Measurement
//! Protocol collection endpoint. Events are validated against their
//! kind's schema when attached to a request, so malformed payloads fail
//! locally with a precise error instead of being silently dropped by the
//! collector.
//!
//! # Example
//!
//! ```ignore
//! use ga4mp::{Analytics, CollectTransport, EventKind, Item, UserProperty};
//!
//! #[tokio::main]
//! async fn main() -> Result<(), ga4mp::Ga4Error> {
//!     let mut analytics = Analytics::new("G-XXXXXXXX", "gDS1gs423dDSH34sdfa")?;
//!     analytics
//!         .set_client_id("GA0.43535.234234")
//!         .set_user_id("m6435");
//!     analytics.add_user_property(
//!         UserProperty::new().name("customer_tier").value("premium"),
//!     )?;
//!
//!     let purchase = EventKind::Purchase
//!         .event()
//!         .param("transaction_id", "O6435DK")?
//!         .param("currency", "EUR")?
//!         .param("value", 14.78)?
//!         .add_item(Item::new().item_id("1").price(7.39).quantity(2))?;
//!     analytics.add_event(purchase)?;
//!
//!     let delivered = analytics.post(&CollectTransport::new()).await?;
//!     assert!(delivered);
//!     Ok(())
//! }
//! ```

mod analytics;
mod error;
mod payload;
mod transport;

pub use analytics::Analytics;
pub use error::{Ga4Error, Result, TransportError};
pub use payload::CollectBody;
pub use transport::{CollectTransport, EndpointConfig, Transport};

// Re-export core types for convenience
pub use ga4mp_core::{
	Event, EventError, EventKind, EventSchema, Item, ItemCardinality, ParameterContainer,
	UserProperty,
};
