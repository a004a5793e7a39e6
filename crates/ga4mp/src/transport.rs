// Copyright (c) 2025 Geoffrey Huntley <ghuntley@ghuntley.com>. All rights reserved.
// SPDX-License-Identifier: Proprietary

//! Transport to the collection endpoint.
//!
//! The SDK performs exactly one send per `post` call; there is no retry,
//! pooling, or backpressure here. Callers wanting retries re-validate and
//! re-send a fresh request graph themselves.

use std::time::Duration;

use async_trait::async_trait;
use serde::Deserialize;
use tracing::debug;

use crate::error::TransportError;
use crate::payload::CollectBody;

/// Endpoint identity handed to the transport on every send.
#[derive(Debug, Clone)]
pub struct EndpointConfig {
	/// The data stream's measurement ID, e.g. `G-XXXXXXXX`.
	pub measurement_id: String,
	/// The stream's Measurement Protocol API secret.
	pub api_secret: String,
	/// Route to the validation-only endpoint instead of the live one.
	pub debug: bool,
}

/// Sends an assembled request body to the collection endpoint.
#[async_trait]
pub trait Transport: Send + Sync {
	/// Performs the network call. Called exactly once per `post`.
	async fn send(&self, endpoint: &EndpointConfig, body: &CollectBody)
		-> Result<(), TransportError>;
}

/// Response shape of the validation-only endpoint.
#[derive(Debug, Default, Deserialize)]
struct ValidationResponse {
	#[serde(default, rename = "validationMessages")]
	validation_messages: Vec<ValidationMessage>,
}

#[derive(Debug, Deserialize)]
struct ValidationMessage {
	#[serde(default, rename = "fieldPath")]
	field_path: String,
	#[serde(default)]
	description: String,
	#[serde(default, rename = "validationCode")]
	validation_code: String,
}

impl ValidationMessage {
	fn render(self) -> String {
		let mut message = if self.field_path.is_empty() {
			self.description
		} else {
			format!("{}: {}", self.field_path, self.description)
		};
		if !self.validation_code.is_empty() {
			message.push_str(&format!(" ({})", self.validation_code));
		}
		message
	}
}

/// HTTP transport posting to the Measurement Protocol collection endpoint.
pub struct CollectTransport {
	base_url: String,
	http: reqwest::Client,
}

impl CollectTransport {
	/// The production collection host.
	pub const DEFAULT_BASE_URL: &'static str = "https://www.google-analytics.com";

	/// Creates a transport against the production host.
	pub fn new() -> Self {
		Self::with_base_url(Self::DEFAULT_BASE_URL)
	}

	/// Creates a transport against a custom host (regional fronting,
	/// proxies, test servers).
	pub fn with_base_url(base_url: impl Into<String>) -> Self {
		Self {
			base_url: base_url.into().trim_end_matches('/').to_string(),
			http: ga4mp_http::new_client(),
		}
	}

	/// Replaces the HTTP client with one using the given request timeout.
	pub fn timeout(mut self, timeout: Duration) -> Self {
		self.http = ga4mp_http::new_client_with_timeout(timeout);
		self
	}

	fn collect_url(&self, debug: bool) -> String {
		let path = if debug { "debug/mp/collect" } else { "mp/collect" };
		format!("{}/{}", self.base_url, path)
	}
}

impl Default for CollectTransport {
	fn default() -> Self {
		Self::new()
	}
}

#[async_trait]
impl Transport for CollectTransport {
	async fn send(
		&self,
		endpoint: &EndpointConfig,
		body: &CollectBody,
	) -> Result<(), TransportError> {
		let url = self.collect_url(endpoint.debug);

		debug!(url = %url, events = body.events.len(), "sending collect request");

		let response = self
			.http
			.post(&url)
			.query(&[
				("measurement_id", endpoint.measurement_id.as_str()),
				("api_secret", endpoint.api_secret.as_str()),
			])
			.json(body)
			.send()
			.await?;

		let status = response.status();
		if !status.is_success() {
			let message = response.text().await.unwrap_or_default();
			return Err(TransportError::ServerError {
				status: status.as_u16(),
				message,
			});
		}

		if endpoint.debug {
			// The validation endpoint answers 200 with a message list; an
			// empty list means the payload would have been accepted.
			let text = response.text().await?;
			let validation: ValidationResponse = serde_json::from_str(&text).unwrap_or_default();
			if !validation.validation_messages.is_empty() {
				let messages = validation
					.validation_messages
					.into_iter()
					.map(ValidationMessage::render)
					.collect();
				return Err(TransportError::Rejected { messages });
			}
		}

		Ok(())
	}
}
