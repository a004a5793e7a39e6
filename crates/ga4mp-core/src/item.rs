// Copyright (c) 2025 Geoffrey Huntley <ghuntley@ghuntley.com>. All rights reserved.
// SPDX-License-Identifier: Proprietary

//! Line items carried by commerce events.

use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};

/// A product or service referenced by a commerce event.
///
/// Every field is individually optional and exports only when set; which
/// fields an event actually needs is enforced by the owning event's schema,
/// not here (a view event needs item identity only, a purchase needs price
/// and quantity too).
///
/// # Example
///
/// ```
/// use ga4mp_core::Item;
///
/// let item = Item::new()
///     .item_id("SKU_12345")
///     .item_name("Stan and Friends Tee")
///     .price(9.99)
///     .quantity(1);
/// assert_eq!(item.to_params().len(), 4);
/// ```
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Item {
	#[serde(skip_serializing_if = "Option::is_none")]
	pub item_id: Option<String>,
	#[serde(skip_serializing_if = "Option::is_none")]
	pub item_name: Option<String>,
	#[serde(skip_serializing_if = "Option::is_none")]
	pub affiliation: Option<String>,
	#[serde(skip_serializing_if = "Option::is_none")]
	pub coupon: Option<String>,
	#[serde(skip_serializing_if = "Option::is_none")]
	pub currency: Option<String>,
	#[serde(skip_serializing_if = "Option::is_none")]
	pub discount: Option<f64>,
	#[serde(skip_serializing_if = "Option::is_none")]
	pub index: Option<i64>,
	#[serde(skip_serializing_if = "Option::is_none")]
	pub item_brand: Option<String>,
	#[serde(skip_serializing_if = "Option::is_none")]
	pub item_category: Option<String>,
	#[serde(skip_serializing_if = "Option::is_none")]
	pub item_category2: Option<String>,
	#[serde(skip_serializing_if = "Option::is_none")]
	pub item_category3: Option<String>,
	#[serde(skip_serializing_if = "Option::is_none")]
	pub item_category4: Option<String>,
	#[serde(skip_serializing_if = "Option::is_none")]
	pub item_category5: Option<String>,
	#[serde(skip_serializing_if = "Option::is_none")]
	pub item_list_id: Option<String>,
	#[serde(skip_serializing_if = "Option::is_none")]
	pub item_list_name: Option<String>,
	#[serde(skip_serializing_if = "Option::is_none")]
	pub item_variant: Option<String>,
	#[serde(skip_serializing_if = "Option::is_none")]
	pub location_id: Option<String>,
	#[serde(skip_serializing_if = "Option::is_none")]
	pub price: Option<f64>,
	#[serde(skip_serializing_if = "Option::is_none")]
	pub quantity: Option<i64>,
}

impl Item {
	/// Creates an item with no fields set.
	pub fn new() -> Self {
		Self::default()
	}

	/// Sets the item SKU or identifier.
	pub fn item_id(mut self, id: impl Into<String>) -> Self {
		self.item_id = Some(id.into());
		self
	}

	/// Sets the human-readable item name.
	pub fn item_name(mut self, name: impl Into<String>) -> Self {
		self.item_name = Some(name.into());
		self
	}

	/// Sets the store or affiliate supplying the item.
	pub fn affiliation(mut self, affiliation: impl Into<String>) -> Self {
		self.affiliation = Some(affiliation.into());
		self
	}

	/// Sets the coupon code applied to the item.
	pub fn coupon(mut self, coupon: impl Into<String>) -> Self {
		self.coupon = Some(coupon.into());
		self
	}

	/// Sets the ISO 4217 currency of the item price.
	pub fn currency(mut self, currency: impl Into<String>) -> Self {
		self.currency = Some(currency.into());
		self
	}

	/// Sets the unit discount applied to the item.
	pub fn discount(mut self, discount: f64) -> Self {
		self.discount = Some(discount);
		self
	}

	/// Sets the item's position in a list.
	pub fn index(mut self, index: i64) -> Self {
		self.index = Some(index);
		self
	}

	/// Sets the item brand.
	pub fn item_brand(mut self, brand: impl Into<String>) -> Self {
		self.item_brand = Some(brand.into());
		self
	}

	/// Sets the primary item category.
	pub fn item_category(mut self, category: impl Into<String>) -> Self {
		self.item_category = Some(category.into());
		self
	}

	/// Sets the second-level item category.
	pub fn item_category2(mut self, category: impl Into<String>) -> Self {
		self.item_category2 = Some(category.into());
		self
	}

	/// Sets the third-level item category.
	pub fn item_category3(mut self, category: impl Into<String>) -> Self {
		self.item_category3 = Some(category.into());
		self
	}

	/// Sets the fourth-level item category.
	pub fn item_category4(mut self, category: impl Into<String>) -> Self {
		self.item_category4 = Some(category.into());
		self
	}

	/// Sets the fifth-level item category.
	pub fn item_category5(mut self, category: impl Into<String>) -> Self {
		self.item_category5 = Some(category.into());
		self
	}

	/// Sets the identifier of the list the item was presented in.
	pub fn item_list_id(mut self, id: impl Into<String>) -> Self {
		self.item_list_id = Some(id.into());
		self
	}

	/// Sets the name of the list the item was presented in.
	pub fn item_list_name(mut self, name: impl Into<String>) -> Self {
		self.item_list_name = Some(name.into());
		self
	}

	/// Sets the item variant (size, colour, edition).
	pub fn item_variant(mut self, variant: impl Into<String>) -> Self {
		self.item_variant = Some(variant.into());
		self
	}

	/// Sets the physical location associated with the item.
	pub fn location_id(mut self, id: impl Into<String>) -> Self {
		self.location_id = Some(id.into());
		self
	}

	/// Sets the unit price.
	pub fn price(mut self, price: f64) -> Self {
		self.price = Some(price);
		self
	}

	/// Sets the quantity.
	pub fn quantity(mut self, quantity: i64) -> Self {
		self.quantity = Some(quantity);
		self
	}

	/// Returns true if no field has been set.
	///
	/// An empty item is not rejected anywhere, but it identifies nothing
	/// and the envelope logs a warning when one is attached.
	pub fn is_empty(&self) -> bool {
		*self == Self::default()
	}

	/// Exports exactly the fields that were set, with no null placeholders.
	pub fn to_params(&self) -> Map<String, Value> {
		match serde_json::to_value(self) {
			Ok(Value::Object(map)) => map,
			// A struct of scalar options cannot serialize to anything else.
			_ => Map::new(),
		}
	}
}

#[cfg(test)]
mod tests {
	use super::*;

	#[test]
	fn new_item_is_empty() {
		assert!(Item::new().is_empty());
		assert!(Item::new().to_params().is_empty());
	}

	#[test]
	fn export_contains_exactly_the_set_fields() {
		let item = Item::new()
			.item_id("1")
			.item_name("First Product")
			.currency("EUR")
			.price(7.39)
			.quantity(2);

		let params = item.to_params();
		assert_eq!(params.len(), 5);
		assert_eq!(params["item_id"], "1");
		assert_eq!(params["item_name"], "First Product");
		assert_eq!(params["currency"], "EUR");
		assert_eq!(params["price"], 7.39);
		assert_eq!(params["quantity"], 2);
	}

	#[test]
	fn export_omits_unset_fields_entirely() {
		let params = Item::new().item_id("sku").to_params();
		assert_eq!(params.len(), 1);
		assert!(!params.contains_key("price"));
		assert!(params.values().all(|v| !v.is_null()));
	}

	#[test]
	fn setters_overwrite() {
		let item = Item::new().quantity(1).quantity(3);
		assert_eq!(item.quantity, Some(3));
	}

	#[test]
	fn category_levels_export_under_distinct_keys() {
		let params = Item::new()
			.item_category("apparel")
			.item_category2("shirts")
			.item_category5("crew")
			.to_params();
		assert_eq!(params["item_category"], "apparel");
		assert_eq!(params["item_category2"], "shirts");
		assert_eq!(params["item_category5"], "crew");
		assert!(!params.contains_key("item_category3"));
	}
}
