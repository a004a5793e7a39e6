// Copyright (c) 2025 Geoffrey Huntley <ghuntley@ghuntley.com>. All rights reserved.
// SPDX-License-Identifier: Proprietary

//! Compile-time registry of event kinds.
//!
//! Every event kind the collection endpoint understands is listed here with
//! its wire name, required and optional parameter sets, and item capability.
//! Enumerating all kinds is a plain iteration over [`EventKind::ALL`]; there
//! is no runtime discovery.

use crate::event::Event;

/// How many items an event kind carries.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ItemCardinality {
	/// The kind has no item concept.
	None,
	/// The kind carries exactly one item, replaced by `set_item`.
	Single,
	/// The kind carries an item list, appended to by `add_item`.
	Many,
}

/// The fixed schema of one event kind.
#[derive(Debug)]
pub struct EventSchema {
	/// Wire name, e.g. `add_to_cart`.
	pub name: &'static str,
	/// Parameters that must be populated before the event may be attached
	/// to a request. `items` appearing here means the item list must be
	/// non-empty.
	pub required: &'static [&'static str],
	/// Parameters the kind accepts beyond the required set.
	pub declared: &'static [&'static str],
	/// Item capability, consulted by `add_item`/`set_item` callers instead
	/// of probing for methods.
	pub items: ItemCardinality,
}

impl EventSchema {
	/// Returns true if `key` is a member of the required or declared set.
	pub fn mentions(&self, key: &str) -> bool {
		self.required.contains(&key) || self.declared.contains(&key)
	}

	/// Returns true if `key` may be set through the parameter bag.
	///
	/// `items` is excluded: items are structured values attached through
	/// the item methods, never through the bag.
	pub fn accepts_param(&self, key: &str) -> bool {
		key != "items" && self.mentions(key)
	}
}

macro_rules! schema {
	($name:literal, req: [$($req:literal),*], opt: [$($opt:literal),*], items: $card:ident) => {
		EventSchema {
			name: $name,
			required: &[$($req),*],
			declared: &[$($opt),*],
			items: ItemCardinality::$card,
		}
	};
}

const ADD_PAYMENT_INFO: EventSchema = schema!("add_payment_info",
	req: ["currency", "value"], opt: ["coupon", "payment_type", "items"], items: Many);
const ADD_SHIPPING_INFO: EventSchema = schema!("add_shipping_info",
	req: ["currency", "value"], opt: ["coupon", "shipping_tier", "items"], items: Many);
const ADD_TO_CART: EventSchema = schema!("add_to_cart",
	req: ["currency", "value", "items"], opt: [], items: Many);
const ADD_TO_WISHLIST: EventSchema = schema!("add_to_wishlist",
	req: ["currency", "value", "items"], opt: [], items: Many);
const BEGIN_CHECKOUT: EventSchema = schema!("begin_checkout",
	req: ["currency", "value"], opt: ["coupon", "items"], items: Many);
const EARN_VIRTUAL_CURRENCY: EventSchema = schema!("earn_virtual_currency",
	req: ["virtual_currency_name", "value"], opt: [], items: None);
const GENERATE_LEAD: EventSchema = schema!("generate_lead",
	req: ["currency", "value"], opt: [], items: None);
const JOIN_GROUP: EventSchema = schema!("join_group",
	req: ["group_id"], opt: [], items: None);
const LEVEL_UP: EventSchema = schema!("level_up",
	req: ["level"], opt: ["character"], items: None);
const LOGIN: EventSchema = schema!("login",
	req: [], opt: ["method"], items: None);
const POST_SCORE: EventSchema = schema!("post_score",
	req: ["score"], opt: ["level", "character"], items: None);
const PURCHASE: EventSchema = schema!("purchase",
	req: ["currency", "transaction_id", "value"],
	opt: ["affiliation", "coupon", "shipping", "tax", "items"], items: Many);
const REFUND: EventSchema = schema!("refund",
	req: ["transaction_id"],
	opt: ["currency", "value", "affiliation", "coupon", "shipping", "tax", "items"], items: Many);
const REMOVE_FROM_CART: EventSchema = schema!("remove_from_cart",
	req: ["currency", "value", "items"], opt: [], items: Many);
const SEARCH: EventSchema = schema!("search",
	req: [], opt: ["search_term"], items: None);
const SELECT_CONTENT: EventSchema = schema!("select_content",
	req: [], opt: ["content_type", "item_id"], items: None);
const SELECT_ITEM: EventSchema = schema!("select_item",
	req: ["items"], opt: ["item_list_id", "item_list_name"], items: Single);
const SELECT_PROMOTION: EventSchema = schema!("select_promotion",
	req: [],
	opt: ["creative_name", "creative_slot", "location_id", "promotion_id", "promotion_name", "items"],
	items: Single);
const SHARE: EventSchema = schema!("share",
	req: [], opt: ["method", "content_type", "item_id"], items: None);
const SIGN_UP: EventSchema = schema!("sign_up",
	req: [], opt: ["method"], items: None);
const SPEND_VIRTUAL_CURRENCY: EventSchema = schema!("spend_virtual_currency",
	req: ["value", "virtual_currency_name"], opt: ["item_name"], items: None);
const TUTORIAL_BEGIN: EventSchema = schema!("tutorial_begin",
	req: [], opt: [], items: None);
const TUTORIAL_COMPLETE: EventSchema = schema!("tutorial_complete",
	req: [], opt: [], items: None);
const UNLOCK_ACHIEVEMENT: EventSchema = schema!("unlock_achievement",
	req: ["achievement_id"], opt: [], items: None);
const VIEW_CART: EventSchema = schema!("view_cart",
	req: ["currency", "value"], opt: ["items"], items: Many);
const VIEW_ITEM: EventSchema = schema!("view_item",
	req: ["currency", "value"], opt: ["items"], items: Many);
const VIEW_ITEM_LIST: EventSchema = schema!("view_item_list",
	req: [], opt: ["item_list_id", "item_list_name", "items"], items: Many);
const VIEW_PROMOTION: EventSchema = schema!("view_promotion",
	req: ["items"],
	opt: ["creative_name", "creative_slot", "location_id", "promotion_id", "promotion_name"],
	items: Single);
const VIEW_SEARCH_RESULTS: EventSchema = schema!("view_search_results",
	req: [], opt: ["search_term"], items: None);

/// One analytics event kind.
///
/// Each variant maps to exactly one [`EventSchema`]; the variant name is
/// the schema's wire name with underscores removed (asserted by the
/// registry conformance test).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum EventKind {
	AddPaymentInfo,
	AddShippingInfo,
	AddToCart,
	AddToWishlist,
	BeginCheckout,
	EarnVirtualCurrency,
	GenerateLead,
	JoinGroup,
	LevelUp,
	Login,
	PostScore,
	Purchase,
	Refund,
	RemoveFromCart,
	Search,
	SelectContent,
	SelectItem,
	SelectPromotion,
	Share,
	SignUp,
	SpendVirtualCurrency,
	TutorialBegin,
	TutorialComplete,
	UnlockAchievement,
	ViewCart,
	ViewItem,
	ViewItemList,
	ViewPromotion,
	ViewSearchResults,
}

impl EventKind {
	/// Every registered event kind.
	pub const ALL: [EventKind; 29] = [
		EventKind::AddPaymentInfo,
		EventKind::AddShippingInfo,
		EventKind::AddToCart,
		EventKind::AddToWishlist,
		EventKind::BeginCheckout,
		EventKind::EarnVirtualCurrency,
		EventKind::GenerateLead,
		EventKind::JoinGroup,
		EventKind::LevelUp,
		EventKind::Login,
		EventKind::PostScore,
		EventKind::Purchase,
		EventKind::Refund,
		EventKind::RemoveFromCart,
		EventKind::Search,
		EventKind::SelectContent,
		EventKind::SelectItem,
		EventKind::SelectPromotion,
		EventKind::Share,
		EventKind::SignUp,
		EventKind::SpendVirtualCurrency,
		EventKind::TutorialBegin,
		EventKind::TutorialComplete,
		EventKind::UnlockAchievement,
		EventKind::ViewCart,
		EventKind::ViewItem,
		EventKind::ViewItemList,
		EventKind::ViewPromotion,
		EventKind::ViewSearchResults,
	];

	/// Returns the fixed schema for this kind.
	pub fn schema(self) -> &'static EventSchema {
		match self {
			EventKind::AddPaymentInfo => &ADD_PAYMENT_INFO,
			EventKind::AddShippingInfo => &ADD_SHIPPING_INFO,
			EventKind::AddToCart => &ADD_TO_CART,
			EventKind::AddToWishlist => &ADD_TO_WISHLIST,
			EventKind::BeginCheckout => &BEGIN_CHECKOUT,
			EventKind::EarnVirtualCurrency => &EARN_VIRTUAL_CURRENCY,
			EventKind::GenerateLead => &GENERATE_LEAD,
			EventKind::JoinGroup => &JOIN_GROUP,
			EventKind::LevelUp => &LEVEL_UP,
			EventKind::Login => &LOGIN,
			EventKind::PostScore => &POST_SCORE,
			EventKind::Purchase => &PURCHASE,
			EventKind::Refund => &REFUND,
			EventKind::RemoveFromCart => &REMOVE_FROM_CART,
			EventKind::Search => &SEARCH,
			EventKind::SelectContent => &SELECT_CONTENT,
			EventKind::SelectItem => &SELECT_ITEM,
			EventKind::SelectPromotion => &SELECT_PROMOTION,
			EventKind::Share => &SHARE,
			EventKind::SignUp => &SIGN_UP,
			EventKind::SpendVirtualCurrency => &SPEND_VIRTUAL_CURRENCY,
			EventKind::TutorialBegin => &TUTORIAL_BEGIN,
			EventKind::TutorialComplete => &TUTORIAL_COMPLETE,
			EventKind::UnlockAchievement => &UNLOCK_ACHIEVEMENT,
			EventKind::ViewCart => &VIEW_CART,
			EventKind::ViewItem => &VIEW_ITEM,
			EventKind::ViewItemList => &VIEW_ITEM_LIST,
			EventKind::ViewPromotion => &VIEW_PROMOTION,
			EventKind::ViewSearchResults => &VIEW_SEARCH_RESULTS,
		}
	}

	/// Returns the kind's wire name, e.g. `add_to_cart`.
	pub fn name(self) -> &'static str {
		self.schema().name
	}

	/// Returns the kind's item capability.
	pub fn item_cardinality(self) -> ItemCardinality {
		self.schema().items
	}

	/// Creates a fresh event of this kind.
	pub fn event(self) -> Event {
		Event::new(self)
	}
}

impl std::fmt::Display for EventKind {
	fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
		f.write_str(self.name())
	}
}
