use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::fmt;
use uuid::Uuid;

// ============================================================================
// Order Value Objects
// ============================================================================

/// Fulfillment state of an order.
///
/// Stored as a plain string. Values outside the three known states survive a
/// round trip as `Unrecognized` so the lenient update path can keep whatever
/// the seller sent.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(from = "String", into = "String")]
pub enum OrderState {
    Received,
    Cooking,
    Delivering,
    Unrecognized(String),
}

impl OrderState {
    /// Parse a state label. Also accepts the labels written by the original
    /// Korean deployment so existing rows keep their meaning.
    pub fn parse(raw: &str) -> Self {
        match raw.trim() {
            s if s.eq_ignore_ascii_case("RECEIVED") || s == "접수중" => OrderState::Received,
            s if s.eq_ignore_ascii_case("COOKING") || s == "조리중" => OrderState::Cooking,
            s if s.eq_ignore_ascii_case("DELIVERING") || s == "배달중" => OrderState::Delivering,
            _ => OrderState::Unrecognized(raw.to_string()),
        }
    }

    pub fn as_str(&self) -> &str {
        match self {
            OrderState::Received => "RECEIVED",
            OrderState::Cooking => "COOKING",
            OrderState::Delivering => "DELIVERING",
            OrderState::Unrecognized(raw) => raw,
        }
    }

    /// Fixed-vocabulary name; every unrecognized state shares one label
    pub fn label(&self) -> &'static str {
        match self {
            OrderState::Received => "RECEIVED",
            OrderState::Cooking => "COOKING",
            OrderState::Delivering => "DELIVERING",
            OrderState::Unrecognized(_) => "unrecognized",
        }
    }

    pub fn is_recognized(&self) -> bool {
        !matches!(self, OrderState::Unrecognized(_))
    }

    fn rank(&self) -> Option<u8> {
        match self {
            OrderState::Received => Some(0),
            OrderState::Cooking => Some(1),
            OrderState::Delivering => Some(2),
            OrderState::Unrecognized(_) => None,
        }
    }

    /// True when moving from `current` to `self` goes back along
    /// RECEIVED → COOKING → DELIVERING. Unrecognized states never compare.
    pub fn is_backward_from(&self, current: &OrderState) -> bool {
        match (current.rank(), self.rank()) {
            (Some(from), Some(to)) => to < from,
            _ => false,
        }
    }
}

impl From<String> for OrderState {
    fn from(raw: String) -> Self {
        OrderState::parse(&raw)
    }
}

impl From<OrderState> for String {
    fn from(state: OrderState) -> Self {
        state.as_str().to_string()
    }
}

impl fmt::Display for OrderState {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// One placed order
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Order {
    pub id: Uuid,
    pub menu_name: String,
    pub customer_phone: String,
    pub address: String,
    pub placed_at: DateTime<Utc>,
    pub state: OrderState,
    pub pending_menu_change: Option<String>,
}

impl Order {
    /// A freshly placed order in RECEIVED
    pub fn received(
        menu_name: impl Into<String>,
        customer_phone: impl Into<String>,
        address: impl Into<String>,
        placed_at: DateTime<Utc>,
    ) -> Self {
        Self {
            id: Uuid::now_v7(),
            menu_name: menu_name.into(),
            customer_phone: customer_phone.into(),
            address: address.into(),
            placed_at,
            state: OrderState::Received,
            pending_menu_change: None,
        }
    }

    /// A record with every descriptive field empty. Listing scans treat this
    /// as corrupt data.
    pub fn is_blank(&self) -> bool {
        self.menu_name.is_empty()
            && self.customer_phone.is_empty()
            && self.address.is_empty()
            && self.state.as_str().is_empty()
    }
}

// ============================================================================
// Unit Tests
// ============================================================================
