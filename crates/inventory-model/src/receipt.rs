//! Receipt record and identifier types

use crate::record::Record;
use bigdecimal::BigDecimal;
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// Unique receipt identifier (random v4 UUID)
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub struct ReceiptId(pub Uuid);

impl ReceiptId {
    /// Generate new receipt ID
    #[inline]
    #[must_use]
    pub fn new() -> Self {
        Self(Uuid::new_v4())
    }
}

impl Default for ReceiptId {
    fn default() -> Self {
        Self::new()
    }
}

impl std::fmt::Display for ReceiptId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// Unique inventory item identifier
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub struct ItemId(pub Uuid);

impl ItemId {
    /// Generate new item ID
    #[inline]
    #[must_use]
    pub fn new() -> Self {
        Self(Uuid::new_v4())
    }
}

impl Default for ItemId {
    fn default() -> Self {
        Self::new()
    }
}

impl std::fmt::Display for ItemId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// A purchase receipt
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Receipt {
    /// Identity
    pub id: ReceiptId,
    /// Purchase time
    pub date: DateTime<Utc>,
    /// Merchant name as printed on the receipt
    pub store_name: String,
    /// Total paid, at currency precision
    pub total_amount: BigDecimal,
    /// Inventory items bought with this receipt
    pub item_ids: Vec<ItemId>,
}

impl Receipt {
    /// Create a receipt with a fresh id and no items
    #[must_use]
    pub fn new(
        date: DateTime<Utc>,
        store_name: impl Into<String>,
        total_amount: BigDecimal,
    ) -> Self {
        Self {
            id: ReceiptId::new(),
            date,
            store_name: store_name.into(),
            total_amount,
            item_ids: Vec::new(),
        }
    }

    /// With an explicit id
    #[inline]
    #[must_use]
    pub fn with_id(mut self, id: ReceiptId) -> Self {
        self.id = id;
        self
    }

    /// With one more item reference
    #[inline]
    #[must_use]
    pub fn with_item(mut self, item: ItemId) -> Self {
        self.item_ids.push(item);
        self
    }

    /// With the given item references, replacing any existing ones
    #[inline]
    #[must_use]
    pub fn with_items(mut self, items: impl IntoIterator<Item = ItemId>) -> Self {
        self.item_ids = items.into_iter().collect();
        self
    }

    /// Check whether this receipt references the item
    #[inline]
    #[must_use]
    pub fn contains_item(&self, item: ItemId) -> bool {
        self.item_ids.contains(&item)
    }
}

impl Record for Receipt {
    type Id = ReceiptId;

    #[inline]
    fn id(&self) -> ReceiptId {
        self.id
    }
}
