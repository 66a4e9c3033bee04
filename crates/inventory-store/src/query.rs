//! Receipt query filters

use crate::repository::RecordFilter;
use bigdecimal::BigDecimal;
use chrono::{DateTime, Utc};
use inventory_model::{ItemId, Receipt};

/// A receipt query
///
/// Each variant is a filter over the store's records. Results keep the
/// store's iteration order.
#[derive(Debug, Clone, PartialEq)]
pub enum ReceiptQuery {
    /// `from <= date <= to`; an inverted range matches nothing
    DateRange {
        /// Inclusive lower bound
        from: DateTime<Utc>,
        /// Inclusive upper bound
        to: DateTime<Utc>,
    },
    /// Case-insensitive substring of the store name
    StoreName(String),
    /// Receipt references the item
    ItemId(ItemId),
    /// `total_amount > threshold`
    AboveAmount(BigDecimal),
}

impl ReceiptQuery {
    /// Inclusive date range query
    #[inline]
    #[must_use]
    pub fn date_range(from: DateTime<Utc>, to: DateTime<Utc>) -> Self {
        Self::DateRange { from, to }
    }

    /// Store name query
    ///
    /// An empty needle matches no receipt.
    #[inline]
    #[must_use]
    pub fn store_name(name: &str) -> Self {
        Self::StoreName(name.to_lowercase())
    }

    /// Item membership query
    #[inline]
    #[must_use]
    pub fn item(item_id: ItemId) -> Self {
        Self::ItemId(item_id)
    }

    /// Strict amount threshold query
    #[inline]
    #[must_use]
    pub fn above_amount(threshold: BigDecimal) -> Self {
        Self::AboveAmount(threshold)
    }
}

impl RecordFilter<Receipt> for ReceiptQuery {
    fn matches(&self, receipt: &Receipt) -> bool {
        match self {
            Self::DateRange { from, to } => *from <= receipt.date && receipt.date <= *to,
            Self::StoreName(needle) => {
                !needle.is_empty()
                    && receipt
                        .store_name
                        .to_lowercase()
                        .contains(&needle.to_lowercase())
            }
            Self::ItemId(item) => receipt.contains_item(*item),
            Self::AboveAmount(threshold) => receipt.total_amount > *threshold,
        }
    }
}
