//! Testing utilities for the home inventory workspace
//!
//! Shared receipt fixtures and builders.

#![allow(missing_docs)]

use bigdecimal::BigDecimal;
use chrono::{DateTime, Duration, TimeZone, Utc};
use inventory_model::{ItemId, Receipt, ReceiptId};
use std::str::FromStr;

/// Fixed reference instant so fixtures are reproducible
pub fn base_date() -> DateTime<Utc> {
    Utc.with_ymd_and_hms(2024, 1, 15, 12, 0, 0).unwrap()
}

pub fn amount(value: &str) -> BigDecimal {
    BigDecimal::from_str(value).unwrap()
}

pub fn days(n: i64) -> Duration {
    Duration::days(n)
}

#[derive(Debug, Clone)]
pub struct ReceiptBuilder {
    receipt: Receipt,
}

impl ReceiptBuilder {
    pub fn new() -> Self {
        Self {
            receipt: Receipt::new(base_date(), "Test Store", amount("10.00")),
        }
    }

    pub fn id(mut self, id: ReceiptId) -> Self {
        self.receipt.id = id;
        self
    }

    pub fn date(mut self, date: DateTime<Utc>) -> Self {
        self.receipt.date = date;
        self
    }

    pub fn store(mut self, name: &str) -> Self {
        self.receipt.store_name = name.to_string();
        self
    }

    pub fn total(mut self, value: &str) -> Self {
        self.receipt.total_amount = amount(value);
        self
    }

    pub fn item(mut self, item: ItemId) -> Self {
        self.receipt.item_ids.push(item);
        self
    }

    pub fn build(self) -> Receipt {
        self.receipt
    }
}

impl Default for ReceiptBuilder {
    fn default() -> Self {
        Self::new()
    }
}

pub fn receipt() -> Receipt {
    ReceiptBuilder::new().build()
}

pub fn receipt_at(date: DateTime<Utc>) -> Receipt {
    ReceiptBuilder::new().date(date).build()
}

pub fn receipt_from(store: &str) -> Receipt {
    ReceiptBuilder::new().store(store).build()
}

pub fn receipt_totalling(value: &str) -> Receipt {
    ReceiptBuilder::new().total(value).build()
}

/// Receipt whose store name encodes a marker, for snapshot consistency checks
pub fn marked_receipt(marker: usize) -> Receipt {
    ReceiptBuilder::new().store(&format!("marker-{marker}")).build()
}

pub fn marker_of(receipt: &Receipt) -> Option<usize> {
    receipt.store_name.strip_prefix("marker-")?.parse().ok()
}
