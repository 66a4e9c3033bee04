//! Preview receipts for demos and bootstrapping
//!
//! A small, fixed catalogue of receipts used to seed a store when no real
//! data exists yet. Dates and amounts are fixed; ids are fresh per call.

use crate::receipt::{ItemId, Receipt};
use bigdecimal::BigDecimal;
use chrono::{DateTime, TimeZone, Utc};
use std::str::FromStr;

const PREVIEW: &[(&str, (i32, u32, u32), &str, usize)] = &[
    ("Apple Store", (2024, 1, 12), "1299.00", 1),
    ("Best Buy", (2024, 2, 3), "349.99", 2),
    ("IKEA", (2024, 2, 28), "89.50", 3),
    ("Walmart", (2024, 3, 9), "54.23", 4),
    ("Target", (2024, 4, 17), "23.75", 1),
    ("Home Depot", (2024, 5, 22), "412.10", 2),
];

/// Build the preview receipt set, oldest first
///
/// Each receipt references its own fresh item ids.
#[must_use]
pub fn preview_receipts() -> Vec<Receipt> {
    PREVIEW
        .iter()
        .filter_map(|&(store, (y, m, d), amount, items)| {
            let total = BigDecimal::from_str(amount).ok()?;
            let receipt = Receipt::new(noon_utc(y, m, d)?, store, total)
                .with_items((0..items).map(|_| ItemId::new()));
            Some(receipt)
        })
        .collect()
}

fn noon_utc(year: i32, month: u32, day: u32) -> Option<DateTime<Utc>> {
    Utc.with_ymd_and_hms(year, month, day, 12, 0, 0).single()
}
