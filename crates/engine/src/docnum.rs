//! Document number generation.
//!
//! Numbers are human-readable: `PREFIX-YYYYMMDD-NNN` where `NNN` is a
//! per-day monotonic sequence starting at 001. The sequence is derived from a
//! same-day count inside the creating transaction; the unique index on the
//! number column is the backstop.

use chrono::NaiveDate;

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum DocumentKind {
    Invoice,
    PurchaseOrder,
    Payment,
}

impl DocumentKind {
    pub const fn prefix(self) -> &'static str {
        match self {
            Self::Invoice => "INV",
            Self::PurchaseOrder => "PO",
            Self::Payment => "PAY",
        }
    }
}

/// Formats `PREFIX-YYYYMMDD-NNN`. Sequences past 999 widen rather than wrap.
pub fn format_number(kind: DocumentKind, date: NaiveDate, seq: u64) -> String {
    format!("{}-{}-{seq:03}", kind.prefix(), date.format("%Y%m%d"))
}

/// The `PREFIX-YYYYMMDD-%` pattern matching every same-day number.
pub fn day_pattern(kind: DocumentKind, date: NaiveDate) -> String {
    format!("{}-{}-%", kind.prefix(), date.format("%Y%m%d"))
}

#[cfg(test)]
mod tests {
    use super::*;

    fn date(y: i32, m: u32, d: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(y, m, d).unwrap()
    }

    #[test]
    fn formats_zero_padded_sequence() {
        assert_eq!(
            format_number(DocumentKind::Invoice, date(2026, 8, 6), 1),
            "INV-20260806-001"
        );
        assert_eq!(
            format_number(DocumentKind::PurchaseOrder, date(2026, 8, 6), 42),
            "PO-20260806-042"
        );
        assert_eq!(
            format_number(DocumentKind::Payment, date(2026, 12, 31), 999),
            "PAY-20261231-999"
        );
    }

    #[test]
    fn widens_past_three_digits() {
        assert_eq!(
            format_number(DocumentKind::Invoice, date(2026, 8, 6), 1000),
            "INV-20260806-1000"
        );
    }

    #[test]
    fn day_pattern_matches_prefix_and_date() {
        assert_eq!(
            day_pattern(DocumentKind::Invoice, date(2026, 8, 6)),
            "INV-20260806-%"
        );
    }
}
