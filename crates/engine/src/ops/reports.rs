//! Financial reporting aggregation.
//!
//! Full scan over bookings and invoices on every call; no caching and no
//! incremental state, so the result always reflects the latest committed
//! rows.

use std::collections::{BTreeMap, HashMap};

use chrono::{DateTime, Datelike, Utc};
use sea_orm::prelude::*;

use crate::{Booking, Money, ResultEngine, bookings, invoices};

use super::Engine;

const MONTH_NAMES: [&str; 12] = [
    "Jan", "Feb", "Mar", "Apr", "May", "Jun", "Jul", "Aug", "Sep", "Oct", "Nov", "Dec",
];

/// Accumulated totals for one `"{year}-{season}"` bucket.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct SeasonTotals {
    pub total_revenue: Money,
    pub facilitator_costs: Money,
    pub booking_count: u64,
}

/// One month of the six-month revenue series.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct MonthlyRevenue {
    pub month: String,
    pub revenue: Money,
    pub profit: Money,
}

/// Revenue accumulated per event display name.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct ServiceRevenue {
    pub name: String,
    pub revenue: Money,
    pub bookings: u64,
}

#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct FinancialData {
    pub revenue: Money,
    pub facilitator_costs: Money,
    pub gross_profit: Money,
    pub outstanding_invoices: u64,
    pub season_breakdown: BTreeMap<String, SeasonTotals>,
    /// Exactly six entries, oldest month first, ending at the current month.
    pub revenue_over_time: Vec<MonthlyRevenue>,
    /// At most five entries, sorted descending by revenue.
    pub top_services: Vec<ServiceRevenue>,
}

/// Month buckets follow the Northern-hemisphere convention regardless of the
/// operating locale: months 0–2 Winter, 3–5 Spring, 6–8 Summer, 9–11 Autumn.
fn season_name(month0: u32) -> &'static str {
    match month0 / 3 {
        0 => "Winter",
        1 => "Spring",
        2 => "Summer",
        _ => "Autumn",
    }
}

/// `(year, month0)` of the month `back` months before the given one.
fn month_back(year: i32, month0: u32, back: i32) -> (i32, u32) {
    let total = year * 12 + month0 as i32 - back;
    (total.div_euclid(12), total.rem_euclid(12) as u32)
}

impl Engine {
    /// Derives the financial report from all bookings and invoices.
    ///
    /// `now` anchors the six-month revenue series at the current month.
    pub async fn financial_report(&self, now: DateTime<Utc>) -> ResultEngine<FinancialData> {
        let booking_models = bookings::Entity::find().all(&self.database).await?;
        let invoice_models = invoices::Entity::find().all(&self.database).await?;

        let mut all_bookings = Vec::with_capacity(booking_models.len());
        for model in booking_models {
            all_bookings.push(Booking::try_from(model)?);
        }

        let mut data = FinancialData::default();

        for booking in &all_bookings {
            data.revenue += booking.total_price;
            data.facilitator_costs += booking.facilitator_fee;

            let key = format!(
                "{}-{}",
                booking.event_date.year(),
                season_name(booking.event_date.month0())
            );
            let bucket = data.season_breakdown.entry(key).or_default();
            bucket.total_revenue += booking.total_price;
            bucket.facilitator_costs += booking.facilitator_fee;
            bucket.booking_count += 1;
        }
        data.gross_profit = data.revenue - data.facilitator_costs;

        data.outstanding_invoices = invoice_models
            .iter()
            .filter(|model| model.status != "paid" && model.status != "cancelled")
            .count() as u64;

        for back in (0..6).rev() {
            let (year, month0) = month_back(now.year(), now.month0(), back);
            let mut revenue = Money::ZERO;
            let mut costs = Money::ZERO;
            for booking in &all_bookings {
                if booking.event_date.year() == year && booking.event_date.month0() == month0 {
                    revenue += booking.total_price;
                    costs += booking.facilitator_fee;
                }
            }
            data.revenue_over_time.push(MonthlyRevenue {
                month: MONTH_NAMES[month0 as usize].to_string(),
                revenue,
                profit: revenue - costs,
            });
        }

        // Grouped by display name: distinct events sharing a name collapse
        // into one bucket.
        let mut by_name: HashMap<String, (Money, u64)> = HashMap::new();
        for booking in &all_bookings {
            let entry = by_name.entry(booking.event_name.clone()).or_default();
            entry.0 += booking.total_price;
            entry.1 += 1;
        }
        let mut top: Vec<ServiceRevenue> = by_name
            .into_iter()
            .map(|(name, (revenue, count))| ServiceRevenue {
                name,
                revenue,
                bookings: count,
            })
            .collect();
        top.sort_by(|a, b| b.revenue.cmp(&a.revenue).then(a.name.cmp(&b.name)));
        top.truncate(5);
        data.top_services = top;

        Ok(data)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn seasons_follow_northern_hemisphere_months() {
        assert_eq!(season_name(0), "Winter");
        assert_eq!(season_name(1), "Winter");
        assert_eq!(season_name(2), "Winter");
        assert_eq!(season_name(3), "Spring");
        assert_eq!(season_name(6), "Summer");
        assert_eq!(season_name(9), "Autumn");
        assert_eq!(season_name(11), "Autumn");
    }

    #[test]
    fn month_back_crosses_year_boundaries() {
        assert_eq!(month_back(2026, 0, 1), (2025, 11));
        assert_eq!(month_back(2026, 5, 5), (2026, 0));
        assert_eq!(month_back(2026, 2, 5), (2025, 9));
        assert_eq!(month_back(2026, 7, 0), (2026, 7));
    }
}
