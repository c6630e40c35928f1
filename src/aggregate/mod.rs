//! Derived views over an analysis result.
//!
//! Both views are pure functions of the anomaly list and are recomputed in
//! full whenever a new result replaces the old one.

use chrono::{Datelike, NaiveDate, NaiveDateTime};
use rust_decimal::Decimal;

use crate::models::AnomalyRecord;

#[cfg(test)]
mod tests;

/// One point on the anomaly trend line: a display date and the spend amount.
#[derive(Debug, Clone, PartialEq)]
pub struct TrendPoint {
    pub date: String,
    pub amount: Decimal,
}

/// One trend point per anomaly record, in the order the service returned
/// them. No re-sorting: the service's order is the display order.
pub fn trend_points(anomalies: &[AnomalyRecord]) -> Vec<TrendPoint> {
    anomalies
        .iter()
        .map(|a| TrendPoint {
            date: format_trend_date(&a.date),
            amount: a.amount,
        })
        .collect()
}

/// Spend summed per category, keyed by category name. Display order is the
/// order each category first appears in the anomaly list.
pub fn category_totals(anomalies: &[AnomalyRecord]) -> Vec<(String, Decimal)> {
    let mut totals: Vec<(String, Decimal)> = Vec::new();
    for a in anomalies {
        match totals.iter_mut().find(|(name, _)| *name == a.category) {
            Some((_, sum)) => *sum += a.amount,
            None => totals.push((a.category.clone(), a.amount)),
        }
    }
    totals
}

const DATE_FORMATS: &[&str] = &["%Y-%m-%d", "%m/%d/%Y", "%m/%d/%y", "%d-%m-%Y"];
const DATETIME_FORMATS: &[&str] = &["%Y-%m-%dT%H:%M:%S", "%Y-%m-%d %H:%M:%S"];

/// Format a wire date as `M/D/YYYY` without zero padding, e.g.
/// `"2024-01-05"` → `"1/5/2024"`. A string that matches none of the
/// accepted formats passes through unchanged so one odd row cannot break
/// the whole render.
pub fn format_trend_date(raw: &str) -> String {
    let parsed = DATE_FORMATS
        .iter()
        .find_map(|fmt| NaiveDate::parse_from_str(raw, fmt).ok())
        .or_else(|| {
            DATETIME_FORMATS
                .iter()
                .find_map(|fmt| NaiveDateTime::parse_from_str(raw, fmt).ok())
                .map(|dt| dt.date())
        });

    match parsed {
        Some(d) => format!("{}/{}/{}", d.month(), d.day(), d.year()),
        None => raw.to_string(),
    }
}
