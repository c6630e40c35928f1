#![allow(clippy::unwrap_used)]

use rust_decimal::Decimal;
use rust_decimal_macros::dec;

use super::*;
use crate::models::AnomalyRecord;

fn rec(date: &str, category: &str, amount: Decimal) -> AnomalyRecord {
    AnomalyRecord {
        date: date.into(),
        category: category.into(),
        amount,
    }
}

// ── trend_points ──────────────────────────────────────────────

#[test]
fn test_trend_one_point_per_record() {
    let anomalies: Vec<AnomalyRecord> = (1..=7)
        .map(|i| rec("2024-03-01", "Misc", Decimal::from(i)))
        .collect();
    let trend = trend_points(&anomalies);
    assert_eq!(trend.len(), 7);
}

#[test]
fn test_trend_preserves_input_order() {
    // Deliberately out of chronological order: the service's order wins.
    let anomalies = vec![
        rec("2024-03-10", "Travel", dec!(300)),
        rec("2024-01-02", "Groceries", dec!(50)),
        rec("2024-02-20", "Travel", dec!(120)),
    ];
    let trend = trend_points(&anomalies);
    assert_eq!(trend[0].date, "3/10/2024");
    assert_eq!(trend[1].date, "1/2/2024");
    assert_eq!(trend[2].date, "2/20/2024");
    assert_eq!(trend[0].amount, dec!(300));
    assert_eq!(trend[2].amount, dec!(120));
}

#[test]
fn test_trend_empty_input() {
    assert!(trend_points(&[]).is_empty());
}

// ── category_totals ───────────────────────────────────────────

#[test]
fn test_category_totals_accumulate() {
    let anomalies = vec![
        rec("2024-01-05", "Groceries", dec!(500)),
        rec("2024-01-06", "Travel", dec!(1200)),
        rec("2024-01-07", "Groceries", dec!(45.25)),
    ];
    let totals = category_totals(&anomalies);
    assert_eq!(
        totals,
        vec![
            ("Groceries".to_string(), dec!(545.25)),
            ("Travel".to_string(), dec!(1200)),
        ]
    );
}

#[test]
fn test_category_totals_first_appearance_order() {
    let anomalies = vec![
        rec("2024-01-01", "Zoo", dec!(1)),
        rec("2024-01-02", "Apples", dec!(2)),
        rec("2024-01-03", "Zoo", dec!(3)),
        rec("2024-01-04", "Misc", dec!(4)),
    ];
    let totals = category_totals(&anomalies);
    let names: Vec<&str> = totals
        .iter()
        .map(|(n, _)| n.as_str())
        .collect();
    assert_eq!(names, vec!["Zoo", "Apples", "Misc"]);
}

#[test]
fn test_category_grand_total_matches_anomaly_total() {
    let anomalies = vec![
        rec("2024-01-05", "Groceries", dec!(500)),
        rec("2024-01-06", "Travel", dec!(1200)),
        rec("2024-01-07", "Groceries", dec!(45.25)),
        rec("2024-01-08", "Dining", dec!(0.75)),
    ];
    let across_categories: Decimal = category_totals(&anomalies)
        .iter()
        .map(|(_, amt)| *amt)
        .sum();
    let across_anomalies: Decimal = anomalies.iter().map(|a| a.amount).sum();
    assert_eq!(across_categories, across_anomalies);
}

#[test]
fn test_category_totals_empty_input() {
    assert!(category_totals(&[]).is_empty());
}

// ── the worked example from the service contract ──────────────

#[test]
fn test_two_anomaly_example() {
    let anomalies = vec![
        rec("2024-01-05", "Groceries", dec!(500)),
        rec("2024-01-05", "Travel", dec!(1200)),
    ];

    let trend = trend_points(&anomalies);
    assert_eq!(trend.len(), 2);
    assert_eq!(trend[0].date, "1/5/2024");
    assert_eq!(trend[1].date, "1/5/2024");

    let totals = category_totals(&anomalies);
    assert_eq!(
        totals,
        vec![
            ("Groceries".to_string(), dec!(500)),
            ("Travel".to_string(), dec!(1200)),
        ]
    );
}

// ── format_trend_date ─────────────────────────────────────────

#[test]
fn test_format_iso_date() {
    assert_eq!(format_trend_date("2024-01-05"), "1/5/2024");
    assert_eq!(format_trend_date("2024-12-31"), "12/31/2024");
}

#[test]
fn test_format_us_date() {
    assert_eq!(format_trend_date("01/05/2024"), "1/5/2024");
}

#[test]
fn test_format_datetime() {
    assert_eq!(format_trend_date("2024-01-05T13:45:00"), "1/5/2024");
    assert_eq!(format_trend_date("2024-01-05 13:45:00"), "1/5/2024");
}

#[test]
fn test_format_unparseable_passes_through() {
    assert_eq!(format_trend_date("not a date"), "not a date");
    assert_eq!(format_trend_date(""), "");
}
