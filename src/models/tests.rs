#![allow(clippy::unwrap_used)]

use rust_decimal_macros::dec;

use super::*;

fn make_record(date: &str, category: &str, amount: rust_decimal::Decimal) -> AnomalyRecord {
    AnomalyRecord {
        date: date.into(),
        category: category.into(),
        amount,
    }
}

// ── Wire deserialization ──────────────────────────────────────

#[test]
fn test_parse_predict_response() {
    let body = r#"{
        "total": 100,
        "anomalies_found": 2,
        "anomalies": [
            {"Transaction Date": "2024-01-05", "Category": "Groceries", "Total Spent": 500},
            {"Transaction Date": "2024-01-05", "Category": "Travel", "Total Spent": 1200.50}
        ]
    }"#;

    let result: AnalysisResult = serde_json::from_str(body).unwrap();
    assert_eq!(result.total, 100);
    assert_eq!(result.anomalies_found, 2);
    assert_eq!(result.anomalies.len(), 2);
    assert_eq!(result.anomalies[0].date, "2024-01-05");
    assert_eq!(result.anomalies[0].category, "Groceries");
    assert_eq!(result.anomalies[0].amount, dec!(500));
    assert_eq!(result.anomalies[1].amount, dec!(1200.50));
}

#[test]
fn test_parse_missing_anomalies_defaults_empty() {
    let body = r#"{"total": 0, "anomalies_found": 0}"#;
    let result: AnalysisResult = serde_json::from_str(body).unwrap();
    assert!(result.anomalies.is_empty());
}

#[test]
fn test_parse_rejects_malformed_body() {
    let body = r#"{"message": "PulseGuard API is running"}"#;
    assert!(serde_json::from_str::<AnalysisResult>(body).is_err());
}

// ── Preview cap ───────────────────────────────────────────────

#[test]
fn test_preview_caps_at_twenty_rows() {
    let anomalies: Vec<AnomalyRecord> = (0..25)
        .map(|i| make_record("2024-01-05", &format!("Cat{i}"), dec!(10)))
        .collect();
    let result = AnalysisResult {
        total: 25,
        anomalies_found: 25,
        anomalies,
    };

    assert_eq!(result.preview().len(), ANOMALY_PREVIEW_ROWS);
    assert!(result.preview_truncated());
    // Cap keeps the head of the list, in order
    assert_eq!(result.preview()[0].category, "Cat0");
    assert_eq!(result.preview()[19].category, "Cat19");
}

#[test]
fn test_preview_below_cap_shows_all() {
    let result = AnalysisResult {
        total: 3,
        anomalies_found: 1,
        anomalies: vec![make_record("2024-01-05", "Travel", dec!(9.99))],
    };
    assert_eq!(result.preview().len(), 1);
    assert!(!result.preview_truncated());
}

#[test]
fn test_preview_exactly_at_cap_not_truncated() {
    let anomalies: Vec<AnomalyRecord> = (0..20)
        .map(|_| make_record("2024-01-05", "Travel", dec!(1)))
        .collect();
    let result = AnalysisResult {
        total: 20,
        anomalies_found: 20,
        anomalies,
    };
    assert_eq!(result.preview().len(), 20);
    assert!(!result.preview_truncated());
}

#[test]
fn test_preview_empty() {
    let result = AnalysisResult {
        total: 0,
        anomalies_found: 0,
        anomalies: Vec::new(),
    };
    assert!(result.preview().is_empty());
    assert!(!result.preview_truncated());
}

// ── flagged_spend ─────────────────────────────────────────────

#[test]
fn test_flagged_spend_sums_all_anomalies() {
    let result = AnalysisResult {
        total: 10,
        anomalies_found: 3,
        anomalies: vec![
            make_record("2024-01-05", "Groceries", dec!(500)),
            make_record("2024-01-06", "Travel", dec!(1200)),
            make_record("2024-01-07", "Groceries", dec!(0.50)),
        ],
    };
    assert_eq!(result.flagged_spend(), dec!(1700.50));
}

#[test]
fn test_flagged_spend_empty_is_zero() {
    let result = AnalysisResult {
        total: 0,
        anomalies_found: 0,
        anomalies: Vec::new(),
    };
    assert_eq!(result.flagged_spend(), rust_decimal::Decimal::ZERO);
}
