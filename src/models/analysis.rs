use rust_decimal::Decimal;
use serde::Deserialize;

/// Maximum number of anomaly rows shown in the dashboard table.
pub const ANOMALY_PREVIEW_ROWS: usize = 20;

/// One transaction flagged by the analysis service.
///
/// Field names follow the wire contract exactly (`Transaction Date`,
/// `Category`, `Total Spent`); the date stays a raw string because the
/// service gives no format guarantee.
#[derive(Debug, Clone, Deserialize)]
pub struct AnomalyRecord {
    #[serde(rename = "Transaction Date")]
    pub date: String,
    #[serde(rename = "Category")]
    pub category: String,
    #[serde(rename = "Total Spent")]
    pub amount: Decimal,
}

/// Response envelope from one `POST /predict` upload.
///
/// Replaced wholesale on each successful upload; never merged. The anomaly
/// order is whatever the service returned, not necessarily sorted by date.
#[derive(Debug, Clone, Deserialize)]
pub struct AnalysisResult {
    pub total: i64,
    pub anomalies_found: i64,
    #[serde(default)]
    pub anomalies: Vec<AnomalyRecord>,
}

impl AnalysisResult {
    /// The first rows of the anomaly list, capped for table display.
    pub fn preview(&self) -> &[AnomalyRecord] {
        let end = self.anomalies.len().min(ANOMALY_PREVIEW_ROWS);
        &self.anomalies[..end]
    }

    /// Whether `preview` is showing fewer rows than exist.
    pub fn preview_truncated(&self) -> bool {
        self.anomalies.len() > ANOMALY_PREVIEW_ROWS
    }

    /// Total spend across all flagged transactions.
    pub fn flagged_spend(&self) -> Decimal {
        self.anomalies.iter().map(|a| a.amount).sum()
    }
}
