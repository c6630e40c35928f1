mod analysis;

pub use analysis::{AnalysisResult, AnomalyRecord, ANOMALY_PREVIEW_ROWS};

#[cfg(test)]
mod tests;
