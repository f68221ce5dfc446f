//! Append-only history records.

use chrono::{DateTime, Utc};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use super::analysis::PriceSummary;
use super::query::{Currency, ProductType, Query};

/// One audit entry per completed (non-cache-hit) pipeline run.
///
/// Write-only from the pipeline's perspective; read only by the external
/// reporting surface.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct HistoryRecord {
    pub id: Uuid,
    pub product_type: ProductType,
    pub query_text: String,
    pub median_price: Decimal,
    pub currency: Currency,
    pub comps_used: usize,
    pub comps_excluded: usize,
    pub confidence_score: u8,
    pub recorded_at: DateTime<Utc>,
}

impl HistoryRecord {
    /// Build the record for a completed run.
    pub fn for_run(query: &Query, summary: &PriceSummary) -> Self {
        Self {
            id: Uuid::new_v4(),
            product_type: query.product_type,
            query_text: query.text.clone(),
            median_price: summary.median_price,
            currency: summary.currency,
            comps_used: summary.comps_used,
            comps_excluded: summary.comps_excluded,
            confidence_score: summary.confidence_score,
            recorded_at: Utc::now(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::testing::sample_analysis;
    use crate::types::Region;

    #[test]
    fn test_record_copies_summary_fields() {
        let query = Query::new("MacBook Pro 14 M3 16GB 512GB", ProductType::Laptop, Region::Us);
        let analysis = sample_analysis(Currency::Usd);

        let record = HistoryRecord::for_run(&query, &analysis.summary);

        assert_eq!(record.product_type, ProductType::Laptop);
        assert_eq!(record.query_text, query.text);
        assert_eq!(record.median_price, analysis.summary.median_price);
        assert_eq!(record.comps_used, analysis.summary.comps_used);
        assert_eq!(record.comps_excluded, analysis.summary.comps_excluded);
    }
}
