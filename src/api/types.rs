use crate::models::TradingPair;
use serde::{Deserialize, Serialize};

/// Body of the aggregator's token lookup. `pairs` is `null` for unknown mints.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PairsResponse {
    #[serde(rename = "schemaVersion", default)]
    pub schema_version: Option<String>,
    #[serde(default)]
    pub pairs: Option<Vec<TradingPair>>,
}
