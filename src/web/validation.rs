use crate::chart::Interval;
use crate::error::{Error, Result};
use serde::Deserialize;

/// Query string of `GET /api/candles`.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct CandleQuery {
    #[serde(rename = "tokenMint")]
    pub token_mint: Option<String>,
    pub interval: Option<String>,
}

impl CandleQuery {
    /// Builds the query from raw key/value pairs. The first occurrence of a
    /// repeated key wins and unknown keys are ignored.
    pub fn from_pairs(pairs: Vec<(String, String)>) -> Self {
        let mut query = Self::default();
        for (key, value) in pairs {
            let slot = match key.as_str() {
                "tokenMint" => &mut query.token_mint,
                "interval" => &mut query.interval,
                _ => continue,
            };
            if slot.is_none() {
                *slot = Some(value);
            }
        }
        query
    }

    pub fn token_mint(&self) -> Result<&str> {
        self.token_mint
            .as_deref()
            .map(str::trim)
            .filter(|mint| !mint.is_empty())
            .ok_or_else(|| Error::MissingParameter("tokenMint".into()))
    }

    pub fn interval_label(&self) -> &str {
        self.interval
            .as_deref()
            .unwrap_or_else(|| Interval::default().label())
    }
}
