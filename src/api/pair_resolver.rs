use crate::config::AggregatorConfig;
use crate::error::{Error, Result};
use crate::models::TradingPair;

pub const DEFAULT_ALLOWED_DEXES: [&str; 2] = ["raydium", "orca"];
pub const DEFAULT_QUOTE_SYMBOLS: [&str; 2] = ["SOL", "WSOL"];

/// Trusted venues and quote currencies a chart pair must use.
#[derive(Debug, Clone, PartialEq)]
pub struct PairPolicy {
    pub allowed_dexes: Vec<String>,
    pub quote_symbols: Vec<String>,
}

impl Default for PairPolicy {
    fn default() -> Self {
        Self {
            allowed_dexes: DEFAULT_ALLOWED_DEXES.iter().map(|s| s.to_string()).collect(),
            quote_symbols: DEFAULT_QUOTE_SYMBOLS.iter().map(|s| s.to_string()).collect(),
        }
    }
}

impl From<&AggregatorConfig> for PairPolicy {
    fn from(config: &AggregatorConfig) -> Self {
        Self {
            allowed_dexes: config.allowed_dexes.clone(),
            quote_symbols: config.quote_symbols.clone(),
        }
    }
}

impl PairPolicy {
    pub fn accepts(&self, pair: &TradingPair) -> bool {
        let dex_ok = self
            .allowed_dexes
            .iter()
            .any(|dex| dex.eq_ignore_ascii_case(&pair.dex_id));
        let quote_ok = self
            .quote_symbols
            .iter()
            .any(|symbol| symbol.eq_ignore_ascii_case(pair.quote_symbol()));
        dex_ok && quote_ok
    }
}

/// First pair in input order accepted by `policy`.
pub fn select_pair<'a>(
    pairs: Option<&'a [TradingPair]>,
    policy: &PairPolicy,
) -> Result<&'a TradingPair> {
    let pairs = pairs.unwrap_or_default();
    if pairs.is_empty() {
        return Err(Error::PairNotFound("aggregator returned no pairs".into()));
    }
    pairs.iter().find(|pair| policy.accepts(pair)).ok_or_else(|| {
        Error::PairNotFound(format!(
            "none of {} candidate pairs trade against {:?} on {:?}",
            pairs.len(),
            policy.quote_symbols,
            policy.allowed_dexes
        ))
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::QuoteToken;
    use std::collections::HashMap;

    fn pair(dex: &str, quote: &str, address: &str) -> TradingPair {
        TradingPair {
            dex_id: dex.to_string(),
            pair_address: address.to_string(),
            quote_token: QuoteToken {
                address: None,
                symbol: quote.to_string(),
            },
            price_change: HashMap::new(),
            price_native: None,
            price_usd: None,
        }
    }

    #[test]
    fn test_first_qualifying_pair_wins() {
        let pairs = vec![
            pair("meteora", "SOL", "p1"),
            pair("raydium", "USDC", "p2"),
            pair("orca", "WSOL", "p3"),
            pair("raydium", "SOL", "p4"),
        ];
        let selected = select_pair(Some(pairs.as_slice()), &PairPolicy::default()).unwrap();
        assert_eq!(selected.pair_address, "p3");
    }

    #[test]
    fn test_matching_ignores_case() {
        let pairs = vec![pair("Raydium", "sol", "p1")];
        let selected = select_pair(Some(pairs.as_slice()), &PairPolicy::default()).unwrap();
        assert_eq!(selected.pair_address, "p1");
    }

    #[test]
    fn test_no_qualifying_pair() {
        let pairs = vec![pair("meteora", "SOL", "p1"), pair("raydium", "USDT", "p2")];
        assert!(matches!(
            select_pair(Some(pairs.as_slice()), &PairPolicy::default()),
            Err(Error::PairNotFound(_))
        ));
    }

    #[test]
    fn test_empty_or_absent_list() {
        let policy = PairPolicy::default();
        assert!(matches!(select_pair(None, &policy), Err(Error::PairNotFound(_))));
        assert!(matches!(select_pair(Some(&[][..]), &policy), Err(Error::PairNotFound(_))));
    }

    #[test]
    fn test_custom_policy() {
        let policy = PairPolicy {
            allowed_dexes: vec!["meteora".into()],
            quote_symbols: vec!["SOL".into()],
        };
        let pairs = vec![pair("raydium", "SOL", "p1"), pair("meteora", "SOL", "p2")];
        assert_eq!(select_pair(Some(pairs.as_slice()), &policy).unwrap().pair_address, "p2");
    }
}
