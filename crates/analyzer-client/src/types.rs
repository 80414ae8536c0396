//! Typed inputs of the wallet analyzer backend endpoints

use indexmap::IndexMap;
use serde::de::Error as _;
use serde::{Deserialize, Deserializer, Serialize};
use serde_json::{Number, Value};

use crate::error::{ApiError, ApiResult};
use crate::request::{format_number, Endpoint, HttpMethod};

/// Default number of PNL documents returned by a query
pub const DEFAULT_PNL_LIMIT: u32 = 10;

/// Bounds for [`PnlQuery::limit`]
pub const MIN_PNL_LIMIT: u32 = 1;
pub const MAX_PNL_LIMIT: u32 = 1000;

/// Transaction signatures to decode into a human readable form
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TransactionSignatures {
    pub signatures: Vec<String>,
}

impl Endpoint for TransactionSignatures {
    const METHOD: HttpMethod = HttpMethod::Post;
    const PATH: &'static str = "/api/transactions";
}

/// Filter of a PNL query
///
/// `wallet` and `token` are the well-known keys; anything else is forwarded
/// untouched in the order it was given.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct PnlFilter {
    #[serde(
        default,
        deserialize_with = "present_string",
        skip_serializing_if = "Option::is_none"
    )]
    pub wallet: Option<String>,
    #[serde(
        default,
        deserialize_with = "present_string",
        skip_serializing_if = "Option::is_none"
    )]
    pub token: Option<String>,
    #[serde(flatten)]
    pub extra: IndexMap<String, Value>,
}

/// Query over wallet/token PNL documents
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PnlQuery {
    #[serde(default)]
    pub filter: PnlFilter,
    #[serde(default = "default_pnl_limit", deserialize_with = "integral_limit")]
    pub limit: u32,
    #[serde(default)]
    pub projection: IndexMap<String, Value>,
    #[serde(default)]
    pub sort: IndexMap<String, Value>,
}

fn default_pnl_limit() -> u32 {
    DEFAULT_PNL_LIMIT
}

/// Optional string that may be omitted but not sent as `null`
fn present_string<'de, D>(deserializer: D) -> Result<Option<String>, D::Error>
where
    D: Deserializer<'de>,
{
    String::deserialize(deserializer).map(Some)
}

/// Integer limit, also accepting integral floats such as `10.0`
fn integral_limit<'de, D>(deserializer: D) -> Result<u32, D::Error>
where
    D: Deserializer<'de>,
{
    let number = Number::deserialize(deserializer)?;

    let limit = match (number.as_u64(), number.as_f64()) {
        (Some(n), _) => u32::try_from(n).ok(),
        (None, Some(f)) if f.fract() == 0.0 && (0.0..=u32::MAX as f64).contains(&f) => {
            Some(f as u32)
        }
        _ => None,
    };

    limit.ok_or_else(|| {
        D::Error::custom(format!(
            "limit must be an integer between {} and {}, got {}",
            MIN_PNL_LIMIT, MAX_PNL_LIMIT, number
        ))
    })
}

impl Default for PnlQuery {
    fn default() -> Self {
        Self {
            filter: PnlFilter::default(),
            limit: DEFAULT_PNL_LIMIT,
            projection: IndexMap::new(),
            sort: IndexMap::new(),
        }
    }
}

impl Endpoint for PnlQuery {
    const METHOD: HttpMethod = HttpMethod::Post;
    const PATH: &'static str = "/api/pnl";

    fn validate(&self) -> ApiResult<()> {
        if !(MIN_PNL_LIMIT..=MAX_PNL_LIMIT).contains(&self.limit) {
            return Err(ApiError::InvalidInput(format!(
                "limit must be between {} and {}, got {}",
                MIN_PNL_LIMIT, MAX_PNL_LIMIT, self.limit
            )));
        }
        Ok(())
    }
}

/// Token mints to look up details (name, symbol) for
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TokenMints {
    pub mints: Vec<String>,
}

impl Endpoint for TokenMints {
    const METHOD: HttpMethod = HttpMethod::Post;
    const PATH: &'static str = "/api/tokens";
}

/// Token search by name or symbol
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct TokenSearch {
    #[serde(
        default,
        deserialize_with = "present_string",
        skip_serializing_if = "Option::is_none"
    )]
    pub name: Option<String>,
}

impl Endpoint for TokenSearch {
    const METHOD: HttpMethod = HttpMethod::Post;
    const PATH: &'static str = "/api/tokens/search";
}

/// Top tokens ranked by PNL across all wallets
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct TopTokensQuery {
    pub limit: Number,
    pub min_trades: Number,
}

impl Endpoint for TopTokensQuery {
    const METHOD: HttpMethod = HttpMethod::Get;
    const PATH: &'static str = "/api/pnl/top-tokens";

    fn query_pairs(&self) -> Vec<(String, String)> {
        vec![
            ("limit".to_string(), format_number(&self.limit)),
            ("minTrades".to_string(), format_number(&self.min_trades)),
        ]
    }
}

/// Wallet leaderboard by realised profit
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct LeaderboardQuery {
    pub limit: Number,
}

impl Endpoint for LeaderboardQuery {
    const METHOD: HttpMethod = HttpMethod::Get;
    const PATH: &'static str = "/api/pnl/leaderboard";

    fn query_pairs(&self) -> Vec<(String, String)> {
        vec![("limit".to_string(), format_number(&self.limit))]
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_pnl_query_defaults() {
        let query: PnlQuery = serde_json::from_value(json!({})).unwrap();
        assert_eq!(query, PnlQuery::default());

        let request = query.to_request().unwrap();
        assert_eq!(request.method, HttpMethod::Post);
        assert_eq!(request.path, "/api/pnl");
        assert_eq!(
            serde_json::to_string(&request.body.unwrap()).unwrap(),
            r#"{"filter":{},"limit":10,"projection":{},"sort":{}}"#
        );
    }

    #[test]
    fn test_pnl_query_limit_bounds() {
        for limit in [0, 1001] {
            let query: PnlQuery = serde_json::from_value(json!({ "limit": limit })).unwrap();
            let err = query.to_request().unwrap_err();
            assert!(matches!(err, ApiError::InvalidInput(_)));
            assert!(err.to_string().contains("between 1 and 1000"));
        }

        for limit in [1, 1000] {
            let query: PnlQuery = serde_json::from_value(json!({ "limit": limit })).unwrap();
            assert!(query.to_request().is_ok());
        }
    }

    #[test]
    fn test_pnl_query_rejects_fractional_limit() {
        assert!(serde_json::from_value::<PnlQuery>(json!({ "limit": 2.5 })).is_err());
        assert!(serde_json::from_value::<PnlQuery>(json!({ "limit": -1 })).is_err());
    }

    #[test]
    fn test_pnl_query_accepts_integral_float_limit() {
        let query: PnlQuery = serde_json::from_value(json!({ "limit": 10.0 })).unwrap();
        assert_eq!(query.limit, 10);

        let body = query.to_request().unwrap().body.unwrap();
        assert_eq!(body["limit"], json!(10));
    }

    #[test]
    fn test_explicit_null_strings_are_rejected() {
        for filter in [json!({ "wallet": null }), json!({ "token": null })] {
            let result = serde_json::from_value::<PnlQuery>(json!({ "filter": filter }));
            assert!(result.is_err(), "{}", filter);
        }

        assert!(serde_json::from_value::<TokenSearch>(json!({ "name": null })).is_err());
        assert_eq!(
            serde_json::from_value::<TokenSearch>(json!({})).unwrap(),
            TokenSearch::default()
        );
    }

    #[test]
    fn test_pnl_filter_keeps_extra_keys_in_order() {
        let query: PnlQuery = serde_json::from_value(json!({
            "filter": { "wallet": "W1", "usd": { "$gt": 100 }, "closed": true },
            "sort": { "pnl": -1, "usd": 1 },
            "limit": 50
        }))
        .unwrap();

        assert_eq!(query.filter.wallet.as_deref(), Some("W1"));
        assert_eq!(query.filter.extra.keys().collect::<Vec<_>>(), ["usd", "closed"]);

        let body = query.to_request().unwrap().body.unwrap();
        assert_eq!(
            serde_json::to_string(&body).unwrap(),
            r#"{"filter":{"wallet":"W1","usd":{"$gt":100},"closed":true},"limit":50,"projection":{},"sort":{"pnl":-1,"usd":1}}"#
        );
    }

    #[test]
    fn test_pnl_filter_wallet_must_be_string() {
        let result = serde_json::from_value::<PnlQuery>(json!({ "filter": { "wallet": 42 } }));
        assert!(result.is_err());
    }

    #[test]
    fn test_post_bodies() {
        let request = TransactionSignatures {
            signatures: vec!["sig1".to_string(), "sig2".to_string()],
        }
        .to_request()
        .unwrap();
        assert_eq!(request.path, "/api/transactions");
        assert_eq!(request.body, Some(json!({ "signatures": ["sig1", "sig2"] })));

        let request = TokenMints { mints: vec!["So111".to_string()] }.to_request().unwrap();
        assert_eq!(request.path, "/api/tokens");
        assert_eq!(request.body, Some(json!({ "mints": ["So111"] })));

        let request = TokenSearch::default().to_request().unwrap();
        assert_eq!(request.path, "/api/tokens/search");
        assert_eq!(request.body, Some(json!({})));
    }

    #[test]
    fn test_top_tokens_query_string() {
        let query: TopTokensQuery =
            serde_json::from_value(json!({ "limit": 5, "minTrades": 2 })).unwrap();
        let request = query.to_request().unwrap();

        assert_eq!(request.method, HttpMethod::Get);
        assert!(request.body.is_none());

        let url = request.url("https://example.com").unwrap();
        assert_eq!(url.path(), "/api/pnl/top-tokens");
        assert_eq!(url.query(), Some("limit=5&minTrades=2"));
    }

    #[test]
    fn test_leaderboard_query_string() {
        let query: LeaderboardQuery = serde_json::from_value(json!({ "limit": 25 })).unwrap();
        let url = query.to_request().unwrap().url("https://example.com").unwrap();

        assert_eq!(url.path(), "/api/pnl/leaderboard");
        assert_eq!(url.query(), Some("limit=25"));
    }

    #[test]
    fn test_numeric_fields_require_numbers() {
        assert!(serde_json::from_value::<LeaderboardQuery>(json!({ "limit": "5" })).is_err());
        assert!(serde_json::from_value::<TopTokensQuery>(json!({ "limit": 5 })).is_err());
    }
}
