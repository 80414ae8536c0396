//! Mapping of typed inputs onto backend HTTP requests

use serde::Serialize;
use serde_json::{Number, Value};
use url::Url;

use crate::error::ApiResult;

/// HTTP methods used by the backend API
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum HttpMethod {
    Get,
    Post,
}

impl HttpMethod {
    pub fn as_str(&self) -> &'static str {
        match self {
            HttpMethod::Get => "GET",
            HttpMethod::Post => "POST",
        }
    }
}

impl std::fmt::Display for HttpMethod {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

/// A single request against the backend, independent of its origin
#[derive(Debug, Clone, PartialEq)]
pub struct BackendRequest {
    pub method: HttpMethod,
    /// Absolute path, e.g. `/api/pnl`
    pub path: String,
    /// Query pairs in insertion order
    pub query: Vec<(String, String)>,
    /// JSON body (POST only)
    pub body: Option<Value>,
}

impl BackendRequest {
    pub fn new(method: HttpMethod, path: impl Into<String>) -> Self {
        Self {
            method,
            path: path.into(),
            query: Vec::new(),
            body: None,
        }
    }

    pub fn with_query(mut self, query: Vec<(String, String)>) -> Self {
        self.query = query;
        self
    }

    pub fn with_body(mut self, body: Value) -> Self {
        self.body = Some(body);
        self
    }

    /// Resolve the full URL against a backend origin
    ///
    /// The path is appended to the origin as-is, so an origin carrying a path
    /// prefix keeps it.
    pub fn url(&self, base_url: &str) -> ApiResult<Url> {
        let mut url = Url::parse(&format!(
            "{}{}",
            base_url.trim_end_matches('/'),
            self.path
        ))?;

        if !self.query.is_empty() {
            url.query_pairs_mut().extend_pairs(&self.query);
        }

        Ok(url)
    }
}

/// A typed backend endpoint input
///
/// POST endpoints send the serialized input as their body; GET endpoints send
/// [`Endpoint::query_pairs`] instead.
pub trait Endpoint: Serialize {
    const METHOD: HttpMethod;
    const PATH: &'static str;

    /// Check constraints serde cannot express
    fn validate(&self) -> ApiResult<()> {
        Ok(())
    }

    fn query_pairs(&self) -> Vec<(String, String)> {
        Vec::new()
    }

    /// Validate and build the backend request
    fn to_request(&self) -> ApiResult<BackendRequest> {
        self.validate()?;

        let request = BackendRequest::new(Self::METHOD, Self::PATH);
        Ok(match Self::METHOD {
            HttpMethod::Get => request.with_query(self.query_pairs()),
            HttpMethod::Post => request.with_body(serde_json::to_value(self)?),
        })
    }
}

/// Render a JSON number the way it appears in a query string
///
/// Follows JavaScript's `Number#toString`: integral values drop any
/// fractional part (`5.0` -> `5`) and magnitudes from `1e21` up or below
/// `1e-6` switch to exponent form (`1e+21`, `1e-7`).
pub(crate) fn format_number(number: &Number) -> String {
    if let Some(n) = number.as_i64() {
        n.to_string()
    } else if let Some(n) = number.as_u64() {
        n.to_string()
    } else {
        number
            .as_f64()
            .map(format_float)
            .unwrap_or_else(|| number.to_string())
    }
}

fn format_float(value: f64) -> String {
    if value == 0.0 {
        return "0".to_string();
    }

    // Shortest round-trip digits, e.g. "-1.5e-7"
    let scientific = format!("{:e}", value.abs());
    let (mantissa, exponent) = match scientific.split_once('e') {
        Some((mantissa, exponent)) => (mantissa, exponent.parse::<i32>().unwrap_or(0)),
        None => (scientific.as_str(), 0),
    };
    let digits: String = mantissa.chars().filter(|c| *c != '.').collect();
    let k = digits.len() as i32;
    // Position of the decimal point relative to the digits
    let n = exponent + 1;

    let body = if k <= n && n <= 21 {
        format!("{}{}", digits, "0".repeat((n - k) as usize))
    } else if 0 < n && n <= 21 {
        format!("{}.{}", &digits[..n as usize], &digits[n as usize..])
    } else if -6 < n && n <= 0 {
        format!("0.{}{}", "0".repeat((-n) as usize), digits)
    } else {
        let sign = if n - 1 < 0 { '-' } else { '+' };
        let mantissa = if k == 1 {
            digits.clone()
        } else {
            format!("{}.{}", &digits[..1], &digits[1..])
        };
        format!("{}e{}{}", mantissa, sign, (n - 1).abs())
    };

    if value < 0.0 {
        format!("-{}", body)
    } else {
        body
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_url_with_query() {
        let request = BackendRequest::new(HttpMethod::Get, "/api/pnl/top-tokens").with_query(vec![
            ("limit".to_string(), "5".to_string()),
            ("minTrades".to_string(), "2".to_string()),
        ]);

        let url = request.url("https://example.com").unwrap();
        assert_eq!(url.path(), "/api/pnl/top-tokens");
        assert_eq!(url.query(), Some("limit=5&minTrades=2"));
    }

    #[test]
    fn test_url_keeps_origin_prefix() {
        let request = BackendRequest::new(HttpMethod::Post, "/api/pnl");

        let url = request.url("http://localhost:8080/proxy/").unwrap();
        assert_eq!(url.as_str(), "http://localhost:8080/proxy/api/pnl");
        assert_eq!(url.query(), None);
    }

    #[test]
    fn test_query_values_are_encoded() {
        let request = BackendRequest::new(HttpMethod::Get, "/api/x")
            .with_query(vec![("name".to_string(), "a b&c".to_string())]);

        let url = request.url("https://example.com").unwrap();
        assert_eq!(url.query(), Some("name=a+b%26c"));
    }

    #[test]
    fn test_format_number() {
        let cases = [
            (json!(5), "5"),
            (json!(-3), "-3"),
            (json!(5.0), "5"),
            (json!(2.5), "2.5"),
            (json!(18446744073709551615u64), "18446744073709551615"),
            (json!(-0.25), "-0.25"),
            (json!(123.456), "123.456"),
            (json!(0.000001), "0.000001"),
            (json!(1e-7), "1e-7"),
            (json!(1.5e-7), "1.5e-7"),
            (json!(1e20), "100000000000000000000"),
            (json!(1e21), "1e+21"),
            (json!(-2.5e22), "-2.5e+22"),
        ];

        for (value, expected) in cases {
            let Value::Number(number) = &value else {
                panic!("not a number: {}", value);
            };
            assert_eq!(format_number(number), expected, "formatting {}", value);
        }
    }
}
