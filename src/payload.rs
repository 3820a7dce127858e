//! Dashboard Payload
//!
//! Typed shape of the `/api/dashboard-data` response and of the legacy
//! embedded-data blob, plus strict decoding of both.

use serde::{Deserialize, Deserializer, Serialize};

use crate::error::{DashboardError, DashboardResult, DEFAULT_REJECTION};

/// Aggregated spending returned by the dashboard endpoint
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct DashboardPayload {
    pub total_expenses: f64,
    pub category_count: u32,
    /// Ordered as the backend sent it; order fixes bar position and colour
    #[serde(default, deserialize_with = "null_as_empty")]
    pub expenses_by_category: Vec<CategoryTotal>,
}

/// Total spent in one category
///
/// Travels as a `[name, amount]` pair on the wire.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(from = "(String, f64)", into = "(String, f64)")]
pub struct CategoryTotal {
    pub name: String,
    pub amount: f64,
}

impl CategoryTotal {
    pub fn new(name: impl Into<String>, amount: f64) -> Self {
        Self {
            name: name.into(),
            amount,
        }
    }
}

impl From<(String, f64)> for CategoryTotal {
    fn from((name, amount): (String, f64)) -> Self {
        Self { name, amount }
    }
}

impl From<CategoryTotal> for (String, f64) {
    fn from(total: CategoryTotal) -> Self {
        (total.name, total.amount)
    }
}

/// Entry of the JSON blob embedded in legacy dashboard templates
#[derive(Debug, Clone, PartialEq, Deserialize)]
pub struct EmbeddedEntry {
    pub category: String,
    pub total: f64,
}

impl From<EmbeddedEntry> for CategoryTotal {
    fn from(entry: EmbeddedEntry) -> Self {
        Self {
            name: entry.category,
            amount: entry.total,
        }
    }
}

/// The `success` / `error` envelope every response carries
#[derive(Debug, Deserialize)]
struct ResponseStatus {
    success: bool,
    #[serde(default)]
    error: Option<String>,
}

/// A complete endpoint response
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct DashboardResponse {
    pub success: bool,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub error: Option<String>,
    #[serde(flatten)]
    pub payload: Option<DashboardPayload>,
}

impl DashboardResponse {
    /// Successful response carrying `payload`
    pub fn ok(payload: DashboardPayload) -> Self {
        Self {
            success: true,
            error: None,
            payload: Some(payload),
        }
    }

    /// Failure response with an optional reason
    pub fn rejected(error: Option<String>) -> Self {
        Self {
            success: false,
            error,
            payload: None,
        }
    }

    /// Parse a response body.
    ///
    /// The envelope is read first; the payload schema is only enforced when
    /// the backend claims success.
    pub fn from_json(body: &str) -> Result<Self, serde_json::Error> {
        let value: serde_json::Value = serde_json::from_str(body)?;
        let status = ResponseStatus::deserialize(&value)?;

        let payload = if status.success {
            Some(DashboardPayload::deserialize(value)?)
        } else {
            None
        };

        Ok(Self {
            success: status.success,
            error: status.error,
            payload,
        })
    }

    /// Turn the response into the payload or a `Rejected` error
    pub fn into_result(self) -> DashboardResult<DashboardPayload> {
        match (self.success, self.payload) {
            (true, Some(payload)) => Ok(payload),
            _ => Err(DashboardError::Rejected(
                self.error
                    .filter(|e| !e.is_empty())
                    .unwrap_or_else(|| DEFAULT_REJECTION.to_string()),
            )),
        }
    }
}

/// Decode a 2xx response body into a payload
pub fn decode_response(body: &str) -> DashboardResult<DashboardPayload> {
    DashboardResponse::from_json(body)?.into_result()
}

/// Decode a response given its HTTP status.
///
/// Non-2xx responses are failures. A failure envelope in the body keeps its
/// message; anything else becomes `Http { status }`.
pub fn decode_http(status: u16, body: &str) -> DashboardResult<DashboardPayload> {
    if (200..300).contains(&status) {
        return decode_response(body);
    }

    match decode_response(body) {
        Err(rejected @ DashboardError::Rejected(_)) => Err(rejected),
        _ => Err(DashboardError::Http { status }),
    }
}

/// Decode the legacy `[{category, total}]` blob into category totals
pub fn decode_embedded(raw: &str) -> DashboardResult<Vec<CategoryTotal>> {
    let entries: Option<Vec<EmbeddedEntry>> = serde_json::from_str(raw.trim())?;
    Ok(entries
        .unwrap_or_default()
        .into_iter()
        .map(CategoryTotal::from)
        .collect())
}

fn null_as_empty<'de, D, T>(deserializer: D) -> Result<Vec<T>, D::Error>
where
    D: Deserializer<'de>,
    T: Deserialize<'de>,
{
    Ok(Option::<Vec<T>>::deserialize(deserializer)?.unwrap_or_default())
}
