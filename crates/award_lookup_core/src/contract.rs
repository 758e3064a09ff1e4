use std::fmt;
use std::num::NonZeroI64;

use serde::{Deserialize, Serialize};
use serde_json::{json, Map, Value};

pub const AWARD_BODY_KEY: &str = "awardBody";
pub const MISSING_AWARD_MESSAGE: &str = "Missing award Name";
pub const INVALID_AWARD_MESSAGE: &str = "Invalid Award Name";
pub const INTERNAL_ERROR_MESSAGE: &str = "Internal server error";

/// Primary key of an award record. Never zero.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(transparent)]
pub struct AwardBody(NonZeroI64);

impl AwardBody {
    pub fn new(value: i64) -> Option<Self> {
        NonZeroI64::new(value).map(Self)
    }

    pub fn get(self) -> i64 {
        self.0.get()
    }

    /// Reads the leading integer of a path parameter with `parseInt` rules:
    /// leading whitespace and one sign are skipped, and anything after the
    /// digit run is ignored, so `"1.5"` reads as 1 and `"-4"` as -4.
    /// No digits, zero, or a value outside `i64` gives `None`.
    pub fn parse(raw: &str) -> Option<Self> {
        let trimmed = raw.trim_start();
        let sign_len = usize::from(matches!(trimmed.as_bytes().first(), Some(b'+' | b'-')));
        let unsigned = &trimmed[sign_len..];
        let digits_len = unsigned.bytes().take_while(u8::is_ascii_digit).count();
        let leading = &trimmed[..sign_len + digits_len];
        leading.parse::<i64>().ok().and_then(Self::new)
    }

    fn from_value(value: &Value) -> Option<Self> {
        match value {
            Value::String(raw) => Self::parse(raw),
            Value::Number(number) => Self::parse(&number.to_string()),
            _ => None,
        }
    }
}

impl fmt::Display for AwardBody {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// Award row as stored. Attributes other than the key pass through verbatim.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct AwardRecord(pub Map<String, Value>);

/// Cast row related to an award through its `awardBody` partition key.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct CastRecord(pub Map<String, Value>);

impl From<Map<String, Value>> for AwardRecord {
    fn from(attributes: Map<String, Value>) -> Self {
        Self(attributes)
    }
}

impl From<Map<String, Value>> for CastRecord {
    fn from(attributes: Map<String, Value>) -> Self {
        Self(attributes)
    }
}

impl AwardRecord {
    pub fn attribute(&self, name: &str) -> Option<&Value> {
        self.0.get(name)
    }
}

impl CastRecord {
    pub fn attribute(&self, name: &str) -> Option<&Value> {
        self.0.get(name)
    }
}

/// The subset of an API Gateway HTTP event the award lookup reads.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct AwardLookupEvent {
    #[serde(default)]
    pub path_parameters: Option<Map<String, Value>>,
    #[serde(default)]
    pub query_string_parameters: Option<Map<String, Value>>,
}

impl AwardLookupEvent {
    pub fn from_value(event: Value) -> Result<Self, serde_json::Error> {
        if event.is_null() {
            return Ok(Self::default());
        }
        serde_json::from_value(event)
    }

    pub fn award_body(&self) -> Option<AwardBody> {
        self.path_parameters
            .as_ref()
            .and_then(|parameters| parameters.get(AWARD_BODY_KEY))
            .and_then(AwardBody::from_value)
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct AwardResponseData {
    #[serde(rename = "awardBody")]
    pub award_body: AwardRecord,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub cast: Option<Vec<CastRecord>>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct AwardResponseBody {
    pub data: AwardResponseData,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct MessageBody {
    #[serde(rename = "Message")]
    pub message: String,
}

impl MessageBody {
    pub fn new(message: impl Into<String>) -> Self {
        Self {
            message: message.into(),
        }
    }

    pub fn to_json(&self) -> Value {
        json!({"Message": self.message})
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ErrorDetail {
    pub code: String,
    pub message: String,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ErrorBody {
    pub error: ErrorDetail,
}

impl ErrorBody {
    /// Opaque error payload. Raw error text stays in the logs.
    pub fn internal(code: impl Into<String>) -> Self {
        Self {
            error: ErrorDetail {
                code: code.into(),
                message: INTERNAL_ERROR_MESSAGE.to_string(),
            },
        }
    }

    pub fn to_json(&self) -> Value {
        json!({"error": {"code": self.error.code, "message": self.error.message}})
    }
}
