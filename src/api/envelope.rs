//! Backend response envelope and lenient field decoders.
use crate::error::{CrateError, Result};
use crate::term::coerce::kind_of;
use serde::de::Error as _;
use serde::{Deserialize, Deserializer};
use serde_json::Value;

/// `{status, success, message, total_data, data}` wrapper the backend puts
/// around every payload.
#[derive(Debug, Deserialize)]
pub struct Envelope<T> {
    #[serde(default)]
    pub status: Option<u16>,
    #[serde(default = "default_success")]
    pub success: bool,
    #[serde(default)]
    pub message: Option<String>,
    #[serde(default)]
    pub total_data: Option<u64>,
    pub data: Option<T>,
}

fn default_success() -> bool {
    true
}

impl<T> Envelope<T> {
    /// Unwraps the payload, turning `success: false` or a missing `data` field
    /// into an error naming the endpoint.
    pub fn into_data(self, endpoint: &str) -> Result<T> {
        if !self.success {
            return Err(CrateError::ApiUnsuccessful {
                endpoint: endpoint.to_string(),
                message: self.message.unwrap_or_else(|| "no message".to_string()),
            });
        }
        self.data.ok_or_else(|| CrateError::ApiUnsuccessful {
            endpoint: endpoint.to_string(),
            message: "response carried no data".to_string(),
        })
    }
}

/// Backend error bodies carry a `message`; FastAPI validation errors a `detail`.
pub fn error_message(body: &str) -> String {
    let parsed: Option<Value> = serde_json::from_str(body).ok();
    parsed
        .as_ref()
        .and_then(|value| value.get("message").or_else(|| value.get("detail")))
        .map(|message| match message {
            Value::String(s) => s.clone(),
            other => other.to_string(),
        })
        .unwrap_or_else(|| body.trim().to_string())
}

/// Whether a per-item backend status reports a miss. The backend writes
/// `not_found`; older payloads used `not found`.
pub fn is_not_found(status: Option<&str>) -> bool {
    status.is_some_and(|status| {
        status.trim().replace('_', " ").eq_ignore_ascii_case("not found")
    })
}

/// Accepts identifiers sent either as JSON strings or numbers.
pub(crate) fn id_string<'de, D>(deserializer: D) -> std::result::Result<String, D::Error>
where
    D: Deserializer<'de>,
{
    match Option::<Value>::deserialize(deserializer)? {
        None | Some(Value::Null) => Ok(String::new()),
        Some(Value::String(s)) => Ok(s),
        Some(Value::Number(n)) => Ok(n.to_string()),
        Some(other) => Err(D::Error::custom(format!(
            "expected a string or numeric identifier, found {}",
            kind_of(&other)
        ))),
    }
}

/// Reads an explicit `null` as the type's default.
pub(crate) fn null_default<'de, D, T>(deserializer: D) -> std::result::Result<T, D::Error>
where
    D: Deserializer<'de>,
    T: Default + Deserialize<'de>,
{
    Ok(Option::<T>::deserialize(deserializer)?.unwrap_or_default())
}
