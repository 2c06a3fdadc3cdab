//! Response envelopes and list payloads.
//!
//! The backend wraps every payload as `{status, message, data}`; older endpoints use
//! `{statusCode, message, data, timestamp, path}`. [`Envelope`] accepts both. List
//! payloads arrive either as a bare array or as a paginated object, and both decode
//! into [`Page`].

use serde::de::DeserializeOwned;
use serde::{Deserialize, Serialize};
use serde_json::Value;

use crate::error::ApiError;

/// Both envelope variants in one struct; absent fields stay `None`.
#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Envelope {
    #[serde(default)]
    pub status: Option<Value>,
    #[serde(default)]
    pub status_code: Option<u16>,
    #[serde(default)]
    pub message: Option<String>,
    #[serde(default)]
    pub data: Option<Value>,
    #[serde(default)]
    pub timestamp: Option<String>,
    #[serde(default)]
    pub path: Option<String>,
}

impl Envelope {
    /// Whether the body looks like an envelope at all.
    fn is_envelope(value: &Value) -> bool {
        value.as_object().is_some_and(|map| {
            map.contains_key("data")
                && (map.contains_key("status")
                    || map.contains_key("statusCode")
                    || map.contains_key("message"))
        })
    }
}

/// Pull `data` and `message` out of a response body. Bodies that are not wrapped in
/// an envelope are returned as-is.
pub fn unwrap_body(body: Value) -> (Value, Option<String>) {
    if !Envelope::is_envelope(&body) {
        return (body, None);
    }
    match serde_json::from_value::<Envelope>(body) {
        Ok(envelope) => (envelope.data.unwrap_or(Value::Null), envelope.message),
        Err(e) => (Value::Null, Some(e.to_string())),
    }
}

/// Decode an unwrapped payload into `T`.
pub fn decode<T: DeserializeOwned>(data: Value) -> Result<T, ApiError> {
    serde_json::from_value(data).map_err(|e| ApiError::decode(e.to_string()))
}

/// One page of a list endpoint.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Page<T> {
    pub items: Vec<T>,
    pub total: u64,
    pub page: u32,
    pub limit: u32,
}

impl<T> Page<T> {
    /// A single page holding every item.
    pub fn from_items(items: Vec<T>) -> Self {
        let total = items.len() as u64;
        let limit = items.len().max(1) as u32;
        Self {
            items,
            total,
            page: 1,
            limit,
        }
    }

    pub fn total_pages(&self) -> u32 {
        if self.limit == 0 {
            return 1;
        }
        let pages = self.total.div_ceil(u64::from(self.limit));
        pages.max(1) as u32
    }

    pub fn is_empty(&self) -> bool {
        self.items.is_empty()
    }
}

impl<T> Default for Page<T> {
    fn default() -> Self {
        Self::from_items(Vec::new())
    }
}

/// Wire shape of a paginated list.
#[derive(Deserialize)]
#[serde(rename_all = "camelCase")]
struct RawPage<T> {
    #[serde(alias = "docs", alias = "results", alias = "data")]
    items: Vec<T>,
    #[serde(default, alias = "totalItems", alias = "totalDocs", alias = "count")]
    total: Option<u64>,
    #[serde(default, alias = "currentPage")]
    page: Option<u32>,
    #[serde(default, alias = "perPage", alias = "pageSize")]
    limit: Option<u32>,
}

#[derive(Deserialize)]
#[serde(untagged)]
enum ListPayload<T> {
    Plain(Vec<T>),
    Paged(RawPage<T>),
}

/// Decode a list payload, whichever shape it has. A paged object may also nest its
/// items one level deeper under a resource name (`{"colleges": [...], "total": 3}`).
pub fn decode_page<T: DeserializeOwned>(data: Value, nested_key: &str) -> Result<Page<T>, ApiError> {
    let data = match data {
        Value::Object(mut map) if !map.contains_key("items") && map.contains_key(nested_key) => {
            if let Some(items) = map.remove(nested_key) {
                map.insert("items".to_string(), items);
            }
            Value::Object(map)
        }
        other => other,
    };

    match decode::<ListPayload<T>>(data)? {
        ListPayload::Plain(items) => Ok(Page::from_items(items)),
        ListPayload::Paged(raw) => {
            let count = raw.items.len();
            let limit = raw.limit.unwrap_or(count.max(1) as u32);
            Ok(Page {
                total: raw.total.unwrap_or(count as u64),
                page: raw.page.unwrap_or(1).max(1),
                limit,
                items: raw.items,
            })
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[derive(Debug, PartialEq, Deserialize)]
    struct Item {
        name: String,
    }

    #[test]
    fn test_unwrap_current_envelope() {
        let (data, message) = unwrap_body(json!({
            "status": "success",
            "message": "Colleges fetched",
            "data": [{"name": "MIT"}]
        }));
        assert_eq!(message.as_deref(), Some("Colleges fetched"));
        assert_eq!(data, json!([{"name": "MIT"}]));
    }

    #[test]
    fn test_unwrap_legacy_envelope() {
        let (data, message) = unwrap_body(json!({
            "statusCode": 200,
            "message": "OK",
            "data": {"name": "MIT"},
            "timestamp": "2024-03-01T12:00:00Z",
            "path": "/api/v1/colleges/getCollegeById/1"
        }));
        assert_eq!(message.as_deref(), Some("OK"));
        let item: Item = decode(data).unwrap();
        assert_eq!(item.name, "MIT");
    }

    #[test]
    fn test_bare_body_passes_through() {
        let (data, message) = unwrap_body(json!({"name": "MIT"}));
        assert!(message.is_none());
        assert_eq!(data, json!({"name": "MIT"}));
    }

    #[test]
    fn test_plain_list_becomes_single_page() {
        let page: Page<Item> = decode_page(json!([{"name": "a"}, {"name": "b"}]), "colleges").unwrap();
        assert_eq!(page.items.len(), 2);
        assert_eq!(page.total, 2);
        assert_eq!(page.total_pages(), 1);
    }

    #[test]
    fn test_paged_aliases_and_nested_key() {
        let page: Page<Item> = decode_page(
            json!({"docs": [{"name": "a"}], "totalDocs": 41, "page": 2, "limit": 20}),
            "users",
        )
        .unwrap();
        assert_eq!(page.total, 41);
        assert_eq!(page.page, 2);
        assert_eq!(page.total_pages(), 3);

        let page: Page<Item> =
            decode_page(json!({"colleges": [{"name": "a"}], "total": 1}), "colleges").unwrap();
        assert_eq!(page.items[0].name, "a");
    }

    #[test]
    fn test_wrong_shape_is_decode_error() {
        let err = decode_page::<Item>(json!({"nothing": true}), "colleges").unwrap_err();
        assert!(matches!(err, ApiError::Decode { .. }));
    }
}
