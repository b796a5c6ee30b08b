//! Firestore REST adapter.
//!
//! Documents live under `projects/{project}/databases/(default)/documents`. Field values use
//! Firestore's typed encoding (`{"stringValue": ..}`, `{"integerValue": "42"}`, ...), converted
//! to and from plain JSON here. The REST surface has no streaming listen, so `watch` polls the
//! query on an interval and delivers a snapshot only when the result set changed.

use super::{Document, DocumentStore, Fields, Filter, SnapshotListener};
use crate::error::StoreError;
use crate::subscription::Subscription;
use async_trait::async_trait;
use serde_json::{json, Map, Value};
use std::sync::Arc;
use std::time::Duration;

/// Supplies the bearer token for each request. `None` means "send unauthenticated".
#[async_trait]
pub trait TokenSource: Send + Sync {
    async fn id_token(&self) -> Result<Option<String>, StoreError>;
}

#[derive(Clone)]
pub struct FirestoreStore {
    client: reqwest::Client,
    documents_url: String,
    tokens: Arc<dyn TokenSource>,
    poll_interval: Duration,
}

impl FirestoreStore {
    pub fn new(
        project_id: &str,
        tokens: Arc<dyn TokenSource>,
        poll_interval: Duration,
    ) -> Result<Self, StoreError> {
        let client = reqwest::Client::builder()
            .timeout(Duration::from_secs(30))
            .build()
            .map_err(|e| StoreError::Remote(e.to_string()))?;
        Ok(Self {
            client,
            documents_url: format!(
                "https://firestore.googleapis.com/v1/projects/{}/databases/(default)/documents",
                project_id
            ),
            tokens,
            poll_interval,
        })
    }

    fn doc_url(&self, collection: &str, id: &str) -> String {
        format!("{}/{}/{}", self.documents_url, collection, urlencoding::encode(id))
    }

    async fn authorized(
        &self,
        req: reqwest::RequestBuilder,
    ) -> Result<reqwest::RequestBuilder, StoreError> {
        Ok(match self.tokens.id_token().await? {
            Some(token) => req.bearer_auth(token),
            None => req,
        })
    }

    /// Send and return the parsed JSON body, or `Ok(None)` on 404.
    async fn send(&self, req: reqwest::RequestBuilder) -> Result<Option<Value>, StoreError> {
        let resp = self.authorized(req).await?.send().await.map_err(transport_error)?;
        let status = resp.status();
        let text = resp.text().await.map_err(transport_error)?;
        if status.as_u16() == 404 {
            return Ok(None);
        }
        if status.as_u16() == 401 || status.as_u16() == 403 {
            return Err(StoreError::PermissionDenied(error_message(&text)));
        }
        if !status.is_success() {
            return Err(StoreError::Remote(format!("{} {}", status, error_message(&text))));
        }
        if text.trim().is_empty() {
            return Ok(Some(Value::Null));
        }
        serde_json::from_str(&text)
            .map(Some)
            .map_err(|e| StoreError::Remote(format!("invalid response: {}", e)))
    }

    async fn run_query(
        &self,
        collection: &str,
        filters: &[Filter],
    ) -> Result<Vec<Document>, StoreError> {
        let url = format!("{}:runQuery", self.documents_url);
        let body = structured_query(collection, filters);
        let resp = self.send(self.client.post(&url).json(&body)).await?;
        let rows = match resp {
            Some(Value::Array(rows)) => rows,
            Some(_) | None => return Ok(Vec::new()),
        };
        rows.iter()
            .filter_map(|row| row.get("document"))
            .map(decode_document)
            .collect()
    }
}

fn transport_error(e: reqwest::Error) -> StoreError {
    if e.is_connect() || e.is_timeout() || e.is_request() {
        StoreError::Network(e.to_string())
    } else {
        StoreError::Remote(e.to_string())
    }
}

/// Firestore error bodies look like `{"error": {"message": ..}}`, or an array of those for
/// `runQuery`.
fn error_message(text: &str) -> String {
    let parsed: Option<Value> = serde_json::from_str(text).ok();
    let first = match &parsed {
        Some(Value::Array(items)) => items.first(),
        other => other.as_ref(),
    };
    first
        .and_then(|v| v.get("error"))
        .and_then(|e| e.get("message"))
        .and_then(Value::as_str)
        .map(String::from)
        .unwrap_or_else(|| text.to_string())
}

pub(crate) fn structured_query(collection: &str, filters: &[Filter]) -> Value {
    let field_filters: Vec<Value> = filters
        .iter()
        .map(|f| {
            json!({
                "fieldFilter": {
                    "field": { "fieldPath": f.field },
                    "op": "EQUAL",
                    "value": encode_value(&f.value),
                }
            })
        })
        .collect();
    let mut query = json!({ "from": [{ "collectionId": collection }] });
    match field_filters.len() {
        0 => {}
        1 => query["where"] = field_filters.into_iter().next().unwrap_or(Value::Null),
        _ => {
            query["where"] =
                json!({ "compositeFilter": { "op": "AND", "filters": field_filters } });
        }
    }
    json!({ "structuredQuery": query })
}

pub(crate) fn encode_value(v: &Value) -> Value {
    match v {
        Value::Null => json!({ "nullValue": null }),
        Value::Bool(b) => json!({ "booleanValue": b }),
        Value::Number(n) => match n.as_i64() {
            Some(i) => json!({ "integerValue": i.to_string() }),
            None => json!({ "doubleValue": n.as_f64().unwrap_or(0.0) }),
        },
        Value::String(s) => json!({ "stringValue": s }),
        Value::Array(items) => {
            let values: Vec<Value> = items.iter().map(encode_value).collect();
            json!({ "arrayValue": { "values": values } })
        }
        Value::Object(map) => json!({ "mapValue": { "fields": encode_fields(map) } }),
    }
}

pub(crate) fn encode_fields(fields: &Fields) -> Value {
    Value::Object(fields.iter().map(|(k, v)| (k.clone(), encode_value(v))).collect())
}

pub(crate) fn decode_value(v: &Value) -> Result<Value, StoreError> {
    let obj = v
        .as_object()
        .ok_or_else(|| StoreError::Remote("typed value is not an object".into()))?;
    let (kind, inner) = obj
        .iter()
        .next()
        .ok_or_else(|| StoreError::Remote("empty typed value".into()))?;
    Ok(match kind.as_str() {
        "nullValue" => Value::Null,
        "booleanValue" => Value::Bool(inner.as_bool().unwrap_or(false)),
        "integerValue" => {
            let parsed = match inner {
                Value::String(s) => s.parse::<i64>().ok(),
                other => other.as_i64(),
            };
            parsed
                .map(Value::from)
                .ok_or_else(|| StoreError::Remote(format!("bad integerValue {}", inner)))?
        }
        "doubleValue" => inner.clone(),
        "stringValue" | "timestampValue" | "referenceValue" | "bytesValue" => inner.clone(),
        "geoPointValue" => inner.clone(),
        "arrayValue" => Value::Array(
            inner
                .get("values")
                .and_then(Value::as_array)
                .map(|items| items.iter().map(decode_value).collect::<Result<Vec<_>, _>>())
                .transpose()?
                .unwrap_or_default(),
        ),
        "mapValue" => Value::Object(decode_fields(inner.get("fields"))?),
        other => return Err(StoreError::Remote(format!("unsupported value type {}", other))),
    })
}

fn decode_fields(fields: Option<&Value>) -> Result<Fields, StoreError> {
    let mut out = Map::new();
    if let Some(Value::Object(map)) = fields {
        for (k, v) in map {
            out.insert(k.clone(), decode_value(v)?);
        }
    }
    Ok(out)
}

pub(crate) fn decode_document(doc: &Value) -> Result<Document, StoreError> {
    let name = doc
        .get("name")
        .and_then(Value::as_str)
        .ok_or_else(|| StoreError::Remote("document without name".into()))?;
    let id = name.rsplit('/').next().unwrap_or(name);
    Ok(Document {
        id: urlencoding::decode(id).map(|c| c.into_owned()).unwrap_or_else(|_| id.to_string()),
        fields: decode_fields(doc.get("fields"))?,
    })
}

#[async_trait]
impl DocumentStore for FirestoreStore {
    async fn get(&self, collection: &str, id: &str) -> Result<Option<Document>, StoreError> {
        match self.send(self.client.get(self.doc_url(collection, id))).await? {
            Some(doc) => decode_document(&doc).map(Some),
            None => Ok(None),
        }
    }

    async fn add(&self, collection: &str, fields: Fields) -> Result<String, StoreError> {
        let url = format!("{}/{}", self.documents_url, collection);
        let body = json!({ "fields": encode_fields(&fields) });
        let doc = self
            .send(self.client.post(&url).json(&body))
            .await?
            .ok_or_else(|| StoreError::NotFound(collection.to_string()))?;
        let id = decode_document(&doc)?.id;
        log::debug!("firestore: added {}/{}", collection, id);
        Ok(id)
    }

    async fn set(&self, collection: &str, id: &str, fields: Fields) -> Result<(), StoreError> {
        let body = json!({ "fields": encode_fields(&fields) });
        self.send(self.client.patch(self.doc_url(collection, id)).json(&body))
            .await?
            .ok_or_else(|| StoreError::NotFound(format!("{}/{}", collection, id)))?;
        Ok(())
    }

    async fn update(&self, collection: &str, id: &str, fields: Fields) -> Result<(), StoreError> {
        let mut params: Vec<(&str, &str)> = fields
            .keys()
            .map(|k| ("updateMask.fieldPaths", k.as_str()))
            .collect();
        params.push(("currentDocument.exists", "true"));
        let body = json!({ "fields": encode_fields(&fields) });
        self.send(self.client.patch(self.doc_url(collection, id)).query(&params).json(&body))
            .await?
            .ok_or_else(|| StoreError::NotFound(format!("{}/{}", collection, id)))?;
        Ok(())
    }

    async fn delete(&self, collection: &str, id: &str) -> Result<(), StoreError> {
        self.send(self.client.delete(self.doc_url(collection, id))).await?;
        Ok(())
    }

    async fn query(
        &self,
        collection: &str,
        filters: Vec<Filter>,
    ) -> Result<Vec<Document>, StoreError> {
        self.run_query(collection, &filters).await
    }

    fn watch(
        &self,
        collection: &str,
        filters: Vec<Filter>,
        listener: SnapshotListener,
    ) -> Subscription {
        let handle = match tokio::runtime::Handle::try_current() {
            Ok(h) => h,
            Err(_) => {
                listener(Err(StoreError::Remote("live query needs a tokio runtime".into())));
                return Subscription::noop();
            }
        };
        let store = self.clone();
        let collection = collection.to_string();
        let task = handle.spawn(async move {
            let mut ticker = tokio::time::interval(store.poll_interval);
            let mut last: Option<Vec<Document>> = None;
            loop {
                ticker.tick().await;
                match store.run_query(&collection, &filters).await {
                    Ok(docs) => {
                        if last.as_ref() != Some(&docs) {
                            listener(Ok(docs.clone()));
                            last = Some(docs);
                        }
                    }
                    Err(e) => {
                        log::warn!("firestore: watch on {} failed: {}", collection, e);
                        listener(Err(e));
                        break;
                    }
                }
            }
        });
        Subscription::new(move || task.abort())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    #[test]
    fn encodes_scalars_arrays_and_maps() {
        let v = json!({ "name": "Meetup", "count": 3, "score": 1.5, "ok": true, "none": null,
                        "tags": ["a"], "meta": { "k": "v" } });
        let encoded = encode_fields(v.as_object().unwrap());
        assert_eq!(encoded["name"], json!({ "stringValue": "Meetup" }));
        assert_eq!(encoded["count"], json!({ "integerValue": "3" }));
        assert_eq!(encoded["score"], json!({ "doubleValue": 1.5 }));
        assert_eq!(encoded["ok"], json!({ "booleanValue": true }));
        assert_eq!(encoded["none"], json!({ "nullValue": null }));
        assert_eq!(
            encoded["tags"],
            json!({ "arrayValue": { "values": [{ "stringValue": "a" }] } })
        );
        assert_eq!(
            encoded["meta"],
            json!({ "mapValue": { "fields": { "k": { "stringValue": "v" } } } })
        );
    }

    #[test]
    fn decodes_document_into_plain_fields() {
        let doc = json!({
            "name": "projects/p/databases/(default)/documents/events/abc123",
            "fields": {
                "name": { "stringValue": "Meetup" },
                "seats": { "integerValue": "40" },
                "createdAt": { "timestampValue": "2024-05-01T10:00:00Z" },
                "tags": { "arrayValue": {} }
            }
        });
        let decoded = decode_document(&doc).unwrap();
        assert_eq!(decoded.id, "abc123");
        assert_eq!(decoded.fields["name"], json!("Meetup"));
        assert_eq!(decoded.fields["seats"], json!(40));
        assert_eq!(decoded.fields["createdAt"], json!("2024-05-01T10:00:00Z"));
        assert_eq!(decoded.fields["tags"], json!([]));
    }

    #[test]
    fn rejects_unknown_value_types() {
        assert!(decode_value(&json!({ "mysteryValue": 1 })).is_err());
        assert!(decode_value(&json!("bare")).is_err());
    }

    #[test]
    fn query_uses_composite_filter_only_for_several_fields() {
        let one = structured_query("favorites", &[Filter::eq("userId", "alice")]);
        assert_eq!(one["structuredQuery"]["where"]["fieldFilter"]["op"], json!("EQUAL"));
        let two = structured_query(
            "favorites",
            &[Filter::eq("userId", "alice"), Filter::eq("eventId", "ev1")],
        );
        let filters = two["structuredQuery"]["where"]["compositeFilter"]["filters"]
            .as_array()
            .unwrap();
        assert_eq!(filters.len(), 2);
        let none = structured_query("events", &[]);
        assert!(none["structuredQuery"].get("where").is_none());
    }

    #[test]
    fn error_message_reads_firestore_error_bodies() {
        assert_eq!(
            error_message(r#"{"error":{"message":"Missing or insufficient permissions."}}"#),
            "Missing or insufficient permissions."
        );
        assert_eq!(error_message(r#"[{"error":{"message":"bad query"}}]"#), "bad query");
        assert_eq!(error_message("plain"), "plain");
    }
}
