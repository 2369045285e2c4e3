use log::{debug, trace};
use reqwest::{blocking::Client, StatusCode};
use serde_json::Value;
use url::Url;

use crate::{
    error::{StoreError, StoreResult},
    http::{Method, RequestError},
    Collection, DataStore,
};

/// Talks to a json-server style REST store over blocking http.
#[derive(Debug, Clone)]
pub struct HttpStore {
    client: Client,
    base: Url,
}

impl HttpStore {
    pub fn new(base: &str) -> StoreResult<Self> {
        let base = Url::parse(base).map_err(|_| StoreError::InvalidUrl(base.to_string()))?;
        if base.cannot_be_a_base() {
            return Err(StoreError::InvalidUrl(base.to_string()));
        }

        let client = Client::builder()
            .user_agent(concat!("novelhub/", env!("CARGO_PKG_VERSION")))
            .build()
            .map_err(RequestError::from)?;

        Ok(HttpStore { client, base })
    }

    pub fn base(&self) -> &Url {
        &self.base
    }

    fn url(&self, collection: Collection, id: Option<&str>, filters: &[(&str, &str)]) -> StoreResult<Url> {
        let mut url = self.base.clone();
        {
            let mut segments = url
                .path_segments_mut()
                .map_err(|_| StoreError::InvalidUrl(self.base.to_string()))?;
            segments.pop_if_empty().push(collection.as_str());
            if let Some(id) = id {
                segments.push(id);
            }
        }

        if !filters.is_empty() {
            let mut query = url.query_pairs_mut();
            for (name, value) in filters {
                query.append_pair(name, value);
            }
        }

        Ok(url)
    }

    /// Send one request. A 404 comes back as `Ok(None)` so callers can decide
    /// whether a missing record is an error.
    fn send(&self, method: Method, url: Url, body: Option<&Value>) -> StoreResult<Option<Value>> {
        debug!("{method} {url}");

        let mut request = self.client.request(method.into(), url.clone());
        if let Some(body) = body {
            trace!("request body: {body}");
            request = request.json(body);
        }

        let response = request.send().map_err(RequestError::from)?;
        let status = response.status();

        if status == StatusCode::NOT_FOUND {
            return Ok(None);
        }
        if !status.is_success() {
            return Err(RequestError::status(status.as_u16(), url.as_str()).into());
        }

        let text = response.text().map_err(RequestError::from)?;
        if text.trim().is_empty() {
            return Ok(Some(Value::Null));
        }

        Ok(Some(serde_json::from_str(&text)?))
    }

    fn send_to_record(
        &self,
        method: Method,
        collection: Collection,
        id: &str,
        body: Option<&Value>,
    ) -> StoreResult<Value> {
        let url = self.url(collection, Some(id), &[])?;
        self.send(method, url, body)?.ok_or_else(|| StoreError::NotFound {
            collection,
            id: id.to_string(),
        })
    }
}

impl DataStore for HttpStore {
    fn list(&self, collection: Collection, filters: &[(&str, &str)]) -> StoreResult<Vec<Value>> {
        let url = self.url(collection, None, filters)?;
        match self.send(Method::Get, url, None)? {
            Some(Value::Array(records)) => Ok(records),
            Some(Value::Null) | None => Ok(vec![]),
            Some(other) => Err(StoreError::SerializationError(serde::de::Error::custom(format!(
                "expected a list of {collection}, found {other}"
            )))),
        }
    }

    fn get(&self, collection: Collection, id: &str) -> StoreResult<Option<Value>> {
        let url = self.url(collection, Some(id), &[])?;
        self.send(Method::Get, url, None)
    }

    fn create(&self, collection: Collection, record: &Value) -> StoreResult<Value> {
        let url = self.url(collection, None, &[])?;
        let created = self.send(Method::Post, url.clone(), Some(record))?;
        created.ok_or_else(|| RequestError::status(404, url.as_str()).into())
    }

    fn replace(&self, collection: Collection, id: &str, record: &Value) -> StoreResult<Value> {
        self.send_to_record(Method::Put, collection, id, Some(record))
    }

    fn patch(&self, collection: Collection, id: &str, fields: &Value) -> StoreResult<Value> {
        self.send_to_record(Method::Patch, collection, id, Some(fields))
    }

    fn delete(&self, collection: Collection, id: &str) -> StoreResult<()> {
        self.send_to_record(Method::Delete, collection, id, None)?;
        Ok(())
    }
}
