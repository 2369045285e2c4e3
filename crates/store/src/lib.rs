mod client;
mod collection;
mod error;
mod http;
mod memory;

use serde::{de::DeserializeOwned, Serialize};
use serde_json::Value;

pub use client::HttpStore;
pub use collection::Collection;
pub use error::{StoreError, StoreResult};
pub use http::{Method, RequestError, RequestErrorKind};
pub use memory::{MemoryStore, WriteRecord};

/// A generic REST data store. Records are JSON objects addressed by
/// collection and id; listing supports equality filters only.
pub trait DataStore {
    fn list(&self, collection: Collection, filters: &[(&str, &str)]) -> StoreResult<Vec<Value>>;

    /// `Ok(None)` when no record has that id.
    fn get(&self, collection: Collection, id: &str) -> StoreResult<Option<Value>>;

    /// Returns the record as stored, with the id the store assigned.
    fn create(&self, collection: Collection, record: &Value) -> StoreResult<Value>;

    fn replace(&self, collection: Collection, id: &str, record: &Value) -> StoreResult<Value>;

    /// Merge `fields` into the stored record.
    fn patch(&self, collection: Collection, id: &str, fields: &Value) -> StoreResult<Value>;

    fn delete(&self, collection: Collection, id: &str) -> StoreResult<()>;
}

impl<S: DataStore + ?Sized> DataStore for &S {
    fn list(&self, collection: Collection, filters: &[(&str, &str)]) -> StoreResult<Vec<Value>> {
        (**self).list(collection, filters)
    }

    fn get(&self, collection: Collection, id: &str) -> StoreResult<Option<Value>> {
        (**self).get(collection, id)
    }

    fn create(&self, collection: Collection, record: &Value) -> StoreResult<Value> {
        (**self).create(collection, record)
    }

    fn replace(&self, collection: Collection, id: &str, record: &Value) -> StoreResult<Value> {
        (**self).replace(collection, id, record)
    }

    fn patch(&self, collection: Collection, id: &str, fields: &Value) -> StoreResult<Value> {
        (**self).patch(collection, id, fields)
    }

    fn delete(&self, collection: Collection, id: &str) -> StoreResult<()> {
        (**self).delete(collection, id)
    }
}

/// Typed access on top of [`DataStore`].
pub trait DataStoreExt: DataStore {
    fn fetch_all<T: DeserializeOwned>(
        &self,
        collection: Collection,
        filters: &[(&str, &str)],
    ) -> StoreResult<Vec<T>> {
        self.list(collection, filters)?
            .into_iter()
            .map(|value| serde_json::from_value(value).map_err(StoreError::from))
            .collect()
    }

    fn fetch<T: DeserializeOwned>(&self, collection: Collection, id: &str) -> StoreResult<Option<T>> {
        self.get(collection, id)?
            .map(serde_json::from_value)
            .transpose()
            .map_err(StoreError::from)
    }

    fn insert<T: Serialize + DeserializeOwned>(&self, collection: Collection, record: &T) -> StoreResult<T> {
        let value = serde_json::to_value(record)?;
        let created = self.create(collection, &value)?;
        Ok(serde_json::from_value(created)?)
    }

    fn put<T: Serialize + DeserializeOwned>(
        &self,
        collection: Collection,
        id: &str,
        record: &T,
    ) -> StoreResult<T> {
        let value = serde_json::to_value(record)?;
        let replaced = self.replace(collection, id, &value)?;
        Ok(serde_json::from_value(replaced)?)
    }

    fn patch_with<P: Serialize>(&self, collection: Collection, id: &str, fields: &P) -> StoreResult<Value> {
        let value = serde_json::to_value(fields)?;
        self.patch(collection, id, &value)
    }
}

impl<S: DataStore + ?Sized> DataStoreExt for S {}
