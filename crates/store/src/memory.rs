use std::{
    cell::{Cell, RefCell},
    collections::BTreeMap,
};

use log::trace;
use serde_json::{Map, Value};

use crate::{
    error::{StoreError, StoreResult},
    http::{Method, RequestError, RequestErrorKind},
    Collection, DataStore,
};

/// A write the store accepted, in order of arrival.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct WriteRecord {
    pub method: Method,
    pub collection: Collection,
    pub id: String,
}

/// An in-process store with the same observable behaviour as the REST one.
/// Every accepted write is recorded, and a single write can be made to fail.
#[derive(Debug, Default)]
pub struct MemoryStore {
    collections: RefCell<BTreeMap<Collection, Vec<Map<String, Value>>>>,
    writes: RefCell<Vec<WriteRecord>>,
    fail_on: RefCell<Option<(Method, Collection)>>,
    next_id: Cell<u64>,
}

impl MemoryStore {
    pub fn new() -> Self {
        Default::default()
    }

    /// Seed records without recording writes. Non-object values are skipped.
    pub fn with_records<I: IntoIterator<Item = Value>>(self, collection: Collection, records: I) -> Self {
        {
            let mut collections = self.collections.borrow_mut();
            let entries = collections.entry(collection).or_default();
            for record in records {
                if let Value::Object(map) = record {
                    entries.push(map);
                }
            }
        }
        self
    }

    /// Make the next write with this method on this collection fail.
    pub fn fail_next(&self, method: Method, collection: Collection) {
        self.fail_on.replace(Some((method, collection)));
    }

    pub fn writes(&self) -> Vec<WriteRecord> {
        self.writes.borrow().clone()
    }

    fn write(&self, method: Method, collection: Collection, id: &str) -> StoreResult<()> {
        if *self.fail_on.borrow() == Some((method, collection)) {
            self.fail_on.replace(None);
            return Err(RequestError {
                kind: RequestErrorKind::Request,
                url: Some(format!("memory:/{collection}/{id}")),
                message: format!("{method} rejected"),
            }
            .into());
        }

        trace!("{method} {collection}/{id}");
        self.writes.borrow_mut().push(WriteRecord {
            method,
            collection,
            id: id.to_string(),
        });
        Ok(())
    }

    fn generate_id(&self, collection: Collection) -> String {
        loop {
            let next = self.next_id.get() + 1;
            self.next_id.set(next);

            let id = next.to_string();
            if self.position(collection, &id).is_none() {
                return id;
            }
        }
    }

    fn position(&self, collection: Collection, id: &str) -> Option<usize> {
        self.collections
            .borrow()
            .get(&collection)?
            .iter()
            .position(|record| record.get("id").map_or(false, |v| matches_value(v, id)))
    }

    fn not_found(collection: Collection, id: &str) -> StoreError {
        StoreError::NotFound {
            collection,
            id: id.to_string(),
        }
    }
}

fn as_object(value: &Value) -> StoreResult<Map<String, Value>> {
    match value {
        Value::Object(map) => Ok(map.clone()),
        other => Err(StoreError::SerializationError(serde::de::Error::custom(format!(
            "expected a record object, found {other}"
        )))),
    }
}

/// Query parameters are strings; compare them the way the REST store does.
fn matches_value(value: &Value, expected: &str) -> bool {
    match value {
        Value::String(s) => s == expected,
        Value::Number(n) => n.to_string() == expected,
        Value::Bool(b) => b.to_string() == expected,
        _ => false,
    }
}

impl DataStore for MemoryStore {
    fn list(&self, collection: Collection, filters: &[(&str, &str)]) -> StoreResult<Vec<Value>> {
        let collections = self.collections.borrow();
        let Some(records) = collections.get(&collection) else {
            return Ok(vec![]);
        };

        Ok(records
            .iter()
            .filter(|record| {
                filters
                    .iter()
                    .all(|(name, expected)| record.get(*name).map_or(false, |v| matches_value(v, expected)))
            })
            .cloned()
            .map(Value::Object)
            .collect())
    }

    fn get(&self, collection: Collection, id: &str) -> StoreResult<Option<Value>> {
        let Some(index) = self.position(collection, id) else {
            return Ok(None);
        };

        Ok(self
            .collections
            .borrow()
            .get(&collection)
            .map(|records| Value::Object(records[index].clone())))
    }

    fn create(&self, collection: Collection, record: &Value) -> StoreResult<Value> {
        let mut map = as_object(record)?;
        let id = match map.get("id") {
            Some(Value::String(id)) if !id.is_empty() => id.clone(),
            Some(Value::Number(n)) => n.to_string(),
            _ => self.generate_id(collection),
        };

        if self.position(collection, &id).is_some() {
            return Err(RequestError::status(500, &format!("memory:/{collection}/{id}")).into());
        }

        self.write(Method::Post, collection, &id)?;
        map.insert(String::from("id"), Value::String(id));
        self.collections
            .borrow_mut()
            .entry(collection)
            .or_default()
            .push(map.clone());

        Ok(Value::Object(map))
    }

    fn replace(&self, collection: Collection, id: &str, record: &Value) -> StoreResult<Value> {
        let mut map = as_object(record)?;
        let index = self
            .position(collection, id)
            .ok_or_else(|| Self::not_found(collection, id))?;

        self.write(Method::Put, collection, id)?;
        map.insert(String::from("id"), Value::String(id.to_string()));

        let mut collections = self.collections.borrow_mut();
        let records = collections.entry(collection).or_default();
        records[index] = map.clone();
        Ok(Value::Object(map))
    }

    fn patch(&self, collection: Collection, id: &str, fields: &Value) -> StoreResult<Value> {
        let fields = as_object(fields)?;
        let index = self
            .position(collection, id)
            .ok_or_else(|| Self::not_found(collection, id))?;

        self.write(Method::Patch, collection, id)?;

        let mut collections = self.collections.borrow_mut();
        let records = collections.entry(collection).or_default();
        let record = &mut records[index];
        for (name, value) in fields {
            if name != "id" {
                record.insert(name, value);
            }
        }
        Ok(Value::Object(record.clone()))
    }

    fn delete(&self, collection: Collection, id: &str) -> StoreResult<()> {
        let index = self
            .position(collection, id)
            .ok_or_else(|| Self::not_found(collection, id))?;

        self.write(Method::Delete, collection, id)?;
        self.collections
            .borrow_mut()
            .entry(collection)
            .or_default()
            .remove(index);
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use serde_json::json;

    use super::*;
    use crate::DataStoreExt;

    fn store() -> MemoryStore {
        MemoryStore::new().with_records(
            Collection::Chapters,
            vec![
                json!({ "id": "c1", "novelId": "n1", "chapterNumber": 1 }),
                json!({ "id": "c2", "novelId": "n1", "chapterNumber": 2 }),
                json!({ "id": 3, "novelId": "n2", "chapterNumber": 1 }),
            ],
        )
    }

    #[test]
    fn should_filter_by_equality() {
        let store = store();

        assert_eq!(store.list(Collection::Chapters, &[("novelId", "n1")]).unwrap().len(), 2);
        assert_eq!(store.list(Collection::Chapters, &[("chapterNumber", "1")]).unwrap().len(), 2);
        assert!(store.list(Collection::Users, &[]).unwrap().is_empty());
        assert!(store.get(Collection::Chapters, "3").unwrap().is_some());
        assert!(store.get(Collection::Chapters, "c9").unwrap().is_none());
    }

    #[test]
    fn should_merge_patch_and_record_writes() {
        let store = store();
        let patched = store
            .patch_with(Collection::Chapters, "c2", &json!({ "nextChapterId": "c3", "id": "x" }))
            .unwrap();

        assert_eq!(patched["nextChapterId"], json!("c3"));
        assert_eq!(patched["chapterNumber"], json!(2));
        assert_eq!(patched["id"], json!("c2"));
        assert_eq!(
            store.writes(),
            vec![WriteRecord {
                method: Method::Patch,
                collection: Collection::Chapters,
                id: String::from("c2"),
            }]
        );
    }

    #[test]
    fn should_assign_ids_on_create() {
        let store = store();
        let created = store.create(Collection::Users, &json!({ "userName": "alice" })).unwrap();
        assert_eq!(created["id"], json!("1"));

        let created = store.create(Collection::Users, &json!({ "id": "u7" })).unwrap();
        assert_eq!(created["id"], json!("u7"));
        assert!(store.create(Collection::Users, &json!({ "id": "u7" })).is_err());
    }

    #[test]
    fn should_fail_selected_write_once() {
        let store = store();
        store.fail_next(Method::Delete, Collection::Chapters);

        assert!(store.delete(Collection::Chapters, "c1").is_err());
        assert!(store.writes().is_empty());
        store.delete(Collection::Chapters, "c1").unwrap();
        assert!(store.get(Collection::Chapters, "c1").unwrap().is_none());
    }

    #[test]
    fn should_report_missing_records_on_write() {
        let store = store();
        let error = store.delete(Collection::Novels, "n1").unwrap_err();
        assert!(error.is_not_found());
    }
}
