//! In-memory `ObjectApi` used by the engine tests.

use anyhow::Result;
use async_trait::async_trait;
use serde_json::{Map, Value};
use std::collections::HashMap;
use std::sync::Mutex;

use crate::nautobot::{Filter, ObjectApi};
use crate::utils::scalar_to_string;

#[derive(Debug, Clone, PartialEq)]
pub enum Mutation {
    Create { path: String, body: Map<String, Value> },
    Update { path: String, id: String, body: Map<String, Value> },
    Delete { path: String, id: String },
}

#[derive(Default)]
pub struct FakeApi {
    objects: Mutex<HashMap<String, Vec<Value>>>,
    mutations: Mutex<Vec<Mutation>>,
    lists: Mutex<Vec<(String, Filter)>>,
    reject_writes: Mutex<Option<String>>,
}

impl FakeApi {
    pub fn new() -> Self {
        Self::default()
    }

    /// Seed an object; returns its id (generated when absent)
    pub fn insert(&self, path: &str, mut object: Value) -> String {
        let id = match object.get("id").and_then(Value::as_str) {
            Some(id) => id.to_string(),
            None => {
                let id = uuid::Uuid::new_v4().to_string();
                object["id"] = Value::String(id.clone());
                id
            }
        };
        self.objects
            .lock()
            .unwrap()
            .entry(path.to_string())
            .or_default()
            .push(object);
        id
    }

    /// Every create/update/delete with the given body message fails
    pub fn reject_writes(&self, body: &str) {
        *self.reject_writes.lock().unwrap() = Some(body.to_string());
    }

    pub fn mutations(&self) -> Vec<Mutation> {
        self.mutations.lock().unwrap().clone()
    }

    pub fn lists(&self) -> Vec<(String, Filter)> {
        self.lists.lock().unwrap().clone()
    }

    pub fn objects(&self, path: &str) -> Vec<Value> {
        self.objects.lock().unwrap().get(path).cloned().unwrap_or_default()
    }

    fn check_writable(&self, action: &str) -> Result<()> {
        match self.reject_writes.lock().unwrap().as_ref() {
            Some(body) => Err(anyhow::anyhow!("Nautobot API {} error 400 Bad Request: {}", action, body)),
            None => Ok(()),
        }
    }
}

/// Nautobot filter semantics, reduced: every key must match, repeated keys OR
fn matches(object: &Value, filter: &Filter) -> bool {
    let mut by_key: HashMap<&str, Vec<&str>> = HashMap::new();
    for (k, v) in filter {
        by_key.entry(k.as_str()).or_default().push(v.as_str());
    }
    by_key.iter().all(|(key, wanted)| {
        let field = object.get(*key).unwrap_or(&Value::Null);
        wanted.iter().any(|w| field_matches(field, w))
    })
}

fn field_matches(field: &Value, wanted: &str) -> bool {
    match field {
        Value::Object(obj) => ["id", "name"]
            .iter()
            .any(|k| obj.get(*k).map(|v| scalar_to_string(v) == wanted).unwrap_or(false)),
        Value::Array(items) => items.iter().any(|i| field_matches(i, wanted)),
        Value::Null => false,
        scalar => scalar_to_string(scalar) == wanted,
    }
}

#[async_trait]
impl ObjectApi for FakeApi {
    async fn list(&self, path: &str, filter: &Filter) -> Result<Vec<Value>> {
        self.lists.lock().unwrap().push((path.to_string(), filter.clone()));
        Ok(self
            .objects(path)
            .into_iter()
            .filter(|o| matches(o, filter))
            .collect())
    }

    async fn create(&self, path: &str, body: &Map<String, Value>) -> Result<Value> {
        self.check_writable("create")?;
        self.mutations.lock().unwrap().push(Mutation::Create {
            path: path.to_string(),
            body: body.clone(),
        });
        let mut object = body.clone();
        object.insert("id".to_string(), Value::String(uuid::Uuid::new_v4().to_string()));
        let object = Value::Object(object);
        self.insert(path, object.clone());
        Ok(object)
    }

    async fn update(&self, path: &str, id: &str, body: &Map<String, Value>) -> Result<Value> {
        self.check_writable("update")?;
        self.mutations.lock().unwrap().push(Mutation::Update {
            path: path.to_string(),
            id: id.to_string(),
            body: body.clone(),
        });
        let mut objects = self.objects.lock().unwrap();
        let object = objects
            .get_mut(path)
            .and_then(|list| list.iter_mut().find(|o| o["id"] == Value::String(id.to_string())))
            .ok_or_else(|| anyhow::anyhow!("Nautobot API update error 404 Not Found"))?;
        if let Value::Object(fields) = &mut *object {
            for (k, v) in body {
                // Nautobot merges PATCHed custom fields into the existing ones
                if k == "custom_fields" {
                    if let (Some(Value::Object(current)), Value::Object(patch)) = (fields.get_mut(k), v) {
                        current.extend(patch.clone());
                        continue;
                    }
                }
                fields.insert(k.clone(), v.clone());
            }
        }
        Ok(object.clone())
    }

    async fn delete(&self, path: &str, id: &str) -> Result<()> {
        self.check_writable("delete")?;
        self.mutations.lock().unwrap().push(Mutation::Delete {
            path: path.to_string(),
            id: id.to_string(),
        });
        if let Some(list) = self.objects.lock().unwrap().get_mut(path) {
            list.retain(|o| o["id"] != Value::String(id.to_string()));
        }
        Ok(())
    }
}
