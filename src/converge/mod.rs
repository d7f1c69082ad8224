//! Generic idempotent convergence.
//!
//! One invocation walks `START -> REFERENCES_RESOLVED -> EXISTENCE_CHECKED`
//! and ends in exactly one of created, updated, unchanged, deleted or noop.
//! Reads happen first; the single mutation (if any) is issued only after
//! every lookup succeeded.

pub mod diff;
pub mod error;
pub mod reference;
pub mod remote;

#[cfg(test)]
mod fake;

use serde_json::{Map, Value};

use crate::models::{Action, Diff, LifecycleTarget, Outcome, Task};
use crate::nautobot::{Filter, ObjectApi};
use crate::registry::{self, ResourceDescriptor};
use crate::utils::{describe_filter, scalar_to_string, strip_nulls};

pub use error::ConvergeError;
use reference::FieldValue;
pub use remote::RemoteObject;

/// Everything one convergence run needs from the caller
#[derive(Debug, Clone)]
pub struct ConvergeRequest {
    pub descriptor: &'static ResourceDescriptor,
    pub target: LifecycleTarget,
    pub data: Map<String, Value>,
    pub query_params: Option<Vec<String>>,
    pub check_mode: bool,
}

impl ConvergeRequest {
    pub fn from_task(task: Task, check_mode: bool) -> Result<Self, ConvergeError> {
        let descriptor = registry::lookup(&task.resource).ok_or_else(|| {
            ConvergeError::validation(format!("Unknown resource '{}'", task.resource))
        })?;
        Ok(Self {
            descriptor,
            target: LifecycleTarget::parse(&task.state)?,
            data: task.data,
            query_params: task.query_params,
            check_mode,
        })
    }

    fn pinned_by_id(&self) -> bool {
        self.query_params.is_none() && self.data.get("id").is_some_and(|v| !v.is_null())
    }

    fn query_fields(&self) -> Vec<String> {
        match &self.query_params {
            Some(fields) => fields.clone(),
            // An explicit identifier pins the object, which also allows renames
            None if self.pinned_by_id() => vec!["id".to_string()],
            None => self.descriptor.query_params.iter().map(|f| f.to_string()).collect(),
        }
    }
}

/// Converge one object toward `request`'s declared state
pub async fn converge(api: &dyn ObjectApi, request: &ConvergeRequest) -> Result<Outcome, ConvergeError> {
    let descriptor = request.descriptor;
    let data = strip_nulls(&request.data);
    let query_fields = request.query_fields();
    validate(descriptor, &data, request.query_params.is_some(), &query_fields)?;

    let resolved = resolve_references(api, descriptor, &data).await?;
    let existing = find_existing(api, descriptor, &resolved, &query_fields).await?;

    // A delete names the object that matched, not the one that was asked for
    let matched_display = match (request.target, &existing) {
        (LifecycleTarget::Absent, Some(found)) => found.display(),
        _ => None,
    };
    let label = matched_display
        .or_else(|| label_of(descriptor, &data, &query_fields))
        .or_else(|| existing.as_ref().and_then(RemoteObject::display))
        .unwrap_or_else(|| descriptor.tag.to_string());

    let run = Run {
        api,
        descriptor,
        label,
        check_mode: request.check_mode,
    };

    match (request.target, existing) {
        (LifecycleTarget::Present, None) if request.pinned_by_id() => Err(ConvergeError::resolution(
            "id",
            format!("no {} matches {}", descriptor.tag, describe_filter(&id_filter(&resolved))),
        )),
        (LifecycleTarget::Present, None) => run.create(resolved).await,
        (LifecycleTarget::Present, Some(existing)) => run.update(existing, &resolved).await,
        (LifecycleTarget::Absent, None) => Ok(run.outcome(Action::Noop, None, Diff::default())),
        (LifecycleTarget::Absent, Some(existing)) => run.delete(existing).await,
    }
}

fn validate(
    descriptor: &ResourceDescriptor,
    data: &Map<String, Value>,
    user_query_params: bool,
    query_fields: &[String],
) -> Result<(), ConvergeError> {
    let missing: Vec<&str> = descriptor
        .required
        .iter()
        .copied()
        .filter(|f| !data.contains_key(*f))
        .collect();
    if !missing.is_empty() {
        return Err(ConvergeError::validation(format!(
            "Missing required field(s) for {}: {}",
            descriptor.tag,
            missing.join(", ")
        )));
    }

    if user_query_params {
        if query_fields.is_empty() {
            return Err(ConvergeError::validation("query_params must not be empty"));
        }
        if let Some(field) = query_fields.iter().find(|f| !data.contains_key(f.as_str())) {
            return Err(ConvergeError::validation(format!(
                "query_params field '{}' is not set in data",
                field
            )));
        }
    }

    if !query_fields.iter().any(|f| data.contains_key(f.as_str())) {
        return Err(ConvergeError::validation(format!(
            "None of the query fields ({}) are set; cannot identify the {}",
            query_fields.join(", "),
            descriptor.tag
        )));
    }

    if let Some(field) = query_fields
        .iter()
        .find(|f| data.get(f.as_str()).is_some_and(is_blank))
    {
        return Err(ConvergeError::validation(format!(
            "query field '{}' is empty and cannot identify the {}",
            field, descriptor.tag
        )));
    }

    Ok(())
}

/// Blank values are dropped by Nautobot's filters, widening the match
fn is_blank(value: &Value) -> bool {
    match value {
        Value::String(s) => s.trim().is_empty(),
        Value::Array(items) => items.is_empty(),
        _ => false,
    }
}

fn id_filter(resolved: &Map<String, Value>) -> Filter {
    resolved
        .get("id")
        .map(|id| vec![("id".to_string(), scalar_to_string(id))])
        .unwrap_or_default()
}

/// Replace every reference with the identifier it resolves to
async fn resolve_references(
    api: &dyn ObjectApi,
    descriptor: &ResourceDescriptor,
    data: &Map<String, Value>,
) -> Result<Map<String, Value>, ConvergeError> {
    let mut resolved = Map::new();
    for (field, value) in data {
        let value = match FieldValue::classify(descriptor, field, value)? {
            FieldValue::Scalar(v) => v,
            FieldValue::One(target, reference) => {
                Value::String(reference::resolve(api, field, target, &reference).await?)
            }
            FieldValue::Many(target, references) => {
                let mut ids = Vec::with_capacity(references.len());
                for reference in &references {
                    ids.push(Value::String(reference::resolve(api, field, target, reference).await?));
                }
                Value::Array(ids)
            }
        };
        resolved.insert(field.clone(), value);
    }
    Ok(resolved)
}

/// Existence check: zero or one match, never a guess
async fn find_existing(
    api: &dyn ObjectApi,
    descriptor: &ResourceDescriptor,
    resolved: &Map<String, Value>,
    query_fields: &[String],
) -> Result<Option<RemoteObject>, ConvergeError> {
    let mut filter: Filter = Vec::new();
    for field in query_fields {
        match resolved.get(field) {
            None => {}
            Some(Value::Array(items)) => {
                filter.extend(items.iter().map(|v| (field.clone(), scalar_to_string(v))));
            }
            Some(Value::Object(_)) => {
                return Err(ConvergeError::validation(format!(
                    "query_params field '{}' holds a mapping and cannot be used as a filter",
                    field
                )));
            }
            Some(scalar) => filter.push((field.clone(), scalar_to_string(scalar))),
        }
    }

    if filter.is_empty() {
        return Err(ConvergeError::validation(format!(
            "Existence filter for {} is empty; refusing to match the whole collection",
            descriptor.tag
        )));
    }

    tracing::debug!("Looking up {} ({})", descriptor.tag, describe_filter(&filter));
    let mut matches = api
        .list(&descriptor.path(), &filter)
        .await
        .map_err(ConvergeError::remote)?;

    match matches.len() {
        0 => Ok(None),
        1 => matches.pop().map(RemoteObject::from_value).transpose(),
        count => Err(ConvergeError::AmbiguousLookup {
            resource: descriptor.tag.to_string(),
            filter: describe_filter(&filter),
            count,
        }),
    }
}

/// Name for messages: the label field, else the first declared query field
fn label_of(descriptor: &ResourceDescriptor, data: &Map<String, Value>, query_fields: &[String]) -> Option<String> {
    std::iter::once(descriptor.label)
        .chain(query_fields.iter().map(String::as_str))
        .find_map(|f| data.get(f))
        .map(display_value)
}

fn display_value(value: &Value) -> String {
    match value {
        Value::Object(obj) => obj
            .values()
            .find(|v| !v.is_object() && !v.is_array())
            .map(scalar_to_string)
            .unwrap_or_else(|| value.to_string()),
        Value::Array(items) => items.iter().map(display_value).collect::<Vec<_>>().join(", "),
        scalar => scalar_to_string(scalar),
    }
}

/// Mutation half of one invocation
struct Run<'a> {
    api: &'a dyn ObjectApi,
    descriptor: &'static ResourceDescriptor,
    label: String,
    check_mode: bool,
}

impl Run<'_> {
    fn outcome(&self, action: Action, object: Option<Map<String, Value>>, diff: Diff) -> Outcome {
        let msg = format!("{} {} {}", self.descriptor.tag, self.label, action.verb());
        if action.changed() {
            if self.check_mode {
                tracing::warn!("check mode: {} (not applied)", msg);
            } else {
                tracing::info!("{}", msg);
            }
        } else {
            tracing::debug!("{}", msg);
        }

        Outcome {
            changed: action.changed(),
            action,
            msg,
            resource: self.descriptor.tag,
            object,
            diff,
            check_mode: self.check_mode,
        }
    }

    async fn create(&self, mut body: Map<String, Value>) -> Result<Outcome, ConvergeError> {
        // Nautobot assigns identifiers itself
        body.remove("id");
        let diff = Diff {
            before: Map::new(),
            after: body.clone(),
        };

        let object = if self.check_mode {
            body
        } else {
            let created = self
                .api
                .create(&self.descriptor.path(), &body)
                .await
                .map_err(ConvergeError::remote)?;
            RemoteObject::from_value(created)?.serialized()
        };

        Ok(self.outcome(Action::Created, Some(object), diff))
    }

    async fn update(&self, existing: RemoteObject, desired: &Map<String, Value>) -> Result<Outcome, ConvergeError> {
        let current = existing.serialized();
        let changes = diff::changed_fields(self.descriptor, &current, desired);

        if changes.is_empty() {
            return Ok(self.outcome(Action::Unchanged, Some(current), Diff::default()));
        }

        let diff = Diff {
            before: changes
                .keys()
                .map(|k| (k.clone(), current.get(k).cloned().unwrap_or(Value::Null)))
                .collect(),
            after: changes.clone(),
        };

        let object = if self.check_mode {
            let mut preview = current;
            preview.extend(changes);
            preview
        } else {
            let id = self.require_id(&existing, "update")?;
            let updated = self
                .api
                .update(&self.descriptor.path(), id, &changes)
                .await
                .map_err(ConvergeError::remote)?;
            RemoteObject::from_value(updated)?.serialized()
        };

        Ok(self.outcome(Action::Updated, Some(object), diff))
    }

    async fn delete(&self, existing: RemoteObject) -> Result<Outcome, ConvergeError> {
        let diff = Diff {
            before: existing.serialized(),
            after: Map::new(),
        };

        if !self.check_mode {
            let id = self.require_id(&existing, "delete")?;
            self.api
                .delete(&self.descriptor.path(), id)
                .await
                .map_err(ConvergeError::remote)?;
        }

        Ok(self.outcome(Action::Deleted, None, diff))
    }

    fn require_id<'o>(&self, existing: &'o RemoteObject, action: &str) -> Result<&'o str, ConvergeError> {
        existing.id().ok_or_else(|| {
            ConvergeError::Remote(format!(
                "Cannot {} {} {}: Nautobot returned it without an id",
                action, self.descriptor.tag, self.label
            ))
        })
    }
}
