use serde_json::{Map, Value};
use std::future::Future;
use std::pin::Pin;

use crate::nautobot::{Filter, ObjectApi};
use crate::registry::ResourceDescriptor;
use crate::utils::{describe_filter, scalar_to_string};

use super::remote::id_string;
use super::ConvergeError;

/// A pointer at another remote object
#[derive(Debug, Clone, PartialEq)]
pub enum Reference {
    /// Already an identifier; no lookup needed
    Identifier(String),
    /// Attributes that must match exactly one object
    Lookup(Map<String, Value>),
}

/// A declared field after classification against the registry
#[derive(Debug, Clone, PartialEq)]
pub enum FieldValue {
    Scalar(Value),
    One(&'static ResourceDescriptor, Reference),
    Many(&'static ResourceDescriptor, Vec<Reference>),
}

impl Reference {
    /// Document encoding: `{id: ...}` is an identifier, any other mapping a
    /// lookup, and a bare scalar a lookup on the target's natural key.
    pub fn parse(field: &str, target: &ResourceDescriptor, value: &Value) -> Result<Self, ConvergeError> {
        match value {
            Value::Object(obj) => {
                if let Some(id) = obj.get("id") {
                    return id_string(id).map(Self::Identifier).ok_or_else(|| {
                        ConvergeError::validation(format!("{}: id must be a non-empty string or integer", field))
                    });
                }
                if obj.is_empty() {
                    return Err(ConvergeError::validation(format!("{}: empty reference", field)));
                }
                Ok(Self::Lookup(obj.clone()))
            }
            Value::String(s) if s.is_empty() => {
                Err(ConvergeError::validation(format!("{}: empty reference", field)))
            }
            Value::String(_) | Value::Number(_) => {
                let mut lookup = Map::new();
                lookup.insert(target.label.to_string(), value.clone());
                Ok(Self::Lookup(lookup))
            }
            other => Err(ConvergeError::validation(format!(
                "{}: cannot reference a {} by {}",
                field, target.tag, other
            ))),
        }
    }
}

impl FieldValue {
    pub fn classify(descriptor: &ResourceDescriptor, field: &str, value: &Value) -> Result<Self, ConvergeError> {
        let Some(target) = descriptor.reference_target(field) else {
            return Ok(Self::Scalar(value.clone()));
        };
        match value {
            Value::Array(items) => items
                .iter()
                .map(|item| Reference::parse(field, target, item))
                .collect::<Result<Vec<_>, _>>()
                .map(|refs| Self::Many(target, refs)),
            single => Reference::parse(field, target, single).map(|r| Self::One(target, r)),
        }
    }
}

type ResolveFuture<'a> = Pin<Box<dyn Future<Output = Result<String, ConvergeError>> + Send + 'a>>;

/// Resolve a reference to the identifier of exactly one object.
///
/// Lookup attributes that are themselves mapping-shaped references on the
/// target are resolved first, e.g. `{name: eth0, device: {name: r1}}`.
pub fn resolve<'a>(
    api: &'a dyn ObjectApi,
    field: &'a str,
    target: &'static ResourceDescriptor,
    reference: &'a Reference,
) -> ResolveFuture<'a> {
    Box::pin(async move {
        let attrs = match reference {
            Reference::Identifier(id) => return Ok(id.clone()),
            Reference::Lookup(attrs) => attrs,
        };

        let mut filter: Filter = Vec::new();
        for (key, value) in attrs {
            match value {
                Value::Object(_) => {
                    let nested_target = target.reference_target(key).ok_or_else(|| {
                        ConvergeError::validation(format!(
                            "{}.{}: nested lookups are only allowed on reference fields",
                            field, key
                        ))
                    })?;
                    let nested = Reference::parse(key, nested_target, value)?;
                    let id = resolve(api, field, nested_target, &nested).await?;
                    filter.push((key.clone(), id));
                }
                Value::Array(items) => {
                    for item in items {
                        filter.push((key.clone(), scalar_to_string(item)));
                    }
                }
                scalar => filter.push((key.clone(), scalar_to_string(scalar))),
            }
        }

        tracing::debug!("Resolving {} -> {} ({})", field, target.tag, describe_filter(&filter));
        let matches = api
            .list(&target.path(), &filter)
            .await
            .map_err(ConvergeError::remote)?;

        match matches.as_slice() {
            [] => Err(ConvergeError::resolution(
                field,
                format!("no {} matches {}", target.tag, describe_filter(&filter)),
            )),
            [one] => one.get("id").and_then(id_string).ok_or_else(|| {
                ConvergeError::resolution(field, format!("matched {} has no id", target.tag))
            }),
            many => Err(ConvergeError::resolution(
                field,
                format!(
                    "{} {} objects match {}; add attributes to narrow the lookup",
                    many.len(),
                    target.tag,
                    describe_filter(&filter)
                ),
            )),
        }
    })
}
