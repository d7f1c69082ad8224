use anyhow::{Context, Result};
use serde_json::{json, Map, Value};
use std::collections::BTreeMap;

use crate::nautobot::ObjectApi;
use crate::registry;
use crate::utils::slugify;

pub const DEFAULT_GROUP_BY: &[&str] = &["location", "role", "platform"];

/// Nautobot 2.x lists related objects as bare `{id, object_type, url}`
/// unless asked for one level of nesting
const LIST_DEPTH: &str = "1";

/// Build a grouped host inventory from devices (and optionally VMs)
pub async fn build(api: &dyn ObjectApi, group_by: &[String], include_vms: bool) -> Result<Value> {
    let mut hosts = Vec::new();

    let mut sources = vec!["device"];
    if include_vms {
        sources.push("virtual_machine");
    }

    for tag in sources {
        let descriptor = registry::lookup(tag).context("resource registry is missing a host source")?;
        let filter = vec![("depth".to_string(), LIST_DEPTH.to_string())];
        let records = api.list(&descriptor.path(), &filter).await?;
        tracing::info!("Fetched {} {} records", records.len(), tag);
        hosts.extend(records);
    }

    Ok(group_hosts(&hosts, group_by))
}

/// `{_meta: {hostvars}, all: {hosts}, <field>_<value>: {hosts}}`
pub fn group_hosts(records: &[Value], group_by: &[String]) -> Value {
    let mut hostvars = Map::new();
    let mut all = Vec::new();
    let mut groups: BTreeMap<String, Vec<String>> = BTreeMap::new();

    for record in records {
        let Some(name) = record.get("name").and_then(Value::as_str).filter(|n| !n.is_empty()) else {
            continue;
        };

        for field in group_by {
            if let Some(value) = record.get(field).and_then(group_value) {
                let group = format!("{}_{}", field, slugify(&value).replace('-', "_"));
                groups.entry(group).or_default().push(name.to_string());
            }
        }

        all.push(name.to_string());
        hostvars.insert(name.to_string(), record.clone());
    }

    let mut inventory = Map::new();
    inventory.insert("_meta".to_string(), json!({ "hostvars": hostvars }));
    inventory.insert("all".to_string(), json!({ "hosts": all }));
    for (group, hosts) in groups {
        inventory.insert(group, json!({ "hosts": hosts }));
    }
    Value::Object(inventory)
}

fn group_value(value: &Value) -> Option<String> {
    match value {
        Value::Object(obj) => ["name", "display", "value"]
            .iter()
            .find_map(|k| obj.get(*k).and_then(Value::as_str))
            .map(str::to_string),
        Value::String(s) if !s.is_empty() => Some(s.clone()),
        Value::Number(n) => Some(n.to_string()),
        _ => None,
    }
}
