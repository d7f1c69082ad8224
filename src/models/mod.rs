use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};

use crate::converge::ConvergeError;

/// Desired lifecycle of the declared object
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum LifecycleTarget {
    Present,
    Absent,
}

impl LifecycleTarget {
    pub fn parse(s: &str) -> Result<Self, ConvergeError> {
        match s {
            "present" => Ok(Self::Present),
            "absent" => Ok(Self::Absent),
            other => Err(ConvergeError::validation(format!(
                "Invalid state '{}': expected 'present' or 'absent'",
                other
            ))),
        }
    }
}

/// One task document: which resource, its desired state, and how to find it
#[derive(Debug, Clone, Deserialize)]
pub struct Task {
    pub resource: String,
    #[serde(default = "default_state")]
    pub state: String,
    #[serde(default)]
    pub data: Map<String, Value>,
    /// Replaces the resource's default existence-check fields
    #[serde(default)]
    pub query_params: Option<Vec<String>>,
}

fn default_state() -> String { "present".to_string() }

/// Terminal state of one convergence run
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum Action {
    Created,
    Updated,
    Unchanged,
    Deleted,
    Noop,
}

impl Action {
    pub fn changed(&self) -> bool {
        matches!(self, Self::Created | Self::Updated | Self::Deleted)
    }

    /// Status wording used in messages
    pub fn verb(&self) -> &'static str {
        match self {
            Self::Created => "created",
            Self::Updated => "updated",
            Self::Unchanged => "already exists",
            Self::Deleted => "deleted",
            Self::Noop => "already absent",
        }
    }
}

/// Fields touched by the run, before and after
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct Diff {
    pub before: Map<String, Value>,
    pub after: Map<String, Value>,
}

#[derive(Debug, Clone, Serialize)]
pub struct Outcome {
    pub changed: bool,
    pub action: Action,
    pub msg: String,
    #[serde(skip)]
    pub resource: &'static str,
    /// Serialized object after the run; `None` once deleted or absent
    pub object: Option<Map<String, Value>>,
    pub diff: Diff,
    pub check_mode: bool,
}

impl Outcome {
    /// JSON report printed to the caller; the object sits under the
    /// resource tag, e.g. `{"changed": true, "device": {...}}`
    pub fn to_report(&self) -> Value {
        let mut report = Map::new();
        report.insert("changed".to_string(), Value::Bool(self.changed));
        report.insert("action".to_string(), serde_json::json!(self.action));
        report.insert("msg".to_string(), Value::String(self.msg.clone()));
        report.insert(
            self.resource.to_string(),
            self.object.clone().map(Value::Object).unwrap_or(Value::Null),
        );
        report.insert("diff".to_string(), serde_json::json!(self.diff));
        if self.check_mode {
            report.insert("check_mode".to_string(), Value::Bool(true));
        }
        Value::Object(report)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_lifecycle_target_parse() {
        assert_eq!(LifecycleTarget::parse("present").unwrap(), LifecycleTarget::Present);
        assert_eq!(LifecycleTarget::parse("absent").unwrap(), LifecycleTarget::Absent);
        let err = LifecycleTarget::parse("new").unwrap_err();
        assert!(matches!(err, ConvergeError::Validation(_)));
    }

    #[test]
    fn test_task_from_yaml() {
        let task: Task = serde_yaml::from_str(
            "resource: manufacturer\ndata:\n  name: Test Manufacturer\n  description: A vendor\n",
        )
        .unwrap();
        assert_eq!(task.resource, "manufacturer");
        assert_eq!(task.state, "present");
        assert_eq!(task.data["name"], json!("Test Manufacturer"));
        assert!(task.query_params.is_none());
    }

    #[test]
    fn test_action_changed() {
        assert!(Action::Created.changed());
        assert!(Action::Deleted.changed());
        assert!(!Action::Unchanged.changed());
        assert!(!Action::Noop.changed());
    }

    #[test]
    fn test_report_shape() {
        let outcome = Outcome {
            changed: true,
            action: Action::Created,
            msg: "manufacturer Acme created".to_string(),
            resource: "manufacturer",
            object: Some(json!({"id": "m1", "name": "Acme"}).as_object().unwrap().clone()),
            diff: Diff::default(),
            check_mode: false,
        };
        let report = outcome.to_report();
        assert_eq!(report["changed"], json!(true));
        assert_eq!(report["action"], json!("created"));
        assert_eq!(report["manufacturer"]["id"], json!("m1"));
        assert!(report.get("check_mode").is_none());
    }
}
