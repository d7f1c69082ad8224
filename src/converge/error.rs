use thiserror::Error;

/// Convergence failures. Every variant is terminal for the invocation.
#[derive(Debug, Error)]
pub enum ConvergeError {
    /// Rejected before any request was made
    #[error("{0}")]
    Validation(String),

    #[error("Could not resolve {field}: {message}")]
    Resolution { field: String, message: String },

    #[error("More than one {resource} matches {filter} ({count} results); refine query_params")]
    AmbiguousLookup {
        resource: String,
        filter: String,
        count: usize,
    },

    /// Nautobot rejected a request or could not be reached
    #[error("{0}")]
    Remote(String),
}

impl ConvergeError {
    pub fn validation(msg: impl Into<String>) -> Self {
        Self::Validation(msg.into())
    }

    pub fn resolution(field: &str, msg: impl Into<String>) -> Self {
        Self::Resolution {
            field: field.to_string(),
            message: msg.into(),
        }
    }

    /// Keep the whole anyhow context chain; it carries Nautobot's body.
    pub fn remote(err: anyhow::Error) -> Self {
        Self::Remote(format!("{:#}", err))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_messages_name_the_fault() {
        let err = ConvergeError::resolution("manufacturer", "no manufacturer matches name=Acme");
        assert_eq!(err.to_string(), "Could not resolve manufacturer: no manufacturer matches name=Acme");

        let err = ConvergeError::AmbiguousLookup {
            resource: "device".to_string(),
            filter: "name=r1".to_string(),
            count: 2,
        };
        assert!(err.to_string().contains("More than one device matches name=r1"));

        let err = ConvergeError::remote(anyhow::anyhow!("Nautobot API create error 400: {{\"name\": [\"required\"]}}"));
        assert!(err.to_string().starts_with("Nautobot API create error 400"));
    }
}
