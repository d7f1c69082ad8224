use serde::{Deserialize, Serialize};
use serde_json::Value;

// --- Nautobot API types ---

#[derive(Debug, Serialize, Deserialize)]
pub struct PaginatedResponse<T> {
    pub count: i64,
    pub next: Option<String>,
    pub previous: Option<String>,
    pub results: Vec<T>,
}

#[derive(Debug, Serialize)]
pub(crate) struct GraphQLRequest<'a> {
    pub query: &'a str,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub variables: Option<&'a Value>,
}

#[derive(Debug, Deserialize)]
pub struct GraphQLResponse {
    #[serde(default)]
    pub data: Option<Value>,
    #[serde(default)]
    pub errors: Option<Vec<GraphQLError>>,
}

#[derive(Debug, Clone, Deserialize)]
pub struct GraphQLError {
    pub message: String,
}

/// Query-string filter: ordered `key=value` pairs. Repeated keys are allowed
/// (Nautobot treats them as OR, e.g. `tag=a&tag=b`).
pub type Filter = Vec<(String, String)>;

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_paginated_response_parses() {
        let body = json!({
            "count": 2,
            "next": "https://nb.example/api/dcim/devices/?limit=1&offset=1",
            "previous": null,
            "results": [{"id": "a"}],
        });
        let page: PaginatedResponse<Value> = serde_json::from_value(body).unwrap();
        assert_eq!(page.count, 2);
        assert!(page.next.is_some());
        assert_eq!(page.results.len(), 1);
    }

    #[test]
    fn test_graphql_response_with_errors() {
        let body = json!({"data": null, "errors": [{"message": "Cannot query field"}]});
        let resp: GraphQLResponse = serde_json::from_value(body).unwrap();
        assert!(resp.data.is_none());
        assert_eq!(resp.errors.unwrap()[0].message, "Cannot query field");
    }

    #[test]
    fn test_graphql_request_omits_missing_variables() {
        let req = GraphQLRequest { query: "{ devices { name } }", variables: None };
        let body = serde_json::to_value(&req).unwrap();
        assert_eq!(body, json!({"query": "{ devices { name } }"}));
    }
}
