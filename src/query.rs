//! Query building for list, count, and export operations.

use serde_json::Value;

/// Query options for [`Collection::list`](crate::Collection::list).
///
/// The filter is a JSON object mapping field names to either a literal value
/// (equality) or an operator object:
///
/// ```rust
/// use jsondb_cloud::ListQuery;
/// use serde_json::json;
///
/// let query = ListQuery::new()
///     .with_filter(json!({"role": "admin", "age": {"$gte": 21}}))
///     .with_sort("-createdAt")
///     .with_limit(10);
/// ```
#[derive(Debug, Clone, Default)]
pub struct ListQuery {
    filter: Option<Value>,
    sort: Option<String>,
    limit: Option<u64>,
    offset: Option<u64>,
    select: Option<Vec<String>>,
}

impl ListQuery {
    /// Create an empty query (no filter, server-default page).
    pub fn new() -> Self {
        Self::default()
    }

    /// Set the filter object.
    pub fn with_filter(mut self, filter: Value) -> Self {
        self.filter = Some(filter);
        self
    }

    /// Set the sort key. Prefix with `-` for descending order.
    pub fn with_sort<S: Into<String>>(mut self, sort: S) -> Self {
        self.sort = Some(sort.into());
        self
    }

    /// Cap the number of returned documents.
    pub fn with_limit(mut self, limit: u64) -> Self {
        self.limit = Some(limit);
        self
    }

    /// Skip the first `offset` matching documents.
    pub fn with_offset(mut self, offset: u64) -> Self {
        self.offset = Some(offset);
        self
    }

    /// Restrict returned documents to the named fields.
    pub fn with_select<I, S>(mut self, fields: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.select = Some(fields.into_iter().map(Into::into).collect());
        self
    }

    /// Render the query as ordered URL parameter pairs.
    ///
    /// `count` adds `count=true`, turning the request into a count query.
    pub(crate) fn to_pairs(&self, count: bool) -> Vec<(String, String)> {
        let mut pairs = Vec::new();

        if let Some(filter) = &self.filter {
            pairs.extend(filter_pairs(filter));
        }
        if let Some(sort) = &self.sort {
            pairs.push(("sort".to_string(), sort.clone()));
        }
        if let Some(limit) = self.limit {
            pairs.push(("limit".to_string(), limit.to_string()));
        }
        if let Some(offset) = self.offset {
            pairs.push(("offset".to_string(), offset.to_string()));
        }
        if let Some(select) = &self.select {
            pairs.push(("select".to_string(), select.join(",")));
        }
        if count {
            pairs.push(("count".to_string(), "true".to_string()));
        }

        pairs
    }
}

/// Render a filter object as `filter[field]` / `filter[field][op]` pairs.
///
/// Two shapes are supported per field, matching the hosted API:
///
/// * equality: `{"role": "admin"}` becomes `filter[role]=admin`
/// * operator: `{"age": {"$gte": 21}}` becomes `filter[age][gte]=21`
///
/// `$eq` collapses to the equality form and `$in` joins its values with
/// commas. Non-object filters produce no pairs.
pub(crate) fn filter_pairs(filter: &Value) -> Vec<(String, String)> {
    let mut pairs = Vec::new();

    let Some(fields) = filter.as_object() else {
        return pairs;
    };

    for (field, value) in fields {
        match value.as_object() {
            Some(ops) => {
                for (op_key, op_val) in ops {
                    let op = op_key.trim_start_matches('$');
                    match (op, op_val.as_array()) {
                        ("eq", _) => {
                            pairs.push((format!("filter[{field}]"), encode(op_val)));
                        }
                        ("in", Some(items)) => {
                            let joined = items
                                .iter()
                                .map(encode)
                                .collect::<Vec<_>>()
                                .join(",");
                            pairs.push((format!("filter[{field}][in]"), joined));
                        }
                        _ => {
                            pairs.push((format!("filter[{field}][{op}]"), encode(op_val)));
                        }
                    }
                }
            }
            None => {
                pairs.push((format!("filter[{field}]"), encode(value)));
            }
        }
    }

    pairs
}

/// Encode a filter value as a query parameter string.
fn encode(value: &Value) -> String {
    match value {
        Value::String(s) => s.clone(),
        Value::Bool(b) => {
            if *b {
                "true".to_string()
            } else {
                "false".to_string()
            }
        }
        other => other.to_string(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_equality_filter() {
        let pairs = filter_pairs(&json!({"role": "admin"}));
        assert_eq!(pairs, vec![("filter[role]".to_string(), "admin".to_string())]);
    }

    #[test]
    fn test_operator_filter() {
        let pairs = filter_pairs(&json!({"age": {"$gte": 21, "$lt": 65}}));
        assert_eq!(
            pairs,
            vec![
                ("filter[age][gte]".to_string(), "21".to_string()),
                ("filter[age][lt]".to_string(), "65".to_string()),
            ]
        );
    }

    #[test]
    fn test_eq_operator_collapses_to_equality() {
        let pairs = filter_pairs(&json!({"role": {"$eq": "admin"}}));
        assert_eq!(pairs, vec![("filter[role]".to_string(), "admin".to_string())]);
    }

    #[test]
    fn test_in_operator_joins_values() {
        let pairs = filter_pairs(&json!({"role": {"$in": ["admin", "editor"]}}));
        assert_eq!(
            pairs,
            vec![("filter[role][in]".to_string(), "admin,editor".to_string())]
        );
    }

    #[test]
    fn test_bool_and_number_encoding() {
        let pairs = filter_pairs(&json!({"active": true, "score": 1.5}));
        assert!(pairs.contains(&("filter[active]".to_string(), "true".to_string())));
        assert!(pairs.contains(&("filter[score]".to_string(), "1.5".to_string())));
    }

    #[test]
    fn test_non_object_filter_is_empty() {
        assert!(filter_pairs(&json!("admin")).is_empty());
        assert!(filter_pairs(&Value::Null).is_empty());
    }

    #[test]
    fn test_full_query_pairs() {
        let query = ListQuery::new()
            .with_filter(json!({"role": "admin"}))
            .with_sort("-createdAt")
            .with_limit(10)
            .with_offset(20)
            .with_select(["name", "email"]);

        let pairs = query.to_pairs(false);
        assert_eq!(
            pairs,
            vec![
                ("filter[role]".to_string(), "admin".to_string()),
                ("sort".to_string(), "-createdAt".to_string()),
                ("limit".to_string(), "10".to_string()),
                ("offset".to_string(), "20".to_string()),
                ("select".to_string(), "name,email".to_string()),
            ]
        );
    }

    #[test]
    fn test_count_flag() {
        let pairs = ListQuery::new().to_pairs(true);
        assert_eq!(pairs, vec![("count".to_string(), "true".to_string())]);
    }

    #[test]
    fn test_empty_query_has_no_pairs() {
        assert!(ListQuery::new().to_pairs(false).is_empty());
    }
}
