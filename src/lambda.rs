use lambda_runtime::LambdaEvent;
use serde::Deserialize;
use serde_json::Value;

/// Which slice of the week a Lambda invocation asks for.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Scope {
    #[default]
    Today,
    Week,
}

/// Looks up `key` in the payload itself, then in API Gateway's
/// `queryStringParameters` and `pathParameters`.
pub fn payload_value<'a>(payload: &'a Value, key: &str) -> Option<&'a Value> {
    payload
        .get(key)
        .or_else(|| {
            payload
                .get("queryStringParameters")
                .and_then(|qs| qs.get(key))
        })
        .or_else(|| payload.get("pathParameters").and_then(|pp| pp.get(key)))
}

pub fn parse_value<T>(payload: &Value, key: &str) -> Option<T>
where
    T: for<'de> serde::Deserialize<'de>,
{
    payload_value(payload, key).and_then(|v| {
        // Query string values arrive as bare strings, e.g. `week` for an enum.
        if let Some(s) = v.as_str() {
            if let Ok(result) = serde_json::from_str::<T>(s) {
                return Some(result);
            }
            if let Ok(result) = serde_json::from_value::<T>(Value::String(s.to_string())) {
                return Some(result);
            }
        }
        serde_json::from_value(v.clone()).ok()
    })
}

pub fn parse_payload<T>(event: &LambdaEvent<Value>, key: &str) -> Option<T>
where
    T: for<'de> serde::Deserialize<'de>,
{
    parse_value(&event.payload, key)
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn scope_from_top_level_key() {
        let scope: Option<Scope> = parse_value(&json!({"scope": "week"}), "scope");
        assert_eq!(scope, Some(Scope::Week));
    }

    #[test]
    fn scope_from_query_string() {
        let payload = json!({"queryStringParameters": {"scope": "today"}});
        let scope: Option<Scope> = parse_value(&payload, "scope");
        assert_eq!(scope, Some(Scope::Today));
    }

    #[test]
    fn unknown_scope_is_none() {
        let scope: Option<Scope> = parse_value(&json!({"scope": "month"}), "scope");
        assert_eq!(scope, None);
        let missing: Option<Scope> = parse_value(&json!({}), "scope");
        assert_eq!(missing, None);
    }
}
