use easel_core::EaselError;
use serde_json::Value;

/// Classify a decoded polling response as usable data or a specific,
/// attributable failure.
///
/// HTTP status alone is not enough: CORS proxies wrap the real upstream
/// status inside a 200 body, and some APIs return error bodies with a
/// success status. Checks run in order, first match wins:
///
/// 1. proxy-relay envelope (`status.http_code` + `contents`)
/// 2. direct known-good schema (`img` + `title`)
/// 3. upstream error field (`error` / `message`)
/// 4. empty or degenerate structure
/// 5. fallthrough emptiness for anything left over
///
/// Structural checks apply only to objects and arrays; scalars go
/// straight to the emptiness check. Checks 4 and 5 overlap on empty
/// structures; the ordering is load-bearing for which error callers see.
pub fn validate(value: &Value) -> Result<(), EaselError> {
    if value.is_object() || value.is_array() {
        if let Some(obj) = value.as_object() {
            if let (Some(status), Some(contents)) = (obj.get("status"), obj.get("contents")) {
                if let Some(code) = status.get("http_code") {
                    return validate_proxy_envelope(code, contents);
                }
            }

            if obj.contains_key("img") && obj.contains_key("title") {
                return Ok(());
            }

            if obj.contains_key("error") || obj.contains_key("message") {
                return Err(EaselError::UpstreamErrorField(upstream_message(obj)));
            }
        }

        if is_empty_structure(value) || is_single_string_array(value) {
            return Err(EaselError::UnexpectedShape);
        }
    }

    // Numeric zero and boolean false are unusual but valid payloads.
    if is_semantically_empty(value) {
        return Err(EaselError::EmptyResponse);
    }

    Ok(())
}

/// A proxy relay answered; the real upstream outcome lives in the
/// envelope, not the outer HTTP status.
fn validate_proxy_envelope(http_code: &Value, contents: &Value) -> Result<(), EaselError> {
    let code = http_code.as_i64().unwrap_or(0);
    if code != 200 {
        return Err(EaselError::ProxyHttp(code));
    }

    if let Some(text) = contents.as_str() {
        let decoded: Value =
            serde_json::from_str(text).map_err(|_| EaselError::ProxyContentsInvalidJson)?;

        // Catches "200 OK" relays of placeholder or error pages.
        if decoded.get("img").is_none() && decoded.get("title").is_none() {
            return Err(EaselError::MissingExpectedFields {
                fields: vec!["img", "title"],
            });
        }
    }

    Ok(())
}

fn upstream_message(obj: &serde_json::Map<String, Value>) -> String {
    let field = obj
        .get("error")
        .filter(|v| !v.is_null())
        .or_else(|| obj.get("message").filter(|v| !v.is_null()));
    match field {
        Some(Value::String(s)) => s.clone(),
        Some(v) => v.to_string(),
        None => "Unknown error".to_string(),
    }
}

fn is_empty_structure(value: &Value) -> bool {
    match value {
        Value::Object(o) => o.is_empty(),
        Value::Array(a) => a.is_empty(),
        _ => false,
    }
}

fn is_single_string_array(value: &Value) -> bool {
    match value {
        Value::Array(a) => a.len() == 1 && a[0].is_string(),
        _ => false,
    }
}

fn is_semantically_empty(value: &Value) -> bool {
    match value {
        Value::Null => true,
        Value::String(s) => s.is_empty(),
        Value::Array(a) => a.is_empty(),
        Value::Object(o) => o.is_empty(),
        Value::Number(_) | Value::Bool(_) => false,
    }
}
