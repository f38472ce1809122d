//! Bracket-keyed query parameters (`fields[apps]`, `filter[app]`, `include`, ...).

use serde::Serialize;
use serde_json::Value;
use url::Url;

use crate::error::{AscError, Result};

/// Serialized query parameters, ready for `reqwest::RequestBuilder::query`.
pub type QueryPairs = Vec<(String, String)>;

/// Flatten a query options struct into key/value pairs.
///
/// Field names come from the struct's serde renames, so an option declared
/// as `#[serde(rename = "fields[apps]")] fields_apps: Vec<String>` becomes
/// the key `fields[apps]`. Lists are comma-joined in input order. `None`,
/// empty strings and empty lists are omitted.
///
/// # Errors
///
/// Returns [`AscError::Encoding`] if `options` is not a flat struct or map.
pub fn build_query<Q: Serialize + ?Sized>(options: &Q) -> Result<QueryPairs> {
    let value = serde_json::to_value(options).map_err(|e| AscError::Encoding(e.to_string()))?;

    let map = match value {
        Value::Null => return Ok(Vec::new()),
        Value::Object(map) => map,
        other => {
            return Err(AscError::Encoding(format!(
                "query options must serialize to an object, got {other}"
            )))
        }
    };

    let mut pairs = Vec::with_capacity(map.len());
    for (key, value) in map {
        if let Some(rendered) = render_value(&key, value)? {
            pairs.push((key, rendered));
        }
    }
    Ok(pairs)
}

fn render_value(key: &str, value: Value) -> Result<Option<String>> {
    match value {
        Value::Null => Ok(None),
        Value::String(s) if s.is_empty() => Ok(None),
        Value::String(s) => Ok(Some(s)),
        Value::Bool(b) => Ok(Some(b.to_string())),
        Value::Number(n) => Ok(Some(n.to_string())),
        Value::Array(items) if items.is_empty() => Ok(None),
        Value::Array(items) => {
            let mut parts = Vec::with_capacity(items.len());
            for item in items {
                match item {
                    Value::String(s) => parts.push(s),
                    Value::Number(n) => parts.push(n.to_string()),
                    Value::Bool(b) => parts.push(b.to_string()),
                    _ => {
                        return Err(AscError::Encoding(format!(
                            "query option `{key}` may only hold scalar list items"
                        )))
                    }
                }
            }
            Ok(Some(parts.join(",")))
        }
        Value::Object(_) => Err(AscError::Encoding(format!(
            "query option `{key}` must be a scalar or a list"
        ))),
    }
}

/// Render pairs as an `application/x-www-form-urlencoded` query string.
pub fn to_query_string(pairs: &[(String, String)]) -> String {
    url::form_urlencoded::Serializer::new(String::new())
        .extend_pairs(pairs)
        .finish()
}

/// Extract the `cursor` parameter from a paging link.
pub fn cursor_from_link(link: &str) -> Option<String> {
    let url = Url::parse(link).ok()?;
    url.query_pairs()
        .find(|(key, _)| key == "cursor")
        .map(|(_, value)| value.into_owned())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[derive(Serialize, Default)]
    struct Options {
        #[serde(rename = "fields[apps]", skip_serializing_if = "Vec::is_empty")]
        fields_apps: Vec<String>,
        #[serde(rename = "filter[app]", skip_serializing_if = "Vec::is_empty")]
        filter_app: Vec<String>,
        #[serde(skip_serializing_if = "Vec::is_empty")]
        include: Vec<String>,
        #[serde(skip_serializing_if = "Option::is_none")]
        limit: Option<u32>,
        #[serde(skip_serializing_if = "Option::is_none")]
        cursor: Option<String>,
    }

    fn lookup<'a>(pairs: &'a [(String, String)], key: &str) -> Option<&'a str> {
        pairs
            .iter()
            .find(|(k, _)| k == key)
            .map(|(_, v)| v.as_str())
    }

    #[test]
    fn test_empty_options_produce_no_pairs() {
        let pairs = build_query(&Options::default()).unwrap();
        assert!(pairs.is_empty());
    }

    #[test]
    fn test_lists_are_comma_joined_in_order() {
        let options = Options {
            filter_app: vec!["3".into(), "1".into(), "2".into()],
            ..Default::default()
        };
        let pairs = build_query(&options).unwrap();
        assert_eq!(lookup(&pairs, "filter[app]"), Some("3,1,2"));
    }

    #[test]
    fn test_scalars_render() {
        let options = Options {
            limit: Some(50),
            cursor: Some("ZA".into()),
            ..Default::default()
        };
        let pairs = build_query(&options).unwrap();
        assert_eq!(pairs.len(), 2);
        assert_eq!(lookup(&pairs, "limit"), Some("50"));
        assert_eq!(lookup(&pairs, "cursor"), Some("ZA"));
    }

    #[test]
    fn test_nested_objects_are_rejected() {
        let nested = serde_json::json!({"fields": {"apps": "name"}});
        assert!(matches!(build_query(&nested), Err(AscError::Encoding(_))));
    }

    #[test]
    fn test_unit_options() {
        assert!(build_query(&()).unwrap().is_empty());
    }

    #[test]
    fn test_query_string_escapes_brackets() {
        let pairs = vec![("fields[apps]".to_string(), "name,sku".to_string())];
        assert_eq!(to_query_string(&pairs), "fields%5Bapps%5D=name%2Csku");
    }

    #[test]
    fn test_cursor_from_link() {
        let link = "https://api.appstoreconnect.apple.com/v1/betaLicenseAgreements?cursor=eyJvZmZzZXQiOiIyIn0&limit=2";
        assert_eq!(
            cursor_from_link(link).as_deref(),
            Some("eyJvZmZzZXQiOiIyIn0")
        );
        assert!(cursor_from_link("https://x/y?limit=2").is_none());
        assert!(cursor_from_link("not a url").is_none());
    }
}
