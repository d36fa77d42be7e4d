//! Decoding of host and session sources.
//!
//! Host sources come in several shapes. The most informative one is tried
//! first and missing optional parts fall back to documented defaults:
//!
//! 1. `{"mapsettings": {...}, "hosts": [...]}` (mapsettings optional)
//! 2. `[{"hostname": "...", "left": 1, "top": 2}, ...]`
//! 3. `[{"hostname": "..."}, ...]`

use std::collections::HashSet;

use serde::Deserialize;
use serde_json::Value;
use tracing::{debug, warn};

use crate::error::DecodeError;
use crate::types::{Host, HostModel, MapSettings, Position, Session, FALLBACK_POSITION};

/// Decode a raw host source into a model.
pub fn load(raw: &str) -> Result<HostModel, DecodeError> {
    let value: Value = serde_json::from_str(raw)?;
    load_value(&value)
}

/// Decode an already-parsed host source.
pub fn load_value(value: &Value) -> Result<HostModel, DecodeError> {
    match value {
        Value::Object(map) => {
            let entries = map
                .get("hosts")
                .ok_or_else(|| {
                    DecodeError::UnrecognizedShape("object without a \"hosts\" key".to_string())
                })?
                .as_array()
                .ok_or_else(|| {
                    DecodeError::UnrecognizedShape("\"hosts\" is not an array".to_string())
                })?;

            let settings = match map.get("mapsettings") {
                Some(raw) => decode_map_settings(raw).unwrap_or_else(|| {
                    warn!("Ignoring malformed mapsettings, using defaults");
                    MapSettings::default()
                }),
                None => {
                    debug!("No mapsettings in host source, using defaults");
                    MapSettings::default()
                }
            };

            Ok(HostModel::new(settings, decode_hosts(entries)?))
        }
        Value::Array(entries) => {
            debug!("Bare host list, using default mapsettings");
            Ok(HostModel::new(MapSettings::default(), decode_hosts(entries)?))
        }
        other => Err(DecodeError::UnrecognizedShape(format!(
            "expected an array or an object, found {}",
            json_kind(other)
        ))),
    }
}

fn decode_hosts(entries: &[Value]) -> Result<Vec<Host>, DecodeError> {
    let mut seen = HashSet::new();
    let mut hosts = Vec::with_capacity(entries.len());

    for (index, entry) in entries.iter().enumerate() {
        let host = decode_host(index, entry)?;
        if !seen.insert(host.id.clone()) {
            warn!(host = %host.id, index, "Dropping duplicate host entry");
            continue;
        }
        hosts.push(host);
    }

    Ok(hosts)
}

fn decode_host(index: usize, entry: &Value) -> Result<Host, DecodeError> {
    let object = entry.as_object().ok_or_else(|| {
        DecodeError::UnrecognizedShape(format!(
            "host entry {} is {}, expected an object",
            index,
            json_kind(entry)
        ))
    })?;

    let id = object
        .get("hostname")
        .and_then(Value::as_str)
        .ok_or(DecodeError::MissingHostname { index })?;

    if id.is_empty() {
        return Err(DecodeError::EmptyHostname { index });
    }

    let left = object.get("left").and_then(as_int);
    let top = object.get("top").and_then(as_int);

    let position = match (left, top) {
        (Some(left), Some(top)) => Position::new(left, top),
        _ => {
            debug!(host = id, "Host has no position, using fallback");
            FALLBACK_POSITION
        }
    };

    Ok(Host::new(id, position))
}

fn decode_map_settings(raw: &Value) -> Option<MapSettings> {
    let object = raw.as_object()?;
    let field = |names: &[&str]| names.iter().find_map(|n| object.get(*n).and_then(as_int));

    // "heigth" is the canonical spelling of the persisted format.
    MapSettings::new(
        field(&["heigth", "height"])?,
        field(&["width"])?,
        field(&["active-size"])?,
        field(&["empty-size"])?,
    )
}

fn as_int(value: &Value) -> Option<i32> {
    value
        .as_i64()
        .and_then(|n| i32::try_from(n).ok())
        .or_else(|| value.as_f64().map(|f| f.round() as i32))
}

fn json_kind(value: &Value) -> &'static str {
    match value {
        Value::Null => "null",
        Value::Bool(_) => "a boolean",
        Value::Number(_) => "a number",
        Value::String(_) => "a string",
        Value::Array(_) => "an array",
        Value::Object(_) => "an object",
    }
}

/// Session as delivered by the session endpoint.
#[derive(Debug, Deserialize)]
struct RawSession {
    username: String,
    host: String,
}

/// Decode a session source: `[{"username": "...", "host": "..."}, ...]`.
pub fn decode_sessions(raw: &str) -> Result<Vec<Session>, DecodeError> {
    let raw_sessions: Vec<RawSession> = serde_json::from_str(raw)?;

    raw_sessions
        .into_iter()
        .enumerate()
        .map(|(index, s)| {
            if s.username.is_empty() {
                return Err(DecodeError::InvalidSession {
                    index,
                    message: "empty username".to_string(),
                });
            }
            Ok(Session::new(s.username, s.host))
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::types::DEFAULT_REFERENCE_WIDTH;

    #[test]
    fn test_bare_ids_get_fallbacks() {
        let model = load(r#"[{"hostname":"a"},{"hostname":"b"}]"#).unwrap();

        assert_eq!(model.map_settings, MapSettings::default());
        assert_eq!(model.hosts().len(), 2);
        for host in model.hosts() {
            assert_eq!(host.position, Position::new(50, 50));
        }
    }

    #[test]
    fn test_bare_positioned_list() {
        let model = load(r#"[{"hostname":"a","left":3,"top":4}]"#).unwrap();
        assert_eq!(model.hosts()[0].position, Position::new(3, 4));
    }

    #[test]
    fn test_wrapped_hosts_without_settings() {
        let model = load(r#"{"hosts":[{"hostname":"a","left":10,"top":20}]}"#).unwrap();

        assert_eq!(model.map_settings, MapSettings::default());
        assert_eq!(model.hosts()[0].id, "a");
        assert_eq!(model.hosts()[0].position, Position::new(10, 20));
    }

    #[test]
    fn test_wrapped_hosts_with_settings() {
        let raw = r#"{
            "mapsettings": {"heigth": 800, "width": 600, "active-size": 40, "empty-size": 20},
            "hosts": [{"hostname": "f1r1s1.codam.nl", "left": 1, "top": 2}]
        }"#;
        let model = load(raw).unwrap();

        assert_eq!(model.map_settings, MapSettings::new(800, 600, 40, 20).unwrap());
    }

    #[test]
    fn test_correctly_spelled_height_is_accepted() {
        let raw = r#"{"mapsettings": {"height": 800, "width": 600, "active-size": 40, "empty-size": 20}, "hosts": []}"#;
        let model = load(raw).unwrap();
        assert_eq!(model.map_settings.reference_height, 800);
    }

    #[test]
    fn test_malformed_settings_fall_back() {
        let raw = r#"{"mapsettings": {"width": 600}, "hosts": [{"hostname": "a"}]}"#;
        let model = load(raw).unwrap();
        assert_eq!(model.map_settings.reference_width, DEFAULT_REFERENCE_WIDTH);
    }

    #[test]
    fn test_partial_position_uses_fallback() {
        let model = load(r#"[{"hostname":"a","left":10}]"#).unwrap();
        assert_eq!(model.hosts()[0].position, FALLBACK_POSITION);
    }

    #[test]
    fn test_mixed_shapes_in_one_list() {
        let model = load(r#"[{"hostname":"a","left":1,"top":2},{"hostname":"b"}]"#).unwrap();
        assert_eq!(model.hosts()[0].position, Position::new(1, 2));
        assert_eq!(model.hosts()[1].position, FALLBACK_POSITION);
    }

    #[test]
    fn test_missing_hostname_fails() {
        let err = load(r#"[{"hostname":"a"},{"left":1,"top":2}]"#).unwrap_err();
        assert!(matches!(err, DecodeError::MissingHostname { index: 1 }));
    }

    #[test]
    fn test_empty_hostname_fails() {
        let err = load(r#"[{"hostname":""}]"#).unwrap_err();
        assert!(matches!(err, DecodeError::EmptyHostname { index: 0 }));
    }

    #[test]
    fn test_unrecognized_shapes() {
        assert!(matches!(
            load(r#"{"machines": []}"#).unwrap_err(),
            DecodeError::UnrecognizedShape(_)
        ));
        assert!(matches!(
            load("42").unwrap_err(),
            DecodeError::UnrecognizedShape(_)
        ));
        assert!(matches!(
            load(r#"["a", "b"]"#).unwrap_err(),
            DecodeError::UnrecognizedShape(_)
        ));
        assert!(matches!(load("{not json").unwrap_err(), DecodeError::InvalidJson(_)));
    }

    #[test]
    fn test_duplicate_hosts_keep_first() {
        let model = load(r#"[{"hostname":"a","left":1,"top":1},{"hostname":"a","left":9,"top":9}]"#)
            .unwrap();
        assert_eq!(model.hosts().len(), 1);
        assert_eq!(model.hosts()[0].position, Position::new(1, 1));
    }

    #[test]
    fn test_decode_sessions() {
        let sessions =
            decode_sessions(r#"[{"username":"jdoe","host":"f1r3s2"},{"username":"x","host":"f0r1s1"}]"#)
                .unwrap();
        assert_eq!(sessions.len(), 2);
        assert_eq!(sessions[0], Session::new("jdoe", "f1r3s2"));
    }

    #[test]
    fn test_decode_sessions_rejects_bad_entries() {
        assert!(matches!(
            decode_sessions(r#"[{"username":"","host":"f1"}]"#).unwrap_err(),
            DecodeError::InvalidSession { index: 0, .. }
        ));
        assert!(matches!(
            decode_sessions(r#"[{"username":"a"}]"#).unwrap_err(),
            DecodeError::InvalidJson(_)
        ));
    }
}
