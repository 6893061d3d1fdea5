//! Lenient snapshot parsing.

use serde_json::{Map, Value};
use statusboard_types::{Component, Group, Snapshot};
use tracing::debug;

/// Parse a snapshot document, falling back to an empty snapshot.
///
/// - not JSON, or not an object at the top level → empty snapshot
/// - a group that is not an array → empty group
/// - a group element that is not an object → skipped
/// - a non-string `status` → empty status; non-string `name`/`label`/`url` → absent
/// - an empty or non-string `last_updated_utc` → absent
pub fn parse_snapshot(content: &str) -> Snapshot {
    match serde_json::from_str::<Value>(content) {
        Ok(Value::Object(map)) => from_object(&map),
        Ok(_) => {
            debug!("snapshot document is not a JSON object");
            Snapshot::default()
        }
        Err(e) => {
            debug!(error = %e, "snapshot document is not valid JSON");
            Snapshot::default()
        }
    }
}

fn from_object(map: &Map<String, Value>) -> Snapshot {
    let mut snapshot = Snapshot {
        last_updated_utc: map
            .get("last_updated_utc")
            .and_then(Value::as_str)
            .filter(|s| !s.is_empty())
            .map(str::to_owned),
        ..Snapshot::default()
    };

    for group in Group::ALL {
        match map.get(group.wire_key()) {
            Some(Value::Array(items)) => {
                *snapshot.group_mut(group) = items.iter().filter_map(component).collect();
            }
            Some(Value::Null) | None => {}
            Some(_) => debug!(group = group.wire_key(), "group is not an array, ignoring"),
        }
    }

    snapshot
}

fn component(value: &Value) -> Option<Component> {
    let obj = value.as_object()?;
    let text = |key: &str| obj.get(key).and_then(Value::as_str).map(str::to_owned);

    Some(Component {
        name: text("name"),
        label: text("label"),
        status: text("status").unwrap_or_default(),
        url: text("url"),
    })
}
