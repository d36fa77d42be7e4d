//! Canonical persisted layout format.
//!
//! ```json
//! {
//!   "mapsettings": { "heigth": 1325, "width": 1026, "active-size": 60, "empty-size": 25 },
//!   "hosts": [ { "hostname": "f1r1s1.codam.nl", "left": 10, "top": 20 } ]
//! }
//! ```

use serde::Serialize;

use crate::types::HostModel;

#[derive(Serialize)]
struct ExportDocument<'a> {
    mapsettings: ExportSettings,
    hosts: Vec<ExportHost<'a>>,
}

#[derive(Serialize)]
struct ExportSettings {
    heigth: i32,
    width: i32,
    #[serde(rename = "active-size")]
    active_size: i32,
    #[serde(rename = "empty-size")]
    empty_size: i32,
}

#[derive(Serialize)]
struct ExportHost<'a> {
    hostname: &'a str,
    left: i32,
    top: i32,
}

fn document(model: &HostModel) -> ExportDocument<'_> {
    let settings = &model.map_settings;
    ExportDocument {
        mapsettings: ExportSettings {
            heigth: settings.reference_height,
            width: settings.reference_width,
            active_size: settings.active_icon_size,
            empty_size: settings.empty_icon_size,
        },
        hosts: model
            .all_hosts()
            .into_iter()
            .map(|h| ExportHost {
                hostname: &h.id,
                left: h.position.left,
                top: h.position.top,
            })
            .collect(),
    }
}

/// Serialize a model as pretty-printed JSON with two-space indentation.
///
/// A host being dragged is written in its original slot with its current
/// position.
pub fn serialize(model: &HostModel) -> Result<String, serde_json::Error> {
    serde_json::to_string_pretty(&document(model))
}

/// The model as a JSON value in the canonical format.
pub fn to_value(model: &HostModel) -> Result<serde_json::Value, serde_json::Error> {
    serde_json::to_value(document(model))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::registry::load;
    use crate::types::{Host, MapSettings, Position};

    fn model() -> HostModel {
        HostModel::new(
            MapSettings::new(800, 600, 40, 20).unwrap(),
            vec![
                Host::new("f1r1s1.codam.nl", Position::new(10, 20)),
                Host::new("f1r1s2.codam.nl", Position::new(-5, 900)),
            ],
        )
    }

    #[test]
    fn test_serialize_exact_format() {
        let expected = r#"{
  "mapsettings": {
    "heigth": 800,
    "width": 600,
    "active-size": 40,
    "empty-size": 20
  },
  "hosts": [
    {
      "hostname": "f1r1s1.codam.nl",
      "left": 10,
      "top": 20
    },
    {
      "hostname": "f1r1s2.codam.nl",
      "left": -5,
      "top": 900
    }
  ]
}"#;
        assert_eq!(serialize(&model()).unwrap(), expected);
    }

    #[test]
    fn test_round_trip() {
        let original = model();
        let reloaded = load(&serialize(&original).unwrap()).unwrap();
        assert_eq!(reloaded, original);
    }

    #[test]
    fn test_export_mid_drag_includes_moving_host() {
        let mut model = model();
        model.start_drag("f1r1s1.codam.nl");
        model.drag_by(5.0, 5.0);

        let reloaded = load(&serialize(&model).unwrap()).unwrap();
        assert_eq!(reloaded.hosts().len(), 2);
        assert_eq!(reloaded.hosts()[0].id, "f1r1s1.codam.nl");
        assert_eq!(reloaded.hosts()[0].position, Position::new(15, 25));
    }

    #[test]
    fn test_empty_model() {
        let value = to_value(&HostModel::default()).unwrap();
        assert_eq!(value["hosts"], serde_json::json!([]));
        assert_eq!(value["mapsettings"]["heigth"], 1325);
    }
}
