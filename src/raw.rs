use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};

/// A circuit description as written, before any refs are parsed
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Circuit {
    pub dimensions: Option<Dimensions>,
    pub layout: Option<String>,
    pub cuts: Vec<String>,
    pub wires: Vec<Wire>,
    pub components: Vec<Component>,
    /// Net names keyed by any ref on the net
    pub nets: BTreeMap<String, String>,
}

/// Board size in inches
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Dimensions {
    pub width: Option<f64>,
    pub height: Option<f64>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Wire {
    pub from: String,
    pub to: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub layer: Option<String>,
}

/// Any component entry; which fields matter depends on `typ`
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Component {
    #[serde(rename = "type")]
    pub typ: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub from: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub to: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub at: Option<String>,
    #[serde(rename = "ref", skip_serializing_if = "Option::is_none")]
    pub hole_ref: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub pins: Option<usize>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub width: Option<f64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub orientation: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub x: Option<f64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub y: Option<f64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub radius: Option<f64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub label: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub layer: Option<String>,
}

impl TryFrom<&str> for Circuit {
    type Error = serde_json::Error;

    fn try_from(input: &str) -> Result<Self, Self::Error> {
        serde_json::from_str(input)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn missing_sections_default() {
        let circuit = Circuit::try_from(r#"{ "dimensions": { "width": 1.0 } }"#).unwrap();
        assert_eq!(circuit.dimensions.unwrap().height, None);
        assert!(circuit.cuts.is_empty());
        assert!(circuit.nets.is_empty());
    }

    #[test]
    fn components_keep_unknown_types() {
        let circuit = Circuit::try_from(
            r#"{ "components": [
                { "type": "ic", "at": "C4", "pins": 8, "width": 0.3 },
                { "type": "flux-capacitor", "from": "A1", "to": "A2" },
                { "type": "hole", "ref": "A0", "radius": 0.06 }
            ] }"#,
        )
        .unwrap();
        assert_eq!(circuit.components[0].pins, Some(8));
        assert_eq!(circuit.components[1].typ, "flux-capacitor");
        assert_eq!(circuit.components[2].hole_ref.as_deref(), Some("A0"));
    }
}
