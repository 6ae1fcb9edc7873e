use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// Whether a category may be used in generation requests. Anything that is
/// not literally `Show` in the stored document is treated as hidden.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(from = "String")]
pub enum CategoryVisibility {
    Show,
    Hide,
}

impl From<String> for CategoryVisibility {
    fn from(raw: String) -> Self {
        match raw.as_str() {
            "Show" => Self::Show,
            _ => Self::Hide,
        }
    }
}

impl Default for CategoryVisibility {
    fn default() -> Self {
        Self::Show
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Category {
    pub id: String,
    pub name: String,
    #[serde(default)]
    pub visibility: CategoryVisibility,
}

/// Both `Basic` and `Advanced` parameters are usable in generation; any other
/// visibility string deserializes to `Hidden`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(from = "String")]
pub enum ParameterVisibility {
    Basic,
    Advanced,
    Hidden,
}

impl From<String> for ParameterVisibility {
    fn from(raw: String) -> Self {
        match raw.as_str() {
            "Basic" => Self::Basic,
            "Advanced" => Self::Advanced,
            _ => Self::Hidden,
        }
    }
}

impl Default for ParameterVisibility {
    fn default() -> Self {
        Self::Basic
    }
}

impl ParameterVisibility {
    pub fn is_usable(self) -> bool {
        !matches!(self, Self::Hidden)
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ChoiceOption {
    pub id: String,
    pub label: String,
}

#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct SliderRange {
    #[serde(default)]
    pub min: f64,
    #[serde(default = "default_slider_max")]
    pub max: f64,
    #[serde(default = "default_slider_step")]
    pub step: f64,
}

fn default_slider_max() -> f64 {
    100.0
}

fn default_slider_step() -> f64 {
    1.0
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ToggleLabels {
    pub on: String,
    pub off: String,
}

/// Typed value specification for a parameter. Serialized as the original
/// document shape: a `type` discriminator plus a type-specific `values`
/// payload. An unrecognized `type` is rejected at deserialization, so every
/// stored parameter has a spec matching its type.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "type", content = "values")]
pub enum ValueSpec {
    Dropdown(Vec<ChoiceOption>),
    Slider(SliderRange),
    ToggleSwitch(ToggleLabels),
    RadioButtons(Vec<ChoiceOption>),
    Checkbox(Vec<ChoiceOption>),
}

impl ValueSpec {
    pub fn kind(&self) -> &'static str {
        match self {
            ValueSpec::Dropdown(_) => "Dropdown",
            ValueSpec::Slider(_) => "Slider",
            ValueSpec::ToggleSwitch(_) => "ToggleSwitch",
            ValueSpec::RadioButtons(_) => "RadioButtons",
            ValueSpec::Checkbox(_) => "Checkbox",
        }
    }

    /// Assemble a spec from the document's split `type` + `values` pair, as
    /// the admin API submits them.
    pub fn from_parts(kind: &str, values: serde_json::Value) -> Result<Self, String> {
        if !matches!(
            kind,
            "Dropdown" | "Slider" | "ToggleSwitch" | "RadioButtons" | "Checkbox"
        ) {
            return Err(format!("Unknown parameter type: {}", kind));
        }
        serde_json::from_value(serde_json::json!({ "type": kind, "values": values }))
            .map_err(|e| format!("Invalid values for {} parameter: {}", kind, e))
    }

    /// Shape checks applied when a parameter is created or updated.
    pub fn check_definition(&self) -> Result<(), String> {
        match self {
            ValueSpec::Dropdown(options)
            | ValueSpec::RadioButtons(options)
            | ValueSpec::Checkbox(options) => {
                if options.len() < 2 {
                    return Err(format!(
                        "{} parameter requires at least 2 values as an array",
                        self.kind()
                    ));
                }
                Ok(())
            }
            ValueSpec::Slider(range) => {
                if range.min > range.max {
                    return Err("Slider parameter requires min and max with min <= max".to_string());
                }
                Ok(())
            }
            ValueSpec::ToggleSwitch(labels) => {
                if labels.on.is_empty() || labels.off.is_empty() {
                    return Err("ToggleSwitch parameter requires on and off labels".to_string());
                }
                Ok(())
            }
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Parameter {
    pub id: String,
    pub name: String,
    #[serde(default)]
    pub visibility: ParameterVisibility,
    pub category_id: String,
    #[serde(flatten)]
    pub spec: ValueSpec,
}

/// Partial update for a category; absent fields keep their stored values.
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CategoryUpdate {
    pub name: Option<String>,
    pub visibility: Option<CategoryVisibility>,
}

/// Partial update for a parameter. A spec update always replaces the whole
/// `type` + `values` pair, so the shape-matches-type invariant holds through
/// every edit.
#[derive(Debug, Clone, Default)]
pub struct ParameterUpdate {
    pub name: Option<String>,
    pub visibility: Option<ParameterVisibility>,
    pub category_id: Option<String>,
    pub spec: Option<ValueSpec>,
}

/// The single persisted document backing the whole store.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct StoreDocument {
    #[serde(default)]
    pub categories: Vec<Category>,
    #[serde(default)]
    pub parameters: Vec<Parameter>,
}

pub fn new_category_id() -> String {
    format!("cat-{}", Uuid::new_v4())
}

pub fn new_parameter_id() -> String {
    format!("param-{}", Uuid::new_v4())
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn parameter_round_trips_through_document_shape() {
        let raw = json!({
            "id": "param-1",
            "name": "Magic System",
            "type": "Dropdown",
            "visibility": "Basic",
            "categoryId": "cat-1",
            "values": [
                {"id": "m1", "label": "Elemental"},
                {"id": "m2", "label": "Divine"}
            ]
        });
        let parameter: Parameter = serde_json::from_value(raw.clone()).unwrap();
        assert_eq!(parameter.name, "Magic System");
        assert_eq!(parameter.category_id, "cat-1");
        match &parameter.spec {
            ValueSpec::Dropdown(options) => assert_eq!(options[1].label, "Divine"),
            other => panic!("expected dropdown, got {}", other.kind()),
        }
        assert_eq!(serde_json::to_value(&parameter).unwrap(), raw);
    }

    #[test]
    fn slider_values_default_missing_fields() {
        let raw = json!({
            "id": "param-2",
            "name": "Story Length",
            "type": "Slider",
            "categoryId": "cat-1",
            "values": {}
        });
        let parameter: Parameter = serde_json::from_value(raw).unwrap();
        match parameter.spec {
            ValueSpec::Slider(range) => {
                assert_eq!(range.min, 0.0);
                assert_eq!(range.max, 100.0);
                assert_eq!(range.step, 1.0);
            }
            other => panic!("expected slider, got {}", other.kind()),
        }
        assert_eq!(parameter.visibility, ParameterVisibility::Basic);
    }

    #[test]
    fn unknown_parameter_type_is_rejected() {
        let raw = json!({
            "id": "param-3",
            "name": "Mystery",
            "type": "ColorPicker",
            "categoryId": "cat-1",
            "values": []
        });
        assert!(serde_json::from_value::<Parameter>(raw).is_err());
    }

    #[test]
    fn unknown_visibility_strings_fall_back_to_hidden() {
        let parameter: ParameterVisibility = serde_json::from_value(json!("Internal")).unwrap();
        assert_eq!(parameter, ParameterVisibility::Hidden);
        assert!(!parameter.is_usable());

        let category: CategoryVisibility = serde_json::from_value(json!("Archived")).unwrap();
        assert_eq!(category, CategoryVisibility::Hide);
    }

    #[test]
    fn choice_specs_require_two_options() {
        let spec = ValueSpec::Checkbox(vec![ChoiceOption {
            id: "a".to_string(),
            label: "A".to_string(),
        }]);
        assert!(spec.check_definition().is_err());

        let spec = ValueSpec::Slider(SliderRange {
            min: 10.0,
            max: 0.0,
            step: 1.0,
        });
        assert!(spec.check_definition().is_err());
    }

    #[test]
    fn from_parts_pairs_type_with_matching_values() {
        let spec = ValueSpec::from_parts(
            "Slider",
            json!({ "min": 1, "max": 10 }),
        )
        .unwrap();
        assert_eq!(spec.kind(), "Slider");

        let error = ValueSpec::from_parts("ColorPicker", json!([])).unwrap_err();
        assert_eq!(error, "Unknown parameter type: ColorPicker");

        // Values must match the declared type, not just be present.
        assert!(ValueSpec::from_parts("Slider", json!([{"id": "a", "label": "A"}])).is_err());
        assert!(ValueSpec::from_parts("Dropdown", json!({ "min": 0 })).is_err());
    }

    #[test]
    fn generated_ids_carry_collection_prefixes() {
        assert!(new_category_id().starts_with("cat-"));
        assert!(new_parameter_id().starts_with("param-"));
    }
}
