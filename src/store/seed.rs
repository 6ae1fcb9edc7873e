use crate::error::AppError;

use super::json_store::JsonStore;
use super::schema::{
    Category, CategoryVisibility, ChoiceOption, Parameter, ParameterVisibility, SliderRange,
    StoreDocument, ToggleLabels, ValueSpec, new_category_id, new_parameter_id,
};

fn choices(pairs: &[(&str, &str)]) -> Vec<ChoiceOption> {
    pairs
        .iter()
        .map(|(id, label)| ChoiceOption {
            id: (*id).to_string(),
            label: (*label).to_string(),
        })
        .collect()
}

fn parameter(name: &str, category_id: &str, spec: ValueSpec) -> Parameter {
    Parameter {
        id: new_parameter_id(),
        name: name.to_string(),
        visibility: ParameterVisibility::Basic,
        category_id: category_id.to_string(),
        spec,
    }
}

/// Overwrite the store with the sample categories and parameters used for
/// demos and local development. Covers every parameter type.
pub fn seed(store: &JsonStore) -> Result<(), AppError> {
    let sci_fi = Category {
        id: new_category_id(),
        name: "Science Fiction".to_string(),
        visibility: CategoryVisibility::Show,
    };
    let fantasy = Category {
        id: new_category_id(),
        name: "Fantasy".to_string(),
        visibility: CategoryVisibility::Show,
    };
    let dystopian = Category {
        id: new_category_id(),
        name: "Dystopian Future".to_string(),
        visibility: CategoryVisibility::Show,
    };

    let parameters = vec![
        parameter(
            "Technology Level",
            &sci_fi.id,
            ValueSpec::Dropdown(choices(&[
                ("tech-1", "Near Future"),
                ("tech-2", "Advanced"),
                ("tech-3", "Post-Singularity"),
            ])),
        ),
        parameter(
            "Alien Life",
            &sci_fi.id,
            ValueSpec::ToggleSwitch(ToggleLabels {
                on: "Present".to_string(),
                off: "Absent".to_string(),
            }),
        ),
        parameter(
            "Story Length",
            &sci_fi.id,
            ValueSpec::Slider(SliderRange {
                min: 500.0,
                max: 5000.0,
                step: 100.0,
            }),
        ),
        parameter(
            "Magic System",
            &fantasy.id,
            ValueSpec::Dropdown(choices(&[
                ("magic-1", "Elemental"),
                ("magic-2", "Divine"),
                ("magic-3", "Wild"),
            ])),
        ),
        parameter(
            "Mythical Creatures",
            &fantasy.id,
            ValueSpec::Checkbox(choices(&[
                ("creature-1", "Dragons"),
                ("creature-2", "Elves"),
                ("creature-3", "Giants"),
                ("creature-4", "Spirits"),
            ])),
        ),
        parameter(
            "Setting",
            &fantasy.id,
            ValueSpec::RadioButtons(choices(&[
                ("setting-1", "Medieval Kingdom"),
                ("setting-2", "Floating Isles"),
                ("setting-3", "Underworld"),
            ])),
        ),
        parameter(
            "Society Type",
            &dystopian.id,
            ValueSpec::Dropdown(choices(&[
                ("society-1", "Totalitarian State"),
                ("society-2", "Corporate Oligarchy"),
                ("society-3", "Post-Collapse Tribes"),
            ])),
        ),
        parameter(
            "Survival Difficulty",
            &dystopian.id,
            ValueSpec::Slider(SliderRange {
                min: 1.0,
                max: 10.0,
                step: 1.0,
            }),
        ),
        parameter(
            "Hope Level",
            &dystopian.id,
            ValueSpec::RadioButtons(choices(&[
                ("hope-1", "Bleak"),
                ("hope-2", "Flickering"),
                ("hope-3", "Defiant"),
            ])),
        ),
    ];

    let document = StoreDocument {
        categories: vec![sci_fi, fantasy, dystopian],
        parameters,
    };
    store.replace(&document)
}
