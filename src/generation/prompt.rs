use indexmap::IndexMap;
use serde_json::Value;

use super::display_value;

/// Name-keyed view of a validated submission: category name -> parameter
/// name -> submitted value, in submission order.
pub type ResolvedParameters = IndexMap<String, IndexMap<String, Value>>;

const DEFAULT_STORY_WORDS: f64 = 1000.0;

/// Target word count comes from any numeric parameter whose name contains
/// "length" (case-insensitive); the last such value wins.
fn detect_story_length(parameters: &ResolvedParameters) -> Option<f64> {
    let mut length = None;
    for selections in parameters.values() {
        for (name, value) in selections {
            if !name.to_lowercase().contains("length") {
                continue;
            }
            if let Value::Number(n) = value {
                length = n.as_f64();
            }
        }
    }
    length
}

fn render_bullet(value: &Value) -> String {
    match value {
        Value::Bool(true) => "Yes".to_string(),
        Value::Bool(false) => "No".to_string(),
        other => display_value(other),
    }
}

/// Markdown prompt for text generation: a parameter listing grouped by
/// category, then a fixed closing instruction with the target word count.
pub fn format_fiction_prompt(parameters: &ResolvedParameters) -> String {
    let story_length = detect_story_length(parameters).unwrap_or(DEFAULT_STORY_WORDS);

    let mut prompt = String::from("# Story Parameters\n\n");
    for (category_name, selections) in parameters {
        prompt.push_str(&format!("## {}\n\n", category_name));
        for (parameter_name, value) in selections {
            prompt.push_str(&format!("- **{}**: {}\n", parameter_name, render_bullet(value)));
        }
        prompt.push('\n');
    }

    prompt.push_str("# Instructions\n\n");
    prompt.push_str(
        "Please create a compelling and imaginative story that incorporates all the elements above. ",
    );
    prompt.push_str(&format!(
        "The story should be approximately {} words in length. ",
        story_length
    ));
    prompt.push_str("Focus on creating an engaging narrative with a clear beginning, middle, and end. ");
    prompt.push_str("Be creative and develop the story elements that best fit these parameters.");
    prompt
}

/// One descriptor line per category for image generation. True toggles
/// contribute just their parameter name; false toggles are omitted.
pub fn format_image_prompt(parameters: &ResolvedParameters) -> String {
    let mut prompt =
        String::from("Create a detailed, visually striking image with the following elements:\n\n");

    for (category_name, selections) in parameters {
        let mut descriptors = Vec::new();
        for (parameter_name, value) in selections {
            match value {
                Value::Bool(true) => descriptors.push(parameter_name.clone()),
                Value::Bool(false) => {}
                other => descriptors.push(format!("{}: {}", parameter_name, display_value(other))),
            }
        }
        prompt.push_str(&format!("{}: {}.\n", category_name, descriptors.join(", ")));
    }

    prompt.push_str(
        "\nUse high-quality, photorealistic rendering with attention to lighting, detail, and composition. The image should be visually cohesive and striking.",
    );
    prompt
}
