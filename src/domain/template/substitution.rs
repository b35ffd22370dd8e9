//! Variable substitution engine for templates

use serde_json::Value;

use super::renderer::TemplateVariables;
use super::types::{TemplateError, TemplateResult};

/// Replace `{{variable}}` placeholders in `template`.
///
/// Placeholder names may contain surrounding whitespace and dotted paths
/// into nested objects (`{{user.name}}`). A placeholder with no matching
/// variable is an error.
pub fn substitute_variables(template: &str, variables: &TemplateVariables) -> TemplateResult<String> {
    let mut output = String::with_capacity(template.len());
    let mut rest = template;

    while let Some(start) = rest.find("{{") {
        output.push_str(&rest[..start]);
        let after_open = &rest[start + 2..];

        let end = after_open.find("}}").ok_or_else(|| {
            TemplateError::SubstitutionFailed("Unclosed placeholder".to_string())
        })?;

        let name = after_open[..end].trim();
        if name.is_empty() {
            return Err(TemplateError::SubstitutionFailed(
                "Empty placeholder".to_string(),
            ));
        }

        let value = lookup(variables, name).ok_or_else(|| {
            TemplateError::SubstitutionFailed(format!("Missing variable: {}", name))
        })?;
        output.push_str(&value_to_string(value));

        rest = &after_open[end + 2..];
    }

    output.push_str(rest);
    Ok(output)
}

fn lookup<'a>(variables: &'a TemplateVariables, path: &str) -> Option<&'a Value> {
    let mut segments = path.split('.');
    let mut current = variables.get(segments.next()?)?;
    for segment in segments {
        current = current.as_object()?.get(segment)?;
    }
    Some(current)
}

fn value_to_string(value: &Value) -> String {
    match value {
        Value::String(s) => s.clone(),
        Value::Number(n) => n.to_string(),
        Value::Bool(b) => b.to_string(),
        Value::Null => String::new(),
        // For arrays and objects, use JSON representation
        _ => value.to_string(),
    }
}
