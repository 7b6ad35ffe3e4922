use serde::{Deserialize, Serialize};

/// Lead field declared by the backend import schema
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct LeadFieldDefinition {
    /// Internal field name (e.g. "email")
    pub name: String,
    /// Display label (e.g. "Email Address")
    pub label: String,
    #[serde(rename = "type", default)]
    pub field_type: LeadFieldType,
    #[serde(default)]
    pub required: bool,
    #[serde(default)]
    pub description: String,
    /// Allowed values for `select` fields
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub options: Option<Vec<String>>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub default_value: Option<String>,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum LeadFieldType {
    #[default]
    Text,
    Email,
    Phone,
    Number,
    Date,
    Select,
    #[serde(other)]
    Other,
}

impl LeadFieldDefinition {
    pub fn new(name: impl Into<String>, label: impl Into<String>, required: bool) -> Self {
        Self {
            name: name.into(),
            label: label.into(),
            field_type: LeadFieldType::Text,
            required,
            description: String::new(),
            options: None,
            default_value: None,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_parses_schema_entry() {
        let field: LeadFieldDefinition = serde_json::from_value(json!({
            "name": "source",
            "label": "Lead Source",
            "type": "select",
            "required": false,
            "description": "Where the lead came from",
            "options": ["web", "referral"],
            "defaultValue": "web"
        }))
        .unwrap();
        assert_eq!(field.field_type, LeadFieldType::Select);
        assert_eq!(field.options.as_deref(), Some(&["web".to_string(), "referral".to_string()][..]));
        assert_eq!(field.default_value.as_deref(), Some("web"));
    }

    #[test]
    fn test_unknown_type_falls_back() {
        let field: LeadFieldDefinition = serde_json::from_value(json!({
            "name": "budget", "label": "Budget", "type": "currency"
        }))
        .unwrap();
        assert_eq!(field.field_type, LeadFieldType::Other);
        assert!(!field.required);
    }
}
