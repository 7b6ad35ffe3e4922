//! Field mapping engine: binds spreadsheet headers to lead fields.
//!
//! Seeding runs the [`MatchStrategy`] passes in [`MatchStrategy::ORDER`].
//! Each pass visits fields in schema declaration order and headers in sheet
//! order; a header bound by an earlier pass or field is not offered again.
//! The synthetic `notes` mapping is always last and may hold several
//! comma-joined columns.

use super::field::LeadFieldDefinition;
use serde::{Deserialize, Serialize};

/// Lead field that aggregates several spreadsheet columns
pub const NOTES_FIELD: &str = "notes";

const NOTES_SEPARATOR: char = ',';

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct FieldMapping {
    pub lead_field: String,
    /// Bound header; comma-joined list for `notes`; empty when unbound
    pub excel_column: String,
    pub is_required: bool,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub default_value: Option<String>,
}

impl FieldMapping {
    fn for_field(field: &LeadFieldDefinition, excel_column: String) -> Self {
        Self {
            lead_field: field.name.clone(),
            excel_column,
            is_required: field.required,
            default_value: field.default_value.clone(),
        }
    }

    fn notes() -> Self {
        Self {
            lead_field: NOTES_FIELD.to_string(),
            excel_column: String::new(),
            is_required: false,
            default_value: None,
        }
    }

    pub fn is_notes(&self) -> bool {
        self.lead_field == NOTES_FIELD
    }

    pub fn is_bound(&self) -> bool {
        !self.excel_column.trim().is_empty()
    }

    /// Source columns in declared order (several only for `notes`)
    pub fn columns(&self) -> Vec<String> {
        if !self.is_notes() {
            return if self.is_bound() {
                vec![self.excel_column.clone()]
            } else {
                Vec::new()
            };
        }
        self.excel_column
            .split(NOTES_SEPARATOR)
            .map(str::trim)
            .filter(|c| !c.is_empty())
            .map(str::to_string)
            .collect()
    }
}

/// Header matcher, evaluated in [`MatchStrategy::ORDER`]
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum MatchStrategy {
    /// Header equals the field's internal name
    ExactName,
    /// Header equals the field's display label
    ExactLabel,
    /// Header contains the name/label or is contained in it
    Substring,
}

impl MatchStrategy {
    pub const ORDER: [MatchStrategy; 3] = [Self::ExactName, Self::ExactLabel, Self::Substring];

    pub fn name(&self) -> &'static str {
        match self {
            Self::ExactName => "exact-name",
            Self::ExactLabel => "exact-label",
            Self::Substring => "substring",
        }
    }

    /// Case-insensitive comparison on trimmed text. Blank headers never match.
    pub fn matches(&self, field: &LeadFieldDefinition, header: &str) -> bool {
        let header = normalize(header);
        if header.is_empty() {
            return false;
        }
        let name = normalize(&field.name);
        let label = normalize(&field.label);

        match self {
            Self::ExactName => header == name,
            Self::ExactLabel => !label.is_empty() && header == label,
            Self::Substring => [name, label]
                .iter()
                .filter(|key| !key.is_empty())
                .any(|key| header.contains(key.as_str()) || key.contains(header.as_str())),
        }
    }
}

fn normalize(text: &str) -> String {
    text.trim().to_lowercase()
}

#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum MappingError {
    #[error("No mapping exists for field `{0}`")]
    UnknownField(String),
    #[error("The mapping for `{0}` cannot be removed")]
    Protected(String),
    #[error("Column `{0}` cannot be added to notes: column names with commas are not supported")]
    InvalidNotesColumn(String),
    #[error("Notes column #{index} does not exist ({len} selected)")]
    NotesIndexOutOfRange { index: usize, len: usize },
    #[error("Please map the required fields: {}", .0.join(", "))]
    MissingRequired(Vec<String>),
}

/// Ordered mapping list. At most one entry per lead field; `notes` is last.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct FieldMappings {
    items: Vec<FieldMapping>,
}

impl FieldMappings {
    /// Build the initial mapping list from the schema and preview headers.
    ///
    /// Deterministic: the same inputs always produce the same list.
    pub fn seed(fields: &[LeadFieldDefinition], headers: &[String]) -> Self {
        let mut candidates: Vec<&LeadFieldDefinition> = Vec::new();
        for field in fields {
            if field.name == NOTES_FIELD || candidates.iter().any(|c| c.name == field.name) {
                continue;
            }
            candidates.push(field);
        }

        let mut bound: Vec<Option<usize>> = vec![None; candidates.len()];
        let mut claimed = vec![false; headers.len()];

        for strategy in MatchStrategy::ORDER {
            for (field_idx, field) in candidates.iter().enumerate() {
                if bound[field_idx].is_some() {
                    continue;
                }
                let hit = headers
                    .iter()
                    .enumerate()
                    .find(|(header_idx, header)| !claimed[*header_idx] && strategy.matches(field, header));

                if let Some((header_idx, header)) = hit {
                    log::debug!(
                        "mapping: `{}` -> `{}` ({})",
                        field.name,
                        header,
                        strategy.name()
                    );
                    bound[field_idx] = Some(header_idx);
                    claimed[header_idx] = true;
                }
            }
        }

        let mut items: Vec<FieldMapping> = candidates
            .iter()
            .zip(bound)
            .filter_map(|(field, header_idx)| match header_idx {
                Some(idx) => Some(FieldMapping::for_field(field, headers[idx].clone())),
                None if field.required => Some(FieldMapping::for_field(field, String::new())),
                None => None,
            })
            .collect();
        items.push(FieldMapping::notes());

        Self { items }
    }

    pub fn as_slice(&self) -> &[FieldMapping] {
        &self.items
    }

    pub fn get(&self, lead_field: &str) -> Option<&FieldMapping> {
        self.items.iter().find(|m| m.lead_field == lead_field)
    }

    fn get_mut(&mut self, lead_field: &str) -> Result<&mut FieldMapping, MappingError> {
        self.items
            .iter_mut()
            .find(|m| m.lead_field == lead_field)
            .ok_or_else(|| MappingError::UnknownField(lead_field.to_string()))
    }

    /// Replace the bound column of a field. For `notes` the value is the
    /// whole comma-joined list.
    pub fn update(&mut self, lead_field: &str, excel_column: &str) -> Result<(), MappingError> {
        let mapping = self.get_mut(lead_field)?;
        mapping.excel_column = excel_column.to_string();
        Ok(())
    }

    pub fn notes_columns(&self) -> Vec<String> {
        self.get(NOTES_FIELD).map(FieldMapping::columns).unwrap_or_default()
    }

    /// Append one source column to `notes`. Adding a column that is already
    /// present changes nothing.
    pub fn add_notes_column(&mut self, column: &str) -> Result<(), MappingError> {
        let column = column.trim();
        if column.is_empty() || column.contains(NOTES_SEPARATOR) {
            return Err(MappingError::InvalidNotesColumn(column.to_string()));
        }

        let mut columns = self.notes_columns();
        if columns.iter().any(|c| c == column) {
            return Ok(());
        }
        columns.push(column.to_string());
        self.set_notes_columns(&columns)
    }

    /// Remove the `index`-th notes column and return it
    pub fn remove_notes_column(&mut self, index: usize) -> Result<String, MappingError> {
        let mut columns = self.notes_columns();
        if index >= columns.len() {
            return Err(MappingError::NotesIndexOutOfRange {
                index,
                len: columns.len(),
            });
        }
        let removed = columns.remove(index);
        self.set_notes_columns(&columns)?;
        Ok(removed)
    }

    fn set_notes_columns(&mut self, columns: &[String]) -> Result<(), MappingError> {
        let joined = columns.join(&NOTES_SEPARATOR.to_string());
        self.update(NOTES_FIELD, &joined)
    }

    /// Add an unbound mapping for the first schema field not yet in the list.
    /// Returns the added field name; `None` when every field is represented.
    pub fn add(&mut self, fields: &[LeadFieldDefinition]) -> Option<String> {
        let field = fields
            .iter()
            .find(|f| f.name != NOTES_FIELD && self.get(&f.name).is_none())?;

        let mapping = FieldMapping::for_field(field, String::new());
        let at = self
            .items
            .iter()
            .position(FieldMapping::is_notes)
            .unwrap_or(self.items.len());
        self.items.insert(at, mapping);
        Some(field.name.clone())
    }

    /// Required mappings and `notes` are never removable
    pub fn can_remove(&self, lead_field: &str) -> bool {
        self.get(lead_field)
            .map(|m| !m.is_required && !m.is_notes())
            .unwrap_or(false)
    }

    pub fn remove(&mut self, lead_field: &str) -> Result<FieldMapping, MappingError> {
        let idx = self
            .items
            .iter()
            .position(|m| m.lead_field == lead_field)
            .ok_or_else(|| MappingError::UnknownField(lead_field.to_string()))?;

        if !self.can_remove(lead_field) {
            return Err(MappingError::Protected(lead_field.to_string()));
        }
        Ok(self.items.remove(idx))
    }

    /// Required fields without a column, in mapping order
    pub fn missing_required(&self) -> Vec<String> {
        self.items
            .iter()
            .filter(|m| m.is_required && !m.is_bound())
            .map(|m| m.lead_field.clone())
            .collect()
    }

    pub fn validate(&self) -> Result<(), MappingError> {
        let missing = self.missing_required();
        if missing.is_empty() {
            Ok(())
        } else {
            Err(MappingError::MissingRequired(missing))
        }
    }

    /// Mappings that carry a column, ready to submit. `notes` columns are
    /// normalized to a trimmed comma-joined list.
    pub fn bound(&self) -> Vec<FieldMapping> {
        self.items
            .iter()
            .filter(|m| m.is_bound())
            .map(|m| {
                let mut m = m.clone();
                if m.is_notes() {
                    m.excel_column = m.columns().join(&NOTES_SEPARATOR.to_string());
                }
                m
            })
            .filter(FieldMapping::is_bound)
            .collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn headers(names: &[&str]) -> Vec<String> {
        names.iter().map(|s| s.to_string()).collect()
    }

    fn crm_schema() -> Vec<LeadFieldDefinition> {
        vec![
            LeadFieldDefinition::new("name", "Full Name", true),
            LeadFieldDefinition::new("email", "Email", true),
            LeadFieldDefinition::new("phone", "Phone", true),
        ]
    }

    fn columns_of(mappings: &FieldMappings) -> Vec<(String, String)> {
        mappings
            .as_slice()
            .iter()
            .map(|m| (m.lead_field.clone(), m.excel_column.clone()))
            .collect()
    }

    #[test]
    fn test_seed_binds_all_fields_and_appends_notes() {
        let mappings = FieldMappings::seed(&crm_schema(), &headers(&["Full Name", "Email", "Phone"]));

        assert_eq!(
            columns_of(&mappings),
            vec![
                ("name".to_string(), "Full Name".to_string()),
                ("email".to_string(), "Email".to_string()),
                ("phone".to_string(), "Phone".to_string()),
                ("notes".to_string(), String::new()),
            ]
        );
        assert!(mappings.validate().is_ok());
    }

    #[test]
    fn test_seed_keeps_unmatched_required_field_empty() {
        let mappings = FieldMappings::seed(&crm_schema(), &headers(&["Full Name", "Email"]));

        let phone = mappings.get("phone").unwrap();
        assert!(phone.is_required);
        assert_eq!(phone.excel_column, "");

        let err = mappings.validate().unwrap_err();
        assert_eq!(err, MappingError::MissingRequired(vec!["phone".to_string()]));
        assert!(err.to_string().contains("phone"));
    }

    #[test]
    fn test_seed_omits_unmatched_optional_fields() {
        let mut fields = crm_schema();
        fields.push(LeadFieldDefinition::new("company", "Company", false));
        let mappings = FieldMappings::seed(&fields, &headers(&["Name", "Email", "Phone"]));

        assert!(mappings.get("company").is_none());
        assert_eq!(mappings.as_slice().len(), 4);
    }

    #[test]
    fn test_seed_is_case_insensitive_and_trims() {
        let mappings = FieldMappings::seed(&crm_schema(), &headers(&["  EMAIL ", "phone", "full name"]));

        assert_eq!(mappings.get("email").unwrap().excel_column, "  EMAIL ");
        assert_eq!(mappings.get("phone").unwrap().excel_column, "phone");
        assert_eq!(mappings.get("name").unwrap().excel_column, "full name");
    }

    #[test]
    fn test_exact_match_beats_earlier_substring_header() {
        let fields = vec![LeadFieldDefinition::new("email", "Email", true)];
        let mappings = FieldMappings::seed(&fields, &headers(&["Secondary Email", "Email"]));

        assert_eq!(mappings.get("email").unwrap().excel_column, "Email");
    }

    #[test]
    fn test_exact_label_pass_runs_before_any_substring_pass() {
        // `name` would grab "Company Name" by substring if it were offered first.
        let fields = vec![
            LeadFieldDefinition::new("name", "Contact", true),
            LeadFieldDefinition::new("company", "Company Name", false),
        ];
        let mappings = FieldMappings::seed(&fields, &headers(&["Company Name", "Contact Name"]));

        assert_eq!(mappings.get("company").unwrap().excel_column, "Company Name");
        assert_eq!(mappings.get("name").unwrap().excel_column, "Contact Name");
    }

    #[test]
    fn test_two_fields_competing_for_one_header_schema_order_wins() {
        let fields = vec![
            LeadFieldDefinition::new("phone", "Phone", true),
            LeadFieldDefinition::new("mobile_phone", "Mobile Phone", false),
        ];
        let mappings = FieldMappings::seed(&fields, &headers(&["Phone Number"]));

        assert_eq!(mappings.get("phone").unwrap().excel_column, "Phone Number");
        assert!(mappings.get("mobile_phone").is_none());
    }

    #[test]
    fn test_blank_headers_never_match() {
        let fields = vec![LeadFieldDefinition::new("name", "Name", true)];
        let mappings = FieldMappings::seed(&fields, &headers(&["", "   "]));

        assert_eq!(mappings.get("name").unwrap().excel_column, "");
    }

    #[test]
    fn test_seed_is_deterministic() {
        let mut fields = crm_schema();
        fields.push(LeadFieldDefinition::new("source", "Lead Source", false));
        let hdrs = headers(&["Source", "Phone", "E-mail", "Name", "Email"]);

        assert_eq!(FieldMappings::seed(&fields, &hdrs), FieldMappings::seed(&fields, &hdrs));
    }

    #[test]
    fn test_schema_notes_field_is_represented_by_synthetic_mapping() {
        let mut fields = crm_schema();
        fields.push(LeadFieldDefinition::new("notes", "Notes", false));
        let mappings = FieldMappings::seed(&fields, &headers(&["Name", "Notes"]));

        let notes: Vec<_> = mappings.as_slice().iter().filter(|m| m.is_notes()).collect();
        assert_eq!(notes.len(), 1);
        assert_eq!(notes[0].excel_column, "");
        assert!(mappings.as_slice().last().unwrap().is_notes());
    }

    #[test]
    fn test_update_replaces_column() {
        let mut mappings = FieldMappings::seed(&crm_schema(), &headers(&["Name", "Email"]));
        mappings.update("phone", "Mobile").unwrap();
        assert_eq!(mappings.get("phone").unwrap().excel_column, "Mobile");

        assert_eq!(
            mappings.update("fax", "Fax"),
            Err(MappingError::UnknownField("fax".to_string()))
        );
    }

    #[test]
    fn test_notes_columns_add_and_remove_by_index() {
        let mut mappings = FieldMappings::seed(&crm_schema(), &headers(&["Name"]));
        mappings.add_notes_column("Comment").unwrap();
        mappings.add_notes_column("Source").unwrap();
        mappings.add_notes_column("Comment").unwrap();
        assert_eq!(mappings.get(NOTES_FIELD).unwrap().excel_column, "Comment,Source");

        assert_eq!(mappings.remove_notes_column(0).unwrap(), "Comment");
        assert_eq!(mappings.notes_columns(), vec!["Source".to_string()]);

        assert_eq!(
            mappings.remove_notes_column(3),
            Err(MappingError::NotesIndexOutOfRange { index: 3, len: 1 })
        );
        assert!(matches!(
            mappings.add_notes_column("City, State"),
            Err(MappingError::InvalidNotesColumn(_))
        ));
    }

    #[test]
    fn test_add_uses_first_unrepresented_field_and_keeps_notes_last() {
        let mut fields = crm_schema();
        fields.push(LeadFieldDefinition::new("company", "Company", false));
        fields.push(LeadFieldDefinition::new("city", "City", false));
        let mut mappings = FieldMappings::seed(&fields, &headers(&["Name", "Email", "Phone"]));

        assert_eq!(mappings.add(&fields).as_deref(), Some("company"));
        assert_eq!(mappings.add(&fields).as_deref(), Some("city"));
        let order: Vec<_> = mappings.as_slice().iter().map(|m| m.lead_field.as_str()).collect();
        assert_eq!(order, vec!["name", "email", "phone", "company", "city", "notes"]);
    }

    #[test]
    fn test_add_is_noop_when_every_field_is_mapped() {
        let fields = crm_schema();
        let mut mappings = FieldMappings::seed(&fields, &headers(&["Name", "Email", "Phone"]));
        let before = mappings.as_slice().len();

        assert_eq!(mappings.add(&fields), None);
        assert_eq!(mappings.as_slice().len(), before);
    }

    #[test]
    fn test_remove_refuses_required_and_notes() {
        let mut fields = crm_schema();
        fields.push(LeadFieldDefinition::new("company", "Company", false));
        let mut mappings = FieldMappings::seed(&fields, &headers(&["Name", "Email", "Phone", "Company"]));

        assert_eq!(mappings.remove("email"), Err(MappingError::Protected("email".to_string())));
        assert_eq!(mappings.remove(NOTES_FIELD), Err(MappingError::Protected("notes".to_string())));
        assert!(!mappings.can_remove("email"));
        assert!(!mappings.can_remove(NOTES_FIELD));

        assert!(mappings.can_remove("company"));
        assert_eq!(mappings.remove("company").unwrap().excel_column, "Company");
        assert!(mappings.get("company").is_none());
        assert_eq!(mappings.as_slice().len(), 4);
    }

    #[test]
    fn test_validation_names_every_missing_field_in_one_error() {
        let mappings = FieldMappings::seed(&crm_schema(), &headers(&["Full Name"]));
        let err = mappings.validate().unwrap_err();

        assert_eq!(
            err,
            MappingError::MissingRequired(vec!["email".to_string(), "phone".to_string()])
        );
        assert_eq!(err.to_string(), "Please map the required fields: email, phone");
    }

    #[test]
    fn test_bound_drops_empty_mappings_and_normalizes_notes() {
        let mut fields = crm_schema();
        fields.push(LeadFieldDefinition::new("company", "Company", false));
        let mut mappings = FieldMappings::seed(&fields, &headers(&["Name", "Email"]));
        mappings.update(NOTES_FIELD, " Comment ,, Source ").unwrap();
        mappings.add(&fields);

        let bound = mappings.bound();
        let fields: Vec<_> = bound.iter().map(|m| m.lead_field.as_str()).collect();
        assert_eq!(fields, vec!["name", "email", "notes"]);
        assert_eq!(bound[2].excel_column, "Comment,Source");
    }

    #[test]
    fn test_serializes_as_camel_case_array() {
        let mappings = FieldMappings::seed(&crm_schema(), &headers(&["Email"]));
        let json = serde_json::to_value(mappings.bound()).unwrap();
        assert_eq!(
            json,
            serde_json::json!([{ "leadField": "email", "excelColumn": "Email", "isRequired": true }])
        );
    }
}
