use crate::domain::{
    entities::{ProjectStructure, Template, TemplateRecord},
    error::DomainError,
};

/// Validation entry points used at the layer boundaries (store insert,
/// before writing).
pub struct DomainValidator;

impl DomainValidator {
    pub fn validate_template(template: &Template) -> Result<(), DomainError> {
        template.validate()
    }

    pub fn validate_template_record(record: &TemplateRecord) -> Result<(), DomainError> {
        record.validate()
    }

    pub fn validate_project_structure(structure: &ProjectStructure) -> Result<(), DomainError> {
        structure.validate()
    }
}
