//! Pre-submission validation of the form aggregate.
//!
//! Presence checks only, walked in the section order of the paper form. The
//! first violated rule is returned; the UI shows one section to fix at a
//! time.

use crate::state::{FormAggregate, OriginCriteria};
use thiserror::Error;

/// The first incomplete section, with the message shown to the user.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Error)]
pub enum ValidationError {
    #[error("Please complete all required fields in the Exporter Details section.")]
    ExporterDetails,
    #[error("Please select an Origin Criteria.")]
    OriginCriteria,
    #[error("Please complete all required fields in the Final Product Details section.")]
    ProductDetails,
    #[error("Please provide at least one input material with all required fields.")]
    InputMaterial,
    #[error("Please complete the Declaration section.")]
    Declaration,
}

/// Check the aggregate against the mandatory-field rules, short-circuiting
/// on the first failure. Pure; never touches storage or the network.
pub fn validate(form: &FormAggregate) -> Result<(), ValidationError> {
    if form.company_name.is_empty()
        || form.physical_address.is_empty()
        || form.tin_number.is_empty()
        || form.email_address.is_empty()
    {
        return Err(ValidationError::ExporterDetails);
    }

    if form.origin_criteria == OriginCriteria::Unset {
        return Err(ValidationError::OriginCriteria);
    }

    if form.product_description.is_empty()
        || form.hs_code.is_empty()
        || form.country_of_export.is_empty()
    {
        return Err(ValidationError::ProductDetails);
    }

    // Only the seeded first material is mandatory
    let first = &form.input_materials[0];
    if first.description.is_empty()
        || first.hs_code.is_empty()
        || first.country_of_origin.is_empty()
    {
        return Err(ValidationError::InputMaterial);
    }

    if form.declarant_name.is_empty()
        || form.signature_name.is_empty()
        || form.signature_position.is_empty()
    {
        return Err(ValidationError::Declaration);
    }

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::state::{FormPatch, MaterialPatch};

    fn complete_form() -> FormAggregate {
        let mut form = FormAggregate::default();
        form.update_fields(FormPatch {
            company_name: Some("Acme".to_string()),
            physical_address: Some("1 Rd".to_string()),
            tin_number: Some("123".to_string()),
            email_address: Some("a@b.com".to_string()),
            origin_criteria: Some(OriginCriteria::WhollyObtained),
            product_description: Some("Widget".to_string()),
            hs_code: Some("1234567890".to_string()),
            country_of_export: Some("Nigeria".to_string()),
            declarant_name: Some("Ada Obi".to_string()),
            signature_name: Some("Ada Obi".to_string()),
            signature_position: Some("Export Manager".to_string()),
            ..Default::default()
        });
        form.update_material_at(
            0,
            MaterialPatch {
                description: Some("Steel rod".to_string()),
                hs_code: Some("7215.90".to_string()),
                invoice_no: Some("INV-2023-001".to_string()),
                value_usd: Some("150.75".to_string()),
                ..Default::default()
            },
        );
        form.set_country_of_origin(0, "Ghana");
        form
    }

    #[test]
    fn test_complete_form_is_valid() {
        assert_eq!(validate(&complete_form()), Ok(()));
    }

    #[test]
    fn test_empty_form_fails_on_exporter_details_first() {
        assert_eq!(
            validate(&FormAggregate::default()),
            Err(ValidationError::ExporterDetails)
        );
    }

    #[test]
    fn test_exporter_reason_wins_over_product_reason() {
        let mut form = complete_form();
        form.update_fields(FormPatch {
            company_name: Some(String::new()),
            hs_code: Some(String::new()),
            ..Default::default()
        });
        assert_eq!(validate(&form), Err(ValidationError::ExporterDetails));
    }

    #[test]
    fn test_unset_criteria_is_second_rule() {
        let mut form = complete_form();
        form.update_fields(FormPatch {
            origin_criteria: Some(OriginCriteria::Unset),
            ..Default::default()
        });
        assert_eq!(validate(&form), Err(ValidationError::OriginCriteria));
    }

    #[test]
    fn test_product_details_rule() {
        let mut form = complete_form();
        form.update_fields(FormPatch {
            country_of_export: Some(String::new()),
            ..Default::default()
        });
        assert_eq!(validate(&form), Err(ValidationError::ProductDetails));
    }

    #[test]
    fn test_first_material_rule() {
        let mut form = complete_form();
        form.update_material_at(
            0,
            MaterialPatch {
                hs_code: Some(String::new()),
                ..Default::default()
            },
        );
        assert_eq!(validate(&form), Err(ValidationError::InputMaterial));
    }

    #[test]
    fn test_later_materials_are_not_mandatory() {
        let mut form = complete_form();
        form.append_material();
        assert_eq!(validate(&form), Ok(()));
    }

    #[test]
    fn test_declaration_rule_is_last() {
        let mut form = complete_form();
        form.update_fields(FormPatch {
            signature_position: Some(String::new()),
            ..Default::default()
        });
        assert_eq!(validate(&form), Err(ValidationError::Declaration));
    }

    #[test]
    fn test_messages_match_the_form_sections() {
        assert_eq!(
            ValidationError::OriginCriteria.to_string(),
            "Please select an Origin Criteria."
        );
    }
}
