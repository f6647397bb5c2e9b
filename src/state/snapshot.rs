//! Serializable snapshots of the form aggregate.
//!
//! The same camelCase shape serves both the durable progress snapshot
//! (attachments nulled) and the `formDataJson` wire field of a submission
//! (attachments replaced by their file names). Binary content never crosses
//! either boundary.

use super::aggregate::{FormAggregate, OriginCriteria};
use super::material::{certificate_required_for, AttachmentHandle, InputMaterial};
use serde::{Deserialize, Serialize};

/// One input material with its attachments reduced to file names (or null).
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct MaterialSnapshot {
    pub description: String,
    pub hs_code: String,
    pub country_of_origin: String,
    pub invoice_no: String,
    pub purchase_date: String,
    #[serde(rename = "valueUSD")]
    pub value_usd: String,
    pub percentage_final_value: String,
    pub certificate_required: bool,
    pub certificate_file: Option<String>,
    pub invoice_file: Option<String>,
}

impl MaterialSnapshot {
    fn of(material: &InputMaterial, keep_names: bool) -> Self {
        let name_of = |file: &Option<AttachmentHandle>| {
            if keep_names {
                file.as_ref().map(|h| h.file_name.clone())
            } else {
                None
            }
        };
        Self {
            description: material.description.clone(),
            hs_code: material.hs_code.clone(),
            country_of_origin: material.country_of_origin.clone(),
            invoice_no: material.invoice_no.clone(),
            purchase_date: material.purchase_date.clone(),
            value_usd: material.value_usd.clone(),
            percentage_final_value: material.percentage_final_value.clone(),
            certificate_required: material.certificate_required,
            certificate_file: name_of(&material.certificate_file),
            invoice_file: name_of(&material.invoice_file),
        }
    }
}

/// The full aggregate in its serialized form. Every field defaults, so
/// snapshots written by an older, narrower schema still deserialize and are
/// merged onto current defaults.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct FormSnapshot {
    pub company_name: String,
    pub physical_address: String,
    pub city_state: String,
    pub postal_code: String,
    pub tin_number: String,
    pub contact_person: String,
    pub phone_number: String,
    pub email_address: String,
    pub application_date: String,

    pub origin_criteria: OriginCriteria,
    pub procedure_description: String,

    pub product_description: String,
    pub brand_name: String,
    pub hs_code: String,
    pub country_of_export: String,
    pub destination_country: String,
    pub commercial_invoice_no: String,
    pub invoice_date: String,
    pub ex_factory_price: String,
    pub fob_value: String,
    pub quantity_unit: String,
    pub packaging_type: String,

    pub input_materials: Vec<MaterialSnapshot>,

    pub manufacturing_process: String,

    pub declarant_name: String,
    pub signature_name: String,
    pub signature_position: String,
    pub signature_date: String,
}

impl FormSnapshot {
    /// Snapshot for the persistence boundary: every attachment handle is
    /// replaced by null, since handles are not durable.
    pub fn stripped(form: &FormAggregate) -> Self {
        Self::of(form, false)
    }

    /// Snapshot for the submission JSON: attachments carry their original
    /// file names only; the binary parts travel separately.
    pub fn with_attachment_names(form: &FormAggregate) -> Self {
        Self::of(form, true)
    }

    fn of(form: &FormAggregate, keep_names: bool) -> Self {
        Self {
            company_name: form.company_name.clone(),
            physical_address: form.physical_address.clone(),
            city_state: form.city_state.clone(),
            postal_code: form.postal_code.clone(),
            tin_number: form.tin_number.clone(),
            contact_person: form.contact_person.clone(),
            phone_number: form.phone_number.clone(),
            email_address: form.email_address.clone(),
            application_date: form.application_date.clone(),
            origin_criteria: form.origin_criteria,
            procedure_description: form.procedure_description.clone(),
            product_description: form.product_description.clone(),
            brand_name: form.brand_name.clone(),
            hs_code: form.hs_code.clone(),
            country_of_export: form.country_of_export.clone(),
            destination_country: form.destination_country.clone(),
            commercial_invoice_no: form.commercial_invoice_no.clone(),
            invoice_date: form.invoice_date.clone(),
            ex_factory_price: form.ex_factory_price.clone(),
            fob_value: form.fob_value.clone(),
            quantity_unit: form.quantity_unit.clone(),
            packaging_type: form.packaging_type.clone(),
            input_materials: form
                .input_materials
                .iter()
                .map(|m| MaterialSnapshot::of(m, keep_names))
                .collect(),
            manufacturing_process: form.manufacturing_process.clone(),
            declarant_name: form.declarant_name.clone(),
            signature_name: form.signature_name.clone(),
            signature_position: form.signature_position.clone(),
            signature_date: form.signature_date.clone(),
        }
    }

    /// Rebuild an aggregate from a loaded snapshot. Attachment handles come
    /// back unset, the certificate flag is re-derived from the stored
    /// country, and an empty material list is re-seeded so index 0 exists.
    pub fn into_aggregate(self) -> FormAggregate {
        let mut input_materials: Vec<InputMaterial> = self
            .input_materials
            .into_iter()
            .map(|m| InputMaterial {
                certificate_required: certificate_required_for(&m.country_of_origin),
                description: m.description,
                hs_code: m.hs_code,
                country_of_origin: m.country_of_origin,
                invoice_no: m.invoice_no,
                purchase_date: m.purchase_date,
                value_usd: m.value_usd,
                percentage_final_value: m.percentage_final_value,
                certificate_file: None,
                invoice_file: None,
            })
            .collect();
        if input_materials.is_empty() {
            input_materials.push(InputMaterial::default());
        }

        FormAggregate {
            company_name: self.company_name,
            physical_address: self.physical_address,
            city_state: self.city_state,
            postal_code: self.postal_code,
            tin_number: self.tin_number,
            contact_person: self.contact_person,
            phone_number: self.phone_number,
            email_address: self.email_address,
            application_date: self.application_date,
            origin_criteria: self.origin_criteria,
            procedure_description: self.procedure_description,
            product_description: self.product_description,
            brand_name: self.brand_name,
            hs_code: self.hs_code,
            country_of_export: self.country_of_export,
            destination_country: self.destination_country,
            commercial_invoice_no: self.commercial_invoice_no,
            invoice_date: self.invoice_date,
            ex_factory_price: self.ex_factory_price,
            fob_value: self.fob_value,
            quantity_unit: self.quantity_unit,
            packaging_type: self.packaging_type,
            input_materials,
            manufacturing_process: self.manufacturing_process,
            declarant_name: self.declarant_name,
            signature_name: self.signature_name,
            signature_position: self.signature_position,
            signature_date: self.signature_date,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::state::material::{AttachmentHandle, AttachmentSlot};

    fn populated_form() -> FormAggregate {
        let mut form = FormAggregate::default();
        form.company_name = "Acme Exports Ltd".to_string();
        form.email_address = "exports@acme.ng".to_string();
        form.origin_criteria = OriginCriteria::WhollyObtained;
        form.product_description = "Dried hibiscus".to_string();
        form.set_country_of_origin(0, "Ghana");
        form.update_material_at(
            0,
            crate::state::material::MaterialPatch {
                description: Some("Raw Hibiscus Flowers".to_string()),
                value_usd: Some("150.75".to_string()),
                ..Default::default()
            },
        );
        form
    }

    mod stripped {
        use super::*;
        use pretty_assertions::assert_eq;

        #[test]
        fn test_round_trip_reproduces_scalars_and_unsets_handles() {
            let mut form = populated_form();
            form.attach_file(
                0,
                AttachmentSlot::Certificate,
                Some(AttachmentHandle::from_path("/tmp/cert.pdf")),
            );
            form.attach_file(
                0,
                AttachmentSlot::Invoice,
                Some(AttachmentHandle::from_path("/tmp/inv.png")),
            );

            let json = serde_json::to_string(&FormSnapshot::stripped(&form)).unwrap();
            let restored: FormSnapshot = serde_json::from_str(&json).unwrap();
            let restored = restored.into_aggregate();

            let mut expected = form.clone();
            expected.attach_file(0, AttachmentSlot::Certificate, None);
            expected.attach_file(0, AttachmentSlot::Invoice, None);
            assert_eq!(restored, expected);
        }

        #[test]
        fn test_stripped_snapshot_has_null_attachments() {
            let mut form = populated_form();
            form.attach_file(
                0,
                AttachmentSlot::Certificate,
                Some(AttachmentHandle::from_path("/tmp/cert.pdf")),
            );
            let value =
                serde_json::to_value(FormSnapshot::stripped(&form)).unwrap();
            assert_eq!(
                value["inputMaterials"][0]["certificateFile"],
                serde_json::Value::Null
            );
        }
    }

    mod wire {
        use super::*;
        use pretty_assertions::assert_eq;

        #[test]
        fn test_attachment_names_survive() {
            let mut form = populated_form();
            form.attach_file(
                0,
                AttachmentSlot::Invoice,
                Some(AttachmentHandle::from_path("/tmp/docs/invoice-001.pdf")),
            );
            let value =
                serde_json::to_value(FormSnapshot::with_attachment_names(&form)).unwrap();
            assert_eq!(value["inputMaterials"][0]["invoiceFile"], "invoice-001.pdf");
            assert_eq!(
                value["inputMaterials"][0]["certificateFile"],
                serde_json::Value::Null
            );
        }

        #[test]
        fn test_camel_case_field_names() {
            let value = serde_json::to_value(FormSnapshot::stripped(&populated_form())).unwrap();
            assert!(value.get("companyName").is_some());
            assert!(value.get("tinNumber").is_some());
            assert_eq!(value["originCriteria"], "wholly-obtained");
            assert!(value["inputMaterials"][0].get("valueUSD").is_some());
            assert!(value["inputMaterials"][0].get("hsCode").is_some());
        }
    }

    mod restore {
        use super::*;
        use pretty_assertions::assert_eq;

        #[test]
        fn test_older_narrower_schema_merges_onto_defaults() {
            // A payload predating most of the current field set
            let json = r#"{"companyName": "Old Save", "unknownField": 1}"#;
            let snapshot: FormSnapshot = serde_json::from_str(json).unwrap();
            let form = snapshot.into_aggregate();
            assert_eq!(form.company_name, "Old Save");
            assert_eq!(form.postal_code, "");
            assert_eq!(form.origin_criteria, OriginCriteria::Unset);
            assert_eq!(form.input_materials.len(), 1);
        }

        #[test]
        fn test_certificate_flag_rederived_from_country() {
            let json = r#"{"inputMaterials": [{"countryOfOrigin": "Ghana", "certificateRequired": false}]}"#;
            let snapshot: FormSnapshot = serde_json::from_str(json).unwrap();
            let form = snapshot.into_aggregate();
            assert!(form.input_materials[0].certificate_required);
        }
    }
}
