//! Field enumeration for the two form pages.
//!
//! Key routing in the app and rendering in the UI both consume the ordered
//! field lists built here, so navigation and drawing cannot disagree about
//! what lives at a given focus index.

use super::aggregate::{FormAggregate, FormPatch, OriginCriteria};
use super::material::{AttachmentSlot, InputMaterial, MaterialPatch};

/// Every scalar text field of the aggregate.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ScalarField {
    CompanyName,
    PhysicalAddress,
    CityState,
    PostalCode,
    TinNumber,
    ContactPerson,
    PhoneNumber,
    EmailAddress,
    ApplicationDate,
    ProcedureDescription,
    ProductDescription,
    BrandName,
    HsCode,
    CountryOfExport,
    DestinationCountry,
    CommercialInvoiceNo,
    InvoiceDate,
    ExFactoryPrice,
    FobValue,
    QuantityUnit,
    PackagingType,
    ManufacturingProcess,
    DeclarantName,
    SignatureName,
    SignaturePosition,
    SignatureDate,
}

impl ScalarField {
    /// Label as printed on the paper form.
    pub fn label(self) -> &'static str {
        match self {
            ScalarField::CompanyName => "Company Name",
            ScalarField::PhysicalAddress => "Physical Address",
            ScalarField::CityState => "City/State",
            ScalarField::PostalCode => "Postal Code",
            ScalarField::TinNumber => "TIN Number",
            ScalarField::ContactPerson => "Contact Person",
            ScalarField::PhoneNumber => "Phone Number",
            ScalarField::EmailAddress => "Email Address",
            ScalarField::ApplicationDate => "Application Date",
            ScalarField::ProcedureDescription => "Specific Procedure Description",
            ScalarField::ProductDescription => "Product Description",
            ScalarField::BrandName => "Brand Name (if applicable)",
            ScalarField::HsCode => "HS Code (10-digit)",
            ScalarField::CountryOfExport => "Country of Export",
            ScalarField::DestinationCountry => "Destination Country",
            ScalarField::CommercialInvoiceNo => "Commercial Invoice No.",
            ScalarField::InvoiceDate => "Invoice Date",
            ScalarField::ExFactoryPrice => "Ex-Factory Price (USD)",
            ScalarField::FobValue => "FOB Value (USD)",
            ScalarField::QuantityUnit => "Quantity & Unit",
            ScalarField::PackagingType => "Packaging Type",
            ScalarField::ManufacturingProcess => "Manufacturing Process Summary",
            ScalarField::DeclarantName => "Declarant Name",
            ScalarField::SignatureName => "Signature Name",
            ScalarField::SignaturePosition => "Signature Position",
            ScalarField::SignatureDate => "Signature Date",
        }
    }

    /// Free-text fields rendered taller and accepting newlines.
    pub fn is_multiline(self) -> bool {
        matches!(
            self,
            ScalarField::ProcedureDescription | ScalarField::ManufacturingProcess
        )
    }

    pub fn get(self, form: &FormAggregate) -> &str {
        match self {
            ScalarField::CompanyName => &form.company_name,
            ScalarField::PhysicalAddress => &form.physical_address,
            ScalarField::CityState => &form.city_state,
            ScalarField::PostalCode => &form.postal_code,
            ScalarField::TinNumber => &form.tin_number,
            ScalarField::ContactPerson => &form.contact_person,
            ScalarField::PhoneNumber => &form.phone_number,
            ScalarField::EmailAddress => &form.email_address,
            ScalarField::ApplicationDate => &form.application_date,
            ScalarField::ProcedureDescription => &form.procedure_description,
            ScalarField::ProductDescription => &form.product_description,
            ScalarField::BrandName => &form.brand_name,
            ScalarField::HsCode => &form.hs_code,
            ScalarField::CountryOfExport => &form.country_of_export,
            ScalarField::DestinationCountry => &form.destination_country,
            ScalarField::CommercialInvoiceNo => &form.commercial_invoice_no,
            ScalarField::InvoiceDate => &form.invoice_date,
            ScalarField::ExFactoryPrice => &form.ex_factory_price,
            ScalarField::FobValue => &form.fob_value,
            ScalarField::QuantityUnit => &form.quantity_unit,
            ScalarField::PackagingType => &form.packaging_type,
            ScalarField::ManufacturingProcess => &form.manufacturing_process,
            ScalarField::DeclarantName => &form.declarant_name,
            ScalarField::SignatureName => &form.signature_name,
            ScalarField::SignaturePosition => &form.signature_position,
            ScalarField::SignatureDate => &form.signature_date,
        }
    }

    /// A patch writing `value` to just this field.
    pub fn patch(self, value: String) -> FormPatch {
        let mut patch = FormPatch::default();
        match self {
            ScalarField::CompanyName => patch.company_name = Some(value),
            ScalarField::PhysicalAddress => patch.physical_address = Some(value),
            ScalarField::CityState => patch.city_state = Some(value),
            ScalarField::PostalCode => patch.postal_code = Some(value),
            ScalarField::TinNumber => patch.tin_number = Some(value),
            ScalarField::ContactPerson => patch.contact_person = Some(value),
            ScalarField::PhoneNumber => patch.phone_number = Some(value),
            ScalarField::EmailAddress => patch.email_address = Some(value),
            ScalarField::ApplicationDate => patch.application_date = Some(value),
            ScalarField::ProcedureDescription => patch.procedure_description = Some(value),
            ScalarField::ProductDescription => patch.product_description = Some(value),
            ScalarField::BrandName => patch.brand_name = Some(value),
            ScalarField::HsCode => patch.hs_code = Some(value),
            ScalarField::CountryOfExport => patch.country_of_export = Some(value),
            ScalarField::DestinationCountry => patch.destination_country = Some(value),
            ScalarField::CommercialInvoiceNo => patch.commercial_invoice_no = Some(value),
            ScalarField::InvoiceDate => patch.invoice_date = Some(value),
            ScalarField::ExFactoryPrice => patch.ex_factory_price = Some(value),
            ScalarField::FobValue => patch.fob_value = Some(value),
            ScalarField::QuantityUnit => patch.quantity_unit = Some(value),
            ScalarField::PackagingType => patch.packaging_type = Some(value),
            ScalarField::ManufacturingProcess => patch.manufacturing_process = Some(value),
            ScalarField::DeclarantName => patch.declarant_name = Some(value),
            ScalarField::SignatureName => patch.signature_name = Some(value),
            ScalarField::SignaturePosition => patch.signature_position = Some(value),
            ScalarField::SignatureDate => patch.signature_date = Some(value),
        }
        patch
    }
}

/// Text fields of an input material row.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum MaterialTextField {
    Description,
    HsCode,
    ValueUsd,
    InvoiceNo,
    PurchaseDate,
    PercentageFinalValue,
}

impl MaterialTextField {
    pub fn label(self, ordinal: usize) -> String {
        match self {
            MaterialTextField::Description => format!("Input Material {ordinal} Description"),
            MaterialTextField::HsCode => format!("Input Material {ordinal} HS Code"),
            MaterialTextField::ValueUsd => {
                format!("Input Material {ordinal} Ex-Factory Price (USD)")
            }
            MaterialTextField::InvoiceNo => format!("Input Material {ordinal} Invoice No."),
            MaterialTextField::PurchaseDate => format!("Input Material {ordinal} Purchase Date"),
            MaterialTextField::PercentageFinalValue => {
                format!("Input Material {ordinal} % of Final Value")
            }
        }
    }

    pub fn get(self, material: &InputMaterial) -> &str {
        match self {
            MaterialTextField::Description => &material.description,
            MaterialTextField::HsCode => &material.hs_code,
            MaterialTextField::ValueUsd => &material.value_usd,
            MaterialTextField::InvoiceNo => &material.invoice_no,
            MaterialTextField::PurchaseDate => &material.purchase_date,
            MaterialTextField::PercentageFinalValue => &material.percentage_final_value,
        }
    }

    /// A patch writing `value` to just this field.
    pub fn patch(self, value: String) -> MaterialPatch {
        let mut patch = MaterialPatch::default();
        match self {
            MaterialTextField::Description => patch.description = Some(value),
            MaterialTextField::HsCode => patch.hs_code = Some(value),
            MaterialTextField::ValueUsd => patch.value_usd = Some(value),
            MaterialTextField::InvoiceNo => patch.invoice_no = Some(value),
            MaterialTextField::PurchaseDate => patch.purchase_date = Some(value),
            MaterialTextField::PercentageFinalValue => patch.percentage_final_value = Some(value),
        }
        patch
    }
}

/// One focusable row of a form page.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FieldId {
    Scalar(ScalarField),
    /// The origin-criteria picker.
    Criteria,
    MaterialText(usize, MaterialTextField),
    /// The country-of-origin picker of one material.
    MaterialCountry(usize),
    /// A file-path entry for one material attachment.
    MaterialFile(usize, AttachmentSlot),
    /// Action row appending a new material.
    AddMaterial,
    /// Action row starting the submission flow.
    Submit,
}

const MATERIAL_TEXT_ORDER: [MaterialTextField; 6] = [
    MaterialTextField::Description,
    MaterialTextField::HsCode,
    MaterialTextField::ValueUsd,
    MaterialTextField::InvoiceNo,
    MaterialTextField::PurchaseDate,
    MaterialTextField::PercentageFinalValue,
];

/// Page 1: exporter details, origin criteria, final product details. The
/// procedure-description row only appears while specific-procedure is
/// selected.
pub fn page_one_fields(form: &FormAggregate) -> Vec<FieldId> {
    let mut fields = vec![
        FieldId::Scalar(ScalarField::CompanyName),
        FieldId::Scalar(ScalarField::PhysicalAddress),
        FieldId::Scalar(ScalarField::CityState),
        FieldId::Scalar(ScalarField::PostalCode),
        FieldId::Scalar(ScalarField::TinNumber),
        FieldId::Scalar(ScalarField::ContactPerson),
        FieldId::Scalar(ScalarField::PhoneNumber),
        FieldId::Scalar(ScalarField::EmailAddress),
        FieldId::Scalar(ScalarField::ApplicationDate),
        FieldId::Criteria,
    ];
    if form.origin_criteria == OriginCriteria::SpecificProcedure {
        fields.push(FieldId::Scalar(ScalarField::ProcedureDescription));
    }
    fields.extend([
        FieldId::Scalar(ScalarField::ProductDescription),
        FieldId::Scalar(ScalarField::BrandName),
        FieldId::Scalar(ScalarField::HsCode),
        FieldId::Scalar(ScalarField::CountryOfExport),
        FieldId::Scalar(ScalarField::DestinationCountry),
        FieldId::Scalar(ScalarField::CommercialInvoiceNo),
        FieldId::Scalar(ScalarField::InvoiceDate),
        FieldId::Scalar(ScalarField::ExFactoryPrice),
        FieldId::Scalar(ScalarField::FobValue),
        FieldId::Scalar(ScalarField::QuantityUnit),
        FieldId::Scalar(ScalarField::PackagingType),
    ]);
    fields
}

/// Page 2: one block per input material (certificate upload row only while
/// required), the add-material action, manufacturing process, declaration,
/// and the submit action.
pub fn page_two_fields(form: &FormAggregate) -> Vec<FieldId> {
    let mut fields = Vec::new();
    for (index, material) in form.input_materials.iter().enumerate() {
        for text_field in MATERIAL_TEXT_ORDER {
            fields.push(FieldId::MaterialText(index, text_field));
        }
        fields.push(FieldId::MaterialCountry(index));
        fields.push(FieldId::MaterialFile(index, AttachmentSlot::Invoice));
        if material.certificate_required {
            fields.push(FieldId::MaterialFile(index, AttachmentSlot::Certificate));
        }
    }
    fields.push(FieldId::AddMaterial);
    fields.push(FieldId::Scalar(ScalarField::ManufacturingProcess));
    fields.extend([
        FieldId::Scalar(ScalarField::DeclarantName),
        FieldId::Scalar(ScalarField::SignatureName),
        FieldId::Scalar(ScalarField::SignaturePosition),
        FieldId::Scalar(ScalarField::SignatureDate),
    ]);
    fields.push(FieldId::Submit);
    fields
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_page_one_hides_procedure_until_specific() {
        let mut form = FormAggregate::default();
        let without = page_one_fields(&form);
        assert!(!without.contains(&FieldId::Scalar(ScalarField::ProcedureDescription)));

        form.update_fields(ScalarField::CompanyName.patch("x".to_string()));
        form.update_fields(FormPatch {
            origin_criteria: Some(OriginCriteria::SpecificProcedure),
            ..Default::default()
        });
        let with = page_one_fields(&form);
        assert_eq!(with.len(), without.len() + 1);
        assert!(with.contains(&FieldId::Scalar(ScalarField::ProcedureDescription)));
    }

    #[test]
    fn test_page_two_certificate_row_follows_requirement() {
        let mut form = FormAggregate::default();
        let before = page_two_fields(&form);
        assert!(!before.contains(&FieldId::MaterialFile(0, AttachmentSlot::Certificate)));

        form.set_country_of_origin(0, "Ghana");
        let after = page_two_fields(&form);
        assert!(after.contains(&FieldId::MaterialFile(0, AttachmentSlot::Certificate)));
    }

    #[test]
    fn test_page_two_blocks_per_material() {
        let mut form = FormAggregate::default();
        form.append_material();
        let fields = page_two_fields(&form);
        assert!(fields.contains(&FieldId::MaterialText(1, MaterialTextField::Description)));
        assert!(fields.contains(&FieldId::MaterialCountry(1)));
        assert_eq!(fields.last(), Some(&FieldId::Submit));
    }

    #[test]
    fn test_scalar_get_and_patch_agree() {
        let mut form = FormAggregate::default();
        form.update_fields(ScalarField::QuantityUnit.patch("500 kg".to_string()));
        assert_eq!(ScalarField::QuantityUnit.get(&form), "500 kg");
        // Nothing else moved
        assert_eq!(ScalarField::PackagingType.get(&form), "");
    }

    #[test]
    fn test_material_text_get_and_patch_agree() {
        let mut form = FormAggregate::default();
        form.update_material_at(
            0,
            MaterialTextField::PurchaseDate.patch("2025-11-03".to_string()),
        );
        assert_eq!(
            MaterialTextField::PurchaseDate.get(&form.input_materials[0]),
            "2025-11-03"
        );
    }
}
