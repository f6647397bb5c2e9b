//! The form aggregate: the single in-memory record holding every field of
//! the two-page Certificate of Origin request form.

use super::material::{AttachmentHandle, AttachmentSlot, InputMaterial, MaterialPatch};
use serde::{Deserialize, Serialize};

/// Self-assessed origin criteria for the final product. Selecting anything
/// other than [`OriginCriteria::SpecificProcedure`] clears the dependent
/// procedure description.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub enum OriginCriteria {
    #[serde(rename = "wholly-obtained")]
    WhollyObtained,
    #[serde(rename = "tariff-heading")]
    TariffHeading,
    #[serde(rename = "value-addition")]
    ValueAddition,
    #[serde(rename = "specific-procedure")]
    SpecificProcedure,
    #[default]
    #[serde(rename = "")]
    Unset,
}

impl OriginCriteria {
    /// Picker order, ending on the unselected state.
    pub const ALL: [OriginCriteria; 5] = [
        OriginCriteria::WhollyObtained,
        OriginCriteria::TariffHeading,
        OriginCriteria::ValueAddition,
        OriginCriteria::SpecificProcedure,
        OriginCriteria::Unset,
    ];

    pub fn label(self) -> &'static str {
        match self {
            OriginCriteria::WhollyObtained => "Wholly Obtained",
            OriginCriteria::TariffHeading => "Change in Tariff Heading",
            OriginCriteria::ValueAddition => "Value Addition",
            OriginCriteria::SpecificProcedure => "Specific Procedure",
            OriginCriteria::Unset => "-- Not Selected --",
        }
    }

    /// Next picker entry, wrapping.
    pub fn next(self) -> Self {
        let pos = Self::ALL.iter().position(|c| *c == self).unwrap_or(0);
        Self::ALL[(pos + 1) % Self::ALL.len()]
    }

    /// Previous picker entry, wrapping.
    pub fn prev(self) -> Self {
        let pos = Self::ALL.iter().position(|c| *c == self).unwrap_or(0);
        Self::ALL[(pos + Self::ALL.len() - 1) % Self::ALL.len()]
    }
}

/// All form field values for the current session.
///
/// The aggregate is mutated in place through the partial-update operations
/// below; it never touches storage or the network itself. Dates and money
/// amounts are carried as entered, exactly as the paper form does.
#[derive(Debug, Clone, PartialEq)]
pub struct FormAggregate {
    // Exporter details
    pub company_name: String,
    pub physical_address: String,
    pub city_state: String,
    pub postal_code: String,
    pub tin_number: String,
    pub contact_person: String,
    pub phone_number: String,
    pub email_address: String,
    pub application_date: String,

    // Origin criteria
    pub origin_criteria: OriginCriteria,
    pub procedure_description: String,

    // Final product details
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

    // Input materials; index 0 always exists
    pub input_materials: Vec<InputMaterial>,

    pub manufacturing_process: String,

    // Declaration
    pub declarant_name: String,
    pub signature_name: String,
    pub signature_position: String,
    pub signature_date: String,
}

impl Default for FormAggregate {
    fn default() -> Self {
        Self {
            company_name: String::new(),
            physical_address: String::new(),
            city_state: String::new(),
            postal_code: String::new(),
            tin_number: String::new(),
            contact_person: String::new(),
            phone_number: String::new(),
            email_address: String::new(),
            application_date: String::new(),
            origin_criteria: OriginCriteria::Unset,
            procedure_description: String::new(),
            product_description: String::new(),
            brand_name: String::new(),
            hs_code: String::new(),
            country_of_export: String::new(),
            destination_country: String::new(),
            commercial_invoice_no: String::new(),
            invoice_date: String::new(),
            ex_factory_price: String::new(),
            fob_value: String::new(),
            quantity_unit: String::new(),
            packaging_type: String::new(),
            // Seeded with one empty entry; the list is append-only
            input_materials: vec![InputMaterial::default()],
            manufacturing_process: String::new(),
            declarant_name: String::new(),
            signature_name: String::new(),
            signature_position: String::new(),
            signature_date: String::new(),
        }
    }
}

impl FormAggregate {
    /// Merge a partial scalar update into the aggregate, last write wins per
    /// field. When `origin_criteria` is among the patched fields the
    /// dependent procedure description is cleared unless the new criteria is
    /// specific-procedure, regardless of what else the patch carries.
    pub fn update_fields(&mut self, patch: FormPatch) {
        if let Some(v) = patch.company_name {
            self.company_name = v;
        }
        if let Some(v) = patch.physical_address {
            self.physical_address = v;
        }
        if let Some(v) = patch.city_state {
            self.city_state = v;
        }
        if let Some(v) = patch.postal_code {
            self.postal_code = v;
        }
        if let Some(v) = patch.tin_number {
            self.tin_number = v;
        }
        if let Some(v) = patch.contact_person {
            self.contact_person = v;
        }
        if let Some(v) = patch.phone_number {
            self.phone_number = v;
        }
        if let Some(v) = patch.email_address {
            self.email_address = v;
        }
        if let Some(v) = patch.application_date {
            self.application_date = v;
        }
        if let Some(v) = patch.procedure_description {
            self.procedure_description = v;
        }
        if let Some(v) = patch.product_description {
            self.product_description = v;
        }
        if let Some(v) = patch.brand_name {
            self.brand_name = v;
        }
        if let Some(v) = patch.hs_code {
            self.hs_code = v;
        }
        if let Some(v) = patch.country_of_export {
            self.country_of_export = v;
        }
        if let Some(v) = patch.destination_country {
            self.destination_country = v;
        }
        if let Some(v) = patch.commercial_invoice_no {
            self.commercial_invoice_no = v;
        }
        if let Some(v) = patch.invoice_date {
            self.invoice_date = v;
        }
        if let Some(v) = patch.ex_factory_price {
            self.ex_factory_price = v;
        }
        if let Some(v) = patch.fob_value {
            self.fob_value = v;
        }
        if let Some(v) = patch.quantity_unit {
            self.quantity_unit = v;
        }
        if let Some(v) = patch.packaging_type {
            self.packaging_type = v;
        }
        if let Some(v) = patch.manufacturing_process {
            self.manufacturing_process = v;
        }
        if let Some(v) = patch.declarant_name {
            self.declarant_name = v;
        }
        if let Some(v) = patch.signature_name {
            self.signature_name = v;
        }
        if let Some(v) = patch.signature_position {
            self.signature_position = v;
        }
        if let Some(v) = patch.signature_date {
            self.signature_date = v;
        }
        // Applied last so the dependent-field invariant holds even when the
        // same patch also writes procedure_description.
        if let Some(criteria) = patch.origin_criteria {
            self.origin_criteria = criteria;
            if criteria != OriginCriteria::SpecificProcedure {
                self.procedure_description.clear();
            }
        }
    }

    /// Merge a partial update into the input material at `index`.
    /// An out-of-bounds index leaves the aggregate untouched and returns
    /// `false`.
    pub fn update_material_at(&mut self, index: usize, patch: MaterialPatch) -> bool {
        match self.input_materials.get_mut(index) {
            Some(material) => {
                patch.apply_to(material);
                true
            }
            None => false,
        }
    }

    /// Append one empty input material row. The list has no upper bound.
    pub fn append_material(&mut self) {
        self.input_materials.push(InputMaterial::default());
    }

    /// Replace an attachment handle on the material at `index`; `None`
    /// detaches. No type or size validation is performed. Out-of-bounds
    /// indices are a no-op returning `false`.
    pub fn attach_file(
        &mut self,
        index: usize,
        slot: AttachmentSlot,
        file: Option<AttachmentHandle>,
    ) -> bool {
        match self.input_materials.get_mut(index) {
            Some(material) => {
                material.attach(slot, file);
                true
            }
            None => false,
        }
    }

    /// Set the country of origin of the material at `index`, recomputing its
    /// certificate requirement. Out-of-bounds indices are a no-op returning
    /// `false`.
    pub fn set_country_of_origin(&mut self, index: usize, country: &str) -> bool {
        match self.input_materials.get_mut(index) {
            Some(material) => {
                material.set_country_of_origin(country);
                true
            }
            None => false,
        }
    }
}

/// Partial scalar update for [`FormAggregate::update_fields`]. Fields left
/// as `None` are untouched.
#[derive(Debug, Clone, Default)]
pub struct FormPatch {
    pub company_name: Option<String>,
    pub physical_address: Option<String>,
    pub city_state: Option<String>,
    pub postal_code: Option<String>,
    pub tin_number: Option<String>,
    pub contact_person: Option<String>,
    pub phone_number: Option<String>,
    pub email_address: Option<String>,
    pub application_date: Option<String>,
    pub origin_criteria: Option<OriginCriteria>,
    pub procedure_description: Option<String>,
    pub product_description: Option<String>,
    pub brand_name: Option<String>,
    pub hs_code: Option<String>,
    pub country_of_export: Option<String>,
    pub destination_country: Option<String>,
    pub commercial_invoice_no: Option<String>,
    pub invoice_date: Option<String>,
    pub ex_factory_price: Option<String>,
    pub fob_value: Option<String>,
    pub quantity_unit: Option<String>,
    pub packaging_type: Option<String>,
    pub manufacturing_process: Option<String>,
    pub declarant_name: Option<String>,
    pub signature_name: Option<String>,
    pub signature_position: Option<String>,
    pub signature_date: Option<String>,
}
