//! Input material records, attachment handles, and the country sets that
//! drive the certificate-of-origin requirement.

use std::path::{Path, PathBuf};

/// AfCFTA State Parties. Sourcing an input material from one of these
/// countries makes a certificate of origin for that material mandatory.
pub const AFCFTA_STATE_PARTIES: &[&str] = &[
    "Algeria",
    "Angola",
    "Benin",
    "Botswana",
    "Burkina Faso",
    "Burundi",
    "Cabo Verde",
    "Cameroon",
    "Central African Republic",
    "Chad",
    "Comoros",
    "Congo, Dem. Rep.",
    "Congo, Rep.",
    "Cote d'Ivoire",
    "Djibouti",
    "Egypt",
    "Equatorial Guinea",
    "Eritrea",
    "Eswatini",
    "Ethiopia",
    "Gabon",
    "Gambia",
    "Ghana",
    "Guinea",
    "Guinea-Bissau",
    "Kenya",
    "Lesotho",
    "Liberia",
    "Libya",
    "Madagascar",
    "Malawi",
    "Mali",
    "Mauritania",
    "Mauritius",
    "Morocco",
    "Mozambique",
    "Namibia",
    "Niger",
    "Rwanda",
    "Sao Tome and Principe",
    "Senegal",
    "Seychelles",
    "Sierra Leone",
    "Somalia",
    "South Africa",
    "South Sudan",
    "Sudan",
    "Tanzania",
    "Togo",
    "Tunisia",
    "Uganda",
    "Zambia",
    "Zimbabwe",
];

/// Non-AfCFTA countries offered by the country picker.
pub const OTHER_COUNTRIES: &[&str] = &[
    "United States",
    "China",
    "India",
    "United Kingdom",
    "Germany",
    "Japan",
    "Nigeria",
];

/// Materials sourced domestically never need a certificate.
pub const DOMESTIC_COUNTRY: &str = "Nigeria";

/// Whether an input material sourced from `country` must carry its own
/// certificate of origin.
pub fn certificate_required_for(country: &str) -> bool {
    AFCFTA_STATE_PARTIES.contains(&country) && country != DOMESTIC_COUNTRY
}

/// Which attachment of an input material a file operation targets.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum AttachmentSlot {
    Certificate,
    Invoice,
}

/// Opaque reference to a user-selected binary file. The handle carries the
/// serializable metadata (name, media type) separately from the content
/// reference; it is never embedded in a persisted snapshot.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AttachmentHandle {
    pub source: PathBuf,
    pub file_name: String,
    pub media_type: String,
}

impl AttachmentHandle {
    /// Create a handle for a file on disk, inferring the media type from the
    /// extension. The file itself is not touched until submission.
    pub fn from_path(path: impl Into<PathBuf>) -> Self {
        let source = path.into();
        let file_name = source
            .file_name()
            .map(|n| n.to_string_lossy().into_owned())
            .unwrap_or_default();
        let media_type = media_type_for(&source).to_string();
        Self {
            source,
            file_name,
            media_type,
        }
    }
}

/// Media type for the attachment kinds the form accepts (pdf, jpg, png).
fn media_type_for(path: &Path) -> &'static str {
    let ext = path
        .extension()
        .map(|e| e.to_string_lossy().to_ascii_lowercase())
        .unwrap_or_default();
    match ext.as_str() {
        "pdf" => "application/pdf",
        "jpg" | "jpeg" => "image/jpeg",
        "png" => "image/png",
        _ => "application/octet-stream",
    }
}

/// One row of the input materials table.
///
/// `certificate_required` is derived from `country_of_origin` and is only
/// ever written through [`InputMaterial::set_country_of_origin`].
#[derive(Debug, Clone, Default, PartialEq)]
pub struct InputMaterial {
    pub description: String,
    pub hs_code: String,
    pub country_of_origin: String,
    pub invoice_no: String,
    pub purchase_date: String,
    pub value_usd: String,
    pub percentage_final_value: String,
    pub certificate_required: bool,
    pub certificate_file: Option<AttachmentHandle>,
    pub invoice_file: Option<AttachmentHandle>,
}

impl InputMaterial {
    /// Set the country of origin and recompute the certificate requirement.
    pub fn set_country_of_origin(&mut self, country: &str) {
        self.country_of_origin = country.to_string();
        self.certificate_required = certificate_required_for(country);
    }

    /// Replace one of the attachment handles. `None` detaches.
    pub fn attach(&mut self, slot: AttachmentSlot, file: Option<AttachmentHandle>) {
        match slot {
            AttachmentSlot::Certificate => self.certificate_file = file,
            AttachmentSlot::Invoice => self.invoice_file = file,
        }
    }

    pub fn attachment(&self, slot: AttachmentSlot) -> Option<&AttachmentHandle> {
        match slot {
            AttachmentSlot::Certificate => self.certificate_file.as_ref(),
            AttachmentSlot::Invoice => self.invoice_file.as_ref(),
        }
    }
}

/// Partial update for a single input material. Fields left as `None` are
/// untouched; the derived certificate flag and the attachments are not
/// patchable through this type.
#[derive(Debug, Clone, Default)]
pub struct MaterialPatch {
    pub description: Option<String>,
    pub hs_code: Option<String>,
    pub invoice_no: Option<String>,
    pub purchase_date: Option<String>,
    pub value_usd: Option<String>,
    pub percentage_final_value: Option<String>,
}

impl MaterialPatch {
    /// Merge this patch into `material`, last write wins per field.
    pub fn apply_to(self, material: &mut InputMaterial) {
        if let Some(v) = self.description {
            material.description = v;
        }
        if let Some(v) = self.hs_code {
            material.hs_code = v;
        }
        if let Some(v) = self.invoice_no {
            material.invoice_no = v;
        }
        if let Some(v) = self.purchase_date {
            material.purchase_date = v;
        }
        if let Some(v) = self.value_usd {
            material.value_usd = v;
        }
        if let Some(v) = self.percentage_final_value {
            material.percentage_final_value = v;
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    mod certificate_requirement {
        use super::*;

        #[test]
        fn test_afcfta_state_requires_certificate() {
            assert!(certificate_required_for("Ghana"));
            assert!(certificate_required_for("South Africa"));
        }

        #[test]
        fn test_domestic_country_never_requires_certificate() {
            assert!(!certificate_required_for("Nigeria"));
        }

        #[test]
        fn test_non_partner_country_does_not_require_certificate() {
            assert!(!certificate_required_for("United States"));
            assert!(!certificate_required_for("Japan"));
        }

        #[test]
        fn test_unknown_country_does_not_require_certificate() {
            assert!(!certificate_required_for(""));
            assert!(!certificate_required_for("Atlantis"));
        }

        #[test]
        fn test_set_country_recomputes_flag_both_ways() {
            let mut material = InputMaterial::default();
            material.set_country_of_origin("Ghana");
            assert!(material.certificate_required);
            material.set_country_of_origin("United States");
            assert!(!material.certificate_required);
        }
    }

    mod attachment_handle {
        use super::*;

        #[test]
        fn test_from_path_extracts_file_name() {
            let handle = AttachmentHandle::from_path("/tmp/docs/certificate.pdf");
            assert_eq!(handle.file_name, "certificate.pdf");
            assert_eq!(handle.media_type, "application/pdf");
        }

        #[test]
        fn test_media_type_by_extension() {
            assert_eq!(
                AttachmentHandle::from_path("scan.JPG").media_type,
                "image/jpeg"
            );
            assert_eq!(
                AttachmentHandle::from_path("scan.png").media_type,
                "image/png"
            );
            assert_eq!(
                AttachmentHandle::from_path("notes.txt").media_type,
                "application/octet-stream"
            );
        }

        #[test]
        fn test_attach_and_detach() {
            let mut material = InputMaterial::default();
            let handle = AttachmentHandle::from_path("/tmp/inv.pdf");
            material.attach(AttachmentSlot::Invoice, Some(handle.clone()));
            assert_eq!(material.attachment(AttachmentSlot::Invoice), Some(&handle));
            assert!(material.attachment(AttachmentSlot::Certificate).is_none());
            material.attach(AttachmentSlot::Invoice, None);
            assert!(material.attachment(AttachmentSlot::Invoice).is_none());
        }
    }

    mod material_patch {
        use super::*;

        #[test]
        fn test_patch_changes_only_present_fields() {
            let mut material = InputMaterial::default();
            material.description = "Raw Hibiscus Flowers".to_string();
            material.hs_code = "1211.90".to_string();

            MaterialPatch {
                hs_code: Some("5201.00".to_string()),
                ..Default::default()
            }
            .apply_to(&mut material);

            assert_eq!(material.hs_code, "5201.00");
            assert_eq!(material.description, "Raw Hibiscus Flowers");
            assert_eq!(material.invoice_no, "");
        }

        #[test]
        fn test_empty_patch_is_noop() {
            let mut material = InputMaterial::default();
            material.set_country_of_origin("Ghana");
            let before = material.clone();
            MaterialPatch::default().apply_to(&mut material);
            assert_eq!(material, before);
        }
    }
}
