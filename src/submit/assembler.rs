//! Assembly of the multipart submission payload.

use super::SubmissionError;
use crate::state::{AttachmentHandle, FormAggregate, FormSnapshot};
use std::fs;

/// One binary part of the payload, read from an attachment handle.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AttachmentPart {
    /// Wire name of the part: `certificate_<index>` or `invoice_<index>`.
    pub name: String,
    pub file_name: String,
    pub media_type: String,
    pub bytes: Vec<u8>,
}

/// The transport payload for one submission: the convenience text fields of
/// the ingestion contract, the full form JSON (attachment names only), and
/// the binary parts.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SubmissionPayload {
    pub exporter_name: String,
    pub exporter_email: String,
    pub form_json: String,
    pub attachments: Vec<AttachmentPart>,
}

/// Convert the aggregate plus its attached files into a transport payload.
/// Binary content goes only into the named parts, never into the JSON.
pub fn assemble(form: &FormAggregate) -> Result<SubmissionPayload, SubmissionError> {
    let form_json = serde_json::to_string(&FormSnapshot::with_attachment_names(form))?;

    let mut attachments = Vec::new();
    for (index, material) in form.input_materials.iter().enumerate() {
        if let Some(handle) = &material.certificate_file {
            attachments.push(read_part(format!("certificate_{index}"), handle)?);
        }
        if let Some(handle) = &material.invoice_file {
            attachments.push(read_part(format!("invoice_{index}"), handle)?);
        }
    }

    Ok(SubmissionPayload {
        exporter_name: form.company_name.clone(),
        exporter_email: form.email_address.clone(),
        form_json,
        attachments,
    })
}

fn read_part(name: String, handle: &AttachmentHandle) -> Result<AttachmentPart, SubmissionError> {
    let bytes = fs::read(&handle.source).map_err(|source| SubmissionError::Attachment {
        file_name: handle.file_name.clone(),
        source,
    })?;
    Ok(AttachmentPart {
        name,
        file_name: handle.file_name.clone(),
        media_type: handle.media_type.clone(),
        bytes,
    })
}
