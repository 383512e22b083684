use std::collections::HashSet;

use shared::error::PipelineError;
use shared::models::CanonicalDocument;

use crate::models::Transcript;

/// Label substituted when a sentence carries no speaker identity.
pub const UNKNOWN_SPEAKER: &str = "UNKNOWN SPEAKER";

/// Suffix appended to speaker labels that match a known internal staff name.
pub const INTERNAL_MARKER: &str = " (Internal)";

const UNTITLED_MEETING: &str = "Untitled Meeting";

/// Turns one raw transcript into its canonical document form. Classification
/// inputs (org domain, staff names) are fixed at construction; normalization
/// itself has no side effects.
pub struct Normalizer {
    domain_suffix: String,
    internal_staff: HashSet<String>,
}

impl Normalizer {
    pub fn new(org_email_domain: &str, internal_staff: &[String]) -> Self {
        let domain = org_email_domain.trim_start_matches('@').to_lowercase();
        Self {
            domain_suffix: format!("@{}", domain),
            internal_staff: internal_staff.iter().cloned().collect(),
        }
    }

    pub fn normalize(&self, transcript: &Transcript) -> Result<CanonicalDocument, PipelineError> {
        transcript.validate()?;

        let participants = transcript.participants.clone().unwrap_or_default();

        // Policy: an empty participant list is never classified internal.
        let is_internal = !participants.is_empty()
            && participants
                .iter()
                .all(|address| address.to_lowercase().ends_with(&self.domain_suffix));

        let mut text = String::new();
        for sentence in transcript.sentences.as_deref().unwrap_or_default() {
            let label = match sentence.speaker_name.as_deref() {
                Some(name) if self.internal_staff.contains(name) => {
                    format!("{}{}", name, INTERNAL_MARKER)
                }
                Some(name) => name.to_string(),
                None => UNKNOWN_SPEAKER.to_string(),
            };

            // validate() guarantees text is present.
            text.push_str(&label);
            text.push_str(": ");
            text.push_str(sentence.text.as_deref().unwrap_or_default());
            text.push('\n');
        }

        Ok(CanonicalDocument {
            transcript_id: transcript.id.clone(),
            title: transcript
                .title
                .clone()
                .unwrap_or_else(|| UNTITLED_MEETING.to_string()),
            participants: participants.join(","),
            date_string: transcript.date_string.clone().unwrap_or_default(),
            transcript_url: transcript.transcript_url.clone().unwrap_or_default(),
            is_internal,
            text,
        })
    }
}
