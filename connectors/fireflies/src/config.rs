use shared::config::{optional_var, parse_list, parse_var, required_var, StoreConfig};
use shared::error::PipelineError;

pub const FIREFLIES_GRAPHQL_URL: &str = "https://api.fireflies.ai/graphql";
pub const REQUEST_TIMEOUT_SECS: u64 = 30;

/// Transcripts fetched per participant filter. The backend may return up to
/// this many; fewer is not an error.
pub const DEFAULT_TRANSCRIPTS_PER_FILTER: i64 = 50;

/// Character budget per chunk, kept well under the embedding backend's input
/// ceiling (roughly twice the nominal token limit).
pub const DEFAULT_MAX_CHUNK_LEN: usize = 16_000;

pub const TRANSCRIPTS_QUERY: &str = r#"
query Transcripts($participantEmail: String!, $limit: Int) {
  transcripts(participant_email: $participantEmail, limit: $limit) {
    id
    title
    participants
    dateString
    transcript_url
    sentences {
      speaker_name
      text
      start_time
      end_time
    }
  }
}
"#;

/// Everything one ingestion run needs, built from the environment before any
/// network call is made.
#[derive(Debug, Clone)]
pub struct IngestionConfig {
    pub fireflies_api_key: String,
    /// Participant emails to fetch transcripts for, one fetch per entry.
    pub participant_filters: Vec<String>,
    pub transcripts_per_filter: i64,
    /// Email-domain suffix marking a participant as organization staff.
    pub org_email_domain: String,
    /// Display names of known internal staff, annotated in transcript text.
    pub internal_staff: Vec<String>,
    pub max_chunk_len: usize,
    pub store: StoreConfig,
}

impl IngestionConfig {
    pub fn from_env() -> Result<Self, PipelineError> {
        let participant_filters = parse_list(&required_var("PARTICIPANT_EMAILS")?);
        if participant_filters.is_empty() {
            return Err(PipelineError::Configuration(
                "PARTICIPANT_EMAILS must contain at least one address".to_string(),
            ));
        }

        Ok(Self {
            fireflies_api_key: required_var("FIREFLIES_API_KEY")?,
            participant_filters,
            transcripts_per_filter: parse_var(
                "TRANSCRIPTS_PER_FILTER",
                DEFAULT_TRANSCRIPTS_PER_FILTER,
            )?,
            org_email_domain: required_var("ORG_EMAIL_DOMAIN")?,
            internal_staff: parse_list(&optional_var("INTERNAL_STAFF_NAMES", "")),
            max_chunk_len: parse_var("MAX_CHUNK_LEN", DEFAULT_MAX_CHUNK_LEN)?,
            store: StoreConfig::from_env()?,
        })
    }
}
