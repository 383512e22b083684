use serde::Deserialize;
use shared::error::PipelineError;

/// One transcript as returned by the Fireflies GraphQL API. Wire-level fields
/// are optional wherever the backend has been seen to omit them; `validate`
/// enforces what normalization actually requires.
#[derive(Debug, Clone, Deserialize)]
pub struct Transcript {
    #[serde(default)]
    pub id: String,
    pub title: Option<String>,
    pub participants: Option<Vec<String>>,
    #[serde(rename = "dateString")]
    pub date_string: Option<String>,
    pub transcript_url: Option<String>,
    pub sentences: Option<Vec<Sentence>>,
}

#[derive(Debug, Clone, Deserialize)]
pub struct Sentence {
    /// Absent means the speaker could not be identified.
    pub speaker_name: Option<String>,
    pub text: Option<String>,
    pub start_time: Option<f64>,
    pub end_time: Option<f64>,
}

#[derive(Debug, Deserialize)]
pub struct GraphQLResponse {
    pub data: Option<TranscriptsData>,
    pub errors: Option<Vec<GraphQLError>>,
}

#[derive(Debug, Deserialize)]
pub struct TranscriptsData {
    pub transcripts: Vec<Transcript>,
}

#[derive(Debug, Deserialize)]
pub struct GraphQLError {
    pub message: String,
}

impl Transcript {
    /// Boundary validation: a record that cannot be normalized is rejected
    /// here, as `MalformedRecord`, instead of failing deep in the pipeline.
    pub fn validate(&self) -> Result<(), PipelineError> {
        if self.id.trim().is_empty() {
            return Err(PipelineError::MalformedRecord(
                "transcript has an empty id".to_string(),
            ));
        }

        if let Some(sentences) = &self.sentences {
            for (position, sentence) in sentences.iter().enumerate() {
                if sentence.text.is_none() {
                    return Err(PipelineError::MalformedRecord(format!(
                        "transcript {}: sentence {} has no text",
                        self.id, position
                    )));
                }
            }
        }

        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_validate_accepts_minimal_transcript() {
        let transcript = Transcript {
            id: "T1".to_string(),
            title: None,
            participants: None,
            date_string: None,
            transcript_url: None,
            sentences: None,
        };
        assert!(transcript.validate().is_ok());
    }

    #[test]
    fn test_validate_rejects_empty_id() {
        let transcript = Transcript {
            id: "  ".to_string(),
            title: None,
            participants: None,
            date_string: None,
            transcript_url: None,
            sentences: None,
        };
        assert!(matches!(
            transcript.validate(),
            Err(PipelineError::MalformedRecord(_))
        ));
    }

    #[test]
    fn test_validate_rejects_sentence_without_text() {
        let transcript = Transcript {
            id: "T1".to_string(),
            title: None,
            participants: None,
            date_string: None,
            transcript_url: None,
            sentences: Some(vec![Sentence {
                speaker_name: Some("Alice".to_string()),
                text: None,
                start_time: None,
                end_time: None,
            }]),
        };
        assert!(matches!(
            transcript.validate(),
            Err(PipelineError::MalformedRecord(_))
        ));
    }

    #[test]
    fn test_deserializes_wire_shape() {
        let payload = r#"
        {
            "id": "T1",
            "title": "Discovery call",
            "participants": ["a@co.com", "b@other.com"],
            "dateString": "2024-07-16T19:00:00.000Z",
            "transcript_url": "https://example.com/view/T1",
            "sentences": [
                {"speaker_name": "Alice", "text": "Hello", "start_time": 0.0, "end_time": 1.5},
                {"speaker_name": null, "text": "Hi", "start_time": 1.5, "end_time": 2.0}
            ]
        }
        "#;

        let transcript: Transcript = serde_json::from_str(payload).unwrap();
        assert_eq!(transcript.id, "T1");
        assert_eq!(transcript.date_string.as_deref(), Some("2024-07-16T19:00:00.000Z"));
        let sentences = transcript.sentences.as_ref().unwrap();
        assert_eq!(sentences.len(), 2);
        assert!(sentences[1].speaker_name.is_none());
        assert!(transcript.validate().is_ok());
    }
}
