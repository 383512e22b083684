use crate::models::{CanonicalDocument, ChunkDocument};

/// How far back from the size limit to look for a sentence or line break.
const BOUNDARY_SEARCH_WINDOW: usize = 100;

/// A contiguous piece of a document body, before metadata is attached.
#[derive(Debug, Clone, PartialEq)]
pub struct TextChunk {
    pub text: String,
    pub index: usize,
}

pub struct ContentChunker;

impl ContentChunker {
    /// Split `content` into consecutive, non-overlapping pieces of at most
    /// `max_chunk_len` bytes, preferring sentence or line breaks near the cut.
    /// Joining the pieces in index order reproduces `content` exactly.
    pub fn chunk_content(content: &str, max_chunk_len: usize) -> Vec<TextChunk> {
        if content.is_empty() {
            return vec![];
        }

        if content.len() <= max_chunk_len {
            return vec![TextChunk {
                text: content.to_string(),
                index: 0,
            }];
        }

        let mut chunks = Vec::new();
        let mut start = 0;
        let mut index = 0;

        while start < content.len() {
            let hard_end = (start + max_chunk_len).min(content.len());

            // Never cut inside a UTF-8 sequence.
            let mut end = hard_end;
            while end > start && !content.is_char_boundary(end) {
                end -= 1;
            }
            if end == start {
                // A single character wider than the budget; cut after it.
                end = hard_end;
                while end < content.len() && !content.is_char_boundary(end) {
                    end += 1;
                }
            }

            if end < content.len() {
                let mut window_start = end.saturating_sub(BOUNDARY_SEARCH_WINDOW).max(start);
                while !content.is_char_boundary(window_start) {
                    window_start -= 1;
                }
                let window = &content[window_start..end];

                if let Some(pos) = window.rfind('.') {
                    end = window_start + pos + 1;
                } else if let Some(pos) = window.rfind('\n') {
                    end = window_start + pos + 1;
                }
            }

            chunks.push(TextChunk {
                text: content[start..end].to_string(),
                index,
            });

            start = end;
            index += 1;
        }

        chunks
    }

    /// Cut a canonical document into chunk documents with deterministic ids
    /// and a copy of the document's metadata on every chunk.
    pub fn chunk_document(document: &CanonicalDocument, max_chunk_len: usize) -> Vec<ChunkDocument> {
        Self::chunk_content(&document.text, max_chunk_len)
            .into_iter()
            .map(|piece| ChunkDocument {
                id: ChunkDocument::chunk_id(&document.transcript_id, piece.index),
                metadata: document.chunk_metadata(),
                content: piece.text,
            })
            .collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn document_with_text(text: &str) -> CanonicalDocument {
        CanonicalDocument {
            transcript_id: "T1".to_string(),
            title: "Discovery call".to_string(),
            participants: "a@co.com,b@other.com".to_string(),
            date_string: "2024-07-16".to_string(),
            transcript_url: "https://example.com/t/T1".to_string(),
            is_internal: false,
            text: text.to_string(),
        }
    }

    #[test]
    fn test_chunk_empty_content() {
        let chunks = ContentChunker::chunk_content("", 1000);
        assert!(chunks.is_empty());
    }

    #[test]
    fn test_empty_document_yields_zero_chunks() {
        let chunks = ContentChunker::chunk_document(&document_with_text(""), 1000);
        assert!(chunks.is_empty());
    }

    #[test]
    fn test_chunk_small_content() {
        let content = "Alice: we evaluated two other tools first.\n";
        let chunks = ContentChunker::chunk_content(content, 1000);

        assert_eq!(chunks.len(), 1);
        assert_eq!(chunks[0].text, content);
        assert_eq!(chunks[0].index, 0);
    }

    #[test]
    fn test_chunk_large_content_reconstructs_exactly() {
        let content =
            "This is the first sentence. This is the second sentence. This is the third sentence.";
        let chunks = ContentChunker::chunk_content(content, 50);

        assert!(chunks.len() > 1);

        let reconstructed: String = chunks.iter().map(|c| c.text.as_str()).collect();
        assert_eq!(reconstructed, content);

        for chunk in &chunks {
            assert!(chunk.text.len() <= 50);
        }

        for chunk in &chunks[..chunks.len() - 1] {
            assert!(
                chunk.text.ends_with('.') || chunk.text.ends_with('\n'),
                "intermediate chunk should end at a sentence or line break: {:?}",
                chunk.text
            );
        }
    }

    #[test]
    fn test_chunk_breaks_at_line_boundary() {
        let content =
            "Alice: no periods here\nBob: none here either\nCarol: still none\nDan: and more\n";
        let chunks = ContentChunker::chunk_content(content, 50);

        assert!(chunks.len() > 1);

        let reconstructed: String = chunks.iter().map(|c| c.text.as_str()).collect();
        assert_eq!(reconstructed, content);

        for chunk in &chunks[..chunks.len() - 1] {
            assert!(
                chunk.text.ends_with('\n'),
                "should break on a line: {:?}",
                chunk.text
            );
        }
    }

    #[test]
    fn test_chunk_hard_break_when_no_boundaries() {
        let content = "a".repeat(200);
        let chunks = ContentChunker::chunk_content(&content, 50);

        assert_eq!(chunks.len(), 4);

        let reconstructed: String = chunks.iter().map(|c| c.text.as_str()).collect();
        assert_eq!(reconstructed, content);

        for chunk in &chunks[..chunks.len() - 1] {
            assert_eq!(chunk.text.len(), 50);
        }
    }

    #[test]
    fn test_chunk_multibyte_unicode() {
        let content = "Hello \u{1F600} world! \u{4F60}\u{597D}\u{4E16}\u{754C}. More text here to ensure we get multiple chunks out of this content.";
        let chunks = ContentChunker::chunk_content(content, 30);

        assert!(!chunks.is_empty());

        let reconstructed: String = chunks.iter().map(|c| c.text.as_str()).collect();
        assert_eq!(reconstructed, content);

        for (i, chunk) in chunks.iter().enumerate() {
            assert_eq!(chunk.index, i);
        }
    }

    #[test]
    fn test_chunk_ids_are_deterministic() {
        let document =
            document_with_text(&"Sentence one. Sentence two. Sentence three. ".repeat(5));

        let first: Vec<String> = ContentChunker::chunk_document(&document, 40)
            .into_iter()
            .map(|c| c.id)
            .collect();
        let second: Vec<String> = ContentChunker::chunk_document(&document, 40)
            .into_iter()
            .map(|c| c.id)
            .collect();

        assert_eq!(first, second);
        assert!(first.len() > 1);
        assert_eq!(first[0], "T1-chunk-0");
        assert_eq!(first[1], "T1-chunk-1");
    }

    #[test]
    fn test_chunk_document_copies_metadata() {
        let document = document_with_text("Alice: short call.\n");
        let chunks = ContentChunker::chunk_document(&document, 1000);

        assert_eq!(chunks.len(), 1);
        assert_eq!(chunks[0].metadata, document.chunk_metadata());
        assert_eq!(chunks[0].content, document.text);
    }
}
