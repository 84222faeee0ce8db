//! Flatten per-chunk classifications into one ordered result.

use chrono::Utc;

use crate::models::AnalysisResult;

use super::types::ChunkClassification;

/// Merge chunk results in chunk-index order, then within-chunk order.
///
/// Segments are kept exactly as returned: no deduplication and no merging of
/// adjacent segments. Chunks that fell back are recorded in `failed_chunks`.
pub fn aggregate(mut per_chunk: Vec<(usize, ChunkClassification)>) -> AnalysisResult {
    per_chunk.sort_by_key(|(index, _)| *index);

    let chunk_count = per_chunk.len();
    let mut segments = Vec::new();
    let mut failed_chunks = Vec::new();

    for (index, classification) in per_chunk {
        if classification.is_fallback() {
            failed_chunks.push(index);
        }
        segments.extend(classification.into_segments());
    }

    AnalysisResult {
        segments,
        chunk_count,
        failed_chunks,
        analyzed_at: Utc::now(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::{AnalysisStatus, Segment};

    fn classified(texts: &[&str]) -> ChunkClassification {
        ChunkClassification::Classified(
            texts
                .iter()
                .map(|t| Segment::new(*t, vec!["joy".to_string()]))
                .collect(),
        )
    }

    #[test]
    fn test_flattens_in_chunk_order() {
        let result = aggregate(vec![
            (1, classified(&["c", "d"])),
            (0, classified(&["a", "b"])),
            (2, classified(&["e"])),
        ]);
        let texts: Vec<&str> = result.segments.iter().map(|s| s.text.as_str()).collect();
        assert_eq!(texts, vec!["a", "b", "c", "d", "e"]);
        assert_eq!(result.chunk_count, 3);
        assert_eq!(result.status(), AnalysisStatus::Complete);
    }

    #[test]
    fn test_no_merging_of_identical_neighbours() {
        let result = aggregate(vec![(0, classified(&["same", "same"]))]);
        assert_eq!(result.segments.len(), 2);
    }

    #[test]
    fn test_fallback_chunk_is_single_segment() {
        let result = aggregate(vec![
            (0, classified(&["a"])),
            (
                1,
                ChunkClassification::Fallback {
                    segment: Segment::fallback("broken chunk"),
                    reason: "timed out".to_string(),
                },
            ),
            (2, classified(&["c"])),
        ]);
        assert_eq!(result.segments.len(), 3);
        assert!(result.segments[1].incomplete);
        assert_eq!(result.failed_chunks, vec![1]);
        assert!(result.is_degraded());
    }
}
