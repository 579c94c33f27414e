use std::collections::BTreeSet;

use serde::Serialize;
use sift_ingest::Chunk;
use sift_rank::ScoredChunk;

use crate::request::{Job, Persona};

/// Serialized field order matters: consumers rely on the artifact reading
/// metadata, then extracted_sections, then subsection_analysis.
#[derive(Debug, Serialize)]
pub struct CollectionResult {
    pub metadata: Metadata,
    pub extracted_sections: Vec<ExtractedSection>,
    pub subsection_analysis: Vec<SubsectionAnalysis>,
}

#[derive(Debug, Serialize)]
pub struct Metadata {
    pub documents: Vec<String>,
    pub persona: Persona,
    pub job_to_be_done: Job,
    pub processing_timestamp: String,
}

#[derive(Debug, Serialize)]
pub struct ExtractedSection {
    pub document: String,
    pub page: u32,
    pub section_title: String,
    pub importance_rank: usize,
}

#[derive(Debug, Serialize)]
pub struct SubsectionAnalysis {
    pub document: String,
    pub page: u32,
    pub refined_text: String,
}

/// Shape the final artifact from the ranked-and-filtered selection.
///
/// `metadata.documents` covers every document that produced a chunk, before
/// filtering or the top-N cut: filtering affects selection, not provenance.
#[must_use]
pub fn assemble(
    all_chunks: &[Chunk],
    ranked: &[ScoredChunk],
    persona: &Persona,
    job: &Job,
    top_n: usize,
) -> CollectionResult {
    let documents: Vec<String> = all_chunks
        .iter()
        .map(|c| c.doc_name.clone())
        .collect::<BTreeSet<_>>()
        .into_iter()
        .collect();

    let selected = &ranked[..top_n.min(ranked.len())];

    let extracted_sections = selected
        .iter()
        .enumerate()
        .map(|(i, scored)| ExtractedSection {
            document: scored.chunk.doc_name.clone(),
            page: scored.chunk.page,
            section_title: scored.chunk.section_title.clone(),
            importance_rank: i + 1,
        })
        .collect();

    let subsection_analysis = selected
        .iter()
        .map(|scored| SubsectionAnalysis {
            document: scored.chunk.doc_name.clone(),
            page: scored.chunk.page,
            refined_text: scored.chunk.text.clone(),
        })
        .collect();

    CollectionResult {
        metadata: Metadata {
            documents,
            persona: persona.clone(),
            job_to_be_done: job.clone(),
            processing_timestamp: chrono::Local::now()
                .format("%Y-%m-%d %H:%M:%S")
                .to_string(),
        },
        extracted_sections,
        subsection_analysis,
    }
}
