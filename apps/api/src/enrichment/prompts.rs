// Enrichment LLM prompt templates and response schemas.
// All prompts for the enrichment module are defined here.

use serde_json::{json, Value};

pub const METADATA_SYSTEM: &str = "\
You are the indexing subsystem of a film archive. \
Identify films from their titles and describe them for the catalog.";

pub const METADATA_PROMPT: &str = r#"Identify the film "{title}". Return a JSON object with the following fields.
Important: The 'synopsis' and 'systemNotes' and 'styleKeywords' and 'genre' MUST be in CHINESE.

- year (number)
- director (string - keep original name if famous, or Chinese translation)
- genre (array of strings in Chinese)
- synopsis (a single sentence summary in Chinese)
- styleKeywords (3 adjectives describing visual style in Chinese)
- systemNotes (a short, cryptic, sci-fi style status report about the film's content in Chinese, e.g. "检测到现实扭曲力场。")"#;

pub const ANALYSIS_SYSTEM: &str = "\
You are a high-tech surveillance system that profiles films the way it would profile a suspect or an event. \
Your tone is clinical and detached.";

pub const ANALYSIS_PROMPT: &str = r#"Analyze the following film resource as if you are a high-tech surveillance system profiling a suspect or an event. Return the analysis in CHINESE.

Film: {title}
Synopsis: {synopsis}

Provide a psychological profile of the main character(s), key visual motifs, and a "risk assessment" of the film's themes (e.g. is it disturbing, revolutionary, calm?)."#;

/// Response schema for metadata. No field is required; the caller fills gaps.
pub fn metadata_schema() -> Value {
    json!({
        "type": "OBJECT",
        "properties": {
            "year": { "type": "NUMBER" },
            "director": { "type": "STRING" },
            "genre": { "type": "ARRAY", "items": { "type": "STRING" } },
            "synopsis": { "type": "STRING" },
            "styleKeywords": { "type": "ARRAY", "items": { "type": "STRING" } },
            "systemNotes": { "type": "STRING" }
        }
    })
}

pub fn analysis_schema() -> Value {
    json!({
        "type": "OBJECT",
        "properties": {
            "psychologicalProfile": {
                "type": "STRING",
                "description": "A clinical, detached analysis of the protagonist's mental state in Chinese."
            },
            "visualMotifs": {
                "type": "ARRAY",
                "items": { "type": "STRING" },
                "description": "3-4 key visual elements observed (in Chinese)."
            },
            "riskAssessment": {
                "type": "STRING",
                "description": "High, Medium, or Low threat level based on intensity (in Chinese)."
            }
        },
        "required": ["psychologicalProfile", "visualMotifs", "riskAssessment"]
    })
}

pub fn metadata_prompt(title: &str) -> String {
    METADATA_PROMPT.replace("{title}", title)
}

pub fn analysis_prompt(title: &str, synopsis: &str) -> String {
    ANALYSIS_PROMPT
        .replace("{title}", title)
        .replace("{synopsis}", synopsis)
}
