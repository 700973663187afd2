// Shared prompt constants for every Gemini call.
// Each service that needs LLM calls defines its own prompts.rs alongside it.
// This file contains cross-cutting prompt fragments.

/// System prompt fragment that enforces JSON-only output.
pub const JSON_ONLY_SYSTEM: &str = "You are a precise, structured assistant. \
    You MUST respond with valid JSON only. \
    Do NOT include any text outside the JSON object. \
    Do NOT use markdown code fences. \
    Do NOT include explanations or apologies.";

/// The catalog is displayed in Chinese; free-text fields must match.
pub const DISPLAY_LANGUAGE_INSTRUCTION: &str = "\
    All free-text values MUST be written in CHINESE (Simplified). \
    Proper names may keep their original spelling when they are widely known.";
