// Cross-cutting prompt fragments. Each module that calls the model keeps its
// own prompts.rs alongside it.

/// System prompt fragment that enforces JSON-only output.
pub const JSON_ONLY_SYSTEM: &str = "You are a precise, structured assistant. \
    You MUST respond with valid JSON only. \
    Do NOT include any text outside the JSON value. \
    Do NOT use markdown code fences. \
    Do NOT include explanations or apologies.";

/// Instruction appended to extraction prompts so the model never invents data.
pub const NO_INVENTION_INSTRUCTION: &str = "\
    CRITICAL: Only report information that appears in the resume text. \
    Do NOT infer, guess, or invent names, emails, or phone numbers.";
