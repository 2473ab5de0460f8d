// Extraction LLM prompt templates.
// All prompts for the extraction module are defined here.

pub const APPLICANT_SYSTEM: &str = "\
You are a precise resume data extractor. \
You extract the applicant's own contact details and profile from resume text. \
You MUST respond with a single JSON object only. No markdown fences, no explanations.";

pub const APPLICANT_PROMPT: &str = r#"Extract the following applicant information from this resume text.

RESUME TEXT:
{resume_text}

OUTPUT SCHEMA (return exactly this structure):
{
  "full_name": "applicant's full name",
  "email": "email address",
  "phone": "phone number",
  "current_position": "current job title",
  "experience_years": "estimated years of experience",
  "key_skills": ["skill1", "skill2", "skill3"]
}

RULES:
1. If any information is not found, use "Unknown" as the value.
2. key_skills is an empty array when no skills are listed.
3. Return ONLY the JSON object, nothing else, no code fences."#;

pub const REFERENCES_SYSTEM: &str = "\
You are a precise resume data extractor specialising in professional referees. \
You MUST respond with a JSON array only. No markdown fences, no explanations.";

pub const REFERENCES_PROMPT: &str = r#"Extract reference information from this resume for a {role} position.

RESUME TEXT:
{resume_text}

Look for reference contacts including:
- Previous supervisors, managers, or colleagues
- Contact information (email, phone)
- Company/organization names
- Working relationship

OUTPUT SCHEMA (return a JSON array of objects like this):
[
  {
    "name": "Reference Name",
    "email": "email@example.com",
    "phone": "phone number",
    "company": "Company Name",
    "relationship": "Direct supervisor",
    "years_worked": "2 years",
    "context": "Worked together on Project X"
  }
]

RULES:
1. If no references are found, return an empty array: []
2. Use an empty string for any field that is not present.
3. Return ONLY the JSON array, nothing else, no code fences."#;

/// Role placeholder used when the caller gives no role hint.
pub const ANY_ROLE: &str = "professional";
