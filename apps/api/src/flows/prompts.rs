// All LLM prompt constants for the AI flows.
// Templates use `{placeholder}` markers filled with `str::replace` before sending.

/// System prompt shared by the extraction/generation flows.
pub const FLOW_SYSTEM: &str = "You are an assistant for a regional Brazilian job board. \
    You help candidates describe their experience and employers write and evaluate job postings. \
    You MUST respond with valid JSON only. \
    Do NOT include any text outside the JSON object. \
    Do NOT use markdown code fences.";

/// Skill suggestion. Replace: {language_instruction}, {experience}
pub const SKILLS_PROMPT_TEMPLATE: &str = r#"{language_instruction}

Read the candidate's description of their professional experience and suggest the skills it demonstrates.

Return a JSON object with this EXACT schema:
{
  "skills": ["Atendimento ao cliente", "Controle de estoque"]
}

Rules:
- Order skills from most to least evident in the text.
- Short labels only (1-4 words each), no explanations.
- At most 15 skills.

EXPERIENCE:
{experience}"#;

/// Résumé auto-fill. Replace: {language_instruction}, {no_invention_instruction}, {resume_text}
pub const RESUME_AUTOFILL_PROMPT_TEMPLATE: &str = r#"{language_instruction}

{no_invention_instruction}

Extract the candidate's details from the résumé text below.

Return a JSON object with this EXACT schema:
{
  "name": "Maria da Silva",
  "email": "maria@example.com",
  "phone": "(16) 99999-0000",
  "experience": ["Vendedora — Loja Exemplo (2019-2023): atendimento e caixa"],
  "skills": ["Vendas", "Excel"],
  "education": ["Ensino médio completo — EE Exemplo (2018)"]
}

Rules:
- One string per job in "experience", most recent first, in the form "Role — Employer (period): summary".
- One string per course or degree in "education".
- Use "" or [] for anything not present in the text.

RÉSUMÉ TEXT:
{resume_text}"#;

/// Job description assistant. Replace: {language_instruction}, {title}, {keywords}
pub const JOB_DESCRIPTION_PROMPT_TEMPLATE: &str = r#"{language_instruction}

Write a job posting description for the role below, suitable for a local job board.

Return a JSON object with this EXACT schema:
{
  "description": "Full description text"
}

Rules:
- 3 short paragraphs: about the role, responsibilities, desired profile.
- Work the keywords in naturally; do not list them verbatim.
- Do NOT invent salary figures, company names or addresses.

JOB TITLE: {title}
KEYWORDS: {keywords}"#;

/// Job suggestion matcher. Replace: {profile}, {jobs_json}
pub const JOB_MATCH_PROMPT_TEMPLATE: &str = r#"Given a candidate profile and a list of job descriptions, select the jobs that are a good match for the candidate.

Return a JSON object with this EXACT schema:
{
  "matches": ["exact text of a matching job description"]
}

Rules:
- Copy each selected job description EXACTLY as given, character for character.
- Order matches from best to worst fit.
- Return an empty list if nothing fits.

CANDIDATE PROFILE:
{profile}

JOB DESCRIPTIONS (JSON array):
{jobs_json}"#;

/// Candidate ranking. Replace: {language_instruction}, {job_description}, {candidates_json}
pub const RANKING_PROMPT_TEMPLATE: &str = r#"{language_instruction}

Evaluate how well each candidate fits the job description.

Return a JSON object with this EXACT schema:
{
  "rankings": [
    {"id": "candidate id exactly as given", "score": 8, "justification": "One or two sentences."}
  ]
}

Rules:
- Include every candidate exactly once, using the "id" given.
- "score" is a number from 0 (no fit) to 10 (perfect fit).
- Base the justification only on the candidate data provided.

JOB DESCRIPTION:
{job_description}

CANDIDATES (JSON array):
{candidates_json}"#;

/// Conversational résumé builder. Replace: {language_instruction}, {transcript}
pub const RESUME_BUILDER_PROMPT_TEMPLATE: &str = r#"{language_instruction}

You are interviewing a job seeker to build their résumé, one question at a time.
Below is the full conversation so far. Work out which information is already known and ask
for the next missing item in this order: name, email, phone, professional summary,
work experience, education, skills. Ask one short, friendly question at a time.
When everything is collected, set "is_complete" to true and thank the candidate in "next_question".

Return a JSON object with this EXACT schema:
{
  "next_question": "Qual é o seu nome completo?",
  "is_complete": false,
  "profile": {
    "name": "",
    "email": "",
    "phone": "",
    "summary": "",
    "experience": [],
    "education": [],
    "skills": []
  }
}

"profile" must contain everything the candidate has said so far, and nothing they have not said.

CONVERSATION:
{transcript}"#;
