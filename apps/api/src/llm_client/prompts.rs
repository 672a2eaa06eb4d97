// Shared prompt fragments. Each flow defines its own prompts in flows/prompts.rs;
// this file holds the cross-cutting pieces they are built from.

/// The job board serves Brazilian users; generated prose must match.
pub const LANGUAGE_INSTRUCTION: &str = "\
    Write every human-readable string value in Brazilian Portuguese. \
    Keep JSON keys exactly as specified in English.";

/// Guards extraction flows against invented data.
pub const NO_INVENTION_INSTRUCTION: &str = "\
    Use ONLY information present in the input. \
    If a field is not present, return an empty string or an empty list for it. \
    Never guess names, contacts, dates or employers.";
