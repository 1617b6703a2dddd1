// Shared prompt fragments. Each feature that calls the LLM keeps its own
// prompts.rs alongside it and composes these in.

/// Keeps answers short and free of invented facts about the prospect.
pub const GROUNDED_ANSWER_INSTRUCTION: &str = "\
    Base every statement about the prospect on the context provided. \
    If the context does not say something, do not invent it. \
    Keep the answer concise and ready to use.";
