// Plan generation pipeline: prompt composition → Gemini call → JSON-array
// extraction → normalization. All LLM calls go through llm_client.

pub mod handlers;
