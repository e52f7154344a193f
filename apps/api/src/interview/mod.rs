// Interview question generation: prompt → completion → parse → persist.
// All LLM calls go through llm_client, never direct provider calls here.

pub mod handlers;
pub mod models;
pub mod parser;
pub mod prompts;
pub mod store;
