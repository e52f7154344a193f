// Cross-cutting prompt fragments shared by every provider adapter.
// Task-specific templates live beside the module that renders them.

/// System instruction sent with every completion request.
pub const INTERVIEW_SYSTEM: &str = "You are an expert interview question generator.";
