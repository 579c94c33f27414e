use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};

/// Who is asking. Fields beyond `role` are opaque and echoed into the output
/// metadata unchanged.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct Persona {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub role: Option<String>,
    #[serde(flatten)]
    pub extra: Map<String, Value>,
}

/// What they need done. Fields beyond `task` are opaque passthrough.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct Job {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub task: Option<String>,
    #[serde(flatten)]
    pub extra: Map<String, Value>,
}

#[derive(Debug, Clone, Deserialize)]
pub struct CollectionRequest {
    pub persona: Persona,
    pub job_to_be_done: Job,
}

impl CollectionRequest {
    /// Synthesize the ranking query from persona and task. Pure and total:
    /// missing fields become empty strings, never an error.
    #[must_use]
    pub fn query(&self) -> String {
        format!(
            "As a {}, I need to {}. Find the most relevant sections that directly help me accomplish this specific task.",
            self.persona.role.as_deref().unwrap_or(""),
            self.job_to_be_done.task.as_deref().unwrap_or(""),
        )
    }
}
