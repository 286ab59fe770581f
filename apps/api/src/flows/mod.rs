// Generative flows: avatar synthesis and project-description writing.
// All backend calls go through llm_client::GenerativeBackend.

pub mod avatar;
pub mod project_description;
pub mod prompts;
