// Prompt templates for the generative flows.

pub const AVATAR_PROMPT_TEMPLATE: &str =
    "Generate a profile picture based on the following description: {description}.";

pub const AVATAR_REFERENCE_INSTRUCTION: &str = "Use the following image as a reference for the person's face. \
    Create a new avatar in the described style, but ensure the facial features resemble the reference photo.";

pub const PROJECT_DESCRIPTION_PROMPT_TEMPLATE: &str = r#"You are an expert technical writer. Your task is to generate a concise, compelling, one-paragraph description for a software project to be featured in a developer's portfolio.

Project Name: {project_name}
{language_line}
Based on the project name and language, write a professional description. Focus on the project's likely purpose and potential features. The tone should be engaging and informative for a potential employer. Keep it to a single paragraph.

Respond with the paragraph only: no heading, no markdown, no surrounding quotes."#;
