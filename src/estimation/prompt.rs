/// Marker replaced by the task description.
const PLACEHOLDER: &str = "{{taskDescription}}";

pub const PROMPT_TEMPLATE: &str = "You are an expert project manager with extensive experience in house building.

You will be given a description of a task or step in a house building project, and you will estimate the duration of the task or step.

You must provide a durationEstimate, including units (e.g. \"3 days\", \"2 weeks\", \"1 month\").
You must also provide a reasoning for your estimate.

Task Description: {{taskDescription}}";

/// Fills the template with the description, verbatim and exactly once.
pub fn render_prompt(task_description: &str) -> String {
    PROMPT_TEMPLATE.replacen(PLACEHOLDER, task_description, 1)
}
