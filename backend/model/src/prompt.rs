//! Prompt construction for the diagram request.
//!
//! The instruction names the ```` ```plantuml ```` fence explicitly; that
//! fence is the contract the extractor matches against. The model is asked,
//! not guaranteed, to follow it.

use umlforge_core::ModelRequest;

const MAX_TOKENS: u32 = 2048;
const TEMPERATURE: f32 = 0.2;

const SYSTEM_PROMPT: &str = "You are a software architecture assistant. \
You read source code and describe its control flow as UML activity diagrams \
in PlantUML syntax.";

/// Build the completion request for a source file.
pub fn build_request(source: &str, model: &str) -> ModelRequest {
    let user_prompt = format!(
        "Here is a source file:\n\
         ```\n\
         {source}\n\
         ```\n\
         Generate a UML flowchart for this code and provide it in PlantUML \
         syntax. The response must contain only the PlantUML code inside a \
         ```plantuml fenced block."
    );

    ModelRequest {
        model: model.to_string(),
        system_prompt: SYSTEM_PROMPT.to_string(),
        user_prompt,
        max_tokens: MAX_TOKENS,
        temperature: TEMPERATURE,
    }
}
