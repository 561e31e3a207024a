// Cover letter generation over the job store.
// All model calls go through llm_client::ChatModel.

pub mod generator;
pub mod template;

pub use generator::{generate_letters, GenerateOptions, GenerationSummary, LetterContext};
pub use template::PromptTemplate;
