pub mod in_memory_output_adapter;
pub mod json_output_adapter;

pub use in_memory_output_adapter::InMemoryOutput;
pub use json_output_adapter::{JsonFileEnrichedOutput, JsonFileProfileOutput};
