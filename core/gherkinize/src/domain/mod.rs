//! gherkinize 固有のドメイン型（型と不変条件）

pub mod command;
pub mod io;
pub mod template;

pub use command::{GenCommand, GenerateRequest};
pub use io::{InputFormat, OutputDestination, PromptSource};
pub use template::{PromptTemplate, SAMPLE_TEST_CASE};
