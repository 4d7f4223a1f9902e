//! アダプター（ports の実装）

pub(crate) mod console;
pub(crate) mod provider_text_generator;
pub(crate) mod stub;

pub(crate) use console::StdConsole;
pub(crate) use provider_text_generator::StdTextGeneratorFactory;
#[cfg(test)]
pub(crate) use stub::{RecordingConsole, StubGenerator, StubGeneratorFactory};
