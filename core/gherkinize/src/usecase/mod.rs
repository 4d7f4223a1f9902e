//! ユースケース

pub mod generate;
pub mod prompt_input;

#[cfg(test)]
pub use generate::GenerateOutcome;
pub use generate::GenerateScenarioUseCase;
