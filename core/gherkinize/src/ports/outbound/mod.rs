//! Outbound ポート: アプリが外界（テキスト生成・コンソール）を使うための trait

pub mod console;
pub mod text_generator;

pub use console::Console;
pub use text_generator::{GenerateError, TextGenerator, TextGeneratorFactory};
