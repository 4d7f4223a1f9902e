//! テスト用: ネットワークを使わない TextGenerator / 出力を溜める Console


#[cfg(test)]
pub use stub::{RecordingConsole, StubGenerator, StubGeneratorFactory};
