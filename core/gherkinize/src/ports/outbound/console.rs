//! コンソール出力 Outbound ポート
//!
//! オペレータ向けの状態表示（生成結果・書き出し先・エラー）。構造化ログとは別チャネル。

/// コンソール出力抽象
pub trait Console: Send + Sync {
    /// 標準出力へ 1 行
    fn print(&self, text: &str);
    /// 標準エラーへ 1 行
    fn eprint(&self, text: &str);
}
