//! Ports & Adapters のポート定義（共通部分は outbound のみ）

pub mod outbound;
