//! Log 実装（ファイルへ JSONL 追記 / 何もしない / stderr へも出す）
//!
//! ログの出力先は基本ファイルのみ。-v 指定時だけ VerboseLog で stderr にも要点を出す。

use crate::error::Error;
use crate::ports::outbound::{FileSystem, Log, LogRecord};
use std::io::Write;
use std::path::{Path, PathBuf};
use std::sync::Arc;

/// ファイルへ JSONL を追記する Log 実装
pub struct FileJsonLog {
    fs: Arc<dyn FileSystem>,
    path: PathBuf,
}

impl FileJsonLog {
    /// ログファイルパスへ追記する logger を生成する。
    /// 親ディレクトリが無ければ作成する（初回書き込み時）。
    pub fn new(fs: Arc<dyn FileSystem>, path: impl AsRef<Path>) -> Self {
        Self {
            fs,
            path: path.as_ref().to_path_buf(),
        }
    }
}

impl Log for FileJsonLog {
    fn log(&self, record: &LogRecord) -> Result<(), Error> {
        if let Some(parent) = self.path.parent() {
            self.fs.create_dir_all(parent)?;
        }
        let mut line = serde_json::to_string(record)?;
        line.push('\n');
        let mut w = self.fs.open_append(&self.path)?;
        w.write_all(line.as_bytes())
            .and_then(|_| w.flush())
            .map_err(|e| Error::io_msg(format!("{}: {}", self.path.display(), e)))
    }
}

/// 何も出力しない Log 実装（テスト用・ホーム未解決時）
#[derive(Debug, Clone, Default)]
pub struct NoopLog;

impl Log for NoopLog {
    fn log(&self, _record: &LogRecord) -> Result<(), Error> {
        Ok(())
    }
}

/// 内側の Log に渡しつつ stderr にも 1 行で出す（-v 用）
pub struct VerboseLog {
    inner: Arc<dyn Log>,
}

impl VerboseLog {
    pub fn new(inner: Arc<dyn Log>) -> Self {
        Self { inner }
    }
}

/// stderr 用の 1 行表現: `[level] layer/kind: message key=value ...`
fn human_line(record: &LogRecord) -> String {
    let mut line = format!("[{}]", record.level.as_str());
    match (&record.layer, &record.kind) {
        (Some(l), Some(k)) => line.push_str(&format!(" {}/{}:", l, k)),
        (Some(l), None) => line.push_str(&format!(" {}:", l)),
        (None, Some(k)) => line.push_str(&format!(" {}:", k)),
        (None, None) => {}
    }
    line.push(' ');
    line.push_str(&record.message);
    if let Some(fields) = &record.fields {
        for (k, v) in fields {
            match v.as_str() {
                Some(s) => line.push_str(&format!(" {}={}", k, s)),
                None => line.push_str(&format!(" {}={}", k, v)),
            }
        }
    }
    line
}

impl Log for VerboseLog {
    fn log(&self, record: &LogRecord) -> Result<(), Error> {
        eprintln!("{}", human_line(record));
        self.inner.log(record)
    }
}
