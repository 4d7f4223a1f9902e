//! 標準コンソール実装（println! / eprintln!）

use crate::ports::outbound::Console;

#[derive(Debug, Clone, Default)]
pub struct StdConsole;

impl Console for StdConsole {
    fn print(&self, text: &str) {
        println!("{}", text);
    }

    fn eprint(&self, text: &str) {
        eprintln!("{}", text);
    }
}
