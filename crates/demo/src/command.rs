//! Line commands read from stdin.

/// A user action typed at the terminal.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Command {
    /// `r` -- fetch now.
    Refresh,
    /// `t` -- toggle auto-refresh.
    Toggle,
    /// `q` -- quit.
    Quit,
}

impl Command {
    /// Parse one input line. Case and surrounding whitespace are ignored.
    pub fn parse(line: &str) -> Option<Self> {
        match line.trim().to_ascii_lowercase().as_str() {
            "r" | "refresh" => Some(Self::Refresh),
            "t" | "toggle" => Some(Self::Toggle),
            "q" | "quit" | "exit" => Some(Self::Quit),
            _ => None,
        }
    }
}
