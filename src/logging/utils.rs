//! ANSI helpers: stripping, color detection, and the output palette.
use std::io::IsTerminal as _;

/// Strip ANSI escape sequences from a string.
///
/// Handles SGR sequences (ending in `m`) and other CSI sequences (ending
/// in any letter in the `@`..`~` range), so cursor movement, erase, etc.
/// are also stripped without consuming unrelated text.
#[must_use]
pub fn strip_ansi(s: &str) -> String {
    let mut out = String::with_capacity(s.len());
    let mut chars = s.chars();
    while let Some(c) = chars.next() {
        if c == '\x1b' {
            if let Some(next) = chars.next()
                && next == '['
            {
                for inner in chars.by_ref() {
                    if ('@'..='~').contains(&inner) {
                        break;
                    }
                }
            }
        } else {
            out.push(c);
        }
    }
    out
}

/// Whether console output should be colored.
///
/// Colors need a terminal on stdout and neither `NO_COLOR` nor
/// `DOTREF_NO_COLOR` in the environment.
#[must_use]
pub fn colors_enabled() -> bool {
    should_color(std::io::stdout().is_terminal(), |key| {
        std::env::var_os(key).is_some()
    })
}

fn should_color(is_terminal: bool, is_set: impl Fn(&str) -> bool) -> bool {
    is_terminal && !is_set("NO_COLOR") && !is_set("DOTREF_NO_COLOR")
}

const RESET: &str = "\x1b[0m";
const RED: &str = "\x1b[91m";
const GREEN: &str = "\x1b[92m";
const YELLOW: &str = "\x1b[93m";
const BLUE: &str = "\x1b[94m";

/// Colors for user-facing output; every method is the identity when
/// colors are disabled.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Palette {
    enabled: bool,
}

impl Palette {
    /// A palette that colors only when `enabled`.
    #[must_use]
    pub const fn new(enabled: bool) -> Self {
        Self { enabled }
    }

    /// A palette that never colors.
    #[must_use]
    pub const fn plain() -> Self {
        Self::new(false)
    }

    fn paint(self, color: &str, text: &str) -> String {
        if self.enabled {
            format!("{color}{text}{RESET}")
        } else {
            text.to_string()
        }
    }

    /// Highlighted text (names the user should notice).
    #[must_use]
    pub fn hl(self, text: &str) -> String {
        self.paint(YELLOW, text)
    }

    /// De-emphasized text (inherited origins, parent lists).
    #[must_use]
    pub fn muted(self, text: &str) -> String {
        self.paint(BLUE, text)
    }

    /// Good outcome.
    #[must_use]
    pub fn good(self, text: &str) -> String {
        self.paint(GREEN, text)
    }

    /// Outcome that needs attention.
    #[must_use]
    pub fn attention(self, text: &str) -> String {
        self.paint(YELLOW, text)
    }

    /// Bad outcome.
    #[must_use]
    pub fn bad(self, text: &str) -> String {
        self.paint(RED, text)
    }
}
