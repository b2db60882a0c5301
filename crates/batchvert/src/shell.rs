use core::fmt;

use std::borrow::Cow;
use std::ffi::OsStr;
use std::process::Command;

/// Escape a string so that it can be pasted into a bash prompt.
pub(crate) fn escape(s: &OsStr) -> Cow<'_, str> {
    let s = s.to_string_lossy();

    if !s.chars().any(|c| escape_in_bash(c).is_some()) {
        return s;
    }

    let mut o = String::with_capacity(s.len() + 8);

    for c in s.chars() {
        match escape_in_bash(c) {
            Some(escaped) => o.push_str(escaped),
            None => o.push(c),
        }
    }

    Cow::Owned(o)
}

fn escape_in_bash(c: char) -> Option<&'static str> {
    let escaped = match c {
        ' ' => "\\ ",
        '"' => "\\\"",
        '\'' => "\\'",
        '\\' => "\\\\",
        '$' => "\\$",
        '`' => "\\`",
        '&' => "\\&",
        '|' => "\\|",
        ';' => "\\;",
        '<' => "\\<",
        '>' => "\\>",
        '!' => "\\!",
        '(' => "\\(",
        ')' => "\\)",
        '[' => "\\[",
        ']' => "\\]",
        '*' => "\\*",
        '?' => "\\?",
        _ => return None,
    };

    Some(escaped)
}

/// Display a command the way it would be typed into a shell.
pub(crate) struct CommandLine<'a>(pub(crate) &'a Command);

impl fmt::Display for CommandLine<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", escape(self.0.get_program()))?;

        for arg in self.0.get_args() {
            write!(f, " {}", escape(arg))?;
        }

        Ok(())
    }
}
