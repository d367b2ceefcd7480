use anyhow::{Context, Result};
use rustyline::DefaultEditor;
use rustyline::error::ReadlineError;

/// Where prompted lines come from.
pub trait LineSource {
    /// One line, `None` when the user ends input.
    fn read_line(&mut self, prompt: &str) -> Result<Option<String>>;
}

impl LineSource for DefaultEditor {
    fn read_line(&mut self, prompt: &str) -> Result<Option<String>> {
        match self.readline(prompt) {
            Ok(line) => {
                if !line.trim().is_empty() {
                    let _ = self.add_history_entry(line.as_str());
                }
                Ok(Some(line))
            }
            Err(ReadlineError::Interrupted) | Err(ReadlineError::Eof) => Ok(None),
            Err(e) => Err(e).context("Failed to read input"),
        }
    }
}

/// Line-oriented prompt over a [`LineSource`].
pub struct Prompt<S> {
    source: S,
}

impl Prompt<DefaultEditor> {
    /// Prompt with line editing and per-command history.
    pub fn terminal() -> Result<Self> {
        let editor = DefaultEditor::new().context("Failed to open line editor")?;
        Ok(Self { source: editor })
    }
}

impl<S: LineSource> Prompt<S> {
    #[cfg(test)]
    pub fn new(source: S) -> Self {
        Self { source }
    }

    /// Trimmed answer, `None` at end of input.
    pub fn ask(&mut self, message: &str) -> Result<Option<String>> {
        let line = self.source.read_line(&format!("{} ", message))?;
        Ok(line.map(|l| l.trim().to_string()))
    }

    /// Yes/no question defaulting to no.
    pub fn confirm(&mut self, message: &str) -> Result<bool> {
        let answer = self.ask(&format!("{} [y/N]", message))?;
        Ok(matches!(
            answer.as_deref().map(str::to_ascii_lowercase).as_deref(),
            Some("y" | "yes")
        ))
    }
}

/// Made count of a round, 0 to 5.
pub fn parse_made(input: &str) -> Option<u32> {
    input.parse().ok().filter(|made| *made <= 5)
}

/// Five putts as make/miss marks: `1`, `x` or `y` for a make, `0`, `o`, `n`
/// or `-` for a miss. Spaces are ignored.
pub fn parse_sequence(input: &str) -> Option<Vec<bool>> {
    let sequence = input
        .chars()
        .filter(|c| !c.is_whitespace())
        .map(|c| match c.to_ascii_lowercase() {
            '1' | 'x' | 'y' => Some(true),
            '0' | 'o' | 'n' | '-' => Some(false),
            _ => None,
        })
        .collect::<Option<Vec<bool>>>()?;
    (sequence.len() == 5).then_some(sequence)
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::VecDeque;

    /// Replays canned lines, then reports end of input.
    struct Scripted(VecDeque<&'static str>);

    impl LineSource for Scripted {
        fn read_line(&mut self, _prompt: &str) -> Result<Option<String>> {
            Ok(self.0.pop_front().map(str::to_string))
        }
    }

    fn scripted(lines: &[&'static str]) -> Prompt<Scripted> {
        Prompt::new(Scripted(lines.iter().copied().collect()))
    }

    #[test]
    fn test_parse_made() {
        assert_eq!(parse_made("3"), Some(3));
        assert_eq!(parse_made("6"), None);
        assert_eq!(parse_made("three"), None);
    }

    #[test]
    fn test_parse_sequence() {
        assert_eq!(
            parse_sequence("x o x x -"),
            Some(vec![true, false, true, true, false])
        );
        assert_eq!(parse_sequence("11110"), Some(vec![true, true, true, true, false]));
        assert_eq!(parse_sequence("1111"), None);
        assert_eq!(parse_sequence("11a11"), None);
    }

    #[test]
    fn test_prompt_reads_lines_until_eof() {
        let mut prompt = scripted(&["  4 ", "y"]);
        assert_eq!(prompt.ask(">").unwrap().as_deref(), Some("4"));
        assert!(prompt.confirm("sure?").unwrap());
        assert_eq!(prompt.ask(">").unwrap(), None);
        assert!(!prompt.confirm("sure?").unwrap());
    }

    #[test]
    fn test_confirm_defaults_to_no() {
        let mut prompt = scripted(&["", "nope", "YES"]);
        assert!(!prompt.confirm("sure?").unwrap());
        assert!(!prompt.confirm("sure?").unwrap());
        assert!(prompt.confirm("sure?").unwrap());
    }
}
