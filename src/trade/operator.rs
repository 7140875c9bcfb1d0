//! The human in the loop.
//!
//! The pipeline never reads the terminal directly: progress lines and the
//! two Y/N gates go through [`Operator`], so tests can script the answers.

use std::collections::VecDeque;
use std::io::{self, BufRead, Write};

/// Capability to report progress and ask for confirmation.
pub trait Operator {
    /// Show one line of progress.
    fn show(&mut self, line: &str) -> io::Result<()>;

    /// Ask a yes/no question. `false` means the operator declined.
    fn confirm(&mut self, prompt: &str) -> io::Result<bool>;
}

/// Answer to a single confirmation line.
fn parse_answer(line: &str) -> Option<bool> {
    match line.trim() {
        "Y" | "y" => Some(true),
        "N" | "n" => Some(false),
        _ => None,
    }
}

/// Operator on a reader/writer pair, normally stdin/stdout.
///
/// `Y`/`y` accepts, `N`/`n` declines, anything else asks again. End of input
/// declines, so a closed stdin can never approve a broadcast.
pub struct TerminalOperator<R, W> {
    input: R,
    output: W,
}

impl<R: BufRead, W: Write> TerminalOperator<R, W> {
    pub fn new(input: R, output: W) -> Self {
        Self { input, output }
    }

    pub fn into_output(self) -> W {
        self.output
    }
}

impl TerminalOperator<io::StdinLock<'static>, io::Stdout> {
    pub fn stdio() -> Self {
        Self::new(io::stdin().lock(), io::stdout())
    }
}

impl<R: BufRead, W: Write> Operator for TerminalOperator<R, W> {
    fn show(&mut self, line: &str) -> io::Result<()> {
        writeln!(self.output, "{}", line)
    }

    fn confirm(&mut self, prompt: &str) -> io::Result<bool> {
        loop {
            writeln!(self.output, "{}", prompt)?;
            self.output.flush()?;

            let mut line = String::new();
            if self.input.read_line(&mut line)? == 0 {
                return Ok(false);
            }
            match parse_answer(&line) {
                Some(answer) => return Ok(answer),
                None => writeln!(self.output, "Please enter Y/y or N/n")?,
            }
        }
    }
}

/// Operator with canned answers. Records everything shown and asked.
#[derive(Debug, Default)]
pub struct ScriptedOperator {
    answers: VecDeque<bool>,
    pub shown: Vec<String>,
    pub prompts: Vec<String>,
}

impl ScriptedOperator {
    pub fn new(answers: impl IntoIterator<Item = bool>) -> Self {
        Self {
            answers: answers.into_iter().collect(),
            ..Default::default()
        }
    }
}

impl Operator for ScriptedOperator {
    fn show(&mut self, line: &str) -> io::Result<()> {
        self.shown.push(line.to_string());
        Ok(())
    }

    /// Runs out of answers → declines.
    fn confirm(&mut self, prompt: &str) -> io::Result<bool> {
        self.prompts.push(prompt.to_string());
        Ok(self.answers.pop_front().unwrap_or(false))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Cursor;

    fn ask(input: &str) -> (bool, String) {
        let mut operator = TerminalOperator::new(Cursor::new(input.to_string()), Vec::new());
        let answer = operator.confirm("Start transaction? (Y/y/N/n)").unwrap();
        (answer, String::from_utf8(operator.into_output()).unwrap())
    }

    #[test]
    fn test_accepts_upper_and_lower_case() {
        assert!(ask("Y\n").0);
        assert!(ask("y\n").0);
        assert!(!ask("N\n").0);
        assert!(!ask("n\n").0);
    }

    #[test]
    fn test_reprompts_on_anything_else() {
        let (answer, output) = ask("yes\n\nmaybe\ny\n");
        assert!(answer);
        assert_eq!(output.matches("Start transaction?").count(), 4);
        assert_eq!(output.matches("Please enter Y/y or N/n").count(), 3);
    }

    #[test]
    fn test_end_of_input_declines() {
        assert!(!ask("").0);
        assert!(!ask("what\n").0);
    }

    #[test]
    fn test_scripted_operator_defaults_to_no() {
        let mut operator = ScriptedOperator::new([true]);
        assert!(operator.confirm("first").unwrap());
        assert!(!operator.confirm("second").unwrap());
        assert_eq!(operator.prompts, vec!["first", "second"]);
    }
}
