use std::io::{self, BufRead, Write};

// ---------------------------------------------------------------------------
// Prompter – the interactive collaborator
// ---------------------------------------------------------------------------

/// Free-form question/answer surface. The session and the app talk to the
/// user only through this trait, so the whole flow runs under test with a
/// scripted double instead of stdin.
pub trait Prompter {
    /// Show one line of output.
    fn say(&mut self, message: &str);

    /// Ask a question and return the trimmed reply.
    fn ask(&mut self, question: &str) -> io::Result<String>;

    /// Yes/no question; `y`/`yes` (any case) counts as yes.
    fn confirm(&mut self, question: &str) -> io::Result<bool> {
        let reply = self.ask(question)?;
        Ok(matches!(reply.to_ascii_lowercase().as_str(), "y" | "yes"))
    }
}

/// Stdin/stdout prompter used by the real application.
#[derive(Debug, Default)]
pub struct StdPrompter;

impl Prompter for StdPrompter {
    fn say(&mut self, message: &str) {
        println!("{message}");
    }

    fn ask(&mut self, question: &str) -> io::Result<String> {
        print!("{question} ");
        io::stdout().flush()?;
        let mut line = String::new();
        io::stdin().lock().read_line(&mut line)?;
        Ok(line.trim().to_string())
    }
}

// ---------------------------------------------------------------------------
// Scripted prompter (tests)
// ---------------------------------------------------------------------------

/// Replays canned answers in order and records everything shown or asked.
#[cfg(test)]
#[derive(Debug, Default)]
pub struct ScriptedPrompter {
    answers: std::collections::VecDeque<String>,
    pub transcript: Vec<String>,
}

#[cfg(test)]
impl ScriptedPrompter {
    pub fn with_answers(answers: &[&str]) -> Self {
        ScriptedPrompter {
            answers: answers.iter().map(|s| s.to_string()).collect(),
            transcript: Vec::new(),
        }
    }
}

#[cfg(test)]
impl Prompter for ScriptedPrompter {
    fn say(&mut self, message: &str) {
        self.transcript.push(message.to_string());
    }

    fn ask(&mut self, question: &str) -> io::Result<String> {
        self.transcript.push(question.to_string());
        Ok(self.answers.pop_front().unwrap_or_default())
    }
}
