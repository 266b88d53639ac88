use std::io::{self, BufRead, Write};

/// Synchronous questions the dashboard asks the user mid-operation.
pub trait Interaction: Send + Sync {
    /// Free-text question. `None` when the user cancels or enters nothing.
    fn prompt(&self, question: &str) -> Option<String>;

    fn confirm(&self, question: &str) -> bool;
}

/// Asks on stdout and reads the answer from stdin.
pub struct TerminalInteraction;

impl TerminalInteraction {
    fn read_answer(question: &str) -> Option<String> {
        // Blocking read; keeps the other runtime workers free while waiting
        tokio::task::block_in_place(|| {
            let mut stdout = io::stdout();
            let _ = write!(stdout, "{} ", question);
            let _ = stdout.flush();

            let mut line = String::new();
            match io::stdin().lock().read_line(&mut line) {
                Ok(0) | Err(_) => None,
                Ok(_) => {
                    let answer = line.trim();
                    (!answer.is_empty()).then(|| answer.to_string())
                }
            }
        })
    }
}

impl Interaction for TerminalInteraction {
    fn prompt(&self, question: &str) -> Option<String> {
        Self::read_answer(question)
    }

    fn confirm(&self, question: &str) -> bool {
        Self::read_answer(&format!("{} [y/N]", question))
            .map(|a| matches!(a.to_lowercase().as_str(), "y" | "yes"))
            .unwrap_or(false)
    }
}

/// Fixed answers, for scripted runs and tests.
#[derive(Debug, Clone, Default)]
pub struct ScriptedInteraction {
    pub answer: Option<String>,
    pub confirm: bool,
}

impl Interaction for ScriptedInteraction {
    fn prompt(&self, _question: &str) -> Option<String> {
        self.answer.clone()
    }

    fn confirm(&self, _question: &str) -> bool {
        self.confirm
    }
}
