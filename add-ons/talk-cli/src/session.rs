//! Interactive chat loop.
//!
//! Per input line, in order: `bye`, `help`, `trivia`, a number picking from the
//! last suggestion menu, a compound question, a keyword phrase (suggestion
//! menu), and finally a plain question.

use crate::output::{prompt, say};
use crate::trivia;
use rand::rngs::StdRng;
use rand::SeedableRng;
use std::io::{self, BufRead, Write};
use talk_core::{is_keyword_phrase, Assistant};

/// Whether the loop keeps reading after a line.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Flow {
    Continue,
    Exit,
}

pub struct Session<'a, R, W> {
    assistant: &'a mut Assistant,
    input: R,
    output: W,
    /// Questions from the last suggestion menu, cleared by any other input.
    suggestions: Option<Vec<String>>,
    rng: StdRng,
}

impl<'a, R: BufRead, W: Write> Session<'a, R, W> {
    pub fn new(assistant: &'a mut Assistant, input: R, output: W) -> Self {
        Self {
            assistant,
            input,
            output,
            suggestions: None,
            rng: StdRng::from_entropy(),
        }
    }

    /// Seeds the trivia shuffle.
    pub fn with_seed(mut self, seed: u64) -> Self {
        self.rng = StdRng::seed_from_u64(seed);
        self
    }

    /// Runs until `bye` or end of input.
    pub fn run(&mut self) -> io::Result<()> {
        say(&mut self.output, "Hello!")?;
        say(&mut self.output, "How can I help you? (Type 'bye' to exit)")?;
        loop {
            prompt(&mut self.output, "")?;
            let mut line = String::new();
            if self.input.read_line(&mut line)? == 0 {
                writeln!(self.output)?;
                say(&mut self.output, "Goodbye!")?;
                return Ok(());
            }
            if self.handle_line(line.trim())? == Flow::Exit {
                return Ok(());
            }
        }
    }

    pub fn handle_line(&mut self, line: &str) -> io::Result<Flow> {
        tracing::debug!(target: "terminaltalk::session", input = %line, "User input");
        if line.is_empty() {
            return Ok(Flow::Continue);
        }

        let lowered = line.to_lowercase();
        match lowered.as_str() {
            "bye" => {
                say(&mut self.output, "Goodbye!")?;
                return Ok(Flow::Exit);
            }
            "help" => {
                say(&mut self.output, "You can ask about:")?;
                for question in self.assistant.list_questions() {
                    writeln!(self.output, "{}", question)?;
                }
                return Ok(Flow::Continue);
            }
            "trivia" => {
                self.suggestions = None;
                let result = trivia::play(&mut self.input, &mut self.output, &mut self.rng)?;
                tracing::debug!(
                    target: "terminaltalk::session",
                    score = result.score,
                    asked = result.asked,
                    completed = result.completed,
                    "Back from trivia"
                );
                say(&mut self.output, "Trivia finished. Resuming normal chat...")?;
                writeln!(self.output)?;
                return Ok(Flow::Continue);
            }
            _ => {}
        }

        if line.chars().all(|c| c.is_ascii_digit()) {
            if let Some(menu) = self.suggestions.take() {
                let picked = line
                    .parse::<usize>()
                    .ok()
                    .and_then(|n| n.checked_sub(1))
                    .and_then(|i| menu.get(i));
                match picked {
                    Some(question) => {
                        let answer = self.assistant.resolve(question);
                        say(&mut self.output, answer)?;
                    }
                    None => say(&mut self.output, "Invalid selection.")?,
                }
                return Ok(Flow::Continue);
            }
        }
        self.suggestions = None;

        let parts = self.assistant.split(line);
        if parts.len() > 1 {
            for part in &parts {
                say(&mut self.output, format!("Q: {}", part))?;
                let answer = self.assistant.resolve(part);
                say(&mut self.output, format!("A: {}", answer))?;
            }
            return Ok(Flow::Continue);
        }

        if is_keyword_phrase(line) {
            let found = self.assistant.suggest(line);
            if !found.is_empty() {
                say(&mut self.output, "I found related questions:")?;
                for (i, s) in found.iter().enumerate() {
                    say(&mut self.output, format!("{}. {}", i + 1, s.question))?;
                }
                say(&mut self.output, "Choose a number.")?;
                self.suggestions = Some(found.into_iter().map(|s| s.question).collect());
                return Ok(Flow::Continue);
            }
        }

        let answer = self.assistant.resolve(line);
        say(&mut self.output, answer)?;
        Ok(Flow::Continue)
    }

    #[cfg(test)]
    pub fn into_output(self) -> W {
        self.output
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Cursor;
    use talk_core::{builtin_book, CoreConfig, HashingEmbedder, KnowledgeStore, NO_MATCH_MESSAGE};

    fn assistant() -> Assistant {
        Assistant::new(
            KnowledgeStore::with_builtin_defaults(),
            Box::new(HashingEmbedder::default()),
            &CoreConfig::default(),
        )
        .with_seed(9)
    }

    fn chat(script: &str) -> String {
        let mut assistant = assistant();
        let mut session =
            Session::new(&mut assistant, Cursor::new(script.to_string()), Vec::new()).with_seed(1);
        session.run().unwrap();
        String::from_utf8(session.into_output()).unwrap()
    }

    fn answers_of(question: &str) -> Vec<String> {
        builtin_book().get(question).unwrap().to_vec()
    }

    #[test]
    fn greets_and_says_goodbye() {
        let out = chat("bye\n");
        assert!(out.contains("Hello!"));
        assert!(out.contains("How can I help you? (Type 'bye' to exit)"));
        assert!(out.trim_end().ends_with("Goodbye!"));
    }

    #[test]
    fn end_of_input_ends_session() {
        let out = chat("");
        assert!(out.trim_end().ends_with("Goodbye!"));
    }

    #[test]
    fn help_lists_known_questions() {
        let out = chat("help\nbye\n");
        assert!(out.contains("You can ask about:"));
        assert!(out.contains("\nwhat is git?\n"));
    }

    #[test]
    fn plain_question_prints_an_answer() {
        let out = chat("What is Git?\nbye\n");
        assert!(answers_of("what is git?").iter().any(|a| out.contains(a.as_str())));
    }

    #[test]
    fn unknown_question_prints_fixed_reply() {
        let out = chat("why do aliens love pizza?\nbye\n");
        assert!(out.contains(NO_MATCH_MESSAGE));
    }

    #[test]
    fn compound_question_answers_each_part() {
        let out = chat("what is git and what is json\nbye\n");
        assert!(out.contains("Q: what is git\n"));
        assert!(out.contains("Q: what is json\n"));
        assert_eq!(out.matches(" A: ").count(), 2);
        assert!(answers_of("what is json?").iter().any(|a| out.contains(a.as_str())));
    }

    #[test]
    fn keyword_menu_then_numeric_pick() {
        let mut assistant = assistant();
        let mut session = Session::new(&mut assistant, Cursor::new(String::new()), Vec::new());
        session.handle_line("library").unwrap();
        let menu = session.suggestions.clone().unwrap();
        assert!(!menu.is_empty());
        session.handle_line("1").unwrap();
        assert!(session.suggestions.is_none());

        let out = String::from_utf8(session.into_output()).unwrap();
        assert!(out.contains("I found related questions:"));
        assert!(out.contains(&format!("1. {}", menu[0])));
        assert!(out.contains("Choose a number."));
        assert!(answers_of(&menu[0]).iter().any(|a| out.contains(a.as_str())));
    }

    #[test]
    fn out_of_range_pick_is_invalid() {
        let out = chat("library\n9\nbye\n");
        assert!(out.contains("Invalid selection."));
        let out = chat("library\n0\nbye\n");
        assert!(out.contains("Invalid selection."));
    }

    #[test]
    fn other_input_clears_the_menu() {
        let mut assistant = assistant();
        let mut session = Session::new(&mut assistant, Cursor::new(String::new()), Vec::new());
        session.handle_line("library").unwrap();
        assert!(session.suggestions.is_some());
        session.handle_line("what is git?").unwrap();
        assert!(session.suggestions.is_none());

        // Without a menu a bare number is just another question.
        session.handle_line("2").unwrap();
        let out = String::from_utf8(session.into_output()).unwrap();
        assert!(!out.contains("Invalid selection."));
    }

    #[test]
    fn trivia_runs_and_chat_resumes() {
        let out = chat("trivia\ntrivia\nbye\n");
        assert!(out.contains("Trivia mode activated!"));
        assert!(out.contains("Your score: 0/0"));
        assert!(out.contains("Trivia finished. Resuming normal chat..."));
        assert!(out.trim_end().ends_with("Goodbye!"));
    }
}
