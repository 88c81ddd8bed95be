//! Campus and programming multiple-choice trivia.

use crate::output::{prompt, say};
use rand::seq::SliceRandom;
use rand::Rng;
use std::io::{self, BufRead, Write};

/// Rounds in one game.
pub const ROUNDS: usize = 10;

const LETTERS: [char; 4] = ['A', 'B', 'C', 'D'];

/// Typing this instead of an answer ends the game early.
const EXIT_WORD: &str = "trivia";

#[derive(Debug, Clone, Copy)]
pub struct TriviaQuestion {
    pub prompt: &'static str,
    /// Options in A-D order.
    pub options: [&'static str; 4],
    pub correct: char,
}

pub const BANK: &[TriviaQuestion] = &[
    TriviaQuestion {
        prompt: "What is the name of the University's online student portal?",
        options: ["Moodle", "UniPortal", "CampusNet", "LearnSpace"],
        correct: 'C',
    },
    TriviaQuestion {
        prompt: "Where can students find the official exam schedule?",
        options: ["Cafeteria menu board", "Student portal", "Gym notice board", "Library basement"],
        correct: 'B',
    },
    TriviaQuestion {
        prompt: "What document is usually required to collect a student ID card?",
        options: ["Passport photo", "Valid photo ID", "Doctor's note", "Birth certificate"],
        correct: 'B',
    },
    TriviaQuestion {
        prompt: "Which building contains the main library?",
        options: ["Building A", "Building L", "Building C", "Building B"],
        correct: 'A',
    },
    TriviaQuestion {
        prompt: "Where can students reset their university password?",
        options: ["The examination office", "The IT helpdesk portal", "The gym registration desk", "Lecture hall 203"],
        correct: 'B',
    },
    TriviaQuestion {
        prompt: "What does OOP stand for in computer science?",
        options: ["Office Operation Plan", "Object-Oriented Programming", "Official Online Process", "Online Output Page"],
        correct: 'B',
    },
    TriviaQuestion {
        prompt: "Which campus location is typically used for large exams?",
        options: ["The gym hall", "Lecture hall 203", "Building A rooftop", "The library study rooms"],
        correct: 'B',
    },
    TriviaQuestion {
        prompt: "Where can a student get their semester timetable?",
        options: ["Student portal", "Library desk", "Campus café", "By email from professors"],
        correct: 'A',
    },
    TriviaQuestion {
        prompt: "Which service does the cafeteria primarily provide?",
        options: ["Free textbooks", "Meals and drinks", "Parking permits", "Medical check-ups"],
        correct: 'B',
    },
    TriviaQuestion {
        prompt: "Who can help students with academic registration issues?",
        options: ["IT department", "Admissions office", "Sports center staff", "Cafeteria chef"],
        correct: 'B',
    },
    TriviaQuestion {
        prompt: "What is JSON commonly used for?",
        options: ["Drawing images", "Storing structured data", "Writing essays", "Software installation"],
        correct: 'B',
    },
    TriviaQuestion {
        prompt: "Which office manages exam results?",
        options: ["Admissions office", "Examination office", "Library helpdesk", "Campus security"],
        correct: 'B',
    },
    TriviaQuestion {
        prompt: "Where does the semester typically start?",
        options: ["Beginning of October", "End of December", "Middle of June", "March 1st"],
        correct: 'A',
    },
    TriviaQuestion {
        prompt: "What programming structure allows repeating actions?",
        options: ["Loop", "Folder", "Filter", "Module"],
        correct: 'A',
    },
    TriviaQuestion {
        prompt: "What do students usually use the library for?",
        options: ["Sleeping", "Studying and borrowing books", "Printing ID cards", "Submitting exam papers"],
        correct: 'B',
    },
];

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct TriviaScore {
    pub score: usize,
    pub asked: usize,
    /// False when the player left before the last round.
    pub completed: bool,
}

/// Plays one game over the built-in bank.
pub fn play<R, W, G>(input: &mut R, out: &mut W, rng: &mut G) -> io::Result<TriviaScore>
where
    R: BufRead + ?Sized,
    W: Write + ?Sized,
    G: Rng + ?Sized,
{
    play_with(BANK, input, out, rng)
}

pub(crate) fn play_with<R, W, G>(
    bank: &[TriviaQuestion],
    input: &mut R,
    out: &mut W,
    rng: &mut G,
) -> io::Result<TriviaScore>
where
    R: BufRead + ?Sized,
    W: Write + ?Sized,
    G: Rng + ?Sized,
{
    say(out, "Trivia mode activated! Type 'trivia' again to exit the game early.")?;
    writeln!(out)?;

    let mut order: Vec<&TriviaQuestion> = bank.iter().collect();
    order.shuffle(rng);

    let mut score = 0;
    let mut asked = 0;
    while asked < ROUNDS && !order.is_empty() {
        let q = order[asked % order.len()];
        say(out, format!("Question {} of {}; Score {}/{}", asked + 1, ROUNDS, score, ROUNDS))?;
        say(out, format!("Q{}: {}", asked + 1, q.prompt))?;
        for (letter, option) in LETTERS.iter().zip(q.options.iter()) {
            writeln!(out, "   {}. {}", letter, option)?;
        }
        prompt(out, "Your answer (A/B/C/D):")?;

        let mut line = String::new();
        let read = input.read_line(&mut line)?;
        let answer = line.trim();
        if read == 0 || answer.eq_ignore_ascii_case(EXIT_WORD) {
            writeln!(out)?;
            say(out, "Exiting Trivia mode early.")?;
            say(out, format!("Your score: {}/{}", score, asked))?;
            writeln!(out)?;
            tracing::info!(target: "terminaltalk::trivia", score, asked, "Trivia left early");
            return Ok(TriviaScore {
                score,
                asked,
                completed: false,
            });
        }

        let mut chars = answer.chars();
        let correct = matches!(
            (chars.next(), chars.next()),
            (Some(c), None) if c.eq_ignore_ascii_case(&q.correct)
        );
        if correct {
            say(out, "Correct!")?;
            score += 1;
        } else {
            say(out, format!("Incorrect! Correct answer: {}", q.correct))?;
        }
        writeln!(out)?;
        asked += 1;
    }

    say(out, format!("Trivia complete! Your final score: {}/{}", score, ROUNDS))?;
    writeln!(out)?;
    tracing::info!(target: "terminaltalk::trivia", score, rounds = ROUNDS, "Trivia complete");
    Ok(TriviaScore {
        score,
        asked,
        completed: true,
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use rand::rngs::StdRng;
    use rand::SeedableRng;
    use std::io::Cursor;

    const ALL_A: &[TriviaQuestion] = &[
        TriviaQuestion {
            prompt: "first?",
            options: ["yes", "no", "maybe", "never"],
            correct: 'A',
        },
        TriviaQuestion {
            prompt: "second?",
            options: ["yes", "no", "maybe", "never"],
            correct: 'A',
        },
    ];

    fn run(bank: &[TriviaQuestion], input: &str) -> (TriviaScore, String) {
        let mut input = Cursor::new(input.to_string());
        let mut out = Vec::new();
        let mut rng = StdRng::seed_from_u64(3);
        let score = play_with(bank, &mut input, &mut out, &mut rng).unwrap();
        (score, String::from_utf8(out).unwrap())
    }

    #[test]
    fn bank_is_well_formed() {
        assert_eq!(BANK.len(), 15);
        assert!(BANK.iter().all(|q| LETTERS.contains(&q.correct)));
    }

    #[test]
    fn full_game_counts_case_insensitive_answers() {
        let (score, out) = run(ALL_A, &"a\n".repeat(ROUNDS));
        assert_eq!(
            score,
            TriviaScore {
                score: ROUNDS,
                asked: ROUNDS,
                completed: true
            }
        );
        assert!(out.contains("Trivia complete! Your final score: 10/10"));
        assert!(out.contains("   A. yes"));
    }

    #[test]
    fn wrong_answers_show_the_correct_letter() {
        let (score, out) = run(ALL_A, &"b\n".repeat(ROUNDS));
        assert_eq!(score.score, 0);
        assert!(out.contains("Incorrect! Correct answer: A"));
    }

    #[test]
    fn typing_trivia_leaves_early() {
        let (score, out) = run(ALL_A, "a\nb\nTRIVIA\n");
        assert_eq!(
            score,
            TriviaScore {
                score: 1,
                asked: 2,
                completed: false
            }
        );
        assert!(out.contains("Your score: 1/2"));
    }

    #[test]
    fn end_of_input_leaves_early() {
        let (score, _) = run(ALL_A, "a\n");
        assert_eq!(score.asked, 1);
        assert!(!score.completed);
    }

    #[test]
    fn built_in_game_asks_ten_distinct_questions() {
        let (score, out) = run(BANK, &"x\n".repeat(ROUNDS));
        assert_eq!(score.asked, ROUNDS);
        let asked: std::collections::HashSet<&str> = out
            .lines()
            .filter_map(|l| l.split_once(": ").map(|(_, rest)| rest))
            .filter(|rest| BANK.iter().any(|q| q.prompt == *rest))
            .collect();
        assert_eq!(asked.len(), ROUNDS);
    }
}
