use std::collections::BTreeMap;

use super::content::{Letter, QuizQuestion};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum QuizPhase {
    /// no questions loaded
    Empty,
    Answering,
    /// answers are locked
    Revealed,
}

/// Outcome of one question once answers are revealed.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct QuestionResult {
    pub index: usize,
    pub chosen: Option<Letter>,
    pub correct_answer: Letter,
    /// unanswered counts as incorrect
    pub is_correct: bool,
}

/// Answers for one batch of questions.
///
/// Answers can change freely until [`QuizSession::reveal`]; after that the
/// session is frozen until [`QuizSession::reset`] loads a new batch.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct QuizSession {
    questions: Vec<QuizQuestion>,
    answers: BTreeMap<usize, Letter>,
    revealed: bool,
}

impl QuizSession {
    pub fn new(questions: Vec<QuizQuestion>) -> Self {
        Self {
            questions,
            ..Self::default()
        }
    }

    pub fn phase(&self) -> QuizPhase {
        if self.revealed {
            QuizPhase::Revealed
        } else if self.questions.is_empty() {
            QuizPhase::Empty
        } else {
            QuizPhase::Answering
        }
    }

    pub fn answers(&self) -> &BTreeMap<usize, Letter> {
        &self.answers
    }

    pub fn answer(&self, index: usize) -> Option<Letter> {
        self.answers.get(&index).copied()
    }

    pub fn is_revealed(&self) -> bool {
        self.revealed
    }

    /// Sets the answer for `index`, replacing any earlier one.
    ///
    /// Ignored (returns `false`) outside [`QuizPhase::Answering`] or for an
    /// index past the last question.
    pub fn record_answer(&mut self, index: usize, letter: Letter) -> bool {
        if self.phase() != QuizPhase::Answering || index >= self.questions.len() {
            return false;
        }
        self.answers.insert(index, letter);
        true
    }

    /// Locks the answers. Returns `false` if there was nothing to reveal or it
    /// already happened.
    pub fn reveal(&mut self) -> bool {
        if self.phase() != QuizPhase::Answering {
            return false;
        }
        self.revealed = true;
        true
    }

    /// Discards everything and starts answering `questions`.
    pub fn reset(&mut self, questions: Vec<QuizQuestion>) {
        *self = Self::new(questions);
    }

    pub fn clear(&mut self) {
        *self = Self::default();
    }

    pub fn results(&self) -> Option<Vec<QuestionResult>> {
        if !self.revealed {
            return None;
        }

        Some(
            self.questions
                .iter()
                .enumerate()
                .map(|(index, question)| {
                    let chosen = self.answer(index);
                    QuestionResult {
                        index,
                        chosen,
                        correct_answer: question.correct_answer,
                        is_correct: chosen == Some(question.correct_answer),
                    }
                })
                .collect(),
        )
    }

    pub fn correctness(&self) -> Option<Vec<bool>> {
        self.results()
            .map(|results| results.iter().map(|r| r.is_correct).collect())
    }

    /// `(correct, total)` once revealed.
    pub fn score(&self) -> Option<(usize, usize)> {
        self.results().map(|results| {
            let correct = results.iter().filter(|r| r.is_correct).count();
            (correct, results.len())
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn question(correct: Letter) -> QuizQuestion {
        QuizQuestion {
            question: "Pick one".to_string(),
            options: Letter::ALL
                .iter()
                .map(|l| (*l, format!("option {}", l)))
                .collect(),
            correct_answer: correct,
            explanation: "Penjelasan".to_string(),
        }
    }

    fn session() -> QuizSession {
        QuizSession::new(vec![question(Letter::A), question(Letter::C), question(Letter::D)])
    }

    #[test]
    fn starts_empty_then_answers_on_load() {
        let mut quiz = QuizSession::default();
        assert_eq!(quiz.phase(), QuizPhase::Empty);
        assert!(!quiz.record_answer(0, Letter::A));
        assert!(!quiz.reveal());

        quiz.reset(vec![question(Letter::B)]);
        assert_eq!(quiz.phase(), QuizPhase::Answering);
        assert!(quiz.answers().is_empty());
    }

    #[test]
    fn later_answer_overwrites_earlier() {
        let mut quiz = session();
        assert!(quiz.record_answer(1, Letter::A));
        assert!(quiz.record_answer(1, Letter::C));
        assert_eq!(quiz.answer(1), Some(Letter::C));
        assert_eq!(quiz.answers().len(), 1);
    }

    #[test]
    fn out_of_range_index_is_ignored() {
        let mut quiz = session();
        assert!(!quiz.record_answer(3, Letter::A));
        assert!(quiz.answers().is_empty());
    }

    #[test]
    fn answers_are_frozen_after_reveal() {
        let mut quiz = session();
        quiz.record_answer(0, Letter::A);
        assert!(quiz.reveal());
        let frozen = quiz.answers().clone();

        assert!(!quiz.record_answer(0, Letter::B));
        assert!(!quiz.record_answer(2, Letter::D));
        assert_eq!(quiz.answers(), &frozen);
        assert_eq!(quiz.phase(), QuizPhase::Revealed);
    }

    #[test]
    fn reveal_is_idempotent() {
        let mut quiz = session();
        quiz.record_answer(0, Letter::A);
        quiz.record_answer(1, Letter::B);

        assert!(quiz.reveal());
        let once = quiz.correctness();
        assert!(!quiz.reveal());
        assert_eq!(quiz.correctness(), once);
        assert_eq!(once, Some(vec![true, false, false]));
    }

    #[test]
    fn unanswered_questions_count_as_incorrect() {
        let mut quiz = QuizSession::new(vec![
            question(Letter::A),
            question(Letter::A),
            question(Letter::A),
        ]);
        quiz.record_answer(0, Letter::B);
        quiz.reveal();

        assert_eq!(quiz.correctness(), Some(vec![false, false, false]));
        assert_eq!(quiz.score(), Some((0, 3)));

        let results = quiz.results().unwrap();
        assert_eq!(results[0].chosen, Some(Letter::B));
        assert_eq!(results[1].chosen, None);
        assert_eq!(results[2].correct_answer, Letter::A);
    }

    #[test]
    fn nothing_is_derived_before_reveal() {
        let mut quiz = session();
        quiz.record_answer(0, Letter::A);
        assert_eq!(quiz.results(), None);
        assert_eq!(quiz.score(), None);
    }

    #[test]
    fn reset_discards_revealed_state() {
        let mut quiz = session();
        quiz.record_answer(0, Letter::A);
        quiz.reveal();

        quiz.reset(vec![question(Letter::B), question(Letter::B), question(Letter::B)]);
        assert_eq!(quiz.phase(), QuizPhase::Answering);
        assert!(quiz.answers().is_empty());
        assert!(quiz.record_answer(0, Letter::B));

        quiz.clear();
        assert_eq!(quiz.phase(), QuizPhase::Empty);
    }
}
