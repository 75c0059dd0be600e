use crate::data::Word;
use std::io;
use std::iter::zip;
use std::result::Result;
use thiserror::Error;

#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};

/// The maximum number of letters that can be packed into a [`CompressedGuessResult`].
pub const MAX_LETTERS_IN_COMPRESSED_GUESS_RESULT: usize = 16;

/// The result of a given letter at a specific location. There is some complexity here when a
/// letter appears in a word more than once. See [`GuessResult`] for more details.
#[derive(Debug, Default, Eq, PartialEq, Hash, Clone, Copy)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub enum LetterResult {
    /// Nothing is known about this letter. This is never produced by [`get_result_for_guess`].
    #[default]
    Unknown,
    /// This letter goes exactly here in the objective word.
    Correct,
    /// This letter is in the objective word, but not here.
    PresentNotHere,
    /// This letter is not in the objective word, or is only in the word as many times as it was
    /// marked either `PresentNotHere` or `Correct`.
    NotPresent,
}

/// Indicates that an error occurred while trying to guess the objective word.
#[derive(Debug, Error)]
pub enum WordleError {
    /// Two words, or a word and a set of restrictions, don't have the same number of letters.
    #[error("expected a word with {expected} letters, but found one with {actual}")]
    LengthMismatch { expected: usize, actual: usize },
    /// The given results contradict what is already known about the objective word.
    #[error("conflicting restriction: {0}")]
    ConflictingRestriction(String),
    /// No word in the word bank satisfies the known restrictions.
    #[error("no more valid guesses")]
    NoGuessAvailable,
    /// A word bank was constructed without any words.
    #[error("at least one word must be provided")]
    EmptyWordBank,
    /// A word bank was constructed with words of different lengths.
    #[error("words must all be the same length: found a word with {actual} letters when expecting {expected}")]
    InconsistentWordLengths { expected: usize, actual: usize },
    /// The words are too long to be scored.
    #[error("words with {length} letters are longer than the supported maximum of {max}")]
    WordTooLong { length: usize, max: usize },
    /// A guesser could not accept the result of its own guess. This indicates a bug rather than
    /// bad input.
    #[error("failed to update the guesser with the result for \"{guess}\"")]
    GuesserUpdate {
        guess: Word,
        #[source]
        source: Box<WordleError>,
    },
    /// The worker pool for precomputing scores could not be created.
    #[error("failed to build the scoring thread pool")]
    ThreadPool(#[from] rayon::ThreadPoolBuildError),
    /// Words could not be read.
    #[error("failed to read words")]
    Io(#[from] io::Error),
}

/// The result of a single word guess.
///
/// There is some complexity here when the guess has duplicate letters. Duplicate letters are
/// matched to [`LetterResult`]s as follows:
///
/// 1. All letters in the correct location are marked `Correct`.
/// 2. For any remaining letters, if the objective word has more letters than were marked correct,
///    then these letters are marked as `PresentNotHere` starting from the beginning of the word,
///    until all letters have been accounted for.
/// 3. Any remaining letters are marked as `NotPresent`.
///
/// For example, if the guess was "sassy" for the objective word "mesas", then the results would
/// be: `[PresentNotHere, PresentNotHere, Correct, NotPresent, NotPresent]`.
#[derive(Debug, Clone, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct GuessResult {
    /// The guess that was made.
    pub guess: Word,
    /// The result of each letter, provided in the same letter order as in the guess.
    pub results: Vec<LetterResult>,
}

impl GuessResult {
    /// Returns true iff every letter in the guess was `Correct`.
    pub fn is_correct(&self) -> bool {
        !self.results.is_empty()
            && self
                .results
                .iter()
                .all(|result| *result == LetterResult::Correct)
    }
}

/// Determines the result of the given `guess` when applied to the given `objective`.
///
/// Returns [`WordleError::LengthMismatch`] if the two words have a different number of letters.
///
/// ```
/// use rs_wordle_narrower::*;
///
/// let result = get_result_for_guess(&Word::from("mesas"), &Word::from("sassy")).unwrap();
///
/// assert_eq!(
///     result.results,
///     vec![
///         LetterResult::PresentNotHere,
///         LetterResult::PresentNotHere,
///         LetterResult::Correct,
///         LetterResult::NotPresent,
///         LetterResult::NotPresent,
///     ]
/// );
/// ```
pub fn get_result_for_guess(objective: &Word, guess: &Word) -> Result<GuessResult, WordleError> {
    if objective.len() != guess.len() {
        return Err(WordleError::LengthMismatch {
            expected: objective.len(),
            actual: guess.len(),
        });
    }
    let mut results = vec![LetterResult::NotPresent; guess.len()];
    // Objective letters that were not matched exactly, with how many times each is unmatched.
    let mut unmatched: Vec<(char, usize)> = Vec::with_capacity(objective.len());
    for (index, (objective_letter, guess_letter)) in
        zip(objective.letters(), guess.letters()).enumerate()
    {
        if objective_letter == guess_letter {
            results[index] = LetterResult::Correct;
            continue;
        }
        match unmatched
            .iter_mut()
            .find(|(letter, _)| letter == objective_letter)
        {
            Some((_, count)) => *count += 1,
            None => unmatched.push((*objective_letter, 1)),
        }
    }
    for (index, guess_letter) in guess.letters().iter().enumerate() {
        if results[index] == LetterResult::Correct {
            continue;
        }
        if let Some((_, count)) = unmatched
            .iter_mut()
            .find(|(letter, count)| letter == guess_letter && *count > 0)
        {
            *count -= 1;
            results[index] = LetterResult::PresentNotHere;
        }
    }
    Ok(GuessResult {
        guess: guess.clone(),
        results,
    })
}

/// A compact form of a list of [`LetterResult`]s, used as a cheap hash key when grouping words by
/// the result they would produce.
///
/// Each letter takes two bits, so at most [`MAX_LETTERS_IN_COMPRESSED_GUESS_RESULT`] letters are
/// supported. Results of different lengths must not be compared.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct CompressedGuessResult {
    data: u32,
}

impl CompressedGuessResult {
    /// Packs the given results.
    ///
    /// Returns [`WordleError::WordTooLong`] if there are more than
    /// [`MAX_LETTERS_IN_COMPRESSED_GUESS_RESULT`] results.
    pub fn from_results(results: &[LetterResult]) -> Result<CompressedGuessResult, WordleError> {
        if results.len() > MAX_LETTERS_IN_COMPRESSED_GUESS_RESULT {
            return Err(WordleError::WordTooLong {
                length: results.len(),
                max: MAX_LETTERS_IN_COMPRESSED_GUESS_RESULT,
            });
        }
        let mut data = 0;
        for (index, result) in results.iter().enumerate() {
            data |= CompressedGuessResult::letter_bits(*result) << (index * 2);
        }
        Ok(CompressedGuessResult { data })
    }

    fn letter_bits(result: LetterResult) -> u32 {
        match result {
            LetterResult::Unknown => 0,
            LetterResult::Correct => 1,
            LetterResult::PresentNotHere => 2,
            LetterResult::NotPresent => 3,
        }
    }
}

/// Data about a single turn of a Wordle game.
#[derive(Debug, Clone, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct TurnData {
    /// The guess that was made this turn.
    pub guess: Word,
    /// The number of possible words that remained before this guess was made.
    pub num_possible_words_before_guess: usize,
}

/// Whether the game was won or lost by the guesser.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub enum GameStatus {
    /// The guesser found the objective word.
    Success,
    /// The guesser ran out of guesses.
    Failure,
}

/// The outcome of a game, along with each turn that was played.
#[derive(Debug, Clone, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct GameResult {
    pub status: GameStatus,
    pub turns: Vec<TurnData>,
}
