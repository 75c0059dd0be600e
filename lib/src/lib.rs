//! Narrows down the possible answers to a Wordle-style puzzle, and picks the guess that is
//! expected to narrow them down the most.
//!
//! ```
//! use rs_wordle_narrower::*;
//! use rs_wordle_narrower::scorers::MaxEliminationsScorer;
//!
//! let bank = WordBank::from_iterator(&["abc", "bcd", "cde"]).unwrap();
//! let scorer = MaxEliminationsScorer::new(&bank).unwrap();
//! let mut guesser = MaxScoreGuesser::new(GuessFrom::AllUnguessedWords, &bank, scorer);
//!
//! let result = play_game_with_guesser(&Word::from("cde"), 3, &mut guesser).unwrap();
//!
//! assert_eq!(result.status, GameStatus::Success);
//! ```

mod data;
mod engine;
mod restrictions;
mod results;
pub mod scorers;

pub use data::PossibleWords;
pub use data::Word;
pub use data::WordBank;
pub use engine::*;
pub use results::get_result_for_guess;
pub use results::GameResult;
pub use results::GameStatus;
pub use results::GuessResult;
pub use results::LetterResult;
pub use results::TurnData;
pub use results::WordleError;

/// Building blocks of the guessers, for callers that want to track restrictions themselves.
pub mod details {
    pub use crate::restrictions::*;
    pub use crate::results::CompressedGuessResult;
    pub use crate::results::MAX_LETTERS_IN_COMPRESSED_GUESS_RESULT;
}
