#[macro_use]
extern crate assert_matches;

use proptest::prelude::*;
use rs_wordle_narrower::details::*;
use rs_wordle_narrower::*;

use std::result::Result;

fn result_for(objective: &str, guess: &str) -> Result<GuessResult, WordleError> {
    get_result_for_guess(&Word::from(objective), &Word::from(guess))
}

#[test]
fn get_result_for_guess_correct() -> Result<(), WordleError> {
    let result = result_for("abcb", "abcb")?;

    assert_eq!(result.guess, Word::from("abcb"));
    assert_eq!(result.results, vec![LetterResult::Correct; 4]);
    assert!(result.is_correct());
    Ok(())
}

#[test]
fn get_result_for_guess_partial() -> Result<(), WordleError> {
    let result = result_for("mesas", "sassy")?;
    assert_eq!(result.guess, Word::from("sassy"));
    assert_eq!(
        result.results,
        vec![
            LetterResult::PresentNotHere,
            LetterResult::PresentNotHere,
            LetterResult::Correct,
            LetterResult::NotPresent,
            LetterResult::NotPresent
        ]
    );
    assert!(!result.is_correct());

    let result = result_for("abba", "babb")?;
    assert_eq!(
        result.results,
        vec![
            LetterResult::PresentNotHere,
            LetterResult::PresentNotHere,
            LetterResult::Correct,
            LetterResult::NotPresent
        ]
    );

    let result = result_for("abcb", "bcce")?;
    assert_eq!(
        result.results,
        vec![
            LetterResult::PresentNotHere,
            LetterResult::NotPresent,
            LetterResult::Correct,
            LetterResult::NotPresent
        ]
    );
    Ok(())
}

#[test]
fn get_result_for_guess_none_match() -> Result<(), WordleError> {
    let result = result_for("abcb", "defg")?;

    assert_eq!(result.results, vec![LetterResult::NotPresent; 4]);
    Ok(())
}

#[test]
fn get_result_for_guess_unicode() -> Result<(), WordleError> {
    let result = result_for("ab£", "£ab")?;

    assert_eq!(result.results, vec![LetterResult::PresentNotHere; 3]);
    Ok(())
}

#[test]
fn get_result_for_guess_invalid_length() {
    assert_matches!(
        result_for("abcd", "abc"),
        Err(WordleError::LengthMismatch {
            expected: 4,
            actual: 3
        })
    );
    assert_matches!(
        result_for("abc", "abcd"),
        Err(WordleError::LengthMismatch {
            expected: 3,
            actual: 4
        })
    );
}

#[test]
fn compressed_guess_result_equality() -> Result<(), WordleError> {
    let result_1 = CompressedGuessResult::from_results(&result_for("abcd", "bcda")?.results)?;
    let result_2 = CompressedGuessResult::from_results(&result_for("abcd", "dabc")?.results)?;
    let result_3 = CompressedGuessResult::from_results(&result_for("abcd", "abce")?.results)?;

    assert_eq!(result_1, result_2);
    assert_ne!(result_1, result_3);
    Ok(())
}

#[test]
fn compressed_guess_result_too_long() {
    let results = vec![LetterResult::Correct; MAX_LETTERS_IN_COMPRESSED_GUESS_RESULT + 1];

    assert_matches!(
        CompressedGuessResult::from_results(&results),
        Err(WordleError::WordTooLong {
            length: 17,
            max: 16
        })
    );
    assert_matches!(
        CompressedGuessResult::from_results(&results[1..]),
        Ok(_)
    );
}

proptest! {
    #[test]
    fn feedback_matches_letter_counts(objective in "[a-d]{5}", guess in "[a-d]{5}") {
        let objective = Word::from(objective.as_str());
        let guess = Word::from(guess.as_str());
        let result = get_result_for_guess(&objective, &guess).unwrap();

        prop_assert_eq!(result.results.len(), guess.len());
        for (index, letter_result) in result.results.iter().enumerate() {
            prop_assert_eq!(
                *letter_result == LetterResult::Correct,
                guess.at(index) == objective.at(index)
            );
        }
        for letter in guess.letters() {
            let num_found = guess
                .letters()
                .iter()
                .zip(result.results.iter())
                .filter(|(guess_letter, letter_result)| {
                    *guess_letter == letter && **letter_result != LetterResult::NotPresent
                })
                .count();
            prop_assert_eq!(
                num_found,
                guess.count_letter(*letter).min(objective.count_letter(*letter))
            );
        }
    }
}
