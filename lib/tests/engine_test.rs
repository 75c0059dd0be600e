#[macro_use]
extern crate assert_matches;

use rs_wordle_narrower::scorers::*;
use rs_wordle_narrower::*;

use std::result::Result;

fn guess_result(guess: &str, results: &[LetterResult]) -> GuessResult {
    GuessResult {
        guess: Word::from(guess),
        results: results.to_vec(),
    }
}

fn to_words(words: &[&str]) -> Vec<Word> {
    words.iter().map(|word| Word::from(*word)).collect()
}

#[test]
fn random_guesser_select_next_guess() -> Result<(), WordleError> {
    let bank = WordBank::from_iterator(vec!["abc", "bcd", "cde"])?;
    let mut guesser = RandomGuesser::with_seed(&bank, 1);

    let guess = guesser.select_next_guess();

    assert_matches!(guess, Some(word) if bank.contains(&word));
    Ok(())
}

#[test]
fn random_guesser_is_reproducible() -> Result<(), WordleError> {
    let bank = WordBank::from_iterator(vec![
        "alpha", "allot", "begot", "below", "endow", "ingot",
    ])?;
    let mut guesser = RandomGuesser::with_seed(&bank, 99);
    let mut other = RandomGuesser::with_seed(&bank, 99);

    let result = play_game_with_guesser(&Word::from("ingot"), 10, &mut guesser)?;
    let other_result = play_game_with_guesser(&Word::from("ingot"), 10, &mut other)?;

    assert_eq!(result, other_result);
    assert_eq!(result.status, GameStatus::Success);
    Ok(())
}

#[test]
fn random_guesser_exhausted() -> Result<(), WordleError> {
    let bank = WordBank::from_iterator(vec!["abc", "bcd", "cde"])?;
    let mut guesser = RandomGuesser::new(&bank);

    guesser.update(&guess_result(
        "abc",
        &[
            LetterResult::NotPresent,
            LetterResult::NotPresent,
            LetterResult::PresentNotHere,
        ],
    ))?;
    guesser.update(&guess_result(
        "bcd",
        &[
            LetterResult::NotPresent,
            LetterResult::PresentNotHere,
            LetterResult::NotPresent,
        ],
    ))?;

    assert!(guesser.possible_words().is_empty());
    assert_eq!(guesser.select_next_guess(), None);
    assert_matches!(
        guesser.update(&guess_result(
            "cde",
            &[
                LetterResult::PresentNotHere,
                LetterResult::NotPresent,
                LetterResult::NotPresent,
            ],
        )),
        Err(WordleError::ConflictingRestriction(_))
    );
    Ok(())
}

#[test]
fn random_guesser_reset() -> Result<(), WordleError> {
    let bank = WordBank::from_iterator(vec!["abc", "bcd", "cde"])?;
    let mut guesser = RandomGuesser::with_seed(&bank, 3);
    guesser.update(&get_result_for_guess(
        &Word::from("abc"),
        &Word::from("cde"),
    )?)?;
    assert_eq!(guesser.possible_words().len(), 1);

    guesser.reset();

    assert_eq!(guesser.possible_words().len(), 3);
    Ok(())
}

#[test]
fn max_score_guesser_exhausted() -> Result<(), WordleError> {
    let bank = WordBank::from_iterator(vec!["abc", "bcd", "cde"])?;
    let mut guesser = MaxScoreGuesser::new(
        GuessFrom::AllUnguessedWords,
        &bank,
        MaxEliminationsScorer::new(&bank)?,
    );

    guesser.update(&get_result_for_guess(
        &Word::from("xyz"),
        &Word::from("abc"),
    )?)?;
    guesser.update(&get_result_for_guess(
        &Word::from("xyz"),
        &Word::from("cde"),
    )?)?;

    assert_eq!(guesser.select_next_guess(), None);
    assert!(guesser.select_top_n_guesses(3).is_empty());
    Ok(())
}

#[test]
fn max_score_guesser_solves_each_word_within_three_turns() -> Result<(), WordleError> {
    let bank = WordBank::from_iterator(vec!["abc", "bcd", "cde"])?;
    let scorer = MaxEliminationsScorer::new(&bank)?;

    for guess_mode in [GuessFrom::AllUnguessedWords, GuessFrom::PossibleWords] {
        for objective in bank.iter() {
            let mut guesser = MaxScoreGuesser::new(guess_mode, &bank, scorer.clone());

            let result = play_game_with_guesser(objective, 3, &mut guesser)?;

            assert_eq!(result.status, GameStatus::Success);
            assert!(result.turns.len() <= 3);
            assert_eq!(result.turns[0].guess, Word::from("abc"));
            assert_eq!(result.turns[0].num_possible_words_before_guess, 3);
        }
    }
    Ok(())
}

#[test]
fn max_score_guesser_can_be_reused() -> Result<(), WordleError> {
    let bank = WordBank::from_iterator(vec![
        "alpha", "allot", "begot", "below", "endow", "ingot",
    ])?;
    let mut guesser = MaxScoreGuesser::new(
        GuessFrom::AllUnguessedWords,
        &bank,
        MaxEliminationsScorer::new(&bank)?,
    );

    for objective in bank.iter() {
        let result = play_game_with_guesser(objective, bank.len() as u32, &mut guesser)?;

        assert_eq!(result.status, GameStatus::Success);
        assert_eq!(result.turns[0].num_possible_words_before_guess, bank.len());
    }
    Ok(())
}

#[test]
fn max_score_guesser_prefers_possible_words_when_few_remain() -> Result<(), WordleError> {
    let bank = WordBank::from_iterator(vec!["abcz", "wxyz", "defy", "ghix"])?;
    let mut guesser = MaxScoreGuesser::new(
        GuessFrom::AllUnguessedWords,
        &bank,
        MaxEliminationsScorer::new(&bank)?,
    );

    guesser.update(&get_result_for_guess(
        &Word::from("defy"),
        &Word::from("wxyz"),
    )?)?;

    assert_eq!(guesser.select_next_guess(), Some(Word::from("defy")));
    Ok(())
}

#[test]
fn select_top_n_guesses() -> Result<(), WordleError> {
    let bank = WordBank::from_iterator(vec!["cod", "wod", "mod", "mwc"])?;
    let guesser = MaxScoreGuesser::new(
        GuessFrom::AllUnguessedWords,
        &bank,
        MaxEliminationsScorer::new(&bank)?,
    );

    let top_guesses = guesser.select_top_n_guesses(2);

    assert_eq!(top_guesses.len(), 2);
    assert_eq!(top_guesses[0].word, Word::from("mwc"));
    assert!(top_guesses[0].score >= top_guesses[1].score);
    assert_eq!(
        guesser.select_top_n_guesses(10).len(),
        bank.len()
    );
    Ok(())
}

#[test]
fn select_top_n_guesses_keeps_bank_order_on_ties() -> Result<(), WordleError> {
    let bank = WordBank::from_iterator(vec!["abc", "bcd", "cde"])?;
    let guesser = MaxScoreGuesser::new(
        GuessFrom::PossibleWords,
        &bank,
        MaxEliminationsScorer::new(&bank)?,
    );

    let top_guesses = guesser.select_top_n_guesses(3);

    assert_eq!(
        top_guesses
            .iter()
            .map(|guess| guess.word.clone())
            .collect::<Vec<Word>>(),
        to_words(&["abc", "bcd", "cde"])
    );
    assert!(top_guesses.iter().all(|guess| guess.score == 2000));
    Ok(())
}

#[test]
fn play_game_unknown_word() -> Result<(), WordleError> {
    let bank = WordBank::from_iterator(vec!["abc", "bcd", "cde"])?;
    let mut guesser = RandomGuesser::with_seed(&bank, 5);

    assert_matches!(
        play_game_with_guesser(&Word::from("xyz"), 10, &mut guesser),
        Err(WordleError::NoGuessAvailable)
    );
    Ok(())
}

#[test]
fn play_game_wrong_length() -> Result<(), WordleError> {
    let bank = WordBank::from_iterator(vec!["abc", "bcd", "cde"])?;
    let mut guesser = RandomGuesser::with_seed(&bank, 5);

    assert_matches!(
        play_game_with_guesser(&Word::from("abcd"), 10, &mut guesser),
        Err(WordleError::LengthMismatch {
            expected: 4,
            actual: 3
        })
    );
    Ok(())
}

#[test]
fn play_game_runs_out_of_guesses() -> Result<(), WordleError> {
    let bank = WordBank::from_iterator(vec![
        "alpha", "allot", "begot", "below", "endow", "ingot",
    ])?;
    let mut guesser = MaxScoreGuesser::new(
        GuessFrom::PossibleWords,
        &bank,
        MaxEliminationsScorer::new(&bank)?,
    );

    let result = play_game_with_guesser(&Word::from("alpha"), 1, &mut guesser)?;

    if result.status == GameStatus::Failure {
        assert_eq!(result.turns.len(), 1);
        assert_ne!(result.turns[0].guess, Word::from("alpha"));
    } else {
        assert_eq!(result.turns[0].guess, Word::from("alpha"));
    }

    let result = play_game_with_guesser(&Word::from("alpha"), 0, &mut guesser)?;

    assert_eq!(result.status, GameStatus::Failure);
    assert!(result.turns.is_empty());
    Ok(())
}
