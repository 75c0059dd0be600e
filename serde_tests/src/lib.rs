#[cfg(test)]
mod tests {

    use std::collections::HashMap;
    use std::error::Error;

    use ron;
    use rs_wordle_narrower::scorers::{MaxEliminationsScorer, WordScorer};
    use rs_wordle_narrower::*;

    #[test]
    fn max_eliminations_scorer_first_round_scores_serde() -> Result<(), Box<dyn Error>> {
        let word_bank = WordBank::from_iterator(vec!["worda", "wordb", "other"])?;
        let scorer = MaxEliminationsScorer::new(&word_bank)?;

        let ser = ron::to_string(scorer.first_round_scores())?;
        let deser = ron::from_str::<HashMap<Word, i64>>(&ser)?;

        assert_eq!(&deser, scorer.first_round_scores());
        let deser_scorer = MaxEliminationsScorer::from_first_round_scores(&word_bank, deser);
        for word in word_bank.iter() {
            assert_eq!(deser_scorer.score_word(word), scorer.score_word(word));
        }
        Ok(())
    }

    #[test]
    fn game_result_serde() -> Result<(), Box<dyn Error>> {
        let word_bank = WordBank::from_iterator(vec![
            "alpha", "allot", "begot", "below", "endow", "ingot",
        ])?;
        let scorer = MaxEliminationsScorer::new(&word_bank)?;
        let mut guesser = MaxScoreGuesser::new(GuessFrom::AllUnguessedWords, &word_bank, scorer);
        let result = play_game_with_guesser(&Word::from("endow"), 6, &mut guesser)?;

        let ser = ron::to_string(&result)?;
        let deser = ron::from_str::<GameResult>(&ser)?;

        assert_eq!(deser, result);
        Ok(())
    }

    #[test]
    fn guess_result_serde() -> Result<(), Box<dyn Error>> {
        let result = get_result_for_guess(&Word::from("mesas"), &Word::from("sassy"))?;

        let ser = ron::to_string(&result)?;

        assert!(ser.contains("\"sassy\""));
        assert_eq!(ron::from_str::<GuessResult>(&ser)?, result);
        Ok(())
    }

    #[test]
    fn guess_from_serde() -> Result<(), Box<dyn Error>> {
        let ser = ron::to_string(&GuessFrom::PossibleWords)?;

        assert_eq!(ron::from_str::<GuessFrom>(&ser)?, GuessFrom::PossibleWords);
        Ok(())
    }
}
