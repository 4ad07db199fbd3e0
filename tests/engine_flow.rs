use std::fs;

use rand::SeedableRng;
use rand::rngs::SmallRng;

use wordrill::data::loader::{self, DataSource};
use wordrill::data::simplify::{self, SIMPLE_EXAMPLES_FILE, SIMPLE_VOCABULARY_FILE};
use wordrill::data::DataFiles;
use wordrill::engine::challenge::ChallengeState;
use wordrill::engine::question::{BLANK, Difficulty, Mode};
use wordrill::engine::{EngineError, MasteryState};
use wordrill::logging;
use wordrill::session::{EngineSettings, EngineState};

fn bundled_engine(settings: EngineSettings, seed: u64) -> EngineState {
    logging::init_for_tests();
    let mut engine = EngineState::with_rng(settings, SmallRng::seed_from_u64(seed));
    let data = loader::load(&DataSource::Bundled, &DataFiles::default(), None);
    engine.load_data(data).unwrap();
    engine
}

fn wrong_answer(engine: &EngineState) -> String {
    let q = engine.current().unwrap();
    q.options
        .iter()
        .find(|o| **o != q.correct_answer)
        .cloned()
        .unwrap()
}

#[test]
fn bundled_sample_drops_words_without_examples() {
    let engine = bundled_engine(EngineSettings::default(), 1);
    let corpus = engine.corpus().unwrap();
    assert!(corpus.get(34).is_none(), "island has no example sentences");
    assert_eq!(engine.snapshot().total(), corpus.len());
    assert_eq!(engine.snapshot().unmastered, corpus.len());
}

#[test]
fn fill_blank_questions_are_well_formed_at_every_difficulty() {
    let mut engine = bundled_engine(EngineSettings::default(), 2);

    for difficulty in Difficulty::ALL {
        engine.start(Mode::FillBlank(difficulty)).unwrap();
        for _ in 0..20 {
            let q = engine.next_question().unwrap().clone();
            assert_eq!(q.options.len(), 4);
            assert!(q.options.contains(&q.correct_answer));
            assert!(q.display_text.contains(BLANK));
            assert!(
                !q.display_text
                    .to_lowercase()
                    .contains(&q.word.spelling.to_lowercase())
            );
            match difficulty {
                Difficulty::Easy => assert!(q.word.frequency > 0.5),
                Difficulty::Hard => assert!(q.word.frequency < 0.3),
                Difficulty::Medium => {}
            }
        }
    }
}

#[test]
fn answers_move_words_through_mastery_states() {
    let mut engine = bundled_engine(EngineSettings::default(), 3);
    engine.start(Mode::FillBlank(Difficulty::Medium)).unwrap();

    let wrong = wrong_answer(&engine);
    let report = engine.submit(&wrong).unwrap();
    assert_eq!(report.mastery, MasteryState::Learning);
    assert_eq!(report.score, 0);
    assert_eq!(report.score_delta, 0);

    engine.next_question().unwrap();
    let answer = engine.current().unwrap().correct_answer.to_uppercase();
    let report = engine.submit(&format!("  {answer} ")).unwrap();
    assert!(report.is_correct());
    assert_eq!(report.mastery, MasteryState::Mastered);
    assert_eq!(report.score, 10);

    let snapshot = engine.snapshot();
    assert_eq!(snapshot.correct_answers, 1);
    assert_eq!(snapshot.incorrect_answers, 1);
    assert_eq!(
        snapshot.mastered + snapshot.learning + snapshot.unmastered,
        snapshot.total()
    );
}

#[test]
fn challenge_run_with_one_mistake() {
    let settings = EngineSettings {
        max_level: 10,
        ..EngineSettings::default()
    };
    let mut engine = bundled_engine(settings, 4);
    engine.start(Mode::Challenge).unwrap();

    let mut correct = 0;
    let mut mistake_made = false;
    loop {
        let state = if correct == 4 && !mistake_made {
            mistake_made = true;
            let wrong = wrong_answer(&engine);
            let report = engine.submit(&wrong).unwrap();
            assert_eq!(report.challenge, Some(ChallengeState::Level(5)));
            ChallengeState::Level(5)
        } else {
            let answer = engine.current().unwrap().correct_answer.clone();
            correct += 1;
            engine.submit(&answer).unwrap().challenge.unwrap()
        };

        if state == ChallengeState::Completed {
            break;
        }
        engine.next_question().unwrap();
    }

    assert_eq!(correct, 10);
    assert_eq!(engine.tracker().score(), 95);
    assert_eq!(
        engine.next_question().unwrap_err(),
        EngineError::ChallengeComplete
    );

    engine.restart_challenge().unwrap();
    assert_eq!(engine.challenge().state(), ChallengeState::Level(1));
    assert_eq!(engine.tracker().score(), 0);
}

#[test]
fn missing_data_directory_leaves_engine_unready() {
    let dir = tempfile::tempdir().unwrap();
    let mut engine = EngineState::new(EngineSettings::default());
    let data = loader::load(
        &DataSource::Directory(dir.path().join("absent")),
        &DataFiles::default(),
        None,
    );
    assert!(matches!(
        engine.load_data(data),
        Err(EngineError::DataUnavailable(_))
    ));
    assert!(!engine.is_ready());
    assert_eq!(
        engine.start(Mode::Challenge).unwrap_err(),
        EngineError::CorpusNotReady
    );
}

#[test]
fn simplified_files_load_back_into_an_engine() {
    let input = tempfile::tempdir().unwrap();
    let output = tempfile::tempdir().unwrap();
    let files = DataFiles::default();
    fs::write(
        input.path().join(&files.vocabulary),
        include_str!("../assets/sample_vocabulary.json"),
    )
    .unwrap();
    fs::write(
        input.path().join(&files.examples),
        include_str!("../assets/sample_examples.json"),
    )
    .unwrap();

    let (report, written) = simplify::run(input.path(), output.path(), &files, 12).unwrap();
    assert_eq!(report.words_kept, 12);
    assert!(written.vocabulary_bytes > 0);

    let simple_files = DataFiles {
        vocabulary: SIMPLE_VOCABULARY_FILE.to_string(),
        examples: SIMPLE_EXAMPLES_FILE.to_string(),
    };
    let data = loader::load(
        &DataSource::Directory(output.path().to_path_buf()),
        &simple_files,
        None,
    )
    .unwrap();

    let mut engine = EngineState::with_rng(EngineSettings::default(), SmallRng::seed_from_u64(5));
    engine.load_data(Ok(data)).unwrap();
    assert_eq!(engine.corpus().unwrap().len(), 12);
    engine.start(Mode::Challenge).unwrap();
}
