use snapquiz::quiz::{OptionOutcome, QuestionRecord, QuizSession};

fn sample_record() -> QuestionRecord {
    serde_json::from_str(
        r#"{"questionText":"Q","options":["A","B","C","D"],"correctOptionIndex":2,"explanationText":"E"}"#,
    )
    .unwrap()
}

#[test]
fn nothing_is_revealed_before_a_selection() {
    let session = QuizSession::new(sample_record());

    assert!(!session.is_answered());
    assert_eq!(session.explanation(), None);
    assert_eq!(session.answered_correctly(), None);
    for idx in 0..4 {
        assert_eq!(session.outcome(idx), OptionOutcome::Pending);
    }
}

#[test]
fn correct_option_is_marked_after_any_selection() {
    // Clicking a wrong option still reveals index 2 as the correct one.
    let mut session = QuizSession::new(sample_record());
    assert!(session.select(0));

    assert_eq!(session.outcome(2), OptionOutcome::Correct);
    assert_eq!(session.outcome(0), OptionOutcome::WrongPick);
    assert_eq!(session.outcome(1), OptionOutcome::Dimmed);
    assert_eq!(session.outcome(3), OptionOutcome::Dimmed);
    assert_eq!(session.answered_correctly(), Some(false));
}

#[test]
fn picking_the_correct_option_has_no_wrong_pick() {
    let mut session = QuizSession::new(sample_record());
    session.select(2);

    assert_eq!(session.outcome(2), OptionOutcome::Correct);
    for idx in [0, 1, 3] {
        assert_eq!(session.outcome(idx), OptionOutcome::Dimmed);
    }
    assert_eq!(session.answered_correctly(), Some(true));
}

#[test]
fn selection_is_one_shot() {
    let mut session = QuizSession::new(sample_record());
    assert!(session.select(1));
    assert!(!session.select(3), "second pick must be ignored");

    assert_eq!(session.selected(), Some(1));
    assert_eq!(session.outcome(1), OptionOutcome::WrongPick);
    assert_eq!(session.outcome(3), OptionOutcome::Dimmed);
}

#[test]
fn out_of_range_selection_is_ignored() {
    let mut session = QuizSession::new(sample_record());
    assert!(!session.select(4));
    assert!(!session.is_answered());

    // A later in-range pick still counts.
    assert!(session.select(2));
    assert_eq!(session.selected(), Some(2));
}

#[test]
fn explanation_appears_only_after_selection() {
    let mut session = QuizSession::new(sample_record());
    assert_eq!(session.explanation(), None);

    session.select(3);
    assert_eq!(session.explanation(), Some("E"));
}
