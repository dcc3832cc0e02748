#[cfg(test)]
mod model_tests {
    use jiff::Timestamp;

    use crate::{
        error::{ErrorKind, TrackerError},
        models::{
            parse_deadline,
            text::{optional_text, required_text, word_count, MAX_NAME_WORDS},
            StatusSet, Task, TaskStatus,
        },
    };

    fn create_test_task(status: TaskStatus) -> Task {
        Task {
            id: 7,
            project_id: 3,
            title: "Test Task Title".to_string(),
            description: Some("This is a test task description".to_string()),
            status,
            deadline: Some(Timestamp::from_second(1640995200).unwrap()), // 2022-01-01 00:00:00 UTC
            closed_at: None,
        }
    }

    fn words(n: usize) -> String {
        vec!["word"; n].join(" ")
    }

    #[test]
    fn test_status_set_default_vocabulary() {
        let set = StatusSet::default();
        assert_eq!(set.to_string(), "todo, doing, done");
        assert!(set.contains(&TaskStatus::todo()));
        assert!(set.contains(&TaskStatus::done()));
    }

    #[test]
    fn test_status_set_parse_normalizes_case() {
        let set = StatusSet::default();
        let status = set.parse("  DoInG ").unwrap();
        assert_eq!(status.as_str(), "doing");
    }

    #[test]
    fn test_status_set_rejects_unknown() {
        let set = StatusSet::default();
        let err = set.parse("blocked").unwrap_err();
        match err {
            TrackerError::InvalidStatus { status, allowed } => {
                assert_eq!(status, "blocked");
                assert_eq!(allowed, "todo, doing, done");
            }
            other => panic!("Expected InvalidStatus, got {other:?}"),
        }
    }

    #[test]
    fn test_status_set_extended_from_csv() {
        let set: StatusSet = "todo, doing ,done,Blocked,,todo".parse().unwrap();
        assert_eq!(set.to_string(), "todo, doing, done, blocked");
        assert!(set.parse("BLOCKED").is_ok());
    }

    #[test]
    fn test_status_set_requires_terminal_and_default() {
        let err = "todo,doing".parse::<StatusSet>().unwrap_err();
        assert_eq!(err.kind(), ErrorKind::Configuration);

        let err = "doing,done".parse::<StatusSet>().unwrap_err();
        assert_eq!(err.kind(), ErrorKind::Configuration);
    }

    #[test]
    fn test_parse_deadline_date_only_is_utc_midnight() {
        let deadline = parse_deadline("2025-12-01").unwrap().unwrap();
        assert_eq!(deadline.to_string(), "2025-12-01T00:00:00Z");
    }

    #[test]
    fn test_parse_deadline_full_timestamp_with_offset() {
        let deadline = parse_deadline("2025-12-01T09:30:00+02:00").unwrap().unwrap();
        assert_eq!(deadline.to_string(), "2025-12-01T07:30:00Z");
    }

    #[test]
    fn test_parse_deadline_naive_datetime_is_utc() {
        let deadline = parse_deadline("2025-12-01T09:30").unwrap().unwrap();
        assert_eq!(deadline.to_string(), "2025-12-01T09:30:00Z");
    }

    #[test]
    fn test_parse_deadline_empty_is_none() {
        assert_eq!(parse_deadline("").unwrap(), None);
        assert_eq!(parse_deadline("   ").unwrap(), None);
    }

    #[test]
    fn test_parse_deadline_rejects_garbage() {
        for input in ["tomorrow", "2025-13-01", "01/12/2025", "2025-12-1"] {
            let err = parse_deadline(input).unwrap_err();
            assert_eq!(err.kind(), ErrorKind::InvalidDeadline, "input: {input}");
        }
    }

    #[test]
    fn test_word_count_ignores_extra_whitespace() {
        assert_eq!(word_count("  one   two\tthree\n"), 3);
        assert_eq!(word_count(""), 0);
    }

    #[test]
    fn test_required_text_trims() {
        assert_eq!(required_text("name", "  Work  ", MAX_NAME_WORDS).unwrap(), "Work");
    }

    #[test]
    fn test_required_text_limits() {
        assert!(required_text("title", &words(30), MAX_NAME_WORDS).is_ok());

        let err = required_text("title", &words(31), MAX_NAME_WORDS).unwrap_err();
        assert_eq!(err.kind(), ErrorKind::Validation);

        let err = required_text("title", "   ", MAX_NAME_WORDS).unwrap_err();
        assert!(err.to_string().contains("must not be empty"));
    }

    #[test]
    fn test_optional_text_empty_becomes_none() {
        assert_eq!(optional_text("description", Some("  "), 150).unwrap(), None);
        assert_eq!(optional_text("description", None, 150).unwrap(), None);
        assert_eq!(
            optional_text("description", Some(" w "), 150).unwrap(),
            Some("w".to_string())
        );
    }

    #[test]
    fn test_set_status_stamps_and_clears_closed_at() {
        let mut task = create_test_task(TaskStatus::todo());
        let now = Timestamp::from_second(1700000000).unwrap();

        task.set_status(TaskStatus::done(), now);
        assert_eq!(task.closed_at, Some(now));

        let later = Timestamp::from_second(1700000100).unwrap();
        task.set_status(TaskStatus::done(), later);
        assert_eq!(task.closed_at, Some(now), "re-entering done keeps first stamp");

        task.set_status(TaskStatus::normalized("doing"), later);
        assert_eq!(task.closed_at, None);
    }

    #[test]
    fn test_is_overdue() {
        let now = Timestamp::from_second(1700000000).unwrap();
        let task = create_test_task(TaskStatus::todo());
        assert!(task.is_overdue(now));

        let done = create_test_task(TaskStatus::done());
        assert!(!done.is_overdue(now));

        let mut no_deadline = create_test_task(TaskStatus::todo());
        no_deadline.deadline = None;
        assert!(!no_deadline.is_overdue(now));

        let deadline = task.deadline.unwrap();
        assert!(!task.is_overdue(deadline), "deadline equal to now is not overdue");
    }
}
