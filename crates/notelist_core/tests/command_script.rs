use notelist_core::{
    is_skippable, run_line, run_script, CollectionError, Command, CommandError, CommandOutput,
    ListOrder, ManualClock, NoteCollection, NoteStats, NoteValidationError,
};

fn run_all(notes: &mut NoteCollection<ManualClock>, lines: &[&str]) {
    for line in lines {
        run_line(notes, line).unwrap();
    }
}

#[test]
fn parse_recognizes_every_verb() {
    let cases = [
        (
            "add Buy milk",
            Command::Add {
                title: "Buy milk".to_string(),
            },
        ),
        (
            "edit 0 Buy milk and bread",
            Command::Edit {
                index: 0,
                title: "Buy milk and bread".to_string(),
            },
        ),
        ("done 1", Command::Done { index: 1 }),
        ("remove 2", Command::Remove { index: 2 }),
        ("rm 2", Command::Remove { index: 2 }),
        (
            "list",
            Command::List {
                order: ListOrder::Storage,
            },
        ),
        (
            "list status",
            Command::List {
                order: ListOrder::Status,
            },
        ),
        (
            "  find   buy  ",
            Command::Find {
                query: "buy".to_string(),
            },
        ),
        (
            "find",
            Command::Find {
                query: String::new(),
            },
        ),
        ("stats", Command::Stats),
    ];

    for (line, expected) in cases {
        assert_eq!(Command::parse(line).unwrap(), expected, "line {line:?}");
    }
}

#[test]
fn parse_rejects_malformed_lines() {
    for line in [
        "",
        "fly away",
        "add",
        "edit 1",
        "edit x title",
        "done",
        "done two",
        "done -1",
        "rm 1 extra",
        "list sideways",
        "stats now",
    ] {
        assert!(
            matches!(Command::parse(line), Err(CommandError::Parse { .. })),
            "line {line:?} should fail to parse"
        );
    }
}

#[test]
fn script_runs_demo_flow() {
    let clock = ManualClock::new(0);
    let mut notes = NoteCollection::with_clock(clock.clone());

    run_all(
        &mut notes,
        &[
            "add Buy milk",
            "add Walk dog",
            "add Learn X",
            "edit 0 Buy milk and bread",
            "done 1",
        ],
    );

    assert_eq!(
        run_line(&mut notes, "stats").unwrap(),
        CommandOutput::Stats(NoteStats {
            total: 3,
            completed: 1,
            remaining: 2,
        })
    );

    match run_line(&mut notes, "list status").unwrap() {
        CommandOutput::Notes(view) => {
            let titles: Vec<_> = view
                .iter()
                .map(|entry| entry.snapshot.title.as_str())
                .collect();
            assert_eq!(titles, vec!["Buy milk and bread", "Learn X", "Walk dog"]);
        }
        other => panic!("unexpected output: {other:?}"),
    }
}

#[test]
fn collection_errors_surface_unchanged() {
    let mut notes = NoteCollection::with_clock(ManualClock::new(0));
    run_all(&mut notes, &["add only"]);

    assert_eq!(
        run_line(&mut notes, "remove 5").unwrap_err(),
        CommandError::Collection(CollectionError::IndexOutOfRange { index: 5, len: 1 })
    );
    assert_eq!(notes.len(), 1);

    let err = Command::Add {
        title: "   ".to_string(),
    }
    .execute(&mut notes)
    .unwrap_err();
    assert_eq!(
        err,
        CommandError::Collection(CollectionError::Validation(NoteValidationError::EmptyTitle))
    );
}

#[test]
fn outputs_render_for_console() {
    let mut notes = NoteCollection::with_clock(ManualClock::new(7));

    assert_eq!(
        run_line(&mut notes, "add Walk dog").unwrap().to_string(),
        "added #0"
    );
    run_all(&mut notes, &["add Learn X", "done 0"]);

    assert_eq!(
        run_line(&mut notes, "list").unwrap().to_string(),
        "0: [x] Walk dog (created_at=7, updated_at=7)\n1: [ ] Learn X (created_at=7)"
    );
    assert_eq!(
        run_line(&mut notes, "find nothing").unwrap().to_string(),
        "(no notes)"
    );
    assert_eq!(
        run_line(&mut notes, "rm 1").unwrap().to_string(),
        "removed #1: Learn X"
    );
    assert_eq!(
        run_line(&mut notes, "stats").unwrap().to_string(),
        "total=1 completed=1 remaining=0"
    );
}

#[test]
fn sorted_views_print_storage_indices() {
    let mut notes = NoteCollection::with_clock(ManualClock::new(0));
    run_all(&mut notes, &["add A", "add B", "add C", "done 0"]);

    assert_eq!(
        run_line(&mut notes, "list status").unwrap().to_string(),
        "1: [ ] B (created_at=0)\n2: [ ] C (created_at=0)\n0: [x] A (created_at=0, updated_at=0)"
    );

    // Acting on the number printed next to C must complete C.
    run_line(&mut notes, "done 2").unwrap();
    assert!(notes.get(2).unwrap().is_completed, "C should be completed");
    assert!(!notes.get(1).unwrap().is_completed, "B should stay open");
}

#[test]
fn find_prints_storage_indices() {
    let mut notes = NoteCollection::with_clock(ManualClock::new(0));
    run_all(&mut notes, &["add Walk dog", "add Buy milk", "add buy bread"]);

    assert_eq!(
        run_line(&mut notes, "find BUY").unwrap().to_string(),
        "1: [ ] Buy milk (created_at=0)\n2: [ ] buy bread (created_at=0)"
    );
}

#[test]
fn add_through_commands_stores_title_verbatim() {
    let mut notes = NoteCollection::with_clock(ManualClock::new(0));
    run_all(&mut notes, &["add Buy  ", "add   spaced", "edit 1 renamed "]);

    assert_eq!(notes.get(0).unwrap().title, "Buy  ");
    assert_eq!(notes.get(1).unwrap().title, "renamed ");
}

#[test]
fn script_continues_after_failed_lines_and_reports_them() {
    let script = "\
# seed
add Buy milk

done 7
add Walk dog
bogus
done 1
stats
";
    let mut notes = NoteCollection::with_clock(ManualClock::new(0));
    let mut out = Vec::new();
    let mut err = Vec::new();

    let failures = run_script(&mut notes, script.as_bytes(), &mut out, &mut err).unwrap();

    assert_eq!(failures, 2);
    assert_eq!(notes.len(), 2);
    assert!(notes.get(1).unwrap().is_completed);

    let out = String::from_utf8(out).unwrap();
    assert_eq!(
        out,
        "added #0\nadded #1\ncompleted #1\ntotal=2 completed=1 remaining=1\n"
    );

    let err = String::from_utf8(err).unwrap();
    let lines: Vec<_> = err.lines().collect();
    assert_eq!(lines.len(), 2);
    assert_eq!(lines[0], "line 4: note index 7 is out of range (len 1)");
    assert!(lines[1].starts_with("line 6: invalid command `bogus`"));
}

#[test]
fn script_with_only_comments_and_blanks_succeeds_silently() {
    let mut notes = NoteCollection::with_clock(ManualClock::new(0));
    let mut out = Vec::new();
    let mut err = Vec::new();

    let failures =
        run_script(&mut notes, "\n  # nothing\n\t\n".as_bytes(), &mut out, &mut err).unwrap();

    assert_eq!(failures, 0);
    assert!(out.is_empty());
    assert!(err.is_empty());
    assert!(notes.is_empty());
}

#[test]
fn skippable_lines_match_what_scripts_ignore() {
    for line in ["", "   ", "# heading", "  #indented"] {
        assert!(is_skippable(line), "line {line:?} should be skipped");
    }
    assert!(!is_skippable("add #1 priority"));
}
