mod common;

use common::{create_test_db, seed_executions, seed_program};
use jiff::Timestamp;
use lineup_core::{
    models::{ExecutionOrder, NewExecution, NewProgram, ProgramFilter, ProgramPatch},
    Database, ErrorKind, ExecutionFilter, ExecutionPatch, ExecutionStatus, Limit, LineupError,
    ProgramType,
};
use tempfile::NamedTempFile;

#[test]
fn test_database_initialization() {
    let (temp_file, db) = create_test_db();
    assert!(temp_file.path().exists());
    drop(db);

    // Reopening an initialized database is a no-op
    Database::new(temp_file.path()).expect("Failed to reopen database");
}

#[test]
fn test_create_and_get_program() {
    let (_temp_file, mut db) = create_test_db();

    let created = db
        .create_program(&NewProgram {
            id: "Choir-2025-1".to_string(),
            title: "Choir".to_string(),
            content: "<h1>Sing</h1>".to_string(),
            description: "Weekly choir".to_string(),
            image: "/img/choir.png".to_string(),
            program_type: ProgramType::Annually,
            custom_url: Some("choir".to_string()),
        })
        .expect("Failed to create program");

    let fetched = db
        .get_program(&created.id)
        .expect("Failed to get program")
        .expect("Program should exist");

    assert_eq!(fetched, created);
    assert!(fetched.executions.is_empty());
    assert!(db.get_program("nope").expect("Failed to query").is_none());
}

#[test]
fn test_duplicate_program_id_is_constraint_violation() {
    let (_temp_file, mut db) = create_test_db();
    seed_program(&mut db, "Choir");

    let err = db
        .create_program(&NewProgram {
            id: "Choir".to_string(),
            title: "Another".to_string(),
            ..Default::default()
        })
        .unwrap_err();
    assert_eq!(err.kind(), ErrorKind::ConstraintViolation);
}

#[test]
fn test_empty_program_id_rejected() {
    let (_temp_file, mut db) = create_test_db();

    let err = db
        .create_program(&NewProgram {
            id: " ".to_string(),
            title: "Blank".to_string(),
            ..Default::default()
        })
        .unwrap_err();
    assert_eq!(err.kind(), ErrorKind::InvalidInput);
}

#[test]
fn test_find_programs_by_type_and_limit() {
    let (_temp_file, mut db) = create_test_db();
    seed_program(&mut db, "Choir");
    seed_program(&mut db, "Kids_Club");
    db.create_program(&NewProgram {
        id: "Retreat".to_string(),
        title: "Retreat".to_string(),
        program_type: ProgramType::Annually,
        ..Default::default()
    })
    .expect("Failed to create program");

    let annual = db
        .find_programs(&ProgramFilter {
            program_type: Some(ProgramType::Annually),
            limit: None,
        })
        .expect("Failed to find programs");
    assert_eq!(annual.len(), 1);
    assert_eq!(annual[0].id, "Retreat");

    let first_two = db
        .find_programs(&ProgramFilter {
            program_type: None,
            limit: Some(Limit::Count(2)),
        })
        .expect("Failed to find programs");
    let ids: Vec<&str> = first_two.iter().map(|p| p.id.as_str()).collect();
    assert_eq!(ids, vec!["Choir", "Kids_Club"]);
}

#[test]
fn test_update_program() {
    let (_temp_file, mut db) = create_test_db();
    seed_program(&mut db, "Choir");

    let updated = db
        .update_program(
            "Choir",
            ProgramPatch {
                description: Some("Now with orchestra".to_string()),
                custom_url: Some(Some("choir".to_string())),
                ..Default::default()
            },
        )
        .expect("Failed to update program");
    assert_eq!(updated.description, "Now with orchestra");
    assert_eq!(updated.title, "Choir");

    let cleared = db
        .update_program(
            "Choir",
            ProgramPatch {
                custom_url: Some(None),
                ..Default::default()
            },
        )
        .expect("Failed to update program");
    assert!(cleared.custom_url.is_none());

    let err = db
        .update_program("missing", ProgramPatch::default())
        .unwrap_err();
    assert!(matches!(err, LineupError::ProgramNotFound { .. }));
}

#[test]
fn test_create_execution_requires_program() {
    let (_temp_file, mut db) = create_test_db();

    let err = db
        .create_execution("missing", &NewExecution::default())
        .unwrap_err();
    assert!(matches!(err, LineupError::ProgramNotFound { .. }));
}

#[test]
fn test_execution_date_round_trips_at_millisecond_precision() {
    let (_temp_file, mut db) = create_test_db();
    let program_id = seed_program(&mut db, "Choir");
    let date = Timestamp::from_millisecond(1_767_225_600_123).expect("valid timestamp");

    let created = db
        .create_execution(
            &program_id,
            &NewExecution {
                title: "New Year".to_string(),
                date: Some(date),
                ..Default::default()
            },
        )
        .expect("Failed to create execution");

    let fetched = db
        .get_execution(&created.id)
        .expect("Failed to get execution")
        .expect("Execution should exist");
    assert_eq!(fetched.date, Some(date));
    assert_eq!(fetched.status, ExecutionStatus::Upcoming);
    assert_eq!(fetched.show_order, None);
}

#[test]
fn test_find_executions_filters() {
    let (_temp_file, mut db) = create_test_db();
    let choir = seed_program(&mut db, "Choir");
    let retreat = seed_program(&mut db, "Retreat");
    let choir_runs = seed_executions(&mut db, &choir, 3);
    seed_executions(&mut db, &retreat, 2);

    db.update_execution(&choir_runs[1].id, &ExecutionPatch::status(ExecutionStatus::Done))
        .expect("Failed to update execution");

    let of_choir = db
        .find_executions(&ExecutionFilter {
            program_id: Some(choir.clone()),
            ..Default::default()
        })
        .expect("Failed to find executions");
    assert_eq!(of_choir.len(), 3);

    let done = db
        .find_executions(&ExecutionFilter {
            status: Some(ExecutionStatus::Done),
            ..Default::default()
        })
        .expect("Failed to find executions");
    assert_eq!(done.len(), 1);
    assert_eq!(done[0].id, choir_runs[1].id);

    let first_two = db
        .find_executions(&ExecutionFilter {
            order: ExecutionOrder::Created,
            limit: Limit::Count(2),
            ..Default::default()
        })
        .expect("Failed to find executions");
    assert_eq!(first_two.len(), 2);
    assert_eq!(first_two[0].id, choir_runs[0].id);
}

#[test]
fn test_update_missing_execution_writes_nothing() {
    let (_temp_file, mut db) = create_test_db();

    let err = db
        .update_execution("missing", &ExecutionPatch::status(ExecutionStatus::Done))
        .unwrap_err();
    assert!(matches!(err, LineupError::ExecutionNotFound { .. }));
}

#[test]
fn test_batch_update_rolls_back_on_missing_id() {
    let (_temp_file, mut db) = create_test_db();
    let program_id = seed_program(&mut db, "Choir");
    let executions = seed_executions(&mut db, &program_id, 2);

    let err = db
        .batch_update_executions(&[
            (executions[0].id.clone(), ExecutionPatch::slot(1)),
            ("missing".to_string(), ExecutionPatch::slot(2)),
        ])
        .unwrap_err();
    assert!(err.is_not_found());

    let featured = db
        .find_executions(&ExecutionFilter::featured(Limit::All))
        .expect("Failed to find executions");
    assert!(featured.is_empty());
}

#[test]
fn test_batch_update_rolls_back_on_duplicate_slot() {
    let (_temp_file, mut db) = create_test_db();
    let program_id = seed_program(&mut db, "Choir");
    let executions = seed_executions(&mut db, &program_id, 2);

    let err = db
        .batch_update_executions(&[
            (executions[0].id.clone(), ExecutionPatch::slot(1)),
            (executions[1].id.clone(), ExecutionPatch::slot(1)),
        ])
        .unwrap_err();
    assert_eq!(err.kind(), ErrorKind::ConstraintViolation);

    let featured = db
        .find_executions(&ExecutionFilter::featured(Limit::All))
        .expect("Failed to find executions");
    assert!(featured.is_empty());
}

#[test]
fn test_batch_update_applies_all() {
    let (_temp_file, mut db) = create_test_db();
    let program_id = seed_program(&mut db, "Choir");
    let executions = seed_executions(&mut db, &program_id, 2);

    let updated = db
        .batch_update_executions(&[
            (executions[0].id.clone(), ExecutionPatch::slot(2)),
            (
                executions[1].id.clone(),
                ExecutionPatch {
                    title: Some("Renamed".to_string()),
                    show_order: Some(Some(1)),
                    ..Default::default()
                },
            ),
        ])
        .expect("Failed to apply batch");
    assert_eq!(updated.len(), 2);

    let featured = db
        .find_executions(&ExecutionFilter::featured(Limit::All))
        .expect("Failed to find executions");
    assert_eq!(featured[0].title, "Renamed");
    assert_eq!(featured[1].id, executions[0].id);
}

#[test]
fn test_store_rejects_slot_out_of_range() {
    let (_temp_file, mut db) = create_test_db();
    let program_id = seed_program(&mut db, "Choir");
    let executions = seed_executions(&mut db, &program_id, 1);

    let err = db
        .update_execution(&executions[0].id, &ExecutionPatch::slot(4))
        .unwrap_err();
    assert_eq!(err.kind(), ErrorKind::ConstraintViolation);
}

#[test]
fn test_deleting_program_cascades_and_frees_slots() {
    let (_temp_file, mut db) = create_test_db();
    let choir = seed_program(&mut db, "Choir");
    let retreat = seed_program(&mut db, "Retreat");
    let choir_runs = seed_executions(&mut db, &choir, 2);
    let retreat_runs = seed_executions(&mut db, &retreat, 1);

    db.batch_update_executions(&[
        (choir_runs[0].id.clone(), ExecutionPatch::slot(1)),
        (choir_runs[1].id.clone(), ExecutionPatch::slot(2)),
        (retreat_runs[0].id.clone(), ExecutionPatch::slot(3)),
    ])
    .expect("Failed to apply batch");

    let deleted = db
        .delete_programs(&[choir.clone()])
        .expect("Failed to delete program");
    assert_eq!(deleted, 1);

    assert!(db
        .get_execution(&choir_runs[0].id)
        .expect("Failed to query")
        .is_none());
    let featured = db
        .find_executions(&ExecutionFilter::featured(Limit::All))
        .expect("Failed to find executions");
    assert_eq!(featured.len(), 1);
    assert_eq!(featured[0].show_order, Some(3));
}

#[test]
fn test_delete_executions() {
    let (_temp_file, mut db) = create_test_db();
    let program_id = seed_program(&mut db, "Choir");
    let executions = seed_executions(&mut db, &program_id, 3);

    let deleted = db
        .delete_executions(&[
            executions[0].id.clone(),
            executions[2].id.clone(),
            "missing".to_string(),
        ])
        .expect("Failed to delete executions");
    assert_eq!(deleted, 2);

    let err = db
        .delete_executions(&["missing".to_string()])
        .unwrap_err();
    assert!(matches!(err, LineupError::ExecutionNotFound { .. }));

    let err = db.delete_programs(&["missing".to_string()]).unwrap_err();
    assert!(matches!(err, LineupError::ProgramNotFound { .. }));
}

#[test]
fn test_derive_execution_with_empty_program_image() {
    let (_temp_file, mut db) = create_test_db();
    let program_id = seed_program(&mut db, "Choir");

    let derived = db
        .derive_execution(&program_id)
        .expect("Failed to derive execution");
    assert_eq!(derived.title, "Choir");
    assert!(derived.image.is_none());
}

#[test]
fn test_migration_clears_duplicate_slots() {
    let temp_file = NamedTempFile::new().expect("Failed to create temporary file");

    // A database from before the image column and the unique slot index
    {
        let conn = rusqlite::Connection::open(temp_file.path()).expect("Failed to open");
        conn.execute_batch(
            "CREATE TABLE programs (
                id TEXT PRIMARY KEY NOT NULL,
                title TEXT NOT NULL,
                content TEXT NOT NULL DEFAULT '',
                description TEXT NOT NULL DEFAULT '',
                image TEXT NOT NULL DEFAULT '',
                program_type TEXT NOT NULL DEFAULT 'daily',
                custom_url TEXT,
                created_at TEXT NOT NULL,
                updated_at TEXT NOT NULL
            );
            CREATE TABLE program_executions (
                id TEXT PRIMARY KEY NOT NULL,
                program_id TEXT NOT NULL REFERENCES programs(id) ON DELETE CASCADE,
                title TEXT NOT NULL,
                date INTEGER,
                status TEXT NOT NULL DEFAULT 'upcoming',
                show_order INTEGER,
                created_at TEXT NOT NULL,
                updated_at TEXT NOT NULL
            );
            INSERT INTO programs (id, title, created_at, updated_at)
                VALUES ('p', 'P', '2024-01-01T00:00:00Z', '2024-01-01T00:00:00Z');
            INSERT INTO program_executions (id, program_id, title, show_order, created_at, updated_at)
                VALUES ('a', 'p', 'A', 1, '2024-01-01T00:00:00Z', '2024-01-01T00:00:00Z'),
                       ('b', 'p', 'B', 1, '2024-01-01T00:00:00Z', '2024-01-01T00:00:00Z'),
                       ('c', 'p', 'C', 2, '2024-01-01T00:00:00Z', '2024-01-01T00:00:00Z');",
        )
        .expect("Failed to create legacy schema");
    }

    let db = Database::new(temp_file.path()).expect("Failed to migrate database");

    let featured = db
        .find_executions(&ExecutionFilter::featured(Limit::All))
        .expect("Failed to find executions");
    let ids: Vec<&str> = featured.iter().map(|e| e.id.as_str()).collect();
    assert_eq!(ids, vec!["a", "c"]);

    let b = db
        .get_execution("b")
        .expect("Failed to query")
        .expect("Execution should exist");
    assert_eq!(b.show_order, None);
    assert_eq!(b.image, None);
}
