#![allow(dead_code)]

use lineup_core::{
    models::{NewExecution, NewProgram},
    CapacityPolicy, Database, Lineup, LineupBuilder, ProgramExecution,
};
use tempfile::{NamedTempFile, TempDir};

/// Helper function to create a test instance with the given capacity policy
pub async fn create_test_lineup(policy: CapacityPolicy) -> (TempDir, Lineup) {
    let temp_dir = TempDir::new().expect("Failed to create temp dir");
    let db_path = temp_dir.path().join("test.db");
    let lineup = LineupBuilder::new()
        .with_database_path(Some(&db_path))
        .with_capacity_policy(policy)
        .build()
        .await
        .expect("Failed to create lineup");
    (temp_dir, lineup)
}

/// Helper function to create a temporary database for testing
pub fn create_test_db() -> (NamedTempFile, Database) {
    let temp_file = NamedTempFile::new().expect("Failed to create temporary file");
    let db = Database::new(temp_file.path()).expect("Failed to create test database");
    (temp_file, db)
}

pub fn seed_program(db: &mut Database, id: &str) -> String {
    db.create_program(&NewProgram {
        id: id.to_string(),
        title: id.replace('_', " "),
        description: format!("About {id}"),
        ..Default::default()
    })
    .expect("Failed to create program")
    .id
}

/// Creates `count` undated, unfeatured executions of `program_id`.
pub fn seed_executions(db: &mut Database, program_id: &str, count: usize) -> Vec<ProgramExecution> {
    (0..count)
        .map(|i| {
            db.create_execution(
                program_id,
                &NewExecution {
                    title: format!("Session {i}"),
                    ..Default::default()
                },
            )
            .expect("Failed to create execution")
        })
        .collect()
}
