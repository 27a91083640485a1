use fittrack::model::{DayOfWeek, DietLog, Todo, UserProfile, WorkoutPlan};
use fittrack::store::fs_backend::FsBackend;
use fittrack::store::{keys, CollectionState, KvBackend, RecordStore};
use std::fs;
use tempfile::TempDir;

fn setup() -> (TempDir, FsBackend) {
    let dir = TempDir::new().unwrap();
    let backend = FsBackend::new(dir.path().join("data"));
    (dir, backend)
}

#[test]
fn test_fs_backend_missing_key_is_none() {
    let (_dir, backend) = setup();
    assert_eq!(backend.get(keys::TODOS).unwrap(), None);
    // Reading does not create the directory
    assert!(!backend.root().exists());
}

#[test]
fn test_fs_backend_set_and_get() {
    let (_dir, backend) = setup();
    backend.set(keys::TODOS, "[]").unwrap();

    assert_eq!(backend.get(keys::TODOS).unwrap(), Some("[]".to_string()));
    assert!(backend
        .root()
        .join("fitness_tracker_todos.json")
        .exists());
}

#[test]
fn test_fs_backend_overwrite_leaves_no_tmp_files() {
    let (_dir, backend) = setup();
    backend.set(keys::DIET_LOGS, "[1]").unwrap();
    backend.set(keys::DIET_LOGS, "[1,2]").unwrap();

    assert_eq!(backend.get(keys::DIET_LOGS).unwrap(), Some("[1,2]".to_string()));
    let leftovers: Vec<_> = fs::read_dir(backend.root())
        .unwrap()
        .filter_map(|e| e.ok())
        .filter(|e| e.file_name().to_string_lossy().ends_with(".tmp"))
        .collect();
    assert!(leftovers.is_empty());
}

#[test]
fn test_fs_backend_rejects_unsafe_keys() {
    let (_dir, backend) = setup();
    for key in ["", "../escape", ".hidden", "a/b", "with space"] {
        assert!(backend.set(key, "x").is_err(), "accepted {:?}", key);
        assert!(backend.get(key).is_err(), "accepted {:?}", key);
    }
}

#[test]
fn test_fs_backend_remove_is_idempotent() {
    let (_dir, backend) = setup();
    backend.set(keys::PROGRESS_LOGS, "[]").unwrap();
    backend.remove(keys::PROGRESS_LOGS).unwrap();
    backend.remove(keys::PROGRESS_LOGS).unwrap();
    assert_eq!(backend.get(keys::PROGRESS_LOGS).unwrap(), None);
}

#[test]
fn test_record_store_survives_reopen() {
    let (dir, backend) = setup();
    let mut store = RecordStore::with_backend(backend);

    let plan = WorkoutPlan::new("u1", "Leg Day", DayOfWeek::Friday);
    store.save(&plan).unwrap();
    store.save(&DietLog::new("u1", "Oats")).unwrap();
    store
        .save_profile(
            "u1",
            UserProfile {
                username: Some("lifter".into()),
                ..Default::default()
            },
        )
        .unwrap();

    let reopened = RecordStore::with_backend(FsBackend::new(dir.path().join("data")));
    let plans: Vec<WorkoutPlan> = reopened.list("u1");
    assert_eq!(plans, vec![plan]);
    assert_eq!(reopened.list::<DietLog>("u1").len(), 1);
    assert_eq!(
        reopened.get_profile("u1").unwrap().username.as_deref(),
        Some("lifter")
    );
}

#[test]
fn test_record_store_stores_camel_case_json() {
    let (_dir, backend) = setup();
    let mut store = RecordStore::with_backend(backend);
    store
        .save(&WorkoutPlan::new("u1", "Push", DayOfWeek::Monday))
        .unwrap();

    let raw = store.backend().get(keys::WORKOUT_PLANS).unwrap().unwrap();
    let value: serde_json::Value = serde_json::from_str(&raw).unwrap();
    assert_eq!(value[0]["userId"], "u1");
    assert_eq!(value[0]["dayOfWeek"], "Monday");
    assert!(value[0]["exercises"].as_array().unwrap().is_empty());
}

#[test]
fn test_record_store_reads_corrupt_file_as_empty() {
    let (_dir, backend) = setup();
    backend.set(keys::WORKOUT_PLANS, "{not json").unwrap();
    let mut store = RecordStore::with_backend(backend);

    assert!(store.list::<WorkoutPlan>("u1").is_empty());

    // Next save replaces the corrupt contents
    store
        .save(&WorkoutPlan::new("u1", "Pull", DayOfWeek::Tuesday))
        .unwrap();
    assert_eq!(store.list::<WorkoutPlan>("u1").len(), 1);
}

#[test]
fn test_record_store_clear_removes_files() {
    let (_dir, backend) = setup();
    let mut store = RecordStore::with_backend(backend);
    store.save(&DietLog::new("u1", "Eggs")).unwrap();
    store.clear().unwrap();

    assert!(!store
        .backend()
        .root()
        .join("fitness_tracker_diet_logs.json")
        .exists());
    assert!(store.list::<DietLog>("u1").is_empty());
}

#[test]
fn test_record_store_recovers_from_invalid_utf8() {
    let (_dir, backend) = setup();
    fs::create_dir_all(backend.root()).unwrap();
    let path = backend.key_path(keys::TODOS).unwrap();
    fs::write(&path, [0xff, 0xfe, b'[', b']']).unwrap();
    let mut store = RecordStore::with_backend(backend);

    assert!(store.list::<Todo>("u1").is_empty());
    let health = store.inspect();
    let todos = health.iter().find(|h| h.key == keys::TODOS).unwrap();
    assert!(matches!(todos.state, CollectionState::Corrupt { .. }));

    // The bad file is replaced by the next write
    store.save(&Todo::new("u1", "Stretch")).unwrap();
    let todos = store.list::<Todo>("u1");
    assert_eq!(todos.len(), 1);
    assert_eq!(todos[0].title, "Stretch");
}
