use scriptman::script::ScriptStore;

fn store() -> (tempfile::TempDir, ScriptStore) {
    let dir = tempfile::tempdir().unwrap();
    let store = ScriptStore::at(dir.path().to_path_buf());
    (dir, store)
}

#[test]
fn save_detects_variables_and_round_trips() {
    let (_dir, store) = store();
    let saved = store
        .upsert(
            "adduser",
            "useradd -m $(user) -c \"$(fullName)\"",
            Some("create a user".into()),
        )
        .unwrap();
    assert_eq!(saved.variables, vec!["user", "fullName"]);

    let loaded = store.load("adduser").unwrap();
    assert_eq!(loaded.name, "adduser");
    assert_eq!(loaded.content, saved.content);
    assert_eq!(loaded.description.as_deref(), Some("create a user"));
    assert_eq!(loaded.variables, saved.variables);
}

#[test]
fn update_preserves_creation_timestamp_and_recomputes_variables() {
    let (_dir, store) = store();
    let first = store.upsert("greet", "echo $(name)", None).unwrap();
    let second = store.upsert("greet", "echo $(name) from $(host)", None).unwrap();

    assert_eq!(second.created_at, first.created_at);
    assert_eq!(second.variables, vec!["name", "host"]);
    assert_eq!(store.load("greet").unwrap().variables, vec!["name", "host"]);
}

#[test]
fn exists_and_remove() {
    let (_dir, store) = store();
    assert!(!store.exists("gone"));
    store.upsert("gone", "true", None).unwrap();
    assert!(store.exists("gone"));
    store.remove("gone").unwrap();
    assert!(!store.exists("gone"));
    assert!(store.remove("gone").is_err());
    assert!(store.load("gone").is_err());
}

#[test]
fn names_with_path_separators_are_rejected() {
    let (dir, store) = store();

    assert!(store.upsert("../evil", "true", None).is_err());
    assert!(store.upsert("nested/name", "true", None).is_err());
    assert!(store.upsert("back\\slash", "true", None).is_err());
    assert!(store.upsert("", "true", None).is_err());
    assert!(store.upsert("..", "true", None).is_err());

    assert!(store.load("../evil").is_err());
    assert!(store.remove("../evil").is_err());
    assert!(!store.exists("../evil"));

    // Nothing escaped the storage directory.
    assert!(!dir.path().parent().unwrap().join("evil.json").exists());
}

#[test]
fn list_is_sorted_by_name() {
    let (_dir, store) = store();
    store.upsert("zeta", "true", None).unwrap();
    store.upsert("alpha", "true", None).unwrap();
    store.upsert("mid", "true", None).unwrap();

    let names: Vec<String> = store.list().into_iter().map(|s| s.name).collect();
    assert_eq!(names, vec!["alpha", "mid", "zeta"]);
}
