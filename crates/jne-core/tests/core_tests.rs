use jne_core::{
    DocumentStore, EditOpts, Path, SharedDocument, WriteMode, apply, format_path, path, resolve,
};
use serde_json::{Value, json};

fn sample() -> Value {
    json!({
        "customer": [{"name": "Ann", "tags": ["vip"]}, {"name": "Bo"}],
        "meta": {"version": 3, "flags": {"beta": true}},
        "note": null
    })
}

#[test]
fn empty_path_apply_returns_new_value() {
    for root in [json!(null), json!(1), sample()] {
        for v in [json!({"x": 1}), json!([]), json!("s"), json!(null)] {
            assert_eq!(apply(root.clone(), &Path::root(), v.clone()), v);
        }
    }
}

#[test]
fn resolve_after_apply() {
    let paths = [
        path!("customer", 0, "name"),
        path!("customer", 5),
        path!("meta", "flags", "alpha"),
        path!("note", "inner", 0),
        path!("meta", "version", "major"),
        path!("customer", "oops"),
        path!("brand", "new", 2, "leaf"),
    ];
    for p in paths {
        let v = json!({"written": p.to_pointer()});
        let out = apply(sample(), &p, v.clone());
        assert_eq!(resolve(&out, &p), Some(&v), "{}", format_path(&p));
    }
}

#[test]
fn sibling_paths_are_untouched() {
    let before = sample();
    let after = apply(before.clone(), &path!("customer", 0, "tags", 1), json!("new"));
    for sibling in [
        path!("customer", 1),
        path!("customer", 0, "name"),
        path!("meta"),
        path!("note"),
    ] {
        assert_eq!(resolve(&after, &sibling), resolve(&before, &sibling));
    }
    assert_eq!(resolve(&after, &path!("customer", 0, "tags", 0)), Some(&json!("vip")));
}

#[test]
fn container_inference_and_key_synthesis() {
    assert_eq!(apply(json!({}), &path!("a", 0), json!("x")), json!({"a": ["x"]}));
    assert_eq!(apply(json!({}), &path!("a", "b"), json!(1)), json!({"a": {"b": 1}}));
}

#[test]
fn missing_and_primitive_paths_are_not_found() {
    let v = json!({"a": 1});
    assert_eq!(resolve(&v, &path!("b", "c")), None);
    assert_eq!(resolve(&v, &path!("a", "c")), None);
}

#[test]
fn formatter_scenarios() {
    assert_eq!(format_path(&Path::root()), "$");
    assert_eq!(format_path(&path!("customer", 0)), r#"$["customer"][0]"#);
    let parsed = Path::parse_json(r#"["customer", 0]"#).unwrap();
    assert_eq!(format_path(&parsed), r#"$["customer"][0]"#);
}

#[test]
fn resolve_is_idempotent_and_read_only() {
    let root = sample();
    let copy = root.clone();
    let p = path!("meta", "flags");
    let first = resolve(&root, &p).cloned();
    let second = resolve(&root, &p).cloned();
    assert_eq!(first, second);
    assert_eq!(root, copy);
}

#[test]
fn pointer_and_array_forms_address_the_same_node() {
    let root = sample();
    let a = Path::from_pointer("/customer/0/tags/0").unwrap();
    let b = Path::parse_json(r#"["customer",0,"tags",0]"#).unwrap();
    assert_eq!(a, b);
    assert_eq!(resolve(&root, &a), Some(&json!("vip")));
}

#[test]
fn concurrent_edits_do_not_lose_updates() {
    use std::sync::Arc;
    let store = Arc::new(SharedDocument::new(json!({})));
    let handles: Vec<_> = (0..8)
        .map(|t| {
            let store = Arc::clone(&store);
            std::thread::spawn(move || {
                for i in 0..25usize {
                    let p = path!(format!("w{t}"), i);
                    store.edit(&p, json!(i), WriteMode::Permissive).unwrap();
                }
            })
        })
        .collect();
    for h in handles {
        h.join().unwrap();
    }
    let snap = store.current();
    assert_eq!(snap.revision, 8 * 25);
    for t in 0..8 {
        let arr = resolve(&snap.root, &path!(format!("w{t}"))).unwrap();
        assert_eq!(arr.as_array().map(Vec::len), Some(25));
    }
}

#[test]
fn file_round_trip_with_backup() {
    use jne_core::{load_json_file, save_json_file};
    let dir = tempfile::tempdir().unwrap();
    let file = dir.path().join("doc.json");
    std::fs::write(&file, r#"{"a":{"b":[1,2,3]}}"#).unwrap();

    let v = load_json_file(&file).unwrap();
    let v = apply(v, &path!("a", "b", 1), json!(42));
    let backup = save_json_file(&file, &v, &EditOpts::default()).unwrap();

    let backup = backup.expect("existing file is backed up");
    let name = backup.file_name().unwrap().to_string_lossy().into_owned();
    assert!(name.starts_with("doc_") && name.ends_with(".json.bak"), "{name}");
    assert_eq!(std::fs::read_to_string(&backup).unwrap(), r#"{"a":{"b":[1,2,3]}}"#);
    assert_eq!(load_json_file(&file).unwrap(), json!({"a": {"b": [1, 42, 3]}}));
}

#[test]
fn empty_file_is_malformed_input() {
    let dir = tempfile::tempdir().unwrap();
    let file = dir.path().join("empty.json");
    std::fs::write(&file, "  \n").unwrap();
    assert!(matches!(
        jne_core::load_json_file(&file),
        Err(jne_core::EditError::MalformedInput(_))
    ));
}

#[test]
fn back_to_back_saves_keep_every_backup() {
    use jne_core::{load_json_file, save_json_file};
    let dir = tempfile::tempdir().unwrap();
    let file = dir.path().join("doc.json");
    std::fs::write(&file, r#"{"v":0}"#).unwrap();
    let opts = EditOpts { pretty: false, ..EditOpts::default() };

    let first = save_json_file(&file, &json!({"v": 1}), &opts).unwrap().unwrap();
    let second = save_json_file(&file, &json!({"v": 2}), &opts).unwrap().unwrap();

    assert_ne!(first, second);
    assert_eq!(std::fs::read_to_string(&first).unwrap(), r#"{"v":0}"#);
    assert_eq!(load_json_file(&second).unwrap(), json!({"v": 1}));
    assert_eq!(load_json_file(&file).unwrap(), json!({"v": 2}));
}

#[test]
fn huge_index_is_an_error_not_a_crash() {
    use jne_core::{EditError, MAX_PAD, try_apply};
    let p = Path::parse_json(r#"["a", 18446744073709551615]"#).unwrap();
    assert!(matches!(
        try_apply(json!({}), &p, json!(1), WriteMode::Permissive),
        Err(EditError::IndexOutOfRange { .. })
    ));
    assert_eq!(apply(json!({"a": []}), &p, json!(1)), json!({"a": []}));

    let past_bound = path!("a", MAX_PAD + 1);
    assert!(try_apply(json!({}), &past_bound, json!(1), WriteMode::Strict).is_err());
}
