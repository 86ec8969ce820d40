// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

use super::*;

#[test]
fn env_unset_is_an_empty_value() {
    let env = Env::new().set("A", "1").unset("B");
    let pairs: Vec<_> = env.iter().collect();
    assert_eq!(pairs, vec![("A", "1"), ("B", "")]);
}

#[test]
fn env_from_pairs_keeps_order() {
    let env = Env::from([("Z", "26"), ("A", "1")]);
    let keys: Vec<_> = env.iter().map(|(k, _)| k).collect();
    assert_eq!(keys, vec!["Z", "A"]);
}

#[test]
fn opts_only_records_fields_that_were_set() {
    let opts = Opts::new().cwd("/tmp").ok_exit([0, 3]);
    assert_eq!(opts.cwd.as_deref(), Some(std::path::Path::new("/tmp")));
    assert!(opts.stdin.is_none());
    assert!(opts.stdout.is_none());
    assert!(opts.stderr.is_none());
    assert_eq!(opts.ok_exit, Some(BTreeSet::from([0, 3])));
}

#[test]
fn string_modifiers_become_args() {
    assert!(matches!(Modifier::from("a"), Modifier::Args(a) if a == ["a"]));
    assert!(matches!(Modifier::from("b".to_string()), Modifier::Args(a) if a == ["b"]));
    assert!(
        matches!(Modifier::from(vec!["c".to_string(), "d".to_string()]), Modifier::Args(a) if a == ["c", "d"])
    );
}

// ---------------------------------------------------------------------------
// from_value
// ---------------------------------------------------------------------------

#[test]
fn from_value_accepts_recognized_kinds() {
    assert!(matches!(Modifier::from_value("x").unwrap(), Modifier::Args(_)));
    assert!(matches!(Modifier::from_value("x".to_string()).unwrap(), Modifier::Args(_)));
    assert!(matches!(
        Modifier::from_value(vec!["x".to_string()]).unwrap(),
        Modifier::Args(_)
    ));
    assert!(matches!(Modifier::from_value(Env::new()).unwrap(), Modifier::Env(_)));
    assert!(matches!(Modifier::from_value(ClearEnv).unwrap(), Modifier::ClearEnv));
    assert!(matches!(Modifier::from_value(Opts::new()).unwrap(), Modifier::Opts(_)));
    let hook: DebugHook = Arc::new(|_| {});
    assert!(matches!(Modifier::from_value(hook).unwrap(), Modifier::Debug(_)));
}

#[test]
fn from_value_passes_modifiers_through() {
    let modifier = Modifier::from_value(Modifier::ClearEnv).unwrap();
    assert!(matches!(modifier, Modifier::ClearEnv));
}

#[yare::parameterized(
    float = { Modifier::from_value(1.5f64), "f64" },
    integer = { Modifier::from_value(7i32), "i32" },
    unit = { Modifier::from_value(()), "()" },
)]
fn from_value_rejects_other_types(result: Result<Modifier, ShellError>, type_name: &str) {
    match result {
        Err(ShellError::IncomprehensibleModifier { type_name: got }) => {
            assert_eq!(got, type_name)
        }
        other => panic!("expected IncomprehensibleModifier, got: {other:?}"),
    }
}

#[test]
fn debug_modifier_hides_the_hook() {
    let hook: DebugHook = Arc::new(|_| {});
    assert_eq!(format!("{:?}", Modifier::Debug(hook)), "Debug(..)");
}
