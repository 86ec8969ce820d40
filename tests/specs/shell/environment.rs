//! Specs for environment handling and the debug hook.

use std::sync::{Arc, Mutex};

use crate::prelude::*;

/// An empty value deletes the variable.
#[tokio::test]
async fn empty_value_deletes() {
    let base = script("echo \"<$X>\"").bake_env(Env::new().set("X", "set"));
    assert_eq!(base.output().await.unwrap(), "<set>\n");
    let deleted = base.bake_env(Env::from([("X", "")]));
    assert!(deleted.template().env_var("X").is_none());
    assert_eq!(deleted.output().await.unwrap(), "<>\n");
}

#[tokio::test]
async fn environment_keeps_insertion_order() {
    let cmd = sh("true")
        .clear_env()
        .bake_env(Env::from([("B", "2"), ("A", "1")]))
        .bake_env(Env::new().set("B", "3"));
    assert_eq!(cmd.template().env_list(), vec!["B=3", "A=1"]);
}

/// The debug hook sees the fully resolved arguments before spawn.
#[tokio::test]
async fn debug_hook_observes_args() {
    let seen = Arc::new(Mutex::new(Vec::new()));
    let record = Arc::clone(&seen);
    let cmd = sh("echo")
        .on_debug(move |template| record.lock().unwrap().extend(template.args().to_vec()))
        .bake_args(["a", "b"]);
    cmd.run().await.unwrap();
    assert_eq!(*seen.lock().unwrap(), vec!["a".to_string(), "b".to_string()]);
}
