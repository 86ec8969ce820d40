//! Specs for deriving commands from one another.

use crate::prelude::*;

/// A derived command never changes the command it came from.
#[test]
fn derivation_leaves_the_base_alone() {
    let base = sh("echo").bake_args(["base"]);
    let _derived = base
        .bake_args(["more"])
        .bake_env(Env::new().set("BAKE_SPEC", "1"))
        .bake_opts([Opts::new().ok_exit([9]).cwd("/")]);

    assert_eq!(base.template().args(), ["base".to_string()]);
    assert!(base.template().env_var("BAKE_SPEC").is_none());
    assert!(base.template().cwd().is_none());
    assert!(base.template().accepts(0));
    assert!(!base.template().accepts(9));
}

/// Later option bundles override earlier ones only on the fields they set.
#[test]
fn later_opts_override_field_by_field() {
    let cmd = sh("ls")
        .bake_opts([Opts::new().cwd("/a").ok_exit([4])])
        .bake_opts([Opts::new().cwd("/b")]);
    assert_eq!(cmd.template().cwd(), Some(std::path::Path::new("/b")));
    assert!(cmd.template().accepts(4));
}

/// Loose modifiers go through the dynamic boundary.
#[test]
fn sh_macro_with_modifiers() {
    let cmd = bake_shell::sh!(sh("echo"), "a", Env::new().set("K", "v"), ClearEnv).unwrap();
    assert_eq!(cmd.template().args(), ["a".to_string()]);
    assert!(cmd.template().env().is_empty());
}

/// Unknown modifier kinds are refused by type name.
#[test]
fn incomprehensible_modifier() {
    let err = Modifier::from_value(3.5f32).unwrap_err();
    assert!(matches!(
        err,
        ShellError::IncomprehensibleModifier { type_name: "f32" }
    ));
}

/// `sh!(cmd)` runs the command.
#[tokio::test]
async fn sh_macro_without_modifiers_runs() {
    bake_shell::sh!(sh("true")).await.unwrap();
}
