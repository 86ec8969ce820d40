// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

/// Run a command, or derive a new one from loosely typed modifiers.
///
/// With only a command, expands to `cmd.run()`; await the result.
///
/// With modifiers, each one goes through [`Modifier::from_value`] and the
/// expansion evaluates to `Result<Command, ShellError>`, failing on the first
/// value that is not a recognized modifier.
///
/// [`Modifier::from_value`]: crate::Modifier::from_value
///
/// ```no_run
/// use bake_shell::{sh, Env};
///
/// # async fn demo() -> Result<(), bake_shell::ShellError> {
/// let echo = sh!(sh("echo"), "hello", Env::new().set("LANG", "C"))?;
/// sh!(echo).await?;
/// # Ok(())
/// # }
/// ```
#[macro_export]
macro_rules! sh {
    ($cmd:expr $(,)?) => {
        $cmd.run()
    };
    ($cmd:expr, $($modifier:expr),+ $(,)?) => {
        (|| -> ::std::result::Result<$crate::Command, $crate::ShellError> {
            ::std::result::Result::Ok(
                $cmd.apply([$($crate::Modifier::from_value($modifier)?),+]),
            )
        })()
    };
}
