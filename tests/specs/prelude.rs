//! Shared helpers for specs.

pub use bake_shell::{
    sh, Buffer, ClearEnv, Command, Endpoint, Env, Modifier, Opts, ShellError, Side,
};
pub use tokio::sync::mpsc;

/// A command running `body` under `sh -c`.
pub fn script(body: &str) -> Command {
    sh("sh").bake_args(["-c", body])
}

/// Collect every text chunk until the channel closes.
pub async fn drain(rx: &mut mpsc::Receiver<String>) -> String {
    let mut text = String::new();
    while let Some(chunk) = rx.recv().await {
        text.push_str(&chunk);
    }
    text
}
