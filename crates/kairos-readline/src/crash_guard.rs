//! Last line of defence for the REPL.
//!
//! A panic anywhere in the app is caught here and replaced by a crash screen
//! offering to reload, instead of tearing down the terminal.

use std::any::Any;
use std::future::Future;
use std::panic::AssertUnwindSafe;

use futures::FutureExt;

use crate::views::crash::render_crash;

/// How a guarded run ended.
#[derive(Debug, PartialEq, Eq)]
pub enum Outcome<T> {
    Finished(T),
    /// The app panicked and the user declined to reload.
    Crashed,
}

pub fn panic_message(payload: &(dyn Any + Send)) -> String {
    if let Some(message) = payload.downcast_ref::<&str>() {
        message.to_string()
    } else if let Some(message) = payload.downcast_ref::<String>() {
        message.clone()
    } else {
        String::new()
    }
}

/// Runs `launch` until it finishes, relaunching after a panic for as long as
/// `reload` agrees. `reload` receives the rendered crash screen.
pub async fn run_guarded<T, Fut, L, R>(mut launch: L, mut reload: R) -> Outcome<T>
where
    L: FnMut() -> Fut,
    Fut: Future<Output = T>,
    R: FnMut(&str) -> bool,
{
    loop {
        match AssertUnwindSafe(launch()).catch_unwind().await {
            Ok(value) => return Outcome::Finished(value),
            Err(payload) => {
                let detail = panic_message(payload.as_ref());
                tracing::error!("[CrashGuard] App crashed: {}", detail);

                if !reload(&render_crash(&detail)) {
                    return Outcome::Crashed;
                }
                tracing::info!("[CrashGuard] Reloading");
            }
        }
    }
}
