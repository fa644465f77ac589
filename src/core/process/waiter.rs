// presto-rs: Presto Build process engine - Rust Port
//
// SPDX-FileCopyrightText: 2026 Romeo Ahmed
// SPDX-License-Identifier: GPL-3.0-or-later

//! Blocking across many children at once.
//!
//! ```text
//! handles --> live channels --> select_all(readable())
//!                                   |
//!                     first ready --+--> Ok(())
//! ```
//!
//! Readiness covers output data and end-of-stream only. A child that has
//! exited while a grandchild still holds its output open is not "ready";
//! its end-of-stream arrives when the last writer closes.

use std::time::Duration;

use futures_util::future::select_all;

use super::ProcessHandle;
use crate::error::WaitError;

/// Suspends until at least one non-terminated handle has output ready or
/// has reached end-of-stream.
///
/// Performs no reads; call [`ProcessHandle::pump`] on every handle
/// afterwards, since several may be ready at once.
///
/// Only output readiness is watched, not process exit. If the child exits
/// while a background grandchild still holds its output open, the handle
/// stays running until that grandchild closes the stream too; detach such
/// grandchildren from stdout and stderr (e.g. `daemon >/dev/null 2>&1 &`).
///
/// # Errors
///
/// - [`WaitError::Empty`] if `handles` is empty.
/// - [`WaitError::AllTerminated`] if every handle has terminated.
/// - [`WaitError::Readiness`] if polling an output stream fails.
pub async fn wait<'a, I>(handles: I) -> Result<(), WaitError>
where
    I: IntoIterator<Item = &'a ProcessHandle>,
{
    let mut count = 0;
    let mut readiness = Vec::new();
    for handle in handles {
        count += 1;
        if let Some(channel) = handle.channel() {
            readiness.push(Box::pin(channel.readable()));
        }
    }

    if count == 0 {
        return Err(WaitError::Empty);
    }
    if readiness.is_empty() {
        return Err(WaitError::AllTerminated { count });
    }

    let (ready, _, _) = select_all(readiness).await;
    ready.map_err(WaitError::Readiness)
}

/// Like [`wait`], but gives up after `duration`.
///
/// Returns `Ok(false)` if nothing became ready in time.
///
/// # Errors
///
/// Same as [`wait`]; misuse is reported immediately, not after the timeout.
pub async fn wait_timeout<'a, I>(handles: I, duration: Duration) -> Result<bool, WaitError>
where
    I: IntoIterator<Item = &'a ProcessHandle>,
{
    match tokio::time::timeout(duration, wait(handles)).await {
        Ok(result) => result.map(|()| true),
        Err(_elapsed) => Ok(false),
    }
}
