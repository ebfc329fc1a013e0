//! # Debounced Trigger
//!
//! Turns a stream of rapidly changing values into a stream of settled ones.

use std::time::Duration;

use tokio::sync::mpsc;
use tokio::task::JoinHandle;

/// Capacity of the settled-value channel.
const SETTLED_CAPACITY: usize = 16;

/// Spawns a debouncer over `input`.
///
/// A value is forwarded only once no newer value has arrived for `window`;
/// every value superseded inside the window is dropped. When `input` closes
/// while a value is still waiting, that value is forwarded immediately and
/// the returned receiver then closes.
///
/// # Examples
///
/// ```rust,ignore
/// let (tx, rx) = mpsc::channel(16);
/// let (mut settled, _task) = debounce(Duration::from_millis(1000), rx);
///
/// tx.send("g").await?;
/// tx.send("gi").await?;
/// assert_eq!(settled.recv().await, Some("gi"));
/// ```
pub fn debounce<T>(window: Duration, mut input: mpsc::Receiver<T>) -> (mpsc::Receiver<T>, JoinHandle<()>)
where
    T: Send + 'static,
{
    let (tx, rx) = mpsc::channel(SETTLED_CAPACITY);

    let task = tokio::spawn(async move {
        let mut pending: Option<T> = None;

        loop {
            let Some(value) = pending.take() else {
                match input.recv().await {
                    Some(value) => {
                        pending = Some(value);
                        continue;
                    }
                    None => break,
                }
            };

            tokio::select! {
                next = input.recv() => match next {
                    Some(newer) => pending = Some(newer),
                    None => {
                        let _ = tx.send(value).await;
                        break;
                    }
                },
                _ = tokio::time::sleep(window) => {
                    if tx.send(value).await.is_err() {
                        break;
                    }
                }
            }
        }

        tracing::trace!("Debouncer input closed");
    });

    (rx, task)
}

#[cfg(test)]
mod tests {
    use super::*;
    use tokio::time::{sleep, Instant};
    use tokio_test::{assert_pending, assert_ready};

    const WINDOW: Duration = Duration::from_millis(1000);

    async fn collect<T>(mut rx: mpsc::Receiver<T>) -> Vec<T> {
        let mut out = Vec::new();
        while let Some(v) = rx.recv().await {
            out.push(v);
        }
        out
    }

    #[tokio::test(start_paused = true)]
    async fn rapid_keystrokes_settle_once_on_the_last_value() {
        let (tx, rx) = mpsc::channel(16);
        let (mut settled, _task) = debounce(WINDOW, rx);

        let mut last_sent = Instant::now();
        for value in ["g", "gi", "git", "github.com/a/b"] {
            tx.send(value).await.unwrap();
            last_sent = Instant::now();
            sleep(Duration::from_millis(100)).await;
        }

        assert_eq!(settled.recv().await, Some("github.com/a/b"));
        assert!(Instant::now() - last_sent >= WINDOW);

        drop(tx);
        assert!(collect(settled).await.is_empty());
    }

    #[tokio::test(start_paused = true)]
    async fn nothing_is_emitted_inside_the_window() {
        let (tx, rx) = mpsc::channel(16);
        let (mut settled, _task) = debounce(WINDOW, rx);

        tx.send(1u32).await.unwrap();
        sleep(Duration::from_millis(500)).await;

        {
            let mut recv = tokio_test::task::spawn(settled.recv());
            assert_pending!(recv.poll());
        }

        sleep(Duration::from_millis(600)).await;
        let mut recv = tokio_test::task::spawn(settled.recv());
        assert_eq!(assert_ready!(recv.poll()), Some(1));
    }

    #[tokio::test(start_paused = true)]
    async fn values_spaced_beyond_the_window_are_all_emitted() {
        let (tx, rx) = mpsc::channel(16);
        let (settled, _task) = debounce(WINDOW, rx);

        tx.send("a").await.unwrap();
        sleep(Duration::from_millis(1500)).await;
        tx.send("b").await.unwrap();
        sleep(Duration::from_millis(1500)).await;
        drop(tx);

        assert_eq!(collect(settled).await, vec!["a", "b"]);
    }

    #[tokio::test(start_paused = true)]
    async fn pending_value_is_flushed_when_input_closes() {
        let (tx, rx) = mpsc::channel(16);
        let (settled, task) = debounce(WINDOW, rx);

        tx.send("x").await.unwrap();
        tx.send("xy").await.unwrap();
        drop(tx);

        assert_eq!(collect(settled).await, vec!["xy"]);
        task.await.unwrap();
    }
}
