//! # Link Generator Session
//!
//! Drives a [`LinkGenerator`] from a stream of input field values:
//!
//! ```text
//! keystroke ─► normalize ─► view (link, pending) ─► debounce ─► resolve ─► view
//! ```
//!
//! Resolution calls run on their own tasks so that typing is never blocked
//! by a slow resolver. Each call carries a [`ResolveTicket`]; completions for
//! an input that has since changed are discarded.
//!
//! Views are published on a [`watch`] channel: a reader sees the latest view
//! and never holds up the session, however far behind it falls.

mod controller;

use std::sync::Arc;
use std::time::Duration;

use jbpub_types::{Answer, LinkView, PublicBase, RepoReference};
use tokio::sync::{mpsc, watch};
use tokio::task::JoinHandle;

pub use controller::{LinkGenerator, ResolveTicket};

use crate::api::Resolve;
use crate::debounce::debounce;

/// Capacity of the input channel.
const CHANNEL_CAPACITY: usize = 64;

/// A running session.
pub struct SessionHandle {
    /// Send the full input field text after every edit.
    pub input: mpsc::Sender<String>,
    /// Latest view; marked changed whenever something visible changed.
    pub views: watch::Receiver<LinkView>,
    /// Resolves to the final state once `input` is dropped and all
    /// outstanding work is done.
    pub task: JoinHandle<LinkGenerator>,
}

/// Spawns a session resolving through `resolver`.
pub fn spawn_session(base: PublicBase, resolver: Arc<dyn Resolve>, window: Duration) -> SessionHandle {
    let (input_tx, input_rx) = mpsc::channel(CHANNEL_CAPACITY);
    let (view_tx, view_rx) = watch::channel(LinkView::empty());

    let task = tokio::spawn(run_session(
        LinkGenerator::new(base),
        resolver,
        window,
        input_rx,
        view_tx,
    ));

    SessionHandle {
        input: input_tx,
        views: view_rx,
        task,
    }
}

/// Runs a session until `input` closes and every issued request completed,
/// or until every view receiver is dropped.
pub async fn run_session(
    mut generator: LinkGenerator,
    resolver: Arc<dyn Resolve>,
    window: Duration,
    mut input: mpsc::Receiver<String>,
    views: watch::Sender<LinkView>,
) -> LinkGenerator {
    let (settle_tx, settle_rx) = mpsc::channel::<RepoReference>(CHANNEL_CAPACITY);
    let (mut settled, _debouncer) = debounce(window, settle_rx);
    let (done_tx, mut done_rx) = mpsc::unbounded_channel::<(ResolveTicket, Option<Answer>)>();

    let mut settle_tx = Some(settle_tx);
    let mut done_tx = Some(done_tx);
    let mut input_open = true;
    let mut settle_open = true;

    loop {
        tokio::select! {
            raw = input.recv(), if input_open => match raw {
                Some(raw) => {
                    if !generator.set_input(&raw) {
                        continue;
                    }
                    if views.send(generator.view()).is_err() {
                        break;
                    }
                    if let Some(tx) = &settle_tx {
                        let _ = tx.send(generator.reference().clone()).await;
                    }
                }
                None => {
                    input_open = false;
                    settle_tx = None;
                }
            },
            reference = settled.recv(), if settle_open => match reference {
                Some(reference) => {
                    let (Some(ticket), Some(tx)) = (generator.settle(&reference), &done_tx) else {
                        continue;
                    };
                    tracing::debug!(generation = ticket.generation(), %reference, "Resolving");
                    let resolver = Arc::clone(&resolver);
                    let tx = tx.clone();
                    tokio::spawn(async move {
                        let answer = resolver.resolve(ticket.reference()).await;
                        let _ = tx.send((ticket, answer));
                    });
                }
                None => {
                    settle_open = false;
                    done_tx = None;
                }
            },
            Some((ticket, answer)) = done_rx.recv() => {
                if generator.apply(ticket, answer) && views.send(generator.view()).is_err() {
                    break;
                }
            }
            else => break,
        }
    }

    generator
}
