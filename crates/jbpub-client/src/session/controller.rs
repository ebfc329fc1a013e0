//! # Link Generator State
//!
//! The single owner of what the link generator currently shows.

use jbpub_types::{normalize, Answer, LinkView, PublicBase, RepoReference, Resolution};
use url::Url;

/// Identifies the input a resolution request was issued for.
///
/// Handed out by [`LinkGenerator::settle`] and handed back with the answer to
/// [`LinkGenerator::apply`], which drops it if the input has moved on.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ResolveTicket {
    generation: u64,
    reference: RepoReference,
}

impl ResolveTicket {
    /// The reference to resolve.
    #[must_use]
    pub fn reference(&self) -> &RepoReference {
        &self.reference
    }

    /// Input generation the ticket was issued for.
    #[must_use]
    pub fn generation(&self) -> u64 {
        self.generation
    }
}

/// Link generator state.
///
/// Every change of the normalized reference bumps a generation counter,
/// recomputes the share link and resets the resolution. Answers are only
/// accepted for the current generation.
///
/// # Examples
///
/// ```rust,ignore
/// let mut generator = LinkGenerator::new(PublicBase::parse("https://jupyterbook.pub")?);
///
/// generator.set_input("github.com/a/b");
/// let ticket = generator.settle(&generator.reference().clone()).unwrap();
/// let answer = resolver.resolve(ticket.reference()).await;
/// generator.apply(ticket, answer);
///
/// println!("{:?}", generator.view());
/// ```
#[derive(Debug, Clone)]
pub struct LinkGenerator {
    base: PublicBase,
    reference: RepoReference,
    share_link: Option<Url>,
    resolution: Resolution,
    generation: u64,
}

impl LinkGenerator {
    /// Creates an empty link generator for links under `base`.
    #[must_use]
    pub fn new(base: PublicBase) -> Self {
        Self {
            base,
            reference: RepoReference::empty(),
            share_link: None,
            resolution: Resolution::Empty,
            generation: 0,
        }
    }

    /// Current normalized reference.
    #[must_use]
    pub fn reference(&self) -> &RepoReference {
        &self.reference
    }

    /// Current share link, if any.
    #[must_use]
    pub fn share_link(&self) -> Option<&Url> {
        self.share_link.as_ref()
    }

    /// Current resolution state.
    #[must_use]
    pub fn resolution(&self) -> &Resolution {
        &self.resolution
    }

    /// Current input generation.
    #[must_use]
    pub fn generation(&self) -> u64 {
        self.generation
    }

    /// Applies new input field text.
    ///
    /// Returns `true` when the normalized reference changed. Clearing the
    /// field drops any answer immediately.
    pub fn set_input(&mut self, raw: &str) -> bool {
        let reference = normalize(raw);
        if reference == self.reference {
            return false;
        }

        self.generation += 1;
        self.share_link = self.base.share_link(&reference);
        self.resolution = if reference.is_empty() {
            Resolution::Empty
        } else {
            Resolution::Pending
        };
        tracing::trace!(generation = self.generation, %reference, "Input changed");
        self.reference = reference;
        true
    }

    /// Called when the debouncer settles on `reference`.
    ///
    /// Returns a ticket to resolve, or `None` if the settled value is stale
    /// or empty.
    pub fn settle(&mut self, reference: &RepoReference) -> Option<ResolveTicket> {
        if reference.is_empty() || *reference != self.reference {
            return None;
        }
        Some(ResolveTicket {
            generation: self.generation,
            reference: reference.clone(),
        })
    }

    /// Records the resolver's answer for `ticket`.
    ///
    /// Returns `false` and leaves the state untouched if the ticket belongs
    /// to an older input.
    pub fn apply(&mut self, ticket: ResolveTicket, answer: Option<Answer>) -> bool {
        if ticket.generation != self.generation {
            tracing::debug!(
                ticket = ticket.generation,
                current = self.generation,
                reference = %ticket.reference,
                "Discarding stale answer"
            );
            return false;
        }

        self.resolution = Resolution::Settled(answer);
        true
    }

    /// Derives what should be shown right now.
    #[must_use]
    pub fn view(&self) -> LinkView {
        LinkView::derive(self.share_link.as_ref(), &self.resolution)
    }
}
