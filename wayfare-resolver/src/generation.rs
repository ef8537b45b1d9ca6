//! Discarding results of superseded navigations.
//!
//! A [`DisplaySlot`] holds what is on screen. Each navigation takes a
//! [`GenerationToken`]; a commit is accepted only while its token is the
//! most recently issued one, so a slow resolution for an old destination can
//! never overwrite a newer page.

use std::cell::{Cell, RefCell};

use wayfare_core::ResolvedViewModel;

use crate::request::ResolveRequest;
use crate::resolver::{DestinationResolver, ResolutionObserver};

/// What the display currently shows.
#[derive(Debug, Clone, PartialEq)]
pub enum PageState {
    /// Locally built content while providers are consulted.
    Loading(ResolvedViewModel),
    /// The merged page.
    Ready(ResolvedViewModel),
    /// The destination could not be resolved; offer the way home.
    NotFound {
        /// Identifier that failed.
        identifier: String,
    },
}

impl PageState {
    /// The model on display, if any.
    #[must_use]
    pub const fn model(&self) -> Option<&ResolvedViewModel> {
        match self {
            Self::Loading(model) | Self::Ready(model) => Some(model),
            Self::NotFound { .. } => None,
        }
    }
}

/// Proof of which navigation a commit belongs to.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct GenerationToken {
    generation: u64,
    identifier: String,
}

impl GenerationToken {
    /// The identifier being navigated to.
    #[must_use]
    pub fn identifier(&self) -> &str {
        &self.identifier
    }

    /// Sequence number of the navigation.
    #[must_use]
    pub const fn generation(&self) -> u64 {
        self.generation
    }
}

/// The single display area pages are committed to.
#[derive(Debug, Default)]
pub struct DisplaySlot {
    latest: Cell<u64>,
    state: RefCell<Option<PageState>>,
}

impl DisplaySlot {
    /// An empty slot.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Start a navigation, superseding every earlier token.
    pub fn issue(&self, identifier: &str) -> GenerationToken {
        let generation = self.latest.get().saturating_add(1);
        self.latest.set(generation);
        GenerationToken {
            generation,
            identifier: identifier.to_owned(),
        }
    }

    /// Whether `token` belongs to the latest navigation.
    #[must_use]
    pub fn is_current(&self, token: &GenerationToken) -> bool {
        token.generation == self.latest.get()
    }

    /// Replace the displayed state if `token` is current.
    ///
    /// Returns whether the commit was accepted.
    pub fn commit(&self, token: &GenerationToken, state: PageState) -> bool {
        if !self.is_current(token) {
            log::warn!(
                "discarding stale result for {:?} (generation {} < {})",
                token.identifier,
                token.generation,
                self.latest.get()
            );
            return false;
        }
        *self.state.borrow_mut() = Some(state);
        true
    }

    /// Swap the hero image of a loading page if `token` is current.
    pub fn patch_hero(&self, token: &GenerationToken, url: &str) -> bool {
        if !self.is_current(token) {
            return false;
        }
        match self.state.borrow_mut().as_mut() {
            Some(PageState::Loading(model)) => {
                url.clone_into(&mut model.image);
                true
            }
            _ => false,
        }
    }

    /// A snapshot of what is displayed.
    #[must_use]
    pub fn state(&self) -> Option<PageState> {
        self.state.borrow().clone()
    }
}

struct SlotObserver<'a> {
    slot: &'a DisplaySlot,
    token: &'a GenerationToken,
}

impl ResolutionObserver for SlotObserver<'_> {
    fn seeded(&self, model: &ResolvedViewModel) {
        self.slot
            .commit(self.token, PageState::Loading(model.clone()));
    }

    fn hero_image(&self, url: &str) {
        self.slot.patch_hero(self.token, url);
    }
}

/// Navigate `slot` to `request`.
///
/// Commits the seeded page, forwards hero patches, then commits the final
/// state. Returns whether the final commit was accepted; `false` means a later
/// navigation superseded this one and its result was dropped.
pub async fn navigate(
    resolver: &DestinationResolver,
    slot: &DisplaySlot,
    request: &ResolveRequest,
) -> bool {
    let token = slot.issue(&request.identifier);
    let observer = SlotObserver {
        slot,
        token: &token,
    };
    let state = match resolver.resolve_observed(request, &observer).await {
        Ok(model) => PageState::Ready(model),
        Err(err) => {
            log::debug!("{err}");
            PageState::NotFound {
                identifier: err.identifier,
            }
        }
    };
    slot.commit(&token, state)
}
