//! The card viewer state machine.
//!
//! ## States
//!
//! ```text
//!            Load (non-empty)
//!   ┌───────┐ ─────────────▶ ┌─────────┐
//!   │ Empty │                │ Viewing │ ◀─┐ Next / Prev / Flip / Select
//!   └───────┘ ◀───────────── └─────────┘ ──┘
//!            Load (empty)
//! ```
//!
//! Add and Delete go through the server and always end in a reload, so
//! the deck on screen is whatever the server last reported.

use crate::action::{Action, Completion, Effect};
use crate::card::{Card, NewCard};
use crate::deck::Deck;
use crate::frame::Frame;
use crate::{ViewerError, ViewerResult};

/// Text shown in place of a card when the deck is empty.
pub const DEFAULT_PLACEHOLDER: &str = "(no cards yet)";

/// Which of the two states the viewer is in.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Phase {
    Empty,
    Viewing,
}

/// Selection and flip state.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct ViewState {
    /// Always a valid index while the deck is non-empty
    pub current_index: usize,
    /// Whether the back of the current card is shown
    pub flipped: bool,
}

/// Remote operation currently awaiting its completion.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Pending {
    Fetch,
    Create,
    Remove,
}

/// Owns the deck and view state.
///
/// ## Thread Safety
///
/// The viewer is a plain value owned by whoever drives it (the UI or a
/// [`Session`](crate::Session)). Only one remote operation may be pending at
/// a time; starting another one fails with [`ViewerError::Busy`].
#[derive(Debug, Clone)]
pub struct Viewer {
    deck: Deck,
    view: ViewState,
    pending: Option<Pending>,
    placeholder: String,
}

impl Viewer {
    /// Creates an empty viewer.
    pub fn new() -> Self {
        Self {
            deck: Deck::new(),
            view: ViewState::default(),
            pending: None,
            placeholder: DEFAULT_PLACEHOLDER.to_string(),
        }
    }

    /// Sets the text rendered when the deck is empty.
    pub fn with_placeholder(mut self, placeholder: impl Into<String>) -> Self {
        self.placeholder = placeholder.into();
        self
    }

    // ==================== Accessors ====================

    pub fn deck(&self) -> &Deck {
        &self.deck
    }

    pub fn view(&self) -> ViewState {
        self.view
    }

    pub fn placeholder(&self) -> &str {
        &self.placeholder
    }

    pub fn phase(&self) -> Phase {
        if self.deck.is_empty() {
            Phase::Empty
        } else {
            Phase::Viewing
        }
    }

    /// Returns the card at the current index.
    pub fn current(&self) -> Option<&Card> {
        self.deck.get(self.view.current_index)
    }

    /// Returns true while a remote operation is awaiting completion.
    pub fn is_busy(&self) -> bool {
        self.pending.is_some()
    }

    /// Builds the render model for the current state.
    pub fn frame(&self) -> Frame {
        Frame::render(self)
    }

    // ==================== Dispatch ====================

    /// Applies an action.
    ///
    /// Navigation is applied immediately and never returns an effect.
    /// Load, Add and Delete return the remote call to perform; its outcome
    /// must be passed to [`Viewer::complete`].
    pub fn dispatch(&mut self, action: Action) -> ViewerResult<Option<Effect>> {
        tracing::trace!(action = action.display_name(), "dispatch");

        match action {
            Action::Next => {
                if let Some(last) = self.deck.last_index() {
                    self.move_to((self.view.current_index + 1).min(last));
                }
                Ok(None)
            }
            Action::Prev => {
                if !self.deck.is_empty() {
                    self.move_to(self.view.current_index.saturating_sub(1));
                }
                Ok(None)
            }
            Action::Flip => {
                if !self.deck.is_empty() {
                    self.view.flipped = !self.view.flipped;
                }
                Ok(None)
            }
            Action::Select(index) => {
                if index < self.deck.len() {
                    self.move_to(index);
                } else {
                    tracing::debug!(index, len = self.deck.len(), "Ignoring out-of-range selection");
                }
                Ok(None)
            }
            Action::Load => {
                self.begin(Pending::Fetch)?;
                Ok(Some(Effect::Fetch))
            }
            Action::Add(card) => {
                let card = NewCard::new(&card.front, &card.back);
                if !card.is_valid() {
                    return Err(ViewerError::EmptyFront);
                }
                self.begin(Pending::Create)?;
                Ok(Some(Effect::Create(card)))
            }
            Action::Delete => {
                let Some(id) = self.current().map(|c| c.id.clone()) else {
                    return Ok(None);
                };
                self.begin(Pending::Remove)?;
                Ok(Some(Effect::Remove(id)))
            }
        }
    }

    /// Applies the outcome of an effect.
    ///
    /// A successful create or delete returns [`Effect::Fetch`]: the list is
    /// always re-read from the server rather than edited locally. Failures
    /// leave the deck and view untouched and are returned to the caller.
    pub fn complete(&mut self, completion: Completion) -> ViewerResult<Option<Effect>> {
        match completion {
            Completion::Fetched(Ok(cards)) => {
                self.pending = None;
                self.replace(cards);
                Ok(None)
            }
            Completion::Created(Ok(())) => {
                self.pending = Some(Pending::Fetch);
                Ok(Some(Effect::Fetch))
            }
            Completion::Removed(Ok(())) => {
                // Step back one card; the reload re-clamps against the new length.
                self.view.current_index = self.view.current_index.saturating_sub(1);
                self.view.flipped = false;
                self.pending = Some(Pending::Fetch);
                Ok(Some(Effect::Fetch))
            }
            Completion::Fetched(Err(e))
            | Completion::Created(Err(e))
            | Completion::Removed(Err(e)) => {
                tracing::warn!(pending = ?self.pending, "Remote operation failed: {}", e);
                self.pending = None;
                Err(ViewerError::Transport(e))
            }
        }
    }

    /// Clears a pending operation whose outcome will never arrive.
    pub fn abandon(&mut self) {
        self.pending = None;
    }

    // ==================== Internals ====================

    fn begin(&mut self, pending: Pending) -> ViewerResult<()> {
        if let Some(current) = self.pending {
            tracing::debug!(?current, requested = ?pending, "Rejecting overlapping request");
            return Err(ViewerError::Busy);
        }
        self.pending = Some(pending);
        Ok(())
    }

    fn move_to(&mut self, index: usize) {
        self.view.current_index = index;
        self.view.flipped = false;
    }

    fn replace(&mut self, cards: Vec<Card>) {
        self.deck = Deck::from(cards);
        self.view.current_index = self.deck.clamp(self.view.current_index);
        self.view.flipped = false;
        tracing::debug!(
            len = self.deck.len(),
            index = self.view.current_index,
            "Deck reloaded"
        );
    }
}

impl Default for Viewer {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::card::CardId;
    use crate::service::ServiceError;
    use proptest::prelude::*;

    fn cards(fronts: &[&str]) -> Vec<Card> {
        fronts
            .iter()
            .enumerate()
            .map(|(i, f)| Card::new(i + 1, *f, format!("{f}-back")))
            .collect()
    }

    fn loaded(fronts: &[&str]) -> Viewer {
        let mut viewer = Viewer::new();
        assert_eq!(viewer.dispatch(Action::Load).unwrap(), Some(Effect::Fetch));
        viewer
            .complete(Completion::Fetched(Ok(cards(fronts))))
            .unwrap();
        viewer
    }

    fn server_error() -> ServiceError {
        ServiceError::Status {
            status: 500,
            body: None,
        }
    }

    #[test]
    fn test_next_prev_clamped() {
        let mut viewer = loaded(&["A", "B"]);
        assert_eq!(viewer.view().current_index, 0);

        viewer.dispatch(Action::Next).unwrap();
        assert_eq!(viewer.view().current_index, 1);

        viewer.dispatch(Action::Next).unwrap();
        assert_eq!(viewer.view().current_index, 1);

        viewer.dispatch(Action::Prev).unwrap();
        assert_eq!(viewer.view().current_index, 0);

        viewer.dispatch(Action::Prev).unwrap();
        assert_eq!(viewer.view().current_index, 0);
    }

    #[test]
    fn test_flip_toggles_and_navigation_resets() {
        let mut viewer = loaded(&["A", "B", "C"]);

        viewer.dispatch(Action::Flip).unwrap();
        assert!(viewer.view().flipped);
        viewer.dispatch(Action::Flip).unwrap();
        assert!(!viewer.view().flipped);

        for action in [Action::Next, Action::Prev, Action::Select(2)] {
            viewer.dispatch(Action::Flip).unwrap();
            assert!(viewer.view().flipped);
            viewer.dispatch(action).unwrap();
            assert!(!viewer.view().flipped);
        }

        // Clamped navigation still resets the flip.
        viewer.dispatch(Action::Flip).unwrap();
        viewer.dispatch(Action::Next).unwrap();
        assert_eq!(viewer.view().current_index, 2);
        assert!(!viewer.view().flipped);
    }

    #[test]
    fn test_reload_resets_flip_and_clamps() {
        let mut viewer = loaded(&["A", "B", "C"]);
        viewer.dispatch(Action::Select(2)).unwrap();
        viewer.dispatch(Action::Flip).unwrap();

        viewer.dispatch(Action::Load).unwrap();
        viewer
            .complete(Completion::Fetched(Ok(cards(&["A"]))))
            .unwrap();

        assert_eq!(viewer.view(), ViewState::default());
        assert_eq!(viewer.phase(), Phase::Viewing);
    }

    #[test]
    fn test_empty_deck_is_inert() {
        let mut viewer = Viewer::new();
        for action in [
            Action::Next,
            Action::Prev,
            Action::Flip,
            Action::Delete,
            Action::Select(0),
        ] {
            assert_eq!(viewer.dispatch(action).unwrap(), None);
        }
        assert_eq!(viewer.phase(), Phase::Empty);
        assert_eq!(viewer.view(), ViewState::default());
        assert!(!viewer.is_busy());
        assert_eq!(viewer.frame().front, DEFAULT_PLACEHOLDER);
    }

    #[test]
    fn test_select_out_of_range_ignored() {
        let mut viewer = loaded(&["A", "B"]);
        viewer.dispatch(Action::Select(1)).unwrap();
        viewer.dispatch(Action::Flip).unwrap();
        viewer.dispatch(Action::Select(7)).unwrap();
        assert_eq!(viewer.view().current_index, 1);
        assert!(viewer.view().flipped);
    }

    #[test]
    fn test_add_with_empty_front_rejected() {
        let mut viewer = loaded(&["A"]);
        let before = viewer.view();

        let err = viewer
            .dispatch(Action::Add(NewCard::new("   ", "back")))
            .unwrap_err();
        assert_eq!(err, ViewerError::EmptyFront);
        assert!(err.is_validation());
        assert!(!viewer.is_busy());
        assert_eq!(viewer.view(), before);
        assert_eq!(viewer.deck().len(), 1);
    }

    #[test]
    fn test_add_then_reload() {
        let mut viewer = loaded(&["A"]);
        viewer.dispatch(Action::Flip).unwrap();

        let effect = viewer
            .dispatch(Action::Add(NewCard {
                front: " Q1 ".to_string(),
                back: "A1".to_string(),
            }))
            .unwrap();
        assert_eq!(effect, Some(Effect::Create(NewCard::new("Q1", "A1"))));

        let follow_up = viewer.complete(Completion::Created(Ok(()))).unwrap();
        assert_eq!(follow_up, Some(Effect::Fetch));
        assert!(viewer.is_busy());

        viewer
            .complete(Completion::Fetched(Ok(cards(&["A", "Q1"]))))
            .unwrap();
        assert_eq!(viewer.deck().len(), 2);
        assert_eq!(viewer.deck().get(1).unwrap().front, "Q1");
        assert!(!viewer.view().flipped);
        assert!(!viewer.is_busy());
    }

    #[test]
    fn test_delete_steps_back() {
        let mut viewer = loaded(&["A", "B", "C"]);
        viewer.dispatch(Action::Select(2)).unwrap();

        let effect = viewer.dispatch(Action::Delete).unwrap();
        assert_eq!(effect, Some(Effect::Remove(CardId::from(3usize))));

        let follow_up = viewer.complete(Completion::Removed(Ok(()))).unwrap();
        assert_eq!(follow_up, Some(Effect::Fetch));
        assert_eq!(viewer.view().current_index, 1);

        viewer
            .complete(Completion::Fetched(Ok(cards(&["A", "B"]))))
            .unwrap();
        assert_eq!(viewer.deck().len(), 2);
        assert_eq!(viewer.view().current_index, 1);
    }

    #[test]
    fn test_delete_first_card_stays_at_zero() {
        let mut viewer = loaded(&["A", "B"]);
        viewer.dispatch(Action::Delete).unwrap();
        viewer.complete(Completion::Removed(Ok(()))).unwrap();
        viewer
            .complete(Completion::Fetched(Ok(cards(&["B"]))))
            .unwrap();
        assert_eq!(viewer.view().current_index, 0);
        assert_eq!(viewer.current().unwrap().front, "B");
    }

    #[test]
    fn test_delete_last_remaining_card() {
        let mut viewer = loaded(&["A"]);
        viewer.dispatch(Action::Delete).unwrap();
        viewer.complete(Completion::Removed(Ok(()))).unwrap();
        viewer.complete(Completion::Fetched(Ok(Vec::new()))).unwrap();
        assert_eq!(viewer.phase(), Phase::Empty);
        assert_eq!(viewer.view().current_index, 0);
    }

    #[test]
    fn test_failures_leave_state_untouched() {
        let mut viewer = loaded(&["A", "B"]);
        viewer.dispatch(Action::Next).unwrap();
        let deck = viewer.deck().clone();
        let view = viewer.view();

        viewer.dispatch(Action::Delete).unwrap();
        let err = viewer
            .complete(Completion::Removed(Err(server_error())))
            .unwrap_err();
        assert!(matches!(err, ViewerError::Transport(_)));

        viewer.dispatch(Action::Add(NewCard::new("C", ""))).unwrap();
        assert!(viewer
            .complete(Completion::Created(Err(server_error())))
            .is_err());

        viewer.dispatch(Action::Load).unwrap();
        assert!(viewer
            .complete(Completion::Fetched(Err(server_error())))
            .is_err());

        assert_eq!(viewer.deck(), &deck);
        assert_eq!(viewer.view(), view);
        assert!(!viewer.is_busy());
    }

    #[test]
    fn test_overlapping_requests_rejected() {
        let mut viewer = loaded(&["A", "B"]);
        viewer.dispatch(Action::Load).unwrap();

        assert_eq!(viewer.dispatch(Action::Delete), Err(ViewerError::Busy));
        assert_eq!(
            viewer.dispatch(Action::Add(NewCard::new("C", ""))),
            Err(ViewerError::Busy)
        );

        // Navigation is still allowed.
        viewer.dispatch(Action::Next).unwrap();
        assert_eq!(viewer.view().current_index, 1);

        viewer.abandon();
        assert!(viewer.dispatch(Action::Load).is_ok());
    }

    proptest! {
        #[test]
        fn prop_index_stays_in_range(
            len in 1usize..20,
            steps in proptest::collection::vec(any::<bool>(), 0..100),
        ) {
            let fronts: Vec<String> = (0..len).map(|i| format!("card {i}")).collect();
            let fronts: Vec<&str> = fronts.iter().map(String::as_str).collect();
            let mut viewer = loaded(&fronts);

            for forward in steps {
                let action = if forward { Action::Next } else { Action::Prev };
                viewer.dispatch(action).unwrap();
                prop_assert!(viewer.view().current_index < len);
                prop_assert!(!viewer.view().flipped);
            }
        }

        #[test]
        fn prop_reload_clamps(start in 0usize..30, new_len in 0usize..30) {
            let fronts: Vec<String> = (0..30).map(|i| format!("card {i}")).collect();
            let fronts: Vec<&str> = fronts.iter().map(String::as_str).collect();
            let mut viewer = loaded(&fronts);
            viewer.dispatch(Action::Select(start)).unwrap();

            viewer.dispatch(Action::Load).unwrap();
            viewer.complete(Completion::Fetched(Ok(cards(&fronts[..new_len])))).unwrap();

            let index = viewer.view().current_index;
            if new_len == 0 {
                prop_assert_eq!(index, 0);
            } else {
                prop_assert!(index < new_len);
                prop_assert_eq!(index, start.min(new_len - 1));
            }
        }
    }
}
