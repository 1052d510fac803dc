//! Headless driver that runs actions against a [`CardService`].
//!
//! The UI drives the viewer through iced tasks instead, but both follow the
//! same loop: dispatch, run the effect, complete, repeat while the viewer
//! asks for more.

use crate::action::{Action, Completion, Effect};
use crate::service::CardService;
use crate::viewer::Viewer;
use crate::ViewerResult;

/// A viewer paired with the service it talks to.
pub struct Session<S> {
    viewer: Viewer,
    service: S,
}

impl<S: CardService> Session<S> {
    pub fn new(service: S) -> Self {
        Self {
            viewer: Viewer::new(),
            service,
        }
    }

    pub fn viewer(&self) -> &Viewer {
        &self.viewer
    }

    pub fn service(&self) -> &S {
        &self.service
    }

    /// Runs an action to completion, including any follow-up reload.
    pub async fn handle(&mut self, action: Action) -> ViewerResult<&Viewer> {
        let mut next = self.viewer.dispatch(action)?;
        while let Some(effect) = next {
            let completion = run_effect(&self.service, effect).await;
            next = self.viewer.complete(completion)?;
        }
        Ok(&self.viewer)
    }
}

/// Performs one effect and wraps its outcome.
pub async fn run_effect<S: CardService + ?Sized>(service: &S, effect: Effect) -> Completion {
    match effect {
        Effect::Fetch => Completion::Fetched(service.list().await),
        Effect::Create(card) => Completion::Created(service.create(&card).await),
        Effect::Remove(id) => Completion::Removed(service.delete(&id).await),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::card::{Card, CardId, NewCard};
    use crate::service::ServiceError;
    use crate::viewer::Phase;
    use crate::ViewerError;
    use async_trait::async_trait;
    use std::sync::Mutex;
    use std::sync::atomic::{AtomicUsize, Ordering};

    /// In-memory service that hands out positional ids, like the reference server.
    #[derive(Default)]
    struct MemoryService {
        cards: Mutex<Vec<(String, String)>>,
        calls: AtomicUsize,
        fail_writes: bool,
    }

    impl MemoryService {
        fn with(fronts: &[&str]) -> Self {
            let service = Self::default();
            *service.cards.lock().unwrap() =
                fronts.iter().map(|f| (f.to_string(), String::new())).collect();
            service
        }

        fn calls(&self) -> usize {
            self.calls.load(Ordering::SeqCst)
        }

        fn refuse(&self) -> Result<(), ServiceError> {
            if self.fail_writes {
                Err(ServiceError::Status {
                    status: 500,
                    body: None,
                })
            } else {
                Ok(())
            }
        }
    }

    #[async_trait]
    impl CardService for MemoryService {
        async fn list(&self) -> Result<Vec<Card>, ServiceError> {
            self.calls.fetch_add(1, Ordering::SeqCst);
            Ok(self
                .cards
                .lock()
                .unwrap()
                .iter()
                .enumerate()
                .map(|(i, (f, b))| Card::new(i, f.as_str(), b.as_str()))
                .collect())
        }

        async fn create(&self, card: &NewCard) -> Result<(), ServiceError> {
            self.calls.fetch_add(1, Ordering::SeqCst);
            self.refuse()?;
            self.cards
                .lock()
                .unwrap()
                .push((card.front.clone(), card.back.clone()));
            Ok(())
        }

        async fn delete(&self, id: &CardId) -> Result<(), ServiceError> {
            self.calls.fetch_add(1, Ordering::SeqCst);
            self.refuse()?;
            let index: usize = id
                .as_str()
                .parse()
                .map_err(|_| ServiceError::Status { status: 400, body: None })?;
            let mut cards = self.cards.lock().unwrap();
            if index >= cards.len() {
                return Err(ServiceError::Status { status: 404, body: None });
            }
            cards.remove(index);
            Ok(())
        }
    }

    #[tokio::test]
    async fn test_scenario_next_prev() {
        let mut session = Session::new(MemoryService::with(&["A", "B"]));
        session.handle(Action::Load).await.unwrap();

        let index = |s: &Session<MemoryService>| s.viewer().view().current_index;
        session.handle(Action::Next).await.unwrap();
        assert_eq!(index(&session), 1);
        session.handle(Action::Next).await.unwrap();
        assert_eq!(index(&session), 1);
        session.handle(Action::Prev).await.unwrap();
        assert_eq!(index(&session), 0);
        assert_eq!(session.service().calls(), 1);
    }

    #[tokio::test]
    async fn test_empty_deck_makes_no_calls() {
        let mut session = Session::new(MemoryService::default());
        session.handle(Action::Load).await.unwrap();
        assert_eq!(session.service().calls(), 1);

        for action in [Action::Next, Action::Prev, Action::Flip, Action::Delete] {
            session.handle(action).await.unwrap();
        }
        assert_eq!(session.service().calls(), 1);
        assert_eq!(session.viewer().phase(), Phase::Empty);
        assert_eq!(session.viewer().frame().front, "(no cards yet)");
    }

    #[tokio::test]
    async fn test_empty_front_makes_no_calls() {
        let mut session = Session::new(MemoryService::with(&["A"]));
        session.handle(Action::Load).await.unwrap();

        let err = session
            .handle(Action::Add(NewCard::new("", "answer")))
            .await
            .unwrap_err();
        assert_eq!(err, ViewerError::EmptyFront);
        assert_eq!(session.service().calls(), 1);
        assert_eq!(session.viewer().deck().len(), 1);
    }

    #[tokio::test]
    async fn test_add_reloads_with_new_card() {
        let mut session = Session::new(MemoryService::with(&["A"]));
        session.handle(Action::Load).await.unwrap();
        session.handle(Action::Flip).await.unwrap();

        let viewer = session
            .handle(Action::Add(NewCard::new("Q1", "A1")))
            .await
            .unwrap();
        assert_eq!(viewer.deck().len(), 2);
        assert!(viewer.deck().iter().any(|c| c.front == "Q1" && c.back == "A1"));
        assert!(viewer.view().current_index < 2);
        assert!(!viewer.view().flipped);
        // load + create + reload
        assert_eq!(session.service().calls(), 3);
    }

    #[tokio::test]
    async fn test_delete_removes_exactly_one() {
        let mut session = Session::new(MemoryService::with(&["A", "B", "C"]));
        session.handle(Action::Load).await.unwrap();
        session.handle(Action::Select(1)).await.unwrap();

        let viewer = session.handle(Action::Delete).await.unwrap();
        assert_eq!(viewer.deck().len(), 2);
        assert_eq!(viewer.view().current_index, 0);
        let fronts: Vec<&str> = viewer.deck().iter().map(|c| c.front.as_str()).collect();
        assert_eq!(fronts, ["A", "C"]);
    }

    #[tokio::test]
    async fn test_failed_write_skips_reload() {
        let service = MemoryService {
            fail_writes: true,
            ..MemoryService::with(&["A", "B"])
        };
        let mut session = Session::new(service);
        session.handle(Action::Load).await.unwrap();
        session.handle(Action::Next).await.unwrap();

        let err = session.handle(Action::Delete).await.unwrap_err();
        assert!(matches!(err, ViewerError::Transport(ServiceError::Status { status: 500, .. })));
        assert!(session.handle(Action::Add(NewCard::new("C", ""))).await.is_err());

        // load + failed delete + failed create, no reloads
        assert_eq!(session.service().calls(), 3);
        assert_eq!(session.viewer().deck().len(), 2);
        assert_eq!(session.viewer().view().current_index, 1);
        assert!(!session.viewer().is_busy());
    }
}
