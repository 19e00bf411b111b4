//! Exclusive card expansion.
//!
//! A [`CardCollection`] is shared by every card view of one section. At most
//! one card is expanded at a time; opening another card closes the first.
//! Since expanding a card reflows its siblings, every change is broadcast to
//! all observers rather than only to the toggled card.

use std::collections::{BTreeSet, HashSet};
use thiserror::Error;

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Card {
    pub id: String,
    pub summary: String,
    pub detail: String,
    pub related_tags: BTreeSet<String>,
}

impl Card {
    pub fn new(
        id: impl Into<String>,
        summary: impl Into<String>,
        detail: impl Into<String>,
        tags: impl IntoIterator<Item = impl Into<String>>,
    ) -> Self {
        Self {
            id: id.into(),
            summary: summary.into(),
            detail: detail.into(),
            related_tags: tags.into_iter().map(Into::into).collect(),
        }
    }
}

#[derive(Debug, Error, PartialEq, Eq)]
#[error("duplicate card id '{0}'")]
pub struct DuplicateCardId(pub String);

#[derive(Debug, Error, Clone, PartialEq, Eq)]
#[error("no card with id '{id}' in this collection")]
pub struct InvalidIdError {
    pub id: String,
}

/// Ordered cards with unique ids.
#[derive(Debug, Clone, Default)]
pub struct CardCollection {
    cards: Vec<Card>,
}

impl CardCollection {
    pub fn new(cards: Vec<Card>) -> Result<Self, DuplicateCardId> {
        let mut seen = HashSet::new();
        for card in &cards {
            if !seen.insert(card.id.as_str()) {
                return Err(DuplicateCardId(card.id.clone()));
            }
        }
        Ok(Self { cards })
    }

    pub fn contains(&self, id: &str) -> bool {
        self.cards.iter().any(|c| c.id == id)
    }

    pub fn get(&self, index: usize) -> Option<&Card> {
        self.cards.get(index)
    }

    pub fn iter(&self) -> impl Iterator<Item = &Card> {
        self.cards.iter()
    }

    pub fn len(&self) -> usize {
        self.cards.len()
    }

    pub fn is_empty(&self) -> bool {
        self.cards.is_empty()
    }
}

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ExpansionState {
    pub active_id: Option<String>,
}

/// Broadcast to every observer whenever `active_id` changes.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ExpansionChange {
    pub previous: Option<String>,
    pub current: Option<String>,
}

pub type ExpansionObserver = Box<dyn Fn(&ExpansionChange) + Send + Sync>;

pub struct ExclusiveExpansionController {
    cards: CardCollection,
    state: ExpansionState,
    observers: Vec<ExpansionObserver>,
}

impl ExclusiveExpansionController {
    pub fn new(cards: CardCollection) -> Self {
        Self {
            cards,
            state: ExpansionState::default(),
            observers: Vec::new(),
        }
    }

    pub fn subscribe(&mut self, observer: ExpansionObserver) {
        self.observers.push(observer);
    }

    /// Expand `id`, or collapse it if it is already the active card.
    ///
    /// Unknown ids leave the state untouched and notify nobody.
    pub fn toggle(&mut self, id: &str) -> Result<ExpansionState, InvalidIdError> {
        if !self.cards.contains(id) {
            let err = InvalidIdError { id: id.to_string() };
            tracing::error!(%err, "card toggle rejected");
            return Err(err);
        }

        let next = if self.state.active_id.as_deref() == Some(id) {
            None
        } else {
            Some(id.to_string())
        };
        self.set_active(next);
        Ok(self.state.clone())
    }

    /// Toggle the card at `index` in collection order.
    pub fn toggle_at(&mut self, index: usize) -> Result<ExpansionState, InvalidIdError> {
        let id = match self.cards.get(index) {
            Some(card) => card.id.clone(),
            None => {
                let err = InvalidIdError {
                    id: format!("#{}", index),
                };
                tracing::error!(%err, "card toggle rejected");
                return Err(err);
            }
        };
        self.toggle(&id)
    }

    pub fn collapse_all(&mut self) {
        if self.state.active_id.is_some() {
            self.set_active(None);
        }
    }

    pub fn is_expanded(&self, id: &str) -> bool {
        self.state.active_id.as_deref() == Some(id)
    }

    pub fn state(&self) -> &ExpansionState {
        &self.state
    }

    pub fn cards(&self) -> &CardCollection {
        &self.cards
    }

    fn set_active(&mut self, next: Option<String>) {
        let previous = std::mem::replace(&mut self.state.active_id, next);
        let change = ExpansionChange {
            previous,
            current: self.state.active_id.clone(),
        };
        tracing::debug!(
            previous = ?change.previous,
            current = ?change.current,
            "card expansion changed"
        );
        for observer in &self.observers {
            observer(&change);
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::sync::{Arc, Mutex};

    fn controller() -> ExclusiveExpansionController {
        let cards = CardCollection::new(vec![
            Card::new("shop", "E-Commerce Platform", "Next.js and Stripe", ["Next.js", "Stripe"]),
            Card::new("chat", "AI Chat Application", "Realtime chat", ["React"]),
            Card::new("gen", "Portfolio Generator", "A few clicks", ["Vue.js"]),
        ])
        .unwrap();
        ExclusiveExpansionController::new(cards)
    }

    fn record(ctl: &mut ExclusiveExpansionController) -> Arc<Mutex<Vec<ExpansionChange>>> {
        let seen = Arc::new(Mutex::new(Vec::new()));
        let sink = seen.clone();
        ctl.subscribe(Box::new(move |change| {
            sink.lock().unwrap().push(change.clone());
        }));
        seen
    }

    #[test]
    fn test_starts_collapsed() {
        let ctl = controller();
        assert_eq!(ctl.state().active_id, None);
        assert!(!ctl.is_expanded("shop"));
    }

    #[test]
    fn test_toggle_twice_is_identity() {
        for id in ["shop", "chat", "gen"] {
            let mut ctl = controller();
            let before = ctl.state().clone();
            ctl.toggle(id).unwrap();
            assert!(ctl.is_expanded(id));
            let after = ctl.toggle(id).unwrap();
            assert_eq!(after, before);
        }

        let mut ctl = controller();
        ctl.toggle("chat").unwrap();
        let before = ctl.state().clone();
        ctl.toggle("chat").unwrap();
        ctl.toggle("chat").unwrap();
        assert_eq!(ctl.state(), &before);
    }

    #[test]
    fn test_toggle_other_replaces_active() {
        let mut ctl = controller();
        ctl.toggle("shop").unwrap();
        let state = ctl.toggle("chat").unwrap();
        assert_eq!(state.active_id.as_deref(), Some("chat"));
        assert!(!ctl.is_expanded("shop"));
        assert!(ctl.is_expanded("chat"));
        let expanded = ctl.cards().iter().filter(|c| ctl.is_expanded(&c.id)).count();
        assert_eq!(expanded, 1);
    }

    #[test]
    fn test_unknown_id_leaves_state_unchanged() {
        let mut ctl = controller();
        let seen = record(&mut ctl);
        ctl.toggle("shop").unwrap();

        let err = ctl.toggle("missing").unwrap_err();
        assert_eq!(err.id, "missing");
        assert_eq!(ctl.state().active_id.as_deref(), Some("shop"));
        assert_eq!(seen.lock().unwrap().len(), 1);

        assert!(ctl.toggle_at(99).is_err());
        assert_eq!(ctl.state().active_id.as_deref(), Some("shop"));
    }

    #[test]
    fn test_every_observer_sees_every_change() {
        let mut ctl = controller();
        let first = record(&mut ctl);
        let second = record(&mut ctl);

        ctl.toggle("shop").unwrap();
        ctl.toggle("gen").unwrap();
        ctl.toggle("gen").unwrap();

        let expected = vec![
            ExpansionChange {
                previous: None,
                current: Some("shop".into()),
            },
            ExpansionChange {
                previous: Some("shop".into()),
                current: Some("gen".into()),
            },
            ExpansionChange {
                previous: Some("gen".into()),
                current: None,
            },
        ];
        assert_eq!(*first.lock().unwrap(), expected);
        assert_eq!(*second.lock().unwrap(), expected);
    }

    #[test]
    fn test_toggle_at_uses_collection_order() {
        let mut ctl = controller();
        ctl.toggle_at(1).unwrap();
        assert!(ctl.is_expanded("chat"));
    }

    #[test]
    fn test_collapse_all_only_notifies_on_change() {
        let mut ctl = controller();
        let seen = record(&mut ctl);
        ctl.collapse_all();
        assert!(seen.lock().unwrap().is_empty());

        ctl.toggle("gen").unwrap();
        ctl.collapse_all();
        assert_eq!(ctl.state().active_id, None);
        assert_eq!(seen.lock().unwrap().len(), 2);
    }

    #[test]
    fn test_duplicate_ids_are_rejected() {
        let err = CardCollection::new(vec![
            Card::new("a", "A", "", Vec::<String>::new()),
            Card::new("a", "B", "", Vec::<String>::new()),
        ])
        .unwrap_err();
        assert_eq!(err, DuplicateCardId("a".into()));
    }
}
