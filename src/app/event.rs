use crate::app::state::CardSet;
use crate::cards::ExpansionChange;
use crate::contact::{AttemptId, DeliveryOutcome};
use crossterm::event::Event as CrosstermEvent;

#[derive(Debug)]
pub enum AppEvent {
    /// Terminal input event
    Terminal(CrosstermEvent),

    /// A card collection changed its expanded card
    CardsChanged {
        set: CardSet,
        change: ExpansionChange,
    },

    /// The delivery task for a contact submission finished
    DeliveryFinished {
        attempt: AttemptId,
        outcome: DeliveryOutcome,
    },

    /// Tick for notification expiry
    Tick,
}
