use crate::contact::PendingDelivery;

/// Side effects requested by the handler and carried out by the event loop.
#[derive(Debug, PartialEq, Eq)]
pub enum Action {
    Deliver(PendingDelivery),
    Quit,
}
