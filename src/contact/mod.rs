//! Contact form: field rules, submission lifecycle and message delivery.

pub mod controller;
pub mod delivery;
pub mod fields;

pub use controller::{
    AttemptId, Notice, NoticeKind, PendingDelivery, SubmissionController, SubmissionState,
    SubmitError,
};
pub use delivery::{DeliveryOutcome, MessageDelivery};
pub use fields::{FieldId, FormFields};
