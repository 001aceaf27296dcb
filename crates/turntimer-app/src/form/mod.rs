//! Player form: the list-backed form state and its validation controller

mod observer;
mod state;


pub use observer::{FormObserver, FormSnapshot, SubscriptionId};
pub use state::{FormListController, SubmitOutcome};

#[cfg(test)]
pub use observer::MockFormObserver;
