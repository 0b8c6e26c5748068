use yewdux::prelude::*;

#[derive(Default, Clone, PartialEq, Store)]
pub struct State {
    /// Shown in the banner at the top of every page until dismissed.
    pub error_message: Option<String>,
}

impl State {
    pub fn report(&mut self, message: impl Into<String>) {
        self.error_message = Some(message.into());
    }
}
