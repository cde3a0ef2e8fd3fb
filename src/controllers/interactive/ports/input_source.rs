use crate::controllers::interactive::input_command::InputCommand;

/// Source of user commands, polled once per presentation tick.
pub trait InputSource {
    /// Commands received since the previous poll, oldest first.
    fn poll(&mut self) -> Vec<InputCommand>;
}
