use crate::registry::RegistryEvent;
use crossterm::event::Event as CrosstermEvent;

#[derive(Debug)]
pub enum AppEvent {
    /// Terminal input event
    Terminal(CrosstermEvent),

    /// Account or contact data changed on a background task
    Registry(RegistryEvent),

    /// Tick for expiring status messages
    Tick,
}
