//! Glue between the controller and whatever transport reaches the host.
use crate::config::ShopConfig;
use crate::controller::{Effects, ShopController, UserIntent};
use crate::error::BridgeError;
use crate::protocol::{HostCommand, HostMessage};
use log::warn;
use std::cell::RefCell;
use std::convert::Infallible;
use std::rc::Rc;

/// Delivers outbound commands to the host.
/// Platform-specific implementations should provide this
pub trait CommandSink {
    type Error: std::error::Error + 'static;

    /// Send one command. Delivery is fire-and-forget; the reply, if any, arrives as a push.
    ///
    /// # Errors
    ///
    /// Returns an error if the command could not be handed to the transport.
    fn send(&self, command: &HostCommand) -> Result<(), Self::Error>;
}

/// A controller wired to a command sink.
#[derive(Debug, Clone)]
pub struct ShopRuntime<S>
where
    S: CommandSink,
{
    controller: ShopController,
    sink: S,
}

impl<S> ShopRuntime<S>
where
    S: CommandSink,
{
    #[must_use]
    pub fn new(config: ShopConfig, sink: S) -> Self {
        Self {
            controller: ShopController::new(config),
            sink,
        }
    }

    #[must_use]
    pub const fn controller(&self) -> &ShopController {
        &self.controller
    }

    #[must_use]
    pub const fn sink(&self) -> &S {
        &self.sink
    }

    /// Apply a decoded host push and flush its commands.
    pub fn deliver(&mut self, message: HostMessage, now_ms: u64) {
        let effects = self.controller.handle_message(message, now_ms);
        self.flush(effects);
    }

    /// Decode and apply a raw host push.
    ///
    /// # Errors
    ///
    /// Returns [`BridgeError::Decode`] if the payload is not a host message. State is untouched.
    pub fn deliver_json(&mut self, raw: &str, now_ms: u64) -> Result<(), BridgeError> {
        let message = HostMessage::from_json(raw)?;
        self.deliver(message, now_ms);
        Ok(())
    }

    /// Apply a user interaction and flush its commands.
    pub fn perform(&mut self, intent: UserIntent, now_ms: u64) {
        let effects = self.controller.apply_intent(intent, now_ms);
        self.flush(effects);
    }

    pub fn tick(&mut self, now_ms: u64) {
        self.controller.tick(now_ms);
    }

    fn flush(&self, effects: Effects) {
        for command in &effects {
            if let Err(err) = self.sink.send(command) {
                warn!("dropped {} command: {err}", command.endpoint());
            }
        }
    }
}

/// In-memory sink that keeps every command it is handed.
#[derive(Debug, Clone, Default)]
pub struct RecordingSink {
    sent: Rc<RefCell<Vec<HostCommand>>>,
}

impl RecordingSink {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    #[must_use]
    pub fn sent(&self) -> Vec<HostCommand> {
        self.sent.borrow().clone()
    }

    /// Take everything recorded so far.
    pub fn drain(&self) -> Vec<HostCommand> {
        std::mem::take(&mut *self.sent.borrow_mut())
    }
}

impl CommandSink for RecordingSink {
    type Error = Infallible;

    fn send(&self, command: &HostCommand) -> Result<(), Self::Error> {
        self.sent.borrow_mut().push(command.clone());
        Ok(())
    }
}
