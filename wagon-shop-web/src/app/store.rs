//! Reducer-backed shop state. Every host push, user intent and timer tick is one dispatched
//! action, so updates never race each other.
use crate::bridge::NuiSink;
use crate::config::SHOP_CONFIG;
use std::rc::Rc;
use wagon_shop_core::{
    HostMessage, ShopConfig, ShopController, ShopFrame, ShopRuntime, UserIntent, project,
};
use yew::prelude::*;

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ShopAction {
    Inbound { message: HostMessage, at_ms: u64 },
    Intent { intent: UserIntent, at_ms: u64 },
    Tick { at_ms: u64 },
}

#[derive(Debug, Clone)]
pub struct ShopState {
    runtime: ShopRuntime<NuiSink>,
}

impl ShopState {
    #[must_use]
    pub fn new(config: ShopConfig, sink: NuiSink) -> Self {
        Self {
            runtime: ShopRuntime::new(config, sink),
        }
    }

    #[must_use]
    pub const fn controller(&self) -> &ShopController {
        self.runtime.controller()
    }

    #[must_use]
    pub fn frame(&self) -> ShopFrame {
        project(self.runtime.controller())
    }
}

impl PartialEq for ShopState {
    fn eq(&self, other: &Self) -> bool {
        self.runtime.controller() == other.runtime.controller()
    }
}

impl Reducible for ShopState {
    type Action = ShopAction;

    fn reduce(self: Rc<Self>, action: Self::Action) -> Rc<Self> {
        let mut next = (*self).clone();
        match action {
            ShopAction::Inbound { message, at_ms } => next.runtime.deliver(message, at_ms),
            ShopAction::Intent { intent, at_ms } => next.runtime.perform(intent, at_ms),
            ShopAction::Tick { at_ms } => next.runtime.tick(at_ms),
        }
        if next == *self { self } else { Rc::new(next) }
    }
}

#[hook]
pub fn use_shop_store() -> UseReducerHandle<ShopState> {
    use_reducer(|| {
        let config = SHOP_CONFIG.clone();
        let sink = NuiSink::from_environment(&config);
        ShopState::new(config, sink)
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    fn state() -> Rc<ShopState> {
        Rc::new(ShopState::new(
            ShopConfig::default(),
            NuiSink::new("rex-wagons"),
        ))
    }

    #[test]
    fn inbound_actions_reach_the_controller() {
        let opened = state().reduce(ShopAction::Inbound {
            message: HostMessage::Open,
            at_ms: 0,
        });
        assert!(opened.controller().lifecycle().is_open());
        assert!(opened.frame().visible);
    }

    #[test]
    fn no_op_actions_keep_the_same_state() {
        let before = state();
        let after = Rc::clone(&before).reduce(ShopAction::Intent {
            intent: UserIntent::Cancel,
            at_ms: 0,
        });
        assert!(Rc::ptr_eq(&before, &after));
    }

    #[test]
    fn tick_settles_pending_close() {
        let closing = state()
            .reduce(ShopAction::Inbound {
                message: HostMessage::Open,
                at_ms: 0,
            })
            .reduce(ShopAction::Intent {
                intent: UserIntent::Close,
                at_ms: 10,
            });
        assert!(closing.controller().lifecycle().is_closing());
        let closed = closing.reduce(ShopAction::Tick { at_ms: 1_010 });
        assert!(!closed.controller().lifecycle().is_closing());
    }
}
