//! # Handler chain
//!
//! Dispatches one incoming message through a sequence of handlers. Each handler either passes
//! the message on (`Continue`) or claims it (`Stop`); the first claim ends the chain, so the
//! first matching command wins. A message nobody claims ends with `Continue` and no reply.

use dbot_core::{Handler, HandlerResponse, Message, Result};
use std::sync::Arc;
use tracing::{debug, info, instrument};

/// Ordered handlers; `handle` runs them until one returns Stop.
#[derive(Clone, Default)]
pub struct HandlerChain {
    handlers: Vec<Arc<dyn Handler>>,
}

impl HandlerChain {
    /// Creates an empty chain.
    pub fn new() -> Self {
        Self {
            handlers: Vec::new(),
        }
    }

    /// Appends a handler.
    pub fn add_handler(mut self, handler: Arc<dyn Handler>) -> Self {
        self.handlers.push(handler);
        self
    }

    pub fn len(&self) -> usize {
        self.handlers.len()
    }

    pub fn is_empty(&self) -> bool {
        self.handlers.is_empty()
    }

    /// Runs handlers in order until one returns Stop. A handler error ends the chain and is
    /// returned as is.
    #[instrument(skip(self, message))]
    pub async fn handle(&self, message: &Message) -> Result<HandlerResponse> {
        debug!(
            user_id = message.user.id,
            chat_id = message.chat.id,
            message_id = %message.id,
            "step: handler_chain started"
        );

        for h in &self.handlers {
            let name = std::any::type_name_of_val(h.as_ref());
            let response = h.handle(message).await?;
            debug!(user_id = message.user.id, handler = %name, response = ?response, "step: handler handle done");

            if response == HandlerResponse::Stop {
                info!(
                    user_id = message.user.id,
                    chat_id = message.chat.id,
                    handler = %name,
                    "step: message claimed by handler"
                );
                return Ok(HandlerResponse::Stop);
            }
        }

        debug!(
            user_id = message.user.id,
            chat_id = message.chat.id,
            message_id = %message.id,
            "step: no handler claimed the message"
        );
        Ok(HandlerResponse::Continue)
    }
}

// Integration tests live in tests/handler_chain_test.rs
