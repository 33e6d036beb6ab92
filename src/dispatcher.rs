//! Intent handler trait and dispatcher
//!
//! Routes each incoming event to the handler registered for its intent
//! name. Only `recommendPortfolio` is registered by default.

use crate::dialog::{recommend_portfolio, INTENT_NAME};
use crate::error::BotError;
use crate::models::{LexEvent, LexResponse};
use crate::Result;
use serde_json::Value;
use std::collections::HashMap;
use std::sync::Arc;
use tracing::{info, info_span, warn};
use uuid::Uuid;

/// Dialog management and fulfillment for a single intent
pub trait IntentHandler: Send + Sync {
    fn intent_name(&self) -> &'static str;
    fn handle(&self, event: LexEvent) -> LexResponse;
}

pub struct RecommendPortfolioHandler;

impl IntentHandler for RecommendPortfolioHandler {
    fn intent_name(&self) -> &'static str {
        INTENT_NAME
    }

    fn handle(&self, event: LexEvent) -> LexResponse {
        recommend_portfolio(event)
    }
}

/// Intent name → handler
pub struct Dispatcher {
    handlers: HashMap<String, Arc<dyn IntentHandler>>,
}

impl Dispatcher {
    pub fn new() -> Self {
        Self {
            handlers: HashMap::new(),
        }
    }

    pub fn register(&mut self, handler: Arc<dyn IntentHandler>) {
        self.handlers
            .insert(handler.intent_name().to_string(), handler);
    }

    pub fn get(&self, intent_name: &str) -> Option<Arc<dyn IntentHandler>> {
        self.handlers.get(intent_name).cloned()
    }

    pub fn list(&self) -> Vec<&str> {
        self.handlers.keys().map(|s| s.as_str()).collect()
    }

    /// Route an event by `currentIntent.name`
    pub fn dispatch(&self, event: LexEvent) -> Result<LexResponse> {
        let intent_name = event.current_intent.name.clone();

        let handler = self.get(&intent_name).ok_or_else(|| {
            warn!(intent = %intent_name, "Unsupported intent");
            BotError::UnsupportedIntent(intent_name.clone())
        })?;

        info!(
            intent = %intent_name,
            source = ?event.invocation_source,
            "Dispatching intent"
        );

        Ok(handler.handle(event))
    }

    /// Raw event in, raw response out
    pub fn handle_event(&self, event: Value) -> Result<Value> {
        let invocation_id = Uuid::new_v4();
        let span = info_span!("invocation", %invocation_id);
        let _guard = span.enter();

        let event: LexEvent = serde_json::from_value(event)
            .map_err(|e| BotError::InvalidEvent(e.to_string()))?;

        let response = self.dispatch(event)?;
        Ok(serde_json::to_value(response)?)
    }
}

impl Default for Dispatcher {
    fn default() -> Self {
        Self::new()
    }
}

/// Create a dispatcher with the portfolio recommendation intent registered.
pub fn create_default_dispatcher() -> Dispatcher {
    let mut dispatcher = Dispatcher::new();
    dispatcher.register(Arc::new(RecommendPortfolioHandler));
    dispatcher
}

/// Dispatch through the default handler set
pub fn dispatch(event: LexEvent) -> Result<LexResponse> {
    create_default_dispatcher().dispatch(event)
}
