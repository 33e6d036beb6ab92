//! Core data models for the portfolio recommendation intent
//!
//! Wire shapes follow the dialog platform's callback contract: the
//! event arrives with `currentIntent` / `invocationSource` /
//! `sessionAttributes`, and every response carries a `dialogAction`
//! tagged by `type`.

use serde::{Deserialize, Serialize};
use std::collections::HashMap;
use std::fmt;

//
// ================= Session Attributes =================
//

/// Platform-owned key/value state, passed in and handed back each turn
pub type SessionAttributes = HashMap<String, String>;

pub const CURRENT_RECOMMENDATION: &str = "current_recommendation";
pub const LAST_RECOMMENDATION: &str = "last_recommendation";
pub const CONFIRMATION_CONTEXT: &str = "confirmationContext";

/// Look up a session attribute; missing keys and empty values read as absent.
pub fn session_attribute<'a>(attributes: &'a SessionAttributes, key: &str) -> Option<&'a str> {
    attributes
        .get(key)
        .map(String::as_str)
        .filter(|value| !value.is_empty())
}

//
// ================= Enums =================
//

#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, Hash)]
#[serde(rename_all = "camelCase")]
pub enum Slot {
    FirstName,
    Age,
    InvestmentAmount,
    RiskLevel,
}

impl Slot {
    pub fn as_str(&self) -> &'static str {
        match self {
            Slot::FirstName => "firstName",
            Slot::Age => "age",
            Slot::InvestmentAmount => "investmentAmount",
            Slot::RiskLevel => "riskLevel",
        }
    }
}

impl fmt::Display for Slot {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

#[derive(Debug, Clone, Copy, Default, Serialize, Deserialize, PartialEq, Eq)]
pub enum ConfirmationStatus {
    #[default]
    None,
    Confirmed,
    Denied,
}

impl fmt::Display for ConfirmationStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let s = match self {
            ConfirmationStatus::None => "None",
            ConfirmationStatus::Confirmed => "Confirmed",
            ConfirmationStatus::Denied => "Denied",
        };
        write!(f, "{}", s)
    }
}

#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
pub enum InvocationSource {
    DialogCodeHook,
    /// Any source other than the dialog hook is handled as fulfillment
    #[serde(other)]
    FulfillmentCodeHook,
}

/// Session-scoped marker describing why a confirmation is pending
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ConfirmationContext {
    /// Slots were offered from a previous recommendation and await a yes/no
    AutoPopulate,
}

impl ConfirmationContext {
    pub fn as_str(&self) -> &'static str {
        match self {
            ConfirmationContext::AutoPopulate => "AutoPopulate",
        }
    }

    /// Unrecognized values are treated as no context at all.
    pub fn from_attribute(value: &str) -> Option<Self> {
        match value {
            "AutoPopulate" => Some(ConfirmationContext::AutoPopulate),
            _ => None,
        }
    }
}

#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
pub enum FulfillmentState {
    Fulfilled,
    Failed,
}

#[derive(Debug, Clone, Copy, Default, Serialize, Deserialize, PartialEq, Eq)]
pub enum ContentType {
    #[default]
    PlainText,
}

//
// ================= Slots =================
//

#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "camelCase")]
pub struct Slots {
    pub first_name: Option<String>,
    pub age: Option<String>,
    pub investment_amount: Option<String>,
    pub risk_level: Option<String>,
}

impl Slots {
    /// Value of a slot, with blank strings read as unfilled
    pub fn get(&self, slot: Slot) -> Option<&str> {
        let value = match slot {
            Slot::FirstName => &self.first_name,
            Slot::Age => &self.age,
            Slot::InvestmentAmount => &self.investment_amount,
            Slot::RiskLevel => &self.risk_level,
        };

        value.as_deref().filter(|v| !v.trim().is_empty())
    }

    pub fn clear(&mut self, slot: Slot) {
        match slot {
            Slot::FirstName => self.first_name = None,
            Slot::Age => self.age = None,
            Slot::InvestmentAmount => self.investment_amount = None,
            Slot::RiskLevel => self.risk_level = None,
        }
    }
}

//
// ================= Event =================
//

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CurrentIntent {
    pub name: String,
    #[serde(default)]
    pub slots: Slots,
    #[serde(default)]
    pub confirmation_status: ConfirmationStatus,
}

/// One invocation of the fulfillment callback
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct LexEvent {
    pub current_intent: CurrentIntent,
    pub invocation_source: InvocationSource,
    #[serde(default)]
    pub session_attributes: Option<SessionAttributes>,
}

//
// ================= Response =================
//

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "camelCase")]
pub struct Message {
    pub content_type: ContentType,
    pub content: String,
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
#[serde(tag = "type")]
pub enum DialogAction {
    #[serde(rename_all = "camelCase")]
    ElicitSlot {
        intent_name: String,
        slots: Slots,
        slot_to_elicit: Slot,
        message: Message,
    },
    #[serde(rename_all = "camelCase")]
    ConfirmIntent {
        intent_name: String,
        slots: Slots,
        message: Message,
    },
    Delegate {
        slots: Slots,
    },
    #[serde(rename_all = "camelCase")]
    Close {
        fulfillment_state: FulfillmentState,
        message: Message,
    },
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "camelCase")]
pub struct LexResponse {
    pub session_attributes: SessionAttributes,
    pub dialog_action: DialogAction,
}

//
// ================= Validation =================
//

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "camelCase")]
pub struct ValidationResult {
    pub is_valid: bool,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub violated_slot: Option<Slot>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub message: Option<String>,
}
