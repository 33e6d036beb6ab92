//! Response builders for the four dialog actions the platform understands

use crate::models::{
    ContentType, DialogAction, FulfillmentState, LexResponse, Message, SessionAttributes, Slot,
    Slots,
};

pub fn format_message(content: impl Into<String>) -> Message {
    Message {
        content_type: ContentType::PlainText,
        content: content.into(),
    }
}

/// Ask the user for `slot_to_elicit`.
pub fn elicit_slot(
    session_attributes: SessionAttributes,
    intent_name: &str,
    slots: Slots,
    slot_to_elicit: Slot,
    message: impl Into<String>,
) -> LexResponse {
    LexResponse {
        session_attributes,
        dialog_action: DialogAction::ElicitSlot {
            intent_name: intent_name.to_string(),
            slots,
            slot_to_elicit,
            message: format_message(message),
        },
    }
}

/// Ask the user to confirm the slot set.
pub fn confirm_intent(
    session_attributes: SessionAttributes,
    intent_name: &str,
    slots: Slots,
    message: impl Into<String>,
) -> LexResponse {
    LexResponse {
        session_attributes,
        dialog_action: DialogAction::ConfirmIntent {
            intent_name: intent_name.to_string(),
            slots,
            message: format_message(message),
        },
    }
}

/// Let the platform's own slot-filling pick the next step.
pub fn delegate(session_attributes: SessionAttributes, slots: Slots) -> LexResponse {
    LexResponse {
        session_attributes,
        dialog_action: DialogAction::Delegate { slots },
    }
}

/// End the conversation.
pub fn close(
    session_attributes: SessionAttributes,
    fulfillment_state: FulfillmentState,
    message: impl Into<String>,
) -> LexResponse {
    LexResponse {
        session_attributes,
        dialog_action: DialogAction::Close {
            fulfillment_state,
            message: format_message(message),
        },
    }
}
