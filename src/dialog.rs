//! Dialog controller for the portfolio recommendation intent
//!
//! Each turn: read slots and session state, compute the recommendation
//! and validation result, then decide between eliciting a slot, asking
//! for confirmation, delegating to the platform, or closing.

use crate::models::{
    session_attribute, ConfirmationContext, ConfirmationStatus, CurrentIntent, FulfillmentState,
    InvocationSource, LexEvent, LexResponse, SessionAttributes, Slot, Slots, ValidationResult,
    CONFIRMATION_CONTEXT, CURRENT_RECOMMENDATION, LAST_RECOMMENDATION,
};
use crate::recommendation::recommend;
use crate::response::{close, confirm_intent, delegate, elicit_slot};
use crate::validation::validate;
use tracing::{debug, info};

pub const INTENT_NAME: &str = "recommendPortfolio";

const PROMPT_RESTART_AGE: &str = "Please input your age";
const PROMPT_CONFIRM: &str = "Please confirm";
const PROMPT_AGE: &str = "How old are you?";
const PROMPT_INVESTMENT_AMOUNT: &str = "How much do you want to invest?";
const PROMPT_RISK_LEVEL: &str =
    "What level of investment risk would you like to take? (None, Low, Medium, High)";

/// Next step chosen for this turn
#[derive(Debug, Clone, PartialEq, Eq)]
enum Turn {
    Elicit { slot: Slot, message: String },
    Confirm,
    Delegate,
    Fulfill,
}

/// Dialog management and fulfillment for `recommendPortfolio`.
pub fn recommend_portfolio(event: LexEvent) -> LexResponse {
    let LexEvent {
        current_intent,
        invocation_source,
        session_attributes,
    } = event;
    let CurrentIntent {
        name: intent_name,
        mut slots,
        confirmation_status,
    } = current_intent;
    let mut session_attributes = session_attributes.unwrap_or_default();

    let confirmation_context = session_attribute(&session_attributes, CONFIRMATION_CONTEXT)
        .and_then(ConfirmationContext::from_attribute);
    let has_last_recommendation =
        session_attribute(&session_attributes, LAST_RECOMMENDATION).is_some();

    let recommendation = recommend(slots.get(Slot::FirstName), slots.get(Slot::RiskLevel));
    let validation = validate(
        slots.get(Slot::Age),
        slots.get(Slot::InvestmentAmount),
        slots.get(Slot::RiskLevel),
    );

    let current_recommendation = validation.message.clone().unwrap_or(recommendation);
    session_attributes.insert(
        CURRENT_RECOMMENDATION.to_string(),
        current_recommendation.clone(),
    );

    info!(
        intent = %intent_name,
        source = ?invocation_source,
        confirmation_status = %confirmation_status,
        context = ?confirmation_context,
        "Handling recommendation turn"
    );

    let turn = match invocation_source {
        InvocationSource::DialogCodeHook => dialog_turn(
            &mut slots,
            &mut session_attributes,
            confirmation_status,
            confirmation_context,
            has_last_recommendation,
            &validation,
        ),
        InvocationSource::FulfillmentCodeHook => Turn::Fulfill,
    };

    debug!(?turn, "Dialog decision");

    match turn {
        Turn::Elicit { slot, message } => {
            elicit_slot(session_attributes, &intent_name, slots, slot, message)
        }
        Turn::Confirm => {
            session_attributes.insert(
                CONFIRMATION_CONTEXT.to_string(),
                ConfirmationContext::AutoPopulate.as_str().to_string(),
            );
            confirm_intent(session_attributes, &intent_name, slots, PROMPT_CONFIRM)
        }
        Turn::Delegate => delegate(session_attributes, slots),
        Turn::Fulfill => close(
            session_attributes,
            FulfillmentState::Fulfilled,
            current_recommendation,
        ),
    }
}

fn dialog_turn(
    slots: &mut Slots,
    session_attributes: &mut SessionAttributes,
    confirmation_status: ConfirmationStatus,
    confirmation_context: Option<ConfirmationContext>,
    has_last_recommendation: bool,
    validation: &ValidationResult,
) -> Turn {
    let has_age = slots.get(Slot::Age).is_some();
    let has_amount = slots.get(Slot::InvestmentAmount).is_some();
    let has_risk = slots.get(Slot::RiskLevel).is_some();
    let auto_populating = confirmation_context == Some(ConfirmationContext::AutoPopulate);

    if has_age && has_amount && has_risk {
        if let (false, Some(slot), Some(message)) = (
            validation.is_valid,
            validation.violated_slot,
            validation.message.as_ref(),
        ) {
            slots.clear(slot);
            return Turn::Elicit {
                slot,
                message: message.clone(),
            };
        }

        if confirmation_status == ConfirmationStatus::Denied {
            session_attributes.remove(CONFIRMATION_CONTEXT);
            session_attributes.remove(CURRENT_RECOMMENDATION);

            if auto_populating {
                slots.clear(Slot::Age);
                slots.clear(Slot::InvestmentAmount);
                slots.clear(Slot::RiskLevel);
                return Turn::Elicit {
                    slot: Slot::Age,
                    message: PROMPT_RESTART_AGE.to_string(),
                };
            }
        }

        return Turn::Delegate;
    }

    match confirmation_status {
        ConfirmationStatus::None => {
            let nothing_filled = !has_age && !has_amount && !has_risk;
            if (nothing_filled || auto_populating) && has_last_recommendation {
                Turn::Confirm
            } else {
                Turn::Delegate
            }
        }
        ConfirmationStatus::Confirmed => {
            session_attributes.remove(CONFIRMATION_CONTEXT);

            if !auto_populating {
                return Turn::Delegate;
            }

            let (slot, prompt) = if !has_age {
                (Slot::Age, PROMPT_AGE)
            } else if !has_amount {
                (Slot::InvestmentAmount, PROMPT_INVESTMENT_AMOUNT)
            } else {
                (Slot::RiskLevel, PROMPT_RISK_LEVEL)
            };

            Turn::Elicit {
                slot,
                message: prompt.to_string(),
            }
        }
        // A denial with an incomplete slot set closes with whatever is stored.
        ConfirmationStatus::Denied => Turn::Fulfill,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::DialogAction;
    use crate::validation::ValidationError;
    use serde_json::{json, Value};

    fn event(
        source: &str,
        status: &str,
        slots: Value,
        session_attributes: Value,
    ) -> LexEvent {
        serde_json::from_value(json!({
            "currentIntent": {
                "name": INTENT_NAME,
                "slots": slots,
                "confirmationStatus": status
            },
            "invocationSource": source,
            "sessionAttributes": session_attributes
        }))
        .unwrap()
    }

    fn full_slots(age: &str, amount: &str, risk: &str) -> Value {
        json!({
            "firstName": "Alice",
            "age": age,
            "investmentAmount": amount,
            "riskLevel": risk
        })
    }

    fn empty_slots() -> Value {
        json!({
            "firstName": null,
            "age": null,
            "investmentAmount": null,
            "riskLevel": null
        })
    }

    #[test]
    fn test_valid_slots_with_no_confirmation_delegate() {
        let response = recommend_portfolio(event(
            "DialogCodeHook",
            "None",
            full_slots("30", "10000", "low"),
            json!({ "last_recommendation": "{}" }),
        ));

        match response.dialog_action {
            DialogAction::Delegate { slots } => {
                assert_eq!(slots.get(Slot::Age), Some("30"));
            }
            other => panic!("expected Delegate, got {:?}", other),
        }
        assert_eq!(
            response.session_attributes[CURRENT_RECOMMENDATION],
            "Alice, given the risk level you chose, we recommend 60% bonds (AGG), 40% equities (SPY)"
        );
        assert!(!response.session_attributes.contains_key(CONFIRMATION_CONTEXT));
    }

    #[test]
    fn test_invalid_slot_is_cleared_and_elicited() {
        let response = recommend_portfolio(event(
            "DialogCodeHook",
            "None",
            full_slots("70", "10000", "low"),
            Value::Null,
        ));

        let expected = ValidationError::HighAge.message();
        match response.dialog_action {
            DialogAction::ElicitSlot {
                slots,
                slot_to_elicit,
                message,
                intent_name,
            } => {
                assert_eq!(intent_name, INTENT_NAME);
                assert_eq!(slot_to_elicit, Slot::Age);
                assert_eq!(slots.age, None);
                assert_eq!(slots.investment_amount.as_deref(), Some("10000"));
                assert_eq!(message.content, expected);
            }
            other => panic!("expected ElicitSlot, got {:?}", other),
        }
        assert_eq!(response.session_attributes[CURRENT_RECOMMENDATION], expected);
    }

    #[test]
    fn test_invalid_risk_level_is_elicited() {
        let response = recommend_portfolio(event(
            "DialogCodeHook",
            "None",
            full_slots("30", "10000", "extreme"),
            json!({}),
        ));

        assert!(matches!(
            response.dialog_action,
            DialogAction::ElicitSlot {
                slot_to_elicit: Slot::RiskLevel,
                ..
            }
        ));
    }

    #[test]
    fn test_denied_auto_populate_restarts_at_age() {
        let response = recommend_portfolio(event(
            "DialogCodeHook",
            "Denied",
            full_slots("30", "10000", "high"),
            json!({
                "confirmationContext": "AutoPopulate",
                "last_recommendation": "{\"riskLevel\": \"high\"}"
            }),
        ));

        match response.dialog_action {
            DialogAction::ElicitSlot {
                slots,
                slot_to_elicit,
                message,
                ..
            } => {
                assert_eq!(slot_to_elicit, Slot::Age);
                assert_eq!(message.content, "Please input your age");
                assert_eq!(slots.age, None);
                assert_eq!(slots.investment_amount, None);
                assert_eq!(slots.risk_level, None);
                assert_eq!(slots.first_name.as_deref(), Some("Alice"));
            }
            other => panic!("expected ElicitSlot, got {:?}", other),
        }
        assert!(!response.session_attributes.contains_key(CONFIRMATION_CONTEXT));
        assert!(!response.session_attributes.contains_key(CURRENT_RECOMMENDATION));
        assert!(response.session_attributes.contains_key(LAST_RECOMMENDATION));
    }

    #[test]
    fn test_denied_without_context_delegates() {
        let response = recommend_portfolio(event(
            "DialogCodeHook",
            "Denied",
            full_slots("30", "10000", "high"),
            json!({}),
        ));

        assert!(matches!(response.dialog_action, DialogAction::Delegate { .. }));
        assert!(!response.session_attributes.contains_key(CURRENT_RECOMMENDATION));
    }

    #[test]
    fn test_empty_slots_with_last_recommendation_ask_for_confirmation() {
        let response = recommend_portfolio(event(
            "DialogCodeHook",
            "None",
            empty_slots(),
            json!({ "last_recommendation": "{\"riskLevel\": \"low\"}" }),
        ));

        match response.dialog_action {
            DialogAction::ConfirmIntent { message, .. } => {
                assert_eq!(message.content, "Please confirm");
            }
            other => panic!("expected ConfirmIntent, got {:?}", other),
        }
        assert_eq!(
            response.session_attributes[CONFIRMATION_CONTEXT],
            "AutoPopulate"
        );
    }

    #[test]
    fn test_pending_auto_populate_keeps_asking_for_confirmation() {
        let response = recommend_portfolio(event(
            "DialogCodeHook",
            "None",
            json!({ "firstName": "Alice", "age": "30", "investmentAmount": null, "riskLevel": null }),
            json!({
                "confirmationContext": "AutoPopulate",
                "last_recommendation": "{}"
            }),
        ));

        assert!(matches!(
            response.dialog_action,
            DialogAction::ConfirmIntent { .. }
        ));
    }

    #[test]
    fn test_empty_slots_without_last_recommendation_delegate() {
        let response = recommend_portfolio(event(
            "DialogCodeHook",
            "None",
            empty_slots(),
            Value::Null,
        ));

        assert!(matches!(response.dialog_action, DialogAction::Delegate { .. }));
        assert_eq!(
            response.session_attributes[CURRENT_RECOMMENDATION],
            ValidationError::NoRisk.message()
        );
    }

    #[test]
    fn test_partial_slots_without_context_delegate() {
        let response = recommend_portfolio(event(
            "DialogCodeHook",
            "None",
            json!({ "firstName": "Alice", "age": "30", "investmentAmount": null, "riskLevel": null }),
            json!({ "last_recommendation": "{}" }),
        ));

        assert!(matches!(response.dialog_action, DialogAction::Delegate { .. }));
    }

    #[test]
    fn test_confirmed_auto_populate_elicits_in_priority_order() {
        let cases = [
            (
                json!({ "firstName": "Alice", "age": null, "investmentAmount": null, "riskLevel": "low" }),
                Slot::Age,
                "How old are you?",
            ),
            (
                json!({ "firstName": "Alice", "age": "30", "investmentAmount": null, "riskLevel": null }),
                Slot::InvestmentAmount,
                "How much do you want to invest?",
            ),
            (
                json!({ "firstName": "Alice", "age": "30", "investmentAmount": "9000", "riskLevel": null }),
                Slot::RiskLevel,
                "What level of investment risk would you like to take? (None, Low, Medium, High)",
            ),
        ];

        for (slots, expected_slot, expected_prompt) in cases {
            let response = recommend_portfolio(event(
                "DialogCodeHook",
                "Confirmed",
                slots,
                json!({ "confirmationContext": "AutoPopulate" }),
            ));

            match response.dialog_action {
                DialogAction::ElicitSlot {
                    slot_to_elicit,
                    message,
                    ..
                } => {
                    assert_eq!(slot_to_elicit, expected_slot);
                    assert_eq!(message.content, expected_prompt);
                }
                other => panic!("expected ElicitSlot, got {:?}", other),
            }
            assert!(!response.session_attributes.contains_key(CONFIRMATION_CONTEXT));
        }
    }

    #[test]
    fn test_confirmed_without_context_delegates() {
        let response = recommend_portfolio(event(
            "DialogCodeHook",
            "Confirmed",
            json!({ "firstName": "Alice", "age": null, "investmentAmount": null, "riskLevel": null }),
            json!({}),
        ));

        assert!(matches!(response.dialog_action, DialogAction::Delegate { .. }));
    }

    #[test]
    fn test_denied_with_incomplete_slots_closes() {
        let response = recommend_portfolio(event(
            "DialogCodeHook",
            "Denied",
            json!({ "firstName": "Alice", "age": "30", "investmentAmount": null, "riskLevel": null }),
            json!({}),
        ));

        match response.dialog_action {
            DialogAction::Close {
                fulfillment_state,
                message,
            } => {
                assert_eq!(fulfillment_state, FulfillmentState::Fulfilled);
                assert_eq!(message.content, ValidationError::NoRisk.message());
            }
            other => panic!("expected Close, got {:?}", other),
        }
    }

    #[test]
    fn test_fulfillment_closes_with_stored_recommendation() {
        let response = recommend_portfolio(event(
            "FulfillmentCodeHook",
            "Confirmed",
            full_slots("40", "25000", "Medium"),
            json!({}),
        ));

        let expected =
            "Alice, given the risk level you chose, we recommend 40% bonds (AGG), 60% equities (SPY)";
        match response.dialog_action {
            DialogAction::Close {
                fulfillment_state,
                message,
            } => {
                assert_eq!(fulfillment_state, FulfillmentState::Fulfilled);
                assert_eq!(message.content, expected);
            }
            other => panic!("expected Close, got {:?}", other),
        }
        assert_eq!(response.session_attributes[CURRENT_RECOMMENDATION], expected);
    }
}
