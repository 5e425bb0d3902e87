//! End-to-end tests for the card object through the public API.

use payment_gateway::{Card, GatewayError, Value};

#[test]
fn test_card_accepts_full_valid_payload() {
    let mut card = Card::empty();
    card.add(Card::NUMBER, "4111 1111 1111 1111").unwrap();
    card.add(Card::NAME, "Ada Lovelace").unwrap();
    card.add(Card::START_DATE_MONTH, "05").unwrap();
    card.add(Card::START_DATE_YEAR, "26").unwrap();

    assert_eq!(card.count(), 4);
    assert_eq!(
        card.get(Card::NUMBER).unwrap(),
        &Value::from("4111111111111111")
    );
    assert_eq!(card.get(Card::NAME).unwrap(), &Value::from("Ada Lovelace"));
}

#[test]
fn test_get_returns_filtered_not_raw() {
    let mut card = Card::empty();
    card.add(Card::NUMBER, "4111 1111 1111 1111").unwrap();

    assert_eq!(
        card.get(Card::NUMBER).unwrap(),
        &Value::from("4111111111111111")
    );
    assert_eq!(
        card.get_raw(Card::NUMBER),
        Some(&Value::from("4111 1111 1111 1111"))
    );
}

#[test]
fn test_rejected_name_leaves_object_unchanged() {
    let mut card = Card::empty();

    let err = card.add(Card::NAME, "123").unwrap_err();
    assert!(matches!(err, GatewayError::Validation { .. }));

    assert!(matches!(
        card.get(Card::NAME).unwrap_err(),
        GatewayError::FieldNotSet(_)
    ));
    assert_eq!(card.get_raw(Card::NAME), Some(&Value::from("123")));
    assert_eq!(card.count(), 0);
}

#[test]
fn test_unknown_field_is_rejected() {
    let mut card = Card::empty();
    let err = card.add("cvv", "123").unwrap_err();
    assert!(matches!(err, GatewayError::UnknownField(name) if name == "cvv"));
}

#[test]
fn test_field_name_partition_covers_schema() {
    let schema = Card::schema();
    let required = schema.required_field_names();
    let optional = schema.optional_field_names();

    assert_eq!(required.len() + optional.len(), schema.len());
    for name in &required {
        assert!(!optional.contains(name));
    }
}

#[test]
fn test_seeded_then_frozen_card_keeps_values() {
    let mut card = payment_gateway::ValidatedObject::read_only(
        Card::schema(),
        [
            (Card::NUMBER, "4111111111111111"),
            (Card::NAME, "Ada Lovelace"),
        ],
    )
    .unwrap();

    assert!(card.is_read_only());
    assert_eq!(
        card.get(Card::NUMBER).unwrap(),
        &Value::from("4111111111111111")
    );

    assert!(matches!(
        card.add(Card::NAME, "Grace Hopper").unwrap_err(),
        GatewayError::ReadOnly(_)
    ));
    assert!(matches!(
        card.remove(Card::NUMBER).unwrap_err(),
        GatewayError::ReadOnly(_)
    ));
    assert_eq!(card.get(Card::NAME).unwrap(), &Value::from("Ada Lovelace"));
}

#[test]
fn test_seeding_fails_on_invalid_value() {
    let result = Card::with_values([(Card::NUMBER, "not a card")]);
    assert!(matches!(
        result.unwrap_err(),
        GatewayError::Validation { field, .. } if field == "number"
    ));
}

#[test]
fn test_start_date_empty_value_reads_back_as_unset() {
    let mut card = Card::empty();
    card.add(Card::START_DATE_MONTH, "").unwrap();

    assert!(matches!(
        card.get(Card::START_DATE_MONTH).unwrap_err(),
        GatewayError::FieldNotSet(_)
    ));
    assert!(card.last_validation_errors(Card::START_DATE_MONTH).is_empty());
}

#[test]
fn test_string_conversion_unsupported_on_card_objects() {
    let card = Card::empty();
    assert!(matches!(
        card.to_display_string().unwrap_err(),
        GatewayError::Unsupported(_)
    ));
}
