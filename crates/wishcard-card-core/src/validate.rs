//! Request validation
//!
//! Canonicalizes an arbitrary JSON payload into a `CardRequest`. Enumerated
//! fields are optional and receive their fixed defaults when absent;
//! unrecognized values are rejected naming the field, never coerced.

use serde_json::Value;
use std::str::FromStr;

use wishcard_types::{
    CardEnumParseError, CardRequest, CardStyle, FontFace, TextColor, TextEffect, TextPosition,
};

use crate::error::ValidationError;

/// Upper bound on the card message
pub const MAX_MESSAGE_LEN: usize = 500;

/// Upper bound on the free-form occasion label
pub const MAX_OCCASION_LEN: usize = 100;

/// Validate an untrusted payload into a canonical request
///
/// No side effects; the only outcomes are a complete `CardRequest` or a
/// `ValidationError` naming the offending field.
pub fn validate_request(payload: &Value) -> Result<CardRequest, ValidationError> {
    let obj = payload
        .as_object()
        .ok_or_else(|| ValidationError::new("body", "expected a JSON object"))?;

    let occasion = required_string(obj, "occasion", MAX_OCCASION_LEN)?;
    let message = required_string(obj, "message", MAX_MESSAGE_LEN)?;
    let recipient = optional_string(obj, "recipient")?;
    let sender = optional_string(obj, "sender")?;

    let style: CardStyle = enum_or_default(obj, "style")?;
    let font: FontFace = enum_or_default(obj, "font")?;
    let color: TextColor = enum_or_default(obj, "color")?;
    let position: TextPosition = enum_or_default(obj, "position")?;
    let effects = effects_list(obj)?;
    let add_watermark = bool_or_default(obj, "addWatermark")?;

    Ok(CardRequest {
        occasion,
        message,
        recipient,
        sender,
        style,
        font,
        color,
        position,
        effects,
        add_watermark,
    })
}

fn required_string(
    obj: &serde_json::Map<String, Value>,
    field: &'static str,
    max_len: usize,
) -> Result<String, ValidationError> {
    let value = obj
        .get(field)
        .ok_or_else(|| ValidationError::new(field, "required"))?;
    let s = value
        .as_str()
        .ok_or_else(|| ValidationError::new(field, "expected a string"))?;
    if s.trim().is_empty() {
        return Err(ValidationError::new(field, "must not be empty"));
    }
    if s.len() > max_len {
        return Err(ValidationError::new(
            field,
            format!("must be at most {max_len} characters"),
        ));
    }
    Ok(s.to_string())
}

fn optional_string(
    obj: &serde_json::Map<String, Value>,
    field: &'static str,
) -> Result<Option<String>, ValidationError> {
    match obj.get(field) {
        None | Some(Value::Null) => Ok(None),
        Some(Value::String(s)) => Ok(Some(s.clone())),
        Some(_) => Err(ValidationError::new(field, "expected a string")),
    }
}

fn enum_or_default<T>(
    obj: &serde_json::Map<String, Value>,
    field: &'static str,
) -> Result<T, ValidationError>
where
    T: Default + FromStr<Err = CardEnumParseError>,
{
    match obj.get(field) {
        None | Some(Value::Null) => Ok(T::default()),
        Some(Value::String(s)) => s
            .parse()
            .map_err(|_| ValidationError::new(field, format!("unrecognized value `{s}`"))),
        Some(_) => Err(ValidationError::new(field, "expected a string")),
    }
}

fn effects_list(obj: &serde_json::Map<String, Value>) -> Result<Vec<TextEffect>, ValidationError> {
    match obj.get("effects") {
        None | Some(Value::Null) => Ok(Vec::new()),
        Some(Value::Array(items)) => items
            .iter()
            .map(|item| {
                let s = item
                    .as_str()
                    .ok_or_else(|| ValidationError::new("effects", "expected an array of strings"))?;
                s.parse::<TextEffect>()
                    .map_err(|_| ValidationError::new("effects", format!("unrecognized value `{s}`")))
            })
            .collect(),
        Some(_) => Err(ValidationError::new("effects", "expected an array")),
    }
}

fn bool_or_default(
    obj: &serde_json::Map<String, Value>,
    field: &'static str,
) -> Result<bool, ValidationError> {
    match obj.get(field) {
        None | Some(Value::Null) => Ok(false),
        Some(Value::Bool(b)) => Ok(*b),
        Some(_) => Err(ValidationError::new(field, "expected a boolean")),
    }
}
