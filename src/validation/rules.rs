//! Field checks
//!
//! Every check reads the field as text the way a query string would carry
//! it: strings as-is, numbers and booleans in their JSON spelling, `null`
//! and absent fields as the empty string. Arrays and objects have no text
//! form and fail every check.

use serde_json::Value;

use super::{FieldError, Location, ValidationErrors};

/// One field of one request, ready to be checked
#[derive(Debug, Clone, Copy)]
pub(crate) struct FieldCheck<'v> {
    location: Location,
    path: &'static str,
    value: Option<&'v Value>,
}

impl<'v> FieldCheck<'v> {
    pub fn new(location: Location, path: &'static str, value: Option<&'v Value>) -> Self {
        Self { location, path, value }
    }

    /// Field taken from a JSON body. Non-object bodies carry no fields.
    pub fn body(body: &'v Value, path: &'static str) -> Self {
        Self::new(Location::Body, path, body.get(path))
    }

    /// The key was sent, whatever its value
    pub fn is_present(&self) -> bool {
        self.value.is_some()
    }

    fn text(&self) -> Option<String> {
        match self.value {
            None | Some(Value::Null) => Some(String::new()),
            Some(Value::String(s)) => Some(s.clone()),
            Some(Value::Number(n)) => Some(n.to_string()),
            Some(Value::Bool(b)) => Some(b.to_string()),
            Some(Value::Array(_)) | Some(Value::Object(_)) => None,
        }
    }

    fn reject(&self, errors: &mut ValidationErrors, msg: &str) {
        errors.push(FieldError::new(self.location, self.path, self.value, msg));
    }

    /// Must carry non-empty text. Returns that text.
    pub fn required(&self, errors: &mut ValidationErrors, msg: &str) -> Option<String> {
        match self.text() {
            Some(text) if !text.is_empty() => Some(text),
            _ => {
                self.reject(errors, msg);
                None
            }
        }
    }

    /// Must be a JSON string
    pub fn string(&self, errors: &mut ValidationErrors, msg: &str) -> Option<String> {
        match self.value {
            Some(Value::String(s)) => Some(s.clone()),
            _ => {
                self.reject(errors, msg);
                None
            }
        }
    }

    /// Text form must be accepted by `parser`
    pub fn parse<T>(
        &self,
        errors: &mut ValidationErrors,
        msg: &str,
        parser: impl FnOnce(&str) -> Option<T>,
    ) -> Option<T> {
        self.try_parse(errors, msg, |text| parser(text).ok_or(msg))
    }

    /// Like `parse`, but `parser` picks the message. `msg` is used for
    /// values with no text form.
    pub fn try_parse<'m, T>(
        &self,
        errors: &mut ValidationErrors,
        msg: &'m str,
        parser: impl FnOnce(&str) -> Result<T, &'m str>,
    ) -> Option<T> {
        let outcome = match self.text() {
            Some(text) => parser(&text),
            None => Err(msg),
        };
        match outcome {
            Ok(parsed) => Some(parsed),
            Err(reason) => {
                self.reject(errors, reason);
                None
            }
        }
    }

    /// Like `string`, skipped when the key was not sent
    pub fn optional_string(&self, errors: &mut ValidationErrors, msg: &str) -> Option<String> {
        if self.is_present() {
            self.string(errors, msg)
        } else {
            None
        }
    }

    /// Like `parse`, skipped when the key was not sent
    pub fn optional_parse<T>(
        &self,
        errors: &mut ValidationErrors,
        msg: &str,
        parser: impl FnOnce(&str) -> Option<T>,
    ) -> Option<T> {
        if self.is_present() {
            self.parse(errors, msg, parser)
        } else {
            None
        }
    }

    /// Like `try_parse`, skipped when the key was not sent
    pub fn optional_try_parse<'m, T>(
        &self,
        errors: &mut ValidationErrors,
        msg: &'m str,
        parser: impl FnOnce(&str) -> Result<T, &'m str>,
    ) -> Option<T> {
        if self.is_present() {
            self.try_parse(errors, msg, parser)
        } else {
            None
        }
    }
}

/// `^\d{4}-\d{2}$`
pub(crate) fn is_year_month(text: &str) -> bool {
    let bytes = text.as_bytes();
    bytes.len() == 7
        && bytes.iter().enumerate().all(|(i, b)| match i {
            4 => *b == b'-',
            _ => b.is_ascii_digit(),
        })
}

/// Decimal integer with an optional sign, leading zeros allowed, within
/// `[min, max]`
pub(crate) fn int_in_range(text: &str, min: u64, max: u64) -> Option<u64> {
    let digits = text.strip_prefix('+').unwrap_or(text);
    if digits.is_empty() || !digits.bytes().all(|b| b.is_ascii_digit()) {
        return None;
    }
    digits
        .parse::<u64>()
        .ok()
        .filter(|value| (min..=max).contains(value))
}
