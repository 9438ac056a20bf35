//! Event entity
//!
//! An event is a single income (`ingreso`) or expense (`egreso`) entry.
//! Field names follow the public JSON contract of the API.

use chrono::{Datelike, NaiveDate};
use serde::Serialize;
use std::fmt;
use std::str::FromStr;

use super::Amount;

// =========================================================================
// EventId
// =========================================================================

/// Identifier assigned by the store. Always positive.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize)]
#[serde(transparent)]
pub struct EventId(u64);

impl EventId {
    pub const FIRST: EventId = EventId(1);

    pub fn new(value: u64) -> Option<Self> {
        (value > 0).then_some(Self(value))
    }

    pub fn value(&self) -> u64 {
        self.0
    }

    pub fn next(&self) -> Self {
        Self(self.0 + 1)
    }

    /// Normalize an id taken from a path or query string.
    ///
    /// Accepts any numeric text that denotes a positive whole number, so
    /// `"3"`, `" 3 "`, `"3.0"` and `"3e0"` all resolve to the same id.
    pub fn parse(raw: &str) -> Option<Self> {
        let trimmed = raw.trim();
        if let Ok(value) = trimmed.parse::<u64>() {
            return Self::new(value);
        }
        let float = trimmed.parse::<f64>().ok()?;
        if float.is_finite() && float.fract() == 0.0 && float >= 1.0 && float <= u64::MAX as f64 {
            Self::new(float as u64)
        } else {
            None
        }
    }
}

impl fmt::Display for EventId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

// =========================================================================
// EventType
// =========================================================================

/// Kind of event: income or expense
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum EventType {
    Ingreso,
    Egreso,
}

impl EventType {
    pub const ALL: [EventType; 2] = [EventType::Ingreso, EventType::Egreso];

    pub fn as_str(&self) -> &'static str {
        match self {
            EventType::Ingreso => "ingreso",
            EventType::Egreso => "egreso",
        }
    }
}

impl fmt::Display for EventType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[error("Unknown event type: {0}")]
pub struct UnknownEventType(pub String);

impl FromStr for EventType {
    type Err = UnknownEventType;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        EventType::ALL
            .into_iter()
            .find(|kind| kind.as_str() == s)
            .ok_or_else(|| UnknownEventType(s.to_string()))
    }
}

// =========================================================================
// EventDate
// =========================================================================

/// Calendar date written as `YYYY-MM-DD`
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize)]
#[serde(transparent)]
pub struct EventDate(NaiveDate);

#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum EventDateError {
    #[error("Date must be written as YYYY-MM-DD (got {0:?})")]
    Format(String),

    #[error("Not a calendar date: {0}")]
    OutOfRange(String),
}

impl EventDate {
    pub fn new(date: NaiveDate) -> Self {
        Self(date)
    }

    pub fn date(&self) -> NaiveDate {
        self.0
    }

    /// The `YYYY-MM` prefix used by the month filter
    pub fn year_month(&self) -> String {
        format!("{:04}-{:02}", self.0.year(), self.0.month())
    }
}

impl fmt::Display for EventDate {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0.format("%Y-%m-%d"))
    }
}

impl FromStr for EventDate {
    type Err = EventDateError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        // chrono tolerates unpadded fields, the wire format does not
        let bytes = s.as_bytes();
        let well_shaped = bytes.len() == 10
            && bytes.iter().enumerate().all(|(i, b)| match i {
                4 | 7 => *b == b'-',
                _ => b.is_ascii_digit(),
            });
        if !well_shaped {
            return Err(EventDateError::Format(s.to_string()));
        }

        NaiveDate::parse_from_str(s, "%Y-%m-%d")
            .map(Self)
            .map_err(|_| EventDateError::OutOfRange(s.to_string()))
    }
}

// =========================================================================
// Event
// =========================================================================

/// A stored income or expense record
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Event {
    pub id: EventId,
    pub nombre: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub descripcion: Option<String>,
    pub cantidad: Amount,
    pub fecha: EventDate,
    pub tipo: EventType,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub adjunto: Option<String>,
}

impl Event {
    /// Build the stored form of a new event once the store picked its id
    pub fn from_new(id: EventId, new_event: NewEvent) -> Self {
        Self {
            id,
            nombre: new_event.nombre,
            descripcion: new_event.descripcion,
            cantidad: new_event.cantidad,
            fecha: new_event.fecha,
            tipo: new_event.tipo,
            adjunto: new_event.adjunto,
        }
    }

    /// Overwrite the fields present in `changes`, leaving the rest alone
    pub fn apply(&mut self, changes: EventChanges) {
        if let Some(nombre) = changes.nombre {
            self.nombre = nombre;
        }
        if let Some(descripcion) = changes.descripcion {
            self.descripcion = Some(descripcion);
        }
        if let Some(cantidad) = changes.cantidad {
            self.cantidad = cantidad;
        }
        if let Some(fecha) = changes.fecha {
            self.fecha = fecha;
        }
        if let Some(tipo) = changes.tipo {
            self.tipo = tipo;
        }
        if let Some(adjunto) = changes.adjunto {
            self.adjunto = Some(adjunto);
        }
    }
}

/// Validated fields of an event that has not been stored yet
#[derive(Debug, Clone, PartialEq)]
pub struct NewEvent {
    pub nombre: String,
    pub descripcion: Option<String>,
    pub cantidad: Amount,
    pub fecha: EventDate,
    pub tipo: EventType,
    pub adjunto: Option<String>,
}

impl NewEvent {
    pub fn new(nombre: impl Into<String>, cantidad: Amount, fecha: EventDate, tipo: EventType) -> Self {
        Self {
            nombre: nombre.into(),
            descripcion: None,
            cantidad,
            fecha,
            tipo,
            adjunto: None,
        }
    }

    pub fn with_descripcion(mut self, descripcion: impl Into<String>) -> Self {
        self.descripcion = Some(descripcion.into());
        self
    }

    pub fn with_adjunto(mut self, adjunto: impl Into<String>) -> Self {
        self.adjunto = Some(adjunto.into());
        self
    }
}

/// Partial update. `None` means "not sent", never "clear the field".
#[derive(Debug, Clone, Default, PartialEq)]
pub struct EventChanges {
    pub nombre: Option<String>,
    pub descripcion: Option<String>,
    pub cantidad: Option<Amount>,
    pub fecha: Option<EventDate>,
    pub tipo: Option<EventType>,
    pub adjunto: Option<String>,
}

impl EventChanges {
    pub fn is_empty(&self) -> bool {
        *self == Self::default()
    }
}
