//! Validation module
//!
//! Gatekeeping before any query or mutation reaches the event store.
//! Each operation has one function that either accepts the input, returning
//! the coerced command, or rejects it with every violation found.

mod error;
mod rules;

use serde::Deserialize;
use serde_json::Value;

use crate::domain::{Amount, EventChanges, EventDate, EventType, NewEvent};
use crate::event_store::{EventFilter, Pagination};
use crate::handlers::{CreateEventCommand, ListEventsQuery, RequestedId, UpdateEventCommand};

pub use error::{FieldError, Location, MissingParameter, ValidationErrors};
use rules::{int_in_range, is_year_month, FieldCheck};

const TIPO_MSG: &str = "Tipo must be \"ingreso\" or \"egreso\"";
const MES_MSG: &str = "Mes must be in YYYY-MM format";
const INVALID_VALUE: &str = "Invalid value";
const AMOUNT_MSG: &str = "Amount must be > 0";
const AMOUNT_RANGE_MSG: &str = "Amount is out of range";
const DATE_MSG: &str = "Date must be ISO (YYYY-MM-DD)";
const TYPE_MSG: &str = "Invalid type";

// =========================================================================
// Raw inputs
// =========================================================================

/// Query string of `GET /api/events`, untouched
#[derive(Debug, Clone, Default, Deserialize)]
pub struct ListEventsParams {
    #[serde(default)]
    pub tipo: Option<String>,
    #[serde(default)]
    pub mes: Option<String>,
    #[serde(default)]
    pub page: Option<String>,
    #[serde(default)]
    pub limit: Option<String>,
}

/// Query string of `GET /api/events/query`
#[derive(Debug, Clone, Default, Deserialize)]
pub struct LookupParams {
    #[serde(default)]
    pub id: Option<String>,
}

// =========================================================================
// Operations
// =========================================================================

/// Check the listing filters and page window
pub fn validate_list_query(params: &ListEventsParams) -> Result<ListEventsQuery, ValidationErrors> {
    let mut errors = ValidationErrors::new();
    let as_value = |raw: &Option<String>| raw.clone().map(Value::String);
    let (tipo, mes, page, limit) = (
        as_value(&params.tipo),
        as_value(&params.mes),
        as_value(&params.page),
        as_value(&params.limit),
    );

    let tipo = FieldCheck::new(Location::Query, "tipo", tipo.as_ref())
        .optional_parse(&mut errors, TIPO_MSG, |s| s.parse::<EventType>().ok());
    let mes = FieldCheck::new(Location::Query, "mes", mes.as_ref())
        .optional_parse(&mut errors, MES_MSG, |s| is_year_month(s).then(|| s.to_string()));
    let page = FieldCheck::new(Location::Query, "page", page.as_ref())
        .optional_parse(&mut errors, INVALID_VALUE, |s| int_in_range(s, 1, u64::MAX));
    let limit = FieldCheck::new(Location::Query, "limit", limit.as_ref())
        .optional_parse(&mut errors, INVALID_VALUE, |s| {
            int_in_range(s, 1, Pagination::MAX_LIMIT)
        });

    errors.into_result(|| ListEventsQuery {
        filter: EventFilter {
            tipo,
            year_month: mes,
        },
        pagination: Pagination::new(
            page.unwrap_or(Pagination::DEFAULT_PAGE),
            limit.unwrap_or(Pagination::DEFAULT_LIMIT),
        ),
    })
}

/// The lookup id must be sent and non-empty
pub fn validate_lookup(params: &LookupParams) -> Result<RequestedId, MissingParameter> {
    match params.id.as_deref() {
        Some(raw) if !raw.is_empty() => Ok(RequestedId::new(raw)),
        _ => Err(MissingParameter("id")),
    }
}

fn parse_amount(text: &str) -> Result<Amount, &'static str> {
    text.parse::<Amount>().map_err(|e| {
        if e.is_out_of_range() {
            AMOUNT_RANGE_MSG
        } else {
            AMOUNT_MSG
        }
    })
}

/// Check a create payload. Every field is checked, every failure reported.
pub fn validate_create(body: &Value) -> Result<CreateEventCommand, ValidationErrors> {
    let mut errors = ValidationErrors::new();

    let nombre = FieldCheck::body(body, "nombre").required(&mut errors, "Name is required");

    let cantidad = FieldCheck::body(body, "cantidad");
    cantidad.required(&mut errors, "Amount is required");
    let cantidad = cantidad.try_parse(&mut errors, AMOUNT_MSG, parse_amount);

    let fecha = FieldCheck::body(body, "fecha");
    fecha.required(&mut errors, "Date is required");
    let fecha = fecha.parse(&mut errors, DATE_MSG, |s| s.parse::<EventDate>().ok());

    let tipo = FieldCheck::body(body, "tipo");
    tipo.required(&mut errors, "Type is required");
    let tipo = tipo.parse(&mut errors, TYPE_MSG, |s| s.parse::<EventType>().ok());

    let descripcion = FieldCheck::body(body, "descripcion").optional_string(&mut errors, INVALID_VALUE);
    let adjunto = FieldCheck::body(body, "adjunto").optional_string(&mut errors, INVALID_VALUE);

    match (nombre, cantidad, fecha, tipo) {
        (Some(nombre), Some(cantidad), Some(fecha), Some(tipo)) if errors.is_empty() => {
            Ok(CreateEventCommand::new(NewEvent {
                nombre,
                descripcion,
                cantidad,
                fecha,
                tipo,
                adjunto,
            }))
        }
        _ => Err(errors),
    }
}

/// Check an update payload. Absent keys are left alone; present keys must
/// be valid.
pub fn validate_update(id: &str, body: &Value) -> Result<UpdateEventCommand, ValidationErrors> {
    let mut errors = ValidationErrors::new();

    let id_value = Value::String(id.to_string());
    FieldCheck::new(Location::Params, "id", Some(&id_value))
        .required(&mut errors, "Event ID is required!");

    let changes = EventChanges {
        nombre: FieldCheck::body(body, "nombre").optional_string(&mut errors, "Name must be a string!"),
        descripcion: FieldCheck::body(body, "descripcion")
            .optional_string(&mut errors, "Description must be a string!"),
        cantidad: FieldCheck::body(body, "cantidad")
            .optional_try_parse(&mut errors, AMOUNT_MSG, parse_amount),
        fecha: FieldCheck::body(body, "fecha")
            .optional_parse(&mut errors, DATE_MSG, |s| s.parse::<EventDate>().ok()),
        tipo: FieldCheck::body(body, "tipo")
            .optional_parse(&mut errors, TYPE_MSG, |s| s.parse::<EventType>().ok()),
        adjunto: FieldCheck::body(body, "adjunto").optional_string(&mut errors, INVALID_VALUE),
    };

    errors.into_result(|| UpdateEventCommand::new(RequestedId::new(id), changes))
}
