//! Handler tests
//!
//! Each test runs validation and a handler against a fresh store, the way
//! a route would.

#[cfg(test)]
mod tests {
    use crate::api::envelope::ResponseCode;
    use crate::domain::{EventId, EventType, OperationContext};
    use crate::error::AppError;
    use crate::event_store::EventStore;
    use crate::handlers::{
        CreateEventHandler, DeleteEventCommand, DeleteEventHandler, EventQueryHandler, RequestedId,
        UpdateEventHandler,
    };
    use crate::validation::{validate_create, validate_update};
    use rust_decimal_macros::dec;
    use serde_json::json;

    fn context() -> OperationContext {
        OperationContext::new()
    }

    // =========================================================================
    // Create
    // =========================================================================

    #[tokio::test]
    async fn test_create_then_find_round_trip() {
        let store = EventStore::seeded();
        let command = validate_create(&json!({
            "nombre": "Bono",
            "descripcion": "Fin de año",
            "cantidad": 200,
            "fecha": "2024-12-10",
            "tipo": "ingreso"
        }))
        .unwrap();
        let fields = command.event.clone();

        let created = CreateEventHandler::new(store.clone())
            .execute(command, &context())
            .await;
        assert_eq!(created.id, EventId::new(3).unwrap());

        let found = EventQueryHandler::new(store)
            .find(RequestedId::new("3"), &context())
            .await
            .unwrap();
        assert_eq!(found, created);
        assert_eq!(found.nombre, fields.nombre);
        assert_eq!(found.descripcion, fields.descripcion);
        assert_eq!(found.cantidad, fields.cantidad);
        assert_eq!(found.fecha, fields.fecha);
        assert_eq!(found.tipo, fields.tipo);
        assert_eq!(found.adjunto, fields.adjunto);
    }

    #[tokio::test]
    async fn test_rejected_create_never_reaches_store() {
        let store = EventStore::seeded();
        let result = validate_create(&json!({
            "nombre": "",
            "cantidad": -5,
            "fecha": "not-a-date",
            "tipo": "x"
        }));

        assert!(result.unwrap_err().len() >= 4);
        assert_eq!(store.len().await, 2);
    }

    // =========================================================================
    // Update
    // =========================================================================

    #[tokio::test]
    async fn test_update_changes_only_cantidad() {
        let store = EventStore::seeded();
        let before = store.get(EventId::new(1).unwrap()).await.unwrap();

        let command = validate_update("1", &json!({ "cantidad": 700 })).unwrap();
        let updated = UpdateEventHandler::new(store)
            .execute(command, &context())
            .await
            .unwrap();

        assert_eq!(updated.cantidad.value(), dec!(700));
        let mut expected = serde_json::to_value(&before).unwrap();
        expected["cantidad"] = json!(700);
        assert_eq!(serde_json::to_value(&updated).unwrap(), expected);
    }

    #[tokio::test]
    async fn test_update_unknown_id_is_nf() {
        let handler = UpdateEventHandler::new(EventStore::seeded());
        let command = validate_update("77", &json!({ "tipo": "egreso" })).unwrap();

        match handler.execute(command, &context()).await {
            Err(AppError::EventNotFound { id, code }) => {
                assert_eq!(id, "77");
                assert_eq!(code, ResponseCode::NotFound);
            }
            other => panic!("Expected EventNotFound, got: {:?}", other),
        }
    }

    #[tokio::test]
    async fn test_update_can_switch_tipo() {
        let store = EventStore::seeded();
        let command = validate_update("2", &json!({ "tipo": "ingreso", "adjunto": "contrato.pdf" })).unwrap();
        let updated = UpdateEventHandler::new(store)
            .execute(command, &context())
            .await
            .unwrap();

        assert_eq!(updated.tipo, EventType::Ingreso);
        assert_eq!(updated.adjunto.as_deref(), Some("contrato.pdf"));
        assert_eq!(updated.nombre, "Renta");
    }

    // =========================================================================
    // Delete
    // =========================================================================

    #[tokio::test]
    async fn test_delete_unknown_id_is_pf_and_harmless() {
        let store = EventStore::seeded();
        let before = store.list_all().await;

        let result = DeleteEventHandler::new(store.clone())
            .execute(DeleteEventCommand::new(RequestedId::new("5")), &context())
            .await;

        assert!(matches!(
            result,
            Err(AppError::EventNotFound { code: ResponseCode::PreconditionFailed, .. })
        ));
        assert_eq!(store.list_all().await, before);
    }

    #[tokio::test]
    async fn test_delete_then_lookup_is_not_found() {
        let store = EventStore::seeded();
        let removed = DeleteEventHandler::new(store.clone())
            .execute(DeleteEventCommand::new(RequestedId::new("1")), &context())
            .await
            .unwrap();
        assert_eq!(removed.nombre, "Sueldo diciembre");

        let lookup = EventQueryHandler::new(store.clone())
            .find(RequestedId::new("1"), &context())
            .await;
        assert!(matches!(lookup, Err(AppError::EventNotFound { code: ResponseCode::NotFound, .. })));
        assert_eq!(store.len().await, 1);
    }
}
