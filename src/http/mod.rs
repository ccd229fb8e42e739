// ============================================================================
// Request Surface - actix-web handlers grouped by role
// ============================================================================
//
// Handlers parse form fields, call the engine, and serialize the outcome.
// Every failure is an `EngineError`, rendered by its `ResponseError` impl.
// Extractor failures are rendered with the same `{message, status}` body.
//
// ============================================================================

mod customer;
mod error;
mod seller;

use actix_web::{web, HttpResponse};
use serde_json::json;

use crate::engine::OrderOutcome;

/// Register `/customer/...` and `/seller/...` routes
pub fn configure(cfg: &mut web::ServiceConfig) {
    cfg.app_data(error::form_config())
        .app_data(error::path_config())
        .service(web::scope("/customer").configure(customer::configure))
        .service(web::scope("/seller").configure(seller::configure));
}

/// Render any order outcome; soft rejections are still 200
fn order_response(outcome: OrderOutcome) -> HttpResponse {
    let msg = outcome.message();

    let body = match outcome {
        OrderOutcome::Placed { order, order_number } => json!({
            "result": msg,
            "orderNumber": order_number,
            "order": order,
        }),
        OrderOutcome::Reordered { order } => json!({ "msg": msg, "order": order }),
        OrderOutcome::MenuAppended { menu_name } | OrderOutcome::MenuChanged { menu_name } => {
            json!({ "msg": msg, "menu": menu_name })
        }
        OrderOutcome::ChangeRefused { state } => json!({ "msg": msg, "state": state }),
        OrderOutcome::StateUpdated { menu_name, state } => json!({
            "msg": msg,
            "menu": menu_name,
            "state": state,
        }),
    };

    HttpResponse::Ok().json(body)
}

#[cfg(test)]
pub(crate) mod test_app {
    use actix_web::{web, App};
    use std::sync::Arc;

    use crate::domain::ValidationMode;
    use crate::engine::{EngineSettings, OrderLifecycleEngine};
    use crate::store::Stores;

    /// A fresh engine over empty in-memory stores
    pub fn engine(mode: ValidationMode) -> Arc<OrderLifecycleEngine> {
        Arc::new(OrderLifecycleEngine::new(
            Stores::in_memory(),
            EngineSettings { mode, ..EngineSettings::default() },
        ))
    }

    pub fn app(
        engine: Arc<OrderLifecycleEngine>,
    ) -> App<
        impl actix_web::dev::ServiceFactory<
            actix_web::dev::ServiceRequest,
            Config = (),
            Response = actix_web::dev::ServiceResponse,
            Error = actix_web::Error,
            InitError = (),
        >,
    > {
        App::new()
            .app_data(web::Data::from(engine))
            .configure(super::configure)
    }
}
