use actix_web::{web, HttpResponse};
use serde::Deserialize;
use serde_json::json;

use crate::domain::catalog::{RegisterMenu, UpdateMenu};
use crate::domain::order::OrderCommand;
use crate::engine::{EngineError, OrderLifecycleEngine};
use super::order_response;

pub fn configure(cfg: &mut web::ServiceConfig) {
    cfg.route("/menu", web::post().to(register_menu))
        .route("/menu", web::put().to(update_menu))
        .route("/menu/{menu}", web::delete().to(delete_menu))
        .route("/order/state", web::put().to(update_state));
}

#[derive(Debug, Default, Deserialize)]
#[serde(default)]
struct MenuForm {
    menu: String,
    price: String,
    recommend: String,
}

#[derive(Debug, Default, Deserialize)]
#[serde(default)]
struct StateForm {
    menu: String,
    state: String,
}

async fn register_menu(
    engine: web::Data<OrderLifecycleEngine>,
    form: web::Form<MenuForm>,
) -> Result<HttpResponse, EngineError> {
    let form = form.into_inner();
    let item = engine
        .register_menu(RegisterMenu {
            menu_name: form.menu,
            price: form.price,
            recommend: form.recommend,
        })
        .await?;

    Ok(HttpResponse::Ok().json(json!({ "result": "Register menu Success", "menu": item })))
}

async fn update_menu(
    engine: web::Data<OrderLifecycleEngine>,
    form: web::Form<MenuForm>,
) -> Result<HttpResponse, EngineError> {
    let form = form.into_inner();
    let item = engine
        .update_menu(UpdateMenu {
            menu_name: form.menu,
            price: form.price,
            recommend: form.recommend,
        })
        .await?;

    Ok(HttpResponse::Ok().json(json!({ "msg": "Menu change success", "menu": item })))
}

async fn delete_menu(
    engine: web::Data<OrderLifecycleEngine>,
    menu: web::Path<String>,
) -> Result<HttpResponse, EngineError> {
    engine.delete_menu(&menu).await?;
    Ok(HttpResponse::Ok().json(json!({ "result": "Delete menu success" })))
}

async fn update_state(
    engine: web::Data<OrderLifecycleEngine>,
    form: web::Form<StateForm>,
) -> Result<HttpResponse, EngineError> {
    let form = form.into_inner();
    let outcome = engine
        .handle_order(OrderCommand::UpdateState {
            menu_name: form.menu,
            state: form.state,
        })
        .await?;

    Ok(order_response(outcome))
}
