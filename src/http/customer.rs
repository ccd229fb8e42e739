use actix_web::{web, HttpResponse};
use serde::Deserialize;
use serde_json::json;

use crate::domain::order::OrderCommand;
use crate::domain::review::WriteReview;
use crate::engine::{EngineError, OrderLifecycleEngine};
use super::order_response;

pub fn configure(cfg: &mut web::ServiceConfig) {
    cfg.route("/menu/{sort}", web::get().to(list_menu))
        .route("/orders", web::get().to(list_orders))
        .route("/review/{menu}", web::get().to(get_review))
        .route("/review", web::post().to(write_review))
        .route("/order", web::post().to(place_order))
        .route("/order/add-menu", web::put().to(add_menu))
        .route("/order/change-menu", web::put().to(change_menu));
}

// Missing form fields arrive as empty strings and are rejected by the engine

#[derive(Debug, Default, Deserialize)]
#[serde(default)]
struct OrderForm {
    menu: String,
    pnum: String,
    address: String,
}

#[derive(Debug, Default, Deserialize)]
#[serde(default)]
struct MenuChangeForm {
    menu: String,
    #[serde(rename = "changeMenu")]
    change_menu: String,
}

#[derive(Debug, Default, Deserialize)]
#[serde(default)]
struct ReviewForm {
    menu: String,
    grade: String,
    review: String,
}

async fn list_menu(
    engine: web::Data<OrderLifecycleEngine>,
    sort: web::Path<String>,
) -> Result<HttpResponse, EngineError> {
    let items = engine.list_menu(&sort).await?;
    Ok(HttpResponse::Ok().json(json!({ "sortOption": sort.as_str(), "menu": items })))
}

async fn list_orders(engine: web::Data<OrderLifecycleEngine>) -> Result<HttpResponse, EngineError> {
    let orders = engine.list_orders().await?;
    Ok(HttpResponse::Ok().json(json!({ "orders": orders })))
}

async fn get_review(
    engine: web::Data<OrderLifecycleEngine>,
    menu: web::Path<String>,
) -> Result<HttpResponse, EngineError> {
    let review = engine.get_review(&menu).await?;
    Ok(HttpResponse::Ok().json(review))
}

async fn write_review(
    engine: web::Data<OrderLifecycleEngine>,
    form: web::Form<ReviewForm>,
) -> Result<HttpResponse, EngineError> {
    let form = form.into_inner();
    let review = engine
        .write_review(WriteReview {
            menu_name: form.menu,
            grade: form.grade,
            comment: form.review,
        })
        .await?;

    Ok(HttpResponse::Ok().json(json!({ "result": "Your review registered", "review": review })))
}

async fn place_order(
    engine: web::Data<OrderLifecycleEngine>,
    form: web::Form<OrderForm>,
) -> Result<HttpResponse, EngineError> {
    let form = form.into_inner();
    let outcome = engine
        .handle_order(OrderCommand::PlaceOrder {
            menu_name: form.menu,
            customer_phone: form.pnum,
            address: form.address,
        })
        .await?;

    Ok(order_response(outcome))
}

async fn add_menu(
    engine: web::Data<OrderLifecycleEngine>,
    form: web::Form<MenuChangeForm>,
) -> Result<HttpResponse, EngineError> {
    let form = form.into_inner();
    let outcome = engine
        .handle_order(OrderCommand::AddMenu {
            menu_name: form.menu,
            change_menu: form.change_menu,
        })
        .await?;

    Ok(order_response(outcome))
}

async fn change_menu(
    engine: web::Data<OrderLifecycleEngine>,
    form: web::Form<MenuChangeForm>,
) -> Result<HttpResponse, EngineError> {
    let form = form.into_inner();
    let outcome = engine
        .handle_order(OrderCommand::ChangeMenu {
            menu_name: form.menu,
            after_menu: form.change_menu,
        })
        .await?;

    Ok(order_response(outcome))
}

#[cfg(test)]
mod tests {
    use actix_web::test;
    use serde_json::Value;

    use crate::domain::ValidationMode;
    use crate::http::test_app::{app, engine};

    fn form(uri: &str, body: &[(&str, &str)]) -> test::TestRequest {
        test::TestRequest::post().uri(uri).set_form(body)
    }

    #[actix_web::test]
    async fn test_place_order_returns_order_number() {
        let app = test::init_service(app(engine(ValidationMode::Lenient))).await;

        let req = form("/customer/order", &[("menu", "Whopper"), ("pnum", "010"), ("address", "Seoul")]);
        let body: Value = test::call_and_read_body_json(&app, req.to_request()).await;
        assert_eq!(body["result"], "Order Success");
        assert_eq!(body["orderNumber"], 1);
        assert_eq!(body["order"]["state"], "RECEIVED");
        assert_eq!(body["order"]["menuName"], "Whopper");
    }

    #[actix_web::test]
    async fn test_missing_address_is_unprocessable() {
        let app = test::init_service(app(engine(ValidationMode::Lenient))).await;

        let req = form("/customer/order", &[("menu", "Whopper")]);
        let resp = test::call_service(&app, req.to_request()).await;
        assert_eq!(resp.status().as_u16(), 422);

        let body: Value = test::read_body_json(resp).await;
        assert_eq!(body["status"], 422);
        assert_eq!(body["message"], "address cannot be empty");
    }

    #[actix_web::test]
    async fn test_json_body_gets_structured_error() {
        let app = test::init_service(app(engine(ValidationMode::Lenient))).await;

        let req = test::TestRequest::post()
            .uri("/customer/order")
            .set_json(serde_json::json!({ "menu": "Whopper", "address": "Seoul" }));
        let resp = test::call_service(&app, req.to_request()).await;
        let status = resp.status().as_u16();
        assert_eq!(status, 415);

        let body: Value = test::read_body_json(resp).await;
        assert_eq!(body["status"], status);
        assert!(body["message"].as_str().is_some_and(|m| !m.is_empty()));
    }

    #[actix_web::test]
    async fn test_change_menu_soft_rejection_is_ok() {
        let engine = engine(ValidationMode::Lenient);
        let app = test::init_service(app(engine)).await;

        let req = form("/customer/order", &[("menu", "Whopper"), ("pnum", "010"), ("address", "Seoul")]);
        test::call_service(&app, req.to_request()).await;

        let req = test::TestRequest::put()
            .uri("/seller/order/state")
            .set_form([("menu", "Whopper"), ("state", "COOKING")]);
        assert!(test::call_service(&app, req.to_request()).await.status().is_success());

        let req = test::TestRequest::put()
            .uri("/customer/order/change-menu")
            .set_form([("menu", "Whopper"), ("changeMenu", "Bacon Whopper")]);
        let resp = test::call_service(&app, req.to_request()).await;
        assert!(resp.status().is_success());

        let body: Value = test::read_body_json(resp).await;
        assert_eq!(body["msg"], "Sorry, you can not change menu now");
        assert_eq!(body["state"], "COOKING");
    }

    #[actix_web::test]
    async fn test_review_requires_prior_order() {
        let app = test::init_service(app(engine(ValidationMode::Lenient))).await;

        let req = form("/customer/review", &[("menu", "Whopper"), ("grade", "5"), ("review", "great")]);
        let resp = test::call_service(&app, req.to_request()).await;
        assert_eq!(resp.status().as_u16(), 404);

        let req = test::TestRequest::get().uri("/customer/review/Whopper").to_request();
        let resp = test::call_service(&app, req).await;
        assert_eq!(resp.status().as_u16(), 404);
    }

    #[actix_web::test]
    async fn test_menu_listing_rejects_unknown_sort() {
        let app = test::init_service(app(engine(ValidationMode::Lenient))).await;

        let req = test::TestRequest::get().uri("/customer/menu/calories").to_request();
        assert_eq!(test::call_service(&app, req).await.status().as_u16(), 422);

        let req = test::TestRequest::get().uri("/customer/menu/price").to_request();
        let body: Value = test::call_and_read_body_json(&app, req).await;
        assert_eq!(body["menu"], Value::Array(vec![]));
    }
}
