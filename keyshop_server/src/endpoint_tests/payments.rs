use actix_web::{http::StatusCode, test::TestRequest, web, web::ServiceConfig};
use keyshop_engine::{
    db_types::PaymentCallback,
    helpers::calculate_checksum,
    traits::StoreError,
    SettlementApi,
};
use ksg_common::Secret;

use super::{
    helpers::{send_request, TestResponse},
    mocks::MockStore,
};
use crate::{data_objects::CallbackAck, routes::PaymentCallbackRoute, server::callback_form_config};

const MERCHANT: &str = "1234";
const ACK: &str = "888";
const HTML: &str = "text/html; charset=utf-8";

fn callback(purchase: &str, amount: &str) -> PaymentCallback {
    PaymentCallback {
        data_id: "20240301123000".to_string(),
        process_date: "2024/03/02".to_string(),
        process_time: "10:11:12".to_string(),
        purchase_amount: purchase.to_string(),
        settlement_amount: amount.to_string(),
        checksum: calculate_checksum(MERCHANT, purchase, "AB12C34D").to_string(),
        transaction_suffix: "AB12C34D".to_string(),
    }
}

fn configure_with(store: MockStore, ack: &str) -> impl FnOnce(&mut ServiceConfig) {
    let ack = CallbackAck(ack.to_string());
    move |cfg: &mut ServiceConfig| {
        let api = SettlementApi::new(store, Secret::new(MERCHANT.to_string()));
        cfg.app_data(web::Data::new(api))
            .app_data(web::Data::new(ack))
            .app_data(callback_form_config())
            .service(PaymentCallbackRoute::<MockStore>::new());
    }
}

fn untouched_store() -> MockStore {
    let mut store = MockStore::new();
    store.expect_apply_settlement().never();
    store
}

async fn post(callback: &PaymentCallback, store: MockStore) -> TestResponse {
    let req = TestRequest::post().uri("/payment/cb").set_form(callback);
    send_request(req, configure_with(store, ACK)).await
}

#[actix_web::test]
async fn valid_callback_is_settled_and_acknowledged() {
    let _ = env_logger::try_init().ok();
    let mut store = MockStore::new();
    store
        .expect_apply_settlement()
        .withf(|s| {
            s.data_id == "20240301123000" &&
                s.amount == 500 &&
                s.process_date == "2024/03/02" &&
                s.process_time == "10:11:12"
        })
        .times(1)
        .returning(|_| Ok(1));
    let cb = callback("500", "500");
    assert_eq!(cb.checksum, "222");
    let res = post(&cb, store).await;
    assert_eq!(res.status, StatusCode::OK);
    assert_eq!(res.content_type.as_deref(), Some(HTML));
    assert_eq!(res.body, "<Roturlstatus>888</Roturlstatus>");
}

#[actix_web::test]
async fn unknown_order_is_still_acknowledged() {
    let _ = env_logger::try_init().ok();
    let mut store = MockStore::new();
    store.expect_apply_settlement().times(1).returning(|_| Ok(0));
    let res = post(&callback("500", "500"), store).await;
    assert_eq!(res.status, StatusCode::OK);
    assert_eq!(res.body, "<Roturlstatus>888</Roturlstatus>");
}

#[actix_web::test]
async fn wrong_checksum_is_forbidden() {
    let _ = env_logger::try_init().ok();
    let mut cb = callback("500", "500");
    cb.checksum = "223".to_string();
    let res = post(&cb, untouched_store()).await;
    assert_eq!(res.status, StatusCode::FORBIDDEN);
    assert_eq!(res.content_type.as_deref(), Some(HTML));
    assert_eq!(res.body, "Invalid SmilePay transaction");
}

#[actix_web::test]
async fn tampered_amount_fails_checksum() {
    let _ = env_logger::try_init().ok();
    let mut cb = callback("500", "500");
    cb.purchase_amount = "501".to_string();
    cb.settlement_amount = "501".to_string();
    let res = post(&cb, untouched_store()).await;
    assert_eq!(res.status, StatusCode::FORBIDDEN);
}

#[actix_web::test]
async fn empty_form_is_forbidden() {
    let _ = env_logger::try_init().ok();
    let res = post(&PaymentCallback::default(), untouched_store()).await;
    assert_eq!(res.status, StatusCode::FORBIDDEN);
    assert_eq!(res.body, "Invalid SmilePay transaction");
}

#[actix_web::test]
async fn amount_mismatch_is_bad_request() {
    let _ = env_logger::try_init().ok();
    let res = post(&callback("500", "499"), untouched_store()).await;
    assert_eq!(res.status, StatusCode::BAD_REQUEST);
    assert_eq!(res.body, "Amount mismatch");
}

#[actix_web::test]
async fn unparseable_amounts_are_bad_requests() {
    let _ = env_logger::try_init().ok();
    let res = post(&callback("abc", "500"), untouched_store()).await;
    assert_eq!(res.status, StatusCode::BAD_REQUEST);
    assert_eq!(res.body, "Invalid purchamt format");
    let res = post(&callback("500", "5x0"), untouched_store()).await;
    assert_eq!(res.status, StatusCode::BAD_REQUEST);
    assert_eq!(res.body, "Invalid amount format");
}

#[actix_web::test]
async fn store_failure_is_internal_error() {
    let _ = env_logger::try_init().ok();
    let mut store = MockStore::new();
    store
        .expect_apply_settlement()
        .times(1)
        .returning(|_| Err(StoreError::DatabaseError("connection reset".to_string())));
    let res = post(&callback("500", "500"), store).await;
    assert_eq!(res.status, StatusCode::INTERNAL_SERVER_ERROR);
    assert_eq!(res.body, "Internal Server Error");
}

#[actix_web::test]
async fn missing_ack_code_is_internal_error() {
    let _ = env_logger::try_init().ok();
    let req = TestRequest::post().uri("/payment/cb").set_form(callback("500", "500"));
    let res = send_request(req, configure_with(untouched_store(), "")).await;
    assert_eq!(res.status, StatusCode::INTERNAL_SERVER_ERROR);
    assert_eq!(res.body, "Internal Server Error");
}
