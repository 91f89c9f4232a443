use actix_web::{http::StatusCode, web, web::ServiceConfig};
use keyshop_engine::{
    db_types::{Order, OrderStatus},
    traits::StoreError,
    OrdersApi,
};
use serde_json::Value;

use super::{
    helpers::{access_config, get, send_request, ADMIN_ID, USER_ID},
    mocks::MockStore,
};
use crate::routes::{OrderV2ByIdRoute, OrdersV2Route};

fn order(data_id: &str, amount: i64, settled: i64, pay_end_date: &str) -> Order {
    Order {
        steam_id: USER_ID.parse().unwrap(),
        price: amount / 2,
        count: 2,
        order_status: OrderStatus {
            smilepay_no: format!("SP{data_id}"),
            data_id: data_id.to_string(),
            declared_amount: amount,
            pay_end_date: pay_end_date.to_string(),
            pay_method: "ATM".to_string(),
            process_date: if settled > 0 { "2024/03/02".to_string() } else { String::new() },
            process_time: if settled > 0 { "10:11:12".to_string() } else { String::new() },
            settled_amount: settled,
            ..Default::default()
        },
    }
}

fn stored_orders() -> Vec<Order> {
    vec![
        order("20990101000000", 104, 0, "2099/01/04 23:59:59"),
        order("20240302090000", 250, 250, "2024/03/03 23:59:59"),
        order("20240301123000", 52, 0, "2024/03/04 23:59:59"),
        order("legacy-id", 52, 0, "not a date"),
    ]
}

fn configure(store: MockStore) -> impl FnOnce(&mut ServiceConfig) {
    move |cfg: &mut ServiceConfig| {
        cfg.app_data(web::Data::new(OrdersApi::new(store)))
            .app_data(web::Data::new(access_config()))
            .service(OrdersV2Route::<MockStore>::new())
            .service(OrderV2ByIdRoute::<MockStore>::new());
    }
}

fn store_with_orders() -> MockStore {
    let mut store = MockStore::new();
    store.expect_fetch_orders().returning(|| Ok(stored_orders()));
    store
        .expect_fetch_order_by_data_id()
        .returning(|id| Ok(stored_orders().into_iter().find(|o| o.order_status.data_id == id)));
    store
}

fn untouched_store() -> MockStore {
    let mut store = MockStore::new();
    store.expect_fetch_orders().never();
    store.expect_fetch_order_by_data_id().never();
    store
}

#[actix_web::test]
async fn list_orders_requires_identity() {
    let _ = env_logger::try_init().ok();
    let res = send_request(get("/orders/v2", None), configure(untouched_store())).await;
    assert_eq!(res.status, StatusCode::UNAUTHORIZED);
    assert_eq!(res.body, r#"{"error":"authentication required"}"#);
}

#[actix_web::test]
async fn list_orders_requires_admin() {
    let _ = env_logger::try_init().ok();
    let res = send_request(get("/orders/v2", Some(USER_ID)), configure(untouched_store())).await;
    assert_eq!(res.status, StatusCode::FORBIDDEN);
    assert_eq!(res.body, r#"{"error":"forbidden"}"#);
    let res = send_request(get("/orders/v2/20240301123000", Some(USER_ID)), configure(untouched_store())).await;
    assert_eq!(res.status, StatusCode::FORBIDDEN);
}

#[actix_web::test]
async fn list_orders() {
    let _ = env_logger::try_init().ok();
    let res = send_request(get("/orders/v2", Some(ADMIN_ID)), configure(store_with_orders())).await;
    assert_eq!(res.status, StatusCode::OK);
    let body: Value = serde_json::from_str(&res.body).unwrap();
    let orders = body["orders"].as_array().unwrap();
    assert_eq!(orders.len(), 4);
    assert_eq!(orders[0]["OrderId"], "20990101000000");
    assert_eq!(orders[0]["Status"], "Unpaid");
    assert!(orders[0].get("PayDate").is_none());
    assert_eq!(orders[1]["Status"], "Paid");
    assert_eq!(orders[1]["PayDate"], "2024/03/02 10:11:12");
    assert_eq!(orders[1]["OrderDate"], "2024/03/02 09:00:00");
    assert_eq!(orders[2]["Status"], "Expired");
    assert_eq!(orders[3]["Status"], "Expired");
    assert_eq!(orders[3]["OrderDate"], "legacy-id");
    assert_eq!(orders[2]["SteamID"], USER_ID);
    assert_eq!(orders[2]["Amount"], 52);
    assert_eq!(orders[2]["Count"], 2);
}

#[actix_web::test]
async fn empty_order_list_is_an_empty_array() {
    let _ = env_logger::try_init().ok();
    let mut store = MockStore::new();
    store.expect_fetch_orders().returning(|| Ok(vec![]));
    let res = send_request(get("/orders/v2", Some(ADMIN_ID)), configure(store)).await;
    assert_eq!(res.status, StatusCode::OK);
    assert_eq!(res.body, r#"{"orders":[]}"#);
}

#[actix_web::test]
async fn single_order() {
    let _ = env_logger::try_init().ok();
    let res = send_request(get("/orders/v2/20240302090000", Some(ADMIN_ID)), configure(store_with_orders())).await;
    assert_eq!(res.status, StatusCode::OK);
    let body: Value = serde_json::from_str(&res.body).unwrap();
    assert_eq!(body["OrderId"], "20240302090000");
    assert_eq!(body["Status"], "Paid");
    assert_eq!(body["PayMethod"], "ATM");
}

#[actix_web::test]
async fn unknown_order_is_not_found() {
    let _ = env_logger::try_init().ok();
    let res = send_request(get("/orders/v2/20000101000000", Some(ADMIN_ID)), configure(store_with_orders())).await;
    assert_eq!(res.status, StatusCode::NOT_FOUND);
    assert_eq!(res.body, r#"{"error":"order not found"}"#);
}

#[actix_web::test]
async fn store_failure_is_internal_error() {
    let _ = env_logger::try_init().ok();
    let mut store = MockStore::new();
    store.expect_fetch_orders().returning(|| Err(StoreError::DatabaseError("timeout".to_string())));
    let res = send_request(get("/orders/v2", Some(ADMIN_ID)), configure(store)).await;
    assert_eq!(res.status, StatusCode::INTERNAL_SERVER_ERROR);
    assert_eq!(res.body, r#"{"error":"internal server error"}"#);
    assert!(!res.body.contains("timeout"));
}
