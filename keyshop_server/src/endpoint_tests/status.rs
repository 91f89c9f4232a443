use std::time::Duration;

use actix_web::{http::StatusCode, test, test::TestRequest, web, App};
use keyshop_engine::{traits::SourceError, AggregatorOptions, StatusAggregator};
use serde_json::Value;

use super::mocks::MockSources;
use crate::{data_objects::StatusResponse, routes::BotStatusRoute};

fn options() -> AggregatorOptions {
    AggregatorOptions { ttl: Duration::from_secs(300), fetch_timeout: Duration::from_millis(200) }
}

fn sources_called_once() -> MockSources {
    let mut sources = MockSources::new();
    sources.expect_fetch_price().times(1).returning(|| Ok(1250));
    sources.expect_fetch_stock().times(1).returning(|| Ok(42));
    sources.expect_fetch_order_count().times(1).returning(|| Ok(17));
    sources.expect_fetch_market_price().times(1).returning(|| Ok(1199));
    sources.expect_fetch_transaction_total().times(1).returning(|| Ok(930));
    sources
}

#[actix_web::test]
async fn status_refreshes_once_per_ttl() {
    let _ = env_logger::try_init().ok();
    let aggregator = web::Data::new(StatusAggregator::new(sources_called_once(), options()));
    let app = App::new().app_data(aggregator.clone()).service(BotStatusRoute::<MockSources>::new());
    let service = test::init_service(app).await;
    for _ in 0..3 {
        let req = TestRequest::get().uri("/bot/status").to_request();
        let res = test::call_service(&service, req).await;
        assert_eq!(res.status(), StatusCode::OK);
        let body: StatusResponse = test::read_body_json(res).await;
        assert_eq!(body.price, 1250);
        assert_eq!(body.stock, 42);
        assert_eq!(body.orders, 17);
        assert_eq!(body.market_price, 1199);
        assert_eq!(body.transactions, 930);
        assert!(body.stale.is_empty());
    }
}

#[actix_web::test]
async fn failing_sources_are_reported_stale() {
    let _ = env_logger::try_init().ok();
    let mut sources = MockSources::new();
    sources.expect_fetch_price().returning(|| Ok(1250));
    sources.expect_fetch_stock().returning(|| Err(SourceError::Unavailable("redis is down".into())));
    sources.expect_fetch_order_count().returning(|| Ok(17));
    sources.expect_fetch_market_price().returning(|| Err(SourceError::Parse("no sell orders".into())));
    sources.expect_fetch_transaction_total().returning(|| Ok(930));
    let aggregator = web::Data::new(StatusAggregator::new(sources, options()));
    let app = App::new().app_data(aggregator).service(BotStatusRoute::<MockSources>::new());
    let service = test::init_service(app).await;
    let req = TestRequest::get().uri("/bot/status").to_request();
    let res = test::call_service(&service, req).await;
    assert_eq!(res.status(), StatusCode::OK);
    let body: Value = test::read_body_json(res).await;
    assert_eq!(body["price"], 1250);
    assert_eq!(body["stock"], 0);
    assert_eq!(body["marketPrice"], 0);
    assert_eq!(body["stale"], serde_json::json!(["stock", "marketPrice"]));
}
