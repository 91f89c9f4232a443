use std::time::Duration;

use actix_web::{dev::Server, http::KeepAlive, middleware::Logger, web, App, HttpServer};
use keyshop_engine::{
    traits::StoreError,
    LiveSources,
    MongoDatabase,
    OrdersApi,
    RedisStore,
    SettlementApi,
    StatusAggregator,
};
use log::*;
use market_tools::SteamMarketApi;

use crate::{
    config::ServerConfig,
    data_objects::CallbackAck,
    errors::{PaymentCallbackError, ServerError},
    integrations::steam_market::{LiveStatusSources, SteamMarketPriceSource},
    routes::{health, BotStatusRoute, OrderV2ByIdRoute, OrdersV2Route, PaymentCallbackRoute},
    status_worker::start_status_worker,
};

pub async fn run_server(config: ServerConfig) -> Result<(), ServerError> {
    let db = MongoDatabase::new_with_url(&config.mongo_url, config.collections.clone()).await.map_err(init_error)?;
    let redis = RedisStore::new_with_url(&config.redis_url).map_err(init_error)?;
    if let Err(e) = redis.ping().await {
        warn!("🗃️ Redis is not reachable at {}. Price and stock will be stale until it is. {e}", config.redis_url);
    }
    let market = SteamMarketApi::new(config.market.clone()).map_err(|e| ServerError::InitializeError(e.to_string()))?;
    let sources = LiveSources::new(redis, db.clone(), SteamMarketPriceSource::new(market))
        .with_keys(config.status.price_key.clone(), config.status.stock_key.clone());
    let aggregator = web::Data::new(StatusAggregator::new(sources, config.status.aggregator_options()));
    match config.status.refresh_interval {
        Some(interval) if !interval.is_zero() => {
            start_status_worker(aggregator.clone().into_inner(), interval);
        },
        _ => info!("🕰️ Status refresh worker is disabled. The snapshot refreshes on demand."),
    }
    let srv = create_server_instance(config, db, aggregator)?;
    srv.await.map_err(|e| ServerError::Unspecified(e.to_string()))
}

fn init_error(e: StoreError) -> ServerError {
    ServerError::InitializeError(e.to_string())
}

pub fn create_server_instance(
    config: ServerConfig,
    db: MongoDatabase,
    aggregator: web::Data<StatusAggregator<LiveStatusSources>>,
) -> Result<Server, ServerError> {
    let host = config.host.clone();
    let port = config.port;
    let srv = HttpServer::new(move || {
        let settlement_api = SettlementApi::new(db.clone(), config.payment.verify_code.clone());
        let orders_api = OrdersApi::new(db.clone());
        let ack = CallbackAck(config.payment.roturl_status.clone());
        let api_scope = web::scope("/api/v1")
            .service(BotStatusRoute::<LiveStatusSources>::new())
            .service(PaymentCallbackRoute::<MongoDatabase>::new())
            .service(OrdersV2Route::<MongoDatabase>::new())
            .service(OrderV2ByIdRoute::<MongoDatabase>::new());
        App::new()
            .wrap(Logger::new("%t (%D ms) %s %a %{Host}i %U").log_target("ksg::access_log"))
            .app_data(aggregator.clone())
            .app_data(web::Data::new(settlement_api))
            .app_data(web::Data::new(orders_api))
            .app_data(web::Data::new(ack))
            .app_data(web::Data::new(config.access.clone()))
            .app_data(callback_form_config())
            .service(health)
            .service(api_scope)
    })
    .keep_alive(KeepAlive::Timeout(Duration::from_secs(600)))
    .bind((host.as_str(), port))?
    .run();
    Ok(srv)
}

/// Malformed callback forms get the plain text answer the gateway expects.
pub fn callback_form_config() -> web::FormConfig {
    web::FormConfig::default()
        .error_handler(|err, _req| PaymentCallbackError::InvalidRequestFormat(err.to_string()).into())
}
