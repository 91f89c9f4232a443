//! Request handler definitions
//!
//! Define each route and it handler here.
//! Handlers that are more than a line or two MUST go into a separate module. Keep this module neat and tidy 🙏
//!
//! A note about performance:
//! Since each worker thread processes its requests sequentially, handlers which block the current thread will cause the
//! current worker to stop processing new requests. Every handler here awaits its backend calls, so a slow status
//! refresh only holds up the callers that are waiting on it.
use actix_web::{get, web, HttpResponse, Responder};
use chrono::Utc;
use keyshop_engine::{
    db_types::{PaymentCallback, SettlementOutcome},
    traits::{OrderStore, StatusSources},
    OrdersApi,
    SettlementApi,
    StatusAggregator,
};
use log::*;

use crate::{
    data_objects::{CallbackAck, OrdersResponse, StatusResponse},
    errors::{PaymentCallbackError, ServerError},
};

// Web-actix cannot handle generics in handlers, so it's implemented manually using the `route!` macro
#[macro_export]
macro_rules! route {
    ($name:ident => $method:ident $path:literal impl $($bounds:ty),+) => {
        paste::paste! { pub struct [<$name:camel Route>]< $( [< T $bounds:camel> ],)+ >( $( core::marker::PhantomData<fn() -> [< T $bounds:camel> ] >,)+ );}
        paste::paste! { impl< $( [< T $bounds:camel> ],)+ > [<$name:camel Route>]< $( [< T $bounds:camel> ],)+ > {
            #[allow(clippy::new_without_default)]
            pub fn new() -> Self {
                Self($( core::marker::PhantomData::<fn() -> [< T $bounds:camel> ] >,)+)
            }
        }}
        paste::paste! { impl<$( [< T $bounds:camel >] , )+> actix_web::dev::HttpServiceFactory for [<$name:camel Route>]<$([<T $bounds:camel>],)+>
        where
            $([<T $bounds:camel>]: $bounds + 'static,)+
        {
            fn register(self, config: &mut actix_web::dev::AppService) {
                let res = actix_web::Resource::new($path)
                    .name(stringify!($name))
                    .guard(actix_web::guard::$method())
                    .to($name::< $( [< T $bounds:camel >], )+>);
                actix_web::dev::HttpServiceFactory::register(res, config);
            }
        }}
    };

    ($name:ident => $method:ident $path:literal impl $bound:ty where admin_only)  => {
        paste::paste! { pub struct [<$name:camel Route>]<A>(core::marker::PhantomData<fn() -> A>);}
        paste::paste! { impl<A> [<$name:camel Route>]<A> {
            #[allow(clippy::new_without_default)]
            pub fn new() -> Self {
                Self(core::marker::PhantomData::<fn() -> A>)
            }
        }}
        paste::paste! { impl<A> actix_web::dev::HttpServiceFactory for [<$name:camel Route>]<A>
        where
            A: $bound + 'static,
        {
            fn register(self, config: &mut actix_web::dev::AppService) {
                let res = actix_web::Resource::new($path)
                    .name(stringify!($name))
                    .guard(actix_web::guard::$method())
                    .to($name::<A>)
                    .wrap($crate::middleware::AdminAclMiddlewareFactory);
                actix_web::dev::HttpServiceFactory::register(res, config);
            }
        }}
    };
}

#[get("/health")]
pub async fn health() -> impl Responder {
    trace!("💻️ Received health check request");
    HttpResponse::Ok().body("👍️\n")
}

//----------------------------------------------   Status  ----------------------------------------------------
route!(bot_status => Get "/bot/status" impl StatusSources);
/// Serves the storefront counters, refreshing them first if the snapshot has outlived its TTL.
pub async fn bot_status<S: StatusSources>(aggregator: web::Data<StatusAggregator<S>>) -> HttpResponse {
    trace!("💻️ Received status request");
    aggregator.refresh().await;
    let snapshot = aggregator.read().await;
    HttpResponse::Ok().json(StatusResponse::from(snapshot))
}

//----------------------------------------------   Payment  ----------------------------------------------------
route!(payment_callback => Post "/payment/cb" impl OrderStore);
pub async fn payment_callback<B: OrderStore>(
    api: web::Data<SettlementApi<B>>,
    ack: web::Data<CallbackAck>,
    body: web::Form<PaymentCallback>,
) -> Result<HttpResponse, PaymentCallbackError> {
    if !ack.is_configured() {
        error!("💻️ The callback acknowledgement code is not set. Rejecting payment callback. {}", body.0);
        return Err(PaymentCallbackError::AckNotConfigured);
    }
    let callback = body.into_inner();
    debug!("💻️ Received payment callback. {callback}");
    match api.process_callback(&callback).await {
        Ok(SettlementOutcome::Applied) => {},
        Ok(SettlementOutcome::NoMatchingOrder) => {
            warn!("💻️ Acknowledging callback for unknown order [{}]", callback.data_id);
        },
        Err(e) => {
            warn!("💻️ Payment callback for [{}] rejected. {e}", callback.data_id);
            return Err(e.into());
        },
    }
    Ok(HttpResponse::Ok().content_type("text/html; charset=utf-8").body(ack.body()))
}

//----------------------------------------------   Orders  ----------------------------------------------------
route!(orders_v2 => Get "/orders/v2" impl OrderStore where admin_only);
pub async fn orders_v2<B: OrderStore>(api: web::Data<OrdersApi<B>>) -> Result<HttpResponse, ServerError> {
    let orders = api.orders(Utc::now()).await?;
    trace!("💻️ Returning {} orders", orders.len());
    Ok(HttpResponse::Ok().json(OrdersResponse { orders }))
}

route!(order_v2_by_id => Get "/orders/v2/{id}" impl OrderStore where admin_only);
pub async fn order_v2_by_id<B: OrderStore>(
    api: web::Data<OrdersApi<B>>,
    path: web::Path<String>,
) -> Result<HttpResponse, ServerError> {
    let data_id = path.into_inner();
    let order = api.order_by_id(&data_id, Utc::now()).await?;
    order.map(|o| HttpResponse::Ok().json(o)).ok_or_else(|| ServerError::NoRecordFound("order".to_string()))
}
