//! Admin access control middleware.
//! This middleware can be placed on any route or service.
//!
//! It reads the caller's Steam id from the identity header named in the [`AccessConfig`] app data and lets the request
//! through only if the id is in the admin set. A missing or unreadable identity is a 401; an identity that is not an
//! admin is a 403.
use std::{pin::Pin, rc::Rc};

use actix_web::{
    dev::{forward_ready, Service, ServiceRequest, ServiceResponse, Transform},
    web,
    Error,
    HttpMessage,
};
use futures::{
    future::{ok, Ready},
    Future,
};
use ksg_common::SteamId;
use log::*;

use crate::{access::AccessConfig, errors::ServerError};

pub struct AdminAclMiddlewareFactory;

impl<S, B> Transform<S, ServiceRequest> for AdminAclMiddlewareFactory
where
    S: Service<ServiceRequest, Response = ServiceResponse<B>, Error = Error> + 'static,
    S::Future: 'static,
    B: 'static,
{
    type Response = ServiceResponse<B>;
    type Error = Error;
    type Transform = AdminAclMiddlewareService<S>;
    type InitError = ();
    type Future = Ready<Result<Self::Transform, Self::InitError>>;

    fn new_transform(&self, service: S) -> Self::Future {
        ok(AdminAclMiddlewareService { service: Rc::new(service) })
    }
}

pub struct AdminAclMiddlewareService<S> {
    service: Rc<S>,
}

impl<S, B> Service<ServiceRequest> for AdminAclMiddlewareService<S>
where
    S: Service<ServiceRequest, Response = ServiceResponse<B>, Error = Error> + 'static,
    S::Future: 'static,
    B: 'static,
{
    type Response = ServiceResponse<B>;
    type Error = Error;
    type Future = Pin<Box<dyn Future<Output = Result<Self::Response, Self::Error>>>>;

    forward_ready!(service);

    fn call(&self, req: ServiceRequest) -> Self::Future {
        let service = Rc::clone(&self.service);
        Box::pin(async move {
            let access = req.app_data::<web::Data<AccessConfig>>().cloned().ok_or_else(|| {
                error!("💻️ No access configuration was registered with the app. Denying admin request.");
                ServerError::ConfigurationError("Access control is not configured".to_string())
            })?;
            let id = req
                .headers()
                .get(access.identity_header.as_str())
                .and_then(|v| v.to_str().ok())
                .and_then(|s| s.parse::<SteamId>().ok())
                .ok_or_else(|| {
                    debug!("💻️ Admin request to {} without a valid identity", req.path());
                    ServerError::AuthenticationRequired
                })?;
            if !access.admins.is_admin(&id) {
                info!("💻️ {id} tried to access {} without admin rights", req.path());
                return Err(ServerError::InsufficientPermissions.into());
            }
            trace!("💻️ Admin {id} granted access to {}", req.path());
            req.extensions_mut().insert(id);
            service.call(req).await
        })
    }
}
