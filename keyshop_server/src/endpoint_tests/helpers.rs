use actix_web::{
    body::MessageBody,
    http::{header::CONTENT_TYPE, StatusCode},
    test,
    test::TestRequest,
    web::ServiceConfig,
    App,
};
use ksg_common::SteamId;
use log::debug;

use crate::access::{AccessConfig, AdminSet};

pub const ADMIN_ID: &str = "76561198041578278";
pub const USER_ID: &str = "76561198000000001";

pub struct TestResponse {
    pub status: StatusCode,
    pub content_type: Option<String>,
    pub body: String,
}

pub fn access_config() -> AccessConfig {
    AccessConfig { admins: AdminSet::new([ADMIN_ID.parse::<SteamId>().unwrap()]), ..AccessConfig::default() }
}

/// Runs a single request against an app built by `configure`. Errors raised by middleware are rendered the same way
/// the server would render them.
pub async fn send_request<F>(req: TestRequest, configure: F) -> TestResponse
where F: FnOnce(&mut ServiceConfig) {
    let app = App::new().configure(configure);
    let service = test::init_service(app).await;
    debug!("Making request");
    match test::try_call_service(&service, req.to_request()).await {
        Ok(res) => {
            let status = res.status();
            let content_type = res.headers().get(CONTENT_TYPE).and_then(|v| v.to_str().ok()).map(String::from);
            let body = test::read_body(res).await;
            TestResponse { status, content_type, body: String::from_utf8_lossy(&body).into_owned() }
        },
        Err(e) => {
            let res = e.error_response();
            let status = res.status();
            let content_type = res.headers().get(CONTENT_TYPE).and_then(|v| v.to_str().ok()).map(String::from);
            let body = res.into_body().try_into_bytes().unwrap_or_default();
            TestResponse { status, content_type, body: String::from_utf8_lossy(&body).into_owned() }
        },
    }
}

pub fn get(path: &str, identity: Option<&str>) -> TestRequest {
    let req = TestRequest::get().uri(path);
    match identity {
        Some(id) => req.insert_header(("X-Steam-Id", id)),
        None => req,
    }
}
