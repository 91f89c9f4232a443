use std::{env, time::Duration};

use keyshop_engine::{
    status::{DEFAULT_FETCH_TIMEOUT, DEFAULT_PRICE_KEY, DEFAULT_STATUS_TTL, DEFAULT_STOCK_KEY},
    AggregatorOptions,
    CollectionNames,
};
use ksg_common::{parse_boolean_flag, parse_list, Secret};
use log::*;
use market_tools::MarketConfig;

use crate::access::{AccessConfig, AdminSet, DEFAULT_IDENTITY_HEADER};

const DEFAULT_KSG_HOST: &str = "127.0.0.1";
const DEFAULT_KSG_PORT: u16 = 8080;
const DEFAULT_REDIS_URL: &str = "redis://127.0.0.1:6379";
const DEFAULT_REFRESH_INTERVAL: Duration = Duration::from_secs(300);

#[derive(Clone, Debug)]
pub struct ServerConfig {
    pub host: String,
    pub port: u16,
    /// MongoDB connection string. It must name the database.
    pub mongo_url: String,
    pub redis_url: String,
    pub collections: CollectionNames,
    pub status: StatusConfig,
    pub payment: PaymentConfig,
    pub access: AccessConfig,
    pub market: MarketConfig,
}

impl Default for ServerConfig {
    fn default() -> Self {
        Self {
            host: DEFAULT_KSG_HOST.to_string(),
            port: DEFAULT_KSG_PORT,
            mongo_url: String::default(),
            redis_url: DEFAULT_REDIS_URL.to_string(),
            collections: CollectionNames::default(),
            status: StatusConfig::default(),
            payment: PaymentConfig::default(),
            access: AccessConfig::default(),
            market: MarketConfig::default(),
        }
    }
}

impl ServerConfig {
    pub fn new(host: &str, port: u16) -> Self {
        Self { host: host.to_string(), port, ..Default::default() }
    }

    pub fn from_env_or_default() -> Self {
        let host = env::var("KSG_HOST").ok().unwrap_or_else(|| DEFAULT_KSG_HOST.into());
        let port = env::var("KSG_PORT")
            .map(|s| {
                s.parse::<u16>().unwrap_or_else(|e| {
                    error!(
                        "🪛️ {s} is not a valid port for KSG_PORT. {e} Using the default, {DEFAULT_KSG_PORT}, instead."
                    );
                    DEFAULT_KSG_PORT
                })
            })
            .ok()
            .unwrap_or(DEFAULT_KSG_PORT);
        let mongo_url = env::var("KSG_MONGO_URL").ok().unwrap_or_else(|| {
            error!("🪛️ KSG_MONGO_URL is not set. Please set it to the connection string for the storefront database.");
            String::default()
        });
        let redis_url = env::var("KSG_REDIS_URL").ok().unwrap_or_else(|| {
            info!("🪛️ KSG_REDIS_URL is not set. Using {DEFAULT_REDIS_URL}");
            DEFAULT_REDIS_URL.into()
        });
        let mut collections = CollectionNames::default();
        if let Ok(name) = env::var("KSG_TRANSACTIONS_COLLECTION") {
            collections.transactions = name;
        }
        let market = MarketConfig::new_from_env_or_default();
        Self {
            host,
            port,
            mongo_url,
            redis_url,
            collections,
            status: StatusConfig::from_env_or_default(),
            payment: PaymentConfig::from_env_or_default(),
            access: access_config_from_env(),
            market,
        }
    }
}

//-------------------------------------------------  StatusConfig  -----------------------------------------------------
#[derive(Clone, Debug)]
pub struct StatusConfig {
    pub price_key: String,
    pub stock_key: String,
    pub ttl: Duration,
    pub fetch_timeout: Duration,
    /// Period of the background refresh. `None` disables the worker.
    pub refresh_interval: Option<Duration>,
}

impl Default for StatusConfig {
    fn default() -> Self {
        Self {
            price_key: DEFAULT_PRICE_KEY.to_string(),
            stock_key: DEFAULT_STOCK_KEY.to_string(),
            ttl: DEFAULT_STATUS_TTL,
            fetch_timeout: DEFAULT_FETCH_TIMEOUT,
            refresh_interval: Some(DEFAULT_REFRESH_INTERVAL),
        }
    }
}

impl StatusConfig {
    pub fn from_env_or_default() -> Self {
        let price_key = env::var("KSG_PRICE_KEY").unwrap_or_else(|_| DEFAULT_PRICE_KEY.to_string());
        let stock_key = env::var("KSG_STOCK_KEY").unwrap_or_else(|_| DEFAULT_STOCK_KEY.to_string());
        let ttl = seconds_from_env("KSG_STATUS_TTL", DEFAULT_STATUS_TTL);
        let fetch_timeout = seconds_from_env("KSG_FETCH_TIMEOUT", DEFAULT_FETCH_TIMEOUT);
        let refresh_interval = match env::var("KSG_STATUS_REFRESH_INTERVAL") {
            Ok(s) if !parse_boolean_flag(Some(s.clone()), true) || s.trim() == "none" => {
                info!("🪛️ Background status refresh is disabled");
                None
            },
            Ok(_) => Some(seconds_from_env("KSG_STATUS_REFRESH_INTERVAL", DEFAULT_REFRESH_INTERVAL)),
            Err(_) => Some(DEFAULT_REFRESH_INTERVAL),
        };
        Self { price_key, stock_key, ttl, fetch_timeout, refresh_interval }
    }

    pub fn aggregator_options(&self) -> AggregatorOptions {
        AggregatorOptions { ttl: self.ttl, fetch_timeout: self.fetch_timeout }
    }
}

//-------------------------------------------------  PaymentConfig  ----------------------------------------------------
#[derive(Clone, Debug, Default)]
pub struct PaymentConfig {
    /// The merchant verification code used to check gateway callbacks.
    pub verify_code: Secret<String>,
    /// Echoed back to the gateway inside `<Roturlstatus>` to acknowledge a callback.
    pub roturl_status: String,
}

impl PaymentConfig {
    pub fn from_env_or_default() -> Self {
        let verify_code = env::var("KSG_VERIFY_CODE").ok().unwrap_or_else(|| {
            error!(
                "🪛️ KSG_VERIFY_CODE is not set. Every payment callback will be rejected until the merchant \
                 verification code is configured."
            );
            String::default()
        });
        let roturl_status = env::var("KSG_ROTURL_STATUS").ok().unwrap_or_else(|| {
            error!("🪛️ KSG_ROTURL_STATUS is not set. Payment callbacks will fail with a 500 until it is configured.");
            String::default()
        });
        Self { verify_code: Secret::new(verify_code), roturl_status }
    }
}

//-------------------------------------------------  AccessConfig  -----------------------------------------------------
fn access_config_from_env() -> AccessConfig {
    let identity_header = env::var("KSG_IDENTITY_HEADER").unwrap_or_else(|_| DEFAULT_IDENTITY_HEADER.to_string());
    let admins = env::var("KSG_ADMIN_IDS").map(|s| AdminSet::from_list(&parse_list(&s))).unwrap_or_default();
    if admins.is_empty() {
        warn!("🪛️ KSG_ADMIN_IDS is empty. Nobody will be able to view the admin order pages.");
    } else {
        info!("🪛️ {} admin ids configured. Identity is read from the {identity_header} header.", admins.len());
    }
    AccessConfig { identity_header, admins }
}

fn seconds_from_env(name: &str, default: Duration) -> Duration {
    env::var(name)
        .map_err(|_| info!("🪛️ {name} is not set. Using the default value of {}s.", default.as_secs()))
        .and_then(|s| {
            s.parse::<u64>().map(Duration::from_secs).map_err(|e| warn!("🪛️ Invalid configuration value for {name}. {e}"))
        })
        .ok()
        .unwrap_or(default)
}
