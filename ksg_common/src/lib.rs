mod helpers;
mod secret;
mod steam_id;

pub use helpers::{parse_boolean_flag, parse_list};
pub use secret::Secret;
pub use steam_id::{SteamId, SteamIdError};
