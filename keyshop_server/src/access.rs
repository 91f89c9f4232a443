//! Admin access for the order views.
//!
//! Authentication happens upstream: the auth layer in front of this server sets the caller's Steam id in a trusted
//! request header. This module only decides whether that id may see the admin views.
use std::collections::HashSet;

use ksg_common::SteamId;
use log::*;

/// The Steam ids with access to the admin views.
#[derive(Clone, Debug, Default)]
pub struct AdminSet {
    ids: HashSet<SteamId>,
}

impl AdminSet {
    pub fn new<I: IntoIterator<Item = SteamId>>(ids: I) -> Self {
        Self { ids: ids.into_iter().collect() }
    }

    /// Builds the set from raw configuration values. Entries that are not Steam ids are skipped with a warning.
    pub fn from_list(values: &[String]) -> Self {
        let ids = values.iter().filter_map(|s| {
            s.parse::<SteamId>().map_err(|e| warn!("🪛️ Ignoring admin entry. {e}")).ok()
        });
        Self::new(ids)
    }

    pub fn is_admin(&self, id: &SteamId) -> bool {
        self.ids.contains(id)
    }

    pub fn len(&self) -> usize {
        self.ids.len()
    }

    pub fn is_empty(&self) -> bool {
        self.ids.is_empty()
    }
}

#[derive(Clone, Debug)]
pub struct AccessConfig {
    /// The header the upstream auth layer puts the caller's Steam id in.
    pub identity_header: String,
    pub admins: AdminSet,
}

pub const DEFAULT_IDENTITY_HEADER: &str = "X-Steam-Id";

impl Default for AccessConfig {
    fn default() -> Self {
        Self { identity_header: DEFAULT_IDENTITY_HEADER.to_string(), admins: AdminSet::default() }
    }
}
