//! Service health slice.

use std::collections::{BTreeMap, HashMap};

use serde::{Deserialize, Serialize};

/// A service whose health the backend reports.
///
/// The set is fixed and the declaration order is the display order.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub enum Service {
    Node,
    Git,
    Zsh,
    Neovim,
    Gemini,
    Ssh,
}

impl Service {
    /// All services in display order.
    pub const ALL: [Service; 6] = [
        Service::Node,
        Service::Git,
        Service::Zsh,
        Service::Neovim,
        Service::Gemini,
        Service::Ssh,
    ];

    /// Key used in the `system_status` payload.
    pub fn key(&self) -> &'static str {
        match self {
            Service::Node => "node",
            Service::Git => "git",
            Service::Zsh => "zsh",
            Service::Neovim => "neovim",
            Service::Gemini => "gemini",
            Service::Ssh => "ssh",
        }
    }

    /// Human-readable name.
    pub fn label(&self) -> &'static str {
        match self {
            Service::Node => "Node.js",
            Service::Git => "Git",
            Service::Zsh => "Zsh",
            Service::Neovim => "Neovim",
            Service::Gemini => "Gemini CLI",
            Service::Ssh => "SSH Server",
        }
    }

    pub fn from_key(key: &str) -> Option<Self> {
        Self::ALL.into_iter().find(|s| s.key() == key)
    }

    fn index(self) -> usize {
        self as usize
    }
}

/// Online/offline flag for each known service.
///
/// Services the backend did not mention are offline. Keys outside the
/// known set are ignored.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(from = "HashMap<String, bool>", into = "BTreeMap<String, bool>")]
pub struct ServiceStatusMap {
    online: [bool; 6],
}

impl ServiceStatusMap {
    /// All services offline.
    pub fn new() -> Self {
        Self::default()
    }

    /// Builder-style method to set one service.
    pub fn with(mut self, service: Service, online: bool) -> Self {
        self.set(service, online);
        self
    }

    pub fn set(&mut self, service: Service, online: bool) {
        self.online[service.index()] = online;
    }

    pub fn is_online(&self, service: Service) -> bool {
        self.online[service.index()]
    }

    /// Services paired with their flag, in display order.
    pub fn iter(&self) -> impl Iterator<Item = (Service, bool)> + '_ {
        Service::ALL.into_iter().map(|s| (s, self.is_online(s)))
    }

    pub fn online_count(&self) -> usize {
        self.online.iter().filter(|o| **o).count()
    }
}

impl From<HashMap<String, bool>> for ServiceStatusMap {
    fn from(raw: HashMap<String, bool>) -> Self {
        raw.into_iter()
            .filter_map(|(key, online)| Service::from_key(&key).map(|s| (s, online)))
            .fold(Self::new(), |map, (service, online)| map.with(service, online))
    }
}

impl From<ServiceStatusMap> for BTreeMap<String, bool> {
    fn from(map: ServiceStatusMap) -> Self {
        map.iter()
            .map(|(service, online)| (service.key().to_string(), online))
            .collect()
    }
}
