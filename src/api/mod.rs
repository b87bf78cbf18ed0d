pub mod client;
pub mod deserializers;
pub mod devices;
pub mod http_client;
pub mod types;
pub mod users;

pub use client::{DirectoryProvider, ProviderRegistry};

/// Record categories a lookup can target
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Mode {
    /// Directory user records (queried by NetID)
    User,
    /// Managed device records (queried by machine name)
    Device,
    /// Security/distribution groups
    Group,
}

impl Mode {
    pub fn from_str(s: &str) -> Option<Self> {
        match s.to_lowercase().as_str() {
            "user" | "users" => Some(Self::User),
            "device" | "devices" | "computer" => Some(Self::Device),
            "group" | "groups" => Some(Self::Group),
            _ => None,
        }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            Self::User => "user",
            Self::Device => "device",
            Self::Group => "group",
        }
    }

    pub fn display_name(&self) -> &'static str {
        match self {
            Self::User => "user directory",
            Self::Device => "device inventory",
            Self::Group => "group directory",
        }
    }
}
