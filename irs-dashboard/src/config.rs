//! Fixed runtime settings.
//!
//! The dashboard takes no flags and reads no variables of its own; the
//! values below are the whole configuration.

use std::net::{IpAddr, Ipv4Addr, SocketAddr};
use std::path::PathBuf;

/// Dataset read at startup, relative to the working directory.
pub const DATA_FILE: &str = "irs_audit_data.csv";

pub const PORT: u16 = 5000;

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DashboardConfig {
    pub data_path: PathBuf,
    pub host: IpAddr,
    pub port: u16,
}

impl Default for DashboardConfig {
    fn default() -> Self {
        Self {
            data_path: PathBuf::from(DATA_FILE),
            host: IpAddr::V4(Ipv4Addr::UNSPECIFIED),
            port: PORT,
        }
    }
}

impl DashboardConfig {
    pub fn bind_addr(&self) -> SocketAddr {
        SocketAddr::new(self.host, self.port)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn default_binds_all_interfaces_on_5000() {
        let config = DashboardConfig::default();
        assert_eq!(config.bind_addr().to_string(), "0.0.0.0:5000");
        assert_eq!(config.data_path, PathBuf::from("irs_audit_data.csv"));
    }
}
