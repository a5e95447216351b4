use std::{
    env,
    net::{IpAddr, Ipv4Addr, SocketAddr},
};

use crate::{
    error::Error,
    fetch::{Site, SKHU_URL},
    Result,
};

const DEFAULT_PORT: u16 = 8080;

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Config {
    pub addr: SocketAddr,
    pub site: Site,
}

impl Config {
    pub fn from_env() -> Result<Self> {
        Self::from_vars(|key| env::var(key).ok())
    }

    fn from_vars(var: impl Fn(&str) -> Option<String>) -> Result<Self> {
        let host = match var("HOST") {
            Some(host) => host
                .parse::<IpAddr>()
                .map_err(|e| Error::invalid(format!("HOST {host:?}: {e}")))?,
            None => {
                let host = IpAddr::V4(Ipv4Addr::LOCALHOST);
                log::info!("env var HOST not set, using {host}");
                host
            }
        };
        let port = match var("PORT") {
            Some(port) => port
                .parse::<u16>()
                .map_err(|e| Error::invalid(format!("PORT {port:?}: {e}")))?,
            None => {
                log::info!("env var PORT not set, using {DEFAULT_PORT}");
                DEFAULT_PORT
            }
        };
        let site = match var("SKHU_URL") {
            Some(base) => Site::new(&base)?,
            None => Site::default(),
        };
        if site.base() != SKHU_URL {
            log::warn!("scraping {} instead of {SKHU_URL}", site.base());
        }
        Ok(Self {
            addr: SocketAddr::new(host, port),
            site,
        })
    }
}
