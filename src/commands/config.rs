use anyhow::Result;
use log::debug;
use reqwest::{
    Client,
    header::{AUTHORIZATION, HeaderMap, HeaderValue},
};

use std::path::PathBuf;

use super::paths::project_layout;
use crate::{
    archive::{TarGzUnpacker, Unpacker},
    http::HttpClient,
    package::ProjectLayout,
    registry::{NpmRegistry, Registry},
    runtime::Runtime,
};

/// Environment variable holding a bearer token for private registries.
pub const TOKEN_ENV: &str = "SPM_TOKEN";

pub struct Config<R: Runtime, G: Registry, U: Unpacker> {
    pub runtime: R,
    pub registry: G,
    pub unpacker: U,
    pub layout: ProjectLayout,
}

impl<R: Runtime> Config<R, NpmRegistry, TarGzUnpacker> {
    pub fn new(
        runtime: R,
        root: Option<PathBuf>,
        registry_url: Option<String>,
    ) -> Result<Self> {
        let mut headers = HeaderMap::new();
        if let Ok(token) = runtime.env_var(TOKEN_ENV) {
            let mut auth_value = HeaderValue::from_str(&format!("Bearer {}", token))?;
            auth_value.set_sensitive(true);
            headers.insert(AUTHORIZATION, auth_value);
            debug!("Using {} for registry authentication", TOKEN_ENV);
        }

        let client = Client::builder()
            .user_agent("spm-cli")
            .default_headers(headers)
            .build()?;

        let registry = NpmRegistry::new(HttpClient::new(client), registry_url);
        debug!("Using registry {}", registry.base_url());
        let layout = project_layout(&runtime, root)?;

        Ok(Self {
            runtime,
            registry,
            unpacker: TarGzUnpacker,
            layout,
        })
    }
}
