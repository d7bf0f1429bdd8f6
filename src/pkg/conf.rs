use config::{Config, ConfigError, Environment};
use lazy_static::lazy_static;
use serde::Deserialize;

#[derive(Deserialize)]
pub struct Settings {
    pub sitekit_target: Option<String>,
    pub sitekit_root: Option<String>,
    pub sitekit_port: Option<u16>,
    pub not_found_message: Option<String>,
}

impl Settings {
    pub fn new() -> Result<Self, ConfigError> {
        let conf = Config::builder()
            .add_source(Environment::default())
            .build()?;
        conf.try_deserialize()
    }

    pub fn target(&self) -> &str {
        self.sitekit_target.as_deref().unwrap_or("index.html")
    }

    pub fn root(&self) -> &str {
        self.sitekit_root.as_deref().unwrap_or(".")
    }

    pub fn port(&self) -> u16 {
        self.sitekit_port.unwrap_or(8006)
    }
}

lazy_static! {
    pub static ref settings: Settings = Settings::new().expect("improperly configured");
}
