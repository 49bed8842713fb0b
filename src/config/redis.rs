use serde::Deserialize;
use secrecy::{ExposeSecret, SecretString};

#[derive(Debug, Deserialize)]
pub struct RedisSettings {
    pub host: String,
    pub port: u16,
    pub password: SecretString
}

impl RedisSettings {
    pub fn get_redis_url(&self) -> SecretString {
        let url = if self.password.expose_secret().is_empty() {
            format!("redis://{}:{}", self.host, self.port)
        } else {
            format!("redis://:{}@{}:{}", self.password.expose_secret(), self.host, self.port)
        };
        SecretString::new(url.into_boxed_str())
    }
}
