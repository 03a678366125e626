use std::net::SocketAddr;

use anyhow::Context;

#[derive(Clone, Debug)]
pub struct Config {
    pub addr: SocketAddr,
    pub jwt_secret: String,
    pub token_ttl_hours: i64,
    pub seed_demo_data: bool,
}

impl Config {
    pub fn from_env() -> anyhow::Result<Self> {
        dotenvy::dotenv().ok();

        let host = std::env::var("HOST").unwrap_or_else(|_| "0.0.0.0".to_string());
        let port: u16 =
            std::env::var("PORT").unwrap_or_else(|_| "3000".to_string()).parse().context("PORT")?;

        let jwt_secret =
            std::env::var("JWT_SECRET").unwrap_or_else(|_| "dev-only-jwt-secret".to_string());

        let token_ttl_hours: i64 =
            std::env::var("TOKEN_TTL_HOURS").ok().and_then(|s| s.parse().ok()).unwrap_or(24);

        let seed_demo_data: bool =
            std::env::var("SEED_DEMO_DATA").ok().and_then(|s| s.parse().ok()).unwrap_or(true);

        Ok(Self {
            addr: format!("{host}:{port}").parse().context("HOST/PORT")?,
            jwt_secret,
            token_ttl_hours,
            seed_demo_data,
        })
    }

    pub fn for_tests() -> Self {
        Self {
            addr: "127.0.0.1:0".parse().expect("loopback addr"),
            jwt_secret: "test-jwt-secret".to_string(),
            token_ttl_hours: 24,
            seed_demo_data: false,
        }
    }
}
