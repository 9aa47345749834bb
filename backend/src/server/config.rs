//! Environment-driven server configuration.

use std::env;
use std::net::{IpAddr, Ipv4Addr, SocketAddr};

use tracing::warn;

/// Fallback database when `DATABASE_URL` is unset.
const DEFAULT_DATABASE_URL: &str = "postgres://localhost/creatures";

/// Fallback signing secret; fine for local development only.
const DEFAULT_JWT_SECRET: &str = "secret";

/// Fallback listen port when `PORT` is unset.
const DEFAULT_PORT: u16 = 4000;

/// Settings the server reads at startup.
///
/// ## Environment variables
/// - `DATABASE_URL`: PostgreSQL connection string.
/// - `JWT_SECRET`: token signing secret; a warning is logged when the
///   development default is used.
/// - `PORT`: TCP port to listen on; unparseable values fall back to
///   the default with a warning.
/// - `SEED_ON_STARTUP`: set to `1` to apply the bundled demo fixtures
///   before accepting traffic.
#[derive(Debug, Clone)]
pub struct ServerConfig {
    /// PostgreSQL connection string.
    pub database_url: String,
    /// Secret used to sign and verify bearer tokens.
    pub jwt_secret: String,
    /// Address the HTTP listener binds to.
    pub bind_addr: SocketAddr,
    /// Whether to apply demo fixtures during startup.
    pub seed_on_startup: bool,
}

impl ServerConfig {
    /// Read configuration from the process environment.
    #[must_use]
    pub fn from_env() -> Self {
        let database_url =
            env::var("DATABASE_URL").unwrap_or_else(|_| DEFAULT_DATABASE_URL.to_owned());

        let jwt_secret = env::var("JWT_SECRET").unwrap_or_else(|_| {
            warn!("JWT_SECRET is unset; using the development default");
            DEFAULT_JWT_SECRET.to_owned()
        });

        let port = env::var("PORT")
            .ok()
            .map(|raw| match raw.parse::<u16>() {
                Ok(port) => port,
                Err(error) => {
                    warn!(%raw, %error, "PORT is not a valid port number; using the default");
                    DEFAULT_PORT
                }
            })
            .unwrap_or(DEFAULT_PORT);

        let seed_on_startup = env::var("SEED_ON_STARTUP").ok().as_deref() == Some("1");

        Self {
            database_url,
            jwt_secret,
            bind_addr: SocketAddr::new(IpAddr::V4(Ipv4Addr::UNSPECIFIED), port),
            seed_on_startup,
        }
    }
}
