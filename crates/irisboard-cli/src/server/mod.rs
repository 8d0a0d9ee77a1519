//! Web server for the report pages.

pub mod app;
pub mod error;
pub mod handlers;
pub mod state;

/// Where the server listens.
#[derive(Debug, Clone)]
pub struct ServerConfig {
    pub host: String,
    pub port: u16,
}

impl ServerConfig {
    /// `host:port`, as passed to the listener.
    pub fn addr(&self) -> String {
        format!("{}:{}", self.host, self.port)
    }

    /// Browser URL of the index page.
    pub fn url(&self) -> String {
        format!("http://{}", self.addr())
    }
}
