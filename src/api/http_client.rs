use once_cell::sync::Lazy;
use reqwest::{Client, ClientBuilder};
use std::time::Duration;

/// Shared HTTP client used by every endpoint client built with the default
/// configuration. Connection pooling is per-host, so all four endpoints reuse
/// the same connections to the API host.
static HTTP_CLIENT: Lazy<Client> = Lazy::new(|| build_client(30, default_user_agent()));

pub fn default_user_agent() -> &'static str {
    concat!("wolfram-alpha-client/", env!("CARGO_PKG_VERSION"))
}

/// Get the shared HTTP client
pub fn get_http_client() -> &'static Client {
    &HTTP_CLIENT
}

/// Create an HTTP client with custom timeout and user agent
pub fn create_custom_client(timeout_secs: u64, user_agent: &str) -> Client {
    build_client(timeout_secs, user_agent)
}

fn build_client(timeout_secs: u64, user_agent: &str) -> Client {
    ClientBuilder::new()
        .pool_max_idle_per_host(10)
        .pool_idle_timeout(Duration::from_secs(30))
        .timeout(Duration::from_secs(timeout_secs))
        .tcp_keepalive(Duration::from_secs(60))
        .tcp_nodelay(true)
        .user_agent(user_agent)
        .use_rustls_tls()
        .build()
        .expect("Failed to create HTTP client")
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_global_http_client() {
        let client1 = get_http_client();
        let client2 = get_http_client();

        // Should return the same client instance (pointer comparison)
        assert!(std::ptr::eq(client1, client2));
    }

    #[test]
    fn test_custom_client_creation() {
        let _client = create_custom_client(10, "test-agent/1.0");
        // Should not panic
    }

    #[test]
    fn test_default_user_agent() {
        assert!(default_user_agent().starts_with("wolfram-alpha-client/"));
    }
}
