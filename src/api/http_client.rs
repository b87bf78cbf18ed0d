use once_cell::sync::Lazy;
use reqwest::{Client, ClientBuilder};
use std::time::Duration;

/// Shared HTTP client pool. All providers go through the same host, so a
/// single pooled client covers every request of an invocation.
pub struct HttpClientPool {
    client: Client,
}

impl HttpClientPool {
    pub fn new() -> Self {
        let client = ClientBuilder::new()
            .pool_max_idle_per_host(4)
            .pool_idle_timeout(Duration::from_secs(30))
            .timeout(Duration::from_secs(30))
            .tcp_keepalive(Duration::from_secs(60))
            .tcp_nodelay(true)
            .use_rustls_tls()
            .build()
            .expect("Failed to create HTTP client");

        Self { client }
    }

    /// Get the shared HTTP client
    pub fn client(&self) -> &Client {
        &self.client
    }
}

impl Default for HttpClientPool {
    fn default() -> Self {
        Self::new()
    }
}

static HTTP_CLIENT_POOL: Lazy<HttpClientPool> = Lazy::new(HttpClientPool::new);

/// Get a shared HTTP client instance
pub fn get_http_client() -> &'static Client {
    HTTP_CLIENT_POOL.client()
}

/// Create an HTTP client with a custom timeout and user agent
pub fn create_custom_client(timeout_secs: u64, user_agent: &str) -> Client {
    ClientBuilder::new()
        .pool_max_idle_per_host(4)
        .pool_idle_timeout(Duration::from_secs(30))
        .timeout(Duration::from_secs(timeout_secs))
        .tcp_keepalive(Duration::from_secs(60))
        .tcp_nodelay(true)
        .use_rustls_tls()
        .user_agent(user_agent)
        .build()
        .expect("Failed to create HTTP client with custom timeout")
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_http_client_pool_creation() {
        let pool = HttpClientPool::new();
        let _client = pool.client();
    }

    #[test]
    fn test_global_http_client() {
        let client1 = get_http_client();
        let client2 = get_http_client();

        assert!(std::ptr::eq(client1, client2));
    }

    #[test]
    fn test_custom_client_creation() {
        let _client = create_custom_client(10, "test-agent/1.0");
    }
}
