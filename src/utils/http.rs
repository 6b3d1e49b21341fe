use once_cell::sync::Lazy;
use reqwest::Client;
use std::time::Duration;

// No overall request timeout here: the generation call is bounded by the
// orchestrator, and a slow inference backend legitimately takes minutes.
static HTTP_CLIENT: Lazy<Client> = Lazy::new(|| {
    Client::builder()
        .connect_timeout(Duration::from_secs(10))
        .build()
        .expect("Failed to build HTTP client")
});

pub fn get_http_client() -> &'static Client {
    &HTTP_CLIENT
}
