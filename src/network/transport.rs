use std::time::Duration;

use reqwest::Client;

/// Build the HTTP client used for webhook calls.
///
/// Without a timeout the request waits as long as the transport allows.
pub fn build_http_client(timeout: Option<Duration>) -> reqwest::Result<Client> {
    let mut builder = Client::builder().user_agent(concat!(
        env!("CARGO_PKG_NAME"),
        "/",
        env!("CARGO_PKG_VERSION")
    ));

    if let Some(timeout) = timeout {
        builder = builder.timeout(timeout);
    }

    builder.build()
}
