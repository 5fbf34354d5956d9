// Shared helpers for the integration tests.
#![allow(dead_code)]

use campath::app_config::DirectoryConfig;
use campath::clients::directory_client::HttpDirectoryClient;

pub const CAMERA_LIST_BODY: &str = concat!(
    r#"{"cameraid":1,"userid":17,"rtspurl":"rtsp://10.0.0.5/live","streampath":"/p1"}"#,
    r#"{"cameraid":2,"userid":17,"rtspurl":"rtsp://10.0.0.6/live","streampath":"/p2"}"#
);

pub fn directory_config(base_url: &str, timeout_secs: u64) -> DirectoryConfig {
    DirectoryConfig {
        base_url: base_url.to_string(),
        request_timeout_secs: timeout_secs,
    }
}

/// Runs a blocking directory call off the async test runtime.
///
/// The blocking client must be created and dropped on a blocking thread.
pub async fn with_blocking_client<T, F>(base_url: String, timeout_secs: u64, call: F) -> T
where
    T: Send + 'static,
    F: FnOnce(&HttpDirectoryClient) -> T + Send + 'static,
{
    tokio::task::spawn_blocking(move || {
        let client = HttpDirectoryClient::new(&directory_config(&base_url, timeout_secs))
            .expect("client should build");
        call(&client)
    })
    .await
    .expect("blocking task panicked")
}
