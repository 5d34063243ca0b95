use std::{future::IntoFuture, net::SocketAddr};

use anyhow::Result;
use klaviomat::{
    config::{AppConfig, KlaviyoConfig, NetConfig},
    App,
};
use secrecy::SecretString;
use wiremock::MockServer;

pub const TEST_API_KEY: &str = "pk_test";
pub const COVERED_LIST: &str = "covered-list-id";
pub const NOT_COVERED_LIST: &str = "not-covered-list-id";

pub struct TestApp {
    pub addr: SocketAddr,
    pub klaviyo_server: MockServer,
    pub http_client: reqwest::Client,
}

impl TestApp {
    pub async fn post_notification_popup(
        &self,
        body: &serde_json::Value,
    ) -> Result<reqwest::Response> {
        let resp = self
            .http_client
            .post(format!("http://{}/notificationPopup", self.addr))
            .json(body)
            .send()
            .await?;
        Ok(resp)
    }

    pub async fn get_health_check(&self) -> Result<reqwest::Response> {
        let resp = self
            .http_client
            .get(format!("http://{}/health-check", self.addr))
            .send()
            .await?;
        Ok(resp)
    }
}

/// A helper function that spawns a server task for our app and a wiremock
/// `MockServer` standing in for Klaviyo.
/// Trying to bind port 0 will trigger an OS scan for an available port
/// which will then be bound to the application.
pub async fn spawn_test_app() -> Result<TestApp> {
    let klaviyo_server = MockServer::start().await;

    let config = AppConfig {
        net_config: NetConfig {
            host: [127, 0, 0, 1],
            app_port: 0,
        },
        klaviyo_config: KlaviyoConfig {
            url: klaviyo_server.uri(),
            api_key: SecretString::from(TEST_API_KEY),
            covered_list: COVERED_LIST.to_string(),
            not_covered_list: NOT_COVERED_LIST.to_string(),
        },
    };

    let app = App::build_from_config(config).await?;
    let addr = app.listener.local_addr()?;

    tokio::spawn(klaviomat::serve(app.listener, app.app_state).into_future());

    Ok(TestApp {
        addr,
        klaviyo_server,
        http_client: reqwest::Client::new(),
    })
}

/// Every response of the relay, success or error, has to carry these four
/// headers so the browser popup can read it cross-origin.
pub fn assert_cors_headers(resp: &reqwest::Response) {
    let headers = resp.headers();
    assert_eq!(headers["access-control-allow-origin"], "*");
    assert_eq!(headers["access-control-allow-methods"], "GET, POST, PUT, DELETE");
    assert_eq!(
        headers["access-control-allow-headers"],
        "Content-Type, Authorization"
    );
    assert_eq!(headers["access-control-allow-credentials"], "true");
}
