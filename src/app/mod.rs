pub mod serve;

// re-export
pub use serve::serve;

use std::{net::SocketAddr, sync::Arc};

use derive_more::Deref;
use tokio::net::TcpListener;
use tracing::info;

use crate::{config::AppConfig, klaviyo_client::KlaviyoClient, web::data::Segment, Result};

// ###################################
// ->  Structs
// ###################################
pub struct App {
    pub app_state: AppState,
    pub listener: TcpListener,
}
impl App {
    pub fn new(app_state: AppState, listener: TcpListener) -> Self {
        App {
            app_state,
            listener,
        }
    }

    pub async fn build_from_config(config: AppConfig) -> Result<Self> {
        let klaviyo_client = KlaviyoClient::new(
            &config.klaviyo_config.url,
            config.klaviyo_config.api_key,
        )?;

        let app_state = AppState::new(
            klaviyo_client,
            config.klaviyo_config.covered_list,
            config.klaviyo_config.not_covered_list,
        );

        let addr = SocketAddr::from((config.net_config.host, config.net_config.app_port));
        let listener = TcpListener::bind(addr).await?;
        let addr = listener.local_addr()?;
        info!("{:<20} - {}", "Listening on:", addr);

        let app = App::new(app_state, listener);
        Ok(app)
    }
}

pub struct InternalState {
    pub klaviyo_client: KlaviyoClient,
    covered_list: String,
    not_covered_list: String,
}

impl InternalState {
    /// Destination list id for a parsed segment.
    pub fn list_id(&self, segment: Segment) -> &str {
        match segment {
            Segment::Covered => &self.covered_list,
            Segment::NotCovered => &self.not_covered_list,
        }
    }
}

/// Application state containing all global data.
/// It implements `Deref` to easily access the fields on `InternalState`
/// Uses an `Arc` so it can be cloned around.
#[derive(Clone, Deref)]
pub struct AppState(Arc<InternalState>);

impl AppState {
    pub fn new(
        klaviyo_client: KlaviyoClient,
        covered_list: String,
        not_covered_list: String,
    ) -> Self {
        AppState(Arc::new(InternalState {
            klaviyo_client,
            covered_list,
            not_covered_list,
        }))
    }
}
