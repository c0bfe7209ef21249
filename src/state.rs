use std::sync::Arc;
use tokio::sync::RwLock;

use crate::config::Config;
use crate::db::Store;
use crate::services::{
    CatalogService, FeedbackService, SeaOrmCatalogService, SeaOrmFeedbackService,
};

#[derive(Clone)]
pub struct SharedState {
    pub config: Arc<RwLock<Config>>,

    pub store: Store,

    pub catalog_service: Arc<dyn CatalogService>,

    pub feedback_service: Arc<dyn FeedbackService>,
}

impl SharedState {
    pub async fn new(config: Config) -> anyhow::Result<Self> {
        let store = Store::with_pool_options(
            &config.general.database_path,
            config.general.max_db_connections,
            config.general.min_db_connections,
        )
        .await?;
        store.sync_rating_stars(&config.catalog.rating_stars).await?;

        let config_arc = Arc::new(RwLock::new(config));

        let catalog_service = Arc::new(SeaOrmCatalogService::new(store.clone()))
            as Arc<dyn CatalogService + Send + Sync + 'static>;

        let feedback_service = Arc::new(SeaOrmFeedbackService::new(
            store.clone(),
            config_arc.clone(),
        )) as Arc<dyn FeedbackService + Send + Sync + 'static>;

        Ok(Self {
            config: config_arc,
            store,
            catalog_service,
            feedback_service,
        })
    }
}
