//! Application state wiring all services together.
//!
//! AppState pins the generic core services to the concrete infra
//! implementations: SQLite for the collection, env + keychain for secrets,
//! and whichever LLM provider the config names.

use std::path::PathBuf;
use std::sync::Arc;

use anyhow::Context;
use secrecy::SecretString;

use cardsmith_core::card::catalog::Catalog;
use cardsmith_core::card::store::CardStore;
use cardsmith_core::generation::gateway::{GenerationGateway, GenerationSettings};
use cardsmith_core::service::secret::SecretService;
use cardsmith_core::studio::Studio;
use cardsmith_infra::config::load_studio_config;
use cardsmith_infra::filesystem::resolve_data_dir;
use cardsmith_infra::keychain::KeychainProvider;
use cardsmith_infra::llm::create_provider;
use cardsmith_infra::secret::chain::build_secret_chain;
use cardsmith_infra::sqlite::blob::SqliteBlobStore;
use cardsmith_infra::sqlite::pool::{DatabasePool, database_url};
use cardsmith_types::config::StudioConfig;

pub type ConcreteStudio = Studio<SqliteBlobStore>;

/// Everything a command needs, built once per process.
pub struct AppState {
    pub config: StudioConfig,
    pub data_dir: PathBuf,
    pub db_pool: DatabasePool,
    pub secret_service: Arc<SecretService>,
    pub gateway: Arc<GenerationGateway>,
    pub studio: ConcreteStudio,
}

impl AppState {
    /// Resolve the data dir, open the database, load the collection (seeding
    /// it on first run) and connect the configured provider.
    ///
    /// A missing API key is not an error here: the gateway is left
    /// unconfigured and generation commands report it when used.
    pub async fn init() -> anyhow::Result<Self> {
        let data_dir = resolve_data_dir();
        tokio::fs::create_dir_all(&data_dir)
            .await
            .with_context(|| format!("failed to create data dir {}", data_dir.display()))?;

        let config = load_studio_config(&data_dir).await;

        let db_pool = DatabasePool::new(&database_url(&data_dir))
            .await
            .context("failed to open the card database")?;

        let secret_service = Arc::new(SecretService::new(build_secret_chain(
            Some(KeychainProvider::new()),
            true,
        )));

        let gateway = Arc::new(connect_gateway(&config, &secret_service).await);

        let catalog = Catalog::starter().context("starter catalog is invalid")?;
        let store = CardStore::load(SqliteBlobStore::new(db_pool.clone()), &catalog)
            .await
            .context("failed to load the card collection")?;
        let studio = Studio::new(store, Arc::clone(&gateway));

        Ok(Self {
            config,
            data_dir,
            db_pool,
            secret_service,
            gateway,
            studio,
        })
    }

    /// Name of the secret holding the provider API key.
    pub fn api_key_name(&self) -> &str {
        &self.config.provider.api_key_secret_name
    }
}

async fn connect_gateway(config: &StudioConfig, secrets: &SecretService) -> GenerationGateway {
    let settings = GenerationSettings::from(&config.provider);
    let key_name = &config.provider.api_key_secret_name;

    let api_key = match secrets.get_secret(key_name).await {
        Ok(value) => value.map(SecretString::from),
        Err(e) => {
            tracing::warn!(key = %key_name, error = %e, "failed to read API key");
            None
        }
    };

    match create_provider(&config.provider, api_key) {
        Ok(provider) => {
            tracing::debug!(provider = provider.name(), "generation provider ready");
            GenerationGateway::new(provider, settings)
        }
        Err(e) => GenerationGateway::unconfigured(
            format!("{e}: set {key_name} in the environment or run `csmith secret set`"),
            settings,
        ),
    }
}

#[cfg(test)]
pub(crate) mod test_support {
    use std::path::Path;

    use super::*;

    /// State over a scratch database, with no secrets and no provider.
    /// Any generation call fails with a configuration error.
    pub async fn offline_state(data_dir: &Path) -> AppState {
        let config = StudioConfig::default();
        let db_pool = DatabasePool::new(&database_url(data_dir)).await.unwrap();
        let secret_service = Arc::new(SecretService::new(Vec::new()));
        let gateway = Arc::new(GenerationGateway::unconfigured(
            "no provider in tests",
            GenerationSettings::from(&config.provider),
        ));
        let store = CardStore::load(
            SqliteBlobStore::new(db_pool.clone()),
            &Catalog::starter().unwrap(),
        )
        .await
        .unwrap();
        let studio = Studio::new(store, Arc::clone(&gateway));

        AppState {
            config,
            data_dir: data_dir.to_path_buf(),
            db_pool,
            secret_service,
            gateway,
            studio,
        }
    }
}
