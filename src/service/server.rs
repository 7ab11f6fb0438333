use crate::middleware::document::DocumentLayer;
use crate::service::pipeline::{self, template, DocumentPipeline};
use docket_engine::loader::{self, Loader};
use docket_engine::provider::GeneratorBuilder;
use docket_engine::Generator;
use metrics_exporter_prometheus::{PrometheusBuilder, PrometheusHandle};
use std::net::{IpAddr, Ipv4Addr, SocketAddr};
use std::sync::Arc;
use tokio::net::TcpListener;

#[derive(Debug, thiserror::Error)]
pub enum Error {
    #[error("unable to read configuration: {0}")]
    Configuration(#[from] config::ConfigError),
    #[error("unable to load catalog: {0}")]
    Catalog(#[from] loader::Error),
    #[error("unable to build document pipeline: {0}")]
    Pipeline(#[from] pipeline::BuildError),
    #[error("unable to build document: {0}")]
    Document(#[from] docket_engine::provider::Error),
    #[error("unable to serialize document: {0}")]
    Serialization(#[from] serde_json::Error),
    #[error("unable to install prometheus recorder: {0}")]
    Recorder(#[from] metrics_exporter_prometheus::BuildError),
    #[error(transparent)]
    Io(#[from] std::io::Error),
}

#[derive(Clone, Debug, serde::Deserialize)]
pub struct Configuration {
    #[serde(default = "Configuration::default_host")]
    pub host: IpAddr,
    #[serde(default = "Configuration::default_port")]
    pub port: u16,
    /// Path of the documents, the `{documentName}` segment holds the name of the requested one.
    #[serde(default = "Configuration::default_route_template")]
    pub route_template: String,
    /// Header providing the host exposed to the clients, when behind a reverse proxy.
    #[serde(default)]
    pub host_header: Option<String>,
    //
    #[serde(default)]
    pub catalog: loader::Config,
    #[serde(default)]
    pub tracing: crate::service::tracing::Configuration,
}

impl Configuration {
    fn default_host() -> IpAddr {
        IpAddr::V4(Ipv4Addr::new(127, 0, 0, 1))
    }

    fn default_port() -> u16 {
        3000
    }

    fn default_route_template() -> String {
        template::DEFAULT_TEMPLATE.to_string()
    }

    fn address(&self) -> SocketAddr {
        SocketAddr::from((self.host, self.port))
    }

    pub fn from_path(path: &str) -> Result<Self, Error> {
        Ok(config::Config::builder()
            .add_source(config::File::with_name(path).required(false))
            .add_source(config::Environment::default().separator("__"))
            .build()?
            .try_deserialize()?)
    }

    pub async fn generator(&self) -> Result<Generator, Error> {
        let loader = Loader::try_from(self.catalog.clone())?;
        let catalog = loader.load().await?;
        tracing::debug!(
            "catalog loaded with {} documents and {} routes",
            catalog.documents.len(),
            catalog.routes.len()
        );
        Ok(GeneratorBuilder::from(catalog).build())
    }

    pub async fn pipeline(&self) -> Result<DocumentPipeline, Error> {
        let generator = self.generator().await?;
        let mut builder =
            DocumentPipeline::builder(Arc::new(generator)).route_template(&self.route_template);
        if let Some(ref name) = self.host_header {
            builder = builder.host_header(name);
        }
        Ok(builder.build()?)
    }
}

pub struct Server {
    socket_address: SocketAddr,
    pipeline: DocumentPipeline,
    tracing: crate::service::tracing::Configuration,
    prometheus_handle: PrometheusHandle,
}

impl Server {
    pub fn new(
        socket_address: SocketAddr,
        pipeline: DocumentPipeline,
        tracing: crate::service::tracing::Configuration,
        prometheus_handle: PrometheusHandle,
    ) -> Self {
        Self {
            socket_address,
            pipeline,
            tracing,
            prometheus_handle,
        }
    }

    pub async fn from_config(config: Configuration) -> Result<Self, Error> {
        let pipeline = config.pipeline().await?;
        let prometheus_handle = PrometheusBuilder::new().install_recorder()?;
        Ok(Self::new(
            config.address(),
            pipeline,
            config.tracing,
            prometheus_handle,
        ))
    }

    pub fn app(self) -> axum::Router {
        use axum::extract::Extension;

        let router = crate::controller::create()
            .layer(Extension(Arc::new(self.prometheus_handle)))
            .layer(DocumentLayer::new(self.pipeline));
        self.tracing.add_layer(router)
    }

    pub async fn run(self) -> Result<(), Error> {
        tracing::info!("starting server on {:?}", self.socket_address);
        let tcp_listener = TcpListener::bind(&self.socket_address).await?;

        axum::serve(tcp_listener, self.app().into_make_service())
            .with_graceful_shutdown(shutdown_signal())
            .await?;
        Ok(())
    }
}

async fn shutdown_signal() {
    let ctrl_c = async {
        if let Err(err) = tokio::signal::ctrl_c().await {
            tracing::error!("unable to listen for Ctrl+C: {err:?}");
        }
    };

    #[cfg(unix)]
    let terminate = async {
        match tokio::signal::unix::signal(tokio::signal::unix::SignalKind::terminate()) {
            Ok(mut signal) => {
                signal.recv().await;
            }
            Err(err) => {
                tracing::error!("unable to install signal handler: {err:?}");
                std::future::pending::<()>().await;
            }
        }
    };

    #[cfg(not(unix))]
    let terminate = std::future::pending::<()>();

    tokio::select! {
        _ = ctrl_c => {},
        _ = terminate => {},
    }

    tracing::info!("signal received, starting graceful shutdown");
}

#[cfg(test)]
mod tests {
    use super::Configuration;
    use docket_engine::DocumentProvider;

    #[test]
    fn should_use_defaults_without_file() {
        let config = Configuration::from_path("/this/file/does/not/exist.toml").unwrap();
        assert_eq!(config.port, 3000);
        assert_eq!(config.route_template, "/swagger/{documentName}/swagger.json");
        assert!(config.host_header.is_none());
    }

    #[tokio::test]
    async fn should_build_generator_from_local_catalog() {
        let config: Configuration = serde_json::from_value(serde_json::json!({
            "catalog": { "type": "local", "path": "catalog/petstore.json" }
        }))
        .unwrap();
        let generator = config.generator().await.unwrap();
        let doc = generator.get_document("v1", None, None).unwrap();
        assert!(doc.operation("/pets", "get").is_some());
        assert!(doc.operation("/stock/reset", "post").is_none());
        assert!(doc.operation("/status", "head").is_some());
    }
}
