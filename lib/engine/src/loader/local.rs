use docket_prelude::catalog::Catalog;
use std::fs::File;
use std::io::BufReader;
use std::path::PathBuf;

#[derive(Clone, Debug, serde::Deserialize)]
pub struct Config {
    pub path: PathBuf,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            path: PathBuf::new().join("catalog.json"),
        }
    }
}

impl From<Config> for LocalLoader {
    fn from(value: Config) -> Self {
        Self::new(value.path)
    }
}

#[derive(Debug, thiserror::Error)]
pub enum Error {
    #[error("Unable to open catalog file: {0:?}")]
    CatalogOpenFailed(std::io::Error),
    #[error("Unable to deserialize catalog file: {0:?}")]
    CatalogFormatInvalid(serde_json::Error),
}

#[derive(Debug)]
pub struct LocalLoader {
    path: PathBuf,
}

impl LocalLoader {
    pub fn new(path: PathBuf) -> Self {
        Self { path }
    }

    pub(super) async fn load(&self) -> Result<Catalog, Error> {
        tracing::debug!("loading catalog from {:?}", self.path);
        let file = File::open(&self.path).map_err(|err| {
            metrics::counter!("catalog_loader_error", "reason" => "catalog_not_found")
                .increment(1);
            tracing::debug!("catalog loader error: catalog not found ({:?})", err);
            Error::CatalogOpenFailed(err)
        })?;
        serde_json::from_reader(BufReader::new(file)).map_err(|err| {
            metrics::counter!("catalog_loader_error", "reason" => "catalog_invalid").increment(1);
            tracing::debug!("catalog loader error: catalog invalid ({:?})", err);
            Error::CatalogFormatInvalid(err)
        })
    }
}
