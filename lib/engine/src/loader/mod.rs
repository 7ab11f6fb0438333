use docket_prelude::catalog::Catalog;

pub mod http;
pub mod local;

#[derive(Debug, thiserror::Error)]
pub enum Error {
    #[error(transparent)]
    Local(#[from] local::Error),
    #[error(transparent)]
    Http(#[from] http::Error),
}

#[derive(Clone, Debug, serde::Deserialize)]
#[serde(tag = "type", rename_all = "kebab-case")]
pub enum Config {
    Local(local::Config),
    Http(http::Config),
}

impl Default for Config {
    fn default() -> Self {
        Self::Local(local::Config::default())
    }
}

impl TryFrom<Config> for Loader {
    type Error = Error;

    fn try_from(value: Config) -> Result<Self, Self::Error> {
        Ok(match value {
            Config::Local(item) => Loader::Local(item.into()),
            Config::Http(item) => Loader::Http(item.try_into()?),
        })
    }
}

/// Fetches the catalog describing the routes of the service.
#[derive(Debug)]
pub enum Loader {
    Local(local::LocalLoader),
    Http(http::HttpLoader),
}

impl Loader {
    pub async fn load(&self) -> Result<Catalog, Error> {
        match self {
            Loader::Local(inner) => inner.load().await.map_err(Error::Local),
            Loader::Http(inner) => inner.load().await.map_err(Error::Http),
        }
    }
}
