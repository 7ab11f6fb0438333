use docket_prelude::catalog::Catalog;
use reqwest::header::{HeaderMap, HeaderName, HeaderValue};
use reqwest::Url;
use std::collections::BTreeMap;

#[derive(Clone, Debug, serde::Deserialize)]
pub struct Config {
    pub url: String,
    #[serde(default)]
    pub params: BTreeMap<String, String>,
    #[serde(default)]
    pub headers: BTreeMap<String, String>,
}

impl TryFrom<Config> for HttpLoader {
    type Error = Error;

    fn try_from(value: Config) -> Result<Self, Self::Error> {
        tracing::debug!("building http catalog loader");
        let mut headers = HeaderMap::with_capacity(value.headers.len());
        for (name, value) in value.headers {
            let header_name = HeaderName::from_bytes(name.as_bytes())
                .map_err(|_| Error::HeaderInvalid(name.clone()))?;
            let header_value =
                HeaderValue::from_str(&value).map_err(|_| Error::HeaderInvalid(name.clone()))?;
            headers.insert(header_name, header_value);
        }
        let url = Url::parse_with_params(value.url.as_str(), value.params.iter())
            .map_err(Error::CatalogUrlInvalid)?;
        Ok(HttpLoader {
            client: reqwest::Client::new(),
            url,
            headers,
        })
    }
}

#[derive(Debug, thiserror::Error)]
pub enum Error {
    #[error("Unable to build catalog url: {0:?}")]
    CatalogUrlInvalid(url::ParseError),
    #[error("Invalid header {0:?}")]
    HeaderInvalid(String),
    #[error("Unable to request catalog: {0:?}")]
    RequestFailed(reqwest::Error),
    #[error("Unable to load and parse catalog: {0:?}")]
    CatalogLoadingFailed(reqwest::Error),
}

#[derive(Clone, Debug)]
pub struct HttpLoader {
    client: reqwest::Client,
    url: Url,
    headers: HeaderMap,
}

impl HttpLoader {
    pub(super) async fn load(&self) -> Result<Catalog, Error> {
        tracing::debug!("loading catalog from {}", self.url);
        let res = self
            .client
            .get(self.url.clone())
            .headers(self.headers.clone())
            .send()
            .await
            .map_err(|err| {
                metrics::counter!("catalog_loader_error", "reason" => "request_failed")
                    .increment(1);
                tracing::error!("unable to execute request: {:?}", err);
                Error::RequestFailed(err)
            })?;
        let res = res
            .error_for_status()
            .map_err(Error::CatalogLoadingFailed)?;
        res.json().await.map_err(|err| {
            metrics::counter!("catalog_loader_error", "reason" => "catalog_invalid").increment(1);
            tracing::error!("unable to load and parse catalog: {:?}", err);
            Error::CatalogLoadingFailed(err)
        })
    }
}

#[cfg(test)]
mod tests {
    use super::{Config, Error, HttpLoader};
    use std::collections::BTreeMap;
    use wiremock::matchers::{header, method, path, query_param};
    use wiremock::{Mock, MockServer, ResponseTemplate};

    fn config(url: String) -> Config {
        Config {
            url,
            params: BTreeMap::from([("env".to_string(), "test".to_string())]),
            headers: BTreeMap::from([("x-token".to_string(), "secret".to_string())]),
        }
    }

    #[tokio::test]
    async fn success_loads_catalog() {
        let mock_server = MockServer::start().await;
        Mock::given(method("GET"))
            .and(path("/catalog.json"))
            .and(query_param("env", "test"))
            .and(header("x-token", "secret"))
            .respond_with(ResponseTemplate::new(200).set_body_json(serde_json::json!({
                "documents": { "v1": { "title": "Remote", "version": "1" } },
                "routes": [
                    { "id": "ping", "method": "get", "path": "/ping" }
                ]
            })))
            .mount(&mock_server)
            .await;

        let loader =
            HttpLoader::try_from(config(format!("{}/catalog.json", mock_server.uri()))).unwrap();
        let catalog = loader.load().await.unwrap();
        assert_eq!(catalog.documents["v1"].title, "Remote");
        assert_eq!(catalog.routes.len(), 1);
    }

    #[tokio::test]
    async fn fails_catalog_not_found() {
        let mock_server = MockServer::start().await;
        let loader =
            HttpLoader::try_from(config(format!("{}/catalog.json", mock_server.uri()))).unwrap();
        let err = loader.load().await.unwrap_err();
        assert!(matches!(err, Error::CatalogLoadingFailed(_)));
    }

    #[tokio::test]
    async fn fails_invalid_catalog() {
        let mock_server = MockServer::start().await;
        Mock::given(method("GET"))
            .and(path("/catalog.json"))
            .respond_with(ResponseTemplate::new(200).set_body_string("nope"))
            .mount(&mock_server)
            .await;
        let loader =
            HttpLoader::try_from(config(format!("{}/catalog.json", mock_server.uri()))).unwrap();
        let err = loader.load().await.unwrap_err();
        assert!(matches!(err, Error::CatalogLoadingFailed(_)));
    }

    #[test]
    fn fails_invalid_header() {
        let mut config = config("http://localhost/catalog.json".into());
        config.headers.insert("bad header".into(), "value".into());
        let err = HttpLoader::try_from(config).unwrap_err();
        assert!(matches!(err, Error::HeaderInvalid(name) if name == "bad header"));
    }
}
