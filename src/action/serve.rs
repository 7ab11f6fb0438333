use docket::service::server::{Configuration, Error, Server};

#[derive(clap::Parser)]
pub(crate) struct Action {
    /// Path to the configuration toml file, default to /etc/docket/docket.toml.
    #[clap(
        short,
        long,
        default_value = "/etc/docket/docket.toml",
        env = "DOCKET_CONFIG"
    )]
    pub config_path: String,
}

impl Action {
    pub(crate) async fn execute(self) -> Result<(), Error> {
        let config = Configuration::from_path(&self.config_path)?;
        Server::from_config(config).await?.run().await
    }
}
