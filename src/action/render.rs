use docket::service::server::{Configuration, Error};
use docket_engine::DocumentProvider;

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
    /// Pretty prints the document.
    #[clap(short, long)]
    pub pretty: bool,
    /// Name of the document to print.
    pub name: String,
}

impl Action {
    pub(crate) async fn execute(self) -> Result<(), Error> {
        let config = Configuration::from_path(&self.config_path)?;
        let generator = config.generator().await?;
        let document = generator
            .get_document(&self.name, None, None)
            .inspect_err(|_| {
                let names = generator.document_names().collect::<Vec<_>>();
                tracing::debug!("available documents: {names:?}");
            })?;
        let output = if self.pretty {
            serde_json::to_string_pretty(&document)?
        } else {
            serde_json::to_string(&document)?
        };
        println!("{output}");
        Ok(())
    }
}
