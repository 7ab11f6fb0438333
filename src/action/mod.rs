use docket::service::server::Error;

mod render;
mod serve;

#[derive(clap::Subcommand)]
pub(crate) enum Action {
    /// Run the docket server
    Serve(serve::Action),
    /// Prints a document of the catalog
    Render(render::Action),
}

impl Action {
    pub(crate) async fn execute(self) -> Result<(), Error> {
        match self {
            Self::Serve(inner) => inner.execute().await,
            Self::Render(inner) => inner.execute().await,
        }
    }
}
