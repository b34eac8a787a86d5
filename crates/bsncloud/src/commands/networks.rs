//! Network (tenant) command handlers.

use tabled::Tabled;

use bsncloud_api::models::Network;
use bsncloud_api::{BsnClient, CancellationToken};

use crate::cli::{GlobalOpts, NetworksArgs, NetworksCommand};
use crate::error::CliError;
use crate::output;

#[derive(Tabled)]
struct NetworkRow {
    #[tabled(rename = "ID")]
    id: String,
    #[tabled(rename = "Name")]
    name: String,
}

impl From<&Network> for NetworkRow {
    fn from(n: &Network) -> Self {
        Self {
            id: output::or_dash(&n.id).to_owned(),
            name: n.name.clone(),
        }
    }
}

pub async fn handle(
    client: &BsnClient,
    cancel: &CancellationToken,
    args: NetworksArgs,
    global: &GlobalOpts,
) -> Result<(), CliError> {
    match args.command {
        NetworksCommand::List => {
            let networks = client.list_networks_cancellable(cancel).await?;
            let out = output::render_list(&global.output, &networks, |n| NetworkRow::from(n), |n| {
                n.name.clone()
            })?;
            output::print_output(&out, global.quiet);
            Ok(())
        }
    }
}
