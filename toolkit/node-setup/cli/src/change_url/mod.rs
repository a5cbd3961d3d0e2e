use crate::config::WizardResources;
use crate::io::IOContext;
use crate::onboard::prompt_node_url;
use crate::*;
use colored::Colorize;
use node_setup_domain::Stored;


#[derive(Clone, Debug, clap::Parser)]
pub struct ChangeUrlCmd {}

pub const LOCAL_ONLY_WARNING: &str = "The new URL is stored locally and included in the node submission. The URL registered on chain is not updated by this wizard.";

impl CmdRun for ChangeUrlCmd {
	fn run<C: IOContext>(&self, context: &C) -> anyhow::Result<()> {
		let resources = WizardResources::load(context)?;
		context.enewline();
		context.eprint(&LOCAL_ONLY_WARNING.yellow().to_string());

		let model = state_model(context, &resources);
		let runtime = runtime()?;
		let old_url = match runtime.block_on(model.get_node_url())? {
			Stored::Present(url) => {
				context.eprint(&format!("Current node URL: {url}"));
				Some(url)
			},
			Stored::Absent => {
				context.eprint("No node URL is configured yet");
				None
			},
		};

		let new_url = prompt_node_url(context, old_url.as_deref());
		if old_url.as_deref() == Some(new_url.as_str()) {
			context.eprint("The node URL is unchanged");
			return Ok(());
		}
		let confirmation = match &old_url {
			Some(old_url) => format!("Change the node URL from {old_url} to {new_url}?"),
			None => format!("Set the node URL to {new_url}?"),
		};
		if context.prompt_yes_no(&confirmation, true) {
			runtime.block_on(model.store_node_url(&new_url))?;
			log::info!("Node URL changed to {new_url}");
			context.eprint(&format!("✅ Node URL changed to {new_url}"));
		} else {
			context.eprint("Node URL change cancelled");
		}
		Ok(())
	}
}
