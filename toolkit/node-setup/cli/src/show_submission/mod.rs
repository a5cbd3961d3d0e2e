use crate::config::WizardResources;
use crate::io::IOContext;
use crate::*;

#[cfg(test)]
mod tests;

#[derive(Clone, Debug, clap::Parser)]
pub struct ShowSubmissionCmd {}

impl CmdRun for ShowSubmissionCmd {
	fn run<C: IOContext>(&self, context: &C) -> anyhow::Result<()> {
		let resources = WizardResources::load(context)?;
		context.enewline();

		let model = state_model(context, &resources);
		let submission =
			runtime()?.block_on(model.assemble_submission()).map_err(onboarding_required)?;
		context.print(&serde_json::to_string_pretty(&submission)?);
		Ok(())
	}
}
