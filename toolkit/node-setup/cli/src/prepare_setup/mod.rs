use crate::config::WizardResources;
use crate::io::IOContext;
use crate::*;


#[derive(Clone, Debug, clap::Parser)]
pub struct PrepareSetupCmd {}

impl CmdRun for PrepareSetupCmd {
	fn run<C: IOContext>(&self, context: &C) -> anyhow::Result<()> {
		let resources = WizardResources::load(context)?;
		context.enewline();

		let model = state_model(context, &resources);
		let prepared =
			runtime()?.block_on(model.prepare_setup_files()).map_err(onboarding_required)?;
		print_prepared_setup(context, &prepared, &resources);
		Ok(())
	}
}
