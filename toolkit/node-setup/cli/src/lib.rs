//! Provides wizard style CLI for onboarding a network node: selecting the network, the
//! node identity and role, and preparing the files needed to run the node.
//! The configuration is kept in a JSON state file and handled by [`state_model::StateModel`].

pub mod change_url;
pub mod cmd_traits;
pub mod config;
pub mod crypto;
pub mod io;
pub mod network;
pub mod onboard;
pub mod prepare_setup;
pub mod setup_creator;
pub mod show_submission;
pub mod state_model;
pub mod store;

#[cfg(test)]
mod tests;

use anyhow::{Context, anyhow};
use clap::Parser;
use config::WizardResources;
use io::*;
use log4rs::{
	append::{console::ConsoleAppender, file::FileAppender},
	config::Appender,
};
use setup_creator::FileSetupCreator;
use state_model::{PreparedSetup, StateError, StateModel};
use store::ContextStore;

#[derive(Clone, Debug, Parser)]
#[command(
    after_long_help = HELP_EXAMPLES,
)]
pub enum Command {
	/// Wizard selecting the network, the node identity, the role and the operator details, then preparing the files needed to run the node.
	Onboard(onboard::OnboardCmd),
	/// Prepares the files needed to run the node from the stored configuration (see `onboard`). Files written by a previous run are replaced.
	PrepareSetup(prepare_setup::PrepareSetupCmd),
	/// Prints the registration submission of the node (network, address, role, URL and e-mail) as JSON.
	ShowSubmission(show_submission::ShowSubmissionCmd),
	/// Changes the stored public URL of the node.
	ChangeUrl(change_url::ChangeUrlCmd),
}

pub trait CmdRun {
	fn run<C: IOContext>(&self, context: &C) -> anyhow::Result<()>;
}

pub fn run(command: Command) -> anyhow::Result<()> {
	let log_config = log4rs::config::Config::builder()
		.appender(Appender::builder().build("stdout", Box::new(ConsoleAppender::builder().build())))
		.appender(
			Appender::builder()
				.build("wizard-log", Box::new(FileAppender::builder().build("node_setup.log")?)),
		)
		.logger(
			log4rs::config::Logger::builder()
				.appender("wizard-log")
				.additive(false)
				.build("node_setup_cli", log::LevelFilter::Debug),
		)
		.build(log4rs::config::Root::builder().appender("stdout").build(log::LevelFilter::Info))?;
	log4rs::init_config(log_config)?;
	match command {
		Command::Onboard(cmd) => cmd.run(&DefaultCmdRunContext)?,
		Command::PrepareSetup(cmd) => cmd.run(&DefaultCmdRunContext)?,
		Command::ShowSubmission(cmd) => cmd.run(&DefaultCmdRunContext)?,
		Command::ChangeUrl(cmd) => cmd.run(&DefaultCmdRunContext)?,
	}
	Ok(())
}

pub(crate) type ContextStateModel<'a, C> =
	StateModel<ContextStore<'a, C>, <C as IOContext>::Identity, FileSetupCreator<'a, C>>;

/// State model persisting to the state file and writing to the output directory of `resources`
pub(crate) fn state_model<'a, C: IOContext>(
	context: &'a C,
	resources: &WizardResources,
) -> ContextStateModel<'a, C> {
	StateModel::new(
		ContextStore::new(context, &resources.state_file),
		context.identity_provider(),
		FileSetupCreator::new(context, &resources.templates_directory, &resources.output_directory),
	)
}

pub(crate) fn runtime() -> anyhow::Result<tokio::runtime::Runtime> {
	tokio::runtime::Builder::new_current_thread()
		.enable_all()
		.build()
		.context("Failed to start async runtime")
}

/// Points the operator to `onboard` when the stored configuration is incomplete.
pub(crate) fn onboarding_required(err: StateError) -> anyhow::Error {
	if err.is_invalid_state() {
		anyhow!("{err}. Run the `onboard` wizard first.")
	} else {
		err.into()
	}
}

pub(crate) fn print_prepared_setup<C: IOContext>(
	context: &C,
	prepared: &PreparedSetup,
	resources: &WizardResources,
) {
	let PreparedSetup { node_type, network_name, address, keystore_created } = prepared;
	let output_directory = &resources.output_directory;
	context.eprint(&format!(
		"🗂️ Setup files for the {node_type} node {address} on {network_name} were written to {output_directory}",
	));
	if *keystore_created {
		context.eprint(&format!(
			"🔐 The keystore password is stored in {output_directory}/{}, keep it safe",
			setup_creator::PASSWORD_FILE
		));
	}
	context.eprint(&format!("Start the node by running `docker compose up -d` in {output_directory}"));
}

const HELP_EXAMPLES: &str = r#"
╔════════════════════════════════════════════════════════════════════════════════╗
║                              Typical usage                                     ║
╠════════════════════════════════════════════════════════════════════════════════╣
║   1. onboard         : select network, identity and role, prepare node files   ║
║   2. show-submission : print the data used to register the node                ║
║   3. prepare-setup   : regenerate node files after changing templates          ║
║   4. change-url      : update the public URL of the node                       ║
║                                                                                ║
║   Note: all commands read node-setup-resources-config.json from the working    ║
║         directory and ask for missing locations (state file, templates,        ║
║         network registry and output directory).                                ║
╚════════════════════════════════════════════════════════════════════════════════╝
"#;
