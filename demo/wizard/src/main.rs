use clap::Parser;

fn main() -> anyhow::Result<()> {
	node_setup_cli::run(node_setup_cli::Command::parse())
}
