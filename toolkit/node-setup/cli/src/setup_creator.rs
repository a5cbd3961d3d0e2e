//! Deployment files generated from the setup templates.
//!
//! Templates are looked up as `<templates>/chain/<network alias>.json` and
//! `<templates>/<node type>/<file name>`. Output files are written to the output
//! directory, replacing files left by a previous run.

use crate::cmd_traits::SetupCreator;
use crate::io::IOContext;
use anyhow::{Context, anyhow};
use log::debug;
use node_setup_domain::{Address, NodeType, Password, PrivateKey, WalletBlob};

pub const PASSWORD_FILE: &str = "password.pwds";
pub const KEY_FILE: &str = "keyfile";
pub const CHAIN_FILE: &str = "chain.json";
pub const PARITY_CONFIG_FILE: &str = "parity_config.toml";
pub const DOCKER_COMPOSE_FILE: &str = "docker-compose.yml";

pub const ADDRESS_PLACEHOLDER: &str = "<TYPE_YOUR_ADDRESS_HERE>";
pub const PRIVATE_KEY_PLACEHOLDER: &str = "<TYPE_YOUR_PRIVATE_KEY_HERE>";
pub const WEB3_RPC_PLACEHOLDER: &str = "<TYPE_YOUR_WEB3_RPC_HERE>";
pub const HEAD_CONTRACT_ADDRESS_PLACEHOLDER: &str = "<TYPE_YOUR_HEAD_CONTRACT_ADDRESS_HERE>";
pub const NETWORK_NAME_PLACEHOLDER: &str = "<TYPE_YOUR_NETWORK_NAME_HERE>";

pub struct FileSetupCreator<'a, C> {
	context: &'a C,
	templates_directory: String,
	output_directory: String,
}

impl<'a, C: IOContext> FileSetupCreator<'a, C> {
	pub fn new(
		context: &'a C,
		templates_directory: impl Into<String>,
		output_directory: impl Into<String>,
	) -> Self {
		Self {
			context,
			templates_directory: templates_directory.into(),
			output_directory: output_directory.into(),
		}
	}

	pub fn output_path(&self, file_name: &str) -> String {
		format!("{}/{file_name}", self.output_directory)
	}

	/// Fails for aliases that would point outside of `<templates>/chain`
	fn chain_template_path(&self, network_alias: &str) -> anyhow::Result<String> {
		if network_alias.is_empty() ||
			network_alias.contains(['/', '\\']) ||
			network_alias.contains("..")
		{
			return Err(anyhow!("'{network_alias}' is not a valid network alias"));
		}
		Ok(format!("{}/chain/{network_alias}.json", self.templates_directory))
	}

	fn node_template_path(&self, node_type: NodeType, file_name: &str) -> String {
		format!("{}/{node_type}/{file_name}", self.templates_directory)
	}

	fn read_template(&self, path: &str) -> anyhow::Result<String> {
		self.context.read_file(path).ok_or_else(|| anyhow!("Setup template {path} is missing"))
	}

	fn write_output(&self, file_name: &str, content: &str) -> anyhow::Result<()> {
		self.context.create_dir_all(&self.output_directory)?;
		let path = self.output_path(file_name);
		self.context.write_file(&path, content)?;
		debug!("Wrote {path}");
		Ok(())
	}
}

impl<C: IOContext> SetupCreator for FileSetupCreator<'_, C> {
	async fn create_password_file(&self, password: &Password) -> anyhow::Result<()> {
		self.write_output(PASSWORD_FILE, password.as_str())
	}

	async fn create_key_file(&self, encrypted_wallet: &WalletBlob) -> anyhow::Result<()> {
		self.write_output(KEY_FILE, encrypted_wallet.as_str())
	}

	async fn copy_chain_json(&self, network_alias: &str) -> anyhow::Result<String> {
		let template_path = self.chain_template_path(network_alias)?;
		let chain_spec = self.read_template(&template_path)?;
		let chain_json: serde_json::Value = serde_json::from_str(&chain_spec)
			.with_context(|| format!("Chain template {template_path} is not valid JSON"))?;
		let network_name = chain_json
			.get("name")
			.and_then(serde_json::Value::as_str)
			.ok_or_else(|| anyhow!("Chain template {template_path} does not declare a chain name"))?
			.to_string();
		self.write_output(CHAIN_FILE, &chain_spec)?;
		Ok(network_name)
	}

	async fn copy_parity_configuration(
		&self,
		node_type: NodeType,
		address: &Address,
	) -> anyhow::Result<()> {
		let template = self.read_template(&self.node_template_path(node_type, PARITY_CONFIG_FILE))?;
		self.write_output(PARITY_CONFIG_FILE, &template.replace(ADDRESS_PLACEHOLDER, address.as_str()))
	}

	async fn prepare_docker_compose_file(
		&self,
		node_type: NodeType,
		private_key: &PrivateKey,
		web3_rpc: &str,
		head_contract_address: &str,
		network_name: &str,
	) -> anyhow::Result<()> {
		let template =
			self.read_template(&self.node_template_path(node_type, DOCKER_COMPOSE_FILE))?;
		let docker_compose = template
			.replace(PRIVATE_KEY_PLACEHOLDER, private_key.as_str())
			.replace(WEB3_RPC_PLACEHOLDER, web3_rpc)
			.replace(HEAD_CONTRACT_ADDRESS_PLACEHOLDER, head_contract_address)
			.replace(NETWORK_NAME_PLACEHOLDER, network_name);
		self.write_output(DOCKER_COMPOSE_FILE, &docker_compose)
	}
}
