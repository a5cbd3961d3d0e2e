use crate::cmd_traits::NetworkRegistry;
use crate::io::IOContext;
use anyhow::{Context, anyhow};
use node_setup_domain::NetworkConfig;
use serde::Deserialize;
use std::collections::BTreeMap;

#[derive(Deserialize)]
#[serde(rename_all = "camelCase")]
struct NetworkEntry {
	rpc: String,
	head_contract_address: String,
}

/// [NetworkRegistry] read from a JSON file of the form
/// `{ "<alias>": { "rpc": "...", "headContractAddress": "..." } }`.
pub struct FileNetworkRegistry<'a, C> {
	context: &'a C,
	path: String,
}

impl<'a, C: IOContext> FileNetworkRegistry<'a, C> {
	pub fn new(context: &'a C, path: impl Into<String>) -> Self {
		Self { context, path: path.into() }
	}

	fn load(&self) -> anyhow::Result<BTreeMap<String, NetworkEntry>> {
		let content = self
			.context
			.read_file(&self.path)
			.ok_or_else(|| anyhow!("Network registry file {} does not exist", self.path))?;
		serde_json::from_str(&content)
			.with_context(|| format!("Network registry file {} is invalid", self.path))
	}
}

impl<C: IOContext> NetworkRegistry for FileNetworkRegistry<'_, C> {
	async fn aliases(&self) -> anyhow::Result<Vec<String>> {
		Ok(self.load()?.into_keys().collect())
	}

	async fn resolve(&self, alias: &str) -> anyhow::Result<NetworkConfig> {
		let mut networks = self.load()?;
		let NetworkEntry { rpc, head_contract_address } =
			networks.remove(alias).ok_or_else(|| {
				let known: Vec<&str> = networks.keys().map(String::as_str).collect();
				anyhow!("Unknown network '{alias}'. Known networks: {}", known.join(", "))
			})?;
		Ok(NetworkConfig { name: alias.to_string(), rpc, head_contract_address })
	}
}
