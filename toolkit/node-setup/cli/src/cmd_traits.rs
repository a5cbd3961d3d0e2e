use node_setup_domain::{
	Address, NetworkConfig, NodeType, Password, PrivateKey, Stored, WalletBlob,
};
use serde::{Serialize, de::DeserializeOwned};

/// Durable key-value storage of the node configuration.
pub trait Store {
	/// Checks if a value was ever written under `key`.
	#[allow(async_fn_in_trait)]
	async fn exists(&self, key: &str) -> anyhow::Result<bool>;

	/// Reads the value under `key`. Fails if there is none.
	#[allow(async_fn_in_trait)]
	async fn read<T: DeserializeOwned>(&self, key: &str) -> anyhow::Result<T>;

	/// Overwrites the value under `key`.
	#[allow(async_fn_in_trait)]
	async fn write<T: Serialize>(&self, key: &str, value: &T) -> anyhow::Result<()>;

	/// Reads the value under `key`, returning [Stored::Absent] if there is none.
	#[allow(async_fn_in_trait)]
	async fn safe_read<T: DeserializeOwned>(&self, key: &str) -> anyhow::Result<Stored<T>> {
		if self.exists(key).await? {
			Ok(Stored::Present(self.read(key).await?))
		} else {
			Ok(Stored::Absent)
		}
	}
}

/// Generates and derives node identities.
pub trait IdentityProvider {
	/// Generates a fresh random private key.
	#[allow(async_fn_in_trait)]
	async fn generate_private_key(&self) -> anyhow::Result<PrivateKey>;

	/// Derives the address of `private_key`. Same key always gives the same address.
	#[allow(async_fn_in_trait)]
	async fn address_for_private_key(&self, private_key: &PrivateKey) -> anyhow::Result<Address>;

	/// Generates a random keystore password.
	#[allow(async_fn_in_trait)]
	async fn get_random_password(&self) -> anyhow::Result<Password>;

	/// Encrypts `private_key` under `password` into a keystore document.
	#[allow(async_fn_in_trait)]
	async fn get_encrypted_wallet(
		&self,
		private_key: &PrivateKey,
		password: &Password,
	) -> anyhow::Result<WalletBlob>;
}

/// Materializes the deployment files of a node.
pub trait SetupCreator {
	/// Writes the keystore password file.
	#[allow(async_fn_in_trait)]
	async fn create_password_file(&self, password: &Password) -> anyhow::Result<()>;

	/// Writes the encrypted keystore file.
	#[allow(async_fn_in_trait)]
	async fn create_key_file(&self, encrypted_wallet: &WalletBlob) -> anyhow::Result<()>;

	/// Copies the chain specification of `network_alias`, returning the chain name it declares.
	#[allow(async_fn_in_trait)]
	async fn copy_chain_json(&self, network_alias: &str) -> anyhow::Result<String>;

	/// Writes the client configuration for `node_type`, bound to `address`.
	#[allow(async_fn_in_trait)]
	async fn copy_parity_configuration(
		&self,
		node_type: NodeType,
		address: &Address,
	) -> anyhow::Result<()>;

	/// Writes the docker compose file used to start the node.
	#[allow(async_fn_in_trait)]
	async fn prepare_docker_compose_file(
		&self,
		node_type: NodeType,
		private_key: &PrivateKey,
		web3_rpc: &str,
		head_contract_address: &str,
		network_name: &str,
	) -> anyhow::Result<()>;
}

/// Maps network aliases to network parameters.
pub trait NetworkRegistry {
	/// Lists known network aliases.
	#[allow(async_fn_in_trait)]
	async fn aliases(&self) -> anyhow::Result<Vec<String>>;

	/// Returns the parameters of the network known as `alias`.
	#[allow(async_fn_in_trait)]
	async fn resolve(&self, alias: &str) -> anyhow::Result<NetworkConfig>;
}
