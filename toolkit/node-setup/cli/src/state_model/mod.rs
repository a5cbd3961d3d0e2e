//! Persistent node configuration and the two operations built on top of it:
//! assembling the registration submission and preparing the deployment files.
//!
//! [StateModel] owns no data itself. Every field lives in the [Store], addresses are
//! always derived from the stored private key by the [IdentityProvider], and files are
//! written by the [SetupCreator].

use crate::cmd_traits::{IdentityProvider, SetupCreator, Store};
use log::{debug, info};
use node_setup_domain::{
	Address, MissingFieldError, NetworkConfig, NodeType, ParseRoleError, PrivateKey, Role,
	RoleDescriptor, Stored, Submission,
};


/// Keys under which the configuration fields are persisted
pub mod keys {
	pub const NETWORK: &str = "network";
	pub const PRIVATE_KEY: &str = "privateKey";
	pub const ROLE: &str = "role";
	pub const URL: &str = "url";
	pub const EMAIL: &str = "email";
}

#[derive(Debug, thiserror::Error)]
pub enum StateError {
	#[error("{0} is not configured yet")]
	MissingField(&'static str),
	#[error("Invalid role stored: '{0}'")]
	InvalidRole(String),
	#[error(transparent)]
	External(#[from] anyhow::Error),
}

impl StateError {
	/// True when the stored configuration itself does not allow the operation,
	/// as opposed to a failure of the store, the identity provider or the file writer.
	pub fn is_invalid_state(&self) -> bool {
		!matches!(self, StateError::External(_))
	}
}

impl From<MissingFieldError> for StateError {
	fn from(MissingFieldError(field): MissingFieldError) -> Self {
		StateError::MissingField(field)
	}
}

impl From<ParseRoleError> for StateError {
	fn from(ParseRoleError(role): ParseRoleError) -> Self {
		StateError::InvalidRole(role)
	}
}

/// Summary of a successful [StateModel::prepare_setup_files] run.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct PreparedSetup {
	pub node_type: NodeType,
	pub network_name: String,
	pub address: Address,
	pub keystore_created: bool,
}

pub struct StateModel<S, P, W> {
	store: S,
	crypto: P,
	setup_creator: W,
}

impl<S: Store, P: IdentityProvider, W: SetupCreator> StateModel<S, P, W> {
	pub fn new(store: S, crypto: P, setup_creator: W) -> Self {
		Self { store, crypto, setup_creator }
	}

	pub async fn get_network(&self) -> Result<Stored<NetworkConfig>, StateError> {
		Ok(self.store.safe_read(keys::NETWORK).await?)
	}

	pub async fn store_network(&self, network: &NetworkConfig) -> Result<(), StateError> {
		Ok(self.store.write(keys::NETWORK, network).await?)
	}

	/// Generates a new private key and stores it, replacing any existing one.
	/// Callers must confirm with the operator before overwriting an identity.
	pub async fn generate_and_store_new_private_key(&self) -> Result<PrivateKey, StateError> {
		let private_key = self.crypto.generate_private_key().await?;
		self.store_private_key(&private_key).await?;
		debug!("New private key generated and stored");
		Ok(private_key)
	}

	pub async fn get_existing_private_key(&self) -> Result<Stored<PrivateKey>, StateError> {
		Ok(self.store.safe_read(keys::PRIVATE_KEY).await?)
	}

	pub async fn store_private_key(&self, private_key: &PrivateKey) -> Result<(), StateError> {
		Ok(self.store.write(keys::PRIVATE_KEY, private_key).await?)
	}

	/// Derives the address of the stored private key. The address itself is never stored.
	pub async fn get_existing_address(&self) -> Result<Stored<Address>, StateError> {
		match self.get_existing_private_key().await? {
			Stored::Present(private_key) => {
				Ok(Stored::Present(self.crypto.address_for_private_key(&private_key).await?))
			},
			Stored::Absent => Ok(Stored::Absent),
		}
	}

	/// Fails with [StateError::InvalidRole] if the stored value is not a known role.
	pub async fn get_role(&self) -> Result<Stored<Role>, StateError> {
		match self.store.safe_read::<serde_json::Value>(keys::ROLE).await? {
			Stored::Present(serde_json::Value::String(role)) => Ok(Stored::Present(role.parse()?)),
			Stored::Present(other) => Err(StateError::InvalidRole(other.to_string())),
			Stored::Absent => Ok(Stored::Absent),
		}
	}

	pub async fn store_role(&self, role: Role) -> Result<(), StateError> {
		Ok(self.store.write(keys::ROLE, &role).await?)
	}

	pub async fn get_node_url(&self) -> Result<Stored<String>, StateError> {
		Ok(self.store.safe_read(keys::URL).await?)
	}

	pub async fn store_node_url(&self, url: &str) -> Result<(), StateError> {
		Ok(self.store.write(keys::URL, &url).await?)
	}

	pub async fn get_user_email(&self) -> Result<Stored<String>, StateError> {
		Ok(self.store.safe_read(keys::EMAIL).await?)
	}

	pub async fn store_user_email(&self, email: &str) -> Result<(), StateError> {
		Ok(self.store.write(keys::EMAIL, &email).await?)
	}

	/// Read-only snapshot of the configuration. Requires the private key and the network.
	pub async fn assemble_submission(&self) -> Result<Submission, StateError> {
		let private_key = self.get_existing_private_key().await?.required(keys::PRIVATE_KEY)?;
		let network = self.get_network().await?.required(keys::NETWORK)?;
		Ok(Submission {
			network: network.name,
			address: self.crypto.address_for_private_key(&private_key).await?,
			role: self.get_role().await?.into_option(),
			url: self.get_node_url().await?.into_option(),
			email: self.get_user_email().await?.into_option(),
		})
	}

	/// Writes the deployment files required by the stored role.
	///
	/// Role, private key and network are all checked before the first file is written.
	/// A failure after that point leaves already written files in place. Running it again
	/// overwrites every file, including a freshly generated keystore and password.
	pub async fn prepare_setup_files(&self) -> Result<PreparedSetup, StateError> {
		let role = self.get_role().await?.required(keys::ROLE)?;
		let RoleDescriptor { node_type, requires_keystore } = role.descriptor();
		let private_key = self.get_existing_private_key().await?.required(keys::PRIVATE_KEY)?;
		let NetworkConfig { name: network_alias, rpc, head_contract_address } =
			self.get_network().await?.required(keys::NETWORK)?;
		info!("Preparing setup files for {role} ({node_type} node) on network {network_alias}");

		if requires_keystore {
			let password = self.crypto.get_random_password().await?;
			self.setup_creator.create_password_file(&password).await?;

			let encrypted_wallet = self.crypto.get_encrypted_wallet(&private_key, &password).await?;
			self.setup_creator.create_key_file(&encrypted_wallet).await?;
			debug!("Keystore and password files written");
		}

		let network_name = self.setup_creator.copy_chain_json(&network_alias).await?;
		debug!("Chain specification for {network_alias} copied, chain name: {network_name}");

		let address = self.crypto.address_for_private_key(&private_key).await?;
		self.setup_creator.copy_parity_configuration(node_type, &address).await?;

		self.setup_creator
			.prepare_docker_compose_file(
				node_type,
				&private_key,
				&rpc,
				&head_contract_address,
				&network_name,
			)
			.await?;
		info!("Setup files for {address} prepared");

		Ok(PreparedSetup { node_type, network_name, address, keystore_created: requires_keystore })
	}
}
