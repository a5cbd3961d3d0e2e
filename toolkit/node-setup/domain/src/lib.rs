//! # Node setup domain types
//!
//! This crate defines the values the node setup wizard persists, derives and hands over
//! to the artifact writer: node roles and their node types, network parameters, and the
//! pieces of a node identity.

#![deny(missing_docs)]

mod role;
mod stored;

pub use role::{NodeType, ParseRoleError, Role, RoleDescriptor};
pub use stored::{MissingFieldError, Stored};

use core::fmt::{Debug, Formatter};
use derive_more::{Display, From, Into};
use serde::{Deserialize, Serialize};

/// Parameters of the chain a node is deployed to, as provided by the network registry.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct NetworkConfig {
	/// Network alias. Also selects the chain template used for the node.
	pub name: String,
	/// Web3 RPC endpoint of the network
	pub rpc: String,
	/// Address of the head contract of the network
	pub head_contract_address: String,
}

/// Secret key of the node identity, `0x` prefixed hex.
///
/// `Debug` output never contains the key.
#[derive(Clone, PartialEq, Eq, Hash, Serialize, Deserialize, From, Into)]
#[serde(transparent)]
pub struct PrivateKey(pub String);

impl PrivateKey {
	/// Returns the key as it is written into configuration artifacts
	pub fn as_str(&self) -> &str {
		&self.0
	}
}

impl Debug for PrivateKey {
	fn fmt(&self, f: &mut Formatter<'_>) -> core::fmt::Result {
		f.write_str("PrivateKey(<redacted>)")
	}
}

/// Account address derived from a [PrivateKey].
#[derive(Clone, Debug, PartialEq, Eq, Hash, Serialize, Deserialize, Display, From, Into)]
#[serde(transparent)]
pub struct Address(pub String);

impl Address {
	/// Returns the textual form of the address
	pub fn as_str(&self) -> &str {
		&self.0
	}
}

/// Password protecting an encrypted keystore.
#[derive(Clone, PartialEq, Eq, From, Into)]
pub struct Password(pub String);

impl Password {
	/// Returns the password in plain text
	pub fn as_str(&self) -> &str {
		&self.0
	}
}

impl Debug for Password {
	fn fmt(&self, f: &mut Formatter<'_>) -> core::fmt::Result {
		f.write_str("Password(<redacted>)")
	}
}

/// Private key encrypted under a [Password], serialized as a keystore document.
#[derive(Clone, Debug, PartialEq, Eq, From, Into)]
pub struct WalletBlob(pub String);

impl WalletBlob {
	/// Returns the serialized keystore
	pub fn as_str(&self) -> &str {
		&self.0
	}
}

/// Snapshot of the node configuration used to register the node.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct Submission {
	/// Alias of the selected network
	pub network: String,
	/// Address of the node identity
	pub address: Address,
	/// Selected role, if any
	pub role: Option<Role>,
	/// Public URL of the node, if any
	pub url: Option<String>,
	/// Contact e-mail of the operator, if any
	pub email: Option<String>,
}
