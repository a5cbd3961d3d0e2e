use core::fmt::{Display, Formatter};
use core::str::FromStr;
use serde::{Deserialize, Serialize};

/// Deployment role of a node.
///
/// The three Atlas variants are stake tiers of the same node type. They are stored
/// separately but produce identical setup artifacts.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Role {
	/// Hermes node
	#[serde(rename = "HERMES")]
	Hermes,
	/// Apollo (validator) node
	#[serde(rename = "APOLLO")]
	Apollo,
	/// Atlas node, Zeta stake tier
	#[serde(rename = "ATLAS_1")]
	Atlas1,
	/// Atlas node, Sigma stake tier
	#[serde(rename = "ATLAS_2")]
	Atlas2,
	/// Atlas node, Omega stake tier
	#[serde(rename = "ATLAS_3")]
	Atlas3,
}

/// Artifact generation category of a [Role].
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum NodeType {
	/// Used by [Role::Hermes]
	Hermes,
	/// Used by [Role::Apollo]
	Apollo,
	/// Used by all Atlas tiers
	Atlas,
}

/// Describes which setup artifacts a [Role] needs.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct RoleDescriptor {
	/// Node type used to select templates
	pub node_type: NodeType,
	/// Whether the node needs an encrypted keystore and its password file
	pub requires_keystore: bool,
}

/// Returned when parsing a stored role that is not one of the known values.
#[derive(Clone, Debug, PartialEq, Eq, thiserror::Error)]
#[error("'{0}' is not a valid role, expected one of HERMES, APOLLO, ATLAS_1, ATLAS_2, ATLAS_3")]
pub struct ParseRoleError(pub String);

impl Role {
	/// All roles, in the order they are offered to the operator
	pub const ALL: [Role; 5] = [Role::Hermes, Role::Apollo, Role::Atlas1, Role::Atlas2, Role::Atlas3];

	/// Setup requirements of the role. Adding a role means adding one row here.
	pub const fn descriptor(&self) -> RoleDescriptor {
		use NodeType::*;
		match self {
			Role::Hermes => RoleDescriptor { node_type: Hermes, requires_keystore: false },
			Role::Apollo => RoleDescriptor { node_type: Apollo, requires_keystore: true },
			Role::Atlas1 => RoleDescriptor { node_type: Atlas, requires_keystore: false },
			Role::Atlas2 => RoleDescriptor { node_type: Atlas, requires_keystore: false },
			Role::Atlas3 => RoleDescriptor { node_type: Atlas, requires_keystore: false },
		}
	}

	/// Shorthand for `self.descriptor().node_type`
	pub const fn node_type(&self) -> NodeType {
		self.descriptor().node_type
	}

	/// Persisted form of the role
	pub const fn as_str(&self) -> &'static str {
		match self {
			Role::Hermes => "HERMES",
			Role::Apollo => "APOLLO",
			Role::Atlas1 => "ATLAS_1",
			Role::Atlas2 => "ATLAS_2",
			Role::Atlas3 => "ATLAS_3",
		}
	}

	/// Name shown to the operator
	pub const fn display_name(&self) -> &'static str {
		match self {
			Role::Hermes => "Hermes",
			Role::Apollo => "Apollo",
			Role::Atlas1 => "Atlas Zeta",
			Role::Atlas2 => "Atlas Sigma",
			Role::Atlas3 => "Atlas Omega",
		}
	}
}

impl Display for Role {
	fn fmt(&self, f: &mut Formatter<'_>) -> core::fmt::Result {
		f.write_str(self.as_str())
	}
}

impl FromStr for Role {
	type Err = ParseRoleError;

	fn from_str(s: &str) -> Result<Self, Self::Err> {
		Role::ALL
			.into_iter()
			.find(|role| role.as_str() == s)
			.ok_or_else(|| ParseRoleError(s.to_string()))
	}
}

impl NodeType {
	/// Tag used in template paths
	pub const fn as_str(&self) -> &'static str {
		match self {
			NodeType::Hermes => "hermes",
			NodeType::Apollo => "apollo",
			NodeType::Atlas => "atlas",
		}
	}
}

impl Display for NodeType {
	fn fmt(&self, f: &mut Formatter<'_>) -> core::fmt::Result {
		f.write_str(self.as_str())
	}
}
