//! secp256k1 identities with Ethereum conventions: `0x` hex private keys, EIP-55
//! checksummed addresses and JSON v3 keystores.

use crate::cmd_traits::IdentityProvider;
use alloy_primitives::B256;
use alloy_signer_local::PrivateKeySigner;
use anyhow::{Context, anyhow};
use node_setup_domain::{Address, Password, PrivateKey, WalletBlob};
use rand::{Rng, distr::Alphanumeric};

pub const PASSWORD_LENGTH: usize = 32;

const KEYSTORE_FILE_NAME: &str = "keystore";

#[derive(Clone, Copy, Debug, Default)]
pub struct Crypto;

impl Crypto {
	fn signer(private_key: &PrivateKey) -> anyhow::Result<PrivateKeySigner> {
		let bytes: B256 = private_key.as_str().parse().context("Private key is not valid hex")?;
		PrivateKeySigner::from_bytes(&bytes).map_err(|err| anyhow!("Invalid private key: {err}"))
	}
}

impl IdentityProvider for Crypto {
	async fn generate_private_key(&self) -> anyhow::Result<PrivateKey> {
		let signer = PrivateKeySigner::random();
		Ok(PrivateKey(format!("0x{}", hex::encode(signer.to_bytes()))))
	}

	async fn address_for_private_key(&self, private_key: &PrivateKey) -> anyhow::Result<Address> {
		Ok(Address(Self::signer(private_key)?.address().to_checksum(None)))
	}

	async fn get_random_password(&self) -> anyhow::Result<Password> {
		let password = rand::rng()
			.sample_iter(Alphanumeric)
			.take(PASSWORD_LENGTH)
			.map(char::from)
			.collect();
		Ok(Password(password))
	}

	async fn get_encrypted_wallet(
		&self,
		private_key: &PrivateKey,
		password: &Password,
	) -> anyhow::Result<WalletBlob> {
		let signer = Self::signer(private_key)?;
		// alloy only writes keystores to disk, the blob is read back from a scratch directory
		let keystore_dir =
			tempfile::TempDir::new().context("Failed to create temporary keystore directory")?;
		PrivateKeySigner::encrypt_keystore(
			keystore_dir.path(),
			&mut rand_08::thread_rng(),
			signer.to_bytes(),
			password.as_str(),
			Some(KEYSTORE_FILE_NAME),
		)
		.map_err(|err| anyhow!("Failed to encrypt private key: {err}"))?;
		let keystore = std::fs::read_to_string(keystore_dir.path().join(KEYSTORE_FILE_NAME))
			.context("Failed to read encrypted keystore")?;
		Ok(WalletBlob(keystore))
	}
}
