use crate::cmd_traits::{IdentityProvider, NetworkRegistry, SetupCreator, Store};
use crate::config::WizardResources;
use crate::io::IOContext;
use crate::network::FileNetworkRegistry;
use crate::state_model::{StateModel, keys};
use crate::*;
use anyhow::anyhow;
use node_setup_domain::{Address, NetworkConfig, PrivateKey, Role, Stored};


#[derive(Clone, Debug, clap::Parser)]
pub struct OnboardCmd {}

pub const KEEP_KEY: &str = "keep the existing private key";
pub const GENERATE_KEY: &str = "generate a new private key";
pub const IMPORT_KEY: &str = "import a private key";

impl CmdRun for OnboardCmd {
	fn run<C: IOContext>(&self, context: &C) -> anyhow::Result<()> {
		context.eprint("This 🧙 wizard will configure your node and prepare the files needed to run it:");
		context.eprint("→  the network the node joins");
		context.eprint("→  the node identity (private key and address)");
		context.eprint("→  the node role, its public URL and your contact e-mail");
		context.enewline();

		let resources = WizardResources::load(context)?;
		context.enewline();

		let model = state_model(context, &resources);
		let registry = FileNetworkRegistry::new(context, &resources.networks_file);
		runtime()?.block_on(onboard(context, &model, &registry, &resources))?;

		context.eprint("🚀 All done!");
		Ok(())
	}
}

async fn onboard<C, S, P, W, R>(
	context: &C,
	model: &StateModel<S, P, W>,
	registry: &R,
	resources: &WizardResources,
) -> anyhow::Result<()>
where
	C: IOContext,
	S: Store,
	P: IdentityProvider,
	W: SetupCreator,
	R: NetworkRegistry,
{
	let network = select_network(context, model, registry).await?;
	context.eprint(&format!("🌐 Network {} selected, RPC endpoint: {}", network.name, network.rpc));
	context.enewline();

	let address = establish_identity(context, model).await?;
	context.eprint(&format!("🔑 Node address: {address}"));
	context.enewline();

	let role = select_role(context, model).await?;
	model.store_role(role).await?;

	let stored_url = model.get_node_url().await?;
	let url = prompt_node_url(context, stored_url.as_ref().into_option().map(String::as_str));
	model.store_node_url(&url).await?;

	let stored_email = model.get_user_email().await?;
	let email = prompt_user_email(context, stored_email.as_ref().into_option().map(String::as_str));
	model.store_user_email(&email).await?;
	context.enewline();

	let submission = model.assemble_submission().await?;
	context.eprint("📝 Your node submission:");
	context.print(&serde_json::to_string_pretty(&submission)?);
	context.enewline();

	let prepared = model.prepare_setup_files().await?;
	print_prepared_setup(context, &prepared, resources);
	Ok(())
}

/// Offers the registry networks, the stored network first.
async fn select_network<C, S, P, W, R>(
	context: &C,
	model: &StateModel<S, P, W>,
	registry: &R,
) -> anyhow::Result<NetworkConfig>
where
	C: IOContext,
	S: Store,
	P: IdentityProvider,
	W: SetupCreator,
	R: NetworkRegistry,
{
	let mut aliases = registry.aliases().await?;
	if aliases.is_empty() {
		return Err(anyhow!("The network registry does not define any network"));
	}
	if let Stored::Present(stored) = model.get_network().await? {
		if let Some(position) = aliases.iter().position(|alias| *alias == stored.name) {
			let stored_alias = aliases.remove(position);
			aliases.insert(0, stored_alias);
		}
	}
	let alias = context.prompt_multi_option("Select the network your node joins", aliases);
	let network = registry.resolve(&alias).await?;
	model.store_network(&network).await?;
	Ok(network)
}

async fn establish_identity<C, S, P, W>(
	context: &C,
	model: &StateModel<S, P, W>,
) -> anyhow::Result<Address>
where
	C: IOContext,
	S: Store,
	P: IdentityProvider,
	W: SetupCreator,
{
	let choice = match usable_address(context, model).await? {
		Some(address) => {
			context.eprint(&format!("A private key is already configured, its address is {address}"));
			let choice = context.prompt_multi_option(
				"What do you want to do with the existing private key?",
				vec![KEEP_KEY.to_string(), GENERATE_KEY.to_string(), IMPORT_KEY.to_string()],
			);
			if choice == KEEP_KEY {
				return Ok(address);
			}
			if !context.prompt_yes_no(
				"Replacing the private key changes the node address. Do you want to continue?",
				false,
			) {
				context.eprint("Keeping the existing private key");
				return Ok(address);
			}
			choice
		},
		None => context.prompt_multi_option(
			"No private key is configured. How do you want to set it up?",
			vec![GENERATE_KEY.to_string(), IMPORT_KEY.to_string()],
		),
	};

	if choice == GENERATE_KEY {
		model.generate_and_store_new_private_key().await?;
		context.eprint("A new private key was generated");
	} else {
		model.store_private_key(&prompt_private_key(context).await).await?;
	}
	Ok(model.get_existing_address().await?.required(keys::PRIVATE_KEY)?)
}

/// Address of the stored private key. A stored key the identity provider rejects is
/// reported and treated as absent, so that it can be replaced.
async fn usable_address<C, S, P, W>(
	context: &C,
	model: &StateModel<S, P, W>,
) -> anyhow::Result<Option<Address>>
where
	C: IOContext,
	S: Store,
	P: IdentityProvider,
	W: SetupCreator,
{
	if !model.get_existing_private_key().await?.is_present() {
		return Ok(None);
	}
	match model.get_existing_address().await {
		Ok(address) => Ok(address.into_option()),
		Err(err) => {
			context.eprint(&format!("⚠️ The stored private key cannot be used: {err}"));
			Ok(None)
		},
	}
}

/// Offers every role, the stored one first. An unreadable stored role is replaced.
async fn select_role<C, S, P, W>(context: &C, model: &StateModel<S, P, W>) -> anyhow::Result<Role>
where
	C: IOContext,
	S: Store,
	P: IdentityProvider,
	W: SetupCreator,
{
	let stored = match model.get_role().await {
		Ok(stored) => stored.into_option(),
		Err(err) if err.is_invalid_state() => {
			context.eprint(&format!("⚠️ {err}, please select the role again"));
			None
		},
		Err(err) => return Err(err.into()),
	};
	let mut roles = Role::ALL.to_vec();
	if let Some(stored) = stored {
		roles.retain(|role| *role != stored);
		roles.insert(0, stored);
	}
	let choice = context
		.prompt_multi_option("Select the role of your node", roles.iter().map(role_option).collect());
	roles
		.into_iter()
		.find(|role| role_option(role) == choice)
		.ok_or_else(|| anyhow!("Unknown role selected: {choice}"))
}

fn role_option(role: &Role) -> String {
	format!("{} ({})", role.display_name(), role.node_type())
}

fn is_valid_private_key(private_key: &str) -> bool {
	private_key
		.strip_prefix("0x")
		.is_some_and(|hex| hex.len() == 64 && hex.chars().all(|c| c.is_ascii_hexdigit()))
}

/// Prompts until the key is well formed and accepted by the identity provider.
async fn prompt_private_key<C: IOContext>(context: &C) -> PrivateKey {
	let identity = context.identity_provider();
	loop {
		let private_key = context.prompt("private key (0x followed by 64 hex digits)", None);
		let private_key = private_key.trim();
		if !is_valid_private_key(private_key) {
			context.eprint("⚠️ The private key has to be 0x followed by 64 hex digits");
			continue;
		}
		let private_key = PrivateKey(private_key.to_string());
		match identity.address_for_private_key(&private_key).await {
			Ok(_) => return private_key,
			Err(err) => context.eprint(&format!("⚠️ {err}, please enter another private key")),
		}
	}
}

pub(crate) fn prompt_node_url<C: IOContext>(context: &C, default: Option<&str>) -> String {
	loop {
		let url = context.prompt("public URL of the node", default);
		let url = url.trim();
		if url.starts_with("http://") || url.starts_with("https://") {
			return url.to_string();
		}
		context.eprint("⚠️ The node URL has to start with http:// or https://");
	}
}

fn prompt_user_email<C: IOContext>(context: &C, default: Option<&str>) -> String {
	loop {
		let email = context.prompt("contact e-mail", default);
		let email = email.trim();
		if is_valid_email(email) {
			return email.to_string();
		}
		context.eprint("⚠️ The e-mail address is not valid");
	}
}

fn is_valid_email(email: &str) -> bool {
	email
		.split_once('@')
		.is_some_and(|(user, domain)| !user.is_empty() && domain.contains('.'))
}
