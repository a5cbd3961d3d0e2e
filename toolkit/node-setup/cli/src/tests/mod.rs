use crate::config::{RESOURCES_CONFIG_FILE_PATH, WizardResources};
use crate::io::IOContext;
use pretty_assertions::assert_eq;
use std::collections::HashMap;
use std::panic::{UnwindSafe, catch_unwind, resume_unwind};
use std::sync::{Arc, Mutex};


pub use mocks::MockCrypto;

#[derive(Debug)]
#[allow(dead_code)]
pub enum MockIO {
	Print(String),
	EPrint(String),
	Prompt { prompt: String, default: Option<String>, input: String },
	PromptYN { prompt: String, default: bool, choice: bool },
	PromptMultiOption { prompt: String, options: Vec<String>, choice: String },
	Group(Vec<MockIO>),
	WithFileLocation(&'static str, u32, Box<MockIO>),
}

impl MockIO {
	pub fn print_mock_location_on_panic<T>(self, f: impl Fn(MockIO) -> T + UnwindSafe) -> T {
		match self {
			MockIO::WithFileLocation(file, line, io) => {
				let result = catch_unwind(move || f(*io));
				match result {
					Ok(r) => r,
					Err(err) => {
						eprintln!("Mock IO defined at {file}:{line}");
						resume_unwind(err)
					},
				}
			},
			_ => f(self),
		}
	}
}

#[allow(dead_code)]
impl MockIO {
	#[track_caller]
	pub fn print(msg: &str) -> Self {
		Self::Print(msg.into()).with_location()
	}
	#[track_caller]
	pub fn eprint(msg: &str) -> Self {
		Self::EPrint(msg.into()).with_location()
	}
	#[track_caller]
	pub fn enewline() -> Self {
		Self::eprint("")
	}
	#[track_caller]
	pub fn prompt(prompt: &str, default: Option<&str>, input: &str) -> Self {
		Self::Prompt {
			prompt: prompt.into(),
			default: default.map(|s| s.into()),
			input: input.into(),
		}
		.with_location()
	}
	#[track_caller]
	pub fn prompt_yes_no(prompt: &str, default: bool, choice: bool) -> Self {
		Self::PromptYN { prompt: prompt.into(), default, choice }.with_location()
	}
	#[track_caller]
	pub fn prompt_multi_option(prompt: &str, options: Vec<String>, choice: &str) -> Self {
		Self::PromptMultiOption { prompt: prompt.into(), options, choice: choice.into() }
			.with_location()
	}

	#[track_caller]
	fn with_location(self) -> Self {
		let loc = std::panic::Location::caller();
		MockIO::WithFileLocation(loc.file(), loc.line(), Box::new(self))
	}
}

pub struct MockIOContext {
	pub expected_io: Arc<Mutex<Vec<MockIO>>>,
	pub files: Arc<Mutex<HashMap<String, String>>>,
	pub dirs: Arc<Mutex<Vec<String>>>,
	pub identity: MockCrypto,
}

impl MockIOContext {
	pub fn new() -> Self {
		Self {
			expected_io: Default::default(),
			files: Arc::new(Mutex::new(HashMap::default())),
			dirs: Default::default(),
			identity: MockCrypto::default(),
		}
	}
	pub fn with_file(self, path: &str, content: &str) -> Self {
		self.files.lock().unwrap().insert(path.into(), content.into());
		self
	}
	pub fn with_json_file(self, path: &str, content: serde_json::Value) -> Self {
		let content = serde_json::to_string_pretty(&content).unwrap();
		self.with_file(path, &content)
	}
	pub fn with_expected_io(self, mut expected_commands: Vec<MockIO>) -> Self {
		expected_commands.reverse();
		Self {
			expected_io: Arc::new(Mutex::new(expected_commands)),
			files: self.files.clone(),
			dirs: self.dirs.clone(),
			identity: self.identity.clone(),
		}
	}
	pub fn with_identity(self, identity: MockCrypto) -> Self {
		Self {
			expected_io: self.expected_io.clone(),
			files: self.files.clone(),
			dirs: self.dirs.clone(),
			identity,
		}
	}
	pub fn file_content(&self, path: &str) -> Option<String> {
		self.files.lock().unwrap().get(path).cloned()
	}
	pub fn created_dirs(&self) -> Vec<String> {
		self.dirs.lock().unwrap().clone()
	}
	pub fn pop_next_action(&self, description: &str) -> MockIO {
		let next = self.expected_io.lock().unwrap().pop();
		match next {
			Some(MockIO::Group(mut group)) => {
				group.reverse();
				self.expected_io.lock().unwrap().append(&mut group);
				self.pop_next_action(description)
			},
			Some(other) => other,
			None => panic!("No more IO expected, but {description} called"),
		}
	}
}

impl Drop for MockIOContext {
	fn drop(&mut self) {
		if std::thread::panicking() {
			// the test has already failed, do not panic again
			return;
		}
		if let Some(next_expected) = self.expected_io.lock().unwrap().last() {
			panic!("IO operations left unperformed. Next expected: {:?}", next_expected);
		}
	}
}

impl IOContext for MockIOContext {
	type Identity = MockCrypto;

	fn eprint(&self, msg: &str) {
		let next = self.pop_next_action(&format!("eprint({msg})"));
		next.print_mock_location_on_panic(|next| match next {
			MockIO::EPrint(expected_msg) => {
				assert_eq!(msg, expected_msg, "Incorrect message printed")
			},
			other => panic!("Unexpected stderr message printed: {msg}, expected: {other:?}"),
		})
	}

	fn enewline(&self) {
		self.eprint("")
	}

	fn print(&self, msg: &str) {
		let next = self.pop_next_action(&format!("print({msg})"));
		next.print_mock_location_on_panic(|next| match next {
			MockIO::Print(expected_msg) => {
				assert_eq!(msg, expected_msg, "Incorrect message printed")
			},
			other => panic!("Unexpected message printed: {msg}, expected: {other:?}"),
		})
	}

	fn prompt(&self, prompt: &str, default: Option<&str>) -> String {
		let next =
			self.pop_next_action(&format!("prompt(prompt = {prompt}, default = {default:?})"));
		next.print_mock_location_on_panic(|next| match next {
			MockIO::Prompt { prompt: expected_prompt, default: expected_default, input } => {
				assert_eq!(prompt, expected_prompt, "Invalid prompt displayed");
				assert_eq!(
					default.map(|s| s.into()),
					expected_default,
					"Invalid default value for prompt"
				);
				input
			},
			other => panic!("Unexpected prompt displayed: {prompt}, expected: {other:?}"),
		})
	}

	fn prompt_yes_no(&self, prompt: &str, default: bool) -> bool {
		let next =
			self.pop_next_action(&format!("prompt_yes_no(prompt = {prompt}, default = {default})"));
		next.print_mock_location_on_panic(|next| match next {
			MockIO::PromptYN { prompt: expected_prompt, default: expected_default, choice } => {
				assert_eq!(prompt, expected_prompt);
				assert_eq!(default, expected_default);
				choice
			},
			other => panic!("Unexpected Y/N prompt: {prompt}, expected: {other:?}"),
		})
	}

	fn prompt_multi_option(&self, msg: &str, options: Vec<String>) -> String {
		let next = self
			.pop_next_action(&format!("prompt_multi_option(prompt = {msg}, options = {options:?})"));
		next.print_mock_location_on_panic(|next| match next {
			MockIO::PromptMultiOption {
				prompt: expected_prompt,
				options: expected_options,
				choice,
			} => {
				assert_eq!(msg, expected_prompt);
				assert_eq!(options, expected_options);
				choice
			},
			other => panic!("Unexpected multi-option prompt: {msg}, expected: {other:?}"),
		})
	}

	fn write_file(&self, path: &str, content: &str) -> anyhow::Result<()> {
		self.files.lock().unwrap().insert(path.into(), content.into());
		Ok(())
	}

	fn read_file(&self, path: &str) -> Option<String> {
		self.files.lock().unwrap().get(path).cloned()
	}

	fn file_exists(&self, path: &str) -> bool {
		self.files.lock().unwrap().contains_key(path)
	}

	fn create_dir_all(&self, path: &str) -> anyhow::Result<()> {
		let mut dirs = self.dirs.lock().unwrap();
		if !dirs.iter().any(|dir| dir == path) {
			dirs.push(path.into());
		}
		Ok(())
	}

	fn identity_provider(&self) -> Self::Identity {
		self.identity.clone()
	}
}

pub const STATE_FILE: &str = "state.json";
pub const OUTPUT_DIRECTORY: &str = "./output";
pub const TEMPLATES_DIRECTORY: &str = "./setup_templates";
pub const NETWORKS_FILE: &str = "networks.json";

pub const PARITY_CONFIG_TEMPLATE: &str = "[mining]\nengine_signer = \"<TYPE_YOUR_ADDRESS_HERE>\"\n";
pub const DOCKER_COMPOSE_TEMPLATE: &str = "\
environment:
  - WEB3_NODEPRIVATEKEY=<TYPE_YOUR_PRIVATE_KEY_HERE>
  - WEB3_RPC=<TYPE_YOUR_WEB3_RPC_HERE>
  - HEAD_CONTRACT_ADDRESS=<TYPE_YOUR_HEAD_CONTRACT_ADDRESS_HERE>
  - CHAIN=<TYPE_YOUR_NETWORK_NAME_HERE>
";

impl MockIOContext {
	pub fn with_resources_config(self) -> Self {
		self.with_json_file(
			RESOURCES_CONFIG_FILE_PATH,
			serde_json::json!({
				"state_file": STATE_FILE,
				"output_directory": OUTPUT_DIRECTORY,
				"templates_directory": TEMPLATES_DIRECTORY,
				"networks_file": NETWORKS_FILE,
			}),
		)
	}

	/// Network registry with `dev` and `test` networks, and templates for every node type
	pub fn with_setup_templates(self) -> Self {
		let mut context = self
			.with_json_file(
				NETWORKS_FILE,
				serde_json::json!({
					"test": {"rpc": "https://rpc.test", "headContractAddress": "0xABC"},
					"dev": {"rpc": "https://rpc.dev", "headContractAddress": "0xDEF"}
				}),
			)
			.with_json_file(
				&format!("{TEMPLATES_DIRECTORY}/chain/test.json"),
				serde_json::json!({"name": "AmbNet-Test"}),
			)
			.with_json_file(
				&format!("{TEMPLATES_DIRECTORY}/chain/dev.json"),
				serde_json::json!({"name": "AmbNet-Dev"}),
			);
		for node_type in ["hermes", "apollo", "atlas"] {
			context = context
				.with_file(
					&format!("{TEMPLATES_DIRECTORY}/{node_type}/parity_config.toml"),
					PARITY_CONFIG_TEMPLATE,
				)
				.with_file(
					&format!("{TEMPLATES_DIRECTORY}/{node_type}/docker-compose.yml"),
					DOCKER_COMPOSE_TEMPLATE,
				);
		}
		context
	}
}

/// Output of loading the locations written by [MockIOContext::with_resources_config]
pub fn load_resources_io() -> MockIO {
	MockIO::Group(vec![
		MockIO::eprint(&format!(
			"🛠️ Loaded node state file from config ({RESOURCES_CONFIG_FILE_PATH}): {STATE_FILE}"
		)),
		MockIO::eprint(&format!(
			"🛠️ Loaded setup output directory from config ({RESOURCES_CONFIG_FILE_PATH}): {OUTPUT_DIRECTORY}"
		)),
		MockIO::eprint(&format!(
			"🛠️ Loaded setup templates directory from config ({RESOURCES_CONFIG_FILE_PATH}): {TEMPLATES_DIRECTORY}"
		)),
		MockIO::eprint(&format!(
			"🛠️ Loaded network registry file from config ({RESOURCES_CONFIG_FILE_PATH}): {NETWORKS_FILE}"
		)),
	])
}

pub fn test_resources() -> WizardResources {
	WizardResources {
		state_file: STATE_FILE.into(),
		output_directory: OUTPUT_DIRECTORY.into(),
		templates_directory: TEMPLATES_DIRECTORY.into(),
		networks_file: NETWORKS_FILE.into(),
	}
}

pub fn output_file(file_name: &str) -> String {
	format!("{OUTPUT_DIRECTORY}/{file_name}")
}

#[macro_export]
macro_rules! verify_json {
	($ctx:ident, $path:expr, $expected:expr) => {{
		let actual = $ctx
			.files
			.lock()
			.unwrap()
			.get($path)
			.map(|s| {
				serde_json::from_str::<serde_json::Value>(s)
					.unwrap_or_else(|_| panic!("{} is not valid JSON", $path))
			})
			.unwrap_or_else(|| panic!("Expected file {} not found", $path));
		pretty_assertions::assert_eq!(actual, $expected, "File {} does not match expected", $path);
	}};
}

#[test]
fn verify_cli() {
	use clap::CommandFactory;
	crate::Command::command().debug_assert()
}
