use crate::cmd_traits::IdentityProvider;
use crate::crypto::Crypto;
use anyhow::Context;
use std::fs;

pub trait IOContext {
	/// Identity provider used to generate and derive node keys
	type Identity: IdentityProvider;

	fn print(&self, msg: &str);
	fn eprint(&self, msg: &str);
	fn enewline(&self);
	fn prompt(&self, prompt: &str, default: Option<&str>) -> String;
	fn prompt_yes_no(&self, prompt: &str, default: bool) -> bool;
	fn prompt_multi_option(&self, msg: &str, options: Vec<String>) -> String;
	fn write_file(&self, path: &str, content: &str) -> anyhow::Result<()>;
	fn read_file(&self, path: &str) -> Option<String>;
	fn file_exists(&self, path: &str) -> bool;
	fn create_dir_all(&self, path: &str) -> anyhow::Result<()>;
	fn identity_provider(&self) -> Self::Identity;
}

pub struct DefaultCmdRunContext;

impl IOContext for DefaultCmdRunContext {
	type Identity = Crypto;

	fn print(&self, msg: &str) {
		println!("{msg}")
	}

	fn eprint(&self, msg: &str) {
		eprintln!("{msg}")
	}

	fn enewline(&self) {
		eprintln!()
	}

	fn prompt(&self, prompt: &str, default: Option<&str>) -> String {
		let mut prompt = inquire::Text::new(prompt);
		if let Some(default) = default {
			prompt = prompt.with_default(default)
		};

		answer_or_exit(prompt.prompt())
	}

	fn prompt_yes_no(&self, prompt: &str, default: bool) -> bool {
		answer_or_exit(inquire::Confirm::new(prompt).with_default(default).prompt())
	}

	fn prompt_multi_option(&self, msg: &str, options: Vec<String>) -> String {
		answer_or_exit(inquire::Select::new(msg, options).prompt())
	}

	fn write_file(&self, path: &str, content: &str) -> anyhow::Result<()> {
		fs::write(path, content).with_context(|| format!("Failed to write file: {path}"))
	}

	fn read_file(&self, path: &str) -> Option<String> {
		fs::read_to_string(path).ok()
	}

	fn file_exists(&self, path: &str) -> bool {
		fs::metadata(path).is_ok()
	}

	fn create_dir_all(&self, path: &str) -> anyhow::Result<()> {
		fs::create_dir_all(path).with_context(|| format!("Failed to create directory: {path}"))
	}

	fn identity_provider(&self) -> Self::Identity {
		Crypto
	}
}

// Prompts are the only way to answer the wizard, so an interrupted prompt ends it.
fn answer_or_exit<T>(answer: inquire::error::InquireResult<T>) -> T {
	answer.unwrap_or_else(|err| {
		eprintln!("{err}");
		std::process::exit(1)
	})
}
