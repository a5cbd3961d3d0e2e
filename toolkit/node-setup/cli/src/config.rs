use crate::io::IOContext;
use serde::{Serialize, de::DeserializeOwned};
use std::{marker::PhantomData, process::exit};

pub struct ConfigFieldDefinition<'a, T> {
	pub name: &'a str,
	pub config_file: &'a str,
	pub path: &'a [&'a str],
	pub default: Option<&'a str>,
	pub _marker: PhantomData<T>,
}

impl<'a, T> ConfigFieldDefinition<'a, T> {
	pub const fn new(
		name: &'a str,
		config_file: &'a str,
		path: &'a [&'a str],
		default: Option<&'a str>,
	) -> Self {
		Self { name, config_file, path, default, _marker: PhantomData }
	}
}

impl<'a> ConfigFieldDefinition<'a, String> {
	pub fn load_or_prompt_and_save<C: IOContext>(&self, context: &C) -> anyhow::Result<String> {
		if let Some(value) = self.load_from_file_and_print(context) {
			Ok(value)
		} else {
			let value = context.prompt(self.name, self.default);
			self.save_to_file(&value, context)?;
			Ok(value)
		}
	}
}

impl<'a, T> ConfigFieldDefinition<'a, T> {
	/// loads and parses the config field
	pub fn load_from_file<C: IOContext>(&self, context: &C) -> Option<T>
	where
		T: DeserializeOwned,
	{
		self.load_file(context).and_then(|json| self.extract_from_json_object(&json))
	}

	pub fn load_from_file_and_print(&self, context: &impl IOContext) -> Option<T>
	where
		T: DeserializeOwned + std::fmt::Display,
	{
		let value = self.load_from_file(context)?;
		context.eprint(&self.loaded_from_config_msg(&value));
		Some(value)
	}

	/// updates the config field in the file
	pub fn save_to_file<C: IOContext>(&self, value: &T, context: &C) -> anyhow::Result<()>
	where
		T: Serialize,
	{
		let mut json =
			self.load_file(context).unwrap_or(serde_json::Value::Object(Default::default()));
		let mut head = &mut json;
		for &field in self.path {
			head[field] = head
				.get(field)
				.cloned()
				.filter(serde_json::Value::is_object)
				.unwrap_or(serde_json::Value::Object(Default::default()));
			head = &mut head[field];
		}
		*head = serde_json::to_value(value)?;
		context.write_file(self.config_file, &serde_json::to_string_pretty(&json)?)
	}

	/// parses the config field's type from a json value
	pub fn extract_from_json_object(&self, json: &serde_json::Value) -> Option<T>
	where
		T: DeserializeOwned,
	{
		let mut json: Option<&serde_json::Value> = Some(json);
		for &field in self.path {
			if let Some(json_inner) = json {
				json = json_inner.get(field)
			} else {
				return None;
			}
		}
		json.and_then(|json| serde_json::from_value(json.clone()).ok())
	}

	/// loads the whole content of the config fields relevant config file
	pub fn load_file<C: IOContext>(&self, context: &C) -> Option<serde_json::Value> {
		if !context.file_exists(self.config_file) {
			return None;
		}

		if let Some(file_content_string) = context.read_file(self.config_file) {
			if let Ok(value) = serde_json::from_str(&file_content_string) {
				return Some(value);
			}
		}

		self.report_corrupted_file_and_quit()
	}

	/// print error message and exit
	pub fn report_corrupted_file_and_quit(&self) -> ! {
		eprintln!(
			"Config file {} is broken. Delete it or fix manually and restart this wizard",
			self.config_file
		);
		exit(-1)
	}

	pub fn loaded_from_config_msg(&self, value: &T) -> String
	where
		T: std::fmt::Display,
	{
		format!("🛠️ Loaded {} from config ({}): {value}", self.name, self.config_file)
	}
}

pub const RESOURCES_CONFIG_FILE_PATH: &str = "node-setup-resources-config.json";

/// Locations of the files the wizards read and write.
#[derive(Clone, Debug, PartialEq)]
pub struct WizardResources {
	pub state_file: String,
	pub output_directory: String,
	pub templates_directory: String,
	pub networks_file: String,
}

impl WizardResources {
	pub fn load<C: IOContext>(context: &C) -> anyhow::Result<Self> {
		Ok(Self {
			state_file: config_fields::STATE_FILE.load_or_prompt_and_save(context)?,
			output_directory: config_fields::OUTPUT_DIRECTORY.load_or_prompt_and_save(context)?,
			templates_directory: config_fields::TEMPLATES_DIRECTORY
				.load_or_prompt_and_save(context)?,
			networks_file: config_fields::NETWORKS_FILE.load_or_prompt_and_save(context)?,
		})
	}
}

pub mod config_fields {
	use super::*;

	pub const STATE_FILE: ConfigFieldDefinition<'static, String> = ConfigFieldDefinition::new(
		"node state file",
		RESOURCES_CONFIG_FILE_PATH,
		&["state_file"],
		Some("state.json"),
	);

	pub const OUTPUT_DIRECTORY: ConfigFieldDefinition<'static, String> = ConfigFieldDefinition::new(
		"setup output directory",
		RESOURCES_CONFIG_FILE_PATH,
		&["output_directory"],
		Some("./output"),
	);

	pub const TEMPLATES_DIRECTORY: ConfigFieldDefinition<'static, String> =
		ConfigFieldDefinition::new(
			"setup templates directory",
			RESOURCES_CONFIG_FILE_PATH,
			&["templates_directory"],
			Some("./setup_templates"),
		);

	pub const NETWORKS_FILE: ConfigFieldDefinition<'static, String> = ConfigFieldDefinition::new(
		"network registry file",
		RESOURCES_CONFIG_FILE_PATH,
		&["networks_file"],
		Some("networks.json"),
	);
}
