use crate::cmd_traits::Store;
use crate::io::IOContext;
use anyhow::{Context, anyhow};
use serde::{Serialize, de::DeserializeOwned};
use serde_json::{Map, Value};

/// [Store] keeping every field as a top level property of one JSON file.
pub struct ContextStore<'a, C> {
	context: &'a C,
	path: String,
}

impl<'a, C: IOContext> ContextStore<'a, C> {
	pub fn new(context: &'a C, path: impl Into<String>) -> Self {
		Self { context, path: path.into() }
	}

	fn load(&self) -> anyhow::Result<Map<String, Value>> {
		let Some(content) = self.context.read_file(&self.path) else {
			return Ok(Map::new());
		};
		match serde_json::from_str(&content)
			.with_context(|| format!("State file {} is not valid JSON", self.path))?
		{
			Value::Object(state) => Ok(state),
			_ => Err(anyhow!("State file {} does not contain a JSON object", self.path)),
		}
	}
}

impl<C: IOContext> Store for ContextStore<'_, C> {
	async fn exists(&self, key: &str) -> anyhow::Result<bool> {
		Ok(self.load()?.contains_key(key))
	}

	async fn read<T: DeserializeOwned>(&self, key: &str) -> anyhow::Result<T> {
		let value = self
			.load()?
			.remove(key)
			.ok_or_else(|| anyhow!("No value stored under '{key}' in {}", self.path))?;
		serde_json::from_value(value)
			.with_context(|| format!("Value stored under '{key}' in {} is invalid", self.path))
	}

	async fn write<T: Serialize>(&self, key: &str, value: &T) -> anyhow::Result<()> {
		let mut state = self.load()?;
		state.insert(key.to_string(), serde_json::to_value(value)?);
		self.context.write_file(&self.path, &serde_json::to_string_pretty(&Value::Object(state))?)
	}
}
