use super::*;
use crate::tests::{MockIO, MockIOContext, STATE_FILE, load_resources_io};
use node_setup_domain::{Address, Role, Submission};
use pretty_assertions::assert_eq;
use serde_json::json;

const PRIVATE_KEY: &str = "0x4444444444444444444444444444444444444444444444444444444444444444";

#[test]
fn prints_submission() {
	let mock_context = MockIOContext::new()
		.with_resources_config()
		.with_json_file(
			STATE_FILE,
			json!({
				"network": {"name": "test", "rpc": "https://rpc.test", "headContractAddress": "0xABC"},
				"privateKey": PRIVATE_KEY,
				"role": "HERMES",
				"email": "op@example.com"
			}),
		)
		.with_expected_io(vec![
			load_resources_io(),
			MockIO::enewline(),
			MockIO::print(
				&serde_json::to_string_pretty(&Submission {
					network: "test".into(),
					address: Address(format!("address-of-{PRIVATE_KEY}")),
					role: Some(Role::Hermes),
					url: None,
					email: Some("op@example.com".into()),
				})
				.unwrap(),
			),
		]);

	ShowSubmissionCmd {}.run(&mock_context).unwrap();
}

#[test]
fn prints_submission_as_json_object() {
	let mock_context = MockIOContext::new()
		.with_resources_config()
		.with_json_file(
			STATE_FILE,
			json!({
				"network": {"name": "dev", "rpc": "https://rpc.dev", "headContractAddress": "0xDEF"},
				"privateKey": PRIVATE_KEY
			}),
		)
		.with_expected_io(vec![
			load_resources_io(),
			MockIO::enewline(),
			MockIO::print(
				"{\n  \"network\": \"dev\",\n  \"address\": \"address-of-0x4444444444444444444444444444444444444444444444444444444444444444\",\n  \"role\": null,\n  \"url\": null,\n  \"email\": null\n}",
			),
		]);

	ShowSubmissionCmd {}.run(&mock_context).unwrap();
}

#[test]
fn points_to_onboarding_without_private_key() {
	let mock_context = MockIOContext::new()
		.with_resources_config()
		.with_json_file(
			STATE_FILE,
			json!({"network": {"name": "test", "rpc": "https://rpc.test", "headContractAddress": "0xABC"}}),
		)
		.with_expected_io(vec![load_resources_io(), MockIO::enewline()]);

	let result = ShowSubmissionCmd {}.run(&mock_context);

	assert_eq!(
		result.unwrap_err().to_string(),
		"privateKey is not configured yet. Run the `onboard` wizard first."
	);
}

#[test]
fn reports_corrupted_state_file() {
	let mock_context = MockIOContext::new()
		.with_resources_config()
		.with_file(STATE_FILE, "[]")
		.with_expected_io(vec![load_resources_io(), MockIO::enewline()]);

	let result = ShowSubmissionCmd {}.run(&mock_context);

	assert_eq!(
		result.unwrap_err().to_string(),
		"State file state.json does not contain a JSON object"
	);
}
