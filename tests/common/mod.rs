#![allow(dead_code)]

use httpmock::MockServer;
use payment_examples::{ExampleRunner, LocalStorage, PalClient, TomlConfig};
use tempfile::TempDir;

pub const AUTHORIZATION: &str = "Basic d3NAQ29tcGFueS5FeGFtcGxlOnNlY3JldA==";
pub const HMAC_KEY: &str = "4468D9782DEF54FCD706C9100C71EC43932B1EBC2ACF6BA0560C05AAA7550C48";

pub fn config_for(server: &MockServer, output_path: &str) -> TomlConfig {
    let toml_content = format!(
        r#"
[client]
timeout_seconds = 5
output_path = "{output}"

[credentials]
ws_user = "ws@Company.Example"
ws_password = "secret"

[merchant]
account = "YourMerchantAccount"
skin_code = "4aD37dJA"
hmac_key = "{key}"

[endpoints]
pal = "{pal}"
hpp = "{hpp}"
"#,
        output = output_path,
        key = HMAC_KEY,
        pal = server.url("/pal"),
        hpp = server.url("/hpp"),
    );
    TomlConfig::from_toml_str(&toml_content).unwrap()
}

pub fn runner_for(server: &MockServer, temp_dir: &TempDir) -> ExampleRunner<LocalStorage> {
    let output_path = temp_dir.path().to_str().unwrap().to_string();
    let config = config_for(server, &output_path);
    let client = PalClient::new(&config).unwrap();
    ExampleRunner::new(client, LocalStorage::new(output_path)).quiet()
}
