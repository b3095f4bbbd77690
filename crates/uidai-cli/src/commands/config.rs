//! Config command implementation

use anyhow::Result;
use tabled::Tabled;

use crate::cli::Cli;
use crate::config_loader::load_layered_config;
use crate::output::OutputWriter;
use crate::output_types::{ConfigEntry, ConfigOutput};

#[derive(Tabled)]
struct ConfigRow {
    #[tabled(rename = "Key")]
    key: String,
    #[tabled(rename = "Value")]
    value: String,
    #[tabled(rename = "Source")]
    source: String,
}

pub fn execute(cli: &Cli, output: &OutputWriter) -> Result<()> {
    let layered = load_layered_config(cli)?;
    if let Err(e) = layered.resolve() {
        output.warning(format!("Configuration does not validate: {}", e));
    }

    let values: ConfigOutput = ConfigOutput {
        values: layered
            .to_inspection_map()
            .into_iter()
            .map(|(key, (value, source))| (key, ConfigEntry { value, source }))
            .collect(),
    };

    if output.is_json() {
        return output.result(values);
    }

    output.section("Configuration Values");
    let rows = values
        .values
        .into_iter()
        .map(|(key, entry)| ConfigRow {
            key,
            value: entry.value,
            source: format!("{:?}", entry.source),
        })
        .collect();
    output.table(rows);

    output.section("Configuration Precedence");
    output.info("CLI arguments > Environment variables > Config file > Defaults");

    Ok(())
}
