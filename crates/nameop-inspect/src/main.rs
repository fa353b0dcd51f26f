//! Command-line inspector for name output scripts.
//!
//! Decodes a hex-encoded output script, classifies the identifier of its name
//! operation and, for `d/` names, decodes the value into resource records.
//! The result is printed as JSON.

use anyhow::{Context, Result, bail};
use clap::Parser;
use serde::Serialize;
use serde_json::Value;
use tracing_subscriber::EnvFilter;

use nameop::codec::{DecodeOptions, DomainValue, decode_domain_records_with_options};
use nameop::limits::DEFAULT_MAX_MAP_DEPTH;
use nameop::{
    Namespace, classify, decode_name_script, format_name_op, name_identifier_to_scripthash,
    name_op_to_json, split_identifier,
};

#[derive(Parser)]
#[command(name = "nameop-inspect")]
#[command(about = "Decode a name output script and the records in its value", long_about = None)]
struct Cli {
    /// Output script, hex-encoded
    script: String,

    /// Suffix appended to `d/` labels to form the domain
    #[arg(long, default_value = "bit")]
    domain: String,

    /// Maximum `map` nesting decoded in a domain value
    #[arg(long, default_value_t = DEFAULT_MAX_MAP_DEPTH)]
    max_depth: usize,

    /// Enable verbose logging
    #[arg(short, long)]
    verbose: bool,
}

#[derive(Debug, Serialize)]
struct Report {
    name_op: Option<Value>,
    display: Option<String>,
    namespace: Option<String>,
    scripthash: Option<String>,
    payment_script: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    domain: Option<DomainReport>,
}

#[derive(Debug, Serialize)]
struct DomainReport {
    domain: String,
    records: Vec<Value>,
    residual: Value,
    fully_resolved: bool,
}

fn main() -> Result<()> {
    let cli = Cli::parse();

    let log_level = if cli.verbose { "debug" } else { "warn" };
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(log_level));
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .init();

    let script = hex::decode(cli.script.trim()).context("script is not valid hex")?;
    let report = inspect(&script, &cli)?;

    println!("{}", serde_json::to_string_pretty(&report)?);
    Ok(())
}

fn inspect(script: &[u8], cli: &Cli) -> Result<Report> {
    let split = decode_name_script(script);
    let Some(remainder) = split.remainder else {
        bail!("malformed output script");
    };

    let Some(op) = split.name_op else {
        tracing::info!("script carries no name operation");
        return Ok(Report {
            name_op: None,
            display: None,
            namespace: None,
            scripthash: None,
            payment_script: hex::encode(remainder),
            domain: None,
        });
    };

    let namespace = classify(&op.identifier);
    let scripthash = name_identifier_to_scripthash(&op.identifier)
        .inspect_err(|err| tracing::warn!(error = %err, "cannot derive index script hash"))
        .ok();

    let domain = match (&namespace, split_identifier(&op.identifier)) {
        (Some(Namespace::Domain), Some((_, label))) => {
            let domain = format!("{label}.{}", cli.domain);
            let options = DecodeOptions::new().with_max_depth(cli.max_depth);
            let decoded = decode_domain_records_with_options(&domain, op.value.as_slice(), &options);
            tracing::debug!(domain = %domain, records = decoded.records.len(), "decoded domain value");

            Some(DomainReport {
                records: decoded.records.iter().map(|record| record.to_json()).collect(),
                fully_resolved: decoded.is_fully_resolved(),
                residual: residual_to_json(decoded.residual),
                domain,
            })
        }
        _ => None,
    };

    Ok(Report {
        name_op: Some(name_op_to_json(&op)),
        display: Some(format_name_op(&op)),
        namespace: namespace.map(|namespace| namespace.to_string()),
        scripthash,
        payment_script: hex::encode(remainder),
        domain,
    })
}

fn residual_to_json(residual: DomainValue) -> Value {
    match residual {
        DomainValue::Json(value) => value,
        DomainValue::Text(text) => Value::String(text),
        DomainValue::Bytes(bytes) => Value::String(format!("0x{}", hex::encode(bytes))),
    }
}
