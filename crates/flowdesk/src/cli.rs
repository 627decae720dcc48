//! Command line interface
//!
//! Ad-hoc record operations against one collection. Records and patches are
//! JSON objects given on the command line; results are printed as pretty
//! JSON.

use clap::{Parser, Subcommand};
use flowdesk_domain::constants::IDENTITY_FIELD;
use flowdesk_domain::error::{Error, Result};
use flowdesk_domain::ports::Repository;
use flowdesk_domain::value_objects::{CreateRequest, Document, Key, KeySchema, UpdateRequest};
use flowdesk_infrastructure::logging::init_logging;
use flowdesk_infrastructure::{ConfigLoader, TimedOperation, open_repository};
use serde_json::{Value, json};
use std::path::PathBuf;
use tracing::debug;

/// Command line interface for Flowdesk
#[derive(Parser, Debug)]
#[command(name = "flowdesk")]
#[command(about = "Flowdesk - key/value records in a document store")]
#[command(version)]
pub struct Cli {
    /// Path to configuration file
    #[arg(short, long)]
    pub config: Option<PathBuf>,

    /// Collection holding the records
    #[arg(long, default_value = "Records")]
    pub collection: String,

    /// Primary key field
    #[arg(long, default_value = IDENTITY_FIELD)]
    pub key: String,

    /// Secondary key field, for composite keys
    #[arg(long)]
    pub secondary_key: Option<String>,

    #[command(subcommand)]
    pub command: Command,
}

impl Cli {
    /// Key fields selected by `--key` and `--secondary-key`
    pub fn schema(&self) -> KeySchema {
        match &self.secondary_key {
            Some(secondary) => KeySchema::composite(self.key.clone(), secondary.clone()),
            None => KeySchema::new(self.key.clone()),
        }
    }
}

/// Record operations
#[derive(Subcommand, Debug, Clone, PartialEq, Eq)]
pub enum Command {
    /// Print one record
    Read {
        key: String,
        secondary: Option<String>,
    },
    /// Print every record, or those matching any of the given primary keys
    List { keys: Vec<String> },
    /// Insert a record; without --id the primary key is generated
    Create {
        record: String,
        #[arg(long)]
        id: Option<String>,
        #[arg(long, requires = "id")]
        secondary: Option<String>,
    },
    /// Set the given fields on one record
    ///
    /// Without KEY the record is selected by the patch's `_id`.
    Update {
        patch: String,
        key: Option<String>,
        secondary: Option<String>,
    },
    /// Remove one record
    Delete {
        key: String,
        secondary: Option<String>,
    },
}

/// Load configuration, open the repository and run the command
///
/// Returns the pretty-printed result.
pub async fn run(cli: Cli) -> Result<String> {
    let mut loader = ConfigLoader::new();
    if let Some(path) = &cli.config {
        loader = loader.with_config_path(path);
    }
    let config = loader.load()?;
    init_logging(&config.logging)?;

    let repository = open_repository::<Value>(&config.database, &cli.collection, cli.schema())?;
    let output = execute(&cli.command, repository.as_ref()).await?;
    serde_json::to_string_pretty(&output).map_err(Error::from)
}

/// Run one command against `repository`
pub async fn execute(command: &Command, repository: &dyn Repository<Value>) -> Result<Value> {
    let timer = TimedOperation::start();
    let output = match command {
        Command::Read { key, secondary } => {
            let found = repository.read(&key_from(key, secondary.as_deref())).await?;
            serde_json::to_value(found)?
        }
        Command::List { keys } => {
            let keys: Vec<Key> = keys.iter().map(|key| Key::new(key.as_str())).collect();
            let selection = (!keys.is_empty()).then_some(keys.as_slice());
            serde_json::to_value(repository.many_read(selection).await?)?
        }
        Command::Create {
            record,
            id,
            secondary,
        } => {
            let record = Value::Object(parse_object(record)?);
            let request = match (id, secondary) {
                (Some(id), Some(secondary)) => {
                    CreateRequest::composite(id.as_str(), secondary.as_str(), record)
                }
                (Some(id), None) => CreateRequest::keyed(id.as_str(), record),
                (None, Some(_)) => {
                    return Err(Error::invalid_argument("--secondary needs --id as well"));
                }
                (None, None) => CreateRequest::generated(record),
            };
            serde_json::to_value(repository.create(request).await?)?
        }
        Command::Update {
            patch,
            key,
            secondary,
        } => {
            let mut request = UpdateRequest::new(parse_object(patch)?);
            if let Some(key) = key {
                request = request.with_key(key_from(key, secondary.as_deref()));
            }
            serde_json::to_value(repository.update(request).await?)?
        }
        Command::Delete { key, secondary } => {
            let deleted = repository
                .delete(&key_from(key, secondary.as_deref()))
                .await?;
            json!({ "deleted": deleted })
        }
    };
    debug!(elapsed_ms = timer.elapsed_ms(), "Command finished");
    Ok(output)
}

fn key_from(primary: &str, secondary: Option<&str>) -> Key {
    match secondary {
        Some(secondary) => Key::composite(primary, secondary),
        None => Key::new(primary),
    }
}

fn parse_object(text: &str) -> Result<Document> {
    match serde_json::from_str(text) {
        Ok(Value::Object(document)) => Ok(document),
        Ok(_) => Err(Error::invalid_argument("expected a JSON object")),
        Err(e) => Err(Error::invalid_argument(format!("invalid JSON: {e}"))),
    }
}
