use anyhow::{Context, Result};
use clap::{Args, Parser, Subcommand};
use serde_json::{json, Value};
use std::path::{Path, PathBuf};

use crate::config::{Config, Overrides};
use crate::converge::{self, ConvergeRequest};
use crate::inventory;
use crate::models::Task;
use crate::nautobot::NautobotClient;
use crate::registry;

#[derive(Debug, Parser)]
#[command(
    name = "nautobot-converge",
    version,
    about = "Converge Nautobot objects toward a declared state"
)]
pub struct Cli {
    #[command(flatten)]
    connection: ConnectionArgs,
    /// Log lookups and requests (debug level)
    #[arg(short, long, global = true)]
    pub verbose: bool,
    #[command(subcommand)]
    command: Command,
}

#[derive(Debug, Args)]
struct ConnectionArgs {
    /// Nautobot base URL [env: NAUTOBOT_URL]
    #[arg(long, global = true)]
    url: Option<String>,
    /// API token [env: NAUTOBOT_TOKEN]
    #[arg(long, global = true)]
    token: Option<String>,
    /// Skip TLS certificate verification [env: NAUTOBOT_VALIDATE_CERTS=false]
    #[arg(long, global = true)]
    no_verify_tls: bool,
    /// Pin the REST API version, e.g. 2.2 [env: NAUTOBOT_API_VERSION]
    #[arg(long, global = true)]
    api_version: Option<String>,
    /// Request timeout in seconds [env: NAUTOBOT_TIMEOUT]
    #[arg(long, global = true)]
    timeout: Option<u64>,
}

#[derive(Debug, Subcommand)]
enum Command {
    /// Converge one object from a YAML or JSON task document ("-" reads stdin)
    Apply(ApplyArgs),
    /// Run a GraphQL query
    Graphql(GraphqlArgs),
    /// Print devices (and VMs) grouped by attribute
    Inventory(InventoryArgs),
    /// List the resource types that can be converged
    Resources,
    /// Check that Nautobot is reachable with the configured token
    Ping,
}

#[derive(Debug, Args)]
struct ApplyArgs {
    task: PathBuf,
    /// Report what would change without changing it
    #[arg(long)]
    check: bool,
    /// Override the task's state (present|absent)
    #[arg(long)]
    state: Option<String>,
}

#[derive(Debug, Args)]
struct GraphqlArgs {
    /// File holding the query document
    #[arg(long)]
    query: PathBuf,
    /// JSON or YAML file holding query variables
    #[arg(long)]
    variables: Option<PathBuf>,
}

#[derive(Debug, Args)]
struct InventoryArgs {
    /// Attribute to group hosts by; repeatable (default: location, role, platform)
    #[arg(long = "group-by")]
    group_by: Vec<String>,
    /// Include virtual machines
    #[arg(long)]
    include_vms: bool,
}

impl Cli {
    /// Run the selected command and return its JSON report
    pub async fn run(self) -> Result<Value> {
        let config = Config::load().with_overrides(Overrides {
            url: self.connection.url,
            token: self.connection.token,
            no_verify_tls: self.connection.no_verify_tls,
            api_version: self.connection.api_version,
            timeout_secs: self.connection.timeout,
        });

        match self.command {
            Command::Resources => Ok(serde_json::to_value(registry::all())?),
            Command::Apply(args) => {
                let mut task = load_task(&args.task).await?;
                if let Some(state) = args.state {
                    task.state = state;
                }
                // Validate the task before touching the network
                let request = ConvergeRequest::from_task(task, args.check)?;
                let nb = connect(&config)?;
                let outcome = converge::converge(&nb, &request).await?;
                Ok(outcome.to_report())
            }
            Command::Graphql(args) => {
                let query = read_input(&args.query).await?;
                let variables = match &args.variables {
                    Some(path) => Some(parse_document::<Value>(path, &read_input(path).await?)?),
                    None => None,
                };
                let nb = connect(&config)?;
                let data = nb.graphql(&query, variables.as_ref()).await?;
                Ok(json!({ "changed": false, "data": data }))
            }
            Command::Inventory(args) => {
                let group_by = if args.group_by.is_empty() {
                    inventory::DEFAULT_GROUP_BY.iter().map(|s| s.to_string()).collect()
                } else {
                    args.group_by
                };
                let nb = connect(&config)?;
                inventory::build(&nb, &group_by, args.include_vms).await
            }
            Command::Ping => {
                let nb = connect(&config)?;
                let connected = nb.test_connection().await;
                if !connected {
                    anyhow::bail!("Could not reach Nautobot at {}", config.url);
                }
                Ok(json!({ "changed": false, "connected": true, "url": config.url }))
            }
        }
    }
}

fn connect(config: &Config) -> Result<NautobotClient> {
    config.validate()?;
    NautobotClient::new(config)
}

async fn read_input(path: &Path) -> Result<String> {
    if path == Path::new("-") {
        use tokio::io::AsyncReadExt;
        let mut buf = String::new();
        tokio::io::stdin().read_to_string(&mut buf).await?;
        return Ok(buf);
    }
    tokio::fs::read_to_string(path)
        .await
        .with_context(|| format!("Failed to read {}", path.display()))
}

async fn load_task(path: &Path) -> Result<Task> {
    let text = read_input(path).await?;
    parse_document(path, &text)
}

/// `.json` files parse as JSON; everything else as YAML
fn parse_document<T: serde::de::DeserializeOwned>(path: &Path, text: &str) -> Result<T> {
    let is_json = path.extension().map(|e| e == "json").unwrap_or(false);
    if is_json {
        serde_json::from_str(text).with_context(|| format!("Invalid JSON in {}", path.display()))
    } else {
        serde_yaml::from_str(text).with_context(|| format!("Invalid YAML in {}", path.display()))
    }
}
