use std::{
    fs,
    path::{Path, PathBuf},
    process::ExitCode,
};

use alloy_primitives::{Address, Bytes, U256};
use anyhow::{anyhow, Context, Result};
use clap::{Parser, Subcommand};
use roles_modifier::{Roles, RolesConfig, TransactionRequest};
use roles_sdk::{encode_calls, encode_multisend, remove_obsolete_calls, MultiSendTx, RecordingAvatar};
use roles_types::{Operation, PolicyMutation, RoleKey, Selector};
use serde::{Deserialize, Serialize};
use serde_json::{json, Value};
use tracing::{debug, info};
use tracing_subscriber::{fmt, prelude::*, EnvFilter};

/// Work with Roles policies offline: prune redundant governance calls, encode
/// them as calldata, or dry-run a request against the resulting policy.
#[derive(Parser, Debug)]
#[command(author, version, about)]
struct Cli {
    /// Policy file: `{ "config": { "owner": .., "multisend": .. }, "calls": [..] }`.
    #[arg(long, env = "ROLES_POLICY")]
    policy: PathBuf,

    /// Log at debug level (RUST_LOG takes precedence).
    #[arg(long, short)]
    verbose: bool,

    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// Drop calls overridden by later ones.
    Prune {
        /// Write the pruned policy here instead of stdout.
        #[arg(long)]
        out: Option<PathBuf>,
    },
    /// Print the calldata of every call, optionally pruned first.
    Encode {
        #[arg(long)]
        prune: bool,

        /// Bundle all calls into a single `multiSend` against this modifier address.
        #[arg(long)]
        multisend_via: Option<Address>,
    },
    /// Apply the policy and dry-run one request through a recording avatar.
    Check {
        #[arg(long)]
        invoker: Address,

        #[arg(long)]
        to: Address,

        /// Hex calldata, 0x-prefixed or not.
        #[arg(long, default_value = "0x")]
        data: Bytes,

        #[arg(long, default_value = "0")]
        value: U256,

        /// `call` or `delegate-call`.
        #[arg(long, default_value = "call", value_parser = parse_operation)]
        operation: Operation,

        /// Explicit role; the invoker's default role otherwise.
        #[arg(long)]
        role: Option<RoleKey>,

        /// Selectors the recording avatar should revert on.
        #[arg(long = "fail-selector")]
        fail_selectors: Vec<Selector>,

        #[arg(long)]
        revert_on_failure: bool,
    },
}

#[derive(Debug, Serialize, Deserialize)]
struct PolicyFile {
    config: RolesConfig,
    #[serde(default)]
    calls: Vec<PolicyMutation>,
}

fn main() -> Result<ExitCode> {
    let cli = Cli::parse();
    init_tracing(cli.verbose);

    let policy = read_policy(&cli.policy)?;
    debug!(calls = policy.calls.len(), path = %cli.policy.display(), "policy loaded");

    match cli.command {
        Command::Prune { out } => {
            let calls = remove_obsolete_calls(&policy.calls);
            info!(before = policy.calls.len(), after = calls.len(), "pruned policy");
            let pruned = serde_json::to_value(PolicyFile { config: policy.config, calls })
                .context("failed serialising pruned policy")?;
            match out {
                Some(path) => write_json_atomic(&path, &pruned)?,
                None => println!("{}", serde_json::to_string_pretty(&pruned)?),
            }
            Ok(ExitCode::SUCCESS)
        }
        Command::Encode { prune, multisend_via } => {
            let calls = if prune { remove_obsolete_calls(&policy.calls) } else { policy.calls };
            let calldata = encode_calls(&calls);
            let output = match multisend_via {
                Some(modifier) => {
                    let txs: Vec<_> = calldata
                        .into_iter()
                        .map(|data| MultiSendTx { operation: Operation::Call, to: modifier, value: U256::ZERO, data })
                        .collect();
                    json!(encode_multisend(&txs))
                }
                None => json!(calldata),
            };
            println!("{}", serde_json::to_string_pretty(&output)?);
            Ok(ExitCode::SUCCESS)
        }
        Command::Check { invoker, to, data, value, operation, role, fail_selectors, revert_on_failure } => {
            let avatar = fail_selectors.into_iter().fold(RecordingAvatar::new(), RecordingAvatar::failing_on);
            let owner = policy.config.owner;
            let mut roles = Roles::new(policy.config, avatar);
            for (index, call) in policy.calls.into_iter().enumerate() {
                roles
                    .apply(owner, call)
                    .map_err(|err| anyhow!("call #{index} rejected: {err}"))?;
            }

            let request = TransactionRequest {
                to,
                value,
                data: &data,
                operation,
                role,
                revert_on_failure,
                return_data: true,
            };
            let (report, code) = match roles.dispatch(invoker, &request) {
                Ok(execution) => (
                    json!({
                        "allowed": true,
                        "success": execution.success,
                        "forwarded": roles.avatar().calls(),
                    }),
                    ExitCode::SUCCESS,
                ),
                Err(err) => (
                    json!({
                        "allowed": false,
                        "error": err.to_string(),
                        "revertData": err.revert_data(),
                    }),
                    ExitCode::FAILURE,
                ),
            };
            println!("{}", serde_json::to_string_pretty(&report)?);
            Ok(code)
        }
    }
}

fn init_tracing(verbose: bool) {
    let default = if verbose { "debug" } else { "info" };
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default));
    tracing_subscriber::registry()
        .with(fmt::layer().with_writer(std::io::stderr))
        .with(filter)
        .init();
}

fn parse_operation(value: &str) -> Result<Operation, String> {
    match value {
        "call" | "0" => Ok(Operation::Call),
        "delegate-call" | "delegatecall" | "1" => Ok(Operation::DelegateCall),
        other => Err(format!("unknown operation `{other}` (expected call or delegate-call)")),
    }
}

fn read_policy(path: &Path) -> Result<PolicyFile> {
    let raw = fs::read_to_string(path).with_context(|| format!("failed reading {}", path.display()))?;
    serde_json::from_str(&raw).with_context(|| format!("failed parsing policy JSON in {}", path.display()))
}

fn write_json_atomic(path: &Path, value: &Value) -> Result<()> {
    let parent = match path.parent() {
        Some(parent) if !parent.as_os_str().is_empty() => parent,
        _ => Path::new("."),
    };
    fs::create_dir_all(parent).with_context(|| format!("failed creating directory {}", parent.display()))?;

    let serialised = serde_json::to_string_pretty(value).context("failed serialising policy JSON")?;
    let mut tmp_path = path.as_os_str().to_os_string();
    tmp_path.push(".tmp");
    let tmp_path = PathBuf::from(tmp_path);
    fs::write(&tmp_path, serialised.as_bytes())
        .with_context(|| format!("failed writing temp file {}", tmp_path.display()))?;
    fs::rename(&tmp_path, path).with_context(|| format!("failed replacing {}", path.display()))?;
    Ok(())
}
