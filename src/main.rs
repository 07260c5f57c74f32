//! CLI entry point for purview-dsg.
//!
//! Reads base URLs from the environment (with `.env` support) and CLI
//! overrides, then dispatches one Graph call per invocation and prints the
//! result to stdout. Diagnostics go to stderr via `tracing`.
//!
//! Exit codes:
//! - 0: success
//! - 1: runtime error (configuration, API or network failure)
//! - 2: argument validation error (clap handles this automatically)

use std::process::ExitCode;

use clap::{Parser, Subcommand};
use tracing_subscriber::EnvFilter;

use purview_dsg::client::GraphClient;
use purview_dsg::config::PurviewConfig;
use purview_dsg::error::Result;
use purview_dsg::labels::{
    compute_label_inheritance, decode_sensitivity_labels, fetch_sensitivity_labels,
    fetch_sublabel_rights,
};
use purview_dsg::offline::{OfflineTaskRequest, enqueue_offline_tasks};
use purview_dsg::payload::{UPLOAD_TEXT, build_process_content_request};
use purview_dsg::process_content::process_content;
use purview_dsg::protection_scopes::compute_protection_scope;

#[derive(Parser)]
#[command(version, about, long_about = None)]
struct Cli {
    /// Delegated Graph access token. Prefer the PURVIEW_ACCESS_TOKEN
    /// environment variable to keep it out of shell history.
    #[arg(long, env = "PURVIEW_ACCESS_TOKEN", hide_env_values = true)]
    token: String,

    /// Overrides PURVIEW_BASE_URL.
    #[arg(long)]
    purview_base_url: Option<String>,

    /// Overrides GRAPH_BASE_URL.
    #[arg(long)]
    graph_base_url: Option<String>,

    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand)]
enum Command {
    /// Compute protection scopes and print the body with its etag.
    ProtectionScope,

    /// List sensitivity labels with rights and sublabels expanded.
    Labels {
        /// Print a decoded summary instead of the raw body.
        #[arg(long)]
        summary: bool,
    },

    /// Show the caller's usage rights for one label.
    LabelRights {
        #[arg(long)]
        label_id: String,
    },

    /// Compute the label inherited from one or more source labels.
    LabelInheritance {
        /// Source label id; repeat for several.
        #[arg(long = "label-id", required = true)]
        label_ids: Vec<String>,
    },

    /// Submit a single text for evaluation.
    ProcessContent {
        #[arg(long)]
        text: String,
        /// `uploadText` or `downloadText`.
        #[arg(long, default_value = UPLOAD_TEXT)]
        activity: String,
        #[command(flatten)]
        app: AppArgs,
        #[arg(long)]
        session_id: String,
        #[arg(long, default_value_t = 0, allow_negative_numbers = true)]
        sequence_no: i64,
        #[arg(long)]
        etag: Option<String>,
    },

    /// Submit a prompt/response pair for offline evaluation.
    Offline {
        #[arg(long)]
        prompt: String,
        #[arg(long)]
        response: String,
        /// `evaluateOffline` submits the prompt; anything else skips it.
        #[arg(long)]
        upload_mode: String,
        /// `evaluateOffline` submits the response; anything else skips it.
        #[arg(long)]
        download_mode: String,
        #[command(flatten)]
        app: AppArgs,
        #[arg(long)]
        session_id: String,
        #[arg(long, default_value_t = 0, allow_negative_numbers = true)]
        sequence_no: i64,
        #[arg(long)]
        etag: Option<String>,
    },
}

#[derive(clap::Args)]
struct AppArgs {
    /// Application name reported to Purview.
    #[arg(long)]
    app_name: String,

    /// Entra application (client) id of the protected app.
    #[arg(long)]
    application_id: String,
}

/// Merges CLI overrides over `env`. A blank override counts as absent.
fn resolve_config(cli: &Cli, env: &PurviewConfig) -> PurviewConfig {
    let purview = non_blank(cli.purview_base_url.as_deref())
        .or_else(|| env.purview_base_url().ok());
    let graph = non_blank(cli.graph_base_url.as_deref()).unwrap_or_else(|| env.graph_base_url());
    PurviewConfig::from_values(purview, Some(graph))
}

fn non_blank(value: Option<&str>) -> Option<&str> {
    value.filter(|v| !v.trim().is_empty())
}

async fn run(cli: Cli) -> Result<()> {
    let client = GraphClient::new(resolve_config(&cli, &PurviewConfig::from_env()))?;
    let token = cli.token.as_str();

    match &cli.command {
        Command::ProtectionScope => {
            let scope = compute_protection_scope(&client, token).await?;
            let out = serde_json::json!({ "etag": scope.etag_or_empty(), "body": scope.body });
            println!("{}", serde_json::to_string_pretty(&out)?);
        }
        Command::Labels { summary } => {
            let body = fetch_sensitivity_labels(&client, token).await?;
            if *summary {
                for label in decode_sensitivity_labels(&body)? {
                    let name = label.display_name.or(label.name).unwrap_or_default();
                    println!("{}  {name}  ({} sublabels)", label.id, label.sublabels.len());
                }
            } else {
                println!("{body}");
            }
        }
        Command::LabelRights { label_id } => {
            println!("{}", fetch_sublabel_rights(&client, token, label_id).await?);
        }
        Command::LabelInheritance { label_ids } => {
            let body = compute_label_inheritance(&client, token, label_ids.as_slice()).await?;
            println!("{body}");
        }
        Command::ProcessContent {
            text,
            activity,
            app,
            session_id,
            sequence_no,
            etag,
        } => {
            let body = build_process_content_request(
                text,
                &app.app_name,
                *sequence_no,
                session_id,
                activity,
                &app.application_id,
            );
            let result = process_content(&client, token, etag.as_deref(), &body).await?;
            let out = serde_json::json!({ "headers": result.headers, "body": result.body });
            println!("{}", serde_json::to_string_pretty(&out)?);
        }
        Command::Offline {
            prompt,
            response,
            upload_mode,
            download_mode,
            app,
            session_id,
            sequence_no,
            etag,
        } => {
            let request = OfflineTaskRequest {
                etag: etag.as_deref(),
                name: &app.app_name,
                application_id: &app.application_id,
                upload_text_mode: upload_mode,
                download_text_mode: download_mode,
                prompt,
                response,
                session_id,
                sequence_no: *sequence_no,
            };
            println!("{}", enqueue_offline_tasks(&client, token, &request).await?);
        }
    }

    Ok(())
}

#[tokio::main]
async fn main() -> ExitCode {
    dotenvy::dotenv().ok();
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")),
        )
        .with_writer(std::io::stderr)
        .init();

    let cli = Cli::parse();
    match run(cli).await {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => {
            eprintln!("Error: {e}");
            ExitCode::FAILURE
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use purview_dsg::config::DEFAULT_GRAPH_BASE_URL;

    fn base_args() -> Vec<&'static str> {
        vec!["purview-dsg", "--token", "tok"]
    }

    fn parse_with(overrides: &[&'static str]) -> Cli {
        let mut args = base_args();
        args.extend_from_slice(overrides);
        args.push("protection-scope");
        Cli::try_parse_from(args).expect("should parse protection-scope")
    }

    #[test]
    fn cli_base_urls_override_environment() {
        let env = PurviewConfig::new("https://env.example/v1.0")
            .with_graph_base_url("https://graph-env.example/v1.0");
        let cli = parse_with(&[
            "--purview-base-url",
            "http://localhost:9000/",
            "--graph-base-url",
            "http://localhost:9001",
        ]);
        let config = resolve_config(&cli, &env);
        assert_eq!(config.purview_base_url().unwrap(), "http://localhost:9000");
        assert_eq!(config.graph_base_url(), "http://localhost:9001");
    }

    #[test]
    fn missing_overrides_keep_environment_values() {
        let env = PurviewConfig::new("https://env.example/v1.0")
            .with_graph_base_url("https://graph-env.example/v1.0");
        let config = resolve_config(&parse_with(&[]), &env);
        assert_eq!(config, env);
    }

    #[test]
    fn blank_graph_override_falls_back_to_default() {
        let cli = parse_with(&["--graph-base-url", "  "]);
        let config = resolve_config(&cli, &PurviewConfig::default());
        assert_eq!(config.graph_base_url(), DEFAULT_GRAPH_BASE_URL);
        assert!(config.purview_base_url().is_err());
    }

    #[test]
    fn missing_subcommand_is_rejected() {
        assert!(Cli::try_parse_from(base_args()).is_err());
    }

    #[test]
    fn label_inheritance_collects_repeated_ids() {
        let mut args = base_args();
        args.extend_from_slice(&["label-inheritance", "--label-id", "a", "--label-id", "b"]);
        let cli = Cli::try_parse_from(args).expect("should parse repeated label ids");
        match cli.command {
            Command::LabelInheritance { label_ids } => assert_eq!(label_ids, vec!["a", "b"]),
            _ => panic!("wrong subcommand"),
        }
    }

    #[test]
    fn label_inheritance_requires_an_id() {
        let mut args = base_args();
        args.push("label-inheritance");
        assert!(Cli::try_parse_from(args).is_err());
    }

    #[test]
    fn process_content_defaults_activity_and_sequence() {
        let mut args = base_args();
        args.extend_from_slice(&[
            "process-content",
            "--text",
            "hello",
            "--app-name",
            "app",
            "--application-id",
            "app-id",
            "--session-id",
            "s1",
        ]);
        let cli = Cli::try_parse_from(args).expect("should parse process-content");
        match cli.command {
            Command::ProcessContent {
                activity,
                sequence_no,
                etag,
                ..
            } => {
                assert_eq!(activity, "uploadText");
                assert_eq!(sequence_no, 0);
                assert!(etag.is_none());
            }
            _ => panic!("wrong subcommand"),
        }
    }

    #[test]
    fn offline_parses_modes_and_overrides() {
        let args = vec![
            "purview-dsg",
            "--token",
            "tok",
            "--purview-base-url",
            "http://localhost:9000",
            "offline",
            "--prompt",
            "p",
            "--response",
            "r",
            "--upload-mode",
            "evaluateOffline",
            "--download-mode",
            "skip",
            "--app-name",
            "app",
            "--application-id",
            "app-id",
            "--session-id",
            "s1",
            "--sequence-no",
            "4",
            "--etag",
            "\"v1\"",
        ];
        let cli = Cli::try_parse_from(args).expect("should parse offline");
        assert_eq!(cli.purview_base_url.as_deref(), Some("http://localhost:9000"));
        match cli.command {
            Command::Offline {
                upload_mode,
                download_mode,
                sequence_no,
                etag,
                ..
            } => {
                assert_eq!(upload_mode, "evaluateOffline");
                assert_eq!(download_mode, "skip");
                assert_eq!(sequence_no, 4);
                assert_eq!(etag.as_deref(), Some("\"v1\""));
            }
            _ => panic!("wrong subcommand"),
        }
    }
}
