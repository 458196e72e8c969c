//! casegen CLI - AI-powered manual test case generation.

#![warn(clippy::pedantic)]
#![allow(clippy::module_name_repetitions)]
#![allow(clippy::missing_errors_doc)]
#![allow(clippy::missing_panics_doc)]
#![allow(clippy::too_many_lines)]
#![allow(clippy::uninlined_format_args)]

use std::path::PathBuf;
use std::sync::Arc;
use std::time::Duration;

use clap::{Parser, Subcommand};
use colored::Colorize;
use indicatif::{ProgressBar, ProgressStyle};

use casegen::ai::ProviderRegistry;
use casegen::domain::{Generator, UnknownFieldPolicy};
use casegen::export::export_to_excel;
use casegen::server::{serve, AppState};
use casegen::ui;

#[derive(Parser)]
#[command(name = "casegen")]
#[command(about = "AI-powered manual test case generation", long_about = None)]
#[command(version)]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Generate test cases for a feature and export them to xlsx
    Generate {
        /// Free-text feature description
        #[arg(short, long)]
        requirement: String,

        /// Comma-separated test categories (e.g. functional,negative,edge_case)
        #[arg(short, long, env = "CASEGEN_TEST_TYPES")]
        types: Option<String>,

        /// AI provider (openai, anthropic)
        #[arg(short, long, env = "CASEGEN_PROVIDER", default_value = "openai")]
        provider: String,

        /// Model identifier (provider default when omitted)
        #[arg(short, long)]
        model: Option<String>,

        /// Output file path (timestamped name in cwd when omitted)
        #[arg(short, long)]
        output: Option<PathBuf>,

        /// Ignore unknown fields in model output instead of rejecting them
        #[arg(long)]
        lenient: bool,
    },

    /// Run the HTTP server
    Serve {
        /// Bind address
        #[arg(long, default_value = "127.0.0.1")]
        host: String,

        /// Port
        #[arg(long, default_value_t = 8000)]
        port: u16,

        /// Default AI provider for requests that name none
        #[arg(short, long, env = "CASEGEN_PROVIDER", default_value = "openai")]
        provider: String,
    },

    /// List registered AI providers and their configuration status
    Providers,
}

#[tokio::main]
async fn main() {
    // .env is optional; absence is not an error
    dotenvy::dotenv().ok();

    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::from_default_env()
                .add_directive(tracing::Level::WARN.into()),
        )
        .init();

    let cli = Cli::parse();

    if let Err(e) = run(cli).await {
        ui::print_error(&e.to_string());
        std::process::exit(1);
    }
}

async fn run(cli: Cli) -> anyhow::Result<()> {
    let registry = ProviderRegistry::with_defaults();

    match cli.command {
        Commands::Generate {
            requirement,
            types,
            provider,
            model,
            output,
            lenient,
        } => {
            if !registry.is_any_configured() {
                ui::print_warning(
                    "No API key found; set OPENAI_API_KEY or ANTHROPIC_API_KEY in the environment or .env",
                );
            }

            let categories: Vec<String> = types
                .as_deref()
                .map(|t| {
                    t.split(',')
                        .map(str::trim)
                        .filter(|t| !t.is_empty())
                        .map(ToString::to_string)
                        .collect()
                })
                .unwrap_or_default();

            let mut generator = Generator::from_registry(&registry, &provider)?;
            if let Some(model) = model {
                generator = generator.with_model(model);
            }
            if lenient {
                generator = generator.with_unknown_field_policy(UnknownFieldPolicy::Lenient);
            }

            println!(
                "{} provider={} model={}",
                "Generating test cases".bold(),
                generator.provider_name().cyan(),
                generator.model().cyan()
            );

            let spinner = ProgressBar::new_spinner();
            spinner.set_style(ProgressStyle::default_spinner());
            spinner.set_message(format!("Generating test cases for '{}'...", requirement));
            spinner.enable_steady_tick(Duration::from_millis(100));

            let report = generator.generate(&requirement, &categories).await?;

            spinner.finish_and_clear();

            for failure in &report.failures {
                ui::print_warning(&format!(
                    "Category '{}' failed: {}",
                    failure.category, failure.error
                ));
            }

            if report.cases.is_empty() {
                ui::print_error("No test cases were generated. Check your API key and try again.");
                return Ok(());
            }

            ui::print_success(&format!("Generated {} test cases", report.case_count()));
            println!("{}", ui::case_table(&report.cases));

            let path = export_to_excel(&report.cases, output.as_deref())?;
            ui::print_success(&format!("Exported to {}", path.display()));
            ui::print_info(&format!(
                "Token usage: {} in / {} out",
                report.usage.input_tokens, report.usage.output_tokens
            ));
        }

        Commands::Serve {
            host,
            port,
            provider,
        } => {
            let state = Arc::new(AppState::new(registry, provider));
            serve(state, &host, port).await?;
        }

        Commands::Providers => {
            for name in registry.provider_names() {
                let Some(provider) = registry.get(&name) else {
                    continue;
                };
                let status = if provider.is_configured() {
                    "configured".green()
                } else {
                    format!("missing {}", provider.api_key_env_var()).red()
                };
                println!(
                    "{:<12} {} (default model: {})",
                    name.bold(),
                    status,
                    provider.default_model()
                );
            }
        }
    }

    Ok(())
}
