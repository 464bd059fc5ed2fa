use anyhow::Context;
use clap::Parser;
use tracing::{info, warn};
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

use sink::commands::{CommandRegistry, CommandResponder, Dispatcher, EchoResponder};
use sink::config::Config;
use sink::git::clone_if_absent;
use sink::github::GitHubClient;
use sink::server::{AppState, WEBHOOK_PATH, build_router};

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "sink=debug,tower_http=debug".into()),
        )
        .with(tracing_subscriber::fmt::layer())
        .init();

    let config = Config::parse();
    config.validate()?;

    let webhook_secret = config.webhook_secret().map(<[u8]>::to_vec);
    if webhook_secret.is_none() {
        warn!("Webhook signature verification is disabled");
    } else if config.skip_signature_verification {
        warn!("Ignoring skip-signature-verification because a webhook secret is set");
    }

    let repo_dir = match &config.repo_remote {
        Some(remote) => Some(
            clone_if_absent(remote, &config.workdir)
                .with_context(|| format!("failed to clone {}", remote))?,
        ),
        None => None,
    };

    let responder = match &config.command_map {
        Some(path) => {
            let registry = CommandRegistry::load(path)?;
            info!(
                path = %path.display(),
                prefix = %registry.prefix(),
                commands = registry.commands().len(),
                "Loaded command map"
            );
            CommandResponder::Registry(Dispatcher::new(registry, config.exec_config(repo_dir)))
        }
        None => {
            info!(prefix = %config.echo_prefix, "No command map configured; echoing comments");
            CommandResponder::Echo(EchoResponder::new(config.echo_prefix.clone()))
        }
    };

    let publisher = GitHubClient::from_token(
        config.access_token.clone(),
        config.github_api_url.as_deref(),
    )
    .context("failed to build GitHub client")?;

    let app = build_router(AppState::new(responder, publisher, webhook_secret));

    let listener = tokio::net::TcpListener::bind(config.listen_addr)
        .await
        .with_context(|| format!("failed to bind {}", config.listen_addr))?;
    info!("listening on {}{}", config.listen_addr, WEBHOOK_PATH);

    axum::serve(listener, app).await.context("server error")?;
    Ok(())
}
