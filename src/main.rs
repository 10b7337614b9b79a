use std::path::PathBuf;
use std::process;
use std::sync::Arc;

use clap::Parser;
use tracing::{Dispatch, Level, dispatcher, error, info};
use tracing_subscriber::fmt as tracing_fmt;
use whistle_console::{
    application::{
        error::AppError, feed::FeedService, moderation::ModerationService,
        pagination::FeedPageRequest,
    },
    cache::{CacheConfig, CacheConsumer, CacheTrigger, EventQueue, FeedStore},
    config::{self, CliArgs, Command, FeedArgs, ModerateArgs},
    infra::{api::HttpFeedGateway, telemetry},
};

#[tokio::main]
async fn main() {
    if let Err(error) = run().await {
        report_application_error(&error);
        process::exit(1);
    }
}

fn report_application_error(error: &AppError) {
    if dispatcher::has_been_set() {
        error!(error = %error, "application error");
        return;
    }

    let subscriber = tracing_fmt().with_max_level(Level::ERROR).finish();
    let dispatch = Dispatch::new(subscriber);
    dispatcher::with_default(&dispatch, || {
        error!(error = %error, "application error");
    });
}

async fn run() -> Result<(), AppError> {
    let cli_args = CliArgs::parse();

    match cli_args.command {
        Command::Feed(args) => run_feed(cli_args.config_file, args).await,
        Command::Ban(args) => run_moderate(cli_args.config_file, args, Action::Ban).await,
        Command::Warn(args) => run_moderate(cli_args.config_file, args, Action::Warn).await,
    }
}

enum Action {
    Ban,
    Warn,
}

async fn run_feed(config_file: Option<PathBuf>, args: FeedArgs) -> Result<(), AppError> {
    let settings = config::Settings::load(config_file.as_deref(), &args.overrides)
        .map_err(|err| AppError::unexpected(format!("failed to load configuration: {err}")))?;

    telemetry::init(&settings.logging)?;

    let cache_config = CacheConfig::from(&settings.cache);
    let store = Arc::new(FeedStore::new(&cache_config));
    let gateway = Arc::new(HttpFeedGateway::new(&settings.api)?);
    let feed = FeedService::new(gateway, store);

    let mut accumulated = None;
    for page in 1..=args.pages {
        let request = FeedPageRequest::new(args.user, page, args.limit)
            .map_err(|err| AppError::validation(err.to_string()))?;
        let entry = feed.resolve(&request).await?;

        info!(
            target = "whistle::feed",
            page,
            shouts = entry.shouts.len(),
            total = entry.total,
            "Fetched feed page"
        );

        let exhausted = !entry.has_more();
        accumulated = Some(entry);
        if exhausted {
            break;
        }
    }

    if let Some(entry) = accumulated {
        let rendered = serde_json::to_string_pretty(&entry)
            .map_err(|err| AppError::unexpected(err.to_string()))?;
        println!("{rendered}");
    }

    Ok(())
}

async fn run_moderate(
    config_file: Option<PathBuf>,
    args: ModerateArgs,
    action: Action,
) -> Result<(), AppError> {
    let settings = config::Settings::load(config_file.as_deref(), &args.overrides)
        .map_err(|err| AppError::unexpected(format!("failed to load configuration: {err}")))?;

    telemetry::init(&settings.logging)?;

    let cache_config = CacheConfig::from(&settings.cache);
    let store = Arc::new(FeedStore::new(&cache_config));
    let queue = Arc::new(EventQueue::new());
    let consumer = Arc::new(CacheConsumer::new(
        cache_config.clone(),
        store,
        queue.clone(),
    ));
    let trigger = Arc::new(CacheTrigger::new(cache_config, queue, consumer));

    let gateway = Arc::new(HttpFeedGateway::new(&settings.api)?);
    let moderation = ModerationService::new(gateway, trigger);

    match action {
        Action::Ban => moderation.ban_user(args.user, &args.reason).await?,
        Action::Warn => moderation.warn_user(args.user, &args.reason).await?,
    }

    Ok(())
}
