//! Entry point: parse CLI, load configuration and dispatch to command handlers.

use clap::Parser;
use nfl_analytics::{
    cli::{Commands, NflCli},
    commands::{
        common::CommandContext,
        extract::{handle_extract, ExtractParams, ExtractRequest},
        inspect::{handle_schema, handle_stats, handle_validate},
        query::{handle_query, QueryParams, SqlSource},
        rankings::{handle_link_ecr, handle_refresh_raw_ecr, handle_summarize, handle_top, TopParams},
    },
    logging::init_logging,
    Config, NflError,
};
use tracing::error;

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let app = NflCli::parse();

    let mut config = Config::from_env()?;
    if let Some(path) = app.database {
        config.database_path = path;
    }
    if let Some(level) = app.log_level {
        config.log_level = level.to_lowercase();
    }
    init_logging(&config.log_level, config.log_file.as_deref())?;

    if let Err(e) = run(app.command, config).await {
        error!(error = %e, "Command failed");
        return Err(e.into());
    }
    Ok(())
}

async fn run(command: Commands, config: Config) -> nfl_analytics::Result<()> {
    let mut ctx = CommandContext::open(config)?;

    match command {
        Commands::Extract {
            seasons,
            workers,
            refresh_cache,
        } => {
            handle_extract(
                ctx,
                ExtractParams {
                    request: ExtractRequest::Seasons(seasons),
                    workers,
                    refresh_cache,
                },
            )
            .await
        }

        Commands::RefreshSeason {
            season,
            data_types,
            workers,
            refresh_cache,
        } => {
            handle_extract(
                ctx,
                ExtractParams {
                    request: ExtractRequest::Season {
                        season,
                        kinds: data_types,
                    },
                    workers,
                    refresh_cache,
                },
            )
            .await
        }

        Commands::RefreshWeek {
            season,
            week,
            refresh_cache,
        } => {
            handle_extract(
                ctx,
                ExtractParams {
                    request: ExtractRequest::Week { season, week },
                    workers: Some(1),
                    refresh_cache,
                },
            )
            .await
        }

        Commands::Query {
            sql,
            file,
            output,
            limit,
        } => {
            let sql = match (sql, file) {
                (Some(sql), _) => SqlSource::Inline(sql),
                (None, Some(file)) => SqlSource::File(file),
                (None, None) => {
                    return Err(NflError::Config {
                        message: "query needs --sql or --file".to_string(),
                    })
                }
            };
            handle_query(&ctx, QueryParams { sql, output, limit }).map(|_| ())
        }

        Commands::Validate => handle_validate(&ctx).map(|_| ()),
        Commands::Schema { data_type } => handle_schema(&ctx, data_type),
        Commands::Stats => handle_stats(&ctx),

        Commands::RefreshRawEcr { dir } => handle_refresh_raw_ecr(&mut ctx, dir.as_deref()).map(|_| ()),
        Commands::LinkEcr => handle_link_ecr(&mut ctx).map(|_| ()),
        Commands::Summarize => handle_summarize(&mut ctx).map(|_| ()),

        Commands::Top {
            season,
            system,
            position,
            limit,
            data_type,
        } => handle_top(
            &ctx,
            TopParams {
                season,
                system,
                position,
                limit,
                data_type,
            },
        )
        .map(|_| ()),
    }
}
