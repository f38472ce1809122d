//! App Store Connect API CLI binary.
//!
//! A command-line interface for interacting with the App Store Connect API.

use ascapi::cli::{Cli, Command, Entity};
use ascapi::{
    get_submission_for_app_store_version, AppPreview, AppPreviewUpdateAttributes, AscClient,
    AscError, AppStoreVersionSubmission, BetaLicenseAgreement, BetaLicenseAgreementUpdateAttributes,
    Create, Delete, Get, GetAppPreviewQuery, GetAppStoreVersionSubmissionForAppStoreVersionQuery,
    GetBetaLicenseAgreementQuery, List, ListBetaLicenseAgreementsQuery, Page, PrettyPrint,
    Resource, ResourceKind, Update, UpdateRequest,
};
use clap::Parser;
use serde::Serialize;
use std::process::ExitCode;
use tabled::{Table, Tabled};
use tracing_subscriber::EnvFilter;

/// Longest agreement excerpt shown in list tables.
const EXCERPT_LEN: usize = 48;

#[tokio::main]
async fn main() -> ExitCode {
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("warn")),
        )
        .with_writer(std::io::stderr)
        .init();

    let cli = Cli::parse();

    let client = match AscClient::from_env() {
        Ok(c) => c,
        Err(e) => {
            eprintln!("Error: {e}");
            eprintln!("Hint: Set ASC_API_TOKEN to a signed App Store Connect JWT");
            return ExitCode::FAILURE;
        }
    };

    match run(&client, cli).await {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => {
            eprintln!("Error: {e}");
            ExitCode::FAILURE
        }
    }
}

async fn run(client: &AscClient, cli: Cli) -> ascapi::Result<()> {
    match cli.command {
        Command::Get {
            entity,
            id,
            include,
        } => handle_get(client, entity, &id, include, cli.json).await,
        Command::List {
            entity,
            limit,
            cursor,
            app,
            all,
        } => handle_list(client, entity, limit, cursor.as_deref(), app, all, cli.json).await,
        Command::Update {
            entity,
            id,
            agreement_text,
            preview_frame_time_code,
            source_file_checksum,
            uploaded,
        } => {
            let changes = Changes {
                agreement_text,
                preview_frame_time_code,
                source_file_checksum,
                uploaded,
            };
            handle_update(client, entity, &id, changes, cli.json).await
        }
        Command::Submit { version } => handle_submit(client, &version, cli.json).await,
        Command::Delete { entity, id } => handle_delete(client, entity, &id, cli.json).await,
    }
}

async fn handle_get(
    client: &AscClient,
    entity: Entity,
    id: &str,
    include: Vec<String>,
    json: bool,
) -> ascapi::Result<()> {
    match entity {
        Entity::Agreement => {
            let query = GetBetaLicenseAgreementQuery {
                include,
                ..Default::default()
            };
            let response = BetaLicenseAgreement::get(client, id, &query).await?;
            output_single(&response.body.data, json)?;
        }
        Entity::Preview => {
            let query = GetAppPreviewQuery {
                include,
                ..Default::default()
            };
            let response = AppPreview::get(client, id, &query).await?;
            output_single(&response.body.data, json)?;
        }
        Entity::Submission => {
            let query = GetAppStoreVersionSubmissionForAppStoreVersionQuery {
                include,
                ..Default::default()
            };
            let response = get_submission_for_app_store_version(client, id, &query).await?;
            output_single(&response.body.data, json)?;
        }
    }
    Ok(())
}

async fn handle_list(
    client: &AscClient,
    entity: Entity,
    limit: Option<u32>,
    cursor: Option<&str>,
    app: Vec<String>,
    all: bool,
    json: bool,
) -> ascapi::Result<()> {
    match entity {
        Entity::Agreement => {
            let query = ListBetaLicenseAgreementsQuery {
                filter_app: app,
                limit,
                ..Default::default()
            };
            if all {
                let agreements = BetaLicenseAgreement::list_all(client, &query).await?;
                output_rows(&agreements, json, |a| AgreementRow::from(a))?;
            } else {
                let response = BetaLicenseAgreement::list_page(client, &query, cursor).await?;
                let page = Page::from(response.into_body());
                output_page(&page, json, |a| AgreementRow::from(a))?;
            }
        }
        Entity::Preview | Entity::Submission => {
            eprintln!("Error: Only beta license agreements can be listed");
            eprintln!("Hint: Use 'ascapi get preview <id>' or 'ascapi get submission <version-id>'");
            return Err(AscError::InvalidArgument(format!(
                "{} cannot be listed",
                entity_type(entity)
            )));
        }
    }
    Ok(())
}

/// Attribute flags collected from `ascapi update`.
struct Changes {
    agreement_text: Option<String>,
    preview_frame_time_code: Option<String>,
    source_file_checksum: Option<String>,
    uploaded: Option<bool>,
}

async fn handle_update(
    client: &AscClient,
    entity: Entity,
    id: &str,
    changes: Changes,
    json: bool,
) -> ascapi::Result<()> {
    match entity {
        Entity::Agreement => {
            let agreement_text = changes.agreement_text.ok_or_else(|| {
                AscError::InvalidArgument("--agreement-text required for agreements".to_string())
            })?;
            let body = UpdateRequest::<BetaLicenseAgreement>::new(id).attributes(
                BetaLicenseAgreementUpdateAttributes {
                    agreement_text: Some(agreement_text),
                },
            );
            let response = BetaLicenseAgreement::update(client, id, &body).await?;
            output_single(&response.body.data, json)?;
        }
        Entity::Preview => {
            let attributes = AppPreviewUpdateAttributes {
                preview_frame_time_code: changes.preview_frame_time_code,
                source_file_checksum: changes.source_file_checksum,
                uploaded: changes.uploaded,
            };
            if attributes == AppPreviewUpdateAttributes::default() {
                return Err(AscError::InvalidArgument(
                    "nothing to update; pass --preview-frame-time-code, --source-file-checksum or --uploaded"
                        .to_string(),
                ));
            }
            let body = UpdateRequest::<AppPreview>::new(id).attributes(attributes);
            let response = AppPreview::update(client, id, &body).await?;
            output_single(&response.body.data, json)?;
        }
        Entity::Submission => {
            eprintln!("Error: Submissions cannot be modified");
            eprintln!("Hint: Use 'ascapi delete submission <id>' to withdraw it");
            return Err(AscError::InvalidArgument(
                "submissions do not support update".to_string(),
            ));
        }
    }
    Ok(())
}

async fn handle_submit(client: &AscClient, version: &str, json: bool) -> ascapi::Result<()> {
    let body = AppStoreVersionSubmission::request_for_version(version);
    let response = AppStoreVersionSubmission::create(client, &body).await?;
    output_single(&response.body.data, json)
}

async fn handle_delete(
    client: &AscClient,
    entity: Entity,
    id: &str,
    json: bool,
) -> ascapi::Result<()> {
    let response = match entity {
        Entity::Preview => AppPreview::delete(client, id).await?,
        Entity::Submission => AppStoreVersionSubmission::delete(client, id).await?,
        Entity::Agreement => {
            return Err(AscError::InvalidArgument(
                "beta license agreements cannot be deleted".to_string(),
            ));
        }
    };

    if json {
        let summary = serde_json::json!({
            "type": entity_type(entity),
            "id": id,
            "status": response.status.as_u16(),
        });
        println!("{}", to_json(&summary)?);
    } else {
        println!("Deleted {} {}", entity_type(entity), id);
    }
    Ok(())
}

fn entity_type(entity: Entity) -> &'static str {
    match entity {
        Entity::Agreement => BetaLicenseAgreement::TYPE,
        Entity::Preview => AppPreview::TYPE,
        Entity::Submission => AppStoreVersionSubmission::TYPE,
    }
}

fn to_json<T: Serialize + ?Sized>(value: &T) -> ascapi::Result<String> {
    serde_json::to_string_pretty(value).map_err(|e| AscError::Encoding(e.to_string()))
}

fn output_single<T: Serialize + PrettyPrint>(item: &T, json: bool) -> ascapi::Result<()> {
    if json {
        println!("{}", to_json(item)?);
    } else {
        println!("{}", item.pretty_print());
    }
    Ok(())
}

fn output_rows<T, R, F>(items: &[T], json: bool, to_row: F) -> ascapi::Result<()>
where
    T: Serialize,
    R: Tabled,
    F: Fn(&T) -> R,
{
    if json {
        println!("{}", to_json(items)?);
    } else {
        let rows: Vec<R> = items.iter().map(to_row).collect();
        println!("{}", Table::new(rows));
        println!("\n{} total items", items.len());
    }
    Ok(())
}

fn output_page<T, R, F>(page: &Page<T>, json: bool, to_row: F) -> ascapi::Result<()>
where
    T: Serialize,
    R: Tabled,
    F: Fn(&T) -> R,
{
    if json {
        println!("{}", to_json(&page.items)?);
    } else {
        let rows: Vec<R> = page.items.iter().map(to_row).collect();
        println!("{}", Table::new(rows));
        match (page.total, &page.next_cursor) {
            (Some(total), Some(cursor)) => {
                println!("\n{} of {} items (next: --cursor {})", page.len(), total, cursor)
            }
            (Some(total), None) => println!("\n{} of {} items (end)", page.len(), total),
            (None, Some(cursor)) => println!("\n{} items (next: --cursor {})", page.len(), cursor),
            (None, None) => println!("\n{} items (end)", page.len()),
        }
    }
    Ok(())
}

// Table row types for non-JSON output

#[derive(Tabled)]
struct AgreementRow {
    id: String,
    app: String,
    agreement: String,
}

impl From<&Resource<BetaLicenseAgreement>> for AgreementRow {
    fn from(a: &Resource<BetaLicenseAgreement>) -> Self {
        let text = a.agreement_text().unwrap_or_default();
        let mut agreement: String = text.chars().take(EXCERPT_LEN).collect();
        if text.chars().count() > EXCERPT_LEN {
            agreement.push('…');
        }
        Self {
            id: a.id.clone(),
            app: a.app_id().unwrap_or_default().to_string(),
            agreement,
        }
    }
}
