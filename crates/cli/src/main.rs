use std::path::Path;

use anyhow::{Context, Result, bail};
use clap::{Args, Parser, Subcommand};
use groundwork_api::{GeocodingClient, ProspectClient};
use groundwork_engine::{ClientTable, Column, FormController, FormMode, SubmitError, normalize_place};
use groundwork_types::{Field, FormKind, ProspectId};
use groundwork_util::{Locale, Localizer, MessageKey, SiteConfig, log_directory};
use serde_json::Value;
use tracing::info;
use tracing_appender::non_blocking::WorkerGuard;
use tracing_subscriber::EnvFilter;

const LOG_FILE_NAME: &str = "groundwork.log";

#[derive(Debug, Parser)]
#[command(name = "groundwork", version, about = "Lead intake for Groundwork Builders")]
struct Cli {
    /// Prospect service base URL (overrides GROUNDWORK_SERVER_URL).
    #[arg(long, global = true)]
    server_url: Option<String>,

    /// Interface language: en or es (overrides GROUNDWORK_LOCALE).
    #[arg(long, global = true)]
    locale: Option<Locale>,

    #[command(subcommand)]
    command: Option<Command>,
}

#[derive(Debug, Subcommand)]
enum Command {
    /// Manage stored prospects.
    Prospects {
        #[command(subcommand)]
        action: ProspectsCommand,
    },
    /// Validate and send a contact request.
    Contact(ContactArgs),
    /// Print address suggestions for free text.
    Geocode { text: String },
}

#[derive(Debug, Subcommand)]
enum ProspectsCommand {
    List,
    Show { id: String },
    Delete { id: String },
}

#[derive(Debug, Args)]
struct ContactArgs {
    #[arg(long)]
    name: String,
    #[arg(long)]
    email: String,
    #[arg(long)]
    last_name: Option<String>,
    #[arg(long)]
    phone: Option<String>,
    #[arg(long)]
    address: Option<String>,
    #[arg(long)]
    city: Option<String>,
    #[arg(long)]
    state: Option<String>,
    #[arg(long)]
    postal: Option<String>,
    #[arg(long)]
    message: Option<String>,
}

impl ContactArgs {
    fn values(&self) -> Vec<(Field, &str)> {
        let optional = [
            (Field::LastName, &self.last_name),
            (Field::Phone, &self.phone),
            (Field::Address, &self.address),
            (Field::City, &self.city),
            (Field::State, &self.state),
            (Field::Postal, &self.postal),
            (Field::Message, &self.message),
        ];
        let mut values = vec![(Field::Name, self.name.as_str()), (Field::Email, self.email.as_str())];
        values.extend(optional.into_iter().filter_map(|(field, value)| value.as_deref().map(|value| (field, value))));
        values
    }
}

#[tokio::main]
async fn main() -> Result<()> {
    let cli = Cli::parse();
    let config = resolve_config(&cli)?;

    let Some(command) = cli.command else {
        // The terminal UI owns stdout/stderr, so logs go to a file.
        let _guard = init_file_tracing(&log_directory());
        return groundwork_tui::run(config).await;
    };

    init_tracing();
    match command {
        Command::Prospects { action } => run_prospects(&config, action).await,
        Command::Contact(args) => run_contact(&config, &args).await,
        Command::Geocode { text } => run_geocode(&config, &text).await,
    }
}

fn resolve_config(cli: &Cli) -> Result<SiteConfig> {
    let mut config = SiteConfig::from_env().context("reading configuration from the environment")?;
    if let Some(server_url) = cli.server_url.as_deref() {
        config = config.with_server_url(server_url).context("invalid --server-url")?;
    }
    if let Some(locale) = cli.locale {
        config = config.with_locale(locale);
    }
    Ok(config)
}

fn init_tracing() {
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info"));
    let _ = tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .try_init();
}

/// Install a file subscriber. Returns the writer guard, which must live as
/// long as logging should continue; `None` when the log directory cannot be
/// created or a subscriber is already installed.
fn init_file_tracing(log_dir: &Path) -> Option<WorkerGuard> {
    std::fs::create_dir_all(log_dir).ok()?;
    let file_appender = tracing_appender::rolling::never(log_dir, LOG_FILE_NAME);
    let (writer, guard) = tracing_appender::non_blocking(file_appender);
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info"));
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_ansi(false)
        .with_writer(writer)
        .try_init()
        .ok()?;
    Some(guard)
}

async fn run_prospects(config: &SiteConfig, action: ProspectsCommand) -> Result<()> {
    let client = ProspectClient::new(config)?;
    match action {
        ProspectsCommand::List => {
            let rows = client.list().await.context("listing prospects")?;
            let localizer = Localizer::new(config.locale);
            let mut table = ClientTable::new(prospect_columns(&localizer));
            table.set_rows(rows);
            if table.is_empty() {
                println!("{}", localizer.text(MessageKey::ProspectsEmpty));
                return Ok(());
            }
            let header: Vec<&str> = table.columns().iter().map(|column| column.header.as_str()).collect();
            println!("ID\t{}", header.join("\t"));
            for row in table.visible_rows() {
                println!("{}", listing_line(&table, row));
            }
        }
        ProspectsCommand::Show { id } => {
            let record = client.get(&ProspectId::new(id)).await.context("fetching prospect")?;
            println!("{}", serde_json::to_string_pretty(&record)?);
        }
        ProspectsCommand::Delete { id } => {
            let id = ProspectId::new(id);
            client.delete(&id).await.context("deleting prospect")?;
            info!(%id, "prospect deleted");
            println!("deleted {id}");
        }
    }
    Ok(())
}

fn prospect_columns(localizer: &Localizer) -> Vec<Column> {
    let mut columns: Vec<Column> = [Field::Name, Field::LastName, Field::Email, Field::Phone, Field::City]
        .into_iter()
        .map(|field| Column::new(field.as_str(), localizer.field_label(field)))
        .collect();
    columns.push(Column::new("contactDate", localizer.text(MessageKey::ColumnContactDate)));
    columns
}

/// One tab-separated listing row, led by the prospect id under whichever
/// key the backend used for it.
fn listing_line(table: &ClientTable, row: &Value) -> String {
    let id = ProspectId::from_record(row).map(|id| id.to_string()).unwrap_or_default();
    let cells = table.columns().iter().map(|column| table.cell_text(row, column));
    std::iter::once(id).chain(cells).collect::<Vec<_>>().join("\t")
}

async fn run_contact(config: &SiteConfig, args: &ContactArgs) -> Result<()> {
    let localizer = Localizer::new(config.locale);
    let client = ProspectClient::new(config)?;
    let mut controller = FormController::new(FormKind::Contact, FormMode::Contact);
    for (field, value) in args.values() {
        controller.set_field(field, value);
    }

    match controller.submit(&client).await {
        Ok(()) => {
            println!("{}", localizer.text(MessageKey::SubmitSucceeded));
            Ok(())
        }
        Err(SubmitError::Invalid(errors)) => {
            for (field, issue) in errors.iter() {
                eprintln!("{}: {}", localizer.field_label(field), localizer.validation_message(issue));
            }
            bail!(localizer.text(MessageKey::IncompleteForm))
        }
        Err(error) => Err(error).context(localizer.text(MessageKey::SubmitFailed)),
    }
}

async fn run_geocode(config: &SiteConfig, text: &str) -> Result<()> {
    let client = GeocodingClient::new(config)?;
    let places = client.search(text).await.context("looking up address")?;
    for suggestion in places.into_iter().map(normalize_place) {
        println!("{}", suggestion.label);
        println!("    {} | {}, {} {}", suggestion.street(), suggestion.city, suggestion.state, suggestion.postal);
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use clap::CommandFactory;

    use super::*;

    #[test]
    fn cli_definition_is_consistent() {
        Cli::command().debug_assert();
    }

    #[test]
    fn no_subcommand_means_terminal_ui() {
        let cli = Cli::try_parse_from(["groundwork", "--locale", "es"]).unwrap();
        assert!(cli.command.is_none());
        assert_eq!(cli.locale, Some(Locale::Es));
    }

    #[test]
    fn contact_args_skip_missing_optionals() {
        let cli = Cli::try_parse_from([
            "groundwork",
            "contact",
            "--name",
            "Jane",
            "--email",
            "jane@example.com",
            "--phone",
            "5551234567",
        ])
        .unwrap();
        let Some(Command::Contact(args)) = cli.command else {
            panic!("expected the contact subcommand");
        };
        assert_eq!(
            args.values(),
            [(Field::Name, "Jane"), (Field::Email, "jane@example.com"), (Field::Phone, "5551234567")]
        );
    }

    #[test]
    fn prospect_subcommands_parse() {
        let cli = Cli::try_parse_from(["groundwork", "prospects", "show", "p1", "--server-url", "http://localhost:9000"]).unwrap();
        assert!(matches!(cli.command, Some(Command::Prospects { action: ProspectsCommand::Show { ref id } }) if id == "p1"));
        assert_eq!(cli.server_url.as_deref(), Some("http://localhost:9000"));
    }

    #[test]
    fn listing_lines_lead_with_either_id_key() {
        let mut table = ClientTable::new(prospect_columns(&Localizer::new(Locale::En)));
        table.set_rows(vec![
            serde_json::json!({"id": 7, "name": "Jane"}),
            serde_json::json!({"_id": "abc", "name": "Bob"}),
            serde_json::json!({"name": "Nobody"}),
        ]);
        let lines: Vec<String> = table.visible_rows().map(|row| listing_line(&table, row)).collect();
        assert!(lines.iter().any(|line| line.starts_with("7\tJane\t")), "{lines:?}");
        assert!(lines.iter().any(|line| line.starts_with("abc\tBob\t")), "{lines:?}");
        assert!(lines.iter().any(|line| line.starts_with("\tNobody\t")), "{lines:?}");
        assert_eq!(table.columns().last().map(|column| column.key.as_str()), Some("contactDate"));
    }
}
