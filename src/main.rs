//! clinic-lang 命令行入口

use std::io::{self, BufRead, Write};
use std::path::{Path, PathBuf};
use std::process;

use clap::{Parser, Subcommand};
use tracing_subscriber::EnvFilter;

use clinic_lang::core::{
    print_error_message, print_info_message, read_input, render_notifications, write_output,
    DocumentProcessor, EncodingProcessor, LangOptions, OutputFormatter,
};
use clinic_lang::env::{self, EnvVar};
use clinic_lang::notification::Notifier;
use clinic_lang::storage::RedbStore;
use clinic_lang::translation::{ConfigManager, LangConfig, LangResult, LanguageCode, LanguageSwitcher};
use clinic_lang::ui::{
    run_bulk_delete, BulkDeleteClient, BulkOutcome, CartController, FormValidator, ModalManager,
};

#[derive(Parser, Debug)]
#[command(
    name = "clinic-lang",
    version,
    about = "Switch clinic admin pages between French and English"
)]
struct Cli {
    /// Preference store (redb file)
    #[arg(long, value_name = "PATH", global = true)]
    store: Option<PathBuf>,

    /// Configuration file
    #[arg(long, value_name = "PATH", global = true)]
    config: Option<PathBuf>,

    /// Only log errors
    #[arg(short, long, global = true)]
    silent: bool,

    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// Switch a page to the given language and remember the choice
    Switch {
        input: PathBuf,
        /// Target language (fr or en)
        #[arg(short, long, value_name = "CODE")]
        lang: String,
        /// Output file (stdout when omitted)
        #[arg(short, long, value_name = "PATH")]
        output: Option<PathBuf>,
        /// Write the confirmation notification into the page
        #[arg(long)]
        notifications: bool,
    },
    /// Apply the remembered language to a page
    Init {
        input: PathBuf,
        #[arg(short, long, value_name = "PATH")]
        output: Option<PathBuf>,
        #[arg(long)]
        notifications: bool,
    },
    /// Check the required fields of the page's forms
    Validate {
        input: PathBuf,
        /// Form id to check (repeatable, defaults to the configured forms)
        #[arg(long = "form", value_name = "ID")]
        forms: Vec<String>,
    },
    /// Manage the store cart
    Cart {
        #[command(subcommand)]
        action: CartAction,
    },
    /// Open or close the dialogs of a page
    Modal {
        input: PathBuf,
        #[command(subcommand)]
        action: ModalAction,
        #[arg(short, long, value_name = "PATH", global = true)]
        output: Option<PathBuf>,
    },
    /// Delete the clients checked on a page
    BulkDelete {
        input: PathBuf,
        /// Base URL of the clinic application
        #[arg(long, value_name = "URL")]
        base_url: Option<String>,
        /// Skip the confirmation prompt
        #[arg(short, long)]
        yes: bool,
        #[arg(short, long, value_name = "PATH")]
        output: Option<PathBuf>,
    },
}

#[derive(Subcommand, Debug)]
enum CartAction {
    Add {
        id: u64,
        name: String,
        price: f64,
    },
    Remove {
        id: u64,
    },
    /// Change the quantity of a product (removed at zero)
    Qty {
        id: u64,
        #[arg(allow_hyphen_values = true)]
        change: i64,
    },
    Clear,
    /// List the cart, optionally rendering it into a store page
    Show {
        /// Store page whose cart summary and cart modal are refreshed
        #[arg(long, value_name = "PATH")]
        page: Option<PathBuf>,
        #[arg(short, long, value_name = "PATH", requires = "page")]
        output: Option<PathBuf>,
    },
    Checkout,
}

#[derive(Subcommand, Debug)]
enum ModalAction {
    Open { id: String },
    /// Close a dialog and reset its form
    Close { id: String },
    CloseAll,
}

#[tokio::main]
async fn main() {
    let cli = Cli::parse();
    init_logging(cli.silent);

    let code = match run(cli).await {
        Ok(code) => code,
        Err(e) => {
            tracing::error!("{}", e);
            print_error_message(&format!("Error: {}", e));
            1
        }
    };

    process::exit(code);
}

fn init_logging(silent: bool) {
    let level = if silent {
        "error".to_string()
    } else {
        env::core::LogLevel::get().unwrap_or_else(|e| {
            eprintln!("{}", e);
            "info".to_string()
        })
    };
    let no_color = env::core::NoColor::get_or_default(false);

    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::new(level))
        .with_writer(io::stderr)
        .with_ansi(!no_color)
        .with_target(false)
        .init();
}

async fn run(cli: Cli) -> LangResult<i32> {
    let env_config = env::EnvConfig::from_env()
        .map_err(|e| clinic_lang::LangError::ConfigError(e.to_string()))?;

    let config_path = cli
        .config
        .clone()
        .or_else(|| env_config.config_path.as_ref().map(PathBuf::from));
    let config = ConfigManager::load(config_path.as_deref())?.into_config();

    let store_path = cli
        .store
        .clone()
        .or_else(|| env_config.store_path.as_ref().map(PathBuf::from))
        .unwrap_or_else(|| config.store_path());

    match cli.command {
        Command::Switch {
            input,
            lang,
            output,
            notifications,
        } => {
            if LanguageCode::parse(&lang).is_none() {
                print_error_message(&format!("Unrecognised language code '{}' (use fr or en)", lang));
                return Ok(2);
            }
            let store = RedbStore::open(&store_path)?;
            let mut switcher = LanguageSwitcher::from_config(config, store)?;
            let notifier = switcher.notifier().clone();
            let options = page_options(notifications);

            let processed = DocumentProcessor::new(&options).process_document(
                &read_input(&input)?,
                Some(&notifier),
                |dom| switcher.select_language(dom, &lang),
            )?;
            write_output(output.as_deref(), &processed.data)?;

            if let Some(outcome) = processed.outcome {
                tracing::info!(
                    "{}: {} / {} surfaces replaced",
                    outcome.target,
                    outcome.report.replaced,
                    outcome.report.visited
                );
            }
            Ok(0)
        }
        Command::Init {
            input,
            output,
            notifications,
        } => {
            let store = RedbStore::open(&store_path)?;
            let mut switcher = LanguageSwitcher::from_config(config, store)?;
            let notifier = switcher.notifier().clone();
            let options = page_options(notifications);

            let processed = DocumentProcessor::new(&options).process_document(
                &read_input(&input)?,
                Some(&notifier),
                |dom| switcher.initialize(dom),
            )?;
            write_output(output.as_deref(), &processed.data)?;
            Ok(0)
        }
        Command::Validate { input, forms } => {
            let form_ids = if forms.is_empty() {
                config.forms.form_ids.clone()
            } else {
                forms
            };
            let validator = FormValidator::new(config.forms.invalid_class.clone());
            let notifier = Notifier::new(config.notifications.profiles.clone());
            let options = LangOptions::default();

            let processed = DocumentProcessor::new(&options).process_document(
                &read_input(&input)?,
                None,
                |dom| validator.validate_forms(&dom.document, form_ids.as_slice(), &notifier),
            )?;

            let mut valid = true;
            for report in &processed.outcome {
                let id = report.form_id.as_deref().unwrap_or("?");
                if report.is_valid() {
                    print_info_message(&format!("#{}: ok ({} required fields)", id, report.checked));
                } else {
                    valid = false;
                    print_info_message(&format!(
                        "#{}: missing {}",
                        id,
                        report.invalid_fields.join(", ")
                    ));
                }
            }
            print_notifications(&notifier);

            Ok(if valid { 0 } else { 1 })
        }
        Command::Cart { action } => run_cart(action, &config, &store_path),
        Command::Modal {
            input,
            action,
            output,
        } => {
            let modals = ModalManager::new(config.forms.invalid_class.clone());
            let processed = DocumentProcessor::new(&LangOptions::default()).process_document(
                &read_input(&input)?,
                None,
                |dom| match &action {
                    ModalAction::Open { id } => modals.open(&dom.document, id),
                    ModalAction::Close { id } => modals.close(&dom.document, id),
                    ModalAction::CloseAll => {
                        modals.close_all(&dom.document);
                        true
                    }
                },
            )?;

            if !processed.outcome {
                print_error_message("Dialog not found");
                return Ok(1);
            }
            write_output(output.as_deref(), &processed.data)?;
            Ok(0)
        }
        Command::BulkDelete {
            input,
            base_url,
            yes,
            output,
        } => {
            let base_url = base_url
                .or(env_config.base_url)
                .ok_or_else(|| clinic_lang::LangError::ConfigError(
                    "--base-url or CLINIC_LANG_BASE_URL is required".to_string(),
                ))?;
            let client = BulkDeleteClient::with_endpoint(&base_url, &config.bulk.endpoint)?;
            let notifier = Notifier::new(config.notifications.profiles.clone());

            // 删除请求需要跨越 await，这里不经过同步的 DocumentProcessor
            let input_data = read_input(&input)?;
            let (dom, encoding) = EncodingProcessor::new().process_encoding(&input_data, None)?;

            let outcome = run_bulk_delete(&dom.document, &client, &notifier, |message| {
                yes || confirm(message).unwrap_or_else(|e| {
                    tracing::warn!("无法读取确认输入: {}", e);
                    false
                })
            })
            .await;
            print_notifications(&notifier);

            if output.is_some() {
                render_notifications(&dom, &notifier);
                let data = OutputFormatter::new().format_output(dom, &encoding)?;
                write_output(output.as_deref(), &data)?;
            }

            Ok(match outcome {
                BulkOutcome::Deleted { .. } | BulkOutcome::Cancelled => 0,
                _ => 1,
            })
        }
    }
}

fn run_cart(action: CartAction, config: &LangConfig, store_path: &Path) -> LangResult<i32> {
    let store = RedbStore::open(store_path)?;
    let mut controller = CartController::new(store, Notifier::new(config.notifications.profiles.clone()));

    let code = match action {
        CartAction::Add { id, name, price } => {
            controller.add_to_cart(id, &name, price)?;
            0
        }
        CartAction::Remove { id } => {
            controller.remove_from_cart(id)?;
            0
        }
        CartAction::Qty { id, change } => match controller.update_quantity(id, change)? {
            Some(_) => 0,
            None => {
                print_error_message(&format!("Product {} is not in the cart", id));
                1
            }
        },
        CartAction::Clear => {
            controller.clear_cart()?;
            0
        }
        CartAction::Show { page, output } => {
            if let Some(page) = page {
                let processed = DocumentProcessor::new(&LangOptions::default()).process_document(
                    &read_input(&page)?,
                    None,
                    |dom| controller.render_page(dom),
                )?;
                write_output(output.as_deref(), &processed.data)?;
                print_notifications(controller.notifier());
                return Ok(0);
            }
            for item in controller.cart().items() {
                print_info_message(&format!(
                    "{}\t{}\t{} x {}",
                    item.id,
                    item.name,
                    item.quantity,
                    clinic_lang::ui::cart::format_price(item.price)
                ));
            }
            print_info_message(&format!(
                "{} item(s), total {}",
                controller.cart().total_items(),
                controller.cart().formatted_total()
            ));
            0
        }
        CartAction::Checkout => {
            if controller.checkout() {
                0
            } else {
                1
            }
        }
    };

    print_notifications(controller.notifier());
    Ok(code)
}

fn page_options(notifications: bool) -> LangOptions {
    LangOptions {
        render_notifications: notifications,
        ..Default::default()
    }
}

fn print_notifications(notifier: &Notifier) {
    for notification in notifier.active() {
        print_info_message(&notification.message);
    }
}

fn confirm(message: &str) -> io::Result<bool> {
    let mut stderr = io::stderr();
    writeln!(stderr, "{}", message)?;
    write!(stderr, "[y/N] ")?;
    stderr.flush()?;

    let mut answer = String::new();
    io::stdin().lock().read_line(&mut answer)?;
    Ok(matches!(answer.trim().to_lowercase().as_str(), "y" | "yes"))
}
