use clap::{Parser, Subcommand};

use crate::{
    api::items_client::HttpItemsApi,
    config::{BoardConfig, API_URL, DEFAULT_USER_ID},
    item_commands::CreateArgs,
    ui::app::App,
    utils::{config_path, save_config_to},
};

mod api;
mod config;
mod errors;
mod intents;
mod item_commands;
mod models;
mod ui;
mod utils;

#[derive(Debug, Subcommand)]
enum Commands {
    /// Print the items of a user
    #[clap(alias = "ls")]
    List {
        /// Dump the raw collection as json
        #[clap(long)]
        json: bool,
    },
    /// Create a new item, prompting for anything not given
    #[clap(alias = "c")]
    Create {
        #[clap(short, long)]
        title: Option<String>,
        #[clap(long)]
        description: Option<String>,
        #[clap(short, long)]
        category: Option<String>,
        /// YYYY-MM-DD or YYYY-MM-DDTHH:MM
        #[clap(short, long)]
        due: Option<String>,
    },
    /// Mark an item done
    Done { id: String },
    /// Remember the api url and default user
    Config {
        #[clap(long)]
        api_url: Option<String>,
        #[clap(long)]
        default_user: Option<String>,
    },
}

#[derive(Debug, Parser)]
#[clap(author, version, about, long_about = "Browse and complete items from the command line")]
struct BoardArgs {
    /// Api host, e.g. localhost:8080
    #[clap(short = 'a', long = "api-url")]
    api_url: Option<String>,

    /// User whose items are shown
    #[clap(short = 'u', long = "user")]
    user: Option<String>,

    #[clap(subcommand)]
    command: Option<Commands>,
}

fn init_logger(board: bool) {
    let default_filter = if board { "off" } else { "warn" };

    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or(default_filter))
        .init();
}

fn save_config(api_url: Option<String>, default_user: Option<String>) -> anyhow::Result<()> {
    let path = config_path().ok_or_else(|| anyhow::anyhow!("No home directory found"))?;

    let mut config = utils::read_config_from(&path).unwrap_or_else(|_| BoardConfig::default());

    if api_url.is_some() {
        config.api_url = api_url;
    }
    if default_user.is_some() {
        config.default_user_id = default_user;
    }

    save_config_to(&path, &config).map_err(|e| anyhow::anyhow!(e.to_string()))?;

    println!("Saved {}", path.display());

    Ok(())
}

fn run(args: BoardArgs) -> anyhow::Result<()> {
    let api_url = args.api_url.unwrap_or_else(|| API_URL.clone());
    let user_id = args.user.unwrap_or_else(|| DEFAULT_USER_ID.clone());

    let api = HttpItemsApi::new(api_url);
    let stdout = std::io::stdout();

    log::debug!("Using api at {}", api.base_url());

    match args.command {
        None => ui::item_board::run_board(&api, App::new(user_id, api.base_url().to_string())),
        Some(Commands::List { json }) => {
            item_commands::list_items(&api, &user_id, json, stdout.lock())
        }
        Some(Commands::Create {
            title,
            description,
            category,
            due,
        }) => {
            let create_args = CreateArgs {
                title,
                description,
                category,
                due,
            };

            item_commands::create_item(&api, &user_id, create_args, stdout.lock())
        }
        Some(Commands::Done { id }) => {
            item_commands::mark_done(&api, &id, &user_id, stdout.lock())
        }
        Some(Commands::Config {
            api_url,
            default_user,
        }) => save_config(api_url, default_user),
    }
}

fn main() {
    dotenv::dotenv().ok();

    let args = BoardArgs::parse();

    init_logger(args.command.is_none());

    if let Err(e) = run(args) {
        eprintln!("{}", e);
        std::process::exit(1);
    }
}
