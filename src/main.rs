use std::path::PathBuf;
use std::process::ExitCode;

use clap::{Args, Parser, Subcommand};
use share_places::api::places::{self, NewPlace, PlaceUpdate};
use share_places::api::users;
use share_places::auth_flow::{self, AuthFlow, AuthFlowError};
use share_places::config::ConfigError;
use share_places::http::FileUpload;
use share_places::{AuthContext, ClientConfig, ErrorCode, HttpHook, RequestError};

#[derive(Debug, thiserror::Error)]
enum CliError {
    #[error("missing session token; pass --token or set SHARE_PLACES_TOKEN")]
    MissingToken,
    #[error(transparent)]
    Config(#[from] ConfigError),
    #[error(transparent)]
    Request(#[from] RequestError),
    #[error(transparent)]
    Auth(#[from] AuthFlowError),
    #[error("cannot read image {}: {source}", .path.display())]
    Image { path: PathBuf, source: std::io::Error },
    #[error("invalid JSON output: {0}")]
    Json(#[from] serde_json::Error),
}

impl ErrorCode for CliError {
    fn error_code(&self) -> &'static str {
        match self {
            Self::MissingToken => "E_MISSING_TOKEN",
            Self::Config(e) => e.error_code(),
            Self::Request(e) => e.error_code(),
            Self::Auth(e) => e.error_code(),
            Self::Image { .. } => "E_IMAGE_READ",
            Self::Json(_) => "E_JSON",
        }
    }

    fn retryable(&self) -> bool {
        match self {
            Self::Request(e) => e.retryable(),
            Self::Auth(e) => e.retryable(),
            _ => false,
        }
    }
}

#[derive(Parser, Debug)]
#[command(name = "share-places", about = "Share-places API client")]
struct Cli {
    /// Overrides `SHARE_PLACES_API_URL`.
    #[arg(long)]
    api_url: Option<String>,

    #[arg(long, env = "SHARE_PLACES_TOKEN")]
    token: Option<String>,

    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// List all users.
    Users,
    Login {
        #[arg(long)]
        email: String,
        #[arg(long)]
        password: String,
    },
    Signup {
        #[arg(long)]
        name: String,
        #[arg(long)]
        email: String,
        #[arg(long)]
        password: String,
        #[arg(long)]
        image: PathBuf,
    },
    /// List places created by a user.
    Places {
        user_id: String,
    },
    Place(PlaceCommand),
}

#[derive(Args, Debug)]
struct PlaceCommand {
    #[command(subcommand)]
    command: PlaceSubcommand,
}

#[derive(Subcommand, Debug)]
enum PlaceSubcommand {
    Get {
        place_id: String,
    },
    Create {
        #[arg(long)]
        title: String,
        #[arg(long)]
        description: String,
        #[arg(long)]
        address: String,
        #[arg(long)]
        image: PathBuf,
    },
    Update {
        place_id: String,
        #[arg(long)]
        title: String,
        #[arg(long)]
        description: String,
    },
    Delete {
        place_id: String,
    },
}

#[tokio::main]
async fn main() -> ExitCode {
    let _ = dotenvy::dotenv();
    tracing_subscriber::fmt::init();

    let cli = Cli::parse();
    let config = match load_config(cli.api_url.as_deref()) {
        Ok(config) => config,
        Err(e) => return report(&e),
    };
    let hook = match HttpHook::new(&config) {
        Ok(hook) => hook,
        Err(e) => return report(&CliError::from(e)),
    };

    let outcome = tokio::select! {
        result = run(&hook, &config, cli.token.as_deref(), cli.command) => result,
        _ = tokio::signal::ctrl_c() => Err(CliError::Request(RequestError::Cancelled)),
    };
    hook.dispose();

    match outcome {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => report(&e),
    }
}

fn report(err: &CliError) -> ExitCode {
    eprintln!("error [{}]: {err}", err.error_code());
    if err.retryable() {
        eprintln!("(retryable)");
    }
    ExitCode::FAILURE
}

fn load_config(api_url: Option<&str>) -> Result<ClientConfig, CliError> {
    let mut config = ClientConfig::from_env()?;
    if let Some(url) = api_url {
        config.api_url = ClientConfig::new(url)?.api_url;
    }
    Ok(config)
}

fn require_token(token: Option<&str>) -> Result<&str, CliError> {
    token.filter(|t| !t.is_empty()).ok_or(CliError::MissingToken)
}

async fn read_image(path: PathBuf) -> Result<FileUpload, CliError> {
    FileUpload::from_path(&path)
        .await
        .map_err(|source| CliError::Image { path, source })
}

fn filled(value: &str) -> bool {
    !value.trim().is_empty()
}

async fn run(
    hook: &HttpHook,
    config: &ClientConfig,
    token: Option<&str>,
    command: Command,
) -> Result<(), CliError> {
    match command {
        Command::Users => {
            for user in users::list_users(hook, config).await? {
                println!(
                    "{}\t{}\t{}\t{}",
                    user.id,
                    user.name,
                    user.place_count_label(),
                    config.asset_url(&user.image)
                );
            }
        }
        Command::Login { email, password } => {
            let mut flow = AuthFlow::new();
            flow.input_handler(auth_flow::EMAIL, email.as_str(), filled(&email));
            flow.input_handler(auth_flow::PASSWORD, password.as_str(), filled(&password));
            print_session(&flow, hook, config).await?;
        }
        Command::Signup { name, email, password, image } => {
            let image = read_image(image).await?;
            let mut flow = AuthFlow::new();
            flow.toggle_mode();
            flow.input_handler(auth_flow::NAME, name.as_str(), filled(&name));
            flow.input_handler(auth_flow::IMAGE, image, true);
            flow.input_handler(auth_flow::EMAIL, email.as_str(), filled(&email));
            flow.input_handler(auth_flow::PASSWORD, password.as_str(), filled(&password));
            print_session(&flow, hook, config).await?;
        }
        Command::Places { user_id } => {
            let found = places::user_places(hook, config, &user_id).await?;
            println!("{}", serde_json::to_string_pretty(&found)?);
        }
        Command::Place(place) => run_place(hook, config, token, place.command).await?,
    }
    Ok(())
}

async fn run_place(
    hook: &HttpHook,
    config: &ClientConfig,
    token: Option<&str>,
    command: PlaceSubcommand,
) -> Result<(), CliError> {
    match command {
        PlaceSubcommand::Get { place_id } => {
            let place = places::get_place(hook, config, &place_id).await?;
            println!("{}", serde_json::to_string_pretty(&place)?);
        }
        PlaceSubcommand::Create { title, description, address, image } => {
            let token = require_token(token)?;
            let image = read_image(image).await?;
            let new_place = NewPlace { title, description, address, image };
            let place = places::create_place(hook, config, token, new_place).await?;
            println!("{}", serde_json::to_string_pretty(&place)?);
        }
        PlaceSubcommand::Update { place_id, title, description } => {
            let token = require_token(token)?;
            let update = PlaceUpdate { title, description };
            let place = places::update_place(hook, config, token, &place_id, &update).await?;
            println!("{}", serde_json::to_string_pretty(&place)?);
        }
        PlaceSubcommand::Delete { place_id } => {
            let token = require_token(token)?;
            places::delete_place(hook, config, token, &place_id).await?;
            println!("deleted {place_id}");
        }
    }
    Ok(())
}

async fn print_session(flow: &AuthFlow, hook: &HttpHook, config: &ClientConfig) -> Result<(), CliError> {
    let auth = AuthContext::new();
    let session = flow.submit(hook, config, &auth).await?;
    println!("user_id={}", session.user_id.unwrap_or_default());
    println!("token={}", session.token.unwrap_or_default());
    Ok(())
}
