//! # EcoCycle CLI
//!
//! Terminal client for the e-waste pickup service.

use std::path::PathBuf;
use std::process::ExitCode;

use clap::Parser;

mod cli;
mod config;
mod error;
mod guard;
mod handlers;
mod output;
mod prompt;
mod state;
mod telemetry;

use cli::{
    Cli, Command, LocationCommand, LoginOtpCommand, ProfileCommand, RegisterArgs,
    RequestsCommand, SubmitArgs, ThemeCommand, UpdateArgs,
};
use config::AppConfig;
use error::{AppError, AppResult};
use ewaste_core::domain::{RequestDraft, RequestQuery, WizardStep};
use handlers::requests::{RequestEdits, read_image, set_device_type};
use handlers::{auth, location, profile, requests, shell, theme};
use output::{Notice, RouteView, ThemeView, emit};
use state::AppState;
use telemetry::{TelemetryConfig, init_telemetry};

#[tokio::main]
async fn main() -> anyhow::Result<ExitCode> {
    // Load .env file if present
    dotenvy::dotenv().ok();

    let cli = Cli::parse();
    init_telemetry(&TelemetryConfig::from_env());

    let config = AppConfig::from_env().with_api_base_url(cli.api_base_url);
    let state = AppState::new(&config)?;

    match run(cli.command, &state, cli.json).await {
        Ok(()) => Ok(ExitCode::SUCCESS),
        Err(Failure::App(err)) => {
            output::error(&err, cli.json);
            Ok(ExitCode::FAILURE)
        }
        Err(Failure::Output(err)) => Err(err),
    }
}

enum Failure {
    App(AppError),
    Output(anyhow::Error),
}

impl From<AppError> for Failure {
    fn from(err: AppError) -> Self {
        Self::App(err)
    }
}

impl From<anyhow::Error> for Failure {
    fn from(err: anyhow::Error) -> Self {
        Self::Output(err)
    }
}

async fn run(command: Command, state: &AppState, json: bool) -> Result<(), Failure> {
    match command {
        Command::Login { email, password } => {
            let password = prompt::or_ask(password, "Password")?;
            emit(&auth::login(state, &email, &password).await?, json)?;
        }
        Command::LoginOtp { command } => {
            let nav = match command {
                LoginOtpCommand::Request { email } => auth::request_login_otp(state, &email).await?,
                LoginOtpCommand::Verify { email, otp } => {
                    auth::verify_login_otp(state, &email, &otp).await?
                }
            };
            emit(&nav, json)?;
        }
        Command::Register(args) => emit(&register(state, args).await?, json)?,
        Command::VerifyOtp { otp } => emit(&auth::verify_otp(state, &otp).await?, json)?,
        Command::ForgotPassword { email } => {
            emit(&auth::forgot_password(state, &email).await?, json)?
        }
        Command::ResetPassword {
            otp,
            password,
            confirm_password,
        } => {
            let password = prompt::or_ask(password, "New password")?;
            let confirm = prompt::or_ask(confirm_password, "Confirm password")?;
            emit(
                &auth::reset_password(state, &otp, &password, &confirm).await?,
                json,
            )?;
        }
        Command::Logout => emit(&auth::logout(state).await?, json)?,
        Command::Dashboard => emit(&shell::dashboard(state).await?, json)?,
        Command::Open { path } => {
            let route = shell::open(state, &path).await?;
            emit(&RouteView { route }, json)?;
        }
        Command::Profile { command } => match command {
            ProfileCommand::Show => emit(&profile::show(state).await?, json)?,
            ProfileCommand::Update { name, phone } => {
                emit(&profile::update(state, name, phone).await?, json)?
            }
            ProfileCommand::ChangePassword {
                old_password,
                new_password,
                confirm_password,
            } => {
                let old = prompt::or_ask(old_password, "Current password")?;
                let new = prompt::or_ask(new_password, "New password")?;
                let confirm = prompt::or_ask(confirm_password, "Confirm password")?;
                emit(
                    &profile::change_password(state, &old, &new, &confirm).await?,
                    json,
                )?;
            }
        },
        Command::Requests { command } => run_requests(command, state, json).await?,
        Command::Location { command } => match command {
            LocationCommand::Search { query } => {
                emit(&location::search(state, &query).await?, json)?
            }
            LocationCommand::Reverse { lat, lon } => {
                emit(&location::reverse(state, lat, lon).await, json)?
            }
            LocationCommand::Default => emit(&location::default_location(), json)?,
        },
        Command::Theme { command } => {
            let current = match command {
                Some(ThemeCommand::Toggle) => theme::toggle(state).await?,
                None => theme::current(state).await?,
            };
            emit(
                &ThemeView {
                    theme: current.as_str(),
                },
                json,
            )?;
        }
    }
    Ok(())
}

async fn run_requests(command: RequestsCommand, state: &AppState, json: bool) -> Result<(), Failure> {
    match command {
        RequestsCommand::Submit(args) => {
            let draft = submit_draft(state, args).await?;
            emit(&requests::submit(state, draft).await?, json)?;
        }
        RequestsCommand::List {
            search,
            status,
            no_images,
        } => {
            let query = RequestQuery::new(search, status);
            emit(&requests::list(state, &query, !no_images).await?, json)?;
        }
        RequestsCommand::Track { id } => emit(&requests::track(state, id).await?, json)?,
        RequestsCommand::Update(args) => {
            let id = args.id;
            let edits = update_edits(args).await?;
            emit(&requests::update(state, id, edits).await?, json)?;
        }
        RequestsCommand::Delete { id, yes } => {
            let confirmed = yes || prompt::confirm(&format!("Delete request #{id}?"))?;
            let message = requests::delete(state, id, confirmed).await?;
            emit(&Notice { message }, json)?;
        }
        RequestsCommand::Image { id, out } => {
            emit(&requests::save_image(state, id, &out).await?, json)?
        }
    }
    Ok(())
}

async fn register(state: &AppState, args: RegisterArgs) -> AppResult<handlers::Navigation> {
    let password = prompt::or_ask(args.password, "Password")?;
    let confirm_password = prompt::or_ask(args.confirm_password, "Confirm password")?;
    auth::register(
        state,
        auth::RegisterForm {
            name: args.name,
            email: args.email,
            phone: args.phone,
            password,
            confirm_password,
        },
    )
    .await
}

/// Builds the draft from flags, asking step by step for whatever is missing.
async fn submit_draft(state: &AppState, args: SubmitArgs) -> AppResult<RequestDraft> {
    if args.brand.is_none() || args.model.is_none() {
        prompt::step(WizardStep::Device);
    }
    let mut draft = RequestDraft {
        brand: prompt::or_ask(args.brand, "Brand")?,
        model: prompt::or_ask(args.model, "Model")?,
        condition: args.condition,
        quantity: args.quantity,
        additional_remarks: args.remarks,
        ..RequestDraft::default()
    };
    set_device_type(&mut draft, &args.device_type);

    draft.pickup_address = match (args.address, args.pick.as_deref()) {
        (Some(address), _) => address,
        (None, Some([lat, lon])) => location::reverse(state, *lat, *lon).await.address,
        (None, _) => {
            prompt::step(WizardStep::Pickup);
            prompt::ask("Pickup address")?
        }
    };

    let image = match args.image {
        Some(path) => Some(path),
        None => {
            prompt::step(WizardStep::Confirm);
            let path = prompt::ask("Proof image path")?;
            (!path.trim().is_empty()).then(|| PathBuf::from(path.trim()))
        }
    };
    if let Some(path) = image {
        draft.image = Some(read_image(&path).await?);
    }
    Ok(draft)
}

async fn update_edits(args: UpdateArgs) -> AppResult<RequestEdits> {
    let image = match args.image {
        Some(path) => Some(read_image(&path).await?),
        None => None,
    };
    Ok(RequestEdits {
        device_type: args.device_type,
        brand: args.brand,
        model: args.model,
        condition: args.condition,
        quantity: args.quantity,
        pickup_address: args.address,
        additional_remarks: args.remarks,
        image,
    })
}
