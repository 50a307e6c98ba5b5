//! Command-line surface.

use std::path::PathBuf;

use clap::{Args, Parser, Subcommand};

use ewaste_core::domain::{Condition, RequestStatus, StatusFilter};

#[derive(Debug, Parser)]
#[command(name = "ewaste", version)]
#[command(about = "EcoCycle e-waste pickup client")]
#[command(
    after_help = "Environment:\n  EWASTE_API_BASE_URL   Backend base URL (default http://localhost:8081)\n  EWASTE_STORAGE_PATH   Local storage file\n  LOG_FORMAT=json       JSON logs on stderr"
)]
pub struct Cli {
    /// Print results as JSON.
    #[arg(long, global = true, default_value_t = false)]
    pub json: bool,

    #[arg(long, global = true, env = "EWASTE_API_BASE_URL")]
    pub api_base_url: Option<String>,

    #[command(subcommand)]
    pub command: Command,
}

#[derive(Debug, Subcommand)]
pub enum Command {
    /// Sign in with email and password.
    Login {
        #[arg(long)]
        email: String,
        /// Prompted for when omitted.
        #[arg(long)]
        password: Option<String>,
    },
    /// Sign in with an emailed one-time code.
    LoginOtp {
        #[command(subcommand)]
        command: LoginOtpCommand,
    },
    Register(RegisterArgs),
    /// Confirm registration with the emailed OTP.
    VerifyOtp {
        #[arg(long)]
        otp: String,
    },
    ForgotPassword {
        #[arg(long)]
        email: String,
    },
    ResetPassword {
        #[arg(long)]
        otp: String,
        #[arg(long)]
        password: Option<String>,
        #[arg(long)]
        confirm_password: Option<String>,
    },
    Logout,
    Dashboard,
    /// Resolve a client path through the session guard.
    Open { path: String },
    Profile {
        #[command(subcommand)]
        command: ProfileCommand,
    },
    Requests {
        #[command(subcommand)]
        command: RequestsCommand,
    },
    Location {
        #[command(subcommand)]
        command: LocationCommand,
    },
    /// Show the theme, or flip it with `toggle`.
    Theme {
        #[command(subcommand)]
        command: Option<ThemeCommand>,
    },
}

#[derive(Debug, Subcommand)]
pub enum LoginOtpCommand {
    Request {
        #[arg(long)]
        email: String,
    },
    Verify {
        #[arg(long)]
        email: String,
        #[arg(long)]
        otp: String,
    },
}

#[derive(Debug, Args)]
pub struct RegisterArgs {
    #[arg(long)]
    pub name: String,
    #[arg(long)]
    pub email: String,
    #[arg(long)]
    pub phone: String,
    #[arg(long)]
    pub password: Option<String>,
    #[arg(long)]
    pub confirm_password: Option<String>,
}

#[derive(Debug, Subcommand)]
pub enum ProfileCommand {
    Show,
    /// Blank fields are left unchanged.
    Update {
        #[arg(long)]
        name: Option<String>,
        #[arg(long)]
        phone: Option<String>,
    },
    ChangePassword {
        #[arg(long)]
        old_password: Option<String>,
        #[arg(long)]
        new_password: Option<String>,
        #[arg(long)]
        confirm_password: Option<String>,
    },
}

#[derive(Debug, Subcommand)]
pub enum RequestsCommand {
    Submit(SubmitArgs),
    List {
        /// Matches id, brand, model, device type, condition and status.
        #[arg(long, default_value = "")]
        search: String,
        /// ALL or a status such as RECYCLED.
        #[arg(long, default_value = "ALL", value_parser = status_filter)]
        status: StatusFilter,
        /// Skip fetching thumbnails.
        #[arg(long, default_value_t = false)]
        no_images: bool,
    },
    /// Status timeline of one request.
    Track { id: i64 },
    Update(UpdateArgs),
    Delete {
        id: i64,
        /// Skip the confirmation prompt.
        #[arg(long, default_value_t = false)]
        yes: bool,
    },
    /// Save the proof image of a request.
    Image {
        id: i64,
        #[arg(long)]
        out: PathBuf,
    },
}

#[derive(Debug, Args)]
pub struct SubmitArgs {
    /// Laptop, Mobile, Tablet, Desktop, Monitor, Printer, Battery, or any other name.
    #[arg(long, default_value = "Laptop")]
    pub device_type: String,
    /// Asked for when omitted.
    #[arg(long)]
    pub brand: Option<String>,
    /// Asked for when omitted.
    #[arg(long)]
    pub model: Option<String>,
    /// WORKING, DAMAGED or DEAD.
    #[arg(long, default_value = "WORKING", value_parser = condition)]
    pub condition: Condition,
    #[arg(long, default_value_t = 1)]
    pub quantity: u32,
    /// Asked for when neither this nor `--pick` is given.
    #[arg(long)]
    pub address: Option<String>,
    /// Fill the address from a map point instead.
    #[arg(long, num_args = 2, value_names = ["LAT", "LON"], allow_negative_numbers = true)]
    pub pick: Option<Vec<f64>>,
    #[arg(long, default_value = "")]
    pub remarks: String,
    /// Asked for when omitted.
    #[arg(long)]
    pub image: Option<PathBuf>,
}

#[derive(Debug, Args)]
pub struct UpdateArgs {
    pub id: i64,
    #[arg(long)]
    pub device_type: Option<String>,
    #[arg(long)]
    pub brand: Option<String>,
    #[arg(long)]
    pub model: Option<String>,
    #[arg(long, value_parser = condition)]
    pub condition: Option<Condition>,
    #[arg(long)]
    pub quantity: Option<u32>,
    #[arg(long)]
    pub address: Option<String>,
    #[arg(long)]
    pub remarks: Option<String>,
    /// Replaces the stored image.
    #[arg(long)]
    pub image: Option<PathBuf>,
}

#[derive(Debug, Subcommand)]
pub enum LocationCommand {
    Search { query: String },
    Reverse {
        #[arg(allow_negative_numbers = true)]
        lat: f64,
        #[arg(allow_negative_numbers = true)]
        lon: f64,
    },
    /// Where the map opens by default.
    Default,
}

#[derive(Debug, Subcommand)]
pub enum ThemeCommand {
    Toggle,
}

fn condition(value: &str) -> Result<Condition, String> {
    value.parse::<Condition>().map_err(|_| {
        format!(
            "expected one of {}",
            Condition::ALL.map(|c| c.as_str()).join(", ")
        )
    })
}

fn status_filter(value: &str) -> Result<StatusFilter, String> {
    let Ok(filter) = value.parse::<StatusFilter>();
    match &filter {
        StatusFilter::Only(status) if !RequestStatus::FILTERABLE.contains(status) => {
            let known = RequestStatus::FILTERABLE.map(|s| s.as_str().to_string());
            Err(format!("expected ALL or one of {}", known.join(", ")))
        }
        _ => Ok(filter),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_cli_definition_is_valid() {
        use clap::CommandFactory;
        Cli::command().debug_assert();
    }

    #[test]
    fn test_parse_submit_with_pick() {
        let cli = Cli::try_parse_from([
            "ewaste", "--json", "requests", "submit", "--brand", "Dell", "--model", "XPS",
            "--pick", "18.52", "-73.85",
        ])
        .unwrap();
        assert!(cli.json);
        let Command::Requests {
            command: RequestsCommand::Submit(args),
        } = cli.command
        else {
            panic!("expected requests submit");
        };
        assert_eq!(args.pick, Some(vec![18.52, -73.85]));
        assert_eq!(args.quantity, 1);
        assert_eq!(args.condition, Condition::Working);
        assert_eq!(args.image, None);
    }

    #[test]
    fn test_condition_is_checked_against_known_values() {
        let cli = Cli::try_parse_from(["ewaste", "requests", "update", "4", "--condition", "dead"])
            .unwrap();
        let Command::Requests {
            command: RequestsCommand::Update(args),
        } = cli.command
        else {
            panic!("expected requests update");
        };
        assert_eq!(args.condition, Some(Condition::Dead));

        let err = Cli::try_parse_from(["ewaste", "requests", "submit", "--condition", "broken"])
            .unwrap_err();
        assert!(err.to_string().contains("expected one of WORKING, DAMAGED, DEAD"));
    }

    #[test]
    fn test_status_filter_accepts_listed_statuses_only() {
        let cli = Cli::try_parse_from(["ewaste", "requests", "list", "--status", "recycled"])
            .unwrap();
        let Command::Requests {
            command: RequestsCommand::List { status, .. },
        } = cli.command
        else {
            panic!("expected requests list");
        };
        assert_eq!(status, StatusFilter::Only(RequestStatus::Recycled));

        assert!(status_filter("ALL").is_ok_and(|f| f == StatusFilter::All));
        let err = status_filter("ON_HOLD").unwrap_err();
        assert!(err.starts_with("expected ALL or one of SUBMITTED, PICKUP_SCHEDULED"));
    }
}
