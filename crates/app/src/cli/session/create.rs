use clap::Args;
use jiff::Timestamp;
use storefront_app::{
    auth::{PgAuthService, Role, UserUuid},
    database,
};

#[derive(Debug, Args)]
pub(crate) struct CreateSessionArgs {
    /// PostgreSQL connection string
    #[arg(long, env = "DATABASE_URL", hide_env_values = true)]
    database_url: String,

    /// User the session acts as; generated when omitted
    #[arg(long)]
    user_uuid: Option<UserUuid>,

    /// `admin` or `customer`
    #[arg(long, default_value = "customer")]
    role: Role,

    /// Expiry instant, e.g. 2027-01-01T00:00:00Z
    #[arg(long)]
    expires_at: Option<Timestamp>,
}

pub(crate) async fn run(args: CreateSessionArgs) -> Result<(), String> {
    let pool = database::connect(&args.database_url)
        .await
        .map_err(|error| format!("failed to connect to database: {error}"))?;

    let issued = PgAuthService::new(pool)
        .issue_session(
            args.user_uuid.unwrap_or_default(),
            args.role,
            args.expires_at,
        )
        .await
        .map_err(|error| format!("failed to create session: {error}"))?;

    println!("session_uuid: {}", issued.record.uuid);
    println!("user_uuid: {}", issued.record.user);
    println!("role: {}", issued.record.role);
    println!("token: {}", issued.token);
    println!("store this token now; it is only shown once");

    Ok(())
}
