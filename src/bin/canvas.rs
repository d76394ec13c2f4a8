use anyhow::{Context, Error};
use canvas_lms::{
    auth::{self, OAuthConfig, OAuthEndpoint},
    Client,
};
use serde::Serialize;
use std::fmt::{self, Debug, Formatter};
use structopt::StructOpt;

#[tokio::main]
async fn main() -> Result<(), Error> {
    env_logger::init();
    let args = Args::from_args();

    log::debug!("Running {:?} against {}", args.cmd, args.host);

    match &args.cmd {
        Command::Courses => print_json(&args.client()?.courses().await?)?,
        Command::Course { id } => {
            print_json(&args.client()?.course(*id).await?)?
        },
        Command::User { id: Some(id) } => {
            print_json(&args.client()?.user(*id).await?)?
        },
        Command::User { id: None } => {
            print_json(&args.client()?.current_user().await?)?
        },
        Command::Assignments { course_id } => {
            print_json(&args.client()?.assignments(*course_id).await?)?
        },
        Command::AuthorizeUrl { oauth, scopes } => {
            let endpoint = OAuthEndpoint::for_host(&args.host);
            let state = auth::random_state();
            let scopes: Vec<&str> = scopes.iter().map(|s| s.as_str()).collect();

            let url = auth::authorize_url(
                &endpoint,
                &oauth.config(),
                &state,
                &scopes,
            )?;

            println!("{}", url);
            log::info!("Expect the redirect to come back with state={}", state);
        },
        Command::ExchangeCode { oauth, code } => {
            let endpoint = OAuthEndpoint::for_host(&args.host);
            let http = reqwest::Client::builder()
                .user_agent(canvas_lms::DEFAULT_USER_AGENT)
                .build()?;

            let token =
                auth::exchange_code(&http, &endpoint, &oauth.config(), code)
                    .await?;

            print_json(&token)?;
        },
    }

    Ok(())
}

fn print_json<T: Serialize>(value: &T) -> Result<(), Error> {
    println!("{}", serde_json::to_string_pretty(value)?);
    Ok(())
}

#[derive(StructOpt)]
struct Args {
    #[structopt(
        long = "host",
        env = "CANVAS_HOST",
        default_value = "https://canvas.instructure.com",
        help = "The Canvas instance's base address"
    )]
    host: String,
    #[structopt(
        short = "t",
        long = "token",
        env = "CANVAS_TOKEN",
        hide_env_values = true,
        help = "An OAuth2 access token"
    )]
    token: Option<String>,
    #[structopt(subcommand)]
    cmd: Command,
}

impl Args {
    fn client(&self) -> Result<Client, Error> {
        let token = self.token.as_deref().context(
            "An access token is required (use --token or CANVAS_TOKEN)",
        )?;

        Client::new(&self.host, token).map_err(Error::from)
    }
}

#[derive(Debug, StructOpt)]
enum Command {
    #[structopt(about = "List your active courses")]
    Courses,
    #[structopt(about = "Show a single course")]
    Course { id: u64 },
    #[structopt(about = "Show a user (defaults to yourself)")]
    User { id: Option<u64> },
    #[structopt(about = "List the assignments in a course")]
    Assignments { course_id: u64 },
    #[structopt(about = "Print the URL a user should visit to authorize us")]
    AuthorizeUrl {
        #[structopt(flatten)]
        oauth: OAuthArgs,
        #[structopt(long = "scope", help = "A scope to request")]
        scopes: Vec<String>,
    },
    #[structopt(about = "Trade an authorization code for an access token")]
    ExchangeCode {
        #[structopt(flatten)]
        oauth: OAuthArgs,
        #[structopt(help = "The code Canvas sent to the redirect URI")]
        code: String,
    },
}

#[derive(StructOpt)]
struct OAuthArgs {
    #[structopt(long = "client-id", env = "CANVAS_CLIENT_ID")]
    client_id: String,
    #[structopt(
        long = "client-secret",
        env = "CANVAS_CLIENT_SECRET",
        hide_env_values = true
    )]
    client_secret: String,
    #[structopt(long = "redirect-uri", env = "CANVAS_REDIRECT_URI")]
    redirect_uri: String,
}

impl Debug for OAuthArgs {
    fn fmt(&self, f: &mut Formatter<'_>) -> fmt::Result {
        f.debug_struct("OAuthArgs")
            .field("client_id", &self.client_id)
            .field("redirect_uri", &self.redirect_uri)
            .finish()
    }
}

impl OAuthArgs {
    fn config(&self) -> OAuthConfig {
        OAuthConfig {
            client_id: self.client_id.clone(),
            client_secret: self.client_secret.clone(),
            redirect_uri: self.redirect_uri.clone(),
        }
    }
}
