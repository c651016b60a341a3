//! Headless driver: logs in with the configured account, walks the feed and
//! the friends screen, and logs every render through `tracing`.

use hawkconnect_app::{App, Runtime, ScreenKind, TracingView};
use hawkconnect_client::{ApiClient, ApiError, DEFAULT_BASE_URL};
use serde::Deserialize;
use std::sync::Arc;
use thiserror::Error;
use tracing::{debug, info, warn};
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

#[derive(Debug, Error)]
enum InitError {
    #[error("Error parsing .env file: {0}")]
    Dotenv(#[from] dotenvy::Error),
    #[error("Error parsing environment: {0}")]
    Envy(#[from] envy::Error),
    #[error("Error creating api client: {0}")]
    Api(#[from] ApiError),
    #[error("Error logging in: {0}")]
    Login(String),
}

#[derive(Clone, Eq, PartialEq, Debug, Hash, Deserialize)]
struct Env {
    #[serde(default = "default_base_url")]
    base_url: String,
    email: Option<String>,
    password: Option<String>,
}

fn default_base_url() -> String {
    DEFAULT_BASE_URL.to_owned()
}

fn install_tracing() {
    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env().unwrap_or_else(|_| {
                "hawkconnect_app=debug,\
                hawkconnect_client=debug,\
                hawkconnect_common=debug"
                    .into()
            }),
        )
        .with(tracing_subscriber::fmt::layer())
        .init();
}

fn get_env() -> Result<Env, InitError> {
    if let Err(e) = dotenvy::dotenv() {
        if e.not_found() {
            debug!("No .dotenv file found");
        } else {
            return Err(e.into());
        }
    }

    envy::prefixed("HAWKCONNECT_")
        .from_env()
        .map_err(InitError::from)
}

async fn walk(runtime: &mut Runtime<ApiClient, TracingView>, env: Env) -> Result<(), InitError> {
    let (Some(email), Some(password)) = (env.email, env.password) else {
        info!("No credentials configured, loading the registration dialog only");
        runtime.dispatch(App::open_registration);
        runtime.settle().await;
        return Ok(());
    };

    runtime.dispatch(|app| {
        if let Some(login) = app.login_mut() {
            login.email = email;
            login.password = password.into();
        }
        app.submit_login()
    });
    runtime.settle().await;

    if runtime.app().session().is_none() {
        let message = runtime.app().screen().error().unwrap_or_default().to_owned();
        return Err(InitError::Login(message));
    }

    runtime.dispatch(App::show_feed);
    runtime.settle().await;

    runtime.dispatch(App::back);
    runtime.dispatch(App::show_friends);
    runtime.settle().await;
    if runtime.app().screen().kind() != ScreenKind::Friends {
        warn!(screen = ?runtime.app().screen().kind(), "Did not reach the friends screen");
    }

    runtime.dispatch(App::logout);
    Ok(())
}

#[tokio::main]
async fn main() -> Result<(), InitError> {
    install_tracing();
    let env = get_env()?;

    let api = Arc::new(ApiClient::new(&env.base_url)?);
    info!(base_url = %api.base_url(), "Using backend");

    let mut runtime = Runtime::new(api, TracingView);
    runtime.render();

    let result = tokio::select! {
        result = walk(&mut runtime, env) => result,
        _ = tokio::signal::ctrl_c() => {
            info!("Interrupted");
            Ok(())
        }
    };

    runtime.shutdown().await;
    result
}
