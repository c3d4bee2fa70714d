use tasklink::commands::Cli;
use tasklink::libs::messages::{macros::is_debug_mode, Message};
use tasklink::libs::config::ConfigError;
use tasklink::msg_error;
use tracing_subscriber::EnvFilter;

fn main() {
    if is_debug_mode() {
        tracing_subscriber::fmt()
            .with_env_filter(EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("tasklink=debug")))
            .init();
    }

    if let Err(err) = Cli::menu() {
        match err.downcast_ref::<ConfigError>() {
            Some(config_err) => msg_error!(Message::ConfigMissing(config_err.to_string())),
            None => msg_error!(format!("{:#}", err)),
        }
        std::process::exit(1);
    }
}
