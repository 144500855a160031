#![allow(non_snake_case)]

mod cli;

use std::env;

use chrono_tz::Tz;

use bookerBot::config::{AppConfig, DEFAULT_BASE_URL, DEFAULT_DISPLAY_TZ, DEFAULT_FORM_VARIANT};
use bookerBot::service::form_options::FormOptions;

#[tokio::main]
async fn main() {
    let config = match env::var("CONFIG_FILE") {
        Ok(path) => AppConfig::from_file(&path).unwrap_or_default(),
        Err(_) => AppConfig::default(),
    };

    let get_prop = |key: &str| -> Option<String> {
        config.get(key).or_else(|| env::var(key).ok())
    };

    let base_url = get_prop("BOOKING_API_URL").unwrap_or(DEFAULT_BASE_URL.to_string());
    let tz_name = get_prop("DISPLAY_TZ").unwrap_or(DEFAULT_DISPLAY_TZ.to_string());
    let display_tz = match tz_name.parse::<Tz>() {
        Ok(tz) => tz,
        Err(_) => {
            println!("Unknown timezone {}, using {}", tz_name, DEFAULT_DISPLAY_TZ);
            chrono_tz::America::Los_Angeles
        }
    };
    let variant = get_prop("FORM_VARIANT").unwrap_or(DEFAULT_FORM_VARIANT.to_string());
    let Some(options) = FormOptions::from_name(&variant) else {
        println!("Invalid form variant {}", variant);
        return;
    };

    cli::cli(base_url, display_tz, options).await;
}
