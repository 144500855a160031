use chrono::{DateTime, NaiveDateTime, TimeZone, Utc};
use chrono_tz::Tz;
use clap::{Parser, Subcommand};
use inquire::{Select, Text};

use bookerBot::service::booking_service::{BookingApi, BookingService};
use bookerBot::service::form_options::{EVENT_CATEGORIES, FormOptions};
use bookerBot::service::health_service::Banner;
use bookerBot::service::host_list::HostEmailSet;
use bookerBot::service::location_catalog::{LocationCatalog, PLACEHOLDER_LABEL};
use bookerBot::service::submit_flow::{self, SubmissionHandler};
use bookerBot::service::time_range::TimeRangePicker;

const TIME_FORMAT: &str = "%Y-%m-%d %H:%M";

#[derive(Parser)]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Create an event without prompts.
    Create {
        name: String,
        start_time: DateTime<Utc>,
        end_time: DateTime<Utc>,
        location: String,
        host_email: String,
        #[arg(long)]
        description: Option<String>,
    },
    /// Walk through the booking form interactively.
    Book {},
    /// Print the grouped room catalog.
    Rooms {},
    /// Print the service health status.
    Status {},
}

pub async fn cli(base_url: String, display_tz: Tz, options: FormOptions) {
    // Fine to panic here
    let cli = Cli::parse();
    let api = BookingService::new(base_url);
    match cli.command {
        Commands::Create {
            name,
            start_time,
            end_time,
            location,
            host_email,
            description,
        } => {
            if let Err(e) = create_once(
                &api,
                display_tz,
                &name,
                start_time,
                end_time,
                &location,
                &host_email,
                description.as_deref(),
            )
            .await
            {
                println!("Failed to create event: {}", e);
            }
        }
        Commands::Book {} => {
            if let Err(e) = run_booking_form(&api, display_tz, &options).await {
                println!("Booking aborted: {}", e);
            }
        }
        Commands::Rooms {} => print_rooms(&api).await,
        Commands::Status {} => print_status(&api).await,
    }
}

#[allow(clippy::too_many_arguments)]
async fn create_once(
    api: &dyn BookingApi,
    display_tz: Tz,
    name: &str,
    start_time: DateTime<Utc>,
    end_time: DateTime<Utc>,
    location: &str,
    host_email: &str,
    description: Option<&str>,
) -> Result<(), Box<dyn std::error::Error>> {
    let mut hosts = HostEmailSet::new();
    hosts.add(host_email)?;

    // The one-shot path still snaps to the grid and holds start < end.
    let mut picker = TimeRangePicker::with_defaults();
    picker.set_start(start_time)?;
    picker.set_end(end_time)?;

    let plain = FormOptions::plain();
    let draft = submit_flow::build_draft(
        &plain,
        name,
        None,
        picker.range(),
        location,
        &hosts,
        description.unwrap_or(""),
    );

    let mut handler = SubmissionHandler::new();
    let outcome = handler.submit(api, &plain, &draft, &hosts).await?;
    println!("{}", submit_flow::render_outcome(&outcome, display_tz));
    Ok(())
}

async fn run_booking_form(
    api: &dyn BookingApi,
    display_tz: Tz,
    options: &FormOptions,
) -> Result<(), Box<dyn std::error::Error>> {
    if let Some(message) = Banner::check(api).await.message() {
        println!("{}", message);
    }
    let catalog = LocationCatalog::load(api).await;

    let mut picker = TimeRangePicker::with_defaults();
    let mut hosts = HostEmailSet::new();
    let mut handler = SubmissionHandler::new();

    let name = Text::new("Event name").prompt()?;
    let category = if options.compose_title {
        let choices: Vec<String> = EVENT_CATEGORIES.iter().map(|c| c.to_string()).collect();
        Some(Select::new("Event category", choices).prompt()?)
    } else {
        None
    };

    prompt_times(&mut picker, display_tz)?;

    let room = Select::new(PLACEHOLDER_LABEL, catalog.options(options.inline_descriptions))
        .prompt()?;

    if options.collect_hosts {
        collect_hosts(&mut hosts)?;
    } else {
        collect_single_host(&mut hosts)?;
    }

    let description = if options.compose_title {
        String::new()
    } else {
        Text::new("Description (optional)").prompt()?
    };

    println!("Creating...");
    let draft = submit_flow::build_draft(
        options,
        &name,
        category.as_deref(),
        picker.range(),
        &room.name,
        &hosts,
        &description,
    );
    match handler.submit(api, options, &draft, &hosts).await {
        Ok(outcome) => {
            println!("\n{}", submit_flow::render_outcome(&outcome, display_tz));
            if outcome.is_success() {
                picker.reset(Utc::now());
                hosts.clear();
            }
        }
        Err(err) => println!("{}", err),
    }
    Ok(())
}

fn prompt_times(picker: &mut TimeRangePicker, tz: Tz) -> Result<(), inquire::InquireError> {
    loop {
        let default = format_in_tz(picker.start(), tz);
        let raw = Text::new("Start time (YYYY-MM-DD HH:MM)")
            .with_default(&default)
            .prompt()?;
        match parse_in_tz(&raw, tz) {
            Ok(t) => match picker.set_start(t) {
                Ok(snapped) => {
                    if snapped != t {
                        println!("Snapped to {}", format_in_tz(snapped, tz));
                    }
                    break;
                }
                Err(err) => println!("{}", err),
            },
            Err(_) => println!("Enter a time like 2026-09-01 14:30"),
        }
    }
    loop {
        let default = format_in_tz(picker.end(), tz);
        let raw = Text::new("End time (YYYY-MM-DD HH:MM)")
            .with_default(&default)
            .prompt()?;
        match parse_in_tz(&raw, tz) {
            Ok(t) => match picker.set_end(t) {
                Ok(snapped) => {
                    if snapped != t {
                        println!("Snapped to {}", format_in_tz(snapped, tz));
                    }
                    break;
                }
                Err(err) => println!("{}", err),
            },
            Err(_) => println!("Enter a time like 2026-09-01 15:30"),
        }
    }
    Ok(())
}

fn collect_hosts(hosts: &mut HostEmailSet) -> Result<(), inquire::InquireError> {
    println!("Add host emails. The first becomes the primary host.");
    println!("Blank to finish, '-address' to remove one.");
    loop {
        let entry = Text::new("Host email").prompt()?;
        let entry = entry.trim().to_string();
        if entry.is_empty() {
            if hosts.is_empty() {
                println!("{}", submit_flow::NO_HOSTS_MESSAGE);
                continue;
            }
            break;
        }
        if let Some(address) = entry.strip_prefix('-') {
            let address = address.trim();
            if !hosts.remove(address) {
                println!("{} is not in the list", address);
            }
            continue;
        }
        match hosts.add(&entry) {
            Ok(()) => println!("Hosts: {}", hosts.emails().join(", ")),
            Err(err) => println!("{}", err),
        }
    }
    Ok(())
}

fn collect_single_host(hosts: &mut HostEmailSet) -> Result<(), inquire::InquireError> {
    loop {
        let entry = Text::new("Host email").prompt()?;
        match hosts.add(&entry) {
            Ok(()) => return Ok(()),
            Err(err) => println!("{}", err),
        }
    }
}

async fn print_rooms(api: &dyn BookingApi) {
    let catalog = LocationCatalog::load(api).await;
    if catalog.is_fallback() {
        println!("Could not load the room catalog; showing the fallback room only.");
    }
    for group in catalog.groups() {
        println!("{}", group.label);
        for room in &group.rooms {
            if room.description.is_empty() {
                println!("  {}", room.name);
            } else {
                println!("  {} - {}", room.name, room.description);
            }
        }
    }
}

async fn print_status(api: &dyn BookingApi) {
    match Banner::check(api).await.message() {
        Some(message) => println!("{}", message),
        None => println!("All integrations healthy."),
    }
}

fn format_in_tz(t: DateTime<Utc>, tz: Tz) -> String {
    t.with_timezone(&tz).format(TIME_FORMAT).to_string()
}

fn parse_in_tz(input: &str, tz: Tz) -> Result<DateTime<Utc>, String> {
    let naive =
        NaiveDateTime::parse_from_str(input.trim(), TIME_FORMAT).map_err(|e| e.to_string())?;
    tz.from_local_datetime(&naive)
        .earliest()
        .map(|t| t.with_timezone(&Utc))
        .ok_or_else(|| "time does not exist in the display timezone".to_string())
}
