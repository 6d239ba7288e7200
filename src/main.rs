use customer_access::config::{self, Config};
use customer_access::core::Result;
use customer_access::{sample_data, DataOperations, QueryOutcome};
use std::path::PathBuf;
use std::process::ExitCode;
use tracing::info;

const USAGE: &str = "Usage: customer_access [--config PATH] <list | table | get ID | contact ID | seed DB_PATH>";

fn main() -> ExitCode {
    let mut args: Vec<String> = std::env::args().skip(1).collect();

    let config_path = match take_config_flag(&mut args) {
        Ok(path) => path,
        Err(msg) => return usage_error(&msg),
    };
    let config = match load(config_path) {
        Ok(config) => config,
        Err(e) => {
            eprintln!("Failed to load configuration: {}", e);
            return ExitCode::from(2);
        }
    };

    // Initialize the logging system using tracing subscriber
    let level = config.log_level().unwrap_or(tracing::Level::INFO);
    tracing_subscriber::fmt()
        .with_max_level(level)
        .with_writer(std::io::stderr)
        .init();

    info!("Using store: {}", config.store.build());
    let ops = DataOperations::new(config.store.clone());

    match args.iter().map(String::as_str).collect::<Vec<_>>().as_slice() {
        ["list"] => report(ops.list_all_customers(), |customers| {
            for customer in customers {
                println!("{}", customer);
            }
        }),
        ["table"] => report(ops.customer_table(), |table| {
            println!("{}", table.columns().join(","));
            println!("{} row(s)", table.row_count());
        }),
        ["get", id] => match parse_id(id) {
            Ok(id) => report(ops.get_customer_by_id(id), |customer| {
                match serde_json::to_string_pretty(&customer) {
                    Ok(json) => println!("{}", json),
                    Err(_) => println!("{}", customer),
                }
            }),
            Err(msg) => usage_error(&msg),
        },
        ["contact", id] => match parse_id(id) {
            Ok(id) => report(ops.get_contact_by_id(id), |contact| {
                match contact.contact_title {
                    Some(title) => println!("{}, {}", contact.contact_name, title),
                    None => println!("{}", contact.contact_name),
                }
            }),
            Err(msg) => usage_error(&msg),
        },
        ["seed", path] => match sample_data::seed_reference_store(&PathBuf::from(path)) {
            Ok(count) => {
                println!("Seeded {} customers into {}", count, path);
                ExitCode::SUCCESS
            }
            Err(e) => {
                eprintln!("Failed to seed {}: {}", path, e);
                ExitCode::from(2)
            }
        },
        _ => usage_error("missing or unknown command"),
    }
}

/// Removes `--config PATH` from the arguments, if present.
fn take_config_flag(args: &mut Vec<String>) -> std::result::Result<Option<PathBuf>, String> {
    match args.iter().position(|arg| arg == "--config") {
        None => Ok(None),
        Some(index) if index + 1 < args.len() => {
            let path = args.remove(index + 1);
            args.remove(index);
            Ok(Some(PathBuf::from(path)))
        }
        Some(_) => Err("--config needs a path".to_string()),
    }
}

fn load(explicit: Option<PathBuf>) -> Result<Config> {
    match explicit.or_else(|| config::default_config_path().filter(|p| p.exists())) {
        Some(path) => config::load_config(path),
        None => Ok(Config::default()),
    }
}

fn parse_id(raw: &str) -> std::result::Result<i64, String> {
    raw.parse().map_err(|_| format!("`{}` is not a customer identifier", raw))
}

fn report<T, F: FnOnce(T)>(outcome: QueryOutcome<T>, print: F) -> ExitCode {
    match outcome {
        QueryOutcome::Found(value) => {
            print(value);
            ExitCode::SUCCESS
        }
        QueryOutcome::NotFound => {
            println!("No matching customer");
            ExitCode::from(1)
        }
        QueryOutcome::Failure(info) => {
            eprintln!("Query failed: {}", info);
            ExitCode::from(2)
        }
    }
}

fn usage_error(msg: &str) -> ExitCode {
    eprintln!("{}\n{}", msg, USAGE);
    ExitCode::from(2)
}
