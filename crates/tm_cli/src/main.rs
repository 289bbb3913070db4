use clap::Parser;
use clap::error::ErrorKind;
use tm_cli::cli::{Cli, Command};
use tm_core::error::AppError;
use tm_core::model::{TaskRecord, TaskSize, pad};
use tm_core::storage::log_codec;
use tm_core::store::SummaryRow;
use tm_core::task_api;

fn summary_header() -> String {
    [pad("Task Name"), pad("Time Spent")].concat()
}

fn print_summary_plain(rows: &[SummaryRow]) {
    println!("{}", summary_header());
    for row in rows {
        println!(
            "{}{}",
            pad(&row.name),
            pad(&task_api::format_duration(row.total))
        );
    }
}

fn print_summary_json(rows: &[SummaryRow]) {
    let payload: Vec<serde_json::Value> = rows
        .iter()
        .map(|row| {
            serde_json::json!({
                "name": row.name,
                "seconds": row.total.whole_seconds(),
                "time_spent": task_api::format_duration(row.total),
            })
        })
        .collect();
    println!("{}", serde_json::Value::Array(payload));
}

fn print_record_json(record: &TaskRecord) {
    let start = log_codec::format_timestamp(record.start)
        .unwrap_or_else(|_| String::from("invalid"));
    let end = if record.is_running() {
        serde_json::Value::Null
    } else {
        serde_json::json!(
            log_codec::format_timestamp(record.end).unwrap_or_else(|_| String::from("invalid"))
        )
    };
    let json = serde_json::json!({
        "name": record.name,
        "size": record.size.label(),
        "start": start,
        "end": end,
        "running": record.is_running(),
        "description": record.description,
    });
    println!("{}", json);
}

fn print_count_json(name: &str, windows: usize) {
    let json = serde_json::json!({
        "name": name,
        "windows": windows,
    });
    println!("{}", json);
}

fn normalize_parse_error(err: clap::Error) -> AppError {
    let rendered = err.to_string();
    let first_line = rendered.lines().next().unwrap_or("invalid command").trim();
    let message = first_line
        .strip_prefix("error: ")
        .unwrap_or(first_line)
        .to_string();
    AppError::invalid_argument(message)
}

fn run_command(cli: Cli) -> Result<(), AppError> {
    match cli.command {
        Command::Start { name } => {
            let record = task_api::start_task(&name)?;
            if cli.json {
                print_record_json(&record);
            } else {
                println!("Started task: {}", record.name);
            }
        }
        Command::Stop { name } => {
            let record = task_api::stop_task(&name)?;
            if cli.json {
                print_record_json(&record);
            } else {
                let spent = task_api::format_duration(record.elapsed(record.end));
                println!("Stopped task: {} ({})", record.name, spent);
            }
        }
        Command::Describe {
            name,
            description,
            size,
        } => {
            let updated = task_api::describe_task(&name, &description, size.as_deref())?;
            if cli.json {
                print_count_json(&name, updated);
            } else {
                println!("Described task: {} ({} windows)", name, updated);
            }
        }
        Command::Summary { filter } => {
            let rows = match filter.as_deref() {
                None => task_api::summary_all()?,
                // The argument slot is shared between names and sizes; a token
                // that parses as a size label is a size filter.
                Some(token) => match TaskSize::parse(token) {
                    Some(size) => task_api::summary_by_size(size)?,
                    None => vec![task_api::summary_by_name(token)?],
                },
            };
            if cli.json {
                print_summary_json(&rows);
            } else {
                print_summary_plain(&rows);
            }
        }
        Command::Size { name, size } => {
            let updated = task_api::resize_task(&name, &size)?;
            if cli.json {
                print_count_json(&name, updated);
            } else {
                println!("Resized task: {} ({} windows)", name, updated);
            }
        }
        Command::Rename { name, new_name } => {
            let updated = task_api::rename_task(&name, &new_name)?;
            if cli.json {
                print_count_json(&new_name, updated);
            } else {
                println!("Renamed task: {} -> {} ({} windows)", name, new_name, updated);
            }
        }
    }

    Ok(())
}

fn main() {
    let cli = match Cli::try_parse() {
        Ok(cli) => cli,
        Err(err) if matches!(err.kind(), ErrorKind::DisplayHelp | ErrorKind::DisplayVersion) => {
            let _ = err.print();
            return;
        }
        Err(err) => {
            eprintln!("ERROR: {}", normalize_parse_error(err));
            std::process::exit(1);
        }
    };

    if let Err(err) = run_command(cli) {
        eprintln!("ERROR: {}", err);
        std::process::exit(1);
    }
}
