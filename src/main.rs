/// Version injected at compile time via SATADMIN_VERSION env var (set by CI/CD),
/// or the crate version for local builds.
pub const VERSION: &str = match option_env!("SATADMIN_VERSION") {
    Some(v) => v,
    None => env!("CARGO_PKG_VERSION"),
};

use anyhow::{Context, Result};
use clap::{Parser, Subcommand, ValueEnum};
use satadmin::api::format_admin_error;
use satadmin::config::Config;
use satadmin::operation::{Operation, ParamDescriptor, Registry};
use serde_json::Value;
use std::path::PathBuf;
use tracing::Level;
use tracing_subscriber::fmt::writer::MakeWriterExt;

/// Command line front end for the satellite admin API
#[derive(Parser, Debug)]
#[command(name = "satadmin", version = VERSION, about, long_about = None)]
struct Args {
    /// Admin API base URL
    #[arg(long, env = "SATADMIN_URL", global = true)]
    base_url: Option<String>,

    /// Authorization token, sent verbatim
    #[arg(long, env = "SATADMIN_TOKEN", hide_env_values = true, global = true)]
    token: Option<String>,

    /// Log level for debugging
    #[arg(long, value_enum, default_value = "off", global = true)]
    log_level: LogLevel,

    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// List categories, operations and their parameters
    List {
        #[arg(short, long, value_enum)]
        output: Option<Output>,
    },
    /// Invoke one operation; values map onto its parameters in order ("" leaves one blank)
    Invoke {
        category: String,
        operation: String,
        #[arg(allow_hyphen_values = true)]
        values: Vec<String>,
        #[arg(short, long, value_enum)]
        output: Option<Output>,
    },
}

#[derive(Debug, Clone, Copy, ValueEnum)]
enum LogLevel {
    Off,
    Error,
    Warn,
    Info,
    Debug,
    Trace,
}

impl LogLevel {
    fn to_tracing_level(self) -> Option<Level> {
        match self {
            LogLevel::Off => None,
            LogLevel::Error => Some(Level::ERROR),
            LogLevel::Warn => Some(Level::WARN),
            LogLevel::Info => Some(Level::INFO),
            LogLevel::Debug => Some(Level::DEBUG),
            LogLevel::Trace => Some(Level::TRACE),
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
enum Output {
    Json,
    Yaml,
    Text,
}

impl Output {
    /// Flag > saved preference > fallback
    fn resolve(flag: Option<Output>, config: &Config, fallback: Output) -> Output {
        flag.or_else(|| {
            config
                .output
                .as_deref()
                .and_then(|s| Output::from_str(s, true).ok())
        })
        .unwrap_or(fallback)
    }
}

fn setup_logging(level: LogLevel) -> Option<tracing_appender::non_blocking::WorkerGuard> {
    let tracing_level = level.to_tracing_level()?;

    let log_path = get_log_path();

    if let Some(parent) = log_path.parent() {
        let _ = std::fs::create_dir_all(parent);
    }

    let file = match std::fs::OpenOptions::new()
        .create(true)
        .append(true)
        .open(&log_path)
    {
        Ok(file) => file,
        Err(err) => {
            eprintln!("Failed to open log file {:?}: {}", log_path, err);
            return None;
        }
    };

    let (non_blocking, guard) = tracing_appender::non_blocking(file);

    tracing_subscriber::fmt()
        .with_max_level(tracing_level)
        .with_writer(non_blocking.with_max_level(tracing_level))
        .with_ansi(false)
        .with_target(true)
        .with_thread_ids(false)
        .with_file(true)
        .with_line_number(true)
        .init();

    tracing::info!("satadmin started with log level: {:?}", level);
    tracing::info!("Log file: {:?}", log_path);

    Some(guard)
}

fn get_log_path() -> PathBuf {
    if let Some(config_dir) = dirs::config_dir() {
        return config_dir.join("satadmin").join("satadmin.log");
    }
    if let Some(home) = dirs::home_dir() {
        return home.join(".satadmin").join("satadmin.log");
    }
    PathBuf::from("satadmin.log")
}

#[tokio::main]
async fn main() -> Result<()> {
    let args = Args::parse();

    let log_guard = setup_logging(args.log_level);

    let succeeded = run(&args).await?;
    if !succeeded {
        drop(log_guard);
        std::process::exit(1);
    }

    Ok(())
}

/// Run the selected command. `Ok(false)` means the operation itself failed
/// and its error has already been reported.
async fn run(args: &Args) -> Result<bool> {
    let mut config = Config::load();
    let base_url = config.effective_base_url(args.base_url.as_deref());

    match &args.command {
        Command::List { output } => {
            // Listing never touches the network, so URL and token may be absent.
            let registry = Registry::connect(base_url.as_deref().unwrap_or("http://localhost"), "")?;
            print_registry(&registry, Output::resolve(*output, &config, Output::Text))?;
            Ok(true)
        }
        Command::Invoke {
            category,
            operation,
            values,
            output,
        } => {
            let base_url = base_url
                .context("No admin API base URL configured. Use --base-url or SATADMIN_URL")?;
            let token = args
                .token
                .as_deref()
                .context("No authorization token. Use --token or SATADMIN_TOKEN")?;

            tracing::info!("Using admin API at {}", base_url);

            let registry = Registry::connect(&base_url, token)?;
            let op = find_operation(&registry, category, operation)?;

            let values: Vec<Value> = values.iter().map(|v| Value::String(v.clone())).collect();
            let missing = op.missing_required(&values);
            if !missing.is_empty() {
                anyhow::bail!("Missing required parameter(s): {}", missing.join(", "));
            }

            if let Some(flag_url) = args.base_url.as_deref() {
                if let Err(e) = config.set_base_url(flag_url) {
                    tracing::warn!("Failed to save config: {:#}", e);
                }
            }

            let output = Output::resolve(*output, &config, Output::Json);
            match op.invoke(values).await {
                Ok(result) => {
                    print_value(&result, output)?;
                    Ok(true)
                }
                Err(err) => {
                    tracing::info!("{} {} failed: {}", category, operation, err);
                    eprintln!("{}", format_admin_error(&err));
                    Ok(false)
                }
            }
        }
    }
}

fn find_operation<'a>(registry: &'a Registry, category: &str, name: &str) -> Result<&'a Operation> {
    let Some(cat) = registry.category(category) else {
        let known: Vec<_> = registry.categories().iter().map(|c| c.name).collect();
        anyhow::bail!("Unknown category '{}'. Available: {}", category, known.join(", "));
    };

    cat.operation(name).with_context(|| {
        let known: Vec<_> = cat.operations.iter().map(|op| op.name).collect();
        format!(
            "Unknown operation '{}' in {}. Available: {}",
            name,
            category,
            known.join(", ")
        )
    })
}

fn print_value(value: &Option<Value>, output: Output) -> Result<()> {
    let rendered = match output {
        Output::Yaml => serde_yaml::to_string(value).context("Failed to render YAML")?,
        Output::Json | Output::Text => {
            serde_json::to_string_pretty(value).context("Failed to render JSON")?
        }
    };
    println!("{}", rendered.trim_end());
    Ok(())
}

fn print_registry(registry: &Registry, output: Output) -> Result<()> {
    match output {
        Output::Json => {
            println!("{}", serde_json::to_string_pretty(registry.categories())?);
        }
        Output::Yaml => {
            print!("{}", serde_yaml::to_string(registry.categories())?);
        }
        Output::Text => {
            for category in registry.categories() {
                println!("{}", category.name);
                for op in &category.operations {
                    println!("  {} - {}", op.name, op.description.replace('\n', " "));
                    for param in &op.params {
                        println!("      {} ({})", param.label, describe_param(&param.descriptor));
                    }
                }
            }
        }
    }
    Ok(())
}

fn describe_param(descriptor: &ParamDescriptor) -> String {
    let (kind, required) = match descriptor {
        ParamDescriptor::TextLike { subtype, required } => {
            (format!("{:?}", subtype).to_lowercase(), *required)
        }
        ParamDescriptor::Choice {
            multiple,
            required,
            options,
        } => {
            let options: Vec<_> = options
                .iter()
                .map(|o| format!("{}={}", o.value, o.text))
                .collect();
            let kind = if *multiple { "choices" } else { "choice" };
            (format!("{}: {}", kind, options.join(", ")), *required)
        }
    };

    if required {
        format!("{}, required", kind)
    } else {
        kind
    }
}
