use log::{error, info};
use recipe_loader::{LoadError, LoaderConfig, RecipeLoader};
use serde_json::Value;
use std::env;
use std::io::{self, Write};
use std::process::ExitCode;

const USAGE: &str = "Usage: recipe-loader <id> [--base-url <url>] [--timeout <seconds>]";

#[derive(Debug)]
struct CliArgs {
    id: String,
    base_url: Option<String>,
    timeout: Option<u64>,
}

fn parse_args(args: &[String]) -> Result<CliArgs, String> {
    let mut id = None;
    let mut base_url = None;
    let mut timeout = None;

    let mut iter = args.iter();
    while let Some(arg) = iter.next() {
        match arg.as_str() {
            "--base-url" => {
                let value = iter.next().ok_or("--base-url requires a URL value")?;
                base_url = Some(value.clone());
            }
            "--timeout" => {
                let value = iter.next().ok_or("--timeout requires a value in seconds")?;
                let secs = value
                    .parse::<u64>()
                    .map_err(|_| format!("Invalid --timeout value: {value}"))?;
                timeout = Some(secs);
            }
            "-h" | "--help" => return Err(USAGE.to_string()),
            other if other.starts_with("--") => {
                return Err(format!("Unknown option: {other}\n{USAGE}"));
            }
            other => {
                if id.is_some() {
                    return Err(format!("Unexpected argument: {other}\n{USAGE}"));
                }
                id = Some(other.to_string());
            }
        }
    }

    Ok(CliArgs {
        id: id.ok_or_else(|| format!("Please provide a recipe id\n{USAGE}"))?,
        base_url,
        timeout,
    })
}

async fn run(args: CliArgs) -> Result<Value, LoadError> {
    let mut config = LoaderConfig::load()?;
    if let Some(base_url) = args.base_url {
        config.base_url = base_url;
    }
    if args.timeout.is_some() {
        config.timeout = args.timeout;
    }
    info!("config: {:?}", config);

    let loader = RecipeLoader::from_config(&config)?;
    loader.fetch_recipe(&args.id).await
}

fn write_json(mut out: impl Write, data: &Value) -> io::Result<()> {
    serde_json::to_writer_pretty(&mut out, data)?;
    writeln!(out)?;
    out.flush()
}

#[tokio::main]
async fn main() -> ExitCode {
    env_logger::init();

    let args: Vec<String> = env::args().skip(1).collect();
    let args = match parse_args(&args) {
        Ok(args) => args,
        Err(message) => {
            eprintln!("{message}");
            return ExitCode::from(2);
        }
    };

    match run(args).await {
        Ok(data) => match write_json(io::stdout().lock(), &data) {
            Ok(()) => ExitCode::SUCCESS,
            Err(e) => {
                error!("{}", e);
                eprintln!("Failed to write output: {e}");
                ExitCode::FAILURE
            }
        },
        Err(e) => {
            error!("{}", e);
            eprintln!("Error: {e}");
            if let Some(payload) = e.payload() {
                eprintln!("{payload}");
            }
            ExitCode::FAILURE
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn args(list: &[&str]) -> Vec<String> {
        list.iter().map(|s| s.to_string()).collect()
    }

    struct BrokenPipe;

    impl Write for BrokenPipe {
        fn write(&mut self, _buf: &[u8]) -> io::Result<usize> {
            Err(io::Error::new(io::ErrorKind::BrokenPipe, "closed"))
        }

        fn flush(&mut self) -> io::Result<()> {
            Ok(())
        }
    }

    #[test]
    fn test_write_json_pretty() {
        let mut out = Vec::new();
        write_json(&mut out, &serde_json::json!({"name": "Soup"})).unwrap();
        assert_eq!(String::from_utf8(out).unwrap(), "{\n  \"name\": \"Soup\"\n}\n");
    }

    #[test]
    fn test_write_json_reports_io_error() {
        let err = write_json(BrokenPipe, &serde_json::json!([1, 2])).unwrap_err();
        assert_eq!(err.kind(), io::ErrorKind::BrokenPipe);
    }

    #[test]
    fn test_parse_id_only() {
        let parsed = parse_args(&args(&["42"])).unwrap();
        assert_eq!(parsed.id, "42");
        assert!(parsed.base_url.is_none());
        assert!(parsed.timeout.is_none());
    }

    #[test]
    fn test_parse_all_options() {
        let parsed =
            parse_args(&args(&["--base-url", "http://x:1", "abc", "--timeout", "9"])).unwrap();
        assert_eq!(parsed.id, "abc");
        assert_eq!(parsed.base_url.as_deref(), Some("http://x:1"));
        assert_eq!(parsed.timeout, Some(9));
    }

    #[test]
    fn test_parse_errors() {
        assert!(parse_args(&args(&[])).unwrap_err().contains("recipe id"));
        assert!(parse_args(&args(&["1", "--base-url"]))
            .unwrap_err()
            .contains("--base-url requires a URL value"));
        assert!(parse_args(&args(&["1", "--timeout", "x"]))
            .unwrap_err()
            .contains("Invalid --timeout"));
        assert!(parse_args(&args(&["1", "2"]))
            .unwrap_err()
            .contains("Unexpected argument"));
    }
}
