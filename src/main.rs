mod aggregate;
mod client;
mod models;
mod run;
mod ui;

use anyhow::Result;

fn main() -> Result<()> {
    let args: Vec<String> = std::env::args().collect();
    let url = match service_url(&args[1..], std::env::var("PULSEGUARD_URL").ok()) {
        Ok(url) => url,
        Err(msg) => {
            eprintln!("{msg}");
            eprintln!("Usage: pulsetui [--url <base-url>]");
            std::process::exit(2);
        }
    };

    run::as_tui(client::AnalysisClient::new(&url))
}

/// Resolve the analysis service base URL: `--url` wins, then the
/// `PULSEGUARD_URL` environment variable, then the default.
fn service_url(args: &[String], env_url: Option<String>) -> Result<String, String> {
    let mut iter = args.iter();
    while let Some(arg) = iter.next() {
        match arg.as_str() {
            "--url" => {
                return iter
                    .next()
                    .cloned()
                    .ok_or_else(|| "--url requires a value".to_string());
            }
            other => return Err(format!("Unknown argument: {other}")),
        }
    }
    Ok(env_url.unwrap_or_else(|| client::DEFAULT_SERVICE_URL.to_string()))
}

#[cfg(test)]
mod tests {
    use super::service_url;

    fn args(list: &[&str]) -> Vec<String> {
        list.iter().map(|s| s.to_string()).collect()
    }

    #[test]
    fn test_url_flag_wins_over_env() {
        let url = service_url(
            &args(&["--url", "http://analysis:9000"]),
            Some("http://env:1".into()),
        );
        assert_eq!(url.as_deref(), Ok("http://analysis:9000"));
    }

    #[test]
    fn test_env_wins_over_default() {
        let url = service_url(&[], Some("http://env:1".into()));
        assert_eq!(url.as_deref(), Ok("http://env:1"));
    }

    #[test]
    fn test_default_when_nothing_given() {
        let url = service_url(&[], None);
        assert_eq!(url.as_deref(), Ok("http://127.0.0.1:5000"));
    }

    #[test]
    fn test_url_flag_without_value_errors() {
        assert!(service_url(&args(&["--url"]), None).is_err());
    }

    #[test]
    fn test_unknown_argument_errors() {
        assert!(service_url(&args(&["--wat"]), None).is_err());
    }
}
