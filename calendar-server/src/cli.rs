use std::env;
use std::net::SocketAddr;
use std::process;

use getopts::Options;
use tokio::time::Duration;

use crate::source::EventSource;

pub const ADDRESS_ENV: &str = "CALENDAR_SERVER_ADDR";

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Args {
    pub address: SocketAddr,
    pub events: EventSource,
    pub cache_ttl: Duration,
}

fn opts() -> Options {
    let mut opts = Options::new();
    opts.optflag(
        "h",
        "help",
        concat!("Print the help output of ", env!("CARGO_PKG_NAME")),
    );
    opts.optopt(
        "a",
        "address",
        "Socket address (IP and port) to listen on [Default: $CALENDAR_SERVER_ADDR or 127.0.0.1:8080]",
        "SOCKET_ADDRESS",
    );
    opts.optopt(
        "e",
        "events",
        "JSON file or http(s) URL to load events from [Default: events.json]",
        "SOURCE",
    );
    opts.optopt(
        "t",
        "cache-ttl",
        "Seconds to keep loaded events before reading the source again, 0 disables caching [Default: 300]",
        "SECONDS",
    );
    opts
}

/// Parses command-line arguments, without the program name.
///
/// Returns `Ok(None)` when help was requested.
pub fn try_parse(args: Vec<String>, address_env: Option<String>) -> Result<Option<Args>, String> {
    let matches = opts().parse(args).map_err(|fail| fail.to_string())?;

    if matches.opt_present("help") {
        return Ok(None);
    }

    let address = match matches.opt_str("address").or(address_env) {
        Some(value) => value
            .parse()
            .map_err(|err| format!("Provided value for option 'address' is invalid: {err}"))?,
        None => SocketAddr::from(([127, 0, 0, 1], 8080)),
    };

    let events = matches
        .opt_str("events")
        .map_or_else(|| EventSource::from("events.json"), EventSource::from);

    let cache_ttl = matches
        .opt_get_default("cache-ttl", 300)
        .map(Duration::from_secs)
        .map_err(|err| format!("Provided value for option 'cache-ttl' is invalid: {err}"))?;

    Ok(Some(Args {
        address,
        events,
        cache_ttl,
    }))
}

pub fn parse(args: Vec<String>) -> Args {
    match try_parse(args, env::var(ADDRESS_ENV).ok()) {
        Ok(Some(args)) => args,
        Ok(None) => {
            let opts = opts();
            println!("{}", opts.usage(&opts.short_usage(env!("CARGO_PKG_NAME"))));
            process::exit(0);
        }
        Err(err) => {
            eprintln!("{err}");
            process::exit(1);
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn args(raw: &[&str]) -> Vec<String> {
        raw.iter().map(ToString::to_string).collect()
    }

    #[test]
    fn defaults() {
        let parsed = try_parse(Vec::new(), None).unwrap().unwrap();

        assert_eq!(parsed.address, SocketAddr::from(([127, 0, 0, 1], 8080)));
        assert_eq!(parsed.events, EventSource::from("events.json"));
        assert_eq!(parsed.cache_ttl, Duration::from_secs(300));
    }

    #[test]
    fn flags_override_environment() {
        let parsed = try_parse(
            args(&[
                "-a",
                "0.0.0.0:3000",
                "--events",
                "https://example.com/events.json",
                "-t",
                "0",
            ]),
            Some("127.0.0.1:9000".into()),
        )
        .unwrap()
        .unwrap();

        assert_eq!(parsed.address, SocketAddr::from(([0, 0, 0, 0], 3000)));
        assert_eq!(
            parsed.events,
            EventSource::Url("https://example.com/events.json".into())
        );
        assert_eq!(parsed.cache_ttl, Duration::ZERO);
    }

    #[test]
    fn environment_address_is_a_fallback() {
        let parsed = try_parse(Vec::new(), Some("127.0.0.1:9000".into()))
            .unwrap()
            .unwrap();

        assert_eq!(parsed.address, SocketAddr::from(([127, 0, 0, 1], 9000)));
    }

    #[test]
    fn help_short_circuits() {
        assert_eq!(try_parse(args(&["--help", "-t", "nope"]), None), Ok(None));
    }

    #[test]
    fn invalid_values_are_reported() {
        let err = try_parse(args(&["-t", "soon"]), None).unwrap_err();
        assert!(err.contains("cache-ttl"), "{err}");

        let err = try_parse(args(&["-a", "localhost"]), None).unwrap_err();
        assert!(err.contains("address"), "{err}");

        assert!(try_parse(args(&["--frobnicate"]), None).is_err());
    }
}
