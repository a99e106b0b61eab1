// SPDX-FileCopyrightText: 2026 Bruno Meilick
// SPDX-License-Identifier: LicenseRef-Larissa-FreeUse-NoCopy-NoDerivatives
//
// All rights reserved.
//
// This file is part of Larissa and is proprietary software.
// Unauthorized copying, modification, or distribution is prohibited.

//! Larissa CLI entrypoint.
//!
//! Runs the interactive candlestick TUI and serves the persistence API at
//! `http://127.0.0.1:<port>` for the lifetime of the session. Saves from the
//! TUI go through that API, so the round trip works the same whether the
//! client is the built-in chart or an external tool.

use std::error::Error;
use std::fs;
use std::path::Path;
use std::sync::{Arc, Mutex};

use larissa::format::{read_series_csv, series_from_value};
use larissa::model::{demo_series, Series};
use larissa::select::{HttpSink, SharedSaveOutcome};
use larissa::server::{router, ServerContext};
use larissa::store::{DataFolder, WriteDurability};

const DEFAULT_PORT: u16 = 3000;
const DEMO_DAYS: u64 = 100;

fn print_usage(program: &str) {
    eprintln!(
        "Usage:\n  {program} [<data-file>] [--logging] [--port <port>] [--durable-writes]\n  {program} [--data <file>] [--logging] [--port <port>] [--durable-writes]\n  {program} --demo [--logging] [--port <port>]\n\nServes the save API at `http://127.0.0.1:<port>` while the chart TUI runs.\n--port selects the port (0 = ephemeral; default {DEFAULT_PORT}, or the PORT environment variable).\n\nThe data file is CSV (by `.csv` extension) or a JSON array of records.\nIf data-file/--data is omitted, a generated demo series is used.\n--demo forces the generated series and cannot be combined with data-file/--data.\n\n--logging (-l) appends request and selection lines to log.txt in the working directory.\n--durable-writes opts into slower, best-effort durable persistence (fsync/sync where supported)."
    );
}

#[derive(Debug, Default, Clone, PartialEq, Eq)]
struct CliOptions {
    logging: bool,
    demo: bool,
    data_file: Option<String>,
    port: Option<u16>,
    durable_writes: bool,
}

fn parse_options(mut args: impl Iterator<Item = String>) -> Result<CliOptions, ()> {
    let mut options = CliOptions::default();

    while let Some(arg) = args.next() {
        match arg.as_str() {
            "--logging" | "-l" => {
                if options.logging {
                    return Err(());
                }
                options.logging = true;
            }
            "--demo" => {
                if options.demo {
                    return Err(());
                }
                options.demo = true;
            }
            "--data" => {
                if options.data_file.is_some() {
                    return Err(());
                }
                let file = args.next().ok_or(())?;
                options.data_file = Some(file);
            }
            "--port" => {
                if options.port.is_some() {
                    return Err(());
                }
                let raw = args.next().ok_or(())?;
                let port: u16 = raw.parse().map_err(|_| ())?;
                options.port = Some(port);
            }
            "--durable-writes" => {
                if options.durable_writes {
                    return Err(());
                }
                options.durable_writes = true;
            }
            _ if arg.starts_with('-') => return Err(()),
            _ => {
                if options.data_file.is_some() {
                    return Err(());
                }
                options.data_file = Some(arg);
            }
        }
    }

    if options.demo && options.data_file.is_some() {
        return Err(());
    }

    Ok(options)
}

/// `--port` wins over the PORT environment variable, which wins over the
/// default.
fn effective_port(options: &CliOptions, env_port: Option<String>) -> u16 {
    options
        .port
        .or_else(|| env_port.and_then(|raw| raw.parse().ok()))
        .unwrap_or(DEFAULT_PORT)
}

fn load_series(path: &Path) -> Result<Series, Box<dyn Error>> {
    let is_csv = path
        .extension()
        .and_then(|ext| ext.to_str())
        .is_some_and(|ext| ext.eq_ignore_ascii_case("csv"));

    if is_csv {
        let file = fs::File::open(path)?;
        Ok(read_series_csv(file)?)
    } else {
        let raw = fs::read_to_string(path)?;
        let value: serde_json::Value = serde_json::from_str(&raw)?;
        Ok(series_from_value(&value)?)
    }
}

fn main() {
    let result = (|| -> Result<(), Box<dyn Error>> {
        let mut args = std::env::args();
        let program = args.next().unwrap_or_else(|| "larissa".to_owned());

        let options = match parse_options(args) {
            Ok(options) => options,
            Err(()) => {
                print_usage(&program);
                std::process::exit(2);
            }
        };

        // A broken data file falls back to generated data, like the original
        // chart does when its feed fails.
        let series = match &options.data_file {
            Some(file) => match load_series(Path::new(file)) {
                Ok(series) => series,
                Err(error) => {
                    eprintln!("larissa: failed to load {file}: {error}; using generated data");
                    demo_series(DEMO_DAYS)
                }
            },
            None => demo_series(DEMO_DAYS),
        };
        let series = Arc::new(series);

        let folder = if options.durable_writes {
            DataFolder::new(".").with_durability(WriteDurability::Durable)
        } else {
            DataFolder::new(".")
        };

        let port = effective_port(&options, std::env::var("PORT").ok());
        let logging = options.logging;

        let runtime = tokio::runtime::Builder::new_current_thread().enable_all().build()?;

        runtime.block_on(async move {
            let listener = tokio::net::TcpListener::bind(("127.0.0.1", port)).await?;
            let local_port = listener.local_addr()?.port();

            let context = ServerContext::new(folder, logging);
            let (shutdown_tx, shutdown_rx) = tokio::sync::oneshot::channel::<()>();
            let server_handle = tokio::spawn(async move {
                let serve = axum::serve(listener, router(context)).with_graceful_shutdown(
                    async move {
                        let _ = shutdown_rx.await;
                    },
                );
                if let Err(err) = serve.await {
                    eprintln!("larissa: HTTP server error: {err}");
                }
            });

            println!("Server running at http://127.0.0.1:{local_port}");
            if logging {
                println!("Logging enabled - writing to log.txt");
            }

            let save_outcome: SharedSaveOutcome = Arc::new(Mutex::new(None));
            let sink = HttpSink::new(
                tokio::runtime::Handle::current(),
                reqwest::Client::builder().build()?,
                format!("http://127.0.0.1:{local_port}/api/save-selection"),
                save_outcome.clone(),
            );

            let tui_join = tokio::task::spawn_blocking(move || {
                larissa::tui::run(series, Box::new(sink), save_outcome)
                    .map_err(|err| err.to_string())
            })
            .await;

            let _ = shutdown_tx.send(());
            let _ = server_handle.await;

            let tui_result = tui_join.map_err(|err| -> Box<dyn Error> { Box::new(err) })?;
            tui_result.map_err(|err| {
                Box::new(std::io::Error::new(std::io::ErrorKind::Other, err)) as Box<dyn Error>
            })?;
            Ok::<(), Box<dyn Error>>(())
        })?;

        Ok(())
    })();

    if let Err(err) = result {
        eprintln!("larissa: {err}");
        std::process::exit(1);
    }
}

#[cfg(test)]
mod tests {
    use super::{effective_port, parse_options, CliOptions, DEFAULT_PORT};

    #[test]
    fn parses_empty_args() {
        let options = parse_options(std::iter::empty()).expect("parse options");
        assert_eq!(options, CliOptions::default());
    }

    #[test]
    fn parses_logging_in_both_spellings() {
        let options = parse_options(["--logging".to_owned()].into_iter()).expect("parse options");
        assert!(options.logging);

        let options = parse_options(["-l".to_owned()].into_iter()).expect("parse options");
        assert!(options.logging);
    }

    #[test]
    fn parses_demo_flag() {
        let options = parse_options(["--demo".to_owned()].into_iter()).expect("parse options");
        assert!(options.demo);
        assert!(!options.logging);
        assert!(options.data_file.is_none());
        assert_eq!(options.port, None);
    }

    #[test]
    fn parses_data_file() {
        let options = parse_options(["--data".to_owned(), "prices.csv".to_owned()].into_iter())
            .expect("parse options");
        assert_eq!(options.data_file.as_deref(), Some("prices.csv"));
        assert!(!options.demo);
    }

    #[test]
    fn parses_positional_data_file() {
        let options = parse_options(["prices.json".to_owned()].into_iter()).expect("parse options");
        assert_eq!(options.data_file.as_deref(), Some("prices.json"));
    }

    #[test]
    fn parses_port_and_flags_in_any_order() {
        let options = parse_options(
            ["--port".to_owned(), "8080".to_owned(), "-l".to_owned(), "--demo".to_owned()]
                .into_iter(),
        )
        .expect("parse options");
        assert_eq!(options.port, Some(8080));
        assert!(options.logging);
        assert!(options.demo);
    }

    #[test]
    fn parses_durable_writes() {
        let options =
            parse_options(["--durable-writes".to_owned()].into_iter()).expect("parse options");
        assert!(options.durable_writes);
    }

    #[test]
    fn rejects_demo_with_data_file() {
        parse_options(["--demo".to_owned(), "--data".to_owned(), "x.csv".to_owned()].into_iter())
            .unwrap_err();

        parse_options(["--demo".to_owned(), "x.csv".to_owned()].into_iter()).unwrap_err();
    }

    #[test]
    fn rejects_unknown_args() {
        parse_options(["--nope".to_owned()].into_iter()).unwrap_err();
    }

    #[test]
    fn rejects_duplicate_flags() {
        parse_options(["--demo".to_owned(), "--demo".to_owned()].into_iter()).unwrap_err();

        parse_options(["-l".to_owned(), "--logging".to_owned()].into_iter()).unwrap_err();

        parse_options(
            ["--data".to_owned(), "a.csv".to_owned(), "--data".to_owned(), "b.csv".to_owned()]
                .into_iter(),
        )
        .unwrap_err();
    }

    #[test]
    fn rejects_multiple_positional_data_files() {
        parse_options(["one.csv".to_owned(), "two.csv".to_owned()].into_iter()).unwrap_err();
    }

    #[test]
    fn rejects_missing_flag_values() {
        parse_options(["--data".to_owned()].into_iter()).unwrap_err();
        parse_options(["--port".to_owned()].into_iter()).unwrap_err();
        parse_options(["--port".to_owned(), "notaport".to_owned()].into_iter()).unwrap_err();
    }

    #[test]
    fn port_flag_wins_over_environment_and_default() {
        let mut options = CliOptions::default();
        assert_eq!(effective_port(&options, None), DEFAULT_PORT);
        assert_eq!(effective_port(&options, Some("4000".to_owned())), 4000);
        assert_eq!(effective_port(&options, Some("notaport".to_owned())), DEFAULT_PORT);

        options.port = Some(8080);
        assert_eq!(effective_port(&options, Some("4000".to_owned())), 8080);
    }
}
