// This file is part of the product ShopDesk.
// SPDX-FileCopyrightText: 2025-2026 Zivatar Limited
// SPDX-License-Identifier: AGPL-3.0-or-later
// The code and documentation in this repository is licensed under the GNU Affero General Public License v3.0 or later (AGPL-3.0-or-later). See LICENSE.

use actix_web::middleware::Logger;
use actix_web::rt::System;
use actix_web::{App, HttpServer, web};
use log::info;
use std::io::{self, Write};
use std::path::PathBuf;
use std::sync::Arc;

use shopdesk::admin;
use shopdesk::app_state::AppState;
use shopdesk::bootstrap::{BootstrapResult, bootstrap_runtime};
use shopdesk::catalog::YamlShopModel;
use shopdesk::config::ValidatedConfig;
use shopdesk::plugins::{LogObserver, PluginHost};

const ACCESS_LOG_FORMAT: &str = r#"%a "%r" %s %b "%{Referer}i" "%{User-Agent}i" %T"#;

const USAGE: &str = "\
Usage: shopdesk [-C <root>]

Serves the ShopDesk back office from the runtime directory <root>
(default: the current directory). config.yaml and users.yaml are created
on first start and the generated admin password is printed once.

Options:
  -C <root>   runtime directory
  -h, --help  print this help
";

#[derive(Debug, PartialEq, Eq)]
enum Command {
    Serve { root: PathBuf },
    Help,
}

fn main() {
    std::process::exit(run());
}

fn run() -> i32 {
    let command = match Command::parse(std::env::args().skip(1)) {
        Ok(command) => command,
        Err(error) => {
            eprintln!("❌ {}", error);
            eprint!("{}", USAGE);
            return 2;
        }
    };

    let root = match command {
        Command::Help => {
            print!("{}", USAGE);
            return 0;
        }
        Command::Serve { root } => root,
    };

    let bootstrap = match bootstrap_runtime(&root) {
        Ok(bootstrap) => bootstrap,
        Err(error) => {
            eprintln!("❌ Cannot prepare runtime at {}: {}", root.display(), error);
            return 1;
        }
    };

    if let Err(error) = System::new().block_on(serve(bootstrap)) {
        eprintln!("❌ ShopDesk stopped: {}", error);
        return 1;
    }
    0
}

impl Command {
    fn parse<I>(args: I) -> Result<Self, String>
    where
        I: IntoIterator<Item = String>,
    {
        let mut root = None;
        let mut args = args.into_iter();
        while let Some(arg) = args.next() {
            match arg.as_str() {
                "-h" | "--help" => return Ok(Command::Help),
                "--" => {}
                "-C" => match args.next() {
                    Some(value) => root = Some(PathBuf::from(value)),
                    None => return Err("-C needs a directory".to_string()),
                },
                other => return Err(format!("Unknown argument '{}'", other)),
            }
        }

        let root = root.unwrap_or_else(|| PathBuf::from("."));
        let root = if root.is_absolute() {
            root
        } else {
            std::env::current_dir()
                .map_err(|error| format!("Cannot read the current directory: {}", error))?
                .join(root)
        };
        Ok(Command::Serve { root })
    }
}

fn init_logging(config: &ValidatedConfig) -> io::Result<()> {
    env_logger::Builder::from_default_env()
        .filter_level(config.log_level())
        .target(env_logger::Target::Stdout)
        .format(|buf, record| {
            writeln!(
                buf,
                "{} [{}] {}: {}",
                chrono::Utc::now().format("%Y-%m-%d %H:%M:%S%.3f UTC"),
                record.level(),
                record.target(),
                record.args()
            )
        })
        .try_init()
        .map_err(|error| io::Error::other(format!("logger: {}", error)))
}

async fn serve(bootstrap: BootstrapResult) -> io::Result<()> {
    let BootstrapResult {
        validated_config,
        runtime_paths,
        created_config,
        created_users,
    } = bootstrap;
    let config = Arc::new(validated_config);
    init_logging(&config)?;

    if created_config {
        info!("Wrote default {}", runtime_paths.config_file.display());
    }
    if created_users {
        info!("Created admin account in {}", runtime_paths.users_file.display());
    }

    let model = YamlShopModel::open(&runtime_paths, &config)
        .map_err(|error| io::Error::other(error.to_string()))?;

    let mut plugins = PluginHost::new(runtime_paths.plugins_dir.clone());
    plugins.register_observer(Arc::new(LogObserver));

    info!("{} starting with {} worker(s)", config.app.name, config.server.workers);
    info!("Runtime root: {}", runtime_paths.root.display());
    info!("State: {}", runtime_paths.state_dir.display());
    info!("Plugins: {}", runtime_paths.plugins_dir.display());
    info!("Themes: {}", runtime_paths.themes_dir.display());
    info!(
        "Back office at http://{}:{}{}",
        config.server.host, config.server.port, config.admin.path
    );

    let state = Arc::new(AppState::new(
        config.clone(),
        runtime_paths,
        Arc::new(model),
        plugins,
    ));

    let app_config = config.clone();
    HttpServer::new(move || {
        let admin_config = app_config.clone();
        let sessions = state.sessions.clone();
        App::new()
            .app_data(web::Data::from(state.clone()))
            .wrap(Logger::new(ACCESS_LOG_FORMAT))
            .configure(move |cfg| admin::configure(cfg, admin_config, sessions))
    })
    .workers(config.server.workers)
    .bind((config.server.host.clone(), config.server.port))?
    .run()
    .await
}

#[cfg(test)]
mod tests {
    use super::Command;
    use std::path::PathBuf;

    fn parse(values: &[&str]) -> Result<Command, String> {
        Command::parse(values.iter().map(|value| value.to_string()))
    }

    #[test]
    fn no_arguments_serve_the_current_directory() {
        let expected = std::env::current_dir().unwrap();
        assert_eq!(parse(&[]).unwrap(), Command::Serve { root: expected });
    }

    #[test]
    fn relative_root_is_made_absolute() {
        match parse(&["-C", "shop"]).unwrap() {
            Command::Serve { root } => {
                assert!(root.is_absolute());
                assert!(root.ends_with("shop"));
            }
            Command::Help => panic!("expected serve"),
        }
    }

    #[test]
    fn absolute_root_is_kept() {
        assert_eq!(
            parse(&["--", "-C", "/srv/shop"]).unwrap(),
            Command::Serve {
                root: PathBuf::from("/srv/shop")
            }
        );
    }

    #[test]
    fn help_wins_anywhere() {
        assert_eq!(parse(&["-C", "shop", "--help"]).unwrap(), Command::Help);
        assert_eq!(parse(&["-h"]).unwrap(), Command::Help);
    }

    #[test]
    fn bad_arguments_are_rejected() {
        assert!(parse(&["-C"]).unwrap_err().contains("-C"));
        assert!(parse(&["serve"]).unwrap_err().contains("serve"));
    }
}
