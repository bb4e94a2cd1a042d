//! Console host for kiosk-shell
//!
//! Drives the shell from line commands on stdin so every lifecycle path can
//! be exercised without a device.

use std::io::{self, BufRead, Write};
use std::path::PathBuf;
use std::process::ExitCode;

use clap::Parser;

use kiosk_shell::app::{AppController, LifecycleEvent};
use kiosk_shell::config::ShellConfig;
use kiosk_shell::domain::session::Session;
use kiosk_shell::platform::{
    BrowserSurface, ConsoleWindow, HeadlessBrowser, MemorySessionStore, OverrideConnectivity,
    SessionStore, SystemConnectivity,
};
use kiosk_shell::ui::ViewHandle;

type Shell = AppController<
    OverrideConnectivity<SystemConnectivity>,
    MemorySessionStore,
    HeadlessBrowser,
    ConsoleWindow,
>;

const HELP: &str = "commands: resume | rotate | retry | back | open <url> | fullscreen | hide \
| login <email> <password> | cancel | signout | restart | offline | online | status | quit";

#[derive(Parser)]
#[command(name = "kiosk-shell")]
#[command(about = "Gated web shell with login and connectivity checks", long_about = None)]
struct Cli {
    /// Config file path
    #[arg(short, long, default_value = "kiosk-shell.toml")]
    config: PathBuf,

    /// Enable verbose logging
    #[arg(short, long)]
    verbose: bool,

    /// Known account as `email:password` (repeatable)
    #[arg(long = "account", value_name = "EMAIL:PASSWORD")]
    accounts: Vec<String>,

    /// Start with this user already signed in
    #[arg(long, value_name = "EMAIL")]
    signed_in: Option<String>,

    /// Pretend the network is down at startup
    #[arg(long)]
    offline: bool,
}

fn main() -> ExitCode {
    let cli = Cli::parse();

    let log_level = if cli.verbose { "debug" } else { "info" };
    tracing_subscriber::fmt()
        .with_env_filter(log_level)
        .with_writer(io::stderr)
        .init();

    let config = match ShellConfig::load_or_default(&cli.config) {
        Ok(config) => config,
        Err(err) => {
            eprintln!("{err}");
            return ExitCode::FAILURE;
        }
    };

    match run(&cli, &config) {
        Ok(code) => code,
        Err(err) => {
            eprintln!("{err}");
            ExitCode::FAILURE
        }
    }
}

fn run(cli: &Cli, config: &ShellConfig) -> Result<ExitCode, Box<dyn std::error::Error>> {
    let connectivity = OverrideConnectivity::new(SystemConnectivity::new(
        config.probe_address()?,
        config.probe_timeout(),
    ));
    let switch = connectivity.switch();
    if cli.offline {
        switch.set(Some(false));
    }

    let initial_session = cli.signed_in.clone().map(Session::for_user);
    let mut app = build_shell(cli, config, connectivity, initial_session)?;
    app.start();
    app.resume_login();

    println!("{HELP}");
    let stdin = io::stdin();
    let mut next_view = 1u64;

    for line in stdin.lock().lines() {
        let line = line?;
        let mut words = line.split_whitespace();
        let Some(command) = words.next() else {
            continue;
        };

        match command {
            "resume" => {
                app.handle_event(LifecycleEvent::Resumed);
            }
            "rotate" => {
                app.handle_event(LifecycleEvent::ConfigurationChanged);
            }
            "retry" => {
                app.handle_event(LifecycleEvent::RetryRequested);
            }
            "back" => {
                app.handle_event(LifecycleEvent::BackPressed);
            }
            "signout" => {
                app.handle_event(LifecycleEvent::SignOutRequested);
            }
            "open" => match words.next() {
                Some(url) if app.screen() == Some(kiosk_shell::Screen::Content) => {
                    app.browser_mut().navigate(url);
                }
                Some(_) => println!("  no page is open"),
                None => println!("  usage: open <url>"),
            },
            "fullscreen" => {
                let view = ViewHandle(next_view);
                next_view += 1;
                app.show_fullscreen(
                    view,
                    Box::new(move || println!("  [engine] custom view {} hidden", view.0)),
                );
            }
            "hide" => {
                app.hide_fullscreen();
            }
            "login" => match (words.next(), words.next()) {
                (Some(email), password) => {
                    if app.submit_login(email, password.unwrap_or("")).is_none() {
                        println!("  login screen is not open");
                    }
                }
                _ => println!("  usage: login <email> <password>"),
            },
            "cancel" => {
                app.cancel_login();
            }
            "restart" => {
                // Simulates the host killing and recreating the process
                let saved = app.save_state();
                let session = app.sessions().current_session();
                let connectivity = OverrideConnectivity::with_switch(
                    SystemConnectivity::new(config.probe_address()?, config.probe_timeout()),
                    switch.clone(),
                );
                app = build_shell(cli, config, connectivity, session)?;
                match saved {
                    Some(saved) => app.restore(saved),
                    None => app.start(),
                };
            }
            "offline" => switch.set(Some(false)),
            "online" => switch.set(Some(true)),
            "status" => print_status(&app),
            "quit" => break,
            _ => println!("{HELP}"),
        }

        io::stdout().flush()?;
        if app.window().is_closed() {
            break;
        }
    }

    Ok(match app.error() {
        Some(err) if app.state().is_closed() => {
            eprintln!("{err}");
            ExitCode::FAILURE
        }
        _ => ExitCode::SUCCESS,
    })
}

fn build_shell(
    cli: &Cli,
    config: &ShellConfig,
    connectivity: OverrideConnectivity<SystemConnectivity>,
    session: Option<Session>,
) -> Result<Shell, Box<dyn std::error::Error>> {
    let mut sessions = MemorySessionStore::new();
    for account in &cli.accounts {
        let (email, password) = account
            .split_once(':')
            .ok_or_else(|| format!("account `{account}` must be EMAIL:PASSWORD"))?;
        sessions = sessions.with_account(email, password);
    }
    sessions.set_current(session);

    Ok(AppController::new(
        config.allow_list()?,
        config.browser.clone(),
        connectivity,
        sessions,
        HeadlessBrowser::new(),
        ConsoleWindow::new(),
    ))
}

fn print_status(app: &Shell) {
    println!("  state: {:?}", app.state());
    if let Some(url) = app.browser().current_url() {
        println!("  page: {url} (back: {})", app.browser().can_go_back());
    }
    if let Some(view) = app.fullscreen().active_view() {
        println!("  fullscreen view: {}", view.0);
    }
    if let Some(session) = app.sessions().current_session() {
        println!("  user: {}", session.user_id.as_deref().unwrap_or("<anonymous>"));
    }
    if let Some(err) = app.error() {
        println!("  error: {err}");
    }
}
