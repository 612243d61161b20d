// jsparse: interactive tokenizer and parser shell for a small JavaScript subset

use std::fs::File;
use std::io::{self, BufRead, IsTerminal, Write};
use std::sync::Mutex;

use crossterm::{
    execute,
    terminal::{disable_raw_mode, enable_raw_mode, EnterAlternateScreen, LeaveAlternateScreen},
};
use ratatui::{backend::CrosstermBackend, Terminal};
use tracing_subscriber::EnvFilter;

use jsparse::parser::profile::Profile;
use jsparse::session::analyze;
use jsparse::ui::App;

/// Environment variable holding the log filter (`EnvFilter` syntax)
const LOG_ENV: &str = "JSPARSE_LOG";

/// File the TUI logs to, so log lines never land on the screen
const TUI_LOG_FILE: &str = "jsparse.log";

const PROMPT: &str = "Enter JavaScript code: ";

#[derive(Debug, Clone, PartialEq, Eq)]
struct Options {
    profile: Profile,
    plain: bool,
}

#[derive(Debug, PartialEq, Eq)]
enum Command {
    Run(Options),
    Help,
}

fn parse_args<I: IntoIterator<Item = String>>(args: I) -> Result<Command, String> {
    let mut options = Options {
        profile: Profile::default(),
        plain: false,
    };

    let mut args = args.into_iter();
    while let Some(arg) = args.next() {
        match arg.as_str() {
            "-h" | "--help" => return Ok(Command::Help),
            "--plain" => options.plain = true,
            "-p" | "--profile" => {
                let name = args
                    .next()
                    .ok_or_else(|| format!("'{}' needs a profile name", arg))?;
                options.profile = name.parse().map_err(|e| format!("{}", e))?;
            }
            other => match other.strip_prefix("--profile=") {
                Some(name) => {
                    options.profile = name.parse().map_err(|e| format!("{}", e))?;
                }
                None => return Err(format!("unrecognized argument '{}'", other)),
            },
        }
    }

    Ok(Command::Run(options))
}

fn print_usage(program_name: &str) {
    let names: Vec<&str> = Profile::ALL.iter().map(|p| p.name()).collect();
    eprintln!("Usage: {} [--profile <name>] [--plain] [--help]", program_name);
    eprintln!();
    eprintln!("Options:");
    eprintln!("  -p, --profile <name>  language profile: {}", names.join(", "));
    eprintln!("      --plain           line mode instead of the terminal UI");
    eprintln!("  -h, --help            show this message");
    eprintln!();
    eprintln!("Set {}=debug to enable logging.", LOG_ENV);
}

/// Install the global subscriber. Plain mode logs to stderr; the TUI logs to
/// a file, and only when a filter is set.
fn init_tracing(plain: bool) -> io::Result<()> {
    let filter = match EnvFilter::try_from_env(LOG_ENV) {
        Ok(filter) => filter,
        Err(_) => return Ok(()),
    };

    let builder = tracing_subscriber::fmt().with_env_filter(filter);
    if plain {
        builder.with_writer(io::stderr).init();
    } else {
        let file = File::create(TUI_LOG_FILE)?;
        builder
            .with_ansi(false)
            .with_writer(Mutex::new(file))
            .init();
    }
    Ok(())
}

/// Line mode: prompt, read, print the report, until `exit` or end of input
fn run_plain(profile: Profile) -> io::Result<()> {
    let stdin = io::stdin();
    let mut input = stdin.lock();
    let mut stdout = io::stdout();
    let mut line = String::new();

    loop {
        write!(stdout, "{}", PROMPT)?;
        stdout.flush()?;

        line.clear();
        if input.read_line(&mut line)? == 0 {
            writeln!(stdout)?;
            break;
        }

        let code = line.trim_end_matches(['\n', '\r']);
        if code.trim().eq_ignore_ascii_case("exit") {
            break;
        }
        if code.trim().is_empty() {
            continue;
        }

        for report_line in analyze(code, profile).report_lines() {
            writeln!(stdout, "{}", report_line)?;
        }
    }

    Ok(())
}

fn run_tui(profile: Profile) -> io::Result<()> {
    // Set up terminal
    enable_raw_mode()?;
    let mut stdout = io::stdout();
    execute!(stdout, EnterAlternateScreen)?;
    let backend = CrosstermBackend::new(stdout);
    let mut terminal = Terminal::new(backend)?;

    // Create and run app
    let mut app = App::new(profile);
    let res = app.run(&mut terminal);

    // Restore terminal
    disable_raw_mode()?;
    execute!(terminal.backend_mut(), LeaveAlternateScreen)?;
    terminal.show_cursor()?;

    res
}

fn main() -> Result<(), Box<dyn std::error::Error>> {
    let mut args = std::env::args();
    let program_name = args.next().unwrap_or_else(|| "jsparse".to_string());

    let options = match parse_args(args) {
        Ok(Command::Run(options)) => options,
        Ok(Command::Help) => {
            print_usage(&program_name);
            return Ok(());
        }
        Err(message) => {
            eprintln!("Error: {}", message);
            eprintln!();
            print_usage(&program_name);
            std::process::exit(2);
        }
    };

    let plain = options.plain || !io::stdin().is_terminal();
    init_tracing(plain)?;

    if plain {
        run_plain(options.profile)?;
    } else {
        run_tui(options.profile)?;
    }

    Ok(())
}
