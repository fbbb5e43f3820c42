//! Interactive course planner over an in-memory course catalog

use clap::{ArgAction, CommandFactory, Parser, Subcommand};
use course_catalog::{loader, CourseRecord, CourseTable};
use rustyline::DefaultEditor;
use std::io::{self, BufRead, IsTerminal, Write};
use std::path::{Path, PathBuf};
use std::time::Instant;
use tracing_subscriber::{
    filter::{EnvFilter, LevelFilter},
    prelude::*,
    registry::Registry,
};

macro_rules! die {
    ($fmt:literal, $($arg:tt)*) => {{
        eprintln!($fmt, $($arg)*);
        std::process::exit(1);
    }};

    ($msg:literal) => {{
        eprintln!($msg);
        std::process::exit(1);
    }};
}

use tracing::{debug, info};

fn init_tracing(quiet: bool, verbose: u8) -> (bool, LevelFilter) {
    let is_verbose = !quiet && verbose > 0;

    let level_filter = if quiet {
        LevelFilter::ERROR
    } else {
        match verbose {
            0 => LevelFilter::WARN,
            1 => LevelFilter::INFO,
            2 => LevelFilter::DEBUG,
            _ => LevelFilter::TRACE,
        }
    };

    // The library logs through the `log` facade
    if tracing_log::LogTracer::init().is_err() {
        die!("INTERNAL ERROR: setting log tracer failed");
    }

    let env_filter = EnvFilter::builder()
        .with_default_directive(level_filter.into())
        .with_env_var("PLANNER_LOG")
        .from_env_lossy()
        .add_directive(
            "rustyline=warn"
                .parse()
                .expect("Failed to parse rustyline directive"),
        );

    let subscriber = Registry::default().with(env_filter).with(
        tracing_subscriber::fmt::layer()
            .with_writer(std::io::stderr)
            .compact(),
    );

    if tracing::subscriber::set_global_default(subscriber).is_err() {
        die!("INTERNAL ERROR: setting default tracing::subscriber failed");
    }

    let prev_hook = std::panic::take_hook();
    std::panic::set_hook(Box::new(move |info| {
        tracing_panic::panic_hook(info);
        prev_hook(info); // daisy-chain to old panic hook
    }));

    (is_verbose, level_filter)
}

/// Course planner over an in-memory course catalog
#[derive(Parser, Debug)]
#[command(name = "planner")]
#[command(about = "Course planner over an in-memory course catalog")]
struct ToolArgs {
    /// Suppress all output except for errors. This overrides the -v flag.
    #[arg(short, long, global = true)]
    quiet: bool,

    /// Turn on verbose output. Supply -v multiple times to increase verbosity.
    #[arg(short, long, action = ArgAction::Count, global = true)]
    verbose: u8,

    /// Course catalog to load before running any command
    #[arg(short, long, value_name = "CATALOG")]
    catalog: Option<PathBuf>,

    /// Command to run (if omitted, starts interactive shell)
    #[command(subcommand)]
    command: Option<ToolCommand>,
}

#[derive(Subcommand, Debug, Clone)]
enum ToolCommand {
    /// Load a course catalog, replacing the current one
    #[command(alias = "1")]
    Load {
        /// Catalog file (defaults to the standard catalog file)
        path: Option<PathBuf>,
    },
    /// Print every course, sorted by course number
    #[command(visible_alias = "list", visible_alias = "ls", alias = "2")]
    Print,
    /// Print a course and its prerequisites
    #[command(visible_alias = "get", alias = "3")]
    Search {
        /// Course number (case-insensitive)
        course: String,
    },
    /// Print the number of loaded courses
    Count,
}

// Internal shell commands, include all external tool commands
#[derive(Parser, Debug)]
#[command(name = "")]
#[command(no_binary_name = true)]
#[command(disable_version_flag = true)]
#[command(help_template = "
Available Commands:

{subcommands}

Use `help COMMAND` or `COMMAND --help` for more details.

")]
struct ShellArgs {
    #[command(subcommand)]
    command: ShellCommand,
}

// Shell commands (including ones not available from CLI)
#[derive(Subcommand, Debug, Clone)]
enum ShellCommand {
    #[command(flatten)]
    ToolCmd(ToolCommand),

    /// Drop every loaded course
    Clear,
    /// Exit the planner
    #[command(visible_alias = "quit", alias = "9")]
    Exit,
}

struct Session {
    table: CourseTable,
}

impl Session {
    fn new() -> Self {
        Self {
            table: CourseTable::new(),
        }
    }

    /// Loads `path`, printing progress. Errors are reported here; `None`
    /// means the load failed.
    fn load_reporting(&mut self, path: &Path) -> Option<usize> {
        println!("Loading courses from {}", path.display());
        match loader::load_file(&mut self.table, path) {
            Ok(count) => {
                println!("Successfully loaded {count} courses.");
                Some(count)
            }
            Err(e) => {
                eprintln!("Error: {e}");
                None
            }
        }
    }
}

fn print_elapsed(start: Instant) {
    println!("Time: {:?}", start.elapsed());
}

fn print_course(record: &CourseRecord) {
    println!("{record}");
    if record.has_prerequisites() {
        println!("Prerequisites: {}", record.prerequisites.join(", "));
    } else {
        println!("No prerequisites");
    }
}

fn require_loaded(session: &Session) -> bool {
    if session.table.is_empty() {
        println!("No courses loaded. Please load data first.");
        false
    } else {
        true
    }
}

fn handle_load(session: &mut Session, path: Option<&Path>) {
    let default = Path::new(loader::DEFAULT_CATALOG_FILE);
    let path = path.unwrap_or_else(|| {
        println!("Using default file: {}", default.display());
        default
    });

    let start = Instant::now();
    let mut result = session.load_reporting(path);
    if result.is_none() && path != default {
        println!("Trying default file.");
        result = session.load_reporting(default);
    }

    match result {
        Some(_) => {
            println!("Data structure loaded.");
            print_elapsed(start);
        }
        None => println!("Failed to load courses."),
    }
}

fn handle_print(session: &Session) {
    if !require_loaded(session) {
        return;
    }

    let courses = session.table.sorted();
    println!("Course List:");
    println!("============");
    for course in &courses {
        println!("{course}");
    }
    println!();
    println!("Total courses: {}", courses.len());
}

fn handle_search(session: &Session, course: &str) {
    if !require_loaded(session) {
        return;
    }

    let id = course.trim().to_ascii_uppercase();
    if id.is_empty() {
        println!("Invalid input.");
        return;
    }

    let start = Instant::now();
    let found = session.table.get(&id);
    let elapsed = start.elapsed();
    debug!("lookup of {id} took {elapsed:?}");

    match found {
        Some(record) => print_course(record),
        None => println!("Course '{id}' not found."),
    }
    println!("Time: {elapsed:?}");
}

fn handle_count(session: &Session) {
    println!("{}", session.table.len());
}

/// Result of executing a command
enum CommandResult {
    Continue,
    Exit,
}

/// Execute a parsed command
fn execute_command(session: &mut Session, cmd: ToolCommand) -> CommandResult {
    match cmd {
        ToolCommand::Load { path } => handle_load(session, path.as_deref()),
        ToolCommand::Print => handle_print(session),
        ToolCommand::Search { course } => handle_search(session, &course),
        ToolCommand::Count => handle_count(session),
    }
    CommandResult::Continue
}

/// Execute a shell-only command
fn execute_shell_command(session: &mut Session, cmd: ShellCommand) -> CommandResult {
    match cmd {
        ShellCommand::ToolCmd(tool_cmd) => execute_command(session, tool_cmd),
        ShellCommand::Clear => {
            session.table.clear();
            println!("OK (cleared)");
            CommandResult::Continue
        }
        ShellCommand::Exit => {
            println!("Thank you for using the course planner!");
            CommandResult::Exit
        }
    }
}

/// Parse and run a shell command line
fn run_shell_command(session: &mut Session, line: &str) -> CommandResult {
    let line = line.trim();
    if line.is_empty() {
        return CommandResult::Continue;
    }

    let tokens = match shlex::split(line) {
        Some(t) if !t.is_empty() => t,
        Some(_) => return CommandResult::Continue,
        None => {
            eprintln!("error: unclosed quote");
            return CommandResult::Continue;
        }
    };

    match ShellArgs::try_parse_from(&tokens) {
        Ok(args) => execute_shell_command(session, args.command),
        Err(e) => {
            // Print clap's error message
            eprintln!("{}", e);
            CommandResult::Continue
        }
    }
}

fn run_shell(session: &mut Session) {
    if io::stdin().is_terminal() {
        run_shell_interactive(session);
    } else {
        run_shell_non_interactive(session);
    }
}

fn run_shell_interactive(session: &mut Session) {
    println!("Welcome to the Course Planner.");
    println!("Type 'help' for available commands, 'exit' to quit.\n");

    let mut rl = match DefaultEditor::new() {
        Ok(editor) => editor,
        Err(e) => {
            eprintln!("Error initializing line editor: {}", e);
            return;
        }
    };

    loop {
        match rl.readline("planner> ") {
            Ok(line) => {
                let _ = rl.add_history_entry(&line);
                if let CommandResult::Exit = run_shell_command(session, &line) {
                    break;
                }
            }
            Err(rustyline::error::ReadlineError::Interrupted) => {
                // Ignore Ctrl+C, just show a new prompt
                continue;
            }
            Err(rustyline::error::ReadlineError::Eof) => {
                println!();
                break;
            }
            Err(e) => {
                eprintln!("Error reading input: {}", e);
                break;
            }
        }
    }
}

fn run_shell_non_interactive(session: &mut Session) {
    let stdin = io::stdin();
    let mut stdout = io::stdout();

    loop {
        if stdout.flush().is_err() {
            die!("can't flush stdout");
        }

        let mut line = String::new();
        match stdin.lock().read_line(&mut line) {
            Ok(0) => {
                // EOF
                break;
            }
            Ok(_) => {
                if let CommandResult::Exit = run_shell_command(session, &line) {
                    break;
                }
            }
            Err(e) => {
                die!("Error reading input: {}", e);
            }
        }
    }
}

fn main() {
    let args = ToolArgs::parse();
    let (verbose, level_filter) = init_tracing(args.quiet, args.verbose);

    let cmd = ToolArgs::command();

    info!(
        "starting {} ({} {}), log level: {level_filter}",
        cmd.get_name(),
        env!("CARGO_PKG_NAME"),
        env!("CARGO_PKG_VERSION")
    );

    let mut session = Session::new();

    if let Some(path) = args.catalog.as_deref() {
        if let Err(e) = loader::load_file(&mut session.table, path) {
            let note = if verbose {
                ""
            } else {
                ". Note: Use -v (one or multiple times) for more information"
            };
            die!("Error loading catalog: {}{}", e, note);
        }
    }

    match args.command {
        Some(cmd) => {
            execute_command(&mut session, cmd);
        }
        None => run_shell(&mut session),
    }
}
