use clap::{Parser, Subcommand, ValueEnum};
use claude_monitor_lib::commands;
use claude_monitor_lib::layout::WindowMode;
use claude_monitor_lib::{Instance, Monitor, MonitorConfig};
use serde::Serialize;
use std::path::PathBuf;
use std::process::ExitCode;

#[derive(Parser, Debug)]
#[command(name = "claude-monitor", version)]
#[command(about = "Find running Claude Code sessions and jump to their terminals")]
struct Cli {
    /// Read settings from this file instead of ~/.claude-monitor/config.json
    #[arg(long, global = true)]
    config: Option<PathBuf>,

    /// Log debug output to stderr (RUST_LOG overrides)
    #[arg(short, long, global = true)]
    verbose: bool,

    #[command(subcommand)]
    command: Option<Commands>,
}

#[derive(Subcommand, Debug)]
enum Commands {
    /// List running instances (the default)
    List {
        /// Print JSON instead of a table
        #[arg(long)]
        json: bool,
    },
    /// Show MCP tools and memory usage for one instance
    Details {
        pid: u32,
        /// Working directory as reported by `list`
        working_directory: String,
        #[arg(long)]
        json: bool,
    },
    /// Bring an instance's terminal window to the front
    Activate {
        pid: u32,
        /// Controlling terminal, e.g. ttys003; omit for headless instances
        #[arg(long)]
        tty: Option<String>,
        /// Directory to open when a new window has to be spawned
        #[arg(long = "dir")]
        working_directory: Option<String>,
    },
    /// Print the window geometry for a display mode
    Layout {
        #[arg(value_enum)]
        mode: ModeArg,
        /// Number of instance tiles shown
        #[arg(long, default_value_t = 0)]
        count: usize,
    },
}

#[derive(Debug, Clone, Copy, ValueEnum)]
enum ModeArg {
    Expanded,
    Minimized,
}

#[tokio::main(flavor = "current_thread")]
async fn main() -> ExitCode {
    let cli = Cli::parse();
    init_logging(cli.verbose);

    let config = match &cli.config {
        Some(path) => match MonitorConfig::load_from(path) {
            Ok(c) => c,
            Err(e) => {
                eprintln!("{}", e);
                return ExitCode::FAILURE;
            }
        },
        None => MonitorConfig::load(),
    };
    let monitor = Monitor::new(config);

    match cli.command.unwrap_or(Commands::List { json: false }) {
        Commands::List { json } => match commands::list_instances(&monitor).await {
            Ok(instances) if json => print_json(&instances),
            Ok(instances) => {
                print_table(&instances);
                ExitCode::SUCCESS
            }
            Err(e) => {
                eprintln!("{}", e);
                ExitCode::FAILURE
            }
        },
        Commands::Details {
            pid,
            working_directory,
            json,
        } => {
            let details = commands::get_instance_details(&monitor, pid, &working_directory).await;
            if json {
                return print_json(&details);
            }
            if let Some(mem) = details.memory_info {
                println!(
                    "Memory: rss {} MB, vsz {} MB",
                    mem.rss / 1024 / 1024,
                    mem.vsz / 1024 / 1024
                );
            }
            if details.mcp_tools.is_empty() {
                println!("No MCP tools configured");
            }
            for tool in &details.mcp_tools {
                let command = tool.command.as_deref().unwrap_or("-");
                let args = tool.args.as_deref().map(|a| a.join(" ")).unwrap_or_default();
                println!("{:<24} {:<14} {} {}", tool.name, tool.tool_type, command, args);
            }
            ExitCode::SUCCESS
        }
        Commands::Activate {
            pid,
            tty,
            working_directory,
        } => {
            let tty = tty.as_deref();
            let dir = working_directory.as_deref();
            match commands::activate_window(&monitor, pid, tty, dir).await {
                Ok(result) => {
                    let code = if result.success {
                        ExitCode::SUCCESS
                    } else {
                        ExitCode::FAILURE
                    };
                    print_json(&result);
                    code
                }
                Err(e) => {
                    eprintln!("{}", e);
                    ExitCode::FAILURE
                }
            }
        }
        Commands::Layout { mode, count } => {
            let minimize = matches!(mode, ModeArg::Minimized);
            let mode = if minimize {
                WindowMode::Minimized
            } else {
                WindowMode::Expanded
            };
            #[derive(Serialize)]
            #[serde(rename_all = "camelCase")]
            struct LayoutOutput {
                geometry: claude_monitor_lib::layout::WindowGeometry,
                content_size: Option<claude_monitor_lib::layout::Size>,
            }
            print_json(&LayoutOutput {
                geometry: commands::toggle_window_size(minimize),
                content_size: commands::update_window_height(mode, count),
            })
        }
    }
}

fn init_logging(verbose: bool) {
    let default_filter = if verbose { "debug" } else { "warn" };
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or(default_filter))
        .format_timestamp_millis()
        .init();
}

fn print_json<T: Serialize>(value: &T) -> ExitCode {
    match serde_json::to_string_pretty(value) {
        Ok(json) => {
            println!("{}", json);
            ExitCode::SUCCESS
        }
        Err(e) => {
            eprintln!("Failed to serialize output: {}", e);
            ExitCode::FAILURE
        }
    }
}

fn print_table(instances: &[Instance]) {
    if instances.is_empty() {
        println!("No Claude Code instances running");
        return;
    }

    println!(
        "{:<7} {:<3} {:<9} {:>5}  {:<10} {:<20} {:<20} {}",
        "PID", "", "TTY", "CPU%", "ELAPSED", "BRANCH", "MODEL", "DIRECTORY"
    );
    for instance in instances {
        let branch = instance
            .git_info
            .branch_name
            .as_deref()
            .unwrap_or("-");
        let model = instance
            .model_info
            .model_alias
            .as_deref()
            .unwrap_or("Unknown");
        let tty = if instance.is_headless {
            format!("{} (bg)", instance.process.tty)
        } else {
            instance.process.tty.clone()
        };
        println!(
            "{:<7} {:<3} {:<9} {:>5.1}  {:<10} {:<20} {:<20} {}",
            instance.process.pid,
            instance.activity_indicator,
            tty,
            instance.process.cpu_percent,
            instance.process.elapsed_time,
            branch,
            model,
            instance.working_directory
        );
    }
}
