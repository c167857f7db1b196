use super::parser::{parse_line, ParsedCommand};
use super::render::{print_messages, print_result, HELP};
use super::setup::Cli;
use clap::Parser;
use colored::Colorize;
use linedit::api::{save_target, CmdMessage, CmdResult, EditorApi};
use linedit::config::{data_dir, default_state_file, EditorConfig};
use linedit::error::{EditorError, Result};
use linedit::store::fs::FileStore;
use std::io::{self, BufRead, IsTerminal, Write};
use std::path::{Path, PathBuf};
use tracing::{debug, warn};
use tracing_subscriber::EnvFilter;

struct AppContext {
    api: EditorApi<FileStore>,
    state_file: PathBuf,
}

enum Flow {
    Continue,
    Exit,
}

pub fn run() -> Result<()> {
    let cli = Cli::parse();
    init_tracing(cli.verbose);

    let mut ctx = init_context(&cli)?;
    if ctx.api.config().restore_on_start && !cli.no_restore {
        match ctx.api.restore_state(&ctx.state_file) {
            Ok(result) => print_result(&result),
            Err(e) => eprintln!("{} could not restore workspace: {}", "Warning:".yellow(), e),
        }
    }

    let interactive = io::stdin().is_terminal();
    let stdin = io::stdin();
    let mut input = stdin.lock();
    let mut line = String::new();

    loop {
        if interactive {
            print!("> ");
            io::stdout().flush()?;
        }
        line.clear();
        if input.read_line(&mut line)? == 0 {
            debug!("end of input");
            break;
        }
        match dispatch(&mut ctx, &line) {
            Ok(Flow::Continue) => {}
            Ok(Flow::Exit) => break,
            Err(e) => eprintln!("{} {}", "Error:".red(), e),
        }
    }

    shutdown(&mut ctx);
    Ok(())
}

fn init_tracing(verbose: bool) {
    let default_level = if verbose { "debug" } else { "warn" };
    let filter =
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default_level));
    // A second initialization only happens in tests and is harmless.
    let _ = tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(io::stderr)
        .try_init();
}

fn init_context(cli: &Cli) -> Result<AppContext> {
    let home = data_dir(cli.home.as_deref())?;
    let config = EditorConfig::load(&home)?;
    let state_file = cli
        .state
        .clone()
        .unwrap_or_else(|| default_state_file(&home));
    debug!(home = %home.display(), state = %state_file.display(), "starting");

    Ok(AppContext {
        api: EditorApi::new(FileStore::new(), config),
        state_file,
    })
}

fn shutdown(ctx: &mut AppContext) {
    if ctx.api.workspace().has_unsaved_changes() {
        let unsaved: Vec<String> = ctx
            .api
            .workspace()
            .unsaved()
            .iter()
            .map(|path| path.display().to_string())
            .collect();
        print_messages(&[CmdMessage::warning(format!(
            "Unsaved changes in: {}",
            unsaved.join(", ")
        ))]);
    }

    if !ctx.api.config().save_state_on_exit {
        return;
    }
    let state_file = ctx.state_file.clone();
    match ctx.api.save_state(&state_file) {
        Ok(result) => print_result(&result),
        Err(e) => {
            warn!(error = %e, "could not save workspace state");
            eprintln!("{} could not save workspace state: {}", "Error:".red(), e);
        }
    }
}

fn dispatch(ctx: &mut AppContext, line: &str) -> Result<Flow> {
    let Some(cmd) = parse_line(line)? else {
        return Ok(Flow::Continue);
    };
    debug!(command = %cmd.name, args = cmd.args.len(), "dispatch");

    let result = match cmd.name.as_str() {
        "load" => ctx.api.load(&path_arg(&cmd, 0, "load <file>")?)?,
        "init" => handle_init(ctx, &cmd)?,
        "save" => ctx.api.save(save_target(cmd.arg(0)))?,
        "close" => ctx.api.close(cmd.arg(0).map(Path::new))?,
        "edit" => ctx.api.edit(&path_arg(&cmd, 0, "edit <file>")?)?,
        "editor-list" => ctx.api.list()?,
        "append" => ctx.api.append(required(&cmd, 0, "append \"text\"")?)?,
        "insert" => {
            let usage = "insert <line:col> \"text\"";
            ctx.api
                .insert(required(&cmd, 0, usage)?, required(&cmd, 1, usage)?)?
        }
        "delete" => {
            let usage = "delete <line:col> <len>";
            ctx.api
                .delete(required(&cmd, 0, usage)?, required(&cmd, 1, usage)?)?
        }
        "replace" => {
            let usage = "replace <line:col> <len> \"text\"";
            ctx.api.replace(
                required(&cmd, 0, usage)?,
                required(&cmd, 1, usage)?,
                required(&cmd, 2, usage)?,
            )?
        }
        "show" => ctx.api.show(cmd.arg(0))?,
        "undo" => ctx.api.undo()?,
        "redo" => ctx.api.redo()?,
        "log-on" => ctx.api.log_on()?,
        "log-off" => ctx.api.log_off()?,
        "log-show" => ctx.api.log_show()?,
        "dir-tree" => {
            let dir = cmd.arg(0).map(PathBuf::from).unwrap_or_else(|| PathBuf::from("."));
            ctx.api.dir_tree(&dir)?
        }
        "help" => CmdResult::default().with_text_lines(HELP.lines().map(String::from).collect()),
        "exit" | "quit" => return Ok(Flow::Exit),
        other => {
            return Err(EditorError::Parse(format!(
                "unknown command '{}', type `help` for the list",
                other
            )))
        }
    };

    print_result(&result);
    Ok(Flow::Continue)
}

fn handle_init(ctx: &mut AppContext, cmd: &ParsedCommand) -> Result<CmdResult> {
    let usage = "init <file> [with-log]";
    let path = path_arg(cmd, 0, usage)?;
    let with_log = match cmd.arg(1) {
        None => false,
        Some(flag) if flag.eq_ignore_ascii_case("with-log") => true,
        Some(_) => return Err(usage_error(usage)),
    };
    ctx.api.init(&path, with_log)
}

fn required<'a>(cmd: &'a ParsedCommand, index: usize, usage: &str) -> Result<&'a str> {
    cmd.arg(index).ok_or_else(|| usage_error(usage))
}

fn path_arg(cmd: &ParsedCommand, index: usize, usage: &str) -> Result<PathBuf> {
    required(cmd, index, usage).map(PathBuf::from)
}

fn usage_error(usage: &str) -> EditorError {
    EditorError::Parse(format!("usage: {}", usage))
}
