use macbatch::cli;
use macbatch::console::{Console, StdConsole};
use macbatch::session::Session;
use macbatch::table::CommandTable;
use tracing_subscriber::EnvFilter;

fn main() {
    // RUST_LOG=debug shows each dispatched command.
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::from_default_env())
        .with_target(false)
        .with_writer(std::io::stderr)
        .init();

    let args = match cli::parse_args() {
        Ok(a) => a,
        Err(e) => {
            eprintln!("macbatch: {e}");
            eprintln!("Usage: macbatch [-v[<level>]] [-c<commands>] [-p<prompt>] [-n] <macro-file>");
            std::process::exit(2);
        }
    };

    let mut console = StdConsole;

    // ── Command table ─────────────────────────────────────────────────────────
    let mut table = CommandTable::new();
    if !args.dry_run {
        if let Some(path) = cli::resolve_commands(args.commands.as_ref()) {
            match CommandTable::load_file(&path, &mut console) {
                Ok((t, errors)) => {
                    for e in &errors {
                        console.error(&format!("macbatch: {}: {e}", path.display()));
                    }
                    tracing::debug!(path = %path.display(), commands = t.len(), "command table loaded");
                    table = t;
                }
                Err(e) => {
                    eprintln!("macbatch: cannot read command table {}: {e}", path.display());
                    std::process::exit(1);
                }
            }
        }
    }
    table.set_verbose(args.verbose);

    // ── Run the macro ─────────────────────────────────────────────────────────
    let mut session = match Session::open(&args.macro_file, ()) {
        Ok(s) => s,
        Err(e) => {
            eprintln!("macbatch: {e}");
            std::process::exit(1);
        }
    };

    let result = match &args.pause {
        Some(prompt) => session.pause(prompt, &mut table, &mut console),
        None => session.run(&mut table, &mut console),
    };

    if let Err(e) = result {
        eprintln!("macbatch: {e}");
        std::process::exit(1);
    }
}
