//! Command-line argument parsing.
//!
//! Usage:
//!   macbatch [-v[<level>]] [-c<commands>] [-p<prompt>] [-n] <macro-file>

use std::path::PathBuf;

// ── Public types ──────────────────────────────────────────────────────────────

/// Parsed command-line arguments.
#[derive(Debug, Default)]
pub struct CliArgs {
    /// Initial executor verbose level (`-v<level>`; bare `-v` is 1).
    pub verbose: i32,
    /// Command table file (`-c<file>`).
    pub commands: Option<PathBuf>,
    /// Run as a pause session with this name (`-p<prompt>`).
    pub pause: Option<String>,
    /// Accept every command; ignore any table (`-n`).
    pub dry_run: bool,
    /// The macro to run.
    pub macro_file: PathBuf,
}

// ── Parsing ───────────────────────────────────────────────────────────────────

/// Parse `std::env::args()` and return [`CliArgs`] or an error message.
pub fn parse_args() -> Result<CliArgs, String> {
    let raw: Vec<String> = std::env::args().collect();
    parse_argv(raw.get(1..).unwrap_or_default())
}

/// Parse a slice of argument strings (exposed for testing).
pub fn parse_argv(argv: &[String]) -> Result<CliArgs, String> {
    let mut args = CliArgs::default();
    let mut positional: Vec<String> = Vec::new();
    let mut i = 0;

    while i < argv.len() {
        let arg = argv[i].as_str();

        // `--` ends flag processing.
        if arg == "--" {
            positional.extend(argv[i + 1..].iter().cloned());
            break;
        }

        if !arg.starts_with('-') || arg == "-" {
            positional.push(arg.to_owned());
            i += 1;
            continue;
        }

        let chars: Vec<char> = arg[1..].chars().collect();
        let mut j = 0;
        while j < chars.len() {
            match chars[j] {
                'n' => args.dry_run = true,

                // -v[<level>]
                'v' => {
                    let digits: String = chars[j + 1..].iter().collect();
                    args.verbose = if digits.is_empty() {
                        1
                    } else {
                        digits
                            .parse()
                            .map_err(|_| format!("invalid verbose level: {digits}"))?
                    };
                    j = chars.len();
                }

                // -c<file> or -c <file>
                'c' => {
                    let file = value_of(&chars, &mut j, argv, &mut i)
                        .ok_or("-c requires a file argument")?;
                    args.commands = Some(PathBuf::from(file));
                }

                // -p<prompt> or -p <prompt>
                'p' => {
                    let prompt = value_of(&chars, &mut j, argv, &mut i)
                        .ok_or("-p requires a prompt argument")?;
                    args.pause = Some(prompt);
                }

                c => return Err(format!("unknown option: -{c}")),
            }
            j += 1;
        }
        i += 1;
    }

    match positional.len() {
        0 => return Err("no macro file given".to_owned()),
        1 => args.macro_file = PathBuf::from(positional.remove(0)),
        n => return Err(format!("too many arguments ({n})")),
    }

    Ok(args)
}

/// Value of a flag: the rest of this argument if any, otherwise the next one.
fn value_of(chars: &[char], j: &mut usize, argv: &[String], i: &mut usize) -> Option<String> {
    if *j + 1 < chars.len() {
        let s: String = chars[*j + 1..].iter().collect();
        *j = chars.len();
        Some(s)
    } else if *i + 1 < argv.len() {
        *i += 1;
        Some(argv[*i].clone())
    } else {
        None
    }
}

// ── Path helpers ──────────────────────────────────────────────────────────────

/// Determine the command table file.
///
/// Priority: `-c<file>` CLI flag → `MACBATCH_COMMANDS` env var →
/// `commands.txt` in the user config directory (if it exists) → none.
pub fn resolve_commands(cli_override: Option<&PathBuf>) -> Option<PathBuf> {
    if let Some(p) = cli_override {
        return Some(p.clone());
    }
    if let Ok(p) = std::env::var("MACBATCH_COMMANDS") {
        if !p.is_empty() {
            return Some(PathBuf::from(p));
        }
    }
    directories::ProjectDirs::from("", "", "macbatch")
        .map(|dirs| dirs.config_dir().join("commands.txt"))
        .filter(|p| p.exists())
}

// ── Tests ─────────────────────────────────────────────────────────────────────
