//! MEMEM - CLI shell

use anyhow::{anyhow, bail, Context, Result};
use std::env;
use std::io::{self, Write};
use tracing_subscriber::EnvFilter;

use memem::catalog::{FieldType, Schema};
use memem::engine::{qualified_table_name, PLUGIN_INFO};
use memem::storage::{pack_row, unpack_row, FieldValue};
use memem::{Engine, EngineConfig};

/// Database every CLI table lives in
const CLI_DATABASE: &str = "cli";

/// Print welcome banner
fn print_banner() {
    println!(
        "{} {} - {}\nType '.help' for help, '.quit' to exit\n",
        PLUGIN_INFO.name, PLUGIN_INFO.version_string, PLUGIN_INFO.description
    );
}

/// Print help message
fn print_help() {
    println!(
        r#"
Commands:
  .help                     Show this help message
  .quit                     Exit
  .tables                   List all tables
  .stats                    Show row counts per table

Table commands:
  create <table> <type>...  Create a table (only 'int' fields are storable)
  insert <table> <int>...   Append one row
  scan <table>              Print every row in write order
  drop <table>              Drop a table

Examples:
  create pairs int int
  insert pairs 1 2
  scan pairs
"#
    );
}

/// Handle dot commands
fn handle_special_command(cmd: &str, engine: &Engine) -> Result<bool> {
    match cmd {
        ".quit" | ".exit" => return Ok(false),
        ".help" => print_help(),
        ".tables" => {
            let tables = engine.catalog().list_tables()?;
            if tables.is_empty() {
                println!("No tables.");
            }
            for name in tables {
                println!("{}", name);
            }
        }
        ".stats" => {
            for info in engine.catalog().stats()? {
                println!(
                    "{} (id {}): {} fields, {} rows",
                    info.name, info.id, info.field_count, info.row_count
                );
            }
        }
        other => {
            eprintln!("Unknown command: {}", other);
            eprintln!("Type '.help' for available commands.");
        }
    }
    Ok(true)
}

/// Execute one table command
fn execute(line: &str, engine: &Engine) -> Result<()> {
    let mut words = line.split_whitespace();
    let command = words.next().unwrap_or_default().to_ascii_lowercase();
    let table = words
        .next()
        .ok_or_else(|| anyhow!("missing table name"))?;
    let name = qualified_table_name(CLI_DATABASE, table);
    let args: Vec<&str> = words.collect();

    let mut handler = engine.create_handler();
    handler.open(&name)?;

    match command.as_str() {
        "create" => {
            let types = args
                .iter()
                .map(|a| a.parse::<FieldType>())
                .collect::<memem::Result<Vec<_>>>()?;
            handler.create_table(&name, &Schema::from_types(types))?;
            println!("Created {}", name);
        }
        "insert" => {
            let values = args
                .iter()
                .map(|a| {
                    a.parse::<i32>()
                        .map(FieldValue::Long)
                        .with_context(|| format!("'{}' is not a 32-bit integer", a))
                })
                .collect::<Result<Vec<_>>>()?;
            handler.write_row(&pack_row(&values))?;
            println!("1 row inserted");
        }
        "scan" => {
            let info = engine
                .catalog()
                .find_table(&name)?
                .ok_or_else(|| anyhow!("table '{}' does not exist", name))?;
            let schema = Schema::from_types(vec![FieldType::Long; info.field_count]);

            handler.scan_start()?;
            let mut count = 0;
            while let Some(row) = handler.scan_next()? {
                let values: Vec<String> = unpack_row(&schema, &row)?
                    .iter()
                    .filter_map(FieldValue::as_i32)
                    .map(|v| v.to_string())
                    .collect();
                println!("{}    {:02x?}", values.join(" | "), &row[..]);
                count += 1;
            }
            println!("({} rows)", count);
        }
        "drop" => {
            handler.drop_table(&name)?;
            println!("Dropped {}", name);
        }
        other => bail!("unknown command '{}'", other),
    }
    handler.close()?;
    Ok(())
}

/// Load config from `--config <path>` if given
fn load_config() -> Result<EngineConfig> {
    let args: Vec<String> = env::args().collect();
    for i in 1..args.len() {
        if args[i] == "--config" || args[i] == "-c" {
            let path = args
                .get(i + 1)
                .ok_or_else(|| anyhow!("--config needs a path"))?;
            return EngineConfig::load(path)
                .with_context(|| format!("failed to load config '{}'", path));
        }
    }
    Ok(EngineConfig::default())
}

/// Main REPL loop
fn run_repl(engine: &Engine) -> Result<()> {
    print_banner();

    loop {
        print!("memem> ");
        io::stdout().flush()?;

        let mut line = String::new();
        if io::stdin().read_line(&mut line)? == 0 {
            break; // EOF
        }

        let trimmed = line.trim();
        if trimmed.is_empty() {
            continue;
        }

        if trimmed.starts_with('.') {
            if !handle_special_command(trimmed, engine)? {
                break;
            }
            continue;
        }

        if let Err(e) = execute(trimmed, engine) {
            eprintln!("Error: {:#}", e);
        }
    }

    println!("\nGoodbye!");
    Ok(())
}

fn main() -> Result<()> {
    let config = load_config()?;

    let filter = EnvFilter::try_from_env("MEMEM_LOG")
        .unwrap_or_else(|_| EnvFilter::new(&config.log_filter));
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(io::stderr)
        .init();

    let engine = Engine::start(config);
    let result = run_repl(&engine);
    engine.shutdown()?;
    result
}
