// Main entry point for the mocksql CLI
// This provides an interactive shell over the mock query engine

use anyhow::{bail, Result};
use clap::Parser as ClapParser;
use mocksql::{Catalog, ConnectionConfig, DbmsKind, EngineConfig, MockQueryEngine};
use std::io::{self, Write};
use std::sync::Arc;
use std::time::Duration;

/// mocksql - run SQL against the SCOTT demo schema without a database
#[derive(ClapParser)]
#[command(author, version, about, long_about = None)]
struct Args {
    /// Database flavor to present as
    #[arg(short, long, value_enum, default_value_t = DbmsKind::Oracle)]
    dbms: DbmsKind,

    /// Execute a single SQL command and exit
    #[arg(short, long)]
    execute: Option<String>,

    /// Print results as JSON instead of a table
    #[arg(long)]
    json: bool,

    /// Seed for simulated latency and affected-row counts
    #[arg(long)]
    seed: Option<u64>,

    /// Lower bound of the simulated latency
    #[arg(long, default_value_t = 200)]
    min_latency_ms: u64,

    /// Upper bound (exclusive) of the simulated latency
    #[arg(long, default_value_t = 500)]
    max_latency_ms: u64,
}

impl Args {
    fn engine_config(&self) -> Result<EngineConfig> {
        if self.min_latency_ms > self.max_latency_ms {
            bail!(
                "--min-latency-ms ({}) is greater than --max-latency-ms ({})",
                self.min_latency_ms,
                self.max_latency_ms
            );
        }

        Ok(EngineConfig {
            latency: Duration::from_millis(self.min_latency_ms)
                ..Duration::from_millis(self.max_latency_ms),
            seed: self.seed,
            ..EngineConfig::default()
        })
    }
}

#[tokio::main]
async fn main() -> Result<()> {
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("warn")).init();

    let args = Args::parse();
    let engine = MockQueryEngine::with_config(Arc::new(Catalog::scott()), args.engine_config()?);

    // If a command was provided, execute it and exit
    if let Some(sql) = &args.execute {
        execute_query(&engine, sql, args.json).await?;
        return Ok(());
    }

    println!("╔════════════════════════════════════════════╗");
    println!("║          mocksql Interactive Shell         ║");
    println!("╚════════════════════════════════════════════╝");
    println!();
    println!("Presenting as {} (mock mode)", args.dbms);
    println!("Type SQL commands or '.help' for help");
    println!("Type '.exit' to quit");
    println!();

    repl(&engine, &args).await
}

/// REPL (Read-Eval-Print Loop) implementation
async fn repl(engine: &MockQueryEngine, args: &Args) -> Result<()> {
    let stdin = io::stdin();
    let mut stdout = io::stdout();

    loop {
        print!("mocksql> ");
        stdout.flush()?;

        let mut input = String::new();
        if stdin.read_line(&mut input)? == 0 {
            // EOF
            println!();
            break;
        }

        let input = input.trim();
        if input.is_empty() {
            continue;
        }

        if input.starts_with('.') {
            match input {
                ".exit" | ".quit" => {
                    println!("Goodbye!");
                    break;
                }
                ".help" => print_help(),
                ".tables" => {
                    for name in engine.relation_names() {
                        println!("{}", name);
                    }
                }
                ".connect" => print_connection(engine, args.dbms, args.json)?,
                _ => {
                    println!("Unknown command: {}", input);
                    println!("Type '.help' for help");
                }
            }
            continue;
        }

        if let Err(e) = execute_query(engine, input, args.json).await {
            eprintln!("Error: {}", e);
        }
    }

    Ok(())
}

/// Execute a query and print the result
async fn execute_query(engine: &MockQueryEngine, sql: &str, json: bool) -> Result<()> {
    let result = engine.execute(sql).await;
    if json {
        println!("{}", serde_json::to_string_pretty(&result)?);
    } else {
        println!("{}", result.format());
        println!("({:.3} sec)", result.execution_time());
    }
    Ok(())
}

fn print_connection(engine: &MockQueryEngine, dbms: DbmsKind, json: bool) -> Result<()> {
    let config = ConnectionConfig::defaults_for(dbms);
    let outcome = engine.test_connection(dbms);

    if json {
        println!("{}", serde_json::to_string_pretty(&outcome)?);
        return Ok(());
    }

    println!(
        "{}@{}:{}/{}",
        config.username, config.host, config.port, config.database
    );
    println!("{}", outcome.message);
    if let Some(version) = &outcome.version {
        println!("Server version: {}", version);
    }
    Ok(())
}

/// Print help information
fn print_help() {
    println!("Special Commands:");
    println!("  .help              Show this help message");
    println!("  .tables            List the demo tables");
    println!("  .connect           Run a mock connection test");
    println!("  .exit, .quit       Exit the shell");
    println!();
    println!("Tables: emp (employee, employees), dept (department, departments), salgrade");
    println!();
    println!("Supported SQL:");
    println!("    SELECT * FROM emp");
    println!("    SELECT ename, sal FROM emp WHERE deptno = 20 AND job = 'CLERK'");
    println!("    SELECT * FROM emp ORDER BY sal DESC");
    println!();
    println!("Notes:");
    println!("  - WHERE only understands column = number and column = 'text'");
    println!("  - INSERT, UPDATE and DELETE report a simulated row count");
    println!("  - Nothing is ever written; the tables are read-only");
    println!();
}
