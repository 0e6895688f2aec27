//! Interactive front end: reads one query per line from stdin and prints
//! the produced values, one per line. Delimiters can be overridden through
//! a `breeze.toml` next to the working directory, e.g.:
//!
//! ```toml
//! [syntax]
//! separator = ";;"
//! prefix = "'"
//! suffix = "'"
//! ```

use std::io::{self, BufRead, Write};

use config::Config;
use tracing::debug;
use tracing_subscriber::EnvFilter;

use breezedb::error::Result;
use breezedb::query::{Engine, QuerySyntax};
use breezedb::store::JsonStore;

fn configured_syntax() -> Result<QuerySyntax> {
    let settings = Config::builder()
        .add_source(config::File::with_name("breeze").required(false))
        .build()
        .map_err(|e| breezedb::error::BreezeError::Config(e.to_string()))?;
    let separator = settings
        .get_string("syntax.separator")
        .unwrap_or_else(|_| ">>".to_owned());
    let prefix = settings
        .get_string("syntax.prefix")
        .unwrap_or_else(|_| "%".to_owned());
    let suffix = settings
        .get_string("syntax.suffix")
        .unwrap_or_else(|_| "%;".to_owned());
    QuerySyntax::new(&separator, &prefix, &suffix)
}

fn main() {
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")),
        )
        .init();

    let syntax = match configured_syntax() {
        Ok(syntax) => syntax,
        Err(e) => {
            eprintln!("{}", e);
            std::process::exit(1);
        }
    };
    debug!("query syntax configured");

    let store = JsonStore::new();
    let engine = Engine::with_syntax(&store, syntax);

    let stdin = io::stdin();
    let mut stdout = io::stdout();
    print!("breeze> ");
    let _ = stdout.flush();
    for line in stdin.lock().lines() {
        let line = match line {
            Ok(line) => line,
            Err(_) => break,
        };
        if line.trim().is_empty() {
            print!("breeze> ");
            let _ = stdout.flush();
            continue;
        }
        match engine.run_query(&line) {
            Ok(Some(values)) => {
                for value in values {
                    println!("{}", value);
                }
            }
            Ok(None) => println!("ok"),
            Err(e) => eprintln!("{}", e),
        }
        print!("breeze> ");
        let _ = stdout.flush();
    }
}
