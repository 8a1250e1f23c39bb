use std::io::{BufRead, Write};
use std::{fs, path::Path};

pub mod ast;
pub mod backend;
pub mod config;
pub mod errors;
pub mod frontend;
pub mod interpreter;
pub mod semantic;

pub const VERSION: &str = "0.1.0";

use crate::config::driver::{DEFAULT_LOG_LEVEL, LOG_ENV, VERBOSE_LOG_LEVEL};
use crate::errors::{LangError, LangResult};
use crate::interpreter::Interpreter;

pub fn read(filename: &Path) -> LangResult<String> {
    fs::read_to_string(filename).map_err(|source| LangError::FileRead {
        path: filename.to_path_buf(),
        source,
    })
}

/// Parse `source` and run it against the given streams, returning the
/// output sink once the program finishes.
pub fn interpret<R: BufRead, W: Write>(source: &str, file: Option<&str>, input: R, output: W) -> LangResult<W> {
    let ast = frontend::parse_source(source, file)?;
    let mut interpreter = Interpreter::new(input, output);
    interpreter.run(&ast)?;
    Ok(interpreter.into_output())
}

/// Route `log` records to stderr. The level comes from `MINILANG_LOG` when
/// set, else `warn` (`debug` when verbose). Later calls are ignored.
pub fn init_logging(verbose: bool) {
    let level = if verbose { VERBOSE_LOG_LEVEL } else { DEFAULT_LOG_LEVEL };
    let _ = env_logger::Builder::from_env(env_logger::Env::default().filter_or(LOG_ENV, level))
        .format_timestamp(None)
        .try_init();
}
