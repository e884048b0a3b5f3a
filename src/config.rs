// ABOUTME: Version info and REPL prompt/banner constants

pub const VERSION: &str = "0.1.0";
pub const WELCOME_MESSAGE: &str = "APE Interpreter v0.1.0";

pub const REPL_PROMPT: &str = "APE >> ";
pub const REPL_CONTINUATION_PROMPT: &str = "... ";

pub const PARSE_ERROR_HEADER: &str = "APE found an error!";
