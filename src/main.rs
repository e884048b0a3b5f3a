use ape::config::{self, PARSE_ERROR_HEADER, REPL_CONTINUATION_PROMPT, REPL_PROMPT, WELCOME_MESSAGE};
use ape::env::Environment;
use ape::eval::eval_program;
use ape::lexer::Lexer;
use ape::parser::Parser;
use ape::value;
use clap::Parser as ClapParser;
use rustyline::error::ReadlineError;
use rustyline::{Config, Editor};
use std::path::PathBuf;

/// A tree-walking interpreter for the APE scripting language
#[derive(ClapParser, Debug)]
#[command(name = "ape")]
#[command(version = config::VERSION)]
#[command(about = "A tree-walking interpreter for the APE scripting language")]
struct CliArgs {
    /// Script file to execute (must end in .ape); starts the REPL if omitted
    #[arg(value_name = "FILE")]
    script: Option<PathBuf>,
}

fn main() -> Result<(), Box<dyn std::error::Error>> {
    let args = CliArgs::parse();

    if let Some(script_path) = args.script {
        run_script(&script_path)?;
        return Ok(());
    }

    run_repl()
}

fn run_script(path: &PathBuf) -> Result<(), Box<dyn std::error::Error>> {
    if path.extension().and_then(|ext| ext.to_str()) != Some("ape") {
        return Err(format!("expected a .ape file, got {}", path.display()).into());
    }

    let source = std::fs::read_to_string(path)
        .map_err(|e| format!("cannot read script file {}: {}", path.display(), e))?;

    let lexer = Lexer::new(&source);
    let mut parser = Parser::new(lexer);
    let program = parser.parse_program();

    if !parser.errors().is_empty() {
        eprintln!("{}", PARSE_ERROR_HEADER);
        for message in parser.errors() {
            eprintln!("{}", message);
        }
        return Ok(());
    }

    let env = Environment::new();
    match eval_program(&program, env) {
        Ok(value::Value::Null) => {}
        Ok(result) => println!("{}", result),
        Err(e) => println!("ERROR: {}", e),
    }

    Ok(())
}

fn run_repl() -> Result<(), Box<dyn std::error::Error>> {
    let env = Environment::new();
    let config = Config::builder().auto_add_history(true).build();
    let mut rl: Editor<()> =
        Editor::with_config(config).map_err(|e| format!("failed to initialize REPL: {}", e))?;

    let history_file = ".ape_history";
    let _ = rl.load_history(history_file);

    println!("{}", WELCOME_MESSAGE);

    let mut buffer = String::new();
    let mut brace_depth: i32 = 0;

    loop {
        let prompt = if brace_depth > 0 {
            REPL_CONTINUATION_PROMPT
        } else {
            REPL_PROMPT
        };

        match rl.readline(prompt) {
            Ok(line) => {
                brace_depth += brace_balance(&line);
                buffer.push_str(&line);
                buffer.push('\n');

                if brace_depth > 0 {
                    continue;
                }

                let source = std::mem::take(&mut buffer);
                brace_depth = 0;

                if source.trim().is_empty() {
                    continue;
                }

                let lexer = Lexer::new(&source);
                let mut parser = Parser::new(lexer);
                let program = parser.parse_program();

                if !parser.errors().is_empty() {
                    eprintln!("{}", PARSE_ERROR_HEADER);
                    for message in parser.errors() {
                        eprintln!("{}", message);
                    }
                    continue;
                }

                match eval_program(&program, env.clone()) {
                    Ok(result) => println!("{}", result),
                    Err(e) => println!("ERROR: {}", e),
                }
            }
            Err(ReadlineError::Interrupted) => {
                buffer.clear();
                brace_depth = 0;
                println!("^C");
                continue;
            }
            Err(ReadlineError::Eof) => {
                break;
            }
            Err(err) => {
                eprintln!("Error: {}", err);
                break;
            }
        }
    }

    let _ = rl.save_history(history_file);
    Ok(())
}

fn brace_balance(line: &str) -> i32 {
    let mut depth = 0;
    for ch in line.chars() {
        match ch {
            '{' => depth += 1,
            '}' => depth -= 1,
            _ => {}
        }
    }
    depth
}
