//! lus-drv - Compiler Driver
//!
//! ============================================================================
//! DRIVER OVERVIEW
//! ============================================================================
//!
//! Entry point and orchestrator for the pipeline. The driver is
//! responsible for:
//!
//! 1. parsing command-line arguments into a [`Config`]
//! 2. reading the source file (or the built-in demo program)
//! 3. running the phases in order: lex -> parse -> analyze -> emit,
//!    stopping at the first phase that leaves errors in the handler
//! 4. printing every diagnostic in insertion order plus a final verdict
//! 5. writing the emitted Python and/or executing it with `python3`
//!
//! ============================================================================
//! COMPILATION PIPELINE
//! ============================================================================
//!
//! ```text
//! Source (.lus)
//!      |
//!      v
//! [lus-lex]  -> tokens          fatal on first error
//!      |
//!      v
//! [lus-par]  -> AST             accumulates, then blocks
//!      |
//!      v
//! [lus-sem]  -> verdict         accumulates, then blocks
//!      |
//!      v
//! [lus-gen]  -> Python text     pure, no diagnostics
//! ```
//!
//! All compiler chatter (diagnostics, verdict, debug dumps) goes to
//! stderr; stdout belongs to the executed program.

mod demo;

pub use demo::DEMO_PROGRAM;

use std::fmt::Write as _;
use std::fs;
use std::path::PathBuf;
use std::process::Command;

use anyhow::{bail, Context, Result};

use lus_lex::{tokenize, LiteralValue, Token};
use lus_par::Parser;
use lus_sem::SemanticAnalyzer;
use lus_util::Handler;

/// Usage text for `--help`.
pub const USAGE: &str = "\
lusc - compiler for the Lusitano language

Usage: lusc [<source-file.lus>] [options]

With no source file, compiles and runs a built-in demo program.

Options:
  -r, --run              execute the emitted program after compiling
  -o, --output <path>    write the emitted Python source to <path>
      --tokens           print the token table (debug)
      --ast              print the AST and the symbol table (debug)
      --ast-json <path>  export the AST as JSON to <path>
  -h, --help             print this help
  -V, --version          print version information
";

/// Driver configuration, parsed from the command line.
#[derive(Debug, Default)]
pub struct Config {
    /// Source file; `None` compiles the built-in demo.
    pub input: Option<PathBuf>,

    /// Execute the emitted program after a successful compile.
    pub run: bool,

    /// Write the emitted Python source to this path.
    pub output: Option<PathBuf>,

    /// Print the token table.
    pub show_tokens: bool,

    /// Print the AST tree and the symbol table.
    pub show_ast: bool,

    /// Export the AST as JSON to this path.
    pub ast_json: Option<PathBuf>,
}

/// What a command-line invocation asks for.
#[derive(Debug)]
pub enum Invocation {
    Help,
    Version,
    Compile(Config),
}

impl Config {
    /// Parses command-line arguments (without the program name).
    ///
    /// # Examples
    ///
    /// ```
    /// use lus_drv::{Config, Invocation};
    ///
    /// let args = ["programa.lus", "--run"].map(String::from);
    /// match Config::parse(args).unwrap() {
    ///     Invocation::Compile(config) => {
    ///         assert!(config.run);
    ///         assert!(config.input.is_some());
    ///     }
    ///     other => panic!("expected a compile invocation, got {:?}", other),
    /// }
    ///
    /// assert!(matches!(
    ///     Config::parse(["--help".to_string()]).unwrap(),
    ///     Invocation::Help
    /// ));
    /// ```
    pub fn parse<I>(args: I) -> Result<Invocation>
    where
        I: IntoIterator<Item = String>,
    {
        let mut args = args.into_iter();
        let mut config = Config::default();

        while let Some(arg) = args.next() {
            match arg.as_str() {
                "-h" | "--help" => return Ok(Invocation::Help),
                "-V" | "--version" => return Ok(Invocation::Version),
                "-r" | "--run" => config.run = true,
                "-o" | "--output" => {
                    let value = args
                        .next()
                        .with_context(|| format!("option '{}' requires a path", arg))?;
                    config.output = Some(PathBuf::from(value));
                }
                "--tokens" => config.show_tokens = true,
                "--ast" => config.show_ast = true,
                "--ast-json" => {
                    let value = args
                        .next()
                        .context("option '--ast-json' requires a path")?;
                    config.ast_json = Some(PathBuf::from(value));
                }
                other if other.starts_with('-') => bail!("unknown option '{}'", other),
                other => {
                    if config.input.is_some() {
                        bail!("only one source file may be given (got '{}')", other);
                    }
                    config.input = Some(PathBuf::from(other));
                }
            }
        }

        Ok(Invocation::Compile(config))
    }
}

/// One compiler invocation: configuration plus the shared diagnostic
/// handler every phase reports into.
pub struct Session {
    pub config: Config,
    pub handler: Handler,
}

impl Session {
    pub fn new(config: Config) -> Self {
        Self {
            config,
            handler: Handler::new(),
        }
    }

    /// Runs the configured compilation from start to finish.
    pub fn run(&mut self) -> Result<()> {
        let is_demo = self.config.input.is_none();
        let source = match &self.config.input {
            Some(path) => fs::read_to_string(path)
                .with_context(|| format!("cannot read input file '{}'", path.display()))?,
            None => DEMO_PROGRAM.to_string(),
        };

        let python = self.compile(&source)?;

        let rendered = self.handler.render_all();
        if !rendered.is_empty() {
            eprintln!("{}", rendered);
        }

        let Some(python) = python else {
            bail!(
                "compilation failed with {} error(s)",
                self.handler.error_count()
            );
        };

        if self.handler.warning_count() > 0 {
            eprintln!(
                "compilation succeeded with {} warning(s)",
                self.handler.warning_count()
            );
        } else {
            eprintln!("compilation succeeded");
        }

        if let Some(path) = &self.config.output {
            fs::write(path, &python)
                .with_context(|| format!("cannot write output file '{}'", path.display()))?;
            eprintln!("emitted Python written to {}", path.display());
        }

        // The demo always executes; files only with --run.
        if self.config.run || is_demo {
            self.execute(&python)?;
        }

        Ok(())
    }

    /// Runs the pipeline over `source`.
    ///
    /// Returns `Ok(None)` when a phase reported errors (emission is
    /// blocked); `Err` only for driver-level I/O failures.
    fn compile(&mut self, source: &str) -> Result<Option<String>> {
        // Phase 1: lexical analysis (fatal on first error).
        let tokens = match tokenize(source) {
            Ok(tokens) => tokens,
            Err(err) => {
                self.handler.emit(err.to_diagnostic());
                return Ok(None);
            }
        };

        if self.config.show_tokens {
            eprintln!("{}", render_token_table(&tokens));
        }

        // Phase 2: parsing (accumulates, then blocks).
        let program = Parser::new(tokens, &mut self.handler).parse();
        if self.handler.has_errors() {
            return Ok(None);
        }

        if self.config.show_ast {
            eprintln!("{}", lus_par::render_ast(&program));
        }

        if let Some(path) = &self.config.ast_json {
            let json =
                serde_json::to_string_pretty(&program).context("cannot serialize the AST")?;
            fs::write(path, json)
                .with_context(|| format!("cannot write AST JSON to '{}'", path.display()))?;
        }

        // Phase 3: semantic analysis (accumulates, then blocks).
        let mut analyzer = SemanticAnalyzer::new(&mut self.handler);
        let ok = analyzer.analyze(&program);

        if self.config.show_ast {
            eprintln!("{}", analyzer.table.render_table());
        }

        if !ok {
            return Ok(None);
        }

        // Phase 4: emission.
        Ok(Some(lus_gen::emit(&program)))
    }

    /// Writes the emitted program to a scratch file and runs it with
    /// `python3`, forwarding its exit status.
    fn execute(&self, python: &str) -> Result<()> {
        let dir = tempfile::tempdir().context("cannot create a temporary directory")?;
        let path = dir.path().join("programa.py");
        fs::write(&path, python)
            .with_context(|| format!("cannot write scratch file '{}'", path.display()))?;

        let status = Command::new("python3")
            .arg(&path)
            .status()
            .context("cannot execute python3")?;

        if !status.success() {
            bail!("program exited with status {}", status.code().unwrap_or(1));
        }
        Ok(())
    }
}

/// Renders the token table shown by `--tokens`.
///
/// # Examples
///
/// ```
/// use lus_drv::render_token_table;
/// use lus_lex::tokenize;
///
/// let tokens = tokenize("var x = 1").unwrap();
/// let table = render_token_table(&tokens);
/// assert!(table.contains("L1:C1"));
/// assert!(table.contains("IntLiteral"));
/// ```
pub fn render_token_table(tokens: &[Token]) -> String {
    let mut out = String::new();
    let _ = writeln!(
        out,
        "{:<10} {:<14} {:<20} {}",
        "position", "kind", "lexeme", "value"
    );
    let _ = writeln!(out, "{}", "-".repeat(60));
    for token in tokens {
        let value = match &token.value {
            LiteralValue::None => "-".to_string(),
            LiteralValue::Int(v) => v.to_string(),
            LiteralValue::Real(v) => v.to_string(),
            LiteralValue::Text(s) => format!("{:?}", s),
            LiteralValue::Bool(b) => b.to_string(),
        };
        let _ = writeln!(
            out,
            "L{}:C{:<6} {:<14} {:<20} {}",
            token.span.line,
            token.span.column,
            token.kind.to_string(),
            format!("{:?}", token.lexeme),
            value
        );
    }
    out
}

/// Library entry point for the `lusc` binary.
pub fn main() -> Result<()> {
    match Config::parse(std::env::args().skip(1))? {
        Invocation::Help => {
            print!("{}", USAGE);
            Ok(())
        }
        Invocation::Version => {
            println!("lusc {}", env!("CARGO_PKG_VERSION"));
            Ok(())
        }
        Invocation::Compile(config) => Session::new(config).run(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn parse_args(args: &[&str]) -> Result<Invocation> {
        Config::parse(args.iter().map(|s| s.to_string()))
    }

    #[test]
    fn test_parse_empty_is_demo_compile() {
        match parse_args(&[]).unwrap() {
            Invocation::Compile(config) => {
                assert!(config.input.is_none());
                assert!(!config.run);
            }
            other => panic!("expected compile, got {:?}", other),
        }
    }

    #[test]
    fn test_parse_input_and_flags() {
        match parse_args(&["programa.lus", "-r", "-o", "saida.py"]).unwrap() {
            Invocation::Compile(config) => {
                assert_eq!(config.input.as_deref(), Some(std::path::Path::new("programa.lus")));
                assert!(config.run);
                assert_eq!(config.output.as_deref(), Some(std::path::Path::new("saida.py")));
            }
            other => panic!("expected compile, got {:?}", other),
        }
    }

    #[test]
    fn test_parse_help_and_version() {
        assert!(matches!(parse_args(&["--help"]).unwrap(), Invocation::Help));
        assert!(matches!(parse_args(&["-V"]).unwrap(), Invocation::Version));
    }

    #[test]
    fn test_parse_rejects_unknown_option() {
        assert!(parse_args(&["--turbo"]).is_err());
    }

    #[test]
    fn test_parse_output_requires_value() {
        assert!(parse_args(&["programa.lus", "-o"]).is_err());
    }

    #[test]
    fn test_parse_rejects_two_inputs() {
        assert!(parse_args(&["a.lus", "b.lus"]).is_err());
    }

    #[test]
    fn test_compile_produces_python() {
        let mut session = Session::new(Config::default());
        let python = session
            .compile("funcao principal() { escreva(\"Ola\") }")
            .unwrap()
            .expect("compilation should succeed");
        assert!(python.contains("def principal():"));
        assert!(python.contains("print(\"Ola\", sep='')"));
        assert!(!session.handler.has_errors());
    }

    #[test]
    fn test_compile_blocks_on_lex_error() {
        let mut session = Session::new(Config::default());
        let result = session.compile("var x = @").unwrap();
        assert!(result.is_none());
        assert_eq!(session.handler.error_count(), 1);
    }

    #[test]
    fn test_compile_blocks_on_parse_error() {
        let mut session = Session::new(Config::default());
        let result = session.compile("funcao { }").unwrap();
        assert!(result.is_none());
        assert!(session.handler.has_errors());
    }

    #[test]
    fn test_compile_blocks_on_semantic_error() {
        let mut session = Session::new(Config::default());
        let result = session
            .compile("funcao principal() { var x: inteiro = \"hi\" }")
            .unwrap();
        assert!(result.is_none());
        assert_eq!(session.handler.error_count(), 1);
    }

    #[test]
    fn test_demo_program_compiles_cleanly() {
        let mut session = Session::new(Config::default());
        let python = session.compile(DEMO_PROGRAM).unwrap();
        assert!(python.is_some(), "{}", session.handler.render_all());
        assert_eq!(session.handler.error_count(), 0);
        assert_eq!(session.handler.warning_count(), 0);
    }

    #[test]
    fn test_token_table_lists_positions() {
        let tokens = tokenize("var x = 1").unwrap();
        let table = render_token_table(&tokens);
        assert!(table.contains("L1:C1"));
        assert!(table.contains("Var"));
        assert!(table.contains("Identifier"));
    }
}
