//! Feeding text to the interpreter: whole files, or a line at a time.

use std::io::{self, BufRead, Write};
use std::path::Path;

use humble::interpret::eval;
use humble::lex::{paren_depth, tokenize};
use humble::{Env, SExp, SExpIterator};
use log::{info, warn};

const CONTINUATION_PROMPT: &str = "… ";

/// One interpreter session: a global environment shared by everything fed
/// into it.
pub struct Session {
    env: Env,
    show_ast: bool,
}

impl Session {
    pub fn new(show_ast: bool) -> Self {
        Session {
            env: Env::global(),
            show_ast,
        }
    }

    /// Evaluate every form of `source` in order. Values are written to `out`
    /// when `echo` is set; errors always go to `err`, after which the next
    /// form is evaluated. A read error ends the source.
    ///
    /// Returns how many forms failed.
    pub fn run_source(
        &self,
        source: &str,
        echo: bool,
        out: &mut impl Write,
        err: &mut impl Write,
    ) -> io::Result<usize> {
        let mut failures = 0;
        for s_exp in SExpIterator::new(source) {
            let result = match s_exp {
                Ok(s_exp) => {
                    if self.show_ast {
                        self.print_ast(&s_exp, out)?;
                    }
                    eval(&s_exp, &self.env)
                },
                Err(e) => Err(e),
            };
            match result {
                Ok(value) if echo => writeln!(out, "{}", value)?,
                Ok(_) => {},
                Err(e) => {
                    failures += 1;
                    writeln!(err, "ERROR: {}", e)?;
                    if e.is_syntax_error() {
                        warn!("rest of the input skipped after: {}", e);
                        break;
                    }
                },
            }
        }
        Ok(failures)
    }

    fn print_ast(&self, s_exp: &SExp, out: &mut impl Write) -> io::Result<()> {
        match serde_json::to_string(s_exp) {
            Ok(json) => writeln!(out, "{}", json),
            Err(e) => {
                warn!("cannot render {} as json: {}", s_exp, e);
                Ok(())
            },
        }
    }

    /// Load a source file into the session.
    pub fn load_file(
        &self,
        path: &Path,
        out: &mut impl Write,
        err: &mut impl Write,
    ) -> io::Result<usize> {
        let source = std::fs::read_to_string(path)?;
        info!("loading {}", path.display());
        let failures = self.run_source(&source, false, out, err)?;
        if failures > 0 {
            warn!("{}: {} form(s) failed", path.display(), failures);
        }
        Ok(failures)
    }

    /// Read-eval-print until `input` runs dry. A line that leaves parens open
    /// is continued on the next one.
    pub fn repl(
        &self,
        input: &mut impl BufRead,
        out: &mut impl Write,
        err: &mut impl Write,
        prompt: &str,
    ) -> io::Result<()> {
        let mut buffer = String::new();
        loop {
            let shown = if buffer.is_empty() {
                prompt
            } else {
                CONTINUATION_PROMPT
            };
            write!(out, "{}", shown)?;
            out.flush()?;

            let mut line = String::new();
            if input.read_line(&mut line)? == 0 {
                break;
            }
            buffer.push_str(&line);
            if paren_depth(&tokenize(&buffer)) > 0 {
                continue;
            }

            let source = std::mem::take(&mut buffer);
            if !source.trim().is_empty() {
                self.run_source(&source, true, out, err)?;
            }
        }

        // whatever is left is unbalanced; let the reader say so
        if !buffer.trim().is_empty() {
            writeln!(out)?;
            self.run_source(&buffer, true, out, err)?;
        }
        Ok(())
    }
}
