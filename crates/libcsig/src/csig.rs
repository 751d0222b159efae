use std::fs;
use std::io::Write;
use std::path::{Path, PathBuf};

use lang_c::driver::{self, Config, Parse};
use tracing::debug;

use crate::{
    ast::SourceUnit,
    error::{CsigError, Result},
    lower,
    render::Renderer,
};

/// Csig turns a C header into a one-line-per-function interface listing.
///
/// The header is expanded by the system C preprocessor and parsed with the
/// lang-c grammar; the resulting declarations are reduced to the csig data
/// model and rendered as signature lines. The preprocessor must be
/// installed and on the PATH unless preprocessing is disabled.
#[derive(Debug, Clone)]
pub struct Csig {
    /// Preprocessor invocation, e.g. `cc -E`. Split shell-style.
    cpp_command: String,

    /// Extra include search directories, passed as `-I`.
    include_dirs: Vec<PathBuf>,

    /// Extra macro definitions, passed as `-D`.
    defines: Vec<String>,

    /// Marker tag emitted ahead of every signature line.
    marker: String,

    /// Whether to run the preprocessor before parsing.
    preprocess: bool,
}

impl Default for Csig {
    fn default() -> Self {
        Self::new()
    }
}

impl Csig {
    /// Creates a new Csig instance with default configuration: `cc -E` as
    /// the preprocessor and `extern` as the marker.
    pub fn new() -> Self {
        Self {
            cpp_command: "cc -E".to_string(),
            include_dirs: Vec::new(),
            defines: Vec::new(),
            marker: "extern".to_string(),
            preprocess: true,
        }
    }

    /// Sets the preprocessor invocation, split shell-style into a command
    /// and leading options.
    pub fn with_cpp_command(mut self, cpp_command: impl Into<String>) -> Self {
        self.cpp_command = cpp_command.into();
        self
    }

    /// Adds a directory to the preprocessor include search path.
    pub fn with_include_dir(mut self, dir: impl Into<PathBuf>) -> Self {
        self.include_dirs.push(dir.into());
        self
    }

    /// Adds a preprocessor macro definition, as `NAME` or `NAME=VALUE`.
    pub fn with_define(mut self, define: impl Into<String>) -> Self {
        self.defines.push(define.into());
        self
    }

    /// Sets the marker tag emitted ahead of every signature line.
    pub fn with_marker(mut self, marker: impl Into<String>) -> Self {
        self.marker = marker.into();
        self
    }

    /// Enables or disables preprocessing. With preprocessing disabled the
    /// header is parsed as-is, which suits already-expanded sources.
    pub fn with_preprocess(mut self, preprocess: bool) -> Self {
        self.preprocess = preprocess;
        self
    }

    /// Parse `header` and return its declarations in the csig data model.
    pub fn inspect(&self, header: &Path) -> Result<SourceUnit> {
        let parse = self.parse_header(header)?;
        let unit = lower::lower_unit(&parse, &header.display().to_string());
        debug!(
            items = unit.items.len(),
            "lowered {}",
            header.display()
        );
        Ok(unit)
    }

    /// Render `header` as an interface listing, one signature line per
    /// function declaration in source order.
    ///
    /// One `name at location` diagnostic line per function is written to
    /// `diagnostics` while rendering. The listing is returned only if every
    /// declaration renders; any unsupported construct fails the whole call.
    pub fn render(&self, header: &Path, diagnostics: &mut dyn Write) -> Result<String> {
        let unit = self.inspect(header)?;
        Renderer::new()
            .with_marker(self.marker.as_str())
            .render(&unit, diagnostics)
    }

    /// Returns a pretty-printed JSON dump of the lowered declarations.
    pub fn raw_json(&self, header: &Path) -> Result<String> {
        Ok(serde_json::to_string_pretty(&self.inspect(header)?)?)
    }

    /// Render `header` and write the listing to `output`.
    ///
    /// The listing is buffered and the file created only after the whole
    /// unit renders, so a failed run never leaves a truncated listing
    /// behind.
    pub fn write_interface(
        &self,
        header: &Path,
        output: &Path,
        diagnostics: &mut dyn Write,
    ) -> Result<()> {
        let rendered = self.render(header, diagnostics)?;
        fs::write(output, rendered)?;
        debug!("wrote {}", output.display());
        Ok(())
    }

    fn parse_header(&self, header: &Path) -> Result<Parse> {
        let config = self.parser_config()?;

        let result = if self.preprocess {
            debug!(
                "preprocessing {} with '{}'",
                header.display(),
                self.cpp_command
            );
            driver::parse(&config, header)
        } else {
            let source = fs::read_to_string(header)?;
            driver::parse_preprocessed(&config, source).map_err(driver::Error::SyntaxError)
        };

        result.map_err(|err| match err {
            driver::Error::PreprocessorError(err) => CsigError::Preprocess(err.to_string()),
            driver::Error::SyntaxError(err) => CsigError::Parse(err.to_string()),
        })
    }

    /// Build the lang-c driver configuration, checking up front that the
    /// preprocessor exists so the failure surfaces before any parsing.
    fn parser_config(&self) -> Result<Config> {
        let mut words = shell_words::split(&self.cpp_command).map_err(|err| {
            CsigError::PreprocessorUnavailable(format!(
                "cannot parse command {:?}: {err}",
                self.cpp_command
            ))
        })?;
        if words.is_empty() {
            return Err(CsigError::PreprocessorUnavailable(
                "empty preprocessor command".to_string(),
            ));
        }

        let cpp_command = words.remove(0);
        let mut cpp_options = words;
        cpp_options.extend(self.include_dirs.iter().map(|dir| format!("-I{}", dir.display())));
        cpp_options.extend(self.defines.iter().map(|define| format!("-D{define}")));
        let config = Config {
            cpp_command,
            cpp_options,
            ..Config::default()
        };

        if self.preprocess && which::which(&config.cpp_command).is_err() {
            return Err(CsigError::PreprocessorUnavailable(format!(
                "'{}' was not found on PATH",
                config.cpp_command
            )));
        }

        Ok(config)
    }
}
