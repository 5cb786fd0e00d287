use crate::error::{BatchError, Result};
use serde::Deserialize;
use std::{
    env, fs,
    path::{Path, PathBuf},
};
use tracing::{debug, info, trace};

pub const CONFIG_FILE_NAME: &str = "wsdlbatch.toml";

pub const ENV_PACKAGE_PREFIX: &str = "WSDLC_PACKAGE_PREFIX";
pub const ENV_STANDALONE: &str = "WSDLC_STANDALONE";
pub const ENV_COMPILER: &str = "WSDLC_COMPILER";
pub const ENV_TEMPLATE_DIR: &str = "WSDLC_TEMPLATE_DIR";

pub const DEFAULT_INPUT_SUFFIX: &str = ".wsdl";
pub const DEFAULT_OUTPUT_SUFFIX: &str = ".apextest.jar";
pub const DEFAULT_COMPILER: &str = "wsdlc";
pub const DEFAULT_TEMPLATE_DIR: &str = "templates/codegen";

/// The recognised input suffix and the generated artifact suffix.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SuffixPair {
    pub input: String,
    pub output: String,
}

impl Default for SuffixPair {
    fn default() -> Self {
        Self {
            input: DEFAULT_INPUT_SUFFIX.to_string(),
            output: DEFAULT_OUTPUT_SUFFIX.to_string(),
        }
    }
}

impl SuffixPair {
    pub fn new(input: impl Into<String>, output: impl Into<String>) -> Result<Self> {
        let pair = Self {
            input: input.into(),
            output: output.into(),
        };
        pair.validate()?;
        Ok(pair)
    }

    fn validate(&self) -> Result<()> {
        if self.input.is_empty() || self.output.is_empty() {
            return Err(BatchError::config("input and output suffixes must not be empty"));
        }
        if self.input == self.output {
            return Err(BatchError::config(format!(
                "output suffix '{}' must differ from the input suffix",
                self.output
            )));
        }
        Ok(())
    }
}

/// Optional settings read from `wsdlbatch.toml`.
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct FileConfig {
    #[serde(default)]
    pub compiler: Option<PathBuf>,
    #[serde(default)]
    pub compiler_args: Vec<String>,
    #[serde(default)]
    pub template_dir: Option<PathBuf>,
    #[serde(default)]
    pub input_suffix: Option<String>,
    #[serde(default)]
    pub output_suffix: Option<String>,
    #[serde(default)]
    pub package_prefix: Option<String>,
    #[serde(default)]
    pub standalone: Option<bool>,
}

/// Settings for one batch run, read once at startup.
#[derive(Debug, Clone)]
pub struct BatchConfig {
    /// External compiler program.
    pub compiler: PathBuf,

    /// Arguments passed to the compiler ahead of the generated ones.
    pub compiler_args: Vec<String>,

    /// Location the template source is opened from.
    pub template_dir: PathBuf,

    pub suffixes: SuffixPair,

    /// Package-name prefix handed to every compile call.
    pub package_prefix: Option<String>,

    /// Build standalone artifacts.
    pub standalone: bool,
}

impl Default for BatchConfig {
    fn default() -> Self {
        Self {
            compiler: PathBuf::from(DEFAULT_COMPILER),
            compiler_args: Vec::new(),
            template_dir: PathBuf::from(DEFAULT_TEMPLATE_DIR),
            suffixes: SuffixPair::default(),
            package_prefix: None,
            standalone: false,
        }
    }
}

impl BatchConfig {
    /// Loads defaults, then `wsdlbatch.toml` if one is found from the current
    /// directory upward, then environment overrides (`.env` included).
    pub fn load() -> Result<Self> {
        info!("Loading wsdlbatch configuration");
        dotenv::dotenv().ok();
        debug!("Environment variables loaded from .env if present");

        let mut config = match Self::find_config_file(&env::current_dir()?) {
            Some(path) => {
                info!("Found configuration file at: {:?}", path);
                Self::from_toml_path(&path)?
            }
            None => {
                debug!("No {} found, using defaults", CONFIG_FILE_NAME);
                Self::default()
            }
        };
        config.apply_env();

        debug!(
            "Configuration - compiler: {:?}, templates: {:?}, suffixes: {} -> {}, package prefix: {:?}, standalone: {}",
            config.compiler,
            config.template_dir,
            config.suffixes.input,
            config.suffixes.output,
            config.package_prefix,
            config.standalone
        );
        Ok(config)
    }

    /// Loads configuration from a specific `wsdlbatch.toml`. Relative paths
    /// in the file resolve against the file's directory.
    pub fn from_toml_path(path: impl AsRef<Path>) -> Result<Self> {
        let path = path.as_ref();
        let content = fs::read_to_string(path)?;
        let base_dir = path.parent().unwrap_or(Path::new("."));
        Self::parse_toml(&content, base_dir)
    }

    fn parse_toml(content: &str, base_dir: &Path) -> Result<Self> {
        let file: FileConfig = toml::from_str(content)?;
        let mut config = Self::default();

        if let Some(compiler) = file.compiler {
            // Bare program names stay as-is so they are looked up on PATH.
            config.compiler = if compiler.components().count() > 1 {
                base_dir.join(compiler)
            } else {
                compiler
            };
        }
        config.compiler_args = file.compiler_args;
        if let Some(template_dir) = file.template_dir {
            config.template_dir = base_dir.join(template_dir);
        }
        if file.input_suffix.is_some() || file.output_suffix.is_some() {
            config.suffixes = SuffixPair::new(
                file.input_suffix.unwrap_or_else(|| DEFAULT_INPUT_SUFFIX.to_string()),
                file.output_suffix.unwrap_or_else(|| DEFAULT_OUTPUT_SUFFIX.to_string()),
            )?;
        }
        config.package_prefix = file.package_prefix.filter(|p| !p.is_empty());
        config.standalone = file.standalone.unwrap_or(false);

        Ok(config)
    }

    /// Searches for `wsdlbatch.toml` from `start` up to the filesystem root.
    fn find_config_file(start: &Path) -> Option<PathBuf> {
        for dir in start.ancestors() {
            let candidate = dir.join(CONFIG_FILE_NAME);
            trace!("Checking for config at: {:?}", candidate);
            if candidate.is_file() {
                return Some(candidate);
            }
        }
        None
    }

    fn apply_env(&mut self) {
        if let Ok(prefix) = env::var(ENV_PACKAGE_PREFIX) {
            self.package_prefix = Some(prefix).filter(|p| !p.is_empty());
        }
        if let Ok(value) = env::var(ENV_STANDALONE) {
            self.standalone = parse_flag(&value);
        }
        if let Ok(compiler) = env::var(ENV_COMPILER)
            && !compiler.is_empty()
        {
            self.compiler = PathBuf::from(compiler);
        }
        if let Ok(template_dir) = env::var(ENV_TEMPLATE_DIR)
            && !template_dir.is_empty()
        {
            self.template_dir = PathBuf::from(template_dir);
        }
    }

    pub fn builder() -> BatchConfigBuilder {
        BatchConfigBuilder::new()
    }
}

/// Only a case-insensitive `true` turns a flag on.
pub fn parse_flag(value: &str) -> bool {
    value.trim().eq_ignore_ascii_case("true")
}

/// Builder for creating a BatchConfig programmatically.
#[derive(Debug, Clone, Default)]
pub struct BatchConfigBuilder {
    config: BatchConfig,
}

impl BatchConfigBuilder {
    pub fn new() -> Self {
        Self {
            config: BatchConfig::default(),
        }
    }

    pub fn compiler(mut self, program: impl Into<PathBuf>) -> Self {
        self.config.compiler = program.into();
        self
    }

    pub fn compiler_arg(mut self, arg: impl Into<String>) -> Self {
        self.config.compiler_args.push(arg.into());
        self
    }

    pub fn template_dir(mut self, dir: impl Into<PathBuf>) -> Self {
        self.config.template_dir = dir.into();
        self
    }

    pub fn suffixes(mut self, suffixes: SuffixPair) -> Self {
        self.config.suffixes = suffixes;
        self
    }

    pub fn package_prefix(mut self, prefix: impl Into<String>) -> Self {
        self.config.package_prefix = Some(prefix.into()).filter(|p| !p.is_empty());
        self
    }

    pub fn standalone(mut self, standalone: bool) -> Self {
        self.config.standalone = standalone;
        self
    }

    pub fn build(self) -> BatchConfig {
        self.config
    }
}
