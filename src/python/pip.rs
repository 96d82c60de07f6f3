//! Pip-install argument construction.
//!
//! Builds the argument list for a `pip install` invocation, then reconciles
//! it against user-supplied overrides. An override first removes any existing
//! argument whose key matches its name (either a keyed argument, a bare
//! `name`, or a bare `name==version` spec), then appends its own pin unless
//! its version is the removal sentinel `"-1"`. Overrides apply in list order,
//! each operating on the result of the previous one.
//!
//! The builder is a value type: every operation consumes `self` and returns a
//! new list, so partially-applied argument sets can be kept around and
//! branched without aliasing.

use std::fmt;

use anyhow::{Context, Result};
use regex::Regex;
use serde::{Deserialize, Serialize};

/// One argument in a pip invocation.
///
/// `key` identifies the argument for override matching: package arguments use
/// the package name, flag groups use the flag itself. Bare arguments carry no
/// key and are matched by their rendered value.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PipArg {
    key: Option<String>,
    values: Vec<String>,
}

impl PipArg {
    /// A bare argument matched by value, e.g. a raw requirement line.
    pub fn bare(value: impl Into<String>) -> Self {
        Self {
            key: None,
            values: vec![value.into()],
        }
    }

    /// A keyed argument, e.g. `("torch", ["torch==2.1.2"])` or
    /// `("--extra-index-url", ["--extra-index-url", url])`.
    pub fn keyed(key: impl Into<String>, values: Vec<String>) -> Self {
        Self {
            key: Some(key.into()),
            values,
        }
    }

    fn matches_key(&self, key: &str) -> bool {
        match &self.key {
            Some(own) => own == key,
            None => {
                let value = &self.values[0];
                value == key || value.contains(&format!("{key}=="))
            }
        }
    }
}

/// Comparison operator for a version pin.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum VersionConstraint {
    /// `==`
    #[default]
    Exact,
    /// `>=`
    AtLeast,
    /// `<=`
    AtMost,
    /// `~=`
    Compatible,
}

impl VersionConstraint {
    /// The pip operator spelling.
    pub fn as_str(&self) -> &'static str {
        match self {
            VersionConstraint::Exact => "==",
            VersionConstraint::AtLeast => ">=",
            VersionConstraint::AtMost => "<=",
            VersionConstraint::Compatible => "~=",
        }
    }
}

/// A user-supplied package override.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PipPackageSpecifier {
    /// Package name; blank specifiers are skipped.
    pub name: String,

    /// Version to pin, or the sentinel `"-1"` meaning "remove only".
    #[serde(default)]
    pub version: Option<String>,

    /// Comparison operator used when re-adding.
    #[serde(default)]
    pub constraint: VersionConstraint,
}

/// Removal sentinel: the override strips the package and adds nothing back.
const REMOVE_SENTINEL: &str = "-1";

/// Immutable pip-install argument list.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct PipInstallArgs {
    args: Vec<PipArg>,
}

impl PipInstallArgs {
    /// Empty argument list.
    pub fn new() -> Self {
        Self::default()
    }

    /// Append one argument.
    #[must_use]
    pub fn add_arg(mut self, arg: PipArg) -> Self {
        self.args.push(arg);
        self
    }

    /// Append a torch pin, e.g. `with_torch("==2.1.2")` → `torch==2.1.2`.
    #[must_use]
    pub fn with_torch(self, version: &str) -> Self {
        self.add_arg(PipArg::keyed("torch", vec![format!("torch{version}")]))
    }

    /// Append a torchvision pin.
    #[must_use]
    pub fn with_torchvision(self, version: &str) -> Self {
        self.add_arg(PipArg::keyed(
            "torchvision",
            vec![format!("torchvision{version}")],
        ))
    }

    /// Append a torchaudio pin.
    #[must_use]
    pub fn with_torchaudio(self, version: &str) -> Self {
        self.add_arg(PipArg::keyed(
            "torchaudio",
            vec![format!("torchaudio{version}")],
        ))
    }

    /// Append an xformers pin.
    #[must_use]
    pub fn with_xformers(self, version: &str) -> Self {
        self.add_arg(PipArg::keyed(
            "xformers",
            vec![format!("xformers{version}")],
        ))
    }

    /// Append `--extra-index-url <url>`.
    #[must_use]
    pub fn with_extra_index_url(self, url: &str) -> Self {
        self.add_arg(PipArg::keyed(
            "--extra-index-url",
            vec!["--extra-index-url".to_string(), url.to_string()],
        ))
    }

    /// Append every requirement from a `requirements.txt` document.
    ///
    /// Blank lines and comments are skipped, trailing comments are cut, and
    /// lines fully matching `exclude_pattern` (anchored) are dropped.
    pub fn with_parsed_requirements(
        self,
        requirements: &str,
        exclude_pattern: Option<&str>,
    ) -> Result<Self> {
        let exclude = exclude_pattern
            .map(|pattern| {
                Regex::new(&format!("^{pattern}$"))
                    .with_context(|| format!("invalid exclude pattern: {pattern}"))
            })
            .transpose()?;

        let mut args = self;
        for line in requirements.lines() {
            let line = match line.find('#') {
                Some(hash) => &line[..hash],
                None => line,
            };
            let line = line.trim();
            if line.is_empty() {
                continue;
            }
            if let Some(exclude) = &exclude {
                if exclude.is_match(line) {
                    continue;
                }
            }
            args = args.add_arg(PipArg::bare(line));
        }

        Ok(args)
    }

    /// Remove every argument whose key matches `key` (keyed arguments by
    /// their key; bare arguments by exact value or a `key==` spec prefix).
    #[must_use]
    pub fn remove_arg_key(self, key: &str) -> Self {
        Self {
            args: self
                .args
                .into_iter()
                .filter(|arg| !arg.matches_key(key))
                .collect(),
        }
    }

    /// Apply user overrides in list order.
    ///
    /// Each override removes matching arguments first; the sentinel version
    /// `"-1"` stops there, otherwise `name<op>version` (or bare `name` with
    /// no version) is appended.
    #[must_use]
    pub fn with_user_overrides(self, overrides: &[PipPackageSpecifier]) -> Self {
        let mut args = self;

        for spec in overrides {
            if spec.name.trim().is_empty() {
                continue;
            }

            args = args.remove_arg_key(&spec.name);

            match spec.version.as_deref() {
                Some(REMOVE_SENTINEL) => continue,
                Some(version) if !version.trim().is_empty() => {
                    let pin = format!("{}{}{}", spec.name, spec.constraint.as_str(), version);
                    args = args.add_arg(PipArg::keyed(spec.name.clone(), vec![pin]));
                }
                _ => {
                    args = args.add_arg(PipArg::keyed(spec.name.clone(), vec![spec.name.clone()]));
                }
            }
        }

        args
    }

    /// Render as the token list handed to the process spawner.
    pub fn to_args(&self) -> Vec<String> {
        self.args.iter().flat_map(|arg| arg.values.clone()).collect()
    }
}

impl fmt::Display for PipInstallArgs {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.to_args().join(" "))
    }
}
