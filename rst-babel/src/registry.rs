//! Format registry for format discovery and selection
//!
//! The set of formats is closed: [`FormatId`] enumerates every identifier, and the registry
//! maps each one to its implementation. The table is checked when the registry is built, so
//! an unknown identifier fails before any input is read and a missing implementation fails
//! at startup rather than mid-conversion.

use std::collections::HashMap;
use std::fmt;
use std::str::FromStr;

use rst_parser::rst::ast::DiscourseTree;
use rst_parser::rst::error::ConversionError;
use tracing::{debug, instrument};

use crate::error::FormatError;
use crate::format::{Format, RenderOptions};
use crate::formats::{
    CodraFormat, DisFormat, DplpFormat, HildaFormat, Hs2015Format, Rs3Format, RstLatexFormat,
    StageDpFormat,
};

/// Identifier of a registered format.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub enum FormatId {
    Rs3,
    Dis,
    Hilda,
    Hs2015,
    Codra,
    Dplp,
    StageDp,
    RstLatex,
}

impl FormatId {
    pub const ALL: [FormatId; 8] = [
        FormatId::Rs3,
        FormatId::Dis,
        FormatId::Hilda,
        FormatId::Hs2015,
        FormatId::Codra,
        FormatId::Dplp,
        FormatId::StageDp,
        FormatId::RstLatex,
    ];

    pub fn as_str(&self) -> &'static str {
        match self {
            FormatId::Rs3 => "rs3",
            FormatId::Dis => "dis",
            FormatId::Hilda => "hilda",
            FormatId::Hs2015 => "hs2015",
            FormatId::Codra => "codra",
            FormatId::Dplp => "dplp",
            FormatId::StageDp => "stagedp",
            FormatId::RstLatex => "rstlatex",
        }
    }

    fn implementation(&self) -> Box<dyn Format> {
        match self {
            FormatId::Rs3 => Box::new(Rs3Format),
            FormatId::Dis => Box::new(DisFormat),
            FormatId::Hilda => Box::new(HildaFormat),
            FormatId::Hs2015 => Box::new(Hs2015Format),
            FormatId::Codra => Box::new(CodraFormat),
            FormatId::Dplp => Box::new(DplpFormat),
            FormatId::StageDp => Box::new(StageDpFormat),
            FormatId::RstLatex => Box::new(RstLatexFormat),
        }
    }
}

impl FromStr for FormatId {
    type Err = FormatError;

    fn from_str(name: &str) -> Result<Self, Self::Err> {
        FormatId::ALL
            .into_iter()
            .find(|id| id.as_str() == name)
            .ok_or_else(|| FormatError::unknown_format(name))
    }
}

impl fmt::Display for FormatId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Registry of discourse formats
///
/// # Examples
///
/// ```ignore
/// let registry = FormatRegistry::with_defaults()?;
/// let dis = registry.convert(&rs3_source, "rs3", "dis")?;
/// ```
pub struct FormatRegistry {
    formats: HashMap<FormatId, Box<dyn Format>>,
    options: RenderOptions,
}

impl FormatRegistry {
    /// Create a registry with every built-in format and default render options
    pub fn with_defaults() -> Result<Self, FormatError> {
        Self::with_options(RenderOptions::default())
    }

    /// Create a registry with every built-in format, rendering with `options`
    pub fn with_options(options: RenderOptions) -> Result<Self, FormatError> {
        let formats = FormatId::ALL
            .into_iter()
            .map(|id| (id, id.implementation()))
            .collect();
        let registry = FormatRegistry { formats, options };
        registry.validate()?;
        Ok(registry)
    }

    fn validate(&self) -> Result<(), FormatError> {
        for id in FormatId::ALL {
            let format = self.formats.get(&id).ok_or_else(|| {
                FormatError::new(
                    id.as_str(),
                    ConversionError::UnknownFormat(id.as_str().to_string()),
                )
            })?;
            if format.name() != id.as_str() {
                return Err(FormatError::new(
                    id.as_str(),
                    ConversionError::unsupported(format!(
                        "format registered as '{}' names itself '{}'",
                        id,
                        format.name()
                    )),
                ));
            }
        }
        Ok(())
    }

    pub fn options(&self) -> &RenderOptions {
        &self.options
    }

    /// Get a format by identifier
    pub fn get(&self, id: FormatId) -> Result<&dyn Format, FormatError> {
        self.formats
            .get(&id)
            .map(|f| f.as_ref())
            .ok_or_else(|| FormatError::unknown_format(id.as_str()))
    }

    /// Get a format by name
    pub fn resolve(&self, name: &str) -> Result<&dyn Format, FormatError> {
        self.get(name.parse()?)
    }

    /// The format conventionally using this file extension, if any
    pub fn find_by_extension(&self, extension: &str) -> Option<FormatId> {
        FormatId::ALL.into_iter().find(|id| {
            self.formats
                .get(id)
                .is_some_and(|format| format.file_extensions().contains(&extension))
        })
    }

    /// List all available format names (sorted)
    pub fn list_formats(&self) -> Vec<&str> {
        self.sorted_names(|_| true)
    }

    /// Formats that can be read (sorted)
    pub fn input_formats(&self) -> Vec<&str> {
        self.sorted_names(|format| format.supports_parsing())
    }

    /// Formats that can be written (sorted)
    pub fn output_formats(&self) -> Vec<&str> {
        self.sorted_names(|format| format.supports_serialization())
    }

    fn sorted_names(&self, keep: impl Fn(&dyn Format) -> bool) -> Vec<&str> {
        let mut names: Vec<&str> = self
            .formats
            .values()
            .map(|format| &**format)
            .filter(|format| keep(*format))
            .map(|format| format.name())
            .collect();
        names.sort();
        names
    }

    /// Parse source text using the named format
    pub fn parse(&self, source: &str, format: &str) -> Result<DiscourseTree, FormatError> {
        let fmt = self.resolve(format)?;
        if !fmt.supports_parsing() {
            return Err(FormatError::not_supported(fmt.name(), "parsing"));
        }
        fmt.parse(source)
    }

    /// Serialize a tree using the named format
    pub fn serialize(&self, tree: &DiscourseTree, format: &str) -> Result<String, FormatError> {
        let fmt = self.resolve(format)?;
        if !fmt.supports_serialization() {
            return Err(FormatError::not_supported(fmt.name(), "serialization"));
        }
        fmt.serialize(tree, &self.options)
    }

    /// Read `source` as `from` and write it as `to`.
    ///
    /// Both identifiers are resolved before the input is touched; nothing is returned unless
    /// the whole conversion succeeds.
    #[instrument(skip(self, source), fields(bytes = source.len()))]
    pub fn convert(&self, source: &str, from: &str, to: &str) -> Result<String, FormatError> {
        let reader = self.resolve(from)?;
        let writer = self.resolve(to)?;
        if !reader.supports_parsing() {
            return Err(FormatError::not_supported(reader.name(), "parsing"));
        }
        if !writer.supports_serialization() {
            return Err(FormatError::not_supported(writer.name(), "serialization"));
        }

        let tree = reader.parse(source)?;
        debug!(edus = tree.edus().len(), "read discourse tree");
        writer.serialize(&tree, &self.options)
    }
}
