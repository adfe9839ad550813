//! Variable substitution for output file names.

use crate::{Error, Result};
use std::collections::HashMap;
use std::path::{Path, PathBuf};

/// Default output name pattern: `talk.mp4` becomes `talk_4242_1.mp4`.
pub const DEFAULT_NAMING: &str = "{filestem}_{run_id}_{index}{ext}";

/// Variable substitution context for output name templates.
///
/// Supports variable substitution in strings using the `{varname}` syntax.
///
/// # Example
///
/// ```
/// use vidsplit_av::TemplateContext;
/// use std::path::Path;
///
/// let ctx = TemplateContext::new()
///     .with_input(Path::new("/media/talk.mp4"))
///     .with_var("run_id", "4242")
///     .with_var("index", "1");
///
/// assert_eq!(ctx.substitute("{filestem}_{run_id}_{index}{ext}"), "talk_4242_1.mp4");
/// ```
#[derive(Debug, Clone)]
pub struct TemplateContext {
    vars: HashMap<String, String>,
}

impl TemplateContext {
    /// Create a new empty template context.
    pub fn new() -> Self {
        Self {
            vars: HashMap::new(),
        }
    }

    /// Set input-file variables.
    ///
    /// This adds the following variables:
    /// - `{filename}` - Input file name with extension
    /// - `{filestem}` - Input file name without extension
    /// - `{extension}` - Input file extension, without the dot
    /// - `{ext}` - Input file extension with its leading dot, or empty
    pub fn with_input(mut self, input: &Path) -> Self {
        if let Some(name) = input.file_name() {
            self.vars
                .insert("filename".to_string(), name.to_string_lossy().to_string());
        }
        if let Some(stem) = input.file_stem() {
            self.vars
                .insert("filestem".to_string(), stem.to_string_lossy().to_string());
        }
        let ext = input
            .extension()
            .map(|e| e.to_string_lossy().to_string())
            .unwrap_or_default();
        let dotted = if ext.is_empty() {
            String::new()
        } else {
            format!(".{ext}")
        };
        self.vars.insert("extension".to_string(), ext);
        self.vars.insert("ext".to_string(), dotted);

        self
    }

    /// Add a custom variable.
    pub fn with_var(mut self, key: &str, value: &str) -> Self {
        self.vars.insert(key.to_string(), value.to_string());
        self
    }

    /// Set a variable.
    pub fn set(&mut self, key: &str, value: &str) {
        self.vars.insert(key.to_string(), value.to_string());
    }

    /// Get a variable value.
    pub fn get(&self, key: &str) -> Option<&str> {
        self.vars.get(key).map(|s| s.as_str())
    }

    /// Substitute variables in a string.
    ///
    /// Variables are in the form `{varname}`. The template is scanned once,
    /// left to right; substituted values are never rescanned, and unknown
    /// names are left as written.
    pub fn substitute(&self, template: &str) -> String {
        let mut result = String::with_capacity(template.len());
        let mut rest = template;

        while let Some(open) = rest.find('{') {
            result.push_str(&rest[..open]);
            let after = &rest[open + 1..];

            let Some(close) = after.find('}') else {
                rest = &rest[open..];
                break;
            };

            match self.vars.get(&after[..close]) {
                Some(value) => {
                    result.push_str(value);
                    rest = &after[close + 1..];
                }
                None => {
                    result.push('{');
                    rest = after;
                }
            }
        }

        result.push_str(rest);
        result
    }
}

impl Default for TemplateContext {
    fn default() -> Self {
        Self::new()
    }
}

/// Builds sibling output paths for the segments of one run.
#[derive(Debug, Clone)]
pub struct OutputNamer {
    dir: PathBuf,
    pattern: String,
    ctx: TemplateContext,
}

impl OutputNamer {
    /// Create a namer for `input`, validating the pattern.
    ///
    /// # Errors
    ///
    /// Returns [`Error::InvalidInput`] if the pattern lacks `{index}` (names
    /// would collide within a run) or contains a path separator, or if the
    /// input has no file name.
    pub fn new(input: &Path, pattern: &str) -> Result<Self> {
        validate_pattern(pattern)?;

        if input.file_name().is_none() {
            return Err(Error::InvalidInput(format!(
                "input path has no file name: {}",
                input.display()
            )));
        }

        let dir = input
            .parent()
            .map(Path::to_path_buf)
            .unwrap_or_default();

        Ok(Self {
            dir,
            pattern: pattern.to_string(),
            ctx: TemplateContext::new().with_input(input),
        })
    }

    /// Output path for 1-based segment `number` of run `run_id`.
    pub fn path_for(&self, run_id: u32, number: u32) -> PathBuf {
        let mut ctx = self.ctx.clone();
        ctx.set("run_id", &run_id.to_string());
        ctx.set("index", &number.to_string());
        self.dir.join(ctx.substitute(&self.pattern))
    }
}

/// Check that a naming pattern yields distinct, sibling file names.
pub fn validate_pattern(pattern: &str) -> Result<()> {
    if !pattern.contains("{index}") {
        return Err(Error::InvalidInput(format!(
            "naming pattern {pattern:?} must contain {{index}}"
        )));
    }
    if pattern.contains('/') || pattern.contains(std::path::MAIN_SEPARATOR) {
        return Err(Error::InvalidInput(format!(
            "naming pattern {pattern:?} must not contain a path separator"
        )));
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_substitute() {
        let ctx = TemplateContext::new().with_input(Path::new("/input/movie.mkv"));

        assert_eq!(ctx.substitute("{filename}"), "movie.mkv");
        assert_eq!(ctx.substitute("{filestem}.mp4"), "movie.mp4");
        assert_eq!(ctx.substitute("{filestem}{ext}"), "movie.mkv");
        assert_eq!(ctx.substitute("{extension}"), "mkv");
    }

    #[test]
    fn test_custom_var() {
        let ctx = TemplateContext::new()
            .with_var("run_id", "1234")
            .with_var("index", "3");

        assert_eq!(ctx.substitute("part_{run_id}_{index}"), "part_1234_3");
        assert_eq!(ctx.get("index"), Some("3"));
    }

    #[test]
    fn test_default_naming() {
        let namer = OutputNamer::new(Path::new("/media/talk.mp4"), DEFAULT_NAMING).unwrap();
        assert_eq!(
            namer.path_for(4242, 1),
            PathBuf::from("/media/talk_4242_1.mp4")
        );
        assert_eq!(
            namer.path_for(4242, 12),
            PathBuf::from("/media/talk_4242_12.mp4")
        );
    }

    #[test]
    fn test_keeps_input_extension() {
        let namer = OutputNamer::new(Path::new("clips/show.s01e01.mkv"), DEFAULT_NAMING).unwrap();
        assert_eq!(
            namer.path_for(1000, 2),
            PathBuf::from("clips/show.s01e01_1000_2.mkv")
        );
    }

    #[test]
    fn test_no_extension() {
        let namer = OutputNamer::new(Path::new("/media/recording"), DEFAULT_NAMING).unwrap();
        assert_eq!(
            namer.path_for(9999, 1),
            PathBuf::from("/media/recording_9999_1")
        );
    }

    #[test]
    fn test_bare_file_name_stays_relative() {
        let namer = OutputNamer::new(Path::new("talk.mp4"), DEFAULT_NAMING).unwrap();
        assert_eq!(namer.path_for(1234, 1), PathBuf::from("talk_1234_1.mp4"));
    }

    #[test]
    fn test_unknown_and_unclosed_names_left_alone() {
        let ctx = TemplateContext::new().with_var("index", "7");
        assert_eq!(ctx.substitute("{nope}_{index}"), "{nope}_7");
        assert_eq!(ctx.substitute("{a{index}"), "{a7");
        assert_eq!(ctx.substitute("{index}_{open"), "7_{open");
    }

    #[test]
    fn test_braces_in_file_stem_are_not_substituted() {
        let namer = OutputNamer::new(Path::new("/media/{index}.mp4"), DEFAULT_NAMING).unwrap();
        for _ in 0..20 {
            assert_eq!(
                namer.path_for(4242, 1),
                PathBuf::from("/media/{index}_4242_1.mp4")
            );
        }

        let namer = OutputNamer::new(Path::new("/media/{run_id}{ext}"), DEFAULT_NAMING).unwrap();
        assert_eq!(
            namer.path_for(1000, 3),
            PathBuf::from("/media/{run_id}{ext}_1000_3")
        );
    }

    #[test]
    fn test_pattern_requires_index() {
        let err = OutputNamer::new(Path::new("talk.mp4"), "{filestem}_{run_id}{ext}").unwrap_err();
        assert!(err.to_string().contains("{index}"));
    }

    #[test]
    fn test_pattern_rejects_separator() {
        assert!(validate_pattern("out/{index}{ext}").is_err());
    }
}
