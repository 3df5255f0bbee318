//! Variable substitution for output file names.

use mediaprep_common::{Resolution, VideoFormat};
use std::collections::HashMap;
use std::path::Path;

/// Variable substitution context for output name templates.
///
/// Supports variable substitution in strings using the `{varname}` syntax.
///
/// # Example
///
/// ```
/// use mediaprep_av::TemplateContext;
/// use mediaprep_common::{Resolution, VideoFormat};
/// use std::path::Path;
///
/// let ctx = TemplateContext::new()
///     .with_source(Path::new("/videos/input/intro.mov"))
///     .with_video(&VideoFormat::h264(), &Resolution::new(1280, 720));
///
/// assert_eq!(
///     ctx.substitute("{filestem}-{height}p-{format}.{extension}"),
///     "intro-720p-mp4-h264.mp4"
/// );
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

    /// Set source-related variables.
    ///
    /// This adds the following variables:
    /// - `{input}` - Full path to the source file
    /// - `{filename}` - Source file name with extension
    /// - `{filestem}` - Source file name without extension
    /// - `{source_extension}` - Source file extension
    /// - `{dirname}` - Source file parent directory
    pub fn with_source(mut self, input: &Path) -> Self {
        self.vars
            .insert("input".to_string(), input.display().to_string());

        if let Some(name) = input.file_name() {
            self.vars
                .insert("filename".to_string(), name.to_string_lossy().to_string());
        }
        if let Some(stem) = input.file_stem() {
            self.vars
                .insert("filestem".to_string(), stem.to_string_lossy().to_string());
        }
        if let Some(ext) = input.extension() {
            self.vars.insert(
                "source_extension".to_string(),
                ext.to_string_lossy().to_string(),
            );
        }
        if let Some(parent) = input.parent() {
            self.vars
                .insert("dirname".to_string(), parent.display().to_string());
        }

        self
    }

    /// Set video variant variables.
    ///
    /// This adds `{format}`, `{codec}`, `{crf}`, `{preset}`, `{extension}`
    /// (container), `{width}` and `{height}`.
    pub fn with_video(mut self, format: &VideoFormat, resolution: &Resolution) -> Self {
        self.set("format", &format.name);
        self.set("codec", &format.codec);
        self.set("crf", &format.crf.to_string());
        self.set("preset", &format.preset);
        self.set("extension", &format.extension);
        self.set("width", &resolution.width.to_string());
        self.set("height", &resolution.height.to_string());
        self
    }

    /// Set a variable.
    pub fn set(&mut self, key: &str, value: &str) {
        self.vars.insert(key.to_string(), value.to_string());
    }

    /// Substitute variables in a string.
    ///
    /// Variables are in the form `{varname}`. Unknown variables are left as
    /// is. The template is scanned once, so braces inside substituted values
    /// are never expanded.
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

            let key = &after[..close];
            match self.vars.get(key) {
                Some(value) => {
                    result.push_str(value);
                    rest = &after[close + 1..];
                }
                None => {
                    // Keep the brace and rescan from the next character
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

#[cfg(test)]
mod tests {
    use super::*;
    use std::path::PathBuf;

    #[test]
    fn test_substitute_source() {
        let ctx = TemplateContext::new().with_source(&PathBuf::from("/input/intro.mov"));

        assert_eq!(ctx.substitute("{input}"), "/input/intro.mov");
        assert_eq!(ctx.substitute("{filestem}.mp4"), "intro.mp4");
        assert_eq!(ctx.substitute("{dirname}/{filename}"), "/input/intro.mov");
        assert_eq!(ctx.substitute("{source_extension}"), "mov");
    }

    #[test]
    fn test_substitute_video() {
        let ctx = TemplateContext::new()
            .with_source(Path::new("hero.mkv"))
            .with_video(&VideoFormat::h265(), &Resolution::new(854, 480));

        assert_eq!(
            ctx.substitute("{filestem}-{height}p-{format}.{extension}"),
            "hero-480p-mp4-h265.mp4"
        );
        assert_eq!(ctx.substitute("{width}x{height} {codec}"), "854x480 libx265");
    }

    #[test]
    fn test_custom_var_and_unknown() {
        let mut ctx = TemplateContext::new();
        ctx.set("site", "www");

        assert_eq!(ctx.substitute("{site}-{missing}"), "www-{missing}");
        assert_eq!(ctx.substitute("{{site}} {unclosed"), "{www} {unclosed");
    }

    #[test]
    fn test_values_are_not_expanded_again() {
        let source = TemplateContext::new().with_source(Path::new("in/promo{height}.mov"));
        let names: std::collections::HashSet<String> = (0..64)
            .map(|_| {
                source
                    .clone()
                    .with_video(&VideoFormat::h264(), &Resolution::new(1280, 720))
                    .substitute("{filestem}-{height}p-{format}.{extension}")
            })
            .collect();

        assert_eq!(names.len(), 1);
        assert!(names.contains("promo{height}-720p-mp4-h264.mp4"));
    }
}
