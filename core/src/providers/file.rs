//! Buffer file providers.

use std::path::Component as PathComponent;
use std::path::MAIN_SEPARATOR_STR;
use std::path::Path;

use strum_macros::EnumString;
use unicode_segmentation::UnicodeSegmentation;

use crate::component::Decoration;
use crate::error::ProviderError;
use crate::highlight::HighlightColors;
use crate::provider::ProviderContext;
use crate::provider::ProviderOptions;
use crate::provider::ProviderOutput;

use super::opt_str;

const UNNAMED: &str = "[No Name]";
const DEFAULT_MODIFIED_ICON: &str = "●";
const READONLY_ICON: &str = "🔒";
const DEFAULT_FILE_ICON: (&str, &str) = ("\u{f15b}", "fg");

/// Icon glyph and color by file extension.
const EXTENSION_ICONS: &[(&str, &str, &str)] = &[
    ("rs", "\u{e7a8}", "#DEA584"),
    ("toml", "\u{e615}", "#6D8086"),
    ("md", "\u{e609}", "#519ABA"),
    ("lua", "\u{e620}", "#51A0CF"),
    ("py", "\u{e606}", "#FFBC03"),
    ("js", "\u{e60c}", "#CBCB41"),
    ("ts", "\u{e628}", "#519ABA"),
    ("go", "\u{e627}", "#519ABA"),
    ("c", "\u{e61e}", "#599EFF"),
    ("h", "\u{f0fd}", "#A074C4"),
    ("json", "\u{e60b}", "#CBCB41"),
    ("sh", "\u{e795}", "#4D5A5E"),
    ("vim", "\u{e62b}", "#019833"),
];

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, EnumString)]
#[strum(serialize_all = "kebab-case")]
enum PathStyle {
    FullPath,
    ShortPath,
    #[default]
    BaseOnly,
}

pub(super) fn file_info(
    ctx: &ProviderContext<'_>,
    opts: &ProviderOptions,
) -> Result<ProviderOutput, ProviderError> {
    let style = match opt_str(opts, "type")? {
        None => PathStyle::default(),
        Some(value) => value
            .parse::<PathStyle>()
            .map_err(|_| ProviderError::InvalidOption {
                option: "type".to_string(),
                reason: format!("unknown path type `{value}`"),
            })?,
    };
    let modified_icon = opt_str(opts, "file_modified_icon")?.unwrap_or(DEFAULT_MODIFIED_ICON);
    let buffer = &ctx.window.buffer;

    if buffer.name.is_empty() {
        return Ok(ProviderOutput::text(UNNAMED));
    }

    let mut text = display_path(&buffer.name, style, dirs::home_dir().as_deref());
    if buffer.readonly {
        text.push(' ');
        text.push_str(READONLY_ICON);
    }
    if buffer.modified {
        text.push(' ');
        text.push_str(modified_icon);
    }

    let (glyph, color) = file_icon(&buffer.name);
    Ok(ProviderOutput::text(text).with_icon(
        Decoration::new(format!("{glyph} ")).with_hl(HighlightColors::new().fg(color)),
    ))
}

pub(super) fn file_type(
    ctx: &ProviderContext<'_>,
    opts: &ProviderOptions,
) -> Result<ProviderOutput, ProviderError> {
    let filetype = &ctx.window.buffer.filetype;
    let text = match opt_str(opts, "case")? {
        None | Some("uppercase") => filetype.to_uppercase(),
        Some("lowercase") => filetype.to_lowercase(),
        Some(other) => {
            return Err(ProviderError::InvalidOption {
                option: "case".to_string(),
                reason: format!("expected `uppercase` or `lowercase`, got `{other}`"),
            });
        }
    };
    Ok(ProviderOutput::text(text))
}

pub(super) fn file_encoding(
    ctx: &ProviderContext<'_>,
    _opts: &ProviderOptions,
) -> Result<ProviderOutput, ProviderError> {
    Ok(ProviderOutput::text(
        ctx.window.buffer.encoding.to_uppercase(),
    ))
}

fn file_icon(name: &str) -> (&'static str, &'static str) {
    let extension = Path::new(name)
        .extension()
        .and_then(std::ffi::OsStr::to_str)
        .unwrap_or_default();
    EXTENSION_ICONS
        .iter()
        .find(|(ext, _, _)| ext.eq_ignore_ascii_case(extension))
        .map_or(DEFAULT_FILE_ICON, |(_, glyph, color)| (*glyph, *color))
}

fn display_path(name: &str, style: PathStyle, home: Option<&Path>) -> String {
    let path = Path::new(name);
    match style {
        PathStyle::BaseOnly => path
            .file_name()
            .map_or_else(|| name.to_string(), |base| base.to_string_lossy().into_owned()),
        PathStyle::FullPath => home_relative(path, home),
        PathStyle::ShortPath => {
            let full = home_relative(path, home);
            let mut segments: Vec<&str> = full.split(MAIN_SEPARATOR_STR).collect();
            let last = segments.pop().unwrap_or_default();
            let mut shortened: Vec<String> =
                segments.into_iter().map(shorten_segment).collect();
            shortened.push(last.to_string());
            shortened.join(MAIN_SEPARATOR_STR)
        }
    }
}

fn home_relative(path: &Path, home: Option<&Path>) -> String {
    let Some(rest) = home.and_then(|home| path.strip_prefix(home).ok()) else {
        return path.display().to_string();
    };
    let mut out = String::from("~");
    for component in rest.components() {
        if let PathComponent::Normal(segment) = component {
            out.push_str(MAIN_SEPARATOR_STR);
            out.push_str(&segment.to_string_lossy());
        }
    }
    out
}

/// Keep the first grapheme of a directory name, plus the one after a
/// leading dot so hidden directories stay recognisable.
fn shorten_segment(segment: &str) -> String {
    let take = if segment.starts_with('.') { 2 } else { 1 };
    segment.graphemes(true).take(take).collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::host::BufferInfo;
    use crate::providers::test_support::run;
    use pretty_assertions::assert_eq;

    fn buffer(name: &str) -> BufferInfo {
        BufferInfo {
            name: name.to_string(),
            ..BufferInfo::default()
        }
    }

    #[test]
    fn path_styles() {
        let home = Some(Path::new("/home/ferris"));
        let name = "/home/ferris/.config/linebar/config.toml";
        assert_eq!(display_path(name, PathStyle::BaseOnly, home), "config.toml");
        assert_eq!(
            display_path(name, PathStyle::FullPath, home),
            "~/.config/linebar/config.toml"
        );
        assert_eq!(
            display_path(name, PathStyle::ShortPath, home),
            "~/.c/l/config.toml"
        );
        assert_eq!(
            display_path("/srv/data/été/x.rs", PathStyle::ShortPath, home),
            "/s/d/é/x.rs"
        );
    }

    #[test]
    fn unnamed_buffer() {
        let output = run(file_info, BufferInfo::default(), "").unwrap();
        assert_eq!(output, ProviderOutput::text(UNNAMED));
    }

    #[test]
    fn flags_and_icon() {
        let buffer = BufferInfo {
            modified: true,
            readonly: true,
            ..buffer("src/main.rs")
        };
        let output = run(file_info, buffer, "file_modified_icon = \"+\"").unwrap();
        assert_eq!(output.text, "main.rs 🔒 +");
        assert_eq!(
            output.icon,
            Some(Decoration::new("\u{e7a8} ").with_hl(HighlightColors::new().fg("#DEA584")))
        );
    }

    #[test]
    fn unknown_extension_gets_generic_icon() {
        let output = run(file_info, buffer("NOTES"), "").unwrap();
        assert_eq!(
            output.icon.map(|icon| icon.text),
            Some("\u{f15b} ".to_string())
        );
    }

    #[test]
    fn bad_path_type_is_rejected() {
        let error = run(file_info, buffer("a.rs"), "type = \"tiny\"").unwrap_err();
        assert!(matches!(
            error,
            ProviderError::InvalidOption { ref option, .. } if option == "type"
        ));
    }

    #[test]
    fn file_type_and_encoding_case() {
        let buffer = BufferInfo {
            filetype: "rust".to_string(),
            encoding: "utf-8".to_string(),
            ..BufferInfo::default()
        };
        assert_eq!(run(file_type, buffer.clone(), "").unwrap().text, "RUST");
        assert_eq!(
            run(file_type, buffer.clone(), "case = \"lowercase\"")
                .unwrap()
                .text,
            "rust"
        );
        assert_eq!(run(file_encoding, buffer, "").unwrap().text, "UTF-8");
    }
}
