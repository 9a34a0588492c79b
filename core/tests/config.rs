#![allow(clippy::unwrap_used, clippy::expect_used)]

use core_test_support::RecordingHost;
use core_test_support::plain;
use linebar_core::BufferInfo;
use linebar_core::ComponentIndex;
use linebar_core::Config;
use linebar_core::ParseError;
use linebar_core::Statusline;
use linebar_core::StatuslineKind;
use linebar_core::highlight::ACTIVE_DEFAULT;
use pretty_assertions::assert_eq;

const CONFIG: &str = r##"
[theme]
accent = "#AA00AA"

[disable]
filetypes = ["^NvimTree$"]

[[active]]
[[active.component]]
provider = "vi_mode"
hl = { fg = "accent", style = "bold" }

[[active.component]]
provider = 42

[[active.component]]
provider = { name = "position", opts = { padding = true } }

[[active]]
[[active.component]]
provider = { name = "no_such_provider" }

[[active.component]]
provider = "file_encoding"
hl = "Comment"

[[inactive]]
[[inactive.component]]
provider = "file_type"
"##;

fn load() -> Config {
    let dir = tempfile::tempdir().expect("tempdir");
    let path = dir.path().join("config.toml");
    std::fs::write(&path, CONFIG).expect("write config");
    Config::load(&path).expect("load config")
}

#[test]
fn loaded_config_renders_and_isolates_errors() {
    let mut statusline = Statusline::new(RecordingHost::new(80), load());

    let rendered = statusline.render(true);

    assert_eq!(
        rendered,
        format!(
            "%#StatusComponent_aa00aa_1f1f23_bold#NORMAL%*{}%=%#Comment#UTF-8%*",
            plain("  1:1 ")
        )
    );
    let errors: Vec<(StatuslineKind, ComponentIndex, ParseError)> = statusline
        .host()
        .errors
        .iter()
        .map(|error| (error.kind, error.index, error.source.clone()))
        .collect();
    assert_eq!(
        errors,
        vec![
            (
                StatuslineKind::Active,
                ComponentIndex {
                    section: 0,
                    component: 1
                },
                ParseError::ProviderNotText {
                    found: "integer".to_string()
                },
            ),
            (
                StatuslineKind::Active,
                ComponentIndex {
                    section: 1,
                    component: 0
                },
                ParseError::UnknownProvider("no_such_provider".to_string()),
            ),
        ]
    );
    assert!(errors[0].2.is_configuration_error());
}

#[test]
fn inactive_and_disabled_buffers() {
    let rust = BufferInfo {
        filetype: "rust".to_string(),
        ..BufferInfo::default()
    };
    let mut statusline = Statusline::new(RecordingHost::new(80).with_buffer(rust), load());
    assert_eq!(statusline.render(false), plain("RUST"));

    statusline.host_mut().window.buffer.filetype = "NvimTree".to_string();
    assert_eq!(statusline.render(true), "");
    assert_eq!(statusline.render(false), "");
}

#[test]
fn replacing_config_keeps_registered_highlights() {
    let mut statusline = Statusline::new(RecordingHost::new(80), load());
    statusline.render(true);
    let name = "StatusComponent_aa00aa_1f1f23_bold";
    assert_eq!(statusline.host().define_count(name), 1);

    statusline.set_config(load());
    statusline.render(true);

    assert_eq!(statusline.host().define_count(name), 1);
    assert_eq!(statusline.host().define_count(ACTIVE_DEFAULT), 2);
}
