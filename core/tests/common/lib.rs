#![allow(clippy::expect_used)]

use linebar_core::BufferInfo;
use linebar_core::Component;
use linebar_core::ComponentError;
use linebar_core::Config;
use linebar_core::Highlight;
use linebar_core::Host;
use linebar_core::Section;
use linebar_core::WindowInfo;

/// Highlight name components get when they declare none.
pub const DEFAULT_HL: &str = "StatusComponent_d0d0d0_1f1f23_NONE";

/// A [`Host`] that keeps every highlight registration and reported error.
#[derive(Debug, Default)]
pub struct RecordingHost {
    pub window: WindowInfo,
    pub defined: Vec<(String, Highlight)>,
    pub errors: Vec<ComponentError>,
}

impl RecordingHost {
    pub fn new(width: usize) -> Self {
        Self {
            window: WindowInfo {
                width,
                buffer: BufferInfo::default(),
            },
            ..Self::default()
        }
    }

    pub fn with_buffer(mut self, buffer: BufferInfo) -> Self {
        self.window.buffer = buffer;
        self
    }

    pub fn define_count(&self, name: &str) -> usize {
        self.defined.iter().filter(|(defined, _)| defined == name).count()
    }

    pub fn highlight(&self, name: &str) -> Highlight {
        self.defined
            .iter()
            .rev()
            .find(|(defined, _)| defined == name)
            .map(|(_, highlight)| *highlight)
            .expect("highlight registered")
    }
}

impl Host for RecordingHost {
    fn define_highlight(&mut self, name: &str, highlight: &Highlight) {
        self.defined.push((name.to_string(), *highlight));
    }

    fn window(&self) -> &WindowInfo {
        &self.window
    }

    fn report_error(&mut self, error: &ComponentError) {
        self.errors.push(error.clone());
    }
}

/// A config whose active layout is `sections` and whose inactive layout is
/// a single `inactive` text component.
pub fn layout(sections: Vec<Vec<Component>>) -> Config {
    Config {
        active: sections.into_iter().map(Section::new).collect(),
        inactive: vec![Section::new(vec![Component::new("inactive")])],
        ..Config::default()
    }
}

/// The rendering of plain `text` in the default highlight.
pub fn plain(text: &str) -> String {
    format!("%#{DEFAULT_HL}#{text}%*")
}
