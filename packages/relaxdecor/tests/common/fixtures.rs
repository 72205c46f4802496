//! Test fixtures

use relaxdecor::config::{ConversionConfig, ConvertOptions, Indentation, Linesep, ResolvedOptions};
use relaxdecor::features::conversion::domain::render_helper;

/// GUI callback registration, the motivating case for relaxed decorators
pub fn fixture_button_handler() -> &'static str {
    "import gui\n\nbuttons = gui.make()\n\n\n@buttons[0].clicked.connect\ndef on_click():\n    print('clicked')\n"
}

/// A flagged decorator three constructs deep
pub fn fixture_three_deep() -> &'static str {
    "class A:\n    def m(self):\n        if flag:\n            @registry[0]\n            def inner():\n                pass\n"
}

/// Two functions, each with a flagged decorator in its body
pub fn fixture_two_bodies() -> &'static str {
    "def first():\n    @a[0]\n    def inner():\n        pass\n    return inner\n\n\ndef second():\n    @b[1]\n    def inner():\n        pass\n    return inner\n"
}

/// Config with explicit LF and four-space indentation
pub fn lf_config() -> ConversionConfig {
    ConversionConfig::builder()
        .linesep(Linesep::Lf)
        .indentation(Indentation::spaces(4).unwrap())
        .build()
        .unwrap()
}

/// Options with nothing set and an empty environment
pub fn detecting_options() -> ResolvedOptions {
    ConvertOptions::default().resolve_with(|_| None).unwrap()
}

/// Rendered helper text for `config` at `depth`
pub fn helper_text(config: &ConversionConfig, depth: usize) -> String {
    render_helper(
        config.decorator(),
        config.indentation(),
        depth,
        config.linesep(),
    )
    .unwrap()
}
