// this_file: crates/fontres-unicode/src/lib.rs

//! Script detection, so a font request can follow the text it will render.
//!
//! Characters shared by every script (spaces, digits, punctuation) and
//! combining marks say nothing about which fonts can render a run, so they
//! are skipped. Hiragana and Katakana count as Han: the writing systems that
//! cover Japanese all sit under that script.

use fontres_core::{FontRequest, Script};
use icu_properties::{props::Script as IcuScript, CodePointMapData, CodePointMapDataBorrowed};

/// Maps characters to the scripts fontres can target
pub struct ScriptDetector {
    script_map: CodePointMapDataBorrowed<'static, IcuScript>,
}

impl ScriptDetector {
    /// Create a detector with ICU data baked in.
    pub fn new() -> Self {
        Self {
            script_map: CodePointMapData::<IcuScript>::new(),
        }
    }

    /// Script of one character; `None` for shared characters and for scripts
    /// no writing system covers
    pub fn script_of_char(&self, ch: char) -> Option<Script> {
        to_script(self.script_map.get(ch))
    }

    /// First significant script in `text`, [`Script::Common`] if there is none
    pub fn script_of(&self, text: &str) -> Script {
        text.chars()
            .find_map(|ch| self.script_of_char(ch))
            .unwrap_or(Script::Common)
    }

    /// Every significant script in `text`, in order of first appearance
    pub fn scripts(&self, text: &str) -> Vec<Script> {
        let mut scripts = Vec::new();
        for script in text.chars().filter_map(|ch| self.script_of_char(ch)) {
            if !scripts.contains(&script) {
                scripts.push(script);
            }
        }
        scripts
    }

    /// `request`, retargeted at the script of `text`
    pub fn request_for(&self, request: FontRequest, text: &str) -> FontRequest {
        let script = self.script_of(text);
        request.script(script)
    }
}

impl Default for ScriptDetector {
    fn default() -> Self {
        Self::new()
    }
}

fn to_script(script: IcuScript) -> Option<Script> {
    let mapped = match script {
        IcuScript::Latin => Script::Latin,
        IcuScript::Greek => Script::Greek,
        IcuScript::Cyrillic => Script::Cyrillic,
        IcuScript::Armenian => Script::Armenian,
        IcuScript::Hebrew => Script::Hebrew,
        IcuScript::Arabic => Script::Arabic,
        IcuScript::Syriac => Script::Syriac,
        IcuScript::Thaana => Script::Thaana,
        IcuScript::Devanagari => Script::Devanagari,
        IcuScript::Bengali => Script::Bengali,
        IcuScript::Gurmukhi => Script::Gurmukhi,
        IcuScript::Gujarati => Script::Gujarati,
        IcuScript::Oriya => Script::Oriya,
        IcuScript::Tamil => Script::Tamil,
        IcuScript::Telugu => Script::Telugu,
        IcuScript::Kannada => Script::Kannada,
        IcuScript::Malayalam => Script::Malayalam,
        IcuScript::Sinhala => Script::Sinhala,
        IcuScript::Thai => Script::Thai,
        IcuScript::Lao => Script::Lao,
        IcuScript::Tibetan => Script::Tibetan,
        IcuScript::Myanmar => Script::Myanmar,
        IcuScript::Georgian => Script::Georgian,
        IcuScript::Khmer => Script::Khmer,
        IcuScript::Han | IcuScript::Hiragana | IcuScript::Katakana => Script::Han,
        IcuScript::Hangul => Script::Hangul,
        IcuScript::Ogham => Script::Ogham,
        IcuScript::Runic => Script::Runic,
        IcuScript::Nko => Script::Nko,
        _ => return None,
    };
    Some(mapped)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn detect_latin_past_leading_punctuation() {
        let detector = ScriptDetector::new();
        assert_eq!(detector.script_of("  123, Hello"), Script::Latin);
    }

    #[test]
    fn detect_common_only_text() {
        let detector = ScriptDetector::new();
        assert_eq!(detector.script_of("12:30 - !?"), Script::Common);
        assert_eq!(detector.script_of(""), Script::Common);
    }

    #[test]
    fn detect_kana_as_han() {
        let detector = ScriptDetector::new();
        assert_eq!(detector.script_of("ひらがな"), Script::Han);
        assert_eq!(detector.script_of("カタカナ"), Script::Han);
        assert_eq!(detector.script_of("漢字"), Script::Han);
    }

    #[test]
    fn detect_scripts_in_order() {
        let detector = ScriptDetector::new();
        assert_eq!(
            detector.scripts("Hello مرحبا Привет hello"),
            vec![Script::Latin, Script::Arabic, Script::Cyrillic]
        );
    }

    #[test]
    fn combining_marks_are_skipped() {
        let detector = ScriptDetector::new();
        // U+0301 COMBINING ACUTE ACCENT is Inherited
        assert_eq!(detector.script_of_char('\u{0301}'), None);
        assert_eq!(detector.script_of("\u{0301}α"), Script::Greek);
    }

    #[test]
    fn request_follows_text() {
        let detector = ScriptDetector::new();
        let request = detector.request_for(FontRequest::new("Helvetica"), "שלום");
        assert_eq!(request.script, Script::Hebrew);
        assert_eq!(request.family, "Helvetica");
    }
}

#[cfg(test)]
mod proptests;
