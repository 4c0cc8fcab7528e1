use super::*;
use proptest::prelude::*;

// Property: ASCII letters always detect as Latin, whatever surrounds them
proptest! {
    #[test]
    fn prop_ascii_words_are_latin(prefix in "[ 0-9.,;!?-]*", word in "[A-Za-z]{1,12}") {
        let detector = ScriptDetector::new();
        let text = format!("{prefix}{word}");
        prop_assert_eq!(detector.script_of(&text), Script::Latin);
    }
}

// Property: the first significant script is always among all detected scripts
proptest! {
    #[test]
    fn prop_first_script_is_listed(s in "\\PC*") {
        let detector = ScriptDetector::new();
        let first = detector.script_of(&s);
        let all = detector.scripts(&s);
        if first == Script::Common {
            prop_assert!(all.is_empty());
        } else {
            prop_assert_eq!(all.first().copied(), Some(first));
        }
    }
}

// Property: detected scripts are unique
proptest! {
    #[test]
    fn prop_scripts_unique(s in "\\PC*") {
        let detector = ScriptDetector::new();
        let all = detector.scripts(&s);
        for (i, script) in all.iter().enumerate() {
            prop_assert!(!all[i + 1..].contains(script));
        }
    }
}
