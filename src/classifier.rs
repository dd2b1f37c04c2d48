//! Pure decision logic for the button sweep: given a control's class and
//! text, decide whether it is a "proceed" affordance worth clicking.
//!
//! Installer wizards, permission dialogs and save prompts come in many
//! languages, so matching is heuristic: a small exact-match allow list
//! that always wins, a large multilingual substring allow list, and a
//! substring deny list that vetoes anything dangerous-looking.

/// Full button texts that are always clicked, checked before the
/// substring rules. Compared after normalization on both sides.
const EXACT_ALLOW: &[&str] = &[
    "&Ja", // e.g. Dutch Office Word 2013 save prompt
];

/// Partial button labels that mark a control as a click candidate.
const SUBSTRING_ALLOW: &[&str] = &[
    "yes",
    "oui",
    "ok",
    "i accept",
    "next",
    "suivant",
    "new",
    "nouveau",
    "install",
    "installer",
    "file",
    "fichier",
    "run",
    "start",
    "marrer",
    "cuter",
    "extract",
    "i agree",
    "accepte",
    "enable",
    "activer",
    "accord",
    "valider",
    "don't send",
    "ne pas envoyer",
    "don't save",
    "continue",
    "continuer",
    "personal",
    "personnel",
    "scan",
    "scanner",
    "unzip",
    "dezip",
    "open",
    "ouvrir",
    "close the program",
    "execute",
    "executer",
    "launch",
    "lancer",
    "save",
    "sauvegarder",
    "download",
    "load",
    "charger",
    "end",
    "fin",
    "terminer",
    "later",
    "finish",
    "allow access",
    "remind me later",
];

/// Partial button labels that veto a substring-allow candidate.
const SUBSTRING_DENY: &[&str] = &["don't run", "i do not accept"];

/// Outcome of [`classify`] for a single control.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Verdict {
    /// The control is a proceed affordance; dispatch a click.
    Click,
    /// Leave the control alone.
    Skip,
}

/// Whether a window class names a clickable button widget. The
/// enumerator gates on this before fetching text and classifying.
pub fn is_button_class(class_name: &str) -> bool {
    class_name.to_lowercase().contains("button")
}

/// Strip keyboard-shortcut markers and case-fold.
fn normalize(text: &str) -> String {
    text.replace('&', "").to_lowercase()
}

/// Decide whether a button control should be clicked.
///
/// Deterministic, no side effects. The exact-match allow list
/// short-circuits everything else; the deny list is consulted only when
/// a substring-allow fragment matched, and a single deny hit anywhere in
/// the text vetoes the click.
pub fn classify(control_class: &str, control_text: &str) -> Verdict {
    if !is_button_class(control_class) {
        return Verdict::Skip;
    }

    let normalized = normalize(control_text);

    if EXACT_ALLOW.iter().any(|e| normalize(e) == normalized) {
        return Verdict::Click;
    }

    if !SUBSTRING_ALLOW.iter().any(|frag| normalized.contains(frag)) {
        return Verdict::Skip;
    }

    if SUBSTRING_DENY.iter().any(|frag| normalized.contains(frag)) {
        return Verdict::Skip;
    }

    Verdict::Click
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn button_class_check_is_case_insensitive() {
        assert!(is_button_class("Button"));
        assert!(is_button_class("TButton"));
        assert!(is_button_class("WindowsForms10.BUTTON.app.0.x"));
        assert!(!is_button_class("Edit"));
        assert!(!is_button_class(""));
    }

    #[test]
    fn exact_allow_entry_clicks() {
        // "&Ja" is an exact hit even though "ja" is not a substring-allow
        // fragment.
        assert_eq!(classify("Button", "&Ja"), Verdict::Click);
        assert_eq!(classify("Button", "ja"), Verdict::Click);
        assert_eq!(classify("Button", "JA"), Verdict::Click);
    }

    #[test]
    fn substring_allow_clicks() {
        assert_eq!(classify("Button", "&Next >"), Verdict::Click);
        assert_eq!(classify("Button", "Install Now"), Verdict::Click);
        assert_eq!(classify("Button", "Suivant"), Verdict::Click);
        assert_eq!(classify("Button", "I Accept the agreement"), Verdict::Click);
    }

    #[test]
    fn unknown_text_skips() {
        assert_eq!(classify("Button", "Cancel"), Verdict::Skip);
        assert_eq!(classify("Button", "Abbrechen"), Verdict::Skip);
        assert_eq!(classify("Button", ""), Verdict::Skip);
    }

    #[test]
    fn deny_wins_over_allow() {
        // "run" is an allow fragment, "don't run" is the veto.
        assert_eq!(classify("Button", "Don't Run this program"), Verdict::Skip);
        assert_eq!(classify("Button", "Run anyway"), Verdict::Click);
    }

    #[test]
    fn deny_only_text_skips_via_no_allow_path() {
        // "i do not accept" carries no allow fragment at all ("i accept"
        // and "accepte" are both absent), so this must fall out of the
        // allow scan, not the deny veto.
        let text = "I do not accept";
        let normalized = text.to_lowercase();
        assert!(!SUBSTRING_ALLOW.iter().any(|f| normalized.contains(f)));
        assert_eq!(classify("Button", text), Verdict::Skip);
    }

    #[test]
    fn exact_allow_is_immune_to_deny_fragments() {
        // The exact list short-circuits rules 2-3 entirely; every exact
        // entry classifies as Click no matter what the deny list holds.
        for entry in EXACT_ALLOW {
            assert_eq!(classify("Button", entry), Verdict::Click);
        }
    }

    #[test]
    fn non_button_class_never_clicks() {
        assert_eq!(classify("Edit", "OK"), Verdict::Skip);
        assert_eq!(classify("Static", "&Ja"), Verdict::Skip);
    }

    #[test]
    fn shortcut_markers_are_stripped() {
        assert_eq!(classify("Button", "&Install"), Verdict::Click);
        assert_eq!(classify("Button", "O&K"), Verdict::Click);
    }
}
