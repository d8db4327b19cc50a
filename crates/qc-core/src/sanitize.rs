/// Make `name` safe as a file stem: every char outside `[A-Za-z0-9_]` becomes
/// `_`, runs of `_` collapse to one, and leading/trailing `_` are stripped.
pub fn sanitize_filename(name: &str) -> String {
    let mut out = String::with_capacity(name.len());
    for c in name.chars() {
        let c = if c.is_ascii_alphanumeric() { c } else { '_' };
        if c == '_' && (out.is_empty() || out.ends_with('_')) {
            continue;
        }
        out.push(c);
    }
    if out.ends_with('_') {
        out.pop();
    }
    out
}

#[cfg(test)]
mod tests {
    use super::*;
    use proptest::prelude::*;

    #[test]
    fn replaces_and_collapses() {
        assert_eq!(sanitize_filename("VDD_3V3_Output voltage (V)"), "VDD_3V3_Output_voltage_V");
        assert_eq!(sanitize_filename("__a//b__"), "a_b");
        assert_eq!(sanitize_filename("µA leak"), "A_leak");
        assert_eq!(sanitize_filename("---"), "");
    }

    proptest! {
        #[test]
        fn idempotent(s in "\\PC{0,40}") {
            let once = sanitize_filename(&s);
            prop_assert_eq!(sanitize_filename(&once), once.clone());
            prop_assert!(once.chars().all(|c| c.is_ascii_alphanumeric() || c == '_'));
            prop_assert!(!once.starts_with('_') && !once.ends_with('_'));
        }
    }
}
