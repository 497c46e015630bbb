//! Permission-key matching.
//!
//! Keys are either a bare action (`add`) or namespaced as `Module_Action`
//! (`ClueLeads_add`). A key matches a requested action when any spelling of
//! the key's local action (the segment after the last `_`) coincides with any
//! spelling of the action. Spellings are: verbatim, lowercase, uppercase,
//! `B_<UPPER>` and `b_<lower>`.

/// The five spellings an action is compared under.
fn spellings(action: &str) -> [String; 5] {
    let lower = action.to_lowercase();
    let upper = action.to_uppercase();
    [
        action.to_string(),
        format!("B_{upper}"),
        format!("b_{lower}"),
        lower,
        upper,
    ]
}

/// Segment after the last `_`, or the whole key when it has none.
fn local_action(key: &str) -> &str {
    key.rsplit('_').next().unwrap_or(key)
}

/// Decide whether `permission_key` grants `action`. Total and pure.
pub fn match_permission(permission_key: &str, action: &str) -> bool {
    let wanted = spellings(action);
    if wanted.iter().any(|w| w == permission_key) {
        return true;
    }
    spellings(local_action(permission_key))
        .iter()
        .any(|candidate| wanted.contains(candidate))
}

/// Whether any key in `keys` grants `action`.
pub fn matches_any<I, S>(keys: I, action: &str) -> bool
where
    I: IntoIterator<Item = S>,
    S: AsRef<str>,
{
    keys.into_iter()
        .any(|key| match_permission(key.as_ref(), action))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn namespaced_key_matches_local_action() {
        assert!(match_permission("ClueLeads_add", "add"));
        assert!(!match_permission("ClueLeads_delete", "add"));
    }

    #[test]
    fn case_insensitive_on_bare_keys() {
        assert!(match_permission("add", "ADD"));
        assert!(match_permission("ADD", "add"));
        assert!(match_permission("Export", "export"));
    }

    #[test]
    fn button_prefixed_spellings() {
        assert!(match_permission("B_ADD", "add"));
        assert!(match_permission("b_add", "ADD"));
        assert!(match_permission("add", "B_ADD"));
        assert!(match_permission("Customer_b_view", "view"));
    }

    #[test]
    fn last_segment_wins() {
        assert!(match_permission("Sales_Clue_export", "export"));
        assert!(!match_permission("Sales_export_Clue", "export"));
        assert!(match_permission("Customer_", ""));
    }

    #[test]
    fn total_on_degenerate_inputs() {
        assert!(match_permission("", ""));
        assert!(!match_permission("", "add"));
        assert!(!match_permission("add", ""));
        assert!(!match_permission("_", "add"));
    }

    #[test]
    fn verbatim_key_equals_action() {
        assert!(match_permission("ClueLeads_add", "ClueLeads_add"));
        assert!(!match_permission("ClueLeads_add", "clueleads"));
    }

    #[test]
    fn matches_any_over_button_list() {
        let buttons = ["Customer_view", "Clue_export"];
        assert!(matches_any(buttons, "export"));
        assert!(!matches_any(buttons, "delete"));
        assert!(!matches_any(Vec::<String>::new(), "view"));
    }
}
