//! Permission decisions for the front end.
//!
//! Two consumers share one policy. `render`/`ElementGate` decide whether an
//! element is materialized at all. `has_auth` is the boolean query behind
//! conditional branches. Holders of `R_SUPER` or `R_ADMIN` are granted by
//! both.

use super::session::{AuthMode, PermissionSession};
use crate::rbac::{is_admin, matches_any};

/// Structural decision for a permission-bound element.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Render {
    Materialized,
    Detached,
}

/// Decide whether an element bound to `action` is materialized.
pub fn render(session: &PermissionSession, action: &str) -> Render {
    if is_admin(session.roles()) || matches_any(session.buttons(), action) {
        Render::Materialized
    } else {
        Render::Detached
    }
}

/// Boolean permission query.
///
/// Tiers: server-issued buttons decide when present; otherwise a session in
/// [`AuthMode::Static`] denies; otherwise the current route's permission list
/// decides.
pub fn has_auth(session: &PermissionSession, action: &str) -> bool {
    if is_admin(session.roles()) {
        return true;
    }
    let buttons = session.buttons();
    if !buttons.is_empty() {
        return matches_any(buttons, action);
    }
    match session.mode() {
        AuthMode::Static => false,
        AuthMode::Dynamic => matches_any(session.route_permissions(), action),
    }
}

/// A mounted element bound to a permission key.
///
/// Once detached it stays detached, even if permissions change later; only a
/// fresh mount (a new gate) evaluates again.
#[derive(Debug, Clone)]
pub struct ElementGate {
    action: String,
    state: Option<Render>,
}

impl ElementGate {
    pub fn mount(action: &str, session: &PermissionSession) -> Self {
        let mut gate = Self {
            action: action.to_string(),
            state: None,
        };
        gate.update(session);
        gate
    }

    /// Re-evaluate on update. A detached element is never re-attached.
    pub fn update(&mut self, session: &PermissionSession) -> Render {
        let next = match self.state {
            Some(Render::Detached) => Render::Detached,
            _ => render(session, &self.action),
        };
        self.state = Some(next);
        next
    }

    pub fn is_attached(&self) -> bool {
        self.state == Some(Render::Materialized)
    }
}
