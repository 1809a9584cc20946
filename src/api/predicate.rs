//
//  ship-cli
//  api/predicate.rs
//
//  Created by Ngonidzashe Mangudya on 2026/01/12.
//  Copyright (c) 2025 IAMNGONI. All rights reserved.
//

//! Predicate templates for the Ship search endpoints.
//!
//! Ship filters collections with a server-side predicate language. The client
//! treats predicates as opaque strings and never parses them; this module only
//! holds the handful of templates the convenience queries fill in, plus
//! [`quote`] for embedding a value as a single-quoted literal.
//!
//! # Example
//!
//! ```rust
//! use ship_cli::api::predicate;
//!
//! assert_eq!(predicate::quote("it's"), r"'it\'s'");
//! assert_eq!(
//!     predicate::state_transitions("s1"),
//!     "ANY PreviousStates.identifier = 's1'"
//! );
//! ```

/// The authenticated caller.
pub const API_USER: &str = "identifier == $ApiUser";

/// Users in good standing with the organization.
pub const ACTIVE_USERS: &str = "inactive == NO";

/// Workflow start states.
pub const INITIAL_STATES: &str = "Initial = YES";

/// Milestones whose date range contains now; nil bounds are open.
pub const ACTIVE_MILESTONES: &str =
    "(StartDate == nil || StartDate < NOW()) AND (EndDate == nil || EndDate > NOW())";

/// Escapes `value` and wraps it in single quotes.
///
/// Backslashes and both quote characters are backslash-escaped so an
/// identifier or name can never terminate the literal early.
pub fn quote(value: &str) -> String {
    let mut quoted = String::with_capacity(value.len() + 2);
    quoted.push('\'');
    for c in value.chars() {
        if matches!(c, '\\' | '\'' | '"') {
            quoted.push('\\');
        }
        quoted.push(c);
    }
    quoted.push('\'');
    quoted
}

/// Components that list `component_id` among their children.
pub fn component_parent(component_id: &str) -> String {
    format!("ANY children.identifier = {}", quote(component_id))
}

/// Components whose parent is `component_id`.
pub fn component_children(component_id: &str) -> String {
    format!("parent.identifier = {}", quote(component_id))
}

/// The component with the given identifier.
pub fn component_by_id(component_id: &str) -> String {
    format!("identifier = {}", quote(component_id))
}

/// States reachable from `state_id`.
pub fn state_transitions(state_id: &str) -> String {
    format!("ANY PreviousStates.identifier = {}", quote(state_id))
}

/// Active milestones that are global or belong to the subtree rooted at the
/// component named `full_name`.
pub fn active_milestones_within(full_name: &str) -> String {
    format!(
        "{} AND (component.identifier == nil OR {} BEGINSWITH component.fullName)",
        ACTIVE_MILESTONES,
        quote(full_name)
    )
}
