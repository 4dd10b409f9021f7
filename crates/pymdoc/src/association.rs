//! Association of docstrings with the statement they document.
//!
//! A string literal statement documents the assignment that immediately
//! precedes it. The rules are kept in a tiny state machine so they can be
//! exercised without a syntax tree.

/// Association state between two visited statements.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub enum AssociationState {
    #[default]
    Idle,
    /// The previous statement assigned to this name.
    AwaitingDoc(String),
}

/// Statement-level events fed by the tree walker.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Event<'a> {
    FunctionDef,
    /// Assignment; carries the documentable name of the first target, if any.
    Assign(Option<&'a str>),
    /// Bare string literal statement.
    StringExpr(&'a str),
    Other,
    /// The walker left a nested block.
    BlockEnd,
}

/// Outcome of a single transition.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Action<'a> {
    Nothing,
    /// The string is the module-level documentation.
    ModuleDoc(&'a str),
    /// The string documents the named assignment.
    Document { name: String, text: &'a str },
}

#[derive(Debug, Clone)]
pub struct Association {
    state: AssociationState,
    first_node: bool,
}

impl Default for Association {
    fn default() -> Self {
        Self::new()
    }
}

impl Association {
    pub fn new() -> Self {
        Self {
            state: AssociationState::Idle,
            first_node: true,
        }
    }

    pub fn state(&self) -> &AssociationState {
        &self.state
    }

    /// Apply one event and report what, if anything, should be emitted.
    pub fn step<'a>(&mut self, event: Event<'a>) -> Action<'a> {
        let previous = std::mem::take(&mut self.state);
        let first_node = match event {
            Event::BlockEnd => false,
            _ => std::mem::replace(&mut self.first_node, false),
        };

        match event {
            Event::Assign(Some(name)) => {
                self.state = AssociationState::AwaitingDoc(name.to_string());
                Action::Nothing
            }
            Event::StringExpr(text) if first_node => Action::ModuleDoc(text),
            Event::StringExpr(text) => match previous {
                AssociationState::AwaitingDoc(name) => Action::Document { name, text },
                AssociationState::Idle => Action::Nothing,
            },
            Event::Assign(None) | Event::FunctionDef | Event::Other | Event::BlockEnd => {
                Action::Nothing
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn string_after_assignment_documents_it() {
        let mut assoc = Association::new();
        assoc.step(Event::Other);
        assert_eq!(assoc.step(Event::Assign(Some("X"))), Action::Nothing);
        assert_eq!(
            assoc.state(),
            &AssociationState::AwaitingDoc("X".to_string())
        );
        assert_eq!(
            assoc.step(Event::StringExpr("Doc B")),
            Action::Document {
                name: "X".to_string(),
                text: "Doc B"
            }
        );
        assert_eq!(assoc.state(), &AssociationState::Idle);
    }

    #[test]
    fn first_string_is_module_doc() {
        let mut assoc = Association::new();
        assert_eq!(
            assoc.step(Event::StringExpr("Module")),
            Action::ModuleDoc("Module")
        );
        assert_eq!(assoc.step(Event::StringExpr("later")), Action::Nothing);
    }

    #[test]
    fn module_doc_only_for_first_statement() {
        let mut assoc = Association::new();
        assoc.step(Event::FunctionDef);
        assert_eq!(assoc.step(Event::StringExpr("late")), Action::Nothing);
    }

    #[test]
    fn assignment_as_first_statement_still_associates() {
        let mut assoc = Association::new();
        assoc.step(Event::Assign(Some("A")));
        assert_eq!(
            assoc.step(Event::StringExpr("doc")),
            Action::Document {
                name: "A".to_string(),
                text: "doc"
            }
        );
    }

    #[test]
    fn intervening_statements_break_association() {
        for breaker in [Event::Other, Event::FunctionDef, Event::BlockEnd, Event::Assign(None)] {
            let mut assoc = Association::new();
            assoc.step(Event::Other);
            assoc.step(Event::Assign(Some("X")));
            assoc.step(breaker);
            assert_eq!(assoc.step(Event::StringExpr("doc")), Action::Nothing);
        }
    }

    #[test]
    fn later_assignment_replaces_pending_name() {
        let mut assoc = Association::new();
        assoc.step(Event::Assign(Some("A")));
        assoc.step(Event::Assign(Some("B")));
        assert_eq!(
            assoc.step(Event::StringExpr("doc")),
            Action::Document {
                name: "B".to_string(),
                text: "doc"
            }
        );
    }

    #[test]
    fn string_consumes_pending_name() {
        let mut assoc = Association::new();
        assoc.step(Event::Assign(Some("A")));
        assoc.step(Event::StringExpr("first"));
        assert_eq!(assoc.step(Event::StringExpr("second")), Action::Nothing);
    }
}
