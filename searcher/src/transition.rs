//! Edges of the search space.

/// A transition between two states, optionally labelled by the action
/// which produces it.
///
/// Transitions are produced by a [crate::TransitionFunction] and priced by a
/// [crate::CostFunction]. The only transition without a source is the one
/// which introduces the start state of a search.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct Transition<S, A> {
    action: Option<A>,
    from: Option<S>,
    to: S,
}

impl<S, A> Transition<S, A> {
    /// An unlabelled transition between two states.
    pub fn new(from: S, to: S) -> Self {
        Self {
            action: None,
            from: Some(from),
            to,
        }
    }

    /// A transition produced by applying `action` in `from`.
    pub fn with_action(action: A, from: S, to: S) -> Self {
        Self {
            action: Some(action),
            from: Some(from),
            to,
        }
    }

    /// The transition which enters the start state.
    pub fn start(to: S) -> Self {
        Self {
            action: None,
            from: None,
            to,
        }
    }

    pub fn action(&self) -> Option<&A> {
        self.action.as_ref()
    }

    pub fn from(&self) -> Option<&S> {
        self.from.as_ref()
    }

    pub fn to(&self) -> &S {
        &self.to
    }

    /// Split into `(action, from, to)`.
    pub fn into_parts(self) -> (Option<A>, Option<S>, S) {
        (self.action, self.from, self.to)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parts() {
        let t: Transition<char, &str> = Transition::with_action("east", 'a', 'b');
        assert_eq!(t.action(), Some(&"east"));
        assert_eq!(t.from(), Some(&'a'));
        assert_eq!(t.to(), &'b');

        let s: Transition<char, ()> = Transition::start('a');
        assert_eq!(s.from(), None);
        assert_eq!(s.into_parts(), (None, None, 'a'));
    }
}
