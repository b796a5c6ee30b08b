//! Screen-graph state machine gated by the session.

use crate::models::Event;
use crate::session::Session;
use thiserror::Error;

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Graph {
    Unauthenticated,
    Authenticated,
}

/// A route plus its parameters. Details and Edit carry the full event record.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum Screen {
    SignIn,
    SignUp,
    EventList,
    AddEvent,
    EventDetails(Event),
    EditEvent(Event),
    Favorites,
}

impl Screen {
    pub fn graph(&self) -> Graph {
        match self {
            Screen::SignIn | Screen::SignUp => Graph::Unauthenticated,
            _ => Graph::Authenticated,
        }
    }

    pub fn title(&self) -> &'static str {
        match self {
            Screen::SignIn => "Sign In",
            Screen::SignUp => "Sign Up",
            Screen::EventList => "Event List",
            Screen::AddEvent => "Add Event",
            Screen::EventDetails(_) => "Event Details",
            Screen::EditEvent(_) => "Edit Event",
            Screen::Favorites => "Favorites",
        }
    }

    fn root(graph: Graph) -> Screen {
        match graph {
            Graph::Unauthenticated => Screen::SignIn,
            Graph::Authenticated => Screen::EventList,
        }
    }
}

#[derive(Clone, Debug, PartialEq, Eq)]
pub enum NavCommand {
    Push(Screen),
    Replace(Screen),
    Back,
}

#[derive(Clone, Debug, Error, PartialEq, Eq)]
pub enum NavError {
    #[error("{screen} is not reachable while {graph:?}")]
    OutsideGraph { screen: &'static str, graph: Graph },
}

/// Never shown: Back stops at the root and every reset pushes one.
static EMPTY_STACK: Screen = Screen::SignIn;

#[derive(Clone, Debug)]
pub struct Navigator {
    graph: Graph,
    stack: Vec<Screen>,
}

impl Default for Navigator {
    fn default() -> Self {
        Self::new()
    }
}

impl Navigator {
    /// Unauthenticated at SignIn until the first session emission.
    pub fn new() -> Self {
        Self {
            graph: Graph::Unauthenticated,
            stack: vec![Screen::SignIn],
        }
    }

    pub fn graph(&self) -> Graph {
        self.graph
    }

    pub fn current(&self) -> &Screen {
        self.stack.last().unwrap_or(&EMPTY_STACK)
    }

    pub fn stack(&self) -> &[Screen] {
        &self.stack
    }

    pub fn can_go_back(&self) -> bool {
        self.stack.len() > 1
    }

    /// Switch graphs on a session emission. Returns whether anything changed; an emission that
    /// keeps the current graph leaves the stack alone.
    pub fn on_session(&mut self, session: &Session) -> bool {
        let graph = if session.is_signed_in() {
            Graph::Authenticated
        } else {
            Graph::Unauthenticated
        };
        if graph == self.graph {
            return false;
        }
        log::debug!("navigator: {:?} -> {:?}", self.graph, graph);
        self.graph = graph;
        self.stack = vec![Screen::root(graph)];
        true
    }

    pub fn apply(&mut self, command: NavCommand) -> Result<(), NavError> {
        match command {
            NavCommand::Push(screen) => {
                self.check(&screen)?;
                self.stack.push(screen);
            }
            NavCommand::Replace(screen) => {
                self.check(&screen)?;
                if self.stack.len() > 1 {
                    self.stack.pop();
                    self.stack.push(screen);
                } else {
                    self.stack = vec![screen];
                }
            }
            NavCommand::Back => {
                if self.can_go_back() {
                    self.stack.pop();
                }
            }
        }
        Ok(())
    }

    fn check(&self, screen: &Screen) -> Result<(), NavError> {
        if screen.graph() != self.graph {
            return Err(NavError::OutsideGraph {
                screen: screen.title(),
                graph: self.graph,
            });
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::ids::UserId;
    use crate::models::SessionUser;
    use pretty_assertions::assert_eq;

    fn alice() -> Session {
        Session::signed_in(SessionUser {
            uid: UserId::parse("alice").unwrap(),
            email: None,
        })
    }

    #[test]
    fn starts_unauthenticated_at_sign_in() {
        let nav = Navigator::new();
        assert_eq!(nav.graph(), Graph::Unauthenticated);
        assert_eq!(nav.current(), &Screen::SignIn);
    }

    #[test]
    fn sign_in_resets_to_event_list_and_sign_out_back_to_sign_in() {
        let mut nav = Navigator::new();
        nav.apply(NavCommand::Push(Screen::SignUp)).unwrap();
        assert!(nav.on_session(&alice()));
        assert_eq!(nav.stack(), &[Screen::EventList]);
        nav.apply(NavCommand::Push(Screen::Favorites)).unwrap();
        assert!(!nav.on_session(&alice()));
        assert_eq!(nav.current(), &Screen::Favorites);
        assert!(nav.on_session(&Session::signed_out()));
        assert_eq!(nav.stack(), &[Screen::SignIn]);
    }

    #[test]
    fn rejects_screens_outside_graph() {
        let mut nav = Navigator::new();
        assert_eq!(
            nav.apply(NavCommand::Push(Screen::EventList)),
            Err(NavError::OutsideGraph {
                screen: "Event List",
                graph: Graph::Unauthenticated
            })
        );
        nav.on_session(&alice());
        assert!(nav.apply(NavCommand::Replace(Screen::SignIn)).is_err());
        assert_eq!(nav.stack(), &[Screen::EventList]);
    }

    #[test]
    fn back_at_root_is_noop_and_replace_swaps_top() {
        let mut nav = Navigator::new();
        nav.on_session(&alice());
        nav.apply(NavCommand::Back).unwrap();
        assert_eq!(nav.stack(), &[Screen::EventList]);
        nav.apply(NavCommand::Push(Screen::AddEvent)).unwrap();
        nav.apply(NavCommand::Replace(Screen::Favorites)).unwrap();
        assert_eq!(nav.stack(), &[Screen::EventList, Screen::Favorites]);
        nav.apply(NavCommand::Back).unwrap();
        assert_eq!(nav.current(), &Screen::EventList);
    }
}
