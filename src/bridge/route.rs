//! The interception table: which (verb, path) pairs are served locally.
//!
//! Anything not listed here goes to the network untouched.

use std::fmt;

use super::form::FormData;

/// Request method.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Verb {
    Get,
    Post,
    Put,
    Patch,
    Delete,
    Other(String),
}

impl From<&str> for Verb {
    fn from(verb: &str) -> Self {
        match verb.to_ascii_uppercase().as_str() {
            "GET" => Verb::Get,
            "POST" => Verb::Post,
            "PUT" => Verb::Put,
            "PATCH" => Verb::Patch,
            "DELETE" => Verb::Delete,
            other => Verb::Other(other.to_string()),
        }
    }
}

impl fmt::Display for Verb {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Verb::Get => write!(f, "GET"),
            Verb::Post => write!(f, "POST"),
            Verb::Put => write!(f, "PUT"),
            Verb::Patch => write!(f, "PATCH"),
            Verb::Delete => write!(f, "DELETE"),
            Verb::Other(v) => write!(f, "{}", v),
        }
    }
}

/// An outgoing request about to be sent by the page.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct InterceptedRequest {
    pub verb: Verb,
    pub path: String,
    /// Declared swap target, e.g. `#result`.
    pub target: Option<String>,
    /// Fields of the form that triggered the request.
    pub form: FormData,
    /// Id of the triggering element, reset after a successful add.
    pub source: Option<String>,
}

impl InterceptedRequest {
    pub fn new(verb: impl Into<Verb>, path: impl Into<String>) -> Self {
        Self {
            verb: verb.into(),
            path: path.into(),
            target: None,
            form: FormData::new(),
            source: None,
        }
    }

    pub fn target(mut self, target: impl Into<String>) -> Self {
        self.target = Some(target.into());
        self
    }

    pub fn form(mut self, form: FormData) -> Self {
        self.form = form;
        self
    }

    pub fn source(mut self, source: impl Into<String>) -> Self {
        self.source = Some(source.into());
        self
    }
}

/// What a matched route does locally.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RouteAction {
    SelectRandom,
    ShowManage,
    AddOption,
    DeleteOption,
    CloseModal,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PathPattern {
    Exact(&'static str),
    /// Matches `prefix{param}` where `param` is one non-empty segment.
    Prefix(&'static str),
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Route {
    pub verb: &'static str,
    pub pattern: PathPattern,
    pub action: RouteAction,
}

pub const ROUTES: &[Route] = &[
    Route {
        verb: "POST",
        pattern: PathPattern::Exact("/api/random"),
        action: RouteAction::SelectRandom,
    },
    Route {
        verb: "GET",
        pattern: PathPattern::Exact("/manage/options"),
        action: RouteAction::ShowManage,
    },
    Route {
        verb: "POST",
        pattern: PathPattern::Exact("/api/options"),
        action: RouteAction::AddOption,
    },
    Route {
        verb: "DELETE",
        pattern: PathPattern::Prefix("/api/options/"),
        action: RouteAction::DeleteOption,
    },
    Route {
        verb: "GET",
        pattern: PathPattern::Exact("/close-modal"),
        action: RouteAction::CloseModal,
    },
];

/// A resolved route with its path parameter, if the pattern has one.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RouteMatch {
    pub action: RouteAction,
    pub param: Option<String>,
}

impl PathPattern {
    fn matches(&self, path: &str) -> Option<Option<String>> {
        match self {
            PathPattern::Exact(expected) => (path == *expected).then_some(None),
            // the parameter is the last segment below the prefix
            PathPattern::Prefix(prefix) => path
                .strip_prefix(prefix)
                .and_then(|rest| rest.rsplit('/').find(|segment| !segment.is_empty()))
                .map(|segment| Some(segment.to_string())),
        }
    }
}

/// Look up the local action for a request. The query string is ignored.
pub fn resolve(verb: &Verb, path: &str) -> Option<RouteMatch> {
    let path = path.split(['?', '#']).next().unwrap_or(path);
    let verb = verb.to_string();

    ROUTES.iter().find_map(|route| {
        if route.verb != verb {
            return None;
        }
        route.pattern.matches(path).map(|param| RouteMatch {
            action: route.action,
            param,
        })
    })
}
