//! URL query-parameter layer and the navigation intent marker

use crate::content::{Selection, Target, INFORMATION_SLUG};

/// Query key carrying a project slug
pub const PROJECT_PARAM: &str = "project";

/// Read/write access to the single `project`/`information` query parameter
///
/// `push` must not trigger a full navigation or a scroll reset. Changes the
/// host observes (including the engine's own pushes, and back/forward) are
/// reported through `TransitionEngine::on_url_change`.
pub trait QueryParamLayer {
    /// Current parameter, `None` for the bare grid URL
    fn read(&self) -> Option<Target>;

    /// Push a new parameter value (`None` clears it)
    fn push(&mut self, param: Option<&Target>);

    /// Whether the host reports this layer's own pushes back through
    /// `on_url_change`
    ///
    /// `History.pushState` fires no `popstate`, so a browser layer returns
    /// `false` and the engine clears its navigation intent as soon as it
    /// has pushed.
    fn reports_pushes(&self) -> bool {
        true
    }
}

/// Parse a `location.search` string (`?project=harbour`, `?information`)
pub fn parse_query(search: &str) -> Option<Target> {
    let query = search.strip_prefix('?').unwrap_or(search);
    let mut found = None;
    for pair in query.split('&').filter(|p| !p.is_empty()) {
        let (key, value) = pair.split_once('=').unwrap_or((pair, ""));
        if key == PROJECT_PARAM && !value.is_empty() {
            found = Some(Target::parse(value));
        } else if key == INFORMATION_SLUG && found.is_none() {
            found = Some(Target::Information);
        }
    }
    found
}

/// Relative URL for a parameter value; `/` when cleared
pub fn query_url(param: Option<&Target>) -> String {
    match param {
        Some(target) => format!("/?{}={}", PROJECT_PARAM, target.as_query_value()),
        None => "/".to_string(),
    }
}

/// Marker for the selection the engine is driving the URL toward
///
/// While set, URL observations that don't match are the engine's own
/// stale state echoing back and are ignored.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct NavigationIntent {
    target: Selection,
}

impl NavigationIntent {
    pub fn new(target: Selection) -> Self {
        Self { target }
    }

    pub fn target(&self) -> &Selection {
        &self.target
    }

    /// Check whether an observed URL state fulfils this intent
    pub fn matches(&self, observed: &Selection) -> bool {
        &self.target == observed
    }
}

/// In-memory query layer recording every push
#[derive(Clone, Debug, Default)]
pub struct MemoryQuery {
    current: Option<Target>,
    history: Vec<Option<Target>>,
}

impl MemoryQuery {
    pub fn new() -> Self {
        Self::default()
    }

    /// Start at a given parameter (deep link)
    pub fn at(param: Option<Target>) -> Self {
        Self {
            current: param,
            history: Vec::new(),
        }
    }

    /// Every value pushed so far, oldest first
    pub fn history(&self) -> &[Option<Target>] {
        &self.history
    }

    /// Simulate back/forward: change the URL without a push
    pub fn navigate(&mut self, param: Option<Target>) {
        self.current = param;
    }
}

impl QueryParamLayer for MemoryQuery {
    fn read(&self) -> Option<Target> {
        self.current.clone()
    }

    fn push(&mut self, param: Option<&Target>) {
        self.current = param.cloned();
        self.history.push(self.current.clone());
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_intent_matches_only_its_target() {
        let intent = NavigationIntent::new(Selection::Project("harbour".to_string()));
        assert!(intent.matches(&Selection::Project("harbour".to_string())));
        assert!(!intent.matches(&Selection::None));
        assert!(!intent.matches(&Selection::Information));

        let closing = NavigationIntent::new(Selection::None);
        assert!(closing.matches(&Selection::from_param(None)));
    }

    #[test]
    fn test_parse_query() {
        assert_eq!(parse_query(""), None);
        assert_eq!(parse_query("?"), None);
        assert_eq!(parse_query("?project=harbour"), Some(Target::parse("harbour")));
        assert_eq!(parse_query("?utm=x&project=dunes"), Some(Target::parse("dunes")));
        assert_eq!(parse_query("?project=information"), Some(Target::Information));
        assert_eq!(parse_query("?information"), Some(Target::Information));
        assert_eq!(parse_query("?project="), None);
    }

    #[test]
    fn test_query_url_round_trips() {
        let harbour = Target::parse("harbour");
        assert_eq!(query_url(Some(&harbour)), "/?project=harbour");
        assert_eq!(query_url(None), "/");
        let url = query_url(Some(&Target::Information));
        assert_eq!(parse_query(url.trim_start_matches('/')), Some(Target::Information));
    }

    #[test]
    fn test_memory_query_records_pushes() {
        let mut query = MemoryQuery::at(Some(Target::Information));
        assert_eq!(query.read(), Some(Target::Information));

        query.push(Some(&Target::parse("harbour")));
        query.push(None);
        query.navigate(Some(Target::parse("dunes")));

        assert_eq!(query.read(), Some(Target::parse("dunes")));
        assert_eq!(
            query.history(),
            &[Some(Target::parse("harbour")), None]
        );
    }
}
