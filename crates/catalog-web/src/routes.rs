//! The route table: URL path patterns and the views they render.
//!
//! [`ROUTES`] is the single source of truth. The Axum router is built from
//! it (see [`build_router`](crate::router::build_router)) and the docs view
//! lists it. Patterns use Axum's `{param}` / `{*wildcard}` syntax.

use serde::Serialize;

/// A page the client can render.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
pub enum ViewKind {
    /// Paginated server list.
    Home,
    /// One server's detail record.
    ServerDetail,
    /// Search form and results.
    Search,
    /// Static documentation page.
    Docs,
    /// Catch-all for unmatched paths.
    NotFound,
}

impl ViewKind {
    /// Every view, in route-table order.
    pub const ALL: [Self; 5] = [
        Self::Home,
        Self::ServerDetail,
        Self::Search,
        Self::Docs,
        Self::NotFound,
    ];

    /// Stable view name, exposed to templates as `view`.
    pub const fn name(self) -> &'static str {
        match self {
            Self::Home => "Home",
            Self::ServerDetail => "ServerDetail",
            Self::Search => "Search",
            Self::Docs => "Docs",
            Self::NotFound => "NotFound",
        }
    }

    /// Template file rendered for this view.
    pub const fn template(self) -> &'static str {
        match self {
            Self::Home => "home.html",
            Self::ServerDetail => "server_detail.html",
            Self::Search => "search.html",
            Self::Docs => "docs.html",
            Self::NotFound => "not_found.html",
        }
    }
}

/// One row of the route table.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct RouteDef {
    /// Axum path pattern.
    pub pattern: &'static str,
    /// View rendered for matching requests.
    pub view: ViewKind,
}

/// The route table. Static and parameterised routes win over the trailing
/// catch-all, so anything unmatched lands on [`ViewKind::NotFound`].
pub const ROUTES: [RouteDef; 5] = [
    RouteDef {
        pattern: "/",
        view: ViewKind::Home,
    },
    RouteDef {
        pattern: "/server/{id}",
        view: ViewKind::ServerDetail,
    },
    RouteDef {
        pattern: "/search",
        view: ViewKind::Search,
    },
    RouteDef {
        pattern: "/docs",
        view: ViewKind::Docs,
    },
    RouteDef {
        pattern: "/{*path}",
        view: ViewKind::NotFound,
    },
];

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn every_view_has_exactly_one_route() {
        for view in ViewKind::ALL {
            let count = ROUTES.iter().filter(|r| r.view == view).count();
            assert_eq!(count, 1, "{} should have one route", view.name());
        }
    }

    #[test]
    fn catch_all_is_last() {
        assert_eq!(ROUTES.last().map(|r| r.view), Some(ViewKind::NotFound));
    }

    #[test]
    fn templates_are_distinct() {
        let mut templates: Vec<&str> = ViewKind::ALL.iter().map(|v| v.template()).collect();
        templates.sort_unstable();
        templates.dedup();
        assert_eq!(templates.len(), ViewKind::ALL.len());
    }
}
