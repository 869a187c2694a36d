//! Static route records.
//!
//! Records nest the way the admin layout does: the `/` layout requires a
//! session, and every child inherits that requirement.

use std::fmt;
use std::str::FromStr;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum RouteName {
    Login,
    Dashboard,
    Category,
    SubCategory,
    Product,
}

impl RouteName {
    pub const ALL: [RouteName; 5] = [
        RouteName::Login,
        RouteName::Dashboard,
        RouteName::Category,
        RouteName::SubCategory,
        RouteName::Product,
    ];

    pub fn as_str(&self) -> &'static str {
        match self {
            RouteName::Login => "login",
            RouteName::Dashboard => "dashboard",
            RouteName::Category => "category",
            RouteName::SubCategory => "sub-category",
            RouteName::Product => "product",
        }
    }
}

impl fmt::Display for RouteName {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for RouteName {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        RouteName::ALL
            .into_iter()
            .find(|name| name.as_str() == s)
            .ok_or_else(|| format!("unknown route name: {}", s))
    }
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct RouteMeta {
    pub requires_auth: bool,
}

#[derive(Debug, Clone)]
pub struct RouteRecord {
    /// Absolute (`/login`) or relative to the parent (`dashboard`, `""`)
    pub path: &'static str,
    pub name: Option<RouteName>,
    pub meta: RouteMeta,
    pub redirect: Option<&'static str>,
    pub children: Vec<RouteRecord>,
}

impl RouteRecord {
    pub fn new(path: &'static str) -> Self {
        Self {
            path,
            name: None,
            meta: RouteMeta::default(),
            redirect: None,
            children: Vec::new(),
        }
    }

    pub fn named(mut self, name: RouteName) -> Self {
        self.name = Some(name);
        self
    }

    pub fn requires_auth(mut self) -> Self {
        self.meta.requires_auth = true;
        self
    }

    pub fn redirect(mut self, to: &'static str) -> Self {
        self.redirect = Some(to);
        self
    }

    pub fn children(mut self, children: Vec<RouteRecord>) -> Self {
        self.children = children;
        self
    }
}

/// A path matched against the table, with metadata merged down from every
/// matched ancestor.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ResolvedRoute {
    pub path: String,
    pub name: Option<RouteName>,
    pub requires_auth: bool,
    pub redirect: Option<&'static str>,
    /// The path originally asked for, when the navigation was redirected
    pub redirected_from: Option<String>,
}

impl ResolvedRoute {
    pub fn is(&self, name: RouteName) -> bool {
        self.name == Some(name)
    }
}

#[derive(Debug, Clone)]
pub struct RouteTable {
    records: Vec<RouteRecord>,
}

impl RouteTable {
    pub fn new(records: Vec<RouteRecord>) -> Self {
        Self { records }
    }

    /// The admin app's routes
    pub fn admin() -> Self {
        Self::new(vec![
            RouteRecord::new("/login").named(RouteName::Login),
            RouteRecord::new("/").requires_auth().children(vec![
                RouteRecord::new("").redirect("/dashboard"),
                RouteRecord::new("dashboard").named(RouteName::Dashboard),
                RouteRecord::new("category").named(RouteName::Category),
                RouteRecord::new("sub-category").named(RouteName::SubCategory),
                RouteRecord::new("product").named(RouteName::Product),
            ]),
        ])
    }

    pub fn resolve(&self, path: &str) -> Option<ResolvedRoute> {
        let path = normalize(path);
        find(&self.records, "", false, &path)
    }

    pub fn path_of(&self, name: RouteName) -> Option<String> {
        find_name(&self.records, "", name)
    }
}

/// Strip query, fragment and trailing slash; ensure a leading slash.
pub(crate) fn normalize(path: &str) -> String {
    let path = path.split(['?', '#']).next().unwrap_or("");
    let trimmed = path.trim_matches('/');
    format!("/{}", trimmed)
}

fn join(parent: &str, child: &str) -> String {
    if child.starts_with('/') {
        normalize(child)
    } else if child.is_empty() {
        normalize(parent)
    } else {
        normalize(&format!("{}/{}", parent.trim_end_matches('/'), child))
    }
}

/// Depth-first; the deepest matching record wins.
fn find(records: &[RouteRecord], parent: &str, inherited_auth: bool, path: &str) -> Option<ResolvedRoute> {
    for record in records {
        let full = join(parent, record.path);
        let requires_auth = inherited_auth || record.meta.requires_auth;

        if let Some(child) = find(&record.children, &full, requires_auth, path) {
            return Some(child);
        }
        if full == path {
            return Some(ResolvedRoute {
                path: full,
                name: record.name,
                requires_auth,
                redirect: record.redirect,
                redirected_from: None,
            });
        }
    }
    None
}

fn find_name(records: &[RouteRecord], parent: &str, name: RouteName) -> Option<String> {
    records.iter().find_map(|record| {
        let full = join(parent, record.path);
        if record.name == Some(name) {
            Some(full)
        } else {
            find_name(&record.children, &full, name)
        }
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_normalize() {
        assert_eq!(normalize(""), "/");
        assert_eq!(normalize("/"), "/");
        assert_eq!(normalize("dashboard/"), "/dashboard");
        assert_eq!(normalize("/category?page=2#top"), "/category");
    }

    #[test]
    fn test_root_redirects_to_dashboard() {
        let table = RouteTable::admin();
        let root = table.resolve("/").unwrap();
        assert_eq!(root.redirect, Some("/dashboard"));
        assert!(root.requires_auth);
    }

    #[test]
    fn test_children_inherit_requires_auth() {
        let table = RouteTable::admin();
        for path in ["/dashboard", "/category", "/sub-category", "/product"] {
            let route = table.resolve(path).unwrap();
            assert!(route.requires_auth, "{} should require auth", path);
            assert!(route.name.is_some());
        }
    }

    #[test]
    fn test_login_is_public() {
        let table = RouteTable::admin();
        let login = table.resolve("/login").unwrap();
        assert!(login.is(RouteName::Login));
        assert!(!login.requires_auth);
    }

    #[test]
    fn test_unknown_path() {
        assert!(RouteTable::admin().resolve("/settings").is_none());
    }

    #[test]
    fn test_path_of() {
        let table = RouteTable::admin();
        assert_eq!(table.path_of(RouteName::Login).as_deref(), Some("/login"));
        assert_eq!(table.path_of(RouteName::Dashboard).as_deref(), Some("/dashboard"));
        assert_eq!(table.path_of(RouteName::SubCategory).as_deref(), Some("/sub-category"));
    }

    #[test]
    fn test_route_name_round_trip_through_str() {
        for name in RouteName::ALL {
            assert_eq!(name.as_str().parse::<RouteName>().unwrap(), name);
        }
        assert!("nope".parse::<RouteName>().is_err());
    }
}
