//! Views, navigation and the route table
//!
//! Commands stand in for the application's views. Moving between them goes
//! through a [`Navigator`], which is also how the session layer redirects a
//! user back to `/login`.

use std::sync::{Arc, Mutex};

use crate::error::{Result, RouteError};
use crate::guard::RouteGuard;

/// Route paths
pub mod routes {
    pub const HOME: &str = "/";
    pub const LOGIN: &str = "/login";
    pub const REGISTER: &str = "/register";
    pub const PROFILE: &str = "/profile";
}

/// Something that can move the user to another view
pub trait Navigator: Send + Sync {
    /// Go to `path`
    fn navigate(&self, path: &str);

    /// Path of the view the user is on
    fn current(&self) -> String;
}

/// Navigator that remembers every transition
#[derive(Debug)]
pub struct History {
    entries: Mutex<Vec<String>>,
}

impl Default for History {
    fn default() -> Self {
        Self {
            entries: Mutex::new(vec![routes::HOME.to_string()]),
        }
    }
}

impl History {
    pub fn new() -> Self {
        Self::default()
    }

    /// All visited paths, oldest first, starting at `/`
    #[allow(dead_code)]
    pub fn entries(&self) -> Vec<String> {
        self.lock().clone()
    }

    /// Paths navigated to after the initial `/`
    #[allow(dead_code)]
    pub fn transitions(&self) -> Vec<String> {
        self.lock().iter().skip(1).cloned().collect()
    }

    fn lock(&self) -> std::sync::MutexGuard<'_, Vec<String>> {
        self.entries.lock().unwrap_or_else(|e| e.into_inner())
    }
}

impl Navigator for History {
    fn navigate(&self, path: &str) {
        log::info!("Navigating to {}", path);
        self.lock().push(path.to_string());
    }

    fn current(&self) -> String {
        self.lock()
            .last()
            .cloned()
            .unwrap_or_else(|| routes::HOME.to_string())
    }
}

/// Application views
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum View {
    Home,
    Login,
    Register,
    Profile,
}

/// Route table entry
#[derive(Debug, Clone, Copy)]
pub struct Route {
    pub path: &'static str,
    pub view: View,
    /// Entry requires the route guard to pass
    pub guarded: bool,
}

/// The application's routes
pub const ROUTES: &[Route] = &[
    Route {
        path: routes::LOGIN,
        view: View::Login,
        guarded: false,
    },
    Route {
        path: routes::REGISTER,
        view: View::Register,
        guarded: false,
    },
    Route {
        path: routes::HOME,
        view: View::Home,
        guarded: false,
    },
    Route {
        path: routes::PROFILE,
        view: View::Profile,
        guarded: true,
    },
];

/// Look up a route; `profile`, `/profile` and `/profile/` are the same path
pub fn resolve(path: &str) -> std::result::Result<&'static Route, RouteError> {
    let trimmed = path.trim().trim_matches('/');
    let normalized = format!("/{}", trimmed);

    ROUTES
        .iter()
        .find(|r| r.path == normalized)
        .ok_or_else(|| RouteError::NotFound(path.to_string()))
}

/// Outcome of opening a route
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Navigation {
    /// The view was entered
    Entered(View),
    /// Entry was denied and the user sent elsewhere
    Redirected(String),
}

/// Opens views, running the guard in front of protected ones
pub struct Router {
    navigator: Arc<dyn Navigator>,
    guard: RouteGuard,
}

impl Router {
    pub fn new(navigator: Arc<dyn Navigator>, guard: RouteGuard) -> Self {
        Self { navigator, guard }
    }

    /// Navigate to `path`
    pub async fn open(&self, path: &str) -> Result<Navigation> {
        let route = resolve(path)?;

        if route.guarded && !self.guard.can_activate().await {
            return Ok(Navigation::Redirected(self.navigator.current()));
        }

        self.navigator.navigate(route.path);
        Ok(Navigation::Entered(route.view))
    }
}
