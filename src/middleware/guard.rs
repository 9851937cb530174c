// Route guard decision table. Dashboard access follows the flag alone; the admin area follows the role.
use super::session::ViewState;

pub const LOGIN: &str = "/login";
pub const DASHBOARD: &str = "/dashboard";
pub const PRE_DASHBOARD: &str = "/pre-dashboard";

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Route {
    Render,
    Redirect(&'static str),
}

pub fn is_public(path: &str) -> bool {
    matches!(
        path,
        "/" | "/login" | "/register" | "/health" | "/auth/login" | "/auth/register" | "/auth/logout"
    ) || path.starts_with("/static/")
        || path.starts_with("/api/proxy")
}

fn in_area(path: &str, area: &str) -> bool {
    path == area || path.strip_prefix(area).is_some_and(|rest| rest.starts_with('/'))
}

fn is_admin_area(path: &str) -> bool {
    in_area(path, "/admin")
}

// Lead endpoints belong to the dashboard.
fn is_dashboard_area(path: &str) -> bool {
    path == DASHBOARD || in_area(path, "/leads")
}

fn is_gate_area(path: &str) -> bool {
    path == PRE_DASHBOARD || in_area(path, "/training")
}

pub fn decide(view: ViewState, path: &str) -> Route {
    let (is_admin, has_access) = match view {
        ViewState::Guest => return Route::Redirect(LOGIN),
        ViewState::Admin { dashboard_access } => (true, dashboard_access),
        ViewState::Hunter { dashboard_access } => (false, dashboard_access),
    };

    if is_admin_area(path) && !is_admin {
        return Route::Redirect(DASHBOARD);
    }
    if is_dashboard_area(path) && !has_access {
        return Route::Redirect(PRE_DASHBOARD);
    }
    if is_gate_area(path) && has_access {
        return Route::Redirect(DASHBOARD);
    }
    Route::Render
}
