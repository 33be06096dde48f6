use taskflow::routes::View;

#[test]
fn known_paths_map_exactly() {
    assert_eq!(View::resolve("/"), View::Home);
    assert_eq!(View::resolve("/home"), View::Home);
    assert_eq!(View::resolve("/auth/login"), View::Login);
    assert_eq!(View::resolve("/auth/register"), View::Register);
    assert_eq!(View::resolve("/dashboard"), View::Dashboard);
    assert_eq!(View::resolve("/dashboard/profile"), View::Profile);
}

#[test]
fn unknown_paths_fall_back_to_home() {
    assert_eq!(View::resolve("/unknown/path"), View::Home);
    assert_eq!(View::resolve(""), View::Home);
    assert_eq!(View::resolve("/nope"), View::Home);
    assert_eq!(View::resolve("/auth"), View::Home);
    assert_eq!(View::resolve("/auth/login/extra"), View::Home);
}

#[test]
fn matching_is_exact_not_fuzzy() {
    // Different case is a different path.
    assert_eq!(View::resolve("/DASHBOARD"), View::Home);
    // Trailing slashes are not normalized away.
    assert_eq!(View::resolve("/dashboard/"), View::Home);
    // Query strings and fragments are not stripped.
    assert_eq!(View::resolve("/dashboard?tab=kanban"), View::Home);
    assert_eq!(View::resolve("/home#top"), View::Home);
}

#[test]
fn canonical_paths_round_trip() {
    // Feeding a view's own path back through the dispatcher reproduces the
    // same view: the mapping is a pure total function with no hidden state.
    for view in [
        View::Home,
        View::Login,
        View::Register,
        View::Dashboard,
        View::Profile,
    ] {
        assert_eq!(View::resolve(view.path()), view);
    }
}

#[test]
fn repeated_resolution_is_stable() {
    for path in ["/", "/home", "/auth/login", "/weird", ""] {
        assert_eq!(View::resolve(path), View::resolve(path));
    }
}

#[test]
fn auth_guard_covers_dashboard_and_profile_only() {
    assert!(View::Dashboard.requires_auth());
    assert!(View::Profile.requires_auth());
    assert!(!View::Home.requires_auth());
    assert!(!View::Login.requires_auth());
    assert!(!View::Register.requires_auth());
}
