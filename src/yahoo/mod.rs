//! Yahoo endpoints, the OAuth2 client and the caching HTTP layer.

pub mod http;
pub mod oauth;

/// Where the operator grants access to the application.
pub const AUTH_BASE_URL: &str = "https://api.login.yahoo.com/oauth2/request_auth";

/// Code exchange and token refresh endpoint.
pub const ACCESS_TOKEN_URL: &str = "https://api.login.yahoo.com/oauth2/get_token";

/// Base path for Yahoo Fantasy Sports v2 resources.
pub const FANTASY_BASE_URL: &str = "https://fantasysports.yahooapis.com/fantasy/v2";

/// Resource URL for a game, e.g. `game_url("nfl")`.
pub fn game_url(game_code: &str) -> String {
    format!("{FANTASY_BASE_URL}/game/{game_code}")
}
