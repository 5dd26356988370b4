//! The Chess.com published-data endpoints.
//!
//! Every endpoint exists in three forms, all generated from the single table
//! below:
//!
//! - a free function returning the [`Resource`] for the call, without I/O,
//! - a method of the same name on [`Client`](crate::Client) and
//!   [`BlockingClient`](crate::BlockingClient) that performs the call,
//! - an entry in [`CATALOG`], which feeds the [`registry`](crate::registry()).
//!
//! Path parameters are inserted verbatim; callers are responsible for
//! passing valid identifiers.

use crate::options::CallOptions;
use crate::registry::EndpointDef;
use crate::resource::Resource;
use crate::{BlockingClient, Client, Response, Result};
use std::fmt::{self, Display};

/// A month of a player's game archive, rendered as `YYYY/MM`.
///
/// # Examples
///
/// ```
/// use chessdotcom::YearMonth;
///
/// assert_eq!(YearMonth::new(2024, 3).to_string(), "2024/03");
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct YearMonth {
    pub year: i32,
    pub month: u32,
}

impl YearMonth {
    pub fn new(year: i32, month: u32) -> Self {
        Self { year, month }
    }
}

impl Display for YearMonth {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{:04}/{:02}", self.year, self.month)
    }
}

macro_rules! endpoints {
    (@attr) => { None };
    (@attr $attr:literal) => { Some($attr) };
    (@no_json) => { false };
    (@no_json $no_json:literal) => { $no_json };
    (@def $name:ident [$($param:ident),*] $template:literal [$($attr:literal)?] [$($no_json:literal)?]) => {
        EndpointDef {
            name: stringify!($name),
            template: $template,
            params: &[$(stringify!($param)),*],
            top_level_attribute: endpoints!(@attr $($attr)?),
            no_json: endpoints!(@no_json $($no_json)?),
        }
    };
    ($(
        $(#[$meta:meta])*
        $name:ident($($param:ident),*) => $template:literal
            $(, top_level = $attr:literal)?
            $(, no_json = $no_json:literal)?;
    )*) => {
        /// Every endpoint, in declaration order.
        pub static CATALOG: &[EndpointDef] = &[
            $(endpoints!(@def $name [$($param),*] $template [$($attr)?] [$($no_json)?]),)*
        ];

        $(
            $(#[$meta])*
            pub fn $name($($param: impl Display,)* options: CallOptions) -> Resource {
                const DEF: EndpointDef =
                    endpoints!(@def $name [$($param),*] $template [$($attr)?] [$($no_json)?]);
                let args: Vec<String> = vec![$($param.to_string()),*];
                DEF.resource(&args, options)
            }
        )*

        impl Client {
            $(
                $(#[$meta])*
                pub async fn $name(&self, $($param: impl Display,)* options: CallOptions) -> Result<Response> {
                    let mut resource = $name($($param,)* options);
                    self.do_get_request(&mut resource).await
                }
            )*
        }

        impl BlockingClient {
            $(
                $(#[$meta])*
                pub fn $name(&self, $($param: impl Display,)* options: CallOptions) -> Result<Response> {
                    let mut resource = $name($($param,)* options);
                    self.do_get_request(&mut resource)
                }
            )*
        }
    };
}

endpoints! {
    /// Profile of a player.
    get_player_profile(username) => "/player/{username}";

    /// Usernames of all players holding a title (`GM`, `WGM`, `IM`, ...).
    get_titled_players(title_abbrev) => "/titled/{title_abbrev}";

    /// Ratings, win/loss records and other stats of a player.
    get_player_stats(username) => "/player/{username}/stats";

    /// Whether a player has been online in the last five minutes.
    is_player_online(username) => "/player/{username}/is-online";

    /// Daily Chess games a player is currently playing.
    get_player_current_games(username) => "/player/{username}/games", top_level = "games";

    /// Daily Chess games where it is the player's turn to act.
    get_player_current_games_to_move(username) => "/player/{username}/games/to-move";

    /// URLs of the monthly archives available for a player.
    get_player_game_archives(username) => "/player/{username}/games/archives", top_level = "archives";

    /// Live and Daily games a player finished in a given month.
    get_player_games_by_month(username, date) => "/player/{username}/games/{date}", top_level = "games";

    /// A month of a player's games as multi-game PGN text.
    get_player_games_by_month_pgn(username, date) => "/player/{username}/games/{date}/pgn", no_json = true;

    /// Clubs a player is a member of.
    get_player_clubs(username) => "/player/{username}/clubs", top_level = "clubs";

    /// Team matches a player has attended, is playing or is registered for.
    get_player_team_matches(username) => "/player/{username}/matches", top_level = "matches";

    /// Tournaments a player has attended, is playing or is registered for.
    get_player_tournaments(username) => "/player/{username}/tournaments", top_level = "tournaments";

    /// Details of a club, by its URL identifier.
    get_club_details(url_id) => "/club/{url_id}", top_level = "club";

    /// Members of a club, grouped by activity.
    get_club_members(url_id) => "/club/{url_id}/members", top_level = "members";

    /// Daily and club matches of a club.
    get_club_matches(url_id) => "/club/{url_id}/matches", top_level = "matches";

    /// Details of a tournament.
    get_tournament_details(url_id) => "/tournament/{url_id}", top_level = "tournament";

    /// Details of a tournament round.
    get_tournament_round(url_id, round_num) => "/tournament/{url_id}/{round_num}", top_level = "tournament_round";

    /// Details of a group within a tournament round.
    get_tournament_round_group_details(url_id, round_num, group_num) =>
        "/tournament/{url_id}/{round_num}/{group_num}", top_level = "tournament_round_group";

    /// Details of a daily team match and its players.
    get_team_match(match_id) => "/match/{match_id}", top_level = "match";

    /// Details of one board of a daily team match.
    get_team_match_board(match_id, board_num) => "/match/{match_id}/{board_num}", top_level = "match_board";

    /// Details of a live team match and its players.
    get_team_match_live(match_id) => "/match/live/{match_id}", top_level = "match";

    /// Details of one board of a live team match.
    get_team_match_live_board(match_id, board_num) => "/match/live/{match_id}/{board_num}", top_level = "match_board";

    /// Details of a country, by ISO 3166 code.
    get_country_details(iso) => "/country/{iso}", top_level = "country";

    /// Usernames of players who list a country as their own.
    get_country_players(iso) => "/country/{iso}/players", top_level = "players";

    /// URLs of the clubs based in a country.
    get_country_clubs(iso) => "/country/{iso}/clubs", top_level = "clubs";

    /// The current daily puzzle.
    get_current_daily_puzzle() => "/puzzle", top_level = "puzzle";

    /// A randomly picked daily puzzle.
    get_random_daily_puzzle() => "/puzzle/random", top_level = "puzzle";

    /// Chess.com streamers.
    get_streamers() => "/streamers";

    /// Top 50 players for daily and live games, tactics and lessons.
    get_leaderboards() => "/leaderboards", top_level = "leaderboards";
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::options::RequestOptions;
    use std::time::Duration;

    #[test]
    fn test_builders_fill_templates() {
        let options = CallOptions::default;

        assert_eq!(get_player_profile("fabianocaruana", options()).uri, "/player/fabianocaruana");
        assert_eq!(get_titled_players("GM", options()).uri, "/titled/GM");
        assert_eq!(
            get_tournament_round_group_details("-33rd-chesscom-quick-knockouts-1401-1600", 1, 2, options()).uri,
            "/tournament/-33rd-chesscom-quick-knockouts-1401-1600/1/2"
        );
        assert_eq!(get_team_match_live_board(5833, 5, options()).uri, "/match/live/5833/5");
        assert_eq!(get_current_daily_puzzle(options()).uri, "/puzzle");
    }

    #[test]
    fn test_monthly_archives() {
        let resource = get_player_games_by_month("fabianocaruana", YearMonth::new(2020, 5), CallOptions::default());
        assert_eq!(resource.uri, "/player/fabianocaruana/games/2020/05");
        assert_eq!(resource.top_level_attribute.as_deref(), Some("games"));
        assert!(!resource.no_json);

        let pgn = get_player_games_by_month_pgn("fabianocaruana", YearMonth::new(2020, 5), CallOptions::default());
        assert_eq!(pgn.uri, "/player/fabianocaruana/games/2020/05/pgn");
        assert!(pgn.no_json);
        assert!(pgn.top_level_attribute.is_none());
    }

    #[test]
    fn test_builder_carries_call_options() {
        let options = CallOptions::new()
            .tts(Duration::from_secs(2))
            .request_options(RequestOptions::new().with_header("x-trace", "1").unwrap());

        let resource = get_random_daily_puzzle(options);

        assert_eq!(resource.tts, Duration::from_secs(2));
        assert_eq!(resource.request_options.headers["x-trace"], "1");
        assert_eq!(resource.top_level_attribute.as_deref(), Some("puzzle"));
        assert_eq!(resource.times_requested, 0);
    }

    #[test]
    fn test_catalog_is_consistent() {
        let mut names: Vec<_> = CATALOG.iter().map(|endpoint| endpoint.name).collect();
        names.sort_unstable();
        names.dedup();
        assert_eq!(names.len(), CATALOG.len());

        for endpoint in CATALOG {
            assert!(endpoint.template.starts_with('/'), "{}", endpoint.name);
            assert_eq!(endpoint.template.matches('{').count(), endpoint.params.len(), "{}", endpoint.name);
            for param in endpoint.params {
                assert!(endpoint.template.contains(&format!("{{{}}}", param)), "{}", endpoint.name);
            }
        }
    }

    #[test]
    fn test_typed_and_dynamic_builders_agree() {
        let typed = get_team_match_board(12803, 1, CallOptions::default());
        let dynamic = crate::registry()
            .build("get_team_match_board", &["12803", "1"], CallOptions::default())
            .unwrap();

        assert_eq!(typed.uri, dynamic.uri);
        assert_eq!(typed.top_level_attribute, dynamic.top_level_attribute);
    }

    #[test]
    fn test_list_endpoints_without_top_level() {
        assert!(get_streamers(CallOptions::default()).top_level_attribute.is_none());
        assert!(get_titled_players("GM", CallOptions::default()).top_level_attribute.is_none());
        assert!(get_player_current_games_to_move("hikaru", CallOptions::default())
            .top_level_attribute
            .is_none());
    }
}
